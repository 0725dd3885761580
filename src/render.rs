//! Screen draw passes
//!
//! Draw colour codes are `0xABCD` nibbles: D is the fill, C the outline;
//! 0 is transparent and 1-4 pick palette colours 1-4.

use crate::consts::*;
use crate::platform::Host;
use crate::sim::{GameState, Screen};

/// Vertical advance between text lines
const LINE_STEP: i32 = FONT_SIZE + 3;
const TEXT_X: i32 = 5;
const TEXT_Y: i32 = 5;

/// Clear the background with the colour in draw colour slot 1
pub fn clear_background<H: Host + ?Sized>(host: &mut H) {
    let palette_color = host.draw_colors() & 0b1111;
    let color_index = (palette_color.wrapping_sub(1) & 0b11) as u8;
    host.fill_framebuffer(color_index);
}

/// Flowing block of left-aligned text lines
struct TextBlock {
    x: i32,
    y: i32,
    started: bool,
}

impl TextBlock {
    fn new() -> Self {
        Self {
            x: TEXT_X,
            y: TEXT_Y,
            started: false,
        }
    }

    fn advance(&mut self) {
        if self.started {
            self.y += LINE_STEP;
        }
        self.started = true;
    }

    fn line<H: Host + ?Sized>(&mut self, host: &mut H, text: &str) {
        self.advance();
        host.text(text, self.x, self.y);
    }

    /// Text line ending with a number: `"<n> <suffix>"` on one baseline
    fn number_line<H: Host + ?Sized>(&mut self, host: &mut H, n: usize, suffix: &str) {
        self.advance();
        let digits = n.to_string();
        host.text(&digits, self.x, self.y);
        host.text(
            suffix,
            self.x + FONT_SIZE * (1 + digits.len() as i32),
            self.y,
        );
    }

    fn blank(&mut self) {
        self.y += LINE_STEP;
    }
}

/// Draw the current screen
pub fn draw_screen<H: Host + ?Sized>(state: &GameState, host: &mut H) {
    match state.screen {
        Screen::Help => draw_help(host),
        Screen::Play => draw_play(state, host),
        Screen::GameOver => draw_game_over(state, host),
    }
}

pub fn draw_help<H: Host + ?Sized>(host: &mut H) {
    let mut block = TextBlock::new();

    host.set_draw_colors(0x04);
    block.line(host, "Welcome to the");
    block.line(host, "Brick Breaker!");
    block.blank();

    host.set_draw_colors(0x03);
    block.line(host, "Click on x");
    block.line(host, "to switch the color");
    block.line(host, "palette.");
    block.blank();

    host.set_draw_colors(0x01);
    block.line(host, "Press down arrow to");
    block.line(host, "start the game!");
    block.blank();

    host.set_draw_colors(0x03);
    block.line(host, "Press up arrow");
    block.line(host, "in game to open");
    block.line(host, "this help");
}

pub fn draw_play<H: Host + ?Sized>(state: &GameState, host: &mut H) {
    host.set_draw_colors(0x43);
    if state.variant.has_bricks() {
        for i in 0..state.lives as i32 {
            host.rect(
                1 + i * (BALL_DIAMETER + 1),
                1,
                BALL_DIAMETER as u32,
                BALL_DIAMETER as u32,
            );
        }
    }
    host.rect(
        state.ball.pos.x,
        state.ball.pos.y,
        BALL_DIAMETER as u32,
        BALL_DIAMETER as u32,
    );

    host.set_draw_colors(0x41);
    host.rect(state.paddle.x, BAR_Y, BAR_WIDTH as u32, BAR_HEIGHT as u32);

    // Health gauge: one dark column per remaining hit point
    for brick in state.bricks.iter().filter(|b| b.is_alive()) {
        host.set_draw_colors(0x03);
        host.rect(
            brick.pos.x,
            brick.pos.y,
            BRICK_WIDTH as u32,
            BRICK_HEIGHT as u32,
        );
        host.set_draw_colors(0x04);
        for j in 0..brick.health as i32 {
            host.vline(brick.pos.x + j, brick.pos.y, BRICK_HEIGHT as u32);
        }
    }
}

pub fn draw_game_over<H: Host + ?Sized>(state: &GameState, host: &mut H) {
    let mut block = TextBlock::new();
    let alive = state.bricks.alive_count();

    if alive > 0 {
        host.set_draw_colors(0x04);
        block.line(host, "Game Over :(");
        block.line(host, "You have destroyed");
        block.number_line(host, state.bricks.destroyed_count(), "bricks");
        block.blank();

        host.set_draw_colors(0x01);
        block.line(host, "Press down arrow to");
        block.line(host, "retry!");
    } else {
        host.set_draw_colors(0x04);
        block.line(host, "Congratulations!");
        block.line(host, "You have destroyed");
        block.line(host, "All the bricks!");
        block.blank();

        host.set_draw_colors(0x01);
        block.line(host, "Press down arrow to");
        if state.level.is_last() {
            block.line(host, "restart from");
            block.line(host, "the beginning!");
        } else {
            block.line(host, "next level!");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Canvas;
    use crate::sim::{Level, Variant};

    #[test]
    fn test_clear_uses_slot_one() {
        let mut canvas = Canvas::new();
        canvas.set_draw_colors(0x02);
        clear_background(&mut canvas);
        assert_eq!(canvas.pixel(0, 0), Some(1));
        assert_eq!(canvas.pixel(159, 159), Some(1));

        // Transparent slot wraps to the last palette entry
        canvas.set_draw_colors(0x00);
        clear_background(&mut canvas);
        assert_eq!(canvas.pixel(80, 80), Some(3));
    }

    #[test]
    fn test_help_layout() {
        let mut canvas = Canvas::new();
        draw_help(&mut canvas);
        let texts = canvas.texts();
        assert_eq!(texts.len(), 10);
        assert_eq!((texts[0].text.as_str(), texts[0].y), ("Welcome to the", 5));
        assert_eq!((texts[1].text.as_str(), texts[1].y), ("Brick Breaker!", 16));
        assert_eq!((texts[2].text.as_str(), texts[2].y), ("Click on x", 38));
        assert_eq!(texts[2].colors, 0x03);
        assert_eq!(texts[9].text, "this help");
    }

    #[test]
    fn test_play_draws_bricks_with_health_gauge() {
        let mut state = GameState::new(Variant::Extended);
        state.level = Level::new(2).unwrap();
        state.reset_level();
        let mut canvas = Canvas::new();
        canvas.fill_framebuffer(1);
        draw_play(&state, &mut canvas);

        // Brick 0 at (3, 7): three gauge columns in colour 4, then colour 3
        assert_eq!(canvas.pixel(3, 7), Some(3));
        assert_eq!(canvas.pixel(5, 12), Some(3));
        assert_eq!(canvas.pixel(6, 7), Some(2));
        // Gap between bricks keeps the background
        assert_eq!(canvas.pixel(28, 7), Some(1));
        // Three lives indicators along the top
        assert_eq!(canvas.pixel(1, 1), Some(3));
        assert_eq!(canvas.pixel(11, 1), Some(3));
        assert_eq!(canvas.pixel(16, 1), Some(1));
    }

    #[test]
    fn test_dead_bricks_are_not_drawn() {
        let mut state = GameState::new(Variant::Extended);
        for brick in state.bricks.iter_mut() {
            brick.health = 0;
        }
        let mut canvas = Canvas::new();
        canvas.fill_framebuffer(1);
        draw_play(&state, &mut canvas);
        assert_eq!(canvas.pixel(10, 9), Some(1));
    }

    #[test]
    fn test_game_over_counts_destroyed_bricks() {
        let mut state = GameState::new(Variant::Extended);
        for brick in state.bricks.iter_mut().take(12) {
            brick.health = 0;
        }
        let mut canvas = Canvas::new();
        draw_game_over(&state, &mut canvas);
        let count = canvas.texts().iter().find(|t| t.text == "12").cloned();
        let suffix = canvas.texts().iter().find(|t| t.text == "bricks").cloned();
        let (count, suffix) = (count.unwrap(), suffix.unwrap());
        assert_eq!(count.y, 27);
        assert_eq!(suffix.x, 5 + 8 * 3);
        assert!(canvas.has_text("retry!"));
    }

    #[test]
    fn test_game_over_on_last_level_offers_restart() {
        let mut state = GameState::new(Variant::Extended);
        state.level = Level::LAST;
        for brick in state.bricks.iter_mut() {
            brick.health = 0;
        }
        let mut canvas = Canvas::new();
        draw_game_over(&state, &mut canvas);
        assert!(canvas.has_text("Congratulations!"));
        assert!(canvas.has_text("the beginning!"));
        assert!(!canvas.has_text("next level!"));
    }
}
