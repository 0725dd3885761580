//! Fixed timestep simulation tick
//!
//! One call per display frame. The order of operations inside a frame is part
//! of the game's behaviour and must not be rearranged.

use serde::{Deserialize, Serialize};

use super::collision::{Direction, bbox_colliding};
use super::state::{Ball, GameEvent, GameState, Screen, Variant};
use crate::consts::*;

/// One frame's gamepad byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Gamepad(pub u8);

impl Gamepad {
    /// Cycles the palette
    pub const BUTTON_1: u8 = 1;
    /// Launches the ball
    pub const BUTTON_2: u8 = 2;
    pub const LEFT: u8 = 16;
    pub const RIGHT: u8 = 32;
    pub const UP: u8 = 64;
    pub const DOWN: u8 = 128;

    pub fn held(self, button: u8) -> bool {
        self.0 & button != 0
    }

    /// Buttons that are down now but were up in `previous`
    pub fn pressed_since(self, previous: Gamepad) -> Gamepad {
        Gamepad(self.0 & (self.0 ^ previous.0))
    }

    pub fn with(self, button: u8) -> Gamepad {
        Gamepad(self.0 | button)
    }
}

/// What a single tick did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub events: Vec<GameEvent>,
    /// False when the frame ended right after a screen transition. Such frames
    /// draw nothing and neither advance the clock nor record the gamepad.
    pub completed: bool,
}

impl FrameReport {
    /// Number of bricks damaged this frame
    pub fn brick_hits(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, GameEvent::BrickHit { .. }))
            .count()
    }
}

/// Outcome of the play-screen physics step
enum Flow {
    Continue,
    EndFrame,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, gamepad: Gamepad) -> FrameReport {
    let pressed = gamepad.pressed_since(Gamepad(state.previous_gamepad));
    let mut report = FrameReport::default();

    if pressed.held(Gamepad::BUTTON_1) {
        state.palette = state.palette.next();
        log::info!("Palette: {}", state.palette.as_str());
        report.events.push(GameEvent::PaletteChanged(state.palette));
    }

    // Up wins over any Down transition pressed in the same frame
    if pressed.held(Gamepad::UP) {
        switch_screen(state, Screen::Help, &mut report);
    } else if state.screen == Screen::GameOver {
        if pressed.held(Gamepad::DOWN) {
            if !state.any_brick_alive() {
                state.level = state.level.next();
            }
            state.reset_level();
            log::info!("Starting level {}", state.level.number());
            report.events.push(GameEvent::LevelStarted(state.level));
            switch_screen(state, Screen::Play, &mut report);
            return report;
        }
    } else if pressed.held(Gamepad::DOWN) {
        switch_screen(state, Screen::Play, &mut report);
    }

    if state.screen == Screen::Play {
        if state.variant.has_bricks() && !state.any_brick_alive() {
            log::info!("Level {} cleared", state.level.number());
            switch_screen(state, Screen::GameOver, &mut report);
            return report;
        }
        if let Flow::EndFrame = step_play(state, gamepad, pressed, &mut report) {
            return report;
        }
    }

    state.advance_clock();
    state.previous_gamepad = gamepad.0;
    report.completed = true;
    report
}

fn switch_screen(state: &mut GameState, to: Screen, report: &mut FrameReport) {
    let from = state.screen;
    state.screen = to;
    if from != to {
        log::info!("Screen {:?} -> {:?}", from, to);
        report.events.push(GameEvent::ScreenChanged { from, to });
    }
}

/// Velocity reaction to a collision with something on side `dir` of the ball
pub fn react_to_collision(ball: &mut Ball, dir: Direction) {
    match dir {
        Direction::Top => ball.velocity_y = BALL_VELOCITY_DOWN,
        Direction::Bottom => ball.velocity_y = BALL_VELOCITY_UP,
        Direction::Left => ball.velocity_x.reflect_to_right(),
        Direction::Right => ball.velocity_x.reflect_to_left(),
    }
}

/// Paddle input, walls, paddle and brick collisions, then integration
fn step_play(
    state: &mut GameState,
    gamepad: Gamepad,
    pressed: Gamepad,
    report: &mut FrameReport,
) -> Flow {
    // Paddle movement carries a resting ball by the distance actually moved
    if gamepad.held(Gamepad::RIGHT) {
        let moved = state.paddle.shift(1);
        if state.ball.is_resting() {
            state.ball.pos.x += moved;
        }
    }
    if gamepad.held(Gamepad::LEFT) {
        let moved = state.paddle.shift(-1);
        if state.ball.is_resting() {
            state.ball.pos.x += moved;
        }
    }
    if pressed.held(Gamepad::BUTTON_2) && state.ball.is_resting() {
        state.ball.velocity_y = BALL_VELOCITY_UP;
        log::debug!("Ball launched from x={}", state.ball.pos.x);
        report.events.push(GameEvent::BallLaunched);
    }

    // Collision boxes are fixed for the rest of the frame
    let ball_bbox = state.ball.bbox();
    let bar_bbox = state.paddle.bbox();

    if state.ball.pos.y <= 0 && state.ball.velocity_y != 0 {
        state.ball.velocity_y = BALL_VELOCITY_DOWN;
    } else if state.ball.pos.y + BALL_DIAMETER >= SCREEN_SIZE - 1 {
        match state.variant {
            Variant::Extended if state.lives > 0 => {
                state.reset_ball();
                state.lives -= 1;
                log::info!("Ball lost, {} left", state.lives);
                report.events.push(GameEvent::LifeLost {
                    remaining: state.lives,
                });
            }
            Variant::Extended => {
                log::info!("Out of balls on level {}", state.level.number());
                switch_screen(state, Screen::GameOver, report);
                return Flow::EndFrame;
            }
            Variant::Simple => {
                state.reset_ball();
                report.events.push(GameEvent::BallReset);
            }
        }
    }
    if state.ball.pos.x <= 0 {
        state.ball.velocity_x.reflect_to_right();
    } else if state.ball.pos.x + BALL_DIAMETER >= SCREEN_SIZE {
        state.ball.velocity_x.reflect_to_left();
    }

    if state.ball.velocity_y != 0 {
        if let Some(dir) = bbox_colliding(&ball_bbox, &bar_bbox) {
            react_to_collision(&mut state.ball, dir);
            if gamepad.held(Gamepad::LEFT) {
                state.ball.velocity_x.accelerate_left();
            }
            if gamepad.held(Gamepad::RIGHT) {
                state.ball.velocity_x.accelerate_right();
            }
            log::debug!("Paddle hit from {:?}, vx={:?}", dir, state.ball.velocity_x.kind);
        }
    }

    // At most one brick takes damage per frame
    for (index, brick) in state.bricks.iter_mut().enumerate() {
        if !brick.is_alive() {
            continue;
        }
        if let Some(dir) = bbox_colliding(&ball_bbox, &brick.bbox()) {
            react_to_collision(&mut state.ball, dir);
            brick.health -= 1;
            log::debug!("Brick {} hit from {:?}, health {}", index, dir, brick.health);
            report.events.push(GameEvent::BrickHit {
                index,
                health: brick.health,
            });
            break;
        }
    }

    state.ball.pos.y += state.ball.velocity_y;
    state.ball.pos.x += state.ball.velocity_x.step();
    log::trace!(
        "Ball at ({}, {}) vy={} vx={:?}",
        state.ball.pos.x,
        state.ball.pos.y,
        state.ball.velocity_y,
        state.ball.velocity_x
    );

    Flow::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Level;
    use crate::sim::velocity::{HorizontalVelocity, SpeedKind};
    use glam::IVec2;

    fn playing(variant: Variant) -> GameState {
        let mut state = GameState::new(variant);
        state.screen = Screen::Play;
        state
    }

    fn kill_all_bricks(state: &mut GameState) {
        for brick in state.bricks.iter_mut() {
            brick.health = 0;
        }
    }

    #[test]
    fn test_edge_detection() {
        let previous = Gamepad(Gamepad::LEFT | Gamepad::DOWN);
        let current = Gamepad(Gamepad::LEFT | Gamepad::BUTTON_2);
        assert_eq!(current.pressed_since(previous), Gamepad(Gamepad::BUTTON_2));
    }

    #[test]
    fn test_help_to_play_on_down() {
        let mut state = GameState::new(Variant::Extended);
        let report = tick(&mut state, Gamepad(Gamepad::DOWN));
        assert_eq!(state.screen, Screen::Play);
        assert!(report.completed);

        // Held, not pressed: nothing changes
        let report = tick(&mut state, Gamepad(Gamepad::DOWN));
        assert!(report.events.is_empty());
    }

    #[test]
    fn test_up_always_opens_help() {
        let mut state = playing(Variant::Extended);
        state.screen = Screen::GameOver;
        tick(&mut state, Gamepad(Gamepad::UP));
        assert_eq!(state.screen, Screen::Help);
    }

    #[test]
    fn test_up_and_down_same_frame() {
        let both = Gamepad(Gamepad::UP | Gamepad::DOWN);

        let mut state = playing(Variant::Extended);
        let ball = state.ball;
        let report = tick(&mut state, both);
        assert_eq!(state.screen, Screen::Help);
        assert_eq!(state.ball, ball);
        assert!(report.completed);

        // No level restart sneaks in from GameOver
        let mut state = playing(Variant::Extended);
        state.screen = Screen::GameOver;
        state.lives = 0;
        state.bricks.iter_mut().next().unwrap().health = 0;
        let report = tick(&mut state, both);
        assert_eq!(state.screen, Screen::Help);
        assert_eq!(state.lives, 0);
        assert_eq!(state.level, Level::FIRST);
        assert_eq!(state.bricks.destroyed_count(), 1);
        assert!(report.completed);
        assert_eq!(
            report.events,
            vec![GameEvent::ScreenChanged {
                from: Screen::GameOver,
                to: Screen::Help
            }]
        );
    }

    #[test]
    fn test_palette_cycles_on_any_screen() {
        let mut state = GameState::new(Variant::Extended);
        let before = state.palette;
        let report = tick(&mut state, Gamepad(Gamepad::BUTTON_1));
        assert_eq!(state.palette, before.next());
        assert_eq!(report.events, vec![GameEvent::PaletteChanged(state.palette)]);
    }

    #[test]
    fn test_resting_ball_follows_paddle() {
        let mut state = playing(Variant::Extended);
        let start = state.ball.pos;
        tick(&mut state, Gamepad(Gamepad::RIGHT));
        assert_eq!(state.paddle.x, MIN_BAR_X + 1);
        assert_eq!(state.ball.pos, start + IVec2::new(1, 0));

        // Blocked at the left stop: neither moves
        state.paddle.x = MIN_BAR_X;
        state.reset_ball();
        let start = state.ball.pos;
        tick(&mut state, Gamepad(Gamepad::LEFT));
        assert_eq!(state.paddle.x, MIN_BAR_X);
        assert_eq!(state.ball.pos, start);
    }

    #[test]
    fn test_launch_only_when_resting() {
        let mut state = playing(Variant::Extended);
        let report = tick(&mut state, Gamepad(Gamepad::BUTTON_2));
        assert!(report.events.contains(&GameEvent::BallLaunched));
        assert_eq!(state.ball.velocity_y, BALL_VELOCITY_UP);
    }

    #[test]
    fn test_top_wall_turns_ball_down() {
        let mut state = playing(Variant::Simple);
        state.ball = Ball {
            pos: IVec2::new(10, 10),
            velocity_x: HorizontalVelocity::default(),
            velocity_y: BALL_VELOCITY_UP,
        };
        for _ in 0..10 {
            tick(&mut state, Gamepad::default());
        }
        assert_eq!(state.ball.pos.y, 0);
        assert_eq!(state.ball.velocity_y, BALL_VELOCITY_UP);

        tick(&mut state, Gamepad::default());
        assert_eq!(state.ball.velocity_y, BALL_VELOCITY_DOWN);
        assert_eq!(state.ball.pos.y, 1);
    }

    #[test]
    fn test_side_walls_reflect() {
        let mut state = playing(Variant::Simple);
        state.ball = Ball {
            pos: IVec2::new(0, 80),
            velocity_x: HorizontalVelocity::new(SpeedKind::FullLeft),
            velocity_y: BALL_VELOCITY_DOWN,
        };
        tick(&mut state, Gamepad::default());
        assert_eq!(state.ball.velocity_x.kind, SpeedKind::FullRight);
        assert_eq!(state.ball.pos.x, 1);

        state.ball.pos.x = SCREEN_SIZE - BALL_DIAMETER;
        tick(&mut state, Gamepad::default());
        assert_eq!(state.ball.velocity_x.kind, SpeedKind::FullLeft);
    }

    #[test]
    fn test_floor_costs_a_life() {
        let mut state = playing(Variant::Extended);
        state.ball.pos = IVec2::new(80, SCREEN_SIZE - 1 - BALL_DIAMETER);
        state.ball.velocity_y = BALL_VELOCITY_DOWN;
        let report = tick(&mut state, Gamepad::default());
        assert_eq!(state.lives, 2);
        assert!(report.events.contains(&GameEvent::LifeLost { remaining: 2 }));
        assert!(state.ball.is_resting());
    }

    #[test]
    fn test_floor_without_lives_ends_game() {
        let mut state = playing(Variant::Extended);
        state.lives = 0;
        state.ball.pos = IVec2::new(80, SCREEN_SIZE - 1 - BALL_DIAMETER);
        state.ball.velocity_y = BALL_VELOCITY_DOWN;
        state.frame_clock = 7;
        let report = tick(&mut state, Gamepad::default());
        assert_eq!(state.screen, Screen::GameOver);
        assert!(!report.completed);
        assert_eq!(state.frame_clock, 7);
    }

    #[test]
    fn test_simple_variant_floor_resets_in_place() {
        let mut state = playing(Variant::Simple);
        state.paddle.x = 40;
        state.ball.pos = IVec2::new(100, SCREEN_SIZE - 1 - BALL_DIAMETER);
        state.ball.velocity_y = BALL_VELOCITY_DOWN;
        let report = tick(&mut state, Gamepad::default());
        assert!(report.events.contains(&GameEvent::BallReset));
        assert_eq!(state.screen, Screen::Play);
        // Integration still ran, so only the phase bit differs from a fresh reset
        let fresh = Ball::resting_on(&state.paddle);
        assert_eq!(state.ball.pos, fresh.pos);
        assert_eq!(state.ball.velocity_x.kind, SpeedKind::Zero);
        assert!(state.ball.is_resting());
    }

    #[test]
    fn test_paddle_rebound_and_steering() {
        let mut state = playing(Variant::Extended);
        state.paddle.x = 40;
        state.ball = Ball {
            pos: IVec2::new(50, BAR_Y - BALL_DIAMETER),
            velocity_x: HorizontalVelocity::default(),
            velocity_y: BALL_VELOCITY_DOWN,
        };
        // Holding right moves the paddle to 41 and steers the rebound right
        tick(&mut state, Gamepad(Gamepad::RIGHT));
        assert_eq!(state.ball.velocity_y, BALL_VELOCITY_UP);
        assert_eq!(state.ball.velocity_x.kind, SpeedKind::HalfRight);
    }

    #[test]
    fn test_resting_ball_ignores_paddle() {
        let mut state = playing(Variant::Extended);
        tick(&mut state, Gamepad::default());
        assert!(state.ball.is_resting());
    }

    #[test]
    fn test_one_brick_per_frame() {
        let mut state = playing(Variant::Extended);
        // Ball straddles bricks 0 and 1 (gap between x=27 and x=29)
        state.ball = Ball {
            pos: IVec2::new(26, 13),
            velocity_x: HorizontalVelocity::default(),
            velocity_y: BALL_VELOCITY_UP,
        };
        let report = tick(&mut state, Gamepad::default());
        assert_eq!(report.brick_hits(), 1);
        assert_eq!(report.events, vec![GameEvent::BrickHit { index: 0, health: 0 }]);
        assert!(state.bricks.get(0, 1).is_some_and(|b| b.is_alive()));
    }

    #[test]
    fn test_cleared_play_goes_to_game_over_without_moving() {
        let mut state = playing(Variant::Extended);
        kill_all_bricks(&mut state);
        state.ball.velocity_y = BALL_VELOCITY_UP;
        let before = state.ball;
        let report = tick(&mut state, Gamepad(Gamepad::RIGHT));
        assert_eq!(state.screen, Screen::GameOver);
        assert_eq!(state.ball, before);
        assert!(!report.completed);
    }

    #[test]
    fn test_game_over_retry_keeps_level() {
        let mut state = playing(Variant::Extended);
        state.screen = Screen::GameOver;
        state.level = Level::new(3).unwrap();
        state.lives = 0;
        tick(&mut state, Gamepad(Gamepad::DOWN));
        assert_eq!(state.screen, Screen::Play);
        assert_eq!(state.level.index(), 3);
        assert_eq!(state.lives, STARTING_LIVES);
    }

    #[test]
    fn test_game_over_advances_and_wraps_level() {
        let mut state = playing(Variant::Extended);
        state.screen = Screen::GameOver;
        state.level = Level::LAST;
        kill_all_bricks(&mut state);
        state.paddle.x = 90;

        let report = tick(&mut state, Gamepad(Gamepad::DOWN));
        assert_eq!(state.level, Level::FIRST);
        assert_eq!(state.screen, Screen::Play);
        assert_eq!(state.paddle.x, MIN_BAR_X);
        assert_eq!(state.ball, Ball::resting_on(&state.paddle));
        assert!(state.bricks.iter().all(|b| b.health == Level::FIRST.brick_health()));
        assert!(report.events.contains(&GameEvent::LevelStarted(Level::FIRST)));
        assert!(!report.completed);
    }

    #[test]
    fn test_simple_variant_never_reaches_game_over() {
        let mut state = playing(Variant::Simple);
        for _ in 0..120 {
            tick(&mut state, Gamepad::default());
        }
        assert_eq!(state.screen, Screen::Play);
    }
}
