//! Game state and core simulation types
//!
//! A single `GameState` aggregate owns every entity. It is constructed once,
//! mutated by the frame driver each frame, and never shared.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::velocity::HorizontalVelocity;
use crate::consts::*;
use crate::palette::PaletteKind;

/// Which ruleset the cartridge plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Paddle and ball only: no bricks, no lives, no game-over screen
    Simple,
    /// Brick grid, lives and eight levels
    #[default]
    Extended,
}

impl Variant {
    pub fn has_bricks(&self) -> bool {
        matches!(self, Variant::Extended)
    }
}

/// Which screen the frame driver runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Help,
    Play,
    GameOver,
}

/// One of the eight levels, 0-based
///
/// Level `n` fills every brick with `n + 1` health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const COUNT: u8 = 8;
    pub const FIRST: Level = Level(0);
    pub const LAST: Level = Level(Self::COUNT - 1);

    /// Level from a 0-based index, `None` past the last level
    pub const fn new(index: u8) -> Option<Self> {
        if index < Self::COUNT {
            Some(Level(index))
        } else {
            None
        }
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// 1-based number shown to the player
    pub const fn number(self) -> u8 {
        self.0 + 1
    }

    /// Following level, wrapping from the last back to the first
    pub const fn next(self) -> Self {
        Level((self.0 + 1) % Self::COUNT)
    }

    pub const fn is_last(self) -> bool {
        self.0 == Self::LAST.0
    }

    /// Health every brick starts with on this level
    pub const fn brick_health(self) -> u8 {
        self.0 + 1
    }
}

impl TryFrom<u8> for Level {
    type Error = String;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Level::new(index).ok_or_else(|| format!("invalid level index {index}"))
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> u8 {
        level.0
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge; the paddle row is fixed at `BAR_Y`
    pub x: i32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self { x: MIN_BAR_X }
    }
}

impl Paddle {
    pub fn bbox(&self) -> Rect {
        Rect::new(self.x, BAR_Y, BAR_WIDTH, BAR_HEIGHT)
    }

    /// Move by `dx`, clamped to the travel range. Returns the distance actually moved.
    pub fn shift(&mut self, dx: i32) -> i32 {
        let next_x = crate::clamp_int(self.x + dx, MIN_BAR_X, MAX_BAR_X);
        let moved = next_x - self.x;
        self.x = next_x;
        moved
    }
}

/// The ball (a `BALL_DIAMETER` square)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ball {
    /// Top-left corner
    pub pos: IVec2,
    pub velocity_x: HorizontalVelocity,
    /// -1 (up), 0 (resting on the paddle) or +1 (down)
    pub velocity_y: i32,
}

impl Ball {
    /// A resting ball centred on top of the paddle
    pub fn resting_on(paddle: &Paddle) -> Self {
        Self {
            pos: IVec2::new(
                paddle.x + (BAR_WIDTH >> 1) - (BALL_DIAMETER >> 1),
                BAR_Y - BALL_DIAMETER,
            ),
            velocity_x: HorizontalVelocity::default(),
            velocity_y: 0,
        }
    }

    pub fn bbox(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BALL_DIAMETER, BALL_DIAMETER)
    }

    /// Not yet launched
    pub fn is_resting(&self) -> bool {
        self.velocity_y == 0
    }
}

/// A stationary brick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brick {
    pub health: u8,
    pub pos: IVec2,
}

impl Brick {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn bbox(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BRICK_WIDTH, BRICK_HEIGHT)
    }
}

/// Fixed brick grid, stored row-major (`row * NUM_BRICK_COLS + col`)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BrickGrid {
    bricks: Vec<Brick>,
}

impl BrickGrid {
    /// A grid with no bricks at all (simple variant)
    pub fn empty() -> Self {
        Self { bricks: Vec::new() }
    }

    /// Full grid laid out for `level`
    pub fn for_level(level: Level) -> Self {
        let bricks = (0..NUM_BRICKS)
            .map(|i| Brick {
                health: level.brick_health(),
                pos: Self::cell_origin(i),
            })
            .collect();
        Self { bricks }
    }

    /// Top-left corner of grid cell `index`
    pub fn cell_origin(index: usize) -> IVec2 {
        let col = (index % NUM_BRICK_COLS) as i32;
        let row = (index / NUM_BRICK_COLS) as i32;
        IVec2::new(
            BRICK_PAD + BRICK_INITIAL_X + col * BRICK_WIDTH_PLUS_PADDING,
            BRICK_PAD + BRICK_INITIAL_Y + row * BRICK_HEIGHT_PLUS_PADDING,
        )
    }

    /// Restore every cell to `level`'s health, keeping the grid's size
    pub fn refill(&mut self, level: Level) {
        for brick in &mut self.bricks {
            brick.health = level.brick_health();
        }
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Brick> {
        if col >= NUM_BRICK_COLS {
            return None;
        }
        self.bricks.get(row * NUM_BRICK_COLS + col)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.bricks.iter_mut()
    }

    pub fn any_alive(&self) -> bool {
        self.bricks.iter().any(Brick::is_alive)
    }

    pub fn alive_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_alive()).count()
    }

    pub fn destroyed_count(&self) -> usize {
        self.len() - self.alive_count()
    }
}

/// Notable things that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    PaletteChanged(PaletteKind),
    ScreenChanged { from: Screen, to: Screen },
    BallLaunched,
    /// A brick took damage; `health` is what it has left
    BrickHit { index: usize, health: u8 },
    LifeLost { remaining: u8 },
    /// Ball hit the floor in the simple variant
    BallReset,
    LevelStarted(Level),
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub variant: Variant,
    pub screen: Screen,
    /// Free-running frame counter, modulo 60
    pub frame_clock: u8,
    /// Gamepad byte seen on the previous completed frame
    pub previous_gamepad: u8,
    pub palette: PaletteKind,
    pub level: Level,
    /// Lives granted at every level reset
    pub starting_lives: u8,
    /// Balls left in reserve
    pub lives: u8,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: BrickGrid,
}

impl GameState {
    /// Fresh state for `variant`, with the level already laid out
    pub fn new(variant: Variant) -> Self {
        let screen = match variant {
            Variant::Simple => Screen::Play,
            Variant::Extended => Screen::Help,
        };
        let bricks = if variant.has_bricks() {
            BrickGrid::for_level(Level::FIRST)
        } else {
            BrickGrid::empty()
        };

        let mut state = Self {
            variant,
            screen,
            frame_clock: 0,
            previous_gamepad: 0,
            palette: PaletteKind::default(),
            level: Level::FIRST,
            starting_lives: STARTING_LIVES,
            lives: STARTING_LIVES,
            paddle: Paddle::default(),
            ball: Ball::default(),
            bricks,
        };
        state.reset_level();
        state
    }

    /// Put the ball back on the paddle, at rest
    pub fn reset_ball(&mut self) {
        self.ball = Ball::resting_on(&self.paddle);
    }

    /// Refill lives, park the paddle at its left stop, and restore the bricks
    pub fn reset_level(&mut self) {
        self.lives = self.starting_lives;
        self.paddle = Paddle::default();
        self.reset_ball();
        self.bricks.refill(self.level);
    }

    pub fn any_brick_alive(&self) -> bool {
        self.bricks.any_alive()
    }

    /// Advance the frame clock, wrapping at one second
    pub fn advance_clock(&mut self) {
        self.frame_clock = (self.frame_clock + 1) % FRAME_CLOCK_PERIOD;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::velocity::SpeedKind;

    #[test]
    fn test_new_extended_state() {
        let state = GameState::new(Variant::Extended);
        assert_eq!(state.screen, Screen::Help);
        assert_eq!(state.lives, 3);
        assert_eq!(state.bricks.len(), NUM_BRICKS);
        assert!(state.bricks.iter().all(|b| b.health == 1));
        assert_eq!(state.palette, PaletteKind::FroggyOs);
    }

    #[test]
    fn test_new_simple_state_has_no_bricks() {
        let state = GameState::new(Variant::Simple);
        assert_eq!(state.screen, Screen::Play);
        assert!(state.bricks.is_empty());
        assert!(!state.any_brick_alive());
    }

    #[test]
    fn test_brick_layout() {
        let grid = BrickGrid::for_level(Level::FIRST);
        assert_eq!(grid.get(0, 0).map(|b| b.pos), Some(IVec2::new(3, 7)));
        assert_eq!(grid.get(0, 5).map(|b| b.pos), Some(IVec2::new(133, 7)));
        assert_eq!(grid.get(7, 0).map(|b| b.pos), Some(IVec2::new(3, 63)));
        assert!(grid.get(0, 6).is_none());
        assert!(grid.get(8, 0).is_none());
    }

    #[test]
    fn test_reset_ball_centres_on_paddle() {
        let mut state = GameState::new(Variant::Extended);
        state.paddle.x = 60;
        state.ball.velocity_y = 1;
        state.ball.velocity_x.kind = SpeedKind::FullLeft;
        state.reset_ball();

        let ball = state.ball.bbox();
        let paddle = state.paddle.bbox();
        assert_eq!(ball.pos.x * 2 + ball.size.x, paddle.pos.x * 2 + paddle.size.x);
        assert_eq!(ball.max().y, paddle.pos.y);
        assert_eq!(state.ball.velocity_y, 0);
        assert_eq!(state.ball.velocity_x, HorizontalVelocity::default());
    }

    #[test]
    fn test_level_wraps() {
        assert_eq!(Level::LAST.next(), Level::FIRST);
        assert_eq!(Level::FIRST.next().number(), 2);
        assert_eq!(Level::LAST.brick_health(), 8);
        assert!(Level::new(8).is_none());
    }

    #[test]
    fn test_level_serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<Level>("7").is_ok());
        assert!(serde_json::from_str::<Level>("8").is_err());
    }

    #[test]
    fn test_paddle_shift_reports_actual_motion() {
        let mut paddle = Paddle::default();
        assert_eq!(paddle.shift(-1), 0);
        assert_eq!(paddle.shift(1), 1);
        paddle.x = MAX_BAR_X;
        assert_eq!(paddle.shift(1), 0);
    }

    #[test]
    fn test_clock_wraps_at_sixty() {
        let mut state = GameState::new(Variant::Extended);
        state.frame_clock = 59;
        state.advance_clock();
        assert_eq!(state.frame_clock, 0);
    }
}
