//! Brick Breaker - a fixed-timestep integer arcade cartridge
//!
//! Core modules:
//! - `sim`: Deterministic simulation (velocity states, collisions, game state)
//! - `render`: Draw passes for the help, play and game-over screens
//! - `platform`: Host drawing/audio primitives (native canvas, browser canvas)
//! - `game`: Frame driver exposing the `start`/`update` entry points
//! - `settings`: Data-driven start-up configuration

pub mod audio;
pub mod demo;
pub mod game;
pub mod palette;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use palette::PaletteKind;
pub use settings::{Settings, SettingsError, Variant};

/// Game configuration constants
pub mod consts {
    /// Width and height of the square display, in pixels
    pub const SCREEN_SIZE: i32 = 160;
    /// Glyph cell size of the host font
    pub const FONT_SIZE: i32 = 8;
    /// Frame clock wraps at one second of frames
    pub const FRAME_CLOCK_PERIOD: u8 = 60;

    /// Paddle geometry
    pub const BAR_WIDTH: i32 = 32;
    pub const BAR_HEIGHT: i32 = 8;
    pub const BAR_Y: i32 = 145;
    pub const MIN_BAR_X: i32 = 1;
    pub const MAX_BAR_X: i32 = SCREEN_SIZE - MIN_BAR_X - BAR_WIDTH;

    /// Ball geometry and vertical speeds (pixels per frame)
    pub const BALL_DIAMETER: i32 = 4;
    pub const BALL_VELOCITY_DOWN: i32 = 1;
    pub const BALL_VELOCITY_UP: i32 = -1;

    /// Brick grid layout
    pub const BRICK_INITIAL_X: i32 = 2;
    pub const BRICK_INITIAL_Y: i32 = BALL_DIAMETER + 2;
    pub const BRICK_PAD: i32 = 1;
    pub const BRICK_WIDTH_PLUS_PADDING: i32 = 26;
    pub const BRICK_HEIGHT_PLUS_PADDING: i32 = 8;
    pub const BRICK_WIDTH: i32 = BRICK_WIDTH_PLUS_PADDING - BRICK_PAD * 2;
    pub const BRICK_HEIGHT: i32 = BRICK_HEIGHT_PLUS_PADDING - BRICK_PAD * 2;
    pub const NUM_BRICK_COLS: usize =
        ((SCREEN_SIZE - BRICK_INITIAL_X * 2) / BRICK_WIDTH_PLUS_PADDING) as usize;
    pub const NUM_BRICK_ROWS: usize = 8;
    pub const NUM_BRICKS: usize = NUM_BRICK_COLS * NUM_BRICK_ROWS;

    /// Lives granted at every level reset
    pub const STARTING_LIVES: u8 = 3;
}

/// Clamp an integer to `[min_x, max_x]`
#[inline]
pub fn clamp_int(x: i32, min_x: i32, max_x: i32) -> i32 {
    if x < min_x {
        return min_x;
    }
    if x > max_x {
        return max_x;
    }
    x
}

/// Inclusive overlap of the intervals `[l1, h1]` and `[l2, h2]`
///
/// ```text
/// l1 ----- h1            or        l1 ----- h1
///      l2 ----- h2            l2 ----- h2
/// ```
#[inline]
pub fn intervals_overlap(l1: i32, h1: i32, l2: i32, h2: i32) -> bool {
    l1 <= h2 && l2 <= h1
}
