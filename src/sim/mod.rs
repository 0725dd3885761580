//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one tick per display frame)
//! - Integer positions and velocities only
//! - Stable iteration order (brick index order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;
pub mod velocity;

pub use collision::{Direction, Rect, bbox_colliding, boxes_overlap, classify_direction};
pub use state::{Ball, Brick, BrickGrid, GameEvent, GameState, Level, Paddle, Screen, Variant};
pub use tick::{FrameReport, Gamepad, react_to_collision, tick};
pub use velocity::{HorizontalVelocity, SpeedKind};
