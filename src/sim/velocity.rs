//! Discretized horizontal ball velocity
//!
//! Five speed states give average speeds of -1, -0.5, 0, +0.5 and +1 pixels
//! per frame. Half speeds move on every other frame, gated by a phase bit
//! that flips each frame.

use serde::{Deserialize, Serialize};

/// Target average horizontal speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpeedKind {
    /// -1 px/frame
    FullLeft,
    /// -0.5 px/frame
    HalfLeft,
    /// Stationary
    #[default]
    Zero,
    /// +0.5 px/frame
    HalfRight,
    /// +1 px/frame
    FullRight,
}

impl SpeedKind {
    /// All states, left to right
    pub const ALL: [SpeedKind; 5] = [
        SpeedKind::FullLeft,
        SpeedKind::HalfLeft,
        SpeedKind::Zero,
        SpeedKind::HalfRight,
        SpeedKind::FullRight,
    ];
}

/// Horizontal velocity: speed state plus the sub-frame phase bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HorizontalVelocity {
    pub kind: SpeedKind,
    /// Half speeds move only on frames where this is set
    pub phase: bool,
}

impl HorizontalVelocity {
    pub const fn new(kind: SpeedKind) -> Self {
        Self { kind, phase: false }
    }

    /// Replace the speed state, restarting the phase
    fn set_kind(&mut self, kind: SpeedKind) {
        self.kind = kind;
        self.phase = false;
    }

    /// Shift one step toward `FullLeft` (player steering)
    pub fn accelerate_left(&mut self) {
        let next = match self.kind {
            SpeedKind::FullLeft => return,
            SpeedKind::HalfLeft => SpeedKind::FullLeft,
            SpeedKind::Zero => SpeedKind::HalfLeft,
            SpeedKind::HalfRight => SpeedKind::Zero,
            SpeedKind::FullRight => SpeedKind::HalfRight,
        };
        self.set_kind(next);
    }

    /// Shift one step toward `FullRight` (player steering)
    pub fn accelerate_right(&mut self) {
        let next = match self.kind {
            SpeedKind::FullLeft => SpeedKind::HalfLeft,
            SpeedKind::HalfLeft => SpeedKind::Zero,
            SpeedKind::Zero => SpeedKind::HalfRight,
            SpeedKind::HalfRight => SpeedKind::FullRight,
            SpeedKind::FullRight => return,
        };
        self.set_kind(next);
    }

    /// Bounce off a surface on the left: leftward motion becomes rightward
    pub fn reflect_to_right(&mut self) {
        match self.kind {
            SpeedKind::HalfLeft => self.set_kind(SpeedKind::HalfRight),
            SpeedKind::FullLeft => self.set_kind(SpeedKind::FullRight),
            SpeedKind::Zero | SpeedKind::HalfRight | SpeedKind::FullRight => {}
        }
    }

    /// Bounce off a surface on the right: rightward motion becomes leftward
    pub fn reflect_to_left(&mut self) {
        match self.kind {
            SpeedKind::HalfRight => self.set_kind(SpeedKind::HalfLeft),
            SpeedKind::FullRight => self.set_kind(SpeedKind::FullLeft),
            SpeedKind::Zero | SpeedKind::HalfLeft | SpeedKind::FullLeft => {}
        }
    }

    /// Advance one frame, returning this frame's displacement (-1, 0 or +1)
    ///
    /// The phase flips every frame whatever the speed state.
    pub fn step(&mut self) -> i32 {
        let dx = match self.kind {
            SpeedKind::FullLeft => -1,
            SpeedKind::HalfLeft if self.phase => -1,
            SpeedKind::HalfRight if self.phase => 1,
            SpeedKind::FullRight => 1,
            SpeedKind::HalfLeft | SpeedKind::Zero | SpeedKind::HalfRight => 0,
        };
        self.phase = !self.phase;
        dx
    }
}
