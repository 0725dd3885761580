//! Frame driver
//!
//! The host calls `start` once and `update` once per display frame. `update`
//! runs the simulation tick, forwards palette and audio side effects, then
//! redraws the screen.

use crate::audio::SoundEffect;
use crate::platform::Host;
use crate::render;
use crate::settings::{Settings, SettingsError};
use crate::sim::{FrameReport, GameEvent, GameState, Gamepad, tick};

/// Background clear uses palette colour 2
const BACKGROUND_COLORS: u16 = 0x02;

/// Game instance holding all state
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    muted: bool,
}

impl Game {
    pub fn new(settings: &Settings) -> Result<Self, SettingsError> {
        Ok(Self {
            state: settings.build_state()?,
            muted: settings.muted,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// One-time initialisation: push the starting palette to the host
    pub fn start<H: Host + ?Sized>(&mut self, host: &mut H) {
        host.set_palette(self.state.palette.colors());
        log::info!(
            "Brick Breaker starting: {:?} variant, level {}, palette {}",
            self.state.variant,
            self.state.level.number(),
            self.state.palette.as_str()
        );
    }

    /// Run one frame
    pub fn update<H: Host + ?Sized>(&mut self, host: &mut H, gamepad: Gamepad) -> FrameReport {
        let report = tick(&mut self.state, gamepad);

        for event in &report.events {
            match event {
                GameEvent::PaletteChanged(palette) => host.set_palette(palette.colors()),
                GameEvent::BrickHit { .. } if !self.muted => {
                    host.tone(&SoundEffect::BrickHit.tone());
                }
                _ => {}
            }
        }

        host.set_draw_colors(BACKGROUND_COLORS);
        render::clear_background(host);
        if report.completed {
            render::draw_screen(&self.state, host);
        }

        report
    }
}
