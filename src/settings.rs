//! Start-up configuration
//!
//! Read once when the cartridge starts. Nothing here is written back: the game
//! keeps no state across power cycles.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::palette::PaletteKind;
use crate::sim::{GameState, Level, Screen};

pub use crate::sim::Variant;

/// Screens the cartridge may boot into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartScreen {
    Help,
    Play,
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Ruleset
    pub variant: Variant,
    /// Boot screen; the variant decides when unset
    pub start_screen: Option<StartScreen>,
    /// Starting palette
    pub palette: PaletteKind,
    /// 1-based level to begin on
    pub start_level: u8,
    /// Lives granted at every level reset
    pub lives: u8,
    /// Silence tones
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::Extended,
            start_screen: None,
            palette: PaletteKind::default(),
            start_level: 1,
            lives: crate::consts::STARTING_LIVES,
            muted: false,
        }
    }
}

/// Why a settings document was rejected
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    InvalidLevel { found: u8 },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cannot read settings: {err}"),
            Self::Parse(err) => write!(f, "malformed settings: {err}"),
            Self::InvalidLevel { found } => write!(
                f,
                "start_level {found} is out of range 1..={}",
                Level::COUNT
            ),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::InvalidLevel { .. } => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

impl Settings {
    /// Parse and validate a JSON settings document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.level().map(|_| ())
    }

    pub fn level(&self) -> Result<Level, SettingsError> {
        self.start_level
            .checked_sub(1)
            .and_then(Level::new)
            .ok_or(SettingsError::InvalidLevel {
                found: self.start_level,
            })
    }

    /// Build the initial game state these settings describe
    pub fn build_state(&self) -> Result<GameState, SettingsError> {
        let mut state = GameState::new(self.variant);
        state.palette = self.palette;
        state.level = self.level()?;
        state.starting_lives = self.lives;
        if let Some(screen) = self.start_screen {
            state.screen = match screen {
                StartScreen::Help => Screen::Help,
                StartScreen::Play => Screen::Play,
            };
        }
        state.reset_level();
        Ok(state)
    }
}
