//! Fixed 4-colour display palettes
//!
//! Colours are `0xRRGGBB`. Palette slot 0 is the lightest colour and slot 3 the
//! darkest in every set.

use serde::{Deserialize, Serialize};

/// Selectable palettes, in cycle order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaletteKind {
    /// https://lospec.com/palette-list/ice-cream-gb
    #[serde(alias = "ice-cream", alias = "ice_cream_gb")]
    IceCreamGb,
    /// https://lospec.com/palette-list/lava-gb
    #[serde(alias = "lava", alias = "lava_gb")]
    LavaGb,
    /// https://lospec.com/palette-list/2bit-demichrome
    #[serde(alias = "2bit-demichrome", alias = "demichrome")]
    TwoBitDemichrome,
    /// https://lospec.com/palette-list/robot-rock
    #[serde(alias = "robot_rock")]
    RobotRock,
    /// https://lospec.com/palette-list/froggyos
    #[default]
    #[serde(alias = "froggyos", alias = "froggy_os")]
    FroggyOs,
}

impl PaletteKind {
    pub const ALL: [PaletteKind; 5] = [
        PaletteKind::IceCreamGb,
        PaletteKind::LavaGb,
        PaletteKind::TwoBitDemichrome,
        PaletteKind::RobotRock,
        PaletteKind::FroggyOs,
    ];

    pub fn colors(&self) -> [u32; 4] {
        match self {
            PaletteKind::IceCreamGb => [0xfff6d3, 0xf9a875, 0xeb6b6f, 0x7c3f58],
            PaletteKind::LavaGb => [0xff8e80, 0xc53a9d, 0x4a2480, 0x051f39],
            PaletteKind::TwoBitDemichrome => [0xe9efec, 0xa0a08b, 0x555568, 0x211e20],
            PaletteKind::RobotRock => [0x000000, 0x462dae, 0xe89073, 0xffffff],
            PaletteKind::FroggyOs => [0xe2d6b5, 0x36ad69, 0x7b7b7b, 0x343434],
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|p| p == self).unwrap_or(0)
    }

    /// Next palette, wrapping after the last one
    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaletteKind::IceCreamGb => "Ice Cream GB",
            PaletteKind::LavaGb => "Lava GB",
            PaletteKind::TwoBitDemichrome => "2bit Demichrome",
            PaletteKind::RobotRock => "Robot Rock",
            PaletteKind::FroggyOs => "FroggyOS",
        }
    }
}
