//! Platform abstraction layer
//!
//! The cartridge never touches pixels or speakers directly. It selects draw
//! colours and calls the primitives of a `Host`:
//! - `canvas`: in-memory framebuffer (native runner, tests)
//! - `web`: HTML canvas + Web Audio (wasm32)

pub mod canvas;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use canvas::Canvas;

use crate::audio::Tone;

/// Drawing, audio and palette primitives provided by the host
///
/// Draw colours are four 4-bit slots packed into a `u16`. Slot 1 (lowest
/// nibble) is the fill colour, slot 2 the outline. A slot value of 0 is
/// transparent and 1-4 select a palette entry.
pub trait Host {
    fn set_draw_colors(&mut self, colors: u16);
    fn draw_colors(&self) -> u16;
    fn rect(&mut self, x: i32, y: i32, width: u32, height: u32);
    /// Vertical line drawn with draw colour slot 1
    fn vline(&mut self, x: i32, y: i32, len: u32);
    fn text(&mut self, text: &str, x: i32, y: i32);
    fn tone(&mut self, tone: &Tone);
    fn set_palette(&mut self, colors: [u32; 4]);
    /// Fill the whole framebuffer with palette entry `color_index` (0-3)
    fn fill_framebuffer(&mut self, color_index: u8);
}

/// Palette entry (0-3) selected by draw colour `slot` (0-3), `None` if transparent
pub fn slot_color(colors: u16, slot: u8) -> Option<u8> {
    match (colors >> (slot * 4)) & 0xf {
        0 => None,
        c => Some(((c - 1) & 0b11) as u8),
    }
}
