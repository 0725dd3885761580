//! In-memory 160x160 framebuffer host
//!
//! Stores one palette index per pixel. Text is not rasterised (there is no
//! font here); text and tone calls are recorded so callers can inspect what a
//! frame asked for.

use serde::Serialize;

use super::{Host, slot_color};
use crate::audio::Tone;
use crate::consts::SCREEN_SIZE;
use crate::palette::PaletteKind;

const SIDE: usize = SCREEN_SIZE as usize;

/// A recorded `text` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextCall {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub colors: u16,
}

#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: Vec<u8>,
    palette: [u32; 4],
    draw_colors: u16,
    texts: Vec<TextCall>,
    tones: Vec<Tone>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            pixels: vec![0; SIDE * SIDE],
            palette: PaletteKind::default().colors(),
            draw_colors: 0x1203,
            texts: Vec::new(),
            tones: Vec::new(),
        }
    }

    /// Palette index at `(x, y)`, `None` off screen
    pub fn pixel(&self, x: i32, y: i32) -> Option<u8> {
        if !(0..SCREEN_SIZE).contains(&x) || !(0..SCREEN_SIZE).contains(&y) {
            return None;
        }
        Some(self.pixels[y as usize * SIDE + x as usize])
    }

    pub fn palette(&self) -> [u32; 4] {
        self.palette
    }

    pub fn texts(&self) -> &[TextCall] {
        &self.texts
    }

    pub fn tones(&self) -> &[Tone] {
        &self.tones
    }

    /// True if any recorded text call contains `needle`
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.text.contains(needle))
    }

    /// Forget recorded text and tone calls (call between frames)
    pub fn clear_log(&mut self) {
        self.texts.clear();
        self.tones.clear();
    }

    /// Encode the framebuffer as a binary PPM (P6) image
    pub fn to_ppm(&self) -> Vec<u8> {
        let mut out = format!("P6\n{SIDE} {SIDE}\n255\n").into_bytes();
        out.reserve(SIDE * SIDE * 3);
        for &index in &self.pixels {
            let rgb = self.palette[index as usize];
            out.extend_from_slice(&[(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8]);
        }
        out
    }

    fn plot(&mut self, x: i32, y: i32, color: u8) {
        if (0..SCREEN_SIZE).contains(&x) && (0..SCREEN_SIZE).contains(&y) {
            self.pixels[y as usize * SIDE + x as usize] = color;
        }
    }
}

impl Host for Canvas {
    fn set_draw_colors(&mut self, colors: u16) {
        self.draw_colors = colors;
    }

    fn draw_colors(&self) -> u16 {
        self.draw_colors
    }

    fn rect(&mut self, x: i32, y: i32, width: u32, height: u32) {
        let (w, h) = (width as i32, height as i32);
        if w == 0 || h == 0 {
            return;
        }
        if let Some(fill) = slot_color(self.draw_colors, 0) {
            for py in y..y + h {
                for px in x..x + w {
                    self.plot(px, py, fill);
                }
            }
        }
        if let Some(stroke) = slot_color(self.draw_colors, 1) {
            for px in x..x + w {
                self.plot(px, y, stroke);
                self.plot(px, y + h - 1, stroke);
            }
            for py in y..y + h {
                self.plot(x, py, stroke);
                self.plot(x + w - 1, py, stroke);
            }
        }
    }

    fn vline(&mut self, x: i32, y: i32, len: u32) {
        if let Some(color) = slot_color(self.draw_colors, 0) {
            for py in y..y + len as i32 {
                self.plot(x, py, color);
            }
        }
    }

    fn text(&mut self, text: &str, x: i32, y: i32) {
        self.texts.push(TextCall {
            text: text.to_string(),
            x,
            y,
            colors: self.draw_colors,
        });
    }

    fn tone(&mut self, tone: &Tone) {
        self.tones.push(*tone);
    }

    fn set_palette(&mut self, colors: [u32; 4]) {
        self.palette = colors;
    }

    fn fill_framebuffer(&mut self, color_index: u8) {
        self.pixels.fill(color_index & 0b11);
    }
}
