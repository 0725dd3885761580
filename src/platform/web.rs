//! Browser host: HTML canvas 2D context plus Web Audio
//!
//! The canvas backing store is 160x160; CSS scales it up with pixelated
//! rendering.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Host, slot_color};
use crate::audio::{Tone, WebAudio};
use crate::consts::{FONT_SIZE, SCREEN_SIZE};
use crate::palette::PaletteKind;

pub struct WebHost {
    ctx: CanvasRenderingContext2d,
    audio: WebAudio,
    palette: [u32; 4],
    draw_colors: u16,
}

impl WebHost {
    /// Attach to the canvas with element id `canvas_id`
    pub fn attach(canvas_id: &str) -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let canvas: HtmlCanvasElement = document.get_element_by_id(canvas_id)?.dyn_into().ok()?;
        canvas.set_width(SCREEN_SIZE as u32);
        canvas.set_height(SCREEN_SIZE as u32);

        let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;
        ctx.set_image_smoothing_enabled(false);
        ctx.set_font(&format!("{FONT_SIZE}px monospace"));
        ctx.set_text_baseline("top");

        Some(Self {
            ctx,
            audio: WebAudio::new(),
            palette: PaletteKind::default().colors(),
            draw_colors: 0x1203,
        })
    }

    fn css(&self, index: u8) -> String {
        format!("#{:06x}", self.palette[index as usize & 0b11])
    }

    fn fill(&self, index: u8, x: i32, y: i32, w: i32, h: i32) {
        self.ctx.set_fill_style_str(&self.css(index));
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }
}

impl Host for WebHost {
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
            self.fill(fill, x, y, w, h);
        }
        if let Some(stroke) = slot_color(self.draw_colors, 1) {
            self.fill(stroke, x, y, w, 1);
            self.fill(stroke, x, y + h - 1, w, 1);
            self.fill(stroke, x, y, 1, h);
            self.fill(stroke, x + w - 1, y, 1, h);
        }
    }

    fn vline(&mut self, x: i32, y: i32, len: u32) {
        if let Some(color) = slot_color(self.draw_colors, 0) {
            self.fill(color, x, y, 1, len as i32);
        }
    }

    fn text(&mut self, text: &str, x: i32, y: i32) {
        let Some(color) = slot_color(self.draw_colors, 0) else {
            return;
        };
        self.ctx.set_fill_style_str(&self.css(color));
        if self.ctx.fill_text(text, x as f64, y as f64).is_err() {
            log::warn!("fill_text failed for {:?}", text);
        }
    }

    fn tone(&mut self, tone: &Tone) {
        self.audio.play(tone);
    }

    fn set_palette(&mut self, colors: [u32; 4]) {
        self.palette = colors;
    }

    fn fill_framebuffer(&mut self, color_index: u8) {
        self.fill(color_index, 0, 0, SCREEN_SIZE, SCREEN_SIZE);
    }
}
