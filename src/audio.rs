//! Tone descriptors and browser playback
//!
//! The cartridge speaks one audio primitive: a tone with a packed frequency
//! sweep, a duration in frames, a volume and channel/mode flags. Hosts decide
//! how to make it audible.

use serde::{Deserialize, Serialize};

/// Headroom kept below full scale for every tone
const MASTER_GAIN: f32 = 0.8;

/// Sound channel, low two bits of the tone flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Channel {
    Pulse1 = 0,
    Pulse2 = 1,
    Triangle = 2,
    Noise = 3,
}

/// Pulse duty cycle, bits 2-3 of the tone flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DutyMode {
    /// 12.5%
    Mode1 = 0,
    /// 25%
    Mode2 = 4,
    /// 50%
    Mode3 = 8,
    /// 75%
    Mode4 = 12,
}

/// A single tone request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tone {
    /// Start frequency in the low 16 bits, end frequency in the high 16 bits
    pub frequency: u32,
    /// Length in frames
    pub duration: u32,
    /// 0-100
    pub volume: u32,
    pub flags: u32,
}

impl Tone {
    pub const fn new(
        start_hz: u16,
        end_hz: u16,
        duration: u32,
        volume: u32,
        channel: Channel,
        mode: DutyMode,
    ) -> Self {
        Self {
            frequency: start_hz as u32 | (end_hz as u32) << 16,
            duration,
            volume,
            flags: channel as u32 | mode as u32,
        }
    }

    pub fn start_hz(&self) -> u16 {
        (self.frequency & 0xffff) as u16
    }

    /// End of the sweep; a zero end frequency means no sweep
    pub fn end_hz(&self) -> u16 {
        match (self.frequency >> 16) as u16 {
            0 => self.start_hz(),
            hz => hz,
        }
    }

    pub fn channel(&self) -> Channel {
        match self.flags & 0b11 {
            0 => Channel::Pulse1,
            1 => Channel::Pulse2,
            2 => Channel::Triangle,
            _ => Channel::Noise,
        }
    }

    pub fn mode(&self) -> DutyMode {
        match self.flags & 0b1100 {
            0 => DutyMode::Mode1,
            4 => DutyMode::Mode2,
            8 => DutyMode::Mode3,
            _ => DutyMode::Mode4,
        }
    }

    /// Output gain in `0.0..=0.8`, volume scaled under the master level
    pub fn gain(&self) -> f32 {
        MASTER_GAIN * (self.volume.min(100) as f32 / 100.0)
    }

    /// Duration in seconds at 60 frames per second
    pub fn seconds(&self) -> f64 {
        self.duration as f64 / 60.0
    }
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball damages a brick: a short C4 to C5 chirp
    BrickHit,
}

impl SoundEffect {
    pub fn tone(&self) -> Tone {
        match self {
            SoundEffect::BrickHit => Tone::new(262, 523, 5, 25, Channel::Pulse1, DutyMode::Mode1),
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{Channel, Tone};
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    /// Plays tones through the Web Audio API
    pub struct WebAudio {
        ctx: Option<AudioContext>,
    }

    impl Default for WebAudio {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudio {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx }
        }

        pub fn play(&self, tone: &Tone) {
            let vol = tone.gain();
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            // No noise source in Web Audio oscillators; sawtooth is the closest buzz
            let osc_type = match tone.channel() {
                Channel::Pulse1 | Channel::Pulse2 => OscillatorType::Square,
                Channel::Triangle => OscillatorType::Triangle,
                Channel::Noise => OscillatorType::Sawtooth,
            };
            let Some((osc, gain)) = Self::create_osc(ctx, tone.start_hz() as f32, osc_type) else {
                return;
            };
            let t = ctx.current_time();
            let end = t + tone.seconds();

            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain().linear_ramp_to_value_at_time(0.0, end).ok();
            osc.frequency().set_value_at_time(tone.start_hz() as f32, t).ok();
            osc.frequency()
                .linear_ramp_to_value_at_time(tone.end_hz() as f32, end)
                .ok();

            osc.start().ok();
            osc.stop_with_when(end).ok();
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }
    }
}
