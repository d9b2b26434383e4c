//! Distortion: drive into a waveshaper, then a tone filter.
//!
//! Three shaper curves cover overdrive through fuzz: a smooth rational
//! saturator, a hard clip, and an asymmetric curve that favors even
//! harmonics the way tube stages do.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::format;
use alloc::string::String;
use ruido_core::{Biquad, Effect, Pots};

/// Waveshaper curve selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShaperMode {
    /// Smooth rational saturation, `x / (1 + |x|)`
    #[default]
    Soft,
    /// Hard clip at ±1
    Hard,
    /// Softer on the negative half; adds even harmonics
    Asymmetric,
}

impl ShaperMode {
    fn from_pot(value: f32) -> Self {
        if value < 0.33 {
            ShaperMode::Soft
        } else if value < 0.66 {
            ShaperMode::Hard
        } else {
            ShaperMode::Asymmetric
        }
    }

    const fn name(self) -> &'static str {
        match self {
            ShaperMode::Soft => "soft",
            ShaperMode::Hard => "hard",
            ShaperMode::Asymmetric => "asymmetric",
        }
    }
}

/// Smooth saturation curve, a fast tanh stand-in.
#[inline]
fn soft_clip(x: f32) -> f32 {
    x / (1.0 + x.abs())
}

#[inline]
fn hard_clip(x: f32) -> f32 {
    x.clamp(-1.0, 1.0)
}

/// Tube-like asymmetry: the negative half saturates earlier and lower.
#[inline]
fn asymmetric_clip(x: f32) -> f32 {
    if x > 0.0 {
        soft_clip(x)
    } else {
        soft_clip(x * 0.7) * 0.7
    }
}

/// Waveshaping distortion with a tone lowpass.
///
/// # Pots
///
/// | Pot | Parameter | Range |
/// |-----|-----------|-------|
/// | 0 | Drive | 1–50× |
/// | 1 | Tone (lowpass cutoff) | 1–10 kHz |
/// | 2 | Output level | 0–100% |
/// | 3 | Mode | soft / hard / asymmetric by thirds |
#[derive(Debug, Clone)]
pub struct Distortion {
    drive: f32,
    level: f32,
    mode: ShaperMode,
    tone: Biquad,
    tone_freq: f32,
    sample_rate: f32,
}

impl Distortion {
    /// Create a distortion with centered controls.
    pub fn new(sample_rate: f32) -> Self {
        let mut distortion = Self {
            drive: 1.0,
            level: 0.5,
            mode: ShaperMode::Soft,
            tone: Biquad::new(),
            tone_freq: 5500.0,
            sample_rate,
        };
        distortion.init(&Pots::centered());
        distortion
    }

    fn drive_amount(pots: &Pots) -> f32 {
        pots.linear(0, 1.0, 50.0)
    }

    fn tone_hz(pots: &Pots) -> f32 {
        pots.linear(1, 1000.0, 10000.0)
    }
}

impl Effect for Distortion {
    fn describe(&self, pots: &Pots) -> String {
        format!(
            "drive={:.1}x tone={:.0} Hz level={:.2} mode={}",
            Self::drive_amount(pots),
            Self::tone_hz(pots),
            pots.get(2),
            ShaperMode::from_pot(pots.get(3)).name()
        )
    }

    fn init(&mut self, pots: &Pots) {
        self.drive = Self::drive_amount(pots);
        self.level = pots.get(2);
        self.mode = ShaperMode::from_pot(pots.get(3));
        self.tone_freq = Self::tone_hz(pots);
        let cutoff = self.tone_freq.min(self.sample_rate * 0.45);
        self.tone.set_lowpass(cutoff, 0.707, self.sample_rate);
    }

    fn step(&mut self, input: f32) -> f32 {
        let driven = input * self.drive;

        let shaped = match self.mode {
            ShaperMode::Soft => soft_clip(driven),
            ShaperMode::Hard => hard_clip(driven),
            ShaperMode::Asymmetric => asymmetric_clip(driven),
        };

        self.tone.process(shaped) * self.level
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        let cutoff = self.tone_freq.min(sample_rate * 0.45);
        self.tone.set_lowpass(cutoff, 0.707, sample_rate);
    }

    fn reset(&mut self) {
        self.tone.clear();
    }
}
