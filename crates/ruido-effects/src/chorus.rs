//! Chorus: three detuned voices from modulated delay taps.
//!
//! One delay line, three read taps, each swept by its own LFO at a
//! slightly different rate so the voices never phase-lock. Averaging the
//! taps against the dry signal thickens it the way three players who can't
//! quite agree on timing do.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::format;
use alloc::string::String;
use ruido_core::{DelayLine, Effect, Oscillator, Pots, SmoothedParam, Waveform, lerp};

/// Headroom for the deepest modulated tap: 30 ms base + half again of
/// modulation swing.
const MAX_DELAY_SECONDS: f32 = 0.05;

/// Rate offsets that keep the three voices from locking step.
const VOICE_RATE_SCALE: [f32; 3] = [1.0, 1.1, 0.9];

/// Three-voice modulated delay chorus.
///
/// # Pots
///
/// | Pot | Parameter | Range |
/// |-----|-----------|-------|
/// | 0 | LFO rate | 0.1–5 Hz |
/// | 1 | Base delay | 5–30 ms |
/// | 2 | Modulation depth | 0–100% |
/// | 3 | Mix | dry ↔ wet |
#[derive(Debug, Clone)]
pub struct Chorus {
    lfo: [Oscillator; 3],
    /// Base delay in samples; smoothed because a jumping delay tap is an
    /// audible pitch chirp
    base_delay: SmoothedParam,
    depth: f32,
    mix: f32,
    history: DelayLine,
    sample_rate: f32,
}

impl Chorus {
    /// Per-sample fraction of the remaining gap the base delay closes.
    const DELAY_SMOOTHING: f32 = 0.001;

    /// Create a chorus with centered controls.
    pub fn new(sample_rate: f32) -> Self {
        let initial_delay = 17.5 / 1000.0 * sample_rate;
        let mut chorus = Self {
            lfo: core::array::from_fn(|_| Oscillator::new(sample_rate)),
            base_delay: SmoothedParam::with_rate(initial_delay, Self::DELAY_SMOOTHING),
            depth: 0.5,
            mix: 0.5,
            history: DelayLine::from_time(sample_rate, MAX_DELAY_SECONDS),
            sample_rate,
        };
        chorus.init(&Pots::centered());
        chorus
    }

    fn rate_hz(pots: &Pots) -> f32 {
        pots.linear(0, 0.1, 5.0)
    }

    fn delay_ms(pots: &Pots) -> f32 {
        pots.linear(1, 5.0, 30.0)
    }
}

impl Effect for Chorus {
    fn describe(&self, pots: &Pots) -> String {
        format!(
            "rate={:.2} Hz delay={:.1} ms depth={:.2} mix={:.2}",
            Self::rate_hz(pots),
            Self::delay_ms(pots),
            pots.get(2),
            pots.get(3)
        )
    }

    fn init(&mut self, pots: &Pots) {
        let rate = Self::rate_hz(pots);
        for (lfo, scale) in self.lfo.iter_mut().zip(&VOICE_RATE_SCALE) {
            lfo.set_frequency(rate * scale);
        }
        self.base_delay
            .set_target(Self::delay_ms(pots) / 1000.0 * self.sample_rate);
        self.depth = pots.get(2);
        self.mix = pots.get(3);
    }

    fn step(&mut self, input: f32) -> f32 {
        self.history.write(input);

        let base = self.base_delay.advance();
        let swing = base * self.depth * 0.5;

        let mut wet = 0.0;
        for lfo in &mut self.lfo {
            let lag = base + lfo.step(Waveform::Sine) * swing;
            wet += self.history.read(lag);
        }
        wet /= 3.0;

        lerp(input, wet, self.mix)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        let delay_fraction = self.base_delay.target() / self.sample_rate;
        self.sample_rate = sample_rate;
        for lfo in &mut self.lfo {
            lfo.set_sample_rate(sample_rate);
        }
        self.base_delay.set_immediate(delay_fraction * sample_rate);
        self.history = DelayLine::from_time(sample_rate, MAX_DELAY_SECONDS);
    }

    fn reset(&mut self) {
        for lfo in &mut self.lfo {
            lfo.reset();
        }
        self.base_delay.snap_to_target();
        self.history.clear();
    }
}
