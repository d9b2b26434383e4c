//! Tremolo: amplitude modulation of the incoming signal.
//!
//! What old amps called "vibrato" even though it never touches frequency.
//! Unlike the AM generator, which synthesizes its own tone, this modulates
//! the audio that comes in.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::format;
use alloc::string::String;
use ruido_core::{Effect, Oscillator, Pots, Waveform};

/// LFO amplitude modulation.
///
/// # Pots
///
/// | Pot | Parameter | Range |
/// |-----|-----------|-------|
/// | 0 | Rate (squared taper) | 0.5–10.5 Hz |
/// | 1 | Depth | 0–100% |
/// | 2–3 | unused | — |
#[derive(Debug, Clone)]
pub struct Tremolo {
    lfo: Oscillator,
    depth: f32,
}

impl Tremolo {
    /// Create a tremolo with centered controls.
    pub fn new(sample_rate: f32) -> Self {
        let mut tremolo = Self {
            lfo: Oscillator::new(sample_rate),
            depth: 0.5,
        };
        tremolo.init(&Pots::centered());
        tremolo
    }

    fn rate_hz(pots: &Pots) -> f32 {
        // Squared taper gives fine control at slow rates
        let p = pots.get(0);
        0.5 + p * p * 10.0
    }
}

impl Effect for Tremolo {
    fn describe(&self, pots: &Pots) -> String {
        format!(
            "lfo={:.2} Hz depth={:.2} (pots 2-3 unused)",
            Self::rate_hz(pots),
            pots.get(1)
        )
    }

    fn init(&mut self, pots: &Pots) {
        self.lfo.set_frequency(Self::rate_hz(pots));
        self.depth = pots.get(1);
    }

    fn step(&mut self, input: f32) -> f32 {
        let modulation = self.lfo.step(Waveform::Sine);

        // Scale [−1, 1] to [1−depth, 1]: full depth swings to silence at
        // the trough, zero depth leaves the signal untouched
        let multiplier = 1.0 - self.depth * (1.0 - modulation) / 2.0;

        input * multiplier
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.lfo.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.lfo.reset();
    }
}
