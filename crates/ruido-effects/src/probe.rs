//! Envelope probe: outputs the tracked amplitude of the input.
//!
//! A diagnostic "effect" — route it to a file and you get the input's
//! amplitude contour as an audio-rate signal, handy for checking what the
//! braid's gate actually sees.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::format;
use alloc::string::String;
use ruido_core::{Effect, PeakTracker, Pots};

/// Peak-envelope follower exposed as an effect.
///
/// # Pots
///
/// | Pot | Parameter | Range |
/// |-----|-----------|-------|
/// | 0 | Decay rate | 5–100 halvings/s |
/// | 1–3 | unused | — |
#[derive(Debug, Clone)]
pub struct EnvelopeProbe {
    tracker: PeakTracker,
}

impl EnvelopeProbe {
    /// Create a probe with the default decay.
    pub fn new(sample_rate: f32) -> Self {
        let mut probe = Self {
            tracker: PeakTracker::new(sample_rate),
        };
        probe.init(&Pots::centered());
        probe
    }

    fn halvings(pots: &Pots) -> f32 {
        pots.linear(0, 5.0, 100.0)
    }
}

impl Effect for EnvelopeProbe {
    fn describe(&self, pots: &Pots) -> String {
        format!(
            "decay={:.0} halvings/s (pots 1-3 unused)",
            Self::halvings(pots)
        )
    }

    fn init(&mut self, pots: &Pots) {
        self.tracker.set_halvings_per_sec(Self::halvings(pots));
    }

    fn step(&mut self, input: f32) -> f32 {
        self.tracker.process(input)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.tracker.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.tracker.reset();
    }
}
