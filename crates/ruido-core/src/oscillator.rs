//! Phase-accumulator oscillator for modulation and synthesis.
//!
//! The phase lives in a u32 counter that wraps in integer arithmetic — one
//! full cycle is exactly 2³² counts. This, not floating-point accumulation,
//! is what keeps an oscillator from drifting over hours of samples: the wrap
//! is exact, and the increment is applied losslessly.

use crate::fast_math::{TWO_POW_32, fast_sin_cos, fraction_to_u32, u32_to_fraction};
use libm::floorf;

/// Oscillator waveform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Waveform {
    /// Smooth sine in \[−1, 1\], via the quarter-wave table.
    #[default]
    Sine,
    /// Linear ramps in \[−1, 1\].
    Triangle,
    /// Rising ramp in \[0, 1).
    Sawtooth,
}

/// Phase-accumulator oscillator.
///
/// Used both as a sub-audio LFO (tremolo, chorus) and at audio rate
/// (harmonic synthesis). Changing frequency between steps never resets the
/// phase, so frequency modulation is click-free.
///
/// # Example
///
/// ```rust
/// use ruido_core::{Oscillator, Waveform};
///
/// let mut osc = Oscillator::new(48000.0);
/// osc.set_frequency(2.0);
/// let value = osc.step(Waveform::Sine); // in [-1, 1]
/// ```
#[derive(Debug, Clone)]
pub struct Oscillator {
    /// Current phase; one cycle per 2³² counts
    phase: u32,
    /// Per-sample phase increment
    increment: u32,
    /// Sample rate in Hz
    sample_rate: f32,
}

impl Oscillator {
    /// Create a silent (0 Hz) oscillator at the given sample rate.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            phase: 0,
            increment: 0,
            sample_rate,
        }
    }

    /// Set frequency in Hz. Does not reset phase.
    #[inline]
    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.increment = (freq_hz * (TWO_POW_32 / self.sample_rate)) as u32;
    }

    /// Set frequency from a period in milliseconds. Does not reset phase.
    pub fn set_period_ms(&mut self, period_ms: f32) {
        debug_assert!(period_ms > 0.0);
        self.set_frequency(1000.0 / period_ms);
    }

    /// Current frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.increment as f32 * (self.sample_rate / TWO_POW_32)
    }

    /// Update the sample rate, preserving the configured frequency.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        let freq = self.frequency();
        self.sample_rate = sample_rate;
        self.set_frequency(freq);
    }

    /// Reset phase to zero.
    pub fn reset(&mut self) {
        self.phase = 0;
    }

    /// Current phase as a fraction of a cycle in \[0, 1).
    #[inline]
    pub fn phase_fraction(&self) -> f32 {
        u32_to_fraction(self.phase)
    }

    /// Offset the phase by a fraction of a cycle (may be negative).
    ///
    /// The offset is reduced modulo one cycle and applied to the counter,
    /// so repeated small nudges cannot accumulate floating-point error.
    #[inline]
    pub fn nudge(&mut self, delta_cycles: f32) {
        let wrapped = delta_cycles - floorf(delta_cycles);
        self.phase = self.phase.wrapping_add(fraction_to_u32(wrapped));
    }

    /// Advance one sample and return the waveform value.
    ///
    /// Sine and triangle are in \[−1, 1\], sawtooth in \[0, 1).
    #[inline]
    pub fn step(&mut self, waveform: Waveform) -> f32 {
        self.phase = self.phase.wrapping_add(self.increment);
        let frac = u32_to_fraction(self.phase);
        match waveform {
            Waveform::Sine => fast_sin_cos(frac).0,
            Waveform::Triangle => {
                if frac < 0.5 {
                    4.0 * frac - 1.0
                } else {
                    3.0 - 4.0 * frac
                }
            }
            Waveform::Sawtooth => frac,
        }
    }
}
