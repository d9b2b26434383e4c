//! The four-knob control vector and its cross-thread form.
//!
//! Every effect derives its physical parameters (rates, depths, frequencies,
//! modes) from exactly four continuous controls in \[0, 1\]. The mapping is
//! pure and deterministic: the same four values always yield the same
//! derived parameters.

use crate::fast_math::fast_pow;
use core::sync::atomic::{AtomicU32, Ordering};

/// Number of control pots.
pub const POT_COUNT: usize = 4;

/// Four control values in \[0, 1\].
///
/// Construction and mutation clamp into range, so downstream mapping
/// helpers never see an out-of-range knob.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pots {
    values: [f32; POT_COUNT],
}

impl Pots {
    /// Build from raw values, clamping each into \[0, 1\].
    pub fn new(values: [f32; POT_COUNT]) -> Self {
        Self {
            values: values.map(|v| v.clamp(0.0, 1.0)),
        }
    }

    /// All four knobs at 0.5.
    pub fn centered() -> Self {
        Self::new([0.5; POT_COUNT])
    }

    /// Value of one pot.
    #[inline]
    pub fn get(&self, index: usize) -> f32 {
        self.values[index]
    }

    /// Set one pot, clamping into \[0, 1\].
    pub fn set(&mut self, index: usize, value: f32) {
        self.values[index] = value.clamp(0.0, 1.0);
    }

    /// Map a pot linearly onto \[`low`, `high`\].
    #[inline]
    pub fn linear(&self, index: usize, low: f32, high: f32) -> f32 {
        low + self.values[index] * (high - low)
    }

    /// Map a pot cubically onto \[`low`, `high`\] — fine control near `low`.
    #[inline]
    pub fn cubic(&self, index: usize, low: f32, high: f32) -> f32 {
        let p = self.values[index];
        low + p * p * p * (high - low)
    }

    /// Map a pot onto an audio-taper frequency: 20 Hz at 0 up to ~20 kHz at
    /// full — ten octaves across the knob's travel.
    ///
    /// The base is 2¹⁰ with the knob as the exponent, keeping [`fast_pow`]
    /// inside the range where its error stays small.
    #[inline]
    pub fn frequency(&self, index: usize) -> f32 {
        20.0 * fast_pow(1024.0, self.values[index])
    }
}

impl Default for Pots {
    fn default() -> Self {
        Self::centered()
    }
}

/// Lock-free shared pot storage for the control thread.
///
/// The control thread stores, the audio thread loads; both use
/// `Ordering::Relaxed`. This is an intentional relaxed-consistency design,
/// not an oversight: each pot is a single 32-bit cell, so a read can never
/// be torn, and the only staleness possible is the audio thread computing
/// against a value from before the write — bounded by one parameter block
/// (a few milliseconds), which is imperceptible for a control knob. No
/// mutex may stall the real-time thread.
#[derive(Debug)]
pub struct SharedPots {
    cells: [AtomicU32; POT_COUNT],
}

impl SharedPots {
    /// Create shared storage holding the given initial values.
    pub fn new(initial: Pots) -> Self {
        Self {
            cells: core::array::from_fn(|i| AtomicU32::new(initial.get(i).to_bits())),
        }
    }

    /// Store one pot value (clamped into \[0, 1\]).
    pub fn store(&self, index: usize, value: f32) {
        self.cells[index].store(value.clamp(0.0, 1.0).to_bits(), Ordering::Relaxed);
    }

    /// Load one pot value.
    pub fn load(&self, index: usize) -> f32 {
        f32::from_bits(self.cells[index].load(Ordering::Relaxed))
    }

    /// Snapshot all four pots.
    ///
    /// The four loads are individually atomic but not mutually consistent;
    /// a concurrent writer may land between them. For control knobs that is
    /// acceptable by design (see type docs).
    pub fn snapshot(&self) -> Pots {
        Pots::new(core::array::from_fn(|i| self.load(i)))
    }
}

impl Default for SharedPots {
    fn default() -> Self {
        Self::new(Pots::centered())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_clamps() {
        let pots = Pots::new([-0.5, 0.3, 1.5, 1.0]);
        assert_eq!(pots.get(0), 0.0);
        assert_eq!(pots.get(1), 0.3);
        assert_eq!(pots.get(2), 1.0);
        assert_eq!(pots.get(3), 1.0);
    }

    #[test]
    fn linear_mapping_endpoints() {
        let pots = Pots::new([0.0, 0.5, 1.0, 0.0]);
        assert_eq!(pots.linear(0, 10.0, 20.0), 10.0);
        assert_eq!(pots.linear(1, 10.0, 20.0), 15.0);
        assert_eq!(pots.linear(2, 10.0, 20.0), 20.0);
    }

    #[test]
    fn cubic_mapping_biases_low() {
        let pots = Pots::new([0.5, 0.0, 0.0, 0.0]);
        let linear = pots.linear(0, 0.0, 100.0);
        let cubic = pots.cubic(0, 0.0, 100.0);
        assert!(cubic < linear);
    }

    #[test]
    fn frequency_taper_spans_audio_band() {
        let pots = Pots::new([0.0, 1.0, 0.0, 0.0]);
        let low = pots.frequency(0);
        let high = pots.frequency(1);
        assert!((15.0..30.0).contains(&low), "low end {low}");
        assert!((10_000.0..30_000.0).contains(&high), "high end {high}");
    }

    #[test]
    fn shared_pots_roundtrip() {
        let shared = SharedPots::new(Pots::centered());
        shared.store(2, 0.75);
        assert_eq!(shared.load(2), 0.75);
        let snap = shared.snapshot();
        assert_eq!(snap.get(0), 0.5);
        assert_eq!(snap.get(2), 0.75);
    }

    #[test]
    fn shared_pots_store_clamps() {
        let shared = SharedPots::default();
        shared.store(0, 7.0);
        assert_eq!(shared.load(0), 1.0);
    }
}
