//! Peak amplitude tracking with asymmetric attack and decay.
//!
//! Rises instantly to a new peak and falls exponentially afterwards — the
//! response a synthesizer voice wants when it should only sing while the
//! input is actually playing.

use libm::exp2f;

/// Instant-attack, exponential-decay peak tracker.
///
/// The decay rate is expressed in halvings per second: at the default of
/// 40, the tracked level halves every 25 ms of silence.
///
/// # Example
///
/// ```rust
/// use ruido_core::PeakTracker;
///
/// let mut tracker = PeakTracker::new(48000.0);
/// let level = tracker.process(0.8);
/// assert_eq!(level, 0.8); // attack is instant
/// ```
#[derive(Debug, Clone)]
pub struct PeakTracker {
    /// Current tracked level (always ≥ 0)
    level: f32,
    /// Per-sample decay multiplier
    decay: f32,
    /// Sample rate in Hz
    sample_rate: f32,
    /// Decay rate in halvings per second
    halvings_per_sec: f32,
}

impl PeakTracker {
    /// Default decay rate: the level halves 40 times per second.
    pub const DEFAULT_HALVINGS_PER_SEC: f32 = 40.0;

    /// Create a tracker with the default decay rate.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_halvings(sample_rate, Self::DEFAULT_HALVINGS_PER_SEC)
    }

    /// Create a tracker with an explicit decay rate in halvings per second.
    pub fn with_halvings(sample_rate: f32, halvings_per_sec: f32) -> Self {
        let mut tracker = Self {
            level: 0.0,
            decay: 0.0,
            sample_rate,
            halvings_per_sec: halvings_per_sec.max(0.0),
        };
        tracker.recalculate();
        tracker
    }

    /// Change the decay rate.
    pub fn set_halvings_per_sec(&mut self, halvings_per_sec: f32) {
        self.halvings_per_sec = halvings_per_sec.max(0.0);
        self.recalculate();
    }

    /// Update the sample rate, preserving the decay rate.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.recalculate();
    }

    /// Track one sample; returns the current level.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let a = input.abs();
        self.level = if a < self.level {
            // Exponential fall toward the quieter input
            a + (self.level - a) * self.decay
        } else {
            a
        };
        self.level
    }

    /// Current level without processing new input.
    #[inline]
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Reset the tracked level to zero.
    pub fn reset(&mut self) {
        self.level = 0.0;
    }

    fn recalculate(&mut self) {
        // 0.5^(halvings / sample_rate) per sample
        self.decay = exp2f(-self.halvings_per_sec / self.sample_rate);
    }
}
