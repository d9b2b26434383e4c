//! Parameter smoothing for click-free control changes.
//!
//! Delay-time-like parameters cannot jump: an instantaneous change of a
//! delay tap is a discontinuity in the output, heard as a click or a pitch
//! chirp. [`SmoothedParam`] walks the live value toward its target by a
//! small fraction of the remaining gap per step.
//!
//! Parameters that are recomputed discretely at block boundaries (filter
//! cutoffs, oscillator targets) legitimately step and do not go through the
//! smoother.

use libm::expf;

/// A parameter that exponentially approaches its target.
///
/// Each [`advance`](Self::advance) moves the current value by
/// `coeff * (target − current)` — a one-pole lowpass on the control signal.
///
/// # Example
///
/// ```rust
/// use ruido_core::SmoothedParam;
///
/// // 0.1% of the gap per sample — the delay-time smoothing rate
/// let mut delay_ms = SmoothedParam::with_rate(20.0, 0.001);
/// delay_ms.set_target(35.0);
/// let v = delay_ms.advance(); // inches toward 35.0
/// assert!(v > 20.0 && v < 20.1);
/// ```
#[derive(Debug, Clone)]
pub struct SmoothedParam {
    /// Current smoothed value
    current: f32,
    /// Target value being approached
    target: f32,
    /// Fraction of the gap closed per advance (0 = frozen, 1 = instant)
    coeff: f32,
}

impl SmoothedParam {
    /// Create with a fixed per-step rate.
    ///
    /// `rate` is the fraction of the remaining gap closed per `advance`;
    /// 0.001 (0.1% per sample) is the conventional delay-time rate.
    pub fn with_rate(initial: f32, rate: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            coeff: rate.clamp(0.0, 1.0),
        }
    }

    /// Create from a time constant in milliseconds at a sample rate.
    ///
    /// The coefficient is derived so the value covers ~63% of the gap per
    /// time constant: `coeff = 1 − exp(−1 / (tau · sample_rate))`.
    pub fn with_time_constant(initial: f32, sample_rate: f32, time_ms: f32) -> Self {
        let coeff = if time_ms <= 0.0 || sample_rate <= 0.0 {
            1.0
        } else {
            let samples = time_ms / 1000.0 * sample_rate;
            1.0 - expf(-1.0 / samples)
        };
        Self {
            current: initial,
            target: initial,
            coeff,
        }
    }

    /// Set the value the parameter will smooth toward.
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Set target and current together (no smoothing).
    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.target = value;
        self.current = value;
    }

    /// Advance one step and return the smoothed value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        self.current += self.coeff * (self.target - self.current);
        self.current
    }

    /// Current value without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// Target value.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Whether the value has effectively reached its target.
    #[inline]
    pub fn is_settled(&self) -> bool {
        (self.current - self.target).abs() < 1e-6
    }

    /// Jump to the target immediately.
    #[inline]
    pub fn snap_to_target(&mut self) {
        self.current = self.target;
    }
}
