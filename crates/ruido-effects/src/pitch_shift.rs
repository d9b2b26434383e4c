//! Delay-crossfade pitch shifter.
//!
//! Reads the delay line at a tap that walks steadily away from the write
//! cursor, which replays the signal slower or faster than it arrived —
//! a pitch shift. The walking tap eventually snaps back, and the snap is a
//! discontinuity; this effect hides it by running two taps half a cycle
//! apart and crossfading with sin²/cos² weights, so each tap is silent at
//! the exact moment its read position jumps.
//!
//! The crossfade clock is a bare u32 phase counter rather than an
//! Hz-configured oscillator: the tap index is the top twelve bits of the
//! doubled counter, which reuses one half of the sine wave twice (sin² is
//! the same in both halves). The timing of that crossfade is characterized
//! by the regression tests rather than re-derived; treat the index
//! arithmetic as load-bearing.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::format;
use alloc::string::String;
use ruido_core::{DelayLine, Effect, Pots, fast_pow2_m1, fast_sin_cos, u32_to_fraction};

/// Bits of tap index space; one crossfade half-cycle spans 2¹² positions.
const INDEX_SHIFT: u32 = 12;

/// Positions per crossfade half-cycle.
const INDEX_STEPS: u32 = 1 << INDEX_SHIFT;

/// Per-sample increment of the crossfade clock: one full sine cycle per
/// 2·4096 samples, of which each half drives one tap sweep.
const CLOCK_INCREMENT: u32 = 1 << (31 - INDEX_SHIFT);

/// Pitch shifter hiding tap discontinuities behind a sin² crossfade.
///
/// # Pots
///
/// | Pot | Parameter | Range |
/// |-----|-----------|-------|
/// | 0 | Pitch step | unison at 0 up to one octave at 1 |
/// | 1–3 | unused | — |
#[derive(Debug, Clone)]
pub struct PitchShifter {
    /// Samples the read taps walk per input sample; 0 is unison
    step: f32,
    /// Crossfade clock; tap indices are its top twelve (doubled) bits
    clock: u32,
    history: DelayLine,
}

impl PitchShifter {
    /// Create a shifter at unison.
    pub fn new(_sample_rate: f32) -> Self {
        let mut shifter = Self {
            step: 0.0,
            clock: 0,
            // Both taps stay within 2·INDEX_STEPS·step ≤ 2·INDEX_STEPS
            history: DelayLine::new(2 * INDEX_STEPS as usize + 2),
        };
        shifter.init(&Pots::centered());
        shifter
    }
}

impl Effect for PitchShifter {
    fn describe(&self, pots: &Pots) -> String {
        format!(
            "tonestep={:.4} (pots 1-3 unused)",
            fast_pow2_m1(pots.get(0)) + 1.0
        )
    }

    fn init(&mut self, pots: &Pots) {
        // Musical mapping: the pot is an octave fraction, the step the
        // resulting frequency ratio minus one
        self.step = fast_pow2_m1(pots.get(0));
    }

    fn step(&mut self, input: f32) -> f32 {
        self.clock = self.clock.wrapping_add(CLOCK_INCREMENT);

        // Tap position: top bits of the doubled clock, so the index sweeps
        // the full range once per half sine cycle. The second tap runs half
        // a sweep behind.
        let i = (self.clock << 1) >> (32 - INDEX_SHIFT);
        let ni = (i + INDEX_STEPS / 2) & (INDEX_STEPS - 1);

        let (sin, _) = fast_sin_cos(u32_to_fraction(self.clock));
        let fade = sin * sin;

        let step = self.step;
        let base = 2.0 * INDEX_STEPS as f32 * step;

        self.history.write(input);

        // Each tap is weighted to zero exactly when its index wraps:
        // i wraps where sin² = 0, ni where cos² = 0.
        let d1 = self.history.read(base - i as f32 * step) * fade;
        let d2 = self.history.read(base - ni as f32 * step) * (1.0 - fade);

        d1 + d2
    }

    fn set_sample_rate(&mut self, _sample_rate: f32) {
        // The crossfade clock is tied to the index space, not to wall time;
        // the sweep spans the same sample count at any rate
    }

    fn reset(&mut self) {
        self.clock = 0;
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(n: usize, freq: f32, sr: f32) -> f32 {
        libm::sinf(core::f32::consts::TAU * freq * n as f32 / sr)
    }

    #[test]
    fn zero_step_is_unity_gain_passthrough() {
        let mut fx = PitchShifter::new(48000.0);
        fx.init(&Pots::new([0.0, 0.0, 0.0, 0.0]));

        // step = 0: both taps read lag 0 and the sin²/cos² weights sum to 1
        for n in 0..8192 {
            let input = sine(n, 440.0, 48000.0);
            let out = fx.step(input);
            assert!(
                (out - input).abs() < 1e-2,
                "passthrough deviated at {n}: {out} vs {input}"
            );
        }
    }

    #[test]
    fn raised_pitch_raises_frequency() {
        let sr = 48000.0;
        let mut fx = PitchShifter::new(sr);
        // Full pot: one octave up, ratio ≈ 2
        fx.init(&Pots::new([1.0, 0.0, 0.0, 0.0]));

        // Warm the delay line past the deepest tap
        for n in 0..16384 {
            fx.step(sine(n, 220.0, sr));
        }

        let mut crossings = 0u32;
        let mut prev = 0.0f32;
        let count = sr as usize;
        for n in 16384..16384 + count {
            let out = fx.step(sine(n, 220.0, sr));
            if prev <= 0.0 && out > 0.0 {
                crossings += 1;
            }
            prev = out;
        }
        // Expect roughly 440 positive crossings per second; the crossfade
        // smears the exact count
        assert!(
            (380..=500).contains(&crossings),
            "octave-up of 220 Hz gave {crossings} crossings"
        );
    }

    #[test]
    fn output_stays_finite_and_bounded() {
        let mut fx = PitchShifter::new(48000.0);
        fx.init(&Pots::new([0.7, 0.0, 0.0, 0.0]));

        for n in 0..96000 {
            let out = fx.step(sine(n, 1000.0, 48000.0));
            assert!(out.is_finite());
            assert!(out.abs() <= 2.0, "ran away at {n}: {out}");
        }
    }

    #[test]
    fn tap_weights_are_complementary() {
        // The two taps crossfade with sin² and 1−sin²; feeding DC must
        // reproduce DC regardless of where the taps sit
        let mut fx = PitchShifter::new(48000.0);
        fx.init(&Pots::new([0.5, 0.0, 0.0, 0.0]));

        for _ in 0..16384 {
            fx.step(0.5);
        }
        for _ in 0..8192 {
            let out = fx.step(0.5);
            assert!((out - 0.5).abs() < 1e-2, "DC deviated: {out}");
        }
    }

    #[test]
    fn describe_reports_tone_step() {
        let fx = PitchShifter::new(48000.0);
        let text = fx.describe(&Pots::new([0.0, 0.0, 0.0, 0.0]));
        assert!(text.contains("tonestep=1.0000"), "got: {text}");
    }
}
