//! Formant-preserving pitch expansion.
//!
//! Splits the signal into an amplitude envelope and a carrier oscillation,
//! then shifts only the carrier frequency. This changes the perceived size
//! of the sound source without the chipmunk/monster artifact of naive
//! resampling.
//!
//! The split uses a Hilbert transform approximation: two parallel cascades
//! of four allpass sections with offset center frequencies, hand-tuned to
//! hold roughly 90° of relative phase across ~100 Hz to ~10 kHz. The pair
//! of outputs is treated as an analytic signal — magnitude is the
//! instantaneous envelope, angle the instantaneous phase.
//!
//! Accepted limitations, by design: the approximation falls apart below
//! ~100 Hz and above ~10 kHz, and the sample-by-sample phase unwrapping has
//! no lookahead, so hard transients glitch briefly. That is the price of
//! zero latency, not an error condition.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::format;
use alloc::string::String;
use core::f32::consts::PI;
use libm::{atan2f, cosf, sqrtf};
use ruido_core::{Biquad, Effect, Pots, lerp, soft_limit};

/// Stages per allpass cascade.
const STAGES: usize = 4;

/// Center frequencies for the in-phase cascade. These match the group
/// delay of the quadrature chain so the two paths stay time-aligned.
const IN_PHASE_CENTERS: [f32; STAGES] = [100.0, 560.0, 2400.0, 9500.0];

/// Center frequencies for the quadrature (~90° shifted) cascade.
const QUADRATURE_CENTERS: [f32; STAGES] = [170.0, 960.0, 4300.0, 15500.0];

/// Butterworth Q for every section.
const SECTION_Q: f32 = 0.7071;

/// Formant-preserving pitch shifter.
///
/// # Pots
///
/// | Pot | Parameter | Range |
/// |-----|-----------|-------|
/// | 0 | Pitch ratio | 0.5–2.0× |
/// | 1 | Envelope smoothing | flat ↔ detailed |
/// | 2 | Blend | dry ↔ wet |
/// | 3 | Formant strength | how much of the ratio is applied |
#[derive(Debug, Clone)]
pub struct FormantShifter {
    /// Carrier frequency multiplier
    pitch_ratio: f32,
    /// Envelope follower coefficient control
    env_smooth: f32,
    /// Dry/wet blend
    blend: f32,
    /// Blend between unshifted (0) and full ratio (1)
    formant_strength: f32,

    /// In-phase allpass chain (group-delay matching)
    ap_i: [Biquad; STAGES],
    /// Quadrature allpass chain (~90° shift)
    ap_q: [Biquad; STAGES],

    /// Previous instantaneous phase, in (−π, π]
    prev_phase: f32,
    /// Output phase accumulator, rewrapped into (−π, π] every step
    out_phase: f32,
    /// Smoothed instantaneous envelope
    envelope: f32,

    sample_rate: f32,
}

impl FormantShifter {
    /// Create a shifter with centered controls.
    pub fn new(sample_rate: f32) -> Self {
        let mut shifter = Self {
            pitch_ratio: 1.0,
            env_smooth: 0.5,
            blend: 0.5,
            formant_strength: 0.5,
            ap_i: core::array::from_fn(|_| Biquad::new()),
            ap_q: core::array::from_fn(|_| Biquad::new()),
            prev_phase: 0.0,
            out_phase: 0.0,
            envelope: 0.0,
            sample_rate,
        };
        shifter.init(&Pots::centered());
        shifter
    }

    fn configure_cascades(&mut self) {
        // Keep the top quadrature stage legal at low sample rates
        let ceiling = self.sample_rate * 0.45;
        for (section, &freq) in self.ap_i.iter_mut().zip(&IN_PHASE_CENTERS) {
            section.set_allpass(freq.min(ceiling), SECTION_Q, self.sample_rate);
        }
        for (section, &freq) in self.ap_q.iter_mut().zip(&QUADRATURE_CENTERS) {
            section.set_allpass(freq.min(ceiling), SECTION_Q, self.sample_rate);
        }
    }
}

impl Effect for FormantShifter {
    fn describe(&self, pots: &Pots) -> String {
        format!(
            "pitch={:.2}x env_smooth={:.2} blend={:.2} formant={:.2}",
            pots.linear(0, 0.5, 2.0),
            pots.get(1),
            pots.get(2),
            pots.get(3)
        )
    }

    fn init(&mut self, pots: &Pots) {
        self.pitch_ratio = pots.linear(0, 0.5, 2.0);
        self.env_smooth = pots.get(1);
        self.blend = pots.get(2);
        self.formant_strength = pots.get(3);
        self.configure_cascades();
    }

    fn step(&mut self, input: f32) -> f32 {
        // Run both cascades; together the outputs approximate an analytic
        // signal
        let mut sig_i = input;
        let mut sig_q = input;
        for section in &mut self.ap_i {
            sig_i = section.process(sig_i);
        }
        for section in &mut self.ap_q {
            sig_q = section.process(sig_q);
        }

        // Instantaneous amplitude. Low smoothing keeps envelope detail,
        // high smoothing flattens toward a whisper.
        let env = sqrtf(sig_i * sig_i + sig_q * sig_q);
        let smooth = 0.001 + self.env_smooth * 0.05;
        self.envelope += smooth * (env - self.envelope);

        // Instantaneous phase and its per-sample delta
        let phase = atan2f(sig_q, sig_i);
        let mut dphase = phase - self.prev_phase;
        self.prev_phase = phase;

        // Unwrap the delta into (-π, π]; atan2 jumps ±2π at the branch cut
        while dphase > PI {
            dphase -= 2.0 * PI;
        }
        while dphase < -PI {
            dphase += 2.0 * PI;
        }

        // Scale the instantaneous frequency and accumulate
        let ratio = lerp(1.0, self.pitch_ratio, self.formant_strength);
        self.out_phase += dphase * ratio;

        // Rewrap so the accumulator magnitude stays bounded over
        // arbitrarily long runs
        while self.out_phase > PI {
            self.out_phase -= 2.0 * PI;
        }
        while self.out_phase < -PI {
            self.out_phase += 2.0 * PI;
        }

        // Reconstruct with the smoothed envelope to preserve the formant
        // structure
        let wet = soft_limit(self.envelope * cosf(self.out_phase));

        lerp(input, wet, self.blend)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.configure_cascades();
    }

    fn reset(&mut self) {
        for section in &mut self.ap_i {
            section.clear();
        }
        for section in &mut self.ap_q {
            section.clear();
        }
        self.prev_phase = 0.0;
        self.out_phase = 0.0;
        self.envelope = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(n: usize, freq: f32, sr: f32) -> f32 {
        libm::sinf(core::f32::consts::TAU * freq * n as f32 / sr)
    }

    #[test]
    fn zero_blend_is_identity() {
        let mut fx = FormantShifter::new(48000.0);
        fx.init(&Pots::new([0.9, 0.7, 0.0, 1.0]));

        for n in 0..4800 {
            let input = sine(n, 440.0, 48000.0);
            assert_eq!(fx.step(input), input);
        }
    }

    #[test]
    fn unity_ratio_tracks_input() {
        let sr = 48000.0;
        let mut fx = FormantShifter::new(sr);
        // pot0 = 0.5 → ratio exactly 1.0, full wet, full strength
        fx.init(&Pots::new([0.5, 0.2, 1.0, 1.0]));

        // Settle the envelope follower first
        for n in 0..48000 {
            fx.step(sine(n, 440.0, sr));
        }

        // The wet path reproduces the carrier through the allpass chain:
        // same frequency (count zero crossings) and comparable energy,
        // though group delay shifts the waveform in time.
        let count = 48000;
        let mut crossings = 0u32;
        let mut prev = 0.0f32;
        let mut energy_in = 0.0f32;
        let mut energy_out = 0.0f32;
        for n in 48000..48000 + count {
            let input = sine(n, 440.0, sr);
            let output = fx.step(input);
            if prev <= 0.0 && output > 0.0 {
                crossings += 1;
            }
            prev = output;
            energy_in += input * input;
            energy_out += output * output;
        }
        // One second of output: expect ~440 positive-going crossings
        assert!(
            (400..=480).contains(&crossings),
            "output frequency drifted: {crossings} crossings"
        );
        let ratio = energy_out / energy_in;
        assert!(
            (0.25..=1.6).contains(&ratio),
            "energy ratio {ratio} out of range"
        );
    }

    #[test]
    fn long_run_stays_finite() {
        let sr = 48000.0;
        for (name, signal) in [
            ("silence", None),
            ("dc", Some(0.8f32)),
            ("fullscale", None),
        ] {
            let mut fx = FormantShifter::new(sr);
            fx.init(&Pots::new([1.0, 0.0, 1.0, 1.0]));
            // Several seconds of samples
            for n in 0..(sr as usize * 4) {
                let input = match (name, signal) {
                    ("silence", _) => 0.0,
                    (_, Some(dc)) => dc,
                    _ => sine(n, 440.0, sr),
                };
                let out = fx.step(input);
                assert!(out.is_finite(), "{name} went non-finite at {n}");
                assert!(out.abs() <= 2.0, "{name} magnitude ran away at {n}");
            }
        }
    }

    #[test]
    fn output_phase_stays_wrapped() {
        let mut fx = FormantShifter::new(48000.0);
        fx.init(&Pots::new([1.0, 0.5, 1.0, 1.0]));
        for n in 0..96000 {
            fx.step(sine(n, 880.0, 48000.0));
            assert!(fx.out_phase.abs() <= PI + 1e-3);
        }
    }

    #[test]
    fn reinit_mid_stream_does_not_reset_state() {
        let mut fx = FormantShifter::new(48000.0);
        fx.init(&Pots::new([0.5, 0.5, 1.0, 1.0]));
        for n in 0..4800 {
            fx.step(sine(n, 440.0, 48000.0));
        }
        let envelope_before = fx.envelope;
        fx.init(&Pots::new([0.6, 0.5, 1.0, 1.0]));
        assert_eq!(fx.envelope, envelope_before);
    }

    #[test]
    fn describe_reflects_pots() {
        let fx = FormantShifter::new(48000.0);
        let text = fx.describe(&Pots::new([1.0, 0.0, 0.0, 0.0]));
        assert!(text.contains("pitch=2.00x"), "got: {text}");
    }
}
