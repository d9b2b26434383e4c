//! Subharmonic-harmonic braid: five coupled oscillators locked to the input.
//!
//! Five oscillators at 0.5×, 1×, 2×, 3×, and 4× the tracked fundamental,
//! pulled toward each other with Kuramoto-style phase nudging. The result
//! sits between a bass growl and a shimmering overtone halo depending on
//! how tightly they couple:
//!
//! - coupling ≈ 0: free-running oscillators, drifting in and out of phase,
//!   rich beating patterns
//! - coupling ≈ 0.4: partial sync, alive without being locked
//! - coupling ≈ 1: full phase lock, a clean (and static) harmonic series
//!
//! The fundamental comes from zero-crossing detection on a lowpassed copy
//! of the input. It works for single notes; a chord tracks whichever
//! fundamental wins the zero-crossing race, which is accepted behavior,
//! not a defect.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::format;
use alloc::string::String;
use core::f32::consts::TAU;
use libm::sinf;
use ruido_core::{Biquad, Effect, Oscillator, PeakTracker, Pots, Waveform, lerp, soft_limit};

/// Number of oscillators in the bank.
const N_OSC: usize = 5;

/// Harmonic series: sub-octave, fundamental, octave, twelfth, double octave.
const FREQ_RATIOS: [f32; N_OSC] = [0.5, 1.0, 2.0, 3.0, 4.0];

/// Fixed mix weights for the three brightness oscillators.
const BRIGHT_WEIGHTS: [f32; 3] = [0.5, 0.3, 0.2];

/// Oscillator targets never leave this band, whatever the tracker says.
const OSC_FREQ_MIN: f32 = 20.0;
const OSC_FREQ_MAX: f32 = 16000.0;

/// Accepted fundamental range for a zero-crossing estimate.
const TRACK_FREQ_MIN: f32 = 40.0;
const TRACK_FREQ_MAX: f32 = 2000.0;

/// Scale factor keeping the per-sample Kuramoto correction gentle; at
/// 48 kHz even small nudges accumulate fast.
const COUPLING_SCALE: f32 = 0.001;

/// Kuramoto-coupled harmonic synthesizer tracking the input's fundamental.
///
/// # Pots
///
/// | Pot | Parameter | Range |
/// |-----|-----------|-------|
/// | 0 | Coupling strength | free-running ↔ phase lock |
/// | 1 | Sub-octave level | 0–1 |
/// | 2 | Brightness (upper harmonics) | 0–1 |
/// | 3 | Blend | dry ↔ wet |
#[derive(Debug, Clone)]
pub struct HarmonicBraid {
    /// Kuramoto coupling strength
    coupling: f32,
    /// Sub-octave oscillator level
    sub_level: f32,
    /// Level of the three upper oscillators
    brightness: f32,
    /// Dry/wet blend
    blend: f32,

    /// Input amplitude envelope; the oscillators sing only as loud as the
    /// input is playing
    amplitude: PeakTracker,

    /// Lowpass ahead of zero-crossing detection, so the tracker sees
    /// fundamentals rather than harmonics
    track_lpf: Biquad,
    /// Samples since the last accepted positive-going crossing
    samples_since_cross: u32,
    /// Whether the tracked signal is currently above threshold
    is_high: bool,
    /// Heavily smoothed fundamental estimate in Hz
    smoothed_freq: f32,

    /// The oscillator bank
    osc: [Oscillator; N_OSC],
    /// Phases in [0,1) read by the coupling math. Resynchronized from the
    /// oscillator counters after each step; the counters are canonical.
    phase: [f32; N_OSC],

    /// Warming lowpass on the sub-octave
    sub_lpf: Biquad,
    /// Brightening highpass on the upper harmonics
    bright_hpf: Biquad,

    sample_rate: f32,
}

impl HarmonicBraid {
    /// Initial fundamental before the tracker has seen anything: A2,
    /// reasonable for guitar.
    const INITIAL_FREQ: f32 = 110.0;

    /// Create a braid with centered controls.
    pub fn new(sample_rate: f32) -> Self {
        let mut braid = Self {
            coupling: 0.5,
            sub_level: 0.5,
            brightness: 0.5,
            blend: 0.5,
            amplitude: PeakTracker::new(sample_rate),
            track_lpf: Biquad::new(),
            samples_since_cross: 0,
            is_high: false,
            smoothed_freq: Self::INITIAL_FREQ,
            osc: core::array::from_fn(|_| Oscillator::new(sample_rate)),
            phase: [0.0; N_OSC],
            sub_lpf: Biquad::new(),
            bright_hpf: Biquad::new(),
            sample_rate,
        };
        braid.stagger_phases();
        braid.init(&Pots::centered());
        braid
    }

    /// Spread the oscillators evenly around the cycle so coupling has
    /// somewhere to pull from.
    fn stagger_phases(&mut self) {
        for (i, osc) in self.osc.iter_mut().enumerate() {
            osc.reset();
            osc.nudge(i as f32 / N_OSC as f32);
        }
        for (phase, osc) in self.phase.iter_mut().zip(&self.osc) {
            *phase = osc.phase_fraction();
        }
    }

    fn configure_filters(&mut self) {
        let ceiling = self.sample_rate * 0.45;
        self.track_lpf
            .set_lowpass(1000.0_f32.min(ceiling), 0.707, self.sample_rate);
        self.sub_lpf
            .set_lowpass(300.0_f32.min(ceiling), 0.707, self.sample_rate);
        self.bright_hpf
            .set_highpass(800.0_f32.min(ceiling), 0.707, self.sample_rate);
    }

    /// Update the fundamental estimate from one input sample.
    fn track_frequency(&mut self, input: f32, amplitude: f32) {
        let clean = self.track_lpf.process(input);

        self.samples_since_cross = self.samples_since_cross.saturating_add(1);

        let threshold = (amplitude * 0.1).max(1e-4);

        if !self.is_high && clean > threshold {
            self.is_high = true;

            let freq = self.sample_rate / self.samples_since_cross as f32;

            // Accept only plausible fundamentals; heavy smoothing rejects
            // most octave errors probabilistically
            if freq > TRACK_FREQ_MIN && freq < TRACK_FREQ_MAX {
                self.smoothed_freq = lerp(self.smoothed_freq, freq, 0.1);
            }

            self.samples_since_cross = 0;
        } else if self.is_high && clean < -threshold {
            self.is_high = false;
        }
    }

    /// Current fundamental estimate in Hz.
    pub fn tracked_frequency(&self) -> f32 {
        self.smoothed_freq
    }
}

impl Effect for HarmonicBraid {
    fn describe(&self, pots: &Pots) -> String {
        format!(
            "coupling={:.2} sub={:.2} brightness={:.2} blend={:.2}",
            pots.get(0),
            pots.get(1),
            pots.get(2),
            pots.get(3)
        )
    }

    fn init(&mut self, pots: &Pots) {
        self.coupling = pots.get(0);
        self.sub_level = pots.get(1);
        self.brightness = pots.get(2);
        self.blend = pots.get(3);
        self.configure_filters();
    }

    fn step(&mut self, input: f32) -> f32 {
        let amplitude = self.amplitude.process(input);
        self.track_frequency(input, amplitude);

        let coupling = self.coupling;
        let freq = self.smoothed_freq;

        // The Kuramoto step: each oscillator is nudged toward its ring
        // neighbors,
        //
        //   dθ_i/dt = ω_i + K · Σ sin(θ_j − θ_i)
        //
        // The sin(Δθ) term is zero when phases match, maximal at 90°, and
        // reverses past 180° — a natural basin of attraction without hard
        // constraints. The nudge lands on the oscillator's own counter, so
        // coupling is audible: 0 leaves them free-running, 1 locks the
        // harmonic series.
        for i in 0..N_OSC {
            let target = (freq * FREQ_RATIOS[i]).clamp(OSC_FREQ_MIN, OSC_FREQ_MAX);
            self.osc[i].set_frequency(target);

            let mut correction = 0.0;
            if i > 0 {
                correction += sinf((self.phase[i - 1] - self.phase[i]) * TAU);
            }
            if i < N_OSC - 1 {
                correction += sinf((self.phase[i + 1] - self.phase[i]) * TAU);
            }

            self.osc[i].nudge(coupling * correction * COUPLING_SCALE);
        }

        let mut osc_out = [0.0f32; N_OSC];
        for i in 0..N_OSC {
            osc_out[i] = self.osc[i].step(Waveform::Sine);
            self.phase[i] = self.osc[i].phase_fraction();
        }

        // Sub gets rounded off, the fundamental passes near-raw, the upper
        // three go through the brightening highpass; everything rides the
        // input envelope
        let sub = self
            .sub_lpf
            .process(osc_out[0] * amplitude * self.sub_level);

        let fund = osc_out[1] * amplitude * 0.3;

        let mut bright = 0.0;
        for (out, weight) in osc_out[2..].iter().zip(&BRIGHT_WEIGHTS) {
            bright += out * weight;
        }
        bright = self
            .bright_hpf
            .process(bright * amplitude * self.brightness);

        let wet = soft_limit(sub + fund + bright);

        lerp(input, wet, self.blend)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.amplitude.set_sample_rate(sample_rate);
        for osc in &mut self.osc {
            osc.set_sample_rate(sample_rate);
        }
        self.configure_filters();
    }

    fn reset(&mut self) {
        self.amplitude.reset();
        self.track_lpf.clear();
        self.sub_lpf.clear();
        self.bright_hpf.clear();
        self.samples_since_cross = 0;
        self.is_high = false;
        self.smoothed_freq = Self::INITIAL_FREQ;
        self.stagger_phases();
    }
}
