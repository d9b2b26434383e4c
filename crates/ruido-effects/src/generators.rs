//! Tone generators: effects that synthesize their own signal.
//!
//! Unlike every other effect in the registry these ignore their input.
//! They exist as test sources for the rest of the chain — feed the output
//! of `am` into a filter or a shifter and you have a known, steady signal
//! to characterize against.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::format;
use alloc::string::String;
use ruido_core::{Effect, Oscillator, Pots, Waveform, fast_pow};

/// Amplitude-modulated tone generator.
///
/// # Pots
///
/// | Pot | Parameter | Range |
/// |-----|-----------|-------|
/// | 0 | Carrier frequency | 55–1760 Hz (audio taper) |
/// | 1 | Modulation rate | 0.5–10.5 Hz |
/// | 2 | Modulation depth | 0–100% |
/// | 3 | Output level | 0–100% |
#[derive(Debug, Clone)]
pub struct AmGenerator {
    carrier: Oscillator,
    lfo: Oscillator,
    depth: f32,
    level: f32,
}

impl AmGenerator {
    /// Create a generator with centered controls.
    pub fn new(sample_rate: f32) -> Self {
        let mut generator = Self {
            carrier: Oscillator::new(sample_rate),
            lfo: Oscillator::new(sample_rate),
            depth: 0.5,
            level: 0.5,
        };
        generator.init(&Pots::centered());
        generator
    }

    fn carrier_hz(pots: &Pots) -> f32 {
        // Five octaves from A1, one per fifth of the knob
        55.0 * fast_pow(2.0, pots.get(0) * 5.0)
    }

    fn lfo_hz(pots: &Pots) -> f32 {
        let p = pots.get(1);
        0.5 + p * p * 10.0
    }
}

impl Effect for AmGenerator {
    fn describe(&self, pots: &Pots) -> String {
        format!(
            "carrier={:.0} Hz lfo={:.2} Hz depth={:.2} level={:.2}",
            Self::carrier_hz(pots),
            Self::lfo_hz(pots),
            pots.get(2),
            pots.get(3)
        )
    }

    fn init(&mut self, pots: &Pots) {
        self.carrier.set_frequency(Self::carrier_hz(pots));
        self.lfo.set_frequency(Self::lfo_hz(pots));
        self.depth = pots.get(2);
        self.level = pots.get(3);
    }

    fn step(&mut self, _input: f32) -> f32 {
        let tone = self.carrier.step(Waveform::Sine);
        let modulation = self.lfo.step(Waveform::Sine);
        let gain = 1.0 - self.depth * (1.0 - modulation) / 2.0;
        tone * gain * self.level
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.carrier.set_sample_rate(sample_rate);
        self.lfo.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.carrier.reset();
        self.lfo.reset();
    }
}

/// Frequency-modulated tone generator.
///
/// The carrier sweeps around its center by up to two octaves, scaled
/// through the same fast power approximation the audio path uses — the
/// sweep is for listening, not for measurement.
///
/// # Pots
///
/// | Pot | Parameter | Range |
/// |-----|-----------|-------|
/// | 0 | Center frequency | 55–1760 Hz (audio taper) |
/// | 1 | Modulation rate | 0.5–10.5 Hz |
/// | 2 | Sweep span | 0–2 octaves |
/// | 3 | Output level | 0–100% |
#[derive(Debug, Clone)]
pub struct FmGenerator {
    carrier: Oscillator,
    lfo: Oscillator,
    center: f32,
    octaves: f32,
    level: f32,
}

impl FmGenerator {
    /// Create a generator with centered controls.
    pub fn new(sample_rate: f32) -> Self {
        let mut generator = Self {
            carrier: Oscillator::new(sample_rate),
            lfo: Oscillator::new(sample_rate),
            center: 440.0,
            octaves: 1.0,
            level: 0.5,
        };
        generator.init(&Pots::centered());
        generator
    }

    fn center_hz(pots: &Pots) -> f32 {
        55.0 * fast_pow(2.0, pots.get(0) * 5.0)
    }

    fn lfo_hz(pots: &Pots) -> f32 {
        let p = pots.get(1);
        0.5 + p * p * 10.0
    }
}

impl Effect for FmGenerator {
    fn describe(&self, pots: &Pots) -> String {
        format!(
            "center={:.0} Hz lfo={:.2} Hz octaves={:.2} level={:.2}",
            Self::center_hz(pots),
            Self::lfo_hz(pots),
            pots.linear(2, 0.0, 2.0),
            pots.get(3)
        )
    }

    fn init(&mut self, pots: &Pots) {
        self.center = Self::center_hz(pots);
        self.lfo.set_frequency(Self::lfo_hz(pots));
        self.octaves = pots.linear(2, 0.0, 2.0);
        self.level = pots.get(3);
    }

    fn step(&mut self, _input: f32) -> f32 {
        let sweep = self.lfo.step(Waveform::Sine);
        let freq = fast_pow(2.0, sweep * self.octaves) * self.center;
        self.carrier.set_frequency(freq);
        self.carrier.step(Waveform::Sine) * self.level
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        self.carrier.set_sample_rate(sample_rate);
        self.lfo.set_sample_rate(sample_rate);
    }

    fn reset(&mut self) {
        self.carrier.reset();
        self.lfo.reset();
    }
}
