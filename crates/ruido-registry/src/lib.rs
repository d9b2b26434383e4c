//! Effect registry: discovery and construction by name.
//!
//! The host selects effects by id — from the command line, a preset file,
//! or a control surface. The registry maps each id to a descriptor (name,
//! summary, pot labels, generator flag) and a factory producing a boxed
//! [`Effect`]. An unknown id is a `None` the host reports and survives,
//! never a panic.
//!
//! # Example
//!
//! ```rust
//! use ruido_registry::EffectRegistry;
//!
//! let registry = EffectRegistry::new();
//! let mut effect = registry.create("tremolo", 48000.0).expect("known id");
//! let out = effect.step(0.5);
//! assert!(out.is_finite());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};

use ruido_core::Effect;
use ruido_effects::{
    AmGenerator, Chorus, Distortion, EnvelopeProbe, FmGenerator, FormantShifter, HarmonicBraid,
    PitchShifter, Tremolo,
};

/// Static metadata for one registered effect.
#[derive(Debug, Clone)]
pub struct EffectDescriptor {
    /// Unique lookup id (lowercase, no spaces)
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// One-line summary
    pub description: &'static str,
    /// What each of the four pots controls ("unused" where an effect
    /// ignores one)
    pub pot_labels: [&'static str; 4],
    /// Whether the effect synthesizes its own signal rather than
    /// transforming the input
    pub is_generator: bool,
}

/// Factory producing a fresh effect instance at a sample rate.
type EffectFactory = fn(f32) -> Box<dyn Effect + Send>;

struct RegistryEntry {
    descriptor: EffectDescriptor,
    factory: EffectFactory,
}

/// Registry of all built-in effects.
pub struct EffectRegistry {
    entries: Vec<RegistryEntry>,
}

impl Default for EffectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectRegistry {
    /// Create a registry with every built-in effect registered.
    pub fn new() -> Self {
        let mut registry = Self {
            entries: Vec::with_capacity(9),
        };
        registry.register_builtin_effects();
        registry
    }

    fn register_builtin_effects(&mut self) {
        self.register(
            EffectDescriptor {
                id: "formant",
                name: "Formant Shifter",
                description: "Pitch expansion preserving the spectral envelope",
                pot_labels: ["pitch ratio", "envelope smoothing", "blend", "formant strength"],
                is_generator: false,
            },
            |sr| Box::new(FormantShifter::new(sr)),
        );

        self.register(
            EffectDescriptor {
                id: "braid",
                name: "Harmonic Braid",
                description: "Five Kuramoto-coupled oscillators locked to the input pitch",
                pot_labels: ["coupling", "sub level", "brightness", "blend"],
                is_generator: false,
            },
            |sr| Box::new(HarmonicBraid::new(sr)),
        );

        self.register(
            EffectDescriptor {
                id: "pitch_shift",
                name: "Pitch Shifter",
                description: "Delay-crossfade pitch shifter, up to one octave",
                pot_labels: ["pitch step", "unused", "unused", "unused"],
                is_generator: false,
            },
            |sr| Box::new(PitchShifter::new(sr)),
        );

        self.register(
            EffectDescriptor {
                id: "tremolo",
                name: "Tremolo",
                description: "LFO amplitude modulation",
                pot_labels: ["rate", "depth", "unused", "unused"],
                is_generator: false,
            },
            |sr| Box::new(Tremolo::new(sr)),
        );

        self.register(
            EffectDescriptor {
                id: "chorus",
                name: "Chorus",
                description: "Three detuned voices from modulated delay taps",
                pot_labels: ["rate", "base delay", "depth", "mix"],
                is_generator: false,
            },
            |sr| Box::new(Chorus::new(sr)),
        );

        self.register(
            EffectDescriptor {
                id: "distortion",
                name: "Distortion",
                description: "Drive into a waveshaper with a tone lowpass",
                pot_labels: ["drive", "tone", "level", "mode"],
                is_generator: false,
            },
            |sr| Box::new(Distortion::new(sr)),
        );

        self.register(
            EffectDescriptor {
                id: "am",
                name: "AM Generator",
                description: "Amplitude-modulated tone source (ignores input)",
                pot_labels: ["carrier", "mod rate", "mod depth", "level"],
                is_generator: true,
            },
            |sr| Box::new(AmGenerator::new(sr)),
        );

        self.register(
            EffectDescriptor {
                id: "fm",
                name: "FM Generator",
                description: "Frequency-swept tone source (ignores input)",
                pot_labels: ["center", "mod rate", "octave span", "level"],
                is_generator: true,
            },
            |sr| Box::new(FmGenerator::new(sr)),
        );

        self.register(
            EffectDescriptor {
                id: "probe",
                name: "Envelope Probe",
                description: "Outputs the tracked input amplitude",
                pot_labels: ["decay rate", "unused", "unused", "unused"],
                is_generator: false,
            },
            |sr| Box::new(EnvelopeProbe::new(sr)),
        );
    }

    fn register(&mut self, descriptor: EffectDescriptor, factory: EffectFactory) {
        debug_assert!(
            self.get(descriptor.id).is_none(),
            "duplicate effect id {}",
            descriptor.id
        );
        self.entries.push(RegistryEntry { descriptor, factory });
    }

    /// Descriptors for every registered effect, in registration order.
    pub fn all_effects(&self) -> impl Iterator<Item = &EffectDescriptor> {
        self.entries.iter().map(|e| &e.descriptor)
    }

    /// Look up a descriptor by id.
    pub fn get(&self, id: &str) -> Option<&EffectDescriptor> {
        self.entries
            .iter()
            .find(|e| e.descriptor.id == id)
            .map(|e| &e.descriptor)
    }

    /// Create a fresh effect instance by id.
    ///
    /// Returns `None` for an unknown id — the caller reports it; the
    /// stream keeps running.
    pub fn create(&self, id: &str, sample_rate: f32) -> Option<Box<dyn Effect + Send>> {
        self.entries
            .iter()
            .find(|e| e.descriptor.id == id)
            .map(|e| (e.factory)(sample_rate))
    }

    /// Number of registered effects.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
