//! Ruido Effects - audio effect implementations
//!
//! Effects built on the `ruido-core` primitives. Each effect is an owned
//! state object implementing [`ruido_core::Effect`]: `describe` / `init` /
//! `step`, with parameters derived from the four-pot control vector.
//!
//! The two centerpiece effects:
//!
//! - [`FormantShifter`] - pitch expansion that preserves the spectral
//!   envelope, via an allpass-approximated Hilbert transform
//! - [`HarmonicBraid`] - five Kuramoto-coupled oscillators locked to the
//!   input's tracked fundamental
//!
//! The companions:
//!
//! - [`PitchShifter`] - delay-crossfade pitch shifter
//! - [`Tremolo`] - amplitude modulation
//! - [`Chorus`] - three modulated delay voices
//! - [`Distortion`] - drive, waveshaper modes, tone filter
//! - [`AmGenerator`] / [`FmGenerator`] - modulated tone generators
//! - [`EnvelopeProbe`] - outputs the tracked input amplitude
//!
//! ## Example
//!
//! ```rust,ignore
//! use ruido_core::{Effect, Pots};
//! use ruido_effects::FormantShifter;
//!
//! let mut shifter = FormantShifter::new(48000.0);
//! shifter.init(&Pots::new([1.0, 0.3, 1.0, 1.0]));
//! let output = shifter.step(input);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod braid;
pub mod chorus;
pub mod distortion;
pub mod formant;
pub mod generators;
pub mod pitch_shift;
pub mod probe;
pub mod tremolo;

// Re-export main types at crate root
pub use braid::HarmonicBraid;
pub use chorus::Chorus;
pub use distortion::Distortion;
pub use formant::FormantShifter;
pub use generators::{AmGenerator, FmGenerator};
pub use pitch_shift::PitchShifter;
pub use probe::EnvelopeProbe;
pub use tremolo::Tremolo;
