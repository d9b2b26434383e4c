//! The effect capability trait.
//!
//! Every audio effect is an owned, independently-instantiable state object
//! exposing the same three operations the host loop drives:
//!
//! - `describe` — diagnostic text for the current control values
//! - `init` — derive internal parameters from the four pots
//! - `step` — transform one sample
//!
//! The trait is object-safe so the engine can hold a collection of
//! `Box<dyn Effect>` and dispatch by the active selection; there is no
//! shared global effect state anywhere.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use crate::pot::Pots;
use alloc::string::String;

/// Core trait for all audio effects.
///
/// # Contract
///
/// - All three operations are callable repeatedly, in any order, and
///   [`init`](Self::init) may be called again mid-stream to apply new
///   control values.
/// - `init` derives parameters and filter coefficients only. It never
///   clears running DSP state (phase accumulators, envelopes, delay
///   history) and never allocates — re-deriving parameters at block
///   cadence must be click-free. Clearing state is what
///   [`reset`](Self::reset) is for.
/// - `step` is the hot path: no allocation, no I/O, no error returns.
///   For finite input it produces finite output.
///
/// # Example
///
/// ```rust
/// use ruido_core::{Effect, Pots};
///
/// struct Gain {
///     gain: f32,
/// }
///
/// impl Effect for Gain {
///     fn describe(&self, pots: &Pots) -> String {
///         format!("gain={:.2}", pots.linear(0, 0.0, 2.0))
///     }
///
///     fn init(&mut self, pots: &Pots) {
///         self.gain = pots.linear(0, 0.0, 2.0);
///     }
///
///     fn step(&mut self, input: f32) -> f32 {
///         input * self.gain
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///
///     fn reset(&mut self) {}
/// }
/// ```
pub trait Effect {
    /// Human-readable description of the parameters the given pot values
    /// map to. Pure diagnostics: no state change, no audio computation.
    fn describe(&self, pots: &Pots) -> String;

    /// Derive internal parameters (including filter coefficients) from the
    /// four controls. Deterministic: the same pots always produce the same
    /// parameters. See the trait docs for what `init` must not touch.
    fn init(&mut self, pots: &Pots);

    /// Transform one sample. Input and output are normalized floats in
    /// approximately \[−1, 1\].
    fn step(&mut self, input: f32) -> f32;

    /// Process a buffer in place by repeated [`step`](Self::step).
    fn step_block(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.step(*sample);
        }
    }

    /// Update the sample rate. Implementations recompute rate-dependent
    /// derived values (increments, coefficients, decay factors).
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Clear running DSP state without changing parameters.
    fn reset(&mut self);
}
