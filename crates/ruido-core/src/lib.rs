//! Ruido Core - DSP primitives for a single-sample-latency effects engine
//!
//! This crate provides the foundational building blocks for the ruido audio
//! path: every stage consumes one sample and emits one sample, with zero
//! allocation after initialization.
//!
//! # Core Abstractions
//!
//! ## Effect System
//!
//! - [`Effect`] - Object-safe trait for all audio effects: `describe`, `init`,
//!   `step`
//! - [`Pots`] - The four-knob control vector every effect derives its
//!   parameters from
//! - [`SharedPots`] - Lock-free cross-thread form of the control vector
//!
//! ## Primitives
//!
//! - [`fast_math`] - Table-driven sin/cos, fast power approximations, the
//!   soft limiter
//! - [`Oscillator`] - Phase-accumulator LFO (sine, triangle, sawtooth)
//! - [`Biquad`] - Second-order IIR filter with RBJ cookbook coefficients
//! - [`DelayLine`] - Circular sample history with clamped fractional readback
//! - [`SmoothedParam`] - Exponential parameter smoothing for click-free
//!   control changes
//! - [`PeakTracker`] - Instant-attack, exponential-decay amplitude envelope
//!
//! # Design Principles
//!
//! - **Real-time safe**: no allocations, no branches that can stall, no
//!   error paths in `step`
//! - **Numerically stable**: phase counters wrap in integer arithmetic,
//!   delay reads are clamped, signal sums are soft-limited — NaN/Inf cannot
//!   be produced from finite input
//! - **No dependencies on std**: pure `no_std` with `libm` for math
//!
//! # no_std Support
//!
//! Disable the default `std` feature for embedded targets:
//!
//! ```toml
//! [dependencies]
//! ruido-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod biquad;
pub mod convert;
pub mod delay;
pub mod effect;
pub mod envelope;
pub mod fast_math;
pub mod oscillator;
pub mod param;
pub mod pot;

// Re-export main types at crate root
pub use biquad::{Biquad, allpass_coefficients, highpass_coefficients, lowpass_coefficients};
pub use convert::{f32_to_i32, i32_to_f32};
pub use delay::DelayLine;
pub use effect::Effect;
pub use envelope::PeakTracker;
pub use fast_math::{
    fast_pow, fast_pow2_m1, fast_sin_cos, fraction_to_u32, lerp, soft_limit, u32_to_fraction,
};
pub use oscillator::{Oscillator, Waveform};
pub use param::SmoothedParam;
pub use pot::{POT_COUNT, Pots, SharedPots};
