//! File I/O for the ruido engine.
//!
//! Two formats cross the host boundary:
//!
//! - **WAV** ([`read_wav`] / [`write_wav`]): the interchange format for
//!   offline processing, via `hound`. Multi-channel input collapses to
//!   mono by averaging.
//! - **Raw PCM** ([`read_raw`] / [`write_raw`]): headerless signed 32-bit
//!   little-endian samples, the engine's native wire format. The scaling
//!   boundary (1/2³¹) lives in `ruido-core::convert`; nothing inside the
//!   audio path ever sees an integer sample.
//!
//! All functions return [`Result`]; malformed input is an error value,
//! never a panic.

mod raw;
mod wav;

pub use raw::{read_raw, write_raw};
pub use wav::{WavInfo, WavSpec, read_wav, read_wav_info, write_wav};

/// Error type for audio file operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV encode/decode error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// A raw PCM stream whose byte length is not a whole number of
    /// 4-byte samples.
    #[error("raw PCM length {0} is not a multiple of 4 bytes")]
    RaggedRawStream(usize),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio file operations.
pub type Result<T> = std::result::Result<T, Error>;
