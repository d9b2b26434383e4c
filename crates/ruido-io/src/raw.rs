//! Raw signed 32-bit PCM streams — the engine's native wire format.
//!
//! Headerless files of little-endian s32 samples. No sample rate is
//! recorded; the caller supplies one out of band (the engine default is
//! 48 kHz).

use crate::{Error, Result};
use ruido_core::{f32_to_i32, i32_to_f32};
use std::io::{Read, Write};

/// Bytes per wire sample.
const BYTES_PER_SAMPLE: usize = 4;

/// Read an entire raw s32 PCM stream into normalized samples.
///
/// Returns [`Error::RaggedRawStream`] if the stream length is not a
/// multiple of four bytes.
pub fn read_raw<R: Read>(mut reader: R) -> Result<Vec<f32>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    if bytes.len() % BYTES_PER_SAMPLE != 0 {
        return Err(Error::RaggedRawStream(bytes.len()));
    }

    Ok(bytes
        .chunks_exact(BYTES_PER_SAMPLE)
        .map(|chunk| {
            let wire = i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            i32_to_f32(wire)
        })
        .collect())
}

/// Write normalized samples as a raw s32 PCM stream.
///
/// Samples at or beyond full scale saturate at the integer range ends.
pub fn write_raw<W: Write>(mut writer: W, samples: &[f32]) -> Result<()> {
    for &sample in samples {
        writer.write_all(&f32_to_i32(sample).to_le_bytes())?;
    }
    writer.flush()?;
    Ok(())
}
