// Copyright (c) 2024 Mike Tsao

use crate::prelude::*;
use std::path::Path;

/// Writes rendered audio to disk.
pub struct SongExporter {}
impl SongExporter {
    /// Writes the buffer to the given filename as a 16-bit mono WAV file at
    /// the buffer's own sample rate.
    pub fn export_to_wav(path: impl AsRef<Path>, buffer: &WaveBuffer) -> anyhow::Result<()> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: buffer.sample_rate().into(),
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec)?;
        for sample in buffer.samples() {
            writer.write_sample(i16::from(*sample))?;
        }
        writer.finalize()?;
        Ok(())
    }
}
