// Copyright (c) 2024 Mike Tsao

//! Numeric types used throughout the system.

use crate::prelude::*;
use core::ops::{Add, AddAssign, Mul};
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use synonym::Synonym;

/// [Sample] represents a single-channel audio sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Sample(pub f64);
impl Sample {
    /// A [Sample] that is silent.
    pub const SILENCE: Sample = Sample(0.0);
    /// A [Sample] having the maximum positive value.
    pub const MAX: Sample = Sample(1.0);
    /// A [Sample] having the maximum negative value.
    pub const MIN: Sample = Sample(-1.0);
}
impl Add<Self> for Sample {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}
impl AddAssign<Self> for Sample {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}
impl Mul<f64> for Sample {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}
impl Mul<Normal> for Sample {
    type Output = Self;

    fn mul(self, rhs: Normal) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}
impl From<f64> for Sample {
    fn from(value: f64) -> Self {
        Self(value)
    }
}
impl From<Sample> for f32 {
    fn from(value: Sample) -> Self {
        value.0 as f32
    }
}
impl From<Sample> for i16 {
    /// Fixed-point conversion for 16-bit PCM output.
    fn from(value: Sample) -> Self {
        (value.0 * 32767.0).round() as i16
    }
}

/// Hertz. Any positive number. 440 = A4.
#[derive(Synonym, Serialize, Deserialize, Derivative)]
#[derivative(Default)]
#[synonym(skip(Default))]
#[serde(rename_all = "kebab-case")]
pub struct FrequencyHz(#[derivative(Default(value = "440.0"))] pub f64);
impl FrequencyHz {
    /// The standard concert pitch. Also the documented fallback for note
    /// names that fail to parse.
    pub const CONCERT_A4: FrequencyHz = FrequencyHz(440.0);
}

/// A [WaveBuffer] is a finite run of single-channel audio samples at a known
/// sample rate. Buffers are created fresh per render call and are only
/// mutated in place by the owner that created them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WaveBuffer {
    samples: Vec<Sample>,
    sample_rate: SampleRate,
}
impl WaveBuffer {
    /// Creates a zero-initialized buffer of the given length.
    pub fn new_silent(len: usize, sample_rate: SampleRate) -> Self {
        Self {
            samples: vec![Sample::SILENCE; len],
            sample_rate,
        }
    }

    /// Wraps an existing run of samples.
    pub fn new_with(samples: Vec<Sample>, sample_rate: SampleRate) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// The number of samples in this buffer.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether this buffer contains no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The sample rate this buffer was rendered at.
    pub fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    /// The buffer's length expressed in wall-clock time.
    pub fn duration(&self) -> Seconds {
        Seconds(self.samples.len() as f64 / self.sample_rate.0 as f64)
    }

    /// Read access to the samples.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Mutable access to the samples.
    pub fn samples_mut(&mut self) -> &mut [Sample] {
        &mut self.samples
    }

    /// The largest absolute sample value in the buffer, or zero if empty.
    pub fn peak(&self) -> f64 {
        self.samples
            .iter()
            .fold(0.0, |acc, sample| acc.max(sample.0.abs()))
    }

    /// Multiplies every sample by the given factor.
    pub fn scale(&mut self, factor: f64) {
        for sample in &mut self.samples {
            *sample = *sample * factor;
        }
    }

    /// Trims or zero-pads the buffer to exactly `len` samples. Placement
    /// index math is authoritative over nominal durations, so synthesized
    /// sub-buffers are conformed to the index-derived length before use.
    pub fn conform_len(&mut self, len: usize) {
        self.samples.resize(len, Sample::SILENCE);
    }

    /// Adds `other`'s samples, scaled by `gain`, into this buffer starting at
    /// `start`. Samples that would land past the end of this buffer are
    /// dropped.
    pub fn accumulate(&mut self, start: usize, other: &WaveBuffer, gain: f64) {
        if start >= self.samples.len() {
            return;
        }
        for (dst, src) in self.samples[start..].iter_mut().zip(other.samples.iter()) {
            *dst += *src * gain;
        }
    }

    /// Sample-wise addition of another buffer of the same length.
    pub fn mix(&mut self, other: &WaveBuffer) {
        debug_assert_eq!(self.samples.len(), other.samples.len());
        for (dst, src) in self.samples.iter_mut().zip(other.samples.iter()) {
            *dst += *src;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_arithmetic() {
        assert_eq!(Sample::SILENCE + Sample::MAX, Sample::MAX);
        assert_eq!(Sample(0.5) * 2.0, Sample(1.0));
        assert_eq!(Sample(0.5) * Normal::from(0.5), Sample(0.25));
    }

    #[test]
    fn sample_to_i16_rounds() {
        assert_eq!(i16::from(Sample::MAX), 32767);
        assert_eq!(i16::from(Sample::MIN), -32767);
        assert_eq!(i16::from(Sample::SILENCE), 0);
        assert_eq!(i16::from(Sample(0.5)), 16384, "0.5 * 32767 rounds up");
    }

    #[test]
    fn wave_buffer_peak_and_scale() {
        let mut buffer = WaveBuffer::new_with(
            vec![Sample(0.25), Sample(-0.5), Sample(0.1)],
            SampleRate::DEFAULT,
        );
        assert_eq!(buffer.peak(), 0.5);
        buffer.scale(0.5);
        assert_eq!(buffer.peak(), 0.25);
    }

    #[test]
    fn wave_buffer_conform_len() {
        let mut buffer = WaveBuffer::new_with(vec![Sample::MAX; 4], SampleRate::DEFAULT);
        buffer.conform_len(6);
        assert_eq!(buffer.len(), 6);
        assert_eq!(buffer.samples()[5], Sample::SILENCE, "padding is silent");
        buffer.conform_len(2);
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.samples()[1], Sample::MAX);
    }

    #[test]
    fn wave_buffer_accumulate_clips_to_destination() {
        let mut dst = WaveBuffer::new_silent(4, SampleRate::DEFAULT);
        let src = WaveBuffer::new_with(vec![Sample::MAX; 4], SampleRate::DEFAULT);
        dst.accumulate(2, &src, 0.5);
        assert_eq!(dst.samples()[1], Sample::SILENCE);
        assert_eq!(dst.samples()[2], Sample(0.5));
        assert_eq!(dst.samples()[3], Sample(0.5));

        // Past-the-end placement is a no-op, not a panic.
        dst.accumulate(100, &src, 1.0);
        assert_eq!(dst.len(), 4);
    }
}
