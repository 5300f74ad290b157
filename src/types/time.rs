// Copyright (c) 2024 Mike Tsao

//! Handles digital-audio, wall-clock, and musical time.

use core::fmt;
use core::ops::Mul;
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use synonym::Synonym;

/// Beats per minute.
#[derive(Synonym, Serialize, Deserialize, Derivative)]
#[derivative(Default)]
#[synonym(skip(Default, Display))]
#[serde(rename_all = "kebab-case")]
pub struct Tempo(#[derivative(Default(value = "120.0"))] pub f64);
impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{:0.2} BPM", self.0))
    }
}
impl From<u16> for Tempo {
    fn from(value: u16) -> Self {
        Self(value as f64)
    }
}
impl Tempo {
    /// Beats per second.
    pub fn bps(&self) -> f64 {
        self.0 / 60.0
    }

    /// The wall-clock duration of a single beat.
    pub fn beat_duration(&self) -> Seconds {
        Seconds(60.0 / self.0)
    }
}

/// A duration expressed in musical beats. Any positive real number; the
/// wall-clock meaning depends on a [Tempo].
#[derive(Synonym, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Beats(pub f64);
impl Beats {
    /// Converts beats to wall-clock time at the given tempo.
    pub fn as_seconds(&self, tempo: Tempo) -> Seconds {
        Seconds(self.0 * tempo.beat_duration().0)
    }
}
impl From<f32> for Beats {
    fn from(value: f32) -> Self {
        Self(value as f64)
    }
}

/// Represents the [seconds](https://en.wikipedia.org/wiki/Second) unit of time.
#[derive(Synonym, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Seconds(pub f64);
impl Seconds {
    /// Zero seconds.
    pub const fn zero() -> Seconds {
        Seconds(0.0)
    }
}
impl From<f32> for Seconds {
    fn from(value: f32) -> Self {
        Self(value as f64)
    }
}
impl From<Seconds> for f32 {
    fn from(value: Seconds) -> Self {
        value.0 as f32
    }
}

/// Samples per second. Always a positive integer; cannot be zero.
#[derive(Synonym, Serialize, Deserialize, Derivative)]
#[derivative(Default)]
#[synonym(skip(Default))]
#[serde(rename_all = "kebab-case")]
pub struct SampleRate(#[derivative(Default(value = "44100"))] pub usize);
#[allow(missing_docs)]
impl SampleRate {
    pub const DEFAULT_SAMPLE_RATE: usize = 44100;
    pub const DEFAULT: SampleRate = SampleRate::new(Self::DEFAULT_SAMPLE_RATE);

    pub const fn new(value: usize) -> Self {
        if value != 0 {
            Self(value)
        } else {
            Self(Self::DEFAULT_SAMPLE_RATE)
        }
    }

    /// The number of whole samples in the given duration, rounded to the
    /// nearest sample. Rounding rather than truncating keeps long runs of
    /// short segments from accumulating timing drift.
    pub fn samples_for(&self, duration: Seconds) -> usize {
        let samples = duration.0 * self.0 as f64;
        if samples <= 0.0 {
            0
        } else {
            samples.round() as usize
        }
    }
}
impl From<f64> for SampleRate {
    fn from(value: f64) -> Self {
        Self::new(value as usize)
    }
}
impl From<SampleRate> for f64 {
    fn from(value: SampleRate) -> Self {
        value.0 as f64
    }
}
impl From<SampleRate> for u32 {
    fn from(value: SampleRate) -> Self {
        value.0 as u32
    }
}
impl Mul<Seconds> for SampleRate {
    type Output = SampleRate;

    // Context is (sample rate x seconds) = buffer size.
    fn mul(self, rhs: Seconds) -> Self::Output {
        Self((self.0 as f64 * rhs.0) as usize)
    }
}
