// Copyright (c) 2024 Mike Tsao

use crate::prelude::*;
use core::f64::consts::TAU;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, IntoStaticStr};

/// The waveform shapes the [Oscillator] can produce.
#[allow(missing_docs)]
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    EnumIter,
    Eq,
    IntoStaticStr,
    PartialEq,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Sawtooth,
    Triangle,
}
impl Waveform {
    /// The amplitude of this shape at instantaneous phase `frequency * t`.
    /// Phase 0 is the start of a cycle, and every shape repeats with period
    /// 1.
    pub fn at(&self, phase: f64) -> f64 {
        match self {
            Waveform::Sine => (TAU * phase).sin(),
            Waveform::Square => {
                // Zero crossings stay zero, so a square wave's very first
                // sample is silent rather than a positive click.
                let s = (TAU * phase).sin();
                if s == 0.0 {
                    0.0
                } else {
                    s.signum()
                }
            }
            Waveform::Sawtooth => 2.0 * phase.rem_euclid(1.0) - 1.0,
            Waveform::Triangle => 2.0 * (2.0 * (phase - (phase + 0.5).floor())).abs() - 1.0,
        }
    }
}
impl From<&str> for Waveform {
    /// Unknown names resolve to sine, the engine's universal default.
    fn from(value: &str) -> Self {
        match value {
            "square" => Waveform::Square,
            "sawtooth" => Waveform::Sawtooth,
            "triangle" => Waveform::Triangle,
            _ => Waveform::Sine,
        }
    }
}

/// Renders one or more simultaneous tones of a given [Waveform] into a
/// [WaveBuffer].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Oscillator {
    waveform: Waveform,
}
impl Oscillator {
    /// Creates an [Oscillator] with the given shape.
    pub const fn new_with(waveform: Waveform) -> Self {
        Self { waveform }
    }

    /// This oscillator's shape.
    pub const fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// The amplitude of a single tone at wall-clock time `t`.
    pub fn sample_at(&self, frequency: FrequencyHz, t: Seconds) -> Sample {
        Sample(self.waveform.at(frequency.0 * t.0))
    }

    /// Renders the sum of one tone per frequency over the given duration.
    /// The buffer holds exactly `floor(duration * sample_rate)` samples
    /// spaced `1/sample_rate` apart starting at t=0; the last instant is
    /// excluded. Multiple frequencies are summed as-is, without dividing by
    /// the count; loudness management belongs to the caller.
    pub fn synthesize(
        &self,
        frequencies: &[FrequencyHz],
        duration: Seconds,
        sample_rate: SampleRate,
    ) -> WaveBuffer {
        let len = if duration.0 > 0.0 {
            (duration.0 * sample_rate.0 as f64) as usize
        } else {
            0
        };
        let mut samples = Vec::with_capacity(len);
        for i in 0..len {
            let t = Seconds(i as f64 / sample_rate.0 as f64);
            let sum = frequencies
                .iter()
                .fold(Sample::SILENCE, |acc, frequency| {
                    acc + self.sample_at(*frequency, t)
                });
            samples.push(sum);
        }
        WaveBuffer::new_with(samples, sample_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn waveform_from_str_falls_back_to_sine() {
        assert_eq!(Waveform::from("sine"), Waveform::Sine);
        assert_eq!(Waveform::from("triangle"), Waveform::Triangle);
        assert_eq!(Waveform::from("wobbulator"), Waveform::Sine);
        assert_eq!(Waveform::from(""), Waveform::Sine);
    }

    #[test]
    fn sine_shape() {
        assert_eq!(Waveform::Sine.at(0.0), 0.0);
        assert!(approx_eq!(f64, Waveform::Sine.at(0.25), 1.0, epsilon = 1e-12));
        assert!(approx_eq!(f64, Waveform::Sine.at(0.5), 0.0, epsilon = 1e-12));
        assert!(approx_eq!(f64, Waveform::Sine.at(0.75), -1.0, epsilon = 1e-12));
    }

    #[test]
    fn square_shape() {
        assert_eq!(Waveform::Square.at(0.0), 0.0, "zero crossing is zero");
        assert_eq!(Waveform::Square.at(0.25), 1.0);
        assert_eq!(Waveform::Square.at(0.75), -1.0);
    }

    #[test]
    fn sawtooth_shape() {
        assert_eq!(Waveform::Sawtooth.at(0.0), -1.0);
        assert_eq!(Waveform::Sawtooth.at(0.25), -0.5);
        assert_eq!(Waveform::Sawtooth.at(0.5), 0.0);
        assert_eq!(Waveform::Sawtooth.at(1.0), -1.0, "period is exactly 1");
    }

    #[test]
    fn triangle_shape() {
        assert_eq!(Waveform::Triangle.at(0.0), -1.0);
        assert_eq!(Waveform::Triangle.at(0.25), 0.0);
        assert_eq!(Waveform::Triangle.at(0.5), 1.0);
        assert_eq!(Waveform::Triangle.at(0.75), 0.0);
    }

    #[test]
    fn synthesize_length_truncates() {
        let oscillator = Oscillator::default();
        let buffer = oscillator.synthesize(
            &[FrequencyHz(440.0)],
            Seconds(0.25),
            SampleRate::new(10),
        );
        assert_eq!(buffer.len(), 2, "0.25s at 10 Hz is 2.5 samples, truncated");

        let buffer = oscillator.synthesize(&[FrequencyHz(440.0)], Seconds(1.0), SampleRate::DEFAULT);
        assert_eq!(buffer.len(), 44100);
    }

    #[test]
    fn synthesize_nonpositive_duration_is_empty() {
        let oscillator = Oscillator::default();
        assert!(oscillator
            .synthesize(&[FrequencyHz(440.0)], Seconds(0.0), SampleRate::DEFAULT)
            .is_empty());
        assert!(oscillator
            .synthesize(&[FrequencyHz(440.0)], Seconds(-1.0), SampleRate::DEFAULT)
            .is_empty());
    }

    #[test]
    fn chord_synthesis_sums_without_normalizing() {
        let oscillator = Oscillator::default();
        let single =
            oscillator.synthesize(&[FrequencyHz(100.0)], Seconds(0.1), SampleRate::DEFAULT);
        let doubled = oscillator.synthesize(
            &[FrequencyHz(100.0), FrequencyHz(100.0)],
            Seconds(0.1),
            SampleRate::DEFAULT,
        );
        assert_eq!(doubled.len(), single.len());
        for (d, s) in doubled.samples().iter().zip(single.samples().iter()) {
            assert!(
                approx_eq!(f64, d.0, s.0 * 2.0, epsilon = 1e-12),
                "two identical tones should sum to exactly twice one"
            );
        }
    }
}
