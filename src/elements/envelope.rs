// Copyright (c) 2024 Mike Tsao

use crate::prelude::*;
use derivative::Derivative;
use serde::{Deserialize, Serialize};

/// A linear attack/release amplitude envelope. The short default fades
/// remove the clicks that raw oscillator edges would otherwise produce at
/// note boundaries.
#[derive(Clone, Copy, Debug, Derivative, PartialEq, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(rename_all = "kebab-case", default)]
pub struct Envelope {
    /// The fade-in time.
    #[derivative(Default(value = "Seconds(0.003)"))]
    pub attack: Seconds,
    /// The fade-out time.
    #[derivative(Default(value = "Seconds(0.003)"))]
    pub release: Seconds,
}
impl Envelope {
    /// Creates an [Envelope] with the given fade times.
    pub const fn new(attack: Seconds, release: Seconds) -> Self {
        Self { attack, release }
    }

    /// An [Envelope] that leaves the signal untouched.
    pub const fn none() -> Self {
        Self::new(Seconds::zero(), Seconds::zero())
    }

    /// Shapes the buffer in place: the first `attack * sample_rate` samples
    /// ramp 0→1, the last `release * sample_rate` samples ramp 1→0. When
    /// the buffer is shorter than attack+release the ramps overlap and the
    /// release ramp wins over the overlapped attack samples. A zero-length
    /// attack or release leaves that side untouched.
    pub fn apply(&self, buffer: &mut WaveBuffer) {
        let len = buffer.len();
        if len == 0 {
            return;
        }
        let rate = buffer.sample_rate().0 as f64;
        let mut gains = vec![1.0; len];

        let attack_samples = (self.attack.0 * rate) as isize;
        if attack_samples > 0 {
            let window = attack_samples as usize;
            let n = window.min(len);
            for (i, gain) in gains.iter_mut().take(n).enumerate() {
                *gain = if window == 1 {
                    0.0
                } else {
                    i as f64 / (window - 1) as f64
                };
            }
        }

        let release_samples = (self.release.0 * rate) as isize;
        if release_samples > 0 {
            let window = release_samples as usize;
            let n = window.min(len);
            for (i, gain) in gains.iter_mut().skip(len - n).enumerate() {
                *gain = if window == 1 {
                    1.0
                } else {
                    1.0 - (window - n + i) as f64 / (window - 1) as f64
                };
            }
        }

        for (sample, gain) in buffer.samples_mut().iter_mut().zip(gains.iter()) {
            *sample = *sample * *gain;
        }
    }
}
