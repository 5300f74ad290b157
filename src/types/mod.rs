// Copyright (c) 2024 Mike Tsao

//! Common data types used throughout the system.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{
        Beats, FrequencyHz, Normal, Sample, SampleRate, Seconds, Tempo, WaveBuffer,
    };
}

pub use {
    numbers::{FrequencyHz, Sample, WaveBuffer},
    ranges::Normal,
    time::{Beats, SampleRate, Seconds, Tempo},
};

mod numbers;
mod ranges;
mod time;
