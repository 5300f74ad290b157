// Copyright (c) 2024 Mike Tsao

//! Signal generators and shapers: oscillators and the attack/release
//! envelope.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{Envelope, Oscillator, Waveform};
}

pub use {
    envelope::Envelope,
    oscillator::{Oscillator, Waveform},
};

mod envelope;
mod oscillator;
