// Copyright (c) 2024 Mike Tsao

//! Pitch and chord theory: note names, equal-tempered frequencies, and
//! chord-symbol resolution.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{Chord, ChordQuality, NoteName, Pitch, PitchClass};
}

pub use {
    chord::{Chord, ChordQuality},
    pitch::{NoteName, Pitch, PitchClass},
};

mod chord;
mod pitch;
