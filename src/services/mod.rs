// Copyright (c) 2024 Mike Tsao

//! Device-facing playback built on
//! [cpal](https://crates.io/crates/cpal).

/// The most commonly used imports.
pub mod prelude {
    pub use super::{AudioPlayer, AudioServiceError};
}

pub use audio::{AudioPlayer, AudioServiceError};

mod audio;
