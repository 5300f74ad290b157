// Copyright (c) 2024 Mike Tsao

//! Puts tracks together into a [Song] and gets the result out of the
//! system.

/// The most commonly used imports.
pub mod prelude {
    pub use super::Song;
    #[cfg(feature = "hound")]
    pub use super::SongExporter;
}

pub use song::Song;
#[cfg(feature = "hound")]
pub use util::SongExporter;

mod song;
#[cfg(feature = "hound")]
mod util;
