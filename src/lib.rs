// Copyright (c) 2024 Mike Tsao

#![deny(missing_docs)]
#![allow(rustdoc::private_intra_doc_links)]

//! Cantata renders symbolic music -- melodies and chord progressions -- into
//! digital audio.
//!
//! There are several ways to use Cantata, depending on the level of control
//! you need.
//!
//! * *Easiest, but least control*: Describe a [Song] with
//!   [add_melody()](Song::add_melody) and [add_chords()](Song::add_chords),
//!   then [render()](Song::render) it to a [WaveBuffer](types::WaveBuffer),
//!   [save()](Song::save) it as a WAV file, or [play()](Song::play) it
//!   through the system audio device.
//! * *For more control over each part*: Build [MelodyTrack]s and
//!   [ChordTrack]s yourself and hand them to a [Song].
//! * *Maximum control, fewest batteries included*: Use the bare
//!   [theory](crate::theory) and [elements](crate::elements) modules and
//!   obtain digital audio samples directly from them.
//!
//! ```
//! use cantata::prelude::*;
//!
//! let mut song = Song::new_with(Tempo(120.0));
//! song.add_melody(
//!     vec![
//!         Segment::note("C4", 1.0),
//!         Segment::rest(1.0),
//!         Segment::note("E4", 1.0),
//!     ],
//!     Articulation::Normal,
//!     Normal::from(0.2),
//!     Waveform::Sine,
//! );
//! let buffer = song.render(SampleRate::DEFAULT);
//! assert_eq!(buffer.len(), 66150);
//! ```

/// A collection of imports that are useful to users of this crate. `use
/// cantata::prelude::*;` for easier onboarding.
pub mod prelude {
    pub use super::{
        composition::prelude::*, elements::prelude::*, orchestration::prelude::*,
        theory::prelude::*, types::prelude::*,
    };
    #[cfg(feature = "cpal")]
    pub use super::services::prelude::*;
}

// Fundamental structures that are important enough to re-export at top level.
pub use {
    composition::{ChordTrack, MelodyTrack, Track},
    orchestration::Song,
};

pub mod composition;
pub mod elements;
pub mod orchestration;
#[cfg(feature = "cpal")]
pub mod services;
pub mod theory;
pub mod types;
