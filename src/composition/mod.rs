// Copyright (c) 2024 Mike Tsao

//! Symbolic score content: segments, articulation, and the tracks that turn
//! them into audio.

/// The most commonly used imports.
pub mod prelude {
    pub use super::{
        Articulation, ChordTrack, ChordTrackBuilder, MelodyTrack, MelodyTrackBuilder, Segment,
        SegmentContent, Track,
    };
}

pub use {
    segment::{Segment, SegmentContent},
    track::{Articulation, ChordTrack, ChordTrackBuilder, MelodyTrack, MelodyTrackBuilder, Track},
};

mod segment;
mod track;
