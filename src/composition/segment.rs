// Copyright (c) 2024 Mike Tsao

use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// What a [Segment](crate::composition::Segment) sounds like.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SegmentContent {
    /// A single pitch.
    Note(Pitch),
    /// Silence. The segment's duration still elapses.
    #[default]
    Rest,
    /// A chord symbol, voiced through the standard bass + chord octaves.
    Chord(Chord),
    /// An explicit set of simultaneous pitches, bypassing chord theory.
    Pitches(Vec<Pitch>),
}
impl SegmentContent {
    /// The concrete frequencies this content sounds, or None for silence.
    /// An empty explicit pitch list is treated as silence.
    pub fn frequencies(&self) -> Option<Vec<FrequencyHz>> {
        match self {
            SegmentContent::Rest => None,
            SegmentContent::Note(pitch) => Some(vec![pitch.frequency()]),
            SegmentContent::Chord(chord) => Some(
                chord
                    .default_voicing()
                    .iter()
                    .map(|note| note.frequency())
                    .collect(),
            ),
            SegmentContent::Pitches(pitches) => {
                if pitches.is_empty() {
                    None
                } else {
                    Some(pitches.iter().map(|pitch| pitch.frequency()).collect())
                }
            }
        }
    }
}

/// One scheduled event on a track: content plus a duration in beats.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Segment {
    /// What sounds during this segment.
    pub content: SegmentContent,
    /// How long the segment lasts, in beats.
    pub duration: Beats,
}
impl Segment {
    /// Creates a [Segment] from its parts.
    pub fn new_with(content: SegmentContent, duration: Beats) -> Self {
        Self { content, duration }
    }

    /// A single note, parsed from a name like "C4" or a bare frequency.
    pub fn note(name: &str, beats: f64) -> Self {
        Self::new_with(SegmentContent::Note(Pitch::parse(name)), Beats(beats))
    }

    /// Silence for the given number of beats.
    pub fn rest(beats: f64) -> Self {
        Self::new_with(SegmentContent::Rest, Beats(beats))
    }

    /// A chord parsed from a symbol like "Am7".
    pub fn chord(symbol: &str, beats: f64) -> Self {
        Self::new_with(SegmentContent::Chord(Chord::parse(symbol)), Beats(beats))
    }

    /// An explicit list of simultaneous pitches.
    pub fn pitches(pitches: Vec<Pitch>, beats: f64) -> Self {
        Self::new_with(SegmentContent::Pitches(pitches), Beats(beats))
    }
}
