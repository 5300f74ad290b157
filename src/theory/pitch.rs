// Copyright (c) 2024 Mike Tsao

use crate::prelude::*;
use core::fmt::Display;
use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, FromRepr};

/// The twelve chromatic pitch classes of equal temperament, C = 0 through
/// B = 11.
#[allow(missing_docs)]
#[derive(
    Clone, Copy, Debug, Default, EnumIter, Eq, FromRepr, PartialEq, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum PitchClass {
    #[default]
    C = 0,
    Cs = 1,
    D = 2,
    Ds = 3,
    E = 4,
    F = 5,
    Fs = 6,
    G = 7,
    Gs = 8,
    A = 9,
    As = 10,
    B = 11,
}
impl PitchClass {
    /// Note names in chromatic order, sharps only. Flat spellings are not
    /// recognized, matching the wire format this engine has always accepted.
    pub const NAMES: [&'static str; 12] = [
        "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
    ];

    /// The chromatic index, 0-11.
    pub const fn index(&self) -> u8 {
        *self as u8
    }

    /// Maps any chromatic index to its pitch class, wrapping at the octave.
    pub fn from_index(index: usize) -> Self {
        Self::from_repr(index % 12).unwrap_or_default()
    }

    /// The conventional name, e.g. "C#".
    pub fn name(&self) -> &'static str {
        Self::NAMES[self.index() as usize]
    }

    /// Parses a note-name prefix ("C", "F#", ...) and returns the class plus
    /// the unconsumed remainder of the string.
    pub(crate) fn parse_prefix(s: &str) -> Option<(Self, &str)> {
        let bytes = s.as_bytes();
        let name_len = if bytes.len() > 1 && bytes[1] == b'#' {
            2
        } else if !bytes.is_empty() {
            1
        } else {
            return None;
        };
        if !s.is_char_boundary(name_len) {
            return None;
        }
        let (name, rest) = s.split_at(name_len);
        Self::NAMES
            .iter()
            .position(|n| *n == name)
            .map(|index| (Self::from_index(index), rest))
    }
}
impl Display for PitchClass {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A symbolic note: a [PitchClass] plus an octave, e.g. C#4. A4 (octave 4,
/// class A) is the 440 Hz reference.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NoteName {
    /// The chromatic class.
    pub class: PitchClass,
    /// The octave, where A4 = 440 Hz.
    pub octave: i8,
}
impl NoteName {
    /// Creates a [NoteName].
    pub const fn new(class: PitchClass, octave: i8) -> Self {
        Self { class, octave }
    }

    /// The equal-tempered frequency: 440 · 2^(semitones from A4 / 12).
    pub fn frequency(&self) -> FrequencyHz {
        let semitones = (self.class.index() as i32 - 9) + (self.octave as i32 - 4) * 12;
        FrequencyHz(440.0 * 2.0f64.powf(semitones as f64 / 12.0))
    }
}
impl Display for NoteName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_fmt(format_args!("{}{}", self.class.name(), self.octave))
    }
}

/// A [Pitch] is either a symbolic note name or a raw frequency. Raw
/// frequencies pass through rendering unchanged, which lets callers play
/// tones outside the twelve-tone grid.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Pitch {
    /// A symbolic note, resolved through equal temperament.
    Named(NoteName),
    /// A literal frequency in Hz.
    Frequency(FrequencyHz),
}
impl Pitch {
    /// The default octave assumed when a note name carries no octave digits.
    pub const DEFAULT_OCTAVE: i8 = 4;

    /// Parses a note name such as "C4", "F#5", or "A" (octave defaults to
    /// 4), or a bare number treated as Hz. Anything unparseable falls back
    /// to 440 Hz rather than failing the render.
    pub fn parse(s: &str) -> Self {
        if let Ok(hz) = s.parse::<f64>() {
            return Self::Frequency(FrequencyHz(hz));
        }
        if let Some((class, rest)) = PitchClass::parse_prefix(s) {
            let octave = if rest.is_empty() {
                Some(Self::DEFAULT_OCTAVE)
            } else {
                rest.parse::<i8>().ok()
            };
            if let Some(octave) = octave {
                return Self::Named(NoteName::new(class, octave));
            }
        }
        Self::Frequency(FrequencyHz::CONCERT_A4)
    }

    /// The resolved frequency. Always positive for any reachable value.
    pub fn frequency(&self) -> FrequencyHz {
        match self {
            Pitch::Named(note) => note.frequency(),
            Pitch::Frequency(hz) => *hz,
        }
    }
}
impl Default for Pitch {
    fn default() -> Self {
        Self::Named(NoteName::new(PitchClass::A, 4))
    }
}
impl From<&str> for Pitch {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}
impl From<String> for Pitch {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}
impl From<f64> for Pitch {
    fn from(value: f64) -> Self {
        Self::Frequency(FrequencyHz(value))
    }
}
impl From<NoteName> for Pitch {
    fn from(value: NoteName) -> Self {
        Self::Named(value)
    }
}
impl From<Pitch> for String {
    fn from(value: Pitch) -> Self {
        value.to_string()
    }
}
impl Display for Pitch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Pitch::Named(note) => note.fmt(f),
            Pitch::Frequency(hz) => f.write_fmt(format_args!("{}", hz.0)),
        }
    }
}
