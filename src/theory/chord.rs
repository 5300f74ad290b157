// Copyright (c) 2024 Mike Tsao

use super::pitch::{NoteName, PitchClass};
use core::fmt::Display;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

/// The chord qualities this engine can voice. Each maps to a fixed set of
/// semitone intervals above the root.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, Default, EnumIter, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChordQuality {
    #[default]
    Major,
    Minor,
    Diminished,
    Augmented,
    Dominant7,
    Minor7,
    Major7,
    HalfDiminished7,
    Diminished7,
    Sixth,
    MinorSixth,
    Sus4,
    Dominant7Sus4,
    Ninth,
}

static SUFFIX_TO_QUALITY: Lazy<FxHashMap<&'static str, ChordQuality>> = Lazy::new(|| {
    let mut map = FxHashMap::default();
    map.insert("", ChordQuality::Major);
    map.insert("M", ChordQuality::Major);
    map.insert("m", ChordQuality::Minor);
    map.insert("dim", ChordQuality::Diminished);
    map.insert("aug", ChordQuality::Augmented);
    map.insert("7", ChordQuality::Dominant7);
    map.insert("m7", ChordQuality::Minor7);
    map.insert("M7", ChordQuality::Major7);
    map.insert("maj7", ChordQuality::Major7);
    map.insert("m7b5", ChordQuality::HalfDiminished7);
    map.insert("dim7", ChordQuality::Diminished7);
    map.insert("6", ChordQuality::Sixth);
    map.insert("m6", ChordQuality::MinorSixth);
    map.insert("sus4", ChordQuality::Sus4);
    map.insert("7sus4", ChordQuality::Dominant7Sus4);
    map.insert("9", ChordQuality::Ninth);
    map
});

impl ChordQuality {
    /// Semitone offsets above the root, root included. The ninth reaches
    /// past the octave; voicing carries it into the next octave.
    pub const fn intervals(&self) -> &'static [u8] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Diminished => &[0, 3, 6],
            ChordQuality::Augmented => &[0, 4, 8],
            ChordQuality::Dominant7 => &[0, 4, 7, 10],
            ChordQuality::Minor7 => &[0, 3, 7, 10],
            ChordQuality::Major7 => &[0, 4, 7, 11],
            ChordQuality::HalfDiminished7 => &[0, 3, 6, 10],
            ChordQuality::Diminished7 => &[0, 3, 6, 9],
            ChordQuality::Sixth => &[0, 4, 7, 9],
            ChordQuality::MinorSixth => &[0, 3, 7, 9],
            ChordQuality::Sus4 => &[0, 5, 7],
            ChordQuality::Dominant7Sus4 => &[0, 5, 7, 10],
            ChordQuality::Ninth => &[0, 4, 7, 10, 14],
        }
    }

    /// The canonical symbol suffix for this quality.
    pub const fn suffix(&self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::Major7 => "maj7",
            ChordQuality::HalfDiminished7 => "m7b5",
            ChordQuality::Diminished7 => "dim7",
            ChordQuality::Sixth => "6",
            ChordQuality::MinorSixth => "m6",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::Dominant7Sus4 => "7sus4",
            ChordQuality::Ninth => "9",
        }
    }
}
impl From<&str> for ChordQuality {
    /// Looks up a symbol suffix. Unrecognized suffixes silently resolve to
    /// major.
    fn from(suffix: &str) -> Self {
        SUFFIX_TO_QUALITY.get(suffix).copied().unwrap_or_default()
    }
}

/// A chord symbol: a root [PitchClass] plus a [ChordQuality], e.g. "Cm7b5".
/// A [Chord] is purely symbolic; [Chord::voicing] turns it into concrete
/// notes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Chord {
    /// The root pitch class.
    pub root: PitchClass,
    /// The quality, which determines the intervals.
    pub quality: ChordQuality,
}
impl Chord {
    /// The octave the bass note lands in when no override is given.
    pub const DEFAULT_BASS_OCTAVE: i8 = 2;
    /// The octave the chord body starts in when no override is given.
    pub const DEFAULT_CHORD_OCTAVE: i8 = 4;

    /// Creates a [Chord] from its parts.
    pub const fn new(root: PitchClass, quality: ChordQuality) -> Self {
        Self { root, quality }
    }

    /// Parses a symbol such as "C", "F#m7", or "Gsus4". An unrecognized
    /// root letter falls back to C, and an unrecognized suffix to major,
    /// so parsing always succeeds.
    pub fn parse(symbol: &str) -> Self {
        match PitchClass::parse_prefix(symbol) {
            Some((root, suffix)) => Self::new(root, ChordQuality::from(suffix)),
            None => Self::new(PitchClass::C, ChordQuality::from(symbol)),
        }
    }

    /// Semitone offsets above the root for this chord's quality.
    pub const fn intervals(&self) -> &'static [u8] {
        self.quality.intervals()
    }

    /// Realizes the chord as concrete notes: one bass note (the root in
    /// `bass_octave`) followed by the chord tones starting in
    /// `chord_octave`. Intervals that cross an octave boundary carry into
    /// the next octave, so a ninth lands a whole octave and a tone above
    /// the root.
    pub fn voicing(&self, bass_octave: i8, chord_octave: i8) -> Vec<NoteName> {
        let root_index = self.root.index() as usize;
        let mut notes = Vec::with_capacity(self.intervals().len() + 1);
        notes.push(NoteName::new(self.root, bass_octave));
        for interval in self.intervals() {
            let chromatic = root_index + *interval as usize;
            notes.push(NoteName::new(
                PitchClass::from_index(chromatic),
                chord_octave + (chromatic / 12) as i8,
            ));
        }
        notes
    }

    /// [Chord::voicing] with the standard bass and chord octaves.
    pub fn default_voicing(&self) -> Vec<NoteName> {
        self.voicing(Self::DEFAULT_BASS_OCTAVE, Self::DEFAULT_CHORD_OCTAVE)
    }
}
impl From<&str> for Chord {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}
impl From<String> for Chord {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}
impl From<Chord> for String {
    fn from(value: Chord) -> Self {
        value.to_string()
    }
}
impl Display for Chord {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_fmt(format_args!("{}{}", self.root.name(), self.quality.suffix()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn suffix_table_round_trips() {
        for quality in ChordQuality::iter() {
            assert_eq!(
                ChordQuality::from(quality.suffix()),
                quality,
                "{quality:?} should parse from its own suffix"
            );
        }
        // Aliases map onto the same qualities.
        assert_eq!(ChordQuality::from("M"), ChordQuality::Major);
        assert_eq!(ChordQuality::from("M7"), ChordQuality::Major7);
    }

    #[test]
    fn unknown_suffix_is_major() {
        assert_eq!(ChordQuality::from("madd13"), ChordQuality::Major);
        assert_eq!(Chord::parse("Cxyzzy"), Chord::parse("C"));
    }

    #[test]
    fn symbol_parsing() {
        assert_eq!(
            Chord::parse("F#m7"),
            Chord::new(PitchClass::Fs, ChordQuality::Minor7)
        );
        assert_eq!(
            Chord::parse("Gsus4"),
            Chord::new(PitchClass::G, ChordQuality::Sus4)
        );
        assert_eq!(
            Chord::parse("Bm7b5"),
            Chord::new(PitchClass::B, ChordQuality::HalfDiminished7)
        );
        assert_eq!(
            Chord::parse("Q7"),
            Chord::new(PitchClass::C, ChordQuality::Major),
            "bad root letter falls back to C major"
        );
    }

    #[test]
    fn half_diminished_intervals() {
        assert_eq!(Chord::parse("Cm7b5").intervals(), &[0, 3, 6, 10]);
    }

    #[test]
    fn c_major_default_voicing() {
        let notes = Chord::parse("C").default_voicing();
        let rendered: Vec<String> = notes.iter().map(|n| n.to_string()).collect();
        assert_eq!(rendered, vec!["C2", "C4", "E4", "G4"]);
    }

    #[test]
    fn voicing_carries_across_octaves() {
        // B's seventh (A) wraps past the octave boundary and lands in the
        // next octave up.
        let notes = Chord::parse("B7").default_voicing();
        let rendered: Vec<String> = notes.iter().map(|n| n.to_string()).collect();
        assert_eq!(rendered, vec!["B2", "B4", "D#5", "F#5", "A5"]);

        // A ninth reaches more than an octave above the root.
        let notes = Chord::parse("C9").voicing(2, 4);
        let rendered: Vec<String> = notes.iter().map(|n| n.to_string()).collect();
        assert_eq!(rendered, vec!["C2", "C4", "E4", "G4", "A#4", "D5"]);
    }

    #[test]
    fn display_matches_input() {
        for symbol in ["C", "F#m7", "Gsus4", "Bdim7", "Am6"] {
            assert_eq!(Chord::parse(symbol).to_string(), symbol);
        }
    }

    #[test]
    fn serde_as_string() {
        let chord = Chord::parse("Dm7");
        let json = serde_json::to_string(&chord).unwrap();
        assert_eq!(json, "\"Dm7\"");
        assert_eq!(serde_json::from_str::<Chord>(&json).unwrap(), chord);
    }
}
