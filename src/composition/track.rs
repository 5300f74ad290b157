// Copyright (c) 2024 Mike Tsao

use crate::prelude::*;
use derivative::Derivative;
use derive_builder::Builder;
use kahan::KahanSum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, IntoStaticStr};

/// How much of each segment's duration actually sounds. Each track kind
/// maps these to its own sustain fractions.
#[allow(missing_docs)]
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    EnumIter,
    Eq,
    IntoStaticStr,
    PartialEq,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Articulation {
    Legato,
    #[default]
    Normal,
    Staccato,
}
impl From<&str> for Articulation {
    /// Unknown style names resolve to legato, the first table entry.
    fn from(value: &str) -> Self {
        match value {
            "normal" => Articulation::Normal,
            "staccato" => Articulation::Staccato,
            _ => Articulation::Legato,
        }
    }
}

/// A [Track] owns a sequence of [Segment]s plus the performance parameters
/// that turn them into sound. [Track::render] produces the track's complete
/// waveform; the two implementations differ only in sustain tables and in
/// how a segment's content becomes frequencies.
#[typetag::serde(tag = "type")]
pub trait Track: core::fmt::Debug + Send + Sync {
    /// Beats per minute.
    fn tempo(&self) -> Tempo;
    /// The playing style.
    fn articulation(&self) -> Articulation;
    /// The track's gain, applied to every segment.
    fn volume(&self) -> Normal;
    /// The oscillator shape for every segment.
    fn waveform(&self) -> Waveform;
    /// The per-segment fade envelope.
    fn envelope(&self) -> Envelope;
    /// The scheduled segments, in order.
    fn segments(&self) -> &[Segment];

    /// The fraction of each segment's duration that sounds, per this track
    /// kind's articulation table.
    fn sustain_fraction(&self) -> f64;

    /// Resolves one segment's content to (frequencies, loudness divisor),
    /// or None for silence.
    fn voice_segment(&self, content: &SegmentContent) -> Option<(Vec<FrequencyHz>, f64)>;

    /// The wall-clock length of this track's own content. Zero and negative
    /// segment durations count for nothing here, just as [Track::render]
    /// skips them.
    fn natural_duration(&self) -> Seconds {
        let beats = Beats(self.segments().iter().map(|s| s.duration.0.max(0.0)).sum());
        beats.as_seconds(self.tempo())
    }

    /// Renders the whole track into a buffer of exactly
    /// `round(total_duration * sample_rate)` samples, zero-initialized so a
    /// track shorter than the requested duration pads with silence. With no
    /// explicit duration the track's natural duration is used.
    ///
    /// Placement rounds each segment's start and end to the nearest sample
    /// index from an error-compensated running clock, so long runs of short
    /// segments don't drift. The synthesized sub-buffer is conformed to the
    /// index-derived length, which can differ by a sample from the nominal
    /// one. A segment with zero or negative duration contributes nothing
    /// and leaves the clock where it was.
    fn render(&self, total_duration: Option<Seconds>, sample_rate: SampleRate) -> WaveBuffer {
        let total = total_duration.unwrap_or_else(|| self.natural_duration());
        let mut buffer = WaveBuffer::new_silent(sample_rate.samples_for(total), sample_rate);
        let oscillator = Oscillator::new_with(self.waveform());
        let envelope = self.envelope();
        let sustain = self.sustain_fraction();
        let gain = self.volume().0;

        let mut clock: KahanSum<f64> = KahanSum::new_with_value(0.0);
        for segment in self.segments() {
            let segment_seconds = segment.duration.as_seconds(self.tempo());
            if segment_seconds.0 <= 0.0 {
                continue;
            }
            let play_seconds = Seconds(segment_seconds.0 * sustain);
            let start = sample_rate.samples_for(Seconds(clock.sum()));
            let end = sample_rate
                .samples_for(Seconds(clock.sum() + play_seconds.0))
                .min(buffer.len());
            if start < end {
                if let Some((frequencies, divisor)) = self.voice_segment(&segment.content) {
                    let mut sub = oscillator.synthesize(&frequencies, play_seconds, sample_rate);
                    envelope.apply(&mut sub);
                    sub.conform_len(end - start);
                    buffer.accumulate(start, &sub, gain / divisor);
                }
            }
            clock += segment_seconds.0;
        }
        buffer
    }
}

/// A track of single notes and rests.
#[derive(Builder, Clone, Debug, Derivative, PartialEq, Serialize, Deserialize)]
#[derivative(Default)]
#[builder(default)]
#[serde(rename_all = "kebab-case", default)]
pub struct MelodyTrack {
    /// The notes and rests, in order.
    #[builder(setter(each(name = "segment")))]
    pub segments: Vec<Segment>,
    /// Beats per minute.
    pub tempo: Tempo,
    /// The playing style.
    pub articulation: Articulation,
    /// The track's gain.
    #[derivative(Default(value = "Normal::new_const(0.2)"))]
    pub volume: Normal,
    /// The oscillator shape.
    pub waveform: Waveform,
    /// The per-segment fade envelope.
    pub envelope: Envelope,
}
impl MelodyTrack {
    /// Creates a [MelodyTrack] with the standard per-segment envelope.
    pub fn new_with(
        segments: Vec<Segment>,
        tempo: Tempo,
        articulation: Articulation,
        volume: Normal,
        waveform: Waveform,
    ) -> Self {
        Self {
            segments,
            tempo,
            articulation,
            volume,
            waveform,
            envelope: Envelope::default(),
        }
    }
}
#[typetag::serde(name = "melody")]
impl Track for MelodyTrack {
    fn tempo(&self) -> Tempo {
        self.tempo
    }
    fn articulation(&self) -> Articulation {
        self.articulation
    }
    fn volume(&self) -> Normal {
        self.volume
    }
    fn waveform(&self) -> Waveform {
        self.waveform
    }
    fn envelope(&self) -> Envelope {
        self.envelope
    }
    fn segments(&self) -> &[Segment] {
        &self.segments
    }

    fn sustain_fraction(&self) -> f64 {
        match self.articulation {
            Articulation::Legato => 0.98,
            Articulation::Normal => 0.78,
            Articulation::Staccato => 0.40,
        }
    }

    // Melodies sum simultaneous pitches as-is.
    fn voice_segment(&self, content: &SegmentContent) -> Option<(Vec<FrequencyHz>, f64)> {
        content.frequencies().map(|frequencies| (frequencies, 1.0))
    }
}

/// A track of chords, each given as a symbol or an explicit pitch list.
#[derive(Builder, Clone, Debug, Derivative, PartialEq, Serialize, Deserialize)]
#[derivative(Default)]
#[builder(default)]
#[serde(rename_all = "kebab-case", default)]
pub struct ChordTrack {
    /// The chords, in order.
    #[builder(setter(each(name = "segment")))]
    pub segments: Vec<Segment>,
    /// Beats per minute.
    pub tempo: Tempo,
    /// The playing style.
    pub articulation: Articulation,
    /// The track's gain. Chords default quieter than melodies because they
    /// usually accompany one.
    #[derivative(Default(value = "Normal::new_const(0.15)"))]
    pub volume: Normal,
    /// The oscillator shape.
    pub waveform: Waveform,
    /// The per-segment fade envelope.
    pub envelope: Envelope,
}
impl ChordTrack {
    /// Creates a [ChordTrack] with the standard per-segment envelope.
    pub fn new_with(
        segments: Vec<Segment>,
        tempo: Tempo,
        articulation: Articulation,
        volume: Normal,
        waveform: Waveform,
    ) -> Self {
        Self {
            segments,
            tempo,
            articulation,
            volume,
            waveform,
            envelope: Envelope::default(),
        }
    }
}
#[typetag::serde(name = "chord")]
impl Track for ChordTrack {
    fn tempo(&self) -> Tempo {
        self.tempo
    }
    fn articulation(&self) -> Articulation {
        self.articulation
    }
    fn volume(&self) -> Normal {
        self.volume
    }
    fn waveform(&self) -> Waveform {
        self.waveform
    }
    fn envelope(&self) -> Envelope {
        self.envelope
    }
    fn segments(&self) -> &[Segment] {
        &self.segments
    }

    fn sustain_fraction(&self) -> f64 {
        match self.articulation {
            Articulation::Legato => 0.98,
            Articulation::Normal => 0.95,
            Articulation::Staccato => 0.60,
        }
    }

    // Dividing by the pitch count keeps a five-note chord from being five
    // times louder than a single note.
    fn voice_segment(&self, content: &SegmentContent) -> Option<(Vec<FrequencyHz>, f64)> {
        content.frequencies().map(|frequencies| {
            let count = frequencies.len() as f64;
            (frequencies, count)
        })
    }
}
