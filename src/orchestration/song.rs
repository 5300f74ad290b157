// Copyright (c) 2024 Mike Tsao

use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// A [Song] owns a set of tracks sharing a tempo, and mixes their rendered
/// waveforms into one.
///
/// The fluent `add_*` methods return `&mut Self` so a song can be built up
/// in one chain before rendering.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Song {
    /// An optional display title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// The tempo that `add_melody`/`add_chords` stamp onto new tracks.
    pub tempo: Tempo,
    /// The tracks, in insertion order. Order doesn't affect the mix beyond
    /// floating-point rounding.
    pub tracks: Vec<Box<dyn Track>>,
}
impl Song {
    /// Creates an empty [Song] at the given tempo.
    pub fn new_with(tempo: Tempo) -> Self {
        Self {
            tempo,
            ..Default::default()
        }
    }

    /// Adds a fully configured track, which may have its own tempo.
    pub fn add_track(&mut self, track: Box<dyn Track>) -> &mut Self {
        self.tracks.push(track);
        self
    }

    /// Adds a [MelodyTrack] at the song's tempo.
    pub fn add_melody(
        &mut self,
        segments: Vec<Segment>,
        articulation: Articulation,
        volume: Normal,
        waveform: Waveform,
    ) -> &mut Self {
        self.add_track(Box::new(MelodyTrack::new_with(
            segments,
            self.tempo,
            articulation,
            volume,
            waveform,
        )))
    }

    /// Adds a [ChordTrack] at the song's tempo.
    pub fn add_chords(
        &mut self,
        segments: Vec<Segment>,
        articulation: Articulation,
        volume: Normal,
        waveform: Waveform,
    ) -> &mut Self {
        self.add_track(Box::new(ChordTrack::new_with(
            segments,
            self.tempo,
            articulation,
            volume,
            waveform,
        )))
    }

    /// The length of the longest track's own content. The whole song
    /// renders to this duration so every track's buffer lines up.
    pub fn natural_duration(&self) -> Seconds {
        self.tracks
            .iter()
            .map(|track| track.natural_duration())
            .fold(Seconds::zero(), |acc, duration| {
                if duration > acc {
                    duration
                } else {
                    acc
                }
            })
    }

    /// Renders every track to the song's full duration and sums them
    /// sample by sample. If the summed peak exceeds 1.0, the whole mix is
    /// scaled to a 0.9 peak; quieter mixes are left untouched.
    pub fn render(&self, sample_rate: SampleRate) -> WaveBuffer {
        if self.tracks.is_empty() {
            return WaveBuffer::new_with(Vec::default(), sample_rate);
        }
        let total = self.natural_duration();
        let mut mixed = WaveBuffer::new_silent(sample_rate.samples_for(total), sample_rate);
        for track in &self.tracks {
            mixed.mix(&track.render(Some(total), sample_rate));
        }
        let peak = mixed.peak();
        if peak > 1.0 {
            mixed.scale(0.9 / peak);
        }
        mixed
    }

    /// Renders the song and plays it through the default output device,
    /// blocking until playback finishes.
    #[cfg(feature = "cpal")]
    pub fn play(&self, sample_rate: SampleRate) -> anyhow::Result<()> {
        use crate::elements::Envelope;
        use crate::services::AudioPlayer;

        let buffer = self.render(sample_rate);
        let mut player = AudioPlayer::open(sample_rate)?;
        // Per-segment envelopes already shaped the signal, so playback adds
        // no extra fades and no attenuation.
        player.play_wave(&buffer, Normal::maximum(), Envelope::none());
        Ok(())
    }

    /// Renders the song and writes it to a 16-bit mono WAV file.
    #[cfg(feature = "hound")]
    pub fn save(
        &self,
        path: impl AsRef<std::path::Path>,
        sample_rate: SampleRate,
    ) -> anyhow::Result<()> {
        crate::orchestration::SongExporter::export_to_wav(path, &self.render(sample_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use more_asserts::assert_le;

    fn one_note_melody() -> Vec<Segment> {
        vec![Segment::note("A4", 2.0)]
    }

    #[test]
    fn empty_song_renders_empty_buffer() {
        let song = Song::default();
        assert!(song.render(SampleRate::DEFAULT).is_empty());
    }

    #[test]
    fn duration_is_the_longest_track() {
        let mut song = Song::new_with(Tempo(120.0));
        song.add_melody(
            vec![Segment::note("C4", 1.0)],
            Articulation::Normal,
            Normal::new(0.2),
            Waveform::Sine,
        )
        .add_chords(
            vec![Segment::chord("C", 4.0)],
            Articulation::Normal,
            Normal::new(0.15),
            Waveform::Sine,
        );
        assert_eq!(song.natural_duration(), Seconds(2.0));
        assert_eq!(song.render(SampleRate::DEFAULT).len(), 88200);
    }

    #[test]
    fn mixing_sums_tracks() {
        let render_with_tracks = |count: usize| {
            let mut song = Song::new_with(Tempo(120.0));
            for _ in 0..count {
                song.add_melody(
                    one_note_melody(),
                    Articulation::Normal,
                    Normal::new(0.2),
                    Waveform::Sine,
                );
            }
            song.render(SampleRate::DEFAULT)
        };
        let single = render_with_tracks(1);
        let double = render_with_tracks(2);
        assert!(
            (double.peak() - single.peak() * 2.0).abs() < 1e-9,
            "two identical quiet tracks should sum to twice one"
        );
    }

    #[test]
    fn hot_mixes_are_normalized_to_headroom() {
        let mut song = Song::new_with(Tempo(120.0));
        for _ in 0..2 {
            song.add_melody(
                vec![Segment::note("A4", 2.0)],
                Articulation::Legato,
                Normal::maximum(),
                Waveform::Square,
            );
        }
        let buffer = song.render(SampleRate::DEFAULT);
        let peak = buffer.peak();
        assert!(
            (peak - 0.9).abs() < 1e-9,
            "a clipping mix should be scaled to exactly 0.9 peak, got {peak}"
        );
    }

    #[test]
    fn quiet_mixes_are_left_alone() {
        let mut song = Song::new_with(Tempo(120.0));
        song.add_melody(
            one_note_melody(),
            Articulation::Normal,
            Normal::new(0.2),
            Waveform::Sine,
        );
        let peak = song.render(SampleRate::DEFAULT).peak();
        assert_le!(peak, 0.2);
        assert!(peak > 0.1, "an 0.2-gain sine should peak near 0.2");
    }

    #[test]
    fn songs_round_trip_through_serde() {
        let mut song = Song::new_with(Tempo(90.0));
        song.title = Some("Test".into());
        song.add_melody(
            vec![Segment::note("C4", 1.0), Segment::rest(1.0)],
            Articulation::Staccato,
            Normal::new(0.2),
            Waveform::Triangle,
        );
        let json = serde_json::to_string_pretty(&song).unwrap();
        let back: Song = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tempo, Tempo(90.0));
        assert_eq!(
            back.render(SampleRate::DEFAULT),
            song.render(SampleRate::DEFAULT)
        );
    }
}
