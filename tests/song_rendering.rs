// Copyright (c) 2024 Mike Tsao

//! End-to-end tests that drive the whole pipeline the way a user would:
//! symbolic segments in, mixed samples out.

use cantata::prelude::*;
use more_asserts::assert_gt;

fn simple_melody() -> Vec<Segment> {
    vec![
        Segment::note("C4", 1.0),
        Segment::rest(1.0),
        Segment::note("E4", 1.0),
    ]
}

fn chord_progression() -> Vec<Segment> {
    ["C", "G", "Am", "F"]
        .iter()
        .map(|symbol| Segment::chord(symbol, 2.0))
        .collect()
}

fn two_track_song() -> Song {
    let mut song = Song::new_with(Tempo(120.0));
    song.add_melody(
        simple_melody(),
        Articulation::Normal,
        Normal::new(0.2),
        Waveform::Sine,
    )
    .add_chords(
        chord_progression(),
        Articulation::Normal,
        Normal::new(0.15),
        Waveform::Sine,
    );
    song
}

fn region_peak(buffer: &WaveBuffer, range: core::ops::Range<usize>) -> f64 {
    buffer.samples()[range]
        .iter()
        .fold(0.0, |acc, s| acc.max(s.0.abs()))
}

#[test]
fn melody_lands_where_the_score_says() {
    let mut song = Song::new_with(Tempo(120.0));
    song.add_melody(
        simple_melody(),
        Articulation::Normal,
        Normal::new(0.2),
        Waveform::Sine,
    );
    let buffer = song.render(SampleRate::DEFAULT);
    assert_eq!(buffer.len(), 66150, "three beats at 120 BPM is 1.5 seconds");

    // The first note sounds for 78% of its half second, then the
    // articulation gap and the rest are silent, and the last note starts
    // exactly at the one-second mark.
    let note_end = SampleRate::DEFAULT.samples_for(Seconds(0.39));
    assert_gt!(region_peak(&buffer, 0..note_end), 0.0);
    assert_eq!(region_peak(&buffer, note_end..44100), 0.0);
    assert_gt!(region_peak(&buffer, 44100..buffer.len()), 0.0);
}

#[test]
fn song_duration_is_the_longest_track() {
    let song = two_track_song();
    // Melody is 1.5s; four 2-beat chords are 4.0s.
    assert_eq!(song.natural_duration(), Seconds(4.0));
    assert_eq!(song.render(SampleRate::DEFAULT).len(), 176400);
}

#[test]
fn rendering_is_deterministic() {
    let song = two_track_song();
    let first = song.render(SampleRate::DEFAULT);
    let second = song.render(SampleRate::DEFAULT);
    assert_eq!(first, second, "rendering twice must produce identical output");
}

#[test]
fn track_order_does_not_change_the_mix() {
    let forward = two_track_song();

    let mut reversed = Song::new_with(Tempo(120.0));
    reversed
        .add_chords(
            chord_progression(),
            Articulation::Normal,
            Normal::new(0.15),
            Waveform::Sine,
        )
        .add_melody(
            simple_melody(),
            Articulation::Normal,
            Normal::new(0.2),
            Waveform::Sine,
        );

    let a = forward.render(SampleRate::DEFAULT);
    let b = reversed.render(SampleRate::DEFAULT);
    assert_eq!(a.len(), b.len());
    for (x, y) in a.samples().iter().zip(b.samples().iter()) {
        assert!(
            (x.0 - y.0).abs() <= 1e-6,
            "mix must not depend on track insertion order: {} vs {}",
            x.0,
            y.0
        );
    }
}

#[test]
fn mixed_output_stays_in_range() {
    // Stack enough loud tracks that the raw sum clips badly.
    let mut song = Song::new_with(Tempo(120.0));
    for _ in 0..4 {
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
        "a clipping mix is normalized to a 0.9 peak, got {peak}"
    );
    assert!(buffer
        .samples()
        .iter()
        .all(|s| s.0 >= -1.0 && s.0 <= 1.0));
}

#[cfg(feature = "hound")]
#[test]
fn save_round_trips_through_wav() {
    let song = two_track_song();
    let buffer = song.render(SampleRate::DEFAULT);

    let path = std::env::temp_dir().join("cantata-song-rendering-test.wav");
    song.save(&path, SampleRate::DEFAULT).unwrap();

    let mut reader = hound::WavReader::open(&path).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(spec.bits_per_sample, 16);

    let written: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(written.len(), buffer.len());
    for (wav, sample) in written.iter().zip(buffer.samples().iter()) {
        assert_eq!(
            *wav,
            (sample.0 * 32767.0).round() as i16,
            "WAV conversion is round(sample * 32767)"
        );
    }
    let _ = std::fs::remove_file(&path);
}
