// Copyright (c) 2024 Mike Tsao

//! The `mary` demo builds a two-track arrangement of "Mary Had a Little
//! Lamb" and renders it to a WAV file.

use cantata::prelude::*;

fn melody() -> Vec<Segment> {
    [
        (Some("E5"), 0.75),
        (Some("D5"), 0.25),
        (Some("C5"), 0.5),
        (Some("D5"), 0.5),
        (Some("E5"), 0.5),
        (Some("E5"), 0.5),
        (Some("E5"), 0.5),
        (None, 0.5),
        (Some("D5"), 0.5),
        (Some("D5"), 0.5),
        (Some("D5"), 1.0),
        (Some("E5"), 0.5),
        (Some("G5"), 0.5),
        (Some("G5"), 1.0),
        (Some("E5"), 0.75),
        (Some("D5"), 0.25),
        (Some("C5"), 0.5),
        (Some("D5"), 0.5),
        (Some("E5"), 0.5),
        (Some("E5"), 0.5),
        (Some("E5"), 0.5),
        (None, 0.5),
        (Some("D5"), 0.5),
        (Some("D5"), 0.5),
        (Some("E5"), 0.5),
        (Some("D5"), 0.5),
        (Some("C5"), 1.0),
    ]
    .iter()
    .map(|(note, beats)| match note {
        Some(name) => Segment::note(name, *beats),
        None => Segment::rest(*beats),
    })
    .collect()
}

// A simple I-V-I progression in C major, two beats per chord.
fn chords() -> Vec<Segment> {
    ["C", "C", "G", "C", "C", "C", "G", "C"]
        .iter()
        .map(|symbol| Segment::chord(symbol, 2.0))
        .collect()
}

fn main() -> anyhow::Result<()> {
    let mut song = Song::new_with(Tempo(120.0));
    song.title = Some("Mary Had a Little Lamb".into());
    song.add_melody(
        melody(),
        Articulation::Normal,
        Normal::new(0.2),
        Waveform::Sine,
    )
    .add_chords(
        chords(),
        Articulation::Normal,
        Normal::new(0.15),
        Waveform::Sine,
    );

    let output_path = std::env::temp_dir().join("mary-had-a-little-lamb.wav");
    song.save(&output_path, SampleRate::DEFAULT)?;
    eprintln!("Wrote {}", output_path.display());
    Ok(())
}
