// Copyright (c) 2024 Mike Tsao

//! The `render` demo generates a WAV file from a serialized [Song].

use cantata::prelude::*;
use clap::Parser;

#[derive(Parser, Debug, Default)]
#[clap(author, about, long_about = None)]
struct Args {
    /// Names of files to process. Accepts JSON-format songs.
    input: Vec<String>,

    /// Sample rate in Hz
    #[clap(short = 'r', long, value_parser, default_value_t = 44100)]
    rate: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let sample_rate = SampleRate::new(args.rate);

    for input_filename in args.input {
        match std::fs::File::open(input_filename.clone()) {
            Ok(f) => match serde_json::from_reader::<_, Song>(std::io::BufReader::new(f)) {
                Ok(song) => {
                    eprintln!(
                        "Successfully read {} from {}",
                        song.title.clone().unwrap_or_default(),
                        input_filename
                    );
                    let output_path =
                        std::path::Path::new(&input_filename).with_extension("wav");
                    if output_path.as_os_str() == input_filename.as_str() {
                        panic!("would overwrite input file; couldn't generate output filename");
                    }
                    if let Err(e) = song.save(&output_path, sample_rate) {
                        eprintln!(
                            "error while writing {input_filename} render to {}: {e:?}",
                            output_path.display()
                        );
                        return Err(e);
                    }
                    eprintln!("Wrote {}", output_path.display());
                }
                Err(e) => eprintln!("error while parsing {input_filename}: {e:?}"),
            },
            Err(e) => eprintln!("error while opening {input_filename}: {e:?}"),
        }
    }
    Ok(())
}
