// Copyright (c) 2024 Mike Tsao

use crate::prelude::*;
use core::fmt::Debug;
use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    BufferSize, FromSample, SizedSample, Stream, StreamConfig,
};
use crossbeam::queue::ArrayQueue;
use delegate::delegate;
use std::{sync::Arc, time::Duration};

/// The fundamental type of an audio sample on the device side.
pub type AudioSampleType = f32;

/// The ways opening or driving the output device can fail. Rendering never
/// touches the device, so everything here is scoped to playback.
#[derive(Debug, thiserror::Error)]
pub enum AudioServiceError {
    /// No default output device exists.
    #[error("no audio output device is available")]
    NoDevice,
    /// The device wouldn't describe a default stream config.
    #[error("couldn't query the device's stream config: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),
    /// The output stream couldn't be built.
    #[error("couldn't build the audio stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),
    /// The output stream couldn't be started.
    #[error("couldn't start the audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
    /// The device wants a sample format this player doesn't speak.
    #[error("unsupported device sample format {0}")]
    UnsupportedSampleFormat(cpal::SampleFormat),
}

/// A ring buffer of mono samples that the audio stream consumes.
struct AudioQueue(Arc<ArrayQueue<AudioSampleType>>);
impl AudioQueue {
    fn new(capacity: usize) -> Self {
        Self(Arc::new(ArrayQueue::new(capacity)))
    }

    delegate! {
        to self.0 {
            fn is_empty(&self) -> bool;
            fn push(&self, sample: AudioSampleType) -> Result<(), AudioSampleType>;
            fn pop(&self) -> Option<AudioSampleType>;
        }
    }
}
impl Clone for AudioQueue {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

/// A scoped connection to the default output device. Opening an
/// [AudioPlayer] claims the device; dropping it stops the stream, so the
/// device is released on every exit path.
///
/// Playback is mono; the single channel is duplicated onto every device
/// channel.
pub struct AudioPlayer {
    queue: AudioQueue,
    stream: Stream,
    sample_rate: SampleRate,
    channel_count: usize,
}
impl Debug for AudioPlayer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AudioPlayer")
            .field("stream", &"(skipped)")
            .field("sample_rate", &self.sample_rate)
            .field("channel_count", &self.channel_count)
            .finish()
    }
}
impl AudioPlayer {
    /// Opens the default output device at the given sample rate and starts
    /// its stream.
    pub fn open(sample_rate: SampleRate) -> Result<Self, AudioServiceError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioServiceError::NoDevice)?;
        let supported = device.default_output_config()?;
        let channel_count = supported.channels() as usize;
        let config = StreamConfig {
            channels: supported.channels(),
            sample_rate: cpal::SampleRate(u32::from(sample_rate)),
            buffer_size: BufferSize::Default,
        };

        // A second of headroom keeps the producer comfortably ahead of the
        // callback.
        let queue = AudioQueue::new(sample_rate.0);
        let stream = match supported.sample_format() {
            cpal::SampleFormat::I16 => Self::stream_make::<i16>(&config, &device, queue.clone()),
            cpal::SampleFormat::I32 => Self::stream_make::<i32>(&config, &device, queue.clone()),
            cpal::SampleFormat::U16 => Self::stream_make::<u16>(&config, &device, queue.clone()),
            cpal::SampleFormat::F32 => Self::stream_make::<f32>(&config, &device, queue.clone()),
            cpal::SampleFormat::F64 => Self::stream_make::<f64>(&config, &device, queue.clone()),
            other => return Err(AudioServiceError::UnsupportedSampleFormat(other)),
        }?;
        stream.play()?;
        Ok(Self {
            queue,
            stream,
            sample_rate,
            channel_count,
        })
    }

    /// Creates a Stream that consumes the supplied [AudioQueue], converting
    /// samples to the stream's expected data type.
    fn stream_make<T>(
        config: &StreamConfig,
        device: &cpal::Device,
        queue: AudioQueue,
    ) -> Result<Stream, AudioServiceError>
    where
        T: SizedSample + FromSample<AudioSampleType>,
    {
        let err_fn = |err| eprintln!("Error in output sound stream: {err}");
        let channel_count = config.channels as usize;
        let stream = device.build_output_stream(
            config,
            move |output: &mut [T], _: &cpal::OutputCallbackInfo| {
                for frame in output.chunks_exact_mut(channel_count) {
                    // An empty queue plays silence, never stale data.
                    let sample = queue.pop().unwrap_or(0.0);
                    frame.fill(T::from_sample(sample));
                }
            },
            err_fn,
            None,
        )?;
        Ok(stream)
    }

    /// The rate this player was opened at.
    pub fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    /// How many channels the device is playing.
    pub fn channel_count(&self) -> usize {
        self.channel_count
    }

    /// Shapes the buffer with the given envelope and volume, guards against
    /// clipping, and plays it. Blocks until the device has consumed every
    /// sample.
    pub fn play_wave(
        &mut self,
        buffer: &WaveBuffer,
        volume: Normal,
        envelope: Envelope,
    ) -> &mut Self {
        let mut shaped = buffer.clone();
        envelope.apply(&mut shaped);
        shaped.scale(volume.0);
        let peak = shaped.peak();
        if peak > 1.0 {
            shaped.scale(0.9 / peak);
        }
        for sample in shaped.samples() {
            self.push_blocking(f32::from(*sample));
        }
        self.drain();
        self
    }

    /// Plays silence for the given duration, blocking like [Self::play_wave].
    /// Negligible durations (below a tenth of a millisecond) are skipped.
    pub fn play_silence(&mut self, duration: Seconds) -> &mut Self {
        if duration.0 > 0.0001 {
            for _ in 0..self.sample_rate.samples_for(duration) {
                self.push_blocking(0.0);
            }
            self.drain();
        }
        self
    }

    fn push_blocking(&self, sample: AudioSampleType) {
        let mut sample = sample;
        loop {
            match self.queue.push(sample) {
                Ok(()) => return,
                Err(rejected) => {
                    sample = rejected;
                    std::thread::sleep(Duration::from_millis(2));
                }
            }
        }
    }

    fn drain(&self) {
        while !self.queue.is_empty() {
            std::thread::sleep(Duration::from_millis(2));
        }
    }
}
impl Drop for AudioPlayer {
    fn drop(&mut self) {
        let _ = self.stream.pause();
    }
}
