//! Realtime output through the default `cpal` device.
//!
//! The control side (this struct) and the audio callback never share the
//! render graph. Commands cross over a single-producer/single-consumer
//! `rtrb` ring buffer, and the callback publishes the frame clock through an
//! atomic after every buffer. Scheduling therefore never blocks the UI thread
//! and never races with ramps the graph is already playing.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Producer, PushError, RingBuffer};
use tracing::{error, info, warn};

use crate::{
    backend::{Command, CommandSink, RenderGraph},
    error::BackendError,
    MAX_BLOCK_SIZE,
};

/// Pending scheduling commands the audio thread has not picked up yet
pub const COMMAND_QUEUE_CAPACITY: usize = 1024;

pub struct CpalOutput {
    commands: Producer<Command>,
    frames: Arc<AtomicU64>,
    sample_rate: f32,
    channels: usize,
    device_name: String,
    // Playback stops when the stream is dropped
    _stream: cpal::Stream,
}

impl CpalOutput {
    pub fn open() -> Result<Self, BackendError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(BackendError::NoOutputDevice)?;
        let device_name = device.name().unwrap_or_else(|_| "unknown".to_string());

        let config = device.default_output_config()?;
        if config.sample_format() != cpal::SampleFormat::F32 {
            return Err(BackendError::UnsupportedSampleFormat(format!(
                "{:?}",
                config.sample_format()
            )));
        }

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        let (producer, mut consumer) = RingBuffer::<Command>::new(COMMAND_QUEUE_CAPACITY);
        let frames = Arc::new(AtomicU64::new(0));
        let clock = Arc::clone(&frames);

        let mut graph = RenderGraph::new(sample_rate);
        let mut block = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _| {
                while let Ok(command) = consumer.pop() {
                    graph.apply(command);
                }

                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let buf = &mut block[..frames_to_render];
                    graph.render(buf);

                    // Mono to all channels
                    let out_off = frames_written * channels;
                    for (i, &s) in buf.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                    }

                    frames_written += frames_to_render;
                }

                clock.store(graph.frames(), Ordering::Release);
            },
            |err| error!(%err, "audio stream error"),
            None,
        )?;

        stream.play()?;

        info!(
            device = %device_name,
            sample_rate,
            channels,
            "audio output opened"
        );

        Ok(Self {
            commands: producer,
            frames,
            sample_rate,
            channels,
            device_name,
            _stream: stream,
        })
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn channels(&self) -> usize {
        self.channels
    }
}

impl CommandSink for CpalOutput {
    fn send(&mut self, command: Command) {
        if let Err(PushError::Full(command)) = self.commands.push(command) {
            warn!(?command, "command queue full, dropping command");
        }
    }

    fn now(&self) -> f64 {
        self.frames.load(Ordering::Acquire) as f64 / self.sample_rate as f64
    }
}
