//! Error types.
//!
//! Per-note operations never fail. The only runtime failure is acquiring the
//! audio backend; everything else here is input validation for configuration.

/// Failure to acquire or start a synthesis backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("no default output device available")]
    NoOutputDevice,
    #[error("unsupported output sample format {0} (f32 required)")]
    UnsupportedSampleFormat(String),
    #[error("failed to fetch default output config: {0}")]
    StreamConfig(#[from] cpal::DefaultStreamConfigError),
    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),
    #[error("failed to start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
}

/// Rejected configuration input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("scale {0} is outside 1..=10")]
    ScaleOutOfRange(i64),
    #[error("scale {0:?} is not an integer")]
    UnparsableScale(String),
    #[error("zoom level {0} is outside 1..=100")]
    InvalidZoom(u32),
    #[error("zoom level {0:?} is not an integer")]
    UnparsableZoom(String),
    #[error("unknown waveform {0:?} (expected sine, square, triangle or sawtooth)")]
    UnknownWaveform(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    #[error("synthesis backend unavailable")]
    BackendUnavailable(#[source] BackendError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
