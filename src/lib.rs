pub mod backend; // Oscillator/gain scheduling: realtime, offline, recording
pub mod config;
pub mod dsp;
pub mod engine; // Keyboard facade: config + lazy backend + voices
pub mod error;
pub mod grid;
pub mod synth; // Voice registry and glissando
pub mod tuning;

pub use backend::{OfflineBackend, RecordingBackend, SynthesisBackend};
#[cfg(feature = "rtrb")]
pub use backend::CpalBackend;
pub use config::KeyboardConfig;
pub use dsp::Waveform;
pub use engine::Keyboard;
pub use error::{BackendError, ConfigError, SynthError};
pub use grid::{NoteGrid, ZoomLevel};
pub use synth::{GlideController, KeyboardEvent, VoiceRegistry};
pub use tuning::{frequency, Scale, Tuning};

pub const MAX_BLOCK_SIZE: usize = 2048;
