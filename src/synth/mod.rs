// Purpose: Voice bookkeeping and glissando
// This layer sits above the backend and decides which oscillators exist

pub mod glide;
pub mod message;
pub mod registry;
pub mod voice;

pub use glide::{GestureSession, GlideController, GlideState};
pub use message::{KeyboardEvent, MessageReceiver};
pub use registry::VoiceRegistry;
pub use voice::Voice;
