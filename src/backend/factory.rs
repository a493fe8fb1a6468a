use crate::{backend::SynthesisBackend, error::BackendError};

/// Acquires a backend on demand
///
/// The keyboard does not open the audio device until the first note needs it,
/// and asks again on the next note if acquisition failed.
pub trait BackendFactory {
    type Backend: SynthesisBackend;

    fn open(&mut self) -> Result<Self::Backend, BackendError>;
}

impl<F, B> BackendFactory for F
where
    F: FnMut() -> Result<B, BackendError>,
    B: SynthesisBackend,
{
    type Backend = B;

    fn open(&mut self) -> Result<Self::Backend, BackendError> {
        self()
    }
}
