//! The playable keyboard: configuration, lazy backend, voices and glide.
//!
//! `Keyboard` is the single owner of all note state. Front-ends either call
//! [`Keyboard::handle`] directly from their event loop or push events into a
//! queue and let the owning thread [`drain`](Keyboard::drain) it.

use tracing::{debug, error, info};

use crate::{
    backend::BackendFactory,
    config::KeyboardConfig,
    dsp::Waveform,
    error::SynthError,
    grid::{self, NoteGrid, ZoomLevel},
    synth::{GlideController, KeyboardEvent, MessageReceiver, VoiceRegistry},
    tuning::{Scale, Tuning},
};

pub struct Keyboard<F: BackendFactory> {
    config: KeyboardConfig,
    tuning: Tuning,
    factory: F,
    registry: Option<VoiceRegistry<F::Backend>>,
    glide: GlideController,
    failure_reported: bool,
}

impl<F: BackendFactory> Keyboard<F> {
    /// Create a keyboard. The backend is not opened until a note needs it.
    pub fn new(factory: F, config: KeyboardConfig) -> Self {
        Self {
            config,
            tuning: Tuning::DECIMAL,
            factory,
            registry: None,
            glide: GlideController::new(),
            failure_reported: false,
        }
    }

    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Process one input event.
    ///
    /// Only acquiring the backend can fail; the event is dropped in that case
    /// and the next sounding event tries again.
    pub fn handle(&mut self, event: KeyboardEvent) -> Result<(), SynthError> {
        match event {
            KeyboardEvent::PressStart {
                tone,
                scale,
                waveform,
            } => {
                self.ensure_backend()?.press(tone, scale, waveform);
            }
            KeyboardEvent::PressEnd { tone } => {
                if let Some(registry) = self.registry.as_mut() {
                    registry.release(tone);
                }
            }
            KeyboardEvent::SlideStart { position, tone } => {
                let KeyboardConfig {
                    scale, waveform, ..
                } = self.config;
                self.ensure_backend()?;
                if let Some(registry) = self.registry.as_mut() {
                    self.glide
                        .start(registry, position, tone, scale, waveform);
                }
            }
            KeyboardEvent::SlideMove {
                position,
                key_width,
            } => {
                if let Some(registry) = self.registry.as_mut() {
                    self.glide
                        .move_to(registry, position, key_width, self.config.scale);
                }
            }
            KeyboardEvent::SlideEnd => {
                if let Some(registry) = self.registry.as_mut() {
                    self.glide.end(registry);
                }
            }
            KeyboardEvent::AllNotesOff => {
                if let Some(registry) = self.registry.as_mut() {
                    registry.release_all();
                }
            }
        }

        Ok(())
    }

    /// Handle every queued event in order.
    ///
    /// Keeps going after a backend failure so releases are never lost;
    /// returns the number of events processed, or the first error.
    pub fn drain(&mut self, rx: &mut impl MessageReceiver) -> Result<usize, SynthError> {
        let mut processed = 0;
        let mut first_error = None;

        while let Some(event) = rx.pop() {
            if let Err(err) = self.handle(event) {
                first_error.get_or_insert(err);
            }
            processed += 1;
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(processed),
        }
    }

    /// Press `tone` at the configured scale and waveform.
    pub fn press(&mut self, tone: f64) -> Result<(), SynthError> {
        self.handle(KeyboardEvent::PressStart {
            tone,
            scale: self.config.scale,
            waveform: self.config.waveform,
        })
    }

    pub fn release(&mut self, tone: f64) -> Result<(), SynthError> {
        self.handle(KeyboardEvent::PressEnd { tone })
    }

    fn ensure_backend(&mut self) -> Result<&mut VoiceRegistry<F::Backend>, SynthError> {
        let registry = match self.registry.take() {
            Some(registry) => registry,
            None => match self.factory.open() {
                Ok(backend) => {
                    info!("synthesis backend acquired");
                    self.failure_reported = false;
                    VoiceRegistry::with_tuning(backend, self.tuning)
                }
                Err(err) => {
                    if self.failure_reported {
                        debug!(%err, "synthesis backend still unavailable");
                    } else {
                        error!(%err, "synthesis backend unavailable");
                        self.failure_reported = true;
                    }
                    return Err(SynthError::BackendUnavailable(err));
                }
            },
        };

        Ok(self.registry.insert(registry))
    }

    pub fn config(&self) -> &KeyboardConfig {
        &self.config
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Change the scale; voices already sounding keep their pitch.
    pub fn set_scale(&mut self, scale: Scale) {
        self.config.scale = scale;
    }

    pub fn scale_up(&mut self) -> Scale {
        self.config.scale = self.config.scale.up();
        self.config.scale
    }

    pub fn scale_down(&mut self) -> Scale {
        self.config.scale = self.config.scale.down();
        self.config.scale
    }

    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.config.waveform = waveform;
    }

    pub fn set_zoom(&mut self, zoom: ZoomLevel) {
        self.config.zoom = zoom;
    }

    /// Keys for the current zoom level
    pub fn grid(&self) -> NoteGrid {
        grid::generate(self.config.zoom)
    }

    pub fn is_reference_note(&self, tone: f64) -> bool {
        self.tuning
            .is_reference_note(tone, self.config.scale, self.config.zoom)
    }

    /// Frequency `tone` would sound at with the current scale
    pub fn frequency(&self, tone: f64) -> f64 {
        self.tuning.frequency(tone, self.config.scale)
    }

    pub fn is_sounding(&self, tone: f64) -> bool {
        self.registry
            .as_ref()
            .is_some_and(|registry| registry.is_sounding(tone))
    }

    pub fn voice_count(&self) -> usize {
        self.registry.as_ref().map_or(0, VoiceRegistry::len)
    }

    pub fn backend_ready(&self) -> bool {
        self.registry.is_some()
    }

    pub fn glide(&self) -> &GlideController {
        &self.glide
    }

    pub fn registry(&self) -> Option<&VoiceRegistry<F::Backend>> {
        self.registry.as_ref()
    }

    pub fn registry_mut(&mut self) -> Option<&mut VoiceRegistry<F::Backend>> {
        self.registry.as_mut()
    }
}
