use crate::{
    backend::{GainId, OscillatorId},
    tuning::ToneKey,
};

/// One sounding note: an oscillator feeding its own gain stage
///
/// The tone is the voice's identity for its whole life. A glide bends
/// `frequency` but never the tone, so the release still finds the voice.
#[derive(Debug, Clone, PartialEq)]
pub struct Voice {
    tone: f64,
    key: ToneKey,
    frequency: f64,
    oscillator: OscillatorId,
    gain: GainId,
    started_at: f64,
}

impl Voice {
    pub(crate) fn new(
        tone: f64,
        frequency: f64,
        oscillator: OscillatorId,
        gain: GainId,
        started_at: f64,
    ) -> Self {
        Self {
            tone,
            key: ToneKey::from_tone(tone),
            frequency,
            oscillator,
            gain,
            started_at,
        }
    }

    /// Tone the voice was triggered at
    pub fn tone(&self) -> f64 {
        self.tone
    }

    pub fn key(&self) -> ToneKey {
        self.key
    }

    /// Current sounding frequency in Hz
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn oscillator(&self) -> OscillatorId {
        self.oscillator
    }

    pub fn gain(&self) -> GainId {
        self.gain
    }

    /// Backend time the oscillator was started
    pub fn started_at(&self) -> f64 {
        self.started_at
    }

    pub(crate) fn set_frequency(&mut self, frequency: f64) {
        self.frequency = frequency;
    }
}
