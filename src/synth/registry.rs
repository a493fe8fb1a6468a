//! Live voices keyed by tone.
//!
//! The registry is pure bookkeeping over a map; every audible side effect is
//! a scheduling call on the backend it owns. All three operations are total:
//! pressing a sounding tone, releasing a silent one or bending a missing one
//! does nothing.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::{
    backend::{Node, SynthesisBackend},
    dsp::Waveform,
    synth::voice::Voice,
    tuning::{Scale, ToneKey, Tuning},
};

/// Gain of a freshly pressed voice (fraction of full scale)
pub const VOICE_LEVEL: f64 = 0.2;
/// Release fade length in seconds
pub const RELEASE_TIME: f64 = 0.3;
/// Target of the release fade; exponential ramps cannot reach zero
pub const RELEASE_FLOOR: f64 = 0.0001;

pub struct VoiceRegistry<B: SynthesisBackend> {
    backend: B,
    tuning: Tuning,
    voices: HashMap<ToneKey, Voice>,
}

impl<B: SynthesisBackend> VoiceRegistry<B> {
    pub fn new(backend: B) -> Self {
        Self::with_tuning(backend, Tuning::DECIMAL)
    }

    pub fn with_tuning(backend: B, tuning: Tuning) -> Self {
        Self {
            backend,
            tuning,
            voices: HashMap::new(),
        }
    }

    /// Start a voice for `tone` unless one is already sounding.
    pub fn press(&mut self, tone: f64, scale: Scale, waveform: Waveform) {
        if !tone.is_finite() {
            warn!(tone, "ignoring press of non-finite tone");
            return;
        }

        let key = ToneKey::from_tone(tone);
        if self.voices.contains_key(&key) {
            trace!(tone, "tone already sounding, press ignored");
            return;
        }

        let frequency = self.tuning.frequency(tone, scale);

        let oscillator = self.backend.create_oscillator(waveform);
        let gain = self.backend.create_gain();
        self.backend.set_frequency_now(oscillator, frequency);
        self.backend.set_gain_now(gain, VOICE_LEVEL);
        self.backend.connect(oscillator.into(), gain.into());
        self.backend.connect(gain.into(), Node::Output);

        let now = self.backend.now();
        self.backend.start(oscillator, now);

        debug!(tone, %scale, %waveform, frequency, "voice started");
        self.voices
            .insert(key, Voice::new(tone, frequency, oscillator, gain, now));
    }

    /// Fade out and forget the voice for `tone`.
    ///
    /// The entry is gone as soon as this returns; the fade itself plays out
    /// on the backend's timeline.
    pub fn release(&mut self, tone: f64) {
        let Some(voice) = self.voices.remove(&ToneKey::from_tone(tone)) else {
            trace!(tone, "no voice to release");
            return;
        };
        self.fade_out(&voice);
    }

    /// Bend the voice for `tone` to `frequency` without retriggering it.
    pub fn retarget(&mut self, tone: f64, frequency: f64) {
        let Some(voice) = self.voices.get_mut(&ToneKey::from_tone(tone)) else {
            trace!(tone, "no voice to retarget");
            return;
        };

        self.backend.set_frequency_now(voice.oscillator(), frequency);
        voice.set_frequency(frequency);
        trace!(tone, frequency, "voice retargeted");
    }

    /// Release every live voice.
    pub fn release_all(&mut self) {
        let voices: Vec<Voice> = self.voices.drain().map(|(_, voice)| voice).collect();
        for voice in &voices {
            self.fade_out(voice);
        }
    }

    fn fade_out(&mut self, voice: &Voice) {
        let end = self.backend.now() + RELEASE_TIME;
        self.backend
            .ramp_gain_exponential_to(voice.gain(), RELEASE_FLOOR, end);
        self.backend.stop(voice.oscillator(), end);

        debug!(tone = voice.tone(), frequency = voice.frequency(), "voice released");
    }

    pub fn is_sounding(&self, tone: f64) -> bool {
        self.voices.contains_key(&ToneKey::from_tone(tone))
    }

    pub fn voice(&self, tone: f64) -> Option<&Voice> {
        self.voices.get(&ToneKey::from_tone(tone))
    }

    pub fn voices(&self) -> impl Iterator<Item = &Voice> {
        self.voices.values()
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
