use tracing::{debug, trace};

use crate::{
    backend::{OscillatorId, SynthesisBackend},
    dsp::Waveform,
    synth::registry::VoiceRegistry,
    tuning::Scale,
};

/*
Glissando
=========

A slide starts on a key, sounds it, and then bends that one voice as the
pointer moves sideways. Horizontal distance is measured in key widths:
dragging one full key to the right raises the voice by exactly one tone,
half a key by half a tone, and so on.

    anchor ──────────── pointer
      │◄──── delta ────►│
      │                 │
    ┌───┬───┬───┬───┬───┬───┐
    │ 3 │ 4 │ 5 │ 6 │ 7 │ 8 │        new tone = anchor tone + delta / key width
    └───┴───┴───┴───┴───┴───┘

The voice keeps its registry key (the anchor tone) for the whole slide, so
only its frequency changes and a slide can never spawn a second oscillator.
The session also remembers that voice's oscillator: if the voice is released
behind its back and the same tone is pressed again, the new voice is not the
slide's and is left alone.

    ┌──────┐  start   ┌─────────┐
    │ Idle │ ───────→ │ Sliding │ ──┐ move
    └──────┘          └─────────┘ ←─┘
        ↑                  │
        └──────────────────┘
                end

The bent tone is not clamped to the keyboard. Sliding past the last key keeps
rising; deciding where to stop is up to the caller.
*/

/// An in-progress slide
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    /// Pointer position where the slide began
    pub anchor_position: f64,
    /// Tone of the voice being bent
    pub anchor_tone: f64,
    /// Key width used for the most recent move, if any
    pub key_width: Option<f64>,
    /// Tone the voice is currently bent to
    pub current_tone: f64,
    /// Oscillator of the anchored voice, `None` if the press did not sound
    pub oscillator: Option<OscillatorId>,
}

impl GestureSession {
    /// Whether the registry still holds the voice this slide started with
    pub fn owns_voice<B: SynthesisBackend>(&self, registry: &VoiceRegistry<B>) -> bool {
        let current = registry.voice(self.anchor_tone).map(|voice| voice.oscillator());
        self.oscillator.is_some() && current == self.oscillator
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GlideState {
    #[default]
    Idle,
    Sliding(GestureSession),
}

#[derive(Debug, Default)]
pub struct GlideController {
    state: GlideState,
}

impl GlideController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GlideState {
        self.state
    }

    pub fn session(&self) -> Option<&GestureSession> {
        match &self.state {
            GlideState::Sliding(session) => Some(session),
            GlideState::Idle => None,
        }
    }

    pub fn is_sliding(&self) -> bool {
        matches!(self.state, GlideState::Sliding(_))
    }

    /// True while sliding a voice that no longer exists.
    pub fn is_inert<B: SynthesisBackend>(&self, registry: &VoiceRegistry<B>) -> bool {
        self.session()
            .is_some_and(|session| !session.owns_voice(registry))
    }

    /// Begin a slide on `tone` and sound it.
    ///
    /// A slide that is still open is ended first, so its voice is released.
    pub fn start<B: SynthesisBackend>(
        &mut self,
        registry: &mut VoiceRegistry<B>,
        position: f64,
        tone: f64,
        scale: Scale,
        waveform: Waveform,
    ) {
        if self.is_sliding() {
            debug!("slide started while another was open, ending the previous one");
            self.end(registry);
        }

        registry.press(tone, scale, waveform);
        let oscillator = registry.voice(tone).map(|voice| voice.oscillator());

        self.state = GlideState::Sliding(GestureSession {
            anchor_position: position,
            anchor_tone: tone,
            key_width: None,
            current_tone: tone,
            oscillator,
        });
        debug!(position, tone, "slide started");
    }

    /// Bend the anchored voice to the tone under `position`.
    ///
    /// Returns the bent tone, or `None` when idle, when the slide's voice is
    /// gone, or when the inputs cannot describe a position (non-finite, or a
    /// key width that is not positive).
    pub fn move_to<B: SynthesisBackend>(
        &mut self,
        registry: &mut VoiceRegistry<B>,
        position: f64,
        key_width: f64,
        scale: Scale,
    ) -> Option<f64> {
        let GlideState::Sliding(session) = &mut self.state else {
            trace!("slide move while idle");
            return None;
        };

        if !position.is_finite() || !key_width.is_finite() || key_width <= 0.0 {
            trace!(position, key_width, "slide move ignored");
            return None;
        }

        if !session.owns_voice(registry) {
            trace!(tone = session.anchor_tone, "slide voice is gone, move ignored");
            return None;
        }

        let delta = (position - session.anchor_position) / key_width;
        let tone = session.anchor_tone + delta;
        let frequency = registry.tuning().frequency(tone, scale);

        registry.retarget(session.anchor_tone, frequency);

        session.key_width = Some(key_width);
        session.current_tone = tone;
        Some(tone)
    }

    /// Finish the slide and release its voice.
    pub fn end<B: SynthesisBackend>(&mut self, registry: &mut VoiceRegistry<B>) {
        let GlideState::Sliding(session) = std::mem::take(&mut self.state) else {
            trace!("slide end while idle");
            return;
        };

        if !session.owns_voice(registry) {
            debug!(tone = session.anchor_tone, "inert slide ended");
            return;
        }

        registry.release(session.anchor_tone);
        debug!(
            tone = session.anchor_tone,
            bent_to = session.current_tone,
            "slide ended"
        );
    }
}
