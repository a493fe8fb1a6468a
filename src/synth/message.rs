#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::{dsp::Waveform, tuning::Scale};

/// Input from the playing surface
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum KeyboardEvent {
    /// Key pressed without sliding
    PressStart {
        tone: f64,
        scale: Scale,
        waveform: Waveform,
    },
    PressEnd { tone: f64 },
    /// Pointer down on a key; `position` is horizontal, in the same unit as `key_width`
    SlideStart { position: f64, tone: f64 },
    SlideMove { position: f64, key_width: f64 },
    SlideEnd,
    AllNotesOff,
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<KeyboardEvent>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<KeyboardEvent> {
    fn pop(&mut self) -> Option<KeyboardEvent> {
        Consumer::pop(self).ok()
    }
}

impl MessageReceiver for std::collections::VecDeque<KeyboardEvent> {
    fn pop(&mut self) -> Option<KeyboardEvent> {
        self.pop_front()
    }
}
