//! Player-facing settings: scale, waveform and zoom.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{dsp::Waveform, grid::ZoomLevel, tuning::Scale};

/// Settings owned by the front-end and read by the keyboard on every event
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardConfig {
    pub scale: Scale,
    pub waveform: Waveform,
    pub zoom: ZoomLevel,
}

impl KeyboardConfig {
    /// Scale 5, sine, no zoom
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    pub fn waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    pub fn zoom(mut self, zoom: ZoomLevel) -> Self {
        self.zoom = zoom;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference() {
        let config = KeyboardConfig::new();
        assert_eq!(config.scale.get(), 5);
        assert_eq!(config.waveform, Waveform::Sine);
        assert_eq!(config.zoom.get(), 1);
    }

    #[test]
    fn builder_sets_fields() {
        let config = KeyboardConfig::new()
            .scale(Scale::new(7).unwrap())
            .waveform(Waveform::Sawtooth)
            .zoom(ZoomLevel::new(5).unwrap());

        assert_eq!(config.scale.get(), 7);
        assert_eq!(config.waveform, Waveform::Sawtooth);
        assert_eq!(config.zoom.get(), 5);
    }
}
