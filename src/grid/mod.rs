//! Playable keys for a zoom level.
//!
//! Zoom 1 shows the ten named tones of one octave. Higher zoom levels subdivide
//! every step, so zoom 10 exposes 100 keys spaced a tenth of a tone apart.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, tuning::ToneKey};

/// Named tones per keyboard (one octave of the decimal lattice)
pub const TONES_PER_GRID: u32 = 10;

/// Subdivisions per tone, 1 to [`ZoomLevel::MAX`].
///
/// Above the maximum, neighbouring keys would round to the same `ToneKey`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZoomLevel(u32);

impl ZoomLevel {
    /// Levels offered by the zoom selector
    pub const SUPPORTED: [u32; 4] = [1, 2, 5, 10];

    /// Finest zoom whose keys stay a hundredth of a tone apart
    pub const MAX: u32 = 100;

    pub fn new(level: u32) -> Result<Self, ConfigError> {
        if level == 0 || level > Self::MAX {
            return Err(ConfigError::InvalidZoom(level));
        }
        Ok(Self(level))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Next supported level, wrapping from 10 back to 1.
    pub fn next(self) -> Self {
        let next = Self::SUPPORTED
            .iter()
            .copied()
            .find(|&level| level > self.0)
            .unwrap_or(Self::SUPPORTED[0]);
        Self(next)
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<u32> for ZoomLevel {
    type Error = ConfigError;

    fn try_from(level: u32) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<ZoomLevel> for u32 {
    fn from(zoom: ZoomLevel) -> Self {
        zoom.0
    }
}

impl std::fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x", self.0)
    }
}

impl std::str::FromStr for ZoomLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = s
            .trim()
            .trim_end_matches('x')
            .parse()
            .map_err(|_| ConfigError::UnparsableZoom(s.to_string()))?;
        Self::new(level)
    }
}

/// One key of the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridKey {
    /// Position on the keyboard, left to right
    pub index: usize,
    /// Exact tone, used for audio and as the press/slide coordinate
    pub tone: f64,
}

impl GridKey {
    /// Registry identity of this key
    pub fn key(&self) -> ToneKey {
        ToneKey::from_tone(self.tone)
    }

    /// Display label: the tone to two decimals, trailing zeros dropped.
    pub fn label(&self) -> String {
        let fixed = format!("{:.2}", self.tone);
        fixed
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

/// Ordered keys for one zoom level
#[derive(Debug, Clone, PartialEq)]
pub struct NoteGrid {
    zoom: ZoomLevel,
    keys: Vec<GridKey>,
}

impl NoteGrid {
    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&GridKey> {
        self.keys.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridKey> {
        self.keys.iter()
    }

    pub fn tones(&self) -> impl Iterator<Item = f64> + '_ {
        self.keys.iter().map(|key| key.tone)
    }
}

/// Build the grid for `zoom`: `10 * zoom` keys at `1 + i / zoom`.
pub fn generate(zoom: ZoomLevel) -> NoteGrid {
    let level = zoom.get();
    let keys = (0..TONES_PER_GRID * level)
        .map(|i| GridKey {
            index: i as usize,
            tone: 1.0 + i as f64 / level as f64,
        })
        .collect();

    NoteGrid { zoom, keys }
}
