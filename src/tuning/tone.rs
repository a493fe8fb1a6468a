#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Octave band selector, always within `Scale::MIN..=Scale::MAX`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Scale(u8);

impl Scale {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: i64) -> Result<Self, ConfigError> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ConfigError::ScaleOutOfRange(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Next scale up, saturating at `MAX`.
    pub fn up(self) -> Self {
        Self((self.0 + 1).min(Self::MAX))
    }

    /// Next scale down, saturating at `MIN`.
    pub fn down(self) -> Self {
        Self((self.0 - 1).max(Self::MIN))
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<u8> for Scale {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value as i64)
    }
}

impl From<Scale> for u8 {
    fn from(scale: Scale) -> Self {
        scale.0
    }
}

impl std::fmt::Display for Scale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Scale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| ConfigError::UnparsableScale(s.to_string()))?;
        Self::new(value)
    }
}

/// Canonical map key for a tone: the tone in hundredths.
///
/// Raw `f64` tones make poor keys (`1.0 + 0.1 + 0.1 + 0.1 != 1.3`). Rounding to the
/// same two decimals the keyboard labels use means a key press and its later
/// release always land on the same entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToneKey(i64);

impl ToneKey {
    const RESOLUTION: f64 = 100.0;

    pub fn from_tone(tone: f64) -> Self {
        Self((tone * Self::RESOLUTION).round() as i64)
    }

    /// The rounded tone this key stands for.
    pub fn tone(self) -> f64 {
        self.0 as f64 / Self::RESOLUTION
    }
}

impl From<f64> for ToneKey {
    fn from(tone: f64) -> Self {
        Self::from_tone(tone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_bounds() {
        assert!(Scale::new(0).is_err());
        assert!(Scale::new(11).is_err());
        assert_eq!(Scale::new(1).unwrap().get(), 1);
        assert_eq!(Scale::new(10).unwrap().get(), 10);
        assert_eq!(Scale::new(-3), Err(ConfigError::ScaleOutOfRange(-3)));
    }

    #[test]
    fn scale_steps_saturate() {
        let top = Scale::new(10).unwrap();
        let bottom = Scale::new(1).unwrap();
        assert_eq!(top.up(), top);
        assert_eq!(bottom.down(), bottom);
        assert_eq!(Scale::default().up().get(), 6);
        assert_eq!(Scale::default().down().get(), 4);
    }

    #[test]
    fn scale_parses() {
        assert_eq!("7".parse::<Scale>().unwrap().get(), 7);
        assert!("12".parse::<Scale>().is_err());
        assert!("high".parse::<Scale>().is_err());
    }

    #[test]
    fn tone_key_absorbs_float_noise() {
        let accumulated = 1.0 + 0.1 + 0.1 + 0.1;
        assert_ne!(accumulated, 1.3);
        assert_eq!(ToneKey::from_tone(accumulated), ToneKey::from_tone(1.3));
        assert_eq!(ToneKey::from_tone(1.3).tone(), 1.3);
    }

    #[test]
    fn tone_key_separates_grid_neighbours() {
        assert_ne!(ToneKey::from_tone(1.1), ToneKey::from_tone(1.2));
        assert_ne!(ToneKey::from_tone(1.0), ToneKey::from_tone(1.01));
        assert_eq!(ToneKey::from_tone(1.004), ToneKey::from_tone(1.0));
    }
}
