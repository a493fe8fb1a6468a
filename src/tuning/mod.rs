//! Decimal equal-tempered tuning: tone/scale coordinates to Hz.

/*
Decimal Tuning
==============

The keyboard divides every octave into ten equal steps instead of the usual
twelve. A note is addressed by two coordinates:

  tone    Position inside the lattice. Integers are the named notes
          (1, 2, ... 10), fractions sit between them. Sliding a finger
          across a key produces fractional tones.

  scale   Coarse octave band, 1 to 10. Moving up one scale doubles every
          frequency.

Reference Pitch
---------------

Tone 8 at scale 5 is pinned to 440 Hz (the A440 of conventional tuning).
Everything else is derived from that one point:

    ratio = 2^(1/10)                     ≈ 1.07177

    f(tone, scale) = 440 × ratio^(tone - 8) × 2^(scale - 5)

  tone  scale   frequency
  ----  -----   ---------
   8      5     440.00 Hz   (reference)
   9      5     471.58 Hz   (one step up)
  18      5     880.00 Hz   (ten steps = one octave)
   8      6     880.00 Hz   (one scale = one octave)
   1      5     271.66 Hz   (bottom of the default keyboard)

Keeping the Reference Exact
---------------------------

Naively computing `440 / ratio^7 × ratio^7` drifts by an ulp or two, which
breaks the "tone 8 is exactly 440" contract. Instead we split the distance
from the reference into whole octaves and a remainder:

    d        = tone - 8
    octaves  = floor(d / 10)
    rem      = d - octaves × 10            (0 <= rem < 10)

    f        = 440 × 2^(rem / 10) × 2^(octaves + scale - 5)

Powers of two are exact in floating point, so the reference is exact and
whole-octave relations (scale + 1, tone + 10) double the result exactly for
integer tones.
*/

pub mod tone;

pub use tone::{Scale, ToneKey};

use crate::grid::ZoomLevel;

const MAX_OCTAVE_SHIFT: f64 = 2048.0;

/// Fixed constants of a tuning lattice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Equal steps per octave
    pub steps_per_octave: u32,
    /// Tone index pinned to the reference frequency
    pub reference_tone: i32,
    /// Scale index pinned to the reference frequency
    pub reference_scale: i32,
    /// Frequency of the reference note in Hz
    pub reference_frequency: f64,
}

impl Tuning {
    /// Ten steps per octave, tone 8 at scale 5 = 440 Hz
    pub const DECIMAL: Tuning = Tuning {
        steps_per_octave: 10,
        reference_tone: 8,
        reference_scale: 5,
        reference_frequency: 440.0,
    };

    /// Frequency ratio between adjacent integer tones.
    pub fn ratio(&self) -> f64 {
        (1.0 / self.steps_per_octave as f64).exp2()
    }

    /// Frequency in Hz of `tone` at `scale`.
    ///
    /// Defined for every finite tone; there is no clamping to the visible
    /// keyboard, so a slide far past the last key still yields a pitch.
    pub fn frequency(&self, tone: f64, scale: Scale) -> f64 {
        let steps = self.steps_per_octave as f64;
        let distance = tone - self.reference_tone as f64;

        let octaves = (distance / steps).floor();
        // Far from the reference the subtraction loses all precision
        let remainder = (distance - octaves * steps).clamp(0.0, steps);

        // Past ±MAX_OCTAVE_SHIFT the power of two is already inf or 0
        let octave_shift = (octaves + f64::from(scale.get()) - f64::from(self.reference_scale))
            .clamp(-MAX_OCTAVE_SHIFT, MAX_OCTAVE_SHIFT) as i32;

        self.reference_frequency * (remainder / steps).exp2() * 2.0_f64.powi(octave_shift)
    }

    /// Whether the key is the on-screen reference marker.
    ///
    /// Only shown on the un-zoomed keyboard, at the reference scale.
    pub fn is_reference_note(&self, tone: f64, scale: Scale, zoom: ZoomLevel) -> bool {
        scale.get() as i32 == self.reference_scale
            && tone.round() == self.reference_tone as f64
            && zoom.get() == 1
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::DECIMAL
    }
}

/// Frequency of `tone` at `scale` in the default decimal tuning.
#[inline]
pub fn frequency(tone: f64, scale: Scale) -> f64 {
    Tuning::DECIMAL.frequency(tone, scale)
}
