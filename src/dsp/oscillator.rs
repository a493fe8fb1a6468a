#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::f32::consts::TAU;

use crate::error::ConfigError;

/*
Phase-Accumulating Oscillator
=============================

Every waveform here is a function of a single number: the phase, which runs
from 0.0 up to (but not including) 1.0 once per cycle.

    phase += frequency / sample_rate        (then wrap back into [0, 1))

At 440 Hz and 48 kHz the phase advances by 440 / 48000 ≈ 0.00917 per sample,
so one cycle takes about 109 samples.

Because only the *increment* depends on frequency, changing the frequency
mid-note never resets the phase. That is what makes a glissando click-free:
the waveform keeps its position and simply starts moving faster or slower.


Waveforms
---------

  Sine       sin(2π · phase)                      pure, no harmonics
  Square     +1 for phase < 0.5, -1 otherwise      odd harmonics, hollow
  Triangle   4·|phase - 0.5| - 1                  soft odd harmonics
  Sawtooth   2·phase - 1                          all harmonics, bright

    Sine            Square          Triangle        Sawtooth
     ╭─╮             ┌──┐            ╱╲               ╱│  ╱│
    ╱   ╲   ╱        │  │  │        ╱  ╲  ╱          ╱ │ ╱ │
         ╲_╱            └──┘            ╲╱          ╱  │╱  │

No band-limiting is applied. Square and sawtooth alias at high pitches,
which is acceptable for a playing surface and keeps the inner loop trivial.
*/

/// Oscillator shape
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Waveform {
    #[default]
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

impl Waveform {
    pub const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Triangle,
        Waveform::Sawtooth,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Triangle => "triangle",
            Waveform::Sawtooth => "sawtooth",
        }
    }

    /// Next waveform in selector order, wrapping around.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|&w| w == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Evaluate the waveform at `phase` in [0, 1).
    #[inline]
    pub fn sample(self, phase: f32) -> f32 {
        match self {
            Waveform::Sine => (TAU * phase).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => 4.0 * (phase - 0.5).abs() - 1.0,
            Waveform::Sawtooth => 2.0 * phase - 1.0,
        }
    }
}

impl std::fmt::Display for Waveform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Waveform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|w| w.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownWaveform(s.to_string()))
    }
}

/// Single oscillator: waveform plus running phase.
pub struct OscillatorBlock {
    waveform: Waveform,
    phase: f32,
}

impl OscillatorBlock {
    pub fn new(waveform: Waveform) -> Self {
        Self { waveform, phase: 0.0 }
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Produce one sample and advance the phase.
    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let out = self.waveform.sample(self.phase);

        self.phase += frequency / sample_rate;
        if !(0.0..1.0).contains(&self.phase) {
            self.phase = self.phase.rem_euclid(1.0);
            // rem_euclid can round up to exactly 1.0, and NaN never fits
            if !(0.0..1.0).contains(&self.phase) {
                self.phase = 0.0;
            }
        }

        out
    }

    /// Fill `out` at a constant frequency.
    pub fn render(&mut self, out: &mut [f32], frequency: f32, sample_rate: f32) {
        for sample in out.iter_mut() {
            *sample = self.next_sample(frequency, sample_rate);
        }
    }
}
