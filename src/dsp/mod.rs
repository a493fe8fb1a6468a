//! Low-level DSP primitives used by the render graph.
//!
//! These components are allocation-free and realtime-safe, making them safe to
//! run inside the audio callback. They stay focused on the signal math; the
//! backend layer decides when they start, stop and change.

/// Oscillator waveforms and the phase accumulator.
pub mod oscillator;
/// Gain parameter with set-now and exponential ramp automation.
pub mod ramp;

pub use oscillator::{OscillatorBlock, Waveform};
pub use ramp::GainParam;
