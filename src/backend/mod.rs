//! Synthesis backends: oscillator/gain creation and time-stamped scheduling.
//!
//! The voice registry only ever talks to [`SynthesisBackend`]. Every call is a
//! fire-and-forget request; nothing reports back when a scheduled ramp or stop
//! actually happens, and the backend cleans up finished nodes on its own.
//!
//! All shipped backends are a [`CommandBackend`]: they hand out node ids and
//! turn each call into a [`Command`] for a [`CommandSink`]. The sink decides
//! what a command means:
//!
//! - [`RenderGraph`] applies it directly (offline rendering),
//! - [`CpalOutput`] queues it for the audio thread,
//! - [`recording::Recorder`] just remembers it.

pub mod factory;
pub mod graph;
#[cfg(feature = "rtrb")]
pub mod output;
pub mod recording;

pub use factory::BackendFactory;
pub use graph::RenderGraph;
pub use recording::Recorder;

#[cfg(feature = "rtrb")]
pub use output::CpalOutput;

use crate::dsp::Waveform;

/// Handle to a backend oscillator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OscillatorId(u32);

impl OscillatorId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Handle to a backend gain stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GainId(u32);

impl GainId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Signal endpoint for [`SynthesisBackend::connect`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node {
    Oscillator(OscillatorId),
    Gain(GainId),
    /// The speakers
    Output,
}

impl From<OscillatorId> for Node {
    fn from(id: OscillatorId) -> Self {
        Node::Oscillator(id)
    }
}

impl From<GainId> for Node {
    fn from(id: GainId) -> Self {
        Node::Gain(id)
    }
}

/// Capabilities the voice registry needs from an audio engine.
///
/// Times (`at`) are absolute seconds on the clock returned by [`now`].
///
/// [`now`]: SynthesisBackend::now
pub trait SynthesisBackend {
    fn create_oscillator(&mut self, waveform: Waveform) -> OscillatorId;

    /// New gain stage at unity.
    fn create_gain(&mut self) -> GainId;

    /// Route the signal of `from` into `to`.
    fn connect(&mut self, from: Node, to: Node);

    fn set_frequency_now(&mut self, oscillator: OscillatorId, frequency: f64);

    fn set_gain_now(&mut self, gain: GainId, level: f64);

    /// Exponential glide from the current level to `target`, arriving at `at`.
    fn ramp_gain_exponential_to(&mut self, gain: GainId, target: f64, at: f64);

    fn start(&mut self, oscillator: OscillatorId, at: f64);

    fn stop(&mut self, oscillator: OscillatorId, at: f64);

    /// Backend clock in seconds, monotonic.
    fn now(&self) -> f64;
}

/// One scheduling request, as sent to a [`CommandSink`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    CreateOscillator { id: OscillatorId, waveform: Waveform },
    CreateGain { id: GainId },
    Connect { from: Node, to: Node },
    SetFrequency { id: OscillatorId, frequency: f64 },
    SetGain { id: GainId, level: f64 },
    RampGain { id: GainId, target: f64, at: f64 },
    Start { id: OscillatorId, at: f64 },
    Stop { id: OscillatorId, at: f64 },
}

/// Destination for scheduling commands
pub trait CommandSink {
    fn send(&mut self, command: Command);

    fn now(&self) -> f64;
}

/// [`SynthesisBackend`] over any [`CommandSink`]
pub struct CommandBackend<S: CommandSink> {
    sink: S,
    next_oscillator: u32,
    next_gain: u32,
}

/// Renders into caller-provided buffers
pub type OfflineBackend = CommandBackend<RenderGraph>;
/// Records calls without producing sound
pub type RecordingBackend = CommandBackend<Recorder>;
/// Plays through the default output device
#[cfg(feature = "rtrb")]
pub type CpalBackend = CommandBackend<CpalOutput>;

impl<S: CommandSink> CommandBackend<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            next_oscillator: 0,
            next_gain: 0,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

impl<S: CommandSink> SynthesisBackend for CommandBackend<S> {
    fn create_oscillator(&mut self, waveform: Waveform) -> OscillatorId {
        let id = OscillatorId(self.next_oscillator);
        self.next_oscillator = self.next_oscillator.wrapping_add(1);
        self.sink.send(Command::CreateOscillator { id, waveform });
        id
    }

    fn create_gain(&mut self) -> GainId {
        let id = GainId(self.next_gain);
        self.next_gain = self.next_gain.wrapping_add(1);
        self.sink.send(Command::CreateGain { id });
        id
    }

    fn connect(&mut self, from: Node, to: Node) {
        self.sink.send(Command::Connect { from, to });
    }

    fn set_frequency_now(&mut self, oscillator: OscillatorId, frequency: f64) {
        self.sink.send(Command::SetFrequency {
            id: oscillator,
            frequency,
        });
    }

    fn set_gain_now(&mut self, gain: GainId, level: f64) {
        self.sink.send(Command::SetGain { id: gain, level });
    }

    fn ramp_gain_exponential_to(&mut self, gain: GainId, target: f64, at: f64) {
        self.sink.send(Command::RampGain {
            id: gain,
            target,
            at,
        });
    }

    fn start(&mut self, oscillator: OscillatorId, at: f64) {
        self.sink.send(Command::Start { id: oscillator, at });
    }

    fn stop(&mut self, oscillator: OscillatorId, at: f64) {
        self.sink.send(Command::Stop { id: oscillator, at });
    }

    fn now(&self) -> f64 {
        self.sink.now()
    }
}

impl OfflineBackend {
    pub fn offline(sample_rate: f32) -> Self {
        Self::new(RenderGraph::new(sample_rate))
    }

    /// Render the next block and advance the clock by its length.
    pub fn render(&mut self, out: &mut [f32]) {
        self.sink.render(out);
    }
}

impl RecordingBackend {
    pub fn recording() -> Self {
        Self::new(Recorder::new())
    }

    /// Move the manual clock forward.
    pub fn advance(&mut self, seconds: f64) {
        self.sink.advance(seconds);
    }
}

#[cfg(feature = "rtrb")]
impl CpalBackend {
    /// Acquire the default output device and start streaming.
    pub fn open() -> Result<Self, crate::error::BackendError> {
        Ok(Self::new(CpalOutput::open()?))
    }
}
