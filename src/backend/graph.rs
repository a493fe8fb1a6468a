//! Oscillator/gain node table rendered one block at a time.
//!
//! This is the engine behind both the realtime and offline backends. It owns
//! its own clock (frames rendered so far), applies [`Command`]s in arrival
//! order, and renders every started oscillator through its gain stage into a
//! mono buffer with sample-accurate start/stop times.
//!
//! Cleanup is the graph's own business: an oscillator is dropped once its stop
//! time has passed, and a gain stage is dropped once every oscillator that
//! ever fed it is gone.

use crate::{
    backend::{Command, CommandSink, GainId, Node, OscillatorId},
    dsp::{GainParam, OscillatorBlock},
};

/// Initial node capacity, reserved up front so steady-state playing never
/// allocates on the audio thread
pub const DEFAULT_CAPACITY: usize = 256;

struct OscillatorNode {
    id: OscillatorId,
    block: OscillatorBlock,
    frequency: f32,
    start_at: Option<f64>,
    stop_at: Option<f64>,
    target: Option<Node>,
}

struct GainNode {
    id: GainId,
    param: GainParam,
    to_output: bool,
    had_source: bool,
}

pub struct RenderGraph {
    sample_rate: f32,
    frame: u64,
    oscillators: Vec<OscillatorNode>,
    gains: Vec<GainNode>,
}

impl RenderGraph {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_capacity(sample_rate, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(sample_rate: f32, capacity: usize) -> Self {
        Self {
            sample_rate,
            frame: 0,
            oscillators: Vec::with_capacity(capacity),
            gains: Vec::with_capacity(capacity),
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frame
    }

    /// Clock in seconds: the time of the next sample to be rendered
    pub fn time(&self) -> f64 {
        self.frame as f64 / self.sample_rate as f64
    }

    pub fn oscillator_count(&self) -> usize {
        self.oscillators.len()
    }

    pub fn gain_count(&self) -> usize {
        self.gains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.oscillators.is_empty() && self.gains.is_empty()
    }

    /// Current frequency of an oscillator that is still alive
    pub fn frequency_of(&self, id: OscillatorId) -> Option<f32> {
        self.oscillator(id).map(|osc| osc.frequency)
    }

    fn oscillator(&self, id: OscillatorId) -> Option<&OscillatorNode> {
        self.oscillators.iter().find(|osc| osc.id == id)
    }

    fn oscillator_mut(&mut self, id: OscillatorId) -> Option<&mut OscillatorNode> {
        self.oscillators.iter_mut().find(|osc| osc.id == id)
    }

    fn gain_mut(&mut self, id: GainId) -> Option<&mut GainNode> {
        self.gains.iter_mut().find(|gain| gain.id == id)
    }

    /// Apply one command. Commands for nodes that no longer exist are ignored.
    pub fn apply(&mut self, command: Command) {
        let now = self.time();

        match command {
            Command::CreateOscillator { id, waveform } => {
                self.oscillators.push(OscillatorNode {
                    id,
                    block: OscillatorBlock::new(waveform),
                    frequency: 440.0,
                    start_at: None,
                    stop_at: None,
                    target: None,
                });
            }
            Command::CreateGain { id } => {
                self.gains.push(GainNode {
                    id,
                    param: GainParam::new(1.0),
                    to_output: false,
                    had_source: false,
                });
            }
            Command::Connect {
                from: Node::Oscillator(osc_id),
                to,
            } => {
                if let Node::Gain(gain_id) = to {
                    if let Some(gain) = self.gain_mut(gain_id) {
                        gain.had_source = true;
                    }
                }
                if let Some(osc) = self.oscillator_mut(osc_id) {
                    osc.target = Some(to);
                }
            }
            Command::Connect {
                from: Node::Gain(gain_id),
                to: Node::Output,
            } => {
                if let Some(gain) = self.gain_mut(gain_id) {
                    gain.to_output = true;
                }
            }
            // Gain chains and routing into sources are not supported
            Command::Connect { .. } => {}
            Command::SetFrequency { id, frequency } => {
                if let Some(osc) = self.oscillator_mut(id) {
                    osc.frequency = frequency as f32;
                }
            }
            Command::SetGain { id, level } => {
                if let Some(gain) = self.gain_mut(id) {
                    gain.param.set_now(level as f32);
                }
            }
            Command::RampGain { id, target, at } => {
                if let Some(gain) = self.gain_mut(id) {
                    gain.param.ramp_exponential(target as f32, now, at);
                }
            }
            Command::Start { id, at } => {
                if let Some(osc) = self.oscillator_mut(id) {
                    // An oscillator starts at most once
                    if osc.start_at.is_none() {
                        osc.start_at = Some(at);
                    }
                }
            }
            Command::Stop { id, at } => {
                if let Some(osc) = self.oscillator_mut(id) {
                    osc.stop_at = Some(at);
                }
            }
        }
    }

    /// Render the next `out.len()` frames (replacing the buffer contents).
    pub fn render(&mut self, out: &mut [f32]) {
        out.fill(0.0);

        let sample_rate = self.sample_rate;
        let first_frame = self.frame;

        for osc in self.oscillators.iter_mut() {
            let Some(start_at) = osc.start_at else {
                continue;
            };

            // Resolve the route once per block
            let gain = match osc.target {
                Some(Node::Output) => None,
                Some(Node::Gain(gain_id)) => {
                    match self.gains.iter().find(|gain| gain.id == gain_id) {
                        Some(gain) if gain.to_output => Some(&gain.param),
                        _ => continue,
                    }
                }
                _ => continue,
            };

            for (i, sample) in out.iter_mut().enumerate() {
                let time = (first_frame + i as u64) as f64 / sample_rate as f64;
                if time < start_at {
                    continue;
                }
                if osc.stop_at.is_some_and(|stop_at| time >= stop_at) {
                    break;
                }

                let level = gain.map_or(1.0, |param| param.value_at(time));
                *sample += osc.block.next_sample(osc.frequency, sample_rate) * level;
            }
        }

        self.frame += out.len() as u64;
        self.collect_finished();
    }

    fn collect_finished(&mut self) {
        let now = self.time();

        self.oscillators
            .retain(|osc| !osc.stop_at.is_some_and(|stop_at| stop_at <= now));

        let oscillators = &self.oscillators;
        self.gains.retain(|gain| {
            !gain.had_source
                || oscillators
                    .iter()
                    .any(|osc| osc.target == Some(Node::Gain(gain.id)))
        });

        for gain in self.gains.iter_mut() {
            gain.param.settle(now);
        }
    }
}

impl CommandSink for RenderGraph {
    fn send(&mut self, command: Command) {
        self.apply(command);
    }

    fn now(&self) -> f64 {
        self.time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::Waveform;

    const SAMPLE_RATE: f32 = 1_000.0;

    fn voice(graph: &mut RenderGraph, raw: u32, level: f64) -> (OscillatorId, GainId) {
        let osc = OscillatorId::new(raw);
        let gain = GainId::new(raw);
        graph.apply(Command::CreateOscillator {
            id: osc,
            waveform: Waveform::Square,
        });
        graph.apply(Command::CreateGain { id: gain });
        graph.apply(Command::SetFrequency {
            id: osc,
            frequency: 10.0,
        });
        graph.apply(Command::SetGain { id: gain, level });
        graph.apply(Command::Connect {
            from: osc.into(),
            to: gain.into(),
        });
        graph.apply(Command::Connect {
            from: gain.into(),
            to: Node::Output,
        });
        (osc, gain)
    }

    #[test]
    fn unstarted_oscillator_is_silent() {
        let mut graph = RenderGraph::new(SAMPLE_RATE);
        voice(&mut graph, 0, 0.2);

        let mut out = vec![1.0f32; 64];
        graph.render(&mut out);
        assert!(out.iter().all(|&s| s == 0.0));
        assert_eq!(graph.time(), 0.064);
    }

    #[test]
    fn started_voice_plays_at_gain_level() {
        let mut graph = RenderGraph::new(SAMPLE_RATE);
        let (osc, _) = voice(&mut graph, 0, 0.2);
        graph.apply(Command::Start { id: osc, at: 0.0 });

        let mut out = vec![0.0f32; 100];
        graph.render(&mut out);
        assert!(out.iter().all(|&s| (s.abs() - 0.2).abs() < 1e-6));
    }

    #[test]
    fn start_time_is_sample_accurate() {
        let mut graph = RenderGraph::new(SAMPLE_RATE);
        let (osc, _) = voice(&mut graph, 0, 0.5);
        graph.apply(Command::Start { id: osc, at: 0.010 });

        let mut out = vec![0.0f32; 20];
        graph.render(&mut out);
        assert!(out[..10].iter().all(|&s| s == 0.0));
        assert!(out[10..].iter().all(|&s| s != 0.0));
    }

    #[test]
    fn unrouted_gain_is_silent() {
        let mut graph = RenderGraph::new(SAMPLE_RATE);
        let osc = OscillatorId::new(7);
        let gain = GainId::new(7);
        graph.apply(Command::CreateOscillator {
            id: osc,
            waveform: Waveform::Square,
        });
        graph.apply(Command::CreateGain { id: gain });
        graph.apply(Command::Connect {
            from: osc.into(),
            to: gain.into(),
        });
        graph.apply(Command::Start { id: osc, at: 0.0 });

        let mut out = vec![0.0f32; 16];
        graph.render(&mut out);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn release_decays_and_frees_nodes() {
        let mut graph = RenderGraph::new(SAMPLE_RATE);
        let (osc, gain) = voice(&mut graph, 0, 0.2);
        graph.apply(Command::Start { id: osc, at: 0.0 });

        let mut out = vec![0.0f32; 100];
        graph.render(&mut out);

        let release_end = graph.time() + 0.3;
        graph.apply(Command::RampGain {
            id: gain,
            target: 0.0001,
            at: release_end,
        });
        graph.apply(Command::Stop {
            id: osc,
            at: release_end,
        });

        let mut decay = vec![0.0f32; 310];
        graph.render(&mut decay);
        assert!(decay[0].abs() > decay[299].abs());
        assert!(decay[299].abs() < 0.001);
        assert!(decay[301..].iter().all(|&s| s == 0.0));
        assert!(graph.is_empty());

        graph.render(&mut out);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn frequency_changes_apply_immediately() {
        let mut graph = RenderGraph::new(SAMPLE_RATE);
        let (osc, _) = voice(&mut graph, 0, 1.0);
        graph.apply(Command::Start { id: osc, at: 0.0 });
        graph.apply(Command::SetFrequency {
            id: osc,
            frequency: 25.0,
        });

        assert_eq!(graph.frequency_of(osc), Some(25.0));
    }

    #[test]
    fn commands_for_missing_nodes_are_ignored() {
        let mut graph = RenderGraph::new(SAMPLE_RATE);
        graph.apply(Command::SetFrequency {
            id: OscillatorId::new(3),
            frequency: 100.0,
        });
        graph.apply(Command::Stop {
            id: OscillatorId::new(3),
            at: 0.0,
        });
        graph.apply(Command::RampGain {
            id: GainId::new(3),
            target: 0.1,
            at: 1.0,
        });
        assert!(graph.is_empty());
    }

    #[test]
    fn overlapping_voices_sum() {
        let mut graph = RenderGraph::new(SAMPLE_RATE);
        let (a, _) = voice(&mut graph, 0, 0.2);
        let (b, _) = voice(&mut graph, 1, 0.2);
        graph.apply(Command::Start { id: a, at: 0.0 });
        graph.apply(Command::Start { id: b, at: 0.0 });

        let mut out = vec![0.0f32; 10];
        graph.render(&mut out);
        assert!((out[0] - 0.4).abs() < 1e-6);
    }
}
