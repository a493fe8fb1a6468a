//! Command sink that keeps every call and a hand-driven clock.
//!
//! Nothing is rendered. Queries reconstruct what a real backend would be doing
//! at the current time, which is enough to assert on scheduling behaviour in
//! tests and headless runs.

use crate::backend::{Command, CommandSink, GainId, OscillatorId};

#[derive(Debug, Default)]
pub struct Recorder {
    time: f64,
    commands: Vec<Command>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    pub fn advance(&mut self, seconds: f64) {
        self.time += seconds;
    }

    pub fn oscillators_created(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::CreateOscillator { .. }))
            .count()
    }

    /// Last frequency scheduled for `id`
    pub fn frequency_of(&self, id: OscillatorId) -> Option<f64> {
        self.commands.iter().rev().find_map(|c| match *c {
            Command::SetFrequency { id: osc, frequency } if osc == id => Some(frequency),
            _ => None,
        })
    }

    /// Every frequency scheduled for `id`, oldest first
    pub fn frequency_history(&self, id: OscillatorId) -> Vec<f64> {
        self.commands
            .iter()
            .filter_map(|c| match *c {
                Command::SetFrequency { id: osc, frequency } if osc == id => Some(frequency),
                _ => None,
            })
            .collect()
    }

    pub fn stop_time(&self, id: OscillatorId) -> Option<f64> {
        self.commands.iter().rev().find_map(|c| match *c {
            Command::Stop { id: osc, at } if osc == id => Some(at),
            _ => None,
        })
    }

    /// Last `(target, at)` ramp scheduled on `id`
    pub fn last_ramp(&self, id: GainId) -> Option<(f64, f64)> {
        self.commands.iter().rev().find_map(|c| match *c {
            Command::RampGain { id: gain, target, at } if gain == id => Some((target, at)),
            _ => None,
        })
    }

    /// Last level set immediately on `id`
    pub fn gain_level(&self, id: GainId) -> Option<f64> {
        self.commands.iter().rev().find_map(|c| match *c {
            Command::SetGain { id: gain, level } if gain == id => Some(level),
            _ => None,
        })
    }

    /// Started at or before now and not yet past its stop time
    pub fn is_playing(&self, id: OscillatorId) -> bool {
        let started = self.commands.iter().any(|c| match *c {
            Command::Start { id: osc, at } => osc == id && at <= self.time,
            _ => false,
        });
        let stopped = self.stop_time(id).is_some_and(|at| at <= self.time);
        started && !stopped
    }

    pub fn playing_oscillators(&self) -> usize {
        self.commands
            .iter()
            .filter_map(|c| match *c {
                Command::CreateOscillator { id, .. } => Some(id),
                _ => None,
            })
            .filter(|&id| self.is_playing(id))
            .count()
    }
}

impl CommandSink for Recorder {
    fn send(&mut self, command: Command) {
        self.commands.push(command);
    }

    fn now(&self) -> f64 {
        self.time
    }
}
