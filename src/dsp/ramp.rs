/*
Gain Automation
===============

A voice's gain is a single scheduled parameter. It supports exactly the two
operations the keyboard needs:

  set_now(value)                         Jump to value, cancelling any
                                         pending ramp.
  ramp_exponential(target, now, end)     Glide from the level at now to
                                         target, arriving at end.

Why Exponential?
----------------

Loudness is perceived logarithmically. A linear fade from 0.2 to 0 sounds
like it holds and then suddenly vanishes; an exponential fade loses the same
number of decibels every millisecond and sounds like a natural decay.

    value(t) = v0 × (v1 / v0) ^ ((t - t0) / (t1 - t0))

  t0, v0   where the ramp starts (the moment it was scheduled)
  t1, v1   where it must arrive

Example: 0.2 → 0.0001 over 0.3 s. The ratio is 1/2000 ≈ -66 dB, so the level
drops about 0.22 dB per millisecond.

    Level
    0.2 ┐╲
        │ ╲
        │  ╲_
        │    ╲__
    0.0 └───────╲_____──→ Time
        t0           t1

The Zero Problem
----------------

The curve is undefined when either end is zero (or the ends have opposite
signs): (0 / v0)^x is 0 for every x > 0, and (v1 / 0) blows up. That is why
releases aim at a small floor like 0.0001 instead of 0.0. When a ramp is
scheduled with an invalid endpoint anyway we hold the start value and jump to
the target at t1, which is what browsers do for the same case.
*/

#[derive(Debug, Clone, Copy, PartialEq)]
struct Ramp {
    from_value: f32,
    from_time: f64,
    to_value: f32,
    to_time: f64,
}

impl Ramp {
    fn is_exponential(&self) -> bool {
        self.from_value * self.to_value > 0.0
    }

    fn value_at(&self, time: f64) -> f32 {
        if time >= self.to_time {
            return self.to_value;
        }
        if time <= self.from_time {
            return self.from_value;
        }
        if !self.is_exponential() {
            return self.from_value;
        }

        let progress = ((time - self.from_time) / (self.to_time - self.from_time)) as f32;
        self.from_value * (self.to_value / self.from_value).powf(progress)
    }
}

/// Scheduled gain level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainParam {
    value: f32,
    ramp: Option<Ramp>,
}

impl GainParam {
    pub fn new(value: f32) -> Self {
        Self { value, ramp: None }
    }

    /// Jump to `value` immediately.
    pub fn set_now(&mut self, value: f32) {
        self.value = value;
        self.ramp = None;
    }

    /// Ramp from the level at `now` to `target`, arriving at `end_time`.
    ///
    /// An `end_time` at or before `now` takes effect immediately.
    pub fn ramp_exponential(&mut self, target: f32, now: f64, end_time: f64) {
        let current = self.value_at(now);
        if end_time <= now {
            self.set_now(target);
            return;
        }

        self.value = current;
        self.ramp = Some(Ramp {
            from_value: current,
            from_time: now,
            to_value: target,
            to_time: end_time,
        });
    }

    /// Level at `time`.
    #[inline]
    pub fn value_at(&self, time: f64) -> f32 {
        match &self.ramp {
            Some(ramp) => ramp.value_at(time),
            None => self.value,
        }
    }

    /// Fold a finished ramp into the held value once `time` has passed it.
    pub fn settle(&mut self, time: f64) {
        if let Some(ramp) = self.ramp {
            if time >= ramp.to_time {
                self.value = ramp.to_value;
                self.ramp = None;
            }
        }
    }

    pub fn is_ramping(&self) -> bool {
        self.ramp.is_some()
    }
}
