//! Duration and repeat-delay gating over a continuous emission process
//!
//! The scheduler alternates between emitting and waiting to repeat. Time is
//! the caller's simulation clock in seconds. Without an [`EmissionSchedule`]
//! the wrapper is a pass-through.

use crate::emitter::EmissionSchedule;
use crate::rand::ParticleRng;
use cinder_core::Result;

/// A process that spawns particles over time and simulates the live ones
pub trait ContinuousEmission {
    /// Spawn whatever is due for a step of `dt` seconds
    fn emit(&mut self, dt: f32, rng: &mut ParticleRng) -> Result<()>;

    /// Simulate live particles for `dt` seconds
    fn advance(&mut self, dt: f32, rng: &mut ParticleRng) -> Result<()>;
}

pub struct TimedEmitter<E> {
    inner: E,
    schedule: Option<EmissionSchedule>,
    expire_at: Option<f64>,
    repeat_at: Option<f64>,
    emitting: bool,
    timescale: f32,
}

impl<E: ContinuousEmission> TimedEmitter<E> {
    pub fn new(inner: E, schedule: Option<EmissionSchedule>) -> Self {
        Self {
            inner,
            schedule,
            expire_at: None,
            repeat_at: None,
            emitting: true,
            timescale: 1.0,
        }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut E {
        &mut self.inner
    }

    pub fn is_emitting(&self) -> bool {
        self.emitting
    }

    pub fn expire_at(&self) -> Option<f64> {
        self.expire_at
    }

    pub fn repeat_at(&self) -> Option<f64> {
        self.repeat_at
    }

    pub fn timescale(&self) -> f32 {
        self.timescale
    }

    /// Scale applied to both the step size and new schedule deadlines.
    /// Zero freezes the schedule.
    pub fn set_timescale(&mut self, timescale: f32) {
        self.timescale = timescale;
    }

    /// Run one step at simulation time `now`
    pub fn tick(&mut self, now: f64, dt: f32, rng: &mut ParticleRng) -> Result<()> {
        self.update_schedule(now, rng);
        let scaled = dt * self.timescale;
        if self.emitting {
            self.inner.emit(scaled, rng)?;
        }
        self.inner.advance(scaled, rng)
    }

    fn update_schedule(&mut self, now: f64, rng: &mut ParticleRng) {
        let Some(schedule) = self.schedule else {
            return;
        };
        let passed = |deadline: Option<f64>| deadline.is_some_and(|t| now > t);
        if !self.emitting && passed(self.repeat_at) {
            self.repeat_at = None;
            self.expire_at = self.deadline(now, schedule.duration_min, schedule.duration_max, rng);
            self.emitting = true;
            log::debug!("Emission resumed at {now:.2}s");
        } else if self.emitting && passed(self.expire_at) {
            if schedule.repeat_delay_min > 0.0 || schedule.repeat_delay_max > 0.0 {
                self.repeat_at = self.deadline(
                    now,
                    schedule.repeat_delay_min,
                    schedule.repeat_delay_max,
                    rng,
                );
            }
            self.emitting = false;
            log::debug!("Emission expired at {now:.2}s");
        } else if self.expire_at.is_none() {
            self.expire_at = self.deadline(now, schedule.duration_min, schedule.duration_max, rng);
        }
    }

    /// `now` plus a random delay from the range, or never when time is frozen
    fn deadline(&self, now: f64, min: f32, max: f32, rng: &mut ParticleRng) -> Option<f64> {
        if self.timescale == 0.0 {
            return None;
        }
        let delay = rng.range(min, max) / self.timescale;
        Some(now + f64::from(delay))
    }
}
