//! The per-particle simulation contract and the spawn-time initializers
//!
//! The host engine calls `initialize` once when a particle spawns, `update`
//! every frame while it lives and `reset` when it is reclaimed. Influencers
//! are immutable parameter sets; any per-particle state lives on the
//! [`Particle`] itself.

use crate::particle::Particle;
use crate::rand::ParticleRng;
use cinder_core::{Color, Result, Vec2, Vec3};
use glam::{EulerRot, Quat};

pub trait ParticleInfluencer: Send + Sync {
    fn name(&self) -> &str;

    fn initialize(&self, _particle: &mut Particle, _rng: &mut ParticleRng) -> Result<()> {
        Ok(())
    }

    fn update(&self, _particle: &mut Particle, _dt: f32, _rng: &mut ParticleRng) -> Result<()> {
        Ok(())
    }

    fn reset(&self, _particle: &mut Particle) -> Result<()> {
        Ok(())
    }
}

/// Picks a spawn colour between two colours, per channel
#[derive(Debug, Clone, PartialEq)]
pub struct InitialColour {
    pub range_start: Color,
    pub range_end: Color,
}

impl ParticleInfluencer for InitialColour {
    fn name(&self) -> &str {
        "InitialColour"
    }

    fn initialize(&self, particle: &mut Particle, rng: &mut ParticleRng) -> Result<()> {
        if self.range_start == self.range_end {
            particle.color = self.range_start;
        } else {
            let (s, e) = (self.range_start, self.range_end);
            particle.color = Color::new(
                s.r + rng.next_f32() * (e.r - s.r),
                s.g + rng.next_f32() * (e.g - s.g),
                s.b + rng.next_f32() * (e.b - s.b),
                s.a + rng.next_f32() * (e.a - s.a),
            );
        }
        Ok(())
    }
}

/// Sets the spawn billboard size to half the configured particle size
#[derive(Debug, Clone, PartialEq)]
pub struct InitialSize {
    pub size: Vec2,
}

impl ParticleInfluencer for InitialSize {
    fn name(&self) -> &str {
        "InitialSize"
    }

    fn initialize(&self, particle: &mut Particle, _rng: &mut ParticleRng) -> Result<()> {
        // Halving matches the reference renderer's apparent sizes; see Scaler
        particle.size.x = self.size.x / 2.0;
        particle.size.y = self.size.y / 2.0;
        Ok(())
    }
}

/// Sets the spawn velocity along the emitter direction
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionVelocity {
    pub direction: Vec3,
    pub velocity_min: f32,
    pub velocity_max: f32,
}

impl ParticleInfluencer for DirectionVelocity {
    fn name(&self) -> &str {
        "DirectionVelocity"
    }

    fn initialize(&self, particle: &mut Particle, rng: &mut ParticleRng) -> Result<()> {
        let speed = rng.range(self.velocity_min, self.velocity_max);
        particle.velocity = self.direction * speed;
        Ok(())
    }
}

/// Rotates the spawn velocity by a random small rotation
#[derive(Debug, Clone, PartialEq)]
pub struct AngleDeviation {
    /// Maximum deviation per Euler axis, in radians
    pub angle: f32,
}

impl AngleDeviation {
    pub fn from_degrees(degrees: f32) -> Self {
        Self {
            angle: degrees.to_radians(),
        }
    }
}

impl ParticleInfluencer for AngleDeviation {
    fn name(&self) -> &str {
        "AngleDeviation"
    }

    fn initialize(&self, particle: &mut Particle, rng: &mut ParticleRng) -> Result<()> {
        let pitch = rng.spread(self.angle);
        let yaw = rng.spread(self.angle);
        let roll = rng.spread(self.angle);
        // Applied yaw, then roll, then pitch
        let deviate = Quat::from_euler(EulerRot::YZX, yaw, roll, pitch);
        let v = deviate * glam::Vec3::from_array(particle.velocity.to_array());
        particle.velocity = Vec3::from_array(v.to_array());
        Ok(())
    }
}
