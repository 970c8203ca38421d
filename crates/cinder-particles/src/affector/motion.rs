//! Affectors that change particle velocity

use crate::particle::Particle;
use crate::rand::ParticleRng;
use cinder_core::tokens::{self, AttributeWriter};
use cinder_core::{CinderError, Result, Vec3};
use std::fmt;

/// Bounces particles off a plane given by a point and a normal
#[derive(Debug, Clone, PartialEq)]
pub struct DeflectorPlane {
    pub plane_point: Vec3,
    pub plane_normal: Vec3,
    pub bounce: f32,
}

impl Default for DeflectorPlane {
    fn default() -> Self {
        Self {
            plane_point: Vec3::ZERO,
            plane_normal: Vec3::UNIT_Y,
            bounce: 1.0,
        }
    }
}

impl DeflectorPlane {
    pub(crate) fn parse(&mut self, args: &[&str], line: usize) -> Result<bool> {
        match args[0] {
            "plane_point" => self.plane_point = tokens::parse_vec3(args, line)?,
            "plane_normal" => self.plane_normal = tokens::parse_vec3(args, line)?,
            "bounce" => self.bounce = tokens::single_f32(args, line)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    pub(crate) fn write(&self, w: &mut AttributeWriter) {
        w.vec3("plane_point", &self.plane_point);
        w.vec3("plane_normal", &self.plane_normal);
        w.float("bounce", self.bounce);
    }

    pub(crate) fn update(&self, p: &mut Particle, dt: f32) {
        let normal = self.plane_normal;
        let plane_distance = -normal.dot(&self.plane_point) / normal.dot(&normal).sqrt();
        let step = p.velocity * dt;
        // Plane test runs in emitter space
        let mut abs_pos = p.position + p.initial_position;
        if normal.dot(&(abs_pos + step)) + plane_distance > 0.0 {
            return;
        }
        let a = normal.dot(&abs_pos) + plane_distance;
        if a <= 0.0 {
            return;
        }
        let to_plane = step * (-a / step.dot(&normal));
        abs_pos = abs_pos + to_plane + (to_plane - step) * self.bounce;
        p.velocity = (p.velocity - normal * (p.velocity.dot(&normal) * 2.0)) * self.bounce;
        p.position = abs_pos - p.initial_position;
    }
}

/// Randomly perturbs particle velocity
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectionRandomiser {
    pub randomness: f32,
    /// Chance per frame that a particle is perturbed
    pub scope: f32,
    pub keep_velocity: bool,
}

impl DirectionRandomiser {
    pub(crate) fn parse(&mut self, args: &[&str], line: usize) -> Result<bool> {
        match args[0] {
            "randomness" => self.randomness = tokens::single_f32(args, line)?,
            "scope" => self.scope = tokens::single_f32(args, line)?,
            "keep_velocity" => self.keep_velocity = tokens::single_bool(args, line)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    pub(crate) fn write(&self, w: &mut AttributeWriter) {
        w.float("scope", self.scope);
        w.float("randomness", self.randomness);
        w.flag("keep_velocity", self.keep_velocity);
    }

    pub(crate) fn update(&self, p: &mut Particle, dt: f32, rng: &mut ParticleRng) {
        if self.scope <= rng.next_f32() || p.velocity == Vec3::ZERO {
            return;
        }
        let speed = p.velocity.length();
        let jitter = Vec3::new(
            rng.spread(self.randomness) * dt,
            rng.spread(self.randomness) * dt,
            rng.spread(self.randomness) * dt,
        );
        p.velocity += jitter;
        if self.keep_velocity {
            let length = p.velocity.length();
            if length > 0.0 {
                p.velocity = p.velocity * (speed / length);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ForceApplication {
    #[default]
    Add,
    Average,
}

impl ForceApplication {
    pub fn parse(value: &str, line: usize) -> Result<Self> {
        match value {
            "add" => Ok(ForceApplication::Add),
            "average" => Ok(ForceApplication::Average),
            other => Err(CinderError::structural(
                line,
                format!("Expected value of average or add, found '{other}'"),
            )),
        }
    }
}

impl fmt::Display for ForceApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ForceApplication::Add => "add",
            ForceApplication::Average => "average",
        })
    }
}

/// Applies a constant force, or pulls velocity halfway towards it
#[derive(Debug, Clone, PartialEq)]
pub struct LinearForce {
    pub force: Vec3,
    pub application: ForceApplication,
}

impl Default for LinearForce {
    fn default() -> Self {
        Self {
            force: Vec3::new(0.0, -100.0, 0.0),
            application: ForceApplication::Add,
        }
    }
}

impl LinearForce {
    pub(crate) fn parse(&mut self, args: &[&str], line: usize) -> Result<bool> {
        match args[0] {
            "force_vector" => self.force = tokens::parse_vec3(args, line)?,
            "force_application" => {
                self.application = ForceApplication::parse(tokens::single(args, line)?, line)?
            }
            _ => return Ok(false),
        }
        Ok(true)
    }

    pub(crate) fn write(&self, w: &mut AttributeWriter) {
        w.vec3("force_vector", &self.force);
        w.line("force_application", self.application);
    }

    pub(crate) fn update(&self, p: &mut Particle, dt: f32) {
        p.velocity = match self.application {
            ForceApplication::Add => p.velocity + self.force * dt,
            ForceApplication::Average => (p.velocity + self.force) / 2.0,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deflector_reflects_crossing_particle() {
        let plane = DeflectorPlane::default();
        let mut p = Particle::with_life(1.0);
        p.position = Vec3::new(0.0, 0.5, 0.0);
        p.velocity = Vec3::new(0.0, -1.0, 0.0);
        plane.update(&mut p, 1.0);
        assert!((p.velocity.y - 1.0).abs() < 1e-5);
        assert!(p.position.y >= 0.0);
        assert!((p.position.y - 0.5).abs() < 1e-5);
    }

    #[test]
    fn deflector_ignores_particle_staying_above() {
        let plane = DeflectorPlane::default();
        let mut p = Particle::with_life(1.0);
        p.position = Vec3::new(0.0, 5.0, 0.0);
        p.velocity = Vec3::new(0.0, -1.0, 0.0);
        plane.update(&mut p, 1.0);
        assert_eq!(p.velocity, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(p.position.y, 5.0);
    }

    #[test]
    fn deflector_uses_emitter_space() {
        let plane = DeflectorPlane::default();
        let mut p = Particle::with_life(1.0);
        // Absolute height 10.5 keeps it well above the plane
        p.initial_position = Vec3::new(0.0, 10.0, 0.0);
        p.position = Vec3::new(0.0, 0.5, 0.0);
        p.velocity = Vec3::new(0.0, -1.0, 0.0);
        plane.update(&mut p, 1.0);
        assert_eq!(p.velocity.y, -1.0);
    }

    #[test]
    fn randomiser_keeps_speed() {
        let randomiser = DirectionRandomiser {
            randomness: 50.0,
            scope: 1.0,
            keep_velocity: true,
        };
        let mut rng = ParticleRng::new(99);
        let mut p = Particle::with_life(1.0);
        p.velocity = Vec3::new(3.0, 0.0, 4.0);
        for _ in 0..20 {
            randomiser.update(&mut p, 0.1, &mut rng);
            assert!((p.velocity.length() - 5.0).abs() < 1e-3);
        }
    }

    #[test]
    fn randomiser_with_zero_scope_does_nothing() {
        let randomiser = DirectionRandomiser {
            randomness: 50.0,
            scope: 0.0,
            keep_velocity: false,
        };
        let mut rng = ParticleRng::new(99);
        let mut p = Particle::with_life(1.0);
        p.velocity = Vec3::UNIT_X;
        randomiser.update(&mut p, 1.0, &mut rng);
        assert_eq!(p.velocity, Vec3::UNIT_X);
    }

    #[test]
    fn linear_force_modes() {
        let mut p = Particle::with_life(1.0);
        p.velocity = Vec3::new(2.0, 0.0, 0.0);
        let add = LinearForce::default();
        add.update(&mut p, 0.5);
        assert_eq!(p.velocity, Vec3::new(2.0, -50.0, 0.0));

        let average = LinearForce {
            force: Vec3::new(0.0, 4.0, 0.0),
            application: ForceApplication::Average,
        };
        p.velocity = Vec3::new(2.0, 0.0, 0.0);
        average.update(&mut p, 0.5);
        assert_eq!(p.velocity, Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn bad_force_application_is_structural() {
        let mut force = LinearForce::default();
        let err = force.parse(&["force_application", "sum"], 4).unwrap_err();
        assert!(matches!(err, CinderError::Structural { line: 4, .. }));
        assert!(force.parse(&["force_application", "average"], 5).unwrap());
        assert_eq!(force.application, ForceApplication::Average);
    }
}
