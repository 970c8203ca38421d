//! Affectors that spin or grow particles

use crate::particle::Particle;
use crate::rand::ParticleRng;
use cinder_core::tokens::{self, AttributeWriter};
use cinder_core::Result;

/// Random spin speed and start angle per particle. Ranges are in degrees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rotator {
    pub speed_range_start: f32,
    pub speed_range_end: f32,
    pub range_start: f32,
    pub range_end: f32,
}

impl Rotator {
    pub(crate) fn parse(&mut self, args: &[&str], line: usize) -> Result<bool> {
        let slot = match args[0] {
            "rotation_speed_range_start" => &mut self.speed_range_start,
            "rotation_speed_range_end" => &mut self.speed_range_end,
            "rotation_range_start" => &mut self.range_start,
            "rotation_range_end" => &mut self.range_end,
            _ => return Ok(false),
        };
        *slot = tokens::single_f32(args, line)?;
        Ok(true)
    }

    pub(crate) fn write(&self, w: &mut AttributeWriter) {
        w.float("rotation_speed_range_start", self.speed_range_start);
        w.float("rotation_speed_range_end", self.speed_range_end);
        w.float("rotation_range_start", self.range_start);
        w.float("rotation_range_end", self.range_end);
    }

    pub(crate) fn initialize(&self, p: &mut Particle, rng: &mut ParticleRng) {
        let speed = rng.range(self.speed_range_start, self.speed_range_end);
        let angle = rng.range(self.range_start, self.range_end);
        p.rotation_speed = speed.to_radians();
        p.angle = angle.to_radians();
    }

    pub(crate) fn update(&self, p: &mut Particle, dt: f32) {
        p.angle += dt * p.rotation_speed;
    }
}

/// Grows particle billboards at a constant rate
#[derive(Debug, Clone, PartialEq)]
pub struct Scaler {
    pub rate: f32,
}

impl Default for Scaler {
    fn default() -> Self {
        Self { rate: 1.0 }
    }
}

impl Scaler {
    pub(crate) fn parse(&mut self, args: &[&str], line: usize) -> Result<bool> {
        if args[0] != "rate" {
            return Ok(false);
        }
        self.rate = tokens::single_f32(args, line)?;
        Ok(true)
    }

    pub(crate) fn write(&self, w: &mut AttributeWriter) {
        w.float("rate", self.rate);
    }

    pub(crate) fn update(&self, p: &mut Particle, dt: f32) {
        // Half rate, matching the halved spawn size
        let ds = self.rate * dt / 2.0;
        p.size.x += ds;
        p.size.y += ds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotator_converts_degrees_at_spawn() {
        let rotator = Rotator {
            speed_range_start: 90.0,
            speed_range_end: 90.0,
            range_start: 180.0,
            range_end: 180.0,
        };
        let mut p = Particle::with_life(1.0);
        rotator.initialize(&mut p, &mut ParticleRng::new(1));
        assert!((p.rotation_speed - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        assert!((p.angle - std::f32::consts::PI).abs() < 1e-5);

        rotator.update(&mut p, 2.0);
        assert!((p.angle - 2.0 * std::f32::consts::PI).abs() < 1e-4);
    }

    #[test]
    fn rotator_picks_within_ranges() {
        let rotator = Rotator {
            speed_range_start: 10.0,
            speed_range_end: 20.0,
            range_start: 0.0,
            range_end: 45.0,
        };
        let mut rng = ParticleRng::new(8);
        let mut p = Particle::with_life(1.0);
        for _ in 0..100 {
            rotator.initialize(&mut p, &mut rng);
            let speed = p.rotation_speed.to_degrees();
            assert!((10.0 - 1e-3..=20.0 + 1e-3).contains(&speed));
            assert!(p.angle.to_degrees() <= 45.0 + 1e-3);
        }
    }

    #[test]
    fn scaler_grows_by_half_rate() {
        let scaler = Scaler { rate: 10.0 };
        let mut p = Particle::with_life(1.0);
        p.size.z = 7.0;
        scaler.update(&mut p, 1.0);
        assert_eq!((p.size.x, p.size.y, p.size.z), (6.0, 6.0, 7.0));
    }
}
