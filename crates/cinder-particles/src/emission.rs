//! Reference continuous emission: a fixed-rate spawner over a particle pool

use crate::influencer::ParticleInfluencer;
use crate::particle::ParticlePool;
use crate::rand::ParticleRng;
use crate::timed::ContinuousEmission;
use cinder_core::{Result, Vec3};

pub struct RateEmission {
    pool: ParticlePool,
    influencers: Vec<Box<dyn ParticleInfluencer>>,
    /// Particles per second
    pub rate: f32,
    pub life_min: f32,
    pub life_max: f32,
    /// Emitter origin; particle positions are relative to it
    pub origin: Vec3,
    accumulator: f32,
}

impl RateEmission {
    pub fn new(
        capacity: usize,
        rate: f32,
        life_min: f32,
        life_max: f32,
        influencers: Vec<Box<dyn ParticleInfluencer>>,
    ) -> Self {
        Self {
            pool: ParticlePool::new(capacity),
            influencers,
            rate,
            life_min,
            life_max,
            origin: Vec3::ZERO,
            accumulator: 0.0,
        }
    }

    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn alive_count(&self) -> usize {
        self.pool.alive_count()
    }

    pub fn influencers(&self) -> &[Box<dyn ParticleInfluencer>] {
        &self.influencers
    }
}

impl ContinuousEmission for RateEmission {
    fn emit(&mut self, dt: f32, rng: &mut ParticleRng) -> Result<()> {
        self.accumulator += self.rate * dt;
        let spawn_count = self.accumulator as u32;
        self.accumulator -= spawn_count as f32;

        for _ in 0..spawn_count {
            // Pool full, drop the rest of this step's spawns
            let Some(p) = self.pool.spawn() else {
                break;
            };
            p.initial_position = self.origin;
            let life = rng.range(self.life_min, self.life_max);
            p.life = life;
            p.start_life = life;
            for influencer in &self.influencers {
                influencer.initialize(p, rng)?;
            }
        }
        Ok(())
    }

    fn advance(&mut self, dt: f32, rng: &mut ParticleRng) -> Result<()> {
        for p in self.pool.live_mut() {
            p.life -= dt;
            if p.life <= 0.0 {
                p.alive = false;
                for influencer in &self.influencers {
                    influencer.reset(p)?;
                }
                continue;
            }
            for influencer in &self.influencers {
                influencer.update(p, dt, rng)?;
            }
            p.position += p.velocity * dt;
        }
        self.pool.sweep();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affector::{Affector, Scaler};
    use crate::influencer::DirectionVelocity;
    use crate::particle::Particle;

    #[test]
    fn accumulator_spawns_fractional_rate() {
        let mut emission = RateEmission::new(100, 10.0, 5.0, 5.0, Vec::new());
        let mut rng = ParticleRng::new(1);
        for _ in 0..10 {
            emission.emit(0.05, &mut rng).unwrap();
        }
        // 10 particles/s over 0.5s
        assert_eq!(emission.alive_count(), 5);
    }

    #[test]
    fn quota_caps_live_particles() {
        let mut emission = RateEmission::new(3, 100.0, 5.0, 5.0, Vec::new());
        let mut rng = ParticleRng::new(1);
        emission.emit(1.0, &mut rng).unwrap();
        assert_eq!(emission.alive_count(), 3);
    }

    #[test]
    fn particles_move_and_expire() {
        let influencers: Vec<Box<dyn ParticleInfluencer>> = vec![Box::new(DirectionVelocity {
            direction: Vec3::UNIT_Y,
            velocity_min: 2.0,
            velocity_max: 2.0,
        })];
        let mut emission = RateEmission::new(10, 1.0, 1.0, 1.0, influencers)
            .with_origin(Vec3::new(0.0, 0.0, 5.0));
        let mut rng = ParticleRng::new(1);
        emission.emit(1.0, &mut rng).unwrap();
        emission.advance(0.5, &mut rng).unwrap();

        let p: &Particle = &emission.pool().live()[0];
        assert!((p.position.y - 1.0).abs() < 1e-6);
        assert_eq!(p.initial_position, Vec3::new(0.0, 0.0, 5.0));
        assert!((p.alive_fraction() - 0.5).abs() < 1e-6);

        emission.advance(0.6, &mut rng).unwrap();
        assert_eq!(emission.alive_count(), 0);
    }

    #[test]
    fn affectors_run_each_frame() {
        let influencers: Vec<Box<dyn ParticleInfluencer>> =
            vec![Box::new(Affector::Scaler(Scaler { rate: 2.0 }))];
        let mut emission = RateEmission::new(1, 1.0, 10.0, 10.0, influencers);
        let mut rng = ParticleRng::new(1);
        emission.emit(1.0, &mut rng).unwrap();
        emission.advance(1.0, &mut rng).unwrap();
        assert_eq!(emission.pool().live()[0].size.x, 2.0);
    }
}
