//! Particle state handed to influencers, and the pool that owns it

use cinder_core::{Color, Vec3};

/// Per-particle simulation state
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Offset from `initial_position`
    pub position: Vec3,
    /// Emitter origin at spawn
    pub initial_position: Vec3,
    pub velocity: Vec3,
    /// Billboard size; only x and y are used
    pub size: Vec3,
    pub color: Color,
    /// Roll angle in radians
    pub angle: f32,
    /// Roll speed in radians per second
    pub rotation_speed: f32,
    /// Remaining life in seconds
    pub life: f32,
    /// Total life assigned at spawn
    pub start_life: f32,
    /// Next pixel read by a colour image affector
    pub image_cursor: usize,
    pub alive: bool,
}

impl Particle {
    pub fn dead() -> Self {
        Self {
            position: Vec3::ZERO,
            initial_position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            size: Vec3::ONE,
            color: Color::WHITE,
            angle: 0.0,
            rotation_speed: 0.0,
            life: 0.0,
            start_life: 0.0,
            image_cursor: 0,
            alive: false,
        }
    }

    /// A live particle with the given total life
    pub fn with_life(life: f32) -> Self {
        Self {
            life,
            start_life: life,
            alive: true,
            ..Self::dead()
        }
    }

    /// Fraction of total life already spent: `1 - life / start_life`
    pub fn alive_fraction(&self) -> f32 {
        if self.start_life <= 0.0 {
            1.0
        } else {
            1.0 - self.life / self.start_life
        }
    }

    /// Seconds lived so far
    pub fn alive_for(&self) -> f32 {
        self.start_life - self.life
    }
}

/// Fixed-capacity pool. Live particles occupy the front of `slots`; a sweep
/// moves dead ones past the end by swapping, so ordering is not preserved.
pub struct ParticlePool {
    slots: Vec<Particle>,
    live: usize,
}

impl ParticlePool {
    pub fn new(quota: usize) -> Self {
        Self {
            slots: vec![Particle::dead(); quota],
            live: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn alive_count(&self) -> usize {
        self.live
    }

    pub fn is_full(&self) -> bool {
        self.live == self.slots.len()
    }

    /// Claim a reset slot for a new particle, or `None` at quota
    pub fn spawn(&mut self) -> Option<&mut Particle> {
        let slot = self.slots.get_mut(self.live)?;
        *slot = Particle {
            alive: true,
            ..Particle::dead()
        };
        self.live += 1;
        Some(slot)
    }

    /// Drop every particle whose `alive` flag was cleared since the last sweep
    pub fn sweep(&mut self) {
        let mut i = 0;
        while i < self.live {
            if self.slots[i].alive {
                i += 1;
                continue;
            }
            self.live -= 1;
            self.slots.swap(i, self.live);
        }
    }

    pub fn live(&self) -> &[Particle] {
        &self.slots[..self.live]
    }

    pub fn live_mut(&mut self) -> &mut [Particle] {
        &mut self.slots[..self.live]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_spawn_and_kill() {
        let mut pool = ParticlePool::new(4);
        assert_eq!(pool.alive_count(), 0);

        for i in 0..3 {
            let p = pool.spawn().unwrap();
            p.life = 1.0;
            p.position.x = i as f32;
        }
        assert_eq!(pool.alive_count(), 3);

        // Kill the middle one
        pool.live_mut()[1].alive = false;
        pool.sweep();
        assert_eq!(pool.alive_count(), 2);
        assert!(pool.live().iter().all(|p| p.position.x != 1.0));

        // Pool full at capacity 4, spawn should fail after 4
        pool.spawn().unwrap();
        pool.spawn().unwrap();
        assert!(pool.spawn().is_none());
    }

    #[test]
    fn spawn_recycles_fresh_state() {
        let mut pool = ParticlePool::new(1);
        pool.spawn().unwrap().velocity = Vec3::ONE;
        pool.live_mut()[0].alive = false;
        pool.sweep();
        assert_eq!(pool.spawn().unwrap().velocity, Vec3::ZERO);
    }

    #[test]
    fn alive_fraction_tracks_spent_life() {
        let mut p = Particle::with_life(4.0);
        assert!(p.alive_fraction().abs() < 1e-6);
        p.life = 1.0;
        assert!((p.alive_fraction() - 0.75).abs() < 1e-6);
        assert!((p.alive_for() - 3.0).abs() < 1e-6);
    }
}
