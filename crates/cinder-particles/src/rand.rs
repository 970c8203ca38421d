//! Lightweight xorshift32 PRNG, seedable and dependency free

pub struct ParticleRng {
    state: u32,
}

impl ParticleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        // 24 high bits keep the result strictly below 1.0
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns a float between `min` and `max`. Inverted ranges are allowed.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Returns a float in [-amount, amount)
    pub fn spread(&mut self, amount: f32) -> f32 {
        self.next_f32() * amount * 2.0 - amount
    }
}

impl Default for ParticleRng {
    fn default() -> Self {
        Self::new(0xDEAD_BEEF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_range_bounds() {
        let mut rng = ParticleRng::new(42);
        for _ in 0..1000 {
            let v = rng.range(0.0, 10.0);
            assert!((0.0..10.0).contains(&v));
        }
    }

    #[test]
    fn rng_spread_is_symmetric_range() {
        let mut rng = ParticleRng::new(7);
        for _ in 0..1000 {
            let v = rng.spread(2.0);
            assert!((-2.0..2.0).contains(&v));
        }
    }

    #[test]
    fn inverted_range_stays_between_bounds() {
        let mut rng = ParticleRng::new(9);
        for _ in 0..100 {
            let v = rng.range(5.0, 1.0);
            assert!(v <= 5.0 && v > 1.0);
        }
    }
}
