//! Randomness behind [`RandomPort`]. Dig uses it for placeholder room names.

use rand::Rng;

use crate::infrastructure::ports::RandomPort;

/// Thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRandom;

impl RandomPort for SystemRandom {
    fn gen_range(&self, min: u32, max: u32) -> u32 {
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Always returns the wrapped value.
#[cfg(test)]
pub struct FixedRandom(pub u32);

#[cfg(test)]
impl RandomPort for FixedRandom {
    fn gen_range(&self, _min: u32, _max: u32) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_random_stays_in_range() {
        let random = SystemRandom;
        for _ in 0..200 {
            let value = random.gen_range(3, 7);
            assert!((3..=7).contains(&value));
        }
    }
}
