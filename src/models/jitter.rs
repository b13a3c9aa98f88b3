//! Randomness providers for the heuristic's jitter term

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Supplies one jitter draw per prediction.
///
/// Implementations must be safe to call from many request handlers at once.
pub trait JitterSource: Send + Sync {
    /// Draw a value in `[-bound, bound]`
    fn sample(&self, bound: f64) -> f64;
}

/// Uniform draws from the calling thread's generator
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformJitter;

impl JitterSource for UniformJitter {
    fn sample(&self, bound: f64) -> f64 {
        rand::thread_rng().gen_range(-bound..=bound)
    }
}

/// Uniform draws from a single seeded generator, reproducible across runs
#[derive(Debug)]
pub struct SeededJitter {
    rng: Mutex<StdRng>,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl JitterSource for SeededJitter {
    fn sample(&self, bound: f64) -> f64 {
        // A poisoned lock only means another handler panicked mid-draw; the
        // generator state is still valid.
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        rng.gen_range(-bound..=bound)
    }
}

/// Always returns the same draw, clamped to the requested bound
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn sample(&self, bound: f64) -> f64 {
        self.0.clamp(-bound, bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_uniform_within_bound() {
        let source = UniformJitter;
        for _ in 0..10_000 {
            let draw = source.sample(0.1);
            assert!((-0.1..=0.1).contains(&draw), "draw {draw} out of range");
        }
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let a = SeededJitter::new(7);
        let b = SeededJitter::new(7);

        let first: Vec<f64> = (0..32).map(|_| a.sample(0.1)).collect();
        let second: Vec<f64> = (0..32).map(|_| b.sample(0.1)).collect();

        assert_eq!(first, second);
        assert!(first.iter().all(|d| (-0.1..=0.1).contains(d)));
    }

    #[test]
    fn test_fixed_is_clamped() {
        assert_eq!(FixedJitter(0.05).sample(0.1), 0.05);
        assert_eq!(FixedJitter(0.5).sample(0.1), 0.1);
        assert_eq!(FixedJitter(-0.5).sample(0.1), -0.1);
    }

    #[test]
    fn test_seeded_shared_across_threads() {
        let source = Arc::new(SeededJitter::new(11));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let source = Arc::clone(&source);
                thread::spawn(move || (0..2_000).map(|_| source.sample(0.1)).collect::<Vec<_>>())
            })
            .collect();

        let mut total = 0;
        for handle in handles {
            let draws = handle.join().unwrap();
            total += draws.len();
            assert!(draws.iter().all(|d| (-0.1..=0.1).contains(d)));
        }
        assert_eq!(total, 16_000);
    }

    #[test]
    fn test_uniform_shared_across_threads() {
        let source: Arc<dyn JitterSource> = Arc::new(UniformJitter);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let source = Arc::clone(&source);
                thread::spawn(move || (0..2_000).all(|_| (-0.1..=0.1).contains(&source.sample(0.1))))
            })
            .collect();

        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
