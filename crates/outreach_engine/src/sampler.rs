use outreach_core::Outcome;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Probability that a simulated submission is recorded as a success.
pub const SUCCESS_PROBABILITY: f64 = 0.9;

/// Decides the simulated outcome for one target.
pub trait OutcomeSampler: Send {
    fn sample(&mut self) -> Outcome;
}

impl<F> OutcomeSampler for F
where
    F: FnMut() -> Outcome + Send,
{
    fn sample(&mut self) -> Outcome {
        self()
    }
}

/// Weighted coin: success with `success_probability`, fail otherwise.
#[derive(Debug, Clone)]
pub struct RandomSampler {
    rng: StdRng,
    success_probability: f64,
}

impl RandomSampler {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Reproducible draws for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Clamped to `0.0..=1.0`; NaN keeps the default rate.
    pub fn with_probability(mut self, success_probability: f64) -> Self {
        self.success_probability = if success_probability.is_nan() {
            SUCCESS_PROBABILITY
        } else {
            success_probability.clamp(0.0, 1.0)
        };
        self
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            success_probability: SUCCESS_PROBABILITY,
        }
    }
}

impl Default for RandomSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl OutcomeSampler for RandomSampler {
    fn sample(&mut self) -> Outcome {
        if self.rng.random_bool(self.success_probability) {
            Outcome::Success
        } else {
            Outcome::Fail
        }
    }
}
