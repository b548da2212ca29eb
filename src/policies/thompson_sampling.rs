use super::arm::{Arms, PolicyStats};
use super::policy::{argmax, Policy};
use super::rng::MaybeSeededRng;

use crate::errors::PolicyError;

use rand_distr::Distribution;
use tracing::info;

#[derive(Clone, Debug)]
pub struct ThompsonSampling {
    arms: Arms,
    rng: MaybeSeededRng,
}

impl ThompsonSampling {
    pub fn new(num_arms: usize, horizon: u64, seed: Option<u64>) -> Result<Self, PolicyError> {
        let arms = Arms::new(num_arms, horizon)?;
        let rng = MaybeSeededRng::new(seed);
        info!(num_arms, horizon, seed = rng.seed(), "Created Thompson Sampling policy");

        Ok(Self { arms, rng })
    }
}

impl Policy for ThompsonSampling {
    fn draw(&mut self) -> Result<usize, PolicyError> {
        let rng = self.rng.get_rng();

        // sample from the beta posterior of each arm and select the arm with the best statistic
        let samples = self
            .arms
            .iter()
            .map(|arm| arm.posterior().map(|posterior| posterior.sample(rng)))
            .collect::<Result<Vec<f64>, _>>()?;

        argmax(samples).ok_or(PolicyError::NoArmsAvailable)
    }

    fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError> {
        self.arms.update(arm_id, reward)
    }

    fn stats(&self) -> PolicyStats {
        self.arms.stats()
    }
}
