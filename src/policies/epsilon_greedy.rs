use super::arm::{Arms, PolicyStats};
use super::policy::{argmax, Policy};
use super::rng::MaybeSeededRng;

use crate::errors::PolicyError;

use rand::Rng;
use tracing::info;

#[derive(Clone, Debug)]
pub struct EpsilonGreedy {
    arms: Arms,
    epsilon: f64,
    rng: MaybeSeededRng,
}

impl EpsilonGreedy {
    pub fn new(
        num_arms: usize,
        horizon: u64,
        epsilon: f64,
        seed: Option<u64>,
    ) -> Result<Self, PolicyError> {
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(PolicyError::InvalidParameter {
                name: "epsilon",
                value: epsilon,
            });
        }
        let arms = Arms::new(num_arms, horizon)?;
        let rng = MaybeSeededRng::new(seed);
        info!(
            num_arms,
            horizon,
            epsilon,
            seed = rng.seed(),
            "Created epsilon-greedy policy"
        );

        Ok(Self { arms, epsilon, rng })
    }
}

impl Policy for EpsilonGreedy {
    fn draw(&mut self) -> Result<usize, PolicyError> {
        let rng = self.rng.get_rng();
        if rng.random::<f64>() < self.epsilon {
            Ok(rng.random_range(0..self.arms.len()))
        } else {
            argmax(self.arms.iter().map(|arm| arm.mean().unwrap_or_default()))
                .ok_or(PolicyError::NoArmsAvailable)
        }
    }

    fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError> {
        self.arms.update(arm_id, reward)
    }

    fn stats(&self) -> PolicyStats {
        self.arms.stats()
    }
}
