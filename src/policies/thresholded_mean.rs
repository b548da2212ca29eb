use super::arm::{Arms, PolicyStats};
use super::policy::Policy;
use super::rng::MaybeSeededRng;

use crate::errors::PolicyError;

use rand::Rng;
use tracing::{debug, info};

/// Heuristic for problems with about as many arms as pulls: commit to the first
/// arm whose empirical mean reaches `threshold`, otherwise explore uniformly.
#[derive(Clone, Debug)]
pub struct ThresholdedMean {
    arms: Arms,
    threshold: f64,
    rng: MaybeSeededRng,
}

impl ThresholdedMean {
    pub fn new(
        num_arms: usize,
        horizon: u64,
        threshold: f64,
        seed: Option<u64>,
    ) -> Result<Self, PolicyError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(PolicyError::InvalidParameter {
                name: "threshold",
                value: threshold,
            });
        }
        let arms = Arms::new(num_arms, horizon)?;
        let rng = MaybeSeededRng::new(seed);
        info!(
            num_arms,
            horizon,
            threshold,
            seed = rng.seed(),
            "Created thresholded mean policy"
        );

        Ok(Self {
            arms,
            threshold,
            rng,
        })
    }

    fn random_arm(&mut self) -> usize {
        self.rng.get_rng().random_range(0..self.arms.len())
    }
}

impl Policy for ThresholdedMean {
    fn draw(&mut self) -> Result<usize, PolicyError> {
        if self.arms.total_pulls() == 0 {
            return Ok(self.random_arm());
        }

        // first good enough arm in index order, not the best one
        let committed = self
            .arms
            .iter()
            .position(|arm| arm.mean().is_some_and(|mean| mean >= self.threshold));

        match committed {
            Some(arm_id) => {
                debug!(arm_id, "Committed draw");
                Ok(arm_id)
            }
            None => Ok(self.random_arm()),
        }
    }

    fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError> {
        self.arms.update(arm_id, reward)
    }

    fn stats(&self) -> PolicyStats {
        self.arms.stats()
    }
}
