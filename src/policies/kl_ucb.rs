use super::arm::{Arms, PolicyStats};
use super::policy::{argmax, Policy};

use crate::errors::PolicyError;
use crate::kl::solve_upper_bound;

use tracing::{debug, info};

#[derive(Clone, Debug)]
pub struct KlUcb {
    arms: Arms,
    c: f64,
}

impl KlUcb {
    pub fn new(num_arms: usize, horizon: u64, c: f64) -> Result<Self, PolicyError> {
        if !c.is_finite() || c < 0.0 {
            return Err(PolicyError::InvalidParameter {
                name: "c",
                value: c,
            });
        }
        let arms = Arms::new(num_arms, horizon)?;
        info!(num_arms, horizon, c, "Created KL-UCB policy");

        Ok(Self { arms, c })
    }

    // Arm to pull while some arm may still have fewer than two pulls: ascending
    // ids first, then descending ones.
    fn warm_up_arm(&self, total_count: u64) -> Option<usize> {
        let num_arms = self.arms.len() as u64;
        if total_count < num_arms {
            Some(total_count as usize)
        } else if total_count < 2 * num_arms {
            Some((2 * num_arms - 1 - total_count) as usize)
        } else {
            None
        }
    }

    fn bound(&self, arm_id: usize, total_count: u64) -> Result<f64, PolicyError> {
        let arm = self.arms.get(arm_id)?;
        let bound = match arm.mean() {
            Some(mean) => {
                let t = total_count as f64;
                let threshold = (t.ln() + self.c * t.ln().ln()) / arm.pulls() as f64;
                solve_upper_bound(mean, threshold)
            }
            None => f64::INFINITY,
        };

        Ok(bound)
    }
}

impl Policy for KlUcb {
    fn draw(&mut self) -> Result<usize, PolicyError> {
        let total_count = self.arms.total_pulls();

        if let Some(arm_id) = self.warm_up_arm(total_count) {
            debug!(arm_id, "Warm-up draw");
            return Ok(arm_id);
        }

        let bounds = (0..self.arms.len())
            .map(|arm_id| self.bound(arm_id, total_count))
            .collect::<Result<Vec<f64>, _>>()?;

        argmax(bounds).ok_or(PolicyError::NoArmsAvailable)
    }

    fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError> {
        self.arms.update(arm_id, reward)
    }

    fn stats(&self) -> PolicyStats {
        self.arms.stats()
    }
}
