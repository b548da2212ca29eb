use crate::errors::PolicyError;

use rand_distr::Beta;
use serde::Serialize;
use tracing::warn;

#[derive(Clone, Debug, Default)]
pub struct BernoulliArm {
    pub(super) pulls: u64,
    pub(super) successes: u64,
}

impl BernoulliArm {
    pub fn pulls(&self) -> u64 {
        self.pulls
    }

    pub fn successes(&self) -> u64 {
        self.successes
    }

    pub fn mean(&self) -> Option<f64> {
        (self.pulls > 0).then(|| self.successes as f64 / self.pulls as f64)
    }

    // Beta-Bernoulli posterior under a uniform prior
    pub fn posterior(&self) -> Result<Beta<f64>, PolicyError> {
        Beta::new(
            self.successes as f64 + 1.0,
            (self.pulls - self.successes) as f64 + 1.0,
        )
        .map_err(|e| PolicyError::SamplingError(e.to_string()))
    }

    fn record(&mut self, success: bool) {
        self.pulls += 1;
        self.successes += u64::from(success);
    }

    fn stats(&self) -> ArmStats {
        ArmStats {
            pulls: self.pulls,
            successes: self.successes,
            mean_reward: self.mean(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ArmStats {
    pub pulls: u64,
    pub successes: u64,
    pub mean_reward: Option<f64>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PolicyStats {
    pub horizon: u64,
    pub total_pulls: u64,
    pub arms: Vec<ArmStats>,
}

/// Per-arm statistics shared by every policy, indexed by arm id.
#[derive(Clone, Debug)]
pub struct Arms {
    arms: Vec<BernoulliArm>,
    horizon: u64,
}

impl Arms {
    pub fn new(num_arms: usize, horizon: u64) -> Result<Self, PolicyError> {
        if num_arms == 0 {
            return Err(PolicyError::NoArmsAvailable);
        }

        Ok(Self {
            arms: vec![BernoulliArm::default(); num_arms],
            horizon,
        })
    }

    pub fn len(&self) -> usize {
        self.arms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }

    pub fn total_pulls(&self) -> u64 {
        self.arms.iter().map(|arm| arm.pulls).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BernoulliArm> {
        self.arms.iter()
    }

    pub fn get(&self, arm_id: usize) -> Result<&BernoulliArm, PolicyError> {
        self.arms.get(arm_id).ok_or(PolicyError::ArmNotFound(arm_id))
    }

    pub fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError> {
        let result = is_success(reward).and_then(|success| {
            self.arms
                .get_mut(arm_id)
                .ok_or(PolicyError::ArmNotFound(arm_id))
                .map(|arm| arm.record(success))
        });

        if let Err(err) = &result {
            warn!(arm_id, reward, error = %err, "Rejected update");
        }
        result
    }

    pub fn update_many(&mut self, arm_id: usize, rewards: &[f64]) -> Result<(), PolicyError> {
        let outcomes = rewards
            .iter()
            .map(|&reward| is_success(reward))
            .collect::<Result<Vec<bool>, _>>()?;

        let arm = self
            .arms
            .get_mut(arm_id)
            .ok_or(PolicyError::ArmNotFound(arm_id))?;
        outcomes.into_iter().for_each(|success| arm.record(success));

        Ok(())
    }

    pub fn stats(&self) -> PolicyStats {
        PolicyStats {
            horizon: self.horizon,
            total_pulls: self.total_pulls(),
            arms: self.arms.iter().map(|arm| arm.stats()).collect(),
        }
    }

    #[cfg(test)]
    pub(super) fn get_mut(&mut self, arm_id: usize) -> &mut BernoulliArm {
        &mut self.arms[arm_id]
    }
}

pub(crate) fn is_success(reward: f64) -> Result<bool, PolicyError> {
    if reward == 1.0 {
        Ok(true)
    } else if reward == 0.0 {
        Ok(false)
    } else {
        Err(PolicyError::InvalidReward(reward))
    }
}
