use super::arm::{is_success, Arms, PolicyStats};
use super::policy::{argmax, BatchDraw, BatchPolicy, BatchRewards};
use super::rng::MaybeSeededRng;

use crate::errors::PolicyError;

use rand_distr::Distribution;
use tracing::{debug, info, warn};

/// Thompson Sampling resolving `batch_size` pulls per round from a single
/// posterior snapshot.
#[derive(Clone, Debug)]
pub struct BatchedThompsonSampling {
    arms: Arms,
    batch_size: u64,
    rng: MaybeSeededRng,
}

impl BatchedThompsonSampling {
    pub fn new(
        num_arms: usize,
        horizon: u64,
        batch_size: u64,
        seed: Option<u64>,
    ) -> Result<Self, PolicyError> {
        if batch_size == 0 || horizon % batch_size != 0 {
            return Err(PolicyError::InvalidBatchSize {
                horizon,
                batch_size,
            });
        }
        let arms = Arms::new(num_arms, horizon)?;
        let rng = MaybeSeededRng::new(seed);
        info!(
            num_arms,
            horizon,
            batch_size,
            seed = rng.seed(),
            "Created batched Thompson Sampling policy"
        );

        Ok(Self {
            arms,
            batch_size,
            rng,
        })
    }

    fn validate(&self, rewards: &BatchRewards) -> Result<(), PolicyError> {
        rewards.iter().try_for_each(|(&arm_id, arm_rewards)| {
            self.arms.get(arm_id)?;
            arm_rewards
                .iter()
                .try_for_each(|&reward| is_success(reward).map(|_| ()))
        })
    }
}

impl BatchPolicy for BatchedThompsonSampling {
    fn batch_size(&self) -> u64 {
        self.batch_size
    }

    fn draw_batch(&mut self) -> Result<BatchDraw, PolicyError> {
        let batch_size = self.batch_size as usize;
        let rng = self.rng.get_rng();

        // one row of posterior samples per arm, one column per pull of the batch
        let samples = self
            .arms
            .iter()
            .map(|arm| {
                arm.posterior().map(|posterior| {
                    (0..batch_size)
                        .map(|_| posterior.sample(rng))
                        .collect::<Vec<f64>>()
                })
            })
            .collect::<Result<Vec<Vec<f64>>, _>>()?;

        let mut counts = vec![0u64; self.arms.len()];
        for column in 0..batch_size {
            let arm_id =
                argmax(samples.iter().map(|row| row[column])).ok_or(PolicyError::NoArmsAvailable)?;
            counts[arm_id] += 1;
        }

        let (arm_ids, counts): (Vec<usize>, Vec<u64>) = counts
            .into_iter()
            .enumerate()
            .filter(|&(_, count)| count > 0)
            .unzip();
        debug!(?arm_ids, ?counts, "Batch draw");

        Ok(BatchDraw { arm_ids, counts })
    }

    fn update_batch(&mut self, rewards: &BatchRewards) -> Result<(), PolicyError> {
        // reject the whole batch before touching any arm
        if let Err(err) = self.validate(rewards) {
            warn!(error = %err, "Rejected batch update");
            return Err(err);
        }

        rewards
            .iter()
            .try_for_each(|(&arm_id, arm_rewards)| self.arms.update_many(arm_id, arm_rewards))
    }

    fn stats(&self) -> PolicyStats {
        self.arms.stats()
    }
}
