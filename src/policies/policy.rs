use super::arm::PolicyStats;
use super::batched_thompson_sampling::BatchedThompsonSampling;
use super::epsilon_greedy::EpsilonGreedy;
use super::kl_ucb::KlUcb;
use super::thompson_sampling::ThompsonSampling;
use super::thresholded_mean::ThresholdedMean;
use super::ucb::Ucb;

use crate::errors::PolicyError;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Arms drawn for one round of a batched policy. `arm_ids` are distinct and
/// ascending, `counts` is parallel to it and sums to the batch size.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BatchDraw {
    pub arm_ids: Vec<usize>,
    pub counts: Vec<u64>,
}

impl BatchDraw {
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.arm_ids.iter().copied().zip(self.counts.iter().copied())
    }
}

pub type BatchRewards = HashMap<usize, Vec<f64>>;

pub trait Policy: Send {
    fn draw(&mut self) -> Result<usize, PolicyError>;
    fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError>;
    fn stats(&self) -> PolicyStats;
}

pub trait BatchPolicy: Send {
    fn batch_size(&self) -> u64;
    fn draw_batch(&mut self) -> Result<BatchDraw, PolicyError>;
    fn update_batch(&mut self, rewards: &BatchRewards) -> Result<(), PolicyError>;
    fn stats(&self) -> PolicyStats;
}

fn default_epsilon() -> f64 {
    0.1
}

fn default_alpha() -> f64 {
    2.0
}

fn default_c() -> f64 {
    3.0
}

fn default_threshold() -> f64 {
    0.95
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum PolicyType {
    EpsilonGreedy {
        #[serde(default = "default_epsilon")]
        epsilon: f64,
    },
    Ucb {
        #[serde(default = "default_alpha")]
        alpha: f64,
    },
    KlUcb {
        #[serde(default = "default_c")]
        c: f64,
    },
    ThompsonSampling,
    ThresholdedMean {
        #[serde(default = "default_threshold")]
        threshold: f64,
    },
}

/// Policy selected by name alone, with default parameters.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PolicyName {
    EpsilonGreedy,
    Ucb,
    KlUcb,
    ThompsonSampling,
    ThresholdedMean,
}

impl From<PolicyName> for PolicyType {
    fn from(name: PolicyName) -> Self {
        match name {
            PolicyName::EpsilonGreedy => PolicyType::EpsilonGreedy {
                epsilon: default_epsilon(),
            },
            PolicyName::Ucb => PolicyType::Ucb {
                alpha: default_alpha(),
            },
            PolicyName::KlUcb => PolicyType::KlUcb { c: default_c() },
            PolicyName::ThompsonSampling => PolicyType::ThompsonSampling,
            PolicyName::ThresholdedMean => PolicyType::ThresholdedMean {
                threshold: default_threshold(),
            },
        }
    }
}

impl PolicyType {
    pub fn into_inner(
        self,
        num_arms: usize,
        horizon: u64,
        seed: Option<u64>,
    ) -> Result<Box<dyn Policy + Send>, PolicyError> {
        let policy: Box<dyn Policy + Send> = match self {
            PolicyType::EpsilonGreedy { epsilon } => {
                Box::new(EpsilonGreedy::new(num_arms, horizon, epsilon, seed)?)
            }
            PolicyType::Ucb { alpha } => Box::new(Ucb::new(num_arms, horizon, alpha)?),
            PolicyType::KlUcb { c } => Box::new(KlUcb::new(num_arms, horizon, c)?),
            PolicyType::ThompsonSampling => {
                Box::new(ThompsonSampling::new(num_arms, horizon, seed)?)
            }
            PolicyType::ThresholdedMean { threshold } => {
                Box::new(ThresholdedMean::new(num_arms, horizon, threshold, seed)?)
            }
        };

        Ok(policy)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicyType {
    ThompsonSampling { batch_size: u64 },
}

impl BatchPolicyType {
    pub fn into_inner(
        self,
        num_arms: usize,
        horizon: u64,
        seed: Option<u64>,
    ) -> Result<Box<dyn BatchPolicy + Send>, PolicyError> {
        match self {
            BatchPolicyType::ThompsonSampling { batch_size } => Ok(Box::new(
                BatchedThompsonSampling::new(num_arms, horizon, batch_size, seed)?,
            )),
        }
    }
}

// Index of the largest value, keeping the first one on ties.
pub(super) fn argmax<I>(values: I) -> Option<usize>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .enumerate()
        .fold(None, |best, (idx, value)| match best {
            Some((_, top)) if value.partial_cmp(&top) != Some(Ordering::Greater) => best,
            _ => Some((idx, value)),
        })
        .map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argmax_first_on_ties() {
        assert_eq!(argmax([0.2, 0.7, 0.7, 0.1]), Some(1));
        assert_eq!(argmax([1.0, 1.0, 1.0]), Some(0));
    }

    #[test]
    fn argmax_infinite() {
        assert_eq!(argmax([0.2, f64::INFINITY, 0.9]), Some(1));
    }

    #[test]
    fn argmax_empty() {
        assert_eq!(argmax(Vec::<f64>::new()), None);
    }

    #[test]
    fn batch_draw_iter() {
        let draw = BatchDraw {
            arm_ids: vec![0, 2],
            counts: vec![3, 7],
        };
        assert_eq!(draw.total(), 10);
        assert_eq!(draw.iter().collect::<Vec<_>>(), vec![(0, 3), (2, 7)]);
    }

    #[test]
    fn build_policies() {
        let types = [
            PolicyType::EpsilonGreedy { epsilon: 0.1 },
            PolicyType::Ucb { alpha: 2.0 },
            PolicyType::KlUcb { c: 3.0 },
            PolicyType::ThompsonSampling,
            PolicyType::ThresholdedMean { threshold: 0.95 },
        ];

        for policy_type in types {
            let mut policy = policy_type.into_inner(4, 100, Some(1234)).unwrap();
            let arm_id = policy.draw().unwrap();
            assert!(arm_id < 4);
            assert!(policy.update(arm_id, 1.0).is_ok());
            assert_eq!(policy.stats().total_pulls, 1);
        }
    }

    #[test]
    fn build_invalid() {
        assert!(PolicyType::Ucb { alpha: 2.0 }
            .into_inner(0, 100, None)
            .is_err());
        assert!(PolicyType::EpsilonGreedy { epsilon: 1.5 }
            .into_inner(3, 100, None)
            .is_err());
    }

    #[test]
    fn build_batch_policy() {
        let policy = BatchPolicyType::ThompsonSampling { batch_size: 25 }.into_inner(3, 100, None);
        assert_eq!(policy.map(|p| p.batch_size()).ok(), Some(25));

        let policy = BatchPolicyType::ThompsonSampling { batch_size: 30 }.into_inner(3, 100, None);
        assert!(matches!(
            policy.err(),
            Some(PolicyError::InvalidBatchSize {
                horizon: 100,
                batch_size: 30
            })
        ));
    }
}
