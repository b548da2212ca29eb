pub mod arm;
mod batched_thompson_sampling;
mod epsilon_greedy;
mod kl_ucb;
mod policy;
mod rng;
mod thompson_sampling;
mod thresholded_mean;
mod ucb;

pub use arm::{ArmStats, PolicyStats};
pub use batched_thompson_sampling::BatchedThompsonSampling;
pub use epsilon_greedy::EpsilonGreedy;
pub use kl_ucb::KlUcb;
pub use policy::{
    BatchDraw, BatchPolicy, BatchPolicyType, BatchRewards, Policy, PolicyName, PolicyType,
};
pub use thompson_sampling::ThompsonSampling;
pub use thresholded_mean::ThresholdedMean;
pub use ucb::Ucb;
