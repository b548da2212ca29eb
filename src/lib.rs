//! Decision policies for stochastic multi-armed bandits with Bernoulli rewards.
//!
//! A driver owns the environment and alternates [`Policy::draw`] and
//! [`Policy::update`] (or [`BatchPolicy::draw_batch`] and
//! [`BatchPolicy::update_batch`] for batched rounds).

pub mod config;
pub mod errors;
pub mod kl;
pub mod policies;

pub use errors::{PolicyError, SetupError};
pub use policies::{BatchDraw, BatchPolicy, BatchRewards, Policy, PolicyStats, PolicyType};
