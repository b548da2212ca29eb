use super::arm::{Arms, PolicyStats};
use super::policy::{argmax, Policy};

use crate::errors::PolicyError;

use tracing::{debug, info};

#[derive(Clone, Debug)]
pub struct Ucb {
    arms: Arms,
    alpha: f64,
}

impl Ucb {
    pub fn new(num_arms: usize, horizon: u64, alpha: f64) -> Result<Self, PolicyError> {
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(PolicyError::InvalidParameter {
                name: "alpha",
                value: alpha,
            });
        }
        let arms = Arms::new(num_arms, horizon)?;
        info!(num_arms, horizon, alpha, "Created UCB policy");

        Ok(Self { arms, alpha })
    }

    // mean + sqrt(alpha * ln(t) / n), unpulled arms are always worth trying
    fn score(&self, arm_id: usize, total_count: u64) -> Result<f64, PolicyError> {
        let arm = self.arms.get(arm_id)?;
        let score = match arm.mean() {
            Some(mean) => {
                mean + (self.alpha * (total_count as f64).ln() / arm.pulls() as f64).sqrt()
            }
            None => f64::INFINITY,
        };

        Ok(score)
    }
}

impl Policy for Ucb {
    fn draw(&mut self) -> Result<usize, PolicyError> {
        let total_count = self.arms.total_pulls();

        // pull every arm once, in order, before trusting the bounds
        if total_count < self.arms.len() as u64 {
            let arm_id = total_count as usize;
            debug!(arm_id, "Warm-up draw");
            return Ok(arm_id);
        }

        let scores = (0..self.arms.len())
            .map(|arm_id| self.score(arm_id, total_count))
            .collect::<Result<Vec<f64>, _>>()?;

        argmax(scores).ok_or(PolicyError::NoArmsAvailable)
    }

    fn update(&mut self, arm_id: usize, reward: f64) -> Result<(), PolicyError> {
        self.arms.update(arm_id, reward)
    }

    fn stats(&self) -> PolicyStats {
        self.arms.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_policy(num_arms: usize) -> Ucb {
        Ucb::new(num_arms, 1000, 2.0).unwrap()
    }

    #[test]
    fn create() {
        assert!(Ucb::new(3, 100, 2.0).is_ok());
        assert!(Ucb::new(0, 100, 2.0).is_err());
        assert!(Ucb::new(3, 100, -1.0).is_err());
        assert!(Ucb::new(3, 100, f64::NAN).is_err());
    }

    #[test]
    fn warm_up_ascending() {
        let mut policy = make_policy(5);
        let draws = (0..5)
            .map(|_| {
                let arm_id = policy.draw().unwrap();
                policy.update(arm_id, 0.0).unwrap();
                arm_id
            })
            .collect::<Vec<usize>>();

        assert_eq!(draws, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn draw_best() {
        let mut policy = make_policy(2);
        policy.update(0, 0.0).unwrap();
        policy.update(1, 1.0).unwrap();

        assert_eq!(policy.draw().ok(), Some(1));
    }

    #[test]
    fn draw_ties_lowest_index() {
        let mut policy = make_policy(3);
        (0..3).for_each(|arm_id| policy.update(arm_id, 1.0).unwrap());

        assert_eq!(policy.draw().ok(), Some(0));
    }

    #[test]
    fn draw_explores_rarely_pulled_arm() {
        let mut policy = make_policy(2);
        // arm 0 looks slightly better but arm 1 has far fewer pulls
        (0..200).for_each(|i| policy.update(0, (i % 10 < 6) as u8 as f64).unwrap());
        policy.update(1, 0.0).unwrap();
        policy.update(1, 1.0).unwrap();

        assert_eq!(policy.draw().ok(), Some(1));
    }

    #[test]
    fn unpulled_arm_after_warm_up() {
        let mut policy = make_policy(3);
        (0..3).for_each(|_| policy.update(0, 1.0).unwrap());

        assert_eq!(policy.draw().ok(), Some(1));
    }

    #[test]
    fn update() {
        let mut policy = make_policy(2);
        let arm_id = policy.draw().unwrap();

        assert!(policy.update(arm_id, 1.0).is_ok());
        assert_eq!(policy.stats().arms[arm_id].mean_reward, Some(1.0));
        assert!(policy.update(7, 1.0).is_err());
        assert!(policy.update(arm_id, 0.3).is_err());
        assert_eq!(policy.stats().total_pulls, 1);
    }
}
