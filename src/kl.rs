//! Bernoulli KL-divergence and the inverse used by KL-UCB.

const EPS: f64 = 1e-6;
const STEP: f64 = 1e-3;
const TOLERANCE: f64 = 1e-6;

/// KL-divergence of Bernoulli(`p`) from Bernoulli(`q`).
///
/// Returns 0 when `p == q` or when `q` sits on the boundary of `[0, 1]`, where the
/// divergence is unbounded. A small epsilon is added inside each logarithm so
/// `p == 0` or `p == 1` never evaluates `ln(0)`.
pub fn kl_divergence(p: f64, q: f64) -> f64 {
    if p == q || q == 0.0 || q == 1.0 {
        return 0.0;
    }

    p * (p / q + EPS).ln() + (1.0 - p) * ((1.0 - p) / (1.0 - q) + EPS).ln()
}

/// Find `q` in `[p, 1]` such that `kl_divergence(p, q)` is close to `threshold`.
///
/// Bisection over `[p, 1]` where every move pushes the bracket end one step past
/// the midpoint. Stops when the divergence is within tolerance of the threshold or
/// when the bracket gets narrower than the step, so the result is only accurate to
/// about `1e-3`.
pub fn solve_upper_bound(p: f64, threshold: f64) -> f64 {
    let mut low = p;
    let mut high = 1.0;
    let mut mid = low + (high - low) / 2.0;

    while (high - low).abs() >= STEP {
        let divergence = kl_divergence(p, mid);
        if (divergence - threshold).abs() <= TOLERANCE {
            break;
        }

        // divergence grows with q on [p, 1]
        if divergence < threshold {
            low = mid + STEP;
        } else {
            high = mid - STEP;
        }
        mid = low + (high - low) / 2.0;
    }

    mid.max(p).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kl_same_distribution() {
        assert_eq!(kl_divergence(0.5, 0.5), 0.0);
        assert_eq!(kl_divergence(0.0, 0.0), 0.0);
    }

    #[test]
    fn kl_boundaries() {
        for p in [0.0, 0.1, 0.5, 0.9, 1.0] {
            assert_eq!(kl_divergence(p, 0.0), 0.0);
            assert_eq!(kl_divergence(p, 1.0), 0.0);
        }
    }

    #[test]
    fn kl_close_to_exact() {
        // the epsilon only shifts the value slightly away from the exact divergence
        let exact = 0.3 * (0.3f64 / 0.6).ln() + 0.7 * (0.7f64 / 0.4).ln();
        assert!((kl_divergence(0.3, 0.6) - exact).abs() < 1e-4);
    }

    #[test]
    fn kl_extreme_p() {
        assert!(kl_divergence(0.0, 0.5).is_finite());
        assert!(kl_divergence(1.0, 0.5).is_finite());
        assert!(kl_divergence(0.0, 0.5) > 0.0);
        assert!(kl_divergence(1.0, 0.5) > 0.0);
    }

    #[test]
    fn kl_increasing_above_p() {
        let p = 0.2;
        let values = [0.3, 0.4, 0.6, 0.8, 0.95]
            .iter()
            .map(|&q| kl_divergence(p, q))
            .collect::<Vec<f64>>();
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn bound_zero_budget() {
        for p in [0.0, 0.2, 0.5, 0.8] {
            let q = solve_upper_bound(p, 0.0);
            assert!((q - p).abs() < 1e-3, "p = {p}, q = {q}");
        }
    }

    #[test]
    fn bound_matches_threshold() {
        for (p, threshold) in [(0.3, 0.1), (0.5, 0.05), (0.1, 0.5), (0.7, 0.02)] {
            let q = solve_upper_bound(p, threshold);
            assert!(q >= p && q <= 1.0);
            assert!(
                (kl_divergence(p, q) - threshold).abs() < 1e-2,
                "p = {p}, threshold = {threshold}, q = {q}"
            );
        }
    }

    #[test]
    fn bound_grows_with_budget() {
        let p = 0.4;
        let narrow = solve_upper_bound(p, 0.01);
        let wide = solve_upper_bound(p, 0.5);
        assert!(narrow < wide);
    }

    #[test]
    fn bound_certain_arm() {
        assert_eq!(solve_upper_bound(1.0, 0.3), 1.0);
    }

    #[test]
    fn bound_large_budget() {
        let q = solve_upper_bound(0.5, 10.0);
        assert!(q > 0.99 && q <= 1.0);
    }
}
