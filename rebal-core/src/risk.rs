//! Static mean-variance risk model.
//!
//! Estimated once from the full historical sample: the 2×2 sample covariance
//! of the two return series, and the weight minimizing portfolio variance
//! w'Σw over the same δ-grid the cost evaluator uses. Immutable for the run.

use serde::{Deserialize, Serialize};

use crate::domain::ReturnSeries;

/// Risk-optimal weight and return covariance, fixed for the run.
///
/// Invariant: `covariance` is symmetric and `optimal_weight_a` minimizes
/// w'Σw over the discretized weight grid (first occurrence on ties).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskModel {
    /// Weight of asset A in [0, 1].
    pub optimal_weight_a: f64,
    /// [[var_a, cov_ab], [cov_ab, var_b]].
    pub covariance: [[f64; 2]; 2],
}

impl RiskModel {
    /// Estimate the model from a return series, scanning weights at
    /// increment `delta`.
    pub fn estimate(series: &ReturnSeries, delta: f64) -> Self {
        let covariance = sample_covariance(series);

        let steps = (1.0 / delta).ceil() as usize;
        let mut best_w = 0.0;
        let mut best_var = f64::INFINITY;
        for i in 0..steps {
            let w = i as f64 * delta;
            let var = portfolio_variance(w, &covariance);
            if var < best_var {
                best_var = var;
                best_w = w;
            }
        }

        Self { optimal_weight_a: best_w, covariance }
    }

    /// Off-diagonal covariance entry Cov(B, A).
    pub fn cov_ba(&self) -> f64 {
        self.covariance[1][0]
    }
}

/// Portfolio variance w'Σw for a two-asset mix.
pub fn portfolio_variance(w: f64, cov: &[[f64; 2]; 2]) -> f64 {
    w * (w * cov[0][0] + (1.0 - w) * cov[0][1])
        + (1.0 - w) * (w * cov[1][0] + (1.0 - w) * cov[1][1])
}

/// Sample covariance matrix of the two return series (n−1 denominator).
pub fn sample_covariance(series: &ReturnSeries) -> [[f64; 2]; 2] {
    let n = series.len() as f64;
    let mean_a = series.iter().map(|o| o.ret_a).sum::<f64>() / n;
    let mean_b = series.iter().map(|o| o.ret_b).sum::<f64>() / n;

    let (mut var_a, mut var_b, mut cov_ab) = (0.0, 0.0, 0.0);
    for o in series.iter() {
        let da = o.ret_a - mean_a;
        let db = o.ret_b - mean_b;
        var_a += da * da;
        var_b += db * db;
        cov_ab += da * db;
    }
    let denom = n - 1.0;
    [
        [var_a / denom, cov_ab / denom],
        [cov_ab / denom, var_b / denom],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(a: &[f64], b: &[f64]) -> ReturnSeries {
        ReturnSeries::from_returns(a, b).unwrap()
    }

    #[test]
    fn covariance_is_symmetric() {
        let s = series(&[0.0, 0.01, -0.02, 0.03], &[0.0, -0.01, 0.02, 0.01]);
        let cov = sample_covariance(&s);
        assert_eq!(cov[0][1], cov[1][0]);
    }

    #[test]
    fn covariance_matches_hand_computation() {
        // A = [0, 0.02], B = [0, -0.02]: means ±0.01, deviations ∓0.01.
        let s = series(&[0.0, 0.02], &[0.0, -0.02]);
        let cov = sample_covariance(&s);
        assert!((cov[0][0] - 2e-4).abs() < 1e-12);
        assert!((cov[1][1] - 2e-4).abs() < 1e-12);
        assert!((cov[0][1] + 2e-4).abs() < 1e-12);
    }

    #[test]
    fn optimal_weight_favors_the_quiet_asset() {
        // A volatile, B nearly flat: the minimum-variance mix sits near all-B.
        let a = [0.0, 0.05, -0.05, 0.04, -0.04, 0.05];
        let b = [0.0, 0.001, -0.001, 0.001, -0.001, 0.001];
        let model = RiskModel::estimate(&series(&a, &b), 0.01);
        assert!(model.optimal_weight_a < 0.2, "got {}", model.optimal_weight_a);
    }

    #[test]
    fn optimal_weight_is_grid_argmin() {
        let s = series(&[0.0, 0.03, -0.02, 0.01], &[0.0, -0.01, 0.02, -0.02]);
        let model = RiskModel::estimate(&s, 0.001);
        let var_at = |w: f64| portfolio_variance(w, &model.covariance);
        let w = model.optimal_weight_a;
        assert!(var_at(w) <= var_at(w + 0.001));
        if w >= 0.001 {
            assert!(var_at(w) <= var_at(w - 0.001));
        }
    }

    #[test]
    fn constant_variance_ties_break_to_first_grid_point() {
        // Identical series: w'Σw is constant in w, argmin is the first point.
        let a = [0.0, 0.01, 0.01, 0.01];
        let model = RiskModel::estimate(&series(&a, &a), 0.01);
        assert_eq!(model.optimal_weight_a, 0.0);
    }
}
