//! Per-day cost grid over candidate target weights.
//!
//! For day t, every grid weight w in [0, 1) at increment δ is scored with the
//! total cost of rebalancing to it: the certainty-equivalent cost of holding
//! w instead of the risk-optimal weight, plus the linear transaction cost.
//! The grid is ephemeral — the caller extracts the minimum and the no-trade
//! band and drops the rows.
//!
//! The transaction-cost term measures distance from the *static* risk-optimal
//! weight, not the day's pre-trade weight: it prices being away from the
//! fixed target. See DESIGN.md.

use crate::engine::{EngineError, PolicyParams};
use crate::risk::RiskModel;

/// Realized day-t data the grid is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayInputs {
    pub day: usize,
    pub ret_a: f64,
    pub ret_b: f64,
    /// Realized no-rebalance portfolio return for day t.
    pub total_return: f64,
    /// Mean of realized total returns over days 0..t (exclusive).
    pub mean_return: f64,
}

/// One candidate weight's scores. Ephemeral.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostGridRow {
    pub candidate_weight: f64,
    pub variance_current: f64,
    pub variance_optimal: f64,
    pub expected_utility_current: f64,
    pub expected_utility_optimal: f64,
    /// Certainty-equivalent cost, currency units.
    pub cec: f64,
    /// Transaction cost, basis-point units.
    pub tc: f64,
    pub total_cost: f64,
}

/// Mean-variance utility approximation: log-wealth growth penalized by
/// variance. Caller guarantees `one_plus_mu > 0`.
fn expected_utility(variance: f64, one_plus_mu: f64) -> f64 {
    one_plus_mu.log10() - variance / (2.0 * one_plus_mu * one_plus_mu)
}

/// Score a single candidate weight.
///
/// Precondition: `1 + inputs.mean_return > 0` (checked once per day by
/// [`evaluate_day`]).
pub fn evaluate_candidate(
    w: f64,
    inputs: &DayInputs,
    risk: &RiskModel,
    params: &PolicyParams,
) -> CostGridRow {
    let dev_a = inputs.ret_a - inputs.total_return;
    let dev_b = inputs.ret_b - inputs.total_return;
    let cov_ba = risk.cov_ba();
    let w_opt = risk.optimal_weight_a;

    let variance_current =
        dev_a * dev_a * w * w + dev_b * dev_b * (1.0 - w) * (1.0 - w) + 2.0 * (1.0 - w) * w * cov_ba;
    // Risk had the optimal weight been held; the covariance contribution
    // still uses the candidate w.
    let variance_optimal = dev_a * dev_a * w_opt * w_opt
        + dev_b * dev_b * (1.0 - w_opt) * (1.0 - w_opt)
        + 2.0 * (1.0 - w_opt) * w * cov_ba;

    let one_plus_mu = 1.0 + inputs.mean_return;
    let expected_utility_current = expected_utility(variance_current, one_plus_mu);
    let expected_utility_optimal = expected_utility(variance_optimal, one_plus_mu);

    // Utility → wealth transform, in currency units of the notional.
    let cec = (expected_utility_optimal.exp() - expected_utility_current.exp())
        * params.initial_capital;
    let tc = params.cost_a_bps * (w_opt - w).abs()
        + params.cost_b_bps * ((1.0 - w_opt) - (1.0 - w)).abs();

    CostGridRow {
        candidate_weight: w,
        variance_current,
        variance_optimal,
        expected_utility_current,
        expected_utility_optimal,
        cec,
        tc,
        total_cost: cec + tc,
    }
}

/// Evaluate the full grid for one day: weights i·δ for i in 0..⌈1/δ⌉.
pub fn evaluate_day(
    inputs: &DayInputs,
    risk: &RiskModel,
    params: &PolicyParams,
) -> Result<Vec<CostGridRow>, EngineError> {
    if 1.0 + inputs.mean_return <= 0.0 {
        return Err(EngineError::UtilityDomain {
            day: inputs.day,
            mean_return: inputs.mean_return,
        });
    }

    let steps = (1.0 / params.delta).ceil() as usize;
    Ok((0..steps)
        .map(|i| evaluate_candidate(i as f64 * params.delta, inputs, risk, params))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn risk() -> RiskModel {
        RiskModel {
            optimal_weight_a: 0.5,
            covariance: [[2e-4, 1e-5], [1e-5, 1e-4]],
        }
    }

    fn inputs() -> DayInputs {
        DayInputs {
            day: 1,
            ret_a: 0.05,
            ret_b: 0.0,
            total_return: 0.025,
            mean_return: 0.0,
        }
    }

    #[test]
    fn cost_is_zero_at_the_optimal_weight() {
        let row = evaluate_candidate(0.5, &inputs(), &risk(), &PolicyParams::default());
        assert!(row.cec.abs() < 1e-9);
        assert!(row.tc.abs() < 1e-12);
        assert!(row.total_cost.abs() < 1e-9);
    }

    #[test]
    fn variance_matches_hand_computation() {
        let row = evaluate_candidate(0.6, &inputs(), &risk(), &PolicyParams::default());
        // dev_a = 0.025, dev_b = -0.025, cov_ba = 1e-5
        let expected = 0.025f64.powi(2) * 0.36 + 0.025f64.powi(2) * 0.16 + 2.0 * 0.4 * 0.6 * 1e-5;
        assert!((row.variance_current - expected).abs() < 1e-15);
    }

    #[test]
    fn transaction_cost_is_linear_in_weight_distance() {
        let params = PolicyParams::default();
        let near = evaluate_candidate(0.51, &inputs(), &risk(), &params);
        let far = evaluate_candidate(0.52, &inputs(), &risk(), &params);
        // 60 + 40 bp per unit weight on each side of the move
        assert!((near.tc - 1.0).abs() < 1e-9);
        assert!((far.tc - 2.0).abs() < 1e-9);
    }

    #[test]
    fn utility_penalizes_variance() {
        let low = expected_utility(1e-4, 1.0);
        let high = expected_utility(5e-4, 1.0);
        assert!(low > high);
        assert!((expected_utility(0.0, 1.0)).abs() < 1e-15);
    }

    #[test]
    fn grid_spans_unit_interval_exclusive() {
        let params = PolicyParams { delta: 0.01, ..PolicyParams::default() };
        let rows = evaluate_day(&inputs(), &risk(), &params).unwrap();
        assert_eq!(rows.len(), 100);
        assert_eq!(rows[0].candidate_weight, 0.0);
        assert!(rows.last().unwrap().candidate_weight < 1.0);
    }

    #[test]
    fn pathological_mean_return_is_fatal() {
        let bad = DayInputs { mean_return: -1.0, ..inputs() };
        let err = evaluate_day(&bad, &risk(), &PolicyParams::default()).unwrap_err();
        assert!(matches!(err, EngineError::UtilityDomain { day: 1, .. }));
    }
}
