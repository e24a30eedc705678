//! Summary metrics — pure functions over engine outputs.
//!
//! Curve in, scalar out; no dependencies on the loader or exporter.

use rebal_core::domain::PortfolioState;
use rebal_core::engine::{cost_grid, drift, EngineError, PolicyParams};
use rebal_core::risk::RiskModel;
use rebal_core::ReturnSeries;

/// Aggregate certainty-equivalent cost of never rebalancing: the benchmark
/// portfolio drifts for the whole horizon and each day is charged the CEC of
/// its drifted weight against the risk-optimal weight. Reported as |Σ CEC|.
pub fn benchmark_drift_cost(
    series: &ReturnSeries,
    risk: &RiskModel,
    params: &PolicyParams,
) -> Result<f64, EngineError> {
    let benchmark = drift::no_rebalance_path(series, risk.optimal_weight_a, params.initial_capital);
    let means = drift::running_means(&benchmark);

    let mut sum = 0.0;
    for t in 1..series.len() {
        if 1.0 + means[t] <= 0.0 {
            return Err(EngineError::UtilityDomain { day: t, mean_return: means[t] });
        }
        let obs = series.day(t);
        let inputs = cost_grid::DayInputs {
            day: t,
            ret_a: obs.ret_a,
            ret_b: obs.ret_b,
            total_return: benchmark[t].total_return,
            mean_return: means[t],
        };
        let row = cost_grid::evaluate_candidate(benchmark[t].weight_a, &inputs, risk, params);
        sum += row.cec;
    }
    Ok(sum.abs())
}

/// Largest distance the drifted weight reaches from the optimal weight.
pub fn max_weight_excursion(states: &[PortfolioState], optimal_weight: f64) -> f64 {
    states
        .iter()
        .map(|s| (s.weight_a - optimal_weight).abs())
        .fold(0.0, f64::max)
}

/// Total simple return of a realized path: final capital over initial, minus
/// one. Zero for paths shorter than two days.
pub fn realized_total_return(states: &[PortfolioState]) -> f64 {
    match (states.first(), states.last()) {
        (Some(first), Some(last)) if states.len() >= 2 && first.total() > 0.0 => {
            last.total() / first.total() - 1.0
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rebal_core::risk::sample_covariance;

    fn series(a: &[f64], b: &[f64]) -> ReturnSeries {
        ReturnSeries::from_returns(a, b).unwrap()
    }

    #[test]
    fn drift_cost_is_zero_without_drift() {
        // Identical returns: the benchmark never leaves the optimal weight
        // and every day's CEC is exactly zero.
        let a = [0.0, 0.01, 0.01, 0.01];
        let s = series(&a, &a);
        let risk = RiskModel { optimal_weight_a: 0.5, covariance: sample_covariance(&s) };
        let cost = benchmark_drift_cost(&s, &risk, &PolicyParams::default()).unwrap();
        assert!(cost.abs() < 1e-9);
    }

    #[test]
    fn drift_cost_is_positive_under_drift() {
        let s = series(&[0.0, 0.05, -0.05, 0.05], &[0.0, 0.0, 0.0, 0.0]);
        let risk = RiskModel { optimal_weight_a: 0.5, covariance: sample_covariance(&s) };
        let cost = benchmark_drift_cost(&s, &risk, &PolicyParams::default()).unwrap();
        assert!(cost > 0.0);
    }

    #[test]
    fn excursion_tracks_the_farthest_state() {
        let states = vec![
            PortfolioState::initial(0.5, 100.0),
            PortfolioState::initial(0.58, 100.0),
            PortfolioState::initial(0.47, 100.0),
        ];
        assert!((max_weight_excursion(&states, 0.5) - 0.08).abs() < 1e-12);
    }

    #[test]
    fn total_return_from_endpoints() {
        let states = vec![
            PortfolioState::initial(0.5, 100.0),
            PortfolioState::initial(0.5, 110.0),
        ];
        assert!((realized_total_return(&states) - 0.10).abs() < 1e-12);
        assert_eq!(realized_total_return(&states[..1]), 0.0);
    }
}
