//! The rebalancing engine — five stages wired by [`run_policy`]:
//!
//! 1. Drift simulation: the no-rebalance benchmark path and its running mean
//!    of realized total returns.
//! 2. Cost grid: per day, total cost (CEC + TC) over a δ-grid of candidate
//!    target weights. Independent across days, so this stage runs on the
//!    rayon pool.
//! 3. Band extraction: minimum-cost weight and no-trade bounds per day.
//! 4. Backward pass: cumulative future cost per day.
//! 5. Forward pass: hold-or-rebalance decisions with path-dependent drift
//!    restarts.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod accumulate;
pub mod band;
pub mod cost_grid;
pub mod decide;
pub mod drift;

pub use accumulate::accumulate_future_costs;
pub use band::{extract_band, Band, BandMode};
pub use cost_grid::{evaluate_day, CostGridRow, DayInputs};
pub use decide::TC_NOTIONAL_SCALE;
pub use drift::no_rebalance_path;

use crate::domain::{DayDecision, PolicyResult, ReturnSeries, SeriesError};
use crate::risk::RiskModel;

/// Fatal engine errors. Degenerate bands are not errors — they resolve to
/// zeroed bounds and a forced rebalance (see [`band`]).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Input(#[from] SeriesError),

    #[error("utility undefined on day {day}: mean total return {mean_return} is at or below -100%")]
    UtilityDomain { day: usize, mean_return: f64 },

    #[error("invalid policy parameter {name}: {value}")]
    InvalidParams { name: &'static str, value: f64 },
}

/// Tunable parameters of the rebalancing policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyParams {
    /// Weight grid increment δ.
    pub delta: f64,
    /// Capital invested at day 0, in currency units.
    pub initial_capital: f64,
    /// Trading cost rate for asset A, in basis points per unit weight.
    pub cost_a_bps: f64,
    /// Trading cost rate for asset B, in basis points per unit weight.
    pub cost_b_bps: f64,
    /// No-trade band scan mode.
    pub band_mode: BandMode,
}

impl PolicyParams {
    /// Check the parameters before any grid is sized from them. The grid
    /// step count is ⌈1/δ⌉, so δ must be in (0, 1]; capital must be a
    /// positive finite notional; cost rates must be non-negative.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !(self.delta > 0.0 && self.delta <= 1.0) {
            return Err(EngineError::InvalidParams { name: "delta", value: self.delta });
        }
        if !(self.initial_capital > 0.0 && self.initial_capital.is_finite()) {
            return Err(EngineError::InvalidParams {
                name: "initial_capital",
                value: self.initial_capital,
            });
        }
        if !(self.cost_a_bps >= 0.0 && self.cost_a_bps.is_finite()) {
            return Err(EngineError::InvalidParams { name: "cost_a_bps", value: self.cost_a_bps });
        }
        if !(self.cost_b_bps >= 0.0 && self.cost_b_bps.is_finite()) {
            return Err(EngineError::InvalidParams { name: "cost_b_bps", value: self.cost_b_bps });
        }
        Ok(())
    }
}

impl Default for PolicyParams {
    fn default() -> Self {
        Self {
            delta: 0.0005,
            initial_capital: 1_000_000_000.0,
            cost_a_bps: 60.0,
            cost_b_bps: 40.0,
            band_mode: BandMode::default(),
        }
    }
}

/// Compute the full rebalancing policy for a return series.
///
/// The per-day grid stage is data-parallel; the backward and forward passes
/// are sequential. A fatal error on any day (utility domain violation) aborts
/// the run before the decision passes.
pub fn run_policy(
    series: &ReturnSeries,
    risk: &RiskModel,
    params: &PolicyParams,
) -> Result<PolicyResult, EngineError> {
    params.validate()?;
    let n = series.len();
    let benchmark = drift::no_rebalance_path(series, risk.optimal_weight_a, params.initial_capital);
    let means = drift::running_means(&benchmark);

    let bands = (1..n)
        .into_par_iter()
        .map(|t| {
            let obs = series.day(t);
            let inputs = DayInputs {
                day: t,
                ret_a: obs.ret_a,
                ret_b: obs.ret_b,
                total_return: benchmark[t].total_return,
                mean_return: means[t],
            };
            let rows = cost_grid::evaluate_day(&inputs, risk, params)?;
            Ok(band::extract_band(&rows, params.band_mode))
        })
        .collect::<Result<Vec<Band>, EngineError>>()?;

    let mut decisions = Vec::with_capacity(n);
    decisions.push(DayDecision::day_zero(risk.optimal_weight_a));
    for (t, b) in (1..n).zip(bands) {
        decisions.push(DayDecision {
            day: t,
            min_cost_weight: b.min_cost_weight,
            tc: b.tc,
            cec: b.cec,
            low_bound: b.low_bound,
            high_bound: b.high_bound,
            rebalance: false,
            cumulative_future_cost: 0.0,
        });
    }

    accumulate::accumulate_future_costs(&mut decisions);
    Ok(decide::decide(series, decisions, risk.optimal_weight_a, params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        assert!(PolicyParams::default().validate().is_ok());
    }

    #[test]
    fn non_positive_delta_is_rejected() {
        for delta in [0.0, -0.001, f64::NAN, 1.5] {
            let params = PolicyParams { delta, ..PolicyParams::default() };
            assert!(matches!(
                params.validate(),
                Err(EngineError::InvalidParams { name: "delta", .. })
            ));
        }
    }

    #[test]
    fn bad_capital_and_cost_rates_are_rejected() {
        let params = PolicyParams { initial_capital: 0.0, ..PolicyParams::default() };
        assert!(matches!(
            params.validate(),
            Err(EngineError::InvalidParams { name: "initial_capital", .. })
        ));

        let params = PolicyParams { cost_a_bps: -1.0, ..PolicyParams::default() };
        assert!(matches!(
            params.validate(),
            Err(EngineError::InvalidParams { name: "cost_a_bps", .. })
        ));
    }

    #[test]
    fn run_policy_refuses_degenerate_delta() {
        let series = ReturnSeries::from_returns(&[0.0, 0.01], &[0.0, 0.0]).unwrap();
        let risk = crate::risk::RiskModel::estimate(&series, 0.01);
        let params = PolicyParams { delta: 0.0, ..PolicyParams::default() };
        let err = run_policy(&series, &risk, &params).unwrap_err();
        assert!(matches!(err, EngineError::InvalidParams { name: "delta", .. }));
    }
}
