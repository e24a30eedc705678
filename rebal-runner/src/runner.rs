//! End-to-end run orchestration: prices in, report out.
//!
//! The runner wires the stages together — returns from prices, risk model
//! estimation, the policy engine, and the no-rebalance benchmark — and folds
//! the results into a serializable [`RebalanceReport`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use rebal_core::domain::PortfolioState;
use rebal_core::engine::{drift, EngineError, PolicyParams};
use rebal_core::risk::RiskModel;
use rebal_core::{PolicyResult, ReturnSeries};

use crate::config::{ConfigError, RunConfig, RunId};
use crate::data_loader::{LoadError, PriceSeries};
use crate::metrics;

/// Bump when the report layout changes incompatibly.
pub const REPORT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Flat, serializable summary of one run. Everything a downstream consumer
/// needs without re-running the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RebalanceReport {
    pub schema_version: u32,
    pub run_id: RunId,
    pub name: String,
    pub days: usize,
    pub policy: PolicyParams,
    pub optimal_weight_a: f64,
    pub covariance: [[f64; 2]; 2],
    pub rebalance_count: usize,
    /// Sum of per-rebalance transaction costs, in currency units.
    pub total_transaction_cost: f64,
    /// |Σ CEC| of the never-rebalance benchmark over the horizon.
    pub benchmark_drift_cost: f64,
    pub max_weight_excursion: f64,
    pub final_weight_a: f64,
    pub final_capital: f64,
    pub realized_total_return: f64,
    /// True when the prices were generated rather than loaded.
    pub synthetic_data: bool,
}

/// Full output of a run: the summary report plus the raw curves the
/// exporters consume.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: RebalanceReport,
    pub result: PolicyResult,
    /// Drift-only benchmark path, one state per day.
    pub benchmark: Vec<PortfolioState>,
    pub risk: RiskModel,
}

/// Execute the full pipeline for one configuration and price series.
pub fn run_rebalance(config: &RunConfig, prices: &PriceSeries) -> Result<RunOutcome, RunError> {
    // The risk estimator sizes its weight grid from delta, so bad params
    // must be caught before estimation, not just inside the engine.
    config.policy.validate()?;
    let series = ReturnSeries::from_prices(&prices.close_a, &prices.close_b)
        .map_err(EngineError::from)?;
    let risk = RiskModel::estimate(&series, config.policy.delta);

    let result = rebal_core::run_policy(&series, &risk, &config.policy)?;
    let benchmark =
        drift::no_rebalance_path(&series, risk.optimal_weight_a, config.policy.initial_capital);
    let benchmark_drift_cost = metrics::benchmark_drift_cost(&series, &risk, &config.policy)?;

    let final_state = result.final_state();
    let report = RebalanceReport {
        schema_version: REPORT_SCHEMA_VERSION,
        run_id: config.run_id(),
        name: config.name.clone(),
        days: series.len(),
        policy: config.policy,
        optimal_weight_a: risk.optimal_weight_a,
        covariance: risk.covariance,
        rebalance_count: result.rebalance_count(),
        total_transaction_cost: result.total_transaction_cost,
        benchmark_drift_cost,
        max_weight_excursion: metrics::max_weight_excursion(&result.states, risk.optimal_weight_a),
        final_weight_a: final_state.weight_a,
        final_capital: final_state.total(),
        realized_total_return: metrics::realized_total_return(&result.states),
        synthetic_data: prices.synthetic,
    };

    Ok(RunOutcome { report, result, benchmark, risk })
}
