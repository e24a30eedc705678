//! Parameter sweeps over cost rates and grid increments.
//!
//! Each combination is an independent full engine run, so the sweep fans out
//! on the rayon pool. The risk model is re-estimated per delta — the optimal
//! weight is a grid argmin, so it moves with the grid.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use rebal_core::engine::{run_policy, PolicyParams};
use rebal_core::risk::RiskModel;
use rebal_core::ReturnSeries;

use crate::runner::RunError;

/// Axes of the sweep: the cartesian product is evaluated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParamGrid {
    pub cost_a_bps: Vec<f64>,
    pub cost_b_bps: Vec<f64>,
    pub deltas: Vec<f64>,
}

impl ParamGrid {
    /// All parameter combinations, base params supplying the fixed fields.
    pub fn combinations(&self, base: &PolicyParams) -> Vec<PolicyParams> {
        let mut out = Vec::with_capacity(self.len());
        for &delta in &self.deltas {
            for &ca in &self.cost_a_bps {
                for &cb in &self.cost_b_bps {
                    out.push(PolicyParams {
                        delta,
                        cost_a_bps: ca,
                        cost_b_bps: cb,
                        ..*base
                    });
                }
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.deltas.len() * self.cost_a_bps.len() * self.cost_b_bps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Summary of one sweep point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweepEntry {
    pub params: PolicyParams,
    pub optimal_weight_a: f64,
    pub rebalance_count: usize,
    pub total_transaction_cost: f64,
}

/// All sweep points, in the order [`ParamGrid::combinations`] produced them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SweepResults {
    pub entries: Vec<SweepEntry>,
}

impl SweepResults {
    /// Entry with the fewest rebalances, cheapest total cost breaking ties.
    pub fn quietest(&self) -> Option<&SweepEntry> {
        self.entries.iter().min_by(|a, b| {
            a.rebalance_count.cmp(&b.rebalance_count).then(
                a.total_transaction_cost.total_cmp(&b.total_transaction_cost),
            )
        })
    }
}

/// Run the full engine once per grid point, in parallel.
pub fn run_sweep(
    series: &ReturnSeries,
    grid: &ParamGrid,
    base: &PolicyParams,
) -> Result<SweepResults, RunError> {
    let entries = grid
        .combinations(base)
        .into_par_iter()
        .map(|params| {
            params.validate()?;
            let risk = RiskModel::estimate(series, params.delta);
            let result = run_policy(series, &risk, &params)?;
            Ok(SweepEntry {
                params,
                optimal_weight_a: risk.optimal_weight_a,
                rebalance_count: result.rebalance_count(),
                total_transaction_cost: result.total_transaction_cost,
            })
        })
        .collect::<Result<Vec<_>, RunError>>()?;

    Ok(SweepResults { entries })
}
