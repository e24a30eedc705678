//! Per-day decisions and the final policy output.

use serde::{Deserialize, Serialize};

use super::portfolio::PortfolioState;

/// One day's rebalancing decision.
///
/// Built in two stages: the grid-derived fields (`min_cost_weight`, `tc`,
/// `cec`, bounds) come from the per-day cost grid; `cumulative_future_cost`
/// is filled by the backward accumulation pass; `rebalance` by the forward
/// decision pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayDecision {
    pub day: usize,
    /// Grid weight minimizing total cost for this day.
    pub min_cost_weight: f64,
    /// Transaction cost at the minimum-cost weight (basis-point units).
    pub tc: f64,
    /// Certainty-equivalent cost at the minimum-cost weight (currency units).
    pub cec: f64,
    /// Lower edge of the no-trade band (0 when never assigned).
    pub low_bound: f64,
    /// Upper edge of the no-trade band (0 when never assigned).
    pub high_bound: f64,
    pub rebalance: bool,
    /// TC + CEC summed backward from the end of the horizon.
    pub cumulative_future_cost: f64,
}

impl DayDecision {
    /// Day-0 placeholder: the initial allocation is fixed at `initial_weight`
    /// and no decision is taken.
    pub fn day_zero(initial_weight: f64) -> Self {
        Self {
            day: 0,
            min_cost_weight: initial_weight,
            tc: 0.0,
            cec: 0.0,
            low_bound: 0.0,
            high_bound: 0.0,
            rebalance: false,
            cumulative_future_cost: 0.0,
        }
    }

}

/// Final output of the whole computation: realized path plus decisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyResult {
    /// Realized (post-decision) portfolio state per day.
    pub states: Vec<PortfolioState>,
    /// One decision per day (day 0 is the fixed initial allocation).
    pub decisions: Vec<DayDecision>,
    /// Sum of TC over rebalance days, scaled to currency units.
    pub total_transaction_cost: f64,
}

impl PolicyResult {
    pub fn rebalance_count(&self) -> usize {
        self.decisions.iter().filter(|d| d.rebalance).count()
    }

    pub fn final_state(&self) -> &PortfolioState {
        self.states.last().expect("policy result has at least two days")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_zero_takes_no_decision() {
        let d = DayDecision::day_zero(0.42);
        assert!(!d.rebalance);
        assert_eq!(d.min_cost_weight, 0.42);
        assert_eq!(d.low_bound, 0.0);
        assert_eq!(d.high_bound, 0.0);
    }
}
