//! Forward decision pass.
//!
//! Processes days in strictly increasing order from day 1 (day 0 is the fixed
//! initial allocation at the risk-optimal weight). A day holds when its
//! drifted weight lies strictly inside (low_bound, high_bound); otherwise it
//! rebalances, and the next day's state is rebuilt from the day's total
//! capital at the minimum-cost weight before drift resumes. An inverted or
//! never-assigned band therefore always rebalances, by construction rather
//! than by special case.

use crate::domain::{DayDecision, PolicyResult, PortfolioState, ReturnSeries};
use crate::engine::PolicyParams;

/// Converts the summed basis-point TC of executed rebalances into currency
/// units of the notional.
pub const TC_NOTIONAL_SCALE: f64 = 1_000.0;

/// Run the forward pass, consuming the accumulated decisions and producing
/// the realized path.
pub fn decide(
    series: &ReturnSeries,
    mut decisions: Vec<DayDecision>,
    initial_weight: f64,
    params: &PolicyParams,
) -> PolicyResult {
    let n = series.len();
    let mut states = Vec::with_capacity(n);
    states.push(PortfolioState::initial(initial_weight, params.initial_capital));

    // Target chosen on the previous day, applied to this day's state.
    let mut pending_target: Option<f64> = None;
    let mut total_tc = 0.0;

    for t in 1..n {
        let obs = series.day(t);
        let state = match pending_target.take() {
            Some(target) => PortfolioState::rebalanced(target, states[t - 1].total()),
            None => states[t - 1].step(obs.ret_a, obs.ret_b),
        };

        let decision = &mut decisions[t];
        let hold = state.weight_a > decision.low_bound && state.weight_a < decision.high_bound;
        if !hold {
            decision.rebalance = true;
            total_tc += decision.tc;
            pending_target = Some(decision.min_cost_weight);
        }

        states.push(state);
    }

    PolicyResult {
        states,
        decisions,
        total_transaction_cost: total_tc * TC_NOTIONAL_SCALE,
    }
}
