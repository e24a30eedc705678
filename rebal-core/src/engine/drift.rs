//! Drift simulation — the portfolio path under the no-trading invariant.
//!
//! Each leg compounds independently: investment_A(t) = investment_A(t-1) ·
//! (1 + return_A(t)), likewise for B; the weight follows from the ratio.
//! Pure functions of the starting state and the return series.

use crate::domain::{PortfolioState, ReturnSeries};

/// Project a basis state forward with no trading, producing the states for
/// days `first_day..series.len()` (the basis itself is not included).
pub fn project_from(
    basis: PortfolioState,
    series: &ReturnSeries,
    first_day: usize,
) -> Vec<PortfolioState> {
    let mut states = Vec::with_capacity(series.len().saturating_sub(first_day));
    let mut current = basis;
    for t in first_day..series.len() {
        let obs = series.day(t);
        current = current.step(obs.ret_a, obs.ret_b);
        states.push(current);
    }
    states
}

/// The no-rebalance benchmark: allocate `capital` at `initial_weight` on
/// day 0 and let the weights drift for the whole horizon. Returns one state
/// per day, day 0 included.
pub fn no_rebalance_path(
    series: &ReturnSeries,
    initial_weight: f64,
    capital: f64,
) -> Vec<PortfolioState> {
    let basis = PortfolioState::initial(initial_weight, capital);
    let mut states = Vec::with_capacity(series.len());
    states.push(basis);
    states.extend(project_from(basis, series, 1));
    states
}

/// Running mean of realized total returns: `means[t]` is the mean over days
/// `0..t` (exclusive of day t), the μ fed into the day-t utility. `means[0]`
/// is 0 and unused — no grid is evaluated for day 0.
pub fn running_means(states: &[PortfolioState]) -> Vec<f64> {
    let mut means = Vec::with_capacity(states.len());
    means.push(0.0);
    let mut sum = 0.0;
    for t in 1..states.len() {
        sum += states[t - 1].total_return;
        means.push(sum / t as f64);
    }
    means
}
