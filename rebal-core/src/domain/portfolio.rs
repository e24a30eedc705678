//! Per-day portfolio state under compounding returns.

use serde::{Deserialize, Serialize};

/// Portfolio state at the end of one trading day.
///
/// Invariant (absent negative investments): `weight_a` is in [0, 1] and equals
/// `investment_a / (investment_a + investment_b)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioState {
    pub weight_a: f64,
    pub investment_a: f64,
    pub investment_b: f64,
    /// Simple return of the whole portfolio over the previous day (0 on day 0
    /// and on the day after a rebalance reset, where capital is unchanged).
    pub total_return: f64,
}

impl PortfolioState {
    /// Initial allocation: `capital` split at `weight_a`.
    pub fn initial(weight_a: f64, capital: f64) -> Self {
        Self {
            weight_a,
            investment_a: weight_a * capital,
            investment_b: (1.0 - weight_a) * capital,
            total_return: 0.0,
        }
    }

    /// Advance one day with no trading: both legs compound independently.
    pub fn step(&self, ret_a: f64, ret_b: f64) -> Self {
        let investment_a = self.investment_a * (1.0 + ret_a);
        let investment_b = self.investment_b * (1.0 + ret_b);
        let prev_total = self.total();
        let total = investment_a + investment_b;
        Self {
            weight_a: investment_a / total,
            investment_a,
            investment_b,
            total_return: total / prev_total - 1.0,
        }
    }

    /// Reset to `weight_a`, reallocating the previous day's total capital.
    /// Capital is unchanged by the reallocation, so `total_return` is zero.
    pub fn rebalanced(weight_a: f64, prior_capital: f64) -> Self {
        Self {
            weight_a,
            investment_a: weight_a * prior_capital,
            investment_b: (1.0 - weight_a) * prior_capital,
            total_return: 0.0,
        }
    }

    /// Total invested capital.
    pub fn total(&self) -> f64 {
        self.investment_a + self.investment_b
    }
}
