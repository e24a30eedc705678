//! Backward cost accumulation.
//!
//! Converts myopic one-day costs into a forward-looking signal:
//! cum(t) = TC(t) + CEC(t) + cum(t+1), seeded at the last day. Runs once per
//! horizon over the minimum-cost weight's TC/CEC, never per grid point.

use crate::domain::DayDecision;

/// Fill `cumulative_future_cost` for days 1..n (day 0 takes no decision and
/// stays at zero).
pub fn accumulate_future_costs(decisions: &mut [DayDecision]) {
    let n = decisions.len();
    if n < 2 {
        return;
    }

    let last = n - 1;
    decisions[last].cumulative_future_cost = decisions[last].tc + decisions[last].cec;
    for t in (1..last).rev() {
        decisions[t].cumulative_future_cost =
            decisions[t].tc + decisions[t].cec + decisions[t + 1].cumulative_future_cost;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decision(day: usize, tc: f64, cec: f64) -> DayDecision {
        DayDecision {
            day,
            min_cost_weight: 0.5,
            tc,
            cec,
            low_bound: 0.0,
            high_bound: 0.0,
            rebalance: false,
            cumulative_future_cost: 0.0,
        }
    }

    #[test]
    fn backward_recurrence() {
        let mut ds = vec![
            decision(0, 0.0, 0.0),
            decision(1, 1.0, 10.0),
            decision(2, 2.0, 20.0),
            decision(3, 3.0, 30.0),
        ];
        accumulate_future_costs(&mut ds);
        assert_eq!(ds[3].cumulative_future_cost, 33.0);
        assert_eq!(ds[2].cumulative_future_cost, 55.0);
        assert_eq!(ds[1].cumulative_future_cost, 66.0);
        assert_eq!(ds[0].cumulative_future_cost, 0.0);
    }

    #[test]
    fn dominates_day_cost_when_costs_are_non_negative() {
        let mut ds = vec![
            decision(0, 0.0, 0.0),
            decision(1, 0.5, 4.0),
            decision(2, 1.5, 0.0),
            decision(3, 0.0, 2.5),
        ];
        accumulate_future_costs(&mut ds);
        for d in &ds[1..] {
            assert!(d.cumulative_future_cost >= d.tc.max(d.cec));
        }
    }

    #[test]
    fn negative_day_costs_flow_through() {
        let mut ds = vec![decision(0, 0.0, 0.0), decision(1, 1.0, -5.0), decision(2, 1.0, 0.0)];
        accumulate_future_costs(&mut ds);
        assert_eq!(ds[2].cumulative_future_cost, 1.0);
        assert_eq!(ds[1].cumulative_future_cost, -3.0);
    }
}
