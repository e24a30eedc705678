//! No-trade band extraction from the day's cost curve.
//!
//! Two scan modes:
//! - [`BandMode::Asymmetric`] (the default): the high bound is scanned
//!   outward from the cost minimum (contiguous negative cost), while the
//!   low bound is scanned upward from the origin
//!   (contiguous positive cost). The two bounds are therefore not guaranteed
//!   to be ordered; an inverted or never-assigned band reads as "always
//!   rebalance" downstream.
//! - [`BandMode::Symmetric`] scans the contiguous negative-cost region
//!   outward from the minimum in both directions.

use serde::{Deserialize, Serialize};

use super::cost_grid::CostGridRow;

/// No-trade band scan mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandMode {
    #[default]
    Asymmetric,
    Symmetric,
}

/// Per-day band summary pulled off the cost grid before it is discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub min_index: usize,
    pub min_cost_weight: f64,
    /// Transaction cost at the minimum-cost weight.
    pub tc: f64,
    /// Certainty-equivalent cost at the minimum-cost weight.
    pub cec: f64,
    pub low_bound: f64,
    pub high_bound: f64,
}

/// Extract the minimum-cost weight and the no-trade bounds from a day's grid.
///
/// Ties in the minimum break to the first occurrence in increasing-weight
/// order. Bounds that are never assigned stay at 0.0 (the degenerate band).
pub fn extract_band(rows: &[CostGridRow], mode: BandMode) -> Band {
    let min_index = rows
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.total_cost.total_cmp(&b.total_cost))
        .map(|(i, _)| i)
        .unwrap_or(0);

    let mut low_bound = 0.0;
    let mut high_bound = 0.0;

    // High bound: contiguous negative cost upward from the minimum.
    for row in &rows[min_index..] {
        if row.total_cost < 0.0 {
            high_bound = row.candidate_weight;
        } else {
            break;
        }
    }

    match mode {
        BandMode::Asymmetric => {
            // Low bound: contiguous positive cost upward from the origin.
            for row in rows {
                if row.total_cost > 0.0 {
                    low_bound = row.candidate_weight;
                } else {
                    break;
                }
            }
        }
        BandMode::Symmetric => {
            // Low bound: contiguous negative cost downward from the minimum.
            for row in rows[..=min_index].iter().rev() {
                if row.total_cost < 0.0 {
                    low_bound = row.candidate_weight;
                } else {
                    break;
                }
            }
        }
    }

    let min_row = &rows[min_index];
    Band {
        min_index,
        min_cost_weight: min_row.candidate_weight,
        tc: min_row.tc,
        cec: min_row.cec,
        low_bound,
        high_bound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a grid whose total cost follows `f`, with the other fields
    /// filled consistently enough for extraction.
    fn grid(delta: f64, f: impl Fn(f64) -> f64) -> Vec<CostGridRow> {
        let steps = (1.0 / delta).ceil() as usize;
        (0..steps)
            .map(|i| {
                let w = i as f64 * delta;
                let cost = f(w);
                CostGridRow {
                    candidate_weight: w,
                    variance_current: 0.0,
                    variance_optimal: 0.0,
                    expected_utility_current: 0.0,
                    expected_utility_optimal: 0.0,
                    cec: cost,
                    tc: 0.0,
                    total_cost: cost,
                }
            })
            .collect()
    }

    #[test]
    fn minimum_is_first_occurrence_on_ties() {
        let rows = grid(0.25, |_| 1.0);
        let band = extract_band(&rows, BandMode::Asymmetric);
        assert_eq!(band.min_index, 0);
        assert_eq!(band.min_cost_weight, 0.0);
    }

    #[test]
    fn v_shaped_curve_yields_ordered_band() {
        // Positive near 0, dips negative around 0.5, positive again near 1.
        // Crossings at 0.305 and 0.695 fall between grid points.
        let rows = grid(0.01, |w| (w - 0.5).abs() - 0.195);
        let band = extract_band(&rows, BandMode::Asymmetric);
        assert!((band.min_cost_weight - 0.5).abs() < 1e-9);
        // Last positive weight from the origin is 0.30
        assert!((band.low_bound - 0.30).abs() < 1e-9);
        assert!((band.high_bound - 0.69).abs() < 1e-9);
        assert!(band.low_bound <= band.high_bound);
    }

    #[test]
    fn symmetric_mode_scans_down_from_the_minimum() {
        let rows = grid(0.01, |w| (w - 0.5).abs() - 0.195);
        let band = extract_band(&rows, BandMode::Symmetric);
        // Lowest negative weight below the minimum is 0.31
        assert!((band.low_bound - 0.31).abs() < 1e-9);
        assert!((band.high_bound - 0.69).abs() < 1e-9);
    }

    #[test]
    fn all_positive_curve_is_degenerate_on_the_high_side() {
        let rows = grid(0.01, |w| 1.0 + w);
        let band = extract_band(&rows, BandMode::Asymmetric);
        assert_eq!(band.high_bound, 0.0);
        // Low scan never breaks: it runs to the top of the grid
        assert!((band.low_bound - 0.99).abs() < 1e-9);
        // Inverted: low > high, read downstream as always-rebalance
        assert!(band.low_bound > band.high_bound);
    }

    #[test]
    fn all_negative_curve_spans_the_grid() {
        let rows = grid(0.01, |w| -1.0 - (w - 0.3).powi(2));
        let band = extract_band(&rows, BandMode::Asymmetric);
        assert_eq!(band.low_bound, 0.0);
        assert!((band.high_bound - 0.99).abs() < 1e-9);
        assert!((band.min_cost_weight - 0.3).abs() < 1e-9);
    }

    #[test]
    fn high_scan_stops_at_first_non_negative() {
        // Negative from the min, then a positive island, then negative again.
        let rows = grid(0.01, |w| {
            if (0.2..0.4).contains(&w) {
                -1.0
            } else if (0.6..0.8).contains(&w) {
                -2.0
            } else {
                1.0
            }
        });
        let band = extract_band(&rows, BandMode::Asymmetric);
        // Global minimum sits in the second island; scan stops at 0.8
        assert!((band.min_cost_weight - 0.6).abs() < 1e-9);
        assert!((band.high_bound - 0.79).abs() < 1e-9);
    }
}
