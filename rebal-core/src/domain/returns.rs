//! Daily simple returns for the two assets.
//!
//! Returns are derived from closing prices: r(t) = p(t)/p(t-1) - 1, with the
//! day-0 return fixed at zero by convention (there is no prior close). The
//! series is validated at construction so the engine can assume equal-length,
//! non-trivial data everywhere downstream.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shape errors surfaced before any computation starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("price series have mismatched lengths: asset A has {len_a}, asset B has {len_b}")]
    MismatchedLengths { len_a: usize, len_b: usize },

    #[error("need at least 2 observations, got {len}")]
    TooShort { len: usize },
}

/// One trading day's simple returns for both assets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnObservation {
    pub day: usize,
    pub ret_a: f64,
    pub ret_b: f64,
}

/// Ordered daily return series for asset A and asset B.
///
/// Invariant: `obs[t].day == t`, and `obs[0]` has both returns equal to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    obs: Vec<ReturnObservation>,
}

impl ReturnSeries {
    /// Build a return series from two closing-price series.
    pub fn from_prices(close_a: &[f64], close_b: &[f64]) -> Result<Self, SeriesError> {
        if close_a.len() != close_b.len() {
            return Err(SeriesError::MismatchedLengths {
                len_a: close_a.len(),
                len_b: close_b.len(),
            });
        }
        if close_a.len() < 2 {
            return Err(SeriesError::TooShort { len: close_a.len() });
        }

        let obs = (0..close_a.len())
            .map(|t| {
                if t == 0 {
                    ReturnObservation { day: 0, ret_a: 0.0, ret_b: 0.0 }
                } else {
                    ReturnObservation {
                        day: t,
                        ret_a: close_a[t] / close_a[t - 1] - 1.0,
                        ret_b: close_b[t] / close_b[t - 1] - 1.0,
                    }
                }
            })
            .collect();

        Ok(Self { obs })
    }

    /// Build directly from per-day returns (day 0 is forced to zero).
    pub fn from_returns(ret_a: &[f64], ret_b: &[f64]) -> Result<Self, SeriesError> {
        if ret_a.len() != ret_b.len() {
            return Err(SeriesError::MismatchedLengths {
                len_a: ret_a.len(),
                len_b: ret_b.len(),
            });
        }
        if ret_a.len() < 2 {
            return Err(SeriesError::TooShort { len: ret_a.len() });
        }

        let obs = (0..ret_a.len())
            .map(|t| ReturnObservation {
                day: t,
                ret_a: if t == 0 { 0.0 } else { ret_a[t] },
                ret_b: if t == 0 { 0.0 } else { ret_b[t] },
            })
            .collect();

        Ok(Self { obs })
    }

    /// Number of trading days in the series.
    pub fn len(&self) -> usize {
        self.obs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obs.is_empty()
    }

    /// The observation for a given day. Panics if out of range.
    pub fn day(&self, t: usize) -> ReturnObservation {
        self.obs[t]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReturnObservation> {
        self.obs.iter()
    }

    /// Asset A returns as a contiguous slice view (allocates).
    pub fn returns_a(&self) -> Vec<f64> {
        self.obs.iter().map(|o| o.ret_a).collect()
    }

    /// Asset B returns as a contiguous slice view (allocates).
    pub fn returns_b(&self) -> Vec<f64> {
        self.obs.iter().map(|o| o.ret_b).collect()
    }
}
