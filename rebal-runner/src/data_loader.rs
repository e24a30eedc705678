//! Price loading for the runner.
//!
//! The input is a CSV with closing prices for the two assets — columns
//! `close_a` and `close_b` (header matching is case-insensitive, so legacy
//! `Close_A`/`Close_B` exports load unchanged) plus an optional `date`
//! column. When no file is available, a seeded geometric random walk stands
//! in as a developer-only synthetic fallback.

use std::path::Path;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Errors from the data loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read prices: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: invalid price '{value}'")]
    InvalidPrice { row: usize, value: String },

    #[error("row {row}: price {value} is not positive")]
    NonPositivePrice { row: usize, value: f64 },

    #[error("row {row}: invalid date '{value}'")]
    InvalidDate { row: usize, value: String },

    #[error("no price rows found")]
    Empty,
}

/// Closing prices for the two assets, one row per trading day.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    /// Per-row dates when the source carries a `date` column.
    pub dates: Vec<Option<NaiveDate>>,
    pub close_a: Vec<f64>,
    pub close_b: Vec<f64>,
    /// Whether this series was generated rather than loaded.
    pub synthetic: bool,
}

impl PriceSeries {
    pub fn len(&self) -> usize {
        self.close_a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close_a.is_empty()
    }
}

/// Load closing prices from a CSV file.
pub fn load_prices(path: &Path) -> Result<PriceSeries, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };
    let col_a = find("close_a").ok_or(LoadError::MissingColumn("close_a"))?;
    let col_b = find("close_b").ok_or(LoadError::MissingColumn("close_b"))?;
    let col_date = find("date");

    let mut dates = Vec::new();
    let mut close_a = Vec::new();
    let mut close_b = Vec::new();

    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = i + 1;

        let parse_price = |col: usize| -> Result<f64, LoadError> {
            let raw = record.get(col).unwrap_or("").trim();
            let value: f64 = raw
                .parse()
                .map_err(|_| LoadError::InvalidPrice { row, value: raw.to_string() })?;
            if value <= 0.0 {
                return Err(LoadError::NonPositivePrice { row, value });
            }
            Ok(value)
        };

        close_a.push(parse_price(col_a)?);
        close_b.push(parse_price(col_b)?);
        dates.push(match col_date {
            Some(col) => {
                let raw = record.get(col).unwrap_or("").trim();
                if raw.is_empty() {
                    None
                } else {
                    Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                        LoadError::InvalidDate { row, value: raw.to_string() }
                    })?)
                }
            }
            None => None,
        });
    }

    if close_a.is_empty() {
        return Err(LoadError::Empty);
    }

    Ok(PriceSeries { dates, close_a, close_b, synthetic: false })
}

/// Generate a seeded two-asset geometric random walk.
///
/// Asset A is more volatile than B, giving the weights something to drift
/// on. Deterministic for a given (days, seed) pair.
pub fn synthetic_prices(days: usize, seed: u64) -> PriceSeries {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut close_a = Vec::with_capacity(days);
    let mut close_b = Vec::with_capacity(days);

    let (mut pa, mut pb) = (100.0f64, 100.0f64);
    for _ in 0..days {
        close_a.push(pa);
        close_b.push(pb);
        pa *= 1.0 + 0.0003 + 0.015 * rng.gen_range(-1.0..1.0);
        pb *= 1.0 + 0.0002 + 0.006 * rng.gen_range(-1.0..1.0);
    }

    PriceSeries { dates: vec![None; days], close_a, close_b, synthetic: true }
}
