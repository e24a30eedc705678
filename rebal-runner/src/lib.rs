//! Rebal Runner — orchestration around the core engine.
//!
//! This crate builds on `rebal-core` to provide:
//! - TOML run configuration with a content-addressed run id
//! - CSV price loading with a seeded synthetic fallback
//! - The end-to-end runner (prices → returns → risk model → policy → report)
//! - Summary metrics, including the no-rebalance benchmark's drift cost
//! - CSV/JSON artifact export
//! - Parallel parameter sweeps over cost rates and grid increments

pub mod config;
pub mod data_loader;
pub mod export;
pub mod metrics;
pub mod runner;
pub mod sweep;

pub use config::{ConfigError, RunConfig};
pub use data_loader::{load_prices, synthetic_prices, LoadError, PriceSeries};
pub use export::{save_artifacts, write_policy_csv, write_report_json, ArtifactPaths};
pub use metrics::benchmark_drift_cost;
pub use runner::{run_rebalance, RebalanceReport, RunError, RunOutcome};
pub use sweep::{run_sweep, ParamGrid, SweepEntry, SweepResults};
