//! Rebal Core — the dynamic-programming rebalancing engine for a two-asset
//! portfolio.
//!
//! This crate contains the heart of the rebalancer:
//! - Domain types (return series, portfolio states, day decisions, policy result)
//! - Mean-variance risk model (covariance + discretized minimum-variance weight)
//! - Drift simulation (no-trade compounding of investments)
//! - Per-day cost grid over candidate target weights (CEC + TC per candidate)
//! - No-trade band extraction from sign changes of the cost curve
//! - Backward cost accumulation and the forward rebalance decision pass
//!
//! The crate performs no I/O. Everything is a deterministic function of the
//! return series, the risk model, and the policy parameters.

pub mod domain;
pub mod engine;
pub mod risk;

pub use domain::{DayDecision, PolicyResult, PortfolioState, ReturnObservation, ReturnSeries};
pub use engine::{run_policy, BandMode, EngineError, PolicyParams};
pub use risk::RiskModel;
