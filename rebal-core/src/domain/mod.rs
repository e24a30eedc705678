//! Domain types for the rebalancer.

pub mod decision;
pub mod portfolio;
pub mod returns;

pub use decision::{DayDecision, PolicyResult};
pub use portfolio::PortfolioState;
pub use returns::{ReturnObservation, ReturnSeries, SeriesError};
