//! Projection calculators.
//!
//! [`CostProjector`] is the canonical 25-year utility vs. service comparison.
//! [`SunkCostProjector`] looks backwards from the current bill, and
//! [`LegacySystemEstimator`] is the earlier owned-system sizing estimate.

pub mod common;
pub mod legacy;
pub mod projection;
pub mod sunk_cost;

pub use legacy::{
    LegacyEstimatorConfig, LegacyEstimatorError, LegacySystemEstimator, MAX_LOAN_TERM_YEARS,
};
pub use projection::{CostProjector, PROJECTION_YEARS};
pub use sunk_cost::{
    FALLBACK_CURRENT_RATE, MAX_YEARS_IN_HOME, SunkCostConfig, SunkCostError, SunkCostProjector,
};
