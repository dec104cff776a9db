//! Static lookup tables: historical electricity rates and peak sun hours.

mod historical;
mod sun_hours;

use rust_decimal::Decimal;
use thiserror::Error;

pub use historical::{EARLIEST_YEAR, HistoricalRates, LATEST_YEAR};
pub use sun_hours::{DEFAULT_SUN_HOURS, SunHoursTable};

/// Errors raised when building a lookup table from external entries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateTableError {
    #[error("table has no entries")]
    Empty,

    #[error("rate for {year} must be positive, got {rate}")]
    NonPositiveRate { year: i32, rate: Decimal },

    #[error("year {0} appears more than once")]
    DuplicateYear(i32),

    #[error("sun hours for '{state}' must be positive, got {hours}")]
    NonPositiveSunHours { state: String, hours: Decimal },

    #[error("state '{0}' appears more than once")]
    DuplicateState(String),

    #[error("invalid state code '{0}' (expected two letters)")]
    InvalidStateCode(String),
}
