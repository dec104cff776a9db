//! Sunk-cost retrospective: what a household has already paid the utility.
//!
//! The current monthly bill is scaled back through history by the ratio of
//! each year's average rate to the current year's rate. Usage is assumed
//! constant; only the rate varies.
//!
//! The current year is supplied through [`SunkCostConfig`] so callers (and
//! tests) decide what "now" is. Records keep full `Decimal` precision.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use solar_core::{HistoricalRates, SunkCostConfig, SunkCostProjector};
//!
//! let rates = HistoricalRates::builtin();
//! let projector = SunkCostProjector::new(&rates, SunkCostConfig::for_year(2026));
//!
//! let result = projector.project(dec!(200.00), 2020).unwrap();
//!
//! assert_eq!(result.years_in_home, 7);
//! assert_eq!(result.years.len(), 7);
//! assert_eq!(result.years.last().unwrap().monthly_bill, dec!(200));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::common::MONTHS_PER_YEAR;
use crate::models::{SunkCostResult, SunkCostYearRecord};
use crate::rates::HistoricalRates;

/// Rate assumed for the current year when the table has no entry for it.
pub const FALLBACK_CURRENT_RATE: Decimal = dec!(0.19);

/// Longest stay, in years, the projector will estimate.
pub const MAX_YEARS_IN_HOME: u32 = 150;

/// Errors that can occur during sunk-cost calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SunkCostError {
    #[error("current monthly bill must be non-negative, got {0}")]
    NegativeBill(Decimal),

    #[error("fallback current rate must be positive, got {0}")]
    InvalidFallbackRate(Decimal),

    #[error(
        "move-in year {year_moved_in} is more than {max} years before {current_year}",
        max = MAX_YEARS_IN_HOME
    )]
    MoveInYearTooEarly { year_moved_in: i32, current_year: i32 },

    #[error("bill of {bill} scaled by the rate table overflows")]
    Overflow { bill: Decimal },
}

/// Calendar settings for the sunk-cost projector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunkCostConfig {
    /// The year treated as "now"; the last year of every projection.
    pub current_year: i32,

    /// Rate used when the table has no entry for `current_year`.
    pub fallback_rate: Decimal,
}

impl SunkCostConfig {
    pub fn for_year(current_year: i32) -> Self {
        Self {
            current_year,
            fallback_rate: FALLBACK_CURRENT_RATE,
        }
    }

    pub fn validate(&self) -> Result<(), SunkCostError> {
        if self.fallback_rate <= Decimal::ZERO {
            return Err(SunkCostError::InvalidFallbackRate(self.fallback_rate));
        }
        Ok(())
    }
}

/// Calculator for the sunk-cost retrospective.
#[derive(Debug, Clone)]
pub struct SunkCostProjector<'a> {
    rates: &'a HistoricalRates,
    config: SunkCostConfig,
}

impl<'a> SunkCostProjector<'a> {
    pub fn new(
        rates: &'a HistoricalRates,
        config: SunkCostConfig,
    ) -> Self {
        Self { rates, config }
    }

    /// The rate every historical year is compared against.
    pub fn current_rate(&self) -> Decimal {
        self.rates
            .rate_for(self.config.current_year)
            .unwrap_or(self.config.fallback_rate)
    }

    /// Estimates spending for every year from `year_moved_in` through the
    /// current year, inclusive.
    ///
    /// A move-in year after the current year yields an empty result with all
    /// aggregates at zero.
    ///
    /// # Errors
    ///
    /// Returns [`SunkCostError`] if the bill is negative, the configured
    /// fallback rate is not positive, the stay exceeds [`MAX_YEARS_IN_HOME`],
    /// or the scaled bills leave `Decimal`'s range.
    pub fn project(
        &self,
        current_monthly_bill: Decimal,
        year_moved_in: i32,
    ) -> Result<SunkCostResult, SunkCostError> {
        self.config.validate()?;
        if current_monthly_bill < Decimal::ZERO {
            return Err(SunkCostError::NegativeBill(current_monthly_bill));
        }

        let current_year = self.config.current_year;
        if year_moved_in > current_year {
            warn!(
                year_moved_in,
                current_year, "move-in year is after the current year; nothing to estimate"
            );
            return Ok(SunkCostResult::default());
        }

        let years_in_home = self.years_in_home(year_moved_in)?;
        let overflow = || SunkCostError::Overflow {
            bill: current_monthly_bill,
        };

        let current_rate = self.current_rate();
        let mut cumulative_cost = Decimal::ZERO;
        let mut years = Vec::with_capacity(years_in_home as usize);

        for year in year_moved_in..=current_year {
            let estimated_rate = self.historical_rate(year, current_rate);
            let monthly_bill = current_monthly_bill
                .checked_mul(estimated_rate)
                .and_then(|scaled| scaled.checked_div(current_rate))
                .ok_or_else(overflow)?;
            let annual_cost = monthly_bill.checked_mul(MONTHS_PER_YEAR).ok_or_else(overflow)?;
            cumulative_cost = cumulative_cost.checked_add(annual_cost).ok_or_else(overflow)?;

            years.push(SunkCostYearRecord {
                year,
                estimated_rate,
                monthly_bill,
                annual_cost,
                cumulative_cost,
            });
        }

        let average_annual_cost = cumulative_cost / Decimal::from(years_in_home);

        debug!(
            year_moved_in,
            current_year,
            total_paid = %cumulative_cost,
            "sunk cost projection complete"
        );

        Ok(SunkCostResult {
            first_monthly_bill: years.first().map_or(Decimal::ZERO, |y| y.monthly_bill),
            years,
            total_paid_to_date: cumulative_cost,
            years_in_home,
            average_annual_cost,
        })
    }

    /// Table rate for `year`, or the current rate when the table has no entry.
    fn historical_rate(
        &self,
        year: i32,
        current_rate: Decimal,
    ) -> Decimal {
        self.rates.rate_for(year).unwrap_or_else(|| {
            debug!(year, %current_rate, "no historical rate; using current rate");
            current_rate
        })
    }

    /// Inclusive count of years from `year_moved_in` through the current
    /// year. Callers have already ruled out a move-in year in the future.
    fn years_in_home(
        &self,
        year_moved_in: i32,
    ) -> Result<u32, SunkCostError> {
        let current_year = self.config.current_year;
        let span = i64::from(current_year) - i64::from(year_moved_in) + 1;
        u32::try_from(span)
            .ok()
            .filter(|years| *years <= MAX_YEARS_IN_HOME)
            .ok_or(SunkCostError::MoveInYearTooEarly {
                year_moved_in,
                current_year,
            })
    }
}
