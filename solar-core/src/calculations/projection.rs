//! Year-by-year utility vs. solar service cost projection.
//!
//! Projects both cost streams over a fixed 25-year horizon. Each year the
//! utility rate compounds by the utility inflation rate and the service price
//! compounds by the service escalator.
//!
//! # Per-year figures
//!
//! | Figure | Formula |
//! |--------|---------|
//! | Inflated rate | `utility_rate × (1 + inflation/100)^(year-1)` |
//! | Utility yearly | `usage × inflated rate + fee × 12` |
//! | Service yearly (per kWh) | `production × price × (1 + escalator/100)^(year-1)` |
//! | Service monthly (flat) | `price × (1 + escalator/100)^(year-1)` |
//! | Monthly / yearly | `yearly / 12` or `monthly × 12` |
//! | Savings | `utility − service` |
//!
//! Records keep full `Decimal` precision. Rounding to cents happens only when
//! a figure is displayed or exported.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use solar_core::{CalculatorInputs, CostProjector, PricingMode, format_currency};
//!
//! let inputs = CalculatorInputs {
//!     customer_name: "Example".to_string(),
//!     annual_kwh_usage: dec!(10000),
//!     utility_rate: dec!(0.15),
//!     utility_inflation_rate: dec!(6),
//!     monthly_connection_fee: dec!(0),
//!     pricing_mode: PricingMode::KwhRate,
//!     service_price: dec!(0.10),
//!     annual_system_production: dec!(10000),
//!     annual_service_escalator: dec!(2.9),
//! };
//!
//! let result = CostProjector::new().project(&inputs).unwrap();
//!
//! assert_eq!(result.years.len(), 25);
//! assert_eq!(result.year1_utility_monthly, dec!(125));
//! assert_eq!(result.years[0].service_yearly, dec!(1000));
//! assert_eq!(format_currency(result.year1_service_monthly), "$83.33");
//! assert_eq!(format_currency(result.monthly_difference), "$41.67");
//! ```

use rust_decimal::Decimal;
use tracing::debug;

use crate::calculations::common::{MONTHS_PER_YEAR, growth_factor};
use crate::models::{CalculationResult, CalculatorInputs, InputError, PricingMode, YearRecord};

/// Number of years covered by every projection.
pub const PROJECTION_YEARS: u32 = 25;

/// Calculator for the 25-year utility vs. service projection.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostProjector;

impl CostProjector {
    pub fn new() -> Self {
        Self
    }

    /// Projects utility and service costs for every year of the horizon.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] if the inputs fail [`CalculatorInputs::validate`].
    pub fn project(
        &self,
        inputs: &CalculatorInputs,
    ) -> Result<CalculationResult, InputError> {
        inputs.validate()?;

        let utility_growth = growth_factor(inputs.utility_inflation_rate);
        let service_growth = growth_factor(inputs.annual_service_escalator);

        let mut utility_escalation = Decimal::ONE;
        let mut service_escalation = Decimal::ONE;
        let mut cumulative_savings = Decimal::ZERO;
        let mut total_utility = Decimal::ZERO;
        let mut total_service = Decimal::ZERO;
        let mut years = Vec::with_capacity(PROJECTION_YEARS as usize);

        for year in 1..=PROJECTION_YEARS {
            let utility_yearly = self.utility_yearly(inputs, utility_escalation);
            let utility_monthly = utility_yearly / MONTHS_PER_YEAR;
            let (service_monthly, service_yearly) =
                self.service_costs(inputs, service_escalation);

            let monthly_savings = utility_monthly - service_monthly;
            let annual_savings = utility_yearly - service_yearly;
            cumulative_savings += annual_savings;

            total_utility += utility_yearly;
            total_service += service_yearly;

            years.push(YearRecord {
                year,
                utility_monthly,
                utility_yearly,
                service_monthly,
                service_yearly,
                monthly_savings,
                annual_savings,
                cumulative_savings,
            });

            utility_escalation *= utility_growth;
            service_escalation *= service_growth;
        }

        let year1_utility_monthly = years.first().map_or(Decimal::ZERO, |y| y.utility_monthly);
        let year1_service_monthly = years.first().map_or(Decimal::ZERO, |y| y.service_monthly);
        let lifetime_savings = total_utility - total_service;

        debug!(
            customer = %inputs.customer_name,
            pricing_mode = %inputs.pricing_mode,
            total_utility = %total_utility,
            total_service = %total_service,
            lifetime_savings = %lifetime_savings,
            "cost projection complete"
        );

        Ok(CalculationResult {
            years,
            year1_utility_monthly,
            year1_service_monthly,
            monthly_difference: year1_utility_monthly - year1_service_monthly,
            total_utility,
            total_service,
            lifetime_savings,
        })
    }

    /// Utility cost for a year whose rate has been escalated by `escalation`
    /// relative to year 1.
    fn utility_yearly(
        &self,
        inputs: &CalculatorInputs,
        escalation: Decimal,
    ) -> Decimal {
        let inflated_rate = inputs.utility_rate * escalation;
        inputs.annual_kwh_usage * inflated_rate + inputs.monthly_connection_fee * MONTHS_PER_YEAR
    }

    /// Monthly and yearly service cost. Escalation compounds identically in
    /// both pricing modes; only the year 1 base differs.
    fn service_costs(
        &self,
        inputs: &CalculatorInputs,
        escalation: Decimal,
    ) -> (Decimal, Decimal) {
        let escalated_price = inputs.service_price * escalation;
        match inputs.pricing_mode {
            PricingMode::KwhRate => {
                let yearly = inputs.annual_system_production * escalated_price;
                (yearly / MONTHS_PER_YEAR, yearly)
            }
            PricingMode::MonthlyPrice => (escalated_price, escalated_price * MONTHS_PER_YEAR),
        }
    }
}
