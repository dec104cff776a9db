//! Legacy system-sizing estimator.
//!
//! An earlier product iteration that sized an owned system from the monthly
//! bill and the state's sun hours, financed it with a fixed-rate loan, and
//! compared cumulative utility spending with cumulative ownership cost. It is
//! kept alongside [`CostProjector`](crate::CostProjector) as a separate
//! strategy; the two are never combined.
//!
//! # Steps
//!
//! 1. Monthly kWh = bill / assumed utility rate; daily kWh = monthly / 30.
//! 2. System size (kW) = ceil(daily kWh / sun hours × oversize factor).
//! 3. System cost = size × 1000 W × cost per watt.
//! 4. Monthly loan payment from a fixed-rate amortization.
//! 5. Per year: cumulative utility grows by the inflated annual bill;
//!    cumulative solar = system cost + maintenance × years (not compounded).
//! 6. Payback = first year utility ≥ solar; ROI = savings / system cost × 100.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use solar_core::{LegacyEstimatorConfig, LegacySystemEstimator, SunHoursTable};
//!
//! let sun_hours = SunHoursTable::builtin();
//! let estimator = LegacySystemEstimator::new(&sun_hours, LegacyEstimatorConfig::default());
//!
//! let result = estimator.estimate(dec!(200.00), "AZ").unwrap();
//!
//! assert_eq!(result.system_size_kw, dec!(8));
//! assert_eq!(result.system_cost, dec!(22000.00));
//! assert_eq!(result.payback_period, 9);
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::common::{MONTHS_PER_YEAR, compound, growth_factor, round_half_up};
use crate::calculations::projection::PROJECTION_YEARS;
use crate::models::LegacyCalculationResult;
use crate::rates::{DEFAULT_SUN_HOURS, SunHoursTable};

const DAYS_PER_MONTH: Decimal = dec!(30);
const WATTS_PER_KW: Decimal = dec!(1000);
const ONE_HUNDRED: Decimal = dec!(100);

/// Longest accepted loan term.
pub const MAX_LOAN_TERM_YEARS: u32 = 50;

/// Errors that can occur during the legacy estimate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LegacyEstimatorError {
    #[error("monthly bill must be non-negative, got {0}")]
    NegativeBill(Decimal),

    #[error("assumed utility rate must be positive, got {0}")]
    InvalidUtilityRate(Decimal),

    #[error("cost per watt must be non-negative, got {0}")]
    InvalidCostPerWatt(Decimal),

    #[error("oversize factor must be at least 1, got {0}")]
    InvalidOversizeFactor(Decimal),

    #[error("loan rate must be between 0 and 1, got {0}")]
    InvalidLoanRate(Decimal),

    #[error("loan term must be between 1 and {max} years, got {0}", max = MAX_LOAN_TERM_YEARS)]
    InvalidLoanTerm(u32),

    #[error("default sun hours must be positive, got {0}")]
    InvalidSunHours(Decimal),

    #[error("estimate for a monthly bill of {bill} overflows")]
    Overflow { bill: Decimal },
}

/// Financial constants for the legacy estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegacyEstimatorConfig {
    /// Rate used to convert the bill into kWh ($/kWh).
    pub assumed_utility_rate: Decimal,

    /// Installed cost per watt of capacity.
    pub cost_per_watt: Decimal,

    /// Sizing margin applied to the raw kW requirement (1.1 = 10% oversize).
    pub oversize_factor: Decimal,

    /// Annual loan interest rate as a fraction (0.05 = 5%).
    pub loan_annual_rate: Decimal,

    pub loan_term_years: u32,

    /// Annual growth of the utility bill, in percent.
    pub utility_inflation_percent: Decimal,

    /// Yearly maintenance as a fraction of system cost.
    pub maintenance_rate: Decimal,

    /// Sun hours used when the state is not in the table.
    pub default_sun_hours: Decimal,
}

impl Default for LegacyEstimatorConfig {
    fn default() -> Self {
        Self {
            assumed_utility_rate: dec!(0.15),
            cost_per_watt: dec!(2.75),
            oversize_factor: dec!(1.1),
            loan_annual_rate: dec!(0.05),
            loan_term_years: 20,
            utility_inflation_percent: dec!(3),
            maintenance_rate: dec!(0.01),
            default_sun_hours: DEFAULT_SUN_HOURS,
        }
    }
}

impl LegacyEstimatorConfig {
    pub fn validate(&self) -> Result<(), LegacyEstimatorError> {
        if self.assumed_utility_rate <= Decimal::ZERO {
            return Err(LegacyEstimatorError::InvalidUtilityRate(
                self.assumed_utility_rate,
            ));
        }
        if self.cost_per_watt < Decimal::ZERO {
            return Err(LegacyEstimatorError::InvalidCostPerWatt(self.cost_per_watt));
        }
        if self.oversize_factor < Decimal::ONE {
            return Err(LegacyEstimatorError::InvalidOversizeFactor(
                self.oversize_factor,
            ));
        }
        if self.loan_annual_rate < Decimal::ZERO || self.loan_annual_rate > Decimal::ONE {
            return Err(LegacyEstimatorError::InvalidLoanRate(self.loan_annual_rate));
        }
        if !(1..=MAX_LOAN_TERM_YEARS).contains(&self.loan_term_years) {
            return Err(LegacyEstimatorError::InvalidLoanTerm(self.loan_term_years));
        }
        if self.default_sun_hours <= Decimal::ZERO {
            return Err(LegacyEstimatorError::InvalidSunHours(self.default_sun_hours));
        }
        Ok(())
    }
}

/// Calculator for the legacy system-sizing estimate.
#[derive(Debug, Clone)]
pub struct LegacySystemEstimator<'a> {
    sun_hours: &'a SunHoursTable,
    config: LegacyEstimatorConfig,
}

impl<'a> LegacySystemEstimator<'a> {
    pub fn new(
        sun_hours: &'a SunHoursTable,
        config: LegacyEstimatorConfig,
    ) -> Self {
        Self { sun_hours, config }
    }

    pub fn estimate(
        &self,
        monthly_bill: Decimal,
        state: &str,
    ) -> Result<LegacyCalculationResult, LegacyEstimatorError> {
        self.config.validate()?;
        if monthly_bill < Decimal::ZERO {
            return Err(LegacyEstimatorError::NegativeBill(monthly_bill));
        }

        let overflow = || LegacyEstimatorError::Overflow { bill: monthly_bill };

        let sun_hours = self.sun_hours_for(state);
        let system_size_kw = self
            .system_size_kw(monthly_bill, sun_hours)
            .ok_or_else(overflow)?;
        let system_cost = system_size_kw
            .checked_mul(WATTS_PER_KW)
            .and_then(|watts| watts.checked_mul(self.config.cost_per_watt))
            .map(round_half_up)
            .ok_or_else(overflow)?;
        let monthly_payment = self.monthly_payment(system_cost).ok_or_else(overflow)?;

        let (yearly_cost_utility, yearly_cost_solar) = self
            .cumulative_costs(monthly_bill, system_cost)
            .ok_or_else(overflow)?;
        let payback_period = self.payback_period(&yearly_cost_utility, &yearly_cost_solar);

        let final_utility = yearly_cost_utility.last().copied().unwrap_or(Decimal::ZERO);
        let final_solar = yearly_cost_solar.last().copied().unwrap_or(Decimal::ZERO);
        let total_savings = final_utility.checked_sub(final_solar).ok_or_else(overflow)?;
        let roi = if system_cost > Decimal::ZERO {
            total_savings
                .checked_div(system_cost)
                .and_then(|ratio| ratio.checked_mul(ONE_HUNDRED))
                .map(round_half_up)
                .ok_or_else(overflow)?
        } else {
            Decimal::ZERO
        };

        debug!(
            state,
            %sun_hours,
            %system_size_kw,
            %system_cost,
            payback_period,
            "legacy estimate complete"
        );

        Ok(LegacyCalculationResult {
            yearly_cost_utility,
            yearly_cost_solar,
            total_savings,
            payback_period,
            roi,
            system_size_kw,
            system_cost,
            monthly_payment,
        })
    }

    fn sun_hours_for(
        &self,
        state: &str,
    ) -> Decimal {
        self.sun_hours.lookup(state).unwrap_or_else(|| {
            warn!(
                state,
                default = %self.config.default_sun_hours,
                "unknown state; using default sun hours"
            );
            self.config.default_sun_hours
        })
    }

    /// Whole kilowatts needed to cover daily consumption, with the oversize margin.
    fn system_size_kw(
        &self,
        monthly_bill: Decimal,
        sun_hours: Decimal,
    ) -> Option<Decimal> {
        let monthly_kwh = monthly_bill.checked_div(self.config.assumed_utility_rate)?;
        let daily_kwh = monthly_kwh.checked_div(DAYS_PER_MONTH)?;
        let kw = daily_kwh.checked_div(sun_hours)?;
        Some(kw.checked_mul(self.config.oversize_factor)?.ceil())
    }

    /// Level monthly payment: `P·r·(1+r)^n / ((1+r)^n − 1)`, or `P/n` at 0%.
    ///
    /// The validated term keeps `n` at or below 600 periods.
    fn monthly_payment(
        &self,
        principal: Decimal,
    ) -> Option<Decimal> {
        let periods = self.config.loan_term_years * 12;
        if principal <= Decimal::ZERO {
            return Some(Decimal::ZERO);
        }
        let monthly_rate = self.config.loan_annual_rate / MONTHS_PER_YEAR;
        if monthly_rate.is_zero() {
            return principal.checked_div(Decimal::from(periods)).map(round_half_up);
        }
        let growth = compound(Decimal::ONE + monthly_rate, periods);
        principal
            .checked_mul(monthly_rate)?
            .checked_mul(growth)?
            .checked_div(growth - Decimal::ONE)
            .map(round_half_up)
    }

    /// Cumulative utility and solar cost at the end of each projected year.
    fn cumulative_costs(
        &self,
        monthly_bill: Decimal,
        system_cost: Decimal,
    ) -> Option<(Vec<Decimal>, Vec<Decimal>)> {
        let inflation = growth_factor(self.config.utility_inflation_percent);
        let annual_maintenance = system_cost.checked_mul(self.config.maintenance_rate)?;
        let annual_bill = monthly_bill.checked_mul(MONTHS_PER_YEAR)?;
        let mut utility_escalation = Decimal::ONE;
        let mut cumulative_utility = Decimal::ZERO;
        let mut utility = Vec::with_capacity(PROJECTION_YEARS as usize);
        let mut solar = Vec::with_capacity(PROJECTION_YEARS as usize);

        for year in 1..=PROJECTION_YEARS {
            let inflated_bill = round_half_up(annual_bill.checked_mul(utility_escalation)?);
            cumulative_utility = cumulative_utility.checked_add(inflated_bill)?;
            utility.push(cumulative_utility);

            let maintenance = annual_maintenance.checked_mul(Decimal::from(year))?;
            solar.push(round_half_up(system_cost.checked_add(maintenance)?));

            utility_escalation = utility_escalation.checked_mul(inflation)?;
        }

        Some((utility, solar))
    }

    /// First 1-based year where cumulative utility meets cumulative solar;
    /// the full horizon if it never does.
    fn payback_period(
        &self,
        utility: &[Decimal],
        solar: &[Decimal],
    ) -> u32 {
        utility
            .iter()
            .zip(solar)
            .position(|(u, s)| u >= s)
            .map_or(PROJECTION_YEARS, |index| index as u32 + 1)
    }
}
