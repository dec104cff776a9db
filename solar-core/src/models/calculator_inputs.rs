use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::PricingMode;

/// Smallest accepted annual escalation, exclusive. At -100% every later
/// year would collapse to zero or flip sign.
pub const MIN_ESCALATION_PERCENT: Decimal = dec!(-100);

/// Largest accepted annual escalation, inclusive.
pub const MAX_ESCALATION_PERCENT: Decimal = dec!(100);

/// Largest accepted usage, production, rate, fee or price. Keeps 25 years of
/// escalation at the maximum percentage inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = dec!(1000000000);

/// Errors raised when calculator inputs fail validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("annual kWh usage must be non-negative, got {0}")]
    NegativeUsage(Decimal),

    #[error("utility rate must be non-negative, got {0}")]
    NegativeUtilityRate(Decimal),

    #[error("monthly connection fee must be non-negative, got {0}")]
    NegativeConnectionFee(Decimal),

    #[error("service price must be non-negative, got {0}")]
    NegativeServicePrice(Decimal),

    #[error("annual system production must be non-negative, got {0}")]
    NegativeSystemProduction(Decimal),

    #[error("utility inflation rate must be above -100% and at most 100%, got {0}%")]
    InvalidInflationRate(Decimal),

    #[error("service escalator must be above -100% and at most 100%, got {0}%")]
    InvalidServiceEscalator(Decimal),

    #[error("{field} must be at most {max}, got {value}", max = MAX_AMOUNT)]
    AmountTooLarge { field: &'static str, value: Decimal },

    #[error("unknown pricing mode '{0}' (expected kwh_rate or monthly_price)")]
    UnknownPricingMode(String),
}

/// Household usage and service-plan pricing fed to the cost projector.
///
/// Missing fields deserialize to zero, matching an untouched form field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorInputs {
    pub customer_name: String,

    /// Annual electricity consumption in kWh.
    pub annual_kwh_usage: Decimal,

    /// Current utility rate per kWh.
    pub utility_rate: Decimal,

    /// Annual utility rate inflation, in percent (6 means 6%).
    pub utility_inflation_rate: Decimal,

    /// Fixed monthly connection fee charged by the utility.
    pub monthly_connection_fee: Decimal,

    pub pricing_mode: PricingMode,

    /// Service price, per kWh or per month depending on `pricing_mode`.
    pub service_price: Decimal,

    /// Annual system production in kWh. Only used with [`PricingMode::KwhRate`].
    pub annual_system_production: Decimal,

    /// Annual service price escalator, in percent.
    pub annual_service_escalator: Decimal,
}

impl CalculatorInputs {
    /// Checks every numeric field against the accepted ranges.
    ///
    /// Zero is accepted everywhere. Amounts must lie in `0..=MAX_AMOUNT` and
    /// the two escalation percentages in (-100, 100].
    pub fn validate(&self) -> Result<(), InputError> {
        if self.annual_kwh_usage < Decimal::ZERO {
            return Err(InputError::NegativeUsage(self.annual_kwh_usage));
        }
        if self.utility_rate < Decimal::ZERO {
            return Err(InputError::NegativeUtilityRate(self.utility_rate));
        }
        if self.monthly_connection_fee < Decimal::ZERO {
            return Err(InputError::NegativeConnectionFee(
                self.monthly_connection_fee,
            ));
        }
        if self.service_price < Decimal::ZERO {
            return Err(InputError::NegativeServicePrice(self.service_price));
        }
        if self.annual_system_production < Decimal::ZERO {
            return Err(InputError::NegativeSystemProduction(
                self.annual_system_production,
            ));
        }
        for (field, value) in [
            ("annual kWh usage", self.annual_kwh_usage),
            ("utility rate", self.utility_rate),
            ("monthly connection fee", self.monthly_connection_fee),
            ("service price", self.service_price),
            ("annual system production", self.annual_system_production),
        ] {
            if value > MAX_AMOUNT {
                return Err(InputError::AmountTooLarge { field, value });
            }
        }
        if !is_valid_escalation(self.utility_inflation_rate) {
            return Err(InputError::InvalidInflationRate(
                self.utility_inflation_rate,
            ));
        }
        if !is_valid_escalation(self.annual_service_escalator) {
            return Err(InputError::InvalidServiceEscalator(
                self.annual_service_escalator,
            ));
        }
        Ok(())
    }
}

fn is_valid_escalation(percent: Decimal) -> bool {
    percent > MIN_ESCALATION_PERCENT && percent <= MAX_ESCALATION_PERCENT
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn valid_inputs() -> CalculatorInputs {
        CalculatorInputs {
            customer_name: "Test Household".to_string(),
            annual_kwh_usage: dec!(10000),
            utility_rate: dec!(0.15),
            utility_inflation_rate: dec!(6),
            monthly_connection_fee: dec!(0),
            pricing_mode: PricingMode::KwhRate,
            service_price: dec!(0.10),
            annual_system_production: dec!(10000),
            annual_service_escalator: dec!(2.9),
        }
    }

    #[test]
    fn validate_accepts_typical_inputs() {
        assert_eq!(valid_inputs().validate(), Ok(()));
    }

    #[test]
    fn validate_accepts_all_zero_inputs() {
        assert_eq!(CalculatorInputs::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_negative_usage() {
        let inputs = CalculatorInputs {
            annual_kwh_usage: dec!(-1),
            ..valid_inputs()
        };

        assert_eq!(inputs.validate(), Err(InputError::NegativeUsage(dec!(-1))));
    }

    #[test]
    fn validate_rejects_negative_service_price() {
        let inputs = CalculatorInputs {
            service_price: dec!(-0.01),
            ..valid_inputs()
        };

        assert_eq!(
            inputs.validate(),
            Err(InputError::NegativeServicePrice(dec!(-0.01)))
        );
    }

    #[test]
    fn validate_rejects_usage_above_max_amount() {
        let inputs = CalculatorInputs {
            annual_kwh_usage: dec!(2000000000),
            ..valid_inputs()
        };

        assert_eq!(
            inputs.validate(),
            Err(InputError::AmountTooLarge {
                field: "annual kWh usage",
                value: dec!(2000000000),
            })
        );
    }

    #[test]
    fn validate_accepts_max_amount() {
        let inputs = CalculatorInputs {
            utility_rate: MAX_AMOUNT,
            ..valid_inputs()
        };

        assert_eq!(inputs.validate(), Ok(()));
    }

    #[test]
    fn validate_accepts_negative_escalator_above_floor() {
        let inputs = CalculatorInputs {
            annual_service_escalator: dec!(-2.5),
            ..valid_inputs()
        };

        assert_eq!(inputs.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_inflation_at_minus_one_hundred() {
        let inputs = CalculatorInputs {
            utility_inflation_rate: dec!(-100),
            ..valid_inputs()
        };

        assert_eq!(
            inputs.validate(),
            Err(InputError::InvalidInflationRate(dec!(-100)))
        );
    }

    #[test]
    fn validate_rejects_escalator_above_ceiling() {
        let inputs = CalculatorInputs {
            annual_service_escalator: dec!(100.5),
            ..valid_inputs()
        };

        assert_eq!(
            inputs.validate(),
            Err(InputError::InvalidServiceEscalator(dec!(100.5)))
        );
    }
}
