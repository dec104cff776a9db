use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::InputError;

/// How the solar service plan is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    /// Price is a rate per kWh of system production.
    #[default]
    #[serde(alias = "kwhRate")]
    KwhRate,
    /// Price is a flat monthly amount.
    #[serde(alias = "monthlyPrice")]
    MonthlyPrice,
}

impl PricingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KwhRate => "kwh_rate",
            Self::MonthlyPrice => "monthly_price",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "kwh_rate" | "kwhRate" | "kwh" => Some(Self::KwhRate),
            "monthly_price" | "monthlyPrice" | "monthly" => Some(Self::MonthlyPrice),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::KwhRate => "Per kWh",
            Self::MonthlyPrice => "Monthly price",
        }
    }
}

impl fmt::Display for PricingMode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PricingMode {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InputError::UnknownPricingMode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_snake_and_camel_case() {
        assert_eq!(PricingMode::parse("kwh_rate"), Some(PricingMode::KwhRate));
        assert_eq!(PricingMode::parse("kwhRate"), Some(PricingMode::KwhRate));
        assert_eq!(PricingMode::parse("monthly_price"), Some(PricingMode::MonthlyPrice));
        assert_eq!(PricingMode::parse(" monthlyPrice "), Some(PricingMode::MonthlyPrice));
    }

    #[test]
    fn from_str_rejects_unknown_mode() {
        let result = "per_panel".parse::<PricingMode>();

        assert_eq!(result, Err(InputError::UnknownPricingMode("per_panel".to_string())));
    }

    #[test]
    fn as_str_round_trips_through_parse() {
        for mode in [PricingMode::KwhRate, PricingMode::MonthlyPrice] {
            assert_eq!(PricingMode::parse(mode.as_str()), Some(mode));
        }
    }
}
