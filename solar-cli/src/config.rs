//! TOML configuration file.
//!
//! Every section is optional. Relative table paths are resolved against the
//! directory holding the config file.
//!
//! ```toml
//! [calendar]
//! current_year = 2026
//!
//! [rates]
//! historical_csv = "rates.csv"
//! sun_hours_csv = "sun_hours.csv"
//!
//! [inputs]
//! customer_name = "Rivera"
//! annual_kwh_usage = 10000
//! utility_rate = "0.15"
//! pricing_mode = "kwh_rate"
//!
//! [legacy]
//! cost_per_watt = "2.75"
//! ```

use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Local};
use serde::Deserialize;
use solar_core::{CalculatorInputs, LegacyEstimatorConfig, LegacyEstimatorError};
use thiserror::Error;

/// Accepted range for the year treated as "now".
pub const CURRENT_YEAR_RANGE: RangeInclusive<i32> = 1..=9999;

/// Errors raised while reading or checking the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("current year must be between 1 and 9999, got {0}")]
    InvalidCurrentYear(i32),

    #[error("invalid [legacy] section: {0}")]
    Legacy(#[from] LegacyEstimatorError),
}

/// Top-level configuration parsed from TOML.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub calendar: CalendarConfig,

    #[serde(default)]
    pub rates: RatesConfig,

    /// Default calculator inputs for `project`; flags override them.
    #[serde(default)]
    pub inputs: CalculatorInputs,

    #[serde(default)]
    pub legacy: LegacyEstimatorConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalendarConfig {
    /// The year treated as "now". The system clock is used when absent.
    pub current_year: Option<i32>,
}

/// Optional CSV replacements for the built-in lookup tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RatesConfig {
    pub historical_csv: Option<PathBuf>,
    pub sun_hours_csv: Option<PathBuf>,
}

impl AppConfig {
    /// Reads and validates a config file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&content)?;
        if let Some(base) = path.parent() {
            config.rates.rebase(base);
        }
        Ok(config)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(year) = self.calendar.current_year {
            check_current_year(year)?;
        }
        self.legacy.validate()?;
        Ok(())
    }

    /// Current year by precedence: the flag, then `[calendar]`, then the
    /// local system clock. The flag gets the same range check as the file.
    pub fn resolve_current_year(
        &self,
        flag: Option<i32>,
    ) -> Result<i32, ConfigError> {
        let year = flag
            .or(self.calendar.current_year)
            .unwrap_or_else(|| Local::now().year());
        check_current_year(year)
    }
}

fn check_current_year(year: i32) -> Result<i32, ConfigError> {
    if CURRENT_YEAR_RANGE.contains(&year) {
        Ok(year)
    } else {
        Err(ConfigError::InvalidCurrentYear(year))
    }
}

impl RatesConfig {
    fn rebase(
        &mut self,
        base: &Path,
    ) {
        for path in [&mut self.historical_csv, &mut self.sun_hours_csv]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
