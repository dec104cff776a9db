//! CSV loader for batches of calculator scenarios.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Optional
//! columns may be left out entirely or left empty; either way they read as
//! zero (or `kwh_rate` for the pricing mode).
//!
//! | Column                     | Required | Type    | Notes                                 |
//! |----------------------------|----------|---------|---------------------------------------|
//! | `customer_name`            | no       | string  |                                       |
//! | `annual_kwh_usage`         | yes      | decimal | e.g. `10000`                          |
//! | `utility_rate`             | yes      | decimal | $/kWh, e.g. `0.15`                    |
//! | `utility_inflation_rate`   | no       | decimal | percent, `6` means 6%                 |
//! | `monthly_connection_fee`   | no       | decimal |                                       |
//! | `pricing_mode`             | no       | string  | `kwh_rate` or `monthly_price`         |
//! | `service_price`            | yes      | decimal | $/kWh or $/month per `pricing_mode`   |
//! | `annual_system_production` | no       | decimal | kWh; only used with `kwh_rate`        |
//! | `annual_service_escalator` | no       | decimal | percent                               |
//!
//! ### Example
//!
//! ```csv
//! customer_name,annual_kwh_usage,utility_rate,utility_inflation_rate,pricing_mode,service_price,annual_system_production,annual_service_escalator
//! Rivera,10000,0.15,6,kwh_rate,0.10,10000,2.9
//! Chen,12000,0.14,4,monthly_price,120,,2
//! ```
//!
//! Every row is validated with [`CalculatorInputs::validate`] before it is
//! returned.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use solar_core::{CalculatorInputs, InputError, PricingMode};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct CsvRow {
    customer_name: Option<String>,
    annual_kwh_usage: Decimal,
    utility_rate: Decimal,
    utility_inflation_rate: Option<Decimal>,
    monthly_connection_fee: Option<Decimal>,
    pricing_mode: Option<String>,
    service_price: Decimal,
    annual_system_production: Option<Decimal>,
    annual_service_escalator: Option<Decimal>,
}

/// Errors that can occur while loading scenario CSV data.
#[derive(Debug, thiserror::Error)]
pub enum ScenarioLoadError {
    /// Bad structure, a missing required column, or a type mismatch.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// `row` is 1-based; the header is row 0.
    #[error("unrecognised pricing mode '{mode}' on row {row}")]
    InvalidPricingMode { mode: String, row: usize },

    #[error("invalid inputs on row {row}: {source}")]
    InvalidInputs {
        row: usize,
        #[source]
        source: InputError,
    },

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<CalculatorInputs, ScenarioLoadError> {
    let pricing_mode = match row.pricing_mode.as_deref() {
        None | Some("") => PricingMode::default(),
        Some(mode) => {
            PricingMode::parse(mode).ok_or_else(|| ScenarioLoadError::InvalidPricingMode {
                mode: mode.to_string(),
                row: row_number,
            })?
        }
    };

    let inputs = CalculatorInputs {
        customer_name: row.customer_name.unwrap_or_default(),
        annual_kwh_usage: row.annual_kwh_usage,
        utility_rate: row.utility_rate,
        utility_inflation_rate: row.utility_inflation_rate.unwrap_or_default(),
        monthly_connection_fee: row.monthly_connection_fee.unwrap_or_default(),
        pricing_mode,
        service_price: row.service_price,
        annual_system_production: row.annual_system_production.unwrap_or_default(),
        annual_service_escalator: row.annual_service_escalator.unwrap_or_default(),
    };

    inputs
        .validate()
        .map_err(|source| ScenarioLoadError::InvalidInputs {
            row: row_number,
            source,
        })?;

    Ok(inputs)
}

/// Parse CSV text and return one [`CalculatorInputs`] per data row, in file
/// order.
///
/// # Errors
///
/// * [`ScenarioLoadError::Parse`] if the CSV is structurally invalid or a
///   required field cannot be deserialised.
/// * [`ScenarioLoadError::InvalidPricingMode`] for an unknown pricing mode.
/// * [`ScenarioLoadError::InvalidInputs`] if a row fails validation.
pub fn load_from_str(input: &str) -> Result<Vec<CalculatorInputs>, ScenarioLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    let scenarios = reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = scenarios.len(), "scenarios loaded");
    Ok(scenarios)
}

/// Reads a file from disk and delegates to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<CalculatorInputs>, ScenarioLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ScenarioLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const MINIMAL_CSV: &str = "\
annual_kwh_usage,utility_rate,service_price
10000,0.15,0.10
";

    const FULL_CSV: &str = "\
customer_name,annual_kwh_usage,utility_rate,utility_inflation_rate,monthly_connection_fee,pricing_mode,service_price,annual_system_production,annual_service_escalator
Rivera,10000,0.15,6,10,kwh_rate,0.10,9500,2.9
";

    const MULTI_ROW_CSV: &str = "\
customer_name,annual_kwh_usage,utility_rate,pricing_mode,service_price,annual_system_production
Rivera,10000,0.15,kwh_rate,0.10,10000
Chen,12000,0.14,monthly_price,120,
Okafor,8000,0.17,,0.09,8000
";

    // =========================================================================
    // Successful loads
    // =========================================================================

    #[test]
    fn minimal_csv_defaults_optional_fields() {
        let scenarios = load_from_str(MINIMAL_CSV).unwrap();

        assert_eq!(scenarios.len(), 1);
        let s = &scenarios[0];
        assert_eq!(s.customer_name, "");
        assert_eq!(s.annual_kwh_usage, dec!(10000));
        assert_eq!(s.utility_rate, dec!(0.15));
        assert_eq!(s.service_price, dec!(0.10));
        assert_eq!(s.pricing_mode, PricingMode::KwhRate);
        assert_eq!(s.utility_inflation_rate, Decimal::ZERO);
        assert_eq!(s.monthly_connection_fee, Decimal::ZERO);
        assert_eq!(s.annual_system_production, Decimal::ZERO);
        assert_eq!(s.annual_service_escalator, Decimal::ZERO);
    }

    #[test]
    fn full_csv_populates_every_field() {
        let scenarios = load_from_str(FULL_CSV).unwrap();

        assert_eq!(
            scenarios[0],
            CalculatorInputs {
                customer_name: "Rivera".to_string(),
                annual_kwh_usage: dec!(10000),
                utility_rate: dec!(0.15),
                utility_inflation_rate: dec!(6),
                monthly_connection_fee: dec!(10),
                pricing_mode: PricingMode::KwhRate,
                service_price: dec!(0.10),
                annual_system_production: dec!(9500),
                annual_service_escalator: dec!(2.9),
            }
        );
    }

    #[test]
    fn multi_row_keeps_file_order_and_modes() {
        let scenarios = load_from_str(MULTI_ROW_CSV).unwrap();

        assert_eq!(scenarios.len(), 3);
        assert_eq!(scenarios[0].customer_name, "Rivera");
        assert_eq!(scenarios[1].pricing_mode, PricingMode::MonthlyPrice);
        assert_eq!(scenarios[1].annual_system_production, Decimal::ZERO);
        assert_eq!(scenarios[2].pricing_mode, PricingMode::KwhRate);
    }

    #[test]
    fn header_only_csv_is_empty() {
        let scenarios = load_from_str("annual_kwh_usage,utility_rate,service_price\n").unwrap();

        assert!(scenarios.is_empty());
    }

    // =========================================================================
    // Errors
    // =========================================================================

    #[test]
    fn unknown_pricing_mode_reports_row() {
        let csv = "\
annual_kwh_usage,utility_rate,pricing_mode,service_price
10000,0.15,kwh_rate,0.10
10000,0.15,per_panel,0.10
";

        match load_from_str(csv).unwrap_err() {
            ScenarioLoadError::InvalidPricingMode { mode, row } => {
                assert_eq!(mode, "per_panel");
                assert_eq!(row, 2);
            }
            other => panic!("expected InvalidPricingMode, got {other:?}"),
        }
    }

    #[test]
    fn invalid_inputs_report_row_and_cause() {
        let csv = "annual_kwh_usage,utility_rate,service_price\n-5,0.15,0.10\n";

        match load_from_str(csv).unwrap_err() {
            ScenarioLoadError::InvalidInputs { row, source } => {
                assert_eq!(row, 1);
                assert_eq!(source, InputError::NegativeUsage(dec!(-5)));
            }
            other => panic!("expected InvalidInputs, got {other:?}"),
        }
    }

    #[test]
    fn missing_required_column_is_parse_error() {
        let csv = "annual_kwh_usage,service_price\n10000,0.10\n";

        assert!(matches!(
            load_from_str(csv),
            Err(ScenarioLoadError::Parse(_))
        ));
    }

    #[test]
    fn non_numeric_value_is_parse_error() {
        let csv = "annual_kwh_usage,utility_rate,service_price\nlots,0.15,0.10\n";

        assert!(matches!(
            load_from_str(csv),
            Err(ScenarioLoadError::Parse(_))
        ));
    }

    #[test]
    fn load_from_missing_file_is_io_error() {
        let result = load_from_file(Path::new("no/such/scenarios.csv"));

        assert!(matches!(result, Err(ScenarioLoadError::Io { .. })));
    }
}
