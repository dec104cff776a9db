//! CSV export of per-year records.
//!
//! Money columns are rounded to cents here; the records themselves keep full
//! precision.

use std::io;

use rust_decimal::Decimal;
use serde::Serialize;
use solar_core::calculations::common::round_half_up;
use solar_core::{SunkCostYearRecord, YearRecord};

fn cents(value: Decimal) -> Decimal {
    let mut rounded = round_half_up(value);
    rounded.rescale(2);
    rounded
}

#[derive(Serialize)]
struct YearRow {
    year: u32,
    utility_monthly: Decimal,
    utility_yearly: Decimal,
    service_monthly: Decimal,
    service_yearly: Decimal,
    monthly_savings: Decimal,
    annual_savings: Decimal,
    cumulative_savings: Decimal,
}

impl From<&YearRecord> for YearRow {
    fn from(record: &YearRecord) -> Self {
        Self {
            year: record.year,
            utility_monthly: cents(record.utility_monthly),
            utility_yearly: cents(record.utility_yearly),
            service_monthly: cents(record.service_monthly),
            service_yearly: cents(record.service_yearly),
            monthly_savings: cents(record.monthly_savings),
            annual_savings: cents(record.annual_savings),
            cumulative_savings: cents(record.cumulative_savings),
        }
    }
}

#[derive(Serialize)]
struct SunkCostRow {
    year: i32,
    /// Table rate, written as stored.
    estimated_rate: Decimal,
    monthly_bill: Decimal,
    annual_cost: Decimal,
    cumulative_cost: Decimal,
}

impl From<&SunkCostYearRecord> for SunkCostRow {
    fn from(record: &SunkCostYearRecord) -> Self {
        Self {
            year: record.year,
            estimated_rate: record.estimated_rate,
            monthly_bill: cents(record.monthly_bill),
            annual_cost: cents(record.annual_cost),
            cumulative_cost: cents(record.cumulative_cost),
        }
    }
}

fn write_rows<W, T>(
    writer: W,
    rows: impl IntoIterator<Item = T>,
) -> Result<(), csv::Error>
where
    W: io::Write,
    T: Serialize,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes one row per projection year, with a header row.
pub fn write_year_records<W: io::Write>(
    writer: W,
    records: &[YearRecord],
) -> Result<(), csv::Error> {
    write_rows(writer, records.iter().map(YearRow::from))
}

/// Writes one row per calendar year in the home, with a header row.
pub fn write_sunk_cost_records<W: io::Write>(
    writer: W,
    records: &[SunkCostYearRecord],
) -> Result<(), csv::Error> {
    write_rows(writer, records.iter().map(SunkCostRow::from))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use solar_core::{CalculatorInputs, CostProjector, PricingMode};

    use super::*;

    #[test]
    fn year_records_have_header_and_one_row_per_year() {
        let inputs = CalculatorInputs {
            annual_kwh_usage: dec!(10000),
            utility_rate: dec!(0.15),
            utility_inflation_rate: dec!(6),
            pricing_mode: PricingMode::KwhRate,
            service_price: dec!(0.10),
            annual_system_production: dec!(10000),
            annual_service_escalator: dec!(2.9),
            ..CalculatorInputs::default()
        };
        let result = CostProjector::new().project(&inputs).unwrap();
        let mut buffer = Vec::new();

        write_year_records(&mut buffer, &result.years).unwrap();

        let mut reader = csv::Reader::from_reader(buffer.as_slice());
        assert_eq!(
            reader.headers().unwrap(),
            vec![
                "year",
                "utility_monthly",
                "utility_yearly",
                "service_monthly",
                "service_yearly",
                "monthly_savings",
                "annual_savings",
                "cumulative_savings",
            ]
        );
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 25);

        let first: Vec<Decimal> = rows[0]
            .iter()
            .map(|field| Decimal::from_str(field).unwrap())
            .collect();
        assert_eq!(
            first,
            vec![
                dec!(1),
                dec!(125.00),
                dec!(1500.00),
                dec!(83.33),
                dec!(1000.00),
                dec!(41.67),
                dec!(500.00),
                dec!(500.00),
            ]
        );
    }

    #[test]
    fn sunk_cost_records_use_field_names_as_header() {
        let records = vec![SunkCostYearRecord {
            year: 2026,
            estimated_rate: dec!(0.19),
            monthly_bill: dec!(200.00),
            annual_cost: dec!(2400.00),
            cumulative_cost: dec!(2400.00),
        }];
        let mut buffer = Vec::new();

        write_sunk_cost_records(&mut buffer, &records).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "year,estimated_rate,monthly_bill,annual_cost,cumulative_cost\n2026,0.19,200.00,2400.00,2400.00\n"
        );
    }

    #[test]
    fn money_columns_are_written_in_cents() {
        let records = vec![SunkCostYearRecord {
            year: 2010,
            estimated_rate: dec!(0.116),
            monthly_bill: dec!(200) * dec!(0.116) / dec!(0.19),
            annual_cost: dec!(2400) * dec!(0.116) / dec!(0.19),
            cumulative_cost: dec!(2400) * dec!(0.116) / dec!(0.19),
        }];
        let mut buffer = Vec::new();

        write_sunk_cost_records(&mut buffer, &records).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "year,estimated_rate,monthly_bill,annual_cost,cumulative_cost\n2010,0.116,122.11,1465.26,1465.26\n"
        );
    }

    #[test]
    fn empty_records_write_nothing() {
        let mut buffer = Vec::new();

        write_sunk_cost_records(&mut buffer, &[]).unwrap();

        assert!(buffer.is_empty());
    }
}
