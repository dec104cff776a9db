use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use solar_core::{HistoricalRates, RateTableError, SunHoursTable};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading a rate or sun-hours table.
#[derive(Debug, Error)]
pub enum RateTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid table: {0}")]
    Table(#[from] RateTableError),
}

impl From<csv::Error> for RateTableLoaderError {
    fn from(err: csv::Error) -> Self {
        RateTableLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of a historical rates CSV file.
///
/// - `year`: calendar year (e.g., 2020)
/// - `rate`: average residential rate in $/kWh (e.g., 0.134)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RateRecord {
    pub year: i32,
    pub rate: Decimal,
}

/// A single row of a sun-hours CSV file.
///
/// - `state`: two-letter state code
/// - `sun_hours`: average daily peak sun hours
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SunHoursRecord {
    pub state: String,
    pub sun_hours: Decimal,
}

fn reader_for<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn open(path: &Path) -> Result<File, RateTableLoaderError> {
    File::open(path).map_err(|source| RateTableLoaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loader for historical rate tables stored as `year,rate` CSV.
pub struct RateTableLoader;

impl RateTableLoader {
    /// Parse rate records from a CSV reader, in file order.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<RateRecord>, RateTableLoaderError> {
        let mut csv_reader = reader_for(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: RateRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Build a validated table from parsed records.
    pub fn build(records: &[RateRecord]) -> Result<HistoricalRates, RateTableLoaderError> {
        let table = HistoricalRates::from_entries(records.iter().map(|r| (r.year, r.rate)))?;
        debug!(
            entries = table.len(),
            earliest = table.earliest_year(),
            latest = table.latest_year(),
            "historical rate table built"
        );
        Ok(table)
    }

    /// Read, parse and validate a rate table file.
    pub fn load_from_path(path: &Path) -> Result<HistoricalRates, RateTableLoaderError> {
        let records = Self::parse(open(path)?)?;
        Self::build(&records)
    }
}

/// Loader for sun-hours tables stored as `state,sun_hours` CSV.
pub struct SunHoursLoader;

impl SunHoursLoader {
    pub fn parse<R: Read>(reader: R) -> Result<Vec<SunHoursRecord>, RateTableLoaderError> {
        let mut csv_reader = reader_for(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: SunHoursRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    pub fn build(records: &[SunHoursRecord]) -> Result<SunHoursTable, RateTableLoaderError> {
        let table = SunHoursTable::from_entries(
            records.iter().map(|r| (r.state.as_str(), r.sun_hours)),
        )?;
        debug!(entries = table.len(), "sun hours table built");
        Ok(table)
    }

    pub fn load_from_path(path: &Path) -> Result<SunHoursTable, RateTableLoaderError> {
        let records = Self::parse(open(path)?)?;
        Self::build(&records)
    }
}
