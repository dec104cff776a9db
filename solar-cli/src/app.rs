use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use solar_core::{
    CalculationResult, CalculatorInputs, CostProjector, HistoricalRates, LegacyCalculationResult,
    LegacySystemEstimator, SunHoursTable, SunkCostConfig, SunkCostProjector, SunkCostResult,
};
use solar_data::{RateTableLoader, SunHoursLoader, scenarios};
use tracing::{debug, info};

use crate::cli::{Cli, Command, ProjectArgs};
use crate::config::{AppConfig, RatesConfig};
use crate::export;
use crate::report::{
    BatchReport, LegacyReport, MoveInYearsReport, ProjectionReport, SunkCostReport,
};

/// Resolved configuration plus the lookup tables every command reads from.
#[derive(Debug)]
pub struct App {
    config: AppConfig,
    current_year: i32,
    rates: HistoricalRates,
    sun_hours: SunHoursTable,
}

impl App {
    /// Builds the app from parsed command-line arguments, reading the config
    /// file when one is given.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => AppConfig::from_toml_file(path)
                .with_context(|| format!("failed to load config '{}'", path.display()))?,
            None => AppConfig::default(),
        };
        Self::new(config, cli.current_year)
    }

    pub fn new(
        config: AppConfig,
        current_year_flag: Option<i32>,
    ) -> Result<Self> {
        let current_year = config.resolve_current_year(current_year_flag)?;
        let (rates, sun_hours) = load_tables(&config.rates)?;
        debug!(current_year, rate_years = rates.len(), states = sun_hours.len(), "app ready");

        Ok(Self {
            config,
            current_year,
            rates,
            sun_hours,
        })
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Runs one subcommand and returns the text to print.
    pub fn run(
        &self,
        command: &Command,
    ) -> Result<String> {
        match command {
            Command::Project(args) => {
                let (inputs, result) = self.project(args)?;
                if let Some(path) = &args.csv {
                    let file = create(path)?;
                    export::write_year_records(file, &result.years)
                        .with_context(|| format!("failed to write '{}'", path.display()))?;
                    info!(path = %path.display(), "projection exported");
                }
                Ok(ProjectionReport {
                    inputs: &inputs,
                    result: &result,
                }
                .to_string())
            }
            Command::Batch { file } => {
                let rows = self.batch(file)?;
                Ok(BatchReport { rows: &rows }.to_string())
            }
            Command::SunkCost {
                bill,
                moved_in,
                csv,
            } => {
                let result = self.sunk_cost(*bill, *moved_in)?;
                if let Some(path) = csv {
                    let file = create(path)?;
                    export::write_sunk_cost_records(file, &result.years)
                        .with_context(|| format!("failed to write '{}'", path.display()))?;
                    info!(path = %path.display(), "sunk cost exported");
                }
                Ok(SunkCostReport {
                    current_monthly_bill: *bill,
                    year_moved_in: *moved_in,
                    current_year: self.current_year,
                    result: &result,
                }
                .to_string())
            }
            Command::MoveInYears => Ok(MoveInYearsReport {
                years: &self.move_in_years(),
            }
            .to_string()),
            Command::Estimate { bill, state } => {
                let result = self.estimate(*bill, state)?;
                Ok(LegacyReport {
                    state,
                    result: &result,
                }
                .to_string())
            }
        }
    }

    /// Projects the config's `[inputs]` with command-line overrides applied.
    pub fn project(
        &self,
        args: &ProjectArgs,
    ) -> Result<(CalculatorInputs, CalculationResult)> {
        let inputs = args.apply(self.config.inputs.clone());
        let result = CostProjector::new()
            .project(&inputs)
            .context("invalid calculator inputs")?;
        Ok((inputs, result))
    }

    pub fn batch(
        &self,
        path: &Path,
    ) -> Result<Vec<(CalculatorInputs, CalculationResult)>> {
        let loaded = scenarios::load_from_file(path)
            .with_context(|| format!("failed to load scenarios from '{}'", path.display()))?;
        let projector = CostProjector::new();

        loaded
            .into_iter()
            .map(|inputs| -> Result<_> {
                let result = projector.project(&inputs)?;
                Ok((inputs, result))
            })
            .collect()
    }

    pub fn sunk_cost(
        &self,
        current_monthly_bill: Decimal,
        year_moved_in: i32,
    ) -> Result<SunkCostResult> {
        let projector =
            SunkCostProjector::new(&self.rates, SunkCostConfig::for_year(self.current_year));
        Ok(projector.project(current_monthly_bill, year_moved_in)?)
    }

    pub fn move_in_years(&self) -> Vec<i32> {
        self.rates.list_move_in_years(self.current_year)
    }

    pub fn estimate(
        &self,
        monthly_bill: Decimal,
        state: &str,
    ) -> Result<LegacyCalculationResult> {
        let estimator = LegacySystemEstimator::new(&self.sun_hours, self.config.legacy.clone());
        Ok(estimator.estimate(monthly_bill, state)?)
    }
}

/// Built-in tables unless `[rates]` names CSV replacements.
fn load_tables(rates: &RatesConfig) -> Result<(HistoricalRates, SunHoursTable)> {
    let historical = match &rates.historical_csv {
        Some(path) => {
            let table = RateTableLoader::load_from_path(path)
                .with_context(|| format!("failed to load rate table '{}'", path.display()))?;
            info!(path = %path.display(), entries = table.len(), "loaded historical rates");
            table
        }
        None => HistoricalRates::builtin(),
    };

    let sun_hours = match &rates.sun_hours_csv {
        Some(path) => {
            let table = SunHoursLoader::load_from_path(path)
                .with_context(|| format!("failed to load sun hours '{}'", path.display()))?;
            info!(path = %path.display(), entries = table.len(), "loaded sun hours");
            table
        }
        None => SunHoursTable::builtin(),
    };

    Ok((historical, sun_hours))
}

fn create(path: &Path) -> Result<File> {
    File::create(path).with_context(|| format!("cannot create '{}'", path.display()))
}
