use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use solar_core::{CalculatorInputs, PricingMode};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Solar savings estimator.
///
/// Projects utility versus solar-service cost over 25 years, estimates what a
/// household has already paid its utility, and runs the legacy system-sizing
/// estimate.
#[derive(Debug, Parser)]
#[command(name = "solar-estimator", version)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Year treated as "now". Overrides `[calendar].current_year`.
    #[arg(long, global = true)]
    pub current_year: Option<i32>,

    /// Log filter: a level ("debug") or a full directive. Overrides `RUST_LOG`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Year-by-year utility vs. service projection.
    Project(ProjectArgs),

    /// Project every scenario row of a CSV file.
    Batch {
        /// Scenario CSV file.
        #[arg(long)]
        file: PathBuf,
    },

    /// Estimate utility spending since moving in.
    SunkCost {
        /// Current monthly electricity bill.
        #[arg(long)]
        bill: Decimal,

        /// Year the household moved in.
        #[arg(long)]
        moved_in: i32,

        /// Write the per-year records to this CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// List the selectable move-in years, newest first.
    MoveInYears,

    /// Legacy system-sizing estimate from a monthly bill and state.
    Estimate {
        /// Current monthly electricity bill.
        #[arg(long)]
        bill: Decimal,

        /// Two-letter state code.
        #[arg(long)]
        state: String,
    },
}

/// Calculator inputs given on the command line. Each flag overrides the
/// matching `[inputs]` value from the config file.
#[derive(Debug, Default, Args)]
pub struct ProjectArgs {
    #[arg(long)]
    pub customer_name: Option<String>,

    /// Annual consumption in kWh.
    #[arg(long)]
    pub usage: Option<Decimal>,

    /// Utility rate in $/kWh.
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Annual utility inflation, percent.
    #[arg(long)]
    pub inflation: Option<Decimal>,

    /// Fixed monthly connection fee.
    #[arg(long)]
    pub connection_fee: Option<Decimal>,

    /// `kwh_rate` or `monthly_price`.
    #[arg(long)]
    pub pricing_mode: Option<PricingMode>,

    /// Service price, per kWh or per month.
    #[arg(long)]
    pub service_price: Option<Decimal>,

    /// Annual system production in kWh.
    #[arg(long)]
    pub production: Option<Decimal>,

    /// Annual service escalator, percent.
    #[arg(long)]
    pub escalator: Option<Decimal>,

    /// Write the year-by-year records to this CSV file.
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

impl ProjectArgs {
    /// Layers the flags over `base`.
    pub fn apply(
        &self,
        base: CalculatorInputs,
    ) -> CalculatorInputs {
        CalculatorInputs {
            customer_name: self.customer_name.clone().unwrap_or(base.customer_name),
            annual_kwh_usage: self.usage.unwrap_or(base.annual_kwh_usage),
            utility_rate: self.rate.unwrap_or(base.utility_rate),
            utility_inflation_rate: self.inflation.unwrap_or(base.utility_inflation_rate),
            monthly_connection_fee: self.connection_fee.unwrap_or(base.monthly_connection_fee),
            pricing_mode: self.pricing_mode.unwrap_or(base.pricing_mode),
            service_price: self.service_price.unwrap_or(base.service_price),
            annual_system_production: self.production.unwrap_or(base.annual_system_production),
            annual_service_escalator: self.escalator.unwrap_or(base.annual_service_escalator),
        }
    }
}
