mod calculator_inputs;
mod legacy_estimate;
mod pricing_mode;
mod projection;
mod sunk_cost;

pub use calculator_inputs::{
    CalculatorInputs, InputError, MAX_AMOUNT, MAX_ESCALATION_PERCENT, MIN_ESCALATION_PERCENT,
};
pub use legacy_estimate::{ChartPoint, LegacyCalculationResult};
pub use pricing_mode::PricingMode;
pub use projection::{AnnualCostPoint, CalculationResult, YearRecord};
pub use sunk_cost::{SunkCostResult, SunkCostYearRecord};
