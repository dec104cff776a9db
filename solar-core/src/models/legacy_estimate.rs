use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Cumulative utility and solar cost for one year of the legacy estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub year: u32,
    pub utility: Decimal,
    pub solar: Decimal,
}

/// Output of the legacy system-sizing estimator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyCalculationResult {
    /// Cumulative utility cost at the end of each year, year 1 first.
    pub yearly_cost_utility: Vec<Decimal>,
    /// Cumulative solar cost (system plus maintenance) at the end of each year.
    pub yearly_cost_solar: Vec<Decimal>,
    pub total_savings: Decimal,
    /// First year whose cumulative utility cost meets the cumulative solar cost.
    pub payback_period: u32,
    /// Return on investment in percent.
    pub roi: Decimal,
    pub system_size_kw: Decimal,
    pub system_cost: Decimal,
    pub monthly_payment: Decimal,
}

impl LegacyCalculationResult {
    pub fn chart_data(&self) -> Vec<ChartPoint> {
        self.yearly_cost_utility
            .iter()
            .zip(&self.yearly_cost_solar)
            .zip(1u32..)
            .map(|((utility, solar), year)| ChartPoint {
                year,
                utility: *utility,
                solar: *solar,
            })
            .collect()
    }
}
