use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Projected utility and service costs for a single year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRecord {
    /// 1-based projection year.
    pub year: u32,
    pub utility_monthly: Decimal,
    pub utility_yearly: Decimal,
    pub service_monthly: Decimal,
    pub service_yearly: Decimal,
    pub monthly_savings: Decimal,
    pub annual_savings: Decimal,
    /// Running sum of `annual_savings` from year 1 through this year.
    pub cumulative_savings: Decimal,
}

/// One point of the annual cost comparison chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualCostPoint {
    pub year: u32,
    pub utility: Decimal,
    pub service: Decimal,
    pub savings: Decimal,
}

/// Full output of a cost projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub years: Vec<YearRecord>,
    pub year1_utility_monthly: Decimal,
    pub year1_service_monthly: Decimal,
    /// Year 1 utility monthly cost minus year 1 service monthly cost.
    pub monthly_difference: Decimal,
    pub total_utility: Decimal,
    pub total_service: Decimal,
    pub lifetime_savings: Decimal,
}

impl CalculationResult {
    /// First year after year 1 whose service monthly cost reaches the
    /// year 1 utility monthly cost.
    pub fn crossover_year(&self) -> Option<u32> {
        self.crossover_record().map(|record| record.year)
    }

    /// The record for [`CalculationResult::crossover_year`].
    pub fn crossover_record(&self) -> Option<&YearRecord> {
        self.years
            .iter()
            .find(|record| record.year > 1 && record.service_monthly >= self.year1_utility_monthly)
    }

    pub fn annual_cost_series(&self) -> Vec<AnnualCostPoint> {
        self.years
            .iter()
            .map(|record| AnnualCostPoint {
                year: record.year,
                utility: record.utility_yearly,
                service: record.service_yearly,
                savings: record.annual_savings,
            })
            .collect()
    }
}
