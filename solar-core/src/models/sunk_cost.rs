use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Estimated utility spending for one calendar year in the home.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunkCostYearRecord {
    pub year: i32,
    /// Average residential rate used for this year ($/kWh).
    pub estimated_rate: Decimal,
    pub monthly_bill: Decimal,
    pub annual_cost: Decimal,
    pub cumulative_cost: Decimal,
}

/// Retrospective estimate of what has been paid to the utility since moving in.
///
/// An empty `years` list means there is nothing to show (the move-in year is
/// in the future); every aggregate is zero in that case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunkCostResult {
    pub years: Vec<SunkCostYearRecord>,
    pub first_monthly_bill: Decimal,
    pub total_paid_to_date: Decimal,
    pub years_in_home: u32,
    pub average_annual_cost: Decimal,
}

impl SunkCostResult {
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}
