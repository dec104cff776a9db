//! Plain-text reports printed by the CLI.
//!
//! Each report borrows a calculation result and renders it through
//! [`fmt::Display`].

use std::fmt;

use rust_decimal::Decimal;
use solar_core::calculations::common::round_half_up;
use solar_core::{
    CalculationResult, CalculatorInputs, LegacyCalculationResult, PROJECTION_YEARS,
    SunkCostResult, format_currency, format_currency_abbreviated,
};

const LABEL_WIDTH: usize = 24;

fn card(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: &str,
) -> fmt::Result {
    writeln!(f, "  {label:<LABEL_WIDTH$}{value}")
}

// ─── projection ──────────────────────────────────────────────────────────────

/// Summary cards, crossover note and the year-by-year breakdown.
pub struct ProjectionReport<'a> {
    pub inputs: &'a CalculatorInputs,
    pub result: &'a CalculationResult,
}

impl fmt::Display for ProjectionReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let r = self.result;

        if self.inputs.customer_name.is_empty() {
            writeln!(f, "Solar savings projection")?;
        } else {
            writeln!(f, "Solar savings projection for {}", self.inputs.customer_name)?;
        }
        writeln!(f, "Service pricing: {}", self.inputs.pricing_mode.label())?;
        writeln!(f)?;

        writeln!(f, "Summary")?;
        card(f, "Year 1 Utility/mo", &format_currency(r.year1_utility_monthly))?;
        card(f, "Year 1 Service/mo", &format_currency(r.year1_service_monthly))?;
        card(f, "Monthly Difference", &format_currency(r.monthly_difference))?;
        card(
            f,
            &format!("Total Utility ({PROJECTION_YEARS} yrs)"),
            &format_currency(r.total_utility),
        )?;
        card(
            f,
            &format!("Total Service ({PROJECTION_YEARS} yrs)"),
            &format_currency(r.total_service),
        )?;
        card(
            f,
            "Lifetime Savings",
            &format!(
                "{} (over {PROJECTION_YEARS} years)",
                format_currency(r.lifetime_savings)
            ),
        )?;
        writeln!(f)?;

        if let Some(crossover) = r.crossover_record() {
            writeln!(
                f,
                "Year {} is when your solar service monthly cost ({}) reaches your Year 1 utility monthly cost ({}).",
                crossover.year,
                format_currency(crossover.service_monthly),
                format_currency(r.year1_utility_monthly)
            )?;
            writeln!(f)?;
        }

        writeln!(f, "Year-by-Year Breakdown")?;
        writeln!(
            f,
            "{:>4}  {:>12}  {:>12}  {:>12}  {:>12}  {:>15}  {:>14}  {:>14}",
            "Year",
            "Utility/mo",
            "Utility/yr",
            "Service/mo",
            "Service/yr",
            "Monthly Savings",
            "Annual Savings",
            "Cumulative"
        )?;
        for row in &r.years {
            writeln!(
                f,
                "{:>4}  {:>12}  {:>12}  {:>12}  {:>12}  {:>15}  {:>14}  {:>14}",
                row.year,
                format_currency(row.utility_monthly),
                format_currency(row.utility_yearly),
                format_currency(row.service_monthly),
                format_currency(row.service_yearly),
                format_currency(row.monthly_savings),
                format_currency(row.annual_savings),
                format_currency(row.cumulative_savings)
            )?;
        }
        Ok(())
    }
}

// ─── batch ───────────────────────────────────────────────────────────────────

/// One summary line per projected scenario.
pub struct BatchReport<'a> {
    pub rows: &'a [(CalculatorInputs, CalculationResult)],
}

impl fmt::Display for BatchReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(
            f,
            "{:<20}  {:>12}  {:>12}  {:>14}  {:>9}",
            "Customer", "Utility/mo", "Service/mo", "Lifetime", "Crossover"
        )?;
        for (index, (inputs, result)) in self.rows.iter().enumerate() {
            let name = if inputs.customer_name.is_empty() {
                format!("Scenario {}", index + 1)
            } else {
                inputs.customer_name.clone()
            };
            let crossover = result
                .crossover_year()
                .map_or_else(|| "-".to_string(), |year| format!("Year {year}"));
            writeln!(
                f,
                "{:<20}  {:>12}  {:>12}  {:>14}  {:>9}",
                name,
                format_currency(result.year1_utility_monthly),
                format_currency(result.year1_service_monthly),
                format_currency(result.lifetime_savings),
                crossover
            )?;
        }
        write!(f, "{} scenario(s) projected", self.rows.len())
    }
}

// ─── sunk cost ───────────────────────────────────────────────────────────────

pub struct SunkCostReport<'a> {
    pub current_monthly_bill: Decimal,
    pub year_moved_in: i32,
    pub current_year: i32,
    pub result: &'a SunkCostResult,
}

impl fmt::Display for SunkCostReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let r = self.result;

        if r.is_empty() {
            return writeln!(
                f,
                "Nothing to estimate: move-in year {} is after the current year {}.",
                self.year_moved_in, self.current_year
            );
        }

        writeln!(
            f,
            "Electricity paid since {} (current year {})",
            self.year_moved_in, self.current_year
        )?;
        writeln!(f)?;
        card(f, "Total Paid to Date", &format_currency_abbreviated(r.total_paid_to_date))?;
        card(f, "Years in Home", &r.years_in_home.to_string())?;
        card(
            f,
            "First Monthly Bill",
            &format!("{} (Year {})", format_currency(r.first_monthly_bill), self.year_moved_in),
        )?;
        card(
            f,
            "Current Monthly Bill",
            &format!(
                "{} (+{}/mo vs move-in)",
                format_currency(self.current_monthly_bill),
                format_currency(self.current_monthly_bill - r.first_monthly_bill)
            ),
        )?;
        card(f, "Average Annual Cost", &format_currency(r.average_annual_cost))?;
        writeln!(f)?;

        writeln!(f, "Year-by-Year Sunk Cost")?;
        writeln!(
            f,
            "{:>4}  {:>8}  {:>12}  {:>12}  {:>15}",
            "Year", "Rate", "Monthly Bill", "Annual Cost", "Cumulative Paid"
        )?;
        for row in &r.years {
            writeln!(
                f,
                "{:>4}  {:>8}  {:>12}  {:>12}  {:>15}",
                row.year,
                row.estimated_rate.normalize().to_string(),
                format_currency(row.monthly_bill),
                format_currency(row.annual_cost),
                format_currency(row.cumulative_cost)
            )?;
        }
        writeln!(
            f,
            "Total Paid to Utility: {}",
            format_currency(r.total_paid_to_date)
        )
    }
}

// ─── move-in years ───────────────────────────────────────────────────────────

pub struct MoveInYearsReport<'a> {
    pub years: &'a [i32],
}

impl fmt::Display for MoveInYearsReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for year in self.years {
            writeln!(f, "{year}")?;
        }
        Ok(())
    }
}

// ─── legacy estimate ─────────────────────────────────────────────────────────

pub struct LegacyReport<'a> {
    pub state: &'a str,
    pub result: &'a LegacyCalculationResult,
}

impl fmt::Display for LegacyReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let r = self.result;

        writeln!(f, "Legacy system estimate ({})", self.state.trim().to_uppercase())?;
        writeln!(f)?;
        card(f, "System Size", &format!("{} kW", r.system_size_kw.normalize()))?;
        card(f, "System Cost", &format_currency(r.system_cost))?;
        card(f, "Monthly Payment", &format_currency(r.monthly_payment))?;
        card(f, "Payback Period", &format!("{} years", r.payback_period))?;
        card(f, "Total Savings", &format_currency(r.total_savings))?;
        card(f, "ROI", &format!("{}%", round_half_up(r.roi)))?;
        writeln!(f)?;

        writeln!(f, "Cumulative Cost by Year")?;
        writeln!(f, "{:>4}  {:>14}  {:>14}", "Year", "Utility", "Solar")?;
        for point in r.chart_data() {
            writeln!(
                f,
                "{:>4}  {:>14}  {:>14}",
                point.year,
                format_currency(point.utility),
                format_currency(point.solar)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use solar_core::{
        CostProjector, HistoricalRates, LegacyEstimatorConfig, LegacySystemEstimator,
        PricingMode, SunHoursTable, SunkCostConfig, SunkCostProjector,
    };

    use super::*;

    fn reference_inputs() -> CalculatorInputs {
        CalculatorInputs {
            customer_name: "Rivera".to_string(),
            annual_kwh_usage: dec!(10000),
            utility_rate: dec!(0.15),
            utility_inflation_rate: dec!(6),
            monthly_connection_fee: dec!(0),
            pricing_mode: PricingMode::KwhRate,
            service_price: dec!(0.10),
            annual_system_production: dec!(10000),
            annual_service_escalator: dec!(2.9),
        }
    }

    // =========================================================================
    // ProjectionReport
    // =========================================================================

    #[test]
    fn projection_report_shows_summary_cards() {
        let inputs = reference_inputs();
        let result = CostProjector::new().project(&inputs).unwrap();

        let text = ProjectionReport {
            inputs: &inputs,
            result: &result,
        }
        .to_string();

        assert!(text.starts_with("Solar savings projection for Rivera\n"));
        assert!(text.contains("Service pricing: Per kWh"));
        assert!(text.contains("  Year 1 Utility/mo       $125.00\n"));
        assert!(text.contains("  Year 1 Service/mo       $83.33\n"));
        assert!(text.contains("  Monthly Difference      $41.67\n"));
        assert!(text.contains("Total Utility (25 yrs)"));
        assert!(text.contains("Lifetime Savings"));
    }

    #[test]
    fn projection_report_has_one_row_per_year() {
        let inputs = reference_inputs();
        let result = CostProjector::new().project(&inputs).unwrap();

        let text = ProjectionReport {
            inputs: &inputs,
            result: &result,
        }
        .to_string();
        let table = text
            .split("Year-by-Year Breakdown\n")
            .nth(1)
            .unwrap();

        // header plus 25 rows
        assert_eq!(table.lines().count(), 26);
    }

    #[test]
    fn projection_report_mentions_crossover_when_reached() {
        let inputs = CalculatorInputs {
            utility_inflation_rate: dec!(0),
            annual_service_escalator: dec!(10),
            ..reference_inputs()
        };
        let result = CostProjector::new().project(&inputs).unwrap();

        let text = ProjectionReport {
            inputs: &inputs,
            result: &result,
        }
        .to_string();

        assert!(text.contains("Year 6 is when your solar service monthly cost"));
    }

    #[test]
    fn projection_report_omits_crossover_when_never_reached() {
        let inputs = CalculatorInputs {
            annual_service_escalator: dec!(0),
            ..reference_inputs()
        };
        let result = CostProjector::new().project(&inputs).unwrap();

        let text = ProjectionReport {
            inputs: &inputs,
            result: &result,
        }
        .to_string();

        assert!(!text.contains("is when your solar service"));
    }

    // =========================================================================
    // BatchReport
    // =========================================================================

    #[test]
    fn batch_report_names_unnamed_scenarios() {
        let projector = CostProjector::new();
        let named = reference_inputs();
        let unnamed = CalculatorInputs {
            customer_name: String::new(),
            ..reference_inputs()
        };
        let rows = vec![
            (named.clone(), projector.project(&named).unwrap()),
            (unnamed.clone(), projector.project(&unnamed).unwrap()),
        ];

        let text = BatchReport { rows: &rows }.to_string();

        assert!(text.contains("Rivera"));
        assert!(text.contains("Scenario 2"));
        assert!(text.ends_with("2 scenario(s) projected"));
    }

    // =========================================================================
    // SunkCostReport
    // =========================================================================

    #[test]
    fn sunk_cost_report_shows_cards_and_rows() {
        let rates = HistoricalRates::builtin();
        let result = SunkCostProjector::new(&rates, SunkCostConfig::for_year(2026))
            .project(dec!(200), 2020)
            .unwrap();

        let text = SunkCostReport {
            current_monthly_bill: dec!(200),
            year_moved_in: 2020,
            current_year: 2026,
            result: &result,
        }
        .to_string();

        assert!(text.contains("  Years in Home           7\n"));
        assert!(text.contains("$141.05 (Year 2020)"));
        assert!(text.contains("(+$58.95/mo vs move-in)"));
        assert!(text.contains("2020     0.134"));
        assert!(text.contains("Total Paid to Utility:"));
    }

    #[test]
    fn sunk_cost_report_explains_empty_result() {
        let result = SunkCostResult::default();

        let text = SunkCostReport {
            current_monthly_bill: dec!(200),
            year_moved_in: 2030,
            current_year: 2026,
            result: &result,
        }
        .to_string();

        assert_eq!(
            text,
            "Nothing to estimate: move-in year 2030 is after the current year 2026.\n"
        );
    }

    // =========================================================================
    // MoveInYearsReport / LegacyReport
    // =========================================================================

    #[test]
    fn move_in_years_one_per_line() {
        let text = MoveInYearsReport {
            years: &[2025, 2024, 2023],
        }
        .to_string();

        assert_eq!(text, "2025\n2024\n2023\n");
    }

    #[test]
    fn legacy_report_shows_sizing_and_series() {
        let sun_hours = SunHoursTable::builtin();
        let result = LegacySystemEstimator::new(&sun_hours, LegacyEstimatorConfig::default())
            .estimate(dec!(200), "az")
            .unwrap();

        let text = LegacyReport {
            state: "az",
            result: &result,
        }
        .to_string();

        assert!(text.starts_with("Legacy system estimate (AZ)\n"));
        assert!(text.contains("  System Size             8 kW\n"));
        assert!(text.contains("  System Cost             $22,000.00\n"));
        assert!(text.contains("  Payback Period          9 years\n"));
        assert!(text.contains("   1       $2,400.00      $22,220.00\n"));
    }
}
