//! U.S. average residential electricity price per kWh, in nominal dollars.
//!
//! Approximate annual averages (BLS / EIA) used to back-calculate historical
//! bills. The table is immutable once built.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::RateTableError;

/// First year covered by the built-in table.
pub const EARLIEST_YEAR: i32 = 1985;

/// Last year covered by the built-in table.
pub const LATEST_YEAR: i32 = 2026;

const BUILTIN_RATES: [(i32, Decimal); 42] = [
    (1985, dec!(0.078)),
    (1986, dec!(0.077)),
    (1987, dec!(0.078)),
    (1988, dec!(0.079)),
    (1989, dec!(0.080)),
    (1990, dec!(0.083)),
    (1991, dec!(0.085)),
    (1992, dec!(0.084)),
    (1993, dec!(0.084)),
    (1994, dec!(0.084)),
    (1995, dec!(0.085)),
    (1996, dec!(0.085)),
    (1997, dec!(0.085)),
    (1998, dec!(0.084)),
    (1999, dec!(0.084)),
    (2000, dec!(0.084)),
    (2001, dec!(0.089)),
    (2002, dec!(0.087)),
    (2003, dec!(0.088)),
    (2004, dec!(0.090)),
    (2005, dec!(0.095)),
    (2006, dec!(0.106)),
    (2007, dec!(0.106)),
    (2008, dec!(0.112)),
    (2009, dec!(0.117)),
    (2010, dec!(0.116)),
    (2011, dec!(0.118)),
    (2012, dec!(0.119)),
    (2013, dec!(0.124)),
    (2014, dec!(0.125)),
    (2015, dec!(0.127)),
    (2016, dec!(0.126)),
    (2017, dec!(0.131)),
    (2018, dec!(0.129)),
    (2019, dec!(0.132)),
    (2020, dec!(0.134)),
    (2021, dec!(0.139)),
    (2022, dec!(0.155)),
    (2023, dec!(0.165)),
    (2024, dec!(0.172)),
    (2025, dec!(0.183)),
    (2026, dec!(0.190)),
];

/// Mapping of calendar year to average residential rate ($/kWh).
///
/// Always holds at least one entry, and every rate is positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoricalRates {
    rates: BTreeMap<i32, Decimal>,
}

impl HistoricalRates {
    /// The built-in 1985–2026 table.
    pub fn builtin() -> Self {
        Self {
            rates: BUILTIN_RATES.into_iter().collect(),
        }
    }

    /// Builds a table from `(year, rate)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`RateTableError`] if no entries are given, a year appears
    /// twice, or a rate is zero or negative.
    pub fn from_entries<I>(entries: I) -> Result<Self, RateTableError>
    where
        I: IntoIterator<Item = (i32, Decimal)>,
    {
        let mut rates = BTreeMap::new();
        for (year, rate) in entries {
            if rate <= Decimal::ZERO {
                return Err(RateTableError::NonPositiveRate { year, rate });
            }
            if rates.insert(year, rate).is_some() {
                return Err(RateTableError::DuplicateYear(year));
            }
        }
        if rates.is_empty() {
            return Err(RateTableError::Empty);
        }
        Ok(Self { rates })
    }

    pub fn rate_for(
        &self,
        year: i32,
    ) -> Option<Decimal> {
        self.rates.get(&year).copied()
    }

    pub fn earliest_year(&self) -> i32 {
        self.rates.keys().next().copied().unwrap_or(EARLIEST_YEAR)
    }

    pub fn latest_year(&self) -> i32 {
        self.rates.keys().next_back().copied().unwrap_or(LATEST_YEAR)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Selectable move-in years, newest first: from `current_year - 1` down to
    /// the earliest year in the table.
    pub fn list_move_in_years(
        &self,
        current_year: i32,
    ) -> Vec<i32> {
        (self.earliest_year()..current_year).rev().collect()
    }
}

impl Default for HistoricalRates {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builtin_covers_every_year_in_range() {
        let rates = HistoricalRates::builtin();

        assert_eq!(rates.earliest_year(), EARLIEST_YEAR);
        assert_eq!(rates.latest_year(), LATEST_YEAR);
        assert_eq!(rates.len(), (LATEST_YEAR - EARLIEST_YEAR + 1) as usize);
        for year in EARLIEST_YEAR..=LATEST_YEAR {
            assert!(rates.rate_for(year).is_some(), "missing rate for {year}");
        }
    }

    #[test]
    fn builtin_known_values() {
        let rates = HistoricalRates::builtin();

        assert_eq!(rates.rate_for(1985), Some(dec!(0.078)));
        assert_eq!(rates.rate_for(2010), Some(dec!(0.116)));
        assert_eq!(rates.rate_for(2020), Some(dec!(0.134)));
        assert_eq!(rates.rate_for(2026), Some(dec!(0.19)));
        assert_eq!(rates.rate_for(1984), None);
    }

    #[test]
    fn list_move_in_years_is_descending_and_excludes_current_year() {
        let rates = HistoricalRates::builtin();

        let years = rates.list_move_in_years(2026);

        assert_eq!(years.first(), Some(&2025));
        assert_eq!(years.last(), Some(&1985));
        assert_eq!(years.len(), 41);
        assert!(years.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn list_move_in_years_empty_before_table_starts() {
        let rates = HistoricalRates::builtin();

        assert!(rates.list_move_in_years(1985).is_empty());
    }

    #[test]
    fn from_entries_rejects_duplicate_year() {
        let result = HistoricalRates::from_entries([(2020, dec!(0.13)), (2020, dec!(0.14))]);

        assert_eq!(result, Err(RateTableError::DuplicateYear(2020)));
    }

    #[test]
    fn from_entries_rejects_zero_rate() {
        let result = HistoricalRates::from_entries([(2020, dec!(0))]);

        assert_eq!(
            result,
            Err(RateTableError::NonPositiveRate {
                year: 2020,
                rate: dec!(0),
            })
        );
    }

    #[test]
    fn from_entries_rejects_empty_table() {
        let result = HistoricalRates::from_entries(Vec::new());

        assert_eq!(result, Err(RateTableError::Empty));
    }
}
