//! Average daily peak sun hours by U.S. state (NREL solar resource averages).

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::RateTableError;

/// Sun hours assumed for a state missing from the table.
pub const DEFAULT_SUN_HOURS: Decimal = dec!(5.0);

const BUILTIN_SUN_HOURS: [(&str, Decimal); 51] = [
    ("AK", dec!(2.7)),
    ("AL", dec!(4.7)),
    ("AR", dec!(4.7)),
    ("AZ", dec!(6.6)),
    ("CA", dec!(5.8)),
    ("CO", dec!(5.5)),
    ("CT", dec!(4.2)),
    ("DC", dec!(4.4)),
    ("DE", dec!(4.5)),
    ("FL", dec!(5.3)),
    ("GA", dec!(5.0)),
    ("HI", dec!(5.6)),
    ("IA", dec!(4.5)),
    ("ID", dec!(4.9)),
    ("IL", dec!(4.4)),
    ("IN", dec!(4.3)),
    ("KS", dec!(5.1)),
    ("KY", dec!(4.4)),
    ("LA", dec!(4.9)),
    ("MA", dec!(4.2)),
    ("MD", dec!(4.5)),
    ("ME", dec!(4.2)),
    ("MI", dec!(4.0)),
    ("MN", dec!(4.5)),
    ("MO", dec!(4.7)),
    ("MS", dec!(4.9)),
    ("MT", dec!(4.6)),
    ("NC", dec!(4.8)),
    ("ND", dec!(4.6)),
    ("NE", dec!(5.0)),
    ("NH", dec!(4.2)),
    ("NJ", dec!(4.4)),
    ("NM", dec!(6.5)),
    ("NV", dec!(6.4)),
    ("NY", dec!(4.1)),
    ("OH", dec!(4.2)),
    ("OK", dec!(5.4)),
    ("OR", dec!(4.4)),
    ("PA", dec!(4.2)),
    ("RI", dec!(4.3)),
    ("SC", dec!(4.9)),
    ("SD", dec!(4.9)),
    ("TN", dec!(4.6)),
    ("TX", dec!(5.5)),
    ("UT", dec!(5.8)),
    ("VA", dec!(4.6)),
    ("VT", dec!(4.0)),
    ("WA", dec!(3.8)),
    ("WI", dec!(4.3)),
    ("WV", dec!(4.1)),
    ("WY", dec!(5.2)),
];

/// Peak sun hours per day keyed by two-letter state code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SunHoursTable {
    hours: BTreeMap<String, Decimal>,
}

impl SunHoursTable {
    pub fn builtin() -> Self {
        Self {
            hours: BUILTIN_SUN_HOURS
                .into_iter()
                .map(|(state, hours)| (state.to_string(), hours))
                .collect(),
        }
    }

    /// Builds a table from `(state, sun_hours)` pairs. State codes are
    /// normalized to upper case.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, RateTableError>
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: AsRef<str>,
    {
        let mut hours = BTreeMap::new();
        for (state, value) in entries {
            let code = normalize_state(state.as_ref())
                .ok_or_else(|| RateTableError::InvalidStateCode(state.as_ref().to_string()))?;
            if value <= Decimal::ZERO {
                return Err(RateTableError::NonPositiveSunHours {
                    state: code,
                    hours: value,
                });
            }
            if hours.contains_key(&code) {
                return Err(RateTableError::DuplicateState(code));
            }
            hours.insert(code, value);
        }
        if hours.is_empty() {
            return Err(RateTableError::Empty);
        }
        Ok(Self { hours })
    }

    /// Looks up a state code, ignoring case and surrounding whitespace.
    pub fn lookup(
        &self,
        state: &str,
    ) -> Option<Decimal> {
        normalize_state(state).and_then(|code| self.hours.get(&code).copied())
    }

    /// State codes in alphabetical order.
    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.hours.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.hours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }
}

impl Default for SunHoursTable {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize_state(state: &str) -> Option<String> {
    let code = state.trim().to_ascii_uppercase();
    if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(code)
    } else {
        None
    }
}
