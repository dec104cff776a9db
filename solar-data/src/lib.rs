//! CSV loaders for rate tables, sun-hours tables and calculator scenarios.

mod rates;
pub mod scenarios;

pub use rates::{RateRecord, RateTableLoader, RateTableLoaderError, SunHoursLoader, SunHoursRecord};
pub use scenarios::ScenarioLoadError;
