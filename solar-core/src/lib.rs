pub mod calculations;
pub mod format;
pub mod models;
pub mod rates;

pub use calculations::{
    CostProjector, LegacyEstimatorConfig, LegacyEstimatorError, LegacySystemEstimator,
    PROJECTION_YEARS, SunkCostConfig, SunkCostError, SunkCostProjector,
};
pub use format::{format_currency, format_currency_abbreviated};
pub use models::*;
pub use rates::{HistoricalRates, RateTableError, SunHoursTable};
