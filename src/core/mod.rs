//! Core business logic abstractions

pub mod config;
pub mod currency;
pub mod error;
pub mod history;
pub mod log;
pub mod pipeline;
pub mod rates;

// Re-export main types for cleaner imports
pub use currency::{CurrencyCatalog, CurrencyRef};
pub use error::{ClientError, FetchFailure, RateUnavailable};
pub use history::{HistoricalSeries, RatePoint, Trend, project};
pub use pipeline::ConversionPipeline;
pub use rates::{RateClient, RateSnapshot};
