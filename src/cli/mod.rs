//! Terminal front end for the conversion pipeline

pub mod convert;
pub mod currencies;
pub mod rates;
pub mod setup;
pub mod trend;
pub mod ui;
