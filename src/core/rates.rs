//! Exchange rate abstractions and core types

use crate::core::error::ClientError;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Rates for every target currency the provider knows, against one base.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSnapshot {
    pub base: String,
    pub date: Option<String>,
    pub rates: BTreeMap<String, f64>,
}

impl RateSnapshot {
    pub fn rate_for(&self, code: &str) -> Option<f64> {
        self.rates.get(&code.to_uppercase()).copied()
    }
}

#[async_trait]
pub trait RateClient: Send + Sync {
    /// Latest rates for `base` against all targets.
    async fn fetch_latest(&self, base: &str) -> Result<RateSnapshot, ClientError>;

    /// The `base` to `target` rate published for `date`.
    async fn fetch_rate_for_date(
        &self,
        base: &str,
        target: &str,
        date: NaiveDate,
    ) -> Result<f64, ClientError>;
}
