//! Conversion, bulk rates and historical series on top of a [`RateClient`].
use crate::core::error::RateUnavailable;
use crate::core::history::{HistoricalSeries, RatePoint, SERIES_DAYS, synthetic_series};
use crate::core::rates::{RateClient, RateSnapshot};
use chrono::{Duration, Local, NaiveDate};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Currencies the historical provider does not publish.
pub const UNSUPPORTED_HISTORICAL: [&str; 2] = ["XAF", "RUB"];

pub struct ConversionPipeline {
    client: Arc<dyn RateClient>,
}

impl ConversionPipeline {
    pub fn new(client: Arc<dyn RateClient>) -> Self {
        Self { client }
    }

    /// Converts `amount` of `from` into `to` at the latest rate.
    pub async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64, RateUnavailable> {
        let rate = self.current_rate("convert", from, to).await?;
        Ok(amount * rate)
    }

    pub async fn all_rates(&self, base: &str) -> Result<RateSnapshot, RateUnavailable> {
        self.client
            .fetch_latest(base)
            .await
            .map_err(RateUnavailable::wrap("all_rates", base.to_string()))
    }

    /// Last seven days of `base` to `target`, oldest first.
    ///
    /// Falls back to a synthetic series when the pair is not published
    /// historically or the per-day fetch gives up. Only fails when the
    /// current rate needed for that fallback is unavailable too.
    pub async fn historical_series(
        &self,
        base: &str,
        target: &str,
    ) -> Result<HistoricalSeries, RateUnavailable> {
        self.historical_series_on(base, target, Local::now().date_naive())
            .await
    }

    #[instrument(name = "HistoricalSeries", skip_all, fields(base = %base, target = %target))]
    pub async fn historical_series_on(
        &self,
        base: &str,
        target: &str,
        today: NaiveDate,
    ) -> Result<HistoricalSeries, RateUnavailable> {
        if is_unsupported(base) || is_unsupported(target) {
            info!("Pair not covered by the historical provider, using synthetic series");
            return self.fallback_series(base, target).await;
        }

        match self.fetch_daily_rates(base, target, today).await {
            Some(points) => Ok(HistoricalSeries::new(points, false)),
            None => self.fallback_series(base, target).await,
        }
    }

    /// One request per day. `None` means the caller should fall back.
    async fn fetch_daily_rates(
        &self,
        base: &str,
        target: &str,
        today: NaiveDate,
    ) -> Option<Vec<RatePoint>> {
        let mut points: Vec<RatePoint> = Vec::with_capacity(SERIES_DAYS as usize);

        for offset in (0..SERIES_DAYS).rev() {
            let date = today - Duration::days(offset);
            match self.client.fetch_rate_for_date(base, target, date).await {
                Ok(rate) => {
                    debug!(%date, rate, "Fetched daily rate");
                    points.push(RatePoint::new(offset, rate));
                }
                Err(e) if e.is_status() => {
                    warn!(%date, error = %e, "Historical provider rejected request, abandoning");
                    return None;
                }
                Err(e) => match points.last() {
                    Some(last) => {
                        warn!(%date, error = %e, "Daily rate missing, carrying forward last rate");
                        let rate = last.rate;
                        points.push(RatePoint::new(offset, rate));
                    }
                    None => {
                        warn!(%date, error = %e, "First daily rate failed, abandoning");
                        return None;
                    }
                },
            }
        }

        Some(points)
    }

    async fn fallback_series(
        &self,
        base: &str,
        target: &str,
    ) -> Result<HistoricalSeries, RateUnavailable> {
        let current = self.current_rate("historical_series", base, target).await?;
        warn!(current, "Using synthetic historical series");
        Ok(HistoricalSeries::new(synthetic_series(current), true))
    }

    async fn current_rate(
        &self,
        operation: &'static str,
        from: &str,
        to: &str,
    ) -> Result<f64, RateUnavailable> {
        let snapshot = self
            .client
            .fetch_latest(from)
            .await
            .map_err(RateUnavailable::wrap(operation, format!("{from}->{to}")))?;

        snapshot
            .rate_for(to)
            .ok_or_else(|| RateUnavailable::MissingRate {
                base: from.to_string(),
                target: to.to_string(),
            })
    }
}

fn is_unsupported(code: &str) -> bool {
    UNSUPPORTED_HISTORICAL
        .iter()
        .any(|c| c.eq_ignore_ascii_case(code))
}
