//! Historical rate series, projection and trend classification

use std::fmt::Display;

/// Number of days covered by a historical series, today included.
pub const SERIES_DAYS: i64 = 7;

/// A rate observed (or projected) `offset` days away from today.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatePoint {
    pub offset: i64,
    pub rate: f64,
}

impl RatePoint {
    pub fn new(offset: i64, rate: f64) -> Self {
        Self { offset, rate }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalSeries {
    /// Oldest first, offsets 6 down to 0.
    pub historical: Vec<RatePoint>,
    pub projected: Vec<RatePoint>,
    /// Set when `historical` was synthesised from the current rate.
    pub used_fallback: bool,
}

impl HistoricalSeries {
    pub fn new(historical: Vec<RatePoint>, used_fallback: bool) -> Self {
        Self {
            historical,
            projected: Vec::new(),
            used_fallback,
        }
    }

    pub fn with_projection(mut self) -> Self {
        self.projected = project(&self.historical);
        self
    }

    pub fn trend(&self) -> Trend {
        Trend::classify(&self.historical)
    }

    /// Percentage change from the oldest to the newest point.
    pub fn change_percent(&self) -> Option<f64> {
        let first = self.historical.first()?;
        let last = self.historical.last()?;
        if first.rate == 0.0 {
            return None;
        }
        Some((last.rate - first.rate) / first.rate * 100.0)
    }
}

/// Extends the last two points linearly by two steps.
///
/// Returns the last point as an anchor followed by the two extrapolated points,
/// or nothing when fewer than three points are available.
pub fn project(historical: &[RatePoint]) -> Vec<RatePoint> {
    if historical.len() < 3 {
        return Vec::new();
    }
    let last = historical[historical.len() - 1];
    let previous = historical[historical.len() - 2];
    let trend = last.rate - previous.rate;

    (0..3)
        .map(|step| RatePoint::new(last.offset + step, last.rate + step as f64 * trend))
        .collect()
}

/// Builds a placeholder series around `current_rate` with a gentle slope.
pub fn synthetic_series(current_rate: f64) -> Vec<RatePoint> {
    (0..SERIES_DAYS)
        .rev()
        .map(|offset| {
            let variation = offset as f64 * 0.003 - 0.009;
            RatePoint::new(offset, current_rate * (1.0 + variation))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    /// Compares the first and last points of a series.
    pub fn classify(points: &[RatePoint]) -> Self {
        match (points.first(), points.last()) {
            (Some(first), Some(last)) if last.rate > first.rate => Trend::Up,
            (Some(first), Some(last)) if last.rate < first.rate => Trend::Down,
            _ => Trend::Flat,
        }
    }
}

impl Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Trend::Up => "up",
                Trend::Down => "down",
                Trend::Flat => "flat",
            }
        )
    }
}
