//! Staleness classification for feed timestamps.

use chrono::{DateTime, Duration, TimeZone};
use serde::Serialize;

/// Data up to this age is fresh.
pub const FRESH_SECS: i64 = 2 * 60;

/// Data up to this age is stale but still shown; older data is expired.
pub const STALE_SECS: i64 = 10 * 60;

/// How much to trust a timestamped prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    Fresh,
    Stale,
    Expired,
}

impl Freshness {
    /// Classify a timestamp by its age at `now`.
    ///
    /// Timestamps in the future (clock skew) count as fresh.
    pub fn classify<A: TimeZone, B: TimeZone>(updated: &DateTime<A>, now: &DateTime<B>) -> Self {
        Self::from_age(now.clone().signed_duration_since(updated.clone()))
    }

    pub fn from_age(age: Duration) -> Self {
        if age <= Duration::seconds(FRESH_SECS) {
            Freshness::Fresh
        } else if age <= Duration::seconds(STALE_SECS) {
            Freshness::Stale
        } else {
            Freshness::Expired
        }
    }
}
