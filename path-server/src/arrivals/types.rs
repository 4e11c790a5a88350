//! RidePATH feed response DTOs.
//!
//! These types map directly to the Port Authority `ridepath.json` feed.
//! Fields the feed sometimes omits are `Option` or defaulted.

use serde::Deserialize;

/// Top-level feed response.
#[derive(Debug, Clone, Deserialize)]
pub struct RidePathResponse {
    #[serde(default)]
    pub results: Vec<StationResult>,
}

/// Predictions for one station.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationResult {
    /// Station code (e.g. "NWK", "09S").
    pub considered_station: String,

    #[serde(default)]
    pub destinations: Vec<Destination>,
}

/// Predictions in one direction.
#[derive(Debug, Clone, Deserialize)]
pub struct Destination {
    /// "ToNY" or "ToNJ".
    pub label: String,

    #[serde(default)]
    pub messages: Vec<Message>,
}

/// A single train prediction.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Terminal station code.
    pub target: Option<String>,

    /// Seconds until arrival. The feed sends this as a string.
    pub seconds_to_arrival: SecondsField,

    /// Display countdown, e.g. "4 min".
    #[serde(default)]
    pub arrival_time_message: String,

    /// Hex color(s) without '#', comma-separated for combined services.
    #[serde(default)]
    pub line_color: String,

    #[serde(default)]
    pub head_sign: String,

    /// RFC 3339 timestamp of the prediction.
    pub last_updated: String,
}

/// A seconds value sent as either a JSON string or number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SecondsField {
    Number(i64),
    Text(String),
}

impl SecondsField {
    pub fn as_seconds(&self) -> Option<i64> {
        match self {
            SecondsField::Number(n) => Some(*n),
            SecondsField::Text(s) => s.trim().parse().ok(),
        }
    }
}
