//! Conversion from feed DTOs to domain types.

use chrono::{DateTime, Duration, Utc};
use tracing::warn;

use crate::domain::{Arrival, ArrivalsFeed, Heading, StationBoard, StationCode};

use super::types::{Message, RidePathResponse, StationResult};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error("invalid station code: {0}")]
    InvalidStation(String),

    #[error("unknown direction label: {0}")]
    UnknownHeading(String),

    #[error("invalid seconds to arrival")]
    InvalidSeconds,

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Convert a whole feed response.
///
/// Stations, directions and messages that fail to convert are skipped with
/// a warning rather than failing the feed.
pub fn convert_feed(
    response: &RidePathResponse,
    source: &str,
    fetched_at: DateTime<Utc>,
) -> ArrivalsFeed {
    let mut boards = Vec::with_capacity(response.results.len());

    for result in &response.results {
        match convert_station(result) {
            Ok(board) => boards.push(board),
            Err(e) => warn!(station = %result.considered_station, error = %e, "skipping station"),
        }
    }

    ArrivalsFeed {
        boards,
        fetched_at,
        source: source.to_string(),
    }
}

/// Convert predictions for one station.
pub fn convert_station(result: &StationResult) -> Result<StationBoard, ConversionError> {
    let station = StationCode::parse(&result.considered_station)
        .map_err(|_| ConversionError::InvalidStation(result.considered_station.clone()))?;

    let mut arrivals = Vec::new();
    for destination in &result.destinations {
        let Some(heading) = Heading::from_label(&destination.label) else {
            warn!(%station, label = %destination.label, "skipping unknown direction");
            continue;
        };

        for message in &destination.messages {
            match convert_message(message, heading) {
                Ok(arrival) => arrivals.push(arrival),
                Err(e) => warn!(%station, error = %e, "skipping arrival"),
            }
        }
    }

    Ok(StationBoard { station, arrivals })
}

/// Convert one prediction.
pub fn convert_message(message: &Message, heading: Heading) -> Result<Arrival, ConversionError> {
    let seconds = message
        .seconds_to_arrival
        .as_seconds()
        .filter(|s| *s >= 0)
        .ok_or(ConversionError::InvalidSeconds)?;

    let last_updated = DateTime::parse_from_rfc3339(&message.last_updated)
        .map_err(|_| ConversionError::InvalidTimestamp(message.last_updated.clone()))?;

    // The feed uses full codes for most terminals; anything else is display-only.
    let target = message
        .target
        .as_deref()
        .and_then(|t| StationCode::parse(t).ok());

    Ok(Arrival {
        heading,
        target,
        headsign: message.head_sign.clone(),
        line_colors: parse_colors(&message.line_color),
        arrives_in: Duration::seconds(seconds),
        message: message.arrival_time_message.clone(),
        last_updated,
    })
}

/// Split "4D92FB,D93A30" into `["#4D92FB", "#D93A30"]`.
fn parse_colors(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| {
            if c.starts_with('#') {
                c.to_uppercase()
            } else {
                format!("#{}", c.to_uppercase())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arrivals::types::SecondsField;

    fn message(seconds: &str, updated: &str) -> Message {
        Message {
            target: Some("WTC".to_string()),
            seconds_to_arrival: SecondsField::Text(seconds.to_string()),
            arrival_time_message: "4 min".to_string(),
            line_color: "65c100".to_string(),
            head_sign: "World Trade Center".to_string(),
            last_updated: updated.to_string(),
        }
    }

    const SAMPLE: &str = r#"{
        "results": [
            {
                "consideredStation": "HOB",
                "destinations": [
                    {"label": "ToNY", "messages": [
                        {"target": "WTC", "secondsToArrival": "240", "arrivalTimeMessage": "4 min",
                         "lineColor": "65C100", "headSign": "World Trade Center",
                         "lastUpdated": "2024-03-15T10:00:00-04:00"},
                        {"target": "33S", "secondsToArrival": "oops", "arrivalTimeMessage": "",
                         "lineColor": "4D92FB", "headSign": "33rd Street",
                         "lastUpdated": "2024-03-15T10:00:00-04:00"}
                    ]},
                    {"label": "Sideways", "messages": []}
                ]
            },
            {"consideredStation": "hoboken", "destinations": []},
            {
                "consideredStation": "JSQ",
                "destinations": [
                    {"label": "ToNJ", "messages": [
                        {"target": "NWK", "secondsToArrival": 90, "arrivalTimeMessage": "2 min",
                         "lineColor": "D93A30", "headSign": "Newark",
                         "lastUpdated": "2024-03-15T10:01:00-04:00"}
                    ]}
                ]
            }
        ]
    }"#;

    #[test]
    fn converts_feed_skipping_bad_entries() {
        let response: RidePathResponse = serde_json::from_str(SAMPLE).unwrap();
        let feed = convert_feed(&response, "test://feed", Utc::now());

        assert_eq!(feed.boards.len(), 2);
        assert_eq!(feed.source, "test://feed");

        let hob = feed.board(&StationCode::parse("HOB").unwrap()).unwrap();
        assert_eq!(hob.arrivals.len(), 1);
        assert_eq!(hob.arrivals[0].heading, Heading::ToNewYork);
        assert_eq!(hob.arrivals[0].arrives_in, Duration::seconds(240));

        let jsq = feed.board(&StationCode::parse("JSQ").unwrap()).unwrap();
        assert_eq!(jsq.arrivals[0].heading, Heading::ToNewJersey);
        assert_eq!(jsq.arrivals[0].target, Some(StationCode::parse("NWK").unwrap()));
    }

    #[test]
    fn message_conversion() {
        let arrival =
            convert_message(&message("120", "2024-03-15T10:00:00-04:00"), Heading::ToNewYork)
                .unwrap();
        assert_eq!(arrival.arrives_in, Duration::seconds(120));
        assert_eq!(arrival.line_colors, vec!["#65C100".to_string()]);
        assert_eq!(arrival.target, Some(StationCode::parse("WTC").unwrap()));
    }

    #[test]
    fn message_rejects_bad_values() {
        assert_eq!(
            convert_message(&message("-5", "2024-03-15T10:00:00-04:00"), Heading::ToNewYork),
            Err(ConversionError::InvalidSeconds)
        );
        assert_eq!(
            convert_message(&message("30", "yesterday"), Heading::ToNewYork),
            Err(ConversionError::InvalidTimestamp("yesterday".to_string()))
        );
    }

    #[test]
    fn combined_colors() {
        assert_eq!(
            parse_colors("4D92FB,D93A30"),
            vec!["#4D92FB".to_string(), "#D93A30".to_string()]
        );
        assert_eq!(parse_colors("#ff9900"), vec!["#FF9900".to_string()]);
        assert!(parse_colors("").is_empty());
    }

    #[test]
    fn invalid_station_code() {
        let result = StationResult {
            considered_station: "hoboken".to_string(),
            destinations: vec![],
        };
        assert_eq!(
            convert_station(&result),
            Err(ConversionError::InvalidStation("hoboken".to_string()))
        );
    }
}
