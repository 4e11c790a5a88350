//! Live arrival predictions at a station.

use chrono::{DateTime, Duration, FixedOffset, Utc};

use super::StationCode;

/// Which way a train is heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    /// Towards Manhattan.
    ToNewYork,
    /// Towards New Jersey.
    ToNewJersey,
}

impl Heading {
    /// Parse the feed's direction label (`ToNY` / `ToNJ`).
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "ToNY" => Some(Heading::ToNewYork),
            "ToNJ" => Some(Heading::ToNewJersey),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Heading::ToNewYork => "ToNY",
            Heading::ToNewJersey => "ToNJ",
        }
    }
}

/// A predicted train arrival.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrival {
    pub heading: Heading,
    /// Terminal station, when the feed gives a recognisable code.
    pub target: Option<StationCode>,
    pub headsign: String,
    /// Line colors as hex strings; more than one for combined services.
    pub line_colors: Vec<String>,
    pub arrives_in: Duration,
    /// Human-readable countdown as published ("4 min").
    pub message: String,
    pub last_updated: DateTime<FixedOffset>,
}

/// Upcoming arrivals at one station.
#[derive(Debug, Clone, PartialEq)]
pub struct StationBoard {
    pub station: StationCode,
    pub arrivals: Vec<Arrival>,
}

impl StationBoard {
    /// The most recent update time across the board's arrivals.
    pub fn last_updated(&self) -> Option<DateTime<FixedOffset>> {
        self.arrivals.iter().map(|a| a.last_updated).max()
    }

    /// Arrivals heading one way, soonest first.
    pub fn heading(&self, heading: Heading) -> Vec<&Arrival> {
        let mut arrivals: Vec<&Arrival> =
            self.arrivals.iter().filter(|a| a.heading == heading).collect();
        arrivals.sort_by_key(|a| a.arrives_in);
        arrivals
    }
}

/// A complete snapshot of the arrivals feed.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrivalsFeed {
    pub boards: Vec<StationBoard>,
    /// When this snapshot was fetched.
    pub fetched_at: DateTime<Utc>,
    /// URL the snapshot came from.
    pub source: String,
}

impl ArrivalsFeed {
    pub fn board(&self, station: &StationCode) -> Option<&StationBoard> {
        self.boards.iter().find(|b| &b.station == station)
    }
}
