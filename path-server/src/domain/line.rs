//! Lines: named service patterns over an ordered station sequence.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::StationCode;

/// Identifier for a line (e.g. `NWK-WTC`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(String);

impl LineId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A line and the stations it serves.
///
/// The order of `stations` is significant: it defines adjacency and the
/// canonical direction of travel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub id: LineId,
    pub name: String,
    /// Display color as a hex string (`#D93A30`).
    pub color: String,
    pub stations: Vec<StationCode>,
    /// Typical minutes between trains.
    pub frequency_mins: f64,
}

impl Line {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        color: impl Into<String>,
        stations: Vec<StationCode>,
        frequency_mins: f64,
    ) -> Self {
        Self {
            id: LineId::new(id),
            name: name.into(),
            color: color.into(),
            stations,
            frequency_mins,
        }
    }

    /// Position of a station in this line's sequence.
    pub fn position(&self, station: &StationCode) -> Option<usize> {
        self.stations.iter().position(|s| s == station)
    }

    /// Whether this line serves the station.
    pub fn serves(&self, station: &StationCode) -> bool {
        self.stations.contains(station)
    }

    /// The stations ridden from `from` to `to`, inclusive of both ends.
    ///
    /// The slice between the two positions is reversed when `from` comes
    /// after `to` in the canonical order. Returns `None` if either station
    /// is not on this line or both are the same station.
    pub fn ride(&self, from: &StationCode, to: &StationCode) -> Option<Vec<StationCode>> {
        let from_idx = self.position(from)?;
        let to_idx = self.position(to)?;
        if from_idx == to_idx {
            return None;
        }

        let (lo, hi) = (from_idx.min(to_idx), from_idx.max(to_idx));
        let mut stations = self.stations[lo..=hi].to_vec();
        if from_idx > to_idx {
            stations.reverse();
        }
        Some(stations)
    }
}
