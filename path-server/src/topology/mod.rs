//! Transit topology: stations, lines and declared transfer points.
//!
//! A `Topology` is built once, validated, and then shared immutably
//! (typically behind an `Arc`) by everything that routes over it. The PATH
//! system lives in [`path_topology`]; tests build small synthetic networks
//! with [`TopologyBuilder`], and deployments can load one from JSON.

mod path;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{InvalidStationCode, Line, LineId, Station, StationCode};

pub use path::path_topology;

/// Errors raised while building or loading a topology.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TopologyError {
    #[error("invalid station code {code:?}: {source}")]
    InvalidCode {
        code: String,
        source: InvalidStationCode,
    },

    #[error("station {0} is declared twice")]
    DuplicateStation(StationCode),

    #[error("line {0} is declared twice")]
    DuplicateLine(LineId),

    #[error("line {line} references unknown station {station}")]
    UnknownStation { line: LineId, station: StationCode },

    #[error("line {0} must serve at least two stations")]
    LineTooShort(LineId),

    #[error("line {line} visits {station} more than once")]
    RepeatedStation { line: LineId, station: StationCode },

    #[error("line {0} must have a positive frequency")]
    InvalidFrequency(LineId),

    #[error("transfer station {0} is not in the station catalog")]
    UnknownTransferStation(StationCode),

    #[error("transfer station {0} is served by fewer than two lines")]
    TransferOnSingleLine(StationCode),

    #[error("failed to read topology: {0}")]
    Io(String),

    #[error("failed to parse topology JSON: {0}")]
    Json(String),
}

/// Immutable transit topology.
#[derive(Debug, Clone)]
pub struct Topology {
    stations: Vec<Station>,
    index: HashMap<StationCode, usize>,
    lines: Vec<Line>,
    transfers: Vec<StationCode>,
}

impl Topology {
    /// Start building a topology.
    pub fn builder() -> TopologyBuilder {
        TopologyBuilder::new()
    }

    /// Parse a topology from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, TopologyError> {
        let file: TopologyFile =
            serde_json::from_str(json).map_err(|e| TopologyError::Json(e.to_string()))?;
        file.into_builder().build()
    }

    /// Load a topology from a JSON file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TopologyError> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            TopologyError::Io(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_json(&contents)
    }

    /// Stations in declaration order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Lines in declaration order. Route enumeration follows this order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Declared transfer stations, in declaration order.
    pub fn transfer_stations(&self) -> &[StationCode] {
        &self.transfers
    }

    pub fn station(&self, code: &StationCode) -> Option<&Station> {
        self.index.get(code).map(|&i| &self.stations[i])
    }

    /// Display name for a station code, if it is in the catalog.
    pub fn station_name(&self, code: &StationCode) -> Option<&str> {
        self.station(code).map(|s| s.name.as_str())
    }

    pub fn contains(&self, code: &StationCode) -> bool {
        self.index.contains_key(code)
    }

    pub fn line(&self, id: &LineId) -> Option<&Line> {
        self.lines.iter().find(|l| &l.id == id)
    }

    /// Lines serving a station, in declaration order.
    pub fn lines_serving(&self, code: StationCode) -> impl Iterator<Item = &Line> + '_ {
        self.lines.iter().filter(move |l| l.serves(&code))
    }

    pub fn is_transfer(&self, code: &StationCode) -> bool {
        self.transfers.contains(code)
    }
}

/// Builder for [`Topology`].
///
/// Codes are given as strings and validated together in [`build`](Self::build).
#[derive(Debug, Default)]
pub struct TopologyBuilder {
    stations: Vec<(String, String, f64, f64)>,
    lines: Vec<(String, String, String, f64, Vec<String>)>,
    transfers: Vec<String>,
}

impl TopologyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a station to the catalog.
    pub fn station(mut self, code: &str, name: &str, lat: f64, lon: f64) -> Self {
        self.stations
            .push((code.to_string(), name.to_string(), lat, lon));
        self
    }

    /// Add a line serving `stations` in order.
    pub fn line(
        mut self,
        id: &str,
        name: &str,
        color: &str,
        frequency_mins: f64,
        stations: &[&str],
    ) -> Self {
        self.lines.push((
            id.to_string(),
            name.to_string(),
            color.to_string(),
            frequency_mins,
            stations.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    /// Declare a transfer station.
    pub fn transfer(mut self, code: &str) -> Self {
        self.transfers.push(code.to_string());
        self
    }

    /// Validate and build the topology.
    pub fn build(self) -> Result<Topology, TopologyError> {
        let mut stations = Vec::with_capacity(self.stations.len());
        let mut index = HashMap::new();
        for (code, name, lat, lon) in self.stations {
            let code = parse_code(&code)?;
            if index.insert(code, stations.len()).is_some() {
                return Err(TopologyError::DuplicateStation(code));
            }
            stations.push(Station::new(code, name, lat, lon));
        }

        let mut lines: Vec<Line> = Vec::with_capacity(self.lines.len());
        for (id, name, color, frequency_mins, codes) in self.lines {
            let id = LineId::new(id);
            if lines.iter().any(|l| l.id == id) {
                return Err(TopologyError::DuplicateLine(id));
            }
            if !(frequency_mins > 0.0) {
                return Err(TopologyError::InvalidFrequency(id));
            }

            let mut seen = HashSet::new();
            let mut line_stations = Vec::with_capacity(codes.len());
            for code in codes {
                let station = parse_code(&code)?;
                if !index.contains_key(&station) {
                    return Err(TopologyError::UnknownStation {
                        line: id.clone(),
                        station,
                    });
                }
                if !seen.insert(station) {
                    return Err(TopologyError::RepeatedStation {
                        line: id.clone(),
                        station,
                    });
                }
                line_stations.push(station);
            }
            if line_stations.len() < 2 {
                return Err(TopologyError::LineTooShort(id));
            }

            lines.push(Line {
                id,
                name,
                color,
                stations: line_stations,
                frequency_mins,
            });
        }

        let mut transfers = Vec::with_capacity(self.transfers.len());
        for code in self.transfers {
            let code = parse_code(&code)?;
            if !index.contains_key(&code) {
                return Err(TopologyError::UnknownTransferStation(code));
            }
            if lines.iter().filter(|l| l.serves(&code)).count() < 2 {
                return Err(TopologyError::TransferOnSingleLine(code));
            }
            if !transfers.contains(&code) {
                transfers.push(code);
            }
        }

        Ok(Topology {
            stations,
            index,
            lines,
            transfers,
        })
    }
}

fn parse_code(code: &str) -> Result<StationCode, TopologyError> {
    StationCode::parse(code).map_err(|source| TopologyError::InvalidCode {
        code: code.to_string(),
        source,
    })
}

/// On-disk JSON form of a topology.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologyFile {
    pub stations: Vec<StationEntry>,
    pub lines: Vec<LineEntry>,
    #[serde(default)]
    pub transfers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationEntry {
    pub code: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineEntry {
    pub id: String,
    pub name: String,
    pub color: String,
    pub frequency_mins: f64,
    pub stations: Vec<String>,
}

impl TopologyFile {
    fn into_builder(self) -> TopologyBuilder {
        TopologyBuilder {
            stations: self
                .stations
                .into_iter()
                .map(|s| (s.code, s.name, s.lat, s.lon))
                .collect(),
            lines: self
                .lines
                .into_iter()
                .map(|l| (l.id, l.name, l.color, l.frequency_mins, l.stations))
                .collect(),
            transfers: self.transfers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    /// A-B-C on one line, C-D on another, transfer at C.
    fn small() -> TopologyBuilder {
        Topology::builder()
            .station("AAA", "Alpha", 0.0, 0.0)
            .station("BBB", "Bravo", 0.0, 0.01)
            .station("CCC", "Charlie", 0.0, 0.02)
            .station("DDD", "Delta", 0.01, 0.02)
            .line("L1", "Line One", "#111111", 6.0, &["AAA", "BBB", "CCC"])
            .line("L2", "Line Two", "#222222", 12.0, &["CCC", "DDD"])
    }

    #[test]
    fn builds_valid_topology() {
        let topo = small().transfer("CCC").build().unwrap();

        assert_eq!(topo.stations().len(), 4);
        assert_eq!(topo.lines().len(), 2);
        assert_eq!(topo.transfer_stations(), &[code("CCC")]);
        assert!(topo.is_transfer(&code("CCC")));
        assert!(!topo.is_transfer(&code("BBB")));
        assert_eq!(topo.station_name(&code("DDD")), Some("Delta"));
        assert!(topo.contains(&code("AAA")));
        assert!(!topo.contains(&code("ZZZ")));
    }

    #[test]
    fn lines_serving_in_declared_order() {
        let topo = small().transfer("CCC").build().unwrap();
        let ids: Vec<&str> = topo
            .lines_serving(code("CCC"))
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(ids, vec!["L1", "L2"]);
    }

    #[test]
    fn lines_serving_outlives_the_code() {
        let topo = small().transfer("CCC").build().unwrap();
        let serving = {
            let station = code("AAA");
            topo.lines_serving(station)
        };
        let ids: Vec<&str> = serving.map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["L1"]);
        assert_eq!(topo.lines_serving(code("ZZZ")).count(), 0);
    }

    #[test]
    fn rejects_invalid_code() {
        let err = Topology::builder()
            .station("aaa", "Alpha", 0.0, 0.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, TopologyError::InvalidCode { .. }));
    }

    #[test]
    fn rejects_duplicate_station() {
        let err = small()
            .station("AAA", "Again", 0.0, 0.0)
            .build()
            .unwrap_err();
        assert_eq!(err, TopologyError::DuplicateStation(code("AAA")));
    }

    #[test]
    fn rejects_line_with_unknown_station() {
        let err = small()
            .line("L3", "Line Three", "#333333", 5.0, &["AAA", "ZZZ"])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            TopologyError::UnknownStation {
                line: LineId::new("L3"),
                station: code("ZZZ"),
            }
        );
    }

    #[test]
    fn rejects_short_and_looping_lines() {
        let err = small()
            .line("L3", "Stub", "#333333", 5.0, &["AAA"])
            .build()
            .unwrap_err();
        assert_eq!(err, TopologyError::LineTooShort(LineId::new("L3")));

        let err = small()
            .line("L3", "Loop", "#333333", 5.0, &["AAA", "BBB", "AAA"])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            TopologyError::RepeatedStation {
                line: LineId::new("L3"),
                station: code("AAA"),
            }
        );
    }

    #[test]
    fn rejects_bad_frequency() {
        let err = small()
            .line("L3", "Never", "#333333", 0.0, &["AAA", "DDD"])
            .build()
            .unwrap_err();
        assert_eq!(err, TopologyError::InvalidFrequency(LineId::new("L3")));
    }

    #[test]
    fn rejects_transfer_on_single_line() {
        let err = small().transfer("BBB").build().unwrap_err();
        assert_eq!(err, TopologyError::TransferOnSingleLine(code("BBB")));

        let err = small().transfer("ZZZ").build().unwrap_err();
        assert_eq!(err, TopologyError::UnknownTransferStation(code("ZZZ")));
    }

    #[test]
    fn duplicate_transfers_collapse() {
        let topo = small().transfer("CCC").transfer("CCC").build().unwrap();
        assert_eq!(topo.transfer_stations().len(), 1);
    }

    #[test]
    fn from_json() {
        let json = r##"{
            "stations": [
                {"code": "AAA", "name": "Alpha", "lat": 0.0, "lon": 0.0},
                {"code": "BBB", "name": "Bravo", "lat": 0.0, "lon": 0.01}
            ],
            "lines": [
                {"id": "L1", "name": "Line One", "color": "#111111",
                 "frequency_mins": 8, "stations": ["AAA", "BBB"]}
            ]
        }"##;

        let topo = Topology::from_json(json).unwrap();
        assert_eq!(topo.lines()[0].frequency_mins, 8.0);
        assert!(topo.transfer_stations().is_empty());
    }

    #[test]
    fn from_json_rejects_malformed() {
        let err = Topology::from_json("{\"stations\": 3}").unwrap_err();
        assert!(matches!(err, TopologyError::Json(_)));
    }

    #[test]
    fn load_missing_file() {
        let err = Topology::load("/nonexistent/topology.json").unwrap_err();
        assert!(matches!(err, TopologyError::Io(_)));
    }
}
