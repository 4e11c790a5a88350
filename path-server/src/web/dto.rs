//! Data transfer objects for web requests and responses.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::commute::{CommutePair, Direction};
use crate::domain::{Arrival, Route, Segment, Station, StationBoard, StationCode};
use crate::freshness::Freshness;
use crate::topology::Topology;

/// Query for a route between two stations.
#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub from: String,
    pub to: String,
}

/// Route lookup result. `route` is null when the stations aren't connected.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub from: String,
    pub to: String,
    pub route: Option<RouteResult>,
}

/// A station reference with its display name.
#[derive(Debug, Clone, Serialize)]
pub struct StationRef {
    pub code: String,
    pub name: String,
}

impl StationRef {
    pub fn new(code: &StationCode, topology: &Topology) -> Self {
        Self {
            code: code.as_str().to_string(),
            name: topology.station_name(code).unwrap_or(code.as_str()).to_string(),
        }
    }
}

/// A route in API responses.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    pub origin: StationRef,
    pub destination: StationRef,
    pub requires_transfer: bool,
    pub transfer_station: Option<StationRef>,
    pub total_stations: usize,
    pub estimated_duration_mins: u32,
    /// Every station in travel order, transfer station once.
    pub stations: Vec<String>,
    pub segments: Vec<SegmentResult>,
}

impl RouteResult {
    /// Create from a domain Route.
    pub fn from_route(route: &Route, topology: &Topology) -> Self {
        Self {
            origin: StationRef::new(&route.origin(), topology),
            destination: StationRef::new(&route.destination(), topology),
            requires_transfer: route.requires_transfer(),
            transfer_station: route
                .transfer_station()
                .map(|code| StationRef::new(&code, topology)),
            total_stations: route.total_stations(),
            estimated_duration_mins: route.estimated_duration(),
            stations: route
                .all_stations()
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
            segments: route
                .segments()
                .iter()
                .map(|s| SegmentResult::from_segment(s, topology))
                .collect(),
        }
    }
}

/// One line segment of a route.
#[derive(Debug, Serialize)]
pub struct SegmentResult {
    pub line_id: String,
    pub line_name: String,
    pub line_color: String,
    pub from: StationRef,
    pub to: StationRef,
    pub stations: Vec<String>,
    pub is_transfer: bool,
}

impl SegmentResult {
    /// Create from a domain Segment.
    pub fn from_segment(segment: &Segment, topology: &Topology) -> Self {
        let line = topology.line(&segment.line);
        Self {
            line_id: segment.line.as_str().to_string(),
            line_name: line.map(|l| l.name.clone()).unwrap_or_default(),
            line_color: line.map(|l| l.color.clone()).unwrap_or_default(),
            from: StationRef::new(&segment.from, topology),
            to: StationRef::new(&segment.to, topology),
            stations: segment
                .stations
                .iter()
                .map(|s| s.as_str().to_string())
                .collect(),
            is_transfer: segment.is_transfer,
        }
    }
}

/// A station in the catalog.
#[derive(Debug, Serialize)]
pub struct StationInfo {
    pub code: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// Ids of the lines serving this station.
    pub lines: Vec<String>,
    pub is_transfer: bool,
}

impl StationInfo {
    pub fn from_station(station: &Station, topology: &Topology) -> Self {
        Self {
            code: station.code.as_str().to_string(),
            name: station.name.clone(),
            lat: station.lat,
            lon: station.lon,
            lines: topology
                .lines_serving(station.code)
                .map(|l| l.id.as_str().to_string())
                .collect(),
            is_transfer: topology.is_transfer(&station.code),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationInfo>,
}

/// Query for the station nearest a location.
#[derive(Debug, Deserialize)]
pub struct NearestQuery {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Serialize)]
pub struct NearestResponse {
    pub station: StationInfo,
    pub distance_m: f64,
}

/// Query for arrivals at a station.
#[derive(Debug, Deserialize)]
pub struct ArrivalsQuery {
    pub station: String,
}

/// A predicted arrival.
#[derive(Debug, Serialize)]
pub struct ArrivalResult {
    /// "ToNY" or "ToNJ"
    pub heading: String,
    pub target: Option<String>,
    pub headsign: String,
    pub line_colors: Vec<String>,
    pub arrives_in_secs: i64,
    pub message: String,
    pub last_updated: String,
}

impl ArrivalResult {
    /// Create from a domain Arrival.
    pub fn from_arrival(arrival: &Arrival) -> Self {
        Self {
            heading: arrival.heading.label().to_string(),
            target: arrival.target.map(|t| t.as_str().to_string()),
            headsign: arrival.headsign.clone(),
            line_colors: arrival.line_colors.clone(),
            arrives_in_secs: arrival.arrives_in.num_seconds(),
            message: arrival.message.clone(),
            last_updated: arrival.last_updated.to_rfc3339_opts(SecondsFormat::Secs, false),
        }
    }
}

/// Arrivals at one station.
#[derive(Debug, Serialize)]
pub struct BoardResult {
    pub station: StationRef,
    /// Freshness of the newest prediction, or of the fetch for an empty board.
    pub freshness: Freshness,
    pub last_updated: Option<String>,
    pub arrivals: Vec<ArrivalResult>,
}

impl BoardResult {
    /// Create from a domain StationBoard, judging freshness at `now`.
    pub fn from_board(
        board: &StationBoard,
        fetched_at: DateTime<Utc>,
        now: DateTime<Utc>,
        topology: &Topology,
    ) -> Self {
        let last_updated = board.last_updated();
        let freshness = match &last_updated {
            Some(updated) => Freshness::classify(updated, &now),
            None => Freshness::classify(&fetched_at, &now),
        };

        let mut arrivals: Vec<&Arrival> = board.arrivals.iter().collect();
        arrivals.sort_by_key(|a| a.arrives_in);

        Self {
            station: StationRef::new(&board.station, topology),
            freshness,
            last_updated: last_updated.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, false)),
            arrivals: arrivals.into_iter().map(ArrivalResult::from_arrival).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ArrivalsResponse {
    pub board: BoardResult,
    /// Where the snapshot came from.
    pub source: String,
}

/// Query for the current commute.
///
/// Without `home`/`work` the stored pair is used. `hour` defaults to the
/// local wall clock.
#[derive(Debug, Default, Deserialize)]
pub struct CommuteQuery {
    pub home: Option<String>,
    pub work: Option<String>,
    pub hour: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct CommuteResponse {
    pub direction: Direction,
    pub from: StationRef,
    pub to: StationRef,
    pub route: Option<RouteResult>,
    /// Stations along the route in travel order, each once.
    pub arrival_stations: Vec<String>,
    /// Live boards for `arrival_stations`.
    pub boards: Vec<BoardResult>,
    /// Set when live arrivals could not be loaded.
    pub arrivals_error: Option<String>,
}

/// Body for saving a commute pair.
#[derive(Debug, Deserialize)]
pub struct CommutePairBody {
    pub home: String,
    pub work: String,
}

#[derive(Debug, Serialize)]
pub struct CommutePairResponse {
    pub home: StationRef,
    pub work: StationRef,
}

impl CommutePairResponse {
    pub fn from_pair(pair: &CommutePair, topology: &Topology) -> Self {
        Self {
            home: StationRef::new(&pair.home(), topology),
            work: StationRef::new(&pair.work(), topology),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
