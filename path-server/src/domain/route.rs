//! Routes: one or two line segments joined at a transfer station.

use std::collections::HashSet;

use serde::Serialize;

use super::duration::estimate_duration;
use super::{DomainError, Line, LineId, StationCode};

/// One uninterrupted ride on a single line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub line: LineId,
    /// Frequency of the line, carried for duration and score calculations.
    pub frequency_mins: f64,
    pub from: StationCode,
    pub to: StationCode,
    /// Stations traversed in travel order, inclusive of both ends.
    pub stations: Vec<StationCode>,
    /// Whether this segment begins a new leg after a transfer.
    pub is_transfer: bool,
}

impl Segment {
    /// Build the segment riding `line` from `from` to `to`.
    ///
    /// Returns `None` unless both stations are distinct stops on the line,
    /// so every segment's stations belong to its line.
    pub fn on_line(
        line: &Line,
        from: StationCode,
        to: StationCode,
        is_transfer: bool,
    ) -> Option<Self> {
        let stations = line.ride(&from, &to)?;
        Some(Self {
            line: line.id.clone(),
            frequency_mins: line.frequency_mins,
            from,
            to,
            stations,
            is_transfer,
        })
    }

    /// Number of stations on this segment, both ends included.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of hops between adjacent stations.
    pub fn hops(&self) -> usize {
        self.stations.len().saturating_sub(1)
    }
}

/// A validated route from an origin to a destination.
///
/// Invariants:
/// - at least one segment, at most two (one transfer)
/// - each segment ends where the next begins
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    segments: Vec<Segment>,
    total_stations: usize,
    requires_transfer: bool,
    estimated_duration: u32,
}

impl Route {
    /// Maximum number of segments in a route.
    pub const MAX_SEGMENTS: usize = 2;

    /// Build a route from its segments, computing the derived attributes.
    pub fn new(segments: Vec<Segment>) -> Result<Self, DomainError> {
        if segments.is_empty() {
            return Err(DomainError::EmptyRoute);
        }
        if segments.len() > Self::MAX_SEGMENTS {
            return Err(DomainError::TooManySegments(segments.len()));
        }
        for seg in &segments {
            if seg.stations.len() < 2 {
                return Err(DomainError::InvalidSegment("needs at least two stations"));
            }
        }
        for pair in segments.windows(2) {
            if pair[0].to != pair[1].from {
                return Err(DomainError::SegmentsNotConnected(pair[0].to, pair[1].from));
            }
        }

        let distinct: HashSet<&StationCode> =
            segments.iter().flat_map(|s| s.stations.iter()).collect();
        let total_stations = distinct.len();
        let requires_transfer = segments.len() > 1;
        let estimated_duration = estimate_duration(&segments);

        Ok(Self {
            segments,
            total_stations,
            requires_transfer,
            estimated_duration,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn origin(&self) -> StationCode {
        self.segments[0].from
    }

    pub fn destination(&self) -> StationCode {
        self.segments[self.segments.len() - 1].to
    }

    /// Count of distinct stations traversed.
    pub fn total_stations(&self) -> usize {
        self.total_stations
    }

    pub fn requires_transfer(&self) -> bool {
        self.requires_transfer
    }

    /// Estimated travel time in whole minutes.
    pub fn estimated_duration(&self) -> u32 {
        self.estimated_duration
    }

    /// The station where the transfer happens, if any.
    pub fn transfer_station(&self) -> Option<StationCode> {
        self.requires_transfer.then(|| self.segments[0].to)
    }

    /// Every station on the route in travel order.
    ///
    /// A transfer station appears once, not once per adjacent segment.
    pub fn all_stations(&self) -> Vec<StationCode> {
        let mut stations: Vec<StationCode> = Vec::with_capacity(self.total_stations);
        for segment in &self.segments {
            for station in &segment.stations {
                if stations.last() != Some(station) {
                    stations.push(*station);
                }
            }
        }
        stations
    }
}
