//! Nearest-station lookup from a location.
//!
//! Uses the Haversine formula for distances on the Earth's surface.

use geo::{HaversineDistance, Point};

use crate::domain::Station;
use crate::topology::Topology;

/// The closest station to a location.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestStation<'a> {
    pub station: &'a Station,
    pub distance_m: f64,
}

/// Haversine distance in metres between two lat/lon points.
pub fn distance_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    // geo points are (x = lon, y = lat)
    Point::new(lon1, lat1).haversine_distance(&Point::new(lon2, lat2))
}

/// Find the station closest to `(lat, lon)`.
///
/// Ties go to the station declared first. `None` only for an empty topology
/// or a non-finite location.
pub fn nearest_station(topology: &Topology, lat: f64, lon: f64) -> Option<NearestStation<'_>> {
    if !lat.is_finite() || !lon.is_finite() {
        return None;
    }

    let mut best: Option<NearestStation<'_>> = None;
    for station in topology.stations() {
        let distance = distance_m(lat, lon, station.lat, station.lon);
        match &best {
            Some(b) if distance >= b.distance_m => {}
            _ => {
                best = Some(NearestStation {
                    station,
                    distance_m: distance,
                })
            }
        }
    }
    best
}
