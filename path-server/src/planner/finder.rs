//! Route calculation over an injected topology.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{Route, StationCode};
use crate::topology::Topology;

use super::candidates::candidates;
use super::rank::{rank_routes, score, select_best};

/// Error from route calculation.
///
/// "No route" is not an error: it is `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// The station code is not part of the topology
    #[error("unknown station: {0}")]
    UnknownStation(StationCode),
}

/// Check that both stations exist in the topology.
fn validate(topology: &Topology, from: &StationCode, to: &StationCode) -> Result<(), RouteError> {
    for code in [from, to] {
        if !topology.contains(code) {
            return Err(RouteError::UnknownStation(*code));
        }
    }
    Ok(())
}

/// Best direct or one-transfer route from `from` to `to` in `topology`.
pub fn find_best_route(
    topology: &Topology,
    from: StationCode,
    to: StationCode,
) -> Result<Option<Route>, RouteError> {
    validate(topology, &from, &to)?;
    if from == to {
        return Ok(None);
    }

    let best = select_best(candidates(topology, from, to));

    match &best {
        Some(route) => debug!(
            %from,
            %to,
            transfer = ?route.transfer_station(),
            stations = route.total_stations(),
            minutes = route.estimated_duration(),
            score = score(route),
            "selected route"
        ),
        None => debug!(%from, %to, "no route"),
    }

    Ok(best)
}

/// Finds the best route between two stations.
///
/// Holds a shared, immutable topology; cloning is cheap and calls never
/// block, so one planner can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct Planner {
    topology: Arc<Topology>,
}

impl Planner {
    pub fn new(topology: Arc<Topology>) -> Self {
        Self { topology }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Calculate the best route from `from` to `to`.
    ///
    /// Returns `Ok(None)` when the stations are the same or no direct or
    /// one-transfer route connects them.
    pub fn calculate_route(
        &self,
        from: StationCode,
        to: StationCode,
    ) -> Result<Option<Route>, RouteError> {
        find_best_route(&self.topology, from, to)
    }

    /// Every candidate route, best first.
    pub fn ranked_routes(
        &self,
        from: StationCode,
        to: StationCode,
    ) -> Result<Vec<Route>, RouteError> {
        validate(&self.topology, &from, &to)?;
        if from == to {
            return Ok(Vec::new());
        }
        Ok(rank_routes(candidates(&self.topology, from, to).collect()))
    }
}
