//! Route scoring and selection.
//!
//! Every candidate gets a cost; the cheapest wins. The weights are fixed:
//! changing them changes which route is chosen.

use std::cmp::Ordering;

use crate::domain::Route;

/// Flat cost of changing trains.
pub const TRANSFER_PENALTY: f64 = 100.0;

/// Cost per distinct station traversed.
pub const STATION_WEIGHT: f64 = 2.0;

/// Cost per minute of average line frequency.
pub const FREQUENCY_WEIGHT: f64 = 2.0;

/// Score a route. Lower is better.
///
/// `score = 100 (if transfer) + 2 × stations + 2 × mean segment frequency`
pub fn score(route: &Route) -> f64 {
    let segments = route.segments();
    let mean_frequency =
        segments.iter().map(|s| s.frequency_mins).sum::<f64>() / segments.len() as f64;

    let transfer = if route.requires_transfer() {
        TRANSFER_PENALTY
    } else {
        0.0
    };

    transfer + STATION_WEIGHT * route.total_stations() as f64 + FREQUENCY_WEIGHT * mean_frequency
}

/// Pick the lowest-scoring route.
///
/// Only a strictly lower score replaces the current best, so ties go to the
/// candidate produced first.
pub fn select_best(candidates: impl IntoIterator<Item = Route>) -> Option<Route> {
    let mut best: Option<(f64, Route)> = None;

    for route in candidates {
        let cost = score(&route);
        match &best {
            Some((best_cost, _)) if cost >= *best_cost => {}
            _ => best = Some((cost, route)),
        }
    }

    best.map(|(_, route)| route)
}

/// Sort routes best-first. The sort is stable, so equal scores keep their
/// input order.
pub fn rank_routes(mut routes: Vec<Route>) -> Vec<Route> {
    routes.sort_by(|a, b| score(a).partial_cmp(&score(b)).unwrap_or(Ordering::Equal));
    routes
}
