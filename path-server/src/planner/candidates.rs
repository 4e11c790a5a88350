//! Lazy enumeration of candidate routes.
//!
//! Direct routes come first, one per line serving both stations, in line
//! order. Transfer routes follow: for each declared transfer station (in
//! declared order), each pair of distinct lines that reach it from the
//! origin and leave it for the destination. Selection depends on this order
//! to break ties.

use crate::domain::{Route, Segment, StationCode};
use crate::topology::Topology;

/// Every direct single-line route from `from` to `to`.
pub fn direct_routes(
    topology: &Topology,
    from: StationCode,
    to: StationCode,
) -> impl Iterator<Item = Route> + '_ {
    topology.lines().iter().filter_map(move |line| {
        let segment = Segment::on_line(line, from, to, false)?;
        Route::new(vec![segment]).ok()
    })
}

/// Every one-transfer route from `from` to `to`.
///
/// Both legs must ride different lines; a change to the same line would
/// duplicate a direct route.
pub fn transfer_routes(
    topology: &Topology,
    from: StationCode,
    to: StationCode,
) -> impl Iterator<Item = Route> + '_ {
    let lines = topology.lines();

    topology
        .transfer_stations()
        .iter()
        .copied()
        .filter(move |via| *via != from && *via != to)
        .flat_map(move |via| {
            lines.iter().flat_map(move |first_line| {
                Segment::on_line(first_line, from, via, false)
                    .into_iter()
                    .flat_map(move |first| {
                        lines
                            .iter()
                            .filter(move |second_line| second_line.id != first_line.id)
                            .filter_map(move |second_line| {
                                let second = Segment::on_line(second_line, via, to, true)?;
                                Route::new(vec![first.clone(), second]).ok()
                            })
                    })
            })
        })
}

/// All candidates: direct routes, then transfer routes.
pub fn candidates(
    topology: &Topology,
    from: StationCode,
    to: StationCode,
) -> impl Iterator<Item = Route> + '_ {
    direct_routes(topology, from, to).chain(transfer_routes(topology, from, to))
}
