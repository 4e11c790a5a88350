//! Commute route planner.
//!
//! Answers "how do I get from this station to that one?" over a fixed
//! topology. Candidate routes (direct, or one transfer at a declared
//! transfer station) are generated lazily, scored, and the cheapest is
//! returned together with an estimated travel time.
//!
//! Routes with two or more transfers are never produced. The PATH network
//! does not need them, and allowing them would change which candidates tie.

mod candidates;
mod finder;
mod rank;


pub use crate::domain::{MINUTES_PER_HOP, TRANSFER_MINUTES, estimate_duration, segment_minutes};
pub use candidates::{candidates, direct_routes, transfer_routes};
pub use finder::{Planner, RouteError, find_best_route};
pub use rank::{FREQUENCY_WEIGHT, STATION_WEIGHT, TRANSFER_PENALTY, rank_routes, score, select_best};
