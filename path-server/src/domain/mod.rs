//! Domain types for the PATH commute planner.
//!
//! This module contains the value types the planner works with: station
//! codes, lines, segments and routes, plus live arrival boards. All types
//! enforce their invariants at construction time, so code that receives
//! them can trust their validity.

mod arrival;
mod duration;
mod error;
mod line;
mod route;
mod station;

pub use arrival::{Arrival, ArrivalsFeed, Heading, StationBoard};
pub use duration::{MINUTES_PER_HOP, TRANSFER_MINUTES, estimate_duration, segment_minutes};
pub use error::DomainError;
pub use line::{Line, LineId};
pub use route::{Route, Segment};
pub use station::{InvalidStationCode, Station, StationCode};
