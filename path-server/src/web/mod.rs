//! Web layer for the PATH commute planner.
//!
//! JSON endpoints for routes, stations, live arrivals and the saved commute.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
