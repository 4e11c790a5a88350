//! PATH commute planner server.
//!
//! Answers: "which trains get me between home and work right now?" Routes
//! on the PATH network use at most one transfer, and live arrivals come from
//! the Port Authority's RidePATH feed.

pub mod arrivals;
pub mod cache;
pub mod commute;
pub mod config;
pub mod domain;
pub mod freshness;
pub mod nearest;
pub mod planner;
pub mod poller;
pub mod topology;
pub mod web;
