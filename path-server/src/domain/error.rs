//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from feed/IO errors.

use super::StationCode;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Route has no segments
    #[error("route must have at least one segment")]
    EmptyRoute,

    /// Consecutive segments don't meet at the same station
    #[error("segment ending at {0} does not connect to segment starting at {1}")]
    SegmentsNotConnected(StationCode, StationCode),

    /// More segments than a single transfer allows
    #[error("route has {0} segments; at most one transfer is supported")]
    TooManySegments(usize),

    /// Invalid segment construction
    #[error("invalid segment: {0}")]
    InvalidSegment(&'static str),

    /// Commute pair with the same station at both ends
    #[error("home and work must differ (both are {0})")]
    SameHomeAndWork(StationCode),
}
