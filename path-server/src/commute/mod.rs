//! Commute direction and the user's home/work pair.
//!
//! The direction is a pure function of the hour: mornings run home to
//! work, everything else runs work to home. Callers re-evaluate it from
//! the wall clock whenever they need it.

mod store;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, StationCode};

pub use store::{CommuteStore, CommuteStoreConfig, StoreError};

/// First hour (inclusive) of the morning commute.
pub const MORNING_START_HOUR: u32 = 2;

/// First hour of the evening commute; mornings end before it.
pub const EVENING_START_HOUR: u32 = 14;

/// Which way the commute runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Home to work.
    Morning,
    /// Work to home.
    Evening,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Morning => f.write_str("morning"),
            Direction::Evening => f.write_str("evening"),
        }
    }
}

/// Commute direction for an hour of the day.
///
/// Hours in `[2, 14)` are morning; the rest are evening. Hours past 23 wrap.
///
/// ```
/// use path_server::commute::{Direction, commute_direction};
///
/// assert_eq!(commute_direction(2), Direction::Morning);
/// assert_eq!(commute_direction(14), Direction::Evening);
/// ```
pub fn commute_direction(hour: u32) -> Direction {
    let hour = hour % 24;
    if (MORNING_START_HOUR..EVENING_START_HOUR).contains(&hour) {
        Direction::Morning
    } else {
        Direction::Evening
    }
}

/// Origin and destination for a commute in the given direction.
pub fn commute_stations(
    home: StationCode,
    work: StationCode,
    direction: Direction,
) -> (StationCode, StationCode) {
    match direction {
        Direction::Morning => (home, work),
        Direction::Evening => (work, home),
    }
}

/// A user's home and work stations. They always differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommutePair {
    home: StationCode,
    work: StationCode,
}

impl CommutePair {
    pub fn new(home: StationCode, work: StationCode) -> Result<Self, DomainError> {
        if home == work {
            return Err(DomainError::SameHomeAndWork(home));
        }
        Ok(Self { home, work })
    }

    pub fn home(&self) -> StationCode {
        self.home
    }

    pub fn work(&self) -> StationCode {
        self.work
    }

    /// `(from, to)` for the given direction.
    pub fn stations(&self, direction: Direction) -> (StationCode, StationCode) {
        commute_stations(self.home, self.work, direction)
    }
}

impl<'de> Deserialize<'de> for CommutePair {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            home: StationCode,
            work: StationCode,
        }

        let raw = Raw::deserialize(deserializer)?;
        CommutePair::new(raw.home, raw.work).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> StationCode {
        StationCode::parse(s).unwrap()
    }

    #[test]
    fn direction_boundaries() {
        assert_eq!(commute_direction(2), Direction::Morning);
        assert_eq!(commute_direction(13), Direction::Morning);
        assert_eq!(commute_direction(14), Direction::Evening);
        assert_eq!(commute_direction(1), Direction::Evening);
    }

    #[test]
    fn direction_over_the_day() {
        let mornings: Vec<u32> = (0..24)
            .filter(|h| commute_direction(*h) == Direction::Morning)
            .collect();
        assert_eq!(mornings, (2..14).collect::<Vec<u32>>());
    }

    #[test]
    fn direction_wraps_large_hours() {
        assert_eq!(commute_direction(26), Direction::Morning);
        assert_eq!(commute_direction(24), Direction::Evening);
    }

    #[test]
    fn stations_by_direction() {
        let home = code("JSQ");
        let work = code("33S");
        assert_eq!(commute_stations(home, work, Direction::Morning), (home, work));
        assert_eq!(commute_stations(home, work, Direction::Evening), (work, home));
    }

    #[test]
    fn pair_rejects_same_station() {
        assert_eq!(
            CommutePair::new(code("HOB"), code("HOB")),
            Err(DomainError::SameHomeAndWork(code("HOB")))
        );
    }

    #[test]
    fn pair_stations() {
        let pair = CommutePair::new(code("NWK"), code("WTC")).unwrap();
        assert_eq!(pair.stations(Direction::Morning), (code("NWK"), code("WTC")));
        assert_eq!(pair.stations(Direction::Evening), (code("WTC"), code("NWK")));
    }

    #[test]
    fn pair_serde_validates() {
        let pair: CommutePair = serde_json::from_str(r#"{"home":"NWK","work":"WTC"}"#).unwrap();
        assert_eq!(pair.home(), code("NWK"));

        assert!(serde_json::from_str::<CommutePair>(r#"{"home":"NWK","work":"NWK"}"#).is_err());
        assert!(serde_json::from_str::<CommutePair>(r#"{"home":"nwk","work":"WTC"}"#).is_err());
    }

    #[test]
    fn direction_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Direction::Morning).unwrap(), "\"morning\"");
        assert_eq!(Direction::Evening.to_string(), "evening");
    }
}
