//! Station code types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A valid 3-character PATH station code.
///
/// Codes are 3 ASCII characters, each an uppercase letter or a digit
/// (`NWK`, `WTC`, `09S`). Any `StationCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use path_server::domain::StationCode;
///
/// let wtc = StationCode::parse("WTC").unwrap();
/// assert_eq!(wtc.as_str(), "WTC");
///
/// // Digits are allowed
/// assert!(StationCode::parse("33S").is_ok());
///
/// // Lowercase is rejected
/// assert!(StationCode::parse("wtc").is_err());
///
/// // Wrong length is rejected
/// assert!(StationCode::parse("WT").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationCode([u8; 3]);

impl StationCode {
    /// Parse a station code from a string.
    ///
    /// The input must be exactly 3 characters from `A-Z` or `0-9`.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidStationCode {
                reason: "must be exactly 3 characters",
            });
        }

        for &b in bytes {
            if !(b.is_ascii_uppercase() || b.is_ascii_digit()) {
                return Err(InvalidStationCode {
                    reason: "must be uppercase ASCII letters or digits",
                });
            }
        }

        Ok(StationCode([bytes[0], bytes[1], bytes[2]]))
    }

    /// Parse user input, trimming whitespace and uppercasing first.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidStationCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII bytes are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.as_str())
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StationCode {
    type Err = InvalidStationCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for StationCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StationCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        StationCode::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A station in the catalog: code, display name and location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub code: StationCode,
    pub name: String,
    /// Latitude in degrees (WGS84).
    pub lat: f64,
    /// Longitude in degrees (WGS84).
    pub lon: f64,
}

impl Station {
    pub fn new(code: StationCode, name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            code,
            name: name.into(),
            lat,
            lon,
        }
    }
}
