//! RidePATH realtime arrivals feed.
//!
//! The Port Authority publishes one JSON document with upcoming trains for
//! every station. Characteristics that shape this module:
//! - the feed is not always reachable directly, so the client walks an
//!   ordered list of sources (feed first, then proxies)
//! - numbers arrive as strings and colors without a leading '#'
//! - individual entries can be malformed; they are dropped, not fatal

mod client;
mod convert;
mod error;
#[cfg(test)]
mod mock;
mod types;

pub use client::{ArrivalsClient, ArrivalsConfig, ArrivalsSource, DEFAULT_FEED_URL, proxied_url};
pub use convert::{ConversionError, convert_feed, convert_message, convert_station};
pub use error::ArrivalsError;
pub use types::{Destination, Message, RidePathResponse, SecondsField, StationResult};
