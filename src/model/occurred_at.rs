//! Fixed-layout operation timestamps.
//!
//! Stored as `YYYY-MM-DDTHH:MM:SS±HHMM` (Go layout `2006-01-02T15:04:05-0700`).
//! The layout is parsed and rendered explicitly rather than going through
//! jiff's own serde representation, so the on-disk text never drifts.

use std::fmt;
use std::str::FromStr;

use jiff::fmt::strtime;
use jiff::tz::{Offset, TimeZone};
use jiff::{Timestamp, Zoned};

/// The `strftime` layout of every stored timestamp.
pub const LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Errors that can occur while parsing a stored timestamp.
#[derive(Debug, thiserror::Error)]
pub enum TimestampError {
    #[error("expected layout YYYY-MM-DDTHH:MM:SS±HHMM")]
    Layout,

    #[error(transparent)]
    Jiff(#[from] jiff::Error),
}

/// When an operation was created: an instant plus the UTC offset it was
/// recorded in.
///
/// Second precision. Sub-second parts are dropped at construction so that
/// rendering and parsing are exact inverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccurredAt {
    timestamp: Timestamp,
    offset: Offset,
}

impl OccurredAt {
    /// The current time in the system time zone.
    pub fn now() -> Result<Self, jiff::Error> {
        let now = Zoned::now();
        Self::new(now.timestamp(), now.offset())
    }

    /// Builds a timestamp from an instant and offset, truncating to seconds.
    pub fn new(timestamp: Timestamp, offset: Offset) -> Result<Self, jiff::Error> {
        let timestamp = Timestamp::from_second(timestamp.as_second())?;
        Ok(Self { timestamp, offset })
    }

    #[cfg(test)]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    #[cfg(test)]
    pub fn offset(&self) -> Offset {
        self.offset
    }

    fn zoned(&self) -> Zoned {
        self.timestamp.to_zoned(TimeZone::fixed(self.offset))
    }
}

impl fmt::Display for OccurredAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = strtime::format(LAYOUT, &self.zoned()).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}

impl FromStr for OccurredAt {
    type Err = TimestampError;

    /// Parses exactly the stored layout.
    ///
    /// `strtime` alone accepts unpadded fields, short years and second-level
    /// offsets, so the result must render back to the same text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = strtime::parse(LAYOUT, s)?;
        let timestamp = parsed.to_timestamp()?;
        // `to_timestamp` already failed if the offset were missing.
        let offset = parsed.offset().unwrap_or(Offset::UTC);
        let at = Self::new(timestamp, offset)?;
        if at.to_string() != s {
            return Err(TimestampError::Layout);
        }
        Ok(at)
    }
}
