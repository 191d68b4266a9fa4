use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of minutes in a calendar day. The occupancy grid and all
/// day-relative offsets are bounded by this.
pub const MINUTES_PER_DAY: u16 = 1440;

/// Error parsing a clock-time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeFormatError {
    #[error("Invalid clock time '{0}': expected HH:MM or HH:MM:SS")]
    Malformed(String),

    #[error("Clock time '{0}' out of range")]
    OutOfRange(String),
}

/// A clock time expressed as minutes since midnight, always in `[0, 1440)`.
///
/// Parses from `HH:MM` or `HH:MM:SS` (seconds are accepted and discarded,
/// matching the stored schedule formats) and formats as zero-padded `HH:MM`.
/// Malformed input is rejected rather than truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayMinute(u16);

impl DayMinute {
    /// Create from a minute offset. Returns `None` outside `[0, 1440)`.
    pub fn new(minutes: u16) -> Option<Self> {
        if minutes < MINUTES_PER_DAY {
            Some(Self(minutes))
        } else {
            None
        }
    }

    /// Parse a `HH:MM` or `HH:MM:SS` clock time.
    pub fn parse(s: &str) -> Result<Self, TimeFormatError> {
        let mut parts = s.split(':');

        let hours = parts.next();
        let minutes = parts.next();
        let seconds = parts.next();
        if parts.next().is_some() {
            return Err(TimeFormatError::Malformed(s.to_string()));
        }

        let (hours, minutes) = match (hours, minutes) {
            (Some(h), Some(m)) => (parse_component(h, s)?, parse_component(m, s)?),
            _ => return Err(TimeFormatError::Malformed(s.to_string())),
        };

        // Seconds must still be well-formed even though they are discarded.
        if let Some(sec) = seconds {
            let sec = parse_component(sec, s)?;
            if sec > 59 {
                return Err(TimeFormatError::OutOfRange(s.to_string()));
            }
        }

        if hours > 23 || minutes > 59 {
            return Err(TimeFormatError::OutOfRange(s.to_string()));
        }

        Ok(Self(hours * 60 + minutes))
    }

    /// Minute offset since midnight.
    pub fn value(&self) -> u16 {
        self.0
    }
}

fn parse_component(part: &str, original: &str) -> Result<u16, TimeFormatError> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeFormatError::Malformed(original.to_string()));
    }
    part.parse()
        .map_err(|_| TimeFormatError::Malformed(original.to_string()))
}

impl fmt::Display for DayMinute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl Serialize for DayMinute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayMinute {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(D::Error::custom)
    }
}

/// Parse a clock time into minutes since midnight.
pub fn time_to_minutes(clock_time: &str) -> Result<u16, TimeFormatError> {
    DayMinute::parse(clock_time).map(|m| m.value())
}

/// Format a minute offset as zero-padded `HH:MM`.
///
/// Callers are expected to pass values in `[0, 1440)`; the slot walk never
/// produces anything else.
pub fn minutes_to_time(minutes: u16) -> String {
    debug_assert!(minutes < MINUTES_PER_DAY);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
