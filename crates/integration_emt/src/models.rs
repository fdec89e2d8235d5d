//! Transit data models
//!
//! Normalized representations of arrivals, lines, sublines and stops, plus the
//! derived display fields (countdown text and line color).

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Neutral gray used when a line has no known color
pub const DEFAULT_LINE_COLOR: &str = "#757575";

/// A bus arriving at a stop, ready for display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Arrival {
    /// Line code (e.g. "5", "A1")
    pub line: String,
    /// Line color as a hex string
    pub color: String,
    /// Destination shown on the vehicle
    pub destination: String,
    /// Countdown text ("Now", "3min", "3'", "Soon")
    pub time_display: String,
}

/// Rendering style for minute countdowns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinuteStyle {
    /// "5min"
    #[default]
    Suffix,
    /// "5'"
    Apostrophe,
}

/// Time remaining until a vehicle reaches the stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrivalTime {
    /// Less than a minute away
    Now,
    /// Whole minutes remaining
    Minutes(u64),
    /// Countdown unknown
    Soon,
}

impl ArrivalTime {
    /// Derive the countdown from a raw `seconds` value
    ///
    /// Numbers and numeric strings are accepted; anything else (including a
    /// missing value) yields [`ArrivalTime::Soon`]. Negative values clamp to
    /// zero.
    #[must_use]
    pub fn from_seconds(raw: Option<&Value>) -> Self {
        let minutes = match raw {
            Some(Value::Number(n)) => n
                .as_i64()
                .map(|secs| secs.div_euclid(60).max(0).unsigned_abs())
                .or_else(|| n.as_f64().and_then(minutes_from_float)),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok().and_then(minutes_from_float),
            _ => None,
        };

        match minutes {
            Some(0) => Self::Now,
            Some(m) => Self::Minutes(m),
            None => Self::Soon,
        }
    }

    /// Render as display text
    #[must_use]
    pub fn display(&self, style: MinuteStyle) -> String {
        match (self, style) {
            (Self::Now, _) => "Now".to_string(),
            (Self::Soon, _) => "Soon".to_string(),
            (Self::Minutes(m), MinuteStyle::Suffix) => format!("{m}min"),
            (Self::Minutes(m), MinuteStyle::Apostrophe) => format!("{m}'"),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped and floored first
fn minutes_from_float(secs: f64) -> Option<u64> {
    if !secs.is_finite() {
        return None;
    }
    Some((secs / 60.0).floor().max(0.0) as u64)
}

/// Cut a destination to at most `max_chars` characters
///
/// Missing or blank destinations become "Unknown".
#[must_use]
pub fn truncate_destination(raw: Option<&str>, max_chars: usize) -> String {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(dest) => dest.chars().take(max_chars).collect(),
        None => "Unknown".to_string(),
    }
}

/// Normalize an upstream color value to a `#`-prefixed hex string
///
/// Accepts `RRGGBB`, `RGB` with or without a leading `#`; anything else falls
/// back to [`DEFAULT_LINE_COLOR`].
#[must_use]
pub fn normalize_color(raw: Option<&str>) -> String {
    let Some(hex) = raw.map(|s| s.trim().trim_start_matches('#')) else {
        return DEFAULT_LINE_COLOR.to_string();
    };

    let valid = matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        format!("#{}", hex.to_ascii_uppercase())
    } else {
        DEFAULT_LINE_COLOR.to_string()
    }
}

/// Metadata for a bus line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineInfo {
    /// Public line code (e.g. "5")
    pub code: String,
    /// Identifier used for subline and stop queries
    pub numeric_id: String,
    /// Display name; the code when the API gives none
    pub name: String,
    /// Line color as a hex string
    pub color: String,
}

impl fmt::Display for LineInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name == self.code {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{} {}", self.code, self.name)
        }
    }
}

/// A variant (route pattern) of a line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subline {
    /// Subline identifier
    pub id: String,
    /// Display name (may be empty)
    pub name: String,
    /// Travel direction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
}

/// A stop served by a line, with coordinates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stop {
    /// Stop identifier
    pub id: String,
    /// Human-readable stop name
    pub name: String,
    /// Latitude coordinate
    pub latitude: f64,
    /// Longitude coordinate
    pub longitude: f64,
}

impl fmt::Display for Stop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
