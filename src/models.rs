// ABOUTME: Domain models for running activities and telemetry streams
// ABOUTME: Activity summaries, sport types, and per-activity sample vectors
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric activity identifier as assigned by the remote API
pub type ActivityId = u64;

/// Sport type for an activity
///
/// Covers the sports this dashboard cares about; anything else is preserved
/// verbatim in `Other` so filtering on it remains possible.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum SportType {
    /// Running activity
    Run,
    /// Cycling activity
    Ride,
    /// Walking activity
    Walk,
    /// Hiking activity
    Hike,
    /// Swimming activity
    Swim,
    /// Any provider-specific type not mapped above
    Other(String),
}

impl From<String> for SportType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Run" => Self::Run,
            "Ride" => Self::Ride,
            "Walk" => Self::Walk,
            "Hike" => Self::Hike,
            "Swim" => Self::Swim,
            _ => Self::Other(s),
        }
    }
}

impl From<SportType> for String {
    fn from(sport: SportType) -> Self {
        sport.to_string()
    }
}

impl fmt::Display for SportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Run => write!(f, "Run"),
            Self::Ride => write!(f, "Ride"),
            Self::Walk => write!(f, "Walk"),
            Self::Hike => write!(f, "Hike"),
            Self::Swim => write!(f, "Swim"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// One remote workout summary, immutable once fetched
///
/// Field names follow the summary-activity payload of the Strava API, which
/// the mocked documents share, so the struct deserializes directly from both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    /// Unique activity identifier
    pub id: ActivityId,
    /// Activity name as entered by the athlete
    #[serde(default)]
    pub name: String,
    /// Sport type (e.g., `Run`)
    pub sport_type: SportType,
    /// Start timestamp (UTC)
    pub start_date: DateTime<Utc>,
    /// Total elapsed time in seconds
    pub elapsed_time: u64,
    /// Distance in meters
    pub distance: f64,
    /// Average speed in meters per second
    pub average_speed: f64,
}

/// Streams that can be requested for an activity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum StreamKey {
    /// Cumulative distance samples in meters
    Distance,
    /// Smoothed velocity samples in meters per second
    VelocitySmooth,
}

impl StreamKey {
    /// Wire name used in the streams endpoint query
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::VelocitySmooth => "velocity_smooth",
        }
    }
}

impl fmt::Display for StreamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-activity telemetry samples, keyed by stream
///
/// The vectors are parallel: index `i` of every present stream describes the
/// same sample. An empty set is a valid degraded value returned when the
/// stream fetch exhausts its retry budget.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StreamSet {
    /// Cumulative distance in meters, one entry per sample
    #[serde(default)]
    pub distance: Vec<f64>,
    /// Smoothed velocity in meters per second, one entry per sample
    #[serde(default)]
    pub velocity_smooth: Vec<f64>,
}

impl StreamSet {
    /// Whether no samples are present for any stream
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distance.is_empty() && self.velocity_smooth.is_empty()
    }

    /// Number of samples in the shortest present stream
    #[must_use]
    pub fn len(&self) -> usize {
        self.distance.len().min(self.velocity_smooth.len())
    }
}
