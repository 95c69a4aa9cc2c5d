// ABOUTME: Activity source trait and shared wire types for source implementations
// ABOUTME: Live Strava client and static mocked-data fallback implementations
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

pub mod mock;
pub mod strava;

pub use mock::MockSource;
pub use strava::StravaSource;

use async_trait::async_trait;

use crate::errors::ProviderResult;
use crate::models::{Activity, ActivityId, StreamKey, StreamSet};

/// One stream payload from a key-by-type streams document
#[derive(Debug, serde::Deserialize)]
pub(crate) struct RawStream {
    #[serde(default)]
    pub(crate) data: Vec<f64>,
}

/// Streams keyed by type, the shape shared by the Strava streams endpoint
/// (`key_by_type=true`) and the entries of the mocked streams document
#[derive(Debug, Default, serde::Deserialize)]
pub(crate) struct RawStreamSet {
    #[serde(default)]
    pub(crate) distance: Option<RawStream>,
    #[serde(default)]
    pub(crate) velocity_smooth: Option<RawStream>,
}

impl From<RawStreamSet> for StreamSet {
    fn from(raw: RawStreamSet) -> Self {
        Self {
            distance: raw.distance.map(|s| s.data).unwrap_or_default(),
            velocity_smooth: raw.velocity_smooth.map(|s| s.data).unwrap_or_default(),
        }
    }
}

/// Unified interface over activity data sources
///
/// Both the live Strava client and the mocked-data fallback implement this
/// trait, so the fetcher and the session are source-agnostic. Methods do one
/// network round trip each; retry and pagination policy live in
/// [`crate::fetcher`].
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Short source name for logs and error messages
    fn name(&self) -> &'static str;

    /// Fetch one page of activity summaries
    ///
    /// Pages are 1-based. An empty page means the listing is exhausted.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::errors::ProviderError`] on transport failure,
    /// non-success status, or an undecodable body.
    async fn get_activities(&self, page: u32, per_page: usize) -> ProviderResult<Vec<Activity>>;

    /// Fetch the telemetry streams for one activity
    ///
    /// # Errors
    ///
    /// Returns a [`crate::errors::ProviderError`] on transport failure,
    /// non-success status, or an undecodable body.
    async fn get_activity_stream(
        &self,
        id: ActivityId,
        keys: &[StreamKey],
    ) -> ProviderResult<StreamSet>;
}
