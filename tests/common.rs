// ABOUTME: Shared test fixtures: activity factory and a scripted source
// ABOUTME: Lets fetcher and session tests control page and stream outcomes
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
#![allow(missing_docs)]
#![allow(dead_code)] // Not every integration test uses every fixture

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use runboard::errors::{ProviderError, ProviderResult};
use runboard::models::{Activity, ActivityId, SportType, StreamKey, StreamSet};
use runboard::providers::ActivitySource;

/// Build an activity with sane defaults for tests
pub fn make_activity(id: ActivityId, start: &str, distance_m: f64) -> Activity {
    make_activity_with(id, start, distance_m, 1800, 2.78, SportType::Run)
}

pub fn make_activity_with(
    id: ActivityId,
    start: &str,
    distance_m: f64,
    elapsed_time: u64,
    average_speed: f64,
    sport_type: SportType,
) -> Activity {
    let start_date: DateTime<Utc> = start.parse().unwrap_or_else(|_| Utc::now());
    Activity {
        id,
        name: format!("Activity {id}"),
        sport_type,
        start_date,
        elapsed_time,
        distance: distance_m,
        average_speed,
    }
}

/// What a scripted source does when one page is requested
pub enum PageScript {
    /// Return these activities
    Ok(Vec<Activity>),
    /// Fail with a transient (retryable) error on every attempt
    FailAlways,
    /// Fail with a non-retryable error (bad credentials)
    FailFatal,
}

/// Activity source whose page and stream behavior is scripted per test
///
/// Pages beyond the script return empty, terminating pagination. Call
/// counters expose how many round trips the code under test performed.
#[derive(Default)]
pub struct ScriptedSource {
    pages: Vec<PageScript>,
    streams: HashMap<ActivityId, StreamSet>,
    fail_streams: bool,
    pub list_calls: AtomicU32,
    pub stream_calls: AtomicU32,
}

impl ScriptedSource {
    pub fn with_pages(pages: Vec<PageScript>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    pub fn with_streams(mut self, streams: HashMap<ActivityId, StreamSet>) -> Self {
        self.streams = streams;
        self
    }

    pub fn failing_streams() -> Self {
        Self {
            fail_streams: true,
            ..Self::default()
        }
    }

    pub fn list_call_count(&self) -> u32 {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn stream_call_count(&self) -> u32 {
        self.stream_calls.load(Ordering::SeqCst)
    }

    fn transient_error() -> ProviderError {
        ProviderError::ApiStatus {
            provider: "scripted",
            status: 503,
            message: "scripted failure".into(),
        }
    }
}

#[async_trait]
impl ActivitySource for ScriptedSource {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn get_activities(&self, page: u32, _per_page: usize) -> ProviderResult<Vec<Activity>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        match self.pages.get(page.saturating_sub(1) as usize) {
            Some(PageScript::Ok(activities)) => Ok(activities.clone()),
            Some(PageScript::FailAlways) => Err(Self::transient_error()),
            Some(PageScript::FailFatal) => Err(ProviderError::NotAuthenticated {
                provider: "scripted",
            }),
            None => Ok(Vec::new()),
        }
    }

    async fn get_activity_stream(
        &self,
        id: ActivityId,
        _keys: &[StreamKey],
    ) -> ProviderResult<StreamSet> {
        self.stream_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_streams {
            return Err(Self::transient_error());
        }
        Ok(self.streams.get(&id).cloned().unwrap_or_default())
    }
}

/// Shared handle to a scripted source
///
/// Sessions take ownership of their boxed source; this wrapper lets a test
/// keep a second handle to inspect the call counters afterwards.
pub struct SharedSource(pub Arc<ScriptedSource>);

#[async_trait]
impl ActivitySource for SharedSource {
    fn name(&self) -> &'static str {
        self.0.name()
    }

    async fn get_activities(&self, page: u32, per_page: usize) -> ProviderResult<Vec<Activity>> {
        self.0.get_activities(page, per_page).await
    }

    async fn get_activity_stream(
        &self,
        id: ActivityId,
        keys: &[StreamKey],
    ) -> ProviderResult<StreamSet> {
        self.0.get_activity_stream(id, keys).await
    }
}
