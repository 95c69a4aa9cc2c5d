// ABOUTME: Pagination and retry orchestration over an activity source
// ABOUTME: Skip-failed-page policy with bounded exponential backoff
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::FetchConfig;
use crate::models::{Activity, ActivityId, StreamKey, StreamSet};
use crate::providers::ActivitySource;

/// Retry budget and backoff shape for page and stream requests
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    /// Retries after the initial attempt
    pub max_retries: u32,
    /// Backoff base in seconds; the wait after failed attempt `n` (0-based)
    /// is `backoff_base_secs * 2^n`
    pub backoff_base_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_base_secs: 1,
        }
    }
}

impl RetryConfig {
    /// Total attempts including the initial one
    #[must_use]
    pub const fn total_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Backoff duration after failed attempt `attempt` (0-based)
    #[must_use]
    pub const fn backoff_after(&self, attempt: u32) -> Duration {
        Duration::from_secs(self.backoff_base_secs << attempt)
    }
}

/// Outcome of a full-session activity fetch
///
/// The skip-failed-page policy means the list can be silently incomplete;
/// `skipped_pages` makes that observable so callers can warn the user.
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    /// All activities from successful pages, in request order
    pub activities: Vec<Activity>,
    /// Number of pages that returned data
    pub pages_fetched: u32,
    /// Pages whose retry budget was exhausted
    pub skipped_pages: Vec<u32>,
}

impl FetchReport {
    /// Whether every requested page was fetched successfully
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped_pages.is_empty()
    }
}

/// Outcome of one page request after retries
enum PageFetch {
    /// The page was fetched
    Page(Vec<Activity>),
    /// Transient failures exhausted the retry budget
    RetriesExhausted,
    /// Deterministic failure (credentials, config); further pages would fail too
    Fatal,
}

/// Fetch the full activity history page by page
///
/// Requests pages `1..=max_pages` of `per_page` activities until a page comes
/// back empty or the ceiling is reached. Each page gets the configured retry
/// budget with exponential backoff; a page that exhausts its budget is skipped
/// and pagination continues, while a deterministic failure (bad credentials,
/// bad config) aborts the loop since every later page would fail the same way.
/// The result never fails: degraded sessions show up as `skipped_pages`.
pub async fn fetch_all_activities(
    source: &dyn ActivitySource,
    config: &FetchConfig,
) -> FetchReport {
    let mut report = FetchReport::default();

    for page in 1..=config.max_pages {
        match fetch_page_with_retry(source, page, config).await {
            PageFetch::Page(batch) if batch.is_empty() => {
                debug!("Page {page} empty, activity listing exhausted");
                break;
            }
            PageFetch::Page(batch) => {
                report.pages_fetched += 1;
                report.activities.extend(batch);
            }
            PageFetch::RetriesExhausted => {
                warn!(
                    "Skipping page {page} of {} after exhausting retries",
                    source.name()
                );
                report.skipped_pages.push(page);
            }
            PageFetch::Fatal => {
                warn!(
                    "Aborting pagination of {} at page {page}: failure is not retryable",
                    source.name()
                );
                report.skipped_pages.push(page);
                break;
            }
        }
    }

    info!(
        "Fetched {} activities over {} pages ({} skipped)",
        report.activities.len(),
        report.pages_fetched,
        report.skipped_pages.len()
    );
    report
}

/// One page with retries
async fn fetch_page_with_retry(
    source: &dyn ActivitySource,
    page: u32,
    config: &FetchConfig,
) -> PageFetch {
    let retry = &config.retry;

    for attempt in 0..retry.total_attempts() {
        match source.get_activities(page, config.per_page).await {
            Ok(batch) => return PageFetch::Page(batch),
            Err(e) => {
                if !e.is_transient() {
                    // Credential and config failures burn no retry budget
                    warn!("Page {page} failed without retry: {e}");
                    return PageFetch::Fatal;
                }
                if attempt < retry.max_retries {
                    let wait = retry.backoff_after(attempt);
                    warn!(
                        "Page {page} attempt {}/{} failed ({e}), backing off {}s",
                        attempt + 1,
                        retry.total_attempts(),
                        wait.as_secs()
                    );
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }
    PageFetch::RetriesExhausted
}

/// Fetch one activity's telemetry streams with a bounded retry budget
///
/// Retries up to `max_retries` times after the initial attempt, without
/// backoff. On exhaustion the caller gets an empty [`StreamSet`] rather than
/// an error, so a flaky stream endpoint degrades one chart instead of the
/// whole view.
pub async fn fetch_stream(
    source: &dyn ActivitySource,
    id: ActivityId,
    keys: &[StreamKey],
    retry: &RetryConfig,
) -> StreamSet {
    for attempt in 0..retry.total_attempts() {
        match source.get_activity_stream(id, keys).await {
            Ok(stream) => return stream,
            Err(e) => {
                debug!(
                    "Stream fetch for activity {id} attempt {}/{} failed: {e}",
                    attempt + 1,
                    retry.total_attempts()
                );
            }
        }
    }

    warn!("Stream fetch for activity {id} exhausted retries, returning empty set");
    StreamSet::default()
}
