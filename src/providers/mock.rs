// ABOUTME: Mocked-data activity source backed by static JSON documents
// ABOUTME: Emulates pagination over a fully materialized public dataset
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tokio::sync::OnceCell;
use tracing::debug;

use super::{ActivitySource, RawStreamSet};
use crate::config::MockDataConfig;
use crate::errors::{ProviderError, ProviderResult};
use crate::models::{Activity, ActivityId, StreamKey, StreamSet};

const PROVIDER_NAME: &str = "mock";

/// Activity source backed by two static JSON documents on a public URL
///
/// Used when the user opts out of live credentials. The activity document is a
/// plain array of summary activities; the streams document is an object keyed
/// by activity id. Each document is downloaded at most once per session and
/// pagination is emulated by slicing, so the fetcher's paging and retry
/// policies apply unchanged.
pub struct MockSource {
    client: Client,
    config: MockDataConfig,
    activities: OnceCell<Vec<Activity>>,
    streams: OnceCell<HashMap<String, StreamSet>>,
}

impl MockSource {
    /// Create a source from the mocked-data document locations and the
    /// process-wide HTTP client
    #[must_use]
    pub fn new(config: MockDataConfig, client: Client) -> Self {
        Self {
            client,
            config,
            activities: OnceCell::new(),
            streams: OnceCell::new(),
        }
    }

    async fn download<T: DeserializeOwned>(&self, url: &str) -> ProviderResult<T> {
        debug!("Downloading mocked document from {url}");

        let response =
            self.client
                .get(url)
                .send()
                .await
                .map_err(|source| ProviderError::Http {
                    provider: PROVIDER_NAME,
                    source,
                })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiStatus {
                provider: PROVIDER_NAME,
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(|source| ProviderError::Decode {
            provider: PROVIDER_NAME,
            source,
        })
    }

    async fn all_activities(&self) -> ProviderResult<&Vec<Activity>> {
        self.activities
            .get_or_try_init(|| self.download(&self.config.activities_url))
            .await
    }

    async fn all_streams(&self) -> ProviderResult<&HashMap<String, StreamSet>> {
        self.streams
            .get_or_try_init(|| async {
                let raw: HashMap<String, RawStreamSet> =
                    self.download(&self.config.streams_url).await?;
                Ok(raw.into_iter().map(|(id, s)| (id, s.into())).collect())
            })
            .await
    }
}

#[async_trait]
impl ActivitySource for MockSource {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn get_activities(&self, page: u32, per_page: usize) -> ProviderResult<Vec<Activity>> {
        let all = self.all_activities().await?;
        let start = (page.saturating_sub(1) as usize).saturating_mul(per_page);
        let end = start.saturating_add(per_page).min(all.len());

        if start >= all.len() {
            return Ok(Vec::new());
        }
        Ok(all[start..end].to_vec())
    }

    async fn get_activity_stream(
        &self,
        id: ActivityId,
        _keys: &[StreamKey],
    ) -> ProviderResult<StreamSet> {
        let streams = self.all_streams().await?;
        // Activities absent from the document yield an empty set, the same
        // degraded value the fetcher produces on retry exhaustion.
        Ok(streams.get(&id.to_string()).cloned().unwrap_or_default())
    }
}
