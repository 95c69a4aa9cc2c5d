// ABOUTME: Strava API integration for activity listings and telemetry streams
// ABOUTME: Bearer-token requests with startup OAuth2 token refresh
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::{ActivitySource, RawStreamSet};
use crate::config::StravaApiConfig;
use crate::errors::{ProviderError, ProviderResult};
use crate::models::{Activity, ActivityId, StreamKey, StreamSet};

use async_trait::async_trait;

const PROVIDER_NAME: &str = "strava";

/// Live Strava activity source
///
/// Issues bearer-authenticated requests against the Strava v3 API. Credentials
/// come from [`StravaApiConfig`]; when only a refresh token is configured,
/// [`StravaSource::authenticate`] exchanges it for an access token at startup.
pub struct StravaSource {
    client: Client,
    config: StravaApiConfig,
    access_token: RwLock<Option<String>>,
}

/// Token endpoint response for the refresh grant
#[derive(Debug, Deserialize)]
struct TokenRefreshResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

impl StravaSource {
    /// Create a source from configuration and the process-wide HTTP client
    #[must_use]
    pub fn new(config: StravaApiConfig, client: Client) -> Self {
        let access_token = RwLock::new(config.access_token.clone());
        Self {
            client,
            config,
            access_token,
        }
    }

    /// Ensure a usable access token is available
    ///
    /// Uses the configured access token when present; otherwise exchanges the
    /// refresh token. Credential failures here are surfaced directly and are
    /// never retried.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::AuthFailed`] when no token is configured and
    /// no refresh is possible, or when the token endpoint rejects the refresh.
    pub async fn authenticate(&self) -> ProviderResult<()> {
        if self.access_token.read().await.is_some() {
            debug!("Using configured Strava access token");
            return Ok(());
        }

        if !self.config.can_refresh() {
            return Err(ProviderError::AuthFailed {
                provider: PROVIDER_NAME,
                message: "no access token and no refresh credentials configured".into(),
            });
        }

        let token = self.refresh_access_token().await?;
        *self.access_token.write().await = Some(token);
        info!("Strava access token refreshed");
        Ok(())
    }

    /// Exchange the refresh token for a fresh access token
    async fn refresh_access_token(&self) -> ProviderResult<String> {
        // can_refresh() was checked by the caller
        let (Some(client_id), Some(client_secret), Some(refresh_token)) = (
            self.config.client_id.as_deref(),
            self.config.client_secret.as_deref(),
            self.config.refresh_token.as_deref(),
        ) else {
            return Err(ProviderError::AuthFailed {
                provider: PROVIDER_NAME,
                message: "refresh credentials incomplete".into(),
            });
        };

        let params = [
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ];

        let response = self
            .client
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|source| ProviderError::Http {
                provider: PROVIDER_NAME,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::AuthFailed {
                provider: PROVIDER_NAME,
                message: format!("token refresh returned {status}: {message}"),
            });
        }

        let token: TokenRefreshResponse =
            response.json().await.map_err(|source| ProviderError::Decode {
                provider: PROVIDER_NAME,
                source,
            })?;

        if token.refresh_token.is_none() {
            warn!("No rotated refresh token provided by Strava");
        }

        Ok(token.access_token)
    }

    async fn bearer_token(&self) -> ProviderResult<String> {
        self.access_token
            .read()
            .await
            .clone()
            .ok_or(ProviderError::NotAuthenticated {
                provider: PROVIDER_NAME,
            })
    }

    async fn get_json<T>(&self, url: &str, query: &[(&str, String)]) -> ProviderResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let token = self.bearer_token().await?;

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await
            .map_err(|source| ProviderError::Http {
                provider: PROVIDER_NAME,
                source,
            })?;

        let status = response.status();
        debug!("Strava API response status: {status}");

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
}

#[async_trait]
impl ActivitySource for StravaSource {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn get_activities(&self, page: u32, per_page: usize) -> ProviderResult<Vec<Activity>> {
        let url = format!("{}/athlete/activities", self.config.base_url);
        let query = [
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
        ];
        debug!("Fetching activities page {page} from {url}");

        self.get_json(&url, &query).await
    }

    async fn get_activity_stream(
        &self,
        id: ActivityId,
        keys: &[StreamKey],
    ) -> ProviderResult<StreamSet> {
        let url = format!("{}/activities/{id}/streams", self.config.base_url);
        let key_list = keys
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let query = [
            ("keys", key_list),
            ("key_by_type", "true".to_owned()),
        ];
        debug!("Fetching streams for activity {id}");

        let raw: RawStreamSet = self.get_json(&url, &query).await?;
        Ok(raw.into())
    }
}
