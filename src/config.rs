// ABOUTME: Environment-only configuration for the dashboard
// ABOUTME: Strava credentials, mock-data URLs, fetch limits, and HTTP timeouts
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use url::Url;

use crate::fetcher::RetryConfig;

/// Default Strava API base URL
pub const DEFAULT_STRAVA_API_BASE: &str = "https://www.strava.com/api/v3";

/// Default Strava OAuth token endpoint
pub const DEFAULT_STRAVA_TOKEN_URL: &str = "https://www.strava.com/oauth/token";

/// Default base URL for the static mocked-data documents
pub const DEFAULT_MOCK_DATA_BASE: &str =
    "https://raw.githubusercontent.com/runboard/mock-data/main";

/// Default activities requested per page
pub const DEFAULT_PER_PAGE: usize = 200;

/// Default hard ceiling on pages fetched in one session
pub const DEFAULT_MAX_PAGES: u32 = 50;

/// Strava API access configuration
#[derive(Debug, Clone)]
pub struct StravaApiConfig {
    /// API base URL
    pub base_url: String,
    /// OAuth token endpoint
    pub token_url: String,
    /// Bearer token, if already issued
    pub access_token: Option<String>,
    /// Refresh token for startup token refresh
    pub refresh_token: Option<String>,
    /// OAuth client ID
    pub client_id: Option<String>,
    /// OAuth client secret
    pub client_secret: Option<String>,
}

impl StravaApiConfig {
    /// Whether a startup token refresh can be attempted
    #[must_use]
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.is_some() && self.client_id.is_some() && self.client_secret.is_some()
    }
}

/// Locations of the static mocked-data documents
#[derive(Debug, Clone)]
pub struct MockDataConfig {
    /// URL of the activity-list JSON document
    pub activities_url: String,
    /// URL of the streams JSON document (object keyed by activity id)
    pub streams_url: String,
}

/// Pagination and retry limits for the session fetch
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Activities requested per page
    pub per_page: usize,
    /// Hard ceiling on the number of pages requested
    pub max_pages: u32,
    /// Retry budget and backoff shape
    pub retry: RetryConfig,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            max_pages: DEFAULT_MAX_PAGES,
            retry: RetryConfig::default(),
        }
    }
}

/// HTTP client timeouts
#[derive(Debug, Clone, Copy)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl HttpConfig {
    /// Build the HTTP client the activity sources share
    ///
    /// One client per process is enough; its connection pool is reused by
    /// every source it is handed to.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn client(&self) -> Result<reqwest::Client> {
        reqwest::ClientBuilder::new()
            .timeout(Duration::from_secs(self.timeout_secs))
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .build()
            .context("failed to build HTTP client")
    }
}

/// Complete environment-derived configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Strava API access
    pub strava: StravaApiConfig,
    /// Mocked-data fallback locations
    pub mock: MockDataConfig,
    /// Pagination and retry limits
    pub fetch: FetchConfig,
    /// HTTP client timeouts
    pub http: HttpConfig,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Every variable has a default except the Strava credentials, which stay
    /// `None` when unset; the mocked-data source needs no credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is present but unparseable.
    pub fn from_env() -> Result<Self> {
        let mock_base =
            env::var("MOCK_DATA_BASE_URL").unwrap_or_else(|_| DEFAULT_MOCK_DATA_BASE.into());

        Ok(Self {
            strava: StravaApiConfig {
                base_url: env::var("STRAVA_API_BASE")
                    .unwrap_or_else(|_| DEFAULT_STRAVA_API_BASE.into()),
                token_url: env::var("STRAVA_TOKEN_URL")
                    .unwrap_or_else(|_| DEFAULT_STRAVA_TOKEN_URL.into()),
                access_token: env::var("STRAVA_ACCESS_TOKEN").ok(),
                refresh_token: env::var("STRAVA_REFRESH_TOKEN").ok(),
                client_id: env::var("STRAVA_CLIENT_ID").ok(),
                client_secret: env::var("STRAVA_CLIENT_SECRET").ok(),
            },
            mock: MockDataConfig {
                activities_url: env::var("MOCK_ACTIVITIES_URL")
                    .unwrap_or_else(|_| format!("{mock_base}/activities.json")),
                streams_url: env::var("MOCK_STREAMS_URL")
                    .unwrap_or_else(|_| format!("{mock_base}/streams.json")),
            },
            fetch: FetchConfig {
                per_page: parse_env("FETCH_PER_PAGE", DEFAULT_PER_PAGE)?,
                max_pages: parse_env("FETCH_MAX_PAGES", DEFAULT_MAX_PAGES)?,
                retry: RetryConfig {
                    max_retries: parse_env("FETCH_MAX_RETRIES", RetryConfig::default().max_retries)?,
                    backoff_base_secs: parse_env(
                        "FETCH_BACKOFF_BASE_SECS",
                        RetryConfig::default().backoff_base_secs,
                    )?,
                },
            },
            http: HttpConfig {
                timeout_secs: parse_env("HTTP_TIMEOUT_SECS", HttpConfig::default().timeout_secs)?,
                connect_timeout_secs: parse_env(
                    "HTTP_CONNECT_TIMEOUT_SECS",
                    HttpConfig::default().connect_timeout_secs,
                )?,
            },
        })
    }

    /// Validate limits that would make the fetch loop degenerate and check
    /// that every configured endpoint is a well-formed URL
    ///
    /// # Errors
    ///
    /// Returns an error if `per_page` or `max_pages` is zero, or if any
    /// endpoint URL does not parse.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.per_page == 0 {
            anyhow::bail!("FETCH_PER_PAGE must be greater than zero");
        }
        if self.fetch.max_pages == 0 {
            anyhow::bail!("FETCH_MAX_PAGES must be greater than zero");
        }

        for (name, value) in [
            ("STRAVA_API_BASE", &self.strava.base_url),
            ("STRAVA_TOKEN_URL", &self.strava.token_url),
            ("MOCK_ACTIVITIES_URL", &self.mock.activities_url),
            ("MOCK_STREAMS_URL", &self.mock.streams_url),
        ] {
            Url::parse(value).with_context(|| format!("invalid URL in {name}: {value}"))?;
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("invalid value for {name}: {raw}")),
        Err(_) => Ok(default),
    }
}
