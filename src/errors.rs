// ABOUTME: Structured error types for activity source operations
// ABOUTME: Provider errors carry enough context to decide retry vs. surface
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use thiserror::Error;

/// Result alias for activity source operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors raised by activity sources
///
/// Transient failures (`Http`, `ApiStatus` with a 5xx/429) are candidates for
/// the fetcher's bounded retries; everything else is surfaced directly.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The HTTP request itself failed (connect, timeout, TLS)
    #[error("request to {provider} failed: {source}")]
    Http {
        /// Source name for log context
        provider: &'static str,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status
    #[error("{provider} API returned {status}: {message}")]
    ApiStatus {
        /// Source name for log context
        provider: &'static str,
        /// HTTP status code
        status: u16,
        /// Response body, best effort
        message: String,
    },

    /// The response body could not be decoded into the expected shape
    #[error("failed to decode {provider} response: {source}")]
    Decode {
        /// Source name for log context
        provider: &'static str,
        /// Underlying decode error
        #[source]
        source: reqwest::Error,
    },

    /// No usable access token for an authenticated endpoint
    #[error("not authenticated with {provider}")]
    NotAuthenticated {
        /// Source name for log context
        provider: &'static str,
    },

    /// Credential or token-refresh failure, surfaced to the user, never retried
    #[error("{provider} authentication failed: {message}")]
    AuthFailed {
        /// Source name for log context
        provider: &'static str,
        /// What went wrong
        message: String,
    },

    /// Configuration is missing or invalid
    #[error("configuration error: {0}")]
    Config(String),
}

impl ProviderError {
    /// Whether the fetcher should spend retry budget on this error
    ///
    /// Credential and configuration failures are deterministic; retrying them
    /// only delays the user-visible error.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Http { .. } | Self::Decode { .. } => true,
            Self::ApiStatus { status, .. } => *status == 429 || *status >= 500,
            Self::NotAuthenticated { .. } | Self::AuthFailed { .. } | Self::Config(_) => false,
        }
    }
}
