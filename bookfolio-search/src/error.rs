//! Error types for the bookfolio-search crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. The Google Books API key never appears in
//! error messages.

use crate::types::BookSource;

/// Errors that can occur during a book search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The query was missing, blank, or too long. Never reaches a provider.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A provider call failed outright.
    #[error("{provider} unavailable: {reason}")]
    ProviderUnavailable {
        /// Which provider failed.
        provider: BookSource,
        /// What went wrong, already stripped of credentials.
        reason: String,
    },

    /// An HTTP request to a provider failed or returned a non-2xx status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A provider response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Returns `true` if this error was caused by the caller's input rather
    /// than by a provider or the configuration.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidQuery(_))
    }
}

/// Convenience type alias for bookfolio-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
