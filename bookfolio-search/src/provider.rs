//! Trait definition for pluggable book metadata providers.
//!
//! Google Books and OpenLibrary each implement [`BookProvider`] to give the
//! orchestrator a uniform way to fetch already-normalised records.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::{BookSource, BookSummary};

/// A book metadata provider.
///
/// Implementors issue one HTTP request per search and map each raw record
/// to a [`BookSummary`]. Each provider handles its own:
///
/// - URL construction with query encoding
/// - HTTP request and status handling
/// - Mapping of its JSON shape to [`BookSummary`]
///
/// Records come back in provider order; ranking is the orchestrator's job.
/// All implementations must be `Send + Sync` so one instance can serve
/// concurrent requests.
pub trait BookProvider: Send + Sync {
    /// Search the provider and return normalised records.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the request fails or the status is
    /// not 2xx, and [`SearchError::Parse`] if the response envelope cannot
    /// be decoded. Individual records with missing fields never fail.
    fn search(
        &self,
        query: &str,
        config: &SearchConfig,
    ) -> impl std::future::Future<Output = Result<Vec<BookSummary>, SearchError>> + Send;

    /// Returns which provider this implementation represents.
    fn source(&self) -> BookSource;
}
