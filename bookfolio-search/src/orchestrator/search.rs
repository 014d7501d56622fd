//! Core search orchestrator: primary query, conditional top-up, rank, merge.
//!
//! Google Books is queried first. Only when it yields fewer than
//! `fallback_threshold` records is OpenLibrary consulted. The two provider
//! calls are never issued concurrently.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::provider::BookProvider;
use crate::providers::{GoogleBooksProvider, OpenLibraryProvider};
use crate::types::BookSummary;

use super::merge::merge;
use super::ranking::rank;

/// Check a raw query and return it trimmed.
///
/// # Errors
///
/// Returns [`SearchError::InvalidQuery`] if the query is blank or longer
/// than `config.max_query_chars` characters.
pub fn validate_query<'q>(query: &'q str, config: &SearchConfig) -> Result<&'q str, SearchError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(SearchError::InvalidQuery("query must not be empty".into()));
    }
    let chars = trimmed.chars().count();
    if chars > config.max_query_chars {
        return Err(SearchError::InvalidQuery(format!(
            "query must be at most {} characters, got {chars}",
            config.max_query_chars
        )));
    }
    Ok(trimmed)
}

/// Orchestrate a search across a primary and a secondary provider.
///
/// # Pipeline
///
/// 1. Validate the query, then the configuration
/// 2. Query `primary`; any failure aborts the search
/// 3. Rank primary results
/// 4. If at least `config.fallback_threshold` remain, truncate and return
/// 5. Otherwise query `secondary`; on failure return the primary results
/// 6. Rank secondary results and merge them behind the primary ones
/// 7. Truncate to `config.max_results`
///
/// # Errors
///
/// Returns [`SearchError::InvalidQuery`] for a bad query (no provider is
/// contacted), [`SearchError::Config`] for an invalid configuration, and
/// [`SearchError::ProviderUnavailable`] if the primary provider fails.
/// Secondary failures are logged and never returned.
pub async fn orchestrate_search<P, S>(
    query: &str,
    primary: &P,
    secondary: &S,
    config: &SearchConfig,
) -> Result<Vec<BookSummary>, SearchError>
where
    P: BookProvider,
    S: BookProvider,
{
    let query = validate_query(query, config)?;
    config.validate()?;

    tracing::trace!(query, "book search");

    // 1. Primary provider: failures are fatal.
    let primary_source = primary.source();
    let primary_results = primary.search(query, config).await.map_err(|err| {
        tracing::warn!(provider = %primary_source, error = %err, "primary provider failed");
        SearchError::ProviderUnavailable {
            provider: primary_source,
            reason: err.to_string(),
        }
    })?;

    let mut ranked = rank(primary_results, query);
    tracing::debug!(provider = %primary_source, count = ranked.len(), "primary results ranked");

    // 2. Enough primary results: skip the secondary call entirely.
    if ranked.len() >= config.fallback_threshold {
        ranked.truncate(config.max_results);
        return Ok(ranked);
    }

    // 3. Top up from the secondary provider, degrading to primary-only.
    let secondary_source = secondary.source();
    let secondary_results = match secondary.search(query, config).await {
        Ok(results) => results,
        Err(err) => {
            tracing::warn!(
                provider = %secondary_source,
                error = %err,
                "secondary provider failed, returning primary results only"
            );
            ranked.truncate(config.max_results);
            return Ok(ranked);
        }
    };

    let secondary_ranked = rank(secondary_results, query);
    tracing::debug!(
        provider = %secondary_source,
        count = secondary_ranked.len(),
        "secondary results ranked"
    );

    let mut merged = merge(ranked, secondary_ranked);
    merged.truncate(config.max_results);
    Ok(merged)
}

/// A reusable search service holding both providers and the configuration.
///
/// Build once at startup and share it; providers keep their HTTP connection
/// pools across searches.
#[derive(Debug, Clone)]
pub struct BookSearch<P = GoogleBooksProvider, S = OpenLibraryProvider> {
    config: SearchConfig,
    primary: P,
    secondary: S,
}

impl BookSearch {
    /// Build a service backed by Google Books and OpenLibrary.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` is invalid, or
    /// [`SearchError::Http`] if an HTTP client cannot be built.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let primary = GoogleBooksProvider::new(&config)?;
        let secondary = OpenLibraryProvider::new(&config)?;
        Ok(Self {
            config,
            primary,
            secondary,
        })
    }
}

impl<P: BookProvider, S: BookProvider> BookSearch<P, S> {
    /// Build a service around arbitrary providers.
    pub fn with_providers(config: SearchConfig, primary: P, secondary: S) -> Self {
        Self {
            config,
            primary,
            secondary,
        }
    }

    /// Run one search. See [`orchestrate_search`].
    ///
    /// # Errors
    ///
    /// Same as [`orchestrate_search`].
    pub async fn search(&self, query: &str) -> Result<Vec<BookSummary>, SearchError> {
        orchestrate_search(query, &self.primary, &self.secondary, &self.config).await
    }

    /// The configuration this service was built with.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}
