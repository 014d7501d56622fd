//! # bookfolio-search
//!
//! Book metadata search across Google Books and OpenLibrary.
//!
//! This crate turns a free-text query into a ranked, de-duplicated list of
//! [`BookSummary`] records. It compiles into the Bookfolio server as a
//! library dependency.
//!
//! ## Design
//!
//! - Google Books is the primary provider and is always queried first
//! - OpenLibrary is queried only when Google returns fewer than
//!   `fallback_threshold` records
//! - Each provider's list is ranked by cover, title match, publisher and
//!   popularity before the two are merged
//! - Graceful degradation: a failing secondary provider never fails a search
//!
//! ## Security
//!
//! - The Google API key is sent only as a query parameter and is stripped
//!   from every error message
//! - Search queries are logged only at trace level

pub mod config;
pub mod error;
pub mod http;
pub mod normalize;
pub mod orchestrator;
pub mod provider;
pub mod providers;
pub mod types;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use orchestrator::search::{orchestrate_search, validate_query, BookSearch};
pub use provider::BookProvider;
pub use providers::{GoogleBooksProvider, OpenLibraryProvider};
pub use types::{BookSource, BookSummary};

/// Search Google Books, topping up from OpenLibrary when results are thin.
///
/// Builds fresh providers from `config` for this one call. Long-running
/// callers should build a [`BookSearch`] once and reuse it.
///
/// # Errors
///
/// Returns [`SearchError::InvalidQuery`] for a blank or over-long query,
/// [`SearchError::Config`] for an invalid configuration, and
/// [`SearchError::ProviderUnavailable`] if Google Books fails. OpenLibrary
/// failures are logged and never returned.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> bookfolio_search::Result<()> {
/// let config = bookfolio_search::SearchConfig::default();
/// let books = bookfolio_search::search("george orwell", &config).await?;
/// for book in &books {
///     println!("{} by {}", book.title, book.author);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(query: &str, config: &SearchConfig) -> Result<Vec<BookSummary>> {
    config.validate()?;
    let primary = GoogleBooksProvider::new(config)?;
    let secondary = OpenLibraryProvider::new(config)?;
    orchestrate_search(query, &primary, &secondary, config).await
}

/// Search with sensible default configuration.
///
/// Convenience wrapper around [`search`] using [`SearchConfig::default()`].
///
/// # Errors
///
/// Same as [`search`].
pub async fn search_default(query: &str) -> Result<Vec<BookSummary>> {
    search(query, &SearchConfig::default()).await
}
