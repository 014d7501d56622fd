//! OpenLibrary provider: the secondary source used to top up thin results.
//!
//! Uses the `search.json` endpoint sorted by edition count. OpenLibrary
//! never supplies descriptions, ratings or publishers for search docs.

use serde::Deserialize;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::normalize::{first_or_empty, join_authors, openlibrary_cover_url, title_or_default};
use crate::provider::BookProvider;
use crate::types::{BookSource, BookSummary};

use super::{decode_records, endpoint, lenient, lenient_count};

const LABEL: &str = "OpenLibrary";

/// Top-level response of `GET /search.json`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub docs: Option<Vec<serde_json::Value>>,
}

/// One search document (a work, with edition-derived fields). A field of
/// the wrong type reads as absent.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Doc {
    #[serde(default, deserialize_with = "lenient")]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub author_name: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub cover_i: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub subject: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub isbn: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub first_publish_year: Option<i32>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub number_of_pages_median: Option<u32>,
}

/// OpenLibrary search API client.
#[derive(Debug, Clone)]
pub struct OpenLibraryProvider {
    client: reqwest::Client,
}

impl OpenLibraryProvider {
    /// Create a provider with a client built from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        Ok(Self {
            client: http::build_client(config)?,
        })
    }

    /// Create a provider around an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl BookProvider for OpenLibraryProvider {
    async fn search(
        &self,
        query: &str,
        config: &SearchConfig,
    ) -> Result<Vec<BookSummary>, SearchError> {
        tracing::trace!(query, "OpenLibrary search");

        let url = search_url(query, config)?;
        let response: SearchResponse = http::get_json(&self.client, url, LABEL).await?;
        let books = parse_docs(response);

        tracing::debug!(count = books.len(), "OpenLibrary results normalised");
        Ok(books)
    }

    fn source(&self) -> BookSource {
        BookSource::OpenLibrary
    }
}

pub(crate) fn search_url(query: &str, config: &SearchConfig) -> Result<url::Url, SearchError> {
    let limit = config.provider_max_results.to_string();
    endpoint(
        &config.openlibrary_base_url,
        "/search.json",
        &[("q", query), ("limit", limit.as_str()), ("sort", "editions")],
    )
}

/// Decode and normalise every doc of a search response.
pub fn parse_docs(response: SearchResponse) -> Vec<BookSummary> {
    let docs = response.docs.unwrap_or_default();
    decode_records::<Doc>(docs, LABEL)
        .into_iter()
        .map(normalize_doc)
        .collect()
}

/// Map one OpenLibrary doc to a [`BookSummary`].
pub fn normalize_doc(doc: Doc) -> BookSummary {
    let cover = openlibrary_cover_url(doc.cover_i);

    BookSummary {
        id: doc.key.unwrap_or_default(),
        title: title_or_default(doc.title.as_deref()),
        author: join_authors(doc.author_name.as_deref()),
        cover_large: cover.clone(),
        cover,
        genre: first_or_empty(doc.subject.as_deref()),
        description: String::new(),
        isbn: first_or_empty(doc.isbn.as_deref()),
        published_date: doc
            .first_publish_year
            .map(|year| year.to_string())
            .unwrap_or_default(),
        page_count: doc.number_of_pages_median.unwrap_or(0),
        source: BookSource::OpenLibrary,
        ratings_count: None,
        average_rating: None,
        publisher: None,
    }
}
