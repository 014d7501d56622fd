//! Google Books provider: the primary source, always queried first.
//!
//! Calls the public volumes endpoint and maps each volume to a
//! [`BookSummary`]. Google is the only provider that supplies
//! descriptions, ratings and publishers, which the ranker relies on.

use serde::Deserialize;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::normalize::{
    first_or_empty, join_authors, text_or_empty, title_or_default, upgrade_google_cover,
};
use crate::provider::BookProvider;
use crate::types::{BookSource, BookSummary};

use super::{decode_records, endpoint, lenient, lenient_count};

const LABEL: &str = "Google Books";

/// Top-level response of `GET /books/v1/volumes`.
#[derive(Debug, Default, Deserialize)]
pub struct VolumesResponse {
    /// Absent when the query matched nothing.
    #[serde(default)]
    pub items: Option<Vec<serde_json::Value>>,
}

/// One volume item.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub volume_info: Option<VolumeInfo>,
}

/// Bibliographic fields of a volume. Every field is optional on the wire,
/// and a field of the wrong type reads as absent.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub authors: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub publisher: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub image_links: Option<ImageLinks>,
    #[serde(default, deserialize_with = "lenient")]
    pub categories: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub industry_identifiers: Option<Vec<IndustryIdentifier>>,
    #[serde(default, deserialize_with = "lenient")]
    pub published_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub page_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub ratings_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub average_rating: Option<f64>,
}

/// Cover image URLs at the sizes Google may provide.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    #[serde(default, deserialize_with = "lenient")]
    pub small_thumbnail: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub medium: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub large: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub extra_large: Option<String>,
}

impl ImageLinks {
    /// The largest non-blank image URL, or `None`.
    pub fn largest(&self) -> Option<&str> {
        [
            &self.extra_large,
            &self.large,
            &self.medium,
            &self.thumbnail,
            &self.small_thumbnail,
        ]
        .into_iter()
        .filter_map(|link| link.as_deref())
        .map(str::trim)
        .find(|link| !link.is_empty())
    }
}

/// An ISBN or other identifier attached to a volume.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct IndustryIdentifier {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub identifier: String,
}

/// Google Books volumes API client.
///
/// Holds a reusable HTTP client; endpoint, API key and result count are read
/// from the [`SearchConfig`] on every call.
#[derive(Debug, Clone)]
pub struct GoogleBooksProvider {
    client: reqwest::Client,
}

impl GoogleBooksProvider {
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

impl BookProvider for GoogleBooksProvider {
    async fn search(
        &self,
        query: &str,
        config: &SearchConfig,
    ) -> Result<Vec<BookSummary>, SearchError> {
        tracing::trace!(query, "Google Books search");

        let url = volumes_url(query, config)?;
        let response: VolumesResponse = http::get_json(&self.client, url, LABEL).await?;
        let books = parse_volumes(response);

        tracing::debug!(count = books.len(), "Google Books results normalised");
        Ok(books)
    }

    fn source(&self) -> BookSource {
        BookSource::Google
    }
}

/// Build the volumes search URL, appending `key` only when configured.
pub(crate) fn volumes_url(query: &str, config: &SearchConfig) -> Result<url::Url, SearchError> {
    let max_results = config.provider_max_results.to_string();
    let mut params = vec![
        ("q", query),
        ("maxResults", max_results.as_str()),
        ("printType", "books"),
        ("orderBy", "relevance"),
    ];
    if let Some(key) = config.api_key() {
        params.push(("key", key));
    }
    endpoint(&config.google_base_url, "/books/v1/volumes", &params)
}

/// Decode and normalise every item of a volumes response.
pub fn parse_volumes(response: VolumesResponse) -> Vec<BookSummary> {
    let items = response.items.unwrap_or_default();
    decode_records::<Volume>(items, LABEL)
        .into_iter()
        .map(normalize_volume)
        .collect()
}

/// Map one Google Books volume to a [`BookSummary`].
pub fn normalize_volume(volume: Volume) -> BookSummary {
    let info = volume.volume_info.unwrap_or_default();

    let cover = info
        .image_links
        .as_ref()
        .and_then(ImageLinks::largest)
        .map(upgrade_google_cover)
        .unwrap_or_default();

    BookSummary {
        id: volume.id.unwrap_or_default(),
        title: title_or_default(info.title.as_deref()),
        author: join_authors(info.authors.as_deref()),
        cover_large: cover.clone(),
        cover,
        genre: first_or_empty(info.categories.as_deref()),
        description: text_or_empty(info.description.as_deref()),
        isbn: preferred_isbn(info.industry_identifiers.as_deref()),
        published_date: text_or_empty(info.published_date.as_deref()),
        page_count: info.page_count.unwrap_or(0),
        source: BookSource::Google,
        ratings_count: Some(info.ratings_count.unwrap_or(0)),
        average_rating: Some(info.average_rating.unwrap_or(0.0)),
        publisher: Some(text_or_empty(info.publisher.as_deref())),
    }
}

/// ISBN-13 if present, else ISBN-10, else empty.
fn preferred_isbn(identifiers: Option<&[IndustryIdentifier]>) -> String {
    let identifiers = identifiers.unwrap_or_default();
    let find = |kind: &str| {
        identifiers
            .iter()
            .filter(|id| id.kind == kind)
            .map(|id| id.identifier.trim())
            .find(|id| !id.is_empty())
    };
    find("ISBN_13")
        .or_else(|| find("ISBN_10"))
        .unwrap_or_default()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{UNKNOWN_AUTHOR, UNKNOWN_TITLE};
    use serde_json::json;

    fn volume(value: serde_json::Value) -> Volume {
        serde_json::from_value(value).expect("valid volume")
    }

    #[test]
    fn full_volume_maps_every_field() {
        let book = normalize_volume(volume(json!({
            "id": "vol-1",
            "volumeInfo": {
                "title": "Dune",
                "authors": ["Frank Herbert"],
                "publisher": "Penguin Books",
                "imageLinks": {
                    "smallThumbnail": "http://books.google.com/small?id=1&zoom=5",
                    "thumbnail": "http://books.google.com/books/content?id=1&printsec=frontcover&img=1&zoom=1&edge=curl&source=gbs_api"
                },
                "categories": ["Fiction", "Science Fiction"],
                "description": "Desert planet.",
                "industryIdentifiers": [
                    {"type": "ISBN_10", "identifier": "0441013597"},
                    {"type": "ISBN_13", "identifier": "9780441013593"}
                ],
                "publishedDate": "2005-08-02",
                "pageCount": 528,
                "ratingsCount": 1200,
                "averageRating": 4.5
            }
        })));

        assert_eq!(book.id, "vol-1");
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(
            book.cover,
            "https://books.google.com/books/content?id=1&printsec=frontcover&img=1&zoom=2&source=gbs_api"
        );
        assert_eq!(book.cover_large, book.cover);
        assert_eq!(book.genre, "Fiction");
        assert_eq!(book.description, "Desert planet.");
        assert_eq!(book.isbn, "9780441013593");
        assert_eq!(book.published_date, "2005-08-02");
        assert_eq!(book.page_count, 528);
        assert_eq!(book.source, BookSource::Google);
        assert_eq!(book.ratings_count, Some(1200));
        assert_eq!(book.average_rating, Some(4.5));
        assert_eq!(book.publisher.as_deref(), Some("Penguin Books"));
    }

    #[test]
    fn empty_volume_uses_sentinels_and_zeroes() {
        let book = normalize_volume(volume(json!({"id": "bare"})));
        assert_eq!(book.title, UNKNOWN_TITLE);
        assert_eq!(book.author, UNKNOWN_AUTHOR);
        assert_eq!(book.cover, "");
        assert_eq!(book.cover_large, "");
        assert_eq!(book.isbn, "");
        assert_eq!(book.page_count, 0);
        assert_eq!(book.ratings_count, Some(0));
        assert_eq!(book.average_rating, Some(0.0));
        assert_eq!(book.publisher.as_deref(), Some(""));
    }

    #[test]
    fn largest_image_preferred() {
        let links = ImageLinks {
            small_thumbnail: Some("s".into()),
            thumbnail: Some("t".into()),
            medium: None,
            large: Some("  ".into()),
            extra_large: None,
        };
        assert_eq!(links.largest(), Some("t"));

        let links = ImageLinks {
            extra_large: Some("xl".into()),
            ..links
        };
        assert_eq!(links.largest(), Some("xl"));
        assert_eq!(ImageLinks::default().largest(), None);
    }

    #[test]
    fn isbn_10_used_when_no_isbn_13() {
        let ids = vec![
            IndustryIdentifier {
                kind: "OTHER".into(),
                identifier: "UOM:39015".into(),
            },
            IndustryIdentifier {
                kind: "ISBN_10".into(),
                identifier: "0451524934".into(),
            },
        ];
        assert_eq!(preferred_isbn(Some(ids.as_slice())), "0451524934");
        assert_eq!(preferred_isbn(None), "");
    }

    #[test]
    fn missing_items_means_no_results() {
        let response: VolumesResponse =
            serde_json::from_value(json!({"kind": "books#volumes", "totalItems": 0}))
                .expect("valid");
        assert!(parse_volumes(response).is_empty());
    }

    #[test]
    fn wrong_typed_fields_fall_back_to_defaults() {
        let response: VolumesResponse = serde_json::from_value(json!({
            "items": [
                {"id": "dune", "volumeInfo": {"title": "Dune", "ratingsCount": 12.0}},
                {"id": "emma", "volumeInfo": {"title": "Emma", "pageCount": "many", "authors": "Jane Austen"}},
                {"id": 7, "volumeInfo": "oops"}
            ]
        }))
        .expect("valid");
        let books = parse_volumes(response);
        assert_eq!(books.len(), 3);

        assert_eq!(books[0].title, "Dune");
        assert_eq!(books[0].ratings_count, Some(12));

        assert_eq!(books[1].title, "Emma");
        assert_eq!(books[1].page_count, 0);
        assert_eq!(books[1].author, UNKNOWN_AUTHOR);

        assert_eq!(books[2].id, "");
        assert_eq!(books[2].title, UNKNOWN_TITLE);
    }

    #[test]
    fn non_object_item_skipped() {
        let response: VolumesResponse = serde_json::from_value(json!({
            "items": [{"id": "ok", "volumeInfo": {"title": "1984"}}, "junk"]
        }))
        .expect("valid");
        let books = parse_volumes(response);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, "ok");
    }

    #[test]
    fn bad_image_link_keeps_other_sizes() {
        let book = normalize_volume(volume(json!({
            "id": "v",
            "volumeInfo": {"imageLinks": {"large": 5, "thumbnail": "https://books.google.com/t.jpg"}}
        })));
        assert_eq!(book.cover, "https://books.google.com/t.jpg");
    }

    #[test]
    fn volumes_url_without_key() {
        let url = volumes_url("george orwell", &SearchConfig::default()).expect("url");
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/books/v1/volumes?q=george+orwell&maxResults=40&printType=books&orderBy=relevance"
        );
    }

    #[test]
    fn volumes_url_appends_key_when_configured() {
        let config = SearchConfig {
            google_api_key: Some("k-123".into()),
            ..Default::default()
        };
        let url = volumes_url("dune", &config).expect("url");
        assert!(url.as_str().ends_with("&key=k-123"));
    }

    #[test]
    fn source_is_google() {
        let provider = GoogleBooksProvider::with_client(reqwest::Client::new());
        assert_eq!(provider.source(), BookSource::Google);
    }
}
