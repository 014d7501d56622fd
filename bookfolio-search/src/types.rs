//! Core types for normalised book records and provider identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A provider-agnostic book record produced by normalisation.
///
/// Serialised with camelCase keys, which is the shape the web front end
/// consumes. Only exists for the lifetime of a search response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    /// Provider-scoped opaque identifier.
    pub id: String,
    /// Display title. Never empty.
    pub title: String,
    /// Comma-joined contributor names. Never empty.
    pub author: String,
    /// Absolute cover URL, or empty.
    pub cover: String,
    /// Absolute large cover URL, or empty.
    pub cover_large: String,
    /// First category or subject, or empty.
    pub genre: String,
    /// Free text, empty when the provider has none.
    pub description: String,
    /// ISBN-13 if known, else ISBN-10, else empty.
    pub isbn: String,
    /// Not a strict date; may be just a year.
    pub published_date: String,
    /// 0 if unknown.
    pub page_count: u32,
    /// Which provider produced this record.
    pub source: BookSource,
    /// Number of ratings. Google only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratings_count: Option<u32>,
    /// Mean rating. Google only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    /// Publisher name. Google only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}

impl BookSummary {
    /// `ratings_count × average_rating`, treating missing values as 0.
    pub fn popularity(&self) -> f64 {
        let count = f64::from(self.ratings_count.unwrap_or(0));
        count * self.average_rating.unwrap_or(0.0)
    }
}

/// The external book metadata providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookSource {
    /// Google Books: always queried first.
    Google,
    /// OpenLibrary: queried only to top up thin result sets.
    OpenLibrary,
}

impl BookSource {
    /// Returns the wire name of this provider.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::OpenLibrary => "openlibrary",
        }
    }
}

impl fmt::Display for BookSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BookSummary {
        BookSummary {
            id: "abc".into(),
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            cover: String::new(),
            cover_large: String::new(),
            genre: String::new(),
            description: String::new(),
            isbn: String::new(),
            published_date: "1965".into(),
            page_count: 0,
            source: BookSource::OpenLibrary,
            ratings_count: None,
            average_rating: None,
            publisher: None,
        }
    }

    #[test]
    fn serialises_with_camel_case_keys() {
        let mut book = sample();
        book.cover_large = "https://x/1.jpg".into();
        book.page_count = 412;
        let json = serde_json::to_value(&book).expect("serialize");
        assert_eq!(json["coverLarge"], "https://x/1.jpg");
        assert_eq!(json["publishedDate"], "1965");
        assert_eq!(json["pageCount"], 412);
        assert_eq!(json["source"], "openlibrary");
    }

    #[test]
    fn absent_google_fields_are_omitted() {
        let json = serde_json::to_value(sample()).expect("serialize");
        let obj = json.as_object().expect("object");
        assert!(!obj.contains_key("ratingsCount"));
        assert!(!obj.contains_key("averageRating"));
        assert!(!obj.contains_key("publisher"));
    }

    #[test]
    fn popularity_multiplies_count_and_rating() {
        let mut book = sample();
        book.ratings_count = Some(500);
        book.average_rating = Some(4.8);
        assert!((book.popularity() - 2400.0).abs() < 1e-9);
    }

    #[test]
    fn popularity_treats_missing_values_as_zero() {
        let mut book = sample();
        assert!(book.popularity().abs() < f64::EPSILON);
        book.ratings_count = Some(10);
        assert!(book.popularity().abs() < f64::EPSILON);
    }

    #[test]
    fn book_source_display() {
        assert_eq!(BookSource::Google.to_string(), "google");
        assert_eq!(BookSource::OpenLibrary.to_string(), "openlibrary");
    }

    #[test]
    fn book_source_serde_matches_name() {
        let json = serde_json::to_string(&BookSource::OpenLibrary).expect("serialize");
        assert_eq!(json, "\"openlibrary\"");
        let decoded: BookSource = serde_json::from_str("\"google\"").expect("deserialize");
        assert_eq!(decoded, BookSource::Google);
    }
}
