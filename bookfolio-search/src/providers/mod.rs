//! Book metadata provider implementations.
//!
//! Each module provides a struct implementing [`crate::provider::BookProvider`]
//! plus the raw wire schema of that provider and its mapping to
//! [`crate::types::BookSummary`].

pub mod google;
pub mod openlibrary;

pub use google::GoogleBooksProvider;
pub use openlibrary::OpenLibraryProvider;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use url::Url;

use crate::error::SearchError;

/// Build `{base}{path}?{params}` with form-style query encoding.
pub(crate) fn endpoint(base: &str, path: &str, params: &[(&str, &str)]) -> Result<Url, SearchError> {
    let raw = format!("{}{path}", base.trim_end_matches('/'));
    Url::parse_with_params(&raw, params)
        .map_err(|e| SearchError::Config(format!("invalid provider base URL {base:?}: {e}")))
}

/// Decode each raw record independently, skipping values that are not
/// records at all (e.g. a bare string). Fields inside a record are read
/// with [`lenient`] and [`lenient_count`], so a wrong-typed field only
/// loses that field.
pub(crate) fn decode_records<T: DeserializeOwned>(raw: Vec<serde_json::Value>, label: &str) -> Vec<T> {
    let total = raw.len();
    let decoded: Vec<T> = raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!(provider = label, error = %e, "skipping malformed record");
                None
            }
        })
        .collect();
    if decoded.len() < total {
        tracing::debug!(
            provider = label,
            skipped = total - decoded.len(),
            "malformed records skipped"
        );
    }
    decoded
}

/// Field deserializer that yields `None` instead of failing when the value
/// has the wrong JSON type. Use with `#[serde(default)]`.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like [`lenient`] for non-negative counts, also accepting whole floats
/// such as `12.0`.
pub(crate) fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if let Some(n) = value.as_u64() {
        return Ok(u32::try_from(n).ok());
    }
    Ok(value
        .as_f64()
        .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= f64::from(u32::MAX))
        .map(|f| f as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Rec {
        #[serde(default, deserialize_with = "lenient_count")]
        n: Option<u32>,
        #[serde(default, deserialize_with = "lenient")]
        name: Option<String>,
    }

    #[test]
    fn endpoint_encodes_query() {
        let url = endpoint("https://example.com/", "/search.json", &[("q", "dune messiah")])
            .expect("valid");
        assert_eq!(url.as_str(), "https://example.com/search.json?q=dune+messiah");
    }

    #[test]
    fn endpoint_rejects_bad_base() {
        let err = endpoint("not a url", "/x", &[]).unwrap_err();
        assert!(err.to_string().contains("base URL"));
    }

    #[test]
    fn decode_records_skips_non_records() {
        let raw = vec![json!({"n": 1}), json!("not a record"), json!({})];
        let recs: Vec<Rec> = decode_records(raw, "test");
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].n, Some(1));
        assert_eq!(recs[1].n, None);
    }

    #[test]
    fn wrong_typed_field_keeps_record() {
        let raw = vec![json!({"n": "one", "name": "kept"}), json!({"n": 2, "name": 7})];
        let recs: Vec<Rec> = decode_records(raw, "test");
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].n, None);
        assert_eq!(recs[0].name.as_deref(), Some("kept"));
        assert_eq!(recs[1].n, Some(2));
        assert_eq!(recs[1].name, None);
    }

    #[test]
    fn count_accepts_whole_floats_only() {
        let recs: Vec<Rec> = decode_records(
            vec![
                json!({"n": 12.0}),
                json!({"n": 12.5}),
                json!({"n": -3}),
                json!({"n": null}),
            ],
            "test",
        );
        let counts: Vec<Option<u32>> = recs.iter().map(|r| r.n).collect();
        assert_eq!(counts, [Some(12), None, None, None]);
    }
}
