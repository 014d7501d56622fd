//! Shared normalisation helpers used by the provider mappings.
//!
//! Absence is always expressed as an empty string or zero, and the two
//! sentinels below stand in for a missing title or author.

use url::Url;

/// Substituted when a provider record has no usable title.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Substituted when a provider record has no usable author.
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

const OPENLIBRARY_COVERS_BASE: &str = "https://covers.openlibrary.org";

/// Returns the trimmed title, or [`UNKNOWN_TITLE`] when missing or blank.
pub fn title_or_default(title: Option<&str>) -> String {
    non_blank(title).unwrap_or(UNKNOWN_TITLE).to_owned()
}

/// Joins contributor names with `", "`, skipping blank names.
///
/// Returns [`UNKNOWN_AUTHOR`] when nothing usable remains.
pub fn join_authors(authors: Option<&[String]>) -> String {
    let joined = authors
        .unwrap_or_default()
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .collect::<Vec<_>>()
        .join(", ");
    if joined.is_empty() {
        UNKNOWN_AUTHOR.to_owned()
    } else {
        joined
    }
}

/// First non-blank entry of a list, or empty.
pub fn first_or_empty(values: Option<&[String]>) -> String {
    values
        .unwrap_or_default()
        .iter()
        .find_map(|v| non_blank(Some(v.as_str())))
        .unwrap_or_default()
        .to_owned()
}

/// Trimmed string, or empty when missing.
pub fn text_or_empty(value: Option<&str>) -> String {
    non_blank(value).unwrap_or_default().to_owned()
}

/// Rewrite a Google Books cover URL to request a sharper, undecorated image.
///
/// - `http` becomes `https`
/// - `zoom=1` becomes `zoom=2`
/// - `edge=curl` (the page-fold decoration) is removed
///
/// Other query parameters keep their order. Anything that is not an
/// absolute http(s) URL with a host yields an empty string.
pub fn upgrade_google_cover(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    let Ok(mut parsed) = Url::parse(raw) else {
        return String::new();
    };
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none_or(str::is_empty)
    {
        return String::new();
    }

    if parsed.scheme() == "http" {
        let _ = parsed.set_scheme("https");
    }

    if parsed.query().is_some() {
        let pairs: Vec<(String, String)> = parsed
            .query_pairs()
            .filter(|(k, v)| !(k == "edge" && v == "curl"))
            .map(|(k, v)| {
                let v = if k == "zoom" && v == "1" {
                    "2".to_owned()
                } else {
                    v.into_owned()
                };
                (k.into_owned(), v)
            })
            .collect();

        if pairs.is_empty() {
            parsed.set_query(None);
        } else {
            parsed.query_pairs_mut().clear().extend_pairs(pairs);
        }
    }

    parsed.into()
}

/// Large cover URL for an OpenLibrary cover id, or empty for missing ids.
pub fn openlibrary_cover_url(cover_id: Option<i64>) -> String {
    match cover_id {
        Some(id) if id > 0 => format!("{OPENLIBRARY_COVERS_BASE}/b/id/{id}-L.jpg"),
        _ => String::new(),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
