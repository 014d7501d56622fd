//! Profile social links: legacy-shape migration and update rules.
//!
//! Older profiles store `social_links` as a `platform → value` object;
//! current profiles store an array of [`SocialLink`]. Stored data is decoded
//! once here so the rest of the service only ever sees the array shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{BookfolioError, Result};

/// Most links a profile may carry.
pub const MAX_SOCIAL_LINKS: usize = 10;

/// Longest allowed platform name, in characters.
pub const MAX_PLATFORM_CHARS: usize = 50;

/// Longest allowed link value, in characters.
pub const MAX_VALUE_CHARS: usize = 200;

/// One social link on a user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub id: String,
    pub platform: String,
    pub value: String,
}

/// Decode stored `social_links` in either shape.
///
/// A legacy object becomes one link per non-empty entry, with a fresh id
/// and the key as platform. An array is decoded as-is, skipping elements
/// that are not links. Anything else yields no links.
pub fn migrate_social_links(raw: Value) -> Vec<SocialLink> {
    match raw {
        Value::Object(map) => {
            let links: Vec<SocialLink> = map
                .into_iter()
                .filter_map(|(platform, value)| match value {
                    Value::String(value) if !value.is_empty() => Some(SocialLink {
                        id: Uuid::new_v4().to_string(),
                        platform,
                        value,
                    }),
                    _ => None,
                })
                .collect();
            tracing::debug!(count = links.len(), "migrated legacy social links");
            links
        }
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(link) => Some(link),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping malformed social link");
                    None
                }
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Apply the profile-update rules to submitted links.
///
/// Values are trimmed and links left empty are dropped.
///
/// # Errors
///
/// Returns [`BookfolioError::InvalidProfile`] if more than
/// [`MAX_SOCIAL_LINKS`] links remain, or a platform or value is too long.
pub fn sanitize_social_links(links: Vec<SocialLink>) -> Result<Vec<SocialLink>> {
    let links: Vec<SocialLink> = links
        .into_iter()
        .filter_map(|link| {
            let value = link.value.trim();
            if value.is_empty() {
                return None;
            }
            Some(SocialLink {
                value: value.to_owned(),
                ..link
            })
        })
        .collect();

    if links.len() > MAX_SOCIAL_LINKS {
        return Err(BookfolioError::InvalidProfile(format!(
            "at most {MAX_SOCIAL_LINKS} social links allowed, got {}",
            links.len()
        )));
    }
    for link in &links {
        if link.platform.chars().count() > MAX_PLATFORM_CHARS {
            return Err(BookfolioError::InvalidProfile(format!(
                "social link platform must be at most {MAX_PLATFORM_CHARS} characters"
            )));
        }
        if link.value.chars().count() > MAX_VALUE_CHARS {
            return Err(BookfolioError::InvalidProfile(format!(
                "social link value must be at most {MAX_VALUE_CHARS} characters"
            )));
        }
    }
    Ok(links)
}
