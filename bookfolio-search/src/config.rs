//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls the fallback threshold, result caps, timeouts,
//! and where the two providers live. It deserialises from the `[search]`
//! table of the server's TOML config; every field has a default.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Google Books refuses `maxResults` above this value.
pub const GOOGLE_MAX_RESULTS_LIMIT: usize = 40;

/// Default primary result count at which the secondary provider is skipped.
pub const DEFAULT_FALLBACK_THRESHOLD: usize = 10;

/// Default cap on the merged result list.
pub const DEFAULT_MAX_RESULTS: usize = 40;

/// Public Google Books API origin.
pub const DEFAULT_GOOGLE_BASE_URL: &str = "https://www.googleapis.com";

/// Public OpenLibrary origin.
pub const DEFAULT_OPENLIBRARY_BASE_URL: &str = "https://openlibrary.org";

/// Configuration for a book search.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// If the primary provider yields at least this many ranked records,
    /// the secondary provider is not consulted.
    pub fallback_threshold: usize,
    /// Maximum number of records returned after merging.
    pub max_results: usize,
    /// How many records to request from each provider.
    pub provider_max_results: usize,
    /// Longest accepted query, in characters.
    pub max_query_chars: usize,
    /// Per-provider HTTP request timeout in seconds.
    pub timeout_seconds: u64,
    /// Optional Google Books API key. Without it requests run in the
    /// unauthenticated, rate-limited mode.
    pub google_api_key: Option<String>,
    /// Origin of the Google Books API.
    pub google_base_url: String,
    /// Origin of the OpenLibrary API.
    pub openlibrary_base_url: String,
    /// User-Agent sent to both providers.
    pub user_agent: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fallback_threshold: DEFAULT_FALLBACK_THRESHOLD,
            max_results: DEFAULT_MAX_RESULTS,
            provider_max_results: GOOGLE_MAX_RESULTS_LIMIT,
            max_query_chars: 200,
            timeout_seconds: 10,
            google_api_key: None,
            google_base_url: DEFAULT_GOOGLE_BASE_URL.to_owned(),
            openlibrary_base_url: DEFAULT_OPENLIBRARY_BASE_URL.to_owned(),
            user_agent: format!("bookfolio/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `max_results` must be greater than 0
    /// - `provider_max_results` must be in `1..=40`
    /// - `max_query_chars` must be greater than 0
    /// - `timeout_seconds` must be greater than 0
    /// - both base URLs must be non-empty
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_results == 0 {
            return Err(SearchError::Config(
                "max_results must be greater than 0".into(),
            ));
        }
        if self.provider_max_results == 0 || self.provider_max_results > GOOGLE_MAX_RESULTS_LIMIT {
            return Err(SearchError::Config(format!(
                "provider_max_results must be between 1 and {GOOGLE_MAX_RESULTS_LIMIT}"
            )));
        }
        if self.max_query_chars == 0 {
            return Err(SearchError::Config(
                "max_query_chars must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.google_base_url.trim().is_empty() || self.openlibrary_base_url.trim().is_empty() {
            return Err(SearchError::Config(
                "provider base URLs must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Returns the API key if one is configured and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.google_api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = SearchConfig::default();
        assert_eq!(config.fallback_threshold, 10);
        assert_eq!(config.max_results, 40);
        assert_eq!(config.provider_max_results, 40);
        assert_eq!(config.max_query_chars, 200);
        assert_eq!(config.timeout_seconds, 10);
        assert!(config.google_api_key.is_none());
        assert!(config.user_agent.starts_with("bookfolio/"));
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_max_results_rejected() {
        let config = SearchConfig {
            max_results: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_results"));
    }

    #[test]
    fn provider_max_results_above_google_limit_rejected() {
        let config = SearchConfig {
            provider_max_results: 41,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("provider_max_results"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = SearchConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn zero_query_length_rejected() {
        let config = SearchConfig {
            max_query_chars: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_query_chars"));
    }

    #[test]
    fn blank_base_url_rejected() {
        let config = SearchConfig {
            openlibrary_base_url: "  ".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base URL"));
    }

    #[test]
    fn zero_fallback_threshold_is_valid() {
        // 0 means "never consult the secondary provider".
        let config = SearchConfig {
            fallback_threshold: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn blank_api_key_treated_as_absent() {
        let config = SearchConfig {
            google_api_key: Some("   ".into()),
            ..Default::default()
        };
        assert!(config.api_key().is_none());

        let config = SearchConfig {
            google_api_key: Some("k-123".into()),
            ..Default::default()
        };
        assert_eq!(config.api_key(), Some("k-123"));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"fallback_threshold": 8}"#).expect("deserialize");
        assert_eq!(config.fallback_threshold, 8);
        assert_eq!(config.max_results, 40);
        assert_eq!(config.google_base_url, DEFAULT_GOOGLE_BASE_URL);
    }
}
