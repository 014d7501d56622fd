//! Shared HTTP client construction for provider requests.
//!
//! Provides a [`reqwest::Client`] with the configured timeout and
//! User-Agent. Built once per provider and reused across searches.

use crate::config::SearchConfig;
use crate::error::SearchError;
use std::time::Duration;

/// Build a [`reqwest::Client`] configured for provider API calls.
///
/// The client has:
/// - Timeout from config
/// - User-Agent from config
/// - gzip decompression
/// - A bounded redirect policy
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// Send a GET request and decode a JSON body.
///
/// Non-2xx statuses and transport failures become [`SearchError::Http`];
/// a body that does not match `T` becomes [`SearchError::Parse`].
/// `label` names the provider in messages. Query strings are never included
/// in messages, so API keys cannot leak.
pub(crate) async fn get_json<T>(
    client: &reqwest::Client,
    url: url::Url,
    label: &str,
) -> Result<T, SearchError>
where
    T: serde::de::DeserializeOwned,
{
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| SearchError::Http(format!("{label} request failed: {}", e.without_url())))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SearchError::Http(format!("{label} returned status {status}")));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| SearchError::Http(format!("{label} response read failed: {}", e.without_url())))?;

    tracing::trace!(bytes = body.len(), provider = label, "response received");

    serde_json::from_slice(&body)
        .map_err(|e| SearchError::Parse(format!("{label} response is not valid JSON: {e}")))
}
