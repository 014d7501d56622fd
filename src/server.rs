//! HTTP search endpoint.
//!
//! ## Endpoints
//!
//! - `GET /search?q=<query>` ranked book search
//! - `GET /api/books/search?q=<query>` alias used by the web front end
//! - `GET /health` liveness and version

use axum::Router;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use bookfolio_search::{BookSearch, BookSummary, SearchError};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::ServerSection;
use crate::error::{BookfolioError, Result};

/// Body returned when `q` is missing or blank.
pub const MISSING_QUERY_MESSAGE: &str = "Query parameter is required";

/// Body returned when the search itself fails.
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search books";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Query string of the search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchParams {
    /// Free-text search query.
    pub q: Option<String>,
}

impl SearchParams {
    /// Pick parameters out of raw query pairs. A repeated `q` keeps its
    /// first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            q: pairs
                .into_iter()
                .find_map(|(key, value)| (key == "q").then_some(value)),
        }
    }
}

/// JSON error body: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
    /// Crate version of the running server.
    pub version: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

// ---------------------------------------------------------------------------
// Shared application state
// ---------------------------------------------------------------------------

/// Shared state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Search service with its provider clients, built once at startup.
    search: Arc<BookSearch>,
}

impl AppState {
    /// Wrap a search service for sharing across handlers.
    pub fn new(search: BookSearch) -> Self {
        Self {
            search: Arc::new(search),
        }
    }
}

/// Build the router with every endpoint mounted.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/search", get(handle_search))
        .route("/api/books/search", get(handle_search))
        .route("/health", get(handle_health))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// SearchServer
// ---------------------------------------------------------------------------

/// Book search HTTP server running in a background task.
pub struct SearchServer {
    /// The address the server is listening on.
    addr: SocketAddr,
    /// Handle to the background server task.
    handle: JoinHandle<()>,
}

impl SearchServer {
    /// Start the search server.
    ///
    /// Binds to `{config.host}:{config.port}` (use port `0` for auto-assign)
    /// and begins serving in a background tokio task.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP listener cannot bind.
    pub async fn start(search: BookSearch, config: &ServerSection) -> Result<Self> {
        let app = router(AppState::new(search));

        let bind_addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| BookfolioError::Server(format!("bind to {bind_addr} failed: {e}")))?;
        let addr = listener
            .local_addr()
            .map_err(|e| BookfolioError::Server(format!("failed to get local addr: {e}")))?;

        info!("search server listening on http://{addr}");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("search server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Returns the address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for SearchServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// `GET /search`: ranked book search.
async fn handle_search(
    State(state): State<AppState>,
    pairs: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> std::result::Result<Json<Vec<BookSummary>>, ApiError> {
    let Query(pairs) = pairs
        .map_err(|rejection| error_response(StatusCode::BAD_REQUEST, &rejection.body_text()))?;
    let params = SearchParams::from_pairs(pairs);

    let Some(query) = params.q.filter(|q| !q.trim().is_empty()) else {
        return Err(error_response(StatusCode::BAD_REQUEST, MISSING_QUERY_MESSAGE));
    };

    match state.search.search(&query).await {
        Ok(books) => Ok(Json(books)),
        Err(err) => Err(search_error_response(&err)),
    }
}

/// `GET /health`: liveness probe.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    })
}

/// Map a search failure to a status and body. Provider details stay in the log.
fn search_error_response(err: &SearchError) -> ApiError {
    match err {
        SearchError::InvalidQuery(message) => error_response(StatusCode::BAD_REQUEST, message),
        SearchError::ProviderUnavailable { .. } => {
            tracing::error!(error = %err, "book search failed");
            error_response(StatusCode::BAD_GATEWAY, SEARCH_FAILED_MESSAGE)
        }
        _ => {
            tracing::error!(error = %err, "book search failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, SEARCH_FAILED_MESSAGE)
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.to_owned(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookfolio_search::BookSource;

    #[test]
    fn invalid_query_is_bad_request_with_message() {
        let (status, Json(body)) = search_error_response(&SearchError::InvalidQuery(
            "query must be at most 200 characters, got 201".into(),
        ));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.contains("at most 200"));
    }

    #[test]
    fn provider_unavailable_is_bad_gateway() {
        let (status, Json(body)) = search_error_response(&SearchError::ProviderUnavailable {
            provider: BookSource::Google,
            reason: "HTTP error: Google Books returned status 503".into(),
        });
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.error, SEARCH_FAILED_MESSAGE);
    }

    #[test]
    fn other_errors_are_internal() {
        let (status, Json(body)) = search_error_response(&SearchError::Config("bad".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, SEARCH_FAILED_MESSAGE);
    }

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn repeated_q_keeps_first_value() {
        let params = SearchParams::from_pairs(pairs(&[("q", "dune"), ("q", "emma")]));
        assert_eq!(params.q.as_deref(), Some("dune"));
    }

    #[test]
    fn other_parameters_ignored() {
        let params = SearchParams::from_pairs(pairs(&[("page", "2"), ("q", "dune")]));
        assert_eq!(params.q.as_deref(), Some("dune"));
        assert_eq!(SearchParams::from_pairs(pairs(&[("page", "2")])), SearchParams::default());
    }

    #[test]
    fn error_body_serializes_as_error_field() {
        let json = serde_json::to_value(ErrorResponse {
            error: MISSING_QUERY_MESSAGE.into(),
        })
        .unwrap_or_default();
        assert_eq!(json, serde_json::json!({"error": "Query parameter is required"}));
    }

    #[tokio::test]
    async fn health_reports_version() {
        let Json(health) = handle_health().await;
        assert_eq!(health.status, "ok");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    }
}
