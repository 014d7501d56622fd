//! Error types for the bookfolio service.

use bookfolio_search::SearchError;

/// Top-level error type for the book search service.
#[derive(Debug, thiserror::Error)]
pub enum BookfolioError {
    /// Book search failed.
    #[error("search error: {0}")]
    Search(#[from] SearchError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// HTTP server error (bind, address lookup).
    #[error("server error: {0}")]
    Server(String),

    /// A profile update broke the profile rules.
    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, BookfolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_error_converts() {
        let err: BookfolioError = SearchError::Config("bad".into()).into();
        assert_eq!(err.to_string(), "search error: config error: bad");
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: BookfolioError = io.into();
        assert!(err.to_string().starts_with("I/O error"));
    }
}
