//! Bookfolio: book search service aggregating Google Books and OpenLibrary.
//!
//! The search pipeline lives in the `bookfolio-search` crate. This crate
//! adds the HTTP endpoint, server configuration and profile helpers.

pub mod config;
pub mod error;
pub mod profile;
pub mod server;

pub use config::{ServerConfig, ServerSection};
pub use error::{BookfolioError, Result};
pub use profile::{SocialLink, migrate_social_links, sanitize_social_links};
pub use server::{AppState, SearchServer, router};
