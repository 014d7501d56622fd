//! Search orchestrator: primary query, conditional fallback, ranking, merge.
//!
//! This module queries Google Books, tops up thin result sets from
//! OpenLibrary, ranks each provider's list independently, and merges them
//! with primary records first and near-duplicates suppressed.

pub mod merge;
pub mod ranking;
pub mod search;
