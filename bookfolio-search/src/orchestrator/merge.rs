//! Merging of the primary and secondary ranked lists.
//!
//! Primary records always come first and are never dropped. A secondary
//! record is appended only if no record already in the merged list has the
//! same title and author, compared case-insensitively.

use std::collections::HashSet;

use crate::types::BookSummary;

/// Merge two ranked lists, primary first, suppressing near-duplicates.
///
/// Both inputs keep their own order. Duplicates inside the secondary list
/// are suppressed as well, since each appended record joins the set that
/// later secondary records are checked against.
pub fn merge(primary: Vec<BookSummary>, secondary: Vec<BookSummary>) -> Vec<BookSummary> {
    let mut seen: HashSet<(String, String)> = primary.iter().map(dedup_key).collect();
    let secondary_total = secondary.len();
    let primary_len = primary.len();

    let mut merged = primary;
    merged.reserve(secondary_total);
    for book in secondary {
        if seen.insert(dedup_key(&book)) {
            merged.push(book);
        }
    }

    tracing::debug!(
        merged = merged.len(),
        suppressed = secondary_total - (merged.len() - primary_len),
        "secondary results merged"
    );
    merged
}

/// The identity two records must share to count as the same book.
pub fn dedup_key(book: &BookSummary) -> (String, String) {
    (book.title.to_lowercase(), book.author.to_lowercase())
}
