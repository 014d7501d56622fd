//! Tiered relevance ranking for normalised book records.
//!
//! Ranking is an ordered list of tier comparators combined by
//! [`first_difference`]: the first tier that tells two records apart decides
//! their order. The sort is stable, so records every tier considers equal
//! keep the order the provider returned them in.
//!
//! Tiers, in order:
//!
//! 1. [`by_cover`]: records with a usable cover URL first
//! 2. [`by_exact_title`]: title equal to the query (case-insensitive)
//! 3. [`by_title_prefix`]: title starting with the query
//! 4. [`by_publisher`]: publisher matches a major imprint
//! 5. [`by_popularity`]: `ratings_count × average_rating`, descending

use std::cmp::Ordering;

use url::Url;

use crate::types::BookSummary;

/// Shortest string that can still be a real `scheme://host/...` cover URL.
pub const MIN_COVER_URL_LEN: usize = 12;

/// Lower-case name fragments of major publishers and imprints.
pub const POPULAR_PUBLISHERS: &[&str] = &[
    "penguin",
    "random house",
    "harpercollins",
    "simon & schuster",
    "macmillan",
    "hachette",
    "scholastic",
    "oxford",
    "cambridge",
    "vintage",
    "fingerprint",
    "bloomsbury",
    "faber",
    "picador",
    "little, brown",
];

/// Per-search inputs shared by every tier.
#[derive(Debug, Clone)]
pub struct RankContext {
    query: String,
}

impl RankContext {
    /// Build a context for `query`. Matching is case-insensitive and ignores
    /// surrounding whitespace.
    pub fn new(query: &str) -> Self {
        Self {
            query: query.trim().to_lowercase(),
        }
    }

    /// The lower-cased, trimmed query.
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// A single relevance tier. `Less` means `a` ranks before `b`.
pub type Tier = fn(&BookSummary, &BookSummary, &RankContext) -> Ordering;

/// The ranking tiers, most significant first.
pub const TIERS: [Tier; 5] = [
    by_cover,
    by_exact_title,
    by_title_prefix,
    by_publisher,
    by_popularity,
];

/// Sort `books` by relevance to `query`. Stable for ties.
pub fn rank(mut books: Vec<BookSummary>, query: &str) -> Vec<BookSummary> {
    let ctx = RankContext::new(query);
    books.sort_by(|a, b| compare(a, b, &ctx));
    books
}

/// Compare two records using every tier in [`TIERS`].
pub fn compare(a: &BookSummary, b: &BookSummary, ctx: &RankContext) -> Ordering {
    first_difference(&TIERS, a, b, ctx)
}

/// Returns the first non-`Equal` result of `tiers`, or `Equal`.
pub fn first_difference(
    tiers: &[Tier],
    a: &BookSummary,
    b: &BookSummary,
    ctx: &RankContext,
) -> Ordering {
    tiers
        .iter()
        .map(|tier| tier(a, b, ctx))
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Tier 1: a record with a usable cover beats one without.
pub fn by_cover(a: &BookSummary, b: &BookSummary, _ctx: &RankContext) -> Ordering {
    prefer(has_usable_cover(a), has_usable_cover(b))
}

/// Tier 2: a title equal to the query beats one that is not.
pub fn by_exact_title(a: &BookSummary, b: &BookSummary, ctx: &RankContext) -> Ordering {
    let exact = |book: &BookSummary| book.title.to_lowercase() == ctx.query;
    prefer(exact(a), exact(b))
}

/// Tier 3: a title starting with the query beats one that does not.
pub fn by_title_prefix(a: &BookSummary, b: &BookSummary, ctx: &RankContext) -> Ordering {
    let prefix = |book: &BookSummary| book.title.to_lowercase().starts_with(&ctx.query);
    prefer(prefix(a), prefix(b))
}

/// Tier 4: a major publisher beats any other publisher.
pub fn by_publisher(a: &BookSummary, b: &BookSummary, _ctx: &RankContext) -> Ordering {
    prefer(has_popular_publisher(a), has_popular_publisher(b))
}

/// Tier 5: higher `ratings_count × average_rating` first.
pub fn by_popularity(a: &BookSummary, b: &BookSummary, _ctx: &RankContext) -> Ordering {
    b.popularity()
        .partial_cmp(&a.popularity())
        .unwrap_or(Ordering::Equal)
}

/// Whether the cover looks like a real absolute image URL rather than a stub.
pub fn has_usable_cover(book: &BookSummary) -> bool {
    let cover = book.cover.trim();
    if cover.len() < MIN_COVER_URL_LEN {
        return false;
    }
    Url::parse(cover).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
    })
}

/// Whether the publisher contains one of [`POPULAR_PUBLISHERS`].
pub fn has_popular_publisher(book: &BookSummary) -> bool {
    let Some(publisher) = book.publisher.as_deref() else {
        return false;
    };
    let publisher = publisher.to_lowercase();
    POPULAR_PUBLISHERS
        .iter()
        .any(|fragment| publisher.contains(fragment))
}

/// `true` sorts before `false`.
fn prefer(a: bool, b: bool) -> Ordering {
    b.cmp(&a)
}
