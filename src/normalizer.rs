//! The feed normalizer.
//!
//! Given a feed source and an item cap, [`Normalizer::normalize`] fetches the
//! document, parses it, and builds a [`FeedSummary`] holding at most that many
//! items in the order the feed lists them.  A source that yields nothing (an
//! empty URL, an empty feed, a cap of zero) produces `Ok(None)` rather than
//! an error.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::FeedOptions;
use crate::error::Result;
use crate::source::{parse_feed, Fetch, FeedItem};

/// Default number of items kept per feed.
pub const DEFAULT_COUNT: usize = 5;

/// A host record, e.g. one database row decoded from JSON.
pub type Row = Map<String, Value>;

/// Normalized view of a feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSummary {
    pub title: String,
    pub description: String,
    /// Always the source the summary was requested for, not whatever link
    /// the feed advertises.
    pub link: String,
    /// Never empty; an empty feed has no summary at all.
    pub items: Vec<FeedItem>,
}

/// Fetches and normalizes feeds through a [`Fetch`] implementation.
///
/// Holds no mutable state, so a single normalizer can serve any number of
/// threads.
pub struct Normalizer<F> {
    fetcher: F,
}

impl<F: Fetch> Normalizer<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Fetch `source` and keep at most `max_count` of its entries.
    ///
    /// Returns `Ok(None)` without touching the network when `source` is
    /// empty or `max_count` is zero.  Any other string, whitespace included,
    /// is handed to the fetcher.
    pub fn normalize(&self, source: &str, max_count: usize) -> Result<Option<FeedSummary>> {
        if source.is_empty() || max_count == 0 {
            return Ok(None);
        }

        let bytes = self.fetcher.fetch(source)?;
        let feed = parse_feed(&bytes)?;

        let items: Vec<FeedItem> = feed.entries.into_iter().take(max_count).collect();
        debug!(source, items = items.len(), "normalized feed");

        if items.is_empty() {
            return Ok(None);
        }

        Ok(Some(FeedSummary {
            title: feed.title,
            description: feed.description,
            link: source.to_string(),
            items,
        }))
    }

    /// Normalize the feed named by `row[options.field]`.
    ///
    /// A missing, null, non-string or empty field yields `Ok(None)`.
    pub fn get_feed(&self, row: &Row, options: &FeedOptions) -> Result<Option<FeedSummary>> {
        match source_of(row, &options.field) {
            Some(source) => self.normalize(source, options.count),
            None => Ok(None),
        }
    }
}

/// The non-empty string stored under `field`, if any.
pub fn source_of<'a>(row: &'a Row, field: &str) -> Option<&'a str> {
    row.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
