//! The normalized entry type shared by every feed format.
//!
//! `FeedItem` represents a single entry from an RSS or Atom document.  Each
//! format module converts its native entry into a `FeedItem` so the
//! normalizer and the enrichment layer never need to know which format the
//! feed was written in.
//!
//! ## For contributors
//!
//! If you are adding support for another format you do **not** need to
//! modify this file unless the format carries data the summary should
//! expose.  Build `FeedItem` values in your format module's extraction
//! function.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single feed entry, normalized from any supported format.
///
/// Text fields are never optional: a missing element becomes the empty
/// string so that consumers of the serialized summary always see the same
/// keys.
///
/// `FeedItem` deliberately has no ordering.  Items keep the order the feed
/// itself lists them in.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    /// Entry headline.
    pub title: String,

    /// Summary or description text, passed through without HTML stripping.
    pub description: String,

    /// URL of the full content.
    pub link: String,

    /// URLs of the entry's media attachments, in document order.
    pub media_urls: Vec<String>,

    /// When the entry was last modified.
    ///
    /// For RSS this is `<pubDate>` (or `dc:date`), for Atom `<updated>`.
    /// `None` when the feed gives no parseable date.
    pub last_modified: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
