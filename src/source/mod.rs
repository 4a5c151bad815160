//! Feed retrieval and format detection.
//!
//! This module defines the [`Fetch`] trait, which is the only place network
//! I/O happens, and [`parse_feed`], which turns raw bytes into a
//! format-agnostic [`ParsedFeed`].  Format-specific extraction lives in
//! sub-modules ([`rss`] and [`atom`]).
//!
//! ## For contributors: adding a new format
//!
//! 1. Create a new file in this directory (e.g. `json_feed.rs`).
//! 2. Write a pure function that converts the parsed document into a
//!    [`ParsedFeed`], building one [`FeedItem`] per entry in document order.
//! 3. Add `mod json_feed;` below and try it in [`parse_feed`] after the
//!    existing formats.
//!
//! The normalizer and the enrichment layer are format-agnostic and need no
//! changes.

mod atom;
mod feed_item;
mod http;
mod media;
mod rss;

pub use self::atom::parse_atom;
pub use self::rss::parse_channel;
pub use feed_item::FeedItem;
pub use http::HttpFetcher;

use crate::error::{FetchError, ParseError};

/// Trait for anything that can retrieve a feed document.
///
/// The normalizer is shared across worker threads during batch enrichment,
/// so implementations must be [`Send`] and [`Sync`].
///
/// ## Implementing a fetcher
///
/// ```ignore
/// struct FileFetcher;
///
/// impl Fetch for FileFetcher {
///     fn fetch(&self, source: &str) -> Result<Vec<u8>, FetchError> {
///         std::fs::read(source).map_err(|e| FetchError::InvalidUrl(e.to_string()))
///     }
/// }
/// ```
pub trait Fetch: Send + Sync {
    /// Return the raw bytes of the document identified by `source`.
    fn fetch(&self, source: &str) -> Result<Vec<u8>, FetchError>;
}

/// A feed reduced to the parts the normalizer uses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFeed {
    pub title: String,
    pub description: String,
    /// Entries in the order the document lists them.
    pub entries: Vec<FeedItem>,
}

/// Parse a feed document, trying RSS first and then Atom.
pub fn parse_feed(bytes: &[u8]) -> Result<ParsedFeed, ParseError> {
    let rss_err = match ::rss::Channel::read_from(bytes) {
        Ok(channel) => return Ok(parse_channel(&channel)),
        Err(e) => e,
    };

    match atom_syndication::Feed::read_from(bytes) {
        Ok(feed) => Ok(parse_atom(&feed)),
        Err(atom_err) => Err(ParseError::Unrecognized {
            rss: rss_err.to_string(),
            atom: atom_err.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
