//! Atom 1.0 feed extraction using the [`atom_syndication`] crate.

use atom_syndication::extension::ExtensionMap;
use atom_syndication::{Entry, Feed, Link};
use chrono::{DateTime, Utc};

use super::{media, FeedItem, ParsedFeed};

/// Convert an already-parsed Atom feed into a [`ParsedFeed`].
pub fn parse_atom(feed: &Feed) -> ParsedFeed {
    ParsedFeed {
        title: feed.title().as_str().to_string(),
        description: feed
            .subtitle()
            .map(|s| s.as_str().to_string())
            .unwrap_or_default(),
        entries: feed.entries().iter().map(extract_entry).collect(),
    }
}

/// Normalize a single `<entry>`.
///
/// The description prefers `<summary>` and falls back to inline
/// `<content>`; out-of-line content (`src="..."`) has no text to offer.
pub fn extract_entry(entry: &Entry) -> FeedItem {
    let description = entry
        .summary()
        .map(|s| s.as_str())
        .or_else(|| entry.content().and_then(|c| c.value()))
        .unwrap_or_default();

    FeedItem {
        title: entry.title().as_str().to_string(),
        description: description.to_string(),
        link: entry_link(entry.links()),
        media_urls: media_urls(entry),
        last_modified: last_modified(entry),
    }
}

/// `<updated>`, else `<published>`.
///
/// `atom_syndication` fills a missing `<updated>` with the Unix epoch, so
/// the epoch counts as absent.
fn last_modified(entry: &Entry) -> Option<DateTime<Utc>> {
    let updated = Some(entry.updated()).filter(|d| d.timestamp() != 0);
    updated
        .or(entry.published())
        .map(|d| d.with_timezone(&Utc))
}

/// First `rel="alternate"` link, else the first link that is neither an
/// enclosure nor a self reference.
fn entry_link(links: &[Link]) -> String {
    links
        .iter()
        .find(|l| l.rel() == "alternate")
        .or_else(|| links.iter().find(|l| !matches!(l.rel(), "enclosure" | "self")))
        .map(|l| l.href().to_string())
        .unwrap_or_default()
}

/// `rel="enclosure"` links first, then Media RSS content.
fn media_urls(entry: &Entry) -> Vec<String> {
    let enclosures = entry
        .links()
        .iter()
        .filter(|l| l.rel() == "enclosure" && !l.href().is_empty())
        .map(|l| l.href().to_string());

    enclosures
        .chain(media_content_urls(entry.extensions()))
        .collect()
}

fn media_content_urls(extensions: &ExtensionMap) -> Vec<String> {
    let Some(ns) = extensions.get(media::PREFIX) else {
        return Vec::new();
    };

    let direct = ns.get("content").into_iter().flatten();
    let grouped = ns
        .get("group")
        .into_iter()
        .flatten()
        .flat_map(|group| group.children().get("content").into_iter().flatten());

    direct
        .chain(grouped)
        .filter_map(|content| media::content_url(content.attrs()))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
