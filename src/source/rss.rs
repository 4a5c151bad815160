//! RSS feed extraction.
//!
//! Converts an [`rss::Channel`] into a [`ParsedFeed`].  The `rss` crate
//! handles RSS 0.9x, 1.0 and 2.0 documents; namespaced elements such as
//! `media:content` arrive as generic extensions keyed by their prefix.

use chrono::{DateTime, Utc};
use rss::extension::{Extension, ExtensionMap};

use super::{media, FeedItem, ParsedFeed};

/// Convert an already-parsed channel into a [`ParsedFeed`].
///
/// This is a pure function (no I/O) so that tests can exercise the
/// extraction logic without hitting the network.
pub fn parse_channel(channel: &rss::Channel) -> ParsedFeed {
    ParsedFeed {
        title: channel.title().to_string(),
        description: channel.description().to_string(),
        entries: channel.items().iter().map(extract_item).collect(),
    }
}

/// Normalize a single `<item>`.
pub fn extract_item(item: &rss::Item) -> FeedItem {
    FeedItem {
        title: item.title().unwrap_or_default().to_string(),
        description: item.description().unwrap_or_default().to_string(),
        link: item.link().unwrap_or_default().to_string(),
        media_urls: media_urls(item),
        last_modified: last_modified(item),
    }
}

/// `<enclosure>` first, then `media:content` in document order.
fn media_urls(item: &rss::Item) -> Vec<String> {
    let mut urls = Vec::new();

    if let Some(enclosure) = item.enclosure() {
        if !enclosure.url().is_empty() {
            urls.push(enclosure.url().to_string());
        }
    }

    urls.extend(media_content_urls(item.extensions()));
    urls
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
        .flat_map(|group: &Extension| group.children().get("content").into_iter().flatten());

    direct
        .chain(grouped)
        .filter_map(|content| media::content_url(content.attrs()))
        .collect()
}

/// `<pubDate>` is nominally RFC 2822, but plenty of feeds publish RFC 3339
/// there.  `dc:date` is the RSS 1.0 equivalent.
fn last_modified(item: &rss::Item) -> Option<DateTime<Utc>> {
    let pub_date = item.pub_date().and_then(|d| {
        DateTime::parse_from_rfc2822(d.trim())
            .or_else(|_| DateTime::parse_from_rfc3339(d.trim()))
            .ok()
    });

    pub_date
        .or_else(|| {
            item.dublin_core_ext()
                .and_then(|dc| dc.dates().first())
                .and_then(|d| DateTime::parse_from_rfc3339(d.trim()).ok())
        })
        .map(|dt| dt.with_timezone(&Utc))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
