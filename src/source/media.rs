//! Media RSS (`xmlns:media="http://search.yahoo.com/mrss/"`) helpers shared
//! by the RSS and Atom extractors.

use std::collections::BTreeMap;

/// Conventional namespace prefix under which both parsers file Media RSS
/// elements.
pub const PREFIX: &str = "media";

/// The `url` attribute of a `media:content` element, if present and non-empty.
pub fn content_url(attrs: &BTreeMap<String, String>) -> Option<String> {
    attrs
        .get("url")
        .filter(|url| !url.is_empty())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_url_is_copied_verbatim() {
        let attrs = BTreeMap::from([
            ("url".to_string(), " https://example.com/x.png ".to_string()),
            ("medium".to_string(), "image".to_string()),
        ]);
        assert_eq!(content_url(&attrs).as_deref(), Some(" https://example.com/x.png "));
    }

    #[test]
    fn empty_or_missing_url_is_none() {
        let empty = BTreeMap::from([("url".to_string(), String::new())]);
        assert!(content_url(&empty).is_none());
        assert!(content_url(&BTreeMap::new()).is_none());
    }
}
