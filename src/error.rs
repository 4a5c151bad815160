//! Error types.
//!
//! Fetching and parsing fail in different ways, and a caller enriching a
//! batch of rows usually wants to tell them apart (retry a timeout, skip a
//! malformed feed).  [`FeedError`] wraps both so the normalizer exposes a
//! single error type.

use thiserror::Error;

/// Retrieving the raw feed document failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid feed URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{url} responded with HTTP {status}")]
    Status { status: u16, url: String },
}

/// The document was fetched but is neither RSS nor Atom.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("not an RSS or Atom document (rss: {rss}; atom: {atom})")]
    Unrecognized { rss: String, atom: String },
}

/// Any failure while normalizing a single feed source.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A configuration value could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: String, value: String },
}

pub type Result<T> = std::result::Result<T, FeedError>;
