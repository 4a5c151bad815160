//! feed-normalizer: fetch Atom/RSS feeds and attach a normalized summary to
//! records.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌───────────┐  bytes   ┌───────────┐ ParsedFeed ┌─────────────┐ summary ┌───────────┐
//! │  Fetch    │ ───────► │ parse_feed│ ─────────► │ Normalizer  │ ──────► │ enrich    │
//! │ (http.rs) │          │ rss / atom│            │ (cap, link) │         │ (rows)    │
//! └───────────┘          └───────────┘            └─────────────┘         └───────────┘
//! ```
//!
//! * **`source`**: the [`source::Fetch`] trait, the HTTP fetcher, and the
//!   RSS and Atom extractors that produce [`source::FeedItem`]s.
//! * **`normalizer`**: [`Normalizer::normalize`] and
//!   [`Normalizer::get_feed`]: cap the entries and build a [`FeedSummary`].
//! * **`enrich`**: attach summaries to JSON rows, singly or as a batch on a
//!   bounded worker pool.
//! * **`config`**: [`FeedOptions`] and [`Config`], loaded from defaults and
//!   `FEED_*` environment variables.
//! * **`error`**: typed errors for fetching, parsing and configuration.

pub mod config;
pub mod enrich;
pub mod error;
pub mod normalizer;
pub mod source;

pub use config::{Config, FeedOptions};
pub use enrich::{enrich_row, enrich_rows, try_enrich_row, BatchReport, RowFailure};
pub use error::{ConfigError, FeedError, FetchError, ParseError};
pub use normalizer::{FeedSummary, Normalizer, Row, DEFAULT_COUNT};
pub use source::{parse_feed, FeedItem, Fetch, HttpFetcher, ParsedFeed};
