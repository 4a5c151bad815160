//! Explicit configuration.
//!
//! [`FeedOptions`] is what a single normalization call needs; [`Config`]
//! adds the knobs of a batch run.  Defaults are overridden by `FEED_*`
//! environment variables, and the CLI overrides those in turn.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::normalizer::DEFAULT_COUNT;

/// Per-call options: how many items to keep, which row field holds the feed
/// URL, and which property receives the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedOptions {
    pub count: usize,
    pub field: String,
    pub property: String,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            field: "rss".into(),
            property: "feed".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub options: FeedOptions,
    /// Upper bound on concurrent fetches during batch enrichment.
    pub workers: usize,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            options: FeedOptions::default(),
            workers: 4,
            timeout: Duration::from_secs(10),
            user_agent: concat!("feed-normalizer/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

impl Config {
    /// Defaults overridden by `FEED_*` environment variables.
    ///
    /// Call `dotenv::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Like [`Config::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(count) = parse_var(&lookup, "FEED_COUNT")? {
            config.options.count = count;
        }
        if let Some(field) = lookup("FEED_FIELD") {
            config.options.field = field;
        }
        if let Some(property) = lookup("FEED_PROPERTY") {
            config.options.property = property;
        }
        if let Some(workers) = parse_var(&lookup, "FEED_WORKERS")? {
            config.workers = workers;
        }
        if let Some(secs) = lookup("FEED_TIMEOUT_SECS") {
            config.timeout = parse_timeout("FEED_TIMEOUT_SECS", &secs)?;
        }
        if let Some(user_agent) = lookup("FEED_USER_AGENT") {
            config.user_agent = user_agent;
        }

        Ok(config)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => parse_value(var, &value).map(Some),
    }
}

/// Parse `value`, blaming `name` on failure.  Shared with CLI flag parsing.
pub fn parse_value<T: FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var: name.to_string(),
        value: value.to_string(),
    })
}

/// A whole number of seconds, at least one.  Shared with CLI flag parsing.
pub fn parse_timeout(name: &str, value: &str) -> Result<Duration, ConfigError> {
    match parse_value::<u64>(name, value)? {
        0 => Err(ConfigError::Invalid {
            var: name.to_string(),
            value: value.to_string(),
        }),
        secs => Ok(Duration::from_secs(secs)),
    }
}
