//! Command-line argument parsing.
//!
//! ```text
//! feed-normalizer [--count N] [--field NAME] [--property NAME]
//!                 [--workers N] [--timeout SECS] [URL | FILE | -]
//! ```
//!
//! Flags override whatever `Config::from_env` produced.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use feed_normalizer::config::{parse_timeout, parse_value};
use feed_normalizer::Config;

/// What to read.
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    /// Normalize a single feed and print its summary.
    Url(String),
    /// A JSON array of rows.
    File(PathBuf),
    /// A JSON array of rows on stdin.
    Stdin,
}

/// Apply command-line flags to `config` and return the input to process.
pub fn parse_args(args: impl IntoIterator<Item = String>, config: &mut Config) -> Result<Input> {
    let mut input = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| args.next().with_context(|| format!("{flag} needs a value"));

        match arg.as_str() {
            "--count" => config.options.count = parse_value("--count", &value("--count")?)?,
            "--field" => config.options.field = value("--field")?,
            "--property" => config.options.property = value("--property")?,
            "--workers" => config.workers = parse_value("--workers", &value("--workers")?)?,
            "--timeout" => config.timeout = parse_timeout("--timeout", &value("--timeout")?)?,
            flag if flag.starts_with("--") => bail!("unknown flag: {flag}"),
            _ if input.is_some() => bail!("unexpected argument: {arg}"),
            "-" => input = Some(Input::Stdin),
            url if url.starts_with("http://") || url.starts_with("https://") => {
                input = Some(Input::Url(arg.clone()))
            }
            _ => input = Some(Input::File(PathBuf::from(&arg))),
        }
    }

    Ok(input.unwrap_or(Input::Stdin))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn parse(args: &[&str]) -> Result<(Input, Config)> {
        let mut config = Config::default();
        let input = parse_args(args.iter().map(|s| s.to_string()), &mut config)?;
        Ok((input, config))
    }

    #[test]
    fn no_arguments_reads_stdin_with_defaults() {
        let (input, config) = parse(&[]).unwrap();
        assert_eq!(input, Input::Stdin);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn url_argument_selects_single_feed_mode() {
        let (input, _) = parse(&["https://example.com/feed.xml"]).unwrap();
        assert_eq!(input, Input::Url("https://example.com/feed.xml".into()));
    }

    #[test]
    fn flags_override_config() {
        let (input, config) = parse(&[
            "--count", "3", "--field", "twitter", "--property", "tweets", "--workers", "2",
            "--timeout", "5", "rows.json",
        ])
        .unwrap();

        assert_eq!(input, Input::File(PathBuf::from("rows.json")));
        assert_eq!(config.options.count, 3);
        assert_eq!(config.options.field, "twitter");
        assert_eq!(config.options.property, "tweets");
        assert_eq!(config.workers, 2);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&["--count"]).is_err());
        assert!(parse(&["--count", "many"]).is_err());
        assert!(parse(&["--verbose"]).is_err());
        assert!(parse(&["--timeout", "0"]).is_err());
        assert!(parse(&["a.json", "b.json"]).is_err());
    }
}
