//! feed-normalizer: enrich JSON records with normalized Atom/RSS feeds.
//!
//! Reads a JSON array of rows (from a file or stdin), fetches the feed named
//! by each row's source field, and prints the rows back with the summary
//! attached.  Given a single `http(s)://` URL instead, prints that feed's
//! summary.
//!
//! Logs go to stderr and are filtered by `RUST_LOG` (default `info`), so
//! stdout carries nothing but JSON.

mod cli;

use std::fs;
use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::Input;
use feed_normalizer::{enrich_rows, Config, HttpFetcher, Normalizer, Row};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_rows(input: &Input) -> Result<Vec<Row>> {
    let text = match input {
        Input::File(path) => fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("reading stdin")?;
            buf
        }
    };
    serde_json::from_str(&text).context("input must be a JSON array of objects")
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    // -- configuration: defaults < environment < flags -----------------------
    let mut config = Config::from_env()?;
    let input = cli::parse_args(std::env::args().skip(1), &mut config)?;

    let fetcher = HttpFetcher::new(config.timeout, &config.user_agent)?;
    let normalizer = Normalizer::new(fetcher);

    // -- single feed -----------------------------------------------------------
    if let Input::Url(url) = &input {
        let summary = normalizer
            .normalize(url, config.options.count)
            .with_context(|| format!("normalizing {url}"))?;
        return print_json(&summary);
    }

    // -- batch of rows ---------------------------------------------------------
    let rows = read_rows(&input)?;
    info!(rows = rows.len(), workers = config.workers, "enriching rows");

    let report = enrich_rows(rows, &normalizer, &config.options, config.workers);
    if !report.failures.is_empty() {
        warn!(failed = report.failures.len(), "some feeds could not be normalized");
    }

    print_json(&report.rows)
}
