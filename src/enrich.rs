//! Row enrichment.
//!
//! Attaches a normalized feed (or `null`) to each row under the configured
//! property.  [`enrich_rows`] spreads a batch over a fixed number of worker
//! threads; results are sent back over an [`mpsc`] channel tagged with the
//! row's index so the output keeps the input order.
//!
//! ## For contributors
//!
//! A failing feed never aborts a batch: the row gets `null` and the error is
//! recorded in [`BatchReport::failures`].  Timeouts are the fetcher's job
//! (see [`crate::source::HttpFetcher::new`]), so a slow feed ties up one
//! worker for at most that long.

use std::sync::{mpsc, Mutex, PoisonError};
use std::thread;

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::config::FeedOptions;
use crate::error::FeedError;
use crate::normalizer::{source_of, Normalizer, Row};
use crate::source::Fetch;

/// A row whose feed could not be normalized.
#[derive(Debug)]
pub struct RowFailure {
    /// Position of the row in the input batch.
    pub index: usize,
    /// The feed URL that failed.
    pub source: String,
    pub error: FeedError,
}

/// Outcome of [`enrich_rows`].
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Every input row, enriched, in input order.
    pub rows: Vec<Row>,
    /// Failures ordered by row index.
    pub failures: Vec<RowFailure>,
}

/// Attach the feed summary to `row`, handing any error back to the caller.
///
/// The property is always written: the summary on success, `null` when the
/// source is empty or fails.
pub fn try_enrich_row<F: Fetch>(
    mut row: Row,
    normalizer: &Normalizer<F>,
    options: &FeedOptions,
) -> (Row, Option<FeedError>) {
    let (value, error) = match normalizer.get_feed(&row, options) {
        Ok(summary) => (summary.map_or(Value::Null, |s| json!(s)), None),
        Err(e) => (Value::Null, Some(e)),
    };
    row.insert(options.property.clone(), value);
    (row, error)
}

/// Attach the feed summary to `row`, logging and swallowing any failure.
pub fn enrich_row<F: Fetch>(row: Row, normalizer: &Normalizer<F>, options: &FeedOptions) -> Row {
    let source = source_of(&row, &options.field).unwrap_or_default().to_string();
    let (row, error) = try_enrich_row(row, normalizer, options);
    if let Some(e) = error {
        warn!(source = %source, error = %e, "feed unavailable");
    }
    row
}

/// Enrich every row using at most `workers` threads (at least one).
pub fn enrich_rows<F: Fetch>(
    rows: Vec<Row>,
    normalizer: &Normalizer<F>,
    options: &FeedOptions,
    workers: usize,
) -> BatchReport {
    let total = rows.len();
    if total == 0 {
        return BatchReport::default();
    }
    let workers = workers.clamp(1, total);

    let jobs = Mutex::new(rows.into_iter().enumerate());
    let (tx, rx) = mpsc::channel();

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let jobs = &jobs;
            scope.spawn(move || loop {
                let next = jobs.lock().unwrap_or_else(PoisonError::into_inner).next();
                let Some((index, row)) = next else {
                    return;
                };

                let source = source_of(&row, &options.field).map(String::from);
                let (row, error) = try_enrich_row(row, normalizer, options);
                if tx.send((index, row, source, error)).is_err() {
                    return;
                }
            });
        }
    });
    drop(tx);

    let mut slots: Vec<Option<Row>> = (0..total).map(|_| None).collect();
    let mut failures = Vec::new();

    for (index, row, source, error) in rx {
        slots[index] = Some(row);
        if let Some(error) = error {
            let source = source.unwrap_or_default();
            warn!(index, source = %source, error = %error, "feed unavailable");
            failures.push(RowFailure { index, source, error });
        }
    }
    failures.sort_by_key(|f| f.index);

    info!(rows = total, failed = failures.len(), workers, "batch enriched");

    BatchReport {
        rows: slots.into_iter().flatten().collect(),
        failures,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::normalizer::tests::{rss_with_items, StaticFetcher};

    fn row(value: Value) -> Row {
        value.as_object().unwrap().clone()
    }

    fn normalizer() -> Normalizer<StaticFetcher> {
        Normalizer::new(
            StaticFetcher::default()
                .with("http://a.example/feed", rss_with_items(3))
                .with("http://b.example/feed", rss_with_items(8))
                .with("http://empty.example/feed", rss_with_items(0)),
        )
    }

    #[test]
    fn enrich_row_attaches_summary_under_property() {
        let options = FeedOptions {
            count: 2,
            property: "news".to_string(),
            ..FeedOptions::default()
        };

        let enriched = enrich_row(
            row(json!({ "id": 7, "rss": "http://a.example/feed" })),
            &normalizer(),
            &options,
        );

        assert_eq!(enriched["id"], 7);
        assert_eq!(enriched["news"]["link"], "http://a.example/feed");
        assert_eq!(enriched["news"]["items"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn attached_value_is_the_serialized_summary() {
        let n = normalizer();
        let options = FeedOptions::default();
        let source = row(json!({ "rss": "http://b.example/feed" }));

        let summary = n.get_feed(&source, &options).unwrap().unwrap();
        let enriched = enrich_row(source, &n, &options);

        assert_eq!(enriched["feed"], serde_json::to_value(&summary).unwrap());
        assert_eq!(enriched["feed"]["items"][4]["title"], "Item 5");
    }

    #[test]
    fn empty_results_are_null() {
        let options = FeedOptions::default();
        let n = normalizer();

        let missing = enrich_row(row(json!({ "id": 1 })), &n, &options);
        let empty_feed = enrich_row(row(json!({ "rss": "http://empty.example/feed" })), &n, &options);

        assert!(missing["feed"].is_null());
        assert!(empty_feed["feed"].is_null());
    }

    #[test]
    fn try_enrich_row_returns_the_error() {
        let (enriched, error) = try_enrich_row(
            row(json!({ "rss": "http://down.example/feed" })),
            &normalizer(),
            &FeedOptions::default(),
        );

        assert!(enriched["feed"].is_null());
        assert!(matches!(
            error,
            Some(FeedError::Fetch(FetchError::Status { status: 404, .. }))
        ));
    }

    #[test]
    fn batch_isolates_failures_and_keeps_order() {
        let rows = vec![
            row(json!({ "id": 0, "rss": "http://a.example/feed" })),
            row(json!({ "id": 1, "rss": "http://down.example/feed" })),
            row(json!({ "id": 2 })),
            row(json!({ "id": 3, "rss": "http://b.example/feed" })),
            row(json!({ "id": 4, "rss": "http://a.example/feed" })),
        ];

        let report = enrich_rows(rows, &normalizer(), &FeedOptions::default(), 3);

        let ids: Vec<i64> = report.rows.iter().map(|r| r["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, [0, 1, 2, 3, 4]);

        assert_eq!(report.rows[0]["feed"]["items"].as_array().unwrap().len(), 3);
        assert!(report.rows[1]["feed"].is_null());
        assert!(report.rows[2]["feed"].is_null());
        assert_eq!(report.rows[3]["feed"]["items"].as_array().unwrap().len(), 5);

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].index, 1);
        assert_eq!(report.failures[0].source, "http://down.example/feed");
    }

    #[test]
    fn zero_workers_still_processes_the_batch() {
        let rows = vec![
            row(json!({ "rss": "http://a.example/feed" })),
            row(json!({ "rss": "http://b.example/feed" })),
        ];

        let report = enrich_rows(rows, &normalizer(), &FeedOptions::default(), 0);

        assert_eq!(report.rows.len(), 2);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn empty_batch_yields_empty_report() {
        let report = enrich_rows(Vec::new(), &normalizer(), &FeedOptions::default(), 4);
        assert!(report.rows.is_empty());
        assert!(report.failures.is_empty());
    }
}
