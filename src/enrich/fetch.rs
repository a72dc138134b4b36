use crate::enrich::batch::Annotate;
use crate::enrich::models::{PlaceRecord, SearchQuery};
use crate::enrich::{run_batch, BatchSummary, Outcome, PlacesApi};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Result pages to request per query (Text Search returns 20 per page).
    pub max_pages: usize,
    pub delay: Duration,
    /// A fresh `next_page_token` is not valid for a short while.
    pub page_delay: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_pages: 1,
            delay: Duration::from_millis(500),
            page_delay: Duration::from_secs(2),
        }
    }
}

/// One search-plan query and what it produced.
struct QueryRun {
    query: SearchQuery,
    found: Vec<PlaceRecord>,
    error: Option<String>,
}

impl Annotate for QueryRun {
    fn annotate_error(&mut self, reason: String) {
        self.error = Some(reason);
    }

    fn label(&self) -> String {
        format!("'{}' ({}): {} results", self.query.query, self.query.category, self.found.len())
    }
}

/// Run every query of the search plan through the batch runner.
///
/// A query that fails keeps the pages that did arrive and contributes one
/// placeholder record carrying the error; it does not stop the remaining
/// queries.
pub fn fetch_places(
    api: &dyn PlacesApi,
    plan: &[SearchQuery],
    opts: &FetchOptions,
    now: DateTime<Utc>,
) -> (Vec<PlaceRecord>, BatchSummary) {
    let runs: Vec<QueryRun> = plan
        .iter()
        .cloned()
        .map(|query| QueryRun {
            query,
            found: Vec::new(),
            error: None,
        })
        .collect();

    let (runs, summary) = run_batch("fetch", runs, opts.delay, |mut run| {
        match fetch_query(api, &run.query, opts, now) {
            Ok(found) => {
                run.found = found;
                Outcome::Done(run)
            }
            Err((partial, reason)) => {
                run.found = partial;
                Outcome::Failed { record: run, reason }
            }
        }
    });

    let mut records = Vec::new();
    for run in runs {
        records.extend(run.found);
        if let Some(reason) = run.error {
            records.push(PlaceRecord::failed_query(&run.query, reason));
        }
    }
    info!("📦 fetch produced {} records", records.len());

    (records, summary)
}

/// On failure, returns the pages that did arrive along with the reason.
fn fetch_query(
    api: &dyn PlacesApi,
    query: &SearchQuery,
    opts: &FetchOptions,
    now: DateTime<Utc>,
) -> Result<Vec<PlaceRecord>, (Vec<PlaceRecord>, String)> {
    let mut found = Vec::new();
    let mut token: Option<String> = None;

    for page in 0..opts.max_pages.max(1) {
        if page > 0 {
            match &token {
                Some(_) => std::thread::sleep(opts.page_delay),
                None => break,
            }
        }

        let resp = match api.text_search(&query.query, token.as_deref()) {
            Ok(resp) => resp,
            Err(e) => return Err((found, e.to_string())),
        };

        found.extend(
            resp.results
                .into_iter()
                .map(|r| PlaceRecord::from_search_result(r, query, now)),
        );
        token = resp.next_page_token;
    }

    Ok(found)
}
