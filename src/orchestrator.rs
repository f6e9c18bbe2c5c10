use crate::browser_fetcher::BrowserFetcher;
use crate::config::SearchConfig;
use crate::errors::{FetchError, SearchError};
use crate::http_fetcher::HttpFetcher;
use crate::models::{JobListing, SearchQuery, SearchResult};
use crate::provider::{self, JobSearchProvider, QueryReport, SearchObserver, SearchReport};
use crate::runner::{FetchPath, QueryOutcome, QueryRunner};
use crate::{debug_eprintln, debug_println, warn_eprintln};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Runs queries one after another against the live source and merges the results.
pub struct SearchOrchestrator {
    runner: QueryRunner,
    pacing: Duration,
    cancel: Option<Arc<AtomicBool>>,
}

impl SearchOrchestrator {
    pub fn new(runner: QueryRunner, pacing: Duration) -> Self {
        SearchOrchestrator {
            runner,
            pacing,
            cancel: None,
        }
    }

    /// HTTP first, headless browser as fallback.
    pub fn live(config: &SearchConfig) -> Result<Self, FetchError> {
        let light = HttpFetcher::new(config.http_timeout)?;
        let fallback = BrowserFetcher::new(config.browser_options());
        Ok(Self::new(
            QueryRunner::new(Box::new(light), Box::new(fallback)),
            config.pacing,
        ))
    }

    /// Once the flag is set, the search stops at the next query boundary and
    /// returns what it has so far.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .map(|flag| flag.load(Ordering::SeqCst))
            .unwrap_or(false)
    }

    /// A panic below this point costs one query, not the search.
    fn run_isolated(&self, query: &SearchQuery) -> Result<QueryOutcome, FetchError> {
        panic::catch_unwind(AssertUnwindSafe(|| self.runner.run_detailed(query))).map_err(|payload| {
            FetchError::Orchestration {
                query: query.keywords.clone(),
                message: panic_message(payload.as_ref()),
            }
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl JobSearchProvider for SearchOrchestrator {
    fn name(&self) -> &str {
        "linkedin"
    }

    fn run_with_report(
        &self,
        queries: &[String],
        location: &str,
        per_query_limit: usize,
        observer: &mut dyn SearchObserver,
    ) -> Result<SearchReport, SearchError> {
        provider::check_limit(per_query_limit)?;

        let queries = provider::normalize_queries(queries);
        let total = queries.len();
        let mut collected: Vec<JobListing> = Vec::new();
        let mut reports = Vec::with_capacity(total);
        let mut setup_failures = 0;
        let mut cancelled = false;

        for (index, keywords) in queries.iter().enumerate() {
            if self.is_cancelled() {
                debug_println!("Search cancelled before query {}/{}", index + 1, total);
                cancelled = true;
                break;
            }

            observer.query_started(index, total, keywords);
            let query = SearchQuery::new(keywords, location, per_query_limit);

            let report = match self.run_isolated(&query) {
                Ok(outcome) => {
                    if outcome.fallback_error.as_ref().map(FetchError::is_setup).unwrap_or(false) {
                        setup_failures += 1;
                    }
                    let report = QueryReport {
                        query: keywords.clone(),
                        path: outcome.path,
                        count: outcome.listings.len(),
                        error: outcome.fallback_error.map(|e| e.to_string()),
                    };
                    collected.extend(outcome.listings);
                    report
                }
                Err(e) => {
                    debug_eprintln!("Error searching for '{}': {}", keywords, e);
                    QueryReport {
                        query: keywords.clone(),
                        path: FetchPath::Exhausted,
                        count: 0,
                        error: Some(e.to_string()),
                    }
                }
            };

            debug_println!(
                "Query '{}' contributed {} listings via {}",
                report.query,
                report.count,
                report.path
            );
            observer.query_finished(index, &report);
            reports.push(report);

            if index + 1 < total && !self.pacing.is_zero() {
                std::thread::sleep(self.pacing);
            }
        }

        let mut warnings = Vec::new();
        if !reports.is_empty() && setup_failures == reports.len() {
            let warning =
                "browser fallback unavailable for every query; install Chrome/Chromium or set CHROME_PATH"
                    .to_string();
            warn_eprintln!("{}", warning);
            warnings.push(warning);
        }

        let result = SearchResult::from_listings(collected);
        debug_println!("Search finished with {} unique listings", result.len());

        Ok(SearchReport {
            result,
            queries: reports,
            warnings,
            cancelled,
        })
    }
}
