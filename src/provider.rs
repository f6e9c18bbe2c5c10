use crate::config::SearchConfig;
use crate::errors::{FetchError, SearchError};
use crate::mock::MockProvider;
use crate::models::SearchResult;
use crate::orchestrator::SearchOrchestrator;
use crate::runner::FetchPath;

/// What happened to one query during a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryReport {
    pub query: String,
    pub path: FetchPath,
    /// Listings contributed before deduplication.
    pub count: usize,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SearchReport {
    pub result: SearchResult,
    pub queries: Vec<QueryReport>,
    pub warnings: Vec<String>,
    /// True when the search stopped early at a query boundary.
    pub cancelled: bool,
}

/// Progress callbacks, invoked in query order.
pub trait SearchObserver {
    fn query_started(&mut self, _index: usize, _total: usize, _query: &str) {}
    fn query_finished(&mut self, _index: usize, _report: &QueryReport) {}
}

pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Turns a list of queries into one deduplicated result set.
pub trait JobSearchProvider: Send + Sync {
    fn name(&self) -> &str;

    fn run_with_report(
        &self,
        queries: &[String],
        location: &str,
        per_query_limit: usize,
        observer: &mut dyn SearchObserver,
    ) -> Result<SearchReport, SearchError>;

    /// Fails only on a zero limit; every other problem shows up as fewer results.
    fn run_all(
        &self,
        queries: &[String],
        location: &str,
        per_query_limit: usize,
    ) -> Result<SearchResult, SearchError> {
        self.run_with_report(queries, location, per_query_limit, &mut NoopObserver)
            .map(|report| report.result)
    }
}

/// Trimmed, non-blank queries in their original order.
pub(crate) fn normalize_queries(queries: &[String]) -> Vec<String> {
    queries
        .iter()
        .map(|q| q.trim())
        .filter(|q| !q.is_empty())
        .map(str::to_string)
        .collect()
}

pub(crate) fn check_limit(per_query_limit: usize) -> Result<(), SearchError> {
    if per_query_limit == 0 {
        Err(SearchError::InvalidLimit)
    } else {
        Ok(())
    }
}

/// Picks the mock catalog or the live scraper from configuration.
pub fn build_provider(config: &SearchConfig) -> Result<Box<dyn JobSearchProvider>, FetchError> {
    if config.use_mock {
        Ok(Box::new(MockProvider::new()))
    } else {
        Ok(Box::new(SearchOrchestrator::live(config)?))
    }
}
