use crate::errors::FetchError;
use crate::fetcher::ListingFetcher;
use crate::models::{JobListing, SearchQuery};
use crate::{debug_eprintln, debug_println};
use std::fmt;

/// Which technique ended up serving a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPath {
    Light,
    Browser,
    /// Served from the in-memory mock catalog.
    Catalog,
    /// Both techniques came back empty or failed.
    Exhausted,
}

impl fmt::Display for FetchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FetchPath::Light => "http",
            FetchPath::Browser => "browser",
            FetchPath::Catalog => "catalog",
            FetchPath::Exhausted => "none",
        };
        f.write_str(label)
    }
}

#[derive(Debug)]
pub struct QueryOutcome {
    pub listings: Vec<JobListing>,
    pub path: FetchPath,
    /// Why the browser fallback produced nothing, if it failed outright.
    pub fallback_error: Option<FetchError>,
}

impl QueryOutcome {
    fn exhausted(fallback_error: Option<FetchError>) -> Self {
        QueryOutcome {
            listings: Vec::new(),
            path: FetchPath::Exhausted,
            fallback_error,
        }
    }
}

/// Runs one query: the cheap fetcher first, the expensive one only when the
/// cheap one is silent. Never fails; total silence is an empty outcome.
pub struct QueryRunner {
    light: Box<dyn ListingFetcher>,
    fallback: Box<dyn ListingFetcher>,
}

impl QueryRunner {
    pub fn new(light: Box<dyn ListingFetcher>, fallback: Box<dyn ListingFetcher>) -> Self {
        QueryRunner { light, fallback }
    }

    pub fn run(&self, query: &SearchQuery) -> Vec<JobListing> {
        self.run_detailed(query).listings
    }

    pub fn run_detailed(&self, query: &SearchQuery) -> QueryOutcome {
        let light = self.attempt(self.light.as_ref(), query);
        if let Ok(listings) = light {
            if !listings.is_empty() {
                return QueryOutcome {
                    listings,
                    path: FetchPath::Light,
                    fallback_error: None,
                };
            }
        }

        debug_println!(
            "No {} results for '{}', falling back to {}",
            self.light.name(),
            query.keywords,
            self.fallback.name()
        );

        match self.attempt(self.fallback.as_ref(), query) {
            Ok(listings) if !listings.is_empty() => QueryOutcome {
                listings,
                path: FetchPath::Browser,
                fallback_error: None,
            },
            Ok(_) => QueryOutcome::exhausted(None),
            Err(e) => QueryOutcome::exhausted(Some(e)),
        }
    }

    fn attempt(
        &self,
        fetcher: &dyn ListingFetcher,
        query: &SearchQuery,
    ) -> Result<Vec<JobListing>, FetchError> {
        match fetcher.fetch(query) {
            Ok(mut listings) => {
                listings.truncate(query.limit);
                Ok(listings)
            }
            Err(e) => {
                debug_eprintln!("{} fetch for '{}' failed: {}", fetcher.name(), query.keywords, e);
                Err(e)
            }
        }
    }
}
