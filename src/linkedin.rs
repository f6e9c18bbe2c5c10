//! Everything specific to the public LinkedIn job search pages: endpoint,
//! query parameters, result-card selectors and request headers.

use crate::models::SearchQuery;
use rand::seq::SliceRandom;

pub const JOBS_SEARCH_URL: &str = "https://www.linkedin.com/jobs/search/";
pub const REFERER: &str = "https://www.linkedin.com/";

/// Relevance ordering.
const SORT_BY_RELEVANCE: &str = "R";
/// Remote work filter.
const REMOTE_ONLY: &str = "2";

pub mod selectors {
    pub const JOB_CARD: &str = ".job-search-card";
    pub const TITLE: &str = ".base-search-card__title";
    pub const COMPANY: &str = ".base-search-card__subtitle";
    pub const LOCATION: &str = ".job-search-card__location";
    pub const LINK: &str = ".base-card__full-link";
    pub const DESCRIPTION: &str = ".show-more-less-html__markup, .description__text";
}

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4_1) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4.1 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:124.0) Gecko/20100101 Firefox/124.0",
];

pub fn random_user_agent() -> &'static str {
    USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(USER_AGENTS[0])
}

/// Search page URL for a query. The remote filter and relevance sort are always applied.
pub fn search_url(query: &SearchQuery) -> String {
    search_url_at(JOBS_SEARCH_URL, query)
}

/// Same as [`search_url`] against a different endpoint.
pub fn search_url_at(endpoint: &str, query: &SearchQuery) -> String {
    let mut url = format!(
        "{}?keywords={}&sortBy={}&f_WT={}",
        endpoint,
        urlencoding::encode(&query.keywords),
        SORT_BY_RELEVANCE,
        REMOTE_ONLY
    );

    if let Some(location) = &query.location {
        url.push_str("&location=");
        url.push_str(&urlencoding::encode(location));
    }

    url
}
