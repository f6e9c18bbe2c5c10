use crate::errors::FetchError;
use crate::fetcher::ListingFetcher;
use crate::linkedin;
use crate::models::{JobListing, SearchQuery};
use crate::parser;
use crate::{debug_eprintln, debug_println};
use reqwest::blocking::{Client, Response};
use reqwest::header::{self, HeaderMap, HeaderValue};
use scraper::Html;
use std::time::Duration;

pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Plain GET against the search endpoint, parsed as static HTML.
///
/// Always speculative: transport failures and bad statuses come back as an
/// empty result, never as an error.
pub struct HttpFetcher {
    client: Client,
    endpoint: String,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        Self::with_endpoint(linkedin::JOBS_SEARCH_URL, timeout)
    }

    pub fn with_endpoint(endpoint: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .cookie_store(true)
            .build()?;

        Ok(HttpFetcher {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    fn browser_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static(linkedin::random_user_agent()),
        );
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert(header::REFERER, HeaderValue::from_static(linkedin::REFERER));
        headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
        headers.insert(header::UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
        headers
    }

    fn get(&self, url: &str) -> Result<String, FetchError> {
        let response: Response = self
            .client
            .get(url)
            .headers(Self::browser_headers())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport {
                status: Some(status.as_u16()),
                message: format!("HTTP {} for {}", status, url),
            });
        }

        Ok(response.text()?)
    }

    fn try_fetch(&self, query: &SearchQuery) -> Result<Vec<JobListing>, FetchError> {
        let url = linkedin::search_url_at(&self.endpoint, query);
        debug_println!("Fetching search page: {}", url);

        let body = self.get(&url)?;
        debug_println!("Fetched {} bytes for '{}'", body.len(), query.keywords);

        let document = Html::parse_document(&body);
        Ok(parser::extract_listings(&document, &query.keywords, query.limit))
    }

    /// Text of a public job detail page.
    pub fn fetch_description(&self, job_url: &str) -> Result<String, FetchError> {
        debug_println!("Fetching job description: {}", job_url);
        let body = self.get(job_url)?;
        parser::extract_description(&Html::parse_document(&body))
    }
}

impl ListingFetcher for HttpFetcher {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch(&self, query: &SearchQuery) -> Result<Vec<JobListing>, FetchError> {
        match self.try_fetch(query) {
            Ok(listings) => Ok(listings),
            Err(e) => {
                debug_eprintln!("HTTP search for '{}' failed: {}", query.keywords, e);
                Ok(Vec::new())
            }
        }
    }
}
