use crate::errors::FetchError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const SITE_ROOT: &str = "https://www.linkedin.com";

/// One job posting. The `url` is the listing's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    pub title: String,
    pub company: String,
    pub location: String,
    pub url: String,
    /// The query that produced this listing.
    #[serde(rename = "query")]
    pub source_query: String,
}

impl JobListing {
    /// Builds a listing from raw scraped fields.
    ///
    /// Text is whitespace-normalized and the link is canonicalized. Any field that
    /// ends up empty is an extraction failure for that card.
    pub fn from_scraped(
        title: &str,
        company: &str,
        location: &str,
        href: &str,
        query: &str,
    ) -> Result<Self, FetchError> {
        let title = required("title", title)?;
        let company = required("company", company)?;
        let location = required("location", location)?;
        let url = canonical_url(href)
            .ok_or_else(|| FetchError::Extraction(format!("unusable link `{}`", href)))?;

        Ok(JobListing {
            title,
            company,
            location,
            url,
            source_query: query.to_string(),
        })
    }

    pub fn to_csv_record(&self) -> [&str; 5] {
        [
            &self.title,
            &self.company,
            &self.location,
            &self.url,
            &self.source_query,
        ]
    }
}

fn required(field: &str, raw: &str) -> Result<String, FetchError> {
    let text = normalize_text(raw);
    if text.is_empty() {
        Err(FetchError::Extraction(format!("missing {}", field)))
    } else {
        Ok(text)
    }
}

/// Trims and collapses runs of whitespace into single spaces.
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drops tracking parameters and fragments, and makes relative links absolute.
pub fn canonical_url(href: &str) -> Option<String> {
    let href = href.trim();
    let end = href.find(|c| c == '?' || c == '#').unwrap_or(href.len());
    let path = &href[..end];

    if path.is_empty() {
        return None;
    }

    if path.starts_with("http") {
        Some(path.to_string())
    } else if path.starts_with('/') {
        Some(format!("{}{}", SITE_ROOT, path))
    } else {
        None
    }
}

/// Keywords, optional location and a result cap for one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keywords: String,
    pub location: Option<String>,
    pub limit: usize,
}

impl SearchQuery {
    pub fn new(keywords: &str, location: &str, limit: usize) -> Self {
        let location = location.trim();
        SearchQuery {
            keywords: keywords.trim().to_string(),
            location: if location.is_empty() {
                None
            } else {
                Some(location.to_string())
            },
            limit,
        }
    }

    pub fn location_str(&self) -> &str {
        self.location.as_deref().unwrap_or("")
    }
}

/// Listings from one search, unique by URL, in the order they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchResult {
    listings: Vec<JobListing>,
}

impl SearchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first listing for every URL and drops later duplicates.
    pub fn from_listings<I>(listings: I) -> Self
    where
        I: IntoIterator<Item = JobListing>,
    {
        let mut seen_urls: HashSet<String> = HashSet::new();
        let listings = listings
            .into_iter()
            .filter(|listing| seen_urls.insert(listing.url.clone()))
            .collect();

        SearchResult { listings }
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JobListing> {
        self.listings.iter()
    }

    pub fn listings(&self) -> &[JobListing] {
        &self.listings
    }

    pub fn into_listings(self) -> Vec<JobListing> {
        self.listings
    }
}

impl IntoIterator for SearchResult {
    type Item = JobListing;
    type IntoIter = std::vec::IntoIter<JobListing>;

    fn into_iter(self) -> Self::IntoIter {
        self.listings.into_iter()
    }
}

impl<'a> IntoIterator for &'a SearchResult {
    type Item = &'a JobListing;
    type IntoIter = std::slice::Iter<'a, JobListing>;

    fn into_iter(self) -> Self::IntoIter {
        self.listings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(url: &str, query: &str) -> JobListing {
        JobListing {
            title: "Rust Developer".to_string(),
            company: "Ferrous".to_string(),
            location: "Remote".to_string(),
            url: url.to_string(),
            source_query: query.to_string(),
        }
    }

    #[test]
    fn from_scraped_normalizes_fields() {
        let listing = JobListing::from_scraped(
            "\n   Senior   Rust\n Engineer  ",
            " Acme ",
            "Berlin,\n Germany",
            "https://de.linkedin.com/jobs/view/senior-rust-engineer-at-acme-123?refId=abc&trackingId=xyz",
            "rust engineer",
        )
        .unwrap();

        assert_eq!(listing.title, "Senior Rust Engineer");
        assert_eq!(listing.company, "Acme");
        assert_eq!(listing.location, "Berlin, Germany");
        assert_eq!(
            listing.url,
            "https://de.linkedin.com/jobs/view/senior-rust-engineer-at-acme-123"
        );
        assert_eq!(listing.source_query, "rust engineer");
    }

    #[test]
    fn from_scraped_rejects_blank_fields() {
        let err = JobListing::from_scraped("  ", "Acme", "Remote", "/jobs/view/1", "q").unwrap_err();
        assert!(matches!(err, FetchError::Extraction(msg) if msg == "missing title"));

        let err = JobListing::from_scraped("Dev", "Acme", "Remote", "?ref=1", "q").unwrap_err();
        assert!(matches!(err, FetchError::Extraction(_)));
    }

    #[test]
    fn canonical_url_handles_relative_and_fragments() {
        assert_eq!(
            canonical_url("/jobs/view/42#top").as_deref(),
            Some("https://www.linkedin.com/jobs/view/42")
        );
        assert_eq!(canonical_url("javascript:void(0)"), None);
        assert_eq!(canonical_url(""), None);
    }

    #[test]
    fn search_result_keeps_first_occurrence() {
        let result = SearchResult::from_listings(vec![
            listing("https://a", "first"),
            listing("https://b", "first"),
            listing("https://a", "second"),
        ]);

        assert_eq!(result.len(), 2);
        assert_eq!(result.listings()[0].source_query, "first");
        assert_eq!(result.listings()[1].url, "https://b");
    }

    #[test]
    fn search_query_treats_blank_location_as_none() {
        let query = SearchQuery::new("  data engineer ", "   ", 5);
        assert_eq!(query.keywords, "data engineer");
        assert_eq!(query.location, None);
        assert_eq!(query.location_str(), "");
    }

    #[test]
    fn serializes_source_query_as_query_column() {
        let json = serde_json::to_value(listing("https://a", "rust")).unwrap();
        assert_eq!(json["query"], "rust");
        assert!(json.get("source_query").is_none());
    }
}
