use crate::errors::SearchError;
use crate::models::{JobListing, SearchResult};
use crate::provider::{self, JobSearchProvider, QueryReport, SearchObserver, SearchReport};
use crate::runner::FetchPath;

const CATALOG: &[(&str, &str, &str, &str, &str)] = &[
    ("Software Engineer", "Google", "Mountain View, CA", "software-engineer-at-google", "software engineer"),
    ("Data Scientist", "Microsoft", "Redmond, WA", "data-scientist-at-microsoft", "data scientist"),
    ("Product Manager", "Amazon", "Seattle, WA", "product-manager-at-amazon", "product manager"),
    ("Frontend Developer", "Facebook", "Menlo Park, CA", "frontend-developer-at-facebook", "frontend developer"),
    ("Machine Learning Engineer", "Apple", "Cupertino, CA", "machine-learning-engineer-at-apple", "machine learning engineer"),
    ("DevOps Engineer", "Netflix", "Los Gatos, CA", "devops-engineer-at-netflix", "devops engineer"),
    ("UX Designer", "Adobe", "San Jose, CA", "ux-designer-at-adobe", "ux designer"),
    ("Data Engineer", "IBM", "New York, NY", "data-engineer-at-ibm", "data engineer"),
    ("Full Stack Developer", "Twitter", "San Francisco, CA", "full-stack-developer-at-twitter", "full stack developer"),
    ("AI Research Scientist", "NVIDIA", "Santa Clara, CA", "ai-research-scientist-at-nvidia", "ai research scientist"),
];

const VIEW_URL: &str = "https://www.linkedin.com/jobs/view/";

/// Fixed in-memory catalog standing in for the live source.
///
/// Catalog entries carry their canonical query tag in `source_query`; matched
/// listings are re-stamped with the query that found them.
pub struct MockProvider {
    catalog: Vec<JobListing>,
}

impl MockProvider {
    pub fn new() -> Self {
        let catalog = CATALOG
            .iter()
            .map(|(title, company, location, slug, tag)| JobListing {
                title: title.to_string(),
                company: company.to_string(),
                location: location.to_string(),
                url: format!("{}{}", VIEW_URL, slug),
                source_query: tag.to_string(),
            })
            .collect();

        MockProvider { catalog }
    }

    pub fn catalog(&self) -> &[JobListing] {
        &self.catalog
    }

    /// Catalog entries whose title or tag contains the query and whose location
    /// contains `location`, case-insensitively, in catalog order.
    pub fn search(&self, query: &str, location: &str, limit: usize) -> Vec<JobListing> {
        let query = query.to_string();
        let needle = query.to_lowercase();
        let location = location.trim().to_lowercase();

        self.catalog
            .iter()
            .filter(|job| {
                job.title.to_lowercase().contains(&needle)
                    || job.source_query.to_lowercase().contains(&needle)
            })
            .filter(|job| location.is_empty() || job.location.to_lowercase().contains(&location))
            .take(limit)
            .map(|job| JobListing {
                source_query: query.clone(),
                ..job.clone()
            })
            .collect()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl JobSearchProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
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
        let mut collected = Vec::new();
        let mut reports = Vec::with_capacity(queries.len());

        for (index, query) in queries.iter().enumerate() {
            observer.query_started(index, queries.len(), query);

            let listings = self.search(query, location, per_query_limit);
            let report = QueryReport {
                query: query.clone(),
                path: if listings.is_empty() {
                    FetchPath::Exhausted
                } else {
                    FetchPath::Catalog
                },
                count: listings.len(),
                error: None,
            };
            collected.extend(listings);

            observer.query_finished(index, &report);
            reports.push(report);
        }

        Ok(SearchReport {
            result: SearchResult::from_listings(collected),
            queries: reports,
            warnings: Vec::new(),
            cancelled: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queries(items: &[&str]) -> Vec<String> {
        items.iter().map(|q| q.to_string()).collect()
    }

    #[test]
    fn catalog_has_unique_urls() {
        let mock = MockProvider::new();
        let result = SearchResult::from_listings(mock.catalog().to_vec());
        assert_eq!(result.len(), mock.catalog().len());
    }

    #[test]
    fn matching_ignores_case() {
        let mock = MockProvider::new();
        assert!(mock.search("ml", "", 10).is_empty());
        assert_eq!(mock.search("LEARNING", "", 10)[0].company, "Apple");
    }

    #[test]
    fn matches_are_stamped_with_issuing_query() {
        let mock = MockProvider::new();
        let hits = mock.search("Scientist", "", 10);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|job| job.source_query == "Scientist"));
        assert_eq!(mock.catalog()[1].source_query, "data scientist");
    }

    #[test]
    fn location_filter_is_case_insensitive() {
        let mock = MockProvider::new();
        let hits = mock.search("developer", "ca", 10);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|job| job.location.ends_with("CA")));
    }

    #[test]
    fn overlapping_queries_are_deduplicated() {
        let mock = MockProvider::new();

        let result = mock
            .run_all(&queries(&["data", "data engineer"]), "", 5)
            .unwrap();

        let titles: Vec<&str> = result.iter().map(|job| job.title.as_str()).collect();
        assert_eq!(titles, vec!["Data Scientist", "Data Engineer"]);
    }

    #[test]
    fn report_marks_empty_queries() {
        let mock = MockProvider::new();

        let report = mock
            .run_with_report(&queries(&["ux", "astronaut"]), "", 5, &mut provider::NoopObserver)
            .unwrap();

        assert_eq!(report.queries[0].path, FetchPath::Catalog);
        assert_eq!(report.queries[1].path, FetchPath::Exhausted);
        assert_eq!(report.result.len(), 1);
    }

    #[test]
    fn zero_limit_is_rejected_like_live_search() {
        let mock = MockProvider::new();
        assert_eq!(
            mock.run_all(&queries(&["data"]), "", 0).unwrap_err(),
            SearchError::InvalidLimit
        );
    }
}
