use crate::errors::FetchError;
use crate::models::{JobListing, SearchQuery};

/// One technique for turning a query into listings.
pub trait ListingFetcher: Send + Sync {
    fn name(&self) -> &str;

    /// Returns at most `query.limit` listings. An empty vector means the source
    /// had nothing for this query via this technique.
    fn fetch(&self, query: &SearchQuery) -> Result<Vec<JobListing>, FetchError>;
}

impl<T: ListingFetcher + ?Sized> ListingFetcher for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&self, query: &SearchQuery) -> Result<Vec<JobListing>, FetchError> {
        (**self).fetch(query)
    }
}
