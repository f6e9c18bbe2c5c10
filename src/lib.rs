pub mod debug;

pub mod browser_fetcher;
pub mod common_search;
pub mod config;
pub mod errors;
pub mod export;
pub mod fetcher;
pub mod http_fetcher;
pub mod linkedin;
pub mod mock;
pub mod models;
pub mod orchestrator;
pub mod parser;
pub mod provider;
pub mod runner;
pub mod tui;

pub use errors::{FetchError, SearchError};
pub use models::{JobListing, SearchQuery, SearchResult};
pub use provider::{build_provider, JobSearchProvider};
