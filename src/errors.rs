use thiserror::Error;

/// Everything that can go wrong while fetching listings for one query.
///
/// None of these escape [`crate::provider::JobSearchProvider::run_all`]; they are
/// recovered at the fetcher, runner or orchestrator level and logged.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network failure or a non-success HTTP status.
    #[error("transport error: {message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// No usable browser runtime on this host.
    #[error("browser setup failed: {0}")]
    Setup(String),

    /// The page never showed a result card within the wait budget.
    #[error("timed out after {seconds}s waiting for `{selector}`")]
    Timeout { selector: String, seconds: u64 },

    /// A single card (or detail page) is missing a required field.
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// Anything unexpected while processing one query.
    #[error("query `{query}` failed: {message}")]
    Orchestration { query: String, message: String },
}

impl FetchError {
    pub fn transport(message: impl Into<String>) -> Self {
        FetchError::Transport {
            status: None,
            message: message.into(),
        }
    }

    pub fn is_setup(&self) -> bool {
        matches!(self, FetchError::Setup(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

/// Contract violations by the caller. These are the only errors a search returns.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("per-query limit must be greater than zero")]
    InvalidLimit,
}
