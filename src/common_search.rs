use crate::export;
use crate::provider::{JobSearchProvider, SearchReport};
use crate::tui::{self, SearchTUI};
use anyhow::{Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub queries: Vec<String>,
    pub location: String,
    pub per_query_limit: usize,
    /// Where to write results; printed to stdout when `None`.
    pub output: Option<String>,
    pub format: OutputFormat,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            queries: Vec::new(),
            location: String::new(),
            per_query_limit: crate::config::DEFAULT_RESULTS_PER_QUERY,
            output: None,
            format: OutputFormat::Csv,
        }
    }
}

pub fn run_search_with_options(
    provider: &dyn JobSearchProvider,
    options: &SearchOptions,
) -> Result<SearchReport> {
    let mut tui = SearchTUI::new();
    tui.show_header(provider.name(), options.queries.len(), &options.location)?;

    let report = provider
        .run_with_report(
            &options.queries,
            &options.location,
            options.per_query_limit,
            &mut tui,
        )
        .context("Invalid search request")?;

    tui.show_final_summary(&report)?;

    match &options.output {
        Some(path) => {
            let listings = report.result.listings();
            match options.format {
                OutputFormat::Csv => export::save_listings_to_csv(listings, path)?,
                OutputFormat::Json => export::save_listings_to_json(listings, path)?,
            }
        }
        None => tui::print_results(&report.result),
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockProvider;

    #[test]
    fn writes_json_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.json");
        let options = SearchOptions {
            queries: vec!["engineer".to_string()],
            per_query_limit: 2,
            output: Some(path.to_string_lossy().to_string()),
            format: OutputFormat::Json,
            ..SearchOptions::default()
        };

        let report = run_search_with_options(&MockProvider::new(), &options).unwrap();

        let written: Vec<serde_json::Value> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(report.result.len(), 2);
        assert_eq!(written.len(), 2);
        assert_eq!(written[0]["title"], "Software Engineer");
        assert_eq!(written[0]["query"], "engineer");
    }

    #[test]
    fn zero_limit_is_reported_as_error() {
        let options = SearchOptions {
            queries: vec!["engineer".to_string()],
            per_query_limit: 0,
            ..SearchOptions::default()
        };
        assert!(run_search_with_options(&MockProvider::new(), &options).is_err());
    }
}
