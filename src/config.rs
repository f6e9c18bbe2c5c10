use crate::browser_fetcher::{BrowserOptions, DEFAULT_PAGE_TIMEOUT};
use crate::http_fetcher::DEFAULT_HTTP_TIMEOUT;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_USE_MOCK: &str = "USE_MOCK_JOB_SEARCH";
pub const ENV_HEADLESS: &str = "BROWSER_USE_HEADLESS";
pub const ENV_RESULTS_PER_QUERY: &str = "JOB_RESULTS_PER_QUERY";
pub const ENV_PACING_MS: &str = "JOB_SEARCH_PACING_MS";
pub const ENV_CHROME_PATH: &str = "CHROME_PATH";

pub const DEFAULT_RESULTS_PER_QUERY: usize = 5;
pub const DEFAULT_PACING: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub use_mock: bool,
    pub headless: bool,
    pub per_query_limit: usize,
    /// Pause between consecutive queries.
    pub pacing: Duration,
    pub http_timeout: Duration,
    pub page_timeout: Duration,
    pub browser_path: Option<PathBuf>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            use_mock: false,
            headless: false,
            per_query_limit: DEFAULT_RESULTS_PER_QUERY,
            pacing: DEFAULT_PACING,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            page_timeout: DEFAULT_PAGE_TIMEOUT,
            browser_path: None,
        }
    }
}

impl SearchConfig {
    /// Reads the environment, loading `.env` first if one exists.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SearchConfig::default();

        let per_query_limit = match lookup(ENV_RESULTS_PER_QUERY) {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .with_context(|| format!("{} must be a positive integer, got '{}'", ENV_RESULTS_PER_QUERY, raw))?,
            None => defaults.per_query_limit,
        };

        let pacing = match lookup(ENV_PACING_MS) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .with_context(|| format!("{} must be a number of milliseconds, got '{}'", ENV_PACING_MS, raw))?,
            None => defaults.pacing,
        };

        Ok(SearchConfig {
            use_mock: lookup(ENV_USE_MOCK).map(|v| parse_flag(&v)).unwrap_or(defaults.use_mock),
            headless: lookup(ENV_HEADLESS).map(|v| parse_flag(&v)).unwrap_or(defaults.headless),
            per_query_limit,
            pacing,
            browser_path: lookup(ENV_CHROME_PATH)
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            ..defaults
        })
    }

    pub fn browser_options(&self) -> BrowserOptions {
        BrowserOptions {
            headless: self.headless,
            page_timeout: self.page_timeout,
            executable: self.browser_path.clone(),
        }
    }
}

/// Only a case-insensitive "true" turns a flag on.
pub fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<SearchConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SearchConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config_from(&[]).unwrap();
        assert!(!config.use_mock);
        assert!(!config.headless);
        assert_eq!(config.per_query_limit, 5);
        assert_eq!(config.pacing, Duration::from_secs(1));
        assert_eq!(config.page_timeout, Duration::from_secs(10));
        assert!(config.browser_path.is_none());
    }

    #[test]
    fn reads_flags_case_insensitively() {
        let config = config_from(&[
            (ENV_USE_MOCK, "TRUE"),
            (ENV_HEADLESS, "True"),
            (ENV_CHROME_PATH, "/usr/bin/chromium"),
        ])
        .unwrap();
        assert!(config.use_mock);
        assert!(config.headless);
        assert_eq!(config.browser_path, Some(PathBuf::from("/usr/bin/chromium")));
        assert!(config.browser_options().headless);
    }

    #[test]
    fn anything_but_true_is_false() {
        for value in ["1", "yes", "false", ""] {
            assert!(!parse_flag(value), "{} should be false", value);
        }
    }

    #[test]
    fn reads_numeric_settings() {
        let config = config_from(&[(ENV_RESULTS_PER_QUERY, "8"), (ENV_PACING_MS, "250")]).unwrap();
        assert_eq!(config.per_query_limit, 8);
        assert_eq!(config.pacing, Duration::from_millis(250));
    }

    #[test]
    fn rejects_invalid_numbers() {
        assert!(config_from(&[(ENV_RESULTS_PER_QUERY, "0")]).is_err());
        assert!(config_from(&[(ENV_RESULTS_PER_QUERY, "many")]).is_err());
        assert!(config_from(&[(ENV_PACING_MS, "-5")]).is_err());
    }
}
