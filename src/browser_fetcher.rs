use crate::errors::FetchError;
use crate::fetcher::ListingFetcher;
use crate::linkedin::{self, selectors};
use crate::models::{JobListing, SearchQuery};
use crate::{debug_eprintln, debug_println};
use headless_chrome::{Browser, Element, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_PAGE_TIMEOUT: Duration = Duration::from_secs(10);
const WINDOW_SIZE: (u32, u32) = (1920, 1080);

#[derive(Debug, Clone)]
pub struct BrowserOptions {
    pub headless: bool,
    /// How long to wait for the first result card.
    pub page_timeout: Duration,
    /// Chrome/Chromium binary; auto-detected when `None`.
    pub executable: Option<PathBuf>,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: true,
            page_timeout: DEFAULT_PAGE_TIMEOUT,
            executable: None,
        }
    }
}

/// A launched browser plus its single tab. Dropping it closes the tab and
/// kills the browser process, whatever path the caller leaves by.
pub struct BrowserSession {
    tab: Arc<Tab>,
    // Dropped after `tab`; its drop terminates the child process.
    _browser: Browser,
}

impl BrowserSession {
    pub fn launch(options: &BrowserOptions, user_agent: &str) -> Result<Self, FetchError> {
        let args = launch_args(user_agent);
        let launch_options = LaunchOptions {
            headless: options.headless,
            sandbox: false,
            window_size: Some(WINDOW_SIZE),
            path: options.executable.clone(),
            idle_browser_timeout: options.page_timeout * 3,
            args: args.iter().map(OsStr::new).collect(),
            ..Default::default()
        };

        let browser = Browser::new(launch_options)
            .map_err(|e| FetchError::Setup(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| FetchError::Setup(format!("cannot open tab: {}", e)))?;
        tab.set_default_timeout(options.page_timeout);

        debug_println!("Browser session started (headless: {})", options.headless);
        Ok(BrowserSession {
            tab,
            _browser: browser,
        })
    }

    pub fn tab(&self) -> &Tab {
        &self.tab
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if let Err(e) = self.tab.close(false) {
            debug_eprintln!("Error closing browser tab: {}", e);
        }
        debug_println!("Browser session closed");
    }
}

/// Command-line switches for the browser process.
pub fn launch_args(user_agent: &str) -> Vec<String> {
    vec![
        "--no-sandbox".to_string(),
        "--disable-gpu".to_string(),
        "--disable-dev-shm-usage".to_string(),
        "--disable-extensions".to_string(),
        "--disable-infobars".to_string(),
        "--disable-blink-features=AutomationControlled".to_string(),
        "--blink-settings=imagesEnabled=false".to_string(),
        format!("--window-size={},{}", WINDOW_SIZE.0, WINDOW_SIZE.1),
        format!("--user-agent={}", user_agent),
    ]
}

/// Loads the search page in a real browser so script-rendered results show up.
pub struct BrowserFetcher {
    options: BrowserOptions,
}

impl BrowserFetcher {
    pub fn new(options: BrowserOptions) -> Self {
        BrowserFetcher { options }
    }

    fn scrape_page(&self, session: &BrowserSession, query: &SearchQuery) -> Result<Vec<JobListing>, FetchError> {
        let tab = session.tab();
        let url = linkedin::search_url(query);
        debug_println!("Browser navigating to: {}", url);

        tab.navigate_to(&url)
            .map_err(|e| FetchError::transport(format!("navigation failed: {}", e)))?;

        tab.wait_for_element_with_custom_timeout(selectors::JOB_CARD, self.options.page_timeout)
            .map_err(|_| FetchError::Timeout {
                selector: selectors::JOB_CARD.to_string(),
                seconds: self.options.page_timeout.as_secs(),
            })?;

        let cards = tab
            .find_elements(selectors::JOB_CARD)
            .map_err(|e| FetchError::Extraction(format!("cannot list job cards: {}", e)))?;
        debug_println!("Browser found {} job cards", cards.len());

        let mut listings = Vec::new();
        for card in &cards {
            if listings.len() >= query.limit {
                break;
            }
            match extract_card(card, &query.keywords) {
                Ok(listing) => listings.push(listing),
                Err(e) => debug_eprintln!("Skipping rendered job card: {}", e),
            }
        }

        Ok(listings)
    }
}

fn extract_card(card: &Element, query: &str) -> Result<JobListing, FetchError> {
    let title = inner_text(card, selectors::TITLE)?;
    let company = inner_text(card, selectors::COMPANY)?;
    let location = inner_text(card, selectors::LOCATION)?;
    let href = card
        .find_element(selectors::LINK)
        .and_then(|link| link.get_attribute_value("href"))
        .map_err(|e| FetchError::Extraction(format!("link: {}", e)))?
        .ok_or_else(|| FetchError::Extraction("missing link".to_string()))?;

    JobListing::from_scraped(&title, &company, &location, &href, query)
}

fn inner_text(card: &Element, selector: &str) -> Result<String, FetchError> {
    card.find_element(selector)
        .and_then(|el| el.get_inner_text())
        .map_err(|e| FetchError::Extraction(format!("{}: {}", selector, e)))
}

impl ListingFetcher for BrowserFetcher {
    fn name(&self) -> &str {
        "browser"
    }

    fn fetch(&self, query: &SearchQuery) -> Result<Vec<JobListing>, FetchError> {
        let session = BrowserSession::launch(&self.options, linkedin::random_user_agent())?;
        self.scrape_page(&session, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_args_soften_automation_fingerprint() {
        let args = launch_args("TestAgent/1.0");

        for flag in [
            "--no-sandbox",
            "--disable-gpu",
            "--disable-blink-features=AutomationControlled",
            "--blink-settings=imagesEnabled=false",
            "--window-size=1920,1080",
            "--user-agent=TestAgent/1.0",
        ] {
            assert!(args.iter().any(|a| a == flag), "missing {}", flag);
        }
    }

    #[test]
    fn default_options_wait_ten_seconds() {
        let options = BrowserOptions::default();
        assert_eq!(options.page_timeout, Duration::from_secs(10));
        assert!(options.headless);
        assert!(options.executable.is_none());
    }

    #[test]
    fn missing_browser_binary_is_setup_error() {
        let fetcher = BrowserFetcher::new(BrowserOptions {
            executable: Some(PathBuf::from("/nonexistent/path/to/chromium")),
            ..BrowserOptions::default()
        });

        let err = fetcher.fetch(&SearchQuery::new("rust", "", 5)).unwrap_err();

        assert!(err.is_setup(), "unexpected error: {}", err);
    }
}
