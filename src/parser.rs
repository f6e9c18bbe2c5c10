use crate::errors::FetchError;
use crate::linkedin::selectors;
use crate::models::JobListing;
use crate::{debug_eprintln, debug_println};
use scraper::{ElementRef, Html, Selector};

struct CardSelectors {
    card: Selector,
    title: Selector,
    company: Selector,
    location: Selector,
    link: Selector,
}

impl CardSelectors {
    fn new() -> Result<Self, FetchError> {
        Ok(CardSelectors {
            card: parse_selector(selectors::JOB_CARD)?,
            title: parse_selector(selectors::TITLE)?,
            company: parse_selector(selectors::COMPANY)?,
            location: parse_selector(selectors::LOCATION)?,
            link: parse_selector(selectors::LINK)?,
        })
    }
}

pub(crate) fn parse_selector(css: &str) -> Result<Selector, FetchError> {
    Selector::parse(css)
        .map_err(|e| FetchError::Extraction(format!("invalid selector `{}`: {:?}", css, e)))
}

/// Pulls up to `limit` listings out of a search-results page, in document order.
///
/// Cards missing any of title, company, location or link are skipped; the
/// remaining cards are still processed.
pub fn extract_listings(document: &Html, query: &str, limit: usize) -> Vec<JobListing> {
    let selectors = match CardSelectors::new() {
        Ok(selectors) => selectors,
        Err(e) => {
            debug_eprintln!("Cannot build card selectors: {}", e);
            return Vec::new();
        }
    };

    let mut listings = Vec::new();
    let mut skipped = 0;

    for card in document.select(&selectors.card) {
        if listings.len() >= limit {
            break;
        }

        match extract_card(&card, &selectors, query) {
            Ok(listing) => listings.push(listing),
            Err(e) => {
                skipped += 1;
                debug_eprintln!("Skipping job card: {}", e);
            }
        }
    }

    debug_println!(
        "Extracted {} listings for '{}' ({} cards skipped)",
        listings.len(),
        query,
        skipped
    );
    listings
}

/// Convenience wrapper for raw HTML.
pub fn extract_listings_from_html(html: &str, query: &str, limit: usize) -> Vec<JobListing> {
    let document = Html::parse_document(html);
    extract_listings(&document, query, limit)
}

fn extract_card(
    card: &ElementRef,
    selectors: &CardSelectors,
    query: &str,
) -> Result<JobListing, FetchError> {
    let title = select_text(card, &selectors.title, "title")?;
    let company = select_text(card, &selectors.company, "company")?;
    let location = select_text(card, &selectors.location, "location")?;
    let href = card
        .select(&selectors.link)
        .next()
        .and_then(|el| el.value().attr("href"))
        .ok_or_else(|| FetchError::Extraction("missing link".to_string()))?;

    JobListing::from_scraped(&title, &company, &location, href, query)
}

fn select_text(card: &ElementRef, selector: &Selector, field: &str) -> Result<String, FetchError> {
    card.select(selector)
        .next()
        .map(|el| el.text().collect::<Vec<_>>().join(" "))
        .ok_or_else(|| FetchError::Extraction(format!("missing {}", field)))
}

/// Description text of a job detail page.
pub fn extract_description(document: &Html) -> Result<String, FetchError> {
    let selector = parse_selector(selectors::DESCRIPTION)?;
    let text = document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<Vec<_>>().join(" "))
        .map(|text| crate::models::normalize_text(&text))
        .unwrap_or_default();

    if text.is_empty() {
        Err(FetchError::Extraction("job description not found".to_string()))
    } else {
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(title: &str, company: &str, location: &str, href: &str) -> String {
        format!(
            r#"<li><div class="base-card job-search-card">
                <a class="base-card__full-link" href="{href}"><span class="sr-only">{title}</span></a>
                <div class="base-search-card__info">
                    <h3 class="base-search-card__title">
                        {title}
                    </h3>
                    <h4 class="base-search-card__subtitle"><a href="/company/x">{company}</a></h4>
                    <div class="base-search-card__metadata">
                        <span class="job-search-card__location">{location}</span>
                    </div>
                </div>
            </div></li>"#
        )
    }

    fn page(cards: &[String]) -> String {
        format!(
            r#"<html><body><ul class="jobs-search__results-list">{}</ul></body></html>"#,
            cards.join("\n")
        )
    }

    #[test]
    fn extracts_cards_in_document_order() {
        let html = page(&[
            card("Rust Engineer", "Acme", "Remote", "https://www.linkedin.com/jobs/view/rust-engineer-1?trk=x"),
            card("Backend Developer", "Globex", "Berlin, Germany", "https://www.linkedin.com/jobs/view/backend-developer-2"),
        ]);

        let listings = extract_listings_from_html(&html, "rust", 10);

        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].title, "Rust Engineer");
        assert_eq!(listings[0].company, "Acme");
        assert_eq!(listings[0].location, "Remote");
        assert_eq!(listings[0].url, "https://www.linkedin.com/jobs/view/rust-engineer-1");
        assert_eq!(listings[0].source_query, "rust");
        assert_eq!(listings[1].title, "Backend Developer");
    }

    #[test]
    fn respects_limit() {
        let cards: Vec<String> = (0..6)
            .map(|i| card(&format!("Job {}", i), "Acme", "Remote", &format!("/jobs/view/{}", i)))
            .collect();

        let listings = extract_listings_from_html(&page(&cards), "q", 3);

        assert_eq!(listings.len(), 3);
        assert_eq!(listings[2].title, "Job 2");
    }

    #[test]
    fn zero_limit_yields_nothing() {
        let html = page(&[card("Job", "Acme", "Remote", "/jobs/view/1")]);
        assert!(extract_listings_from_html(&html, "q", 0).is_empty());
    }

    #[test]
    fn skips_incomplete_cards_and_keeps_siblings() {
        let missing_company = r#"<div class="job-search-card">
            <a class="base-card__full-link" href="/jobs/view/9"></a>
            <h3 class="base-search-card__title">Orphan</h3>
            <span class="job-search-card__location">Remote</span>
        </div>"#
            .to_string();
        let html = page(&[
            missing_company,
            card("Kept", "Initech", "Austin, TX", "/jobs/view/10"),
            card("No Link", "Initech", "Austin, TX", "?only=query"),
        ]);

        let listings = extract_listings_from_html(&html, "q", 10);

        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].title, "Kept");
        assert_eq!(listings[0].url, "https://www.linkedin.com/jobs/view/10");
    }

    #[test]
    fn page_without_cards_is_empty() {
        let html = "<html><body><p>Sign in to see more jobs</p></body></html>";
        assert!(extract_listings_from_html(html, "q", 5).is_empty());
    }

    #[test]
    fn extracts_description_text() {
        let html = r#"<html><body><div class="show-more-less-html__markup">
            <p>Build   scrapers.</p><ul><li>Rust</li></ul></div></body></html>"#;
        let description = extract_description(&Html::parse_document(html)).unwrap();
        assert_eq!(description, "Build scrapers. Rust");
    }

    #[test]
    fn missing_description_is_extraction_error() {
        let err = extract_description(&Html::parse_document("<html></html>")).unwrap_err();
        assert!(matches!(err, FetchError::Extraction(_)));
    }
}
