//! Page-level orchestration: parse, select containers, extract, stamp.

use std::fmt::Display;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use gather_common::{GatherError, Result};
use scraper::Html;
use tracing::{info, warn};
use url::Url;

use crate::capture::PageSource;
use crate::dom::{DomQuery, Marker};
use crate::extract::extract_named;
use crate::model::{ScrapeReport, ScrapeResult};

/// Parse `html` and turn every event container into a record.
///
/// A page without containers yields an empty result, never an error; a
/// changed layout looks the same as an empty listing from here.
pub fn scrape_document(html: &str, scraped_at: impl Into<String>) -> ScrapeReport {
    let document = Html::parse_document(html);
    let containers = document.root_element().find_all(Marker::EventContainer);

    if containers.is_empty() {
        warn!(
            target: "gather.scrape",
            "no event containers found; the page might not have loaded properly"
        );
    }

    let events = extract_named(&containers);
    info!(
        target: "gather.scrape",
        containers = containers.len(),
        events = events.len(),
        "scraped {} events",
        events.len()
    );
    if let Some(first) = events.first() {
        info!(target: "gather.scrape", name = %first.name, date = %first.date, location = %first.location, "first event");
    }

    ScrapeReport {
        container_count: containers.len(),
        result: ScrapeResult {
            scraped_at: scraped_at.into(),
            events,
        },
    }
}

/// `strftime`-style formatter for `scraped_at`.
#[derive(Debug, Clone)]
pub struct Timestamp {
    pattern: String,
}

impl Timestamp {
    /// Validate `pattern` up front so formatting can't fail later.
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use gather_events::Timestamp;
    ///
    /// let stamp = Timestamp::new("%I:%M %p on %A, %B %-d, %Y").unwrap();
    /// let at = Utc.with_ymd_and_hms(2025, 5, 27, 9, 9, 0).unwrap();
    /// assert_eq!(stamp.format(&at), "09:09 AM on Tuesday, May 27, 2025");
    /// ```
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if pattern.trim().is_empty()
            || StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error))
        {
            return Err(GatherError::Config(format!(
                "invalid timestamp pattern `{pattern}`"
            )));
        }
        Ok(Self { pattern })
    }

    pub fn format<Tz>(&self, at: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        at.format(&self.pattern).to_string()
    }
}

/// Capture a page from a [`PageSource`] and scrape it.
pub struct Scraper<S> {
    source: S,
    stamp: Timestamp,
}

impl<S: PageSource> Scraper<S> {
    pub fn new(source: S, stamp: Timestamp) -> Self {
        Self { source, stamp }
    }

    /// One pass: capture `url`, extract events, stamp with the capture time
    /// in the local timezone.
    pub async fn run(&self, url: &Url) -> Result<ScrapeReport> {
        let capture = self.source.capture(url).await?;
        let scraped_at = self.stamp.format(&capture.captured_at.with_timezone(&Local));
        Ok(scrape_document(&capture.html, scraped_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn empty_page_is_not_an_error() {
        let report = scrape_document("<html><body><p>Nothing here</p></body></html>", "now");
        assert!(report.found_no_containers());
        assert!(report.result.events.is_empty());
        assert_eq!(report.result.scraped_at, "now");
    }

    #[test]
    fn nameless_containers_are_counted_but_dropped() {
        let report = scrape_document(
            r#"<div data-event-id="1"><time>Today</time></div>"#,
            "now",
        );
        assert_eq!(report.container_count, 1);
        assert!(!report.found_no_containers());
        assert!(report.result.events.is_empty());
    }

    #[test]
    fn formats_like_the_listing_header() {
        let hkt = FixedOffset::east_opt(8 * 3600).unwrap();
        let at = hkt.with_ymd_and_hms(2025, 5, 27, 17, 9, 0).unwrap();
        let stamp = Timestamp::new("%I:%M %p UTC%:z on %A, %B %-d, %Y").unwrap();
        assert_eq!(stamp.format(&at), "05:09 PM UTC+08:00 on Tuesday, May 27, 2025");
    }

    #[test]
    fn rejects_bad_patterns() {
        assert!(Timestamp::new("").is_err());
        assert!(Timestamp::new("%Q").is_err());
    }
}
