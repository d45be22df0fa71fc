//! Event listing acquisition and extraction.
//!
//! - Typed selector markers and the [`dom::DomQuery`] capability (`dom`)
//! - Per-container Event Extractor (`extract`)
//! - Page orchestration and timestamping (`scrape`)
//! - Page sources: live browser or saved HTML (`capture`)
//! - JSON snapshot output (`output`)

pub mod capture;
pub mod dom;
pub mod extract;
pub mod model;
pub mod output;
pub mod scrape;

pub use capture::{BrowserSession, BrowserSource, FileSource, PageCapture, PageSource};
pub use model::{EventRecord, ScrapeReport, ScrapeResult};
pub use scrape::{Scraper, Timestamp, scrape_document};
