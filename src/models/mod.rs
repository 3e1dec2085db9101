// src/models/mod.rs

//! Domain models for the list scraper.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod film;
mod pages;
mod record;
pub mod schema;
mod selectors;
mod target;

// Re-export all public types
pub use config::{Config, CrawlerConfig, OutputConfig, OutputFormat, SiteConfig};
pub use film::{Film, FilmDetails, FilmStats, FilmSummary, Languages, RatingHistogram};
pub use pages::PageSpec;
pub use record::{FieldValue, ItemRecord};
pub use schema::ScrapeMode;
pub use selectors::SiteSelectors;
pub use target::{GridRule, ListKind, ListTarget, ROLES, RawTarget, UrlClass};

/// Records scraped for one target, with page and item counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapeOutcome {
    pub records: Vec<ItemRecord>,
    pub pages_scraped: usize,
    pub pages_failed: usize,
    pub items_failed: usize,
}

impl ScrapeOutcome {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
