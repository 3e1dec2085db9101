// src/services/list.rs

//! Drives the page scraper across the pages of one target.

use std::collections::HashSet;
use std::time::Duration;

use crate::error::Result;
use crate::models::{ListTarget, PageSpec, ScrapeOutcome};
use crate::services::page::{PageOutcome, PageScraper};

/// Scrapes every selected page of a target, one page at a time.
pub struct ListScraper {
    pages: PageScraper,
    delay: Duration,
}

impl ListScraper {
    pub fn new(pages: PageScraper, delay: Duration) -> Self {
        Self { pages, delay }
    }

    /// Scrape a target's pages in order.
    ///
    /// With [`PageSpec::All`] the "next" links are followed from the first
    /// page and any page failure aborts the target. With an explicit page
    /// set a failed page is logged and skipped. `tag` adds the target's
    /// source URL to every record.
    pub async fn scrape(&self, target: &ListTarget, tag: bool) -> Result<ScrapeOutcome> {
        let list_url = tag.then_some(target.url.as_str());
        let mut outcome = ScrapeOutcome::default();

        match &target.pages {
            PageSpec::All => {
                let mut visited = HashSet::new();
                let mut next = Some(target.scrape_url.clone());
                while let Some(url) = next.take() {
                    if !visited.insert(url.clone()) {
                        log::warn!("Pagination of {} loops back to {}, stopping", target.url, url);
                        break;
                    }
                    if visited.len() > 1 {
                        self.pause().await;
                    }
                    let page = self.pages.scrape_page(&url, target.kind, list_url).await?;
                    next = page.next_page.clone();
                    absorb(&mut outcome, page);
                }
            }
            PageSpec::Pages(numbers) => {
                for (i, number) in numbers.iter().enumerate() {
                    if i > 0 {
                        self.pause().await;
                    }
                    let url = target.page_url(*number);
                    match self.pages.scrape_page(&url, target.kind, list_url).await {
                        Ok(page) => absorb(&mut outcome, page),
                        Err(error) => {
                            outcome.pages_failed += 1;
                            log::warn!("Skipping page {} of {}: {}", number, target.url, error);
                        }
                    }
                }
            }
        }

        log::debug!(
            "{}: {} records from {} pages",
            target.url,
            outcome.len(),
            outcome.pages_scraped
        );
        Ok(outcome)
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

fn absorb(outcome: &mut ScrapeOutcome, page: PageOutcome) {
    outcome.pages_scraped += 1;
    outcome.items_failed += page.items_failed;
    outcome.records.extend(page.records);
}
