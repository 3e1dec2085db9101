// src/services/page.rs

//! Listing page scraper.

use std::sync::Arc;

use scraper::{ElementRef, Html};
use url::Url;

use crate::error::Result;
use crate::models::{FieldValue, FilmSummary, GridRule, ItemRecord, ListKind, schema};
use crate::services::extract::extract_summary;
use crate::services::film::FilmScraper;
use crate::services::selectors::CompiledSelectors;
use crate::utils::http::{Fetcher, fetch_document};
use crate::utils::resolve_url;

/// Records from one listing page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageOutcome {
    pub records: Vec<ItemRecord>,
    /// Absolute URL of the following page, if the page links one
    pub next_page: Option<String>,
    pub items_failed: usize,
}

impl PageOutcome {
    pub fn has_next_page(&self) -> bool {
        self.next_page.is_some()
    }
}

/// Grid items and pagination read from a listing document.
struct Listing {
    items: Vec<Result<FilmSummary>>,
    next_page: Option<String>,
}

/// Scrapes one listing page and every film on it.
pub struct PageScraper {
    fetcher: Arc<dyn Fetcher>,
    selectors: Arc<CompiledSelectors>,
    films: FilmScraper,
    base_url: Url,
}

impl PageScraper {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        selectors: Arc<CompiledSelectors>,
        films: FilmScraper,
        base_url: Url,
    ) -> Self {
        Self {
            fetcher,
            selectors,
            films,
            base_url,
        }
    }

    /// Scrape one listing page.
    ///
    /// When `list_url` is given every record is tagged with it. Items whose
    /// film cannot be scraped are logged and counted, not returned.
    pub async fn scrape_page(
        &self,
        page_url: &str,
        kind: ListKind,
        list_url: Option<&str>,
    ) -> Result<PageOutcome> {
        let body = fetch_document(self.fetcher.as_ref(), page_url).await?;
        let listing = self.parse_listing(&body, page_url, kind);

        let mut outcome = PageOutcome {
            next_page: listing.next_page,
            ..PageOutcome::default()
        };

        for item in listing.items {
            let film = match item {
                Ok(summary) => self.films.scrape(summary).await,
                Err(error) => Err(error),
            };
            match film {
                Ok(film) => {
                    let mut record = film.to_record(self.films.mode());
                    if let Some(list_url) = list_url {
                        record.push(schema::LIST_URL, FieldValue::Text(list_url.to_string()));
                    }
                    outcome.records.push(record);
                }
                Err(error) => {
                    outcome.items_failed += 1;
                    log::warn!("Skipping item on {}: {}", page_url, error);
                }
            }
        }

        log::debug!(
            "Page {}: {} items, {} skipped, next page: {}",
            page_url,
            outcome.records.len(),
            outcome.items_failed,
            outcome.next_page.as_deref().unwrap_or("none")
        );
        Ok(outcome)
    }

    fn parse_listing(&self, body: &str, page_url: &str, kind: ListKind) -> Listing {
        let document = Html::parse_document(body);
        let sel = &self.selectors;
        let page_base = Url::parse(page_url).unwrap_or_else(|_| self.base_url.clone());

        let next_page = document
            .select(&sel.next_page)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| resolve_url(&page_base, href));

        let grid = match kind.grid_rule() {
            GridRule::PosterList => document.select(&sel.list_grid).next(),
            GridRule::PosterGrid => document.select(&sel.roster_grid).next(),
        };
        let Some(grid) = grid else {
            log::debug!("No item grid on {}", page_url);
            return Listing {
                items: Vec::new(),
                next_page,
            };
        };

        let items = grid
            .select(&sel.grid_item)
            .take_while(|item| kind != ListKind::CastCrew || !self.is_placeholder(*item))
            .map(|item| extract_summary(item, sel, &self.base_url))
            .collect();

        Listing { items, next_page }
    }

    /// Filmography grids are padded with placeholder items after the last film.
    fn is_placeholder(&self, item: ElementRef<'_>) -> bool {
        let placeholder = &self.selectors.roster_placeholder;
        placeholder.matches(&item) || item.select(placeholder).next().is_some()
    }
}
