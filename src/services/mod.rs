//! Service layer for the list scraper.
//!
//! This module contains the scraping logic, leaves first:
//! - Field extraction rules (`extract`)
//! - Per-film scraping (`FilmScraper`)
//! - Listing page scraping (`PageScraper`)
//! - Multi-page list scraping (`ListScraper`)

pub mod extract;
mod film;
mod list;
mod page;
mod selectors;

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::error::Result;
use crate::models::Config;
use crate::utils::http::Fetcher;

pub use film::FilmScraper;
pub use list::ListScraper;
pub use page::{PageOutcome, PageScraper};
pub use selectors::{CompiledSelectors, parse_selector};

impl ListScraper {
    /// Assemble the scraper stack from configuration.
    pub fn from_config(config: &Config, fetcher: Arc<dyn Fetcher>) -> Result<Self> {
        let selectors = Arc::new(CompiledSelectors::compile(&config.selectors)?);
        let base_url = Url::parse(&config.site.base_url)?;
        let films = FilmScraper::new(
            Arc::clone(&fetcher),
            Arc::clone(&selectors),
            config.site.clone(),
            config.output.mode,
        );
        let pages = PageScraper::new(fetcher, selectors, films, base_url);
        Ok(Self::new(
            pages,
            Duration::from_millis(config.crawler.request_delay_ms),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::testing::StaticFetcher;

    #[test]
    fn test_from_config() {
        let fetcher: Arc<dyn Fetcher> = Arc::new(StaticFetcher::new());
        assert!(ListScraper::from_config(&Config::default(), Arc::clone(&fetcher)).is_ok());

        let mut config = Config::default();
        config.selectors.title = "h1[".into();
        assert!(matches!(
            ListScraper::from_config(&config, fetcher),
            Err(AppError::Selector { .. })
        ));
    }
}
