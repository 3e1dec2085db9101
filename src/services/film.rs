// src/services/film.rs

//! Per-film scraping: the detail page plus the statistics and histogram documents.

use std::sync::Arc;

use scraper::Html;

use crate::error::Result;
use crate::models::{Film, FilmSummary, ScrapeMode, SiteConfig};
use crate::services::extract;
use crate::services::selectors::CompiledSelectors;
use crate::utils::http::{Fetcher, fetch_document};

/// Scrapes the documents belonging to one film.
pub struct FilmScraper {
    fetcher: Arc<dyn Fetcher>,
    selectors: Arc<CompiledSelectors>,
    site: SiteConfig,
    mode: ScrapeMode,
}

impl FilmScraper {
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        selectors: Arc<CompiledSelectors>,
        site: SiteConfig,
        mode: ScrapeMode,
    ) -> Self {
        Self {
            fetcher,
            selectors,
            site,
            mode,
        }
    }

    pub fn mode(&self) -> ScrapeMode {
        self.mode
    }

    /// Scrape one film.
    ///
    /// An unreachable detail page or a missing title fails the film. The
    /// secondary documents only ever degrade to zero counts.
    pub async fn scrape(&self, summary: FilmSummary) -> Result<Film> {
        let stats_url = self.site.stats_url(&summary.slug);
        let histogram_url = self.site.histogram_url(&summary.slug);

        let (detail, stats, histogram) = futures::join!(
            fetch_document(self.fetcher.as_ref(), &summary.film_url),
            self.secondary(&stats_url),
            async {
                if self.mode.wants_histogram() {
                    self.secondary(&histogram_url).await
                } else {
                    None
                }
            },
        );
        let detail = detail?;

        let details = extract::extract_details(
            &Html::parse_document(&detail),
            &self.selectors,
            &summary.film_url,
        )?;
        let stats = stats
            .map(|body| extract::extract_stats(&Html::parse_document(&body), &self.selectors))
            .unwrap_or_default();
        let histogram = histogram
            .map(|body| extract::extract_histogram(&Html::parse_document(&body), &self.selectors))
            .unwrap_or_default();

        log::debug!("Scraped film {} ({})", details.title, summary.slug);
        Ok(Film {
            summary,
            details,
            stats,
            histogram,
        })
    }

    async fn secondary(&self, url: &str) -> Option<String> {
        match fetch_document(self.fetcher.as_ref(), url).await {
            Ok(body) => Some(body),
            Err(error) => {
                log::debug!("Secondary document unavailable, counting zeros: {}", error);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{FilmStats, RatingHistogram, SiteSelectors};
    use crate::testing::{BASE, HISTOGRAM_TOTAL, StaticFetcher, detail_page, film_url};

    fn scraper(fetcher: StaticFetcher, mode: ScrapeMode) -> FilmScraper {
        FilmScraper::new(
            Arc::new(fetcher),
            Arc::new(CompiledSelectors::compile(&SiteSelectors::default()).unwrap()),
            SiteConfig::default(),
            mode,
        )
    }

    fn summary(slug: &str) -> FilmSummary {
        FilmSummary {
            film_url: film_url(slug),
            slug: slug.to_string(),
            owner_rating: Some(4.0),
        }
    }

    #[tokio::test]
    async fn test_scrape_full_film() {
        let scraper = scraper(
            StaticFetcher::new().with_film("heat-1995", "Heat"),
            ScrapeMode::Full,
        );
        let film = scraper.scrape(summary("heat-1995")).await.unwrap();
        assert_eq!(film.details.title, "Heat");
        assert_eq!(film.stats.watches, 1_234_567);
        assert_eq!(film.histogram.fans, 12_500);
        assert_eq!(film.histogram.total(), HISTOGRAM_TOTAL);
        assert_eq!(film.summary.owner_rating, Some(4.0));
    }

    #[tokio::test]
    async fn test_missing_secondary_documents_count_zero() {
        let fetcher = StaticFetcher::new().with_page(&film_url("heat-1995"), detail_page("Heat", &[]));
        let film = scraper(fetcher, ScrapeMode::Full)
            .scrape(summary("heat-1995"))
            .await
            .unwrap();
        assert_eq!(film.stats, FilmStats::default());
        assert_eq!(film.histogram, RatingHistogram::default());
        assert_eq!(film.details.director.as_deref(), Some("Michael Mann"));
    }

    #[tokio::test]
    async fn test_basic_mode_skips_histogram() {
        let fetcher = Arc::new(StaticFetcher::new().with_film("heat-1995", "Heat"));
        let scraper = FilmScraper::new(
            fetcher.clone(),
            Arc::new(CompiledSelectors::compile(&SiteSelectors::default()).unwrap()),
            SiteConfig::default(),
            ScrapeMode::Basic,
        );
        let film = scraper.scrape(summary("heat-1995")).await.unwrap();
        assert_eq!(film.histogram, RatingHistogram::default());
        assert_eq!(film.stats.likes, 432_100);
        assert!(
            !fetcher
                .requests()
                .contains(&format!("{BASE}csi/film/heat-1995/rating-histogram/"))
        );
    }

    #[tokio::test]
    async fn test_unreachable_detail_page_fails() {
        let fetcher =
            StaticFetcher::new().with_status(&film_url("heat-1995"), 503, "Service Unavailable");
        let err = scraper(fetcher, ScrapeMode::Full)
            .scrape(summary("heat-1995"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PageLoad { status: 503, .. }));
    }
}
