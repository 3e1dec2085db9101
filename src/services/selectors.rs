//! Compiled CSS selectors.
//!
//! Selector strings come from configuration and are parsed once per run.

use scraper::Selector;

use crate::error::{AppError, Result};
use crate::models::SiteSelectors;

/// Parsed counterpart of [`SiteSelectors`].
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub list_grid: Selector,
    pub roster_grid: Selector,
    pub grid_item: Selector,
    pub roster_placeholder: Selector,
    pub film_card: Selector,
    pub film_link_attr: String,
    pub owner_rating_attr: String,
    pub owner_rating_stars: Selector,
    pub next_page: Selector,
    pub title: Selector,
    pub metadata_script: Selector,
    pub director_meta: Selector,
    pub average_rating_meta: Selector,
    pub genres_panel: Selector,
    pub details_panel: Selector,
    pub cast_panel: Selector,
    pub anchor: Selector,
    pub runtime: Selector,
    pub watches: Selector,
    pub list_appearances: Selector,
    pub likes: Selector,
    pub fans: Selector,
    pub histogram_bar: Selector,
}

impl CompiledSelectors {
    /// Parse every configured selector.
    pub fn compile(site: &SiteSelectors) -> Result<Self> {
        Ok(Self {
            list_grid: parse_selector(&site.list_grid)?,
            roster_grid: parse_selector(&site.roster_grid)?,
            grid_item: parse_selector(&site.grid_item)?,
            roster_placeholder: parse_selector(&site.roster_placeholder)?,
            film_card: parse_selector(&site.film_card)?,
            film_link_attr: site.film_link_attr.clone(),
            owner_rating_attr: site.owner_rating_attr.clone(),
            owner_rating_stars: parse_selector(&site.owner_rating_stars)?,
            next_page: parse_selector(&site.next_page)?,
            title: parse_selector(&site.title)?,
            metadata_script: parse_selector(&site.metadata_script)?,
            director_meta: parse_selector(&site.director_meta)?,
            average_rating_meta: parse_selector(&site.average_rating_meta)?,
            genres_panel: parse_selector(&site.genres_panel)?,
            details_panel: parse_selector(&site.details_panel)?,
            cast_panel: parse_selector(&site.cast_panel)?,
            anchor: parse_selector("a")?,
            runtime: parse_selector(&site.runtime)?,
            watches: parse_selector(&site.watches)?,
            list_appearances: parse_selector(&site.list_appearances)?,
            likes: parse_selector(&site.likes)?,
            fans: parse_selector(&site.fans)?,
            histogram_bar: parse_selector(&site.histogram_bar)?,
        })
    }
}

/// Parse a CSS selector, mapping failures to [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
