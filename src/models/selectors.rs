// src/models/selectors.rs

//! CSS selectors for scraping listing, detail, statistics and histogram pages.

use serde::{Deserialize, Serialize};

/// CSS selectors used against the site's markup.
///
/// The upstream markup is not under our control, so every selector can be
/// overridden from the `[selectors]` table of the configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SiteSelectors {
    /// Item grid on member lists and browse pages
    pub list_grid: String,

    /// Item grid on cast/crew filmography pages
    pub roster_grid: String,

    /// Each item inside a grid
    pub grid_item: String,

    /// Padding element marking the end of a filmography grid
    pub roster_placeholder: String,

    /// Element carrying the film link attribute inside an item
    pub film_card: String,

    /// Attribute holding the film's relative link
    pub film_link_attr: String,

    /// Attribute holding the owner's rating in half-star units
    pub owner_rating_attr: String,

    /// Elements whose last match holds the owner's rating as star glyphs
    pub owner_rating_stars: String,

    /// "Next page" navigation anchor
    pub next_page: String,

    /// Film title heading on the detail page
    pub title: String,

    /// Scripts embedding page metadata such as the release year
    pub metadata_script: String,

    /// Meta tag with the director
    pub director_meta: String,

    /// Meta tag with the average rating
    pub average_rating_meta: String,

    /// Panel holding genre links
    pub genres_panel: String,

    /// Panel holding country, language and studio links
    pub details_panel: String,

    /// Panel holding cast links
    pub cast_panel: String,

    /// Footer paragraph containing the runtime
    pub runtime: String,

    /// Statistics tooltips
    pub watches: String,
    pub list_appearances: String,
    pub likes: String,

    /// Fan count link on the histogram document
    pub fans: String,

    /// Histogram bars, lowest rating first
    pub histogram_bar: String,
}

impl Default for SiteSelectors {
    fn default() -> Self {
        Self {
            list_grid: "ul.poster-list".to_string(),
            roster_grid: "div.poster-grid".to_string(),
            grid_item: "li".to_string(),
            roster_placeholder: ".placeholder".to_string(),
            film_card: "div[data-target-link]".to_string(),
            film_link_attr: "data-target-link".to_string(),
            owner_rating_attr: "data-owner-rating".to_string(),
            owner_rating_stars: "span".to_string(),
            next_page: "a.next".to_string(),
            title: "div.col-17 h1".to_string(),
            metadata_script: "script".to_string(),
            director_meta: r#"meta[name="twitter:data1"]"#.to_string(),
            average_rating_meta: r#"meta[name="twitter:data2"]"#.to_string(),
            genres_panel: "#tab-genres".to_string(),
            details_panel: "#tab-details".to_string(),
            cast_panel: "#tab-cast".to_string(),
            runtime: "p.text-link.text-footer".to_string(),
            watches: "a.icon-watched".to_string(),
            list_appearances: "a.icon-list".to_string(),
            likes: "a.icon-liked".to_string(),
            fans: "a.all-link.more-link".to_string(),
            histogram_bar: "li.rating-histogram-bar".to_string(),
        }
    }
}
