// src/models/schema.rs

//! Output column names and the per-mode column order.

use serde::{Deserialize, Serialize};

use crate::utils::stars::all_glyphs;

pub const FILM_TITLE: &str = "Film_title";
pub const RELEASE_YEAR: &str = "Release_year";
pub const DIRECTOR: &str = "Director";
pub const GENRES: &str = "Genres";
pub const OWNER_RATING: &str = "Owner_rating";
pub const AVERAGE_RATING: &str = "Average_rating";
pub const RUNTIME: &str = "Runtime";
pub const COUNTRIES: &str = "Countries";
pub const ORIGINAL_LANGUAGE: &str = "Original_language";
pub const SPOKEN_LANGUAGES: &str = "Spoken_languages";
pub const CAST: &str = "Cast";
pub const STUDIOS: &str = "Studios";
pub const WATCHES: &str = "Watches";
pub const LIST_APPEARANCES: &str = "List_appearances";
pub const LIKES: &str = "Likes";
pub const FANS: &str = "Fans";
pub const TOTAL_RATINGS: &str = "Total_ratings";
pub const FILM_URL: &str = "Film_URL";
pub const LIST_URL: &str = "List_URL";

/// Which field set a scrape produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeMode {
    /// Every field, including fans and the rating histogram
    #[default]
    Full,
    /// The older field subset; the histogram document is never fetched
    Basic,
}

impl ScrapeMode {
    /// Whether this mode needs the per-film rating histogram document.
    pub fn wants_histogram(self) -> bool {
        matches!(self, Self::Full)
    }

    /// Column order for this mode. `List_URL` is appended when concatenating.
    pub fn columns(self, concatenate: bool) -> Vec<&'static str> {
        let mut columns = match self {
            Self::Full => {
                let mut columns = vec![
                    FILM_TITLE,
                    RELEASE_YEAR,
                    DIRECTOR,
                    GENRES,
                    OWNER_RATING,
                    AVERAGE_RATING,
                    RUNTIME,
                    COUNTRIES,
                    ORIGINAL_LANGUAGE,
                    SPOKEN_LANGUAGES,
                    CAST,
                    STUDIOS,
                    WATCHES,
                    LIST_APPEARANCES,
                    LIKES,
                    FANS,
                ];
                columns.extend(all_glyphs());
                columns.extend([TOTAL_RATINGS, FILM_URL]);
                columns
            }
            Self::Basic => vec![
                FILM_TITLE,
                RELEASE_YEAR,
                DIRECTOR,
                GENRES,
                OWNER_RATING,
                AVERAGE_RATING,
                RUNTIME,
                WATCHES,
                LIST_APPEARANCES,
                LIKES,
                COUNTRIES,
                ORIGINAL_LANGUAGE,
                SPOKEN_LANGUAGES,
                CAST,
                STUDIOS,
                FILM_URL,
            ],
        };
        if concatenate {
            columns.push(LIST_URL);
        }
        columns
    }
}

impl std::str::FromStr for ScrapeMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "basic" => Ok(Self::Basic),
            other => Err(format!("unknown scrape mode '{other}' (expected full or basic)")),
        }
    }
}
