// src/models/film.rs

//! Typed per-film extraction results and their assembly into records.

use crate::models::record::{FieldValue, ItemRecord};
use crate::models::schema::{self, ScrapeMode};
use crate::utils::stars::all_glyphs;

/// What a listing page knows about one item before its detail page is fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct FilmSummary {
    /// Absolute URL of the film's detail page
    pub film_url: String,

    /// URL slug identifying the film (e.g. `heat-1995`)
    pub slug: String,

    /// The list owner's rating, when the listing shows one
    pub owner_rating: Option<f64>,
}

/// Original and spoken languages, which are extracted together.
#[derive(Debug, Clone, PartialEq)]
pub struct Languages {
    pub original: String,
    pub spoken: Vec<String>,
}

/// Fields read from the film's detail page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilmDetails {
    pub title: String,
    pub release_year: Option<i64>,
    pub director: Option<String>,
    pub genres: Option<Vec<String>>,
    pub average_rating: Option<f64>,
    pub runtime: Option<i64>,
    pub countries: Option<Vec<String>>,
    pub languages: Option<Languages>,
    pub cast: Option<Vec<String>>,
    pub studios: Option<Vec<String>>,
}

/// Counts from the statistics document. Unknown counts are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilmStats {
    pub watches: u64,
    pub list_appearances: u64,
    pub likes: u64,
}

/// Fans and per-half-star rating counts from the histogram document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingHistogram {
    pub fans: u64,
    /// Ratings per bucket, from ½ up to ★★★★★
    pub buckets: [u64; 10],
}

impl RatingHistogram {
    pub fn total(&self) -> u64 {
        self.buckets.iter().sum()
    }
}

/// Everything scraped for one film.
#[derive(Debug, Clone, PartialEq)]
pub struct Film {
    pub summary: FilmSummary,
    pub details: FilmDetails,
    pub stats: FilmStats,
    pub histogram: RatingHistogram,
}

impl Film {
    /// Assemble the output record in the column order of `mode`.
    pub fn to_record(&self, mode: ScrapeMode) -> ItemRecord {
        let details = &self.details;
        let (original_language, spoken_languages) = match &details.languages {
            Some(languages) => (
                FieldValue::Text(languages.original.clone()),
                FieldValue::List(languages.spoken.clone()),
            ),
            None => (FieldValue::Missing, FieldValue::Missing),
        };

        let mut record = ItemRecord::new();
        record.push(schema::FILM_TITLE, FieldValue::Text(details.title.clone()));
        record.push(schema::RELEASE_YEAR, details.release_year);
        record.push(schema::DIRECTOR, details.director.clone());
        record.push(schema::GENRES, details.genres.clone());
        record.push(schema::OWNER_RATING, self.summary.owner_rating);
        record.push(schema::AVERAGE_RATING, details.average_rating);
        record.push(schema::RUNTIME, details.runtime);

        match mode {
            ScrapeMode::Full => {
                record.push(schema::COUNTRIES, details.countries.clone());
                record.push(schema::ORIGINAL_LANGUAGE, original_language);
                record.push(schema::SPOKEN_LANGUAGES, spoken_languages);
                record.push(schema::CAST, details.cast.clone());
                record.push(schema::STUDIOS, details.studios.clone());
                record.push(schema::WATCHES, self.stats.watches);
                record.push(schema::LIST_APPEARANCES, self.stats.list_appearances);
                record.push(schema::LIKES, self.stats.likes);
                record.push(schema::FANS, self.histogram.fans);
                for (glyphs, count) in all_glyphs().zip(self.histogram.buckets) {
                    record.push(glyphs, count);
                }
                record.push(schema::TOTAL_RATINGS, self.histogram.total());
            }
            ScrapeMode::Basic => {
                record.push(schema::WATCHES, self.stats.watches);
                record.push(schema::LIST_APPEARANCES, self.stats.list_appearances);
                record.push(schema::LIKES, self.stats.likes);
                record.push(schema::COUNTRIES, details.countries.clone());
                record.push(schema::ORIGINAL_LANGUAGE, original_language);
                record.push(schema::SPOKEN_LANGUAGES, spoken_languages);
                record.push(schema::CAST, details.cast.clone());
                record.push(schema::STUDIOS, details.studios.clone());
            }
        }

        record.push(schema::FILM_URL, FieldValue::Text(self.summary.film_url.clone()));
        record
    }
}
