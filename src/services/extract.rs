// src/services/extract.rs

//! Field extraction rules.
//!
//! Each optional field has its own small rule returning `Option<T>`, so one
//! broken piece of markup only ever blanks that one field. Only the film link
//! (on the listing) and the title (on the detail page) are required.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{FilmDetails, FilmStats, FilmSummary, Languages, RatingHistogram};
use crate::services::selectors::CompiledSelectors;
use crate::utils::stars::stars_to_value;
use crate::utils::{joined_digits, last_path_segment, normalize_whitespace, resolve_url};

const CAST_OVERFLOW: &str = "Show All…";

// --- Listing item ---

/// Read the film link and owner rating from one grid item.
pub fn extract_summary(
    item: ElementRef<'_>,
    selectors: &CompiledSelectors,
    base_url: &Url,
) -> Result<FilmSummary> {
    let link = item
        .select(&selectors.film_card)
        .find_map(|card| card.value().attr(&selectors.film_link_attr))
        .ok_or_else(|| AppError::extraction("list item", "no film link found"))?;

    let film_url = resolve_url(base_url, link);
    let slug = last_path_segment(&film_url)
        .ok_or_else(|| AppError::extraction(film_url.clone(), "film link has no slug"))?;

    Ok(FilmSummary {
        film_url,
        slug,
        owner_rating: owner_rating(item, selectors),
    })
}

/// Owner rating from the half-star attribute, falling back to the star glyphs.
fn owner_rating(item: ElementRef<'_>, selectors: &CompiledSelectors) -> Option<f64> {
    let attr = item
        .value()
        .attr(&selectors.owner_rating_attr)
        .and_then(|raw| raw.trim().parse::<u32>().ok());

    match attr {
        Some(0) => None,
        Some(halves) => Some(f64::from(halves) / 2.0),
        None => item
            .select(&selectors.owner_rating_stars)
            .last()
            .and_then(|span| stars_to_value(&span.text().collect::<String>())),
    }
}

// --- Detail document ---

/// Extract every detail-page field. Fails only when the title is absent.
pub fn extract_details(
    document: &Html,
    selectors: &CompiledSelectors,
    film_url: &str,
) -> Result<FilmDetails> {
    let title = title(document, selectors)
        .ok_or_else(|| AppError::extraction(film_url, "film title not found"))?;

    Ok(FilmDetails {
        title,
        release_year: release_year(document, selectors),
        director: director(document, selectors),
        genres: keyword_links(document, &selectors.genres_panel, &selectors.anchor, "genre"),
        average_rating: average_rating(document, selectors),
        runtime: runtime(document, selectors),
        countries: keyword_links(document, &selectors.details_panel, &selectors.anchor, "country"),
        languages: languages(document, selectors),
        cast: cast(document, selectors),
        studios: keyword_links(document, &selectors.details_panel, &selectors.anchor, "studio"),
    })
}

fn title(document: &Html, selectors: &CompiledSelectors) -> Option<String> {
    document
        .select(&selectors.title)
        .next()
        .map(|h1| normalize_whitespace(&h1.text().collect::<String>()))
        .filter(|t| !t.is_empty())
}

fn release_year(document: &Html, selectors: &CompiledSelectors) -> Option<i64> {
    static RELEASE_YEAR: OnceLock<Option<Regex>> = OnceLock::new();
    let re = RELEASE_YEAR
        .get_or_init(|| Regex::new(r#"releaseYear:\s*"?(\d+)"?"#).ok())
        .as_ref()?;

    document
        .select(&selectors.metadata_script)
        .find_map(|script| {
            let text: String = script.text().collect();
            re.captures(&text)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<i64>().ok())
        })
        .filter(|year| *year != 0)
}

fn meta_content<'a>(document: &'a Html, selector: &Selector) -> Option<&'a str> {
    document
        .select(selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
}

fn director(document: &Html, selectors: &CompiledSelectors) -> Option<String> {
    meta_content(document, &selectors.director_meta)
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

/// The first four characters of e.g. `"4.14 out of 5"`, read as a decimal.
fn average_rating(document: &Html, selectors: &CompiledSelectors) -> Option<f64> {
    let content = meta_content(document, &selectors.average_rating_meta)?;
    let head: String = content.chars().take(4).collect();
    head.trim().parse::<f64>().ok()
}

fn runtime(document: &Html, selectors: &CompiledSelectors) -> Option<i64> {
    let footer: String = document.select(&selectors.runtime).next()?.text().collect();
    crate::utils::digit_groups(&footer)
        .first()
        .and_then(|digits| digits.parse().ok())
}

/// Texts of the panel's anchors whose link target contains `keyword`.
///
/// `None` when the panel is absent or no anchor matches.
fn keyword_links(
    document: &Html,
    panel: &Selector,
    anchor: &Selector,
    keyword: &str,
) -> Option<Vec<String>> {
    let panel = document.select(panel).next()?;
    let links: Vec<String> = panel
        .select(anchor)
        .filter(|a| a.value().attr("href").is_some_and(|href| href.contains(keyword)))
        .map(|a| normalize_whitespace(&a.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .collect();
    (!links.is_empty()).then_some(links)
}

/// The first language is the original one; spoken languages are deduplicated in order.
fn languages(document: &Html, selectors: &CompiledSelectors) -> Option<Languages> {
    let all = keyword_links(document, &selectors.details_panel, &selectors.anchor, "language")?;
    let original = all.first()?.clone();

    let mut spoken: Vec<String> = Vec::with_capacity(all.len());
    for language in all {
        if !spoken.contains(&language) {
            spoken.push(language);
        }
    }
    Some(Languages { original, spoken })
}

fn cast(document: &Html, selectors: &CompiledSelectors) -> Option<Vec<String>> {
    let panel = document.select(&selectors.cast_panel).next()?;
    Some(
        panel
            .select(&selectors.anchor)
            .map(|a| normalize_whitespace(&a.text().collect::<String>()))
            .filter(|name| !name.is_empty() && name != CAST_OVERFLOW)
            .collect(),
    )
}

// --- Statistics document ---

/// Watch, list and like counts. Anything unreadable counts as zero.
pub fn extract_stats(document: &Html, selectors: &CompiledSelectors) -> FilmStats {
    FilmStats {
        watches: tooltip_count(document, &selectors.watches).unwrap_or(0),
        list_appearances: tooltip_count(document, &selectors.list_appearances).unwrap_or(0),
        likes: tooltip_count(document, &selectors.likes).unwrap_or(0),
    }
}

fn tooltip_count(document: &Html, selector: &Selector) -> Option<u64> {
    let element = document.select(selector).next()?;
    match element.value().attr("title") {
        Some(title) => joined_digits(title),
        None => joined_digits(&element.text().collect::<String>()),
    }
}

// --- Histogram document ---

/// Fan count and the ten rating buckets. Anything unreadable counts as zero.
pub fn extract_histogram(document: &Html, selectors: &CompiledSelectors) -> RatingHistogram {
    let fans = document
        .select(&selectors.fans)
        .next()
        .and_then(|a| parse_fan_count(&a.text().collect::<String>()))
        .unwrap_or(0);

    let mut buckets = [0_u64; 10];
    for (bucket, bar) in buckets.iter_mut().zip(document.select(&selectors.histogram_bar)) {
        *bucket = bucket_count(&bar.text().collect::<String>());
    }

    RatingHistogram { fans, buckets }
}

/// Ratings in one bar, e.g. `"1,169 half-★ ratings (0%)"` gives 1169.
///
/// The parenthesized share is not part of the count.
fn bucket_count(text: &str) -> u64 {
    let text = text.trim();
    let count = text.split('(').next().unwrap_or(text);
    joined_digits(count).unwrap_or(0)
}

/// Parse a fan count such as `"345 fans"`, `"12.5K fans"` or `"1.1M fans"`.
///
/// Abbreviated counts are multiplied out and truncated.
pub fn parse_fan_count(text: &str) -> Option<u64> {
    static FANS: OnceLock<Option<Regex>> = OnceLock::new();
    let re = FANS
        .get_or_init(|| Regex::new(r"(\d+(?:\.\d+)?)\s*([KkMm])?").ok())
        .as_ref()?;

    let cleaned = text.replace(',', "");
    let caps = re.captures(&cleaned)?;
    let number = caps.get(1)?.as_str();
    let multiplier = match caps.get(2).map(|m| m.as_str()) {
        Some("K" | "k") => 1_000.0,
        Some("M" | "m") => 1_000_000.0,
        _ => return number.parse().ok(),
    };
    let value: f64 = number.parse().ok()?;
    Some((value * multiplier).trunc() as u64)
}
