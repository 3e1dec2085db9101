// src/utils/stars.rs

//! Conversion between star glyph strings and numeric ratings.

/// Every rating the site can display, in half-star units paired with its glyphs.
const STAR_TABLE: [(u8, &str); 10] = [
    (1, "½"),
    (2, "★"),
    (3, "★½"),
    (4, "★★"),
    (5, "★★½"),
    (6, "★★★"),
    (7, "★★★½"),
    (8, "★★★★"),
    (9, "★★★★½"),
    (10, "★★★★★"),
];

/// Convert a glyph string such as `★★★½` into its rating (3.5).
pub fn stars_to_value(stars: &str) -> Option<f64> {
    STAR_TABLE
        .iter()
        .find(|(_, glyphs)| *glyphs == stars.trim())
        .map(|(halves, _)| f64::from(*halves) / 2.0)
}

/// Convert a rating such as 3.5 into its glyph string.
pub fn value_to_stars(value: f64) -> Option<&'static str> {
    let halves = value * 2.0;
    if halves.fract() != 0.0 {
        return None;
    }
    STAR_TABLE
        .iter()
        .find(|(h, _)| f64::from(*h) == halves)
        .map(|(_, glyphs)| *glyphs)
}

/// Glyph labels for every half-star step, lowest first.
pub fn all_glyphs() -> impl Iterator<Item = &'static str> {
    STAR_TABLE.iter().map(|(_, glyphs)| *glyphs)
}
