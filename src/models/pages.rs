// src/models/pages.rs

//! Page selection syntax.
//!
//! ```text
//! *        all pages (follow "next" links)
//! 3        page 3
//! 1,3,5    pages 1, 3 and 5
//! 1~3      pages 1 to 3
//! <3       pages 1 and 2
//! 0~2      pages 1 and 2 (numbering starts at 1)
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, Result};

/// Which pages of a list should be scraped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSpec {
    /// Every page, discovered by following "next" links
    #[default]
    All,
    /// An explicit ascending, deduplicated set of page indices (all >= 1)
    Pages(Vec<u32>),
}

impl PageSpec {
    /// Parse a page selection string.
    pub fn parse(spec: &str) -> Result<Self> {
        if spec == "*" {
            return Ok(Self::All);
        }
        if spec.is_empty() {
            return Err(AppError::invalid_pages(spec, "empty selection"));
        }

        let mut pages = BTreeSet::new();
        for chunk in spec.split(',') {
            parse_chunk(spec, chunk, &mut pages)?;
        }

        if pages.is_empty() {
            return Err(AppError::invalid_pages(spec, "selection contains no pages"));
        }
        Ok(Self::Pages(pages.into_iter().collect()))
    }

    /// Whether every page should be scraped.
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// The explicit page indices, if any.
    pub fn pages(&self) -> Option<&[u32]> {
        match self {
            Self::All => None,
            Self::Pages(pages) => Some(pages),
        }
    }
}

impl FromStr for PageSpec {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Canonical form: `*` or the ascending indices joined by commas.
impl fmt::Display for PageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("*"),
            Self::Pages(pages) => {
                let joined: Vec<String> = pages.iter().map(u32::to_string).collect();
                f.write_str(&joined.join(","))
            }
        }
    }
}

fn parse_chunk(spec: &str, chunk: &str, pages: &mut BTreeSet<u32>) -> Result<()> {
    if let Some((start, end)) = chunk.split_once('~') {
        let start = parse_index(spec, start)?;
        let end = parse_index(spec, end)?;
        if start > end {
            return Err(AppError::invalid_pages(
                spec,
                format!("range '{chunk}' is descending"),
            ));
        }
        pages.extend(start.max(1)..=end);
        return Ok(());
    }

    if let Some(bound) = chunk.strip_prefix('<') {
        let bound = parse_index(spec, bound)?;
        pages.extend(1..bound);
        return Ok(());
    }

    match parse_index(spec, chunk)? {
        0 => Err(AppError::invalid_pages(spec, "page numbering starts at 1")),
        page => {
            pages.insert(page);
            Ok(())
        }
    }
}

fn parse_index(spec: &str, raw: &str) -> Result<u32> {
    raw.parse::<u32>()
        .map_err(|_| AppError::invalid_pages(spec, format!("'{raw}' is not a page number")))
}
