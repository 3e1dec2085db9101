// src/models/target.rs

//! Scrape targets and URL classification.

use std::fmt;

use url::Url;

use crate::error::{AppError, Result};
use crate::models::pages::PageSpec;

/// Person roles that have their own filmography roster on the site.
pub const ROLES: [&str; 30] = [
    "actor",
    "additional-directing",
    "additional-photography",
    "art-direction",
    "assistant-director",
    "camera-operator",
    "casting",
    "choreography",
    "cinematography",
    "co-director",
    "composer",
    "costume-design",
    "director",
    "editor",
    "executive-producer",
    "hairstyling",
    "lighting",
    "makeup",
    "original-writer",
    "producer",
    "production-design",
    "set-decoration",
    "songs",
    "sound",
    "special-effects",
    "story",
    "stunts",
    "title-design",
    "visual-effects",
    "writer",
];

/// The structural kind of a list URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// A member's curated list: `/<user>/list/<slug>/`
    List,
    /// A member's watchlist: `/<user>/watchlist/`
    Watchlist,
    /// A member's watched films: `/<user>/films/`
    UserFilms,
    /// A site-wide browse roster: `/films/<filter>/...`
    SiteFilms,
    /// A person's filmography in one role: `/<role>/<person>/`
    CastCrew,
}

/// How the item grid of a listing page is located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridRule {
    /// Poster list container used by member lists and browse pages
    PosterList,
    /// Poster grid container used by filmographies, padded with placeholders
    PosterGrid,
}

impl ListKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Watchlist => "watchlist",
            Self::UserFilms => "films",
            Self::SiteFilms => "site films",
            Self::CastCrew => "cast/crew",
        }
    }

    pub fn grid_rule(self) -> GridRule {
        match self {
            Self::CastCrew => GridRule::PosterGrid,
            _ => GridRule::PosterList,
        }
    }

    /// Rewrite a source URL into the URL whose pages carry the item grid.
    ///
    /// Site-wide browse pages render their grid through the `/films/ajax/` endpoint.
    pub fn scrape_url(self, source: &Url) -> String {
        match self {
            Self::SiteFilms => {
                let mut rewritten = source.clone();
                let path = source.path().replacen("/films/", "/films/ajax/", 1);
                rewritten.set_path(&path);
                rewritten.to_string()
            }
            _ => source.to_string(),
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of inspecting a list URL's path segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlClass {
    pub kind: ListKind,
    pub owner: String,
    /// Name derived from the URL, used as the default output name
    pub list_name: String,
    /// The URL normalized to end with a slash
    pub url: Url,
}

impl UrlClass {
    /// Classify a list URL by the structure of its path.
    pub fn classify(raw: &str) -> Result<Self> {
        let mut url = Url::parse(raw.trim()).map_err(|e| AppError::invalid_url(raw, e))?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(AppError::invalid_url(raw, "expected an http(s) URL"));
        }

        let segments: Vec<String> = url
            .path_segments()
            .map(|segments| {
                segments
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url.set_query(None);
        url.set_fragment(None);

        let segment = |i: usize| segments.get(i).map(String::as_str);
        let extras = |from: usize| -> String {
            segments
                .get(from..)
                .filter(|rest| !rest.is_empty())
                .map(|rest| format!("-{}", rest.join("-")))
                .unwrap_or_default()
        };

        let class = match (segment(0), segment(1)) {
            (Some(user), Some("list")) => {
                let slug = segment(2)
                    .ok_or_else(|| AppError::invalid_url(raw, "list URL has no list name"))?;
                Self {
                    kind: ListKind::List,
                    owner: user.to_string(),
                    list_name: format!("{slug}{}", extras(3)),
                    url,
                }
            }
            (Some(user), Some("watchlist")) => Self {
                kind: ListKind::Watchlist,
                owner: user.to_string(),
                list_name: format!("{}-watchlist{}", user.to_lowercase(), extras(2)),
                url,
            },
            (Some(user), Some("films")) if user != "films" => Self {
                kind: ListKind::UserFilms,
                owner: user.to_string(),
                list_name: format!("{}-films{}", user.to_lowercase(), extras(2)),
                url,
            },
            (Some("films"), Some(_)) => Self {
                kind: ListKind::SiteFilms,
                owner: "Letterboxd".to_string(),
                list_name: format!("LBfilms{}", extras(1)),
                url,
            },
            (Some(role), Some(person)) if ROLES.contains(&role) => Self {
                kind: ListKind::CastCrew,
                owner: "Letterboxd".to_string(),
                list_name: format!("{role}-{person}-films"),
                url,
            },
            _ => {
                return Err(AppError::invalid_url(
                    raw,
                    "not a list, watchlist, films page or cast/crew page",
                ));
            }
        };
        Ok(class)
    }
}

/// One target exactly as the user supplied it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTarget {
    pub url: String,
    pub pages: Option<String>,
    pub output_name: Option<String>,
}

impl RawTarget {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_pages(mut self, pages: impl Into<String>) -> Self {
        self.pages = Some(pages.into());
        self
    }

    pub fn with_output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self
    }
}

/// A validated, immutable scrape target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTarget {
    /// Normalized source URL as given by the user
    pub url: String,
    /// URL whose pages are actually fetched
    pub scrape_url: String,
    pub kind: ListKind,
    pub owner: String,
    pub list_name: String,
    /// Output file name including extension
    pub output_name: String,
    pub pages: PageSpec,
}

impl ListTarget {
    /// URL of one explicitly selected page.
    pub fn page_url(&self, page: u32) -> String {
        format!("{}page/{page}/", self.scrape_url)
    }
}
