//! Test doubles and HTML fixtures shared by the unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::ItemRecord;
use crate::storage::{RecordSink, WriteSummary};
use crate::utils::http::{FetchedPage, Fetcher};

pub const BASE: &str = "https://letterboxd.com/";

/// In-memory [`Fetcher`] answering from a URL table; unknown URLs are 404s.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, FetchedPage>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: &str, body: impl Into<String>) -> Self {
        self.with_status(url, 200, body)
    }

    pub fn with_status(mut self, url: &str, status: u16, body: impl Into<String>) -> Self {
        self.pages.insert(
            url.to_string(),
            FetchedPage {
                status,
                body: body.into(),
            },
        );
        self
    }

    /// Register a film's detail, statistics and histogram documents.
    pub fn with_film(self, slug: &str, title: &str) -> Self {
        self.with_page(&film_url(slug), detail_page(title, &[]))
            .with_page(&format!("{BASE}csi/film/{slug}/stats/"), STATS_PAGE)
            .with_page(
                &format!("{BASE}csi/film/{slug}/rating-histogram/"),
                HISTOGRAM_PAGE,
            )
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
        Ok(self.pages.get(url).cloned().unwrap_or(FetchedPage {
            status: 404,
            body: String::new(),
        }))
    }
}

/// Sink that keeps every write in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub writes: Mutex<Vec<(String, Vec<ItemRecord>)>>,
}

impl MemorySink {
    pub fn written(&self) -> Vec<(String, Vec<ItemRecord>)> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn write(&self, records: &[ItemRecord], name: &str) -> Result<WriteSummary> {
        let mut writes = self
            .writes
            .lock()
            .map_err(|_| AppError::validation("sink lock poisoned"))?;
        writes.push((name.to_string(), records.to_vec()));
        Ok(WriteSummary {
            location: name.to_string(),
            record_count: records.len(),
        })
    }
}

pub fn film_url(slug: &str) -> String {
    format!("{BASE}film/{slug}/")
}

/// One poster-list item linking to `slug`.
pub fn list_item(slug: &str, owner_rating: Option<u8>) -> String {
    let rating = owner_rating
        .map(|r| format!(r#" data-owner-rating="{r}""#))
        .unwrap_or_default();
    format!(
        r#"<li class="poster-container"{rating}><div class="film-poster" data-target-link="/film/{slug}/"><img alt="{slug}"/></div></li>"#
    )
}

/// A user-films item showing the owner's rating as glyphs.
pub fn rated_item(slug: &str, stars: &str) -> String {
    format!(
        r#"<li class="poster-container"><div class="film-poster" data-target-link="/film/{slug}/"></div><p class="poster-viewingdata"><span class="rating">{stars}</span></p></li>"#
    )
}

/// A listing page with a poster list and an optional "next" link.
pub fn list_page(items: &[String], next: Option<&str>) -> String {
    let next = next
        .map(|href| format!(r#"<div class="pagination"><a class="next" href="{href}">Older</a></div>"#))
        .unwrap_or_default();
    format!(
        r#"<html><body><section><ul class="poster-list -p125 -grid">{}</ul></section>{next}</body></html>"#,
        items.concat()
    )
}

/// A filmography page padded with placeholder items.
pub fn roster_page(items: &[String], placeholders: usize) -> String {
    let padding = r#"<li class="poster-container placeholder"><div class="poster"></div></li>"#
        .repeat(placeholders);
    format!(
        r#"<html><body><div class="poster-grid"><ul>{}{padding}</ul></div></body></html>"#,
        items.concat()
    )
}

/// Optional detail page sections, keyed so that tests can drop exactly one of them.
/// `"details"` additionally removes the whole details panel.
pub const DETAIL_SECTIONS: [&str; 9] = [
    "year", "director", "rating", "genres", "runtime", "countries", "languages", "cast",
    "studios",
];

/// A film detail page; sections named in `omit` are left out.
pub fn detail_page(title: &str, omit: &[&str]) -> String {
    let keep = |name: &str| !omit.contains(&name);
    let mut head = String::new();
    let mut body = String::new();

    if keep("director") {
        head.push_str(r#"<meta name="twitter:data1" content="Michael Mann" />"#);
    }
    if keep("rating") {
        head.push_str(r#"<meta name="twitter:data2" content="4.14 out of 5" />"#);
    }
    if keep("year") {
        body.push_str(
            r#"<script type="text/javascript">var filmData = { id: 51, name: "Heat", releaseYear: "1995", runTime: 170 };</script>"#,
        );
    }
    body.push_str(&format!(r#"<div class="col-17"><h1 class="headline-1">{title}</h1></div>"#));
    if keep("cast") {
        body.push_str(
            r##"<div id="tab-cast"><p><a href="/actor/al-pacino/" class="text-slug">Al Pacino</a><a href="/actor/robert-de-niro/" class="text-slug">Robert De Niro</a><a href="#" id="has-cast-overflow">Show All…</a></p></div>"##,
        );
    }
    if keep("genres") {
        body.push_str(
            r#"<div id="tab-genres"><div class="text-sluglist capitalize"><p><a href="/films/genre/crime/" class="text-slug">Crime</a><a href="/films/genre/drama/" class="text-slug">Drama</a></p></div><div class="text-sluglist"><p><a href="/films/theme/heists/" class="text-slug">Heists</a></p></div></div>"#,
        );
    }
    if keep("details") {
        body.push_str(r#"<div id="tab-details">"#);
        if keep("studios") {
            body.push_str(
                r#"<h3>Studios</h3><p><a href="/studio/regency-enterprises/" class="text-slug">Regency Enterprises</a><a href="/studio/forward-pass/" class="text-slug">Forward Pass</a></p>"#,
            );
        }
        if keep("countries") {
            body.push_str(
                r#"<h3>Country</h3><p><a href="/films/country/usa/" class="text-slug">USA</a></p>"#,
            );
        }
        if keep("languages") {
            body.push_str(
                r#"<h3>Language</h3><p><a href="/films/language/english/" class="text-slug">English</a></p><h3>Spoken Languages</h3><p><a href="/films/language/english/" class="text-slug">English</a><a href="/films/language/spanish/" class="text-slug">Spanish</a><a href="/films/language/old-norse/" class="text-slug">Old&nbsp;Norse</a></p>"#,
            );
        }
        body.push_str("</div>");
    }
    if keep("runtime") {
        body.push_str(
            r#"<p class="text-link text-footer">170&nbsp;mins &nbsp; More at <a href="https://www.imdb.com/title/tt0113277/">IMDb</a></p>"#,
        );
    }

    format!("<html><head>{head}</head><body>{body}</body></html>")
}

pub const STATS_PAGE: &str = r#"<ul class="film-stats">
<li class="filmstat-watches"><a href="/film/heat-1995/members/" class="has-icon icon-watched icon-16 tooltip" title="Watched by 1,234,567 members">1.2M</a></li>
<li class="filmstat-lists"><a href="/film/heat-1995/lists/" class="has-icon icon-list icon-16 tooltip" title="Appears in 98,765 lists">98K</a></li>
<li class="filmstat-likes"><a href="/film/heat-1995/likes/" class="has-icon icon-like icon-liked icon-16 tooltip" title="Liked by 432,100 members">432K</a></li>
</ul>"#;

pub const HISTOGRAM_PAGE: &str = r#"<section class="ratings-histogram-chart">
<a href="/film/heat-1995/fans/" class="all-link more-link">12.5K fans</a>
<div class="rating-histogram"><ul>
<li class="rating-histogram-bar"><a class="ir tooltip" title="1,169 half-★ ratings (0%)">1,169 half-★ ratings (0%)</a></li>
<li class="rating-histogram-bar"><a class="ir tooltip">2,000 ★ ratings (1%)</a></li>
<li class="rating-histogram-bar"><a class="ir tooltip">1,500 ★½ ratings (1%)</a></li>
<li class="rating-histogram-bar"><a class="ir tooltip">6,000 ★★ ratings (2%)</a></li>
<li class="rating-histogram-bar"><a class="ir tooltip">7,000 ★★½ ratings (3%)</a></li>
<li class="rating-histogram-bar"><a class="ir tooltip">30,000 ★★★ ratings (10%)</a></li>
<li class="rating-histogram-bar"><a class="ir tooltip">40,000 ★★★½ ratings (14%)</a></li>
<li class="rating-histogram-bar"><a class="ir tooltip">90,000 ★★★★ ratings (31%)</a></li>
<li class="rating-histogram-bar"><a class="ir tooltip">45,000 ★★★★½ ratings (16%)</a></li>
<li class="rating-histogram-bar"><a class="ir tooltip">60,331 ★★★★★ ratings (21%)</a></li>
</ul></div></section>"#;

/// Sum of the bucket counts in [`HISTOGRAM_PAGE`].
pub const HISTOGRAM_TOTAL: u64 = 283_000;
