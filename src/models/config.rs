//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::schema::ScrapeMode;
use crate::models::selectors::SiteSelectors;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and scraping behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Site addresses
    #[serde(default)]
    pub site: SiteConfig,

    /// Output location and shape
    #[serde(default)]
    pub output: OutputConfig,

    /// CSS selectors for the site's markup
    #[serde(default)]
    pub selectors: SiteSelectors,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == Some(0) {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::validation("crawler.max_concurrent must be > 0"));
        }
        let base = Url::parse(&self.site.base_url)
            .map_err(|e| AppError::validation(format!("site.base_url is invalid: {e}")))?;
        if !base.path().ends_with('/') {
            return Err(AppError::validation("site.base_url must end with '/'"));
        }
        for (key, template) in [
            ("site.stats_path", &self.site.stats_path),
            ("site.histogram_path", &self.site.histogram_path),
        ] {
            if !template.contains("{slug}") {
                return Err(AppError::validation(format!(
                    "{key} must contain a {{slug}} placeholder"
                )));
            }
        }
        if self.output.dir.trim().is_empty() {
            return Err(AppError::validation("output.dir is empty"));
        }
        Ok(())
    }
}

/// HTTP client and scraping behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds; requests wait indefinitely when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Delay between page fetches of one list in milliseconds
    #[serde(default)]
    pub request_delay_ms: u64,

    /// Number of lists scraped concurrently
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: None,
            request_delay_ms: 0,
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Site addresses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Root of the site; film links are resolved against it
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Path of a film's statistics document, `{slug}` is replaced
    #[serde(default = "defaults::stats_path")]
    pub stats_path: String,

    /// Path of a film's rating histogram document, `{slug}` is replaced
    #[serde(default = "defaults::histogram_path")]
    pub histogram_path: String,
}

impl SiteConfig {
    pub fn stats_url(&self, slug: &str) -> String {
        format!("{}{}", self.base_url, self.stats_path.replace("{slug}", slug))
    }

    pub fn histogram_url(&self, slug: &str) -> String {
        format!(
            "{}{}",
            self.base_url,
            self.histogram_path.replace("{slug}", slug)
        )
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            stats_path: defaults::stats_path(),
            histogram_path: defaults::histogram_path(),
        }
    }
}

/// Output file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    /// File extension including the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => ".csv",
            Self::Json => ".json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim_start_matches('.').to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}' (expected csv or json)")),
        }
    }
}

/// Output location and shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the output files
    #[serde(default = "defaults::output_dir")]
    pub dir: String,

    #[serde(default)]
    pub format: OutputFormat,

    #[serde(default)]
    pub mode: ScrapeMode,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: defaults::output_dir(),
            format: OutputFormat::default(),
            mode: ScrapeMode::default(),
        }
    }
}

mod defaults {
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; listscraper/0.1)".into()
    }
    pub fn max_concurrent() -> usize {
        4
    }
    pub fn base_url() -> String {
        "https://letterboxd.com/".into()
    }
    pub fn stats_path() -> String {
        "csi/film/{slug}/stats/".into()
    }
    pub fn histogram_path() -> String {
        "csi/film/{slug}/rating-histogram/".into()
    }
    pub fn output_dir() -> String {
        "scraper_outputs".into()
    }
}
