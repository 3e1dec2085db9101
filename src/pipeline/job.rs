// src/pipeline/job.rs

//! One user target from validation to output.

use crate::error::{AppError, Result};
use crate::models::{ListTarget, OutputFormat, PageSpec, RawTarget, ScrapeOutcome, UrlClass};
use crate::services::ListScraper;
use crate::storage::{RecordSink, WriteSummary};

/// Name used for the merged output when no global name is given.
pub const CONCATENATED_NAME: &str = "concatenated";

/// Run-wide options every job falls back to.
#[derive(Debug, Clone)]
pub struct JobDefaults {
    /// Page selection for targets without their own
    pub pages: String,
    /// Output name for targets without their own
    pub output_name: Option<String>,
    pub format: OutputFormat,
    pub concatenate: bool,
}

impl Default for JobDefaults {
    fn default() -> Self {
        Self {
            pages: "*".to_string(),
            output_name: None,
            format: OutputFormat::default(),
            concatenate: false,
        }
    }
}

impl JobDefaults {
    /// File name of the merged output in concatenation mode.
    pub fn combined_name(&self) -> String {
        let stem = self.output_name.as_deref().unwrap_or(CONCATENATED_NAME);
        format!("{stem}{}", self.format.extension())
    }
}

/// What [`ListJob::write_out`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(WriteSummary),
    /// The job produced no records, so nothing was written
    Empty,
}

/// A validated target together with its scrape result.
#[derive(Debug, Clone)]
pub struct ListJob {
    target: ListTarget,
    position: usize,
    outcome: Option<ScrapeOutcome>,
}

impl ListJob {
    /// Validate one raw target.
    ///
    /// `position` is 1-based among `total` inputs. Checks run in order:
    /// the URL, then the output name, then the page selection.
    pub fn new(
        raw: &RawTarget,
        position: usize,
        total: usize,
        defaults: &JobDefaults,
    ) -> Result<Self> {
        let class = UrlClass::classify(&raw.url)?;
        let output_name = resolve_output_name(raw, position, total, defaults, &class.list_name)?;

        let page_string = raw.pages.as_deref().unwrap_or(&defaults.pages);
        let pages = PageSpec::parse(&clean_page_string(page_string))?;

        let target = ListTarget {
            url: class.url.to_string(),
            scrape_url: class.kind.scrape_url(&class.url),
            kind: class.kind,
            owner: class.owner,
            list_name: class.list_name,
            output_name,
            pages,
        };

        log::info!("Checked input {}/{}", position, total);
        log::info!("    url:         {}", target.url);
        log::info!("    owner:       {}", target.owner);
        log::info!("    type:        {}", target.kind);
        log::info!("    page_select: {}", target.pages);
        log::info!("    output_name: {}", target.output_name);

        Ok(Self {
            target,
            position,
            outcome: None,
        })
    }

    pub fn target(&self) -> &ListTarget {
        &self.target
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn into_outcome(self) -> Option<ScrapeOutcome> {
        self.outcome
    }

    /// Scrape the target and keep the outcome. `tag` marks every record with the source URL.
    pub async fn scrape(&mut self, scraper: &ListScraper, tag: bool) -> Result<&ScrapeOutcome> {
        log::info!("Scraping {}...", self.target.url);
        let outcome = scraper.scrape(&self.target, tag).await?;
        log::info!(
            "Scraped {} films from {} ({} pages, {} pages failed, {} items skipped)",
            outcome.len(),
            self.target.url,
            outcome.pages_scraped,
            outcome.pages_failed,
            outcome.items_failed
        );
        Ok(self.outcome.insert(outcome))
    }

    /// Hand the scraped records to `sink` under the job's output name.
    pub async fn write_out(&self, sink: &dyn RecordSink) -> Result<WriteOutcome> {
        match &self.outcome {
            Some(outcome) if !outcome.is_empty() => Ok(WriteOutcome::Written(
                sink.write(&outcome.records, &self.target.output_name).await?,
            )),
            _ => {
                log::warn!(
                    "No films found to write out for {}, nothing to write",
                    self.target.list_name
                );
                Ok(WriteOutcome::Empty)
            }
        }
    }
}

/// Strip surrounding quotes and all spaces from a page selection.
fn clean_page_string(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| c == '\'' || c == '"')
        .replace(' ', "")
}

fn resolve_output_name(
    raw: &RawTarget,
    position: usize,
    total: usize,
    defaults: &JobDefaults,
    list_name: &str,
) -> Result<String> {
    if defaults.concatenate {
        return check_output_name(defaults.combined_name(), defaults);
    }

    let extension = defaults.format.extension();
    let name = match (&raw.output_name, &defaults.output_name) {
        (Some(own), _) => format!("{own}{extension}"),
        (None, Some(global)) if total > 1 => format!("{global}_{}{extension}", position - 1),
        (None, Some(global)) => format!("{global}{extension}"),
        (None, None) => format!("{list_name}{extension}"),
    };
    check_output_name(name, defaults)
}

fn check_output_name(name: String, defaults: &JobDefaults) -> Result<String> {
    let stem = name
        .strip_suffix(defaults.format.extension())
        .unwrap_or(&name);
    if stem.trim().is_empty() {
        return Err(AppError::output_name("output name is empty"));
    }
    if name.contains(['/', '\\']) || stem == "." || stem == ".." {
        return Err(AppError::output_name(format!(
            "'{name}' is not a plain file name"
        )));
    }
    Ok(name)
}
