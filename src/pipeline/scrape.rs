// src/pipeline/scrape.rs

//! Scrape orchestration across all targets.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};

use crate::error::{AppError, Result};
use crate::models::{ItemRecord, RawTarget};
use crate::pipeline::job::{JobDefaults, ListJob, WriteOutcome};
use crate::services::ListScraper;
use crate::storage::RecordSink;

/// Options for one scrape run.
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    pub defaults: JobDefaults,
    /// Jobs in flight at once
    pub concurrency: usize,
    /// Abort on the first invalid input instead of skipping it
    pub strict: bool,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            defaults: JobDefaults::default(),
            concurrency: 4,
            strict: false,
        }
    }
}

/// Summary of a scrape run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Inputs rejected during validation
    pub inputs_rejected: usize,
    pub jobs_total: usize,
    pub jobs_failed: usize,
    pub records_written: usize,
    /// Locations of every written output
    pub files_written: Vec<String>,
}

impl RunSummary {
    pub fn jobs_ok(&self) -> usize {
        self.jobs_total - self.jobs_failed
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Validate all inputs, scrape every job with bounded concurrency and write the results.
///
/// Without concatenation each job writes as soon as it finishes. With
/// concatenation all jobs are awaited and their records are merged in
/// submission order into one output. A failed job never stops the others.
pub async fn run_scrape(
    inputs: &[RawTarget],
    options: &ScrapeOptions,
    scraper: &ListScraper,
    sink: &dyn RecordSink,
) -> Result<RunSummary> {
    let started_at = Utc::now();
    let (jobs, inputs_rejected) = build_jobs(inputs, options)?;

    let concatenate = options.defaults.concatenate;
    let concurrency = options.concurrency.max(1);
    log::info!(
        "Starting the scraping process of {} lists with {} concurrent jobs",
        jobs.len(),
        concurrency
    );

    let mut summary = RunSummary {
        started_at,
        finished_at: started_at,
        inputs_rejected,
        jobs_total: jobs.len(),
        jobs_failed: 0,
        records_written: 0,
        files_written: Vec::new(),
    };

    let mut job_stream = stream::iter(jobs.into_iter().enumerate())
        .map(|(index, mut job)| async move {
            let scraped = job.scrape(scraper, concatenate).await.map(|_| ());
            let result = match scraped {
                Ok(()) if concatenate => Ok(None),
                Ok(()) => job.write_out(sink).await.map(Some),
                Err(error) => Err(error),
            };
            (index, job, result)
        })
        .buffer_unordered(concurrency);

    let mut finished = Vec::new();
    while let Some((index, job, result)) = job_stream.next().await {
        match result {
            Ok(Some(WriteOutcome::Written(written))) => {
                summary.records_written += written.record_count;
                summary.files_written.push(written.location);
            }
            Ok(_) => {}
            Err(error) => {
                summary.jobs_failed += 1;
                log::error!(
                    "List {} ({}) failed: {}",
                    job.position(),
                    job.target().url,
                    error
                );
                continue;
            }
        }
        finished.push((index, job));
    }

    if concatenate {
        finished.sort_by_key(|(index, _)| *index);
        let records: Vec<ItemRecord> = finished
            .into_iter()
            .filter_map(|(_, job)| job.into_outcome())
            .flat_map(|outcome| outcome.records)
            .collect();

        let name = options.defaults.combined_name();
        if records.is_empty() {
            log::warn!("No films found across all lists, nothing to write to {}", name);
        } else {
            let written = sink.write(&records, &name).await?;
            log::info!("Written concatenated lists to {}", written.location);
            summary.records_written += written.record_count;
            summary.files_written.push(written.location);
        }
    }

    summary.finished_at = Utc::now();
    log::info!(
        "Finished {} of {} jobs, {} records written to {} files",
        summary.jobs_ok(),
        summary.jobs_total,
        summary.records_written,
        summary.files_written.len()
    );
    Ok(summary)
}

/// Validate inputs in order, returning the jobs and the number of rejected inputs.
fn build_jobs(inputs: &[RawTarget], options: &ScrapeOptions) -> Result<(Vec<ListJob>, usize)> {
    let total = inputs.len();
    let mut jobs = Vec::with_capacity(total);
    let mut names = HashSet::new();
    let mut rejected = 0;

    for (i, raw) in inputs.iter().enumerate() {
        let job = ListJob::new(raw, i + 1, total, &options.defaults).and_then(|job| {
            let name = &job.target().output_name;
            if !options.defaults.concatenate && !names.insert(name.clone()) {
                return Err(AppError::output_name(format!(
                    "'{name}' is already the output of another list"
                )));
            }
            Ok(job)
        });

        match job {
            Ok(job) => jobs.push(job),
            Err(error) if options.strict => return Err(error),
            Err(error) => {
                rejected += 1;
                log::error!("Skipping input {} ({}): {}", i + 1, raw.url, error);
            }
        }
    }

    if jobs.is_empty() {
        return Err(AppError::usage("no valid list URLs were provided"));
    }
    Ok((jobs, rejected))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use url::Url;

    use super::*;
    use crate::models::{FieldValue, ScrapeMode, SiteConfig, SiteSelectors, schema};
    use crate::services::{CompiledSelectors, FilmScraper, PageScraper};
    use crate::testing::{BASE, MemorySink, StaticFetcher, list_item, list_page};
    use crate::utils::http::Fetcher;

    fn list_url(name: &str) -> String {
        format!("{BASE}dave/list/{name}/")
    }

    /// Lists `a` (2 films), `b` (empty) and `c` (3 films).
    fn fetcher() -> StaticFetcher {
        StaticFetcher::new()
            .with_page(
                &list_url("a"),
                list_page(&[list_item("heat-1995", None), list_item("thief", None)], None),
            )
            .with_page(&list_url("b"), list_page(&[], None))
            .with_page(
                &list_url("c"),
                list_page(
                    &[
                        list_item("rififi", None),
                        list_item("le-cercle-rouge", None),
                        list_item("ronin", None),
                    ],
                    None,
                ),
            )
            .with_film("heat-1995", "Heat")
            .with_film("thief", "Thief")
            .with_film("rififi", "Rififi")
            .with_film("le-cercle-rouge", "Le Cercle Rouge")
            .with_film("ronin", "Ronin")
    }

    fn scraper(fetcher: StaticFetcher) -> ListScraper {
        let fetcher: Arc<dyn Fetcher> = Arc::new(fetcher);
        let selectors = Arc::new(CompiledSelectors::compile(&SiteSelectors::default()).unwrap());
        let films = FilmScraper::new(
            fetcher.clone(),
            selectors.clone(),
            SiteConfig::default(),
            ScrapeMode::Full,
        );
        let pages = PageScraper::new(fetcher, selectors, films, Url::parse(BASE).unwrap());
        ListScraper::new(pages, Duration::ZERO)
    }

    fn inputs() -> Vec<RawTarget> {
        ["a", "b", "c"]
            .iter()
            .map(|name| RawTarget::new(list_url(name)))
            .collect()
    }

    fn options(concatenate: bool, concurrency: usize) -> ScrapeOptions {
        ScrapeOptions {
            defaults: JobDefaults {
                concatenate,
                ..JobDefaults::default()
            },
            concurrency,
            strict: false,
        }
    }

    #[tokio::test]
    async fn test_concatenation_in_submission_order() {
        let sink = MemorySink::default();
        let summary = run_scrape(&inputs(), &options(true, 4), &scraper(fetcher()), &sink)
            .await
            .unwrap();

        let written = sink.written();
        assert_eq!(written.len(), 1);
        let (name, records) = &written[0];
        assert_eq!(name, "concatenated.csv");
        assert_eq!(records.len(), 5);

        let tags: Vec<String> = records
            .iter()
            .map(|r| r.get(schema::LIST_URL).unwrap().to_cell())
            .collect();
        assert_eq!(
            tags,
            [
                list_url("a"),
                list_url("a"),
                list_url("c"),
                list_url("c"),
                list_url("c")
            ]
        );
        assert_eq!(
            records[2].get(schema::FILM_TITLE),
            Some(&FieldValue::Text("Rififi".into()))
        );
        assert_eq!(summary.records_written, 5);
        assert_eq!(summary.jobs_ok(), 3);
    }

    #[tokio::test]
    async fn test_concurrency_does_not_change_outcome() {
        let mut outputs = Vec::new();
        for concurrency in [1, 4] {
            let sink = MemorySink::default();
            run_scrape(&inputs(), &options(false, concurrency), &scraper(fetcher()), &sink)
                .await
                .unwrap();
            let mut written = sink.written();
            written.sort_by(|a, b| a.0.cmp(&b.0));
            outputs.push(written);
        }
        assert_eq!(outputs[0], outputs[1]);
        let names: Vec<&str> = outputs[0].iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["a.csv", "c.csv"]);
        assert!(outputs[0][0].1[0].get(schema::LIST_URL).is_none());
    }

    #[tokio::test]
    async fn test_failed_job_does_not_stop_others() {
        let mut inputs = inputs();
        inputs.push(RawTarget::new(list_url("private")));

        let sink = MemorySink::default();
        let summary = run_scrape(&inputs, &options(false, 2), &scraper(fetcher()), &sink)
            .await
            .unwrap();
        assert_eq!(summary.jobs_total, 4);
        assert_eq!(summary.jobs_failed, 1);
        assert_eq!(summary.files_written.len(), 2);
        assert_eq!(summary.records_written, 5);
    }

    #[tokio::test]
    async fn test_invalid_inputs_skipped_or_fatal() {
        let mut inputs = inputs();
        inputs.insert(1, RawTarget::new("https://letterboxd.com/dave/"));

        let sink = MemorySink::default();
        let summary = run_scrape(&inputs, &options(false, 4), &scraper(fetcher()), &sink)
            .await
            .unwrap();
        assert_eq!(summary.inputs_rejected, 1);
        assert_eq!(summary.jobs_total, 3);

        let strict = ScrapeOptions {
            strict: true,
            ..options(false, 4)
        };
        let err = run_scrape(&inputs, &strict, &scraper(fetcher()), &sink)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn test_no_valid_inputs_is_usage_error() {
        let inputs = vec![RawTarget::new("not a url")];
        let err = run_scrape(&inputs, &options(false, 4), &scraper(fetcher()), &MemorySink::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Usage(_)));
    }

    #[tokio::test]
    async fn test_duplicate_output_names_conflict() {
        let inputs = vec![
            RawTarget::new(list_url("a")).with_output_name("same"),
            RawTarget::new(list_url("c")).with_output_name("same"),
        ];
        let strict = ScrapeOptions {
            strict: true,
            ..options(false, 4)
        };
        let err = run_scrape(&inputs, &strict, &scraper(fetcher()), &MemorySink::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::OutputName(_)));

        let sink = MemorySink::default();
        let summary = run_scrape(&inputs, &options(false, 4), &scraper(fetcher()), &sink)
            .await
            .unwrap();
        assert_eq!(summary.inputs_rejected, 1);
        assert_eq!(sink.written()[0].1.len(), 2);
    }

    #[tokio::test]
    async fn test_concatenation_with_nothing_scraped() {
        let inputs = vec![RawTarget::new(list_url("b"))];
        let sink = MemorySink::default();
        let summary = run_scrape(&inputs, &options(true, 4), &scraper(fetcher()), &sink)
            .await
            .unwrap();
        assert!(sink.written().is_empty());
        assert_eq!(summary.records_written, 0);
    }
}
