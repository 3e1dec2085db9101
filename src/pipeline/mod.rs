//! Pipeline entry points for scrape runs.
//!
//! - `read_targets`: Load targets from an input file
//! - `ListJob`: Validate, scrape and write one target
//! - `run_scrape`: Run all jobs concurrently, optionally concatenating the output

pub mod input;
pub mod job;
pub mod scrape;

pub use input::{parse_targets, read_targets};
pub use job::{CONCATENATED_NAME, JobDefaults, ListJob, WriteOutcome};
pub use scrape::{RunSummary, ScrapeOptions, run_scrape};
