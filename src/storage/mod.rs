//! Output sinks for scraped records.
//!
//! ## Directory Structure
//!
//! ```text
//! scraper_outputs/
//! ├── official-top-250.csv    # one file per target
//! ├── dave-watchlist.csv
//! └── concatenated.json       # or one merged file with --concat
//! ```

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::ItemRecord;

// Re-export for convenience
pub use local::LocalSink;

/// Result of a sink write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    /// Where the records ended up, e.g. a file path
    pub location: String,
    pub record_count: usize,
}

/// Trait for record output backends.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Write `records` under `name`, which already carries the format's extension.
    async fn write(&self, records: &[ItemRecord], name: &str) -> Result<WriteSummary>;
}
