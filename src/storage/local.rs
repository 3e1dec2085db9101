//! Local filesystem sink.
//!
//! Records are rendered in memory and then written atomically, so an
//! interrupted run never leaves a half-written output file behind.
//!
//! - **CSV**: header row from the first record's field names, Missing values
//!   as empty cells, lists joined with `", "`.
//! - **JSON**: pretty-printed array of objects, Missing values as `null`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{ItemRecord, OutputFormat};
use crate::storage::{RecordSink, WriteSummary};

/// Writes one file per output name below a root directory.
#[derive(Debug, Clone)]
pub struct LocalSink {
    root_dir: PathBuf,
    format: OutputFormat,
}

impl LocalSink {
    /// Create a new LocalSink rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            root_dir: root_dir.into(),
            format,
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Get the full path for an output name.
    fn path(&self, name: &str) -> PathBuf {
        self.root_dir.join(name)
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(path)
    }

    fn render(&self, records: &[ItemRecord]) -> Result<Vec<u8>> {
        match self.format {
            OutputFormat::Csv => render_csv(records),
            OutputFormat::Json => Ok(serde_json::to_vec_pretty(records)?),
        }
    }
}

fn render_csv(records: &[ItemRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if let Some(first) = records.first() {
        writer.write_record(first.names())?;
    }
    for record in records {
        writer.write_record(record.values().map(|v| v.to_cell()))?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::Io(e.into_error()))
}

#[async_trait]
impl RecordSink for LocalSink {
    async fn write(&self, records: &[ItemRecord], name: &str) -> Result<WriteSummary> {
        let bytes = self.render(records)?;
        let path = self.write_bytes(name, &bytes).await?;
        log::info!("Wrote {} records to {}", records.len(), path.display());
        Ok(WriteSummary {
            location: path.display().to_string(),
            record_count: records.len(),
        })
    }
}
