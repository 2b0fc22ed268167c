// src/csv.rs
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::config::ExportFormat;
use crate::dataset::{DatasetRow, HEADERS};
use crate::error::Result;
use crate::file::ensure_parent;

/// Append-only writer for the dataset table. The header goes out on
/// creation; rows are flushed after every `append` so an interrupted run
/// leaves a readable prefix.
pub struct DatasetWriter<W: Write> {
    inner: ::csv::Writer<W>,
    rows: usize,
}

impl DatasetWriter<File> {
    /// Create (truncate) the table at `path`.
    pub fn create(path: &Path, format: ExportFormat) -> Result<Self> {
        ensure_parent(path)?;
        let file = File::create(path)?;
        Self::from_writer(file, format)
    }
}

impl<W: Write> DatasetWriter<W> {
    pub fn from_writer(w: W, format: ExportFormat) -> Result<Self> {
        let mut inner = ::csv::WriterBuilder::new()
            .delimiter(format.delim())
            .has_headers(false)
            .from_writer(w);
        inner.write_record(HEADERS)?;
        inner.flush()?;
        Ok(Self { inner, rows: 0 })
    }

    pub fn append(&mut self, rows: &[DatasetRow]) -> Result<()> {
        for row in rows {
            self.inner.serialize(row)?;
        }
        self.inner.flush()?;
        self.rows += rows.len();
        Ok(())
    }

    pub fn rows_written(&self) -> usize {
        self.rows
    }

    pub fn into_inner(self) -> Result<W> {
        self.inner
            .into_inner()
            .map_err(|e| crate::error::ScrapeError::Io(e.into_error()))
    }
}
