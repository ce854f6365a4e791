//! Polling view over a result file that a collector is still appending to.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::warn;

use super::decoder::{decode_file, Decoded, Flush};
use super::error::DecodeError;
use super::record::ResultRecord;

/// Progress of a collector as seen from its result file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    NotStarted,
    Running,
    Completed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::NotStarted => "not_started",
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
        }
    }
}

/// Snapshot of a result file for status reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub status: JobStatus,
    pub row_count: usize,
    pub file_size: u64,
    /// RFC 3339, UTC
    pub last_modified: Option<String>,
}

/// Result file plus the header state carried across polls.
///
/// Every call re-reads the whole file, so the records returned by
/// [`snapshot`](Self::snapshot) only ever grow while the file is appended to.
#[derive(Debug, Clone)]
pub struct ResultStream {
    path: PathBuf,
    header: Option<Vec<String>>,
    emitted: usize,
    finished: bool,
}

impl ResultStream {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            header: None,
            emitted: 0,
            finished: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Header captured by the first successful snapshot.
    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    /// Number of records already handed out by [`poll_new`](Self::poll_new).
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Declare the writer done; the next read flushes a trailing row.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    fn flush(&self) -> Flush {
        if self.finished {
            Flush::AtEof
        } else {
            Flush::Deferred
        }
    }

    fn decode(&self) -> Result<Decoded, DecodeError> {
        decode_file(&self.path, self.header.as_deref(), self.flush())
    }

    /// Every complete record currently in the file.
    pub fn snapshot(&mut self) -> Result<Vec<ResultRecord>, DecodeError> {
        let decoded = self.decode()?;
        if let Some(found) = decoded.header {
            if let Some(captured) = &self.header {
                if *captured != found {
                    warn!(
                        path = %self.path.display(),
                        captured = ?captured,
                        found = ?found,
                        "result header changed; keeping the captured header"
                    );
                }
            } else {
                self.header = Some(found);
            }
        }
        Ok(decoded.records)
    }

    /// Records that have appeared since the previous call.
    pub fn poll_new(&mut self) -> Result<Vec<ResultRecord>, DecodeError> {
        let records = self.snapshot()?;
        let fresh: Vec<ResultRecord> = records.into_iter().skip(self.emitted).collect();
        self.emitted += fresh.len();
        Ok(fresh)
    }

    /// Report progress; `threshold` rows count as completed.
    ///
    /// A missing file is `not_started` rather than an error.
    pub fn status(&self, threshold: usize) -> Result<StatusReport, DecodeError> {
        let metadata = match fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(StatusReport {
                    status: JobStatus::NotStarted,
                    row_count: 0,
                    file_size: 0,
                    last_modified: None,
                });
            }
            Err(e) => return Err(DecodeError::from_io(self.path.clone(), e)),
        };

        let row_count = match self.decode() {
            Ok(decoded) => decoded.records.len(),
            // Removed between the metadata call and the read
            Err(e) if e.is_not_found() => 0,
            Err(e) => return Err(e),
        };

        let status = if self.finished || row_count >= threshold {
            JobStatus::Completed
        } else {
            JobStatus::Running
        };

        let last_modified = metadata.modified().ok().map(|time| {
            DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Secs, true)
        });

        Ok(StatusReport {
            status,
            row_count,
            file_size: metadata.len(),
            last_modified,
        })
    }
}
