//! Core data model for aggregation
//!
//! A single invocation produces one `AggregationResult`: the ordered set of
//! selected files, the files that were skipped (with reasons), and a summary.
//! Nothing here persists between invocations.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// A selected file: its root-relative path (forward slashes) and its text
/// content as read at scan time. Immutable once read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: String,
    pub content: String,
}

impl FileEntry {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Number of content lines this entry contributes to the summary.
    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }
}

/// A file that survived filtering but was not emitted, and why.
///
/// Skips are always recorded; silent omission would break the
/// "copy everything relevant" contract callers depend on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

impl SkippedFile {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Aggregate counters for one invocation, reported via `--stats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Files emitted into the document.
    pub files: usize,
    /// Total content lines across all emitted files.
    pub lines: usize,
    /// Total content bytes across all emitted files.
    pub bytes: usize,
    /// Files recorded as skipped.
    pub skipped: usize,
}

/// The result of one aggregation run.
///
/// Entries are ordered by relative path so repeated runs over an unchanged
/// tree render byte-identical output.
#[derive(Debug, Clone, Default)]
pub struct AggregationResult {
    pub entries: Vec<FileEntry>,
    pub skipped: Vec<SkippedFile>,
}

impl AggregationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: FileEntry) {
        self.entries.push(entry);
    }

    pub fn push_skipped(&mut self, skipped: SkippedFile) {
        self.skipped.push(skipped);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            files: self.entries.len(),
            lines: self.entries.iter().map(FileEntry::line_count).sum(),
            bytes: self.entries.iter().map(|e| e.content.len()).sum(),
            skipped: self.skipped.len(),
        }
    }
}

/// Terminal failures for one invocation.
///
/// Zero matched files is not an error; it yields an empty result. Per-file
/// read failures are recorded as skips, not raised here.
#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("root directory does not exist or is not readable: {path}")]
    InvalidRoot { path: PathBuf },

    #[error("invalid glob pattern `{pattern}`: {source}")]
    GlobSyntax {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("cannot write output to {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("aggregation cancelled")]
    Cancelled,
}
