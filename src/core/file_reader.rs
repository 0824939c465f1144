//! File reading policy
//!
//! Provides consistent handling for:
//! - Binary files (null bytes in the first 8 KB)
//! - Non-UTF-8 text
//! - Oversized files
//!
//! A file that cannot be emitted is never dropped silently; every non-text
//! outcome carries a reason that ends up in the skip report.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default maximum file size in bytes (16 MB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// How to handle binary and non-UTF-8 content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryPolicy {
    /// Skip binary/non-UTF-8 files entirely (recorded with a reason)
    #[default]
    Skip,
    /// Include them with lossy conversion (invalid bytes replaced)
    Lossy,
}

impl std::str::FromStr for BinaryPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skip" => Ok(BinaryPolicy::Skip),
            "lossy" => Ok(BinaryPolicy::Lossy),
            _ => Err(()),
        }
    }
}

/// Configuration for file reading.
#[derive(Debug, Clone, Copy)]
pub struct FileReadConfig {
    /// Files larger than this are skipped, not read.
    pub max_file_size: u64,
    pub binary_policy: BinaryPolicy,
}

impl Default for FileReadConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            binary_policy: BinaryPolicy::Skip,
        }
    }
}

/// Outcome of reading one candidate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Text content ready to emit.
    Text(String),
    /// Not emitted; the reason is recorded in the result.
    Skipped(String),
}

/// Read a candidate file as text under the given policy.
///
/// Read errors (missing file, permissions) yield `Skipped` rather than
/// aborting the run; one unreadable file must not sink the snapshot.
pub fn read_entry(path: &Path, config: &FileReadConfig) -> ReadOutcome {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) => return ReadOutcome::Skipped(format!("cannot read metadata: {e}")),
    };

    if metadata.len() > config.max_file_size {
        return ReadOutcome::Skipped(format!(
            "file size {} exceeds limit {}",
            metadata.len(),
            config.max_file_size
        ));
    }

    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) => return ReadOutcome::Skipped(format!("cannot read file: {e}")),
    };

    // Binary sniff: null bytes in the first 8KB
    let check_len = std::cmp::min(8192, bytes.len());
    let looks_binary = bytes[..check_len].contains(&0);

    if looks_binary && config.binary_policy == BinaryPolicy::Skip {
        return ReadOutcome::Skipped("binary file".to_string());
    }

    match String::from_utf8(bytes) {
        Ok(content) => ReadOutcome::Text(content),
        Err(e) => match config.binary_policy {
            BinaryPolicy::Skip => ReadOutcome::Skipped("invalid UTF-8".to_string()),
            BinaryPolicy::Lossy => {
                ReadOutcome::Text(String::from_utf8_lossy(e.as_bytes()).into_owned())
            }
        },
    }
}
