//! Output writing
//!
//! File destinations are written all-or-nothing: the document is rendered
//! fully, written to a temporary file in the destination directory, then
//! renamed into place. A concurrent reader of the output path never sees a
//! truncated document.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::core::model::AggregateError;

/// Where the rendered document goes.
#[derive(Debug, Clone, Default)]
pub enum OutputTarget {
    #[default]
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => OutputTarget::File(p),
            None => OutputTarget::Stdout,
        }
    }

    /// Write the full document to this target.
    pub fn write(&self, document: &str) -> Result<(), AggregateError> {
        match self {
            OutputTarget::Stdout => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                handle
                    .write_all(document.as_bytes())
                    .and_then(|_| handle.flush())
                    .map_err(|source| AggregateError::OutputWrite {
                        path: PathBuf::from("<stdout>"),
                        source,
                    })
            }
            OutputTarget::File(path) => write_atomic(path, document),
        }
    }
}

/// Write via a sibling temp file plus rename. The temp file lives in the
/// destination directory so the final rename stays on one filesystem.
fn write_atomic(path: &Path, document: &str) -> Result<(), AggregateError> {
    let to_err = |source: std::io::Error| AggregateError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut tmp = NamedTempFile::new_in(&dir).map_err(to_err)?;
    tmp.write_all(document.as_bytes()).map_err(to_err)?;
    tmp.flush().map_err(to_err)?;
    tmp.persist(path).map_err(|e| to_err(e.error))?;
    Ok(())
}
