//! Aggregation engine
//!
//! A single invocation is one pure batch transform: validate the root,
//! compile the selection rule, walk, filter, read, assemble. The engine
//! holds no state between invocations; cancellation aborts the run before
//! anything is written.

pub mod output;
pub mod render;
pub mod walk;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::core::file_reader::{read_entry, FileReadConfig, ReadOutcome};
use crate::core::filter::SelectionRule;
use crate::core::model::{AggregateError, AggregationResult, FileEntry, SkippedFile};
use crate::engine::walk::Candidate;

/// Caller-supplied cancellation handle.
///
/// Cloning shares the underlying flag; `cancel_after` arms a timer thread
/// for deadline-style cancellation.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Cancel this token after the given duration.
    pub fn cancel_after(&self, duration: Duration) {
        let token = self.clone();
        std::thread::spawn(move || {
            std::thread::sleep(duration);
            token.cancel();
        });
    }
}

/// Options for one aggregation run.
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    pub root: PathBuf,
    pub rule: SelectionRule,
    /// Include hidden files/directories (dotfiles).
    pub hidden: bool,
    /// Respect .gitignore and other ignore rules.
    pub use_ignore: bool,
    pub read_config: FileReadConfig,
    pub cancel: CancelToken,
}

impl AggregateOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            rule: SelectionRule::default(),
            hidden: false,
            use_ignore: true,
            read_config: FileReadConfig::default(),
            cancel: CancelToken::new(),
        }
    }
}

/// Run one aggregation: enumerate, filter, read.
///
/// Zero matched files yields an empty (valid) result. Per-file read
/// failures are recorded as skips; only root/pattern/cancellation problems
/// fail the run.
pub fn aggregate(opts: &AggregateOptions) -> Result<AggregationResult, AggregateError> {
    let matcher = opts.rule.compile()?;

    let candidates = walk::collect_files(&opts.root, opts.hidden, opts.use_ignore, &opts.cancel)?;

    let selected: Vec<&Candidate> = candidates
        .iter()
        .filter(|c| matcher.is_selected(&c.rel_path))
        .collect();

    if opts.cancel.is_cancelled() {
        return Err(AggregateError::Cancelled);
    }

    let outcomes = read_all(&selected, &opts.read_config);

    if opts.cancel.is_cancelled() {
        return Err(AggregateError::Cancelled);
    }

    let mut result = AggregationResult::new();
    for (candidate, outcome) in selected.iter().zip(outcomes) {
        match outcome {
            ReadOutcome::Text(content) => {
                result.push(FileEntry::new(candidate.rel_path.clone(), content));
            }
            ReadOutcome::Skipped(reason) => {
                result.push_skipped(SkippedFile::new(candidate.rel_path.clone(), reason));
            }
        }
    }

    Ok(result)
}

/// Read every selected file, preserving traversal order.
///
/// With the `parallel` feature the reads run on the rayon pool, which also
/// bounds the number of files open at once; the indexed collect keeps the
/// output order identical to the sequential path.
#[cfg(feature = "parallel")]
fn read_all(selected: &[&Candidate], config: &FileReadConfig) -> Vec<ReadOutcome> {
    selected
        .par_iter()
        .map(|c| read_entry(&c.abs_path, config))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn read_all(selected: &[&Candidate], config: &FileReadConfig) -> Vec<ReadOutcome> {
    selected
        .iter()
        .map(|c| read_entry(&c.abs_path, config))
        .collect()
}
