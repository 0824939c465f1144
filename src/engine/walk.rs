//! Directory traversal
//!
//! Uses the ignore crate for efficient file traversal with gitignore support.
//! Symlinks are not followed, so link cycles cannot trap the walk. Version
//! control metadata directories are always excluded, whatever the flags say.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::core::model::AggregateError;
use crate::core::paths::make_relative;
use crate::engine::CancelToken;

/// Directories treated as an implicit default exclude.
const VCS_DIRS: &[&str] = &[".git", ".hg", ".svn"];

/// A regular file discovered under the root, before filtering.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Absolute path on disk.
    pub abs_path: PathBuf,
    /// Normalized path relative to the root.
    pub rel_path: String,
}

/// Enumerate regular files under `root` in stable lexicographic order.
///
/// `hidden` includes dotfiles; `use_ignore` controls whether .gitignore and
/// friends are respected. Unreadable directory entries are silently dropped
/// from the walk (the walk itself is best-effort; per-file read failures are
/// reported later, at read time).
pub fn collect_files(
    root: &Path,
    hidden: bool,
    use_ignore: bool,
    cancel: &CancelToken,
) -> Result<Vec<Candidate>, AggregateError> {
    if !root.is_dir() {
        return Err(AggregateError::InvalidRoot {
            path: root.to_path_buf(),
        });
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(!hidden)
        .git_ignore(use_ignore)
        .git_global(use_ignore)
        .git_exclude(use_ignore)
        // honor .gitignore even when the root is not a git checkout
        .require_git(false)
        .follow_links(false)
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            !VCS_DIRS.contains(&name.as_ref())
        });

    let mut candidates = Vec::new();

    for entry in builder.build() {
        if cancel.is_cancelled() {
            return Err(AggregateError::Cancelled);
        }

        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        // Regular files only; directories and symlinks are never emitted
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }

        let rel_path = match make_relative(entry.path(), root) {
            Some(r) if !r.is_empty() => r,
            _ => continue,
        };

        candidates.push(Candidate {
            abs_path: entry.path().to_path_buf(),
            rel_path,
        });
    }

    candidates.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_collect_empty_dir() {
        let temp = tempdir().unwrap();
        let files = collect_files(temp.path(), false, true, &CancelToken::new()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_collect_sorted_order() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("b.txt"), "b");
        write_file(&temp.path().join("a.txt"), "a");
        write_file(&temp.path().join("sub/zz.md"), "z");

        let files = collect_files(temp.path(), false, true, &CancelToken::new()).unwrap();
        let paths: Vec<_> = files.iter().map(|c| c.rel_path.as_str()).collect();
        assert_eq!(paths, vec!["a.txt", "b.txt", "sub/zz.md"]);
    }

    #[test]
    fn test_vcs_metadata_always_excluded() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join(".git/config"), "[core]");
        write_file(&temp.path().join(".git/objects/aa"), "blob");
        write_file(&temp.path().join("main.rs"), "fn main() {}");

        // Even with hidden files enabled and ignore rules off
        let files = collect_files(temp.path(), true, false, &CancelToken::new()).unwrap();
        let paths: Vec<_> = files.iter().map(|c| c.rel_path.as_str()).collect();
        assert_eq!(paths, vec!["main.rs"]);
    }

    #[test]
    fn test_hidden_files_skipped_by_default() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join(".env"), "SECRET=1");
        write_file(&temp.path().join("visible.txt"), "ok");

        let files = collect_files(temp.path(), false, true, &CancelToken::new()).unwrap();
        let paths: Vec<_> = files.iter().map(|c| c.rel_path.as_str()).collect();
        assert_eq!(paths, vec!["visible.txt"]);

        let files = collect_files(temp.path(), true, true, &CancelToken::new()).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_missing_root_is_invalid() {
        let err = collect_files(
            Path::new("/nonexistent/root"),
            false,
            true,
            &CancelToken::new(),
        )
        .unwrap_err();
        assert!(matches!(err, AggregateError::InvalidRoot { .. }));
    }

    #[test]
    fn test_cancelled_before_walk() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("a.txt"), "a");

        let cancel = CancelToken::new();
        cancel.cancel();
        let err = collect_files(temp.path(), false, true, &cancel).unwrap_err();
        assert!(matches!(err, AggregateError::Cancelled));
    }
}
