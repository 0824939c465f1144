//! CLI module - Command-line interface definition and handler

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::file_reader::{BinaryPolicy, FileReadConfig, DEFAULT_MAX_FILE_SIZE};
use crate::core::filter::SelectionRule;
use crate::engine::output::OutputTarget;
use crate::engine::{aggregate, render, AggregateOptions, CancelToken};

/// repocat - concatenate a filtered repository tree into one text document.
#[derive(Parser, Debug)]
#[command(name = "repocat")]
#[command(
    author,
    version,
    about,
    long_about = r#"repocat walks a root directory, selects files with include/exclude globs,
and emits a single concatenated document:

    ===== path/to/file =====
    <file content>
    ...
    [<N> lines]

The document goes to stdout (or --output FILE); everything else - skipped
files, the zero-match note, --stats - goes to stderr, so stdout can be piped
or copied as-is.

Selection:
- No --include patterns means every file is considered.
- Any --exclude match removes a file, even when an include also matches.
- Patterns match the full root-relative path with '/' separators.
- .git/.hg/.svn metadata is always excluded.

Examples:
    repocat
    repocat --include "*.rs" --include "*.toml"
    repocat --include "*.ts" --exclude "node_modules/*" --output ctx.txt
    repocat --no-ignore --hidden
"#
)]
pub struct Cli {
    /// Root directory to aggregate.
    #[arg(
        long,
        default_value = ".",
        value_name = "ROOT",
        long_help = "Root directory to aggregate (defaults to the current directory).\n\n\
All emitted path markers are relative to this root. The root must exist\n\
and be a readable directory."
    )]
    pub root: PathBuf,

    /// Include glob pattern (repeatable).
    #[arg(
        long,
        value_name = "GLOB",
        long_help = "Glob pattern a file must match to be included. Repeatable; a file is\n\
included when ANY pattern matches. If no --include is given, all files\n\
are considered.\n\n\
Example: --include \"*.rs\" --include \"docs/**\""
    )]
    pub include: Vec<String>,

    /// Exclude glob pattern (repeatable).
    #[arg(
        long,
        value_name = "GLOB",
        long_help = "Glob pattern that removes a file from the selection. Repeatable.\n\
Exclude always wins over include.\n\n\
Example: --exclude \"target/*\" --exclude \"*.lock\""
    )]
    pub exclude: Vec<String>,

    /// Write the document to a file instead of stdout.
    #[arg(
        long,
        value_name = "PATH",
        long_help = "Write the document to PATH instead of stdout.\n\n\
The write is atomic: the document is staged in a temporary file next to\n\
PATH and renamed into place, so a concurrent reader never sees a\n\
truncated document."
    )]
    pub output: Option<PathBuf>,

    /// Include hidden files/directories (dotfiles).
    #[arg(
        long,
        long_help = "Include hidden files and directories (dotfiles).\n\n\
By default, hidden entries are skipped. VCS metadata (.git/.hg/.svn) is\n\
excluded even with this flag."
    )]
    pub hidden: bool,

    /// Disable .gitignore and other ignore rules.
    #[arg(
        long,
        long_help = "Disable respect for ignore files (.gitignore, .ignore, global ignores).\n\n\
Use this for a raw snapshot that includes all paths, even those normally ignored."
    )]
    pub no_ignore: bool,

    /// Policy for binary/non-UTF-8 files (skip/lossy).
    #[arg(
        long,
        default_value = "skip",
        value_parser = ["skip", "lossy"],
        value_name = "POLICY",
        long_help = "How to handle binary and non-UTF-8 files.\n\n\
Supported values:\n\
- skip (default): leave them out and record them in the skip report\n\
- lossy: include them with invalid bytes replaced"
    )]
    pub binary: String,

    /// Maximum file size to read, in bytes.
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_FILE_SIZE,
        value_name = "BYTES",
        long_help = "Files larger than this are recorded as skipped instead of read.\n\n\
Default: 16 MiB."
    )]
    pub max_file_size: u64,

    /// Abort the run after this many seconds.
    #[arg(
        long,
        value_name = "SECS",
        long_help = "Abort the run after SECS seconds. A timed-out run fails with a\n\
cancellation error and writes no output file."
    )]
    pub timeout: Option<u64>,

    /// Print a JSON summary to stderr.
    #[arg(
        long,
        long_help = "Print a one-line JSON summary (files, lines, bytes, skipped) to stderr\n\
after the document is written."
    )]
    pub stats: bool,

    /// Quiet mode (suppress informational stderr output).
    #[arg(
        short,
        long,
        long_help = "Suppress informational stderr output (the skip report and the\n\
zero-match note). Errors are still reported."
    )]
    pub quiet: bool,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let binary_policy: BinaryPolicy = cli.binary.parse().unwrap_or_default();

    // Get absolute root path
    let root = cli.root.canonicalize().unwrap_or(cli.root);

    let opts = AggregateOptions {
        root,
        rule: SelectionRule::new(cli.include, cli.exclude),
        hidden: cli.hidden,
        use_ignore: !cli.no_ignore,
        read_config: FileReadConfig {
            max_file_size: cli.max_file_size,
            binary_policy,
        },
        cancel: CancelToken::new(),
    };

    if let Some(secs) = cli.timeout {
        opts.cancel.cancel_after(Duration::from_secs(secs));
    }

    let result = aggregate(&opts)?;

    if !cli.quiet {
        for skipped in &result.skipped {
            eprintln!("skipped {}: {}", skipped.path, skipped.reason);
        }
        if result.is_empty() {
            eprintln!("repocat: no files matched; double-check your globs");
        }
    }

    let document = render::render(&result);
    OutputTarget::from_path(cli.output).write(&document)?;

    if cli.stats {
        eprintln!("{}", serde_json::to_string(&result.summary())?);
    }

    Ok(())
}
