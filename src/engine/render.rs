//! Document rendering
//!
//! Turns an `AggregationResult` into the concatenated text document: one
//! marker-labeled block per file, then a `[<N> lines]` trailer. The trailer
//! format is parsed downstream and must stay stable.

use crate::core::model::AggregationResult;

/// Marker line placed before each file's content.
pub fn path_marker(rel_path: &str) -> String {
    format!("===== {rel_path} =====")
}

/// The trailing summary line: total content lines across all blocks.
pub fn summary_line(total_lines: usize) -> String {
    format!("[{total_lines} lines]")
}

/// Render the whole document.
///
/// Marker lines and the trailer do not count toward the line total; a file
/// without a trailing newline gets one so blocks never run together.
pub fn render(result: &AggregationResult) -> String {
    let mut out = String::new();
    let mut total_lines = 0usize;

    for entry in &result.entries {
        out.push_str(&path_marker(&entry.path));
        out.push('\n');
        out.push_str(&entry.content);
        if !entry.content.is_empty() && !entry.content.ends_with('\n') {
            out.push('\n');
        }
        total_lines += entry.line_count();
    }

    out.push_str(&summary_line(total_lines));
    out.push('\n');
    out
}
