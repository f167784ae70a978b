//! Human-readable renderers for diff maps.

use crate::diff::model::{ChangeKind, DiffMap};
use std::fmt::Write as _;

/// Render one line per entry, in key-path order.
///
/// ```text
/// UPDATED | name was [Arnold] now [Tom]
/// REMOVED | friend.name was [Sylvester]
/// COUNT | items.count was [3] now [2]
/// ```
pub fn render_human_summary(diff: &DiffMap) -> String {
    if diff.is_empty() {
        return "No differences.\n".to_string();
    }

    let mut out = String::new();
    for (key, entry) in diff {
        let _ = match entry.kind {
            ChangeKind::Removed => writeln!(
                out,
                "{} | {} was [{}]",
                entry.kind.marker(),
                key,
                entry.original
            ),
            ChangeKind::Updated | ChangeKind::Count => writeln!(
                out,
                "{} | {} was [{}] now [{}]",
                entry.kind.marker(),
                key,
                entry.original,
                entry.current
            ),
        };
    }
    out
}

/// Render a Markdown report: per-kind totals followed by a table of entries.
pub fn render_markdown_summary(diff: &DiffMap) -> String {
    let mut out = String::new();
    out.push_str("## Structural Diff\n\n");

    if diff.is_empty() {
        out.push_str("_No differences detected._\n");
        return out;
    }

    let count_of = |kind: ChangeKind| diff.iter().filter(|(_, e)| e.kind == kind).count();
    let _ = writeln!(
        out,
        "**Updated**: {}  \n**Removed**: {}  \n**Count changes**: {}\n",
        count_of(ChangeKind::Updated),
        count_of(ChangeKind::Removed),
        count_of(ChangeKind::Count)
    );

    out.push_str("| Key | Change | Original | Current |\n|---|---|---|---|\n");
    for (key, entry) in diff {
        let _ = writeln!(
            out,
            "| `{}` | {} | {} | {} |",
            key,
            entry.kind.marker(),
            escape_cell(&entry.original),
            escape_cell(&entry.current)
        );
    }
    out
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
