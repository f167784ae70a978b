pub mod demo;
pub mod diff;

use clap::ValueEnum;
use structdiff_core::diff::{render_human_summary, render_markdown_summary};
use structdiff_core::DiffMap;

/// Output rendering of a diff map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One line per entry
    #[default]
    Text,
    /// Markdown report with totals
    Markdown,
    /// JSON object of key path to entry
    Json,
}

/// Render `diff` in the requested format
pub fn render(diff: &DiffMap, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_human_summary(diff)),
        OutputFormat::Markdown => Ok(render_markdown_summary(diff)),
        OutputFormat::Json => serde_json::to_string_pretty(diff).map(|json| json + "\n"),
    }
}
