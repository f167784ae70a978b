//! Diff command
//!
//! Usage: structdiff diff <ORIGINAL> <CURRENT> [--tag <TAG>] [--config <FILE>] [--format <FORMAT>]
//!
//! A document consisting of `null` stands for an absent side.

use super::{render, OutputFormat};
use clap::Args;
use std::path::{Path, PathBuf};
use structdiff_core::{DiffEngine, DiffError, EngineConfig, ExError, MapKeyPolicy, Value};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Original JSON document
    pub original: PathBuf,

    /// Current JSON document
    pub current: PathBuf,

    /// Root key path prepended to every entry
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Engine configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Also visit object keys that only exist in the current document
    #[arg(long)]
    pub union_keys: bool,

    /// Override the configured recursion limit
    #[arg(long)]
    pub max_depth: Option<usize>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute diff command
pub fn execute(args: DiffArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if args.union_keys {
        config.map_keys = MapKeyPolicy::Union;
    }
    if let Some(max_depth) = args.max_depth {
        config.max_depth = max_depth;
    }
    let engine = DiffEngine::with_config(config)?;

    let original = read_document(&args.original)?;
    let current = read_document(&args.current)?;
    tracing::debug!(
        original = %args.original.display(),
        current = %args.current.display(),
        "loaded documents"
    );

    let diff = engine.calculate_values(args.tag.as_deref(), &original, &current)?;
    let rendered = render(&diff, args.format)?;

    if let Some(output_path) = args.output {
        std::fs::write(&output_path, rendered)?;
        println!("✓ Wrote {} entries to {}", diff.len(), output_path.display());
    } else {
        print!("{}", rendered);
    }

    Ok(())
}

/// # Errors
///
/// `Io` when the file cannot be read, `Serialization` when it is not JSON.
/// Both carry the path as tag.
fn read_document(path: &Path) -> structdiff_core::Result<Value> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        let message = format!("cannot read document: {}", e);
        ExError::from(DiffError::from(e))
            .with_op("read_document")
            .with_tag(path.display().to_string())
            .with_message(message)
    })?;
    let json: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
        let message = format!("not valid JSON: {}", e);
        ExError::from(DiffError::from(e))
            .with_op("read_document")
            .with_tag(path.display().to_string())
            .with_message(message)
    })?;
    Ok(Value::from(json))
}
