//! Structural diff engine.
//!
//! Walks two values of the same type and produces a flat, ordered map of
//! differences addressed by dot-delimited key paths.
//!
//! ## Entry point
//!
//! ```
//! use structdiff_core::DiffEngine;
//!
//! let engine = DiffEngine::new();
//! let diff = engine.calculate(Some("items"), Some(&vec![1, 2, 3]), Some(&vec![1, 2]))?;
//! assert!(diff.contains_key("items.count"));
//! # Ok::<(), structdiff_core::ExError>(())
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical key sets in
//!   lexicographic order.
//! - **Opt-in**: only fields declared on a participating type are visited.
//! - **Resolvers compare only**: substituted values never reach the source
//!   objects.

pub mod engine;
pub mod human_summary;
pub mod model;
pub mod resolve;

pub use engine::DiffEngine;
pub use human_summary::{render_human_summary, render_markdown_summary};
pub use model::{escape_key_segment, ChangeKind, DiffEntry, DiffMap};
