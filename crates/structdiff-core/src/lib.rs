//! structdiff Core - structural diff and patch over typed object graphs
//!
//! This crate provides:
//! - A runtime value model with shape dispatch (record, sequence, mapping, scalar)
//! - Participation markup: the `Diffable` trait and the `diffable!` macro
//! - Field introspection with inherited, most-derived-wins field sets
//! - A concurrency-safe registry of value resolvers
//! - The recursive diff engine and its resolve-only pass
//! - Shallow, last-writer-wins apply of participating fields
//! - Structured error and logging facilities

pub mod apply;
pub mod config;
pub mod diff;
pub mod errors;
pub mod introspect;
pub mod logging_facility;
pub mod model;
pub mod resolver;

pub use structdiff_core_types::schema;

// Re-export commonly used types
pub use apply::{apply, apply_in_place};
pub use config::{EngineConfig, MapKeyPolicy};
pub use diff::{escape_key_segment, ChangeKind, DiffEngine, DiffEntry, DiffMap};
pub use errors::{DiffError, ExError, ExErrorKind, FieldAccessError, Result};
pub use introspect::{fields_of, fields_of_type};
pub use model::{Diffable, FieldDescriptor, Record, RecordField, ToValue, TypeDescriptor, Value};
pub use resolver::{ResolverRegistry, SharedResolver, ValueResolver};
