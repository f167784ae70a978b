//! Recursive diff engine.
//!
//! The core entry point is [`DiffEngine::calculate`], which walks two values
//! of the same type and produces a flat [`DiffMap`] addressed by key path.
//!
//! Values are dispatched by shape:
//!
//! - **Record** (participating type): field-by-field recursion, with the
//!   field's resolver applied to both sides first.
//! - **Sequence**: positional recursion labelled `idx1`, `idx2`, … plus a
//!   `count` entry when the lengths differ.
//! - **Mapping**: recursion per key of the original mapping, with `.` and
//!   `\` in keys escaped by a backslash.
//! - **Scalar / opaque**: equality; unequal values produce one `UPDATED`
//!   entry at the current key path.
//!
//! When `original` is absent the engine diffs against a default instance of
//! `current`'s type; when `current` is absent the original is serialised by
//! the resolve-only pass (see [`crate::diff::resolve`]).

use crate::config::{EngineConfig, MapKeyPolicy};
use crate::diff::model::{escape_key_segment, DiffEntry, DiffMap};
use crate::errors::{DiffError, ExError, FieldAccessError, Result};
use crate::model::descriptor::FieldDescriptor;
use crate::model::record::{Record, RecordField};
use crate::model::value::{ToValue, Value};
use crate::resolver::{ResolverRegistry, SharedResolver, ValueResolver};
use crate::{log_op_end, log_op_error, log_op_start};
use std::borrow::Cow;
use std::time::Instant;

static NULL: Value = Value::Null;

/// Structural diff engine owning its resolver registry.
///
/// The engine is `Send + Sync`; resolvers may be registered and removed from
/// any thread while traversals run on others.
#[derive(Debug, Default)]
pub struct DiffEngine {
    resolvers: ResolverRegistry,
    config: EngineConfig,
}

impl DiffEngine {
    /// Engine with default configuration and an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// `InvalidConfig` when the configuration fails validation.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            resolvers: ResolverRegistry::new(),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn resolvers(&self) -> &ResolverRegistry {
        &self.resolvers
    }

    /// Register a resolver, returning the one previously held under `key`
    pub fn register_resolver(
        &self,
        key: impl Into<String>,
        resolver: impl ValueResolver + 'static,
    ) -> Option<SharedResolver> {
        self.resolvers.register(key, resolver)
    }

    pub fn unregister_resolver(&self, key: &str) {
        self.resolvers.unregister(key);
    }

    /// Diff two optional values of the same Rust type.
    ///
    /// `tag` is the root key path; `None` and `""` both mean no prefix.
    ///
    /// # Errors
    ///
    /// - `TypeMismatch` when two present values at the same key path have
    ///   different runtime types
    /// - `DepthExceeded` when the graph is deeper than `max_depth`
    pub fn calculate<T: ToValue + ?Sized>(
        &self,
        tag: Option<&str>,
        original: Option<&T>,
        current: Option<&T>,
    ) -> Result<DiffMap> {
        let original = original.map_or(Value::Null, ToValue::to_value);
        let current = current.map_or(Value::Null, ToValue::to_value);
        self.calculate_values(tag, &original, &current)
    }

    /// Diff two captured values.
    ///
    /// # Errors
    ///
    /// As [`Self::calculate`].
    pub fn calculate_values(
        &self,
        tag: Option<&str>,
        original: &Value,
        current: &Value,
    ) -> Result<DiffMap> {
        let tag = tag.unwrap_or_default();
        let start = Instant::now();
        log_op_start!("calculate", tag = tag);

        let mut out = DiffMap::new();
        match self.diff(tag, original, current, 0, &mut out) {
            Ok(()) => {
                log_op_end!(
                    "calculate",
                    duration_ms = start.elapsed().as_millis() as u64,
                    entry_count = out.len()
                );
                Ok(out)
            }
            Err(err) => {
                log_op_error!(
                    "calculate",
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(err.with_op("calculate"))
            }
        }
    }

    /// Serialise one optional value as if it had been removed.
    ///
    /// # Errors
    ///
    /// `DepthExceeded` when the graph is deeper than `max_depth`.
    pub fn resolve_object<T: ToValue + ?Sized>(
        &self,
        tag: Option<&str>,
        value: Option<&T>,
    ) -> Result<DiffMap> {
        let value = value.map_or(Value::Null, ToValue::to_value);
        self.resolve_value(tag, &value)
    }

    /// Serialise one captured value as if it had been removed.
    ///
    /// # Errors
    ///
    /// As [`Self::resolve_object`].
    pub fn resolve_value(&self, tag: Option<&str>, value: &Value) -> Result<DiffMap> {
        let tag = tag.unwrap_or_default();
        let start = Instant::now();
        log_op_start!("resolve_object", tag = tag);

        let mut out = DiffMap::new();
        match self.resolve(tag, value, 0, &mut out) {
            Ok(()) => {
                log_op_end!(
                    "resolve_object",
                    duration_ms = start.elapsed().as_millis() as u64,
                    entry_count = out.len()
                );
                Ok(out)
            }
            Err(err) => {
                log_op_error!(
                    "resolve_object",
                    err.clone(),
                    duration_ms = start.elapsed().as_millis() as u64
                );
                Err(err.with_op("resolve_object"))
            }
        }
    }

    pub(crate) fn check_depth(&self, tag: &str, depth: usize) -> Result<()> {
        if depth > self.config.max_depth {
            return Err(DiffError::DepthExceeded {
                tag: tag.to_string(),
                max_depth: self.config.max_depth,
            }
            .into());
        }
        Ok(())
    }

    /// Value substituted for `value` by the field's resolver, if any
    pub(crate) fn resolve_field<'v>(
        &self,
        field: &FieldDescriptor,
        value: &'v Value,
    ) -> Cow<'v, Value> {
        match field
            .resolver_key()
            .and_then(|key| self.resolvers.resolve(key, value))
        {
            Some(resolved) => Cow::Owned(resolved),
            None => Cow::Borrowed(value),
        }
    }

    fn diff(
        &self,
        tag: &str,
        original: &Value,
        current: &Value,
        depth: usize,
        out: &mut DiffMap,
    ) -> Result<()> {
        self.check_depth(tag, depth)?;

        match (original.is_null(), current.is_null()) {
            (true, true) => Ok(()),
            (false, false) => {
                if !original.same_type(current) {
                    return Err(DiffError::TypeMismatch {
                        tag: tag.to_string(),
                        original_type: original.type_name().unwrap_or_default().to_string(),
                        current_type: current.type_name().unwrap_or_default().to_string(),
                    }
                    .into());
                }
                self.differ_objects(tag, original, current, depth, out)
            }
            (true, false) => {
                let default = self.default_like(tag, current);
                self.differ_objects(tag, &default, current, depth, out)
            }
            (false, true) => self.resolve(tag, original, depth, out),
        }
    }

    /// Stand-in for an absent original: the default instance of `current`'s
    /// type, or its zero value when no default can be built.
    fn default_like(&self, tag: &str, current: &Value) -> Value {
        match current {
            Value::Record(record) => match Record::instantiate_default(record.descriptor()) {
                Ok(default) => Value::Record(default),
                Err(reason) => {
                    let err = ExError::from(DiffError::Instantiation {
                        type_name: record.type_name().to_string(),
                        reason,
                    });
                    tracing::warn!(
                        tag = tag,
                        type_name = record.type_name(),
                        err_code = err.code(),
                        "{}; diffing against a record with absent fields",
                        err.message()
                    );
                    current.zero_like()
                }
            },
            other => other.zero_like(),
        }
    }

    fn differ_objects(
        &self,
        tag: &str,
        original: &Value,
        current: &Value,
        depth: usize,
        out: &mut DiffMap,
    ) -> Result<()> {
        let prefix = child_prefix(tag);

        match (original, current) {
            (Value::Record(a), Value::Record(b)) => {
                tracing::trace!(tag = tag, type_name = a.type_name(), "diffing record");
                for field in a.fields() {
                    let name = field.descriptor.name;
                    let Some((raw_a, raw_b)) = readable_pair(field, b) else {
                        continue;
                    };
                    let value_a = self.resolve_field(&field.descriptor, raw_a);
                    let value_b = self.resolve_field(&field.descriptor, raw_b);
                    self.diff(&format!("{prefix}{name}"), &value_a, &value_b, depth + 1, out)?;
                }
                Ok(())
            }
            (Value::Sequence(a), Value::Sequence(b)) => {
                tracing::trace!(
                    tag = tag,
                    original_len = a.len(),
                    current_len = b.len(),
                    "diffing sequence"
                );
                for (i, (item_a, item_b)) in a.iter().zip(b.iter()).enumerate() {
                    self.diff(&format!("{prefix}idx{}", i + 1), item_a, item_b, depth + 1, out)?;
                }
                if a.len() != b.len() {
                    out.insert(format!("{prefix}count"), DiffEntry::count(a.len(), b.len()));
                }
                Ok(())
            }
            (Value::Mapping(a), Value::Mapping(b)) => {
                tracing::trace!(
                    tag = tag,
                    original_len = a.len(),
                    current_len = b.len(),
                    "diffing mapping"
                );
                for (key, item_a) in a {
                    let item_b = b.get(key).unwrap_or(&NULL);
                    let segment = escape_key_segment(key);
                    self.diff(&format!("{prefix}{segment}"), item_a, item_b, depth + 1, out)?;
                }
                if self.config.map_keys == MapKeyPolicy::Union {
                    for (key, item_b) in b.iter().filter(|(k, _)| !a.contains_key(*k)) {
                        let segment = escape_key_segment(key);
                        self.diff(&format!("{prefix}{segment}"), &NULL, item_b, depth + 1, out)?;
                    }
                }
                Ok(())
            }
            _ => {
                if !original.same_as(current) {
                    out.insert(tag, DiffEntry::updated(original.repr(), current.repr()));
                }
                Ok(())
            }
        }
    }
}

/// `tag + "."`, or nothing for the root tag
pub(crate) fn child_prefix(tag: &str) -> String {
    if tag.is_empty() {
        String::new()
    } else {
        format!("{tag}.")
    }
}

/// Both sides of a field, or `None` (after logging) when either is unreadable
fn readable_pair<'r>(
    field: &'r RecordField,
    b: &'r Record,
) -> Option<(&'r Value, &'r Value)> {
    let name = field.descriptor.name;
    let other = match b.field(name) {
        Some(other) => &other.value,
        None => {
            log_field_access(&FieldAccessError::unknown_field(b.type_name(), name));
            return None;
        }
    };
    match (&field.value, other) {
        (Ok(raw_a), Ok(raw_b)) => Some((raw_a, raw_b)),
        (Err(err), _) | (_, Err(err)) => {
            log_field_access(err);
            None
        }
    }
}

pub(crate) fn log_field_access(err: &FieldAccessError) {
    let ex_err = ExError::from(err.clone());
    tracing::warn!(
        type_name = %err.type_name,
        field = %err.field,
        err_code = ex_err.code(),
        "error accessing field \"{}\" in diff, skipping: {}",
        err.field,
        err.reason
    );
}
