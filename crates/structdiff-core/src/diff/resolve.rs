//! Resolve-only pass.
//!
//! Serialises a single value into the [`DiffMap`] shape, as if it were
//! compared against nothing. Used when the current side of a comparison is
//! absent so that a vanished subtree is recorded in full.

use crate::diff::engine::{child_prefix, log_field_access, DiffEngine};
use crate::diff::model::{escape_key_segment, DiffEntry, DiffMap};
use crate::errors::Result;
use crate::model::value::Value;

impl DiffEngine {
    pub(crate) fn resolve(
        &self,
        tag: &str,
        value: &Value,
        depth: usize,
        out: &mut DiffMap,
    ) -> Result<()> {
        self.check_depth(tag, depth)?;
        let prefix = child_prefix(tag);

        match value {
            Value::Record(record) => {
                tracing::trace!(tag = tag, type_name = record.type_name(), "resolving record");
                for field in record.fields() {
                    let raw = match &field.value {
                        Ok(raw) => raw,
                        Err(err) => {
                            log_field_access(err);
                            continue;
                        }
                    };
                    let resolved = self.resolve_field(&field.descriptor, raw);
                    let name = field.descriptor.name;
                    self.resolve(&format!("{prefix}{name}"), &resolved, depth + 1, out)?;
                }
            }
            Value::Sequence(items) if !items.is_empty() => {
                for (i, item) in items.iter().enumerate() {
                    self.resolve(&format!("{prefix}idx{}", i + 1), item, depth + 1, out)?;
                }
            }
            Value::Mapping(entries) if !entries.is_empty() => {
                for (key, item) in entries {
                    let segment = escape_key_segment(key);
                    self.resolve(&format!("{prefix}{segment}"), item, depth + 1, out)?;
                }
            }
            // Scalars, absent values and empty containers
            other => {
                out.insert(tag, DiffEntry::removed(other.repr()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::diff::model::{ChangeKind, DiffEntry};
    use crate::model::value::Value;
    use crate::DiffEngine;
    use std::collections::BTreeMap;

    #[test]
    fn test_absent_value_has_empty_repr() {
        let diff = DiffEngine::new().resolve_value(Some("gone"), &Value::Null).unwrap();
        assert_eq!(diff.get("gone"), Some(&DiffEntry::removed("")));
    }

    #[test]
    fn test_sequence_one_entry_per_element() {
        let diff = DiffEngine::new()
            .resolve_object(Some("tags"), Some(&vec!["a", "b"]))
            .unwrap();
        let keys: Vec<_> = diff.keys().collect();
        assert_eq!(keys, ["tags.idx1", "tags.idx2"]);
        assert!(diff.iter().all(|(_, e)| e.kind == ChangeKind::Removed));
    }

    #[test]
    fn test_empty_sequence_recorded_at_tag() {
        let diff = DiffEngine::new()
            .resolve_object(Some("tags"), Some(&Vec::<String>::new()))
            .unwrap();
        assert_eq!(diff.get("tags"), Some(&DiffEntry::removed("[]")));
    }

    #[test]
    fn test_mapping_one_entry_per_key() {
        let mut map = BTreeMap::new();
        map.insert("x", 1);
        map.insert("y", 2);
        let diff = DiffEngine::new().resolve_object(None, Some(&map)).unwrap();
        assert_eq!(diff.get("x"), Some(&DiffEntry::removed("1")));
        assert_eq!(diff.get("y"), Some(&DiffEntry::removed("2")));
    }
}
