//! Shallow apply (patch) of participating fields.
//!
//! `apply()` copies every participating field of `source` onto `target`,
//! last writer wins. It does not consult a computed [`DiffMap`]: what gets
//! copied is decided by the type's field markup alone, and resolvers are not
//! involved.
//!
//! ## Example
//!
//! ```
//! use structdiff_core::{apply, diffable};
//!
//! #[derive(Debug, Clone, Default, PartialEq)]
//! struct Contact {
//!     email: String,
//!     phone: String,
//!     cached_display: String,
//! }
//!
//! diffable!(Contact: Default { email, phone });
//!
//! let stale = Contact { email: "a@x".into(), phone: "1".into(), cached_display: "A".into() };
//! let fresh = Contact { email: "b@x".into(), phone: "2".into(), cached_display: "B".into() };
//!
//! let patched = apply(stale, &fresh);
//! assert_eq!(patched.email, "b@x");
//! assert_eq!(patched.phone, "2");
//! assert_eq!(patched.cached_display, "A");
//! ```
//!
//! [`DiffMap`]: crate::DiffMap

use crate::diff::engine::log_field_access;
use crate::introspect::fields_of_type;
use crate::model::descriptor::Diffable;
use crate::{log_op_end, log_op_start};
use std::time::Instant;

/// Copy every participating field from `source` onto `target`.
///
/// Fields that cannot be written are logged and skipped. Returns the
/// patched target.
pub fn apply<T: Diffable>(mut target: T, source: &T) -> T {
    apply_in_place(&mut target, source);
    target
}

/// Copy every participating field from `source` onto `target` in place.
///
/// Returns the number of fields copied.
pub fn apply_in_place<T: Diffable>(target: &mut T, source: &T) -> usize {
    let type_name = T::descriptor().name;
    let start = Instant::now();
    log_op_start!("apply", type_name = type_name);

    let mut copied = 0usize;
    for field in fields_of_type::<T>() {
        match target.copy_field(field.name, source) {
            Ok(()) => copied += 1,
            Err(err) => log_field_access(&err),
        }
    }

    log_op_end!(
        "apply",
        duration_ms = start.elapsed().as_millis() as u64,
        copied = copied
    );
    copied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FieldAccessError;
    use crate::model::descriptor::{FieldDescriptor, TypeDescriptor};
    use crate::model::value::Value;

    /// Declares a field that refuses writes.
    #[derive(Debug, Clone, PartialEq)]
    struct Locked {
        open: u32,
        sealed: u32,
    }

    static LOCKED: TypeDescriptor = TypeDescriptor {
        name: "Locked",
        path: concat!(module_path!(), "::Locked"),
        parent: None,
        fields: &[FieldDescriptor::new("sealed"), FieldDescriptor::new("open")],
        instantiate: None,
    };

    impl Diffable for Locked {
        fn descriptor() -> &'static TypeDescriptor {
            &LOCKED
        }

        fn read_field(&self, name: &str) -> Result<Value, FieldAccessError> {
            match name {
                "open" => Ok(Value::UInt(u64::from(self.open))),
                "sealed" => Ok(Value::UInt(u64::from(self.sealed))),
                _ => Err(FieldAccessError::unknown_field("Locked", name)),
            }
        }

        fn copy_field(&mut self, name: &str, source: &Self) -> Result<(), FieldAccessError> {
            match name {
                "open" => {
                    self.open = source.open;
                    Ok(())
                }
                _ => Err(FieldAccessError::inaccessible("Locked", name, "read-only")),
            }
        }
    }

    #[test]
    fn test_unwritable_field_skipped() {
        let mut target = Locked { open: 1, sealed: 1 };
        let source = Locked { open: 2, sealed: 2 };
        let copied = apply_in_place(&mut target, &source);
        assert_eq!(copied, 1);
        assert_eq!(target, Locked { open: 2, sealed: 1 });
    }
}
