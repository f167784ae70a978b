//! Field introspection over participating types.
//!
//! Resolves the ordered set of participating fields of a type, including
//! those inherited from its ancestors. Pure and stateless.

use crate::model::descriptor::{Diffable, FieldDescriptor, TypeDescriptor};
use std::collections::HashSet;

/// Every participating field of `descriptor` and its ancestors.
///
/// Order is the most-derived type's fields in declaration order, followed by
/// each ancestor's remaining fields. When a name is declared more than once
/// the most-derived declaration wins, resolver key included.
pub fn fields_of(descriptor: &'static TypeDescriptor) -> Vec<FieldDescriptor> {
    let mut seen = HashSet::new();
    descriptor
        .lineage()
        .flat_map(|d| d.fields.iter().copied())
        .filter(|field| seen.insert(field.name))
        .collect()
}

/// [`fields_of`] for a statically known participating type
pub fn fields_of_type<T: Diffable>() -> Vec<FieldDescriptor> {
    fields_of(T::descriptor())
}
