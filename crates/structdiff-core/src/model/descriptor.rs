//! Participation markup: which types and fields the engine looks at.

use crate::errors::FieldAccessError;
use crate::model::value::Value;

/// A field opted into comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    pub name: &'static str,
    /// Key of the resolver applied before comparison; empty means none
    pub resolver_key: &'static str,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            resolver_key: "",
        }
    }

    pub const fn with_resolver(name: &'static str, resolver_key: &'static str) -> Self {
        Self { name, resolver_key }
    }

    /// The resolver key, if the field carries a non-empty one
    pub fn resolver_key(&self) -> Option<&'static str> {
        if self.resolver_key.is_empty() {
            None
        } else {
            Some(self.resolver_key)
        }
    }
}

/// Static description of a participating type.
#[derive(Debug)]
pub struct TypeDescriptor {
    /// Short name used in messages and output
    pub name: &'static str,
    /// Module-qualified name; two descriptors denote the same type iff equal
    pub path: &'static str,
    /// Descriptor of the embedded base type whose fields are inherited
    pub parent: Option<fn() -> &'static TypeDescriptor>,
    /// Fields declared directly on this type, in declaration order
    pub fields: &'static [FieldDescriptor],
    /// Builds the default instance used when the original side is absent
    pub instantiate: Option<fn() -> Value>,
}

impl TypeDescriptor {
    /// Whether both descriptors describe the same type
    pub fn is_same_type(&self, other: &TypeDescriptor) -> bool {
        self.path == other.path
    }

    /// This descriptor followed by its ancestors, most-derived first
    pub fn lineage(&'static self) -> impl Iterator<Item = &'static TypeDescriptor> {
        std::iter::successors(Some(self), |d| d.parent.map(|p| p()))
    }
}

/// A type that opts into field-level structural diffing.
///
/// Usually implemented through the [`diffable!`](crate::diffable) macro.
/// Hand-written implementations model inheritance by pointing
/// `TypeDescriptor::parent` at the embedded base type and delegating
/// inherited field access to it.
pub trait Diffable: Sized {
    fn descriptor() -> &'static TypeDescriptor;

    /// Capture the current value of a participating field.
    ///
    /// # Errors
    ///
    /// Returns [`FieldAccessError`] when the field is unknown or cannot be read.
    fn read_field(&self, name: &str) -> Result<Value, FieldAccessError>;

    /// Overwrite a participating field with the value held by `source`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldAccessError`] when the field is unknown or cannot be written.
    fn copy_field(&mut self, name: &str, source: &Self) -> Result<(), FieldAccessError>;
}

/// Generate [`Diffable`] and [`ToValue`](crate::ToValue) for a struct.
///
/// Each listed field participates; `field => "key"` tags it with a resolver
/// key. `Type: Default { .. }` wires default reconstruction to `Default`.
///
/// ```
/// use structdiff_core::{diffable, Diffable};
///
/// #[derive(Debug, Clone, Default)]
/// struct Account {
///     owner: String,
///     balance: i64,
///     internal_note: String,
/// }
///
/// diffable!(Account: Default {
///     owner,
///     balance => "money",
/// });
///
/// let names: Vec<_> = Account::descriptor().fields.iter().map(|f| f.name).collect();
/// assert_eq!(names, ["owner", "balance"]);
/// ```
#[macro_export]
macro_rules! diffable {
    ($ty:ident : Default { $($body:tt)* }) => {
        $crate::diffable!(@impl $ty, [default], { $($body)* });
    };
    ($ty:ident { $($body:tt)* }) => {
        $crate::diffable!(@impl $ty, [], { $($body)* });
    };
    (@key) => { "" };
    (@key $key:literal) => { $key };
    (@instantiate $ty:ident, []) => { None };
    (@instantiate $ty:ident, [default]) => {{
        fn instantiate() -> $crate::Value {
            $crate::ToValue::to_value(&<$ty as ::core::default::Default>::default())
        }
        Some(instantiate as fn() -> $crate::Value)
    }};
    (@impl $ty:ident, [$($inst:ident)?], { $( $field:ident $(=> $key:literal)? ),* $(,)? }) => {
        impl $crate::Diffable for $ty {
            fn descriptor() -> &'static $crate::TypeDescriptor {
                static DESCRIPTOR: $crate::TypeDescriptor = $crate::TypeDescriptor {
                    name: stringify!($ty),
                    path: concat!(module_path!(), "::", stringify!($ty)),
                    parent: None,
                    fields: &[
                        $( $crate::FieldDescriptor::with_resolver(
                            stringify!($field),
                            $crate::diffable!(@key $($key)?),
                        ), )*
                    ],
                    instantiate: $crate::diffable!(@instantiate $ty, [$($inst)?]),
                };
                &DESCRIPTOR
            }

            fn read_field(
                &self,
                name: &str,
            ) -> ::core::result::Result<$crate::Value, $crate::FieldAccessError> {
                match name {
                    $( stringify!($field) => Ok($crate::ToValue::to_value(&self.$field)), )*
                    _ => Err($crate::FieldAccessError::unknown_field(stringify!($ty), name)),
                }
            }

            fn copy_field(
                &mut self,
                name: &str,
                source: &Self,
            ) -> ::core::result::Result<(), $crate::FieldAccessError> {
                match name {
                    $( stringify!($field) => {
                        self.$field = ::core::clone::Clone::clone(&source.$field);
                        Ok(())
                    } )*
                    _ => Err($crate::FieldAccessError::unknown_field(stringify!($ty), name)),
                }
            }
        }

        impl $crate::ToValue for $ty {
            fn to_value(&self) -> $crate::Value {
                $crate::Value::Record($crate::Record::capture(self))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    static BASE: TypeDescriptor = TypeDescriptor {
        name: "Base",
        path: concat!(module_path!(), "::Base"),
        parent: None,
        fields: &[FieldDescriptor::new("id")],
        instantiate: None,
    };

    fn base() -> &'static TypeDescriptor {
        &BASE
    }

    static DERIVED: TypeDescriptor = TypeDescriptor {
        name: "Derived",
        path: concat!(module_path!(), "::Derived"),
        parent: Some(base),
        fields: &[FieldDescriptor::with_resolver("label", "upper")],
        instantiate: None,
    };

    #[test]
    fn test_empty_resolver_key_is_none() {
        assert_eq!(FieldDescriptor::new("x").resolver_key(), None);
        assert_eq!(
            FieldDescriptor::with_resolver("x", "k").resolver_key(),
            Some("k")
        );
    }

    #[test]
    fn test_type_identity_is_module_qualified() {
        mod other {
            #[derive(Debug, Clone, Default)]
            pub struct Base {
                pub id: u32,
            }
            crate::diffable!(Base: Default { id });
        }

        let other = <other::Base as Diffable>::descriptor();
        assert_eq!(other.name, BASE.name);
        assert!(other.path.ends_with("other::Base"));
        assert!(!other.is_same_type(&BASE));
        assert!(BASE.is_same_type(&BASE));
    }

    #[test]
    fn test_lineage_is_most_derived_first() {
        let names: Vec<_> = DERIVED.lineage().map(|d| d.name).collect();
        assert_eq!(names, ["Derived", "Base"]);
    }
}
