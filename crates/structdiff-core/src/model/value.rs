//! Runtime value model walked by the diff engine.
//!
//! Every value in a compared graph is captured as a [`Value`]. Participating
//! types become [`Value::Record`]; everything else is classified by shape
//! (sequence, mapping, scalar) the same way `serde_json::Value` is.

use crate::model::record::Record;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;

/// Type name shared by every numeric variant.
pub const NUMBER_TYPE: &str = "number";
pub const BOOL_TYPE: &str = "bool";
pub const STRING_TYPE: &str = "string";
pub const SEQUENCE_TYPE: &str = "sequence";
pub const MAPPING_TYPE: &str = "mapping";

/// A captured graph value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value (`None`, JSON `null`)
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    /// Non-participating value compared by its textual representation
    Opaque { type_name: String, repr: String },
    Sequence(Vec<Value>),
    Mapping(BTreeMap<String, Value>),
    Record(Record),
}

impl Value {
    /// Wrap a non-participating value that is only comparable through its
    /// `Display` output.
    pub fn opaque(type_name: impl Into<String>, value: &impl fmt::Display) -> Self {
        Value::Opaque {
            type_name: type_name.into(),
            repr: value.to_string(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Runtime type used by the type-equality precondition.
    ///
    /// `None` for [`Value::Null`], which is compatible with every type.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(BOOL_TYPE),
            Value::Int(_) | Value::UInt(_) | Value::Float(_) => Some(NUMBER_TYPE),
            Value::Text(_) => Some(STRING_TYPE),
            Value::Opaque { type_name, .. } => Some(type_name),
            Value::Sequence(_) => Some(SEQUENCE_TYPE),
            Value::Mapping(_) => Some(MAPPING_TYPE),
            Value::Record(record) => Some(record.type_name()),
        }
    }

    /// External textual representation stored in diff entries.
    pub fn repr(&self) -> String {
        self.to_string()
    }

    /// Type-equality precondition of a comparison.
    ///
    /// Records are told apart by their module-qualified type; every other
    /// value by [`Self::type_name`].
    pub fn same_type(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Record(a), Value::Record(b)) => a.descriptor().is_same_type(b.descriptor()),
            _ => self.type_name() == other.type_name(),
        }
    }

    /// Value equality with numeric variants compared by exact magnitude.
    ///
    /// NaN equals NaN, so that every value is the same as itself.
    pub fn same_as(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::UInt(b)) | (Value::UInt(b), Value::Int(a)) => {
                u64::try_from(*a).is_ok_and(|a| a == *b)
            }
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                float_as_int::<i64>(*b).is_some_and(|b| b == *a)
            }
            (Value::UInt(a), Value::Float(b)) | (Value::Float(b), Value::UInt(a)) => {
                float_as_int::<u64>(*b).is_some_and(|b| b == *a)
            }
            (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Sequence(a), Value::Sequence(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_as(y))
            }
            (Value::Mapping(a), Value::Mapping(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|((ka, va), (kb, vb))| ka == kb && va.same_as(vb))
            }
            _ => self == other,
        }
    }

    /// The zero value of this value's type.
    ///
    /// Records are returned with every field absent; callers that can
    /// instantiate a proper default should prefer
    /// [`Record::instantiate_default`].
    pub fn zero_like(&self) -> Value {
        match self {
            Value::Null => Value::Null,
            Value::Bool(_) => Value::Bool(false),
            Value::Int(_) => Value::Int(0),
            Value::UInt(_) => Value::UInt(0),
            Value::Float(_) => Value::Float(0.0),
            Value::Text(_) => Value::Text(String::new()),
            Value::Opaque { type_name, .. } => Value::Opaque {
                type_name: type_name.clone(),
                repr: String::new(),
            },
            Value::Sequence(_) => Value::Sequence(Vec::new()),
            Value::Mapping(_) => Value::Mapping(BTreeMap::new()),
            Value::Record(record) => Value::Record(Record::absent_fields(record.descriptor())),
        }
    }
}

/// `value` as an integer of type `T`, when it is integral and in range.
fn float_as_int<T: TryFrom<i128>>(value: f64) -> Option<T> {
    // 2^127; every integral f64 below it converts to i128 exactly
    const LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;
    if value.fract() != 0.0 || !(-LIMIT..LIMIT).contains(&value) {
        return None;
    }
    T::try_from(value as i128).ok()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::UInt(n) => write!(f, "{}", n),
            Value::Float(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
            Value::Opaque { repr, .. } => f.write_str(repr),
            Value::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Mapping(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
            Value::Record(record) => write!(f, "{}", record),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Conversion of a Rust value into the engine's [`Value`] model.
///
/// Participating types get this implementation from the `diffable!` macro.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl ToValue for serde_json::Value {
    fn to_value(&self) -> Value {
        Value::from(self.clone())
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! signed_to_value {
    ($($ty:ty),*) => {
        $(impl ToValue for $ty {
            fn to_value(&self) -> Value {
                Value::Int(i64::from(*self))
            }
        })*
    };
}

macro_rules! unsigned_to_value {
    ($($ty:ty),*) => {
        $(impl ToValue for $ty {
            fn to_value(&self) -> Value {
                Value::UInt(u64::from(*self))
            }
        })*
    };
}

signed_to_value!(i8, i16, i32, i64);
unsigned_to_value!(u8, u16, u32, u64);

impl ToValue for isize {
    fn to_value(&self) -> Value {
        Value::Int(*self as i64)
    }
}

impl ToValue for usize {
    fn to_value(&self) -> Value {
        Value::UInt(*self as u64)
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl ToValue for char {
    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, ToValue::to_value)
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::Sequence(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for VecDeque<T> {
    fn to_value(&self) -> Value {
        Value::Sequence(self.iter().map(ToValue::to_value).collect())
    }
}

impl<K: ToString, V: ToValue> ToValue for BTreeMap<K, V> {
    fn to_value(&self) -> Value {
        Value::Mapping(
            self.iter()
                .map(|(k, v)| (k.to_string(), v.to_value()))
                .collect(),
        )
    }
}

impl<K: ToString, V: ToValue, S> ToValue for HashMap<K, V, S> {
    fn to_value(&self) -> Value {
        Value::Mapping(
            self.iter()
                .map(|(k, v)| (k.to_string(), v.to_value()))
                .collect(),
        )
    }
}
