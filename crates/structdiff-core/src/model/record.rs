//! Captured instance of a participating type.

use crate::errors::FieldAccessError;
use crate::introspect::fields_of;
use crate::model::descriptor::{Diffable, FieldDescriptor, TypeDescriptor};
use crate::model::value::Value;
use std::fmt;

/// One participating field of a captured record.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    pub descriptor: FieldDescriptor,
    /// The captured value, or why it could not be read
    pub value: Result<Value, FieldAccessError>,
}

/// Snapshot of a participating type's fields, in introspection order.
#[derive(Debug, Clone)]
pub struct Record {
    descriptor: &'static TypeDescriptor,
    fields: Vec<RecordField>,
}

impl Record {
    /// Read every participating field of `value`
    pub fn capture<T: Diffable>(value: &T) -> Self {
        let descriptor = T::descriptor();
        let fields = fields_of(descriptor)
            .into_iter()
            .map(|field| RecordField {
                descriptor: field,
                value: value.read_field(field.name),
            })
            .collect();
        Self { descriptor, fields }
    }

    /// Build a record from explicitly provided field values.
    ///
    /// Fields of the descriptor that are not provided are captured as
    /// [`Value::Null`]; provided names the descriptor does not declare are
    /// ignored.
    pub fn from_values<I, S>(descriptor: &'static TypeDescriptor, values: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: AsRef<str>,
    {
        let mut record = Self::absent_fields(descriptor);
        for (name, value) in values {
            if let Some(slot) = record
                .fields
                .iter_mut()
                .find(|f| f.descriptor.name == name.as_ref())
            {
                slot.value = Ok(value);
            }
        }
        record
    }

    /// A record of the given type with every field absent
    pub fn absent_fields(descriptor: &'static TypeDescriptor) -> Self {
        let fields = fields_of(descriptor)
            .into_iter()
            .map(|field| RecordField {
                descriptor: field,
                value: Ok(Value::Null),
            })
            .collect();
        Self { descriptor, fields }
    }

    /// Build the type's default instance through its `instantiate` hook.
    ///
    /// # Errors
    ///
    /// Fails when the type has no hook or the hook produced a value of a
    /// different type. The message is suitable for an instantiation warning.
    pub fn instantiate_default(descriptor: &'static TypeDescriptor) -> Result<Record, String> {
        let instantiate = descriptor
            .instantiate
            .ok_or_else(|| "type declares no default constructor".to_string())?;
        match instantiate() {
            Value::Record(record) if record.descriptor().is_same_type(descriptor) => Ok(record),
            other => Err(format!(
                "default constructor produced {} instead of a record",
                other.type_name().unwrap_or("null")
            )),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.descriptor.name
    }

    pub fn descriptor(&self) -> &'static TypeDescriptor {
        self.descriptor
    }

    pub fn fields(&self) -> &[RecordField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&RecordField> {
        self.fields.iter().find(|f| f.descriptor.name == name)
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor.is_same_type(other.descriptor) && self.fields == other.fields
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.type_name())?;
        for (i, field) in self.fields.iter().enumerate() {
            f.write_str(if i == 0 { " " } else { ", " })?;
            match &field.value {
                Ok(value) => write!(f, "{}: {}", field.descriptor.name, value)?,
                Err(_) => write!(f, "{}: <inaccessible>", field.descriptor.name)?,
            }
        }
        if self.fields.is_empty() {
            f.write_str("}")
        } else {
            f.write_str(" }")
        }
    }
}
