pub mod descriptor;
pub mod record;
pub mod value;

pub use descriptor::{Diffable, FieldDescriptor, TypeDescriptor};
pub use record::{Record, RecordField};
pub use value::{ToValue, Value};
