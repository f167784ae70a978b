//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Traversal context
pub const FIELD_TAG: &str = "tag";
pub const FIELD_TYPE_NAME: &str = "type_name";
pub const FIELD_FIELD: &str = "field";
pub const FIELD_RESOLVER_KEY: &str = "resolver_key";
pub const FIELD_DEPTH: &str = "depth";

// Result sizes
pub const FIELD_ENTRY_COUNT: &str = "entry_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
