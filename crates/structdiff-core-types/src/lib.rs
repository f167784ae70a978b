//! Core types shared across structdiff facilities
//!
//! This crate provides the canonical schema constants used by both the
//! error and logging facilities of `structdiff-core` and by the CLI:
//!
//! - **Field keys**: structured-logging field names
//! - **Event names**: operation boundary markers

pub mod schema;
