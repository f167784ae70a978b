#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{Gadget, Vault};
use structdiff_core::errors::{ExError, ExErrorKind};
use structdiff_core::logging_facility::test_capture::init_test_capture;
use structdiff_core::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use structdiff_core::{apply_in_place, log_op_end, log_op_error, log_op_start, DiffEngine, Value};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let events = capture.events();
    let start_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START))
        .collect();

    assert!(
        !start_events.is_empty(),
        "Should have captured at least one start event"
    );
    assert_eq!(
        start_events[0].component.as_deref(),
        Some("logging_facility_tests")
    );
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events = capture.events_for_op(op_name);
    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].event.as_deref(), Some(EVENT_END));
    assert_eq!(end_events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code_and_tag() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = ExError::new(ExErrorKind::DepthExceeded).with_tag("a.b.c");
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events = capture.events_for_op(op_name);
    assert_eq!(error_events.len(), 1, "Should have exactly one error event");

    let error_event = &error_events[0];
    assert_eq!(error_event.event.as_deref(), Some(EVENT_END_ERROR));
    assert_eq!(error_event.field("err_code"), Some("ERR_DEPTH_EXCEEDED"));
    assert_eq!(error_event.field("err_kind"), Some("DepthExceeded"));
    assert_eq!(error_event.tag.as_deref(), Some("a.b.c"));
}

#[test]
fn test_calculate_emits_boundary_events() {
    let capture = init_test_capture();
    let tag = "test_calculate_boundary_unique_4";

    DiffEngine::new()
        .calculate(Some(tag), Some(&1u8), Some(&2u8))
        .unwrap();

    let starts = capture.count_events(|e| {
        e.op.as_deref() == Some("calculate")
            && e.event.as_deref() == Some(EVENT_START)
            && e.tag.as_deref() == Some(tag)
    });
    assert_eq!(starts, 1);
    capture.assert_event_exists("calculate", EVENT_END);
}

#[test]
fn test_type_mismatch_logged_as_end_error() {
    let capture = init_test_capture();
    let tag = "test_mismatch_unique_5";

    let result = DiffEngine::new().calculate_values(
        Some(tag),
        &Value::Bool(true),
        &Value::Text("true".to_string()),
    );
    assert!(result.is_err());

    let errors = capture.count_events(|e| {
        e.op.as_deref() == Some("calculate")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.tag.as_deref() == Some(tag)
            && e.field("err_code") == Some("ERR_TYPE_MISMATCH")
    });
    assert_eq!(errors, 1);
}

#[test]
fn test_unreadable_field_logged_as_warning() {
    let capture = init_test_capture();

    let a = Vault {
        owner: "log_vault_owner_a".to_string(),
        secret: String::new(),
    };
    let b = Vault {
        owner: "log_vault_owner_b".to_string(),
        secret: String::new(),
    };
    DiffEngine::new()
        .calculate(Some("test_vault_unique_6"), Some(&a), Some(&b))
        .unwrap();

    let warnings = capture.warnings_mentioning("error accessing field \"secret\"");
    assert!(!warnings.is_empty());
    let warning = &warnings[0];
    assert_eq!(warning.field("type_name"), Some("Vault"));
    assert_eq!(warning.field("err_code"), Some("ERR_FIELD_ACCESS"));
}

#[test]
fn test_missing_default_logged_as_warning() {
    let capture = init_test_capture();
    let tag = "test_gadget_unique_7";

    let current = Gadget {
        label: "x".to_string(),
        weight: 1,
    };
    DiffEngine::new()
        .calculate(Some(tag), None, Some(&current))
        .unwrap();

    let warnings = capture.warnings_mentioning("cannot instantiate default Gadget");
    assert!(warnings.iter().any(|w| w.tag.as_deref() == Some(tag)
        && w.field("err_code") == Some("ERR_INSTANTIATION")));
}

#[test]
fn test_apply_skips_and_logs_unwritable_field() {
    let capture = init_test_capture();

    let mut target = Vault::default();
    let source = Vault {
        owner: "test_apply_unique_8".to_string(),
        secret: "s".to_string(),
    };
    let copied = apply_in_place(&mut target, &source);

    assert_eq!(copied, 1);
    assert_eq!(target.owner, "test_apply_unique_8");
    assert!(target.secret.is_empty());
    capture.assert_event_exists("apply", EVENT_END);
    assert!(!capture
        .warnings_mentioning("error accessing field \"secret\"")
        .is_empty());
}
