//! Resolver Registry Tests
//!
//! Resolvers substitute a derived value for a tagged field before it is
//! compared. These tests cover lookup-style resolvers, pass-through for
//! unregistered keys, replacement semantics and concurrent use.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{keys, Employee, Order, Person};
use std::sync::Arc;
use std::thread;
use structdiff_core::{DiffEngine, DiffEntry, ToValue, Value, ValueResolver};

fn customer_names(value: &Value) -> Value {
    match value {
        Value::UInt(1) => Value::Text("Ann".to_string()),
        Value::UInt(2) => Value::Text("Bob".to_string()),
        Value::UInt(3) => Value::Text("Ann".to_string()),
        other => other.clone(),
    }
}

fn upper(value: &Value) -> Value {
    match value {
        Value::Text(s) => Value::Text(s.to_uppercase()),
        other => other.clone(),
    }
}

#[test]
fn test_lookup_resolver_reports_resolved_values() {
    // GIVEN an engine that maps customer ids to names
    let engine = DiffEngine::new();
    engine.register_resolver("customer_name", customer_names);

    let a = Order {
        customer: 1,
        total: 10,
    };
    let b = Order {
        customer: 2,
        total: 10,
    };

    // WHEN diffed
    let diff = engine.calculate(Some("order"), Some(&a), Some(&b)).unwrap();

    // THEN the entry carries the resolved names, not the raw ids
    assert_eq!(
        diff.get("order.customer"),
        Some(&DiffEntry::updated("Ann", "Bob"))
    );
}

#[test]
fn test_values_equal_after_resolution_are_silent() {
    let engine = DiffEngine::new();
    engine.register_resolver("customer_name", customer_names);

    // Ids 1 and 3 resolve to the same customer
    let a = Order {
        customer: 1,
        total: 10,
    };
    let b = Order {
        customer: 3,
        total: 10,
    };

    let diff = engine.calculate(None, Some(&a), Some(&b)).unwrap();
    assert!(diff.is_empty());
}

#[test]
fn test_unregistered_key_passes_raw_value_through() {
    let engine = DiffEngine::new();
    let a = Order {
        customer: 1,
        total: 10,
    };
    let b = Order {
        customer: 2,
        total: 12,
    };

    let diff = engine.calculate(None, Some(&a), Some(&b)).unwrap();

    assert_eq!(keys(&diff), ["customer", "total"]);
    assert_eq!(diff.get("customer"), Some(&DiffEntry::updated("1", "2")));
}

#[test]
fn test_resolver_does_not_mutate_source() {
    let engine = DiffEngine::new();
    engine.register_resolver("upper", upper);

    let a = Employee {
        name: "ann".to_string(),
        ..Employee::default()
    };
    let b = Employee {
        name: "bob".to_string(),
        ..Employee::default()
    };
    let before = (a.clone(), b.clone());

    let diff = engine.calculate(None, Some(&a), Some(&b)).unwrap();

    assert_eq!(diff.get("name"), Some(&DiffEntry::updated("ANN", "BOB")));
    assert_eq!((a, b), before);
}

#[test]
fn test_resolver_applies_in_resolve_only_pass() {
    let engine = DiffEngine::new();
    engine.register_resolver("customer_name", customer_names);

    let order = Order {
        customer: 2,
        total: 7,
    };
    let diff = engine.resolve_object(Some("o"), Some(&order)).unwrap();

    assert_eq!(diff.get("o.customer"), Some(&DiffEntry::removed("Bob")));
    assert_eq!(diff.get("o.total"), Some(&DiffEntry::removed("7")));
}

#[test]
fn test_register_replaces_and_unregister_restores_pass_through() {
    let engine = DiffEngine::new();
    assert!(engine.register_resolver("upper", upper).is_none());

    let replaced = engine.register_resolver("upper", |v: &Value| v.clone());
    let previous = replaced.expect("previous resolver returned");
    assert_eq!(
        previous.resolve(&Value::Text("x".to_string())),
        Value::Text("X".to_string())
    );

    engine.unregister_resolver("upper");
    assert!(!engine.resolvers().contains("upper"));
    assert!(engine.resolvers().is_empty());
}

#[test]
fn test_resolver_keys_are_engine_scoped() {
    let first = DiffEngine::new();
    let second = DiffEngine::new();
    first.register_resolver("upper", upper);

    assert_eq!(first.resolvers().keys(), ["upper"]);
    assert!(second.resolvers().is_empty());
}

#[test]
fn test_names_equal_after_resolution_with_friend_present() {
    let engine = DiffEngine::new();
    engine.register_resolver("upper", upper);

    let mut a = Employee::default();
    a.person.friend = Some(Box::new(Person::new("x", "y")));
    a.name = "kim".to_string();
    let mut b = a.clone();
    b.name = "KIM".to_string();

    let diff = engine.calculate(None, Some(&a), Some(&b)).unwrap();
    assert!(diff.is_empty(), "resolved names are equal: {:?}", diff);
}

#[test]
fn test_concurrent_calculate_and_register() {
    // GIVEN one engine shared by readers and a writer
    let engine = Arc::new(DiffEngine::new());
    engine.register_resolver("customer_name", customer_names);

    let a = Order {
        customer: 1,
        total: 1,
    }
    .to_value();
    let b = Order {
        customer: 2,
        total: 1,
    }
    .to_value();

    // WHEN diffs run while the resolver is re-registered repeatedly
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let (a, b) = (a.clone(), b.clone());
            thread::spawn(move || {
                for _ in 0..200 {
                    let diff = engine.calculate_values(None, &a, &b).unwrap();
                    assert_eq!(diff.len(), 1);
                }
            })
        })
        .collect();
    let writer = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || {
            for _ in 0..200 {
                engine.register_resolver("customer_name", customer_names);
            }
        })
    };

    // THEN every traversal completes with a single customer entry
    for handle in readers {
        handle.join().unwrap();
    }
    writer.join().unwrap();
    assert!(engine.resolvers().contains("customer_name"));
}
