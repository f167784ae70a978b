//! Person Diff Demonstration
//!
//! Walks through the two-person scenario:
//! 1. Diff against an absent nested friend
//! 2. The reverse diff, recording the friend as removed
//! 3. Apply, after which nothing differs
#![allow(clippy::unwrap_used, clippy::expect_used)]

use structdiff_core::diff::render_human_summary;
use structdiff_core::logging_facility::{init, Profile};
use structdiff_core::{apply, diffable, DiffEngine};

#[derive(Debug, Clone, Default, PartialEq)]
struct Person {
    name: String,
    surname: String,
    friend: Option<Box<Person>>,
}

diffable!(Person: Default { name, surname, friend });

fn person(name: &str, surname: &str) -> Person {
    Person {
        name: name.to_string(),
        surname: surname.to_string(),
        friend: None,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init(Profile::Development);
    let engine = DiffEngine::new();

    let a = person("Arnold", "Schwarzenegger");
    let mut b = person("Tom", "Cruise");
    b.friend = Some(Box::new(person("Sylvester", "Stallone")));

    println!("## a -> b\n");
    let forward = engine.calculate(Some(""), Some(&a), Some(&b))?;
    print!("{}", render_human_summary(&forward));

    println!("\n## b -> a\n");
    let reverse = engine.calculate(Some(""), Some(&b), Some(&a))?;
    print!("{}", render_human_summary(&reverse));

    println!("\n## apply(a, b)\n");
    let patched = apply(a, &b);
    assert_eq!(patched, b);
    let remaining = engine.calculate(Some(""), Some(&patched), Some(&b))?;
    print!("{}", render_human_summary(&remaining));

    Ok(())
}
