//! Demo command
//!
//! Usage: structdiff demo [--format <FORMAT>]
//!
//! Diffs two persons in both directions, then applies one onto the other.

use super::{render, OutputFormat};
use clap::Args;
use structdiff_core::{apply, diffable, DiffEngine, Value};

#[derive(Debug, Clone, Default, PartialEq)]
struct Person {
    name: String,
    surname: String,
    friend: Option<Box<Person>>,
}

diffable!(Person: Default {
    name => "trimmed",
    surname => "trimmed",
    friend,
});

impl Person {
    fn new(name: &str, surname: &str) -> Self {
        Self {
            name: name.to_string(),
            surname: surname.to_string(),
            friend: None,
        }
    }
}

#[derive(Debug, Args)]
pub struct DemoArgs {
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

fn trimmed(value: &Value) -> Value {
    match value {
        Value::Text(s) => Value::Text(s.trim().to_string()),
        other => other.clone(),
    }
}

/// Execute demo command
pub fn execute(args: DemoArgs) -> Result<(), Box<dyn std::error::Error>> {
    let engine = DiffEngine::new();
    engine.register_resolver("trimmed", trimmed);

    let a = Person::new("Arnold", "Schwarzenegger");
    let mut b = Person::new("Tom", "Cruise ");
    b.friend = Some(Box::new(Person::new("Sylvester", "Stallone")));

    println!("# a -> b");
    let forward = engine.calculate(Some(""), Some(&a), Some(&b))?;
    print!("{}", render(&forward, args.format)?);

    println!("# b -> a");
    let reverse = engine.calculate(Some(""), Some(&b), Some(&a))?;
    print!("{}", render(&reverse, args.format)?);

    println!("# apply(a, b) -> b");
    let patched = apply(a, &b);
    let remaining = engine.calculate(Some(""), Some(&patched), Some(&b))?;
    print!("{}", render(&remaining, args.format)?);

    Ok(())
}
