//! Shared fixtures for structdiff-core integration tests.
#![allow(dead_code)]

use std::collections::BTreeMap;
use structdiff_core::{
    diffable, Diffable, FieldAccessError, FieldDescriptor, Record, ToValue, TypeDescriptor, Value,
};

/// The example domain object, including a self-referential friend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    pub name: String,
    pub surname: String,
    pub friend: Option<Box<Person>>,
    /// Not marked; must never show up in a diff
    pub nickname: String,
}

diffable!(Person: Default { name, surname, friend });

impl Person {
    pub fn new(name: &str, surname: &str) -> Self {
        Self {
            name: name.to_string(),
            surname: surname.to_string(),
            ..Self::default()
        }
    }

    pub fn with_friend(mut self, friend: Person) -> Self {
        self.friend = Some(Box::new(friend));
        self
    }

    pub fn with_nickname(mut self, nickname: &str) -> Self {
        self.nickname = nickname.to_string();
        self
    }
}

/// `a` and `b` of the reference scenario
pub fn arnold_and_tom() -> (Person, Person) {
    let a = Person::new("Arnold", "Schwarzenegger");
    let b = Person::new("Tom", "Cruise").with_friend(Person::new("Sylvester", "Stallone"));
    (a, b)
}

/// Embeds a `Person` as its base type and shadows its `name`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Employee {
    pub person: Person,
    pub name: String,
    pub employer: String,
    pub badge: u32,
}

fn employee_default() -> Value {
    Employee::default().to_value()
}

static EMPLOYEE: TypeDescriptor = TypeDescriptor {
    name: "Employee",
    path: concat!(module_path!(), "::Employee"),
    parent: Some(<Person as Diffable>::descriptor),
    fields: &[
        FieldDescriptor::with_resolver("name", "upper"),
        FieldDescriptor::new("employer"),
    ],
    instantiate: Some(employee_default),
};

impl Diffable for Employee {
    fn descriptor() -> &'static TypeDescriptor {
        &EMPLOYEE
    }

    fn read_field(&self, name: &str) -> Result<Value, FieldAccessError> {
        match name {
            "name" => Ok(self.name.to_value()),
            "employer" => Ok(self.employer.to_value()),
            inherited => self.person.read_field(inherited),
        }
    }

    fn copy_field(&mut self, name: &str, source: &Self) -> Result<(), FieldAccessError> {
        match name {
            "name" => self.name.clone_from(&source.name),
            "employer" => self.employer.clone_from(&source.employer),
            inherited => return self.person.copy_field(inherited, &source.person),
        }
        Ok(())
    }
}

impl ToValue for Employee {
    fn to_value(&self) -> Value {
        Value::Record(Record::capture(self))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Item {
    pub sku: String,
    pub qty: u32,
}

diffable!(Item: Default { sku, qty });

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    pub items: Vec<Item>,
    pub stock: BTreeMap<String, u32>,
    pub tags: Vec<String>,
}

diffable!(Inventory: Default { items, stock, tags });

/// Order whose customer id is compared through a lookup resolver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Order {
    pub customer: u32,
    pub total: i64,
}

diffable!(Order: Default {
    customer => "customer_name",
    total,
});

/// Participating type without a default constructor.
#[derive(Debug, Clone, PartialEq)]
pub struct Gadget {
    pub label: String,
    pub weight: u16,
}

diffable!(Gadget { label, weight });

/// A type whose `secret` field can never be read or written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vault {
    pub owner: String,
    pub secret: String,
}

static VAULT: TypeDescriptor = TypeDescriptor {
    name: "Vault",
    path: concat!(module_path!(), "::Vault"),
    parent: None,
    fields: &[FieldDescriptor::new("owner"), FieldDescriptor::new("secret")],
    instantiate: None,
};

impl Diffable for Vault {
    fn descriptor() -> &'static TypeDescriptor {
        &VAULT
    }

    fn read_field(&self, name: &str) -> Result<Value, FieldAccessError> {
        match name {
            "owner" => Ok(self.owner.to_value()),
            _ => Err(FieldAccessError::inaccessible("Vault", name, "sealed")),
        }
    }

    fn copy_field(&mut self, name: &str, source: &Self) -> Result<(), FieldAccessError> {
        match name {
            "owner" => {
                self.owner.clone_from(&source.owner);
                Ok(())
            }
            _ => Err(FieldAccessError::inaccessible("Vault", name, "sealed")),
        }
    }
}

impl ToValue for Vault {
    fn to_value(&self) -> Value {
        Value::Record(Record::capture(self))
    }
}

/// Keys of a diff, in order
pub fn keys(diff: &structdiff_core::DiffMap) -> Vec<String> {
    diff.keys().map(str::to_string).collect()
}
