//! Value resolvers and their registry.
//!
//! A resolver substitutes a derived value for a raw field value before the
//! engine compares it. The substituted value is used for comparison only and
//! is never written back to the source object.

use crate::model::value::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Transform applied to a tagged field's value before comparison.
pub trait ValueResolver: Send + Sync {
    fn resolve(&self, value: &Value) -> Value;
}

impl<F> ValueResolver for F
where
    F: Fn(&Value) -> Value + Send + Sync,
{
    fn resolve(&self, value: &Value) -> Value {
        self(value)
    }
}

/// Shared handle to a registered resolver
pub type SharedResolver = Arc<dyn ValueResolver>;

/// Concurrency-safe mapping from resolver key to [`ValueResolver`].
///
/// Every operation takes the lock for its own duration only: `register`,
/// `unregister` and `lookup` are individually atomic, with no guarantee
/// across calls.
#[derive(Default)]
pub struct ResolverRegistry {
    resolvers: RwLock<HashMap<String, SharedResolver>>,
}

impl ResolverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `resolver` under `key`, returning the resolver it replaced
    pub fn register(
        &self,
        key: impl Into<String>,
        resolver: impl ValueResolver + 'static,
    ) -> Option<SharedResolver> {
        self.register_shared(key, Arc::new(resolver))
    }

    /// Register an already shared resolver under `key`
    pub fn register_shared(
        &self,
        key: impl Into<String>,
        resolver: SharedResolver,
    ) -> Option<SharedResolver> {
        let key = key.into();
        tracing::debug!(resolver_key = %key, "registering value resolver");
        self.resolvers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, resolver)
    }

    /// Remove the resolver registered under `key`, if any
    pub fn unregister(&self, key: &str) -> Option<SharedResolver> {
        tracing::debug!(resolver_key = %key, "unregistering value resolver");
        self.resolvers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }

    pub fn lookup(&self, key: &str) -> Option<SharedResolver> {
        self.resolvers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.resolvers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.resolvers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .resolvers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    /// Apply the resolver registered under `key` to `value`.
    ///
    /// Returns `None` when no resolver is registered, in which case the raw
    /// value is compared unchanged.
    pub fn resolve(&self, key: &str, value: &Value) -> Option<Value> {
        // Resolver runs outside the lock so it may itself use the registry.
        let resolver = self.lookup(key)?;
        Some(resolver.resolve(value))
    }
}

impl fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}
