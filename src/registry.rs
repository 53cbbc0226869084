//! Named predicates for declarative schemas.
//!
//! This module provides the [`PredicateRegistry`] type, which lets a JSON
//! schema definition refer to predicates by name.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::RegistryError;
use crate::predicate::{self, Predicate};

type PredicateMap = Arc<RwLock<HashMap<String, Predicate>>>;

/// A thread-safe table of predicates keyed by name.
///
/// Clones share the same table, so a predicate registered through one handle
/// is visible through all of them.
///
/// # Example
///
/// ```rust
/// use loch::predicate::validator;
/// use loch::{PredicateRegistry, Schema};
/// use serde_json::json;
///
/// let registry = PredicateRegistry::new();
/// registry
///     .register("isEven", validator("{{key}} must be even", |v| {
///         v.as_i64().is_some_and(|n| n % 2 == 0)
///     }))
///     .unwrap();
///
/// let schema = Schema::from_json_with(&json!({"count": [true, "isEven"]}), &registry).unwrap();
/// assert!(schema.validate_value(&json!({"count": 4})).is_success());
/// assert!(schema.validate_value(&json!({"count": 3})).is_failure());
/// ```
pub struct PredicateRegistry {
    predicates: PredicateMap,
}

impl PredicateRegistry {
    /// Creates a registry holding the stock predicates: `isScalar`,
    /// `isTime` and `isArrayOfScalars`.
    pub fn new() -> Self {
        let mut builtins = HashMap::new();
        builtins.insert("isScalar".to_string(), predicate::is_scalar());
        builtins.insert("isTime".to_string(), predicate::is_time());
        builtins.insert("isArrayOfScalars".to_string(), predicate::is_array_of_scalars());
        Self {
            predicates: Arc::new(RwLock::new(builtins)),
        }
    }

    /// Creates a registry with no predicates at all.
    pub fn empty() -> Self {
        Self {
            predicates: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers a predicate under `name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already taken.
    pub fn register(
        &self,
        name: impl Into<String>,
        predicate: Predicate,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        let mut predicates = self.predicates.write();

        if predicates.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        predicates.insert(name, predicate);
        Ok(())
    }

    /// Returns a handle to the predicate registered as `name`.
    pub fn get(&self, name: &str) -> Option<Predicate> {
        self.predicates.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.predicates.read().contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.predicates.read().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for PredicateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for PredicateRegistry {
    fn clone(&self) -> Self {
        Self {
            predicates: Arc::clone(&self.predicates),
        }
    }
}
