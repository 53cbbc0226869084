//! Whitelist projection of documents.
//!
//! An [`AllowList`] names the keys that may pass through. Everything else is
//! dropped without complaint; nothing here reports errors about the
//! document.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::trace;

use crate::document::{type_name, Document};
use crate::error::DefinitionError;

type MapFn = Arc<dyn Fn(&Value, &str) -> Document + Send + Sync>;

/// How an allowed key is carried into the output.
#[derive(Clone)]
pub enum Allowance {
    /// Copy the value unchanged.
    Keep,
    /// Clean the value with a nested allow-list.
    Nested(AllowList),
    /// Replace the entry with whatever the function returns, merged into the
    /// output at the current level.
    Map(MapFn),
}

impl fmt::Debug for Allowance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Allowance::Keep => f.write_str("Keep"),
            Allowance::Nested(list) => f.debug_tuple("Nested").field(list).finish(),
            Allowance::Map(_) => f.write_str("Map(..)"),
        }
    }
}

/// The set of keys allowed through, and how each is carried.
///
/// # Example
///
/// ```rust
/// use loch::{allower, AllowList, Document};
/// use serde_json::{json, Value};
///
/// let clean = allower(
///     AllowList::new()
///         .allow("name")
///         .nested("address", AllowList::new().allow("city"))
///         .map("fullName", |value: &Value, _key: &str| {
///             let mut out = Document::new();
///             out.insert("name".to_string(), value.clone());
///             out
///         }),
/// );
///
/// let body = json!({
///     "name": "Ada",
///     "password": "hunter2",
///     "address": {"city": "London", "lat": 51.5}
/// });
/// assert_eq!(
///     Value::Object(clean(body.as_object().unwrap())),
///     json!({"name": "Ada", "address": {"city": "London"}})
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    entries: IndexMap<String, Allowance>,
}

impl AllowList {
    /// Creates an allow-list that lets nothing through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lets `key` through unchanged.
    pub fn allow(self, key: impl Into<String>) -> Self {
        self.entry(key, Allowance::Keep)
    }

    /// Lets `key` through after cleaning its value with `list`.
    pub fn nested(self, key: impl Into<String>, list: AllowList) -> Self {
        self.entry(key, Allowance::Nested(list))
    }

    /// Replaces `key` with the fragment `f` returns. The fragment is merged
    /// into the output, so it may rename the key or produce several keys.
    pub fn map<F>(self, key: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value, &str) -> Document + Send + Sync + 'static,
    {
        self.entry(key, Allowance::Map(Arc::new(f)))
    }

    /// Sets how `key` is carried, replacing any earlier entry for it.
    pub fn entry(mut self, key: impl Into<String>, allowance: Allowance) -> Self {
        self.entries.insert(key.into(), allowance);
        self
    }

    /// Returns how `key` is carried, or `None` if it is dropped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use loch::{AllowList, Allowance};
    ///
    /// let list = AllowList::new().allow("id").nested("owner", AllowList::new());
    /// assert!(matches!(list.get("id"), Some(Allowance::Keep)));
    /// assert!(matches!(list.get("owner"), Some(Allowance::Nested(_))));
    /// assert!(list.get("token").is_none());
    /// ```
    pub fn get(&self, key: &str) -> Option<&Allowance> {
        self.entries.get(key)
    }

    /// Number of allowed keys at this level.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds an allow-list from JSON: `null` allows a key as-is, an object
    /// is a nested allow-list.
    ///
    /// # Errors
    ///
    /// Returns `DefinitionError::MalformedAllowEntry` for any other entry and
    /// `DefinitionError::NotAnObject` if `definition` is not an object.
    pub fn from_json(definition: &Value) -> Result<Self, DefinitionError> {
        let map = definition
            .as_object()
            .ok_or_else(|| DefinitionError::NotAnObject(type_name(definition).to_string()))?;

        map.iter().try_fold(Self::new(), |list, (key, entry)| match entry {
            Value::Null => Ok(list.allow(key.as_str())),
            Value::Object(_) => Ok(list.nested(key.as_str(), Self::from_json(entry)?)),
            other => Err(DefinitionError::MalformedAllowEntry {
                key: key.clone(),
                got: type_name(other).to_string(),
            }),
        })
    }

    /// Returns a new document holding only the allowed parts of `document`.
    pub fn clean(&self, document: &Document) -> Document {
        let mut out = Document::new();
        for (key, value) in document {
            let Some(allowance) = self.entries.get(key) else {
                trace!(key = %key, "dropping key not on allow-list");
                continue;
            };
            match allowance {
                Allowance::Keep => {
                    out.insert(key.clone(), value.clone());
                }
                Allowance::Nested(list) => {
                    out.insert(key.clone(), list.clean_value(value));
                }
                Allowance::Map(f) => out.extend(f(value, key.as_str())),
            }
        }
        out
    }

    /// Documents are cleaned, sequences are cleaned element by element, and
    /// anything else becomes an empty document.
    fn clean_value(&self, value: &Value) -> Value {
        match value {
            Value::Object(document) => Value::Object(self.clean(document)),
            Value::Array(items) => {
                Value::Array(items.iter().map(|item| self.clean_element(item)).collect())
            }
            _ => Value::Object(Document::new()),
        }
    }

    fn clean_element(&self, item: &Value) -> Value {
        match item {
            Value::Object(document) => Value::Object(self.clean(document)),
            _ => Value::Object(Document::new()),
        }
    }
}

/// Compiles an allow-list into a reusable cleaning function.
pub fn allower(list: AllowList) -> impl Fn(&Document) -> Document + Send + Sync {
    move |document: &Document| list.clean(document)
}
