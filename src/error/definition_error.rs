//! Errors raised while building schemas, allow-lists and registries.

/// A schema or allow-list definition that cannot be turned into rules.
///
/// These are programmer errors: the definition itself is wrong, independent
/// of any document being validated. They are reported once, when the
/// definition is parsed, and never appear inside an [`ErrorTree`](crate::ErrorTree).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DefinitionError {
    /// The first element of a `[required, rule]` tuple was not a boolean.
    #[error("'{key}': required flag must be a boolean, got {got}")]
    RequiredNotBoolean { key: String, got: String },

    /// The rule part of a schema entry has a shape no rule kind accepts.
    #[error("'{key}': malformed rule ({reason})")]
    MalformedRule { key: String, reason: String },

    /// A rule referenced a predicate name that is not registered.
    #[error("'{key}': unknown predicate '{name}'")]
    UnknownPredicate { key: String, name: String },

    /// An allow-list entry was neither `null` nor a nested allow-list.
    #[error("'{key}': allow-list entries must be null or an object, got {got}")]
    MalformedAllowEntry { key: String, got: String },

    /// The definition root was not an object.
    #[error("definition must be an object, got {0}")]
    NotAnObject(String),
}

/// Errors that can occur during predicate registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a predicate under a name that already exists.
    #[error("predicate '{0}' already registered")]
    DuplicateName(String),
}
