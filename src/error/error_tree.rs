//! Validation error trees.
//!
//! This module provides [`ErrorTree`], a map from document keys to
//! [`ErrorNode`]s that mirrors the schema shape at every point where
//! validation failed.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::prelude::*;

use crate::path::KeyPath;

/// The error recorded for a single key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorNode {
    /// A message describing why the value under the key was rejected.
    Message(String),
    /// Errors found inside a nested document under the key.
    Group(ErrorTree),
}

impl ErrorNode {
    /// Returns the message if this node is a leaf.
    pub fn as_message(&self) -> Option<&str> {
        match self {
            ErrorNode::Message(message) => Some(message),
            ErrorNode::Group(_) => None,
        }
    }

    /// Returns the nested tree if this node is a group.
    pub fn as_group(&self) -> Option<&ErrorTree> {
        match self {
            ErrorNode::Message(_) => None,
            ErrorNode::Group(tree) => Some(tree),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            ErrorNode::Message(message) => Value::String(message.clone()),
            ErrorNode::Group(tree) => tree.to_json(),
        }
    }
}

impl From<String> for ErrorNode {
    fn from(message: String) -> Self {
        ErrorNode::Message(message)
    }
}

impl From<&str> for ErrorNode {
    fn from(message: &str) -> Self {
        ErrorNode::Message(message.to_string())
    }
}

impl From<ErrorTree> for ErrorNode {
    fn from(tree: ErrorTree) -> Self {
        ErrorNode::Group(tree)
    }
}

/// Field-level validation failures, keyed in the order they were found.
///
/// A tree produced by the validator is never empty; an empty tree only
/// exists while one is being assembled.
///
/// # Example
///
/// ```rust
/// use loch::{ErrorNode, ErrorTree};
/// use serde_json::json;
///
/// let mut inner = ErrorTree::new();
/// inner.insert("anotherReq", "anotherReq isn't tasty");
///
/// let mut tree = ErrorTree::new();
/// tree.insert("name", "name is required");
/// tree.insert("subValidation", inner);
///
/// assert_eq!(
///     tree.to_json(),
///     json!({
///         "name": "name is required",
///         "subValidation": { "anotherReq": "anotherReq isn't tasty" }
///     })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorTree {
    entries: IndexMap<String, ErrorNode>,
}

impl ErrorTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error for `key`, replacing any earlier entry.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<ErrorNode>) {
        self.entries.insert(key.into(), node.into());
    }

    /// Returns the node recorded for `key`: a message, or a group for a
    /// nested document.
    ///
    /// # Example
    ///
    /// ```rust
    /// use loch::{ErrorNode, ErrorTree};
    ///
    /// let mut inner = ErrorTree::new();
    /// inner.insert("city", "city is required");
    ///
    /// let mut tree = ErrorTree::new();
    /// tree.insert("address", inner);
    ///
    /// assert!(matches!(tree.get("address"), Some(ErrorNode::Group(_))));
    /// assert_eq!(tree.message("address"), None);
    /// assert!(tree.get("name").is_none());
    /// ```
    pub fn get(&self, key: &str) -> Option<&ErrorNode> {
        self.entries.get(key)
    }

    /// Shorthand for the message recorded directly under `key`.
    pub fn message(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ErrorNode::as_message)
    }

    /// Returns true if `key` failed.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of failing keys at this level. Nested failures count once,
    /// under their parent key; use [`ErrorTree::leaves`] to count them all.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Failing keys, in the order they were recorded.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ErrorNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Flattens the tree into `(path, message)` pairs, depth first.
    pub fn leaves(&self) -> Vec<(KeyPath, &str)> {
        let mut out = Vec::new();
        self.collect_leaves(&KeyPath::root(), &mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, base: &KeyPath, out: &mut Vec<(KeyPath, &'a str)>) {
        for (key, node) in &self.entries {
            let path = base.key(key.as_str());
            match node {
                ErrorNode::Message(message) => out.push((path, message.as_str())),
                ErrorNode::Group(tree) => tree.collect_leaves(&path, out),
            }
        }
    }

    /// Renders the tree as the JSON body an HTTP layer would send back.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(key, node)| (key.clone(), node.to_json()))
            .collect();
        Value::Object(map)
    }
}

/// Merging keeps the first message seen for a key; nested groups merge.
impl Semigroup for ErrorTree {
    fn combine(mut self, other: Self) -> Self {
        for (key, node) in other.entries {
            match self.entries.get_mut(&key) {
                None => {
                    self.entries.insert(key, node);
                }
                Some(ErrorNode::Group(mine)) => {
                    if let ErrorNode::Group(theirs) = node {
                        *mine = std::mem::take(mine).combine(theirs);
                    }
                }
                Some(ErrorNode::Message(_)) => {}
            }
        }
        self
    }
}

impl Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let leaves = self.leaves();
        writeln!(f, "Validation failed with {} error(s):", leaves.len())?;
        for (i, (path, message)) in leaves.iter().enumerate() {
            writeln!(f, "  {}. {}: {}", i + 1, path, message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorTree {}

impl<'a> IntoIterator for &'a ErrorTree {
    type Item = (&'a String, &'a ErrorNode);
    type IntoIter = indexmap::map::Iter<'a, String, ErrorNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ErrorTree>();
    assert_sync::<ErrorTree>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(entries: &[(&str, &str)]) -> ErrorTree {
        let mut tree = ErrorTree::new();
        for (key, message) in entries {
            tree.insert(*key, *message);
        }
        tree
    }

    #[test]
    fn test_insert_and_lookup() {
        let tree = tree(&[("name", "name is required")]);

        assert_eq!(tree.len(), 1);
        assert!(tree.contains_key("name"));
        assert_eq!(tree.message("name"), Some("name is required"));
        assert!(tree.get("age").is_none());
    }

    #[test]
    fn test_group_is_not_a_message() {
        let mut outer = ErrorTree::new();
        outer.insert("parents", tree(&[("type", "type must be one of mother,father")]));

        assert!(outer.message("parents").is_none());
        let inner = outer.get("parents").and_then(ErrorNode::as_group).unwrap();
        assert_eq!(inner.message("type"), Some("type must be one of mother,father"));
    }

    #[test]
    fn test_leaves_are_depth_first_in_insertion_order() {
        let mut outer = tree(&[("z", "z is required")]);
        outer.insert("sub", tree(&[("b", "b is not valid"), ("a", "a is required")]));
        outer.insert("extra", "extra is not accepted");

        let leaves: Vec<_> = outer
            .leaves()
            .into_iter()
            .map(|(path, message)| (path.to_string(), message))
            .collect();

        assert_eq!(
            leaves,
            vec![
                ("z".to_string(), "z is required"),
                ("sub.b".to_string(), "b is not valid"),
                ("sub.a".to_string(), "a is required"),
                ("extra".to_string(), "extra is not accepted"),
            ]
        );
    }

    #[test]
    fn test_to_json_nests_groups() {
        let mut outer = ErrorTree::new();
        outer.insert("sub", tree(&[("a", "a is required")]));

        assert_eq!(outer.to_json(), json!({"sub": {"a": "a is required"}}));
    }

    #[test]
    fn test_combine_keeps_first_message() {
        let left = tree(&[("a", "first")]);
        let right = tree(&[("a", "second"), ("b", "b is required")]);

        let merged = left.combine(right);
        assert_eq!(merged.message("a"), Some("first"));
        assert_eq!(merged.message("b"), Some("b is required"));
        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_combine_merges_groups_in_place() {
        let mut left = tree(&[("first", "first is required")]);
        left.insert("sub", tree(&[("x", "x is required")]));
        left.insert("last", "last is required");

        let mut right = ErrorTree::new();
        right.insert("sub", tree(&[("y", "y is not accepted")]));

        let merged = left.combine(right);
        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["first", "sub", "last"]);
        assert_eq!(
            merged.to_json(),
            json!({
                "first": "first is required",
                "sub": {"x": "x is required", "y": "y is not accepted"},
                "last": "last is required"
            })
        );
    }

    #[test]
    fn test_display_lists_paths() {
        let mut outer = tree(&[("name", "name is required")]);
        outer.insert("sub", tree(&[("a", "a is not valid")]));

        let display = outer.to_string();
        assert!(display.contains("2 error(s)"));
        assert!(display.contains("1. name: name is required"));
        assert!(display.contains("2. sub.a: a is not valid"));
    }
}
