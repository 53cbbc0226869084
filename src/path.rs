//! Key paths for locating entries in nested documents and error trees.
//!
//! A [`KeyPath`] is used to flatten an [`ErrorTree`](crate::ErrorTree) into
//! `a.b.c` addressed messages and to label log events emitted during
//! validation.

use std::fmt::{self, Display};

/// One step of a [`KeyPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// A document key.
    Key(String),
    /// A position inside a sequence value.
    Element(usize),
}

/// A path from the root of a document to a nested entry.
///
/// # Example
///
/// ```rust
/// use loch::KeyPath;
///
/// let path = KeyPath::root().key("parents").element(1).key("type");
/// assert_eq!(path.to_string(), "parents[1].type");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct KeyPath {
    steps: Vec<PathStep>,
}

impl KeyPath {
    /// The empty path, naming the document itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path extended by a document key.
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.with(PathStep::Key(key.into()))
    }

    /// Returns a new path extended by a sequence position.
    pub fn element(&self, index: usize) -> Self {
        self.with(PathStep::Element(index))
    }

    fn with(&self, step: PathStep) -> Self {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend(self.steps.iter().cloned());
        steps.push(step);
        Self { steps }
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> impl Iterator<Item = &PathStep> {
        self.steps.iter()
    }

    /// The final key of the path, skipping trailing element steps.
    pub fn last_key(&self) -> Option<&str> {
        self.steps.iter().rev().find_map(|step| match step {
            PathStep::Key(key) => Some(key.as_str()),
            PathStep::Element(_) => None,
        })
    }
}

impl Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return write!(f, "(root)");
        }
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                PathStep::Key(key) if i == 0 => write!(f, "{}", key)?,
                PathStep::Key(key) => write!(f, ".{}", key)?,
                PathStep::Element(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}
