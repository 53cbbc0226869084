//! Boolean request checks.
//!
//! [`Expectations`] answer yes/no questions about a document without building
//! an error tree: does it carry every expected key ([`Expectations::expects`]),
//! and does it carry nothing else ([`Expectations::allows`])?

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::document::{contains_value, Document};
use crate::predicate::{self, Predicate};

type TestFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// What an expected key's value must look like.
#[derive(Clone)]
pub enum Expect {
    /// Checked with the fallback predicate (`is_scalar` unless overridden).
    Default,
    /// Must equal one of these values.
    OneOf(Vec<Value>),
    /// Must pass the test.
    Test(TestFn),
    /// Must be a document meeting the nested expectations. For
    /// [`Expectations::allows`] an empty nested set accepts any document.
    Nested(Expectations),
}

impl fmt::Debug for Expect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expect::Default => f.write_str("Default"),
            Expect::OneOf(values) => f.debug_tuple("OneOf").field(values).finish(),
            Expect::Test(_) => f.write_str("Test(..)"),
            Expect::Nested(inner) => f.debug_tuple("Nested").field(inner).finish(),
        }
    }
}

/// A set of expected keys with a fallback predicate for [`Expect::Default`].
///
/// # Example
///
/// ```rust
/// use loch::Expectations;
/// use serde_json::json;
///
/// let expected = Expectations::new()
///     .key("name")
///     .test("age", |v| v.as_u64().is_some_and(|age| age < 25));
///
/// let young = json!({"name": "Jason", "age": 22});
/// assert!(expected.expects(young.as_object().unwrap()));
/// assert!(expected.allows(young.as_object().unwrap()));
///
/// let chatty = json!({"name": "Jason", "age": 22, "bio": "hi"});
/// assert!(expected.expects(chatty.as_object().unwrap()));
/// assert!(!expected.allows(chatty.as_object().unwrap()));
/// ```
#[derive(Debug, Clone)]
pub struct Expectations {
    entries: IndexMap<String, Expect>,
    fallback: Predicate,
}

impl Default for Expectations {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
            fallback: predicate::is_scalar(),
        }
    }
}

impl Expectations {
    /// Creates an empty set of expectations with the scalar fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the predicate used for [`Expect::Default`] entries, here and
    /// in nested expectations.
    pub fn with_fallback(mut self, fallback: Predicate) -> Self {
        self.fallback = fallback;
        self
    }

    /// Expects `key` with a value passing the fallback predicate.
    pub fn key(self, key: impl Into<String>) -> Self {
        self.expect(key, Expect::Default)
    }

    /// Expects `key` with one of `values`.
    pub fn one_of<I, V>(self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.expect(key, Expect::OneOf(values))
    }

    /// Expects `key` with a value passing `test`.
    pub fn test<F>(self, key: impl Into<String>, test: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.expect(key, Expect::Test(Arc::new(test)))
    }

    /// Expects `key` to hold a document meeting `inner`.
    pub fn nested(self, key: impl Into<String>, inner: Expectations) -> Self {
        self.expect(key, Expect::Nested(inner))
    }

    /// Sets the expectation for `key`, replacing any earlier one.
    pub fn expect(mut self, key: impl Into<String>, expect: Expect) -> Self {
        self.entries.insert(key.into(), expect);
        self
    }

    /// True when every expected key is present with an acceptable value.
    /// Extra keys are ignored.
    pub fn expects(&self, document: &Document) -> bool {
        self.expects_with(document, &self.fallback)
    }

    /// True when every key in `document` is expected and holds an acceptable
    /// value. Missing keys are ignored.
    pub fn allows(&self, document: &Document) -> bool {
        self.allows_with(document, &self.fallback)
    }

    fn expects_with(&self, document: &Document, fallback: &Predicate) -> bool {
        self.entries.iter().all(|(key, expect)| {
            document.get(key).is_some_and(|value| match expect {
                Expect::Nested(inner) => value
                    .as_object()
                    .is_some_and(|sub| inner.expects_with(sub, fallback)),
                other => accepts(other, value, key, fallback),
            })
        })
    }

    fn allows_with(&self, document: &Document, fallback: &Predicate) -> bool {
        document.iter().all(|(key, value)| match self.entries.get(key) {
            None => false,
            Some(Expect::Nested(inner)) if inner.entries.is_empty() => value.is_object(),
            Some(Expect::Nested(inner)) => value
                .as_object()
                .is_some_and(|sub| inner.allows_with(sub, fallback)),
            Some(other) => accepts(other, value, key, fallback),
        })
    }
}

fn accepts(expect: &Expect, value: &Value, key: &str, fallback: &Predicate) -> bool {
    match expect {
        Expect::Default => fallback.check(value, key).is_valid(),
        Expect::OneOf(values) => contains_value(values, value),
        Expect::Test(test) => test(value),
        Expect::Nested(_) => false,
    }
}
