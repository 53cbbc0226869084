//! Validation schemas.
//!
//! A [`Schema`] maps document keys to [`SchemaNode`]s, each of which says
//! whether the key is required and which [`Rule`] its value must satisfy.
//! Schemas are built once, in code with the builder methods or from a JSON
//! definition (see [`Schema::from_json`]), and then reused for any number of
//! documents.
//!
//! # Example
//!
//! ```rust
//! use loch::{Rule, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::new()
//!     .scalar("name", true)
//!     .scalar("nickname", false)
//!     .field("type", Rule::one_of(["mother", "father"]));
//!
//! let document = json!({"name": "Daddy", "type": "father"});
//! assert!(schema.validate(document.as_object().unwrap()).is_success());
//! ```

mod definition;
mod validate;

use indexmap::IndexMap;
use serde_json::Value;

use crate::outcome::Outcome;
use crate::predicate::{self, Predicate};

pub use validate::validates;

/// What a present value must satisfy.
///
/// The variant is fixed when the schema is built, so validation dispatches
/// on it directly.
#[derive(Debug, Clone)]
pub enum Rule {
    /// The value must equal one of these.
    Membership(Vec<Value>),
    /// The value must be a sequence of documents, each valid against the schema.
    Elements(Schema),
    /// The value must satisfy the predicate.
    Predicate(Predicate),
    /// The value must satisfy every predicate; the first failure is reported.
    Chain(Vec<Predicate>),
    /// The value must be a document valid against the schema.
    Object(Schema),
}

impl Rule {
    /// Membership in a fixed set of values.
    pub fn one_of<I, V>(allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Rule::Membership(allowed.into_iter().map(Into::into).collect())
    }

    /// A sequence whose every element is validated against `schema`.
    pub fn each(schema: Schema) -> Self {
        Rule::Elements(schema)
    }

    /// A nested document validated against `schema`. An empty schema accepts
    /// any document.
    pub fn object(schema: Schema) -> Self {
        Rule::Object(schema)
    }

    /// A closure predicate; see [`Predicate::new`].
    pub fn predicate<F, O>(f: F) -> Self
    where
        F: Fn(&Value, &str) -> O + Send + Sync + 'static,
        O: Into<Outcome>,
    {
        Rule::Predicate(Predicate::new(f))
    }

    /// Several predicates checked in order.
    pub fn chain<I>(predicates: I) -> Self
    where
        I: IntoIterator<Item = Predicate>,
    {
        Rule::Chain(predicates.into_iter().collect())
    }
}

impl From<Predicate> for Rule {
    fn from(predicate: Predicate) -> Self {
        Rule::Predicate(predicate)
    }
}

impl From<Vec<Predicate>> for Rule {
    fn from(predicates: Vec<Predicate>) -> Self {
        Rule::Chain(predicates)
    }
}

impl From<Schema> for Rule {
    fn from(schema: Schema) -> Self {
        Rule::Object(schema)
    }
}

/// A schema entry: a required flag and the rule for a present value.
#[derive(Debug, Clone)]
pub struct SchemaNode {
    required: bool,
    rule: Rule,
}

impl SchemaNode {
    /// Creates an entry with an explicit required flag.
    ///
    /// # Example
    ///
    /// ```rust
    /// use loch::{Rule, SchemaNode};
    ///
    /// let node = SchemaNode::new(false, Rule::one_of(["on", "off"]));
    /// assert!(!node.is_required());
    /// assert!(matches!(node.rule(), Rule::Membership(_)));
    /// ```
    pub fn new(required: bool, rule: impl Into<Rule>) -> Self {
        Self {
            required,
            rule: rule.into(),
        }
    }

    /// Creates an entry whose key must be present.
    pub fn required(rule: impl Into<Rule>) -> Self {
        Self::new(true, rule)
    }

    /// Creates an entry whose key may be absent.
    pub fn optional(rule: impl Into<Rule>) -> Self {
        Self::new(false, rule)
    }

    /// Whether a missing key is reported.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The rule applied to a present value.
    pub fn rule(&self) -> &Rule {
        &self.rule
    }
}

/// The bare-boolean shorthand: required or not, and the value must be a
/// scalar.
impl From<bool> for SchemaNode {
    fn from(required: bool) -> Self {
        Self::new(required, predicate::is_scalar())
    }
}

/// An ordered mapping from document keys to their requirements.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    entries: IndexMap<String, SchemaNode>,
}

impl Schema {
    /// Creates a schema with no keys. Validated alone, it accepts only the
    /// empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a required key whose value must satisfy `rule`.
    pub fn field(self, key: impl Into<String>, rule: impl Into<Rule>) -> Self {
        self.node(key, SchemaNode::required(rule))
    }

    /// Adds an optional key; when present its value must satisfy `rule`.
    pub fn optional(self, key: impl Into<String>, rule: impl Into<Rule>) -> Self {
        self.node(key, SchemaNode::optional(rule))
    }

    /// Adds a key holding any scalar, required or not.
    pub fn scalar(self, key: impl Into<String>, required: bool) -> Self {
        self.node(key, required)
    }

    /// Adds a fully specified entry, replacing any earlier entry for `key`.
    pub fn node(mut self, key: impl Into<String>, node: impl Into<SchemaNode>) -> Self {
        self.entries.insert(key.into(), node.into());
        self
    }

    /// Returns the entry declared for `key`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use loch::Schema;
    ///
    /// let schema = Schema::new().scalar("name", true).scalar("nick", false);
    /// assert!(schema.get("name").is_some_and(|node| node.is_required()));
    /// assert!(schema.get("nick").is_some_and(|node| !node.is_required()));
    /// assert!(schema.get("age").is_none());
    /// ```
    pub fn get(&self, key: &str) -> Option<&SchemaNode> {
        self.entries.get(key)
    }

    /// Returns true if `key` is declared, required or not.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Declared keys, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of declared keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no keys are declared. An empty schema nested under a
    /// key accepts any document there.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
