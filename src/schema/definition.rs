//! Schemas written as JSON.
//!
//! The definition format follows the validation-map literal:
//!
//! | entry                         | meaning                                   |
//! |-------------------------------|-------------------------------------------|
//! | `true` / `false`              | required / optional scalar                |
//! | `[req, ["a", "b"]]`           | membership                                |
//! | `[req, {...}]`                | nested document                           |
//! | `[req, [{...}]]`              | sequence of nested documents              |
//! | `[req, "isTime"]`             | named predicate                           |
//! | `[req, "isScalar", "isTime"]` | predicate chain                           |

use serde_json::{Map, Value};

use super::{Rule, Schema, SchemaNode};
use crate::document::type_name;
use crate::error::DefinitionError;
use crate::path::KeyPath;
use crate::predicate::is_scalar_value;
use crate::registry::PredicateRegistry;

impl Schema {
    /// Parses a JSON schema definition, resolving predicate names against
    /// the stock predicates.
    ///
    /// # Errors
    ///
    /// Returns a [`DefinitionError`] when the definition is malformed, most
    /// notably `RequiredNotBoolean` when a tuple does not start with a
    /// boolean.
    ///
    /// # Example
    ///
    /// ```rust
    /// use loch::{DefinitionError, Schema};
    /// use serde_json::json;
    ///
    /// let schema = Schema::from_json(&json!({
    ///     "requiredKey": true,
    ///     "specificString": [true, ["true", "false", "maybe"]],
    ///     "opens": [false, "isTime"]
    /// }))
    /// .unwrap();
    /// assert_eq!(schema.len(), 3);
    ///
    /// let misuse = Schema::from_json(&json!({"name": ["yes", "isScalar"]}));
    /// assert!(matches!(misuse, Err(DefinitionError::RequiredNotBoolean { .. })));
    /// ```
    pub fn from_json(definition: &Value) -> Result<Self, DefinitionError> {
        Self::from_json_with(definition, &PredicateRegistry::new())
    }

    /// Parses a JSON schema definition, resolving predicate names against
    /// `registry`.
    pub fn from_json_with(
        definition: &Value,
        registry: &PredicateRegistry,
    ) -> Result<Self, DefinitionError> {
        let map = definition
            .as_object()
            .ok_or_else(|| DefinitionError::NotAnObject(type_name(definition).to_string()))?;
        parse_schema(map, &KeyPath::root(), registry)
    }
}

fn parse_schema(
    map: &Map<String, Value>,
    base: &KeyPath,
    registry: &PredicateRegistry,
) -> Result<Schema, DefinitionError> {
    map.iter().try_fold(Schema::new(), |schema, (key, entry)| {
        let node = parse_node(entry, &base.key(key.as_str()), registry)?;
        Ok(schema.node(key.as_str(), node))
    })
}

fn parse_node(
    entry: &Value,
    path: &KeyPath,
    registry: &PredicateRegistry,
) -> Result<SchemaNode, DefinitionError> {
    let tuple = match entry {
        Value::Bool(required) => return Ok(SchemaNode::from(*required)),
        Value::Array(tuple) => tuple,
        other => {
            return Err(malformed(
                path,
                format!(
                    "expected a boolean or a [required, rule] tuple, got {}",
                    type_name(other)
                ),
            ))
        }
    };

    let Some((flag, rules)) = tuple.split_first() else {
        return Err(malformed(path, "empty tuple"));
    };
    let required = flag
        .as_bool()
        .ok_or_else(|| DefinitionError::RequiredNotBoolean {
            key: path.to_string(),
            got: type_name(flag).to_string(),
        })?;

    let rule = match rules {
        [] => return Err(malformed(path, "missing rule")),
        [rule] => parse_rule(rule, path, registry)?,
        names => Rule::Chain(
            names
                .iter()
                .map(|name| match name {
                    Value::String(name) => lookup(name, path, registry),
                    other => Err(malformed(
                        path,
                        format!("chained rules must be predicate names, got {}", type_name(other)),
                    )),
                })
                .collect::<Result<_, _>>()?,
        ),
    };

    Ok(SchemaNode::new(required, rule))
}

fn parse_rule(
    rule: &Value,
    path: &KeyPath,
    registry: &PredicateRegistry,
) -> Result<Rule, DefinitionError> {
    match rule {
        Value::String(name) => lookup(name, path, registry).map(Rule::Predicate),
        Value::Object(map) => parse_schema(map, path, registry).map(Rule::Object),
        Value::Array(items) => match items.as_slice() {
            [Value::Object(map)] => parse_schema(map, path, registry).map(Rule::Elements),
            _ if items.iter().all(is_scalar_value) => Ok(Rule::Membership(items.clone())),
            _ => Err(malformed(
                path,
                "allowed values must be scalars, or a single nested schema",
            )),
        },
        other => Err(malformed(
            path,
            format!("unsupported rule of type {}", type_name(other)),
        )),
    }
}

fn lookup(
    name: &str,
    path: &KeyPath,
    registry: &PredicateRegistry,
) -> Result<crate::Predicate, DefinitionError> {
    registry
        .get(name)
        .ok_or_else(|| DefinitionError::UnknownPredicate {
            key: path.to_string(),
            name: name.to_string(),
        })
}

fn malformed(path: &KeyPath, reason: impl Into<String>) -> DefinitionError {
    DefinitionError::MalformedRule {
        key: path.to_string(),
        reason: reason.into(),
    }
}
