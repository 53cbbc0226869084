//! The validation walk.
//!
//! Declared keys are checked first, in declaration order; document keys the
//! schema does not declare are reported afterwards. The document is only
//! read, never modified.

use rayon::prelude::*;
use serde_json::Value;
use stillwater::Validation;
use tracing::{debug, debug_span, trace};

use super::{Rule, Schema};
use crate::document::contains_value;
use crate::error::{ErrorNode, ErrorTree};
use crate::messages;
use crate::path::KeyPath;
use crate::{Document, ValidationResult};

/// Validates `document` against `schema`.
///
/// Succeeds when every required key is present, every present key satisfies
/// its rule, and the document has no undeclared keys. Otherwise fails with
/// the tree of failing keys.
///
/// # Example
///
/// ```rust
/// use loch::{validates, Rule, Schema};
/// use serde_json::json;
///
/// let schema = Schema::new().optional(
///     "parents",
///     Rule::each(
///         Schema::new()
///             .scalar("name", true)
///             .field("type", Rule::one_of(["mother", "father"])),
///     ),
/// );
///
/// let body = json!({
///     "parents": [
///         {"name": "Daddy", "type": "unknownOops"},
///         {"name": "Mommy", "type": "mother"}
///     ]
/// });
///
/// let errors = validates(&schema, body.as_object().unwrap())
///     .into_result()
///     .unwrap_err();
/// assert_eq!(
///     errors.to_json(),
///     json!({"parents": {"type": "type must be one of mother,father"}})
/// );
/// ```
pub fn validates(schema: &Schema, document: &Document) -> ValidationResult<()> {
    schema.validate(document)
}

impl Schema {
    /// Validates a decoded request body.
    pub fn validate(&self, document: &Document) -> ValidationResult<()> {
        let span = debug_span!("validate", declared = self.len(), present = document.len());
        let _guard = span.enter();

        let errors = self.collect_errors(document, &KeyPath::root());
        if errors.is_empty() {
            trace!("document accepted");
            Validation::Success(())
        } else {
            debug!(failures = errors.len(), "document rejected");
            Validation::Failure(errors)
        }
    }

    /// Validates any JSON value. A value that is not a document is treated
    /// as one with no keys, so only missing required keys are reported.
    pub fn validate_value(&self, value: &Value) -> ValidationResult<()> {
        match value.as_object() {
            Some(document) => self.validate(document),
            None => self.validate(&Document::new()),
        }
    }

    /// Validates independent documents in parallel. Results keep the input
    /// order.
    pub fn validate_many(&self, documents: &[Document]) -> Vec<ValidationResult<()>> {
        documents
            .par_iter()
            .map(|document| self.validate(document))
            .collect()
    }

    fn collect_errors(&self, document: &Document, path: &KeyPath) -> ErrorTree {
        let mut errors = ErrorTree::new();

        for (key, node) in self.entries() {
            let Some(value) = document.get(key) else {
                if node.is_required() {
                    debug!(path = %path.key(key), "required key missing");
                    errors.insert(key, messages::missing(key));
                }
                continue;
            };

            if let Some(error) = node.rule().check(value, key, path) {
                debug!(path = %path.key(key), "value rejected");
                errors.insert(key, error);
            }
        }

        for key in document.keys() {
            if !self.contains_key(key) {
                debug!(path = %path.key(key.as_str()), "undeclared key");
                errors.insert(key.as_str(), messages::extra(key));
            }
        }

        errors
    }

    /// Errors from a nested document, or `None` when it passes. An empty
    /// schema accepts every document.
    fn nested_errors(&self, document: &Document, path: &KeyPath) -> Option<ErrorTree> {
        if self.is_empty() {
            return None;
        }
        let errors = self.collect_errors(document, path);
        (!errors.is_empty()).then_some(errors)
    }
}

impl Rule {
    /// Checks the value stored under `key`. `parent` is the path of the
    /// document holding it; the key's own path is only built for rules
    /// that descend.
    fn check(&self, value: &Value, key: &str, parent: &KeyPath) -> Option<ErrorNode> {
        match self {
            Rule::Membership(allowed) => {
                if contains_value(allowed, value) {
                    None
                } else {
                    Some(messages::contain(key, allowed).into())
                }
            }
            Rule::Elements(schema) => {
                let Some(items) = value.as_array() else {
                    return Some(messages::array(key).into());
                };
                let path = parent.key(key);
                items.iter().enumerate().find_map(|(index, item)| {
                    let element_path = path.element(index);
                    let error = match item.as_object() {
                        Some(element) => schema
                            .nested_errors(element, &element_path)
                            .map(ErrorNode::Group),
                        None => Some(messages::object(key).into()),
                    };
                    if error.is_some() {
                        trace!(path = %element_path, "first invalid element");
                    }
                    error
                })
            }
            Rule::Predicate(predicate) => predicate
                .check(value, key)
                .message_for(key)
                .map(ErrorNode::Message),
            Rule::Chain(predicates) => predicates
                .iter()
                .find_map(|predicate| predicate.check(value, key).message_for(key))
                .map(ErrorNode::Message),
            Rule::Object(schema) => match value.as_object() {
                Some(document) => schema
                    .nested_errors(document, &parent.key(key))
                    .map(ErrorNode::Group),
                None => Some(messages::object(key).into()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::Outcome;
    use crate::predicate::{self, Predicate};
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {}", other),
        }
    }

    fn unwrap_failure(result: ValidationResult<()>) -> ErrorTree {
        result.into_result().unwrap_err()
    }

    #[test]
    fn test_empty_schema_empty_document() {
        assert!(Schema::new().validate(&Document::new()).is_success());
    }

    #[test]
    fn test_membership_success() {
        let schema = Schema::new().field("requiredKey", Rule::one_of(["a", "b"]));
        assert!(schema.validate(&doc(json!({"requiredKey": "b"}))).is_success());
    }

    #[test]
    fn test_membership_failure() {
        let schema = Schema::new().field("requiredKey", Rule::one_of(["a", "b"]));
        let errors = unwrap_failure(schema.validate(&doc(json!({"requiredKey": "c"}))));
        assert_eq!(
            errors.message("requiredKey"),
            Some("requiredKey must be one of a,b")
        );
    }

    #[test]
    fn test_optional_absent_is_silent() {
        let schema = Schema::new()
            .scalar("requiredKey", true)
            .scalar("maybeKey", false)
            .optional("notRequired", Rule::predicate(|_, _| false));
        assert!(schema
            .validate(&doc(json!({"requiredKey": "applePie"})))
            .is_success());
    }

    #[test]
    fn test_missing_and_extra_together() {
        let schema = Schema::new().scalar("name", true);
        let errors = unwrap_failure(schema.validate(&doc(json!({"nmae": "typo"}))));

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.message("name"), Some("name is required"));
        assert_eq!(errors.message("nmae"), Some("nmae is not accepted"));
        assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["name", "nmae"]);
    }

    #[test]
    fn test_bare_boolean_rejects_non_scalar() {
        let schema = Schema::new().scalar("k", false);
        let errors = unwrap_failure(schema.validate(&doc(json!({"k": [1]}))));
        assert_eq!(errors.message("k"), Some("k must be a scalar"));
    }

    #[test]
    fn test_predicate_false_uses_default_message() {
        let schema = Schema::new().field("badKey", Rule::predicate(|_, _| false));
        let errors = unwrap_failure(schema.validate(&doc(json!({"badKey": "skree"}))));
        assert_eq!(errors.message("badKey"), Some("badKey is not valid"));
    }

    #[test]
    fn test_predicate_custom_message() {
        let schema = Schema::new().field(
            "badKey",
            Rule::predicate(|v: &Value, k: &str| {
                format!("{} is not okay since it's {}", k, v.as_str().unwrap_or(""))
            }),
        );
        let errors = unwrap_failure(schema.validate(&doc(json!({"badKey": "skree"}))));
        assert_eq!(
            errors.message("badKey"),
            Some("badKey is not okay since it's skree")
        );
    }

    #[test]
    fn test_predicate_outcome_list_reports_first_failure() {
        let schema = Schema::new().field(
            "k",
            Rule::predicate(|_, _| {
                vec![
                    Outcome::Valid,
                    Outcome::from("first problem"),
                    Outcome::Invalid,
                ]
            }),
        );
        let errors = unwrap_failure(schema.validate(&doc(json!({"k": 1}))));
        assert_eq!(errors.message("k"), Some("first problem"));
    }

    #[test]
    fn test_chain_short_circuits() {
        let not_b = Predicate::new(|v: &Value, k: &str| {
            if v == "b" {
                Outcome::Valid
            } else {
                Outcome::Message(format!("{} is not b", k))
            }
        });
        let schema = Schema::new().field("badKey", Rule::chain([not_b, predicate::is_scalar()]));

        let errors = unwrap_failure(schema.validate(&doc(json!({"badKey": [1, 2, 3]}))));
        assert_eq!(errors.message("badKey"), Some("badKey is not b"));

        assert!(schema.validate(&doc(json!({"badKey": "b"}))).is_success());
    }

    #[test]
    fn test_object_rule_requires_document() {
        let schema = Schema::new().field("objectKey", Schema::new());
        let errors = unwrap_failure(schema.validate(&doc(json!({"objectKey": "skree"}))));
        assert_eq!(errors.message("objectKey"), Some("objectKey must be an object"));
    }

    #[test]
    fn test_empty_object_rule_accepts_anything_inside() {
        let schema = Schema::new().field("meta", Schema::new());
        assert!(schema
            .validate(&doc(json!({"meta": {"any": {"thing": [1, 2]}}})))
            .is_success());
    }

    #[test]
    fn test_nested_errors_are_grouped() {
        let schema = Schema::new().field(
            "sub",
            Schema::new().scalar("requiredKey", true).scalar("other", false),
        );
        let errors = unwrap_failure(schema.validate(&doc(json!({"sub": {"stray": 1}}))));
        assert_eq!(
            errors.to_json(),
            json!({"sub": {"requiredKey": "requiredKey is required", "stray": "stray is not accepted"}})
        );
    }

    #[test]
    fn test_elements_rule_requires_array() {
        let schema = Schema::new().field("lols", Rule::each(Schema::new().scalar("funny", true)));
        let errors = unwrap_failure(schema.validate(&doc(json!({"lols": {"funny": true}}))));
        assert_eq!(errors.message("lols"), Some("lols must be an array"));
    }

    #[test]
    fn test_elements_rule_rejects_scalar_element() {
        let schema = Schema::new().field("lols", Rule::each(Schema::new().scalar("funny", true)));
        let errors = unwrap_failure(schema.validate(&doc(json!({"lols": [{"funny": 1}, 7]}))));
        assert_eq!(errors.message("lols"), Some("lols must be an object"));
    }

    #[test]
    fn test_elements_rule_accepts_empty_array() {
        let schema = Schema::new().field("lols", Rule::each(Schema::new().scalar("funny", true)));
        assert!(schema.validate(&doc(json!({"lols": []}))).is_success());
    }

    #[test]
    fn test_leaf_rules_check_against_parent_path() {
        let parent = KeyPath::root().key("outer").element(2);
        assert!(Rule::one_of(["a"]).check(&json!("a"), "k", &parent).is_none());
        assert!(matches!(
            Rule::predicate(|_, _| false).check(&json!(1), "k", &parent),
            Some(ErrorNode::Message(ref m)) if m == "k is not valid"
        ));
    }

    #[test]
    fn test_descending_rules_group_errors_under_key() {
        let parent = KeyPath::root().key("outer");
        let rule = Rule::each(Schema::new().scalar("id", true));
        let error = rule.check(&json!([{"id": 1}, {}]), "items", &parent);
        match error {
            Some(ErrorNode::Group(tree)) => {
                assert_eq!(tree.message("id"), Some("id is required"));
            }
            other => panic!("expected group, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_value_non_object_root() {
        let schema = Schema::new().scalar("a", true).scalar("b", false);
        let errors = unwrap_failure(schema.validate_value(&json!("text")));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.message("a"), Some("a is required"));
    }

    #[test]
    fn test_document_is_left_untouched() {
        let schema = Schema::new().scalar("a", true);
        let document = doc(json!({"a": 1, "b": 2}));
        let before = document.clone();
        let _ = schema.validate(&document);
        assert_eq!(document, before);
    }
}
