//! Stock predicates.
//!
//! Each constructor returns a ready [`Predicate`]. Failure messages always
//! start with the field key.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use super::Predicate;
use crate::document::contains_value;
use crate::messages;
use crate::outcome::Outcome;

const TIME_PATTERN: &str = r"^(0?[0-9]|1[0-9]|2[0-3]):[0-5][0-9]$";

fn time_regex() -> Option<&'static Regex> {
    static TIME: OnceLock<Option<Regex>> = OnceLock::new();
    TIME.get_or_init(|| Regex::new(TIME_PATTERN).ok()).as_ref()
}

/// Returns true for values that are neither documents nor sequences.
pub fn is_scalar_value(value: &Value) -> bool {
    !matches!(value, Value::Object(_) | Value::Array(_))
}

/// Accepts any value that is not a document or a sequence.
///
/// This is the rule behind the bare `true`/`false` schema shorthand.
pub fn is_scalar() -> Predicate {
    Predicate::new(|value, key| {
        if is_scalar_value(value) {
            Outcome::Valid
        } else {
            Outcome::Message(format!("{} must be a scalar", key))
        }
    })
}

/// Accepts 24-hour `HH:MM` strings; the hour may drop its leading zero.
///
/// # Example
///
/// ```rust
/// use loch::predicate::is_time;
/// use serde_json::json;
///
/// let time = is_time();
/// assert!(time.check(&json!("9:05"), "start").is_valid());
/// assert!(time.check(&json!("23:59"), "start").is_valid());
/// assert!(!time.check(&json!("24:00"), "start").is_valid());
/// ```
pub fn is_time() -> Predicate {
    Predicate::new(|value, key| {
        let matched = match (value.as_str(), time_regex()) {
            (Some(text), Some(regex)) => regex.is_match(text),
            _ => false,
        };
        if matched {
            Outcome::Valid
        } else {
            Outcome::Message(format!("{} must be a valid time", key))
        }
    })
}

/// Accepts values equal to one of `allowed`.
///
/// # Example
///
/// ```rust
/// use loch::predicate::one_of;
/// use loch::Outcome;
/// use serde_json::json;
///
/// let parent = one_of(["mother", "father"]);
/// assert_eq!(parent.check(&json!("father"), "type"), Outcome::Valid);
/// assert_eq!(
///     parent.check(&json!("uncle"), "type"),
///     Outcome::Message("type must be one of mother,father".to_string())
/// );
/// ```
pub fn one_of<I, V>(allowed: I) -> Predicate
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let allowed: Vec<Value> = allowed.into_iter().map(Into::into).collect();
    Predicate::new(move |value, key| {
        if contains_value(&allowed, value) {
            Outcome::Valid
        } else {
            Outcome::Message(messages::contain(key, &allowed))
        }
    })
}

/// Accepts sequences whose elements are all scalars.
pub fn is_array_of_scalars() -> Predicate {
    Predicate::new(|value, key| {
        let ok = value
            .as_array()
            .is_some_and(|items| items.iter().all(is_scalar_value));
        if ok {
            Outcome::Valid
        } else {
            Outcome::Message(format!("{} must be an array of scalars", key))
        }
    })
}

/// Accepts sequences whose elements all appear in `allowed`.
///
/// # Example
///
/// ```rust
/// use loch::predicate::all_of;
/// use serde_json::json;
///
/// let colors = all_of(["blue", "red"]);
/// assert!(colors.check(&json!(["blue", "red", "red"]), "colors").is_valid());
/// assert!(!colors.check(&json!(["blue", "green"]), "colors").is_valid());
/// assert!(!colors.check(&json!("blue"), "colors").is_valid());
/// ```
pub fn all_of<I, V>(allowed: I) -> Predicate
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let allowed: Vec<Value> = allowed.into_iter().map(Into::into).collect();
    Predicate::new(move |value, key| {
        let ok = value
            .as_array()
            .is_some_and(|items| items.iter().all(|item| contains_value(&allowed, item)));
        if ok {
            Outcome::Valid
        } else {
            Outcome::Message(format!(
                "{} must be an array containing only {}",
                key,
                messages::join_values(&allowed)
            ))
        }
    })
}

/// Builds a predicate from a plain boolean test and a message template.
///
/// On failure the key is substituted for `{{key}}` (or `{key}`) in
/// `template`.
///
/// # Example
///
/// ```rust
/// use loch::predicate::validator;
/// use loch::Outcome;
/// use serde_json::json;
///
/// let named = validator("{{key}} is not dumb", |value| value.is_string());
/// assert_eq!(named.check(&json!("delicious"), "applePie"), Outcome::Valid);
/// assert_eq!(
///     named.check(&json!(1), "applePie"),
///     Outcome::Message("applePie is not dumb".to_string())
/// );
/// ```
pub fn validator<F>(template: impl Into<String>, test: F) -> Predicate
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    let template = template.into();
    Predicate::new(move |value, key| {
        if test(value) {
            Outcome::Valid
        } else {
            Outcome::Message(
                template
                    .replace("{{key}}", key)
                    .replace("{key}", key),
            )
        }
    })
}

/// Negates a boolean test, for use with [`validator`].
pub fn complement<F>(test: F) -> impl Fn(&Value) -> bool + Send + Sync + 'static
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    move |value| !test(value)
}
