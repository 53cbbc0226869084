//! Leaf predicates.
//!
//! A [`Predicate`] tests a single field value, given the value and its key,
//! and reports an [`Outcome`]. The [`builtin`] module provides the stock
//! predicates; anything else is a closure.
//!
//! # Example
//!
//! ```rust
//! use loch::{Outcome, Predicate};
//! use serde_json::json;
//!
//! let tasty = Predicate::new(|value, key| {
//!     if value == "apple" {
//!         Outcome::Valid
//!     } else {
//!         Outcome::Message(format!("{} is not tasty", key))
//!     }
//! });
//!
//! assert_eq!(tasty.check(&json!("apple"), "fruit"), Outcome::Valid);
//! assert_eq!(
//!     tasty.check(&json!("toad"), "fruit"),
//!     Outcome::Message("fruit is not tasty".to_string())
//! );
//! ```

pub mod builtin;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::outcome::Outcome;

type PredicateFn = Arc<dyn Fn(&Value, &str) -> Outcome + Send + Sync>;

/// A shareable test for one field value.
///
/// Cloning is cheap; clones share the underlying closure.
#[derive(Clone)]
pub struct Predicate {
    check: PredicateFn,
}

impl Predicate {
    /// Wraps a closure returning anything convertible to an [`Outcome`]
    /// (`bool`, `String`, `&str`, `Vec<Outcome>`).
    pub fn new<F, O>(f: F) -> Self
    where
        F: Fn(&Value, &str) -> O + Send + Sync + 'static,
        O: Into<Outcome>,
    {
        Self {
            check: Arc::new(move |value, key| f(value, key).into()),
        }
    }

    /// Runs the predicate against `value`, reported under `key`.
    pub fn check(&self, value: &Value, key: &str) -> Outcome {
        (self.check)(value, key)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

pub use builtin::{
    all_of, complement, is_array_of_scalars, is_scalar, is_scalar_value, is_time, one_of,
    validator,
};
