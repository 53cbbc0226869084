//! # Loch
//!
//! Validation and whitelisting for decoded request bodies.
//!
//! ## Overview
//!
//! A request handler hands loch an already-parsed document and gets back
//! either success or a tree of field-level error messages. The same
//! document can be projected down to a whitelist of permitted fields with
//! an allow-list.
//!
//! Sibling keys are all checked and all reported. Within a single key,
//! checking stops at the first failure: the first failing predicate of a
//! chain, or the first invalid element of a sequence.
//!
//! ## Core Types
//!
//! - [`Schema`]: keys mapped to a required flag and a [`Rule`]
//! - [`Predicate`] / [`Outcome`]: pluggable leaf checks
//! - [`ErrorTree`] / [`ErrorNode`]: what failed, shaped like the schema
//! - [`AllowList`] / [`allower`]: whitelist projection
//! - [`Expectations`]: yes/no presence and acceptance checks
//!
//! ## Example
//!
//! ```rust
//! use loch::{validates, Schema};
//! use loch::predicate::is_time;
//! use serde_json::json;
//!
//! let schema = Schema::new()
//!     .scalar("name", true)
//!     .optional("opens", is_time())
//!     .field("address", Schema::new().scalar("city", true));
//!
//! let body = json!({"name": "Cafe", "opens": "7:30", "address": {"city": "Oslo"}});
//! assert!(validates(&schema, body.as_object().unwrap()).is_success());
//!
//! let body = json!({"opens": "late", "address": {}, "owner": "me"});
//! let errors = validates(&schema, body.as_object().unwrap())
//!     .into_result()
//!     .unwrap_err();
//! assert_eq!(
//!     errors.to_json(),
//!     json!({
//!         "name": "name is required",
//!         "opens": "opens must be a valid time",
//!         "address": {"city": "city is required"},
//!         "owner": "owner is not accepted"
//!     })
//! );
//! ```

pub mod allow;
pub mod document;
pub mod error;
pub mod expect;
pub mod messages;
pub mod outcome;
pub mod path;
pub mod predicate;
pub mod registry;
pub mod schema;

pub use allow::{allower, AllowList, Allowance};
pub use document::Document;
pub use error::{DefinitionError, ErrorNode, ErrorTree, RegistryError};
pub use expect::{Expect, Expectations};
pub use outcome::Outcome;
pub use path::{KeyPath, PathStep};
pub use predicate::Predicate;
pub use registry::PredicateRegistry;
pub use schema::{validates, Rule, Schema, SchemaNode};

/// Type alias for validation results using ErrorTree
pub type ValidationResult<T> = stillwater::Validation<T, ErrorTree>;
