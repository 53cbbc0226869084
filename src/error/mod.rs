//! Error types.
//!
//! Two kinds of error live here:
//! - [`ErrorTree`] / [`ErrorNode`]: data-dependent validation failures,
//!   always returned as values.
//! - [`DefinitionError`] / [`RegistryError`]: misuse of the schema or
//!   allow-list definitions, reported when the definition is built.

mod definition_error;
mod error_tree;

pub use definition_error::{DefinitionError, RegistryError};
pub use error_tree::{ErrorNode, ErrorTree};
