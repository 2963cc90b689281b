//! Rule registry.
//!
//! Rules are value objects implementing [`crate::Rule`]; construction is
//! configuration. [`builtin_rules`] lists every rule shipped with the crate
//! in its default configuration.

pub mod require_assign;

pub use require_assign::RequireAssign;

use crate::Rule;

/// Every built-in rule with default options.
pub fn builtin_rules() -> Vec<Box<dyn Rule>> {
  vec![Box::new(RequireAssign::default())]
}
