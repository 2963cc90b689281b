//! Lint rules over `ast-js` trees and `scope-js` resolution.
//!
//! A rule is a pure read-only function of `(tree, semantics)` that reports
//! through a [`LintContext`]; the driver runs every rule and returns sorted
//! [`diagnostics::Diagnostic`]s. Nothing here mutates the tree, so linting
//! the same input twice yields identical output.
//!
//! ```
//! use ast_js::build::TreeBuilder;
//! use ast_js::syntax::VarDeclMode;
//! use diagnostics::FileId;
//! use lint_js::lint;
//! use scope_js::{bind, TopLevelMode, DEFAULT_GLOBALS};
//!
//! // const fs = require('fs'); fs = 0;
//! let mut b = TreeBuilder::new();
//! let callee = b.id("require");
//! let arg = b.string("fs");
//! let call = b.call(callee, vec![arg]);
//! let pat = b.id("fs");
//! let declarator = b.declarator(pat, Some(call));
//! let decl = b.var_decl(VarDeclMode::Const, vec![declarator]);
//! let target = b.id("fs");
//! let zero = b.number(0.0);
//! let assign = b.assign(target, zero);
//! let stmt = b.expr_stmt(assign);
//! let tree = b.finish(vec![decl, stmt]);
//!
//! let sem = bind(&tree, TopLevelMode::Module, DEFAULT_GLOBALS);
//! let diagnostics = lint(&tree, &sem, FileId(0));
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].code, "LINT0001");
//! assert_eq!(diagnostics[0].message, "'fs' is read-only.");
//! ```

pub mod ast_util;
pub mod context;
pub mod rules;

pub use context::LintContext;
pub use rules::builtin_rules;

use ast_js::tree::Tree;
use diagnostics::sort_diagnostics;
use diagnostics::Diagnostic;
use diagnostics::FileId;
use scope_js::Semantics;

/// A lint rule. Construction is configuration; `check` must be a pure
/// function of its inputs apart from reporting.
pub trait Rule {
  fn name(&self) -> &'static str;
  fn check(&self, cx: &mut LintContext, tree: &Tree, sem: &Semantics);
}

/// Runs the built-in rules and returns sorted diagnostics.
pub fn lint(tree: &Tree, sem: &Semantics, file: FileId) -> Vec<Diagnostic> {
  lint_with_rules(tree, sem, file, &builtin_rules())
}

/// Runs an explicit rule set.
pub fn lint_with_rules(
  tree: &Tree,
  sem: &Semantics,
  file: FileId,
  rules: &[Box<dyn Rule>],
) -> Vec<Diagnostic> {
  let mut cx = LintContext::new(file);
  for rule in rules {
    rule.check(&mut cx, tree, sem);
  }
  let mut diagnostics = cx.into_diagnostics();
  sort_diagnostics(&mut diagnostics);
  diagnostics
}
