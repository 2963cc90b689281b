//! Disallows assigning to `require`-bound names.
//!
//! A name bound directly from a `require(...)` call is a module binding;
//! reassigning it or mutating the module object it refers to is almost
//! always a bug. Every later reference to such a binding is classified as a
//! benign read, a direct reassignment (`readonly`), or a member mutation
//! (`readonlyMember`) — including mutation through `Object.freeze`-style
//! platform utilities and through optional chaining.

use crate::ast_util::is_specific_member_access;
use crate::ast_util::skip_chain_expr;
use crate::LintContext;
use crate::Rule;
use ahash::HashMap;
use ast_js::syntax::Syntax;
use ast_js::syntax::UnaryOp;
use ast_js::tree::NodeId;
use ast_js::tree::Tree;
use once_cell::sync::Lazy;
use scope_js::ScopeId;
use scope_js::Semantics;

const OBJECT_MUTATORS: &[&str] = &[
  "assign",
  "defineProperties",
  "defineProperty",
  "freeze",
  "setPrototypeOf",
];

const REFLECT_MUTATORS: &[&str] = &[
  "defineProperty",
  "deleteProperty",
  "set",
  "setPrototypeOf",
];

/// Platform utilities known to mutate their first argument in place, keyed
/// by receiver. Exact-set membership, so the table stays auditable.
static WELL_KNOWN_MUTATION_FNS: Lazy<HashMap<&'static str, &'static [&'static str]>> =
  Lazy::new(|| {
    HashMap::from_iter([("Object", OBJECT_MUTATORS), ("Reflect", REFLECT_MUTATORS)])
  });

/// The two things this rule has to say, each parameterized by the bound
/// name.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RequireAssignMessage {
  Readonly,
  ReadonlyMember,
}

impl RequireAssignMessage {
  pub fn code(&self) -> &'static str {
    match self {
      RequireAssignMessage::Readonly => "LINT0001",
      RequireAssignMessage::ReadonlyMember => "LINT0002",
    }
  }

  pub fn message(&self, name: &str) -> String {
    match self {
      RequireAssignMessage::Readonly => format!("'{}' is read-only.", name),
      RequireAssignMessage::ReadonlyMember => {
        format!("The members of '{}' are read-only.", name)
      }
    }
  }
}

/// Disallow assigning to required bindings.
pub struct RequireAssign {
  callee_name: String,
}

impl RequireAssign {
  /// Targets a custom import-call name instead of `require`.
  pub fn new(callee_name: impl Into<String>) -> RequireAssign {
    RequireAssign {
      callee_name: callee_name.into(),
    }
  }
}

impl Default for RequireAssign {
  fn default() -> Self {
    RequireAssign::new("require")
  }
}

impl Rule for RequireAssign {
  fn name(&self) -> &'static str {
    "no-require-assign"
  }

  fn check(&self, cx: &mut LintContext, tree: &Tree, sem: &Semantics) {
    for (call, node) in tree.nodes() {
      let Syntax::Call { callee, .. } = node.syntax() else {
        continue;
      };
      // The callee is matched by name, not through the resolver; a shadowed
      // `require` behaves exactly like the real one here.
      if tree.identifier_name(*callee) != Some(self.callee_name.as_str()) {
        continue;
      }
      let Some(parent) = tree.parent(call) else {
        continue;
      };
      let scope = sem.scope_at(call);
      // A non-declaration parent (`wrap(require(...))`, a bare expression
      // statement) declares nothing; the call is silently skipped.
      for &binding in sem.declared_bindings(parent) {
        let references = sem
          .binding(binding)
          .references
          .iter()
          .filter(|r| r.write_expr != Some(call));
        for reference in references {
          if reference.is_write() {
            report(cx, tree, reference.node, RequireAssignMessage::Readonly);
          } else if is_member_write(tree, sem, scope, reference.node) {
            report(cx, tree, reference.node, RequireAssignMessage::ReadonlyMember);
          }
        }
      }
    }
  }
}

fn report(cx: &mut LintContext, tree: &Tree, id: NodeId, kind: RequireAssignMessage) {
  let Some(name) = tree.identifier_name(id) else {
    return;
  };
  let site = write_site(tree, id);
  cx.report(tree, site, kind.code(), kind.message(name));
}

/// Is the node in an assignment-target position, directly or inside a
/// destructuring pattern?
fn is_assignment_target(tree: &Tree, node: NodeId) -> bool {
  let Some(parent) = tree.parent(node) else {
    return false;
  };
  match tree.syntax(parent) {
    Syntax::Assignment { target, .. } => *target == node,
    // Every child position of an array pattern is a target.
    Syntax::ArrPat { .. } => true,
    Syntax::ObjPatProp { target, .. } => *target == node,
    Syntax::ObjPat { rest, .. } => *rest == Some(node),
    Syntax::AssignPat { target, .. } => *target == node,
    _ => false,
  }
}

/// Is the node the operand of `++`/`--`/`delete`? The operand may be the
/// chain wrapper rather than the node itself (`delete x?.prop`).
fn is_mutation_unary_operand(tree: &Tree, node: NodeId) -> bool {
  let operand = match tree.parent(node) {
    Some(parent) if matches!(tree.syntax(parent), Syntax::Chain { .. }) => parent,
    _ => node,
  };
  let Some(parent) = tree.parent(operand) else {
    return false;
  };
  match tree.syntax(parent) {
    Syntax::Update { argument, .. } => *argument == operand,
    Syntax::Unary {
      operator: UnaryOp::Delete,
      argument,
    } => *argument == operand,
    _ => false,
  }
}

/// Is the node the iteration variable of `for-in`/`for-of`?
fn is_iteration_variable(tree: &Tree, node: NodeId) -> bool {
  let Some(parent) = tree.parent(node) else {
    return false;
  };
  match tree.syntax(parent) {
    Syntax::ForIn { left, .. } | Syntax::ForOf { left, .. } => *left == node,
    _ => false,
  }
}

/// Is the node the first argument of a well-known mutation function whose
/// receiver (`Object`, `Reflect`) is the unshadowed global?
fn is_well_known_mutation_arg(
  tree: &Tree,
  sem: &Semantics,
  scope: ScopeId,
  node: NodeId,
) -> bool {
  let Some(parent) = tree.parent(node) else {
    return false;
  };
  let Syntax::Call {
    callee, arguments, ..
  } = tree.syntax(parent)
  else {
    return false;
  };
  if arguments.first() != Some(&node) {
    return false;
  }
  let callee = skip_chain_expr(tree, *callee);
  let matched = WELL_KNOWN_MUTATION_FNS
    .iter()
    .any(|(receiver, properties)| is_specific_member_access(tree, callee, receiver, properties));
  if !matched {
    return false;
  }
  let (Syntax::Member { object, .. } | Syntax::ComputedMember { object, .. }) =
    tree.syntax(callee)
  else {
    return false;
  };
  let Some(receiver) = tree.identifier_name(*object) else {
    return false;
  };
  // A local variable that happens to be named `Object` is not the platform
  // `Object`; only the global counts.
  match sem.resolve_name(scope, receiver) {
    Some(binding) => sem.is_global_binding(binding),
    None => false,
  }
}

/// Does this (read) reference mutate a member of the bound value?
fn is_member_write(tree: &Tree, sem: &Semantics, scope: ScopeId, id: NodeId) -> bool {
  let through_member = match tree.parent(id) {
    Some(parent) => match tree.syntax(parent) {
      Syntax::Member { object, .. } | Syntax::ComputedMember { object, .. } if *object == id => {
        is_assignment_target(tree, parent)
          || is_mutation_unary_operand(tree, parent)
          || is_iteration_variable(tree, parent)
      }
      _ => false,
    },
    None => false,
  };
  through_member || is_well_known_mutation_arg(tree, sem, scope, id)
}

/// The node reported for a flagged reference: the nearest enclosing
/// mutation operation, or the identifier itself if the walk finds none.
fn write_site(tree: &Tree, id: NodeId) -> NodeId {
  for ancestor in tree.ancestors(id) {
    match tree.syntax(ancestor) {
      Syntax::Assignment { .. }
      | Syntax::Update { .. }
      | Syntax::Call { .. }
      | Syntax::ForIn { .. }
      | Syntax::ForOf { .. } => return ancestor,
      Syntax::Unary {
        operator: UnaryOp::Delete,
        ..
      } => return ancestor,
      _ => {}
    }
  }
  id
}
