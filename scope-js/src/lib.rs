//! Lexical scope and variable resolution for `ast-js` trees.
//!
//! [`bind`] runs two passes over a tree: a declaration pass that builds the
//! scope hierarchy and its bindings, then a reference pass that records every
//! identifier occurrence on its binding, tagged read/write and carrying the
//! expression that produced a written value. The tree is never mutated;
//! binding the same tree twice yields identical tables.
//!
//! ```
//! use ast_js::build::TreeBuilder;
//! use ast_js::syntax::VarDeclMode;
//! use scope_js::{bind, RefKind, TopLevelMode, DEFAULT_GLOBALS};
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
//! let fs = sem.declared_bindings(declarator)[0];
//! let refs = &sem.binding(fs).references;
//! assert_eq!(refs.len(), 2);
//! // The initializing write points back at the call; the later write at `0`.
//! assert_eq!(refs[0].write_expr, Some(call));
//! assert_eq!(refs[1].kind, RefKind::Write);
//! assert_eq!(refs[1].write_expr, Some(zero));
//! ```

use ast_js::tree::NodeId;
use ast_js::tree::Tree;
use std::collections::BTreeMap;
use std::str::FromStr;

mod bind;


/// Whether the outermost statements of a program run at global scope or
/// inside a module.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TopLevelMode {
  Global,
  Module,
}

impl FromStr for TopLevelMode {
  type Err = ();

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "global" | "Global" => Ok(TopLevelMode::Global),
      "module" | "Module" => Ok(TopLevelMode::Module),
      _ => Err(()),
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl ScopeId {
  pub(crate) fn new(index: usize) -> ScopeId {
    ScopeId(index as u32)
  }

  pub fn raw(self) -> u32 {
    self.0
  }

  pub(crate) fn index(self) -> usize {
    self.0 as usize
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(u32);

impl BindingId {
  pub(crate) fn new(index: usize) -> BindingId {
    BindingId(index as u32)
  }

  pub fn raw(self) -> u32 {
    self.0
  }

  pub(crate) fn index(self) -> usize {
    self.0 as usize
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ScopeKind {
  Global,
  Module,
  NonArrowFunction,
  ArrowFunction,
  Block,
}

impl ScopeKind {
  pub(crate) fn is_var_scope(&self) -> bool {
    matches!(
      self,
      ScopeKind::Global
        | ScopeKind::Module
        | ScopeKind::NonArrowFunction
        | ScopeKind::ArrowFunction
    )
  }
}

/// One lexical scope. Symbol tables are `BTreeMap` so iteration order is
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
  pub parent: Option<ScopeId>,
  pub kind: ScopeKind,
  pub children: Vec<ScopeId>,
  pub bindings: BTreeMap<String, BindingId>,
}

impl Scope {
  pub fn get(&self, name: &str) -> Option<BindingId> {
    self.bindings.get(name).copied()
  }

  /// Iterates over bindings in deterministic name order.
  pub fn iter_bindings_sorted(&self) -> impl Iterator<Item = (&str, BindingId)> + '_ {
    self
      .bindings
      .iter()
      .map(|(name, binding)| (name.as_str(), *binding))
  }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BindingKind {
  Var,
  Let,
  Const,
  Function,
  Param,
  /// Seeded from the host environment rather than declared in the program.
  ImplicitGlobal,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum RefKind {
  Read,
  Write,
  ReadWrite,
}

/// One occurrence of a binding's name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reference {
  /// The identifier node.
  pub node: NodeId,
  /// The scope the occurrence appears in.
  pub scope: ScopeId,
  pub kind: RefKind,
  /// For writes, the expression node whose value is stored. `None` for
  /// update operators, which have no value-producing operand.
  pub write_expr: Option<NodeId>,
}

impl Reference {
  pub fn is_read(&self) -> bool {
    matches!(self.kind, RefKind::Read | RefKind::ReadWrite)
  }

  pub fn is_write(&self) -> bool {
    matches!(self.kind, RefKind::Write | RefKind::ReadWrite)
  }
}

/// A declared name together with all its occurrences, in source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
  pub name: String,
  pub kind: BindingKind,
  /// The scope the binding is defined in.
  pub scope: ScopeId,
  /// The declaration node that introduced the binding, if any.
  pub decl: Option<NodeId>,
  pub references: Vec<Reference>,
}

/// The result of [`bind`]: scope and binding tables plus per-node
/// attachments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Semantics {
  scopes: Vec<Scope>,
  bindings: Vec<Binding>,
  node_scopes: Vec<ScopeId>,
  declared: BTreeMap<NodeId, Vec<BindingId>>,
  resolutions: BTreeMap<NodeId, BindingId>,
  top_scope: ScopeId,
}

impl Semantics {
  /// The global scope always exists and is always scope 0.
  pub const GLOBAL_SCOPE: ScopeId = ScopeId(0);

  pub fn top_scope(&self) -> ScopeId {
    self.top_scope
  }

  pub fn scope(&self, id: ScopeId) -> &Scope {
    &self.scopes[id.index()]
  }

  pub fn binding(&self, id: BindingId) -> &Binding {
    &self.bindings[id.index()]
  }

  pub fn bindings(&self) -> impl Iterator<Item = (BindingId, &Binding)> {
    self
      .bindings
      .iter()
      .enumerate()
      .map(|(index, binding)| (BindingId::new(index), binding))
  }

  /// The innermost scope enclosing a node.
  pub fn scope_at(&self, node: NodeId) -> ScopeId {
    self.node_scopes[node.index()]
  }

  /// Bindings introduced by a declaration or declarator node. Non-declaration
  /// nodes introduce nothing.
  pub fn declared_bindings(&self, node: NodeId) -> &[BindingId] {
    self
      .declared
      .get(&node)
      .map(Vec::as_slice)
      .unwrap_or_default()
  }

  /// The binding an identifier occurrence resolved to, if any.
  pub fn resolution(&self, node: NodeId) -> Option<BindingId> {
    self.resolutions.get(&node).copied()
  }

  /// Resolves a name by walking the scope chain from `scope` outwards.
  pub fn resolve_name(&self, scope: ScopeId, name: &str) -> Option<BindingId> {
    let mut current = Some(scope);
    while let Some(id) = current {
      let scope = self.scope(id);
      if let Some(binding) = scope.get(name) {
        return Some(binding);
      }
      current = scope.parent;
    }
    None
  }

  /// True when the binding is defined in the global scope (not shadowed by
  /// any program declaration).
  pub fn is_global_binding(&self, id: BindingId) -> bool {
    self.binding(id).scope == Self::GLOBAL_SCOPE
  }
}

/// Names seeded into the global scope by default, mirroring the host
/// environment a CommonJS module runs in.
pub const DEFAULT_GLOBALS: &[&str] = &[
  "Array",
  "Boolean",
  "Error",
  "Function",
  "JSON",
  "Math",
  "Number",
  "Object",
  "Promise",
  "Proxy",
  "Reflect",
  "RegExp",
  "String",
  "Symbol",
  "console",
  "exports",
  "globalThis",
  "module",
  "process",
  "require",
];

/// Builds scopes, bindings, and references for a tree.
pub fn bind(tree: &Tree, mode: TopLevelMode, globals: &[&str]) -> Semantics {
  bind::bind(tree, mode, globals)
}
