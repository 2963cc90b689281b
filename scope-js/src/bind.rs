//! The two binding passes: declaration, then reference resolution.
//!
//! Pass order matters because `var` and function declarations are visible
//! before their statement (hoisting); every binding must exist before any
//! reference is resolved. Within a binding, references are recorded in
//! source order, which the reference pass gets for free by walking fields in
//! syntactic order.

use crate::Binding;
use crate::BindingId;
use crate::BindingKind;
use crate::RefKind;
use crate::Reference;
use crate::Scope;
use crate::ScopeId;
use crate::ScopeKind;
use crate::Semantics;
use crate::TopLevelMode;
use ast_js::syntax::PropKey;
use ast_js::syntax::Syntax;
use ast_js::syntax::VarDeclMode;
use ast_js::tree::NodeId;
use ast_js::tree::Tree;
use std::collections::BTreeMap;

pub(crate) fn bind(tree: &Tree, mode: TopLevelMode, globals: &[&str]) -> Semantics {
  let mut declarer = Declarer {
    tree,
    sem: Semantics {
      scopes: vec![Scope {
        parent: None,
        kind: ScopeKind::Global,
        children: Vec::new(),
        bindings: Default::default(),
      }],
      bindings: Vec::new(),
      node_scopes: vec![Semantics::GLOBAL_SCOPE; tree.len()],
      declared: BTreeMap::new(),
      resolutions: BTreeMap::new(),
      top_scope: Semantics::GLOBAL_SCOPE,
    },
  };
  for &name in globals {
    declarer.declare(name, BindingKind::ImplicitGlobal, Semantics::GLOBAL_SCOPE, None);
  }
  let top = match mode {
    TopLevelMode::Global => Semantics::GLOBAL_SCOPE,
    TopLevelMode::Module => declarer.new_scope(Semantics::GLOBAL_SCOPE, ScopeKind::Module),
  };
  declarer.sem.top_scope = top;
  declarer.walk(tree.root(), top);

  let mut sem = declarer.sem;
  Resolver { tree, sem: &mut sem }.walk(tree.root());
  sem
}

struct Declarer<'t> {
  tree: &'t Tree,
  sem: Semantics,
}

impl<'t> Declarer<'t> {
  fn new_scope(&mut self, parent: ScopeId, kind: ScopeKind) -> ScopeId {
    let id = ScopeId::new(self.sem.scopes.len());
    self.sem.scopes.push(Scope {
      parent: Some(parent),
      kind,
      children: Vec::new(),
      bindings: Default::default(),
    });
    self.sem.scopes[parent.index()].children.push(id);
    id
  }

  fn declare(
    &mut self,
    name: &str,
    kind: BindingKind,
    scope: ScopeId,
    decl: Option<NodeId>,
  ) -> BindingId {
    if let Some(existing) = self.sem.scopes[scope.index()].get(name) {
      // Redeclaration in the same scope (including over a seeded global)
      // reuses the binding; the first real declaration claims it.
      let binding = &mut self.sem.bindings[existing.index()];
      if binding.kind == BindingKind::ImplicitGlobal && kind != BindingKind::ImplicitGlobal {
        binding.kind = kind;
        binding.decl = decl;
      }
      return existing;
    }
    let id = BindingId::new(self.sem.bindings.len());
    self.sem.bindings.push(Binding {
      name: name.into(),
      kind,
      scope,
      decl,
      references: Vec::new(),
    });
    self.sem.scopes[scope.index()].bindings.insert(name.into(), id);
    id
  }

  fn nearest_var_scope(&self, mut scope: ScopeId) -> ScopeId {
    loop {
      let data = &self.sem.scopes[scope.index()];
      if data.kind.is_var_scope() {
        return scope;
      }
      match data.parent {
        Some(parent) => scope = parent,
        None => return scope,
      }
    }
  }

  /// Declares every identifier of a declaration pattern, skipping embedded
  /// expressions (computed keys, default values) — those are references and
  /// belong to the second pass.
  fn declare_pattern(
    &mut self,
    node: NodeId,
    kind: BindingKind,
    scope: ScopeId,
    decl: NodeId,
    out: &mut Vec<BindingId>,
  ) {
    match self.tree.syntax(node) {
      Syntax::Id { name } => {
        out.push(self.declare(name, kind, scope, Some(decl)));
      }
      Syntax::ArrPat { elements, rest } => {
        for &element in elements.iter().flatten() {
          self.declare_pattern(element, kind, scope, decl, out);
        }
        if let Some(rest) = *rest {
          self.declare_pattern(rest, kind, scope, decl, out);
        }
      }
      Syntax::ObjPat { properties, rest } => {
        for &property in properties {
          if let Syntax::ObjPatProp { target, .. } = self.tree.syntax(property) {
            self.declare_pattern(*target, kind, scope, decl, out);
          }
        }
        if let Some(rest) = *rest {
          self.declare_pattern(rest, kind, scope, decl, out);
        }
      }
      Syntax::AssignPat { target, .. } => {
        self.declare_pattern(*target, kind, scope, decl, out);
      }
      _ => {}
    }
  }

  fn walk(&mut self, node: NodeId, scope: ScopeId) {
    self.sem.node_scopes[node.index()] = scope;
    match self.tree.syntax(node) {
      Syntax::Block { body } => {
        let inner = self.new_scope(scope, ScopeKind::Block);
        for &stmt in body {
          self.walk(stmt, inner);
        }
      }
      Syntax::ForIn { left, right, body } | Syntax::ForOf { left, right, body } => {
        // The loop head opens the scope, not the braces: `for (const x of y)`
        // binds x for the head and body alike.
        let inner = self.new_scope(scope, ScopeKind::Block);
        self.walk(*left, inner);
        self.walk(*right, inner);
        self.walk(*body, inner);
      }
      Syntax::Func {
        arrow,
        params,
        body,
      } => {
        let kind = if *arrow {
          ScopeKind::ArrowFunction
        } else {
          ScopeKind::NonArrowFunction
        };
        let inner = self.new_scope(scope, kind);
        for &param in params {
          let mut declared = Vec::new();
          self.declare_pattern(param, BindingKind::Param, inner, param, &mut declared);
          self.walk(param, inner);
        }
        self.walk(*body, inner);
      }
      Syntax::FuncDecl { name, func } => {
        if let Some(text) = self.tree.identifier_name(*name) {
          let binding = self.declare(text, BindingKind::Function, scope, Some(node));
          self.sem.declared.insert(node, vec![binding]);
        }
        self.walk(*name, scope);
        self.walk(*func, scope);
      }
      Syntax::VarDecl { mode, declarators } => {
        let kind = match mode {
          VarDeclMode::Const => BindingKind::Const,
          VarDeclMode::Let => BindingKind::Let,
          VarDeclMode::Var => BindingKind::Var,
        };
        let target_scope = if kind == BindingKind::Var {
          self.nearest_var_scope(scope)
        } else {
          scope
        };
        let mut all = Vec::new();
        for &declarator in declarators {
          if let Syntax::VarDeclarator { pattern, .. } = self.tree.syntax(declarator) {
            let mut declared = Vec::new();
            self.declare_pattern(*pattern, kind, target_scope, declarator, &mut declared);
            all.extend_from_slice(&declared);
            self.sem.declared.insert(declarator, declared);
          }
          self.walk(declarator, scope);
        }
        self.sem.declared.insert(node, all);
      }
      syntax => {
        syntax.for_each_child(|child| self.walk(child, scope));
      }
    }
  }
}

struct Resolver<'t, 's> {
  tree: &'t Tree,
  sem: &'s mut Semantics,
}

impl<'t, 's> Resolver<'t, 's> {
  fn reference(&mut self, node: NodeId, kind: RefKind, write_expr: Option<NodeId>) {
    let Some(name) = self.tree.identifier_name(node) else {
      return;
    };
    let scope = self.sem.scope_at(node);
    let Some(binding) = self.sem.resolve_name(scope, name) else {
      // Unresolved names stay unrecorded; the program may rely on hosts the
      // binder was not told about.
      return;
    };
    self.sem.bindings[binding.index()].references.push(Reference {
      node,
      scope,
      kind,
      write_expr,
    });
    self.sem.resolutions.insert(node, binding);
  }

  /// Records write references for every identifier in a write-target
  /// position: declaration patterns with initializers, assignment targets,
  /// and loop variables. Embedded expressions (defaults, computed keys,
  /// member objects) are visited as ordinary reads.
  fn target_pattern(&mut self, node: NodeId, kind: RefKind, write_expr: Option<NodeId>) {
    match self.tree.syntax(node) {
      Syntax::Id { .. } => self.reference(node, kind, write_expr),
      Syntax::ArrPat { elements, rest } => {
        for &element in elements.iter().flatten() {
          self.target_pattern(element, kind, write_expr);
        }
        if let Some(rest) = *rest {
          self.target_pattern(rest, kind, write_expr);
        }
      }
      Syntax::ObjPat { properties, rest } => {
        for &property in properties {
          if let Syntax::ObjPatProp { key, target, .. } = self.tree.syntax(property) {
            if let PropKey::Computed(expr) = key {
              self.walk(*expr);
            }
            self.target_pattern(*target, kind, write_expr);
          }
        }
        if let Some(rest) = *rest {
          self.target_pattern(rest, kind, write_expr);
        }
      }
      Syntax::AssignPat {
        target,
        default_value,
      } => {
        self.target_pattern(*target, kind, write_expr);
        self.walk(*default_value);
      }
      // Member expressions and anything else in target position: the base
      // object is read, not written.
      _ => self.walk(node),
    }
  }

  fn walk(&mut self, node: NodeId) {
    match self.tree.syntax(node) {
      Syntax::Id { .. } => self.reference(node, RefKind::Read, None),
      Syntax::VarDeclarator {
        pattern,
        initializer,
      } => {
        if let Some(init) = *initializer {
          self.target_pattern(*pattern, RefKind::Write, Some(init));
          self.walk(init);
        }
      }
      Syntax::Assignment {
        operator,
        target,
        value,
      } => {
        let kind = if operator.is_compound() {
          RefKind::ReadWrite
        } else {
          RefKind::Write
        };
        self.target_pattern(*target, kind, Some(*value));
        self.walk(*value);
      }
      Syntax::Update { argument, .. } => {
        if self.tree.identifier_name(*argument).is_some() {
          self.reference(*argument, RefKind::ReadWrite, None);
        } else {
          self.walk(*argument);
        }
      }
      Syntax::ForIn { left, right, body } | Syntax::ForOf { left, right, body } => {
        match self.tree.syntax(*left) {
          Syntax::VarDecl { declarators, .. } => {
            for &declarator in declarators {
              if let Syntax::VarDeclarator { pattern, .. } = self.tree.syntax(declarator) {
                self.target_pattern(*pattern, RefKind::Write, Some(*right));
              }
            }
          }
          _ => self.target_pattern(*left, RefKind::Write, Some(*right)),
        }
        self.walk(*right);
        self.walk(*body);
      }
      Syntax::Func { params, body, .. } => {
        for &param in params {
          self.declaration_pattern_exprs(param);
        }
        self.walk(*body);
      }
      Syntax::FuncDecl { func, .. } => {
        // The name is a declaration, not a reference.
        self.walk(*func);
      }
      syntax => {
        syntax.for_each_child(|child| self.walk(child));
      }
    }
  }

  /// Visits only the expressions embedded in a declaration pattern (default
  /// values and computed keys); the pattern's own identifiers declare, they
  /// do not reference.
  fn declaration_pattern_exprs(&mut self, node: NodeId) {
    match self.tree.syntax(node) {
      Syntax::Id { .. } => {}
      Syntax::ArrPat { elements, rest } => {
        for &element in elements.iter().flatten() {
          self.declaration_pattern_exprs(element);
        }
        if let Some(rest) = *rest {
          self.declaration_pattern_exprs(rest);
        }
      }
      Syntax::ObjPat { properties, rest } => {
        for &property in properties {
          if let Syntax::ObjPatProp { key, target, .. } = self.tree.syntax(property) {
            if let PropKey::Computed(expr) = key {
              self.walk(*expr);
            }
            self.declaration_pattern_exprs(*target);
          }
        }
        if let Some(rest) = *rest {
          self.declaration_pattern_exprs(rest);
        }
      }
      Syntax::AssignPat {
        target,
        default_value,
      } => {
        self.declaration_pattern_exprs(*target);
        self.walk(*default_value);
      }
      _ => {}
    }
  }
}
