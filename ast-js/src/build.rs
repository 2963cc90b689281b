use crate::loc::Loc;
use crate::syntax::AssignOp;
use crate::syntax::BinaryOp;
use crate::syntax::PropKey;
use crate::syntax::Syntax;
use crate::syntax::UnaryOp;
use crate::syntax::UpdateOp;
use crate::syntax::VarDeclMode;
use crate::tree::push_node;
use crate::tree::NodeData;
use crate::tree::NodeId;
use crate::tree::Tree;

/// Bottom-up tree construction.
///
/// Children are created first and passed by id into their parent's
/// constructor; the builder links the parent pointers as each node is pushed.
/// Nodes created without an explicit location get a synthetic one-byte span
/// at a strictly increasing offset, so spans stay distinct and ordered even
/// for trees that never came from source text.
///
/// ```
/// use ast_js::build::TreeBuilder;
/// use ast_js::syntax::VarDeclMode;
///
/// let mut b = TreeBuilder::new();
/// let callee = b.id("require");
/// let arg = b.string("fs");
/// let call = b.call(callee, vec![arg]);
/// let pat = b.id("fs");
/// let declarator = b.declarator(pat, Some(call));
/// let decl = b.var_decl(VarDeclMode::Const, vec![declarator]);
/// let tree = b.finish(vec![decl]);
/// assert_eq!(tree.parent(call), Some(declarator));
/// ```
pub struct TreeBuilder {
  nodes: Vec<NodeData>,
}

impl TreeBuilder {
  pub fn new() -> TreeBuilder {
    TreeBuilder { nodes: Vec::new() }
  }

  /// Pushes a node with a synthetic location.
  pub fn push(&mut self, syntax: Syntax) -> NodeId {
    let offset = self.nodes.len() as u32;
    self.push_at(Loc(offset, offset + 1), syntax)
  }

  /// Pushes a node at an explicit location (ingestion from parsed input).
  pub fn push_at(&mut self, loc: Loc, syntax: Syntax) -> NodeId {
    push_node(&mut self.nodes, loc, syntax)
  }

  /// Wraps the statements in a program node and returns the finished tree.
  pub fn finish(mut self, body: Vec<NodeId>) -> Tree {
    let root = self.push(Syntax::Program { body });
    Tree::new(self.nodes, root)
  }

  /// Finishes with an explicitly constructed root (ingestion path).
  pub fn into_tree(self, root: NodeId) -> Tree {
    Tree::new(self.nodes, root)
  }

  // Expressions.

  pub fn id(&mut self, name: &str) -> NodeId {
    self.push(Syntax::Id { name: name.into() })
  }

  pub fn string(&mut self, value: &str) -> NodeId {
    self.push(Syntax::LitStr {
      value: value.into(),
    })
  }

  pub fn number(&mut self, value: f64) -> NodeId {
    self.push(Syntax::LitNum { value })
  }

  pub fn boolean(&mut self, value: bool) -> NodeId {
    self.push(Syntax::LitBool { value })
  }

  pub fn null_lit(&mut self) -> NodeId {
    self.push(Syntax::LitNull)
  }

  pub fn regex(&mut self, pattern: &str, flags: &str) -> NodeId {
    self.push(Syntax::LitRegex {
      pattern: pattern.into(),
      flags: flags.into(),
    })
  }

  pub fn bigint(&mut self, raw: &str) -> NodeId {
    self.push(Syntax::LitBigInt { raw: raw.into() })
  }

  pub fn template(&mut self, quasis: Vec<&str>, expressions: Vec<NodeId>) -> NodeId {
    self.push(Syntax::LitTemplate {
      quasis: quasis.into_iter().map(|q| q.into()).collect(),
      expressions,
    })
  }

  pub fn call(&mut self, callee: NodeId, arguments: Vec<NodeId>) -> NodeId {
    self.push(Syntax::Call {
      optional_chaining: false,
      callee,
      arguments,
    })
  }

  pub fn opt_call(&mut self, callee: NodeId, arguments: Vec<NodeId>) -> NodeId {
    self.push(Syntax::Call {
      optional_chaining: true,
      callee,
      arguments,
    })
  }

  pub fn member(&mut self, object: NodeId, property: &str) -> NodeId {
    self.push(Syntax::Member {
      optional_chaining: false,
      object,
      property: property.into(),
    })
  }

  pub fn opt_member(&mut self, object: NodeId, property: &str) -> NodeId {
    self.push(Syntax::Member {
      optional_chaining: true,
      object,
      property: property.into(),
    })
  }

  pub fn computed_member(&mut self, object: NodeId, member: NodeId) -> NodeId {
    self.push(Syntax::ComputedMember {
      optional_chaining: false,
      object,
      member,
    })
  }

  pub fn chain(&mut self, expression: NodeId) -> NodeId {
    self.push(Syntax::Chain { expression })
  }

  pub fn assign(&mut self, target: NodeId, value: NodeId) -> NodeId {
    self.assign_op(AssignOp::Assign, target, value)
  }

  pub fn assign_op(&mut self, operator: AssignOp, target: NodeId, value: NodeId) -> NodeId {
    self.push(Syntax::Assignment {
      operator,
      target,
      value,
    })
  }

  pub fn binary(&mut self, operator: BinaryOp, left: NodeId, right: NodeId) -> NodeId {
    self.push(Syntax::Binary {
      operator,
      left,
      right,
    })
  }

  pub fn unary(&mut self, operator: UnaryOp, argument: NodeId) -> NodeId {
    self.push(Syntax::Unary { operator, argument })
  }

  pub fn update(&mut self, operator: UpdateOp, prefix: bool, argument: NodeId) -> NodeId {
    self.push(Syntax::Update {
      operator,
      prefix,
      argument,
    })
  }

  pub fn spread(&mut self, argument: NodeId) -> NodeId {
    self.push(Syntax::Spread { argument })
  }

  pub fn arr(&mut self, elements: Vec<NodeId>) -> NodeId {
    self.push(Syntax::LitArr { elements })
  }

  pub fn obj(&mut self, members: Vec<NodeId>) -> NodeId {
    self.push(Syntax::LitObj { members })
  }

  pub fn obj_member(&mut self, key: PropKey, value: NodeId) -> NodeId {
    self.push(Syntax::ObjMember { key, value })
  }

  pub fn func(&mut self, arrow: bool, params: Vec<NodeId>, body: NodeId) -> NodeId {
    self.push(Syntax::Func {
      arrow,
      params,
      body,
    })
  }

  // Patterns.

  pub fn arr_pat(&mut self, elements: Vec<Option<NodeId>>, rest: Option<NodeId>) -> NodeId {
    self.push(Syntax::ArrPat { elements, rest })
  }

  pub fn obj_pat(&mut self, properties: Vec<NodeId>, rest: Option<NodeId>) -> NodeId {
    self.push(Syntax::ObjPat { properties, rest })
  }

  pub fn obj_pat_prop(&mut self, key: PropKey, target: NodeId, shorthand: bool) -> NodeId {
    self.push(Syntax::ObjPatProp {
      key,
      target,
      shorthand,
    })
  }

  /// Shorthand destructuring property: `{ name }`.
  pub fn obj_pat_shorthand(&mut self, name: &str) -> NodeId {
    let target = self.id(name);
    self.obj_pat_prop(PropKey::Direct(name.into()), target, true)
  }

  pub fn assign_pat(&mut self, target: NodeId, default_value: NodeId) -> NodeId {
    self.push(Syntax::AssignPat {
      target,
      default_value,
    })
  }

  // Statements.

  pub fn expr_stmt(&mut self, expr: NodeId) -> NodeId {
    self.push(Syntax::ExprStmt { expr })
  }

  pub fn block(&mut self, body: Vec<NodeId>) -> NodeId {
    self.push(Syntax::Block { body })
  }

  pub fn empty(&mut self) -> NodeId {
    self.push(Syntax::Empty)
  }

  pub fn ret(&mut self, value: Option<NodeId>) -> NodeId {
    self.push(Syntax::Return { value })
  }

  pub fn var_decl(&mut self, mode: VarDeclMode, declarators: Vec<NodeId>) -> NodeId {
    self.push(Syntax::VarDecl { mode, declarators })
  }

  pub fn declarator(&mut self, pattern: NodeId, initializer: Option<NodeId>) -> NodeId {
    self.push(Syntax::VarDeclarator {
      pattern,
      initializer,
    })
  }

  pub fn func_decl(&mut self, name: NodeId, func: NodeId) -> NodeId {
    self.push(Syntax::FuncDecl { name, func })
  }

  pub fn for_in(&mut self, left: NodeId, right: NodeId, body: NodeId) -> NodeId {
    self.push(Syntax::ForIn { left, right, body })
  }

  pub fn for_of(&mut self, left: NodeId, right: NodeId, body: NodeId) -> NodeId {
    self.push(Syntax::ForOf { left, right, body })
  }
}

impl Default for TreeBuilder {
  fn default() -> Self {
    TreeBuilder::new()
  }
}
