use crate::tree::NodeId;
use serde::Serialize;

/// Declaration keyword of a variable statement.
#[derive(Eq, PartialEq, Clone, Copy, Debug, Serialize)]
pub enum VarDeclMode {
  Const,
  Let,
  Var,
}

#[derive(Eq, PartialEq, Clone, Copy, Debug, Serialize)]
pub enum AssignOp {
  Assign,
  AddAssign,
  SubAssign,
  MulAssign,
  DivAssign,
  RemAssign,
  ExpAssign,
  ShlAssign,
  ShrAssign,
  UshrAssign,
  BitAndAssign,
  BitOrAssign,
  BitXorAssign,
  AndAssign,
  OrAssign,
  NullishAssign,
}

impl AssignOp {
  /// Compound assignments read the target before writing it.
  pub fn is_compound(self) -> bool {
    self != AssignOp::Assign
  }
}

#[derive(Eq, PartialEq, Clone, Copy, Debug, Serialize)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  Div,
  Rem,
  Exp,
  LooseEq,
  LooseNotEq,
  StrictEq,
  StrictNotEq,
  Lt,
  LtEq,
  Gt,
  GtEq,
  Shl,
  Shr,
  Ushr,
  BitAnd,
  BitOr,
  BitXor,
  In,
  Instanceof,
  And,
  Or,
  Nullish,
}

#[derive(Eq, PartialEq, Clone, Copy, Debug, Serialize)]
pub enum UnaryOp {
  Delete,
  Minus,
  Not,
  Plus,
  BitNot,
  Typeof,
  Void,
}

#[derive(Eq, PartialEq, Clone, Copy, Debug, Serialize)]
pub enum UpdateOp {
  Increment,
  Decrement,
}

/// Property key of an object-literal member or object-pattern property.
///
/// Direct keys are plain names (`{ a: ... }`); computed keys hold the key
/// expression (`{ [expr]: ... }`).
#[derive(Clone, Debug, Serialize)]
pub enum PropKey {
  Direct(String),
  Computed(NodeId),
}

/// One syntax kind per variant; children are arena ids.
///
/// The set is closed on purpose: classification passes match exhaustively, so
/// adding a kind forces every consumer to decide how to treat it.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "$t")]
pub enum Syntax {
  // Top level.
  Program {
    body: Vec<NodeId>,
  },

  // Statements.
  Block {
    body: Vec<NodeId>,
  },
  Empty,
  ExprStmt {
    expr: NodeId,
  },
  If {
    test: NodeId,
    consequent: NodeId,
    alternate: Option<NodeId>,
  },
  While {
    condition: NodeId,
    body: NodeId,
  },
  Return {
    value: Option<NodeId>,
  },
  ForIn {
    left: NodeId,
    right: NodeId,
    body: NodeId,
  },
  ForOf {
    left: NodeId,
    right: NodeId,
    body: NodeId,
  },
  VarDecl {
    mode: VarDeclMode,
    declarators: Vec<NodeId>,
  },
  VarDeclarator {
    pattern: NodeId,
    initializer: Option<NodeId>,
  },
  FuncDecl {
    name: NodeId,
    func: NodeId,
  },

  // Expressions.
  Id {
    name: String,
  },
  Assignment {
    operator: AssignOp,
    target: NodeId,
    value: NodeId,
  },
  Binary {
    operator: BinaryOp,
    left: NodeId,
    right: NodeId,
  },
  Cond {
    test: NodeId,
    consequent: NodeId,
    alternate: NodeId,
  },
  Unary {
    operator: UnaryOp,
    argument: NodeId,
  },
  Update {
    operator: UpdateOp,
    prefix: bool,
    argument: NodeId,
  },
  Call {
    optional_chaining: bool,
    callee: NodeId,
    arguments: Vec<NodeId>,
  },
  /// Static property access (`a.b`, `a?.b`); the property is a plain name,
  /// not a node, so it can never be confused with a variable usage.
  Member {
    optional_chaining: bool,
    object: NodeId,
    property: String,
  },
  ComputedMember {
    optional_chaining: bool,
    object: NodeId,
    member: NodeId,
  },
  /// Outermost wrapper of an optional chain (`a?.b`, `(a?.b).c`). Matchers
  /// unwrap it before looking at structure.
  Chain {
    expression: NodeId,
  },
  Func {
    arrow: bool,
    params: Vec<NodeId>,
    body: NodeId,
  },
  Spread {
    argument: NodeId,
  },
  LitArr {
    elements: Vec<NodeId>,
  },
  LitObj {
    members: Vec<NodeId>,
  },
  ObjMember {
    key: PropKey,
    value: NodeId,
  },

  // Literals.
  LitStr {
    value: String,
  },
  LitNum {
    value: f64,
  },
  LitBool {
    value: bool,
  },
  LitNull,
  LitRegex {
    pattern: String,
    flags: String,
  },
  /// Carried as raw text; numeric interpretation is never needed here.
  LitBigInt {
    raw: String,
  },
  LitTemplate {
    quasis: Vec<String>,
    expressions: Vec<NodeId>,
  },

  // Patterns. These appear in declarations and as assignment targets alike.
  ArrPat {
    // Unnamed elements (holes) can exist.
    elements: Vec<Option<NodeId>>,
    rest: Option<NodeId>,
  },
  ObjPat {
    properties: Vec<NodeId>,
    rest: Option<NodeId>,
  },
  ObjPatProp {
    key: PropKey,
    target: NodeId,
    shorthand: bool,
  },
  AssignPat {
    target: NodeId,
    default_value: NodeId,
  },
}

impl Syntax {
  /// Visits every direct child id in source order.
  ///
  /// This is the single traversal primitive; passes that care about field
  /// roles (binder, classifiers) match on the variant instead.
  pub fn for_each_child(&self, mut f: impl FnMut(NodeId)) {
    fn key(key: &PropKey, f: &mut impl FnMut(NodeId)) {
      if let PropKey::Computed(expr) = key {
        f(*expr);
      }
    }

    match self {
      Syntax::Program { body } | Syntax::Block { body } => body.iter().for_each(|&c| f(c)),
      Syntax::Empty | Syntax::LitNull => {}
      Syntax::ExprStmt { expr } => f(*expr),
      Syntax::If {
        test,
        consequent,
        alternate,
      } => {
        f(*test);
        f(*consequent);
        alternate.iter().for_each(|&c| f(c));
      }
      Syntax::While { condition, body } => {
        f(*condition);
        f(*body);
      }
      Syntax::Return { value } => value.iter().for_each(|&c| f(c)),
      Syntax::ForIn { left, right, body } | Syntax::ForOf { left, right, body } => {
        f(*left);
        f(*right);
        f(*body);
      }
      Syntax::VarDecl { declarators, .. } => declarators.iter().for_each(|&c| f(c)),
      Syntax::VarDeclarator {
        pattern,
        initializer,
      } => {
        f(*pattern);
        initializer.iter().for_each(|&c| f(c));
      }
      Syntax::FuncDecl { name, func } => {
        f(*name);
        f(*func);
      }
      Syntax::Id { .. } => {}
      Syntax::Assignment { target, value, .. } => {
        f(*target);
        f(*value);
      }
      Syntax::Binary { left, right, .. } => {
        f(*left);
        f(*right);
      }
      Syntax::Cond {
        test,
        consequent,
        alternate,
      } => {
        f(*test);
        f(*consequent);
        f(*alternate);
      }
      Syntax::Unary { argument, .. } => f(*argument),
      Syntax::Update { argument, .. } => f(*argument),
      Syntax::Call {
        callee, arguments, ..
      } => {
        f(*callee);
        arguments.iter().for_each(|&c| f(c));
      }
      Syntax::Member { object, .. } => f(*object),
      Syntax::ComputedMember { object, member, .. } => {
        f(*object);
        f(*member);
      }
      Syntax::Chain { expression } => f(*expression),
      Syntax::Func { params, body, .. } => {
        params.iter().for_each(|&c| f(c));
        f(*body);
      }
      Syntax::Spread { argument } => f(*argument),
      Syntax::LitArr { elements } => elements.iter().for_each(|&c| f(c)),
      Syntax::LitObj { members } => members.iter().for_each(|&c| f(c)),
      Syntax::ObjMember { key: k, value } => {
        key(k, &mut f);
        f(*value);
      }
      Syntax::LitStr { .. }
      | Syntax::LitNum { .. }
      | Syntax::LitBool { .. }
      | Syntax::LitRegex { .. }
      | Syntax::LitBigInt { .. } => {}
      Syntax::LitTemplate { expressions, .. } => expressions.iter().for_each(|&c| f(c)),
      Syntax::ArrPat { elements, rest } => {
        elements.iter().flatten().for_each(|&c| f(c));
        rest.iter().for_each(|&c| f(c));
      }
      Syntax::ObjPat { properties, rest } => {
        properties.iter().for_each(|&c| f(c));
        rest.iter().for_each(|&c| f(c));
      }
      Syntax::ObjPatProp { key: k, target, .. } => {
        key(k, &mut f);
        f(*target);
      }
      Syntax::AssignPat {
        target,
        default_value,
      } => {
        f(*target);
        f(*default_value);
      }
    }
  }
}
