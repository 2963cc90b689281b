//! Ingestion of ESTree-shaped JSON into a [`Tree`].
//!
//! The parser itself lives outside this workspace; any producer that emits
//! the standard ESTree shape (`type` tags plus `start`/`end` or `range` byte
//! offsets) can feed analyses here. Ingestion is strict about shape but not
//! about coverage: node types without a counterpart in [`Syntax`] fail with a
//! stable error code instead of being silently skipped, so a missed lint can
//! always be traced to its cause.

use crate::build::TreeBuilder;
use crate::loc::Loc;
use crate::syntax::AssignOp;
use crate::syntax::BinaryOp;
use crate::syntax::PropKey;
use crate::syntax::Syntax;
use crate::syntax::UnaryOp;
use crate::syntax::UpdateOp;
use crate::syntax::VarDeclMode;
use crate::tree::NodeId;
use crate::tree::Tree;
use serde_json::Map;
use serde_json::Value;
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// A stable classification of ingestion failures.
///
/// Diagnostic codes (prefix `TREE`) are assigned per variant and are stable:
/// - `TREE0001`: [`EstreeErrorType::ExpectedObject`]
/// - `TREE0002`: [`EstreeErrorType::MissingField`]
/// - `TREE0003`: [`EstreeErrorType::UnsupportedNodeType`]
/// - `TREE0004`: [`EstreeErrorType::UnsupportedOperator`]
/// - `TREE0005`: [`EstreeErrorType::UnsupportedLiteral`]
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum EstreeErrorType {
  ExpectedObject,
  MissingField(&'static str),
  UnsupportedNodeType(String),
  UnsupportedOperator(String),
  UnsupportedLiteral,
}

impl EstreeErrorType {
  /// Stable diagnostic code for this ingestion error variant.
  pub fn code(&self) -> &'static str {
    match self {
      EstreeErrorType::ExpectedObject => "TREE0001",
      EstreeErrorType::MissingField(_) => "TREE0002",
      EstreeErrorType::UnsupportedNodeType(_) => "TREE0003",
      EstreeErrorType::UnsupportedOperator(_) => "TREE0004",
      EstreeErrorType::UnsupportedLiteral => "TREE0005",
    }
  }

  /// Human-readable message describing this ingestion error.
  pub fn message(&self) -> String {
    match self {
      EstreeErrorType::ExpectedObject => "expected a JSON object with a `type` tag".into(),
      EstreeErrorType::MissingField(field) => format!("missing required field `{}`", field),
      EstreeErrorType::UnsupportedNodeType(typ) => format!("unsupported node type `{}`", typ),
      EstreeErrorType::UnsupportedOperator(op) => format!("unsupported operator `{}`", op),
      EstreeErrorType::UnsupportedLiteral => "literal value cannot be represented".into(),
    }
  }
}

#[derive(Clone, PartialEq, Eq)]
pub struct EstreeError {
  pub typ: EstreeErrorType,
  pub loc: Loc,
}

impl EstreeError {
  pub fn new(typ: EstreeErrorType, loc: Loc) -> EstreeError {
    EstreeError { typ, loc }
  }
}

impl fmt::Debug for EstreeError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} around loc [{}:{}]", self, self.loc.0, self.loc.1)
  }
}

impl Display for EstreeError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.typ.code(), self.typ.message())
  }
}

impl Error for EstreeError {}

pub type EstreeResult<T> = Result<T, EstreeError>;

/// Converts an ESTree `Program` document into a [`Tree`].
pub fn from_json(value: &Value) -> EstreeResult<Tree> {
  let mut reader = Reader {
    b: TreeBuilder::new(),
  };
  let root = reader.node(value)?;
  Ok(reader.b.into_tree(root))
}

struct Reader {
  b: TreeBuilder,
}

impl Reader {
  fn node(&mut self, value: &Value) -> EstreeResult<NodeId> {
    let (object, loc) = unpack(value)?;
    let typ = str_field(object, "type", loc)?;
    let syntax = match typ {
      "Program" => Syntax::Program {
        body: self.nodes(object, "body", loc)?,
      },
      "BlockStatement" => Syntax::Block {
        body: self.nodes(object, "body", loc)?,
      },
      "EmptyStatement" => Syntax::Empty,
      "ExpressionStatement" => Syntax::ExprStmt {
        expr: self.child(object, "expression", loc)?,
      },
      "IfStatement" => Syntax::If {
        test: self.child(object, "test", loc)?,
        consequent: self.child(object, "consequent", loc)?,
        alternate: self.opt_child(object, "alternate")?,
      },
      "WhileStatement" => Syntax::While {
        condition: self.child(object, "test", loc)?,
        body: self.child(object, "body", loc)?,
      },
      "ReturnStatement" => Syntax::Return {
        value: self.opt_child(object, "argument")?,
      },
      "ForInStatement" => Syntax::ForIn {
        left: self.child(object, "left", loc)?,
        right: self.child(object, "right", loc)?,
        body: self.child(object, "body", loc)?,
      },
      "ForOfStatement" => Syntax::ForOf {
        left: self.child(object, "left", loc)?,
        right: self.child(object, "right", loc)?,
        body: self.child(object, "body", loc)?,
      },
      "VariableDeclaration" => Syntax::VarDecl {
        mode: var_decl_mode(str_field(object, "kind", loc)?, loc)?,
        declarators: self.nodes(object, "declarations", loc)?,
      },
      "VariableDeclarator" => Syntax::VarDeclarator {
        pattern: self.child(object, "id", loc)?,
        initializer: self.opt_child(object, "init")?,
      },
      "FunctionDeclaration" => {
        let name = self.child(object, "id", loc)?;
        let func = self.func(object, false, loc)?;
        Syntax::FuncDecl { name, func }
      }
      "FunctionExpression" => return self.func(object, false, loc),
      "ArrowFunctionExpression" => return self.func(object, true, loc),
      "Identifier" => Syntax::Id {
        name: str_field(object, "name", loc)?.into(),
      },
      "Literal" => literal(object, loc)?,
      "TemplateLiteral" => self.template(object, loc)?,
      "CallExpression" => Syntax::Call {
        optional_chaining: bool_field(object, "optional"),
        callee: self.child(object, "callee", loc)?,
        arguments: self.nodes(object, "arguments", loc)?,
      },
      "MemberExpression" => {
        let optional_chaining = bool_field(object, "optional");
        let object_id = self.child(object, "object", loc)?;
        if bool_field(object, "computed") {
          Syntax::ComputedMember {
            optional_chaining,
            object: object_id,
            member: self.child(object, "property", loc)?,
          }
        } else {
          let property = field(object, "property", loc)?;
          let (property, ploc) = unpack(property)?;
          Syntax::Member {
            optional_chaining,
            object: object_id,
            property: str_field(property, "name", ploc)?.into(),
          }
        }
      }
      "ChainExpression" => Syntax::Chain {
        expression: self.child(object, "expression", loc)?,
      },
      "AssignmentExpression" => Syntax::Assignment {
        operator: assign_op(str_field(object, "operator", loc)?, loc)?,
        target: self.child(object, "left", loc)?,
        value: self.child(object, "right", loc)?,
      },
      "UpdateExpression" => Syntax::Update {
        operator: update_op(str_field(object, "operator", loc)?, loc)?,
        prefix: bool_field(object, "prefix"),
        argument: self.child(object, "argument", loc)?,
      },
      "UnaryExpression" => Syntax::Unary {
        operator: unary_op(str_field(object, "operator", loc)?, loc)?,
        argument: self.child(object, "argument", loc)?,
      },
      "BinaryExpression" | "LogicalExpression" => Syntax::Binary {
        operator: binary_op(str_field(object, "operator", loc)?, loc)?,
        left: self.child(object, "left", loc)?,
        right: self.child(object, "right", loc)?,
      },
      "ConditionalExpression" => Syntax::Cond {
        test: self.child(object, "test", loc)?,
        consequent: self.child(object, "consequent", loc)?,
        alternate: self.child(object, "alternate", loc)?,
      },
      "SpreadElement" => Syntax::Spread {
        argument: self.child(object, "argument", loc)?,
      },
      "ArrayExpression" => {
        let mut elements = Vec::new();
        for element in arr_field(object, "elements", loc)? {
          if !element.is_null() {
            elements.push(self.node(element)?);
          }
        }
        Syntax::LitArr { elements }
      }
      "ObjectExpression" => {
        let mut members = Vec::new();
        for member in arr_field(object, "properties", loc)? {
          members.push(self.obj_member(member)?);
        }
        Syntax::LitObj { members }
      }
      "ObjectPattern" => {
        let mut properties = Vec::new();
        let mut rest = None;
        for property in arr_field(object, "properties", loc)? {
          let (prop, ploc) = unpack(property)?;
          if str_field(prop, "type", ploc)? == "RestElement" {
            rest = Some(self.child(prop, "argument", ploc)?);
          } else {
            properties.push(self.obj_pat_prop(prop, ploc)?);
          }
        }
        Syntax::ObjPat { properties, rest }
      }
      "ArrayPattern" => {
        let mut elements = Vec::new();
        let mut rest = None;
        for element in arr_field(object, "elements", loc)? {
          if element.is_null() {
            elements.push(None);
            continue;
          }
          let (elem, eloc) = unpack(element)?;
          if str_field(elem, "type", eloc)? == "RestElement" {
            rest = Some(self.child(elem, "argument", eloc)?);
          } else {
            elements.push(Some(self.node(element)?));
          }
        }
        Syntax::ArrPat { elements, rest }
      }
      "AssignmentPattern" => Syntax::AssignPat {
        target: self.child(object, "left", loc)?,
        default_value: self.child(object, "right", loc)?,
      },
      unsupported => {
        return Err(EstreeError::new(
          EstreeErrorType::UnsupportedNodeType(unsupported.into()),
          loc,
        ))
      }
    };
    Ok(self.b.push_at(loc, syntax))
  }

  fn func(&mut self, object: &Map<String, Value>, arrow: bool, loc: Loc) -> EstreeResult<NodeId> {
    let params = self.nodes(object, "params", loc)?;
    let body = self.child(object, "body", loc)?;
    Ok(self.b.push_at(loc, Syntax::Func {
      arrow,
      params,
      body,
    }))
  }

  fn template(&mut self, object: &Map<String, Value>, loc: Loc) -> EstreeResult<Syntax> {
    let mut quasis = Vec::new();
    for quasi in arr_field(object, "quasis", loc)? {
      let (quasi, qloc) = unpack(quasi)?;
      let value = field(quasi, "value", qloc)?;
      let cooked = value
        .get("cooked")
        .and_then(Value::as_str)
        .ok_or_else(|| EstreeError::new(EstreeErrorType::UnsupportedLiteral, qloc))?;
      quasis.push(cooked.into());
    }
    Ok(Syntax::LitTemplate {
      quasis,
      expressions: self.nodes(object, "expressions", loc)?,
    })
  }

  fn obj_member(&mut self, value: &Value) -> EstreeResult<NodeId> {
    let (object, loc) = unpack(value)?;
    if str_field(object, "type", loc)? == "SpreadElement" {
      return self.node(value);
    }
    let key = self.prop_key(object, loc)?;
    let value = self.child(object, "value", loc)?;
    Ok(self.b.push_at(loc, Syntax::ObjMember { key, value }))
  }

  fn obj_pat_prop(&mut self, object: &Map<String, Value>, loc: Loc) -> EstreeResult<NodeId> {
    let key = self.prop_key(object, loc)?;
    let target = self.child(object, "value", loc)?;
    let shorthand = bool_field(object, "shorthand");
    Ok(self.b.push_at(loc, Syntax::ObjPatProp {
      key,
      target,
      shorthand,
    }))
  }

  fn prop_key(&mut self, object: &Map<String, Value>, loc: Loc) -> EstreeResult<PropKey> {
    let key = field(object, "key", loc)?;
    if bool_field(object, "computed") {
      return Ok(PropKey::Computed(self.node(key)?));
    }
    let (key, kloc) = unpack(key)?;
    match str_field(key, "type", kloc)? {
      "Identifier" => Ok(PropKey::Direct(str_field(key, "name", kloc)?.into())),
      "Literal" => match field(key, "value", kloc)? {
        Value::String(name) => Ok(PropKey::Direct(name.clone())),
        Value::Number(number) => Ok(PropKey::Direct(number.to_string())),
        _ => Err(EstreeError::new(EstreeErrorType::UnsupportedLiteral, kloc)),
      },
      typ => Err(EstreeError::new(
        EstreeErrorType::UnsupportedNodeType(typ.into()),
        kloc,
      )),
    }
  }

  fn nodes(
    &mut self,
    object: &Map<String, Value>,
    name: &'static str,
    loc: Loc,
  ) -> EstreeResult<Vec<NodeId>> {
    let mut ids = Vec::new();
    for value in arr_field(object, name, loc)? {
      ids.push(self.node(value)?);
    }
    Ok(ids)
  }

  fn child(
    &mut self,
    object: &Map<String, Value>,
    name: &'static str,
    loc: Loc,
  ) -> EstreeResult<NodeId> {
    self.node(field(object, name, loc)?)
  }

  fn opt_child(
    &mut self,
    object: &Map<String, Value>,
    name: &'static str,
  ) -> EstreeResult<Option<NodeId>> {
    match object.get(name) {
      None | Some(Value::Null) => Ok(None),
      Some(value) => Ok(Some(self.node(value)?)),
    }
  }
}

fn literal(object: &Map<String, Value>, loc: Loc) -> EstreeResult<Syntax> {
  if let Some(regex) = object.get("regex").and_then(Value::as_object) {
    return Ok(Syntax::LitRegex {
      pattern: regex
        .get("pattern")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .into(),
      flags: regex
        .get("flags")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .into(),
    });
  }
  if let Some(raw) = object.get("bigint").and_then(Value::as_str) {
    return Ok(Syntax::LitBigInt { raw: raw.into() });
  }
  match field(object, "value", loc)? {
    Value::Null => Ok(Syntax::LitNull),
    Value::Bool(value) => Ok(Syntax::LitBool { value: *value }),
    Value::Number(value) => value
      .as_f64()
      .map(|value| Syntax::LitNum { value })
      .ok_or_else(|| EstreeError::new(EstreeErrorType::UnsupportedLiteral, loc)),
    Value::String(value) => Ok(Syntax::LitStr {
      value: value.clone(),
    }),
    _ => Err(EstreeError::new(EstreeErrorType::UnsupportedLiteral, loc)),
  }
}

fn unpack(value: &Value) -> EstreeResult<(&Map<String, Value>, Loc)> {
  let object = value
    .as_object()
    .ok_or_else(|| EstreeError::new(EstreeErrorType::ExpectedObject, Loc(0, 0)))?;
  Ok((object, loc_of(object)))
}

fn loc_of(object: &Map<String, Value>) -> Loc {
  let int = |value: Option<&Value>| value.and_then(Value::as_u64).map(|v| v as u32);
  if let (Some(start), Some(end)) = (int(object.get("start")), int(object.get("end"))) {
    return Loc(start, end);
  }
  if let Some(range) = object.get("range").and_then(Value::as_array) {
    if let (Some(start), Some(end)) = (int(range.first()), int(range.get(1))) {
      return Loc(start, end);
    }
  }
  Loc(0, 0)
}

fn field<'v>(
  object: &'v Map<String, Value>,
  name: &'static str,
  loc: Loc,
) -> EstreeResult<&'v Value> {
  object
    .get(name)
    .ok_or_else(|| EstreeError::new(EstreeErrorType::MissingField(name), loc))
}

fn str_field<'v>(
  object: &'v Map<String, Value>,
  name: &'static str,
  loc: Loc,
) -> EstreeResult<&'v str> {
  field(object, name, loc)?
    .as_str()
    .ok_or_else(|| EstreeError::new(EstreeErrorType::MissingField(name), loc))
}

fn bool_field(object: &Map<String, Value>, name: &'static str) -> bool {
  object.get(name).and_then(Value::as_bool).unwrap_or(false)
}

fn arr_field<'v>(
  object: &'v Map<String, Value>,
  name: &'static str,
  loc: Loc,
) -> EstreeResult<&'v Vec<Value>> {
  field(object, name, loc)?
    .as_array()
    .ok_or_else(|| EstreeError::new(EstreeErrorType::MissingField(name), loc))
}

fn var_decl_mode(kind: &str, loc: Loc) -> EstreeResult<VarDeclMode> {
  match kind {
    "const" => Ok(VarDeclMode::Const),
    "let" => Ok(VarDeclMode::Let),
    "var" => Ok(VarDeclMode::Var),
    other => Err(EstreeError::new(
      EstreeErrorType::UnsupportedOperator(other.into()),
      loc,
    )),
  }
}

fn assign_op(operator: &str, loc: Loc) -> EstreeResult<AssignOp> {
  Ok(match operator {
    "=" => AssignOp::Assign,
    "+=" => AssignOp::AddAssign,
    "-=" => AssignOp::SubAssign,
    "*=" => AssignOp::MulAssign,
    "/=" => AssignOp::DivAssign,
    "%=" => AssignOp::RemAssign,
    "**=" => AssignOp::ExpAssign,
    "<<=" => AssignOp::ShlAssign,
    ">>=" => AssignOp::ShrAssign,
    ">>>=" => AssignOp::UshrAssign,
    "&=" => AssignOp::BitAndAssign,
    "|=" => AssignOp::BitOrAssign,
    "^=" => AssignOp::BitXorAssign,
    "&&=" => AssignOp::AndAssign,
    "||=" => AssignOp::OrAssign,
    "??=" => AssignOp::NullishAssign,
    other => {
      return Err(EstreeError::new(
        EstreeErrorType::UnsupportedOperator(other.into()),
        loc,
      ))
    }
  })
}

fn binary_op(operator: &str, loc: Loc) -> EstreeResult<BinaryOp> {
  Ok(match operator {
    "+" => BinaryOp::Add,
    "-" => BinaryOp::Sub,
    "*" => BinaryOp::Mul,
    "/" => BinaryOp::Div,
    "%" => BinaryOp::Rem,
    "**" => BinaryOp::Exp,
    "==" => BinaryOp::LooseEq,
    "!=" => BinaryOp::LooseNotEq,
    "===" => BinaryOp::StrictEq,
    "!==" => BinaryOp::StrictNotEq,
    "<" => BinaryOp::Lt,
    "<=" => BinaryOp::LtEq,
    ">" => BinaryOp::Gt,
    ">=" => BinaryOp::GtEq,
    "<<" => BinaryOp::Shl,
    ">>" => BinaryOp::Shr,
    ">>>" => BinaryOp::Ushr,
    "&" => BinaryOp::BitAnd,
    "|" => BinaryOp::BitOr,
    "^" => BinaryOp::BitXor,
    "in" => BinaryOp::In,
    "instanceof" => BinaryOp::Instanceof,
    "&&" => BinaryOp::And,
    "||" => BinaryOp::Or,
    "??" => BinaryOp::Nullish,
    other => {
      return Err(EstreeError::new(
        EstreeErrorType::UnsupportedOperator(other.into()),
        loc,
      ))
    }
  })
}

fn unary_op(operator: &str, loc: Loc) -> EstreeResult<UnaryOp> {
  Ok(match operator {
    "delete" => UnaryOp::Delete,
    "-" => UnaryOp::Minus,
    "!" => UnaryOp::Not,
    "+" => UnaryOp::Plus,
    "~" => UnaryOp::BitNot,
    "typeof" => UnaryOp::Typeof,
    "void" => UnaryOp::Void,
    other => {
      return Err(EstreeError::new(
        EstreeErrorType::UnsupportedOperator(other.into()),
        loc,
      ))
    }
  })
}

fn update_op(operator: &str, loc: Loc) -> EstreeResult<UpdateOp> {
  match operator {
    "++" => Ok(UpdateOp::Increment),
    "--" => Ok(UpdateOp::Decrement),
    other => Err(EstreeError::new(
      EstreeErrorType::UnsupportedOperator(other.into()),
      loc,
    )),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn reads_require_declaration_and_assignment() {
    // const mod = require('m'); mod = 0;
    let doc = json!({
      "type": "Program",
      "start": 0, "end": 34,
      "body": [
        {
          "type": "VariableDeclaration",
          "start": 0, "end": 25,
          "kind": "const",
          "declarations": [{
            "type": "VariableDeclarator",
            "start": 6, "end": 24,
            "id": { "type": "Identifier", "start": 6, "end": 9, "name": "mod" },
            "init": {
              "type": "CallExpression",
              "start": 12, "end": 24,
              "callee": { "type": "Identifier", "start": 12, "end": 19, "name": "require" },
              "arguments": [
                { "type": "Literal", "start": 20, "end": 23, "value": "m" }
              ],
              "optional": false
            }
          }]
        },
        {
          "type": "ExpressionStatement",
          "start": 26, "end": 34,
          "expression": {
            "type": "AssignmentExpression",
            "start": 26, "end": 33,
            "operator": "=",
            "left": { "type": "Identifier", "start": 26, "end": 29, "name": "mod" },
            "right": { "type": "Literal", "start": 32, "end": 33, "value": 0 }
          }
        }
      ]
    });

    let tree = from_json(&doc).unwrap();
    assert!(matches!(tree.syntax(tree.root()), Syntax::Program { body } if body.len() == 2));
    assert_eq!(tree.loc(tree.root()), Loc(0, 34));

    let calls: Vec<_> = tree
      .nodes()
      .filter(|(_, n)| matches!(n.syntax(), Syntax::Call { .. }))
      .collect();
    assert_eq!(calls.len(), 1);
    let (call, _) = calls[0];
    assert_eq!(tree.loc(call), Loc(12, 24));
    let Syntax::Call { callee, .. } = tree.syntax(call) else {
      unreachable!()
    };
    assert_eq!(tree.identifier_name(*callee), Some("require"));
  }

  #[test]
  fn reads_optional_chaining_shapes() {
    // Object?.freeze(x) as espree emits it: ChainExpression around the call.
    let doc = json!({
      "type": "Program",
      "body": [{
        "type": "ExpressionStatement",
        "expression": {
          "type": "ChainExpression",
          "expression": {
            "type": "CallExpression",
            "optional": false,
            "callee": {
              "type": "MemberExpression",
              "computed": false,
              "optional": true,
              "object": { "type": "Identifier", "name": "Object" },
              "property": { "type": "Identifier", "name": "freeze" }
            },
            "arguments": [{ "type": "Identifier", "name": "x" }]
          }
        }
      }]
    });

    let tree = from_json(&doc).unwrap();
    let member = tree
      .nodes()
      .find(|(_, n)| matches!(n.syntax(), Syntax::Member { .. }))
      .map(|(id, _)| id)
      .unwrap();
    let Syntax::Member {
      optional_chaining,
      property,
      ..
    } = tree.syntax(member)
    else {
      unreachable!()
    };
    assert!(optional_chaining);
    assert_eq!(property, "freeze");
    assert!(matches!(
      tree.syntax(tree.parent(member).unwrap()),
      Syntax::Call { .. }
    ));
  }

  #[test]
  fn reads_literal_variants() {
    let lit = |value: Value| {
      let mut wrapped = Map::new();
      wrapped.insert("type".into(), "Literal".into());
      for (k, v) in value.as_object().unwrap() {
        wrapped.insert(k.clone(), v.clone());
      }
      let doc = json!({
        "type": "Program",
        "body": [{ "type": "ExpressionStatement", "expression": Value::Object(wrapped) }]
      });
      from_json(&doc).unwrap()
    };

    let tree = lit(json!({ "value": null, "regex": { "pattern": "ab+c", "flags": "u" } }));
    assert!(tree.nodes().any(|(_, n)| matches!(
      n.syntax(),
      Syntax::LitRegex { pattern, flags } if pattern == "ab+c" && flags == "u"
    )));

    let tree = lit(json!({ "value": null, "bigint": "10" }));
    assert!(tree
      .nodes()
      .any(|(_, n)| matches!(n.syntax(), Syntax::LitBigInt { raw } if raw == "10")));

    let tree = lit(json!({ "value": null }));
    assert!(tree
      .nodes()
      .any(|(_, n)| matches!(n.syntax(), Syntax::LitNull)));
  }

  #[test]
  fn reads_destructuring_patterns() {
    // const {a, ...rest} = require('m');
    let doc = json!({
      "type": "Program",
      "body": [{
        "type": "VariableDeclaration",
        "kind": "const",
        "declarations": [{
          "type": "VariableDeclarator",
          "id": {
            "type": "ObjectPattern",
            "properties": [
              {
                "type": "Property",
                "computed": false,
                "shorthand": true,
                "key": { "type": "Identifier", "name": "a" },
                "value": { "type": "Identifier", "name": "a" }
              },
              {
                "type": "RestElement",
                "argument": { "type": "Identifier", "name": "rest" }
              }
            ]
          },
          "init": {
            "type": "CallExpression",
            "callee": { "type": "Identifier", "name": "require" },
            "arguments": [{ "type": "Literal", "value": "m" }]
          }
        }]
      }]
    });

    let tree = from_json(&doc).unwrap();
    let pat = tree
      .nodes()
      .find(|(_, n)| matches!(n.syntax(), Syntax::ObjPat { .. }))
      .map(|(id, _)| id)
      .unwrap();
    let Syntax::ObjPat { properties, rest } = tree.syntax(pat) else {
      unreachable!()
    };
    assert_eq!(properties.len(), 1);
    assert_eq!(tree.identifier_name(rest.unwrap()), Some("rest"));
  }

  #[test]
  fn rejects_unknown_node_types_with_stable_code() {
    let doc = json!({
      "type": "Program",
      "body": [{ "type": "WithStatement", "start": 3, "end": 9 }]
    });
    let err = from_json(&doc).unwrap_err();
    assert_eq!(err.typ, EstreeErrorType::UnsupportedNodeType("WithStatement".into()));
    assert_eq!(err.typ.code(), "TREE0003");
    assert_eq!(err.loc, Loc(3, 9));
  }

  #[test]
  fn rejects_non_object_input() {
    let err = from_json(&json!([1, 2])).unwrap_err();
    assert_eq!(err.typ, EstreeErrorType::ExpectedObject);
    assert_eq!(err.typ.code(), "TREE0001");
  }
}
