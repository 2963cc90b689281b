//! Structural queries over trees shared by lint rules.
//!
//! The matching here is deliberately conservative: a property name that
//! cannot be statically resolved never matches anything, so rules miss a
//! detection rather than invent one.

use ast_js::syntax::Syntax;
use ast_js::tree::NodeId;
use ast_js::tree::Tree;

/// Steps over an optional-chaining wrapper, if present.
///
/// `a?.b` and `(a?.b).c` both reach the underlying member expression this
/// way; syntactic and parenthesized chains look identical afterwards.
pub fn skip_chain_expr(tree: &Tree, node: NodeId) -> NodeId {
  match tree.syntax(node) {
    Syntax::Chain { expression } => *expression,
    _ => node,
  }
}

/// Tests whether `node` is a property access of `object_name` with a
/// statically resolvable property contained in `properties`.
pub fn is_specific_member_access(
  tree: &Tree,
  node: NodeId,
  object_name: &str,
  properties: &[&str],
) -> bool {
  let node = skip_chain_expr(tree, node);
  let object = match tree.syntax(node) {
    Syntax::Member { object, .. } | Syntax::ComputedMember { object, .. } => *object,
    _ => return false,
  };
  if tree.identifier_name(object) != Some(object_name) {
    return false;
  }
  match static_property_name(tree, node) {
    Some(name) => properties.contains(&name.as_str()),
    None => false,
  }
}

/// Statically resolves the property name of a member access.
///
/// A static access yields its property name directly. A computed access
/// resolves only for a closed set of literal keys; everything else — and any
/// non-member node — is unknown (`None`).
pub fn static_property_name(tree: &Tree, node: NodeId) -> Option<String> {
  match tree.syntax(skip_chain_expr(tree, node)) {
    Syntax::Member { property, .. } => Some(property.clone()),
    Syntax::ComputedMember { member, .. } => static_string_value(tree, *member),
    _ => None,
  }
}

fn static_string_value(tree: &Tree, node: NodeId) -> Option<String> {
  match tree.syntax(node) {
    Syntax::LitStr { value } => Some(value.clone()),
    // The canonical source form, so a key of `/ab+c/u` matches the same
    // computed access written with that literal.
    Syntax::LitRegex { pattern, flags } => Some(format!("/{}/{}", pattern, flags)),
    Syntax::LitBigInt { raw } => Some(raw.clone()),
    Syntax::LitNull => Some("null".into()),
    Syntax::LitTemplate {
      quasis,
      expressions,
    } if expressions.is_empty() && quasis.len() == 1 => Some(quasis[0].clone()),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use ast_js::build::TreeBuilder;

  const FREEZE_LIKE: &[&str] = &["freeze", "null", "10", "/ab+c/u"];

  #[test]
  fn skips_chain_wrappers_only() {
    let mut b = TreeBuilder::new();
    let object = b.id("Object");
    let member = b.opt_member(object, "freeze");
    let chain = b.chain(member);
    let stmt = b.expr_stmt(chain);
    let tree = b.finish(vec![stmt]);
    assert_eq!(skip_chain_expr(&tree, chain), member);
    assert_eq!(skip_chain_expr(&tree, member), member);
  }

  #[test]
  fn static_name_of_direct_access() {
    let mut b = TreeBuilder::new();
    let object = b.id("Object");
    let member = b.member(object, "freeze");
    let stmt = b.expr_stmt(member);
    let tree = b.finish(vec![stmt]);
    assert_eq!(static_property_name(&tree, member).as_deref(), Some("freeze"));
    assert!(is_specific_member_access(&tree, member, "Object", FREEZE_LIKE));
    assert!(!is_specific_member_access(&tree, member, "Reflect", FREEZE_LIKE));
    assert!(!is_specific_member_access(&tree, member, "Object", &["assign"]));
  }

  #[test]
  fn static_name_of_literal_keys() {
    let check = |build: fn(&mut TreeBuilder) -> NodeId, expected: Option<&str>| {
      let mut b = TreeBuilder::new();
      let object = b.id("Object");
      let key = build(&mut b);
      let member = b.computed_member(object, key);
      let stmt = b.expr_stmt(member);
      let tree = b.finish(vec![stmt]);
      assert_eq!(static_property_name(&tree, member).as_deref(), expected);
    };

    check(|b| b.string("freeze"), Some("freeze"));
    check(|b| b.regex("ab+c", "u"), Some("/ab+c/u"));
    check(|b| b.bigint("10"), Some("10"));
    check(|b| b.null_lit(), Some("null"));
    check(|b| b.template(vec!["freeze"], vec![]), Some("freeze"));
    // Unresolvable keys never match: identifiers, numbers, booleans,
    // templates with interpolation.
    check(|b| b.id("key"), None);
    check(|b| b.number(10.0), None);
    check(|b| b.boolean(true), None);
    check(
      |b| {
        let expr = b.id("x");
        b.template(vec!["free", "ze"], vec![expr])
      },
      None,
    );
  }

  #[test]
  fn member_access_through_optional_chain() {
    let mut b = TreeBuilder::new();
    let object = b.id("Object");
    let member = b.opt_member(object, "freeze");
    let chain = b.chain(member);
    let stmt = b.expr_stmt(chain);
    let tree = b.finish(vec![stmt]);
    assert!(is_specific_member_access(&tree, chain, "Object", FREEZE_LIKE));
  }

  #[test]
  fn non_member_forms_never_match() {
    let mut b = TreeBuilder::new();
    let id = b.id("Object");
    let stmt = b.expr_stmt(id);
    let tree = b.finish(vec![stmt]);
    assert!(!is_specific_member_access(&tree, id, "Object", FREEZE_LIKE));
    assert_eq!(static_property_name(&tree, id), None);
  }

  #[test]
  fn object_must_be_the_expected_identifier() {
    let mut b = TreeBuilder::new();
    let inner = b.id("a");
    let object = b.member(inner, "b");
    let member = b.member(object, "freeze");
    let stmt = b.expr_stmt(member);
    let tree = b.finish(vec![stmt]);
    // `a.b.freeze` — the receiver is a member expression, not an identifier.
    assert!(!is_specific_member_access(&tree, member, "Object", FREEZE_LIKE));
  }
}
