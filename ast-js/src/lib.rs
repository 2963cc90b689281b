//! JavaScript syntax tree model for analysis tooling.
//!
//! Nodes live in an index-addressed arena ([`tree::Tree`]) with one closed
//! tagged-variant payload type ([`syntax::Syntax`]). Every node carries an
//! upward parent index, so checks that need context ("is this identifier the
//! left side of an assignment?") are bounded index hops rather than downward
//! searches. Trees are immutable once built.
//!
//! There is intentionally no parser here. Trees come from one of two places:
//! - [`build::TreeBuilder`]: programmatic construction, used heavily by tests;
//! - [`estree::from_json`]: ingestion of ESTree-shaped JSON emitted by any
//!   external parser.
//!
//! ```
//! use ast_js::build::TreeBuilder;
//! use ast_js::syntax::Syntax;
//!
//! let mut b = TreeBuilder::new();
//! let x = b.id("x");
//! let one = b.number(1.0);
//! let assign = b.assign(x, one);
//! let stmt = b.expr_stmt(assign);
//! let tree = b.finish(vec![stmt]);
//!
//! // The parent chain of `x` leads through the assignment to the root.
//! assert!(matches!(
//!   tree.syntax(tree.parent(x).unwrap()),
//!   Syntax::Assignment { target, .. } if *target == x
//! ));
//! ```

pub mod build;
pub mod estree;
pub mod loc;
pub mod syntax;
pub mod tree;
