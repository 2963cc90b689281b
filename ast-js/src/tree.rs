use crate::loc::Loc;
use crate::syntax::Syntax;
use serde::Serialize;
use std::ops::Index;

/// A stable index of a node within its [`Tree`]'s arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord, Serialize)]
pub struct NodeId(u32);

impl NodeId {
  pub(crate) fn new(index: usize) -> NodeId {
    NodeId(index as u32)
  }

  pub fn raw(self) -> u32 {
    self.0
  }

  pub fn index(self) -> usize {
    self.0 as usize
  }
}

/// A single node: location, an upward (non-owning) parent index, and the
/// kind-specific payload.
#[derive(Debug, Serialize)]
pub struct NodeData {
  loc: Loc,
  parent: Option<NodeId>,
  syntax: Syntax,
}

impl NodeData {
  pub fn loc(&self) -> Loc {
    self.loc
  }

  pub fn parent(&self) -> Option<NodeId> {
    self.parent
  }

  pub fn syntax(&self) -> &Syntax {
    &self.syntax
  }
}

/// An immutable program tree.
///
/// Nodes live in a single `Vec` and reference each other by index. Children
/// always precede their parent (trees are built bottom-up), so the parent
/// link forms no cycle of ownership: upward walks are bounded index hops that
/// terminate at the root, downward structure is ordinary owned data.
#[derive(Debug, Serialize)]
pub struct Tree {
  nodes: Vec<NodeData>,
  root: NodeId,
}

impl Tree {
  pub(crate) fn new(nodes: Vec<NodeData>, root: NodeId) -> Tree {
    Tree { nodes, root }
  }

  pub fn root(&self) -> NodeId {
    self.root
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  pub fn loc(&self, id: NodeId) -> Loc {
    self[id].loc
  }

  pub fn parent(&self, id: NodeId) -> Option<NodeId> {
    self[id].parent
  }

  pub fn syntax(&self, id: NodeId) -> &Syntax {
    &self[id].syntax
  }

  /// Iterates over every node in arena (bottom-up) order.
  pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &NodeData)> {
    self
      .nodes
      .iter()
      .enumerate()
      .map(|(index, data)| (NodeId::new(index), data))
  }

  /// Walks the parent chain, starting from the node's parent.
  pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    std::iter::successors(self.parent(id), |&p| self.parent(p))
  }

  /// The name of an identifier node, or `None` for any other kind.
  pub fn identifier_name(&self, id: NodeId) -> Option<&str> {
    match self.syntax(id) {
      Syntax::Id { name } => Some(name),
      _ => None,
    }
  }
}

impl Index<NodeId> for Tree {
  type Output = NodeData;

  fn index(&self, id: NodeId) -> &NodeData {
    &self.nodes[id.index()]
  }
}

pub(crate) fn push_node(nodes: &mut Vec<NodeData>, loc: Loc, syntax: Syntax) -> NodeId {
  let id = NodeId::new(nodes.len());
  syntax.for_each_child(|child| {
    debug_assert!(child.index() < id.index(), "children must precede parents");
    let slot = &mut nodes[child.index()].parent;
    debug_assert!(slot.is_none(), "node already has a parent");
    *slot = Some(id);
  });
  nodes.push(NodeData {
    loc,
    parent: None,
    syntax,
  });
  id
}
