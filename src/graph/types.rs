//! Core identifier types for the graph model.

use std::fmt;

/// A unique identifier for a node within a single graph.
///
/// Node ids are dense indices in `0..node_count`; they carry no meaning
/// across graphs, which is why node references into named graphs go through
/// [`crate::graph::NodeRef`] instead of bare indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Raw index of this node.
    pub fn index(self) -> usize {
        self.0
    }

    /// Shift this id by an offset (used when composing two graphs into one
    /// address space).
    pub fn offset(self, by: usize) -> NodeId {
        NodeId(self.0 + by)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        NodeId(index)
    }
}

/// An undirected edge in canonical orientation (lower index first).
///
/// Construct via [`crate::graph::Graph::new`] or [`crate::graph::make_edge`];
/// the canonical
/// form makes equality and membership order-independent.
pub type Edge = (NodeId, NodeId);
