//! Immutable graph value types.
//!
//! [`Graph`] is the foundation of the whole pipeline: an undirected graph
//! whose edge set is validated eagerly at construction. Every composition
//! operator returns a fresh `Graph`, so checker and evaluator can share
//! values without defensive copying.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::types::{Edge, NodeId};
use crate::error::{NetmotifError, Result};

/// Create a normalized undirected edge (lower index first).
///
/// Fails on self-loops; range checking against a node count is the
/// responsibility of [`Graph::new`].
pub fn make_edge(u: NodeId, v: NodeId) -> Result<Edge> {
    if u == v {
        return Err(NetmotifError::SelfLoop { node: u.index() });
    }
    if u < v {
        Ok((u, v))
    } else {
        Ok((v, u))
    }
}

/// An immutable undirected graph with a bounds-checked edge set.
///
/// Invariants, enforced by every constructor:
/// - every edge `(a, b)` satisfies `a < b` (canonical orientation)
/// - every endpoint lies in `0..node_count`
/// - no self-loops
///
/// Duplicate edges are collapsed silently; inserting `(b, a)` is the same as
/// inserting `(a, b)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    node_count: usize,
    edges: BTreeSet<Edge>,
}

impl Graph {
    /// Build a graph from a node count and an edge list.
    ///
    /// Edges are canonicalized; an out-of-range endpoint or self-loop fails
    /// immediately rather than producing a malformed graph.
    pub fn new(node_count: usize, edges: impl IntoIterator<Item = (NodeId, NodeId)>) -> Result<Self> {
        let mut normalized = BTreeSet::new();
        for (u, v) in edges {
            if u.index() >= node_count || v.index() >= node_count {
                return Err(NetmotifError::EdgeOutOfRange {
                    u: u.index(),
                    v: v.index(),
                    node_count,
                });
            }
            normalized.insert(make_edge(u, v)?);
        }
        Ok(Graph {
            node_count,
            edges: normalized,
        })
    }

    /// A graph with `node_count` nodes and no edges.
    pub fn empty(node_count: usize) -> Self {
        Graph {
            node_count,
            edges: BTreeSet::new(),
        }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterate edges in sorted canonical order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().copied()
    }

    /// Whether `node` is a valid node of this graph.
    pub fn has_node(&self, node: NodeId) -> bool {
        node.index() < self.node_count
    }

    /// Whether an edge exists between `u` and `v`, in either order.
    pub fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        if !self.has_node(u) || !self.has_node(v) || u == v {
            return false;
        }
        let edge = if u < v { (u, v) } else { (v, u) };
        self.edges.contains(&edge)
    }

    /// All nodes adjacent to `node`, in sorted order.
    pub fn neighbors(&self, node: NodeId) -> BTreeSet<NodeId> {
        self.edges
            .iter()
            .filter_map(|&(u, v)| {
                if u == node {
                    Some(v)
                } else if v == node {
                    Some(u)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Degree of `node` (zero for isolated or unknown nodes).
    pub fn degree(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }

    /// Derive a new graph with extra edges; the original is untouched.
    pub fn with_extra_edges(&self, extra: impl IntoIterator<Item = (NodeId, NodeId)>) -> Result<Graph> {
        let mut edges = self.edges.clone();
        for (u, v) in extra {
            if !self.has_node(u) || !self.has_node(v) {
                return Err(NetmotifError::EdgeOutOfRange {
                    u: u.index(),
                    v: v.index(),
                    node_count: self.node_count,
                });
            }
            edges.insert(make_edge(u, v)?);
        }
        Ok(Graph {
            node_count: self.node_count,
            edges,
        })
    }

    /// Derive a new graph with node ids permuted under a partial injective
    /// mapping. Ids absent from the mapping stay fixed.
    pub fn relabel(&self, mapping: &BTreeMap<NodeId, NodeId>) -> Result<Graph> {
        if mapping.is_empty() {
            return Ok(self.clone());
        }
        for (&source, &target) in mapping {
            if !self.has_node(source) {
                return Err(NetmotifError::InvalidMapping {
                    message: format!("source node {source} is not in the graph"),
                });
            }
            if !self.has_node(target) {
                return Err(NetmotifError::InvalidMapping {
                    message: format!("target node {target} outside node range"),
                });
            }
        }
        let targets: BTreeSet<NodeId> = mapping.values().copied().collect();
        if targets.len() != mapping.len() {
            return Err(NetmotifError::InvalidMapping {
                message: "mapping must be injective".to_string(),
            });
        }
        let remap = |node: NodeId| mapping.get(&node).copied().unwrap_or(node);
        Graph::new(
            self.node_count,
            self.edges.iter().map(|&(u, v)| (remap(u), remap(v))),
        )
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Graph(nodes={}, edges={})", self.node_count, self.edges.len())?;
        for (u, v) in &self.edges {
            write!(f, "\n{u} -- {v}")?;
        }
        Ok(())
    }
}

/// Qualified reference to a node inside a named graph binding.
///
/// Exists so a bare integer is never silently reused across graphs with
/// different sizes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeRef {
    /// Name of the graph binding this reference addresses.
    pub graph: String,
    /// Node index within that graph.
    pub index: NodeId,
}

impl NodeRef {
    /// Create a node reference.
    pub fn new(graph: impl Into<String>, index: NodeId) -> Self {
        NodeRef {
            graph: graph.into(),
            index,
        }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.graph, self.index)
    }
}

/// Immutable, order-irrelevant collection of distinct node ids.
///
/// The result of a selection query. A `NodeSet` is only a view over ids;
/// the caller must re-associate it with a graph name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeSet {
    nodes: BTreeSet<NodeId>,
}

impl NodeSet {
    /// Build a node set from any iterator of ids; duplicates collapse.
    pub fn new(nodes: impl IntoIterator<Item = NodeId>) -> Self {
        NodeSet {
            nodes: nodes.into_iter().collect(),
        }
    }

    /// Membership test.
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    /// Number of ids in the set.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }
}

impl fmt::Display for NodeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ordered: Vec<String> = self.nodes.iter().map(|n| n.to_string()).collect();
        write!(f, "NodeSet({{{}}})", ordered.join(", "))
    }
}

/// Comparison operator of a degree criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Lt,
    Gt,
    Le,
    Ge,
}

impl Comparator {
    /// Apply the comparator with `lhs` on the left.
    pub fn compare(self, lhs: usize, rhs: usize) -> bool {
        match self {
            Comparator::Eq => lhs == rhs,
            Comparator::Lt => lhs < rhs,
            Comparator::Gt => lhs > rhs,
            Comparator::Le => lhs <= rhs,
            Comparator::Ge => lhs >= rhs,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Comparator::Eq => "=",
            Comparator::Lt => "<",
            Comparator::Gt => ">",
            Comparator::Le => "<=",
            Comparator::Ge => ">=",
        };
        f.write_str(symbol)
    }
}

/// Predicate over node degree, used by the `Pick` selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegreeCriteria {
    /// Comparison operator.
    pub comparator: Comparator,
    /// Degree value compared against.
    pub value: usize,
}

impl DegreeCriteria {
    /// Create a degree criteria.
    pub fn new(comparator: Comparator, value: usize) -> Self {
        DegreeCriteria { comparator, value }
    }

    /// Whether a node of the given degree satisfies the criteria.
    pub fn matches(&self, degree: usize) -> bool {
        self.comparator.compare(degree, self.value)
    }
}

impl fmt::Display for DegreeCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "deg {} {}", self.comparator, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(i: usize) -> NodeId {
        NodeId(i)
    }

    #[test]
    fn test_edge_canonicalization() {
        let a = Graph::new(3, vec![(n(2), n(0))]).unwrap();
        let b = Graph::new(3, vec![(n(0), n(2))]).unwrap();
        assert_eq!(a, b);
        assert!(a.has_edge(n(0), n(2)));
        assert!(a.has_edge(n(2), n(0)));
    }

    #[test]
    fn test_duplicate_insertion_is_idempotent() {
        let g = Graph::new(3, vec![(n(0), n(1)), (n(1), n(0)), (n(0), n(1))]).unwrap();
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_self_loop_rejected() {
        let err = Graph::new(3, vec![(n(1), n(1))]).unwrap_err();
        assert!(matches!(err, NetmotifError::SelfLoop { node: 1 }));
    }

    #[test]
    fn test_out_of_range_edge_rejected() {
        let err = Graph::new(2, vec![(n(0), n(2))]).unwrap_err();
        assert!(matches!(err, NetmotifError::EdgeOutOfRange { node_count: 2, .. }));
    }

    #[test]
    fn test_neighbors_and_degree() {
        let g = Graph::new(4, vec![(n(0), n(1)), (n(0), n(2)), (n(2), n(3))]).unwrap();
        assert_eq!(g.neighbors(n(0)), [n(1), n(2)].into_iter().collect());
        assert_eq!(g.degree(n(0)), 2);
        assert_eq!(g.degree(n(3)), 1);
    }

    #[test]
    fn test_with_extra_edges_leaves_original_untouched() {
        let g = Graph::new(3, vec![(n(0), n(1))]).unwrap();
        let extended = g.with_extra_edges(vec![(n(1), n(2))]).unwrap();
        assert_eq!(g.edge_count(), 1);
        assert_eq!(extended.edge_count(), 2);
    }

    #[test]
    fn test_relabel_permutation() {
        let g = Graph::new(3, vec![(n(0), n(1)), (n(1), n(2))]).unwrap();
        let mapping = [(n(0), n(1)), (n(1), n(2)), (n(2), n(0))].into_iter().collect();
        let remapped = g.relabel(&mapping).unwrap();
        assert!(remapped.has_edge(n(1), n(2)));
        assert!(remapped.has_edge(n(0), n(2)));
    }

    #[test]
    fn test_relabel_rejects_non_injective() {
        let g = Graph::new(3, vec![(n(0), n(1))]).unwrap();
        let mapping = [(n(0), n(2)), (n(1), n(2))].into_iter().collect();
        assert!(matches!(
            g.relabel(&mapping),
            Err(NetmotifError::InvalidMapping { .. })
        ));
    }

    #[test]
    fn test_display_sorted_edges() {
        let g = Graph::new(3, vec![(n(2), n(1)), (n(1), n(0))]).unwrap();
        assert_eq!(g.to_string(), "Graph(nodes=3, edges=2)\n0 -- 1\n1 -- 2");
    }

    #[test]
    fn test_node_set_display() {
        let s = NodeSet::new(vec![n(4), n(0), n(4)]);
        assert_eq!(s.len(), 2);
        assert_eq!(s.to_string(), "NodeSet({0, 4})");
    }

    #[test]
    fn test_degree_criteria() {
        let at_least_two = DegreeCriteria::new(Comparator::Ge, 2);
        assert!(at_least_two.matches(2));
        assert!(at_least_two.matches(5));
        assert!(!at_least_two.matches(1));
        assert_eq!(at_least_two.to_string(), "deg >= 2");
    }
}
