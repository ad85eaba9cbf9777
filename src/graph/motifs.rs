//! Motif builders and graph composition operations.
//!
//! Each builder is a pure function from integer parameters to a freshly
//! constructed [`Graph`]. Parameter constraints live in [`validate_params`]
//! so the checker can enforce them without building any graph; the builders
//! re-apply the same validation at their public entry points.

use std::collections::BTreeMap;

use crate::dsl::ast::MotifKind;
use crate::error::{NetmotifError, Result};
use crate::graph::model::{DegreeCriteria, Graph, NodeSet};
use crate::graph::types::NodeId;

/// Bridge endpoints, expressed in the local node spaces of the two graphs
/// being connected.
pub type Bridge = (NodeId, NodeId);

/// Validate motif parameter arity and minimum-size constraints.
///
/// This is the single source of truth for motif constraints; the checker
/// calls it directly and every builder calls it on entry.
pub fn validate_params(kind: MotifKind, args: &[usize]) -> Result<()> {
    if args.len() != kind.arity() {
        return Err(NetmotifError::motif_constraint(
            kind.name(),
            format!("expects {} parameter(s), got {}", kind.arity(), args.len()),
        ));
    }
    let constraint = |ok: bool, message: &str| -> Result<()> {
        if ok {
            Ok(())
        } else {
            Err(NetmotifError::motif_constraint(kind.name(), message))
        }
    };
    match kind {
        MotifKind::Ring => constraint(args[0] >= 3, "ring size must be at least 3"),
        MotifKind::Path => constraint(args[0] >= 2, "path length must be at least 2"),
        MotifKind::Star => constraint(args[0] >= 1, "star requires at least 1 leaf"),
        MotifKind::Mesh => constraint(args[0] >= 1, "mesh size must be at least 1"),
        MotifKind::Grid => {
            constraint(args[0] >= 1, "grid rows must be positive")?;
            constraint(args[1] >= 1, "grid cols must be positive")
        }
        MotifKind::Tree => {
            constraint(args[0] >= 2, "tree branching factor must be at least 2")?;
            constraint(args[1] >= 1, "tree height must be at least 1")
        }
        MotifKind::TwoRingsBridge => {
            constraint(args[0] >= 3, "first ring size must be at least 3")?;
            constraint(args[1] >= 3, "second ring size must be at least 3")
        }
    }
}

/// Node count of a motif, computed arithmetically without building the graph.
///
/// Assumes the parameters passed [`validate_params`]. Overflowing parameters
/// are a constraint violation, not a panic.
pub fn node_count(kind: MotifKind, args: &[usize]) -> Result<usize> {
    validate_params(kind, args)?;
    let overflow = || NetmotifError::motif_constraint(kind.name(), "parameters are too large");
    match kind {
        MotifKind::Ring | MotifKind::Path | MotifKind::Mesh => Ok(args[0]),
        MotifKind::Star => args[0].checked_add(1).ok_or_else(overflow),
        MotifKind::Grid => args[0].checked_mul(args[1]).ok_or_else(overflow),
        MotifKind::Tree => tree_node_count(args[0], args[1]).ok_or_else(overflow),
        MotifKind::TwoRingsBridge => args[0].checked_add(args[1]).ok_or_else(overflow),
    }
}

// 1 + r + r^2 + ... + r^h
fn tree_node_count(branching: usize, height: usize) -> Option<usize> {
    let mut total = 1usize;
    let mut level = 1usize;
    for _ in 0..height {
        level = level.checked_mul(branching)?;
        total = total.checked_add(level)?;
    }
    Some(total)
}

/// Build the motif named by `kind` from its validated parameters.
pub fn build(kind: MotifKind, args: &[usize]) -> Result<Graph> {
    validate_params(kind, args)?;
    match kind {
        MotifKind::Ring => ring(args[0]),
        MotifKind::Path => path(args[0]),
        MotifKind::Star => star(args[0]),
        MotifKind::Mesh => mesh(args[0]),
        MotifKind::Grid => grid(args[0], args[1]),
        MotifKind::Tree => tree(args[0], args[1]),
        MotifKind::TwoRingsBridge => two_rings_bridge(args[0], args[1]),
    }
}

/// Single cycle: n nodes, edges `(i, (i+1) mod n)`.
pub fn ring(n: usize) -> Result<Graph> {
    validate_params(MotifKind::Ring, &[n])?;
    Graph::new(n, (0..n).map(|i| (NodeId(i), NodeId((i + 1) % n))))
}

/// Simple path: n nodes, edges `(i, i+1)`.
pub fn path(n: usize) -> Result<Graph> {
    validate_params(MotifKind::Path, &[n])?;
    Graph::new(n, (0..n - 1).map(|i| (NodeId(i), NodeId(i + 1))))
}

/// Star: hub node 0 with `leaves` leaf nodes 1..=leaves.
pub fn star(leaves: usize) -> Result<Graph> {
    validate_params(MotifKind::Star, &[leaves])?;
    Graph::new(leaves + 1, (1..=leaves).map(|i| (NodeId(0), NodeId(i))))
}

/// Complete graph on n nodes.
pub fn mesh(n: usize) -> Result<Graph> {
    validate_params(MotifKind::Mesh, &[n])?;
    let edges = (0..n).flat_map(|i| (i + 1..n).map(move |j| (NodeId(i), NodeId(j))));
    Graph::new(n, edges)
}

/// rows x cols lattice with row-major indexing; edges between horizontally
/// and vertically adjacent cells.
pub fn grid(rows: usize, cols: usize) -> Result<Graph> {
    validate_params(MotifKind::Grid, &[rows, cols])?;
    let total = node_count(MotifKind::Grid, &[rows, cols])?;
    let mut edges = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            let here = r * cols + c;
            if c + 1 < cols {
                edges.push((NodeId(here), NodeId(here + 1)));
            }
            if r + 1 < rows {
                edges.push((NodeId(here), NodeId(here + cols)));
            }
        }
    }
    Graph::new(total, edges)
}

/// Balanced tree: root 0, every non-leaf node has exactly `branching`
/// children, `height` levels below the root. Breadth-first numbering, so
/// node i's children are `branching*i + 1 ..= branching*i + branching`.
pub fn tree(branching: usize, height: usize) -> Result<Graph> {
    validate_params(MotifKind::Tree, &[branching, height])?;
    let total = node_count(MotifKind::Tree, &[branching, height])?;
    // Internal nodes occupy the first (total - 1) / branching indices.
    let internal = (total - 1) / branching;
    let mut edges = Vec::new();
    for parent in 0..internal {
        for child in 1..=branching {
            edges.push((NodeId(parent), NodeId(branching * parent + child)));
        }
    }
    Graph::new(total, edges)
}

/// Two independent rings joined by exactly one bridge edge between node 0 of
/// each; equivalent to `connect(ring(n1), ring(n2), (0, 0))`.
pub fn two_rings_bridge(n1: usize, n2: usize) -> Result<Graph> {
    validate_params(MotifKind::TwoRingsBridge, &[n1, n2])?;
    connect(&ring(n1)?, &ring(n2)?, (NodeId(0), NodeId(0)))
}

/// Disjoint union of two graphs: the second graph's nodes are relabeled with
/// an offset equal to the first graph's node count. No cross edges are added.
pub fn overlay(g1: &Graph, g2: &Graph) -> Result<Graph> {
    let offset = g1.node_count();
    let total = offset + g2.node_count();
    let shifted = g2.edges().map(|(u, v)| (u.offset(offset), v.offset(offset)));
    Graph::new(total, g1.edges().chain(shifted))
}

/// Disjoint union plus one bridge edge between a node of each graph.
///
/// The bridge endpoints are in the local node spaces of `g1` and `g2`; the
/// second endpoint is relabeled into the combined address space.
pub fn connect(g1: &Graph, g2: &Graph, bridge: Bridge) -> Result<Graph> {
    let (local_u, local_v) = bridge;
    if !g1.has_node(local_u) {
        return Err(NetmotifError::EdgeOutOfRange {
            u: local_u.index(),
            v: local_v.index(),
            node_count: g1.node_count(),
        });
    }
    if !g2.has_node(local_v) {
        return Err(NetmotifError::EdgeOutOfRange {
            u: local_u.index(),
            v: local_v.index(),
            node_count: g2.node_count(),
        });
    }
    let base = overlay(g1, g2)?;
    base.with_extra_edges([(local_u, local_v.offset(g1.node_count()))])
}

/// Permute a graph's node ids under a partial injective mapping.
pub fn relabel(graph: &Graph, mapping: &BTreeMap<NodeId, NodeId>) -> Result<Graph> {
    graph.relabel(mapping)
}

/// Select all nodes whose degree satisfies the criteria. An empty result is
/// a valid `NodeSet`, not an error.
pub fn pick(graph: &Graph, criteria: DegreeCriteria) -> NodeSet {
    NodeSet::new(
        (0..graph.node_count())
            .map(NodeId)
            .filter(|&node| criteria.matches(graph.degree(node))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::model::Comparator;

    fn n(i: usize) -> NodeId {
        NodeId(i)
    }

    #[test]
    fn test_ring_every_node_degree_two() {
        let g = ring(5).unwrap();
        assert_eq!(g.node_count(), 5);
        assert_eq!(g.edge_count(), 5);
        for i in 0..5 {
            assert_eq!(g.degree(n(i)), 2);
        }
    }

    #[test]
    fn test_ring_too_small() {
        assert!(matches!(
            ring(2),
            Err(NetmotifError::MotifConstraintError { .. })
        ));
    }

    #[test]
    fn test_path_endpoints_degree_one() {
        let g = path(4).unwrap();
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.degree(n(0)), 1);
        assert_eq!(g.degree(n(3)), 1);
        assert_eq!(g.degree(n(1)), 2);
    }

    #[test]
    fn test_star_hub_and_leaves() {
        let g = star(3).unwrap();
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.degree(n(0)), 3);
        for leaf in 1..4 {
            assert_eq!(g.degree(n(leaf)), 1);
        }
    }

    #[test]
    fn test_mesh_complete() {
        let g = mesh(4).unwrap();
        assert_eq!(g.edge_count(), 6);
        for i in 0..4 {
            assert_eq!(g.degree(n(i)), 3);
        }
    }

    #[test]
    fn test_grid_adjacency() {
        let g = grid(2, 3).unwrap();
        assert_eq!(g.node_count(), 6);
        // 2 rows of 2 horizontal edges + 3 vertical edges
        assert_eq!(g.edge_count(), 7);
        assert!(g.has_edge(n(0), n(1)));
        assert!(g.has_edge(n(0), n(3)));
        assert!(!g.has_edge(n(2), n(3)));
    }

    #[test]
    fn test_tree_shape() {
        let g = tree(2, 2).unwrap();
        assert_eq!(g.node_count(), 7);
        assert_eq!(g.edge_count(), 6);
        assert_eq!(g.degree(n(0)), 2);
        assert_eq!(g.neighbors(n(1)), [n(0), n(3), n(4)].into_iter().collect());
        // Leaves
        for leaf in 3..7 {
            assert_eq!(g.degree(n(leaf)), 1);
        }
    }

    #[test]
    fn test_tree_node_count_formula() {
        assert_eq!(node_count(MotifKind::Tree, &[3, 2]).unwrap(), 13);
        assert_eq!(node_count(MotifKind::Tree, &[2, 3]).unwrap(), 15);
    }

    #[test]
    fn test_two_rings_bridge() {
        let g = two_rings_bridge(3, 4).unwrap();
        assert_eq!(g.node_count(), 7);
        assert_eq!(g.edge_count(), 8);
        assert!(g.has_edge(n(0), n(3)));
        assert_eq!(g.degree(n(0)), 3);
    }

    #[test]
    fn test_overlay_no_cross_edges() {
        let combined = overlay(&ring(3).unwrap(), &path(3).unwrap()).unwrap();
        assert_eq!(combined.node_count(), 6);
        assert!(combined.has_edge(n(0), n(1)));
        assert!(combined.has_edge(n(3), n(4)));
        assert!(!combined.has_edge(n(0), n(3)));
    }

    #[test]
    fn test_connect_adds_single_bridge() {
        let a = ring(4).unwrap();
        let b = star(3).unwrap();
        let c = connect(&a, &b, (n(0), n(0))).unwrap();
        assert_eq!(c.node_count(), 8);
        assert_eq!(c.edge_count(), a.edge_count() + b.edge_count() + 1);
        assert!(c.has_edge(n(0), n(4)));
        assert_eq!(c.degree(n(0)), 3);
        // Originals untouched
        assert_eq!(a.edge_count(), 4);
        assert_eq!(b.edge_count(), 3);
    }

    #[test]
    fn test_connect_rejects_unknown_endpoint() {
        let a = ring(3).unwrap();
        let b = ring(3).unwrap();
        assert!(matches!(
            connect(&a, &b, (n(5), n(0))),
            Err(NetmotifError::EdgeOutOfRange { .. })
        ));
    }

    #[test]
    fn test_pick_exact_degree() {
        let g = path(5).unwrap();
        let ends = pick(&g, DegreeCriteria::new(Comparator::Eq, 1));
        assert_eq!(ends, NodeSet::new(vec![n(0), n(4)]));
    }

    #[test]
    fn test_pick_comparators() {
        let g = star(3).unwrap();
        let hubs = pick(&g, DegreeCriteria::new(Comparator::Gt, 1));
        assert_eq!(hubs, NodeSet::new(vec![n(0)]));
        let all = pick(&g, DegreeCriteria::new(Comparator::Ge, 1));
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn test_pick_no_match_is_empty() {
        let g = ring(3).unwrap();
        let none = pick(&g, DegreeCriteria::new(Comparator::Eq, 7));
        assert!(none.is_empty());
    }

    #[test]
    fn test_arity_mismatch() {
        let err = build(MotifKind::Grid, &[3]).unwrap_err();
        assert!(matches!(err, NetmotifError::MotifConstraintError { .. }));
    }
}
