//! Graph model and motif builders.
//!
//! This module provides the value types the whole pipeline operates on:
//! the immutable [`Graph`], typed node handles ([`NodeRef`], [`NodeSet`]),
//! the [`DegreeCriteria`] selection predicate, and the pure motif builders.

mod model;
mod motifs;
mod types;

pub use model::{make_edge, Comparator, DegreeCriteria, Graph, NodeRef, NodeSet};
pub use motifs::{
    build, connect, grid, mesh, node_count, overlay, path, pick, relabel, ring, star, tree,
    two_rings_bridge, validate_params, Bridge,
};
pub use types::{Edge, NodeId};
