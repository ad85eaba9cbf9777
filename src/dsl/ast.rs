//! Abstract Syntax Tree types for the topology DSL.

use std::collections::BTreeMap;
use std::fmt;

use crate::graph::{Comparator, DegreeCriteria, NodeId, NodeRef};

/// Position of a token in the source text (1-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number
    pub line: usize,
    /// Column number
    pub column: usize,
}

impl SourceLocation {
    /// Create a source location.
    pub fn new(line: usize, column: usize) -> Self {
        SourceLocation { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Complete AST representation of a parsed program.
///
/// Statement order is semantically significant: later bindings may reference
/// earlier ones, never forward.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Statements in source order
    pub statements: Vec<Stmt>,
}

/// A single statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `let NAME = expression` — binds the value to NAME, overwriting any
    /// prior binding of the same name.
    Let {
        name: String,
        expr: Expr,
        location: SourceLocation,
    },
    /// A bare expression. The value of the last such statement becomes the
    /// program's final result.
    Expr { expr: Expr, location: SourceLocation },
}

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Motif call, e.g. `Ring(4)` or `Grid(2, 3)`. Parameter arity is not
    /// validated here; that is the checker's job.
    Motif {
        kind: MotifKind,
        args: Vec<usize>,
        location: SourceLocation,
    },
    /// Reference to a bound name.
    Ident {
        name: String,
        location: SourceLocation,
    },
    /// `Connect(a, b, bridge=(a.i, b.j))` — disjoint union plus one bridge edge.
    Connect {
        left: Box<Expr>,
        right: Box<Expr>,
        left_ref: NodeRefLiteral,
        right_ref: NodeRefLiteral,
        location: SourceLocation,
    },
    /// `Overlay(a, b)` — disjoint union, no bridge.
    Overlay {
        left: Box<Expr>,
        right: Box<Expr>,
        location: SourceLocation,
    },
    /// `Relabel(g, {0: 1, 1: 0})` — permute node ids.
    Relabel {
        target: Box<Expr>,
        mapping: BTreeMap<NodeId, NodeId>,
        location: SourceLocation,
    },
    /// `Pick(g, deg >= 2)` — select nodes by degree.
    Pick {
        target: Box<Expr>,
        criteria: DegreeCriteriaExpr,
        location: SourceLocation,
    },
}

impl Expr {
    /// Source location of this expression.
    pub fn location(&self) -> SourceLocation {
        match self {
            Expr::Motif { location, .. }
            | Expr::Ident { location, .. }
            | Expr::Connect { location, .. }
            | Expr::Overlay { location, .. }
            | Expr::Relabel { location, .. }
            | Expr::Pick { location, .. } => *location,
        }
    }
}

/// Surface form `NAME.INTEGER` addressing a node of a named graph.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRefLiteral {
    /// The referenced (graph name, node id) pair
    pub target: NodeRef,
    /// Source location of the literal
    pub location: SourceLocation,
}

/// Degree criteria as written in the source, e.g. `deg >= 2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegreeCriteriaExpr {
    /// The predicate value
    pub criteria: DegreeCriteria,
    /// Source location of the criteria
    pub location: SourceLocation,
}

impl DegreeCriteriaExpr {
    /// Create a criteria expression.
    pub fn new(comparator: Comparator, value: usize, location: SourceLocation) -> Self {
        DegreeCriteriaExpr {
            criteria: DegreeCriteria::new(comparator, value),
            location,
        }
    }
}

/// Motif families supported by the DSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotifKind {
    /// Single cycle of n nodes
    Ring,
    /// Simple path of n nodes
    Path,
    /// Hub node 0 with n leaves
    Star,
    /// Complete graph on n nodes
    Mesh,
    /// rows x cols lattice, row-major indexing
    Grid,
    /// Balanced tree: branching factor r, height h
    Tree,
    /// Two independent rings joined by one bridge edge
    TwoRingsBridge,
}

impl MotifKind {
    /// Parse a motif kind from its DSL keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "Ring" => Some(Self::Ring),
            "Path" => Some(Self::Path),
            "Star" => Some(Self::Star),
            "Mesh" => Some(Self::Mesh),
            "Grid" => Some(Self::Grid),
            "Tree" => Some(Self::Tree),
            "TwoRingsBridge" => Some(Self::TwoRingsBridge),
            _ => None,
        }
    }

    /// The DSL keyword for this motif kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ring => "Ring",
            Self::Path => "Path",
            Self::Star => "Star",
            Self::Mesh => "Mesh",
            Self::Grid => "Grid",
            Self::Tree => "Tree",
            Self::TwoRingsBridge => "TwoRingsBridge",
        }
    }

    /// Number of integer parameters this motif kind takes.
    pub fn arity(&self) -> usize {
        match self {
            Self::Ring | Self::Path | Self::Star | Self::Mesh => 1,
            Self::Grid | Self::Tree | Self::TwoRingsBridge => 2,
        }
    }
}

impl fmt::Display for MotifKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
