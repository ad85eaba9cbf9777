//! Static checker for topology programs.
//!
//! Walks the AST top-to-bottom maintaining a symbol table of binding shapes
//! (graph with a known node count, or node set). This is a lightweight
//! abstract interpretation: node counts are computed arithmetically and no
//! [`Graph`](crate::graph::Graph) value is ever built here. Checking is
//! fail-fast; the first violation halts the walk.

use std::collections::HashMap;

use crate::dsl::ast::{Expr, NodeRefLiteral, Program, Stmt};
use crate::error::{NetmotifError, Result};
use crate::graph;

/// Shape of a bound value, as far as the checker tracks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// A graph with a statically known node count.
    Graph {
        /// Number of nodes the graph will have once built.
        node_count: usize,
    },
    /// A node set; its contents are an evaluation-time concern.
    NodeSet,
}

impl Shape {
    fn describe(&self) -> &'static str {
        match self {
            Shape::Graph { .. } => "graph",
            Shape::NodeSet => "node set",
        }
    }
}

/// Static checker holding the symbol table built up in statement order.
pub struct Checker {
    env: HashMap<String, Shape>,
}

impl Checker {
    /// Create a checker with an empty symbol table.
    pub fn new() -> Self {
        Checker {
            env: HashMap::new(),
        }
    }

    /// Check a whole program. Returns on the first violation.
    pub fn check(&mut self, program: &Program) -> Result<()> {
        self.env.clear();
        for statement in &program.statements {
            match statement {
                Stmt::Let { name, expr, .. } => {
                    let shape = self.check_expression(expr)?;
                    // Rebinding overwrites the previous shape.
                    self.env.insert(name.clone(), shape);
                }
                Stmt::Expr { expr, .. } => {
                    self.check_expression(expr)?;
                }
            }
        }
        Ok(())
    }

    fn check_expression(&mut self, expr: &Expr) -> Result<Shape> {
        match expr {
            Expr::Motif { kind, args, .. } => {
                let node_count = graph::node_count(*kind, args)?;
                Ok(Shape::Graph { node_count })
            }
            Expr::Ident { name, location } => self.lookup(name, location.line, location.column),
            Expr::Overlay { left, right, .. } => {
                let left_count = self.ensure_graph(left, "Overlay operand")?;
                let right_count = self.ensure_graph(right, "Overlay operand")?;
                let node_count = combined_count(left_count, right_count, "Overlay")?;
                Ok(Shape::Graph { node_count })
            }
            Expr::Connect {
                left,
                right,
                left_ref,
                right_ref,
                ..
            } => {
                let (left_name, left_count) = self.named_graph_operand(left)?;
                let (right_name, right_count) = self.named_graph_operand(right)?;
                self.check_node_ref(left_ref, &left_name, left_count)?;
                self.check_node_ref(right_ref, &right_name, right_count)?;
                let node_count = combined_count(left_count, right_count, "Connect")?;
                Ok(Shape::Graph { node_count })
            }
            Expr::Relabel { target, mapping, .. } => {
                let node_count = self.ensure_graph(target, "Relabel target")?;
                for (&source, &target_id) in mapping {
                    if source.index() >= node_count {
                        return Err(NetmotifError::InvalidMapping {
                            message: format!("source node {source} outside valid range"),
                        });
                    }
                    if target_id.index() >= node_count {
                        return Err(NetmotifError::InvalidMapping {
                            message: format!("target node {target_id} outside valid range"),
                        });
                    }
                }
                let targets: std::collections::BTreeSet<_> = mapping.values().collect();
                if targets.len() != mapping.len() {
                    return Err(NetmotifError::InvalidMapping {
                        message: "mapping must be injective".to_string(),
                    });
                }
                Ok(Shape::Graph { node_count })
            }
            Expr::Pick { target, .. } => {
                // Criteria well-formedness (value >= 0) is guaranteed by the
                // unsigned literal type; actual degrees are an evaluation-time
                // concern.
                self.ensure_graph(target, "Pick target")?;
                Ok(Shape::NodeSet)
            }
        }
    }

    fn lookup(&self, name: &str, line: usize, column: usize) -> Result<Shape> {
        self.env
            .get(name)
            .copied()
            .ok_or_else(|| NetmotifError::UnknownNameError {
                name: name.to_string(),
                line,
                column,
            })
    }

    fn ensure_graph(&mut self, expr: &Expr, context: &str) -> Result<usize> {
        match self.check_expression(expr)? {
            Shape::Graph { node_count } => Ok(node_count),
            other => Err(NetmotifError::type_mismatch(
                "graph",
                other.describe(),
                format!("{context} must be a graph"),
            )),
        }
    }

    /// Connect operands must be identifiers bound to graphs: the bridge node
    /// references address them by name.
    fn named_graph_operand(&mut self, expr: &Expr) -> Result<(String, usize)> {
        let Expr::Ident { name, location } = expr else {
            return Err(NetmotifError::type_mismatch(
                "named graph",
                "expression",
                "Connect operands must be identifiers bound by let",
            ));
        };
        match self.lookup(name, location.line, location.column)? {
            Shape::Graph { node_count } => Ok((name.clone(), node_count)),
            other => Err(NetmotifError::type_mismatch(
                "graph",
                other.describe(),
                format!("Connect operand '{name}' must be a graph"),
            )),
        }
    }

    fn check_node_ref(
        &self,
        node_ref: &NodeRefLiteral,
        expected_name: &str,
        node_count: usize,
    ) -> Result<()> {
        let target = &node_ref.target;
        if target.graph != expected_name {
            return Err(NetmotifError::NodeRefMismatch {
                graph: target.graph.clone(),
                index: target.index.index(),
                expected: expected_name.to_string(),
            });
        }
        if target.index.index() >= node_count {
            return Err(NetmotifError::NodeRefRangeError {
                graph: target.graph.clone(),
                index: target.index.index(),
                node_count,
            });
        }
        Ok(())
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

fn combined_count(left: usize, right: usize, operation: &str) -> Result<usize> {
    left.checked_add(right).ok_or_else(|| {
        NetmotifError::motif_constraint(operation, "combined node count is too large")
    })
}

/// Check a program for well-formedness.
pub fn check_program(program: &Program) -> Result<()> {
    Checker::new().check(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl;

    fn check(source: &str) -> Result<()> {
        check_program(&dsl::parse(source).unwrap())
    }

    #[test]
    fn test_valid_program_passes() {
        check("let R = Ring(4)\nlet S = Star(3)\nlet C = Connect(R, S, bridge=(R.0, S.0))")
            .unwrap();
    }

    #[test]
    fn test_ring_minimum_size() {
        let err = check("let R = Ring(2)").unwrap_err();
        match err {
            NetmotifError::MotifConstraintError { kind, .. } => assert_eq!(kind, "Ring"),
            other => panic!("expected motif constraint error, got {:?}", other),
        }
    }

    #[test]
    fn test_motif_arity_checked_here() {
        let err = check("let G = Grid(3)").unwrap_err();
        assert!(matches!(err, NetmotifError::MotifConstraintError { .. }));
    }

    #[test]
    fn test_tree_constraints() {
        check("let T = Tree(2, 1)").unwrap();
        assert!(matches!(
            check("let T = Tree(1, 2)"),
            Err(NetmotifError::MotifConstraintError { .. })
        ));
        assert!(matches!(
            check("let T = Tree(2, 0)"),
            Err(NetmotifError::MotifConstraintError { .. })
        ));
    }

    #[test]
    fn test_use_before_definition() {
        let err = check("let C = Connect(X, Y, bridge=(X.0, Y.0))").unwrap_err();
        match err {
            NetmotifError::UnknownNameError { name, .. } => assert_eq!(name, "X"),
            other => panic!("expected unknown name error, got {:?}", other),
        }
    }

    #[test]
    fn test_no_forward_references() {
        let err = check("let C = Overlay(R, R)\nlet R = Ring(3)").unwrap_err();
        assert!(matches!(err, NetmotifError::UnknownNameError { .. }));
    }

    #[test]
    fn test_node_ref_out_of_range() {
        // X has only 3 nodes, X.5 is out of range
        let err =
            check("let X = Ring(3)\nlet Y = Ring(4)\nlet C = Connect(X, Y, bridge=(X.5, Y.0))")
                .unwrap_err();
        match err {
            NetmotifError::NodeRefRangeError {
                graph,
                index,
                node_count,
            } => {
                assert_eq!(graph, "X");
                assert_eq!(index, 5);
                assert_eq!(node_count, 3);
            }
            other => panic!("expected node ref range error, got {:?}", other),
        }
    }

    #[test]
    fn test_node_ref_graph_mismatch() {
        let err =
            check("let X = Ring(3)\nlet Y = Ring(4)\nlet C = Connect(X, Y, bridge=(Y.0, X.0))")
                .unwrap_err();
        assert!(matches!(err, NetmotifError::NodeRefMismatch { .. }));
    }

    #[test]
    fn test_connect_shape_is_sum_of_operands() {
        // C has 3 + 4 = 7 nodes, so C.6 is in range and C.7 is not
        check(concat!(
            "let X = Ring(3)\nlet Y = Ring(4)\n",
            "let C = Connect(X, Y, bridge=(X.0, Y.0))\n",
            "let D = Connect(C, X, bridge=(C.6, X.0))"
        ))
        .unwrap();
        let err = check(concat!(
            "let X = Ring(3)\nlet Y = Ring(4)\n",
            "let C = Connect(X, Y, bridge=(X.0, Y.0))\n",
            "let D = Connect(C, X, bridge=(C.7, X.0))"
        ))
        .unwrap_err();
        assert!(matches!(err, NetmotifError::NodeRefRangeError { .. }));
    }

    #[test]
    fn test_star_shape_counts_hub() {
        // Star(3) has 4 nodes, so S.3 is valid
        check("let S = Star(3)\nlet R = Ring(3)\nlet C = Connect(S, R, bridge=(S.3, R.0))")
            .unwrap();
    }

    #[test]
    fn test_connect_operand_must_be_identifier() {
        let err = check("let R = Ring(3)\nConnect(Ring(3), R, bridge=(R.0, R.0))").unwrap_err();
        assert!(matches!(err, NetmotifError::TypeMismatch { .. }));
    }

    #[test]
    fn test_pick_target_must_be_graph() {
        let err = check("let R = Ring(3)\nlet N = Pick(R, deg = 2)\nPick(N, deg = 1)").unwrap_err();
        assert!(matches!(err, NetmotifError::TypeMismatch { .. }));
    }

    #[test]
    fn test_pick_binds_node_set() {
        check("let R = Ring(3)\nlet N = Pick(R, deg = 2)").unwrap();
    }

    #[test]
    fn test_pick_degree_not_compared_to_actual_degrees() {
        // A criteria no node can satisfy is still well-formed
        check("let R = Ring(3)\nPick(R, deg = 100)").unwrap();
    }

    #[test]
    fn test_relabel_mapping_validation() {
        check("let P = Path(3)\nRelabel(P, {0: 1, 1: 0})").unwrap();
        assert!(matches!(
            check("let P = Path(3)\nRelabel(P, {0: 5})"),
            Err(NetmotifError::InvalidMapping { .. })
        ));
        assert!(matches!(
            check("let P = Path(3)\nRelabel(P, {0: 2, 1: 2})"),
            Err(NetmotifError::InvalidMapping { .. })
        ));
    }

    #[test]
    fn test_rebinding_overwrites_shape() {
        // After rebinding, R has 5 nodes and R.4 is in range
        check(concat!(
            "let R = Ring(3)\nlet R = Ring(5)\nlet S = Star(2)\n",
            "let C = Connect(R, S, bridge=(R.4, S.0))"
        ))
        .unwrap();
    }

    #[test]
    fn test_first_error_halts_checking() {
        // Both statements are invalid; the ring constraint comes first
        let err = check("let R = Ring(1)\nlet C = Overlay(Z, Z)").unwrap_err();
        assert!(matches!(err, NetmotifError::MotifConstraintError { .. }));
    }
}
