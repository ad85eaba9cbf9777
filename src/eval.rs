//! Evaluator for checked topology programs.
//!
//! Walks the AST a second time, now executing for effect: motif builders run,
//! composition operators produce new graphs, and results are bound into an
//! ordered [`Environment`]. The evaluator trusts that [`crate::check`] has
//! already accepted the program; an impossible state encountered here is
//! reported as [`NetmotifError::Internal`] and signals a pipeline defect,
//! not a user error.

use std::fmt;

use crate::dsl::ast::{Expr, Program, Stmt};
use crate::error::{NetmotifError, Result};
use crate::graph::{self, Graph, NodeSet};

/// A runtime value produced by evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A fully constructed graph
    Graph(Graph),
    /// A node selection result
    NodeSet(NodeSet),
}

impl Value {
    /// Tag name, used in output and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Graph(_) => "graph",
            Value::NodeSet(_) => "node set",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Graph(graph) => graph.fmt(f),
            Value::NodeSet(nodes) => nodes.fmt(f),
        }
    }
}

/// Ordered mapping from bound names to values.
///
/// Bindings keep their first-binding position; rebinding a name overwrites
/// the value in place. Re-running the same program always reproduces the
/// same order.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    entries: Vec<(String, Value)>,
}

impl Environment {
    /// Create an empty environment.
    pub fn new() -> Self {
        Environment {
            entries: Vec::new(),
        }
    }

    /// Bind `name` to `value`, overwriting any existing binding in place.
    pub fn bind(&mut self, name: &str, value: Value) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name.to_string(), value));
        }
    }

    /// Look up a binding.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Iterate bindings in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the environment is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of evaluating a program.
#[derive(Debug, Clone)]
pub struct EvalResult {
    /// Value of the last bare expression statement, if any.
    pub result: Option<Value>,
    /// All name bindings, in binding order.
    pub environment: Environment,
}

/// Evaluator holding the environment built up in statement order.
pub struct Evaluator {
    env: Environment,
}

impl Evaluator {
    /// Create an evaluator with an empty environment.
    pub fn new() -> Self {
        Evaluator {
            env: Environment::new(),
        }
    }

    /// Evaluate a program that has already passed the checker.
    pub fn evaluate(&mut self, program: &Program) -> Result<EvalResult> {
        self.env = Environment::new();
        let mut result = None;
        for statement in &program.statements {
            match statement {
                Stmt::Let { name, expr, .. } => {
                    let value = self.eval_expression(expr)?;
                    self.env.bind(name, value);
                }
                Stmt::Expr { expr, .. } => {
                    result = Some(self.eval_expression(expr)?);
                }
            }
        }
        Ok(EvalResult {
            result,
            environment: std::mem::take(&mut self.env),
        })
    }

    fn eval_expression(&self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Motif { kind, args, .. } => Ok(Value::Graph(graph::build(*kind, args)?)),
            Expr::Ident { name, .. } => self.lookup(name).cloned(),
            Expr::Overlay { left, right, .. } => {
                let left = self.eval_graph(left)?;
                let right = self.eval_graph(right)?;
                Ok(Value::Graph(graph::overlay(&left, &right)?))
            }
            Expr::Connect {
                left,
                right,
                left_ref,
                right_ref,
                ..
            } => {
                let left = self.eval_graph(left)?;
                let right = self.eval_graph(right)?;
                // Name matching and range checks are checker territory; the
                // builder still rejects endpoints outside either graph.
                let bridge = (left_ref.target.index, right_ref.target.index);
                Ok(Value::Graph(graph::connect(&left, &right, bridge)?))
            }
            Expr::Relabel { target, mapping, .. } => {
                let graph = self.eval_graph(target)?;
                Ok(Value::Graph(graph::relabel(&graph, mapping)?))
            }
            Expr::Pick { target, criteria, .. } => {
                let graph = self.eval_graph(target)?;
                Ok(Value::NodeSet(graph::pick(&graph, criteria.criteria)))
            }
        }
    }

    fn lookup(&self, name: &str) -> Result<&Value> {
        self.env
            .get(name)
            .ok_or_else(|| NetmotifError::internal(format!("unbound name '{name}' at evaluation")))
    }

    fn eval_graph(&self, expr: &Expr) -> Result<Graph> {
        match self.eval_expression(expr)? {
            Value::Graph(graph) => Ok(graph),
            other => Err(NetmotifError::internal(format!(
                "expected a graph value, found {}",
                other.kind()
            ))),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate a program. The caller is responsible for running
/// [`crate::check::check_program`] first; use [`crate::run`] for the full
/// pipeline.
pub fn evaluate_program(program: &Program) -> Result<EvalResult> {
    Evaluator::new().evaluate(program)
}
