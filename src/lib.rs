//! # Netmotif
//!
//! A compiler and evaluator for a small DSL describing network-topology
//! motifs (ring, star, grid, tree, bridged rings, ...) and composing them
//! into larger graphs via node references and connection operators.
//!
//! ## Architecture
//!
//! The library is organized into sequential pipeline phases:
//!
//! - [`dsl`] - Lexer, recursive-descent parser, and AST for the source language
//! - [`check`] - Static checker: motif constraints and node-reference validity
//! - [`eval`] - Evaluator: runs the checked program against the motif builders
//! - [`graph`] - The immutable graph model and motif builders everything rests on
//!
//! Control flow is strictly `source text -> tokens -> AST -> check -> evaluate`;
//! each phase fails fast on the first problem and produces no partial result.
//! Checking builds no graphs (it only tracks shapes), so a program is either
//! rejected before any value exists or runs to completion.
//!
//! ## Usage
//!
//! ```
//! use netmotif::{run, Value};
//!
//! let result = run("let R = Ring(4)\nlet S = Star(3)\nlet C = Connect(R, S, bridge=(R.0, S.0))")?;
//! match result.environment.get("C") {
//!     Some(Value::Graph(graph)) => assert_eq!(graph.node_count(), 8),
//!     _ => unreachable!(),
//! }
//! # Ok::<(), netmotif::NetmotifError>(())
//! ```
//!
//! All values ([`graph::Graph`], [`graph::NodeSet`], AST nodes) are immutable
//! once constructed; composition always returns a new value. Independent
//! programs can therefore run concurrently without any locking, though each
//! single pipeline is synchronous and single-threaded.

pub mod check;
pub mod dsl;
pub mod error;
pub mod eval;
pub mod graph;

// Re-export main types for convenience
pub use error::{NetmotifError, Result};
pub use eval::{EvalResult, Value};
pub use graph::Graph;

/// Run the full pipeline over DSL source text: lex, parse, check, evaluate.
pub fn run(source: &str) -> Result<EvalResult> {
    let program = dsl::parse(source)?;
    check::check_program(&program)?;
    eval::evaluate_program(&program)
}
