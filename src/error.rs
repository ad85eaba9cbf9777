//! Error types for the netmotif DSL pipeline.
//!
//! This module provides a unified error type [`NetmotifError`] covering all
//! error conditions that can occur during lexing, parsing, checking, and
//! evaluation. The variants are phase-tagged so callers can distinguish
//! malformed text from a well-formed but invalid program.

use thiserror::Error;

/// Result type alias using [`NetmotifError`].
pub type Result<T> = std::result::Result<T, NetmotifError>;

/// Unified error type for all netmotif operations.
#[derive(Error, Debug)]
pub enum NetmotifError {
    // ============ Lexical Errors ============
    /// Error during lexical analysis
    #[error("Lex error at line {line}, column {column}: {message}")]
    LexError {
        line: usize,
        column: usize,
        message: String,
    },

    // ============ Syntactic Errors ============
    /// Error during parsing
    #[error("Parse error at line {line}, column {column}: {message}")]
    ParseError {
        line: usize,
        column: usize,
        message: String,
    },

    // ============ Semantic Errors ============
    /// Motif parameter arity or minimum-size constraint violated
    #[error("Motif constraint violated for {kind}: {message}")]
    MotifConstraintError { kind: String, message: String },

    /// Reference to a name with no prior binding
    #[error("Unknown name '{name}' at line {line}, column {column}")]
    UnknownNameError {
        name: String,
        line: usize,
        column: usize,
    },

    /// Node reference addresses a node outside the named graph
    #[error("Node reference {graph}.{index} out of range: graph '{graph}' has {node_count} nodes")]
    NodeRefRangeError {
        graph: String,
        index: usize,
        node_count: usize,
    },

    /// Bridge node reference names a graph other than the Connect operand
    #[error("Node reference {graph}.{index} does not match expected graph '{expected}'")]
    NodeRefMismatch {
        graph: String,
        index: usize,
        expected: String,
    },

    /// Expression has the wrong shape for its context
    #[error("Type mismatch: expected {expected}, found {found}: {message}")]
    TypeMismatch {
        expected: String,
        found: String,
        message: String,
    },

    /// Relabel mapping is out of range or not injective
    #[error("Invalid relabel mapping: {message}")]
    InvalidMapping { message: String },

    // ============ Graph Construction Errors ============
    /// Edge references a node outside the graph's node range
    #[error("Edge ({u}, {v}) references node outside the range 0..{node_count}")]
    EdgeOutOfRange {
        u: usize,
        v: usize,
        node_count: usize,
    },

    /// Edge connects a node to itself
    #[error("Self-loop on node {node} is not permitted")]
    SelfLoop { node: usize },

    // ============ Evaluator Defects ============
    /// Checker/evaluator invariant mismatch. Reaching this after a
    /// successful check is a defect in the pipeline, not a user error.
    #[error("Internal evaluator error: {message}")]
    Internal { message: String },

    // ============ I/O Errors ============
    /// Error reading a DSL source file
    #[cfg(feature = "cli")]
    #[error("Failed to read source file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl NetmotifError {
    /// Create a lex error
    pub fn lex(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a motif constraint error
    pub fn motif_constraint(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MotifConstraintError {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(
        expected: impl Into<String>,
        found: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
            message: message.into(),
        }
    }

    /// Create an internal evaluator error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
