//! DSL (Domain Specific Language) frontend for topology programs.
//!
//! A small text language for describing network-topology motifs and
//! composing them into larger graphs.
//!
//! # Grammar Overview
//!
//! ```text
//! program      = { statement }
//! statement    = "let" ident "=" expression
//!              | expression
//! expression   = motif | ident | connect | overlay | relabel | pick
//! motif        = motif_kw "(" [ int { "," int } ] ")"
//! motif_kw     = "Ring" | "Path" | "Star" | "Mesh" | "Grid" | "Tree"
//!              | "TwoRingsBridge"
//! connect      = "Connect" "(" expression "," expression ","
//!                "bridge" "=" "(" node_ref "," node_ref ")" ")"
//! overlay      = "Overlay" "(" expression "," expression ")"
//! relabel      = "Relabel" "(" expression "," mapping ")"
//! mapping      = "{" [ int ":" int { "," int ":" int } ] "}"
//! pick         = "Pick" "(" expression "," "deg" cmp int ")"
//! cmp          = "=" | "<" | ">" | "<=" | ">="
//! node_ref     = ident "." int
//!
//! int          = digit { digit }
//! ident        = (letter | '_') { letter | digit | '_' }
//! comment      = '#' { any_char } end_of_line
//! ```
//!
//! # Motifs
//!
//! | Motif | Constraint | Nodes | Description |
//! |-------|------------|-------|-------------|
//! | `Ring(n)` | n >= 3 | n | single cycle |
//! | `Path(n)` | n >= 2 | n | simple path |
//! | `Star(n)` | n >= 1 | n + 1 | hub 0 with n leaves |
//! | `Mesh(n)` | n >= 1 | n | complete graph |
//! | `Grid(r, c)` | r, c >= 1 | r * c | lattice, row-major |
//! | `Tree(r, h)` | r >= 2, h >= 1 | (r^(h+1)-1)/(r-1) | balanced tree |
//! | `TwoRingsBridge(a, b)` | a, b >= 3 | a + b | bridged rings |
//!
//! # Example
//!
//! ```text
//! # A ring and a star, joined by one bridge edge
//! let R = Ring(4)
//! let S = Star(3)
//! let C = Connect(R, S, bridge=(R.0, S.0))
//! Pick(C, deg = 1)
//! ```

pub mod ast;
mod lexer;
mod parser;

pub use ast::{
    DegreeCriteriaExpr, Expr, MotifKind, NodeRefLiteral, Program, SourceLocation, Stmt,
};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;

/// Parse DSL source text into an AST.
pub fn parse(input: &str) -> Result<Program> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse a DSL source file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<Program> {
    let content =
        std::fs::read_to_string(path).map_err(|e| crate::error::NetmotifError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
    parse(&content)
}
