//! Recursive-descent parser for the topology DSL.
//!
//! One token of lookahead (`current`). The parser performs no semantic
//! validation: motif arity and node-range checks are deliberately deferred to
//! the checker so syntax and semantic errors surface as distinct kinds.

use std::collections::BTreeMap;

use super::ast::*;
use super::lexer::{Lexer, Token, TokenKind};
use crate::error::{NetmotifError, Result};
use crate::graph::{Comparator, NodeId, NodeRef};

/// Parser for DSL programs.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse a complete program: zero or more statements, then end of input.
    pub fn parse(&mut self) -> Result<Program> {
        let mut statements = Vec::new();
        while self.current.kind != TokenKind::Eof {
            if self.current.kind == TokenKind::Let {
                statements.push(self.parse_let()?);
            } else {
                let location = self.location();
                let expr = self.expression()?;
                statements.push(Stmt::Expr { expr, location });
            }
        }
        Ok(Program { statements })
    }

    fn parse_let(&mut self) -> Result<Stmt> {
        let location = self.location();
        self.expect(TokenKind::Let)?;
        let name = self.expect(TokenKind::Ident)?.text;
        self.expect(TokenKind::Equals)?;
        let expr = self.expression()?;
        Ok(Stmt::Let {
            name,
            expr,
            location,
        })
    }

    fn expression(&mut self) -> Result<Expr> {
        let location = self.location();
        match self.current.kind {
            TokenKind::Ring
            | TokenKind::Path
            | TokenKind::Star
            | TokenKind::Mesh
            | TokenKind::Grid
            | TokenKind::Tree
            | TokenKind::TwoRingsBridge => self.motif_expression(),
            TokenKind::Connect => self.connect_expression(),
            TokenKind::Overlay => self.overlay_expression(),
            TokenKind::Relabel => self.relabel_expression(),
            TokenKind::Pick => self.pick_expression(),
            TokenKind::Ident => {
                let name = self.advance()?.text;
                Ok(Expr::Ident { name, location })
            }
            _ => Err(NetmotifError::parse(
                self.current.line,
                self.current.column,
                format!("unexpected token '{}' in expression", self.describe_current()),
            )),
        }
    }

    fn motif_expression(&mut self) -> Result<Expr> {
        let location = self.location();
        let keyword = self.advance()?;
        let kind = MotifKind::from_keyword(&keyword.text).ok_or_else(|| {
            NetmotifError::parse(
                keyword.line,
                keyword.column,
                format!("unknown motif '{}'", keyword.text),
            )
        })?;
        self.expect(TokenKind::OpenParen)?;
        // Any number of integer arguments; arity is the checker's concern.
        let mut args = Vec::new();
        if self.current.kind != TokenKind::CloseParen {
            args.push(self.int_value()?);
            while self.matches(TokenKind::Comma)? {
                args.push(self.int_value()?);
            }
        }
        self.expect(TokenKind::CloseParen)?;
        Ok(Expr::Motif {
            kind,
            args,
            location,
        })
    }

    fn connect_expression(&mut self) -> Result<Expr> {
        let location = self.location();
        self.advance()?;
        self.expect(TokenKind::OpenParen)?;
        let left = Box::new(self.expression()?);
        self.expect(TokenKind::Comma)?;
        let right = Box::new(self.expression()?);
        self.expect(TokenKind::Comma)?;
        let keyword = self.expect(TokenKind::Ident)?;
        if keyword.text != "bridge" {
            return Err(NetmotifError::parse(
                keyword.line,
                keyword.column,
                format!("expected named argument 'bridge', found '{}'", keyword.text),
            ));
        }
        self.expect(TokenKind::Equals)?;
        self.expect(TokenKind::OpenParen)?;
        let left_ref = self.node_ref()?;
        self.expect(TokenKind::Comma)?;
        let right_ref = self.node_ref()?;
        self.expect(TokenKind::CloseParen)?;
        self.expect(TokenKind::CloseParen)?;
        Ok(Expr::Connect {
            left,
            right,
            left_ref,
            right_ref,
            location,
        })
    }

    fn node_ref(&mut self) -> Result<NodeRefLiteral> {
        let location = self.location();
        let graph = self.expect(TokenKind::Ident)?.text;
        self.expect(TokenKind::Dot)?;
        let index = self.int_value()?;
        Ok(NodeRefLiteral {
            target: NodeRef::new(graph, NodeId(index)),
            location,
        })
    }

    fn overlay_expression(&mut self) -> Result<Expr> {
        let location = self.location();
        self.advance()?;
        self.expect(TokenKind::OpenParen)?;
        let left = Box::new(self.expression()?);
        self.expect(TokenKind::Comma)?;
        let right = Box::new(self.expression()?);
        self.expect(TokenKind::CloseParen)?;
        Ok(Expr::Overlay {
            left,
            right,
            location,
        })
    }

    fn relabel_expression(&mut self) -> Result<Expr> {
        let location = self.location();
        self.advance()?;
        self.expect(TokenKind::OpenParen)?;
        let target = Box::new(self.expression()?);
        self.expect(TokenKind::Comma)?;
        let mapping = self.mapping_literal()?;
        self.expect(TokenKind::CloseParen)?;
        Ok(Expr::Relabel {
            target,
            mapping,
            location,
        })
    }

    fn mapping_literal(&mut self) -> Result<BTreeMap<NodeId, NodeId>> {
        let mut mapping = BTreeMap::new();
        self.expect(TokenKind::OpenBrace)?;
        if self.current.kind != TokenKind::CloseBrace {
            loop {
                let source = self.int_value()?;
                self.expect(TokenKind::Colon)?;
                let target = self.int_value()?;
                mapping.insert(NodeId(source), NodeId(target));
                if !self.matches(TokenKind::Comma)? {
                    break;
                }
            }
        }
        self.expect(TokenKind::CloseBrace)?;
        Ok(mapping)
    }

    fn pick_expression(&mut self) -> Result<Expr> {
        let location = self.location();
        self.advance()?;
        self.expect(TokenKind::OpenParen)?;
        let target = Box::new(self.expression()?);
        self.expect(TokenKind::Comma)?;
        let criteria = self.criteria_literal()?;
        self.expect(TokenKind::CloseParen)?;
        Ok(Expr::Pick {
            target,
            criteria,
            location,
        })
    }

    fn criteria_literal(&mut self) -> Result<DegreeCriteriaExpr> {
        let location = self.location();
        let name = self.expect(TokenKind::Ident)?;
        if name.text != "deg" {
            return Err(NetmotifError::parse(
                name.line,
                name.column,
                format!("unsupported criteria '{}', expected 'deg'", name.text),
            ));
        }
        let op = self.advance()?;
        let comparator = match op.kind {
            TokenKind::Equals => Comparator::Eq,
            TokenKind::Less => Comparator::Lt,
            TokenKind::Greater => Comparator::Gt,
            TokenKind::LessEqual => Comparator::Le,
            TokenKind::GreaterEqual => Comparator::Ge,
            _ => {
                return Err(NetmotifError::parse(
                    op.line,
                    op.column,
                    format!("expected comparator after 'deg', found '{}'", op.text),
                ));
            }
        };
        let value = self.int_value()?;
        Ok(DegreeCriteriaExpr::new(comparator, value, location))
    }

    fn int_value(&mut self) -> Result<usize> {
        let token = self.expect(TokenKind::Int)?;
        token.text.parse::<usize>().map_err(|_| {
            NetmotifError::parse(token.line, token.column, "integer literal too large")
        })
    }

    fn advance(&mut self) -> Result<Token> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn matches(&mut self, kind: TokenKind) -> Result<bool> {
        if self.current.kind == kind {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            self.advance()
        } else {
            Err(NetmotifError::parse(
                self.current.line,
                self.current.column,
                format!("expected {:?}, found '{}'", kind, self.describe_current()),
            ))
        }
    }

    fn describe_current(&self) -> &str {
        if self.current.kind == TokenKind::Eof {
            "end of input"
        } else {
            &self.current.text
        }
    }

    fn location(&self) -> SourceLocation {
        SourceLocation::new(self.current.line, self.current.column)
    }
}
