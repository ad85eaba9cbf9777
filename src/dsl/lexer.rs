//! Lexer (tokenizer) for the topology DSL.

use crate::error::{NetmotifError, Result};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text
    pub text: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in the DSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// An identifier (binding name, `deg`, `bridge`, ...)
    Ident,
    /// An unsigned integer literal
    Int,
    /// `let` keyword
    Let,
    /// `Ring` keyword
    Ring,
    /// `Path` keyword
    Path,
    /// `Star` keyword
    Star,
    /// `Mesh` keyword
    Mesh,
    /// `Grid` keyword
    Grid,
    /// `Tree` keyword
    Tree,
    /// `TwoRingsBridge` keyword
    TwoRingsBridge,
    /// `Connect` keyword
    Connect,
    /// `Overlay` keyword
    Overlay,
    /// `Relabel` keyword
    Relabel,
    /// `Pick` keyword
    Pick,
    /// Open parenthesis '('
    OpenParen,
    /// Close parenthesis ')'
    CloseParen,
    /// Open brace '{'
    OpenBrace,
    /// Close brace '}'
    CloseBrace,
    /// Comma ','
    Comma,
    /// Colon ':'
    Colon,
    /// Equals sign '='
    Equals,
    /// Dot '.'
    Dot,
    /// Less-than '<'
    Less,
    /// Greater-than '>'
    Greater,
    /// Less-or-equal '<='
    LessEqual,
    /// Greater-or-equal '>='
    GreaterEqual,
    /// End of input
    Eof,
}

fn keyword(text: &str) -> Option<TokenKind> {
    match text {
        "let" => Some(TokenKind::Let),
        "Ring" => Some(TokenKind::Ring),
        "Path" => Some(TokenKind::Path),
        "Star" => Some(TokenKind::Star),
        "Mesh" => Some(TokenKind::Mesh),
        "Grid" => Some(TokenKind::Grid),
        "Tree" => Some(TokenKind::Tree),
        "TwoRingsBridge" => Some(TokenKind::TwoRingsBridge),
        "Connect" => Some(TokenKind::Connect),
        "Overlay" => Some(TokenKind::Overlay),
        "Relabel" => Some(TokenKind::Relabel),
        "Pick" => Some(TokenKind::Pick),
        _ => None,
    }
}

/// Lexer for tokenizing DSL source text.
///
/// Tokenization is total given finite input: every character either
/// contributes to a token, is skipped whitespace or comment, or fails with a
/// lex error carrying its position. No state is carried across inputs;
/// restarting means constructing a new lexer.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace_and_comments();

        let (line, column) = (self.line, self.column);
        let ch = match self.chars.peek().copied() {
            Some(ch) => ch,
            None => return Ok(self.token(TokenKind::Eof, String::new(), line, column)),
        };

        if ch.is_alphabetic() || ch == '_' {
            let text = self.read_identifier();
            let kind = keyword(&text).unwrap_or(TokenKind::Ident);
            return Ok(self.token(kind, text, line, column));
        }
        if ch.is_ascii_digit() {
            let text = self.read_number();
            return Ok(self.token(TokenKind::Int, text, line, column));
        }

        self.advance();
        let kind = match ch {
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '{' => TokenKind::OpenBrace,
            '}' => TokenKind::CloseBrace,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '=' => TokenKind::Equals,
            '.' => TokenKind::Dot,
            '<' => {
                if self.chars.peek() == Some(&'=') {
                    self.advance();
                    return Ok(self.token(TokenKind::LessEqual, "<=".to_string(), line, column));
                }
                TokenKind::Less
            }
            '>' => {
                if self.chars.peek() == Some(&'=') {
                    self.advance();
                    return Ok(self.token(TokenKind::GreaterEqual, ">=".to_string(), line, column));
                }
                TokenKind::Greater
            }
            _ => {
                return Err(NetmotifError::lex(
                    line,
                    column,
                    format!("unexpected character '{}'", ch),
                ));
            }
        };
        Ok(self.token(kind, ch.to_string(), line, column))
    }

    /// Drain the input into a complete token vector, ending with `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn token(&self, kind: TokenKind, text: String, line: usize, column: usize) -> Token {
        Token {
            kind,
            text,
            line,
            column,
        }
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else if ch == '#' {
                // Skip comment until end of line
                while let Some(&c) = self.chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut text = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }

    fn read_number(&mut self) -> String {
        let mut text = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_lexer_basic() {
        let mut lexer = Lexer::new("let R1 = Ring(4)");

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Let);
        assert_eq!(tok.text, "let");

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Ident);
        assert_eq!(tok.text, "R1");

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Equals);

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Ring);
    }

    #[test]
    fn test_lexer_positions() {
        let mut lexer = Lexer::new("let x\nRing");
        assert_eq!(lexer.next_token().unwrap().column, 1);
        let x = lexer.next_token().unwrap();
        assert_eq!((x.line, x.column), (1, 5));
        let ring = lexer.next_token().unwrap();
        assert_eq!((ring.line, ring.column), (2, 1));
    }

    #[test]
    fn test_lexer_node_ref() {
        assert_eq!(
            kinds("R1.0"),
            vec![TokenKind::Ident, TokenKind::Dot, TokenKind::Int, TokenKind::Eof]
        );
    }

    #[test]
    fn test_lexer_comparators() {
        assert_eq!(
            kinds("< <= > >= ="),
            vec![
                TokenKind::Less,
                TokenKind::LessEqual,
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Equals,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_lexer_skips_comments() {
        assert_eq!(
            kinds("# header\nlet g = Mesh(3) # trailing\n"),
            vec![
                TokenKind::Let,
                TokenKind::Ident,
                TokenKind::Equals,
                TokenKind::Mesh,
                TokenKind::OpenParen,
                TokenKind::Int,
                TokenKind::CloseParen,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_lexer_rejects_unknown_character() {
        let mut lexer = Lexer::new("let g = @");
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        assert!(matches!(
            err,
            NetmotifError::LexError { line: 1, column: 9, .. }
        ));
    }

    #[test]
    fn test_lexer_keywords_are_case_sensitive() {
        assert_eq!(kinds("ring")[0], TokenKind::Ident);
        assert_eq!(kinds("Ring")[0], TokenKind::Ring);
    }
}
