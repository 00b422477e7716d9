//! Combinator-style parser (§4.2): consumes the token sequence produced by
//! [`crate::lexer`] and builds an [`crate::ast::Expr`].

pub mod aggregation;
pub mod binary;
pub mod expr;
pub mod selector;
pub mod subquery;
pub mod unary;

use crate::ast::Expr;
use crate::error::{Error, ParseError, Span};
use crate::lexer;
use crate::token::{Token, TokenKind};

/// A one-token-lookahead cursor over the already-lexed, comment-filtered
/// token stream. All state here is stack-local to a single parse call
/// (§5's reentrancy requirement).
pub(crate) struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl Cursor {
    fn new(tokens: Vec<Token>) -> Self {
        Cursor { tokens, pos: 0 }
    }

    pub(crate) fn peek(&self) -> &TokenKind {
        &self.tokens[self.pos].kind
    }

    pub(crate) fn peek_at(&self, offset: usize) -> Option<&TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| &t.kind)
    }

    pub(crate) fn peek_span(&self) -> Span {
        self.tokens[self.pos].span
    }

    pub(crate) fn bump(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.peek() == kind
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, expected_name: &str) -> Result<Token, ParseError> {
        if self.peek() == &kind {
            Ok(self.bump())
        } else {
            Err(ParseError::unexpected(self.peek(), expected_name, self.peek_span()))
        }
    }
}

/// Full pipeline entry point: lex, filter comments, parse, enforce the
/// grammar (§6 `parse_expression`).
pub fn parse_expression(input: &str) -> Result<Expr, Error> {
    let tokens = lexer::tokenize(input)?;
    let tokens: Vec<Token> = tokens
        .into_iter()
        .filter(|t| !matches!(t.kind, TokenKind::Comment(_)))
        .collect();
    let mut cursor = Cursor::new(tokens);
    let parsed = expr::parse_expr(&mut cursor)?;
    if !cursor.check(&TokenKind::Eof) {
        return Err(ParseError::unexpected(cursor.peek(), "end of input", cursor.peek_span()).into());
    }
    Ok(parsed)
}
