//! Error types for the lex/parse/type-check pipeline.
//!
//! Each stage has its own error enum so callers can match on which stage
//! failed; [`Error`] wraps all three for the common case of just wanting
//! one `Result` type out of [`crate::parse_expression`].

use std::fmt;

use crate::ast::ValueType;

/// A source location: byte offset plus 1-based line/column, and the
/// length in bytes of the span it anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub byte_offset: usize,
    pub line: usize,
    pub column: usize,
    pub length: usize,
}

impl Span {
    pub fn new(byte_offset: usize, line: usize, column: usize, length: usize) -> Self {
        Span {
            byte_offset,
            line,
            column,
            length,
        }
    }

    /// A span covering both `self` and `other`, used when folding child
    /// spans into a parent node's span.
    pub fn merge(self, other: Span) -> Span {
        if other.byte_offset < self.byte_offset {
            return other.merge(self);
        }
        let end = (other.byte_offset + other.length).max(self.byte_offset + self.length);
        Span {
            byte_offset: self.byte_offset,
            line: self.line,
            column: self.column,
            length: end - self.byte_offset,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct LexError {
    pub message: String,
    pub span: Span,
}

impl LexError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        LexError {
            message: message.into(),
            span,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        ParseError {
            message: message.into(),
            span,
        }
    }

    /// `Syntax error (line L, column C): unexpected <actual>, expected <expected>`
    pub fn unexpected(actual: impl fmt::Display, expected: impl fmt::Display, span: Span) -> Self {
        ParseError::new(
            format!(
                "Syntax error (line {}, column {}): unexpected {}, expected {}",
                span.line, span.column, actual, expected
            ),
            span,
        )
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub struct TypeError {
    pub expected: Vec<ValueType>,
    pub actual: ValueType,
    pub span: Span,
    pub message: String,
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl TypeError {
    pub fn new(
        message: impl Into<String>,
        expected: Vec<ValueType>,
        actual: ValueType,
        span: Span,
    ) -> Self {
        TypeError {
            expected,
            actual,
            span,
            message: message.into(),
        }
    }
}

/// The union of every error this crate can return, for callers that just
/// want to propagate failure with `?` through [`crate::parse_expression`]
/// and [`crate::check_type`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Type(#[from] TypeError),
}

impl Error {
    pub fn span(&self) -> Span {
        match self {
            Error::Lex(e) => e.span,
            Error::Parse(e) => e.span,
            Error::Type(e) => e.span,
        }
    }
}
