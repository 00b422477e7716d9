//! Vector selectors and label matchers (§4.2 `VectorSelector`).

use crate::ast::{LabelMatchOp, LabelMatcher, LabelMatchers, MetricIdentifier, VectorSelector};
use crate::error::ParseError;
use crate::parser::Cursor;
use crate::token::TokenKind;

/// Any token that can stand in a label-name or grouping-label position:
/// keywords, aggregate names, and plain identifiers are all acceptable
/// (§4.2 "Label-matcher keywords").
pub(crate) fn token_as_label_name(kind: &TokenKind) -> Option<String> {
    match kind {
        TokenKind::Identifier(name) => Some(name.clone()),
        TokenKind::AggregateOp(name) => Some(name.clone()),
        TokenKind::Keyword(k) => Some(k.as_str().to_string()),
        _ => None,
    }
}

fn label_match_op(kind: &TokenKind) -> Option<LabelMatchOp> {
    match kind {
        TokenKind::Assign => Some(LabelMatchOp::Equal),
        TokenKind::NotEq => Some(LabelMatchOp::NotEqual),
        TokenKind::RegexMatch => Some(LabelMatchOp::Regexp),
        TokenKind::RegexNotMatch => Some(LabelMatchOp::NotRegexp),
        _ => None,
    }
}

/// `'{' (LabelMatcher (',' LabelMatcher)* ','?)? '}'` — trailing comma
/// accepted, `{,}` rejected.
pub(crate) fn parse_label_matchers(cursor: &mut Cursor) -> Result<LabelMatchers, ParseError> {
    cursor.expect(TokenKind::LeftBrace, "'{'")?;
    let mut matchers = Vec::new();
    if !cursor.check(&TokenKind::RightBrace) {
        loop {
            matchers.push(parse_label_matcher(cursor)?);
            if cursor.check(&TokenKind::Comma) {
                cursor.bump();
                if cursor.check(&TokenKind::RightBrace) {
                    break;
                }
                continue;
            }
            break;
        }
    }
    cursor.expect(TokenKind::RightBrace, "'}'")?;
    Ok(LabelMatchers { matchers })
}

fn parse_label_matcher(cursor: &mut Cursor) -> Result<LabelMatcher, ParseError> {
    let start = cursor.peek_span();
    let name = token_as_label_name(cursor.peek())
        .ok_or_else(|| ParseError::unexpected(cursor.peek(), "label name", cursor.peek_span()))?;
    cursor.bump();
    let op = label_match_op(cursor.peek())
        .ok_or_else(|| ParseError::unexpected(cursor.peek(), "one of '=' '!=' '=~' '!~'", cursor.peek_span()))?;
    cursor.bump();
    let value_span = cursor.peek_span();
    let value = match cursor.peek().clone() {
        TokenKind::StringLiteral(_, v) => {
            cursor.bump();
            v
        }
        other => return Err(ParseError::unexpected(&other, "string literal", value_span)),
    };
    Ok(LabelMatcher {
        name,
        op,
        value,
        span: Some(start.merge(value_span)),
    })
}

/// `MetricIdentifier LabelMatchers? | LabelMatchers` (§4.2).
pub(crate) fn parse_vector_selector(cursor: &mut Cursor) -> Result<VectorSelector, ParseError> {
    let start = cursor.peek_span();
    let metric = match cursor.peek().clone() {
        TokenKind::Identifier(name) | TokenKind::MetricIdentifier(name) => {
            cursor.bump();
            Some(MetricIdentifier { name })
        }
        _ => None,
    };
    let matchers = if cursor.check(&TokenKind::LeftBrace) {
        Some(parse_label_matchers(cursor)?)
    } else {
        None
    };
    if metric.is_none() && matchers.is_none() {
        return Err(ParseError::unexpected(cursor.peek(), "vector selector", cursor.peek_span()));
    }
    let end = if let Some(m) = &matchers {
        m.matchers.last().map(|lm| lm.span.unwrap_or(start)).unwrap_or(start)
    } else {
        start
    };
    Ok(VectorSelector {
        metric,
        matchers,
        span: Some(start.merge(end)),
    })
}
