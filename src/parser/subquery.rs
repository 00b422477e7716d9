//! Bracket handling after a base expression (§4.2 `MatrixSelector`,
//! `Subquery`). Two distinct productions share the `[` token:
//!
//! - `MatrixSelector := VectorSelector '[' Duration ']'` is part of the
//!   *base* production, not a suffix — it only ever wraps a bare
//!   `VectorSelector`, decided by a 3-token lookahead (no colon follows
//!   the duration).
//! - `Subquery := base '[' Duration ':' Duration? ']'` is the suffix that
//!   may follow any base (including a `MatrixSelector`), attached at most
//!   once, which is what makes `metric[1h][1d:5m]` parse as a subquery
//!   wrapping a matrix selector.

use crate::ast::{Duration, Expr, MatrixSelector, SubqueryExpr, VectorSelector};
use crate::error::ParseError;
use crate::parser::Cursor;
use crate::token::TokenKind;

fn parse_duration_token(cursor: &mut Cursor) -> Result<Duration, ParseError> {
    match cursor.peek().clone() {
        TokenKind::Duration(nanos) => {
            cursor.bump();
            Ok(Duration::from_nanos(nanos))
        }
        other => Err(ParseError::unexpected(&other, "duration", cursor.peek_span())),
    }
}

/// True when `[` is immediately followed by a duration and then `]` with
/// no intervening `:` — the unambiguous matrix-selector shape. A pure
/// lookahead: consumes nothing.
fn looks_like_matrix_selector(cursor: &Cursor) -> bool {
    matches!(cursor.peek(), TokenKind::LeftBracket)
        && matches!(cursor.peek_at(1), Some(TokenKind::Duration(_)))
        && !matches!(cursor.peek_at(2), Some(TokenKind::Colon))
}

/// Attach a bare `[Duration]` matrix selector to a just-parsed
/// `VectorSelector`, if one is present. Leaves the cursor untouched (and
/// `vector` unwrapped) when the bracket is absent or looks like a
/// subquery instead.
pub(crate) fn attach_matrix_selector(vector: VectorSelector, cursor: &mut Cursor) -> Expr {
    if !looks_like_matrix_selector(cursor) {
        return Expr::VectorSelector(vector);
    }
    let start = vector.span.unwrap_or_else(|| cursor.peek_span());
    cursor.bump(); // '['
    let range = parse_duration_token(cursor).expect("looks_like_matrix_selector guarantees a duration follows");
    let end = cursor.peek_span();
    // Infallible: looks_like_matrix_selector only returns true when the
    // token after the duration is not ':', so this is '[' ... ']'.
    let _ = cursor.expect(TokenKind::RightBracket, "']'");
    Expr::MatrixSelector(MatrixSelector {
        vector,
        range,
        span: Some(start.merge(end)),
    })
}

/// `'[' Duration ':' Duration? ']'` — may follow any base (§4.2 "Suffix
/// handling"), at most once.
pub(crate) fn attach_bracket_suffix(base: Expr, cursor: &mut Cursor) -> Result<Expr, ParseError> {
    if !cursor.check(&TokenKind::LeftBracket) {
        return Ok(base);
    }
    let start = base.span().unwrap_or_else(|| cursor.peek_span());
    cursor.bump();
    let range = parse_duration_token(cursor)?;
    cursor.expect(TokenKind::Colon, "':'")?;
    let step = if cursor.check(&TokenKind::RightBracket) {
        None
    } else {
        Some(parse_duration_token(cursor)?)
    };
    let end = cursor.peek_span();
    cursor.expect(TokenKind::RightBracket, "']'")?;
    Ok(Expr::SubqueryExpr(SubqueryExpr {
        inner: Box::new(base),
        range,
        step,
        span: Some(start.merge(end)),
    }))
}

/// `offset [-]? Duration` — legal only after a `VectorSelector`,
/// `MatrixSelector`, or `SubqueryExpr` (§4.2 "Suffix handling").
pub(crate) fn attach_offset_suffix(base: Expr, cursor: &mut Cursor) -> Result<Expr, ParseError> {
    if !matches!(cursor.peek(), TokenKind::Keyword(crate::token::Keyword::Offset)) {
        return Ok(base);
    }
    if !matches!(base, Expr::VectorSelector(_) | Expr::MatrixSelector(_) | Expr::SubqueryExpr(_)) {
        return Err(ParseError::new(
            "offset modifier must be preceded by an instant vector selector or range vector selector or a subquery",
            cursor.peek_span(),
        ));
    }
    let start = base.span().unwrap_or_else(|| cursor.peek_span());
    cursor.bump();
    let negative = cursor.check(&TokenKind::Sub);
    if negative {
        cursor.bump();
    }
    let end = cursor.peek_span();
    let mut offset = parse_duration_token(cursor)?;
    if negative {
        offset = offset.negate();
    }
    Ok(Expr::OffsetExpr(crate::ast::OffsetExpr {
        inner: Box::new(base),
        offset,
        span: Some(start.merge(end)),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer;
    use crate::parser::expr::parse_expr_no_binary;

    fn cursor_for(input: &str) -> Cursor {
        let tokens: Vec<_> = lexer::tokenize(input)
            .unwrap()
            .into_iter()
            .filter(|t| !matches!(t.kind, TokenKind::Comment(_)))
            .collect();
        Cursor::new(tokens)
    }

    #[test]
    fn matrix_selector_then_subquery_nests() {
        let mut cursor = cursor_for("a[1h][1d:5m]");
        let expr = parse_expr_no_binary(&mut cursor).unwrap();
        match expr {
            Expr::SubqueryExpr(s) => assert!(matches!(*s.inner, Expr::MatrixSelector(_))),
            other => panic!("expected SubqueryExpr, got {other:?}"),
        }
    }

    #[test]
    fn bare_bracket_with_colon_is_subquery_not_matrix() {
        let mut cursor = cursor_for("a[1h:1m]");
        let expr = parse_expr_no_binary(&mut cursor).unwrap();
        match expr {
            Expr::SubqueryExpr(s) => assert!(matches!(*s.inner, Expr::VectorSelector(_))),
            other => panic!("expected SubqueryExpr, got {other:?}"),
        }
    }

    #[test]
    fn subquery_then_offset() {
        let mut cursor = cursor_for("metric[1h:1m] offset 1w");
        let expr = parse_expr_no_binary(&mut cursor).unwrap();
        assert!(matches!(expr, Expr::OffsetExpr(_)));
    }

    #[test]
    fn offset_after_number_is_rejected() {
        let mut cursor = cursor_for("1 offset 5m");
        assert!(parse_expr_no_binary(&mut cursor).is_err());
    }

    #[test]
    fn non_duration_bracket_content_is_a_syntax_error() {
        let mut cursor = cursor_for("my_metric[window]");
        assert!(parse_expr_no_binary(&mut cursor).is_err());
    }
}
