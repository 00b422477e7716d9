//! `UnaryExpr := ('+'|'-') ExprNoBinary` (§4.2) — binds tighter than any
//! binary operator, wrapping only the next non-binary base.

use crate::ast::{Expr, UnaryExpr, UnaryOp};
use crate::error::ParseError;
use crate::parser::expr::parse_expr_no_binary;
use crate::parser::Cursor;
use crate::token::TokenKind;

pub(crate) fn starts_with_unary(kind: &TokenKind) -> bool {
    matches!(kind, TokenKind::Add | TokenKind::Sub)
}

pub(crate) fn parse_unary(cursor: &mut Cursor) -> Result<Expr, ParseError> {
    let op_tok = cursor.bump();
    let op = match op_tok.kind {
        TokenKind::Add => UnaryOp::Add,
        TokenKind::Sub => UnaryOp::Sub,
        _ => unreachable!("caller checked starts_with_unary"),
    };
    let inner = parse_expr_no_binary(cursor)?;
    let span = op_tok.span.merge(inner.span().unwrap_or(op_tok.span));
    Ok(Expr::UnaryExpr(UnaryExpr {
        op,
        inner: Box::new(inner),
        span: Some(span),
    }))
}
