//! Primary-expression dispatch and binary-expression assembly (§4.2).
//!
//! Binary expressions are collected as a flat `(head, [(op, matching,
//! rhs)...])` list and then resolved tier by tier, highest precedence
//! first, folding each tier's consecutive operators into a left-leaning
//! `BinaryExpr` — the explicit alternative to Pratt parsing described in
//! §4.2/§9.

use crate::ast::{BinaryExpr, Expr, ParenExpression, StringQuote};
use crate::catalog;
use crate::error::ParseError;
use crate::parser::aggregation::parse_aggregate;
use crate::parser::binary::{parse_vector_matching, peek_binary_op};
use crate::parser::selector::parse_vector_selector;
use crate::parser::subquery::{attach_bracket_suffix, attach_matrix_selector, attach_offset_suffix};
use crate::parser::unary::{parse_unary, starts_with_unary};
use crate::parser::Cursor;
use crate::token::{Quote, TokenKind};

fn quote_to_ast(q: Quote) -> StringQuote {
    match q {
        Quote::Double => StringQuote::Double,
        Quote::Single => StringQuote::Single,
        Quote::Backtick => StringQuote::Backtick,
    }
}

fn parse_paren(cursor: &mut Cursor) -> Result<Expr, ParseError> {
    let start = cursor.peek_span();
    cursor.expect(TokenKind::LeftParen, "'('")?;
    let inner = parse_expr(cursor)?;
    let end = cursor.peek_span();
    cursor.expect(TokenKind::RightParen, "')'")?;
    Ok(Expr::ParenExpression(ParenExpression {
        inner: Box::new(inner),
        span: Some(start.merge(end)),
    }))
}

fn parse_function_call(cursor: &mut Cursor) -> Result<Expr, ParseError> {
    let start = cursor.peek_span();
    let name = match cursor.peek().clone() {
        TokenKind::Identifier(name) | TokenKind::MetricIdentifier(name) => name,
        other => return Err(ParseError::unexpected(&other, "function name", cursor.peek_span())),
    };
    cursor.bump();
    cursor.expect(TokenKind::LeftParen, "'('")?;
    let mut args = Vec::new();
    if !cursor.check(&TokenKind::RightParen) {
        loop {
            args.push(parse_expr(cursor)?);
            if cursor.check(&TokenKind::Comma) {
                cursor.bump();
                continue;
            }
            break;
        }
    }
    let end = cursor.peek_span();
    cursor.expect(TokenKind::RightParen, "')'")?;

    let function = catalog::get_function(&name)
        .unwrap_or_else(|| unreachable!("caller only dispatches here for catalogued names"));
    let min = function.min_args();
    let ok = match function.max_args() {
        Some(max) => args.len() >= min && args.len() <= max,
        None => args.len() >= min,
    };
    if !ok {
        let expected = match function.max_args() {
            Some(max) if max == min => format!("{min}"),
            Some(max) => format!("{min} to {max}"),
            None => format!("at least {min}"),
        };
        return Err(ParseError::new(
            format!(
                "Incorrect number of argument(s) in call to {}, expected {} argument(s)",
                name, expected
            ),
            start.merge(end),
        ));
    }

    Ok(Expr::FunctionCall(crate::ast::FunctionCall {
        function: *function,
        args,
        span: Some(start.merge(end)),
    }))
}

/// One `ExprNoBinary` base, before bracket/offset suffixes are attached.
fn parse_base(cursor: &mut Cursor) -> Result<Expr, ParseError> {
    match cursor.peek().clone() {
        TokenKind::LeftParen => parse_paren(cursor),
        TokenKind::AggregateOp(_) => parse_aggregate(cursor),
        TokenKind::Number(value) => {
            let span = cursor.peek_span();
            cursor.bump();
            Ok(Expr::NumberLiteral { value, span: Some(span) })
        }
        TokenKind::StringLiteral(quote, value) => {
            let span = cursor.peek_span();
            cursor.bump();
            Ok(Expr::StringLiteral {
                quote: quote_to_ast(quote),
                value,
                span: Some(span),
            })
        }
        kind if starts_with_unary(&kind) => parse_unary(cursor),
        TokenKind::Identifier(name) | TokenKind::MetricIdentifier(name)
            if matches!(cursor.peek_at(1), Some(TokenKind::LeftParen)) =>
        {
            if catalog::is_function(&name) {
                parse_function_call(cursor)
            } else {
                Err(ParseError::new(format!("unknown function \"{name}\""), cursor.peek_span()))
            }
        }
        TokenKind::Identifier(_) | TokenKind::MetricIdentifier(_) | TokenKind::LeftBrace => {
            let selector = parse_vector_selector(cursor)?;
            Ok(attach_matrix_selector(selector, cursor))
        }
        other => Err(ParseError::unexpected(&other, "expression", cursor.peek_span())),
    }
}

/// `ExprNoBinary`, with the subquery and offset suffixes attached (§4.2).
/// The bare-bracket `MatrixSelector` form is *not* a suffix — it is
/// consumed as part of the base itself, in [`parse_base`], so that a
/// second bracket afterwards (`metric[1h][1d:5m]`) is unambiguously a
/// subquery wrapping that matrix selector.
pub(crate) fn parse_expr_no_binary(cursor: &mut Cursor) -> Result<Expr, ParseError> {
    let base = parse_base(cursor)?;
    let base = attach_bracket_suffix(base, cursor)?;
    let base = attach_offset_suffix(base, cursor)?;
    Ok(base)
}

/// Full `Expr`: an `ExprNoBinary` optionally followed by a flat chain of
/// `BinOp VectorMatching? ExprNoBinary`, resolved by precedence (§4.2).
pub(crate) fn parse_expr(cursor: &mut Cursor) -> Result<Expr, ParseError> {
    let head = parse_expr_no_binary(cursor)?;
    let mut tail = Vec::new();
    while let Some(op) = peek_binary_op(cursor) {
        let op_span = cursor.peek_span();
        cursor.bump();
        let matching = parse_vector_matching(cursor)?;
        if matching.as_ref().is_some_and(|m| m.return_bool) && !op.is_comparison() {
            return Err(ParseError::new(
                "bool modifier can only be used on comparison operators",
                op_span,
            ));
        }
        let rhs = parse_expr_no_binary(cursor)?;
        tail.push((op, matching, rhs));
    }
    if tail.is_empty() {
        return Ok(head);
    }
    Ok(resolve_precedence(head, tail))
}

/// Tier-by-tier left fold, highest precedence first (§4.2).
fn resolve_precedence(head: Expr, tail: Vec<(crate::ast::BinaryOp, Option<crate::ast::VectorMatching>, Expr)>) -> Expr {
    let mut nodes: Vec<Expr> = Vec::with_capacity(tail.len() + 1);
    nodes.push(head);
    let mut ops: Vec<(crate::ast::BinaryOp, Option<crate::ast::VectorMatching>)> = Vec::with_capacity(tail.len());
    for (op, matching, rhs) in tail {
        ops.push((op, matching));
        nodes.push(rhs);
    }

    for tier in (1..=6u8).rev() {
        let mut i = 0;
        while i < ops.len() {
            if ops[i].0.precedence() == tier {
                let lhs = nodes.remove(i);
                let rhs = nodes.remove(i);
                let (op, matching) = ops.remove(i);
                let span = lhs.span().and_then(|l| rhs.span().map(|r| l.merge(r)));
                nodes.insert(
                    i,
                    Expr::BinaryExpr(BinaryExpr {
                        lhs: Box::new(lhs),
                        rhs: Box::new(rhs),
                        op,
                        matching,
                        span,
                    }),
                );
            } else {
                i += 1;
            }
        }
    }

    debug_assert_eq!(nodes.len(), 1);
    nodes.pop().expect("fold always leaves exactly one node")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, Expr};
    use crate::lexer;
    use crate::parser::Cursor;

    fn parse(input: &str) -> Expr {
        let tokens: Vec<_> = lexer::tokenize(input)
            .unwrap()
            .into_iter()
            .filter(|t| !matches!(t.kind, TokenKind::Comment(_)))
            .collect();
        let mut cursor = Cursor::new(tokens);
        parse_expr(&mut cursor).unwrap()
    }

    #[test]
    fn precedence_pow_binds_tighter_than_mul() {
        // 2 + 3 * 2 ^ 2 should fold as 2 + (3 * (2 ^ 2))
        let expr = parse("2 + 3 * 2 ^ 2");
        match expr {
            Expr::BinaryExpr(BinaryExpr { op: BinaryOp::Add, rhs, .. }) => match *rhs {
                Expr::BinaryExpr(BinaryExpr { op: BinaryOp::Mul, rhs, .. }) => {
                    assert!(matches!(*rhs, Expr::BinaryExpr(BinaryExpr { op: BinaryOp::Pow, .. })));
                }
                other => panic!("expected Mul, got {other:?}"),
            },
            other => panic!("expected Add, got {other:?}"),
        }
    }

    #[test]
    fn equal_precedence_is_left_associative() {
        // 1 - 2 - 3 should fold as (1 - 2) - 3
        let expr = parse("1 - 2 - 3");
        match expr {
            Expr::BinaryExpr(BinaryExpr { op: BinaryOp::Sub, lhs, .. }) => {
                assert!(matches!(*lhs, Expr::BinaryExpr(BinaryExpr { op: BinaryOp::Sub, .. })));
            }
            other => panic!("expected outer Sub, got {other:?}"),
        }
    }

    #[test]
    fn unary_binds_tighter_than_binary() {
        let expr = parse("-1 + 2");
        match expr {
            Expr::BinaryExpr(BinaryExpr { op: BinaryOp::Add, lhs, .. }) => {
                assert!(matches!(*lhs, Expr::UnaryExpr(_)));
            }
            other => panic!("expected Add, got {other:?}"),
        }
    }

    #[test]
    fn function_call_parses() {
        let expr = parse("rate(http_requests[5m])");
        assert!(matches!(expr, Expr::FunctionCall(_)));
    }

    #[test]
    fn bare_identifier_is_vector_selector_not_call() {
        let expr = parse("http_requests");
        assert!(matches!(expr, Expr::VectorSelector(_)));
    }

    fn parse_err(input: &str) -> ParseError {
        let tokens: Vec<_> = lexer::tokenize(input)
            .unwrap()
            .into_iter()
            .filter(|t| !matches!(t.kind, TokenKind::Comment(_)))
            .collect();
        let mut cursor = Cursor::new(tokens);
        parse_expr(&mut cursor).unwrap_err()
    }

    #[test]
    fn bool_modifier_on_arithmetic_operator_is_rejected() {
        let err = parse_err("foo + bool bar");
        assert_eq!(err.message, "bool modifier can only be used on comparison operators");
    }

    #[test]
    fn bool_modifier_on_set_operator_is_rejected() {
        let err = parse_err("foo and bool 10");
        assert_eq!(err.message, "bool modifier can only be used on comparison operators");
    }

    #[test]
    fn bool_modifier_on_comparison_operator_is_accepted() {
        assert!(matches!(parse("foo > bool bar"), Expr::BinaryExpr(_)));
    }
}
