//! Aggregate expressions (§4.2 `AggregateExpr`, `Modifier`).

use crate::ast::{AggregateExpr, Expr};
use crate::catalog::AggregateOperator;
use crate::error::ParseError;
use crate::parser::expr::parse_expr;
use crate::parser::selector::token_as_label_name;
use crate::parser::Cursor;
use crate::token::{Keyword, TokenKind};

fn at_modifier_keyword(cursor: &Cursor) -> Option<bool> {
    match cursor.peek() {
        TokenKind::Keyword(Keyword::By) => Some(false),
        TokenKind::Keyword(Keyword::Without) => Some(true),
        _ => None,
    }
}

/// `('by'|'without') '(' LabelName (',' LabelName)* ','? ')'`
fn parse_grouping(cursor: &mut Cursor) -> Result<(bool, Vec<String>), ParseError> {
    let without = at_modifier_keyword(cursor).expect("caller checked");
    cursor.bump();
    cursor.expect(TokenKind::LeftParen, "'('")?;
    let mut labels = Vec::new();
    if !cursor.check(&TokenKind::RightParen) {
        loop {
            let name = token_as_label_name(cursor.peek())
                .ok_or_else(|| ParseError::unexpected(cursor.peek(), "label name", cursor.peek_span()))?;
            cursor.bump();
            labels.push(name);
            if cursor.check(&TokenKind::Comma) {
                cursor.bump();
                if cursor.check(&TokenKind::RightParen) {
                    break;
                }
                continue;
            }
            break;
        }
    }
    cursor.expect(TokenKind::RightParen, "')'")?;
    Ok((without, labels))
}

fn parse_call_args(cursor: &mut Cursor) -> Result<Vec<Expr>, ParseError> {
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
    cursor.expect(TokenKind::RightParen, "')'")?;
    Ok(args)
}

/// `AGGREGATE_OP (Modifier? Args | Args Modifier?)` — the grouping clause
/// may come before or after the argument list (§4.2).
pub(crate) fn parse_aggregate(cursor: &mut Cursor) -> Result<Expr, ParseError> {
    let start = cursor.peek_span();
    let name = match cursor.peek().clone() {
        TokenKind::AggregateOp(name) => name,
        other => return Err(ParseError::unexpected(&other, "aggregate operator", cursor.peek_span())),
    };
    cursor.bump();
    let op = AggregateOperator::lookup(&name)
        .unwrap_or_else(|| unreachable!("lexer only emits AggregateOp for catalogued names"));

    let mut without = false;
    let mut grouping_labels = Vec::new();
    let mut grouping_seen = false;
    if at_modifier_keyword(cursor).is_some() {
        let (w, labels) = parse_grouping(cursor)?;
        without = w;
        grouping_labels = labels;
        grouping_seen = true;
    }

    let args_span = cursor.peek_span();
    let mut args = parse_call_args(cursor)?;

    if !grouping_seen && at_modifier_keyword(cursor).is_some() {
        let (w, labels) = parse_grouping(cursor)?;
        without = w;
        grouping_labels = labels;
    }

    let expected = if op.parameter_type().is_some() { 2 } else { 1 };
    if args.len() != expected {
        return Err(ParseError::new(
            format!(
                "Incorrect number of argument(s) in call to {}, expected {} argument(s)",
                name, expected
            ),
            args_span,
        ));
    }
    let expr = Box::new(args.pop().unwrap());
    let param = if expected == 2 { Some(Box::new(args.pop().unwrap())) } else { None };

    let end = expr.span().unwrap_or(start);
    Ok(Expr::AggregateExpr(AggregateExpr {
        op,
        expr,
        param,
        grouping_labels,
        without,
        span: Some(start.merge(end)),
    }))
}
