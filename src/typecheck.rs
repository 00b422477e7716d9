//! Type checker (§4.3): walks an already-parsed [`Expr`] computing a
//! [`ValueType`] for each node, failing fast on the first mismatch.

use crate::ast::{AggregateExpr, BinaryExpr, Expr, FunctionCall, SubqueryExpr, UnaryExpr, ValueType};
use crate::error::{Span, TypeError};

/// `check_type(expr) -> ValueType | TypeError` (§6).
pub fn check_type(expr: &Expr) -> Result<ValueType, TypeError> {
    match expr {
        Expr::NumberLiteral { .. } => Ok(ValueType::Scalar),
        Expr::StringLiteral { .. } => Ok(ValueType::String),
        Expr::VectorSelector(_) => Ok(ValueType::Vector),
        Expr::MatrixSelector(_) => Ok(ValueType::Matrix),
        Expr::SubqueryExpr(s) => check_subquery(s),
        Expr::OffsetExpr(o) => check_type(&o.inner),
        Expr::ParenExpression(p) => check_type(&p.inner),
        Expr::UnaryExpr(u) => check_unary(u),
        Expr::FunctionCall(c) => check_function_call(c),
        Expr::AggregateExpr(a) => check_aggregate(a),
        Expr::BinaryExpr(b) => check_binary(b),
    }
}

fn span_of(expr: &Expr) -> Span {
    expr.span().unwrap_or_default()
}

fn check_subquery(s: &SubqueryExpr) -> Result<ValueType, TypeError> {
    let inner = check_type(&s.inner)?;
    if inner != ValueType::Vector {
        return Err(TypeError::new(
            format!(
                "Unexpected type '{}' was provided, expected range vector",
                inner
            ),
            vec![ValueType::Vector],
            inner,
            span_of(&s.inner),
        ));
    }
    Ok(ValueType::Matrix)
}

fn check_unary(u: &UnaryExpr) -> Result<ValueType, TypeError> {
    let inner = check_type(&u.inner)?;
    if inner != ValueType::Scalar && inner != ValueType::Vector {
        return Err(TypeError::new(
            format!("unary expression requires a scalar or instant vector, got {inner}"),
            vec![ValueType::Scalar, ValueType::Vector],
            inner,
            span_of(&u.inner),
        ));
    }
    Ok(inner)
}

fn check_function_call(c: &FunctionCall) -> Result<ValueType, TypeError> {
    let min = c.function.min_args();
    for (i, arg) in c.args.iter().enumerate() {
        let actual = check_type(arg)?;
        let expected = expected_arg_type(&c.function, i, min);
        if actual != expected {
            return Err(TypeError::new(
                format!(
                    "Unexpected type '{}' was provided, expected {}: {} (line {}, column {})",
                    actual,
                    expected,
                    span_of(arg).byte_offset,
                    span_of(arg).line,
                    span_of(arg).column
                ),
                vec![expected],
                actual,
                span_of(arg),
            ));
        }
    }
    Ok(c.function.return_type)
}

fn expected_arg_type(function: &crate::catalog::Function, index: usize, min_args: usize) -> ValueType {
    let declared = function.arg_types.len();
    if index < declared {
        function.arg_types[index]
    } else {
        // Beyond the declared arg list, a variadic function repeats its
        // final `k` types (§4.3 "extending the final type n times").
        let _ = min_args;
        *function.arg_types.last().expect("variadic functions declare at least one repeating arg type")
    }
}

fn check_aggregate(a: &AggregateExpr) -> Result<ValueType, TypeError> {
    let inner = check_type(&a.expr)?;
    if inner != ValueType::Vector {
        return Err(TypeError::new(
            format!("Unexpected type '{inner}' was provided, expected instant vector"),
            vec![ValueType::Vector],
            inner,
            span_of(&a.expr),
        ));
    }
    if let Some(param_type) = a.op.parameter_type() {
        let param = a
            .param
            .as_ref()
            .expect("parser guarantees a param slot whenever the aggregate declares a parameter type");
        let actual = check_type(param)?;
        if actual != param_type {
            return Err(TypeError::new(
                format!("Unexpected type '{actual}' was provided, expected {param_type}"),
                vec![param_type],
                actual,
                span_of(param),
            ));
        }
    }
    Ok(ValueType::Vector)
}

fn check_binary(b: &BinaryExpr) -> Result<ValueType, TypeError> {
    let lhs = check_type(&b.lhs)?;
    let rhs = check_type(&b.rhs)?;

    for (side, ty) in [("left-hand side", lhs), ("right-hand side", rhs)] {
        if ty != ValueType::Scalar && ty != ValueType::Vector {
            return Err(TypeError::new(
                format!("binary expression {side} must be scalar or instant vector, got {ty}"),
                vec![ValueType::Scalar, ValueType::Vector],
                ty,
                span_of(if side == "left-hand side" { &b.lhs } else { &b.rhs }),
            ));
        }
    }

    let both_scalar = lhs == ValueType::Scalar && rhs == ValueType::Scalar;
    let return_bool = b.matching.as_ref().is_some_and(|m| m.return_bool);

    if b.op.is_comparison() && both_scalar && !return_bool {
        return Err(TypeError::new(
            "comparisons between scalars must use bool modifier",
            vec![ValueType::Vector],
            ValueType::Scalar,
            span_of(&b.lhs).merge(span_of(&b.rhs)),
        ));
    }

    if b.op.is_set_operator() && (lhs != ValueType::Vector || rhs != ValueType::Vector) {
        return Err(TypeError::new(
            format!("set operator {:?} not allowed in binary scalar expression", b.op),
            vec![ValueType::Vector],
            if lhs != ValueType::Vector { lhs } else { rhs },
            span_of(&b.lhs).merge(span_of(&b.rhs)),
        ));
    }

    Ok(if both_scalar { ValueType::Scalar } else { ValueType::Vector })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expression;

    fn type_of(input: &str) -> ValueType {
        let expr = parse_expression(input).unwrap();
        check_type(&expr).unwrap()
    }

    fn type_error(input: &str) -> String {
        let expr = parse_expression(input).unwrap();
        check_type(&expr).unwrap_err().message
    }

    #[test]
    fn scalar_bool_comparison_is_scalar() {
        assert_eq!(type_of("1 > bool 1"), ValueType::Scalar);
    }

    #[test]
    fn scalar_comparison_without_bool_is_an_error() {
        assert_eq!(type_error("1 > 1"), "comparisons between scalars must use bool modifier");
    }

    #[test]
    fn set_operator_with_scalar_is_an_error() {
        assert_eq!(
            type_error("first_vector and 1"),
            "set operator And not allowed in binary scalar expression"
        );
    }

    #[test]
    fn subquery_of_instant_vector_is_matrix() {
        assert_eq!(type_of("metric[1h:1m] offset 1w"), ValueType::Matrix);
    }

    #[test]
    fn sum_over_time_of_instant_vector_is_an_error() {
        let msg = type_error("sum_over_time(instant_vector)");
        assert!(msg.starts_with("Unexpected type 'instant vector' was provided, expected range vector"));
    }
}
