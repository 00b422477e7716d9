//! End-to-end scenarios, run through the full lex/parse/type-check/print
//! pipeline in one pass.

use promql_toolkit::ast::{BinaryOp, Cardinality, Expr, ValueType};
use promql_toolkit::{check_type, parse_expression, to_promql};

#[test]
fn scenario_1_aggregate_division_with_group_left() {
    let input = "sum by(job, mode) (rate(node_cpu_seconds_total[1m])) / on(job) group_left sum by(job)(rate(node_cpu_seconds_total[1m]))";
    let expr = parse_expression(input).unwrap();
    let Expr::BinaryExpr(ref b) = expr else { panic!("expected BinaryExpr") };
    assert_eq!(b.op, BinaryOp::Div);
    assert_eq!(b.matching.as_ref().unwrap().cardinality, Cardinality::ManyToOne);
    assert_eq!(check_type(&expr).unwrap(), ValueType::Vector);
}

#[test]
fn scenario_2_bool_modifier_makes_a_comparison_scalar() {
    let expr = parse_expression("1 > bool 1").unwrap();
    assert_eq!(check_type(&expr).unwrap(), ValueType::Scalar);
}

#[test]
fn scenario_3_bare_scalar_comparison_is_rejected() {
    let expr = parse_expression("1 > 1").unwrap();
    let err = check_type(&expr).unwrap_err();
    assert_eq!(err.to_string(), "comparisons between scalars must use bool modifier");
}

#[test]
fn scenario_4_set_operator_on_a_scalar_is_rejected() {
    let expr = parse_expression("first_vector and 1").unwrap();
    let err = check_type(&expr).unwrap_err();
    assert_eq!(err.to_string(), "set operator And not allowed in binary scalar expression");
}

#[test]
fn scenario_5_over_time_of_an_instant_vector_reports_byte_offset() {
    let expr = parse_expression("sum_over_time(instant_vector)").unwrap();
    let err = check_type(&expr).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unexpected type 'instant vector' was provided, expected range vector: 14 (line 1, column 15)"
    );
}

#[test]
fn scenario_6_subquery_with_offset_is_a_matrix() {
    let expr = parse_expression("metric[ 1h:1m ] offset 1w").unwrap();
    match &expr {
        Expr::OffsetExpr(o) => {
            assert_eq!(o.offset.nanoseconds, 7 * 24 * 3_600 * 1_000_000_000);
            assert!(matches!(*o.inner, Expr::SubqueryExpr(_)));
        }
        other => panic!("expected OffsetExpr, got {other:?}"),
    }
    assert_eq!(check_type(&expr).unwrap(), ValueType::Matrix);
}

#[test]
fn scenario_7_matrix_then_subquery_printed_with_plus() {
    let input = "(another_metric{one='test',two!='test2'}[1h][1d:5m]) + -vector(this_is_a_metric offset 5m)";
    let expr = parse_expression(input).unwrap();
    let Expr::BinaryExpr(ref b) = expr else { panic!("expected BinaryExpr") };
    assert_eq!(b.op, BinaryOp::Add);
    let printed = to_promql(&expr);
    let reparsed = parse_expression(&printed).unwrap();
    assert_eq!(to_promql(&reparsed), printed);
}
