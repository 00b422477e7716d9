use promql_toolkit::ast::ValueType;
use promql_toolkit::{check_type, parse_expression};

fn type_of(input: &str) -> ValueType {
    check_type(&parse_expression(input).unwrap()).unwrap()
}

fn type_error(input: &str) -> String {
    check_type(&parse_expression(input).unwrap()).unwrap_err().to_string()
}

#[test]
fn scenario_1_on_group_left_division_is_vector() {
    let input = "sum by(job, mode) (rate(node_cpu_seconds_total[1m])) / on(job) group_left sum by(job)(rate(node_cpu_seconds_total[1m]))";
    assert_eq!(type_of(input), ValueType::Vector);
}

#[test]
fn scenario_2_scalar_bool_comparison_is_scalar() {
    assert_eq!(type_of("1 > bool 1"), ValueType::Scalar);
}

#[test]
fn scenario_3_scalar_comparison_without_bool_is_rejected() {
    assert_eq!(type_error("1 > 1"), "comparisons between scalars must use bool modifier");
}

#[test]
fn scenario_4_set_operator_with_scalar_is_rejected() {
    assert_eq!(
        type_error("first_vector and 1"),
        "set operator And not allowed in binary scalar expression"
    );
}

#[test]
fn scenario_5_over_time_of_instant_vector_is_rejected_with_location() {
    assert_eq!(
        type_error("sum_over_time(instant_vector)"),
        "Unexpected type 'instant vector' was provided, expected range vector: 14 (line 1, column 15)"
    );
}

#[test]
fn scenario_6_subquery_with_offset_is_matrix() {
    assert_eq!(type_of("metric[ 1h:1m ] offset 1w"), ValueType::Matrix);
}

#[test]
fn rate_of_matrix_is_vector() {
    assert_eq!(type_of("rate(http_requests_total[5m])"), ValueType::Vector);
}

#[test]
fn quantile_requires_scalar_parameter() {
    let err = type_error(r#"quantile("not a number", http_requests_total)"#);
    assert!(err.starts_with("Unexpected type 'string' was provided, expected scalar"));
}

#[test]
fn count_values_requires_string_parameter() {
    assert!(type_of(r#"count_values("state", http_requests_total)"#) == ValueType::Vector);
}
