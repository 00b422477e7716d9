use promql_toolkit::{parse_expression, to_promql};

fn roundtrip(input: &str) -> String {
    to_promql(&parse_expression(input).unwrap())
}

#[test]
fn scenario_7_prints_with_single_space_around_plus() {
    let input = "(another_metric{one='test',two!='test2'}[1h][1d:5m]) + -vector(this_is_a_metric offset 5m)";
    let printed = roundtrip(input);
    assert!(printed.contains(") + -"));
}

#[test]
fn scenario_6_subquery_with_offset_prints_trimmed() {
    assert_eq!(roundtrip("metric[ 1h:1m ] offset 1w"), "metric[1h:1m] offset 1w");
}

#[test]
fn infinity_and_nan_print_as_prometheus_spells_them() {
    assert_eq!(roundtrip("Inf"), "Inf");
    assert_eq!(roundtrip("-Inf"), "-Inf");
    assert_eq!(roundtrip("NaN"), "NaN");
}

#[test]
fn number_prints_as_shortest_round_trippable_decimal() {
    assert_eq!(roundtrip("3.14"), "3.14");
    assert_eq!(roundtrip("1"), "1");
}

#[test]
fn on_ignoring_and_group_modifiers_print_in_order() {
    let printed = roundtrip("a * on(job) group_left(version) b");
    assert_eq!(printed, "a * on(job) group_left(version) b");
}

#[test]
fn duration_round_trips_for_every_representable_component() {
    for d in ["1d", "1h", "1m", "1s", "1ms", "1d2h3m4s5ms"] {
        assert_eq!(roundtrip(&format!("metric[{d}]")), format!("metric[{d}]"));
    }
}

#[test]
fn regex_matchers_print_with_their_original_operator() {
    assert_eq!(
        roundtrip(r#"metric{job=~"api.*"}"#),
        r#"metric{job=~"api.*"}"#
    );
}

#[test]
fn aggregate_without_by_or_without_has_no_space_before_its_args() {
    assert_eq!(roundtrip("sum(metric)"), "sum(metric)");
    assert_eq!(roundtrip("quantile(0.5, metric)"), "quantile(0.5, metric)");
}
