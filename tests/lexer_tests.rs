use promql_toolkit::lexer::tokenize;
use promql_toolkit::token::TokenKind;

fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input)
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .filter(|k| !matches!(k, TokenKind::Eof))
        .collect()
}

#[test]
fn duration_is_preferred_over_number_and_identifier() {
    let ks = kinds("5m");
    assert_eq!(ks, vec![TokenKind::Duration(5 * 60 * 1_000_000_000)]);
}

#[test]
fn brace_mode_classifies_label_names_as_identifiers() {
    let ks = kinds(r#"{job="api"}"#);
    assert!(matches!(ks[1], TokenKind::Identifier(ref s) if s == "job"));
}

#[test]
fn bare_metric_name_is_metric_identifier() {
    let ks = kinds("http_requests_total");
    assert!(matches!(ks[0], TokenKind::MetricIdentifier(ref s) if s == "http_requests_total"));
}

#[test]
fn aggregate_keyword_is_its_own_token_kind() {
    let ks = kinds("sum(x)");
    assert!(matches!(ks[0], TokenKind::AggregateOp(ref s) if s == "sum"));
}

#[test]
fn nested_braces_are_rejected() {
    assert!(tokenize("{a=\"1\", {b=\"2\"}}").is_err());
}

#[test]
fn comment_is_tokenized_but_filtered_downstream() {
    let tokens = tokenize("1 # a comment\n+ 2").unwrap();
    assert!(tokens.iter().any(|t| matches!(t.kind, TokenKind::Comment(_))));
}
