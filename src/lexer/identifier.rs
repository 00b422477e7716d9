//! Identifier scanning and keyword/aggregate-op classification.

use nom::{IResult, Parser, combinator::recognize, sequence::pair};

use crate::token::Keyword;

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_metric_continue(c: char) -> bool {
    is_ident_continue(c) || c == ':'
}

/// `[A-Za-z_][A-Za-z0-9_:]*` — the raw identifier lexeme, before
/// classification into `IDENTIFIER`/`METRIC_IDENTIFIER`/keyword/aggregate.
pub fn raw_identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        nom::character::complete::satisfy(is_ident_start),
        nom::bytes::complete::take_while(is_metric_continue),
    ))
    .parse(input)
}

const AGGREGATE_OPS: &[&str] = &[
    "sum",
    "avg",
    "max",
    "min",
    "count",
    "stddev",
    "stdvar",
    "group",
    "topk",
    "bottomk",
    "quantile",
    "count_values",
    "limitk",
    "limit_ratio",
];

pub fn is_aggregate_op(name: &str) -> bool {
    AGGREGATE_OPS.iter().any(|op| op.eq_ignore_ascii_case(name))
}

pub fn lookup_keyword(name: &str) -> Option<Keyword> {
    Some(if name.eq_ignore_ascii_case("and") {
        Keyword::And
    } else if name.eq_ignore_ascii_case("or") {
        Keyword::Or
    } else if name.eq_ignore_ascii_case("unless") {
        Keyword::Unless
    } else if name.eq_ignore_ascii_case("atan2") {
        Keyword::Atan2
    } else if name.eq_ignore_ascii_case("offset") {
        Keyword::Offset
    } else if name.eq_ignore_ascii_case("by") {
        Keyword::By
    } else if name.eq_ignore_ascii_case("without") {
        Keyword::Without
    } else if name.eq_ignore_ascii_case("on") {
        Keyword::On
    } else if name.eq_ignore_ascii_case("ignoring") {
        Keyword::Ignoring
    } else if name.eq_ignore_ascii_case("group_left") {
        Keyword::GroupLeft
    } else if name.eq_ignore_ascii_case("group_right") {
        Keyword::GroupRight
    } else if name.eq_ignore_ascii_case("bool") {
        Keyword::Bool
    } else {
        return None;
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_identifier() {
        assert_eq!(raw_identifier("foo_bar1 "), Ok((" ", "foo_bar1")));
    }

    #[test]
    fn parses_metric_identifier_with_colon() {
        assert_eq!(
            raw_identifier("task:errors:rate10s "),
            Ok((" ", "task:errors:rate10s"))
        );
    }

    #[test]
    fn rejects_leading_digit() {
        assert!(raw_identifier("1abc").is_err());
    }

    #[test]
    fn keyword_lookup_is_case_insensitive() {
        assert_eq!(lookup_keyword("OFFSET"), Some(Keyword::Offset));
        assert_eq!(lookup_keyword("And"), Some(Keyword::And));
        assert_eq!(lookup_keyword("not_a_keyword"), None);
    }

    #[test]
    fn aggregate_op_lookup_is_case_insensitive() {
        assert!(is_aggregate_op("SUM"));
        assert!(is_aggregate_op("quantile"));
        assert!(!is_aggregate_op("rate"));
    }
}
