//! Numeric literal scanning.
//!
//! Only decimal numbers are recognized: integers, fractions, a leading
//! dot, and scientific notation. Hexadecimal and octal literals are not
//! part of this grammar (non-goal).

use nom::{
    IResult, Parser,
    branch::alt,
    character::complete::{char, digit0, digit1, one_of},
    combinator::{opt, recognize},
    sequence::pair,
};

fn decimal_float_inner(input: &str) -> IResult<&str, &str> {
    alt((
        // leading dot: `.5`
        recognize(pair(char('.'), digit1)),
        // digits, optional `.digits`, required exponent: `1e10`, `1.5e-3`
        recognize((
            digit1,
            opt(pair(char('.'), digit0)),
            pair(one_of("eE"), pair(opt(one_of("+-")), digit1)),
        )),
        // digits with dot, no exponent: `1.5`
        recognize(pair(digit1, pair(char('.'), digit0))),
        // plain integer
        digit1,
    ))
    .parse(input)
}

/// Scan a decimal number at the start of `input`.
pub fn number_literal(input: &str) -> IResult<&str, f64> {
    let (rest, text) = decimal_float_inner(input)?;
    let value = text
        .parse::<f64>()
        .expect("decimal_float_inner only matches valid float syntax");
    Ok((rest, value))
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `Inf`/`NaN`, case-insensitive, reached via the identifier path. Must
/// not match a prefix of a longer identifier (`Infoo` is not a number).
pub fn special_float(input: &str) -> IResult<&str, f64> {
    for (word, value) in [("inf", f64::INFINITY), ("nan", f64::NAN)] {
        if input.len() >= word.len() && input.as_bytes()[..word.len()].eq_ignore_ascii_case(word.as_bytes()) {
            let after = &input[word.len()..];
            if !after.chars().next().is_some_and(is_ident_continue) {
                return Ok((after, value));
            }
        }
    }
    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Tag,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integers() {
        assert_eq!(number_literal("42"), Ok(("", 42.0)));
    }

    #[test]
    fn parses_fractions() {
        assert_eq!(number_literal("3.14"), Ok(("", 3.14)));
    }

    #[test]
    fn parses_leading_dot() {
        assert_eq!(number_literal(".5"), Ok(("", 0.5)));
    }

    #[test]
    fn parses_exponent_without_dot() {
        assert_eq!(number_literal("1e10"), Ok(("", 1e10)));
    }

    #[test]
    fn parses_exponent_with_dot() {
        assert_eq!(number_literal("1.5e-3"), Ok(("", 1.5e-3)));
    }

    #[test]
    fn stops_before_hex_suffix() {
        // `0` is a plain integer; `x1` is left for the caller to fail on,
        // since hex literals are not part of this grammar.
        let (rest, value) = number_literal("0x1").unwrap();
        assert_eq!(value, 0.0);
        assert_eq!(rest, "x1");
    }

    #[test]
    fn special_floats_case_insensitive() {
        assert_eq!(special_float("Inf"), Ok(("", f64::INFINITY)));
        assert_eq!(special_float("INF"), Ok(("", f64::INFINITY)));
        assert!(special_float("NaN").unwrap().1.is_nan());
    }

    #[test]
    fn special_float_rejects_prefix_of_longer_identifier() {
        assert!(special_float("Infoo").is_err());
    }
}
