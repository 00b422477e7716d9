//! String literal scanning for `'...'`, `"..."`, and `` `...` `` forms.
//!
//! Unicode/hex/octal escapes are not part of this grammar (non-goal);
//! only the seven simple C escapes plus backslash- and quote-escaping are
//! recognized inside single/double-quoted strings.

use nom::{
    IResult, Parser,
    branch::alt,
    character::complete::{anychar, char, none_of},
    combinator::map,
    multi::many0,
    sequence::delimited,
};

use crate::token::Quote;

fn simple_escape(quote: char) -> impl Fn(&str) -> IResult<&str, char> {
    move |input: &str| {
        let (rest, _) = char('\\')(input)?;
        let (rest, escaped) = anychar(rest)?;
        let resolved = match escaped {
            'a' => '\u{07}',
            'b' => '\u{08}',
            'f' => '\u{0C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{0B}',
            '\\' => '\\',
            c if c == quote => quote,
            _ => {
                return Err(nom::Err::Error(nom::error::Error::new(
                    input,
                    nom::error::ErrorKind::EscapedTransform,
                )));
            }
        };
        Ok((rest, resolved))
    }
}

fn quoted_string(quote: char) -> impl Fn(&str) -> IResult<&str, String> {
    move |input: &str| {
        map(
            delimited(
                char(quote),
                many0(alt((simple_escape(quote), none_of([quote, '\\', '\n'])))),
                char(quote),
            ),
            |chars: Vec<char>| chars.into_iter().collect(),
        )
        .parse(input)
    }
}

fn backtick_string(input: &str) -> IResult<&str, String> {
    map(
        delimited(char('`'), many0(none_of(['`'])), char('`')),
        |chars: Vec<char>| chars.into_iter().collect(),
    )
    .parse(input)
}

/// Scan a string literal of any of the three quote styles.
pub fn string_literal(input: &str) -> IResult<&str, (Quote, String)> {
    alt((
        map(quoted_string('"'), |s| (Quote::Double, s)),
        map(quoted_string('\''), |s| (Quote::Single, s)),
        map(backtick_string, |s| (Quote::Backtick, s)),
    ))
    .parse(input)
}
