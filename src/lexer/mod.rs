//! Hand-written lexer (§4.1): a small state machine that walks the input
//! byte-by-byte, tracking bracket depth and brace mode, delegating literal
//! recognition to the sub-scanners below.

pub mod duration;
pub mod identifier;
pub mod number;
pub mod string;

use crate::error::{LexError, Span};
use crate::token::{Quote, Token, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    Brace,
}

/// Tracks byte offset plus 1-based line/column as the lexer advances; the
/// only mutable state in the whole module (kept on the stack, per §5's
/// reentrancy requirement — nothing here is shared between calls).
struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor {
            input,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn span(&self, length: usize) -> Span {
        Span::new(self.pos, self.line, self.column, length)
    }

    fn advance(&mut self, consumed: &str) {
        for c in consumed.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.pos += consumed.len();
    }
}

/// Lex `input` into a token sequence, `COMMENT` tokens included. Callers
/// that want the grammar-level stream (see [`crate::parser`]) filter
/// comments out themselves, per §4.2.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut cursor = Cursor::new(input);
    let mut mode = Mode::Normal;
    let mut bracket_depth = 0u8;
    let mut paren_depth = 0u32;
    let mut tokens = Vec::new();

    loop {
        skip_whitespace(&mut cursor);
        if cursor.is_eof() {
            break;
        }
        let rest = cursor.rest();
        let c = rest.chars().next().expect("checked not eof");

        match c {
            '#' => {
                let len = rest.find('\n').unwrap_or(rest.len());
                let text = &rest[..len];
                tokens.push(Token::new(
                    TokenKind::Comment(text[1..].to_string()),
                    cursor.span(len),
                ));
                cursor.advance(text);
            }
            '{' => {
                if mode == Mode::Brace {
                    return Err(LexError::new("unexpected left brace", cursor.span(1)));
                }
                mode = Mode::Brace;
                tokens.push(Token::new(TokenKind::LeftBrace, cursor.span(1)));
                cursor.advance(&rest[..1]);
            }
            '}' => {
                if mode != Mode::Brace {
                    return Err(LexError::new("unexpected right brace", cursor.span(1)));
                }
                mode = Mode::Normal;
                tokens.push(Token::new(TokenKind::RightBrace, cursor.span(1)));
                cursor.advance(&rest[..1]);
            }
            '[' => {
                if bracket_depth == 1 {
                    return Err(LexError::new("unexpected left bracket", cursor.span(1)));
                }
                bracket_depth = 1;
                tokens.push(Token::new(TokenKind::LeftBracket, cursor.span(1)));
                cursor.advance(&rest[..1]);
            }
            ']' => {
                if bracket_depth == 0 {
                    return Err(LexError::new("unexpected right bracket", cursor.span(1)));
                }
                bracket_depth = 0;
                tokens.push(Token::new(TokenKind::RightBracket, cursor.span(1)));
                cursor.advance(&rest[..1]);
            }
            '(' => {
                paren_depth += 1;
                tokens.push(Token::new(TokenKind::LeftParen, cursor.span(1)));
                cursor.advance(&rest[..1]);
            }
            ')' => {
                if paren_depth == 0 {
                    return Err(LexError::new("unexpected right parenthesis", cursor.span(1)));
                }
                paren_depth -= 1;
                tokens.push(Token::new(TokenKind::RightParen, cursor.span(1)));
                cursor.advance(&rest[..1]);
            }
            ',' => push_single(&mut tokens, &mut cursor, rest, TokenKind::Comma),
            ';' => push_single(&mut tokens, &mut cursor, rest, TokenKind::Semicolon),
            ':' => {
                if bracket_depth == 1 {
                    push_single(&mut tokens, &mut cursor, rest, TokenKind::Colon);
                } else {
                    return Err(LexError::new("unexpected ':' outside of brackets", cursor.span(1)));
                }
            }
            '=' => {
                if rest.starts_with("==") {
                    push_n(&mut tokens, &mut cursor, rest, 2, TokenKind::EqEq);
                } else if rest.starts_with("=~") {
                    push_n(&mut tokens, &mut cursor, rest, 2, TokenKind::RegexMatch);
                } else {
                    push_single(&mut tokens, &mut cursor, rest, TokenKind::Assign);
                }
            }
            '!' => {
                if rest.starts_with("!=") {
                    push_n(&mut tokens, &mut cursor, rest, 2, TokenKind::NotEq);
                } else if rest.starts_with("!~") {
                    push_n(&mut tokens, &mut cursor, rest, 2, TokenKind::RegexNotMatch);
                } else {
                    return Err(LexError::new("unexpected character after '!'", cursor.span(1)));
                }
            }
            '<' => {
                if rest.starts_with("<=") {
                    push_n(&mut tokens, &mut cursor, rest, 2, TokenKind::Le);
                } else {
                    push_single(&mut tokens, &mut cursor, rest, TokenKind::Lt);
                }
            }
            '>' => {
                if rest.starts_with(">=") {
                    push_n(&mut tokens, &mut cursor, rest, 2, TokenKind::Ge);
                } else {
                    push_single(&mut tokens, &mut cursor, rest, TokenKind::Gt);
                }
            }
            '+' => push_single(&mut tokens, &mut cursor, rest, TokenKind::Add),
            '-' => push_single(&mut tokens, &mut cursor, rest, TokenKind::Sub),
            '*' => push_single(&mut tokens, &mut cursor, rest, TokenKind::Star),
            '/' => push_single(&mut tokens, &mut cursor, rest, TokenKind::Slash),
            '%' => push_single(&mut tokens, &mut cursor, rest, TokenKind::Percent),
            '^' => push_single(&mut tokens, &mut cursor, rest, TokenKind::Caret),
            '@' => push_single(&mut tokens, &mut cursor, rest, TokenKind::At),
            '\'' | '"' | '`' => match string::string_literal(rest) {
                Ok((remaining, (quote, value))) => {
                    let consumed_len = rest.len() - remaining.len();
                    let text = &rest[..consumed_len];
                    tokens.push(Token::new(
                        TokenKind::StringLiteral(quote, value),
                        cursor.span(consumed_len),
                    ));
                    cursor.advance(text);
                }
                Err(_) => return Err(LexError::new("unterminated string literal", cursor.span(1))),
            },
            c if c.is_ascii_digit() || c == '.' => lex_number_or_duration(&mut tokens, &mut cursor, rest)?,
            c if c.is_ascii_alphabetic() || c == '_' => {
                let (remaining, name) = identifier::raw_identifier(rest).expect("already matched identifier start");
                let consumed_len = rest.len() - remaining.len();
                let kind = classify_identifier(name, mode);
                tokens.push(Token::new(kind, cursor.span(consumed_len)));
                cursor.advance(&rest[..consumed_len]);
            }
            other => {
                return Err(LexError::new(
                    format!("unexpected character '{other}'"),
                    cursor.span(other.len_utf8()),
                ));
            }
        }
    }

    if paren_depth > 0 {
        return Err(LexError::new("unclosed left parenthesis", cursor.span(0)));
    }
    if mode == Mode::Brace {
        return Err(LexError::new("unexpected end of input inside braces", cursor.span(0)));
    }

    tokens.push(Token::new(TokenKind::Eof, cursor.span(0)));
    Ok(tokens)
}

fn skip_whitespace(cursor: &mut Cursor<'_>) {
    let rest = cursor.rest();
    let ws_len: usize = rest
        .chars()
        .take_while(|c| matches!(c, ' ' | '\t' | '\n' | '\r'))
        .map(|c| c.len_utf8())
        .sum();
    if ws_len > 0 {
        let consumed = rest[..ws_len].to_string();
        cursor.advance(&consumed);
    }
}

fn push_single(tokens: &mut Vec<Token>, cursor: &mut Cursor<'_>, rest: &str, kind: TokenKind) {
    tokens.push(Token::new(kind, cursor.span(1)));
    cursor.advance(&rest[..1]);
}

fn push_n(tokens: &mut Vec<Token>, cursor: &mut Cursor<'_>, rest: &str, n: usize, kind: TokenKind) {
    tokens.push(Token::new(kind, cursor.span(n)));
    cursor.advance(&rest[..n]);
}

/// A duration match is preferred over a number match whenever one exists
/// (§4.1 point 6): `5m` is a `DURATION`, `5` is a `NUMBER`.
fn lex_number_or_duration(tokens: &mut Vec<Token>, cursor: &mut Cursor<'_>, rest: &str) -> Result<(), LexError> {
    if let Ok((remaining, nanos)) = duration::duration_nanos(rest) {
        let consumed_len = rest.len() - remaining.len();
        let text = rest[..consumed_len].to_string();
        tokens.push(Token::new(TokenKind::Duration(nanos), cursor.span(consumed_len)));
        cursor.advance(&text);
        return Ok(());
    }
    if let Ok((remaining, value)) = number::number_literal(rest) {
        let consumed_len = rest.len() - remaining.len();
        let text = rest[..consumed_len].to_string();
        tokens.push(Token::new(TokenKind::Number(value), cursor.span(consumed_len)));
        cursor.advance(&text);
        return Ok(());
    }
    Err(LexError::new("invalid number or duration literal", cursor.span(1)))
}

fn classify_identifier(name: &str, mode: Mode) -> TokenKind {
    if mode == Mode::Brace {
        return TokenKind::Identifier(name.to_string());
    }
    if name.contains(':') {
        return TokenKind::MetricIdentifier(name.to_string());
    }
    if identifier::is_aggregate_op(name) {
        return TokenKind::AggregateOp(name.to_string());
    }
    if let Some(keyword) = identifier::lookup_keyword(name) {
        return TokenKind::Keyword(keyword);
    }
    if let Ok(("", value)) = number::special_float(name) {
        return TokenKind::Number(value);
    }
    TokenKind::Identifier(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Keyword;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lexes_simple_selector() {
        let kinds = kinds(r#"http_requests{job="api"}"#);
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier("http_requests".into()),
                TokenKind::LeftBrace,
                TokenKind::Identifier("job".into()),
                TokenKind::Assign,
                TokenKind::StringLiteral(Quote::Double, "api".into()),
                TokenKind::RightBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn brace_mode_disables_keyword_classification() {
        let kinds = kinds(r#"{on="x"}"#);
        assert_eq!(
            kinds,
            vec![
                TokenKind::LeftBrace,
                TokenKind::Identifier("on".into()),
                TokenKind::Assign,
                TokenKind::StringLiteral(Quote::Double, "x".into()),
                TokenKind::RightBrace,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn normal_mode_classifies_keywords() {
        let kinds = kinds("a offset 5m");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier("a".into()),
                TokenKind::Keyword(Keyword::Offset),
                TokenKind::Duration(5 * 60 * 1_000_000_000),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn duration_preferred_over_number() {
        let kinds = kinds("5m");
        assert_eq!(kinds, vec![TokenKind::Duration(5 * 60 * 1_000_000_000), TokenKind::Eof]);
    }

    #[test]
    fn plain_number_without_unit() {
        let kinds = kinds("5");
        assert_eq!(kinds, vec![TokenKind::Number(5.0), TokenKind::Eof]);
    }

    #[test]
    fn comments_are_emitted_as_tokens() {
        let kinds = kinds("1 # trailing comment");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Number(1.0),
                TokenKind::Comment(" trailing comment".into()),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn nested_brace_is_an_error() {
        assert!(tokenize("{a={}}").is_err());
    }

    #[test]
    fn nested_bracket_is_an_error() {
        assert!(tokenize("a[1m[1m]]").is_err());
    }

    #[test]
    fn unmatched_right_bracket_is_an_error() {
        assert!(tokenize("a]").is_err());
    }

    #[test]
    fn unclosed_paren_is_an_error() {
        assert!(tokenize("(1 + 2").is_err());
    }

    #[test]
    fn unclosed_brace_is_an_error() {
        assert!(tokenize("{a=\"b\"").is_err());
    }

    #[test]
    fn bad_bang_is_an_error() {
        assert!(tokenize("a !b").is_err());
    }

    #[test]
    fn colon_outside_brackets_is_an_error() {
        assert!(tokenize("a:b").is_ok()); // metric identifier, not a bare colon
        assert!(tokenize("a : b").is_err());
    }

    #[test]
    fn two_char_operators_are_recognized() {
        let kinds = kinds("a == b != c <= d >= e =~ f !~ g");
        assert!(kinds.contains(&TokenKind::EqEq));
        assert!(kinds.contains(&TokenKind::NotEq));
        assert!(kinds.contains(&TokenKind::Le));
        assert!(kinds.contains(&TokenKind::Ge));
        assert!(kinds.contains(&TokenKind::RegexMatch));
        assert!(kinds.contains(&TokenKind::RegexNotMatch));
    }
}
