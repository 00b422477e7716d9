//! Canonical single-line printer (§4.4): renders an AST back to PromQL
//! text via a `Display`-style traversal, not the [`crate::visitor`] trait
//! (the visitor is the *external* contract; the printer's own recursion
//! needs return values, which a visit-only interface doesn't give it).

use std::fmt::Write as _;

use crate::ast::{
    AggregateExpr, BinaryExpr, Duration, Expr, LabelMatchers, MatrixSelector, OffsetExpr, ParenExpression,
    StringQuote, SubqueryExpr, UnaryExpr, VectorMatching, VectorSelector,
};

/// `to_promql(node) -> string` (§6), implemented for any node with a
/// [`ToPromql`] impl.
pub fn to_promql(node: &impl ToPromql) -> String {
    let mut out = String::new();
    node.write_promql(&mut out);
    out
}

pub trait ToPromql {
    fn write_promql(&self, out: &mut String);
}

impl ToPromql for Expr {
    fn write_promql(&self, out: &mut String) {
        match self {
            Expr::NumberLiteral { value, .. } => write_number(out, *value),
            Expr::StringLiteral { quote, value, .. } => write_string(out, *quote, value),
            Expr::VectorSelector(v) => v.write_promql(out),
            Expr::MatrixSelector(m) => m.write_promql(out),
            Expr::SubqueryExpr(s) => s.write_promql(out),
            Expr::OffsetExpr(o) => o.write_promql(out),
            Expr::ParenExpression(p) => p.write_promql(out),
            Expr::UnaryExpr(u) => u.write_promql(out),
            Expr::FunctionCall(c) => {
                out.push_str(c.function.name);
                out.push('(');
                for (i, arg) in c.args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    arg.write_promql(out);
                }
                out.push(')');
            }
            Expr::AggregateExpr(a) => a.write_promql(out),
            Expr::BinaryExpr(b) => b.write_promql(out),
        }
    }
}

fn write_number(out: &mut String, value: f64) {
    if value.is_nan() {
        out.push_str("NaN");
    } else if value == f64::INFINITY {
        out.push_str("Inf");
    } else if value == f64::NEG_INFINITY {
        out.push_str("-Inf");
    } else {
        // `{}` on f64 already produces the shortest round-trippable
        // decimal in Rust, locale-independent.
        let _ = write!(out, "{value}");
    }
}

fn write_string(out: &mut String, quote: StringQuote, value: &str) {
    if quote == StringQuote::Backtick {
        out.push('`');
        out.push_str(value);
        out.push('`');
        return;
    }
    let q = quote.as_char();
    out.push(q);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0B}' => out.push_str("\\v"),
            c if c == q => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(q);
}

impl ToPromql for Duration {
    fn write_promql(&self, out: &mut String) {
        let mut nanos = self.nanoseconds;
        if nanos == 0 {
            out.push_str("0s");
            return;
        }
        if nanos < 0 {
            out.push('-');
            nanos = -nanos;
        }
        const NS_PER_MS: i64 = 1_000_000;
        const NS_PER_S: i64 = 1_000 * NS_PER_MS;
        const NS_PER_M: i64 = 60 * NS_PER_S;
        const NS_PER_H: i64 = 60 * NS_PER_M;
        const NS_PER_D: i64 = 24 * NS_PER_H;

        let days = nanos / NS_PER_D;
        nanos %= NS_PER_D;
        let hours = nanos / NS_PER_H;
        nanos %= NS_PER_H;
        let minutes = nanos / NS_PER_M;
        nanos %= NS_PER_M;
        let seconds = nanos / NS_PER_S;
        nanos %= NS_PER_S;
        let millis = nanos / NS_PER_MS;

        if days > 0 {
            let _ = write!(out, "{days}d");
        }
        if hours > 0 {
            let _ = write!(out, "{hours}h");
        }
        if minutes > 0 {
            let _ = write!(out, "{minutes}m");
        }
        if seconds > 0 {
            let _ = write!(out, "{seconds}s");
        }
        if millis > 0 {
            let _ = write!(out, "{millis}ms");
        }
    }
}

impl ToPromql for LabelMatchers {
    fn write_promql(&self, out: &mut String) {
        out.push('{');
        for (i, m) in self.matchers.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}{}", m.name, m.op.as_str());
            write_string(out, StringQuote::Double, &m.value);
        }
        out.push('}');
    }
}

impl ToPromql for VectorSelector {
    fn write_promql(&self, out: &mut String) {
        if let Some(metric) = &self.metric {
            out.push_str(&metric.name);
        }
        if let Some(matchers) = &self.matchers {
            matchers.write_promql(out);
        }
    }
}

impl ToPromql for MatrixSelector {
    fn write_promql(&self, out: &mut String) {
        self.vector.write_promql(out);
        out.push('[');
        self.range.write_promql(out);
        out.push(']');
    }
}

impl ToPromql for SubqueryExpr {
    fn write_promql(&self, out: &mut String) {
        write_parenthesized_if_binary(out, &self.inner);
        out.push('[');
        self.range.write_promql(out);
        out.push(':');
        if let Some(step) = &self.step {
            step.write_promql(out);
        }
        out.push(']');
    }
}

impl ToPromql for OffsetExpr {
    fn write_promql(&self, out: &mut String) {
        write_parenthesized_if_binary(out, &self.inner);
        out.push_str(" offset ");
        self.offset.write_promql(out);
    }
}

impl ToPromql for ParenExpression {
    fn write_promql(&self, out: &mut String) {
        out.push('(');
        self.inner.write_promql(out);
        out.push(')');
    }
}

impl ToPromql for UnaryExpr {
    fn write_promql(&self, out: &mut String) {
        out.push_str(self.op.as_str());
        self.inner.write_promql(out);
    }
}

impl ToPromql for VectorMatching {
    fn write_promql(&self, out: &mut String) {
        use crate::ast::Cardinality;
        if self.is_default() {
            return;
        }
        let mut wrote_any = false;
        if self.return_bool {
            out.push_str("bool");
            wrote_any = true;
        }
        if !self.matching_labels.is_empty() || self.on {
            if wrote_any {
                out.push(' ');
            }
            out.push_str(if self.on { "on" } else { "ignoring" });
            out.push('(');
            out.push_str(&self.matching_labels.join(", "));
            out.push(')');
            wrote_any = true;
        }
        if self.cardinality != Cardinality::OneToOne {
            if wrote_any {
                out.push(' ');
            }
            out.push_str(match self.cardinality {
                Cardinality::ManyToOne => "group_left",
                Cardinality::OneToMany => "group_right",
                Cardinality::OneToOne => unreachable!(),
            });
            if !self.include_labels.is_empty() {
                out.push('(');
                out.push_str(&self.include_labels.join(", "));
                out.push(')');
            }
        }
    }
}

impl ToPromql for AggregateExpr {
    fn write_promql(&self, out: &mut String) {
        out.push_str(self.op.as_str());
        if !self.grouping_labels.is_empty() || self.without {
            out.push(' ');
            out.push_str(if self.without { "without" } else { "by" });
            out.push('(');
            out.push_str(&self.grouping_labels.join(", "));
            out.push(')');
            out.push(' ');
        }
        out.push('(');
        if let Some(param) = &self.param {
            param.write_promql(out);
            out.push_str(", ");
        }
        self.expr.write_promql(out);
        out.push(')');
    }
}

impl ToPromql for BinaryExpr {
    fn write_promql(&self, out: &mut String) {
        self.lhs.write_promql(out);
        out.push(' ');
        out.push_str(self.op.as_str());
        out.push(' ');
        if let Some(matching) = &self.matching {
            if !matching.is_default() {
                matching.write_promql(out);
                out.push(' ');
            }
        }
        self.rhs.write_promql(out);
    }
}

/// A binary expression used as a subquery/offset base needs its own
/// parentheses since precedence isn't re-derivable once printed flat.
fn write_parenthesized_if_binary(out: &mut String, inner: &Expr) {
    if matches!(inner, Expr::BinaryExpr(_)) {
        out.push('(');
        inner.write_promql(out);
        out.push(')');
    } else {
        inner.write_promql(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expression;

    fn roundtrip(input: &str) -> String {
        to_promql(&parse_expression(input).unwrap())
    }

    #[test]
    fn prints_simple_selector() {
        assert_eq!(roundtrip(r#"http_requests{job="api"}"#), r#"http_requests{job="api"}"#);
    }

    #[test]
    fn prints_offset() {
        assert_eq!(roundtrip("metric offset 5m"), "metric offset 5m");
    }

    #[test]
    fn duration_never_emits_weeks_or_years() {
        let d = Duration::from_nanos(7 * 24 * 3_600_000_000_000);
        assert_eq!(to_promql(&d), "7d");
    }

    #[test]
    fn negative_duration_keeps_leading_minus() {
        let d = Duration::from_nanos(-90_000_000_000);
        assert_eq!(to_promql(&d), "-1m30s");
    }

    #[test]
    fn escapes_quotes_and_backslashes() {
        let expr = parse_expression(r#"{a="x\"y"}"#).unwrap();
        assert_eq!(to_promql(&expr), r#"{a="x\"y"}"#);
    }

    #[test]
    fn backtick_strings_print_verbatim() {
        let expr = parse_expression(r"label_replace(a, `b`, `c`, `d`, `e`)").unwrap();
        assert!(to_promql(&expr).contains('`'));
    }

    #[test]
    fn aggregate_by_is_printed() {
        assert_eq!(
            roundtrip("sum by(job) (rate(a[5m]))"),
            "sum by(job) (rate(a[5m]))"
        );
    }

    #[test]
    fn aggregate_without_grouping_has_no_space_before_paren() {
        assert_eq!(roundtrip("sum(metric)"), "sum(metric)");
        assert_eq!(roundtrip("quantile(0.5, metric)"), "quantile(0.5, metric)");
    }

    #[test]
    fn printer_idempotence() {
        let input = "(a{x=\"1\"}[1h][1d:5m]) + -vector(b offset 5m)";
        let once = roundtrip(input);
        let twice = to_promql(&parse_expression(&once).unwrap());
        assert_eq!(once, twice);
    }
}
