//! The closed AST (§3.3): twelve expression variants plus the auxiliary
//! nodes they're built from.

use std::fmt;

use crate::catalog::{AggregateOperator, Function};
use crate::error::Span;

/// PromQL's four-type value system, plus `None` for untyped/placeholder
/// use (§3.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    None,
    Scalar,
    Vector,
    Matrix,
    String,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::None => "none",
            ValueType::Scalar => "scalar",
            ValueType::Vector => "instant vector",
            ValueType::Matrix => "range vector",
            ValueType::String => "string",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMatchOp {
    Equal,
    NotEqual,
    Regexp,
    NotRegexp,
}

impl LabelMatchOp {
    pub fn as_str(self) -> &'static str {
        match self {
            LabelMatchOp::Equal => "=",
            LabelMatchOp::NotEqual => "!=",
            LabelMatchOp::Regexp => "=~",
            LabelMatchOp::NotRegexp => "!~",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricIdentifier {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelMatcher {
    pub name: String,
    pub op: LabelMatchOp,
    pub value: String,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LabelMatchers {
    pub matchers: Vec<LabelMatcher>,
}

/// A duration in nanoseconds (§3.3). May be negative only when attached
/// to an `OffsetExpr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration {
    pub nanoseconds: i64,
}

impl Duration {
    pub fn from_nanos(nanoseconds: i64) -> Self {
        Duration { nanoseconds }
    }

    pub fn negate(self) -> Self {
        Duration {
            nanoseconds: -self.nanoseconds,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    OneToOne,
    ManyToOne,
    OneToMany,
}

/// Unified vector-matching modifier (§3.3): `on`/`ignoring` label list,
/// `group_left`/`group_right` cardinality and its include-labels, and the
/// `bool` comparison flag, all in one struct.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorMatching {
    pub cardinality: Cardinality,
    pub matching_labels: Vec<String>,
    pub on: bool,
    pub include_labels: Vec<String>,
    pub return_bool: bool,
}

impl Default for VectorMatching {
    fn default() -> Self {
        VectorMatching {
            cardinality: Cardinality::OneToOne,
            matching_labels: Vec::new(),
            on: false,
            include_labels: Vec::new(),
            return_bool: false,
        }
    }
}

impl VectorMatching {
    pub fn is_default(&self) -> bool {
        self.cardinality == Cardinality::OneToOne
            && self.matching_labels.is_empty()
            && !self.on
            && self.include_labels.is_empty()
            && !self.return_bool
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Unless,
    Atan2,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "^",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Unless => "unless",
            BinaryOp::Atan2 => "atan2",
        }
    }

    /// §4.2: six tiers, highest to lowest, all left-associative.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Pow => 6,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod | BinaryOp::Atan2 => 5,
            BinaryOp::Add | BinaryOp::Sub => 4,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => 3,
            BinaryOp::And | BinaryOp::Unless => 2,
            BinaryOp::Or => 1,
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge
        )
    }

    pub fn is_set_operator(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or | BinaryOp::Unless)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Add,
    Sub,
}

impl UnaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Add => "+",
            UnaryOp::Sub => "-",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringQuote {
    Double,
    Single,
    Backtick,
}

impl StringQuote {
    pub fn as_char(self) -> char {
        match self {
            StringQuote::Double => '"',
            StringQuote::Single => '\'',
            StringQuote::Backtick => '`',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VectorSelector {
    pub metric: Option<MetricIdentifier>,
    pub matchers: Option<LabelMatchers>,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatrixSelector {
    pub vector: VectorSelector,
    pub range: Duration,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubqueryExpr {
    pub inner: Box<Expr>,
    pub range: Duration,
    pub step: Option<Duration>,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OffsetExpr {
    pub inner: Box<Expr>,
    pub offset: Duration,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParenExpression {
    pub inner: Box<Expr>,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub inner: Box<Expr>,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub function: Function,
    pub args: Vec<Expr>,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateExpr {
    pub op: AggregateOperator,
    pub expr: Box<Expr>,
    pub param: Option<Box<Expr>>,
    pub grouping_labels: Vec<String>,
    pub without: bool,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
    pub op: BinaryOp,
    pub matching: Option<VectorMatching>,
    pub span: Option<Span>,
}

/// The closed sum type (§3.3). Every consumer that matches on `Expr` MUST
/// handle all twelve variants exhaustively — that discipline is what
/// keeps the visitor, printer, and type checker mutually consistent
/// (§9).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    NumberLiteral {
        value: f64,
        span: Option<Span>,
    },
    StringLiteral {
        quote: StringQuote,
        value: String,
        span: Option<Span>,
    },
    VectorSelector(VectorSelector),
    MatrixSelector(MatrixSelector),
    SubqueryExpr(SubqueryExpr),
    OffsetExpr(OffsetExpr),
    ParenExpression(ParenExpression),
    UnaryExpr(UnaryExpr),
    FunctionCall(FunctionCall),
    AggregateExpr(AggregateExpr),
    BinaryExpr(BinaryExpr),
}

impl Expr {
    pub fn span(&self) -> Option<Span> {
        match self {
            Expr::NumberLiteral { span, .. } => *span,
            Expr::StringLiteral { span, .. } => *span,
            Expr::VectorSelector(v) => v.span,
            Expr::MatrixSelector(m) => m.span,
            Expr::SubqueryExpr(s) => s.span,
            Expr::OffsetExpr(o) => o.span,
            Expr::ParenExpression(p) => p.span,
            Expr::UnaryExpr(u) => u.span,
            Expr::FunctionCall(c) => c.span,
            Expr::AggregateExpr(a) => a.span,
            Expr::BinaryExpr(b) => b.span,
        }
    }

    /// The variant's name, for error messages and debugging.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Expr::NumberLiteral { .. } => "NumberLiteral",
            Expr::StringLiteral { .. } => "StringLiteral",
            Expr::VectorSelector(_) => "VectorSelector",
            Expr::MatrixSelector(_) => "MatrixSelector",
            Expr::SubqueryExpr(_) => "SubqueryExpr",
            Expr::OffsetExpr(_) => "OffsetExpr",
            Expr::ParenExpression(_) => "ParenExpression",
            Expr::UnaryExpr(_) => "UnaryExpr",
            Expr::FunctionCall(_) => "FunctionCall",
            Expr::AggregateExpr(_) => "AggregateExpr",
            Expr::BinaryExpr(_) => "BinaryExpr",
        }
    }
}
