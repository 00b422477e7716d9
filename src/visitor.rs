//! A polymorphic visitor over [`Expr`] (§6 "visitor hook"): external tools
//! implement this to write analyses without touching the core parser.

use crate::ast::{
    AggregateExpr, BinaryExpr, Expr, MatrixSelector, OffsetExpr, ParenExpression, SubqueryExpr, UnaryExpr,
    VectorSelector,
};

/// One method per `Expr` variant, called on the way down (`pre_visit`) and
/// the way back up (`post_visit`) of a depth-first walk. Default bodies do
/// nothing, so implementors only override what they need.
pub trait ExprVisitor {
    fn pre_visit(&mut self, _expr: &Expr) {}
    fn post_visit(&mut self, _expr: &Expr) {}

    fn visit_number_literal(&mut self, _value: f64) {}
    fn visit_string_literal(&mut self, _value: &str) {}
    fn visit_vector_selector(&mut self, _selector: &VectorSelector) {}
    fn visit_matrix_selector(&mut self, _selector: &MatrixSelector) {}
    fn visit_subquery(&mut self, _subquery: &SubqueryExpr) {}
    fn visit_offset(&mut self, _offset: &OffsetExpr) {}
    fn visit_paren(&mut self, _paren: &ParenExpression) {}
    fn visit_unary(&mut self, _unary: &UnaryExpr) {}
    fn visit_function_call(&mut self, _call: &crate::ast::FunctionCall) {}
    fn visit_aggregate(&mut self, _aggregate: &AggregateExpr) {}
    fn visit_binary(&mut self, _binary: &BinaryExpr) {}
}

/// Depth-first traversal driving a visitor's per-variant hooks plus its
/// `pre_visit`/`post_visit` pair.
pub fn walk<V: ExprVisitor + ?Sized>(visitor: &mut V, expr: &Expr) {
    visitor.pre_visit(expr);
    match expr {
        Expr::NumberLiteral { value, .. } => visitor.visit_number_literal(*value),
        Expr::StringLiteral { value, .. } => visitor.visit_string_literal(value),
        Expr::VectorSelector(v) => visitor.visit_vector_selector(v),
        Expr::MatrixSelector(m) => visitor.visit_matrix_selector(m),
        Expr::SubqueryExpr(s) => {
            visitor.visit_subquery(s);
            walk(visitor, &s.inner);
        }
        Expr::OffsetExpr(o) => {
            visitor.visit_offset(o);
            walk(visitor, &o.inner);
        }
        Expr::ParenExpression(p) => {
            visitor.visit_paren(p);
            walk(visitor, &p.inner);
        }
        Expr::UnaryExpr(u) => {
            visitor.visit_unary(u);
            walk(visitor, &u.inner);
        }
        Expr::FunctionCall(c) => {
            visitor.visit_function_call(c);
            for arg in &c.args {
                walk(visitor, arg);
            }
        }
        Expr::AggregateExpr(a) => {
            visitor.visit_aggregate(a);
            if let Some(param) = &a.param {
                walk(visitor, param);
            }
            walk(visitor, &a.expr);
        }
        Expr::BinaryExpr(b) => {
            visitor.visit_binary(b);
            walk(visitor, &b.lhs);
            walk(visitor, &b.rhs);
        }
    }
    visitor.post_visit(expr);
}
