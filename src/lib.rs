//! # promql-toolkit
//!
//! A lexer, parser, type checker, and canonical printer for the Prometheus
//! Query Language (PromQL).
//!
//! This crate turns PromQL source text into a typed Abstract Syntax Tree,
//! checks that tree against PromQL's value-type rules, and can render any
//! node back out as canonical PromQL text.
//!
//! ## Quick Start
//!
//! The main entry point is [`parse_expression()`], which tokenizes and
//! parses a PromQL expression into an [`ast::Expr`]:
//!
//! ```rust
//! use promql_toolkit::parse_expression;
//!
//! let expr = parse_expression(r#"http_requests_total{job="api"}"#).expect("failed to parse");
//! println!("{:#?}", expr);
//! ```
//!
//! ## Type checking
//!
//! [`check_type()`] walks a parsed expression and returns its
//! [`ast::ValueType`], or a [`error::TypeError`] describing the first rule
//! it violates:
//!
//! ```rust
//! use promql_toolkit::{check_type, parse_expression};
//!
//! let expr = parse_expression("rate(http_requests_total[5m])").unwrap();
//! assert_eq!(check_type(&expr).unwrap().to_string(), "instant vector");
//! ```
//!
//! ## Printing
//!
//! [`to_promql()`] renders any [`printer::ToPromql`] node — most usefully an
//! [`ast::Expr`] — back to canonical PromQL text:
//!
//! ```rust
//! use promql_toolkit::{parse_expression, to_promql};
//!
//! let expr = parse_expression("1 + 2 * 3").unwrap();
//! assert_eq!(to_promql(&expr), "1 + 2 * 3");
//! ```
//!
//! ## Visiting
//!
//! [`visitor::ExprVisitor`] and [`visitor::walk()`] let callers traverse a
//! tree without matching on [`ast::Expr`] themselves.
//!
//! ## Modules
//!
//! - [`ast`] - Abstract Syntax Tree type definitions
//! - [`token`] - Token and keyword definitions produced by the lexer
//! - [`lexer`] - Hand-written lexer (normal and brace-context modes)
//! - [`parser`] - Token-cursor based expression parser
//! - [`catalog`] - Function and aggregation-operator catalogues
//! - [`typecheck`] - Value-type checker
//! - [`printer`] - Canonical PromQL printer
//! - [`visitor`] - Depth-first AST visitor
//! - [`error`] - Shared `Span` and error types

pub mod ast;
pub mod catalog;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod token;
pub mod typecheck;
pub mod visitor;

pub use ast::{Expr, ValueType};
pub use error::{Error, LexError, ParseError, Span, TypeError};
pub use parser::parse_expression;
pub use printer::to_promql;
pub use typecheck::check_type;
