//! A parser for the Cypher graph query language.
//!
//! Cypher source text goes in; an ordinal-numbered abstract syntax tree
//! with source positions comes out, alongside the list of parse errors the
//! parser recovered from. Lexical and syntactic problems never abort the
//! parse: the parser skips to the next statement boundary and keeps going,
//! so the AST and error list describe as much of the input as possible.
//!
//! ```rust
//! use cypher_parser::{Kind, Parser};
//!
//! let result = Parser::new("MATCH (n:Person) WHERE n.age > 30 RETURN n.name;")
//!     .parse()
//!     .unwrap();
//!
//! assert!(result.errors().is_empty());
//! assert_eq!(result.ndirectives(), 1);
//!
//! let statement = result.directive(0).unwrap();
//! assert_eq!(statement.kind(), Kind::Statement);
//! let query = statement.statement_body().unwrap();
//! assert_eq!(query.query_clauses().count(), 2);
//! ```
//!
//! Arbitrarily large scripts parse with bounded memory through
//! [`Parser::from_reader`]; each completed directive is reported through
//! [`Parser::on_directive`] and the input window slides past it.

mod error;
mod lexer;
mod limit;
mod printer;

pub mod ast;
mod parser;

#[cfg(test)]
mod tests;

pub use crate::ast::{AstNode, Direction, Kind, Operator};
pub use crate::error::Error;
pub use crate::lexer::{InputPosition, InputRange};
pub use crate::limit::LimitTracker;
pub use crate::parser::{ParseResult, Parser};
pub use crate::printer::Colorization;

/// The library version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
