//! The recursive-descent grammar.
//!
//! One module per area of the language. Every production takes the parser
//! and returns `PResult<AstNode>`: `Ok` carries the constructed node,
//! `Err(Syntax)` means an error was recorded and the caller decides where
//! to recover.

pub(crate) mod clause;
pub(crate) mod expression;
pub(crate) mod pattern;
pub(crate) mod projection;
pub(crate) mod schema;

use crate::ast::AstNode;
use crate::lexer::{InputRange, Keyword, Symbol, TokenKind};
use crate::parser::{PResult, Parser};
use std::io::Read;

/// Unwrap a constructor result. The grammar only hands constructors
/// children of the kinds they validate, so a `None` here is a bug in a
/// production, not an input error.
pub(crate) fn built(node: Option<AstNode>) -> AstNode {
    node.expect("grammar validated the constructor arguments")
}

/// A name-like token: an identifier, a back-quoted identifier, or any
/// keyword in a context where the grammar admits it as a name.
pub(crate) fn name_token<R: Read>(
    p: &mut Parser<'_, R>,
    what: &str,
) -> PResult<(String, InputRange)> {
    let kind = p.peek()?.kind;
    match kind {
        TokenKind::Ident | TokenKind::QuotedIdent | TokenKind::Keyword(_) => {
            let token = p.bump()?;
            Ok((token.text, token.range))
        }
        _ => {
            let found = p.describe_current()?;
            p.fail(format!("expected {what}, found {found}"))
        }
    }
}

pub(crate) fn identifier<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let (name, range) = name_token(p, "an identifier")?;
    Ok(AstNode::new_identifier(name, range))
}

/// *Statement*:
///     QueryOption* (Query | SchemaCommand)
pub(crate) fn statement<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.peek()?.range.start();

    let mut options = Vec::new();
    loop {
        if p.at_keyword(Keyword::Cypher)? {
            options.push(cypher_option(p)?);
        } else if p.at_keyword(Keyword::Explain)? {
            let token = p.bump()?;
            options.push(AstNode::new_explain_option(token.range));
        } else if p.at_keyword(Keyword::Profile)? {
            let token = p.bump()?;
            options.push(AstNode::new_profile_option(token.range));
        } else {
            break;
        }
    }

    let body = if p.at_keyword(Keyword::Create)? || p.at_keyword(Keyword::Drop)? {
        let dropping = p.at_keyword(Keyword::Drop)?;
        let second = p.peek_n(1)?.kind;
        match second {
            TokenKind::Keyword(Keyword::Index) => schema::index_command(p)?,
            TokenKind::Keyword(Keyword::Constraint) => schema::constraint_command(p)?,
            _ if dropping => {
                let found = p.peek_n(1)?.describe();
                return p.fail(format!(
                    "expected INDEX or CONSTRAINT after DROP, found {found}"
                ));
            }
            _ => clause::query(p)?,
        }
    } else {
        clause::query(p)?
    };

    Ok(built(AstNode::new_statement(
        options,
        body,
        p.span_from(start),
    )))
}

/// *CypherOption*:
///     **CYPHER** Version? (Name **=** Value)*
fn cypher_option<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.expect_keyword(Keyword::Cypher)?.range.start();

    let version_kind = p.peek()?.kind;
    let version = match version_kind {
        TokenKind::Int | TokenKind::Float => {
            let token = p.bump()?;
            Some(AstNode::new_string(token.text, '"', token.range))
        }
        _ => None,
    };

    let mut params = Vec::new();
    while matches!(
        p.peek()?.kind,
        TokenKind::Ident | TokenKind::Keyword(_)
    ) && p.peek_n(1)?.kind == TokenKind::Symbol(Symbol::Equals)
    {
        let name = p.bump()?;
        let name = AstNode::new_string(name.text, '"', name.range);
        p.expect_symbol(Symbol::Equals)?;
        let value_kind = p.peek()?.kind;
        let value = match value_kind {
            TokenKind::Ident
            | TokenKind::QuotedIdent
            | TokenKind::Keyword(_)
            | TokenKind::Int
            | TokenKind::Float
            | TokenKind::Str { .. } => {
                let token = p.bump()?;
                AstNode::new_string(token.text, '"', token.range)
            }
            _ => {
                let found = p.describe_current()?;
                return p.fail(format!("expected an option value, found {found}"));
            }
        };
        let range = InputRange::new(name.range().start(), value.range().end());
        params.push(built(AstNode::new_cypher_option_param(name, value, range)));
    }

    Ok(built(AstNode::new_cypher_option(
        version,
        params,
        p.span_from(start),
    )))
}

/// A client command: `:name arg…`, terminated by the end of the line.
/// Only recognized when the `:` opens a line.
pub(crate) fn command<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let colon = p.expect_symbol(Symbol::Colon)?;
    let start = colon.range.start();
    let line = start.line();

    let name = {
        let token = p.peek()?;
        if token.kind == TokenKind::Eof || token.range.start().line() != line {
            return p.fail("expected a command name");
        }
        p.bump()?
    };

    let mut args = Vec::new();
    loop {
        let token = p.peek()?;
        if token.kind == TokenKind::Eof || token.range.start().line() != line {
            break;
        }
        let token = p.bump()?;
        args.push(AstNode::new_string(token.text, '"', token.range));
    }

    Ok(built(AstNode::new_command(
        name.text,
        args,
        p.span_from(start),
    )))
}

#[cfg(test)]
mod test {
    use crate::ast::Kind;
    use crate::Parser;

    #[test]
    fn it_parses_a_statement_with_query_options() {
        let result = Parser::new("EXPLAIN PROFILE CYPHER 2.3 planner=cost RETURN 1;")
            .parse()
            .unwrap();
        assert!(result.errors().is_empty(), "{:?}", result.errors());
        let statement = result.directive(0).unwrap();
        assert_eq!(statement.kind(), Kind::Statement);
        let options: Vec<Kind> = statement.statement_options().map(|o| o.kind()).collect();
        assert_eq!(
            options,
            vec![Kind::ExplainOption, Kind::ProfileOption, Kind::CypherOption]
        );
        let cypher = statement.statement_options().nth(2).unwrap();
        assert_eq!(cypher.option_version().unwrap().string_value(), Some("2.3"));
        assert_eq!(cypher.option_params().count(), 1);
        assert_eq!(statement.statement_body().unwrap().kind(), Kind::Query);
    }

    #[test]
    fn it_parses_a_client_command() {
        let result = Parser::new(":schema awesome\nRETURN 1;").parse().unwrap();
        assert!(result.errors().is_empty(), "{:?}", result.errors());
        assert_eq!(result.ndirectives(), 2);
        let command = result.directive(0).unwrap();
        assert_eq!(command.kind(), Kind::Command);
        assert_eq!(command.command_name(), Some("schema"));
        let args: Vec<&str> = command
            .command_args()
            .filter_map(|a| a.string_value())
            .collect();
        assert_eq!(args, vec!["awesome"]);
    }

    #[test]
    fn commands_must_open_a_line() {
        let result = Parser::new("RETURN 1; :help").parse().unwrap();
        assert_eq!(result.ndirectives(), 1);
        assert!(!result.errors().is_empty());
    }

    #[test]
    fn only_statements_rejects_client_commands() {
        let result = Parser::new(":help\nRETURN 1;")
            .only_statements(true)
            .parse()
            .unwrap();
        assert_eq!(result.ndirectives(), 1);
        assert_eq!(result.nerrors(), 1);
        assert_eq!(result.error(0).unwrap().message(), "unexpected client command");
    }
}
