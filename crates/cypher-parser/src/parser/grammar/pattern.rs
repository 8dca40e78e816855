//! Pattern productions: patterns, pattern paths, node and relationship
//! patterns, varlength ranges.

use crate::ast::{AstNode, Direction};
use crate::lexer::{Keyword, Symbol, TokenKind};
use crate::parser::{PResult, Parser};
use std::io::Read;

use super::{built, expression, identifier, name_token};

/// *Pattern*:
///     PatternPart (**,** PatternPart)*
pub(crate) fn pattern<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.peek()?.range.start();
    let mut paths = vec![pattern_part(p)?];
    while p.eat_symbol(Symbol::Comma)? {
        paths.push(pattern_part(p)?);
    }
    Ok(built(AstNode::new_pattern(paths, p.span_from(start))))
}

/// *PatternPart*:
///     Identifier **=** AnonymousPath
///     ShortestPath
///     AnonymousPath
pub(crate) fn pattern_part<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    if matches!(p.peek()?.kind, TokenKind::Ident | TokenKind::QuotedIdent)
        && p.peek_n(1)?.kind == TokenKind::Symbol(Symbol::Equals)
    {
        let ident = identifier(p)?;
        let start = ident.range().start();
        p.expect_symbol(Symbol::Equals)?;
        let path = shortest_or_path(p)?;
        return Ok(built(AstNode::new_named_path(
            ident,
            path,
            p.span_from(start),
        )));
    }
    shortest_or_path(p)
}

fn shortest_or_path<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    if let TokenKind::Ident = p.peek()?.kind {
        let name = p.peek()?.text.clone();
        let single = name.eq_ignore_ascii_case("shortestPath");
        if (single || name.eq_ignore_ascii_case("allShortestPaths"))
            && p.peek_n(1)?.kind == TokenKind::Symbol(Symbol::LParen)
        {
            let start = p.bump()?.range.start();
            p.expect_symbol(Symbol::LParen)?;
            let path = pattern_path(p)?;
            p.expect_symbol(Symbol::RParen)?;
            return Ok(built(AstNode::new_shortest_path(
                single,
                path,
                p.span_from(start),
            )));
        }
    }
    pattern_path(p)
}

/// *PatternPath*:
///     NodePattern (RelPattern NodePattern)*
pub(crate) fn pattern_path<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.peek()?.range.start();
    let mut elements = vec![node_pattern(p)?];
    loop {
        let at_rel = p.at_symbol(Symbol::Minus)? || p.at_symbol(Symbol::Lt)?;
        if !at_rel {
            break;
        }
        elements.push(rel_pattern(p)?);
        elements.push(node_pattern(p)?);
    }
    Ok(built(AstNode::new_pattern_path(elements, p.span_from(start))))
}

/// *NodePattern*:
///     **(** Identifier? (**:** Label)* Properties? **)**
pub(crate) fn node_pattern<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.expect_symbol(Symbol::LParen)?.range.start();

    let ident_kind = p.peek()?.kind;
    let ident = match ident_kind {
        TokenKind::Ident | TokenKind::QuotedIdent | TokenKind::Keyword(_) => {
            Some(identifier(p)?)
        }
        _ => None,
    };

    let labels = label_list(p)?;
    let properties = properties(p)?;

    p.expect_symbol(Symbol::RParen)?;
    Ok(built(AstNode::new_node_pattern(
        ident,
        labels,
        properties,
        p.span_from(start),
    )))
}

/// *RelPattern*:
///     **<-**? **-** (**[** Identifier? (**:** Reltype (**|** Reltype)*)?
///     (**\*** Range?)? Properties? **]** **-**)? **-**? **->**?
fn rel_pattern<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.peek()?.range.start();
    let left = p.eat_symbol(Symbol::Lt)?;
    p.expect_symbol(Symbol::Minus)?;

    let mut ident = None;
    let mut reltypes = Vec::new();
    let mut varlength = None;
    let mut props = None;

    if p.eat_symbol(Symbol::LBracket)? {
        let ident_kind = p.peek()?.kind;
        ident = match ident_kind {
            TokenKind::Ident | TokenKind::QuotedIdent | TokenKind::Keyword(_) => {
                Some(identifier(p)?)
            }
            _ => None,
        };
        if p.eat_symbol(Symbol::Colon)? {
            let (name, range) = name_token(p, "a relationship type")?;
            reltypes.push(AstNode::new_reltype(name, range));
            while p.eat_symbol(Symbol::Pipe)? {
                p.eat_symbol(Symbol::Colon)?;
                let (name, range) = name_token(p, "a relationship type")?;
                reltypes.push(AstNode::new_reltype(name, range));
            }
        }
        if p.at_symbol(Symbol::Star)? {
            varlength = Some(varlength_range(p)?);
        }
        props = properties(p)?;
        p.expect_symbol(Symbol::RBracket)?;
        p.expect_symbol(Symbol::Minus)?;
    } else {
        p.expect_symbol(Symbol::Minus)?;
    }

    let right = p.eat_symbol(Symbol::Gt)?;
    let direction = match (left, right) {
        (true, false) => Direction::Inbound,
        (false, true) => Direction::Outbound,
        _ => Direction::Bidirectional,
    };

    Ok(built(AstNode::new_rel_pattern(
        direction,
        ident,
        reltypes,
        varlength,
        props,
        p.span_from(start),
    )))
}

/// The varlength specifier after `*`: nothing, `2`, `1..3`, `..3`, `1..`.
/// A single bound (`*2`) means exactly that many hops, so it becomes both
/// ends of the range.
fn varlength_range<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.expect_symbol(Symbol::Star)?.range.start();

    let lower = if p.peek()?.kind == TokenKind::Int {
        let token = p.bump()?;
        Some(token)
    } else {
        None
    };

    let (range_start, range_end) = if p.eat_symbol(Symbol::DotDot)? {
        let upper = if p.peek()?.kind == TokenKind::Int {
            let token = p.bump()?;
            Some(AstNode::new_integer(token.text, token.range))
        } else {
            None
        };
        let lower = lower.map(|t| AstNode::new_integer(t.text, t.range));
        (lower, upper)
    } else {
        match lower {
            // `*2`: an exact hop count bounds the range on both sides.
            Some(token) => (
                Some(AstNode::new_integer(token.text.clone(), token.range)),
                Some(AstNode::new_integer(token.text, token.range)),
            ),
            None => (None, None),
        }
    };

    Ok(built(AstNode::new_range(
        range_start,
        range_end,
        p.span_from(start),
    )))
}

fn label_list<R: Read>(p: &mut Parser<'_, R>) -> PResult<Vec<AstNode>> {
    let mut labels = Vec::new();
    while p.eat_symbol(Symbol::Colon)? {
        let (name, range) = name_token(p, "a label")?;
        labels.push(AstNode::new_label(name, range));
    }
    Ok(labels)
}

/// Node and relationship properties: a map literal or a parameter.
fn properties<R: Read>(p: &mut Parser<'_, R>) -> PResult<Option<AstNode>> {
    if p.at_symbol(Symbol::LBrace)? {
        return Ok(Some(expression::map_literal(p)?));
    }
    if p.peek()?.kind == TokenKind::Param {
        let token = p.bump()?;
        return Ok(Some(AstNode::new_parameter(token.text, token.range)));
    }
    Ok(None)
}

#[cfg(test)]
mod test {
    use crate::ast::{Direction, Kind};
    use crate::Parser;

    fn first_clause(input: &str, check: impl FnOnce(&crate::AstNode)) {
        let result = Parser::new(input).parse().unwrap();
        assert!(result.errors().is_empty(), "{:?}", result.errors());
        let clause = result
            .directive(0)
            .and_then(|s| s.statement_body())
            .and_then(|q| q.query_clauses().next())
            .unwrap();
        check(clause);
    }

    #[test]
    fn node_patterns() {
        first_clause("MATCH (n:Person:Admin {name: 'Alice'}) RETURN n", |m| {
            let pattern = m.match_pattern().unwrap();
            let path = pattern.items().next().unwrap();
            let node = path.items().next().unwrap();
            assert_eq!(node.kind(), Kind::NodePattern);
            assert_eq!(node.identifier().unwrap().text(), Some("n"));
            assert_eq!(node.labels().count(), 2);
            assert_eq!(node.properties().unwrap().kind(), Kind::Map);
        });
    }

    #[test]
    fn rel_patterns_have_directions() {
        first_clause("MATCH (a)-[r:KNOWS|LIKES]->(b) RETURN r", |m| {
            let path = m.match_pattern().unwrap().items().next().unwrap();
            let rel = path.items().nth(1).unwrap();
            assert_eq!(rel.kind(), Kind::RelPattern);
            assert_eq!(rel.direction(), Some(Direction::Outbound));
            assert_eq!(rel.identifier().unwrap().text(), Some("r"));
            let types: Vec<&str> = rel.reltypes().filter_map(|t| t.text()).collect();
            assert_eq!(types, vec!["KNOWS", "LIKES"]);
        });
        first_clause("MATCH (a)<--(b) RETURN a", |m| {
            let path = m.match_pattern().unwrap().items().next().unwrap();
            let rel = path.items().nth(1).unwrap();
            assert_eq!(rel.direction(), Some(Direction::Inbound));
        });
        first_clause("MATCH (a)--(b) RETURN a", |m| {
            let path = m.match_pattern().unwrap().items().next().unwrap();
            let rel = path.items().nth(1).unwrap();
            assert_eq!(rel.direction(), Some(Direction::Bidirectional));
        });
    }

    #[test]
    fn varlength_ranges() {
        first_clause("MATCH (a)-[*1..3]->(b) RETURN a", |m| {
            let path = m.match_pattern().unwrap().items().next().unwrap();
            let rel = path.items().nth(1).unwrap();
            let range = rel.varlength().unwrap();
            assert_eq!(range.kind(), Kind::Range);
            assert_eq!(range.range_start().unwrap().text(), Some("1"));
            assert_eq!(range.range_end().unwrap().text(), Some("3"));
        });
        first_clause("MATCH (a)-[*2]->(b) RETURN a", |m| {
            let path = m.match_pattern().unwrap().items().next().unwrap();
            let range = path.items().nth(1).unwrap().varlength().unwrap();
            assert_eq!(range.range_start().unwrap().text(), Some("2"));
            assert_eq!(range.range_end().unwrap().text(), Some("2"));
        });
        first_clause("MATCH (a)-[r*]->(b) RETURN a", |m| {
            let path = m.match_pattern().unwrap().items().next().unwrap();
            let range = path.items().nth(1).unwrap().varlength().unwrap();
            assert!(range.range_start().is_none());
            assert!(range.range_end().is_none());
        });
    }

    #[test]
    fn named_and_shortest_paths() {
        first_clause("MATCH p = (a)-->(b) RETURN p", |m| {
            let path = m.match_pattern().unwrap().items().next().unwrap();
            assert_eq!(path.kind(), Kind::NamedPath);
            assert_eq!(path.identifier().unwrap().text(), Some("p"));
            assert_eq!(path.path().unwrap().kind(), Kind::PatternPath);
        });
        first_clause("MATCH p = shortestPath((a)-->(b)) RETURN p", |m| {
            let named = m.match_pattern().unwrap().items().next().unwrap();
            let shortest = named.path().unwrap();
            assert_eq!(shortest.kind(), Kind::ShortestPath);
            assert!(shortest.shortest_path_is_single());
        });
        first_clause("MATCH allShortestPaths((a)-->(b)) RETURN 1", |m| {
            let shortest = m.match_pattern().unwrap().items().next().unwrap();
            assert_eq!(shortest.kind(), Kind::ShortestPath);
            assert!(!shortest.shortest_path_is_single());
        });
    }

    #[test]
    fn parameter_properties() {
        first_clause("MATCH (n $props) RETURN n", |m| {
            let node = m
                .match_pattern()
                .unwrap()
                .items()
                .next()
                .unwrap()
                .items()
                .next()
                .unwrap();
            assert_eq!(node.properties().unwrap().kind(), Kind::Parameter);
        });
    }
}
