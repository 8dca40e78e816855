//! Projection machinery shared by RETURN and WITH, plus ORDER BY, SKIP,
//! LIMIT and WHERE.

use crate::ast::AstNode;
use crate::lexer::{Keyword, Symbol};
use crate::parser::{PResult, Parser};
use std::io::Read;

use super::{built, expression, identifier};

/// The parts between a projecting keyword and the next clause.
pub(crate) struct ProjectionBody {
    pub(crate) distinct: bool,
    pub(crate) include_existing: bool,
    pub(crate) items: Vec<AstNode>,
    pub(crate) order_by: Option<AstNode>,
    pub(crate) skip: Option<AstNode>,
    pub(crate) limit: Option<AstNode>,
}

/// *ProjectionBody*:
///     **DISTINCT**? (**\*** | Projection (**,** Projection)*)
///     OrderBy? Skip? Limit?
pub(crate) fn projection_body<R: Read>(p: &mut Parser<'_, R>) -> PResult<ProjectionBody> {
    let distinct = p.eat_keyword(Keyword::Distinct)?;
    let include_existing = p.eat_symbol(Symbol::Star)?;

    let mut items = Vec::new();
    if !include_existing || p.eat_symbol(Symbol::Comma)? {
        loop {
            items.push(projection_item(p)?);
            if !p.eat_symbol(Symbol::Comma)? {
                break;
            }
        }
    }

    let order_by = if p.at_keyword(Keyword::Order)? {
        Some(order_by(p)?)
    } else {
        None
    };
    let skip = if p.at_keyword(Keyword::Skip)? {
        let start = p.bump()?.range.start();
        let amount = expression::expression(p)?;
        Some(built(AstNode::new_skip(amount, p.span_from(start))))
    } else {
        None
    };
    let limit = if p.at_keyword(Keyword::Limit)? {
        let start = p.bump()?.range.start();
        let amount = expression::expression(p)?;
        Some(built(AstNode::new_limit(amount, p.span_from(start))))
    } else {
        None
    };

    Ok(ProjectionBody {
        distinct,
        include_existing,
        items,
        order_by,
        skip,
        limit,
    })
}

/// *Projection*:
///     Expression (**AS** Identifier)?
///
/// A broken projection expression recovers here, so one bad projection
/// becomes an error node without losing the rest of the clause.
fn projection_item<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let cp = p.checkpoint()?;
    let start = p.peek()?.range.start();
    let parsed = expression::expression(p);
    let expr = match parsed {
        Ok(expr) => expr,
        Err(failure) => {
            let node = p.recover_or(cp, Err(failure))?;
            return Ok(built(AstNode::new_projection(node, None, p.span_from(start))));
        }
    };
    let alias = if p.eat_keyword(Keyword::As)? {
        Some(identifier(p)?)
    } else {
        None
    };
    Ok(built(AstNode::new_projection(
        expr,
        alias,
        p.span_from(start),
    )))
}

/// *OrderBy*:
///     **ORDER BY** SortItem (**,** SortItem)*
fn order_by<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.expect_keyword(Keyword::Order)?.range.start();
    p.expect_keyword(Keyword::By)?;
    let mut items = vec![sort_item(p)?];
    while p.eat_symbol(Symbol::Comma)? {
        items.push(sort_item(p)?);
    }
    Ok(built(AstNode::new_order_by(items, p.span_from(start))))
}

/// *SortItem*:
///     Expression (**ASC** | **ASCENDING** | **DESC** | **DESCENDING**)?
fn sort_item<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.peek()?.range.start();
    let expr = expression::expression(p)?;
    let ascending = if p.eat_keyword(Keyword::Asc)? || p.eat_keyword(Keyword::Ascending)? {
        true
    } else {
        !(p.eat_keyword(Keyword::Desc)? || p.eat_keyword(Keyword::Descending)?)
    };
    Ok(built(AstNode::new_sort_item(
        expr,
        ascending,
        p.span_from(start),
    )))
}

/// *Where*:
///     **WHERE** Expression
///
/// A broken predicate recovers inside the WHERE node.
pub(crate) fn where_clause<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.expect_keyword(Keyword::Where)?.range.start();
    let cp = p.checkpoint()?;
    let parsed = expression::expression(p);
    let predicate = p.recover_or(cp, parsed)?;
    Ok(built(AstNode::new_where(predicate, p.span_from(start))))
}

#[cfg(test)]
mod test {
    use crate::ast::Kind;
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
    fn return_with_everything() {
        first_clause(
            "RETURN DISTINCT n.name AS name, count(*) ORDER BY name DESC SKIP 5 LIMIT 10",
            |ret| {
                assert_eq!(ret.kind(), Kind::Return);
                assert!(ret.is_distinct());
                assert!(!ret.includes_existing());
                assert_eq!(ret.projections().count(), 2);
                let first = ret.projections().next().unwrap();
                assert_eq!(first.alias().unwrap().text(), Some("name"));
                let order_by = ret.order_by().unwrap();
                let item = order_by.items().next().unwrap();
                assert!(!item.sort_ascending());
                assert_eq!(ret.skip().unwrap().expression().unwrap().text(), Some("5"));
                assert_eq!(ret.limit().unwrap().expression().unwrap().text(), Some("10"));
            },
        );
    }

    #[test]
    fn return_star_and_more() {
        first_clause("RETURN *", |ret| {
            assert!(ret.includes_existing());
            assert_eq!(ret.projections().count(), 0);
        });
        first_clause("RETURN *, n.age", |ret| {
            assert!(ret.includes_existing());
            assert_eq!(ret.projections().count(), 1);
        });
    }
}
