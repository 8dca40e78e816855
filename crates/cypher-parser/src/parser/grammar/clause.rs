//! Clause productions: everything between a statement's start and its
//! terminating `;`.

use crate::ast::{AstNode, Kind};
use crate::lexer::{Keyword, Symbol, TokenKind};
use crate::parser::{ParseFailure, PResult, Parser};
use std::io::Read;

use super::{built, expression, identifier, name_token, pattern, projection};

/// *Query*:
///     Clause+
///
/// A clause that fails to parse recovers here: the skipped region becomes
/// an error node in the clause sequence and parsing resumes at the next
/// recovery anchor.
pub(crate) fn query<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.peek()?.range.start();
    let mut clauses = Vec::new();
    loop {
        let at_clause = match p.peek()?.kind {
            TokenKind::Keyword(kw) => is_clause_start(kw),
            _ => false,
        };
        if !at_clause {
            break;
        }
        let cp = p.checkpoint()?;
        match clause(p) {
            Ok(node) => clauses.push(node),
            Err(ParseFailure::Syntax) => clauses.push(p.recover(cp)?),
            Err(failure) => return Err(failure),
        }
    }
    if clauses.is_empty() {
        let found = p.describe_current()?;
        return p.fail(format!("expected a statement, found {found}"));
    }
    Ok(built(AstNode::new_query(clauses, p.span_from(start))))
}

fn is_clause_start(kw: Keyword) -> bool {
    matches!(
        kw,
        Keyword::Optional
            | Keyword::Match
            | Keyword::Using
            | Keyword::Create
            | Keyword::Merge
            | Keyword::Set
            | Keyword::Delete
            | Keyword::Detach
            | Keyword::Remove
            | Keyword::Foreach
            | Keyword::With
            | Keyword::Unwind
            | Keyword::Start
            | Keyword::Call
            | Keyword::Return
            | Keyword::Load
            | Keyword::Union
    )
}

fn clause<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let kind = p.peek()?.kind;
    match kind {
        TokenKind::Keyword(Keyword::Optional) | TokenKind::Keyword(Keyword::Match) => {
            match_clause(p)
        }
        TokenKind::Keyword(Keyword::Using) => {
            p.fail("USING hints must follow a MATCH clause")
        }
        TokenKind::Keyword(Keyword::Create) => create_clause(p),
        TokenKind::Keyword(Keyword::Merge) => merge_clause(p),
        TokenKind::Keyword(Keyword::Set) => set_clause(p),
        TokenKind::Keyword(Keyword::Delete) | TokenKind::Keyword(Keyword::Detach) => {
            delete_clause(p)
        }
        TokenKind::Keyword(Keyword::Remove) => remove_clause(p),
        TokenKind::Keyword(Keyword::Foreach) => foreach_clause(p),
        TokenKind::Keyword(Keyword::With) => with_clause(p),
        TokenKind::Keyword(Keyword::Unwind) => unwind_clause(p),
        TokenKind::Keyword(Keyword::Start) => start_clause(p),
        TokenKind::Keyword(Keyword::Call) => call_clause(p),
        TokenKind::Keyword(Keyword::Return) => return_clause(p),
        TokenKind::Keyword(Keyword::Load) => load_csv_clause(p),
        TokenKind::Keyword(Keyword::Union) => union_clause(p),
        _ => {
            let found = p.describe_current()?;
            p.fail(format!("expected a clause, found {found}"))
        }
    }
}

/// *Match*:
///     **OPTIONAL**? **MATCH** Pattern MatchHint* Where?
fn match_clause<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.peek()?.range.start();
    let optional = p.eat_keyword(Keyword::Optional)?;
    p.expect_keyword(Keyword::Match)?;
    let pat = pattern::pattern(p)?;

    let mut hints = Vec::new();
    while p.at_keyword(Keyword::Using)? {
        hints.push(match_hint(p)?);
    }

    let predicate = if p.at_keyword(Keyword::Where)? {
        Some(projection::where_clause(p)?)
    } else {
        None
    };

    Ok(built(AstNode::new_match(
        optional,
        pat,
        hints,
        predicate,
        p.span_from(start),
    )))
}

/// *MatchHint*:
///     **USING INDEX** Identifier **:** Label **(** PropName **)**
///     **USING SCAN** Identifier **:** Label
///     **USING JOIN ON** Identifier (**,** Identifier)*
fn match_hint<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.expect_keyword(Keyword::Using)?.range.start();
    if p.eat_keyword(Keyword::Index)? {
        let ident = identifier(p)?;
        p.expect_symbol(Symbol::Colon)?;
        let (name, range) = name_token(p, "a label")?;
        let label = AstNode::new_label(name, range);
        p.expect_symbol(Symbol::LParen)?;
        let (name, range) = name_token(p, "a property name")?;
        let prop = AstNode::new_prop_name(name, range);
        p.expect_symbol(Symbol::RParen)?;
        return Ok(built(AstNode::new_using_index(
            ident,
            label,
            prop,
            p.span_from(start),
        )));
    }
    if p.eat_keyword(Keyword::Scan)? {
        let ident = identifier(p)?;
        p.expect_symbol(Symbol::Colon)?;
        let (name, range) = name_token(p, "a label")?;
        let label = AstNode::new_label(name, range);
        return Ok(built(AstNode::new_using_scan(
            ident,
            label,
            p.span_from(start),
        )));
    }
    if p.eat_keyword(Keyword::Join)? {
        p.expect_keyword(Keyword::On)?;
        let mut idents = vec![identifier(p)?];
        while p.eat_symbol(Symbol::Comma)? {
            idents.push(identifier(p)?);
        }
        return Ok(built(AstNode::new_using_join(idents, p.span_from(start))));
    }
    let found = p.describe_current()?;
    p.fail(format!("expected INDEX, SCAN or JOIN, found {found}"))
}

/// *Create*:
///     **CREATE** **UNIQUE**? Pattern
fn create_clause<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.expect_keyword(Keyword::Create)?.range.start();
    let unique = p.eat_keyword(Keyword::Unique)?;
    let pat = pattern::pattern(p)?;
    Ok(built(AstNode::new_create(unique, pat, p.span_from(start))))
}

/// *Merge*:
///     **MERGE** PatternPart MergeAction*
fn merge_clause<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.expect_keyword(Keyword::Merge)?.range.start();
    let path = pattern::pattern_part(p)?;

    let mut actions = Vec::new();
    while p.at_keyword(Keyword::On)? {
        let action_start = p.bump()?.range.start();
        let on_match = if p.eat_keyword(Keyword::Match)? {
            true
        } else if p.eat_keyword(Keyword::Create)? {
            false
        } else {
            let found = p.describe_current()?;
            return p.fail(format!("expected MATCH or CREATE after ON, found {found}"));
        };
        p.expect_keyword(Keyword::Set)?;
        let items = set_items(p)?;
        let span = p.span_from(action_start);
        let action = if on_match {
            AstNode::new_on_match(items, span)
        } else {
            AstNode::new_on_create(items, span)
        };
        actions.push(built(action));
    }

    Ok(built(AstNode::new_merge(path, actions, p.span_from(start))))
}

/// *Set*:
///     **SET** SetItem (**,** SetItem)*
fn set_clause<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.expect_keyword(Keyword::Set)?.range.start();
    let items = set_items(p)?;
    Ok(built(AstNode::new_set(items, p.span_from(start))))
}

fn set_items<R: Read>(p: &mut Parser<'_, R>) -> PResult<Vec<AstNode>> {
    let mut items = vec![set_item(p)?];
    while p.eat_symbol(Symbol::Comma)? {
        items.push(set_item(p)?);
    }
    Ok(items)
}

/// *SetItem*:
///     PropertyExpression **=** Expression
///     Identifier **=** Expression
///     Identifier **+=** Expression
///     Identifier (**:** Label)+
fn set_item<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.peek()?.range.start();
    let ident = identifier(p)?;

    if p.at_symbol(Symbol::Colon)? {
        let labels = colon_labels(p)?;
        return Ok(built(AstNode::new_set_labels(
            ident,
            labels,
            p.span_from(start),
        )));
    }

    let lvalue = expression::property_chain(p, ident)?;
    if lvalue.kind() == Kind::PropertyOperator {
        p.expect_symbol(Symbol::Equals)?;
        let value = expression::expression(p)?;
        return Ok(built(AstNode::new_set_property(
            lvalue,
            value,
            p.span_from(start),
        )));
    }
    if p.eat_symbol(Symbol::Equals)? {
        let value = expression::expression(p)?;
        return Ok(built(AstNode::new_set_all_properties(
            lvalue,
            value,
            p.span_from(start),
        )));
    }
    if p.eat_symbol(Symbol::PlusEquals)? {
        let value = expression::expression(p)?;
        return Ok(built(AstNode::new_merge_properties(
            lvalue,
            value,
            p.span_from(start),
        )));
    }
    let found = p.describe_current()?;
    p.fail(format!("expected '=', '+=' or a label, found {found}"))
}

/// *Remove*:
///     **REMOVE** RemoveItem (**,** RemoveItem)*
fn remove_clause<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.expect_keyword(Keyword::Remove)?.range.start();
    let mut items = vec![remove_item(p)?];
    while p.eat_symbol(Symbol::Comma)? {
        items.push(remove_item(p)?);
    }
    Ok(built(AstNode::new_remove(items, p.span_from(start))))
}

/// *RemoveItem*:
///     Identifier (**:** Label)+
///     PropertyExpression
fn remove_item<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.peek()?.range.start();
    let ident = identifier(p)?;

    if p.at_symbol(Symbol::Colon)? {
        let labels = colon_labels(p)?;
        return Ok(built(AstNode::new_remove_labels(
            ident,
            labels,
            p.span_from(start),
        )));
    }

    let lvalue = expression::property_chain(p, ident)?;
    if lvalue.kind() == Kind::PropertyOperator {
        return Ok(built(AstNode::new_remove_property(
            lvalue,
            p.span_from(start),
        )));
    }
    let found = p.describe_current()?;
    p.fail(format!("expected a property or label, found {found}"))
}

fn colon_labels<R: Read>(p: &mut Parser<'_, R>) -> PResult<Vec<AstNode>> {
    let mut labels = Vec::new();
    while p.eat_symbol(Symbol::Colon)? {
        let (name, range) = name_token(p, "a label")?;
        labels.push(AstNode::new_label(name, range));
    }
    Ok(labels)
}

/// *Delete*:
///     **DETACH**? **DELETE** Expression (**,** Expression)*
fn delete_clause<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.peek()?.range.start();
    let detach = p.eat_keyword(Keyword::Detach)?;
    p.expect_keyword(Keyword::Delete)?;
    let mut expressions = vec![expression::expression(p)?];
    while p.eat_symbol(Symbol::Comma)? {
        expressions.push(expression::expression(p)?);
    }
    Ok(built(AstNode::new_delete(
        detach,
        expressions,
        p.span_from(start),
    )))
}

/// *Foreach*:
///     **FOREACH (** Identifier **IN** Expression **|** Clause+ **)**
fn foreach_clause<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.expect_keyword(Keyword::Foreach)?.range.start();
    p.expect_symbol(Symbol::LParen)?;
    let ident = identifier(p)?;
    p.expect_keyword(Keyword::In)?;
    let list = expression::expression(p)?;
    p.expect_symbol(Symbol::Pipe)?;

    let mut clauses = Vec::new();
    loop {
        let at_clause = match p.peek()?.kind {
            TokenKind::Keyword(kw) => is_clause_start(kw),
            _ => false,
        };
        if !at_clause {
            break;
        }
        clauses.push(clause(p)?);
    }
    if clauses.is_empty() {
        let found = p.describe_current()?;
        return p.fail(format!("expected an updating clause in FOREACH, found {found}"));
    }
    p.expect_symbol(Symbol::RParen)?;

    Ok(built(AstNode::new_foreach(
        ident,
        list,
        clauses,
        p.span_from(start),
    )))
}

/// *With*:
///     **WITH** ProjectionBody Where?
fn with_clause<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.expect_keyword(Keyword::With)?.range.start();
    let body = projection::projection_body(p)?;
    let predicate = if p.at_keyword(Keyword::Where)? {
        Some(projection::where_clause(p)?)
    } else {
        None
    };
    Ok(built(AstNode::new_with(
        body.distinct,
        body.include_existing,
        body.items,
        body.order_by,
        body.skip,
        body.limit,
        predicate,
        p.span_from(start),
    )))
}

/// *Return*:
///     **RETURN** ProjectionBody
fn return_clause<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.expect_keyword(Keyword::Return)?.range.start();
    let body = projection::projection_body(p)?;
    Ok(built(AstNode::new_return(
        body.distinct,
        body.include_existing,
        body.items,
        body.order_by,
        body.skip,
        body.limit,
        p.span_from(start),
    )))
}

/// *Unwind*:
///     **UNWIND** Expression **AS** Identifier
fn unwind_clause<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.expect_keyword(Keyword::Unwind)?.range.start();
    let list = expression::expression(p)?;
    p.expect_keyword(Keyword::As)?;
    let alias = identifier(p)?;
    Ok(built(AstNode::new_unwind(list, alias, p.span_from(start))))
}

/// *Call*:
///     **CALL** ProcName (**(** Expression (**,** Expression)* **)**)?
///     (**YIELD** Projection (**,** Projection)*)?
fn call_clause<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.expect_keyword(Keyword::Call)?.range.start();

    let (mut name, name_range) = name_token(p, "a procedure name")?;
    let name_start = name_range.start();
    while p.eat_symbol(Symbol::Dot)? {
        let (part, _) = name_token(p, "a procedure name")?;
        name.push('.');
        name.push_str(&part);
    }
    let proc = AstNode::new_proc_name(name, p.span_from(name_start));

    let mut args = Vec::new();
    if p.eat_symbol(Symbol::LParen)? {
        if !p.at_symbol(Symbol::RParen)? {
            loop {
                args.push(expression::expression(p)?);
                if !p.eat_symbol(Symbol::Comma)? {
                    break;
                }
            }
        }
        p.expect_symbol(Symbol::RParen)?;
    }

    let mut projections = Vec::new();
    if p.eat_keyword(Keyword::Yield)? {
        loop {
            let item_start = p.peek()?.range.start();
            let expr = expression::expression(p)?;
            let alias = if p.eat_keyword(Keyword::As)? {
                Some(identifier(p)?)
            } else {
                None
            };
            projections.push(built(AstNode::new_projection(
                expr,
                alias,
                p.span_from(item_start),
            )));
            if !p.eat_symbol(Symbol::Comma)? {
                break;
            }
        }
    }

    Ok(built(AstNode::new_call(
        proc,
        args,
        projections,
        p.span_from(start),
    )))
}

/// *LoadCsv*:
///     **LOAD CSV** (**WITH HEADERS**)? **FROM** Expression **AS**
///     Identifier (**FIELDTERMINATOR** String)?
fn load_csv_clause<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.expect_keyword(Keyword::Load)?.range.start();
    p.expect_keyword(Keyword::Csv)?;
    let with_headers = if p.at_keyword(Keyword::With)? {
        p.bump()?;
        p.expect_keyword(Keyword::Headers)?;
        true
    } else {
        false
    };
    p.expect_keyword(Keyword::From)?;
    let url = expression::expression(p)?;
    p.expect_keyword(Keyword::As)?;
    let alias = identifier(p)?;
    let field_terminator = if p.eat_keyword(Keyword::Fieldterminator)? {
        let kind = p.peek()?.kind;
        match kind {
            TokenKind::Str { quote } => {
                let token = p.bump()?;
                Some(AstNode::new_string(token.text, quote, token.range))
            }
            _ => {
                let found = p.describe_current()?;
                return p.fail(format!("expected a string literal, found {found}"));
            }
        }
    } else {
        None
    };
    Ok(built(AstNode::new_load_csv(
        with_headers,
        url,
        alias,
        field_terminator,
        p.span_from(start),
    )))
}

/// *Start*:
///     **START** StartPoint (**,** StartPoint)* Where?
fn start_clause<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.expect_keyword(Keyword::Start)?.range.start();
    let mut points = vec![start_point(p)?];
    while p.eat_symbol(Symbol::Comma)? {
        points.push(start_point(p)?);
    }
    let predicate = if p.at_keyword(Keyword::Where)? {
        Some(projection::where_clause(p)?)
    } else {
        None
    };
    Ok(built(AstNode::new_start(
        points,
        predicate,
        p.span_from(start),
    )))
}

/// *StartPoint*:
///     Identifier **=** (**node** | **rel**) **( \* )**
///     Identifier **=** (**node** | **rel**) **(** Integer (**,** Integer)* **)**
///     Identifier **=** (**node** | **rel**) **:** IndexName **(** PropName **=** String **)**
fn start_point<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.peek()?.range.start();
    let ident = identifier(p)?;
    p.expect_symbol(Symbol::Equals)?;

    let node_lookup = if p.eat_keyword(Keyword::Node)? {
        true
    } else if p.eat_keyword(Keyword::Rel)? || p.eat_keyword(Keyword::Relationship)? {
        false
    } else {
        let found = p.describe_current()?;
        return p.fail(format!("expected node or rel lookup, found {found}"));
    };

    if p.eat_symbol(Symbol::Colon)? {
        let (name, range) = name_token(p, "an index name")?;
        let index = AstNode::new_index_name(name, range);
        p.expect_symbol(Symbol::LParen)?;
        let (name, range) = name_token(p, "a property name")?;
        let prop = AstNode::new_prop_name(name, range);
        p.expect_symbol(Symbol::Equals)?;
        let value_kind = p.peek()?.kind;
        let value = match value_kind {
            TokenKind::Str { quote } => {
                let token = p.bump()?;
                AstNode::new_string(token.text, quote, token.range)
            }
            TokenKind::Param => {
                let token = p.bump()?;
                AstNode::new_parameter(token.text, token.range)
            }
            _ => {
                let found = p.describe_current()?;
                return p.fail(format!("expected a string or parameter, found {found}"));
            }
        };
        p.expect_symbol(Symbol::RParen)?;
        let span = p.span_from(start);
        let node = if node_lookup {
            AstNode::new_node_index_lookup(ident, index, prop, value, span)
        } else {
            AstNode::new_rel_index_lookup(ident, index, prop, value, span)
        };
        return Ok(built(node));
    }

    p.expect_symbol(Symbol::LParen)?;
    if p.eat_symbol(Symbol::Star)? {
        p.expect_symbol(Symbol::RParen)?;
        let span = p.span_from(start);
        let node = if node_lookup {
            AstNode::new_all_nodes_scan(ident, span)
        } else {
            AstNode::new_all_rels_scan(ident, span)
        };
        return Ok(built(node));
    }

    let mut ids = Vec::new();
    loop {
        let kind = p.peek()?.kind;
        match kind {
            TokenKind::Int => {
                let token = p.bump()?;
                ids.push(AstNode::new_integer(token.text, token.range));
            }
            _ => {
                let found = p.describe_current()?;
                return p.fail(format!("expected a node or rel id, found {found}"));
            }
        }
        if !p.eat_symbol(Symbol::Comma)? {
            break;
        }
    }
    p.expect_symbol(Symbol::RParen)?;
    let span = p.span_from(start);
    let node = if node_lookup {
        AstNode::new_node_id_lookup(ident, ids, span)
    } else {
        AstNode::new_rel_id_lookup(ident, ids, span)
    };
    Ok(built(node))
}

/// *Union*:
///     **UNION** **ALL**?
fn union_clause<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.expect_keyword(Keyword::Union)?.range.start();
    let all = p.eat_keyword(Keyword::All)?;
    Ok(AstNode::new_union(all, p.span_from(start)))
}

#[cfg(test)]
mod test {
    use crate::ast::Kind;
    use crate::Parser;

    fn clauses(input: &str, check: impl FnOnce(Vec<&crate::AstNode>)) {
        let result = Parser::new(input).parse().unwrap();
        assert!(result.errors().is_empty(), "{:?}", result.errors());
        let query = result
            .directive(0)
            .and_then(|s| s.statement_body())
            .unwrap();
        check(query.query_clauses().collect());
    }

    #[test]
    fn optional_match_with_hints_and_where() {
        clauses(
            "OPTIONAL MATCH (n:Person) USING INDEX n:Person(name) WHERE n.name = 'Alice' RETURN n",
            |clauses| {
                let m = clauses[0];
                assert_eq!(m.kind(), Kind::Match);
                assert!(m.match_is_optional());
                let hint = m.match_hints().next().unwrap();
                assert_eq!(hint.kind(), Kind::UsingIndex);
                assert_eq!(hint.label().unwrap().text(), Some("Person"));
                let predicate = m.predicate().unwrap();
                assert_eq!(predicate.kind(), Kind::Where);
                assert_eq!(predicate.expression().unwrap().kind(), Kind::Comparison);
            },
        );
    }

    #[test]
    fn merge_with_actions() {
        clauses(
            "MERGE (n:Person {name: 'Bob'}) \
             ON CREATE SET n.created = 1 \
             ON MATCH SET n.seen = 2, n.count = 3",
            |clauses| {
                let merge = clauses[0];
                assert_eq!(merge.kind(), Kind::Merge);
                let actions: Vec<Kind> = merge.merge_actions().map(|a| a.kind()).collect();
                assert_eq!(actions, vec![Kind::OnCreate, Kind::OnMatch]);
                let on_match = merge.merge_actions().nth(1).unwrap();
                assert_eq!(on_match.items().count(), 2);
            },
        );
    }

    #[test]
    fn set_item_shapes() {
        clauses(
            "MATCH (n) SET n.age = 33, n = {name: 'x'}, n += $extra, n:Admin:Active",
            |clauses| {
                let set = clauses[1];
                let kinds: Vec<Kind> = set.items().map(|i| i.kind()).collect();
                assert_eq!(
                    kinds,
                    vec![
                        Kind::SetProperty,
                        Kind::SetAllProperties,
                        Kind::MergeProperties,
                        Kind::SetLabels,
                    ]
                );
                let labels = set.items().nth(3).unwrap();
                assert_eq!(labels.labels().count(), 2);
            },
        );
    }

    #[test]
    fn remove_item_shapes() {
        clauses("MATCH (n) REMOVE n.age, n:Admin", |clauses| {
            let remove = clauses[1];
            let kinds: Vec<Kind> = remove.items().map(|i| i.kind()).collect();
            assert_eq!(kinds, vec![Kind::RemoveProperty, Kind::RemoveLabels]);
        });
    }

    #[test]
    fn detach_delete() {
        clauses("MATCH (n) DETACH DELETE n, m", |clauses| {
            let delete = clauses[1];
            assert_eq!(delete.kind(), Kind::Delete);
            assert!(delete.delete_is_detach());
            assert_eq!(delete.delete_expressions().count(), 2);
        });
    }

    #[test]
    fn foreach_holds_updating_clauses() {
        clauses(
            "FOREACH (x IN [1, 2] | CREATE (n {v: x}) SET n.done = true)",
            |clauses| {
                let foreach = clauses[0];
                assert_eq!(foreach.kind(), Kind::Foreach);
                assert_eq!(foreach.identifier().unwrap().text(), Some("x"));
                let inner: Vec<Kind> = foreach.items().map(|c| c.kind()).collect();
                assert!(inner.is_empty()); // clauses are not "items"
                assert_eq!(foreach.children().len(), 4);
            },
        );
    }

    #[test]
    fn unwind_and_with() {
        clauses(
            "UNWIND [1, 2, 3] AS x WITH x WHERE x > 1 RETURN x",
            |clauses| {
                assert_eq!(clauses[0].kind(), Kind::Unwind);
                assert_eq!(clauses[0].alias().unwrap().text(), Some("x"));
                assert_eq!(clauses[1].kind(), Kind::With);
                assert!(clauses[1].predicate().is_some());
                assert_eq!(clauses[2].kind(), Kind::Return);
            },
        );
    }

    #[test]
    fn call_with_yield() {
        clauses("CALL db.labels() YIELD label AS l RETURN l", |clauses| {
            let call = clauses[0];
            assert_eq!(call.kind(), Kind::Call);
            assert_eq!(call.call_proc().unwrap().text(), Some("db.labels"));
            assert_eq!(call.args().count(), 0);
            let projection = call.projections().next().unwrap();
            assert_eq!(projection.alias().unwrap().text(), Some("l"));
        });
    }

    #[test]
    fn load_csv() {
        clauses(
            "LOAD CSV WITH HEADERS FROM 'file:///people.csv' AS row FIELDTERMINATOR ';' RETURN row",
            |clauses| {
                let load = clauses[0];
                assert_eq!(load.kind(), Kind::LoadCsv);
                assert!(load.load_csv_has_headers());
                assert_eq!(
                    load.load_csv_url().unwrap().string_value(),
                    Some("file:///people.csv")
                );
                assert_eq!(load.load_csv_identifier().unwrap().text(), Some("row"));
                assert_eq!(
                    load.load_csv_field_terminator().unwrap().string_value(),
                    Some(";")
                );
            },
        );
    }

    #[test]
    fn start_points() {
        clauses(
            "START a = node(*), b = node(1, 2), c = rel:people(name = \"x\") RETURN a",
            |clauses| {
                let start = clauses[0];
                assert_eq!(start.kind(), Kind::Start);
                let kinds: Vec<Kind> = start.start_points().map(|s| s.kind()).collect();
                assert_eq!(
                    kinds,
                    vec![
                        Kind::AllNodesScan,
                        Kind::NodeIdLookup,
                        Kind::RelIndexLookup,
                    ]
                );
                let ids = start.start_points().nth(1).unwrap();
                assert_eq!(ids.lookup_ids().count(), 2);
            },
        );
    }

    #[test]
    fn union_separates_queries() {
        clauses("RETURN 1 UNION ALL RETURN 2", |clauses| {
            let kinds: Vec<Kind> = clauses.iter().map(|c| c.kind()).collect();
            assert_eq!(kinds, vec![Kind::Return, Kind::Union, Kind::Return]);
            assert!(clauses[1].union_all());
        });
    }
}
