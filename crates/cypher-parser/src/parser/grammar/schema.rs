//! Schema commands: index and constraint management.

use crate::ast::AstNode;
use crate::lexer::{Keyword, Symbol, TokenKind};
use crate::parser::{PResult, Parser};
use std::io::Read;

use super::{built, expression, identifier, name_token};

/// *IndexCommand*:
///     (**CREATE** | **DROP**) **INDEX ON :** Label **(** PropName **)**
pub(crate) fn index_command<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.peek()?.range.start();
    let create = p.eat_keyword(Keyword::Create)?;
    if !create {
        p.expect_keyword(Keyword::Drop)?;
    }
    p.expect_keyword(Keyword::Index)?;
    p.expect_keyword(Keyword::On)?;
    p.expect_symbol(Symbol::Colon)?;
    let (name, range) = name_token(p, "a label")?;
    let label = AstNode::new_label(name, range);
    p.expect_symbol(Symbol::LParen)?;
    let (name, range) = name_token(p, "a property name")?;
    let prop = AstNode::new_prop_name(name, range);
    p.expect_symbol(Symbol::RParen)?;

    let span = p.span_from(start);
    let node = if create {
        AstNode::new_create_node_prop_index(label, prop, span)
    } else {
        AstNode::new_drop_node_prop_index(label, prop, span)
    };
    Ok(built(node))
}

/// *ConstraintCommand*:
///     (**CREATE** | **DROP**) **CONSTRAINT ON (** Identifier **:** Label **)**
///         **ASSERT** Expression (**IS UNIQUE**)?
///     (**CREATE** | **DROP**) **CONSTRAINT ON ()-[** Identifier **:** Reltype
///         **]-() ASSERT** Expression
pub(crate) fn constraint_command<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.peek()?.range.start();
    let create = p.eat_keyword(Keyword::Create)?;
    if !create {
        p.expect_keyword(Keyword::Drop)?;
    }
    p.expect_keyword(Keyword::Constraint)?;
    p.expect_keyword(Keyword::On)?;
    p.expect_symbol(Symbol::LParen)?;

    // `ON ()` opens the relationship form; `ON (n:Label)` the node form.
    if p.at_symbol(Symbol::RParen)? {
        p.bump()?;
        return rel_constraint(p, create, start);
    }

    let ident = identifier(p)?;
    p.expect_symbol(Symbol::Colon)?;
    let (name, range) = name_token(p, "a label")?;
    let label = AstNode::new_label(name, range);
    p.expect_symbol(Symbol::RParen)?;
    p.expect_keyword(Keyword::Assert)?;
    let expr = expression::expression(p)?;

    let unique = if p.eat_keyword(Keyword::Is)? {
        p.expect_keyword(Keyword::Unique)?;
        true
    } else {
        false
    };

    let span = p.span_from(start);
    let node = match (create, unique) {
        (true, true) => AstNode::new_create_unique_node_prop_constraint(ident, label, expr, span),
        (false, true) => AstNode::new_drop_unique_node_prop_constraint(ident, label, expr, span),
        (true, false) => AstNode::new_create_node_prop_constraint(ident, label, expr, span),
        (false, false) => AstNode::new_drop_node_prop_constraint(ident, label, expr, span),
    };
    Ok(built(node))
}

fn rel_constraint<R: Read>(
    p: &mut Parser<'_, R>,
    create: bool,
    start: crate::lexer::InputPosition,
) -> PResult<AstNode> {
    p.eat_symbol(Symbol::Lt)?;
    p.expect_symbol(Symbol::Minus)?;
    p.expect_symbol(Symbol::LBracket)?;
    let ident = identifier(p)?;
    p.expect_symbol(Symbol::Colon)?;
    let (name, range) = name_token(p, "a relationship type")?;
    let reltype = AstNode::new_reltype(name, range);
    p.expect_symbol(Symbol::RBracket)?;
    p.expect_symbol(Symbol::Minus)?;
    p.eat_symbol(Symbol::Gt)?;
    p.expect_symbol(Symbol::LParen)?;
    p.expect_symbol(Symbol::RParen)?;
    p.expect_keyword(Keyword::Assert)?;
    let expr = expression::expression(p)?;

    if p.peek()?.kind == TokenKind::Keyword(Keyword::Is) {
        return p.fail("relationship property constraints cannot be unique");
    }

    let span = p.span_from(start);
    let node = if create {
        AstNode::new_create_rel_prop_constraint(ident, reltype, expr, span)
    } else {
        AstNode::new_drop_rel_prop_constraint(ident, reltype, expr, span)
    };
    Ok(built(node))
}

#[cfg(test)]
mod test {
    use crate::ast::Kind;
    use crate::Parser;

    fn body(input: &str, check: impl FnOnce(&crate::AstNode)) {
        let result = Parser::new(input).parse().unwrap();
        assert!(result.errors().is_empty(), "{:?}", result.errors());
        check(result.directive(0).and_then(|s| s.statement_body()).unwrap());
    }

    #[test]
    fn index_commands() {
        body("CREATE INDEX ON :Person(name);", |cmd| {
            assert_eq!(cmd.kind(), Kind::CreateNodePropIndex);
            assert_eq!(cmd.label().unwrap().text(), Some("Person"));
            assert_eq!(cmd.prop_name().unwrap().text(), Some("name"));
        });
        body("DROP INDEX ON :Person(name);", |cmd| {
            assert_eq!(cmd.kind(), Kind::DropNodePropIndex);
        });
    }

    #[test]
    fn unique_node_constraints() {
        body(
            "CREATE CONSTRAINT ON (n:Person) ASSERT n.email IS UNIQUE;",
            |cmd| {
                assert_eq!(cmd.kind(), Kind::CreateUniqueNodePropConstraint);
                assert_eq!(cmd.identifier().unwrap().text(), Some("n"));
                assert_eq!(cmd.label().unwrap().text(), Some("Person"));
                let expr = cmd.expression().unwrap();
                assert_eq!(expr.kind(), Kind::PropertyOperator);
                assert_eq!(expr.prop_name().unwrap().text(), Some("email"));
            },
        );
        body(
            "DROP CONSTRAINT ON (n:Person) ASSERT n.email IS UNIQUE;",
            |cmd| {
                assert_eq!(cmd.kind(), Kind::DropUniqueNodePropConstraint);
            },
        );
    }

    #[test]
    fn plain_node_constraints() {
        body(
            "CREATE CONSTRAINT ON (n:Person) ASSERT exists(n.email);",
            |cmd| {
                assert_eq!(cmd.kind(), Kind::CreateNodePropConstraint);
                assert_eq!(cmd.expression().unwrap().kind(), Kind::Apply);
            },
        );
    }

    #[test]
    fn rel_constraints() {
        body(
            "CREATE CONSTRAINT ON ()-[r:KNOWS]-() ASSERT exists(r.since);",
            |cmd| {
                assert_eq!(cmd.kind(), Kind::CreateRelPropConstraint);
                assert_eq!(cmd.identifier().unwrap().text(), Some("r"));
                assert_eq!(cmd.reltype().unwrap().text(), Some("KNOWS"));
            },
        );
        body(
            "DROP CONSTRAINT ON ()-[r:KNOWS]->() ASSERT exists(r.since);",
            |cmd| {
                assert_eq!(cmd.kind(), Kind::DropRelPropConstraint);
            },
        );
    }
}
