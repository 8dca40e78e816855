//! Expression productions.
//!
//! Operator-precedence climbing, loosest binding first: OR, XOR, AND, NOT,
//! comparison (including `IS NULL` / `IS NOT NULL`), addition, multiplication,
//! exponentiation (right-associative), unary minus, string/list operators
//! (STARTS WITH, ENDS WITH, CONTAINS, IN, `=~`), subscript/slice/property
//! access, atoms.

use crate::ast::{AstNode, Kind, Operator};
use crate::lexer::{Keyword, Symbol, TokenKind};
use crate::parser::{PResult, Parser};
use std::io;
use std::io::Read;

use super::{built, identifier, name_token, pattern};

pub(crate) fn expression<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    p.descend(or_expression)
}

/// A left-associative run of keyword operators over the next tighter
/// level.
fn binary_keyword_level<R: Read>(
    p: &mut Parser<'_, R>,
    ops: &[(Keyword, Operator)],
    next: fn(&mut Parser<'_, R>) -> PResult<AstNode>,
) -> PResult<AstNode> {
    let mut lhs = next(p)?;
    'scan: loop {
        for &(keyword, op) in ops {
            if p.eat_keyword(keyword)? {
                let start = lhs.range().start();
                let rhs = next(p)?;
                lhs = built(AstNode::new_binary_operator(
                    op,
                    lhs,
                    rhs,
                    p.span_from(start),
                ));
                continue 'scan;
            }
        }
        break;
    }
    Ok(lhs)
}

/// A left-associative run of symbol operators over the next tighter level.
fn binary_symbol_level<R: Read>(
    p: &mut Parser<'_, R>,
    ops: &[(Symbol, Operator)],
    next: fn(&mut Parser<'_, R>) -> PResult<AstNode>,
) -> PResult<AstNode> {
    let mut lhs = next(p)?;
    'scan: loop {
        for &(symbol, op) in ops {
            if p.eat_symbol(symbol)? {
                let start = lhs.range().start();
                let rhs = next(p)?;
                lhs = built(AstNode::new_binary_operator(
                    op,
                    lhs,
                    rhs,
                    p.span_from(start),
                ));
                continue 'scan;
            }
        }
        break;
    }
    Ok(lhs)
}

fn or_expression<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    binary_keyword_level(p, &[(Keyword::Or, Operator::Or)], xor_expression)
}

fn xor_expression<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    binary_keyword_level(p, &[(Keyword::Xor, Operator::Xor)], and_expression)
}

fn and_expression<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    binary_keyword_level(p, &[(Keyword::And, Operator::And)], not_expression)
}

fn not_expression<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    if p.at_keyword(Keyword::Not)? {
        let start = p.bump()?.range.start();
        let operand = p.descend(not_expression)?;
        return Ok(built(AstNode::new_unary_operator(
            Operator::Not,
            operand,
            p.span_from(start),
        )));
    }
    comparison_expression(p)
}

/// Comparisons chain: `a < b <= c` is one node with operators `[<, <=]`
/// over three operands. `IS NULL` and `IS NOT NULL` bind at this level; a
/// bare `IS` is left for an outer production (`ASSERT … IS UNIQUE`).
fn comparison_expression<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let first = addition_expression(p)?;
    let start = first.range().start();
    let mut operands = vec![first];
    let mut ops = Vec::new();

    loop {
        if p.at_keyword(Keyword::Is)? {
            let second = p.peek_n(1)?.kind;
            let third = p.peek_n(2)?.kind;
            let op = if second == TokenKind::Keyword(Keyword::Null) {
                Some((Operator::IsNull, 2))
            } else if second == TokenKind::Keyword(Keyword::Not)
                && third == TokenKind::Keyword(Keyword::Null)
            {
                Some((Operator::IsNotNull, 3))
            } else {
                None
            };
            if let Some((op, tokens)) = op {
                for _ in 0..tokens {
                    p.bump()?;
                }
                if let Some(last) = operands.pop() {
                    let last_start = last.range().start();
                    operands.push(built(AstNode::new_unary_operator(
                        op,
                        last,
                        p.span_from(last_start),
                    )));
                }
                continue;
            }
            break;
        }

        let op = match p.peek()?.kind {
            TokenKind::Symbol(Symbol::Equals) => Operator::Equal,
            TokenKind::Symbol(Symbol::NotEquals) => Operator::NotEqual,
            TokenKind::Symbol(Symbol::Lt) => Operator::LessThan,
            TokenKind::Symbol(Symbol::Gt) => Operator::GreaterThan,
            TokenKind::Symbol(Symbol::Lte) => Operator::LessThanOrEqual,
            TokenKind::Symbol(Symbol::Gte) => Operator::GreaterThanOrEqual,
            _ => break,
        };
        p.bump()?;
        operands.push(addition_expression(p)?);
        ops.push(op);
    }

    if ops.is_empty() {
        Ok(operands.swap_remove(0))
    } else {
        Ok(built(AstNode::new_comparison(
            ops,
            operands,
            p.span_from(start),
        )))
    }
}

fn addition_expression<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    binary_symbol_level(
        p,
        &[(Symbol::Plus, Operator::Plus), (Symbol::Minus, Operator::Minus)],
        multiplication_expression,
    )
}

fn multiplication_expression<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    binary_symbol_level(
        p,
        &[
            (Symbol::Star, Operator::Mult),
            (Symbol::Slash, Operator::Div),
            (Symbol::Percent, Operator::Mod),
        ],
        power_expression,
    )
}

/// Right-associative: `2 ^ 3 ^ 2` is `2 ^ (3 ^ 2)`.
fn power_expression<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let lhs = unary_expression(p)?;
    if p.eat_symbol(Symbol::Caret)? {
        let start = lhs.range().start();
        let rhs = p.descend(power_expression)?;
        return Ok(built(AstNode::new_binary_operator(
            Operator::Pow,
            lhs,
            rhs,
            p.span_from(start),
        )));
    }
    Ok(lhs)
}

fn unary_expression<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let op = match p.peek()?.kind {
        TokenKind::Symbol(Symbol::Plus) => Some(Operator::UnaryPlus),
        TokenKind::Symbol(Symbol::Minus) => Some(Operator::UnaryMinus),
        _ => None,
    };
    if let Some(op) = op {
        let start = p.bump()?.range.start();
        let operand = p.descend(unary_expression)?;
        return Ok(built(AstNode::new_unary_operator(
            op,
            operand,
            p.span_from(start),
        )));
    }
    string_list_expression(p)
}

fn string_list_expression<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let mut lhs = postfix_expression(p)?;
    loop {
        let op = if p.at_keyword(Keyword::Starts)? {
            p.bump()?;
            p.expect_keyword(Keyword::With)?;
            Operator::StartsWith
        } else if p.at_keyword(Keyword::Ends)? {
            p.bump()?;
            p.expect_keyword(Keyword::With)?;
            Operator::EndsWith
        } else if p.eat_keyword(Keyword::Contains)? {
            Operator::Contains
        } else if p.eat_keyword(Keyword::In)? {
            Operator::In
        } else if p.eat_symbol(Symbol::EqualsTilde)? {
            Operator::Regex
        } else {
            break;
        };
        let start = lhs.range().start();
        let rhs = postfix_expression(p)?;
        lhs = built(AstNode::new_binary_operator(
            op,
            lhs,
            rhs,
            p.span_from(start),
        ));
    }
    Ok(lhs)
}

fn postfix_expression<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let atom = atom(p)?;
    postfix_operators(p, atom)
}

fn postfix_operators<R: Read>(p: &mut Parser<'_, R>, mut expr: AstNode) -> PResult<AstNode> {
    loop {
        if p.at_symbol(Symbol::Dot)? {
            p.bump()?;
            let (name, range) = name_token(p, "a property name")?;
            let prop = AstNode::new_prop_name(name, range);
            let start = expr.range().start();
            expr = built(AstNode::new_property_operator(expr, prop, p.span_from(start)));
        } else if p.at_symbol(Symbol::LBracket)? {
            expr = subscript_or_slice(p, expr)?;
        } else if p.at_symbol(Symbol::Colon)? && at_name(p, 1)? {
            let start = expr.range().start();
            let mut labels = Vec::new();
            while p.at_symbol(Symbol::Colon)? && at_name(p, 1)? {
                p.bump()?;
                let (name, range) = name_token(p, "a label")?;
                labels.push(AstNode::new_label(name, range));
            }
            expr = built(AstNode::new_labels_operator(expr, labels, p.span_from(start)));
        } else if p.at_symbol(Symbol::LBrace)? && expr.kind() == Kind::Identifier {
            expr = map_projection(p, expr)?;
        } else {
            break;
        }
    }
    Ok(expr)
}

/// Property access only, for SET/REMOVE item left-hand sides, where a
/// trailing `:Label` belongs to the item, not to a labels operator.
pub(crate) fn property_chain<R: Read>(
    p: &mut Parser<'_, R>,
    mut expr: AstNode,
) -> PResult<AstNode> {
    while p.at_symbol(Symbol::Dot)? {
        p.bump()?;
        let (name, range) = name_token(p, "a property name")?;
        let prop = AstNode::new_prop_name(name, range);
        let start = expr.range().start();
        expr = built(AstNode::new_property_operator(expr, prop, p.span_from(start)));
    }
    Ok(expr)
}

fn subscript_or_slice<R: Read>(p: &mut Parser<'_, R>, expr: AstNode) -> PResult<AstNode> {
    let start = expr.range().start();
    p.expect_symbol(Symbol::LBracket)?;
    if p.eat_symbol(Symbol::DotDot)? {
        let end = if p.at_symbol(Symbol::RBracket)? {
            None
        } else {
            Some(expression(p)?)
        };
        p.expect_symbol(Symbol::RBracket)?;
        return Ok(built(AstNode::new_slice(expr, None, end, p.span_from(start))));
    }
    let index = expression(p)?;
    if p.eat_symbol(Symbol::DotDot)? {
        let end = if p.at_symbol(Symbol::RBracket)? {
            None
        } else {
            Some(expression(p)?)
        };
        p.expect_symbol(Symbol::RBracket)?;
        return Ok(built(AstNode::new_slice(
            expr,
            Some(index),
            end,
            p.span_from(start),
        )));
    }
    p.expect_symbol(Symbol::RBracket)?;
    Ok(built(AstNode::new_subscript(expr, index, p.span_from(start))))
}

fn at_name<R: Read>(p: &mut Parser<'_, R>, n: usize) -> io::Result<bool> {
    Ok(matches!(
        p.peek_n(n)?.kind,
        TokenKind::Ident | TokenKind::QuotedIdent | TokenKind::Keyword(_)
    ))
}

fn atom<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    if p.at_symbol(Symbol::LParen)? {
        if looks_like_pattern_path(p, 0)? {
            return pattern::pattern_path(p);
        }
        p.bump()?;
        let inner = expression(p)?;
        p.expect_symbol(Symbol::RParen)?;
        return Ok(inner);
    }
    if p.at_symbol(Symbol::LBracket)? {
        return list_atom(p);
    }
    if p.at_symbol(Symbol::LBrace)? {
        return map_literal(p);
    }

    let applied = p.peek_n(1)?.kind == TokenKind::Symbol(Symbol::LParen);
    let kind = p.peek()?.kind;
    match kind {
        TokenKind::Int => {
            let token = p.bump()?;
            Ok(AstNode::new_integer(token.text, token.range))
        }
        TokenKind::Float => {
            let token = p.bump()?;
            Ok(AstNode::new_float(token.text, token.range))
        }
        TokenKind::Str { quote } => {
            let token = p.bump()?;
            Ok(AstNode::new_string(token.text, quote, token.range))
        }
        TokenKind::Param => {
            let token = p.bump()?;
            Ok(AstNode::new_parameter(token.text, token.range))
        }
        TokenKind::Keyword(Keyword::True) => Ok(AstNode::new_true(p.bump()?.range)),
        TokenKind::Keyword(Keyword::False) => Ok(AstNode::new_false(p.bump()?.range)),
        TokenKind::Keyword(Keyword::Null) => Ok(AstNode::new_null(p.bump()?.range)),
        TokenKind::Keyword(Keyword::Case) => case_expression(p),
        TokenKind::Keyword(
            kw @ (Keyword::Filter
            | Keyword::All
            | Keyword::Any
            | Keyword::Single
            | Keyword::None),
        ) if applied => filter_expression(p, kw),
        TokenKind::Keyword(Keyword::Extract) if applied => extract_expression(p),
        TokenKind::Keyword(Keyword::Reduce) if applied => reduce_expression(p),
        TokenKind::Ident | TokenKind::QuotedIdent => name_atom(p),
        TokenKind::Keyword(kw) if keyword_allowed_as_identifier(kw) => name_atom(p),
        _ => {
            let found = p.describe_current()?;
            p.fail(format!("expected an expression, found {found}"))
        }
    }
}

/// Keywords that open clauses or structure other productions never start
/// an expression; everything else is admitted as an identifier in context.
fn keyword_allowed_as_identifier(kw: Keyword) -> bool {
    !matches!(
        kw,
        Keyword::Match
            | Keyword::Optional
            | Keyword::Create
            | Keyword::Merge
            | Keyword::Delete
            | Keyword::Detach
            | Keyword::Set
            | Keyword::Remove
            | Keyword::Foreach
            | Keyword::With
            | Keyword::Unwind
            | Keyword::Start
            | Keyword::Call
            | Keyword::Return
            | Keyword::Load
            | Keyword::Union
            | Keyword::Using
            | Keyword::Drop
            | Keyword::Where
            | Keyword::When
            | Keyword::Then
            | Keyword::Else
            | Keyword::End
    )
}

/// An identifier-like atom: plain identifier, function application,
/// `count(*)`, `shortestPath(…)`, or a map projection base.
fn name_atom<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let (name, range) = name_token(p, "an expression")?;

    if p.at_symbol(Symbol::LParen)? {
        let single = name.eq_ignore_ascii_case("shortestPath");
        if single || name.eq_ignore_ascii_case("allShortestPaths") {
            p.bump()?;
            let path = pattern::pattern_path(p)?;
            p.expect_symbol(Symbol::RParen)?;
            return Ok(built(AstNode::new_shortest_path(
                single,
                path,
                p.span_from(range.start()),
            )));
        }

        let func = AstNode::new_function_name(name, range);
        p.bump()?;
        let distinct = p.eat_keyword(Keyword::Distinct)?;
        if p.eat_symbol(Symbol::Star)? {
            p.expect_symbol(Symbol::RParen)?;
            return Ok(built(AstNode::new_apply_all(
                func,
                distinct,
                p.span_from(range.start()),
            )));
        }
        let mut args = Vec::new();
        if !p.at_symbol(Symbol::RParen)? {
            loop {
                args.push(expression(p)?);
                if !p.eat_symbol(Symbol::Comma)? {
                    break;
                }
            }
        }
        p.expect_symbol(Symbol::RParen)?;
        return Ok(built(AstNode::new_apply(
            func,
            distinct,
            args,
            p.span_from(range.start()),
        )));
    }

    Ok(AstNode::new_identifier(name, range))
}

/// Decide whether the `(` at lookahead position `at` opens a pattern path
/// rather than a parenthesized expression: scan to the matching `)` and
/// look for a relationship to follow. Bounded lookahead; a giant ambiguous
/// prefix falls back to expression parsing.
pub(crate) fn looks_like_pattern_path<R: Read>(
    p: &mut Parser<'_, R>,
    at: usize,
) -> io::Result<bool> {
    const SCAN_LIMIT: usize = 200;
    let mut depth = 0usize;
    let mut i = at;
    loop {
        match p.peek_n(i)?.kind {
            TokenKind::Symbol(Symbol::LParen) => depth += 1,
            TokenKind::Symbol(Symbol::RParen) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            TokenKind::Eof => return Ok(false),
            _ => {}
        }
        i += 1;
        if i > at + SCAN_LIMIT {
            return Ok(false);
        }
    }
    let next = p.peek_n(i + 1)?.kind;
    let after = p.peek_n(i + 2)?.kind;
    Ok(matches!(
        (next, after),
        (
            TokenKind::Symbol(Symbol::Minus),
            TokenKind::Symbol(Symbol::Minus) | TokenKind::Symbol(Symbol::LBracket)
        ) | (TokenKind::Symbol(Symbol::Lt), TokenKind::Symbol(Symbol::Minus))
    ))
}

/// `[x IN xs WHERE p | e]`, `[p = (a)-->(b) | e]` or a plain list literal.
fn list_atom<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let second = p.peek_n(1)?.kind;
    let third = p.peek_n(2)?.kind;

    let comprehension = matches!(
        second,
        TokenKind::Ident | TokenKind::QuotedIdent | TokenKind::Keyword(_)
    ) && third == TokenKind::Keyword(Keyword::In);
    if comprehension {
        return list_comprehension(p);
    }

    let named_pattern = matches!(second, TokenKind::Ident | TokenKind::QuotedIdent)
        && third == TokenKind::Symbol(Symbol::Equals);
    let anon_pattern =
        second == TokenKind::Symbol(Symbol::LParen) && looks_like_pattern_path(p, 1)?;
    if named_pattern || anon_pattern {
        return pattern_comprehension(p);
    }

    collection_literal(p)
}

fn list_comprehension<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.expect_symbol(Symbol::LBracket)?.range.start();
    let ident = identifier(p)?;
    p.expect_keyword(Keyword::In)?;
    let list = expression(p)?;
    let predicate = if p.eat_keyword(Keyword::Where)? {
        Some(expression(p)?)
    } else {
        None
    };
    let eval = if p.eat_symbol(Symbol::Pipe)? {
        Some(expression(p)?)
    } else {
        None
    };
    p.expect_symbol(Symbol::RBracket)?;
    Ok(built(AstNode::new_list_comprehension(
        ident,
        list,
        predicate,
        eval,
        p.span_from(start),
    )))
}

fn pattern_comprehension<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.expect_symbol(Symbol::LBracket)?.range.start();
    let ident = if matches!(
        p.peek()?.kind,
        TokenKind::Ident | TokenKind::QuotedIdent
    ) && p.peek_n(1)?.kind == TokenKind::Symbol(Symbol::Equals)
    {
        let ident = identifier(p)?;
        p.expect_symbol(Symbol::Equals)?;
        Some(ident)
    } else {
        None
    };
    let path = pattern::pattern_path(p)?;
    let predicate = if p.eat_keyword(Keyword::Where)? {
        Some(expression(p)?)
    } else {
        None
    };
    p.expect_symbol(Symbol::Pipe)?;
    let eval = expression(p)?;
    p.expect_symbol(Symbol::RBracket)?;
    Ok(built(AstNode::new_pattern_comprehension(
        ident,
        path,
        predicate,
        eval,
        p.span_from(start),
    )))
}

fn collection_literal<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.expect_symbol(Symbol::LBracket)?.range.start();
    let mut elements = Vec::new();
    if !p.at_symbol(Symbol::RBracket)? {
        loop {
            elements.push(expression(p)?);
            if !p.eat_symbol(Symbol::Comma)? {
                break;
            }
        }
    }
    p.expect_symbol(Symbol::RBracket)?;
    Ok(built(AstNode::new_collection(elements, p.span_from(start))))
}

pub(crate) fn map_literal<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.expect_symbol(Symbol::LBrace)?.range.start();
    let mut pairs = Vec::new();
    if !p.at_symbol(Symbol::RBrace)? {
        loop {
            let (name, range) = name_token(p, "a property name")?;
            let key = AstNode::new_prop_name(name, range);
            p.expect_symbol(Symbol::Colon)?;
            let value = expression(p)?;
            pairs.push((key, value));
            if !p.eat_symbol(Symbol::Comma)? {
                break;
            }
        }
    }
    p.expect_symbol(Symbol::RBrace)?;
    Ok(built(AstNode::new_map(pairs, p.span_from(start))))
}

fn map_projection<R: Read>(p: &mut Parser<'_, R>, base: AstNode) -> PResult<AstNode> {
    let start = base.range().start();
    p.expect_symbol(Symbol::LBrace)?;
    let mut selectors = Vec::new();
    if !p.at_symbol(Symbol::RBrace)? {
        loop {
            selectors.push(map_projection_selector(p)?);
            if !p.eat_symbol(Symbol::Comma)? {
                break;
            }
        }
    }
    p.expect_symbol(Symbol::RBrace)?;
    Ok(built(AstNode::new_map_projection(
        base,
        selectors,
        p.span_from(start),
    )))
}

fn map_projection_selector<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    if p.at_symbol(Symbol::Dot)? {
        let start = p.bump()?.range.start();
        if p.eat_symbol(Symbol::Star)? {
            return Ok(AstNode::new_map_projection_all_properties(p.span_from(start)));
        }
        let (name, range) = name_token(p, "a property name")?;
        let prop = AstNode::new_prop_name(name, range);
        return Ok(built(AstNode::new_map_projection_property(
            prop,
            p.span_from(start),
        )));
    }
    if at_name(p, 0)? && p.peek_n(1)?.kind == TokenKind::Symbol(Symbol::Colon) {
        let (name, range) = name_token(p, "a property name")?;
        let key = AstNode::new_prop_name(name, range);
        p.expect_symbol(Symbol::Colon)?;
        let value = expression(p)?;
        let span = p.span_from(key.range().start());
        return Ok(built(AstNode::new_map_projection_literal(key, value, span)));
    }
    if at_name(p, 0)? {
        let ident = identifier(p)?;
        let span = ident.range();
        return Ok(built(AstNode::new_map_projection_identifier(ident, span)));
    }
    let found = p.describe_current()?;
    p.fail(format!("expected a map projection selector, found {found}"))
}

fn case_expression<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.expect_keyword(Keyword::Case)?.range.start();
    let subject = if p.at_keyword(Keyword::When)? {
        None
    } else {
        Some(expression(p)?)
    };
    let mut alternatives = Vec::new();
    while p.eat_keyword(Keyword::When)? {
        let when = expression(p)?;
        p.expect_keyword(Keyword::Then)?;
        let then = expression(p)?;
        alternatives.push((when, then));
    }
    if alternatives.is_empty() {
        return p.fail("expected WHEN in CASE expression");
    }
    let default = if p.eat_keyword(Keyword::Else)? {
        Some(expression(p)?)
    } else {
        None
    };
    p.expect_keyword(Keyword::End)?;
    Ok(built(AstNode::new_case(
        subject,
        alternatives,
        default,
        p.span_from(start),
    )))
}

/// `FILTER`/`ALL`/`ANY`/`SINGLE`/`NONE` `(x IN xs WHERE p)`.
fn filter_expression<R: Read>(p: &mut Parser<'_, R>, kw: Keyword) -> PResult<AstNode> {
    let start = p.bump()?.range.start();
    p.expect_symbol(Symbol::LParen)?;
    let ident = identifier(p)?;
    p.expect_keyword(Keyword::In)?;
    let list = expression(p)?;
    let predicate = if p.eat_keyword(Keyword::Where)? {
        Some(expression(p)?)
    } else {
        None
    };
    p.expect_symbol(Symbol::RParen)?;
    let span = p.span_from(start);
    let node = match kw {
        Keyword::Filter => AstNode::new_filter(ident, list, predicate, span),
        Keyword::All => AstNode::new_all(ident, list, predicate, span),
        Keyword::Any => AstNode::new_any(ident, list, predicate, span),
        Keyword::Single => AstNode::new_single(ident, list, predicate, span),
        _ => AstNode::new_none(ident, list, predicate, span),
    };
    Ok(built(node))
}

/// `EXTRACT(x IN xs | e)`.
fn extract_expression<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.expect_keyword(Keyword::Extract)?.range.start();
    p.expect_symbol(Symbol::LParen)?;
    let ident = identifier(p)?;
    p.expect_keyword(Keyword::In)?;
    let list = expression(p)?;
    let eval = if p.eat_symbol(Symbol::Pipe)? {
        Some(expression(p)?)
    } else {
        None
    };
    p.expect_symbol(Symbol::RParen)?;
    Ok(built(AstNode::new_extract(
        ident,
        list,
        eval,
        p.span_from(start),
    )))
}

/// `REDUCE(acc = init, x IN xs | e)`.
fn reduce_expression<R: Read>(p: &mut Parser<'_, R>) -> PResult<AstNode> {
    let start = p.expect_keyword(Keyword::Reduce)?.range.start();
    p.expect_symbol(Symbol::LParen)?;
    let accumulator = identifier(p)?;
    p.expect_symbol(Symbol::Equals)?;
    let init = expression(p)?;
    p.expect_symbol(Symbol::Comma)?;
    let ident = identifier(p)?;
    p.expect_keyword(Keyword::In)?;
    let list = expression(p)?;
    p.expect_symbol(Symbol::Pipe)?;
    let eval = expression(p)?;
    p.expect_symbol(Symbol::RParen)?;
    Ok(built(AstNode::new_reduce(
        accumulator,
        init,
        ident,
        list,
        eval,
        p.span_from(start),
    )))
}

#[cfg(test)]
mod test {
    use crate::ast::{AstNode, Kind, Operator};
    use crate::Parser;

    /// Parse `RETURN <fragment>` and hand the projected expression to the
    /// check closure.
    fn check(fragment: &str, check: impl FnOnce(&AstNode)) {
        let input = format!("RETURN {fragment}");
        let result = Parser::new(&input).parse().unwrap();
        assert!(result.errors().is_empty(), "{:?}", result.errors());
        let ret = result
            .directive(0)
            .and_then(|s| s.statement_body())
            .and_then(|q| q.query_clauses().next())
            .unwrap();
        let projection = ret.projections().next().unwrap();
        check(projection.expression().unwrap());
    }

    #[test]
    fn precedence_climbs() {
        check("1 + 2 * 3", |e| {
            assert_eq!(e.operator(), Some(Operator::Plus));
            assert_eq!(e.right().unwrap().operator(), Some(Operator::Mult));
        });
        check("NOT a AND b", |e| {
            // AND binds tighter than... NOT binds tighter than AND here:
            // NOT is above comparison, below AND.
            assert_eq!(e.operator(), Some(Operator::And));
            assert_eq!(e.left().unwrap().operator(), Some(Operator::Not));
        });
        check("2 ^ 3 ^ 2", |e| {
            assert_eq!(e.operator(), Some(Operator::Pow));
            assert_eq!(e.right().unwrap().operator(), Some(Operator::Pow));
        });
    }

    #[test]
    fn comparisons_chain() {
        check("1 < 2 <= 3", |e| {
            assert_eq!(e.kind(), Kind::Comparison);
            assert_eq!(
                e.comparison_operators(),
                &[Operator::LessThan, Operator::LessThanOrEqual]
            );
            assert_eq!(e.comparison_operands().count(), 3);
        });
    }

    #[test]
    fn is_null_is_postfix() {
        check("n.missing IS NULL", |e| {
            assert_eq!(e.kind(), Kind::UnaryOperator);
            assert_eq!(e.operator(), Some(Operator::IsNull));
            assert_eq!(e.unary_operand().unwrap().kind(), Kind::PropertyOperator);
        });
        check("n.missing IS NOT NULL", |e| {
            assert_eq!(e.operator(), Some(Operator::IsNotNull));
        });
    }

    #[test]
    fn string_operators() {
        check("name STARTS WITH 'Jo' OR name ENDS WITH 'an'", |e| {
            assert_eq!(e.operator(), Some(Operator::Or));
            assert_eq!(e.left().unwrap().operator(), Some(Operator::StartsWith));
            assert_eq!(e.right().unwrap().operator(), Some(Operator::EndsWith));
        });
        check("1 IN [1, 2, 3]", |e| {
            assert_eq!(e.operator(), Some(Operator::In));
            assert_eq!(e.right().unwrap().kind(), Kind::Collection);
        });
        check("name =~ '[A-Z].*'", |e| {
            assert_eq!(e.operator(), Some(Operator::Regex));
        });
    }

    #[test]
    fn subscripts_and_slices() {
        check("xs[0]", |e| {
            assert_eq!(e.kind(), Kind::Subscript);
            assert_eq!(e.subscript().unwrap().text(), Some("0"));
        });
        check("xs[1..2]", |e| {
            assert_eq!(e.kind(), Kind::Slice);
            assert_eq!(e.range_start().unwrap().text(), Some("1"));
            assert_eq!(e.range_end().unwrap().text(), Some("2"));
        });
        check("xs[..2]", |e| {
            assert_eq!(e.kind(), Kind::Slice);
            assert!(e.range_start().is_none());
        });
    }

    #[test]
    fn labels_operator() {
        check("n:Person:Admin", |e| {
            assert_eq!(e.kind(), Kind::LabelsOperator);
            let labels: Vec<&str> = e.labels().filter_map(|l| l.text()).collect();
            assert_eq!(labels, vec!["Person", "Admin"]);
        });
    }

    #[test]
    fn function_application() {
        check("count(*)", |e| {
            assert_eq!(e.kind(), Kind::ApplyAll);
            assert_eq!(e.function().unwrap().text(), Some("count"));
        });
        check("count(DISTINCT n)", |e| {
            assert_eq!(e.kind(), Kind::Apply);
            assert!(e.is_distinct());
            assert_eq!(e.args().count(), 1);
        });
        check("coalesce(a.b, 'x')", |e| {
            assert_eq!(e.kind(), Kind::Apply);
            assert_eq!(e.args().count(), 2);
        });
    }

    #[test]
    fn case_expressions() {
        check("CASE WHEN a THEN 1 ELSE 2 END", |e| {
            assert_eq!(e.kind(), Kind::Case);
            assert!(e.expression().is_none());
            assert_eq!(e.pairs().count(), 1);
            assert_eq!(e.case_default().unwrap().text(), Some("2"));
        });
        check("CASE n.eyes WHEN 'blue' THEN 1 WHEN 'brown' THEN 2 END", |e| {
            assert_eq!(e.expression().unwrap().kind(), Kind::PropertyOperator);
            assert_eq!(e.pairs().count(), 2);
        });
    }

    #[test]
    fn comprehensions() {
        check("[x IN xs WHERE x > 2 | x * 2]", |e| {
            assert_eq!(e.kind(), Kind::ListComprehension);
            assert_eq!(e.identifier().unwrap().text(), Some("x"));
            assert!(e.comprehension_predicate().is_some());
            assert!(e.eval().is_some());
        });
        check("ALL(x IN xs WHERE x > 0)", |e| {
            assert_eq!(e.kind(), Kind::All);
        });
        check("EXTRACT(x IN xs | x.name)", |e| {
            assert_eq!(e.kind(), Kind::Extract);
        });
        check("REDUCE(acc = 0, x IN xs | acc + x)", |e| {
            assert_eq!(e.kind(), Kind::Reduce);
            assert_eq!(e.reduce_accumulator().unwrap().text(), Some("acc"));
            assert_eq!(e.reduce_init().unwrap().text(), Some("0"));
        });
        check("[p = (a)-->(b) | length(p)]", |e| {
            assert_eq!(e.kind(), Kind::PatternComprehension);
            assert_eq!(e.identifier().unwrap().text(), Some("p"));
        });
    }

    #[test]
    fn map_literals_and_projections() {
        check("{name: 'Alice', age: 32}", |e| {
            assert_eq!(e.kind(), Kind::Map);
            assert_eq!(e.pairs().count(), 2);
        });
        check("n{.name, .*, id: 42, extra}", |e| {
            assert_eq!(e.kind(), Kind::MapProjection);
            let kinds: Vec<Kind> = e.map_selectors().map(|s| s.kind()).collect();
            assert_eq!(
                kinds,
                vec![
                    Kind::MapProjectionProperty,
                    Kind::MapProjectionAllProperties,
                    Kind::MapProjectionLiteral,
                    Kind::MapProjectionIdentifier,
                ]
            );
        });
    }

    #[test]
    fn pattern_expressions() {
        check("(a)-->(b)", |e| {
            assert_eq!(e.kind(), Kind::PatternPath);
            assert_eq!(e.items().count(), 3);
        });
        check("(1 + 2) * 3", |e| {
            assert_eq!(e.operator(), Some(Operator::Mult));
            assert_eq!(e.left().unwrap().operator(), Some(Operator::Plus));
        });
    }

    #[test]
    fn keywords_in_identifier_position() {
        check("order", |e| {
            assert_eq!(e.kind(), Kind::Identifier);
            assert_eq!(e.text(), Some("order"));
        });
        check("`match`", |e| {
            assert_eq!(e.kind(), Kind::Identifier);
            assert_eq!(e.text(), Some("match"));
        });
    }

    #[test]
    fn unary_minus() {
        check("-n.age", |e| {
            assert_eq!(e.operator(), Some(Operator::UnaryMinus));
        });
    }
}
