//! Per-kind detail strings.
//!
//! A detail string summarizes a node's payload for the pretty-printer,
//! referring to child nodes by ordinal as `@N` rather than formatting the
//! whole subtree inline. The printer needs nothing kind-specific beyond
//! the kind name and this string.

use crate::ast::{AstNode, Kind, NodeRef, Payload};

fn r(node: &AstNode, i: NodeRef) -> String {
    format!("@{}", node.children[i].ordinal)
}

fn opt(node: &AstNode, i: Option<NodeRef>) -> Option<String> {
    i.map(|i| r(node, i))
}

fn list(node: &AstNode, refs: &[NodeRef]) -> String {
    let parts: Vec<String> = refs.iter().map(|&i| r(node, i)).collect();
    format!("[{}]", parts.join(", "))
}

fn escaped(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

pub(crate) fn detail(node: &AstNode) -> String {
    let mut parts: Vec<String> = Vec::new();
    match &node.payload {
        Payload::None | Payload::Union { all: false } => {
            if node.kind == Kind::MapProjectionAllProperties {
                return ".*".to_string();
            }
            return String::new();
        }
        Payload::Union { all: true } => return "ALL".to_string(),

        Payload::Text(text) => {
            return match node.kind {
                Kind::Integer | Kind::Float => text.clone(),
                Kind::Parameter => format!("${text}"),
                Kind::LineComment => format!("//{text}"),
                Kind::BlockComment => format!("/*{text}*/"),
                Kind::Error => format!("{text:?}"),
                _ => format!("`{text}`"),
            }
        }
        Payload::Str { value, quote } => return escaped(value, *quote),
        Payload::Command { name } => {
            parts.push(format!(":{name}"));
            if !node.children.is_empty() {
                let refs: Vec<NodeRef> = (0..node.children.len()).collect();
                parts.push(format!("args={}", list(node, &refs)));
            }
        }

        Payload::Statement { options, body } => {
            if !options.is_empty() {
                parts.push(format!("options={}", list(node, options)));
            }
            parts.push(format!("body={}", r(node, *body)));
        }
        Payload::CypherOption { version, params } => {
            if let Some(version) = opt(node, *version) {
                parts.push(format!("version={version}"));
            }
            if !params.is_empty() {
                parts.push(format!("params={}", list(node, params)));
            }
        }
        Payload::CypherOptionParam { name, value } => {
            return format!("{}={}", r(node, *name), r(node, *value));
        }
        Payload::Query { clauses } => parts.push(format!("clauses={}", list(node, clauses))),

        Payload::Match {
            optional,
            pattern,
            hints,
            predicate,
        } => {
            if *optional {
                parts.push("OPTIONAL".to_string());
            }
            parts.push(format!("pattern={}", r(node, *pattern)));
            if !hints.is_empty() {
                parts.push(format!("hints={}", list(node, hints)));
            }
            if let Some(predicate) = opt(node, *predicate) {
                parts.push(format!("where={predicate}"));
            }
        }
        Payload::UsingIndex {
            identifier,
            label,
            prop_name,
        } => {
            return format!(
                "INDEX={}:{}({})",
                r(node, *identifier),
                r(node, *label),
                r(node, *prop_name)
            );
        }
        Payload::UsingScan { identifier, label } => {
            return format!("SCAN={}:{}", r(node, *identifier), r(node, *label));
        }
        Payload::UsingJoin { identifiers } => {
            parts.push(format!("ON={}", list(node, identifiers)));
        }
        Payload::Merge { path, actions } => {
            parts.push(format!("path={}", r(node, *path)));
            if !actions.is_empty() {
                parts.push(format!("actions={}", list(node, actions)));
            }
        }
        Payload::MergeAction { items } => parts.push(format!("items={}", list(node, items))),
        Payload::Create { unique, pattern } => {
            if *unique {
                parts.push("UNIQUE".to_string());
            }
            parts.push(format!("pattern={}", r(node, *pattern)));
        }
        Payload::Items(items) => {
            return match node.kind {
                Kind::Pattern => format!("paths={}", list(node, items)),
                Kind::OrderBy => format!("items={}", list(node, items)),
                Kind::Set | Kind::Remove => format!("items={}", list(node, items)),
                _ => list(node, items),
            }
        }
        Payload::SetProperty {
            property,
            expression,
        } => return format!("{}={}", r(node, *property), r(node, *expression)),
        Payload::IdentExpression {
            identifier,
            expression,
        } => {
            let op = if node.kind == Kind::MergeProperties {
                "+="
            } else {
                "="
            };
            return format!("{}{}{}", r(node, *identifier), op, r(node, *expression));
        }
        Payload::IdentLabels { identifier, labels } => {
            let labels: Vec<String> = labels.iter().map(|&i| r(node, i)).collect();
            return format!("{}:{}", r(node, *identifier), labels.join(":"));
        }
        Payload::Delete {
            detach,
            expressions,
        } => {
            if *detach {
                parts.push("DETACH".to_string());
            }
            parts.push(format!("expressions={}", list(node, expressions)));
        }
        Payload::Wrap(i) => {
            return match node.kind {
                Kind::RemoveProperty => format!("property={}", r(node, *i)),
                Kind::AllNodesScan | Kind::AllRelsScan => {
                    format!("identifier={}", r(node, *i))
                }
                Kind::MapProjectionProperty => format!(".{}", r(node, *i)),
                Kind::MapProjectionIdentifier => r(node, *i),
                _ => format!("expression={}", r(node, *i)),
            }
        }
        Payload::Foreach {
            identifier,
            expression,
            clauses,
        } => {
            parts.push(format!("{} IN {}", r(node, *identifier), r(node, *expression)));
            parts.push(format!("clauses={}", list(node, clauses)));
        }
        Payload::Projections {
            distinct,
            include_existing,
            items,
            order_by,
            skip,
            limit,
            predicate,
        } => {
            if *distinct {
                parts.push("DISTINCT".to_string());
            }
            if *include_existing {
                parts.push("*".to_string());
            }
            parts.push(format!("projections={}", list(node, items)));
            if let Some(order_by) = opt(node, *order_by) {
                parts.push(format!("ORDER BY={order_by}"));
            }
            if let Some(skip) = opt(node, *skip) {
                parts.push(format!("SKIP={skip}"));
            }
            if let Some(limit) = opt(node, *limit) {
                parts.push(format!("LIMIT={limit}"));
            }
            if let Some(predicate) = opt(node, *predicate) {
                parts.push(format!("where={predicate}"));
            }
        }
        Payload::Unwind { expression, alias } => {
            return format!(
                "expression={}, alias={}",
                r(node, *expression),
                r(node, *alias)
            );
        }
        Payload::Call {
            proc,
            args,
            projections,
        } => {
            parts.push(format!("proc={}", r(node, *proc)));
            parts.push(format!("args={}", list(node, args)));
            if !projections.is_empty() {
                parts.push(format!("YIELD={}", list(node, projections)));
            }
        }
        Payload::LoadCsv {
            with_headers,
            url,
            identifier,
            field_terminator,
        } => {
            if *with_headers {
                parts.push("WITH HEADERS".to_string());
            }
            parts.push(format!("url={}", r(node, *url)));
            parts.push(format!("identifier={}", r(node, *identifier)));
            if let Some(field_terminator) = opt(node, *field_terminator) {
                parts.push(format!("field_terminator={field_terminator}"));
            }
        }
        Payload::Start { points, predicate } => {
            parts.push(format!("points={}", list(node, points)));
            if let Some(predicate) = opt(node, *predicate) {
                parts.push(format!("where={predicate}"));
            }
        }
        Payload::IndexLookup {
            identifier,
            index,
            prop_name,
            lookup,
        } => {
            return format!(
                "{}={}({}={})",
                r(node, *identifier),
                r(node, *index),
                r(node, *prop_name),
                r(node, *lookup)
            );
        }
        Payload::IdLookup { identifier, ids } => {
            return format!("{}={}", r(node, *identifier), list(node, ids));
        }
        Payload::SortItem {
            expression,
            ascending,
        } => {
            parts.push(format!("expression={}", r(node, *expression)));
            parts.push(if *ascending { "ASCENDING" } else { "DESCENDING" }.to_string());
        }
        Payload::Projection { expression, alias } => {
            parts.push(format!("expression={}", r(node, *expression)));
            if let Some(alias) = opt(node, *alias) {
                parts.push(format!("alias={alias}"));
            }
        }
        Payload::NamedPath { identifier, path } => {
            return format!("{}={}", r(node, *identifier), r(node, *path));
        }
        Payload::ShortestPath { single, path } => {
            return format!("single={}, path={}", single, r(node, *path));
        }
        Payload::NodePattern {
            identifier,
            labels,
            properties,
        } => {
            let mut inner = String::new();
            if let Some(identifier) = opt(node, *identifier) {
                inner.push_str(&identifier);
            }
            for &label in labels {
                inner.push(':');
                inner.push_str(&r(node, label));
            }
            if let Some(properties) = opt(node, *properties) {
                if !inner.is_empty() {
                    inner.push(' ');
                }
                inner.push('{');
                inner.push_str(&properties);
                inner.push('}');
            }
            return format!("({inner})");
        }
        Payload::RelPattern {
            direction,
            identifier,
            reltypes,
            varlength,
            properties,
        } => {
            let mut inner = String::new();
            if let Some(identifier) = opt(node, *identifier) {
                inner.push_str(&identifier);
            }
            for (i, &reltype) in reltypes.iter().enumerate() {
                inner.push(if i == 0 { ':' } else { '|' });
                inner.push_str(&r(node, reltype));
            }
            if let Some(varlength) = opt(node, *varlength) {
                inner.push('*');
                inner.push_str(&varlength);
            }
            if let Some(properties) = opt(node, *properties) {
                if !inner.is_empty() {
                    inner.push(' ');
                }
                inner.push('{');
                inner.push_str(&properties);
                inner.push('}');
            }
            use crate::ast::Direction;
            let (left, right) = match direction {
                Direction::Inbound => ("<-[", "]-"),
                Direction::Outbound => ("-[", "]->"),
                Direction::Bidirectional => ("-[", "]-"),
            };
            return format!("{left}{inner}{right}");
        }
        Payload::Range { start, end } => {
            return format!(
                "{}..{}",
                opt(node, *start).unwrap_or_default(),
                opt(node, *end).unwrap_or_default()
            );
        }
        Payload::PropIndex { label, prop_name } => {
            return format!("ON=:{}({})", r(node, *label), r(node, *prop_name));
        }
        Payload::NodeConstraint {
            identifier,
            label,
            expression,
        } => {
            let assertion = match node.kind {
                Kind::CreateUniqueNodePropConstraint | Kind::DropUniqueNodePropConstraint => {
                    "IS UNIQUE"
                }
                _ => "ASSERT",
            };
            return format!(
                "ON=({}:{}), {}=({})",
                r(node, *identifier),
                r(node, *label),
                assertion,
                r(node, *expression)
            );
        }
        Payload::RelConstraint {
            identifier,
            reltype,
            expression,
        } => {
            return format!(
                "ON=()-[{}:{}]-(), ASSERT=({})",
                r(node, *identifier),
                r(node, *reltype),
                r(node, *expression)
            );
        }
        Payload::UnaryOperator { op, arg } => {
            return if op.is_postfix() {
                format!("{} {}", r(node, *arg), op.as_str())
            } else {
                format!("{} {}", op.as_str(), r(node, *arg))
            }
        }
        Payload::BinaryOperator { op, left, right } => {
            return format!("{} {} {}", r(node, *left), op.as_str(), r(node, *right));
        }
        Payload::Comparison { ops, args } => {
            let mut out = r(node, args[0]);
            for (op, &arg) in ops.iter().zip(&args[1..]) {
                out.push_str(&format!(" {} {}", op.as_str(), r(node, arg)));
            }
            return out;
        }
        Payload::Apply {
            func,
            distinct,
            args,
        } => {
            let refs: Vec<String> = args.iter().map(|&i| r(node, i)).collect();
            return format!(
                "{}({}{})",
                r(node, *func),
                if *distinct { "DISTINCT " } else { "" },
                refs.join(", ")
            );
        }
        Payload::ApplyAll { func, distinct } => {
            return format!(
                "{}({}*)",
                r(node, *func),
                if *distinct { "DISTINCT " } else { "" }
            );
        }
        Payload::PropertyOperator {
            expression,
            prop_name,
        } => return format!("{}.{}", r(node, *expression), r(node, *prop_name)),
        Payload::Subscript {
            expression,
            subscript,
        } => return format!("{}[{}]", r(node, *expression), r(node, *subscript)),
        Payload::Slice {
            expression,
            start,
            end,
        } => {
            return format!(
                "{}[{}..{}]",
                r(node, *expression),
                opt(node, *start).unwrap_or_default(),
                opt(node, *end).unwrap_or_default()
            );
        }
        Payload::LabelsOperator { expression, labels } => {
            let labels: Vec<String> = labels.iter().map(|&i| r(node, i)).collect();
            return format!("{}:{}", r(node, *expression), labels.join(":"));
        }
        Payload::MapProjection {
            expression,
            selectors,
        } => {
            let refs: Vec<String> = selectors.iter().map(|&i| r(node, i)).collect();
            return format!("{}{{{}}}", r(node, *expression), refs.join(", "));
        }
        Payload::MapProjectionLiteral {
            prop_name,
            expression,
        } => return format!("{}:{}", r(node, *prop_name), r(node, *expression)),
        Payload::Map { pairs } => {
            let entries: Vec<String> = pairs
                .iter()
                .map(|&(k, v)| format!("{}:{}", r(node, k), r(node, v)))
                .collect();
            return format!("{{{}}}", entries.join(", "));
        }
        Payload::Comprehension {
            identifier,
            expression,
            predicate,
            eval,
        } => {
            let mut out = format!("[{} IN {}", r(node, *identifier), r(node, *expression));
            if let Some(predicate) = opt(node, *predicate) {
                out.push_str(&format!(" WHERE {predicate}"));
            }
            if let Some(eval) = opt(node, *eval) {
                out.push_str(&format!(" | {eval}"));
            }
            out.push(']');
            return out;
        }
        Payload::PatternComprehension {
            identifier,
            pattern,
            predicate,
            eval,
        } => {
            let mut out = String::from("[");
            if let Some(identifier) = opt(node, *identifier) {
                out.push_str(&format!("{identifier}="));
            }
            out.push_str(&r(node, *pattern));
            if let Some(predicate) = opt(node, *predicate) {
                out.push_str(&format!(" WHERE {predicate}"));
            }
            out.push_str(&format!(" | {}", r(node, *eval)));
            out.push(']');
            return out;
        }
        Payload::Case {
            expression,
            alternatives,
            default,
        } => {
            if let Some(expression) = opt(node, *expression) {
                parts.push(format!("expression={expression}"));
            }
            let alts: Vec<String> = alternatives
                .iter()
                .map(|&(when, then)| format!("({}:{})", r(node, when), r(node, then)))
                .collect();
            parts.push(format!("alternatives=[{}]", alts.join(", ")));
            if let Some(default) = opt(node, *default) {
                parts.push(format!("default={default}"));
            }
        }
        Payload::Reduce {
            accumulator,
            init,
            identifier,
            expression,
            eval,
        } => {
            return format!(
                "[{}={}, {} IN {} | {}]",
                r(node, *accumulator),
                r(node, *init),
                r(node, *identifier),
                r(node, *expression),
                r(node, *eval)
            );
        }
    }
    parts.join(", ")
}
