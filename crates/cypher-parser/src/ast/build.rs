//! Constructors, one per grammar production.
//!
//! Every composite constructor takes ownership of its reference arguments,
//! validates their kinds against the kind hierarchy, and stores them in the
//! node's children vector; the payload keeps indices into that vector, so a
//! reference attribute always points at a child. A constructor handed a
//! node of the wrong kind returns `None`; that is a programmer error in the
//! caller, caught at construction time.

use crate::ast::{AstNode, Direction, Kind, NodeRef, Operator, Payload};
use crate::lexer::InputRange;

/// Children vector under construction.
struct Children {
    nodes: Vec<AstNode>,
}

impl Children {
    fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    fn add(&mut self, node: AstNode) -> NodeRef {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn add_opt(&mut self, node: Option<AstNode>) -> Option<NodeRef> {
        node.map(|n| self.add(n))
    }

    fn add_all(&mut self, nodes: Vec<AstNode>) -> Vec<NodeRef> {
        nodes.into_iter().map(|n| self.add(n)).collect()
    }
}

fn check(node: &AstNode, kind: Kind) -> Option<()> {
    if node.instance_of(kind) {
        Some(())
    } else {
        None
    }
}

fn check_all(nodes: &[AstNode], kind: Kind) -> Option<()> {
    for node in nodes {
        check(node, kind)?;
    }
    Some(())
}

fn check_opt(node: &Option<AstNode>, kind: Kind) -> Option<()> {
    match node {
        Some(node) => check(node, kind),
        None => Some(()),
    }
}

fn leaf(kind: Kind, text: String, range: InputRange) -> AstNode {
    AstNode::new(kind, Payload::Text(text), Vec::new(), range)
}

impl AstNode {
    // --- terminals ----------------------------------------------------

    pub fn new_identifier<S: Into<String>>(name: S, range: InputRange) -> AstNode {
        leaf(Kind::Identifier, name.into(), range)
    }

    pub fn new_label<S: Into<String>>(name: S, range: InputRange) -> AstNode {
        leaf(Kind::Label, name.into(), range)
    }

    pub fn new_reltype<S: Into<String>>(name: S, range: InputRange) -> AstNode {
        leaf(Kind::Reltype, name.into(), range)
    }

    pub fn new_prop_name<S: Into<String>>(name: S, range: InputRange) -> AstNode {
        leaf(Kind::PropName, name.into(), range)
    }

    pub fn new_function_name<S: Into<String>>(name: S, range: InputRange) -> AstNode {
        leaf(Kind::FunctionName, name.into(), range)
    }

    pub fn new_proc_name<S: Into<String>>(name: S, range: InputRange) -> AstNode {
        leaf(Kind::ProcName, name.into(), range)
    }

    pub fn new_index_name<S: Into<String>>(name: S, range: InputRange) -> AstNode {
        leaf(Kind::IndexName, name.into(), range)
    }

    /// The integer's source spelling is kept verbatim, so decimal, hex and
    /// octal forms survive printing.
    pub fn new_integer<S: Into<String>>(text: S, range: InputRange) -> AstNode {
        leaf(Kind::Integer, text.into(), range)
    }

    pub fn new_float<S: Into<String>>(text: S, range: InputRange) -> AstNode {
        leaf(Kind::Float, text.into(), range)
    }

    pub fn new_string<S: Into<String>>(value: S, quote: char, range: InputRange) -> AstNode {
        AstNode::new(
            Kind::String,
            Payload::Str {
                value: value.into(),
                quote,
            },
            Vec::new(),
            range,
        )
    }

    pub fn new_parameter<S: Into<String>>(name: S, range: InputRange) -> AstNode {
        leaf(Kind::Parameter, name.into(), range)
    }

    pub fn new_true(range: InputRange) -> AstNode {
        AstNode::new(Kind::True, Payload::None, Vec::new(), range)
    }

    pub fn new_false(range: InputRange) -> AstNode {
        AstNode::new(Kind::False, Payload::None, Vec::new(), range)
    }

    pub fn new_null(range: InputRange) -> AstNode {
        AstNode::new(Kind::Null, Payload::None, Vec::new(), range)
    }

    pub fn new_line_comment<S: Into<String>>(text: S, range: InputRange) -> AstNode {
        leaf(Kind::LineComment, text.into(), range)
    }

    pub fn new_block_comment<S: Into<String>>(text: S, range: InputRange) -> AstNode {
        leaf(Kind::BlockComment, text.into(), range)
    }

    /// A synthetic node covering input skipped by panic-mode recovery.
    pub fn new_error<S: Into<String>>(skipped: S, range: InputRange) -> AstNode {
        leaf(Kind::Error, skipped.into(), range)
    }

    // --- directives ---------------------------------------------------

    pub fn new_statement(
        options: Vec<AstNode>,
        body: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        check_all(&options, Kind::QueryOption)?;
        if !(body.kind == Kind::Query
            || body.instance_of(Kind::SchemaCommand)
            || body.kind == Kind::Error)
        {
            return None;
        }
        let mut c = Children::new();
        let options = c.add_all(options);
        let body = c.add(body);
        Some(AstNode::new(
            Kind::Statement,
            Payload::Statement { options, body },
            c.nodes,
            range,
        ))
    }

    pub fn new_command<S: Into<String>>(
        name: S,
        args: Vec<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        check_all(&args, Kind::String)?;
        Some(AstNode::new(
            Kind::Command,
            Payload::Command { name: name.into() },
            args,
            range,
        ))
    }

    // --- query options ------------------------------------------------

    pub fn new_cypher_option(
        version: Option<AstNode>,
        params: Vec<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        check_opt(&version, Kind::String)?;
        check_all(&params, Kind::CypherOptionParam)?;
        let mut c = Children::new();
        let version = c.add_opt(version);
        let params = c.add_all(params);
        Some(AstNode::new(
            Kind::CypherOption,
            Payload::CypherOption { version, params },
            c.nodes,
            range,
        ))
    }

    pub fn new_cypher_option_param(
        name: AstNode,
        value: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        check(&name, Kind::String)?;
        check(&value, Kind::String)?;
        let mut c = Children::new();
        let name = c.add(name);
        let value = c.add(value);
        Some(AstNode::new(
            Kind::CypherOptionParam,
            Payload::CypherOptionParam { name, value },
            c.nodes,
            range,
        ))
    }

    pub fn new_explain_option(range: InputRange) -> AstNode {
        AstNode::new(Kind::ExplainOption, Payload::None, Vec::new(), range)
    }

    pub fn new_profile_option(range: InputRange) -> AstNode {
        AstNode::new(Kind::ProfileOption, Payload::None, Vec::new(), range)
    }

    // --- queries and clauses ------------------------------------------

    pub fn new_query(clauses: Vec<AstNode>, range: InputRange) -> Option<AstNode> {
        check_all(&clauses, Kind::Clause)?;
        let mut c = Children::new();
        let clauses = c.add_all(clauses);
        Some(AstNode::new(
            Kind::Query,
            Payload::Query { clauses },
            c.nodes,
            range,
        ))
    }

    pub fn new_union(all: bool, range: InputRange) -> AstNode {
        AstNode::new(Kind::Union, Payload::Union { all }, Vec::new(), range)
    }

    pub fn new_match(
        optional: bool,
        pattern: AstNode,
        hints: Vec<AstNode>,
        predicate: Option<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        check(&pattern, Kind::Pattern)?;
        check_all(&hints, Kind::MatchHint)?;
        check_opt(&predicate, Kind::Where)?;
        let mut c = Children::new();
        let pattern = c.add(pattern);
        let hints = c.add_all(hints);
        let predicate = c.add_opt(predicate);
        Some(AstNode::new(
            Kind::Match,
            Payload::Match {
                optional,
                pattern,
                hints,
                predicate,
            },
            c.nodes,
            range,
        ))
    }

    pub fn new_using_index(
        identifier: AstNode,
        label: AstNode,
        prop_name: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        check(&identifier, Kind::Identifier)?;
        check(&label, Kind::Label)?;
        check(&prop_name, Kind::PropName)?;
        let mut c = Children::new();
        let identifier = c.add(identifier);
        let label = c.add(label);
        let prop_name = c.add(prop_name);
        Some(AstNode::new(
            Kind::UsingIndex,
            Payload::UsingIndex {
                identifier,
                label,
                prop_name,
            },
            c.nodes,
            range,
        ))
    }

    pub fn new_using_scan(
        identifier: AstNode,
        label: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        check(&identifier, Kind::Identifier)?;
        check(&label, Kind::Label)?;
        let mut c = Children::new();
        let identifier = c.add(identifier);
        let label = c.add(label);
        Some(AstNode::new(
            Kind::UsingScan,
            Payload::UsingScan { identifier, label },
            c.nodes,
            range,
        ))
    }

    pub fn new_using_join(identifiers: Vec<AstNode>, range: InputRange) -> Option<AstNode> {
        if identifiers.is_empty() {
            return None;
        }
        check_all(&identifiers, Kind::Identifier)?;
        let mut c = Children::new();
        let identifiers = c.add_all(identifiers);
        Some(AstNode::new(
            Kind::UsingJoin,
            Payload::UsingJoin { identifiers },
            c.nodes,
            range,
        ))
    }

    pub fn new_merge(
        path: AstNode,
        actions: Vec<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        check(&path, Kind::PatternPath)?;
        check_all(&actions, Kind::MergeAction)?;
        let mut c = Children::new();
        let path = c.add(path);
        let actions = c.add_all(actions);
        Some(AstNode::new(
            Kind::Merge,
            Payload::Merge { path, actions },
            c.nodes,
            range,
        ))
    }

    pub fn new_on_match(items: Vec<AstNode>, range: InputRange) -> Option<AstNode> {
        check_all(&items, Kind::SetItem)?;
        let mut c = Children::new();
        let items = c.add_all(items);
        Some(AstNode::new(
            Kind::OnMatch,
            Payload::MergeAction { items },
            c.nodes,
            range,
        ))
    }

    pub fn new_on_create(items: Vec<AstNode>, range: InputRange) -> Option<AstNode> {
        check_all(&items, Kind::SetItem)?;
        let mut c = Children::new();
        let items = c.add_all(items);
        Some(AstNode::new(
            Kind::OnCreate,
            Payload::MergeAction { items },
            c.nodes,
            range,
        ))
    }

    pub fn new_create(unique: bool, pattern: AstNode, range: InputRange) -> Option<AstNode> {
        check(&pattern, Kind::Pattern)?;
        let mut c = Children::new();
        let pattern = c.add(pattern);
        Some(AstNode::new(
            Kind::Create,
            Payload::Create { unique, pattern },
            c.nodes,
            range,
        ))
    }

    pub fn new_set(items: Vec<AstNode>, range: InputRange) -> Option<AstNode> {
        check_all(&items, Kind::SetItem)?;
        let mut c = Children::new();
        let items = c.add_all(items);
        Some(AstNode::new(Kind::Set, Payload::Items(items), c.nodes, range))
    }

    pub fn new_set_property(
        property: AstNode,
        expression: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        check(&property, Kind::PropertyOperator)?;
        check(&expression, Kind::Expression)?;
        let mut c = Children::new();
        let property = c.add(property);
        let expression = c.add(expression);
        Some(AstNode::new(
            Kind::SetProperty,
            Payload::SetProperty {
                property,
                expression,
            },
            c.nodes,
            range,
        ))
    }

    pub fn new_set_all_properties(
        identifier: AstNode,
        expression: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        ident_expression(Kind::SetAllProperties, identifier, expression, range)
    }

    pub fn new_merge_properties(
        identifier: AstNode,
        expression: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        ident_expression(Kind::MergeProperties, identifier, expression, range)
    }

    pub fn new_set_labels(
        identifier: AstNode,
        labels: Vec<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        ident_labels(Kind::SetLabels, identifier, labels, range)
    }

    pub fn new_remove_labels(
        identifier: AstNode,
        labels: Vec<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        ident_labels(Kind::RemoveLabels, identifier, labels, range)
    }

    pub fn new_remove_property(property: AstNode, range: InputRange) -> Option<AstNode> {
        check(&property, Kind::PropertyOperator)?;
        let mut c = Children::new();
        let property = c.add(property);
        Some(AstNode::new(
            Kind::RemoveProperty,
            Payload::Wrap(property),
            c.nodes,
            range,
        ))
    }

    pub fn new_remove(items: Vec<AstNode>, range: InputRange) -> Option<AstNode> {
        check_all(&items, Kind::RemoveItem)?;
        let mut c = Children::new();
        let items = c.add_all(items);
        Some(AstNode::new(
            Kind::Remove,
            Payload::Items(items),
            c.nodes,
            range,
        ))
    }

    pub fn new_delete(
        detach: bool,
        expressions: Vec<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        if expressions.is_empty() {
            return None;
        }
        check_all(&expressions, Kind::Expression)?;
        let mut c = Children::new();
        let expressions = c.add_all(expressions);
        Some(AstNode::new(
            Kind::Delete,
            Payload::Delete {
                detach,
                expressions,
            },
            c.nodes,
            range,
        ))
    }

    pub fn new_foreach(
        identifier: AstNode,
        expression: AstNode,
        clauses: Vec<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        check(&identifier, Kind::Identifier)?;
        check(&expression, Kind::Expression)?;
        check_all(&clauses, Kind::Clause)?;
        let mut c = Children::new();
        let identifier = c.add(identifier);
        let expression = c.add(expression);
        let clauses = c.add_all(clauses);
        Some(AstNode::new(
            Kind::Foreach,
            Payload::Foreach {
                identifier,
                expression,
                clauses,
            },
            c.nodes,
            range,
        ))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn new_with(
        distinct: bool,
        include_existing: bool,
        projections: Vec<AstNode>,
        order_by: Option<AstNode>,
        skip: Option<AstNode>,
        limit: Option<AstNode>,
        predicate: Option<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        projections_clause(
            Kind::With,
            distinct,
            include_existing,
            projections,
            order_by,
            skip,
            limit,
            predicate,
            range,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn new_return(
        distinct: bool,
        include_existing: bool,
        projections: Vec<AstNode>,
        order_by: Option<AstNode>,
        skip: Option<AstNode>,
        limit: Option<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        projections_clause(
            Kind::Return,
            distinct,
            include_existing,
            projections,
            order_by,
            skip,
            limit,
            None,
            range,
        )
    }

    pub fn new_unwind(
        expression: AstNode,
        alias: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        check(&expression, Kind::Expression)?;
        check(&alias, Kind::Identifier)?;
        let mut c = Children::new();
        let expression = c.add(expression);
        let alias = c.add(alias);
        Some(AstNode::new(
            Kind::Unwind,
            Payload::Unwind { expression, alias },
            c.nodes,
            range,
        ))
    }

    pub fn new_call(
        proc: AstNode,
        args: Vec<AstNode>,
        projections: Vec<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        check(&proc, Kind::ProcName)?;
        check_all(&args, Kind::Expression)?;
        check_all(&projections, Kind::Projection)?;
        let mut c = Children::new();
        let proc = c.add(proc);
        let args = c.add_all(args);
        let projections = c.add_all(projections);
        Some(AstNode::new(
            Kind::Call,
            Payload::Call {
                proc,
                args,
                projections,
            },
            c.nodes,
            range,
        ))
    }

    pub fn new_load_csv(
        with_headers: bool,
        url: AstNode,
        identifier: AstNode,
        field_terminator: Option<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        check(&url, Kind::Expression)?;
        check(&identifier, Kind::Identifier)?;
        check_opt(&field_terminator, Kind::String)?;
        let mut c = Children::new();
        let url = c.add(url);
        let identifier = c.add(identifier);
        let field_terminator = c.add_opt(field_terminator);
        Some(AstNode::new(
            Kind::LoadCsv,
            Payload::LoadCsv {
                with_headers,
                url,
                identifier,
                field_terminator,
            },
            c.nodes,
            range,
        ))
    }

    pub fn new_start(
        points: Vec<AstNode>,
        predicate: Option<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        if points.is_empty() {
            return None;
        }
        check_all(&points, Kind::StartPoint)?;
        check_opt(&predicate, Kind::Where)?;
        let mut c = Children::new();
        let points = c.add_all(points);
        let predicate = c.add_opt(predicate);
        Some(AstNode::new(
            Kind::Start,
            Payload::Start { points, predicate },
            c.nodes,
            range,
        ))
    }

    pub fn new_node_index_lookup(
        identifier: AstNode,
        index: AstNode,
        prop_name: AstNode,
        lookup: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        index_lookup(Kind::NodeIndexLookup, identifier, index, prop_name, lookup, range)
    }

    pub fn new_rel_index_lookup(
        identifier: AstNode,
        index: AstNode,
        prop_name: AstNode,
        lookup: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        index_lookup(Kind::RelIndexLookup, identifier, index, prop_name, lookup, range)
    }

    pub fn new_node_id_lookup(
        identifier: AstNode,
        ids: Vec<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        id_lookup(Kind::NodeIdLookup, identifier, ids, range)
    }

    pub fn new_rel_id_lookup(
        identifier: AstNode,
        ids: Vec<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        id_lookup(Kind::RelIdLookup, identifier, ids, range)
    }

    pub fn new_all_nodes_scan(identifier: AstNode, range: InputRange) -> Option<AstNode> {
        check(&identifier, Kind::Identifier)?;
        let mut c = Children::new();
        let identifier = c.add(identifier);
        Some(AstNode::new(
            Kind::AllNodesScan,
            Payload::Wrap(identifier),
            c.nodes,
            range,
        ))
    }

    pub fn new_all_rels_scan(identifier: AstNode, range: InputRange) -> Option<AstNode> {
        check(&identifier, Kind::Identifier)?;
        let mut c = Children::new();
        let identifier = c.add(identifier);
        Some(AstNode::new(
            Kind::AllRelsScan,
            Payload::Wrap(identifier),
            c.nodes,
            range,
        ))
    }

    // --- clause parts -------------------------------------------------

    pub fn new_where(expression: AstNode, range: InputRange) -> Option<AstNode> {
        wrap(Kind::Where, expression, Kind::Expression, range)
    }

    pub fn new_order_by(items: Vec<AstNode>, range: InputRange) -> Option<AstNode> {
        if items.is_empty() {
            return None;
        }
        check_all(&items, Kind::SortItem)?;
        let mut c = Children::new();
        let items = c.add_all(items);
        Some(AstNode::new(
            Kind::OrderBy,
            Payload::Items(items),
            c.nodes,
            range,
        ))
    }

    pub fn new_sort_item(
        expression: AstNode,
        ascending: bool,
        range: InputRange,
    ) -> Option<AstNode> {
        check(&expression, Kind::Expression)?;
        let mut c = Children::new();
        let expression = c.add(expression);
        Some(AstNode::new(
            Kind::SortItem,
            Payload::SortItem {
                expression,
                ascending,
            },
            c.nodes,
            range,
        ))
    }

    pub fn new_projection(
        expression: AstNode,
        alias: Option<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        check(&expression, Kind::Expression)?;
        check_opt(&alias, Kind::Identifier)?;
        let mut c = Children::new();
        let expression = c.add(expression);
        let alias = c.add_opt(alias);
        Some(AstNode::new(
            Kind::Projection,
            Payload::Projection { expression, alias },
            c.nodes,
            range,
        ))
    }

    pub fn new_skip(expression: AstNode, range: InputRange) -> Option<AstNode> {
        wrap(Kind::Skip, expression, Kind::Expression, range)
    }

    pub fn new_limit(expression: AstNode, range: InputRange) -> Option<AstNode> {
        wrap(Kind::Limit, expression, Kind::Expression, range)
    }

    // --- patterns -----------------------------------------------------

    pub fn new_pattern(paths: Vec<AstNode>, range: InputRange) -> Option<AstNode> {
        if paths.is_empty() {
            return None;
        }
        check_all(&paths, Kind::PatternPath)?;
        let mut c = Children::new();
        let paths = c.add_all(paths);
        Some(AstNode::new(
            Kind::Pattern,
            Payload::Items(paths),
            c.nodes,
            range,
        ))
    }

    /// Elements must alternate node and relationship patterns, beginning
    /// and ending with a node pattern.
    pub fn new_pattern_path(elements: Vec<AstNode>, range: InputRange) -> Option<AstNode> {
        if elements.len() % 2 == 0 {
            return None;
        }
        for (i, element) in elements.iter().enumerate() {
            let expected = if i % 2 == 0 {
                Kind::NodePattern
            } else {
                Kind::RelPattern
            };
            check(element, expected)?;
        }
        let mut c = Children::new();
        let elements = c.add_all(elements);
        Some(AstNode::new(
            Kind::PatternPath,
            Payload::Items(elements),
            c.nodes,
            range,
        ))
    }

    pub fn new_named_path(
        identifier: AstNode,
        path: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        check(&identifier, Kind::Identifier)?;
        check(&path, Kind::PatternPath)?;
        let mut c = Children::new();
        let identifier = c.add(identifier);
        let path = c.add(path);
        Some(AstNode::new(
            Kind::NamedPath,
            Payload::NamedPath { identifier, path },
            c.nodes,
            range,
        ))
    }

    pub fn new_shortest_path(
        single: bool,
        path: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        check(&path, Kind::PatternPath)?;
        let mut c = Children::new();
        let path = c.add(path);
        Some(AstNode::new(
            Kind::ShortestPath,
            Payload::ShortestPath { single, path },
            c.nodes,
            range,
        ))
    }

    pub fn new_node_pattern(
        identifier: Option<AstNode>,
        labels: Vec<AstNode>,
        properties: Option<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        check_opt(&identifier, Kind::Identifier)?;
        check_all(&labels, Kind::Label)?;
        check_properties(&properties)?;
        let mut c = Children::new();
        let identifier = c.add_opt(identifier);
        let labels = c.add_all(labels);
        let properties = c.add_opt(properties);
        Some(AstNode::new(
            Kind::NodePattern,
            Payload::NodePattern {
                identifier,
                labels,
                properties,
            },
            c.nodes,
            range,
        ))
    }

    pub fn new_rel_pattern(
        direction: Direction,
        identifier: Option<AstNode>,
        reltypes: Vec<AstNode>,
        varlength: Option<AstNode>,
        properties: Option<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        check_opt(&identifier, Kind::Identifier)?;
        check_all(&reltypes, Kind::Reltype)?;
        check_opt(&varlength, Kind::Range)?;
        check_properties(&properties)?;
        let mut c = Children::new();
        let identifier = c.add_opt(identifier);
        let reltypes = c.add_all(reltypes);
        let varlength = c.add_opt(varlength);
        let properties = c.add_opt(properties);
        Some(AstNode::new(
            Kind::RelPattern,
            Payload::RelPattern {
                direction,
                identifier,
                reltypes,
                varlength,
                properties,
            },
            c.nodes,
            range,
        ))
    }

    pub fn new_range(
        start: Option<AstNode>,
        end: Option<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        check_opt(&start, Kind::Integer)?;
        check_opt(&end, Kind::Integer)?;
        let mut c = Children::new();
        let start = c.add_opt(start);
        let end = c.add_opt(end);
        Some(AstNode::new(
            Kind::Range,
            Payload::Range { start, end },
            c.nodes,
            range,
        ))
    }

    // --- schema commands ----------------------------------------------

    pub fn new_create_node_prop_index(
        label: AstNode,
        prop_name: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        prop_index(Kind::CreateNodePropIndex, label, prop_name, range)
    }

    pub fn new_drop_node_prop_index(
        label: AstNode,
        prop_name: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        prop_index(Kind::DropNodePropIndex, label, prop_name, range)
    }

    pub fn new_create_node_prop_constraint(
        identifier: AstNode,
        label: AstNode,
        expression: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        node_constraint(Kind::CreateNodePropConstraint, identifier, label, expression, range)
    }

    pub fn new_drop_node_prop_constraint(
        identifier: AstNode,
        label: AstNode,
        expression: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        node_constraint(Kind::DropNodePropConstraint, identifier, label, expression, range)
    }

    pub fn new_create_unique_node_prop_constraint(
        identifier: AstNode,
        label: AstNode,
        expression: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        node_constraint(
            Kind::CreateUniqueNodePropConstraint,
            identifier,
            label,
            expression,
            range,
        )
    }

    pub fn new_drop_unique_node_prop_constraint(
        identifier: AstNode,
        label: AstNode,
        expression: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        node_constraint(
            Kind::DropUniqueNodePropConstraint,
            identifier,
            label,
            expression,
            range,
        )
    }

    pub fn new_create_rel_prop_constraint(
        identifier: AstNode,
        reltype: AstNode,
        expression: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        rel_constraint(Kind::CreateRelPropConstraint, identifier, reltype, expression, range)
    }

    pub fn new_drop_rel_prop_constraint(
        identifier: AstNode,
        reltype: AstNode,
        expression: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        rel_constraint(Kind::DropRelPropConstraint, identifier, reltype, expression, range)
    }

    // --- expressions --------------------------------------------------

    pub fn new_unary_operator(
        op: Operator,
        arg: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        check(&arg, Kind::Expression)?;
        let mut c = Children::new();
        let arg = c.add(arg);
        Some(AstNode::new(
            Kind::UnaryOperator,
            Payload::UnaryOperator { op, arg },
            c.nodes,
            range,
        ))
    }

    pub fn new_binary_operator(
        op: Operator,
        left: AstNode,
        right: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        check(&left, Kind::Expression)?;
        check(&right, Kind::Expression)?;
        let mut c = Children::new();
        let left = c.add(left);
        let right = c.add(right);
        Some(AstNode::new(
            Kind::BinaryOperator,
            Payload::BinaryOperator { op, left, right },
            c.nodes,
            range,
        ))
    }

    /// A chained comparison: `args` holds one more operand than `ops`.
    pub fn new_comparison(
        ops: Vec<Operator>,
        args: Vec<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        if ops.is_empty() || args.len() != ops.len() + 1 {
            return None;
        }
        check_all(&args, Kind::Expression)?;
        let mut c = Children::new();
        let args = c.add_all(args);
        Some(AstNode::new(
            Kind::Comparison,
            Payload::Comparison { ops, args },
            c.nodes,
            range,
        ))
    }

    pub fn new_apply(
        func: AstNode,
        distinct: bool,
        args: Vec<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        check(&func, Kind::FunctionName)?;
        check_all(&args, Kind::Expression)?;
        let mut c = Children::new();
        let func = c.add(func);
        let args = c.add_all(args);
        Some(AstNode::new(
            Kind::Apply,
            Payload::Apply {
                func,
                distinct,
                args,
            },
            c.nodes,
            range,
        ))
    }

    /// `func(*)`, e.g. `count(*)`.
    pub fn new_apply_all(
        func: AstNode,
        distinct: bool,
        range: InputRange,
    ) -> Option<AstNode> {
        check(&func, Kind::FunctionName)?;
        let mut c = Children::new();
        let func = c.add(func);
        Some(AstNode::new(
            Kind::ApplyAll,
            Payload::ApplyAll { func, distinct },
            c.nodes,
            range,
        ))
    }

    pub fn new_property_operator(
        expression: AstNode,
        prop_name: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        check(&expression, Kind::Expression)?;
        check(&prop_name, Kind::PropName)?;
        let mut c = Children::new();
        let expression = c.add(expression);
        let prop_name = c.add(prop_name);
        Some(AstNode::new(
            Kind::PropertyOperator,
            Payload::PropertyOperator {
                expression,
                prop_name,
            },
            c.nodes,
            range,
        ))
    }

    pub fn new_subscript(
        expression: AstNode,
        subscript: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        check(&expression, Kind::Expression)?;
        check(&subscript, Kind::Expression)?;
        let mut c = Children::new();
        let expression = c.add(expression);
        let subscript = c.add(subscript);
        Some(AstNode::new(
            Kind::Subscript,
            Payload::Subscript {
                expression,
                subscript,
            },
            c.nodes,
            range,
        ))
    }

    pub fn new_slice(
        expression: AstNode,
        start: Option<AstNode>,
        end: Option<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        check(&expression, Kind::Expression)?;
        check_opt(&start, Kind::Expression)?;
        check_opt(&end, Kind::Expression)?;
        let mut c = Children::new();
        let expression = c.add(expression);
        let start = c.add_opt(start);
        let end = c.add_opt(end);
        Some(AstNode::new(
            Kind::Slice,
            Payload::Slice {
                expression,
                start,
                end,
            },
            c.nodes,
            range,
        ))
    }

    pub fn new_labels_operator(
        expression: AstNode,
        labels: Vec<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        if labels.is_empty() {
            return None;
        }
        check(&expression, Kind::Expression)?;
        check_all(&labels, Kind::Label)?;
        let mut c = Children::new();
        let expression = c.add(expression);
        let labels = c.add_all(labels);
        Some(AstNode::new(
            Kind::LabelsOperator,
            Payload::LabelsOperator { expression, labels },
            c.nodes,
            range,
        ))
    }

    pub fn new_map_projection(
        expression: AstNode,
        selectors: Vec<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        check(&expression, Kind::Expression)?;
        check_all(&selectors, Kind::MapProjectionSelector)?;
        let mut c = Children::new();
        let expression = c.add(expression);
        let selectors = c.add_all(selectors);
        Some(AstNode::new(
            Kind::MapProjection,
            Payload::MapProjection {
                expression,
                selectors,
            },
            c.nodes,
            range,
        ))
    }

    pub fn new_map_projection_literal(
        prop_name: AstNode,
        expression: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        check(&prop_name, Kind::PropName)?;
        check(&expression, Kind::Expression)?;
        let mut c = Children::new();
        let prop_name = c.add(prop_name);
        let expression = c.add(expression);
        Some(AstNode::new(
            Kind::MapProjectionLiteral,
            Payload::MapProjectionLiteral {
                prop_name,
                expression,
            },
            c.nodes,
            range,
        ))
    }

    pub fn new_map_projection_property(
        prop_name: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        wrap(Kind::MapProjectionProperty, prop_name, Kind::PropName, range)
    }

    pub fn new_map_projection_identifier(
        identifier: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        wrap(Kind::MapProjectionIdentifier, identifier, Kind::Identifier, range)
    }

    pub fn new_map_projection_all_properties(range: InputRange) -> AstNode {
        AstNode::new(
            Kind::MapProjectionAllProperties,
            Payload::None,
            Vec::new(),
            range,
        )
    }

    pub fn new_map(pairs: Vec<(AstNode, AstNode)>, range: InputRange) -> Option<AstNode> {
        for (key, value) in &pairs {
            check(key, Kind::PropName)?;
            check(value, Kind::Expression)?;
        }
        let mut c = Children::new();
        let pairs = pairs
            .into_iter()
            .map(|(key, value)| {
                let key = c.add(key);
                let value = c.add(value);
                (key, value)
            })
            .collect();
        Some(AstNode::new(
            Kind::Map,
            Payload::Map { pairs },
            c.nodes,
            range,
        ))
    }

    pub fn new_collection(elements: Vec<AstNode>, range: InputRange) -> Option<AstNode> {
        check_all(&elements, Kind::Expression)?;
        let mut c = Children::new();
        let elements = c.add_all(elements);
        Some(AstNode::new(
            Kind::Collection,
            Payload::Items(elements),
            c.nodes,
            range,
        ))
    }

    pub fn new_list_comprehension(
        identifier: AstNode,
        expression: AstNode,
        predicate: Option<AstNode>,
        eval: Option<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        comprehension(Kind::ListComprehension, identifier, expression, predicate, eval, range)
    }

    pub fn new_pattern_comprehension(
        identifier: Option<AstNode>,
        pattern: AstNode,
        predicate: Option<AstNode>,
        eval: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        check_opt(&identifier, Kind::Identifier)?;
        check(&pattern, Kind::PatternPath)?;
        check_opt(&predicate, Kind::Expression)?;
        check(&eval, Kind::Expression)?;
        let mut c = Children::new();
        let identifier = c.add_opt(identifier);
        let pattern = c.add(pattern);
        let predicate = c.add_opt(predicate);
        let eval = c.add(eval);
        Some(AstNode::new(
            Kind::PatternComprehension,
            Payload::PatternComprehension {
                identifier,
                pattern,
                predicate,
                eval,
            },
            c.nodes,
            range,
        ))
    }

    pub fn new_case(
        expression: Option<AstNode>,
        alternatives: Vec<(AstNode, AstNode)>,
        default: Option<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        if alternatives.is_empty() {
            return None;
        }
        check_opt(&expression, Kind::Expression)?;
        for (when, then) in &alternatives {
            check(when, Kind::Expression)?;
            check(then, Kind::Expression)?;
        }
        check_opt(&default, Kind::Expression)?;
        let mut c = Children::new();
        let expression = c.add_opt(expression);
        let alternatives = alternatives
            .into_iter()
            .map(|(when, then)| {
                let when = c.add(when);
                let then = c.add(then);
                (when, then)
            })
            .collect();
        let default = c.add_opt(default);
        Some(AstNode::new(
            Kind::Case,
            Payload::Case {
                expression,
                alternatives,
                default,
            },
            c.nodes,
            range,
        ))
    }

    pub fn new_filter(
        identifier: AstNode,
        expression: AstNode,
        predicate: Option<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        comprehension(Kind::Filter, identifier, expression, predicate, None, range)
    }

    pub fn new_extract(
        identifier: AstNode,
        expression: AstNode,
        eval: Option<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        comprehension(Kind::Extract, identifier, expression, None, eval, range)
    }

    pub fn new_all(
        identifier: AstNode,
        expression: AstNode,
        predicate: Option<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        comprehension(Kind::All, identifier, expression, predicate, None, range)
    }

    pub fn new_any(
        identifier: AstNode,
        expression: AstNode,
        predicate: Option<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        comprehension(Kind::Any, identifier, expression, predicate, None, range)
    }

    pub fn new_single(
        identifier: AstNode,
        expression: AstNode,
        predicate: Option<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        comprehension(Kind::Single, identifier, expression, predicate, None, range)
    }

    pub fn new_none(
        identifier: AstNode,
        expression: AstNode,
        predicate: Option<AstNode>,
        range: InputRange,
    ) -> Option<AstNode> {
        comprehension(Kind::None, identifier, expression, predicate, None, range)
    }

    pub fn new_reduce(
        accumulator: AstNode,
        init: AstNode,
        identifier: AstNode,
        expression: AstNode,
        eval: AstNode,
        range: InputRange,
    ) -> Option<AstNode> {
        check(&accumulator, Kind::Identifier)?;
        check(&init, Kind::Expression)?;
        check(&identifier, Kind::Identifier)?;
        check(&expression, Kind::Expression)?;
        check(&eval, Kind::Expression)?;
        let mut c = Children::new();
        let accumulator = c.add(accumulator);
        let init = c.add(init);
        let identifier = c.add(identifier);
        let expression = c.add(expression);
        let eval = c.add(eval);
        Some(AstNode::new(
            Kind::Reduce,
            Payload::Reduce {
                accumulator,
                init,
                identifier,
                expression,
                eval,
            },
            c.nodes,
            range,
        ))
    }
}

fn wrap(kind: Kind, node: AstNode, expected: Kind, range: InputRange) -> Option<AstNode> {
    check(&node, expected)?;
    let mut c = Children::new();
    let node = c.add(node);
    Some(AstNode::new(kind, Payload::Wrap(node), c.nodes, range))
}

fn ident_expression(
    kind: Kind,
    identifier: AstNode,
    expression: AstNode,
    range: InputRange,
) -> Option<AstNode> {
    check(&identifier, Kind::Identifier)?;
    check(&expression, Kind::Expression)?;
    let mut c = Children::new();
    let identifier = c.add(identifier);
    let expression = c.add(expression);
    Some(AstNode::new(
        kind,
        Payload::IdentExpression {
            identifier,
            expression,
        },
        c.nodes,
        range,
    ))
}

fn ident_labels(
    kind: Kind,
    identifier: AstNode,
    labels: Vec<AstNode>,
    range: InputRange,
) -> Option<AstNode> {
    if labels.is_empty() {
        return None;
    }
    check(&identifier, Kind::Identifier)?;
    check_all(&labels, Kind::Label)?;
    let mut c = Children::new();
    let identifier = c.add(identifier);
    let labels = c.add_all(labels);
    Some(AstNode::new(
        kind,
        Payload::IdentLabels { identifier, labels },
        c.nodes,
        range,
    ))
}

#[allow(clippy::too_many_arguments)]
fn projections_clause(
    kind: Kind,
    distinct: bool,
    include_existing: bool,
    projections: Vec<AstNode>,
    order_by: Option<AstNode>,
    skip: Option<AstNode>,
    limit: Option<AstNode>,
    predicate: Option<AstNode>,
    range: InputRange,
) -> Option<AstNode> {
    check_all(&projections, Kind::Projection)?;
    check_opt(&order_by, Kind::OrderBy)?;
    check_opt(&skip, Kind::Skip)?;
    check_opt(&limit, Kind::Limit)?;
    check_opt(&predicate, Kind::Where)?;
    let mut c = Children::new();
    let items = c.add_all(projections);
    let order_by = c.add_opt(order_by);
    let skip = c.add_opt(skip);
    let limit = c.add_opt(limit);
    let predicate = c.add_opt(predicate);
    Some(AstNode::new(
        kind,
        Payload::Projections {
            distinct,
            include_existing,
            items,
            order_by,
            skip,
            limit,
            predicate,
        },
        c.nodes,
        range,
    ))
}

fn index_lookup(
    kind: Kind,
    identifier: AstNode,
    index: AstNode,
    prop_name: AstNode,
    lookup: AstNode,
    range: InputRange,
) -> Option<AstNode> {
    check(&identifier, Kind::Identifier)?;
    check(&index, Kind::IndexName)?;
    check(&prop_name, Kind::PropName)?;
    if !(lookup.kind() == Kind::String || lookup.kind() == Kind::Parameter) {
        return None;
    }
    let mut c = Children::new();
    let identifier = c.add(identifier);
    let index = c.add(index);
    let prop_name = c.add(prop_name);
    let lookup = c.add(lookup);
    Some(AstNode::new(
        kind,
        Payload::IndexLookup {
            identifier,
            index,
            prop_name,
            lookup,
        },
        c.nodes,
        range,
    ))
}

fn id_lookup(
    kind: Kind,
    identifier: AstNode,
    ids: Vec<AstNode>,
    range: InputRange,
) -> Option<AstNode> {
    if ids.is_empty() {
        return None;
    }
    check(&identifier, Kind::Identifier)?;
    check_all(&ids, Kind::Integer)?;
    let mut c = Children::new();
    let identifier = c.add(identifier);
    let ids = c.add_all(ids);
    Some(AstNode::new(
        kind,
        Payload::IdLookup { identifier, ids },
        c.nodes,
        range,
    ))
}

fn prop_index(
    kind: Kind,
    label: AstNode,
    prop_name: AstNode,
    range: InputRange,
) -> Option<AstNode> {
    check(&label, Kind::Label)?;
    check(&prop_name, Kind::PropName)?;
    let mut c = Children::new();
    let label = c.add(label);
    let prop_name = c.add(prop_name);
    Some(AstNode::new(
        kind,
        Payload::PropIndex { label, prop_name },
        c.nodes,
        range,
    ))
}

fn node_constraint(
    kind: Kind,
    identifier: AstNode,
    label: AstNode,
    expression: AstNode,
    range: InputRange,
) -> Option<AstNode> {
    check(&identifier, Kind::Identifier)?;
    check(&label, Kind::Label)?;
    check(&expression, Kind::Expression)?;
    let mut c = Children::new();
    let identifier = c.add(identifier);
    let label = c.add(label);
    let expression = c.add(expression);
    Some(AstNode::new(
        kind,
        Payload::NodeConstraint {
            identifier,
            label,
            expression,
        },
        c.nodes,
        range,
    ))
}

fn rel_constraint(
    kind: Kind,
    identifier: AstNode,
    reltype: AstNode,
    expression: AstNode,
    range: InputRange,
) -> Option<AstNode> {
    check(&identifier, Kind::Identifier)?;
    check(&reltype, Kind::Reltype)?;
    check(&expression, Kind::Expression)?;
    let mut c = Children::new();
    let identifier = c.add(identifier);
    let reltype = c.add(reltype);
    let expression = c.add(expression);
    Some(AstNode::new(
        kind,
        Payload::RelConstraint {
            identifier,
            reltype,
            expression,
        },
        c.nodes,
        range,
    ))
}

fn comprehension(
    kind: Kind,
    identifier: AstNode,
    expression: AstNode,
    predicate: Option<AstNode>,
    eval: Option<AstNode>,
    range: InputRange,
) -> Option<AstNode> {
    check(&identifier, Kind::Identifier)?;
    check(&expression, Kind::Expression)?;
    check_opt(&predicate, Kind::Expression)?;
    check_opt(&eval, Kind::Expression)?;
    let mut c = Children::new();
    let identifier = c.add(identifier);
    let expression = c.add(expression);
    let predicate = c.add_opt(predicate);
    let eval = c.add_opt(eval);
    Some(AstNode::new(
        kind,
        Payload::Comprehension {
            identifier,
            expression,
            predicate,
            eval,
        },
        c.nodes,
        range,
    ))
}

fn check_properties(properties: &Option<AstNode>) -> Option<()> {
    match properties {
        Some(node)
            if matches!(node.kind(), Kind::Map | Kind::Parameter | Kind::Error) =>
        {
            Some(())
        }
        Some(_) => None,
        None => Some(()),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::lexer::{InputPosition, InputRange};
    use std::ops::ControlFlow;

    fn r(a: usize, b: usize) -> InputRange {
        InputRange::new(
            InputPosition {
                offset: a,
                line: 1,
                column: a as u32 + 1,
            },
            InputPosition {
                offset: b,
                line: 1,
                column: b as u32 + 1,
            },
        )
    }

    #[test]
    fn references_are_children() {
        let left = AstNode::new_integer("1", r(0, 1));
        let right = AstNode::new_integer("2", r(4, 5));
        let node = AstNode::new_binary_operator(Operator::Plus, left, right, r(0, 5)).unwrap();
        assert_eq!(node.nchildren(), 2);
        assert!(std::ptr::eq(node.left().unwrap(), &node.children()[0]));
        assert!(std::ptr::eq(node.right().unwrap(), &node.children()[1]));
    }

    #[test]
    fn wrong_kind_yields_nil() {
        let label = AstNode::new_label("Person", r(0, 6));
        let one = AstNode::new_integer("1", r(8, 9));
        // A label is not an expression.
        assert!(AstNode::new_binary_operator(Operator::Plus, label, one, r(0, 9)).is_none());

        let not_a_pattern = AstNode::new_integer("5", r(6, 7));
        assert!(AstNode::new_match(false, not_a_pattern, Vec::new(), None, r(0, 7)).is_none());
    }

    #[test]
    fn error_nodes_stand_in_for_expressions_and_clauses() {
        let err = AstNode::new_error("1 +", r(7, 10));
        let proj = AstNode::new_projection(err, None, r(7, 10)).unwrap();
        let ret =
            AstNode::new_return(false, false, vec![proj], None, None, None, r(0, 10)).unwrap();
        assert_eq!(ret.kind(), Kind::Return);

        let err = AstNode::new_error("junk", r(0, 4));
        assert!(AstNode::new_query(vec![err], r(0, 4)).is_some());
    }

    #[test]
    fn pattern_paths_must_alternate() {
        let n1 = AstNode::new_node_pattern(None, Vec::new(), None, r(0, 2)).unwrap();
        let n2 = AstNode::new_node_pattern(None, Vec::new(), None, r(5, 7)).unwrap();
        // Two node patterns in a row is not a path.
        assert!(AstNode::new_pattern_path(vec![n1, n2], r(0, 7)).is_none());

        let n1 = AstNode::new_node_pattern(None, Vec::new(), None, r(0, 2)).unwrap();
        let rel = AstNode::new_rel_pattern(
            Direction::Outbound,
            None,
            Vec::new(),
            None,
            None,
            r(2, 5),
        )
        .unwrap();
        let n2 = AstNode::new_node_pattern(None, Vec::new(), None, r(5, 7)).unwrap();
        let path = AstNode::new_pattern_path(vec![n1, rel, n2], r(0, 7)).unwrap();
        assert_eq!(path.items().count(), 3);
    }

    #[test]
    fn walk_is_preorder_and_short_circuits() {
        let one = AstNode::new_integer("1", r(0, 1));
        let two = AstNode::new_integer("2", r(4, 5));
        let sum = AstNode::new_binary_operator(Operator::Plus, one, two, r(0, 5)).unwrap();

        let mut kinds = Vec::new();
        let flow = sum.walk(&mut |node, depth| {
            kinds.push((node.kind(), depth));
            ControlFlow::Continue(())
        });
        assert_eq!(flow, ControlFlow::Continue(()));
        assert_eq!(
            kinds,
            vec![
                (Kind::BinaryOperator, 0),
                (Kind::Integer, 1),
                (Kind::Integer, 1),
            ]
        );

        let mut seen = 0;
        let flow = sum.walk(&mut |_, _| {
            seen += 1;
            ControlFlow::Break(())
        });
        assert_eq!(flow, ControlFlow::Break(()));
        assert_eq!(seen, 1);
    }

    #[test]
    fn ordinals_are_assigned_preorder() {
        let one = AstNode::new_integer("1", r(0, 1));
        let two = AstNode::new_integer("2", r(4, 5));
        let mut sum = AstNode::new_binary_operator(Operator::Plus, one, two, r(0, 5)).unwrap();
        let mut next = 3;
        sum.assign_ordinals(&mut next);
        assert_eq!(next, 6);
        assert_eq!(sum.ordinal(), 3);
        assert_eq!(sum.children()[0].ordinal(), 4);
        assert_eq!(sum.children()[1].ordinal(), 5);
    }
}
