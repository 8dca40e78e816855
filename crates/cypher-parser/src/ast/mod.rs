//! The AST node model.
//!
//! Nodes are a uniform polymorphic record: a [`Kind`] tag, a kind-specific
//! payload, the covered input range, an ordinal assigned when the node is
//! committed to a parse result, and an owned children vector. Kind-specific
//! reference attributes are indices into the children vector, so every
//! referenced node is also a child by construction.

mod build;
mod detail;
mod kind;

use crate::lexer::InputRange;
use std::fmt;
use std::ops::ControlFlow;

pub use kind::Kind;

/// Index of a referenced node within its parent's children vector.
pub(crate) type NodeRef = usize;

/// Relationship pattern direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Outbound,
    Inbound,
    Bidirectional,
}

/// Expression operators, shared by unary, binary and comparison nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Or,
    Xor,
    And,
    Not,
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
    Plus,
    Minus,
    Mult,
    Div,
    Mod,
    Pow,
    UnaryPlus,
    UnaryMinus,
    Regex,
    In,
    StartsWith,
    EndsWith,
    Contains,
    IsNull,
    IsNotNull,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Or => "OR",
            Operator::Xor => "XOR",
            Operator::And => "AND",
            Operator::Not => "NOT",
            Operator::Equal => "=",
            Operator::NotEqual => "<>",
            Operator::LessThan => "<",
            Operator::GreaterThan => ">",
            Operator::LessThanOrEqual => "<=",
            Operator::GreaterThanOrEqual => ">=",
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Mult => "*",
            Operator::Div => "/",
            Operator::Mod => "%",
            Operator::Pow => "^",
            Operator::UnaryPlus => "+",
            Operator::UnaryMinus => "-",
            Operator::Regex => "=~",
            Operator::In => "IN",
            Operator::StartsWith => "STARTS WITH",
            Operator::EndsWith => "ENDS WITH",
            Operator::Contains => "CONTAINS",
            Operator::IsNull => "IS NULL",
            Operator::IsNotNull => "IS NOT NULL",
        }
    }

    /// True for operators written after their operand.
    pub(crate) fn is_postfix(&self) -> bool {
        matches!(self, Operator::IsNull | Operator::IsNotNull)
    }
}

/// Kind-specific node data. Reference attributes are [`NodeRef`] indices
/// into the owning node's children; several kinds share a shape and are
/// told apart by the node's [`Kind`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Payload {
    None,
    /// Identifier, Label, Reltype, PropName, FunctionName, ProcName,
    /// IndexName, Integer, Float, Parameter, LineComment, BlockComment and
    /// the skipped text of Error nodes.
    Text(String),
    Str {
        value: String,
        quote: char,
    },
    Command {
        name: String,
    },
    Statement {
        options: Vec<NodeRef>,
        body: NodeRef,
    },
    CypherOption {
        version: Option<NodeRef>,
        params: Vec<NodeRef>,
    },
    CypherOptionParam {
        name: NodeRef,
        value: NodeRef,
    },
    Query {
        clauses: Vec<NodeRef>,
    },
    Union {
        all: bool,
    },
    Match {
        optional: bool,
        pattern: NodeRef,
        hints: Vec<NodeRef>,
        predicate: Option<NodeRef>,
    },
    UsingIndex {
        identifier: NodeRef,
        label: NodeRef,
        prop_name: NodeRef,
    },
    UsingScan {
        identifier: NodeRef,
        label: NodeRef,
    },
    UsingJoin {
        identifiers: Vec<NodeRef>,
    },
    Merge {
        path: NodeRef,
        actions: Vec<NodeRef>,
    },
    /// OnMatch, OnCreate.
    MergeAction {
        items: Vec<NodeRef>,
    },
    Create {
        unique: bool,
        pattern: NodeRef,
    },
    /// Set, Remove, Pattern, PatternPath, Collection, OrderBy.
    Items(Vec<NodeRef>),
    SetProperty {
        property: NodeRef,
        expression: NodeRef,
    },
    /// SetAllProperties, MergeProperties.
    IdentExpression {
        identifier: NodeRef,
        expression: NodeRef,
    },
    /// SetLabels, RemoveLabels.
    IdentLabels {
        identifier: NodeRef,
        labels: Vec<NodeRef>,
    },
    Delete {
        detach: bool,
        expressions: Vec<NodeRef>,
    },
    /// Where, Skip, Limit, RemoveProperty, AllNodesScan, AllRelsScan,
    /// MapProjectionProperty, MapProjectionIdentifier: a single reference.
    Wrap(NodeRef),
    Foreach {
        identifier: NodeRef,
        expression: NodeRef,
        clauses: Vec<NodeRef>,
    },
    /// With, Return.
    Projections {
        distinct: bool,
        include_existing: bool,
        items: Vec<NodeRef>,
        order_by: Option<NodeRef>,
        skip: Option<NodeRef>,
        limit: Option<NodeRef>,
        predicate: Option<NodeRef>,
    },
    Unwind {
        expression: NodeRef,
        alias: NodeRef,
    },
    Call {
        proc: NodeRef,
        args: Vec<NodeRef>,
        projections: Vec<NodeRef>,
    },
    LoadCsv {
        with_headers: bool,
        url: NodeRef,
        identifier: NodeRef,
        field_terminator: Option<NodeRef>,
    },
    Start {
        points: Vec<NodeRef>,
        predicate: Option<NodeRef>,
    },
    /// NodeIndexLookup, RelIndexLookup.
    IndexLookup {
        identifier: NodeRef,
        index: NodeRef,
        prop_name: NodeRef,
        lookup: NodeRef,
    },
    /// NodeIdLookup, RelIdLookup.
    IdLookup {
        identifier: NodeRef,
        ids: Vec<NodeRef>,
    },
    SortItem {
        expression: NodeRef,
        ascending: bool,
    },
    Projection {
        expression: NodeRef,
        alias: Option<NodeRef>,
    },
    NamedPath {
        identifier: NodeRef,
        path: NodeRef,
    },
    ShortestPath {
        single: bool,
        path: NodeRef,
    },
    NodePattern {
        identifier: Option<NodeRef>,
        labels: Vec<NodeRef>,
        properties: Option<NodeRef>,
    },
    RelPattern {
        direction: Direction,
        identifier: Option<NodeRef>,
        reltypes: Vec<NodeRef>,
        varlength: Option<NodeRef>,
        properties: Option<NodeRef>,
    },
    Range {
        start: Option<NodeRef>,
        end: Option<NodeRef>,
    },
    /// CreateNodePropIndex, DropNodePropIndex.
    PropIndex {
        label: NodeRef,
        prop_name: NodeRef,
    },
    /// The four node constraint kinds.
    NodeConstraint {
        identifier: NodeRef,
        label: NodeRef,
        expression: NodeRef,
    },
    /// The two rel constraint kinds.
    RelConstraint {
        identifier: NodeRef,
        reltype: NodeRef,
        expression: NodeRef,
    },
    UnaryOperator {
        op: Operator,
        arg: NodeRef,
    },
    BinaryOperator {
        op: Operator,
        left: NodeRef,
        right: NodeRef,
    },
    Comparison {
        ops: Vec<Operator>,
        args: Vec<NodeRef>,
    },
    Apply {
        func: NodeRef,
        distinct: bool,
        args: Vec<NodeRef>,
    },
    ApplyAll {
        func: NodeRef,
        distinct: bool,
    },
    PropertyOperator {
        expression: NodeRef,
        prop_name: NodeRef,
    },
    Subscript {
        expression: NodeRef,
        subscript: NodeRef,
    },
    Slice {
        expression: NodeRef,
        start: Option<NodeRef>,
        end: Option<NodeRef>,
    },
    LabelsOperator {
        expression: NodeRef,
        labels: Vec<NodeRef>,
    },
    MapProjection {
        expression: NodeRef,
        selectors: Vec<NodeRef>,
    },
    MapProjectionLiteral {
        prop_name: NodeRef,
        expression: NodeRef,
    },
    Map {
        pairs: Vec<(NodeRef, NodeRef)>,
    },
    /// ListComprehension, Extract, Filter, All, Any, Single, None.
    Comprehension {
        identifier: NodeRef,
        expression: NodeRef,
        predicate: Option<NodeRef>,
        eval: Option<NodeRef>,
    },
    PatternComprehension {
        identifier: Option<NodeRef>,
        pattern: NodeRef,
        predicate: Option<NodeRef>,
        eval: NodeRef,
    },
    Case {
        expression: Option<NodeRef>,
        alternatives: Vec<(NodeRef, NodeRef)>,
        default: Option<NodeRef>,
    },
    Reduce {
        accumulator: NodeRef,
        init: NodeRef,
        identifier: NodeRef,
        expression: NodeRef,
        eval: NodeRef,
    },
}

/// A node of the abstract syntax tree.
///
/// Children are owned by their parent; a [`ParseResult`](crate::ParseResult)
/// owns all roots and thereby the whole forest. The children vector is
/// immutable after construction.
#[derive(Clone, PartialEq)]
pub struct AstNode {
    pub(crate) kind: Kind,
    pub(crate) payload: Payload,
    pub(crate) range: InputRange,
    pub(crate) ordinal: usize,
    pub(crate) children: Vec<AstNode>,
}

impl AstNode {
    pub(crate) fn new(
        kind: Kind,
        payload: Payload,
        children: Vec<AstNode>,
        range: InputRange,
    ) -> Self {
        Self {
            kind,
            payload,
            range,
            ordinal: 0,
            children,
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn range(&self) -> InputRange {
        self.range
    }

    /// The node's sequence number within its parse result, stable for the
    /// result's lifetime. The pretty-printer uses it for `@N` references.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn children(&self) -> &[AstNode] {
        &self.children
    }

    pub fn nchildren(&self) -> usize {
        self.children.len()
    }

    pub fn child(&self, i: usize) -> Option<&AstNode> {
        self.children.get(i)
    }

    /// True if this node's kind is `kind` or transitively below it in the
    /// kind hierarchy.
    pub fn instance_of(&self, kind: Kind) -> bool {
        self.kind.is_a(kind)
    }

    /// Pre-order traversal. The visitor receives each node with its depth
    /// and can short-circuit the walk by returning `ControlFlow::Break`.
    pub fn walk<F>(&self, visitor: &mut F) -> ControlFlow<()>
    where
        F: FnMut(&AstNode, usize) -> ControlFlow<()>,
    {
        self.walk_at(visitor, 0)
    }

    fn walk_at<F>(&self, visitor: &mut F, depth: usize) -> ControlFlow<()>
    where
        F: FnMut(&AstNode, usize) -> ControlFlow<()>,
    {
        visitor(self, depth)?;
        for child in &self.children {
            child.walk_at(visitor, depth + 1)?;
        }
        ControlFlow::Continue(())
    }

    /// The kind-specific detail string, with `@N` ordinal references to
    /// children. Meaningful once the node belongs to a parse result.
    pub fn detail(&self) -> String {
        detail::detail(self)
    }

    /// Assign ordinals pre-order from the result's counter; called once,
    /// when the root is committed.
    pub(crate) fn assign_ordinals(&mut self, next: &mut usize) {
        self.ordinal = *next;
        *next += 1;
        for child in &mut self.children {
            child.assign_ordinals(next);
        }
    }

    fn node(&self, i: NodeRef) -> &AstNode {
        &self.children[i]
    }

    fn opt_node(&self, i: Option<NodeRef>) -> Option<&AstNode> {
        i.map(|i| &self.children[i])
    }

    fn node_list<'a>(&'a self, refs: &'a [NodeRef]) -> impl Iterator<Item = &'a AstNode> + 'a {
        refs.iter().map(move |&i| &self.children[i])
    }

    // --- terminal accessors -------------------------------------------

    /// The textual payload of name-like and literal nodes: identifiers,
    /// labels, reltypes, property/function/procedure/index names, integer
    /// and float spellings, parameter names, comment text and the source
    /// skipped by an error node.
    pub fn text(&self) -> Option<&str> {
        match &self.payload {
            Payload::Text(text) => Some(text),
            Payload::Command { name } => Some(name),
            _ => Option::None,
        }
    }

    /// The unescaped payload of a string literal.
    pub fn string_value(&self) -> Option<&str> {
        match &self.payload {
            Payload::Str { value, .. } => Some(value),
            _ => Option::None,
        }
    }

    /// The quote character the string literal was written with.
    pub fn string_quote(&self) -> Option<char> {
        match &self.payload {
            Payload::Str { quote, .. } => Some(*quote),
            _ => Option::None,
        }
    }

    // --- directive accessors ------------------------------------------

    pub fn statement_options(&self) -> impl Iterator<Item = &AstNode> {
        let refs: &[NodeRef] = match &self.payload {
            Payload::Statement { options, .. } => options,
            _ => &[],
        };
        self.node_list(refs)
    }

    pub fn statement_body(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::Statement { body, .. } => Some(self.node(*body)),
            _ => Option::None,
        }
    }

    pub fn command_name(&self) -> Option<&str> {
        match &self.payload {
            Payload::Command { name } => Some(name),
            _ => Option::None,
        }
    }

    /// Arguments of a client command, all string nodes.
    pub fn command_args(&self) -> impl Iterator<Item = &AstNode> {
        let args: &[AstNode] = match self.kind {
            Kind::Command => &self.children,
            _ => &[],
        };
        args.iter()
    }

    // --- query accessors ----------------------------------------------

    pub fn query_clauses(&self) -> impl Iterator<Item = &AstNode> {
        let refs: &[NodeRef] = match &self.payload {
            Payload::Query { clauses } => clauses,
            _ => &[],
        };
        self.node_list(refs)
    }

    pub fn union_all(&self) -> bool {
        matches!(self.payload, Payload::Union { all: true })
    }

    pub fn match_is_optional(&self) -> bool {
        matches!(self.payload, Payload::Match { optional: true, .. })
    }

    pub fn match_pattern(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::Match { pattern, .. } => Some(self.node(*pattern)),
            _ => Option::None,
        }
    }

    pub fn match_hints(&self) -> impl Iterator<Item = &AstNode> {
        let refs: &[NodeRef] = match &self.payload {
            Payload::Match { hints, .. } => hints,
            _ => &[],
        };
        self.node_list(refs)
    }

    /// The `WHERE` node of a MATCH, WITH or START clause.
    pub fn predicate(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::Match { predicate, .. }
            | Payload::Projections { predicate, .. }
            | Payload::Start { predicate, .. } => self.opt_node(*predicate),
            _ => Option::None,
        }
    }

    pub fn create_is_unique(&self) -> bool {
        matches!(self.payload, Payload::Create { unique: true, .. })
    }

    pub fn create_pattern(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::Create { pattern, .. } => Some(self.node(*pattern)),
            _ => Option::None,
        }
    }

    pub fn merge_path(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::Merge { path, .. } => Some(self.node(*path)),
            _ => Option::None,
        }
    }

    pub fn merge_actions(&self) -> impl Iterator<Item = &AstNode> {
        let refs: &[NodeRef] = match &self.payload {
            Payload::Merge { actions, .. } => actions,
            _ => &[],
        };
        self.node_list(refs)
    }

    /// Items of a Set, Remove, OnMatch or OnCreate node; paths of a
    /// Pattern; elements of a PatternPath or Collection; entries of an
    /// OrderBy.
    pub fn items(&self) -> impl Iterator<Item = &AstNode> {
        let refs: &[NodeRef] = match &self.payload {
            Payload::Items(items) => items,
            Payload::MergeAction { items } => items,
            _ => &[],
        };
        self.node_list(refs)
    }

    pub fn delete_is_detach(&self) -> bool {
        matches!(self.payload, Payload::Delete { detach: true, .. })
    }

    pub fn delete_expressions(&self) -> impl Iterator<Item = &AstNode> {
        let refs: &[NodeRef] = match &self.payload {
            Payload::Delete { expressions, .. } => expressions,
            _ => &[],
        };
        self.node_list(refs)
    }

    /// The single reference of Where, Skip, Limit, RemoveProperty,
    /// AllNodesScan, AllRelsScan and the shorthand map-projection
    /// selectors; also the operand of shared two-field shapes.
    pub fn expression(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::Wrap(i) => Some(self.node(*i)),
            Payload::SetProperty { expression, .. }
            | Payload::IdentExpression { expression, .. }
            | Payload::SortItem { expression, .. }
            | Payload::Projection { expression, .. }
            | Payload::Unwind { expression, .. }
            | Payload::PropertyOperator { expression, .. }
            | Payload::Subscript { expression, .. }
            | Payload::Slice { expression, .. }
            | Payload::LabelsOperator { expression, .. }
            | Payload::MapProjection { expression, .. }
            | Payload::MapProjectionLiteral { expression, .. }
            | Payload::Foreach { expression, .. }
            | Payload::Comprehension { expression, .. }
            | Payload::Reduce { expression, .. } => Some(self.node(*expression)),
            Payload::NodeConstraint { expression, .. }
            | Payload::RelConstraint { expression, .. } => Some(self.node(*expression)),
            Payload::Case { expression, .. } => self.opt_node(*expression),
            _ => Option::None,
        }
    }

    /// The identifier reference shared by many shapes: SET/REMOVE items,
    /// FOREACH, UNWIND aliases are separate (see [`AstNode::alias`]),
    /// START points, named paths, comprehensions.
    pub fn identifier(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::IdentExpression { identifier, .. }
            | Payload::IdentLabels { identifier, .. }
            | Payload::Foreach { identifier, .. }
            | Payload::UsingIndex { identifier, .. }
            | Payload::UsingScan { identifier, .. }
            | Payload::IndexLookup { identifier, .. }
            | Payload::IdLookup { identifier, .. }
            | Payload::NamedPath { identifier, .. }
            | Payload::NodeConstraint { identifier, .. }
            | Payload::RelConstraint { identifier, .. }
            | Payload::Reduce { identifier, .. }
            | Payload::Comprehension { identifier, .. } => Some(self.node(*identifier)),
            Payload::Wrap(identifier)
                if matches!(self.kind, Kind::AllNodesScan | Kind::AllRelsScan) =>
            {
                Some(self.node(*identifier))
            }
            Payload::NodePattern { identifier, .. }
            | Payload::RelPattern { identifier, .. }
            | Payload::PatternComprehension { identifier, .. } => self.opt_node(*identifier),
            _ => Option::None,
        }
    }

    /// Label references of SET/REMOVE label items, node patterns, labels
    /// operators, USING hints and schema commands.
    pub fn labels(&self) -> impl Iterator<Item = &AstNode> {
        let refs: &[NodeRef] = match &self.payload {
            Payload::IdentLabels { labels, .. }
            | Payload::NodePattern { labels, .. }
            | Payload::LabelsOperator { labels, .. } => labels,
            _ => &[],
        };
        self.node_list(refs)
    }

    pub fn label(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::UsingIndex { label, .. }
            | Payload::UsingScan { label, .. }
            | Payload::PropIndex { label, .. }
            | Payload::NodeConstraint { label, .. } => Some(self.node(*label)),
            _ => Option::None,
        }
    }

    pub fn reltype(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::RelConstraint { reltype, .. } => Some(self.node(*reltype)),
            _ => Option::None,
        }
    }

    pub fn reltypes(&self) -> impl Iterator<Item = &AstNode> {
        let refs: &[NodeRef] = match &self.payload {
            Payload::RelPattern { reltypes, .. } => reltypes,
            _ => &[],
        };
        self.node_list(refs)
    }

    /// The property-name reference of property operators, USING INDEX
    /// hints, schema index commands, index lookups, map-projection
    /// selectors and SET property items.
    pub fn prop_name(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::PropertyOperator { prop_name, .. }
            | Payload::UsingIndex { prop_name, .. }
            | Payload::PropIndex { prop_name, .. }
            | Payload::IndexLookup { prop_name, .. }
            | Payload::MapProjectionLiteral { prop_name, .. } => Some(self.node(*prop_name)),
            Payload::Wrap(prop_name) if self.kind == Kind::MapProjectionProperty => {
                Some(self.node(*prop_name))
            }
            _ => Option::None,
        }
    }

    pub fn set_property_property(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::SetProperty { property, .. } => Some(self.node(*property)),
            _ => Option::None,
        }
    }

    // --- projection accessors -----------------------------------------

    pub fn is_distinct(&self) -> bool {
        match &self.payload {
            Payload::Projections { distinct, .. } => *distinct,
            Payload::Apply { distinct, .. } | Payload::ApplyAll { distinct, .. } => *distinct,
            _ => false,
        }
    }

    /// True for `RETURN *` / `WITH *`.
    pub fn includes_existing(&self) -> bool {
        matches!(
            self.payload,
            Payload::Projections {
                include_existing: true,
                ..
            }
        )
    }

    pub fn projections(&self) -> impl Iterator<Item = &AstNode> {
        let refs: &[NodeRef] = match &self.payload {
            Payload::Projections { items, .. } => items,
            Payload::Call { projections, .. } => projections,
            _ => &[],
        };
        self.node_list(refs)
    }

    pub fn order_by(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::Projections { order_by, .. } => self.opt_node(*order_by),
            _ => Option::None,
        }
    }

    pub fn skip(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::Projections { skip, .. } => self.opt_node(*skip),
            _ => Option::None,
        }
    }

    pub fn limit(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::Projections { limit, .. } => self.opt_node(*limit),
            _ => Option::None,
        }
    }

    pub fn alias(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::Projection { alias, .. } => self.opt_node(*alias),
            Payload::Unwind { alias, .. } => Some(self.node(*alias)),
            _ => Option::None,
        }
    }

    pub fn sort_ascending(&self) -> bool {
        match &self.payload {
            Payload::SortItem { ascending, .. } => *ascending,
            _ => true,
        }
    }

    // --- call / load csv / start accessors ----------------------------

    pub fn call_proc(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::Call { proc, .. } => Some(self.node(*proc)),
            _ => Option::None,
        }
    }

    /// Arguments of a CALL clause or of a function application.
    pub fn args(&self) -> impl Iterator<Item = &AstNode> {
        let refs: &[NodeRef] = match &self.payload {
            Payload::Call { args, .. } | Payload::Apply { args, .. } => args,
            _ => &[],
        };
        self.node_list(refs)
    }

    pub fn load_csv_has_headers(&self) -> bool {
        matches!(
            self.payload,
            Payload::LoadCsv {
                with_headers: true,
                ..
            }
        )
    }

    pub fn load_csv_url(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::LoadCsv { url, .. } => Some(self.node(*url)),
            _ => Option::None,
        }
    }

    pub fn load_csv_identifier(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::LoadCsv { identifier, .. } => Some(self.node(*identifier)),
            _ => Option::None,
        }
    }

    pub fn load_csv_field_terminator(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::LoadCsv {
                field_terminator, ..
            } => self.opt_node(*field_terminator),
            _ => Option::None,
        }
    }

    pub fn start_points(&self) -> impl Iterator<Item = &AstNode> {
        let refs: &[NodeRef] = match &self.payload {
            Payload::Start { points, .. } => points,
            _ => &[],
        };
        self.node_list(refs)
    }

    pub fn index_name(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::IndexLookup { index, .. } => Some(self.node(*index)),
            _ => Option::None,
        }
    }

    pub fn lookup_ids(&self) -> impl Iterator<Item = &AstNode> {
        let refs: &[NodeRef] = match &self.payload {
            Payload::IdLookup { ids, .. } => ids,
            _ => &[],
        };
        self.node_list(refs)
    }

    // --- pattern accessors --------------------------------------------

    pub fn path(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::NamedPath { path, .. } | Payload::ShortestPath { path, .. } => {
                Some(self.node(*path))
            }
            Payload::PatternComprehension { pattern, .. } => Some(self.node(*pattern)),
            _ => Option::None,
        }
    }

    pub fn shortest_path_is_single(&self) -> bool {
        matches!(self.payload, Payload::ShortestPath { single: true, .. })
    }

    pub fn direction(&self) -> Option<Direction> {
        match &self.payload {
            Payload::RelPattern { direction, .. } => Some(*direction),
            _ => Option::None,
        }
    }

    pub fn properties(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::NodePattern { properties, .. } | Payload::RelPattern { properties, .. } => {
                self.opt_node(*properties)
            }
            _ => Option::None,
        }
    }

    pub fn varlength(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::RelPattern { varlength, .. } => self.opt_node(*varlength),
            _ => Option::None,
        }
    }

    pub fn range_start(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::Range { start, .. } => self.opt_node(*start),
            Payload::Slice { start, .. } => self.opt_node(*start),
            _ => Option::None,
        }
    }

    pub fn range_end(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::Range { end, .. } => self.opt_node(*end),
            Payload::Slice { end, .. } => self.opt_node(*end),
            _ => Option::None,
        }
    }

    // --- expression accessors -----------------------------------------

    pub fn operator(&self) -> Option<Operator> {
        match &self.payload {
            Payload::UnaryOperator { op, .. } | Payload::BinaryOperator { op, .. } => Some(*op),
            _ => Option::None,
        }
    }

    pub fn unary_operand(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::UnaryOperator { arg, .. } => Some(self.node(*arg)),
            _ => Option::None,
        }
    }

    pub fn left(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::BinaryOperator { left, .. } => Some(self.node(*left)),
            _ => Option::None,
        }
    }

    pub fn right(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::BinaryOperator { right, .. } => Some(self.node(*right)),
            _ => Option::None,
        }
    }

    pub fn comparison_operators(&self) -> &[Operator] {
        match &self.payload {
            Payload::Comparison { ops, .. } => ops,
            _ => &[],
        }
    }

    pub fn comparison_operands(&self) -> impl Iterator<Item = &AstNode> {
        let refs: &[NodeRef] = match &self.payload {
            Payload::Comparison { args, .. } => args,
            _ => &[],
        };
        self.node_list(refs)
    }

    pub fn function(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::Apply { func, .. } | Payload::ApplyAll { func, .. } => {
                Some(self.node(*func))
            }
            _ => Option::None,
        }
    }

    pub fn subscript(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::Subscript { subscript, .. } => Some(self.node(*subscript)),
            _ => Option::None,
        }
    }

    pub fn map_selectors(&self) -> impl Iterator<Item = &AstNode> {
        let refs: &[NodeRef] = match &self.payload {
            Payload::MapProjection { selectors, .. } => selectors,
            _ => &[],
        };
        self.node_list(refs)
    }

    /// Key/value pairs of a map literal or CASE alternatives.
    pub fn pairs(&self) -> impl Iterator<Item = (&AstNode, &AstNode)> {
        let pairs: &[(NodeRef, NodeRef)] = match &self.payload {
            Payload::Map { pairs } => pairs,
            Payload::Case { alternatives, .. } => alternatives,
            _ => &[],
        };
        pairs.iter().map(move |&(k, v)| (&self.children[k], &self.children[v]))
    }

    pub fn case_default(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::Case { default, .. } => self.opt_node(*default),
            _ => Option::None,
        }
    }

    /// The per-element predicate of a comprehension or filter expression.
    pub fn comprehension_predicate(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::Comprehension { predicate, .. }
            | Payload::PatternComprehension { predicate, .. } => self.opt_node(*predicate),
            _ => Option::None,
        }
    }

    /// The per-element result expression of a comprehension.
    pub fn eval(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::Comprehension { eval, .. } => self.opt_node(*eval),
            Payload::PatternComprehension { eval, .. } | Payload::Reduce { eval, .. } => {
                Some(self.node(*eval))
            }
            _ => Option::None,
        }
    }

    pub fn reduce_accumulator(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::Reduce { accumulator, .. } => Some(self.node(*accumulator)),
            _ => Option::None,
        }
    }

    pub fn reduce_init(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::Reduce { init, .. } => Some(self.node(*init)),
            _ => Option::None,
        }
    }

    // --- option accessors ---------------------------------------------

    pub fn option_version(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::CypherOption { version, .. } => self.opt_node(*version),
            _ => Option::None,
        }
    }

    pub fn option_params(&self) -> impl Iterator<Item = &AstNode> {
        let refs: &[NodeRef] = match &self.payload {
            Payload::CypherOption { params, .. } => params,
            _ => &[],
        };
        self.node_list(refs)
    }

    pub fn option_param_name(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::CypherOptionParam { name, .. } => Some(self.node(*name)),
            _ => Option::None,
        }
    }

    pub fn option_param_value(&self) -> Option<&AstNode> {
        match &self.payload {
            Payload::CypherOptionParam { value, .. } => Some(self.node(*value)),
            _ => Option::None,
        }
    }
}

impl fmt::Debug for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:?}", self.kind.name(), self.range)?;
        let detail = self.detail();
        if !detail.is_empty() {
            write!(f, " {}", detail)?;
        }
        Ok(())
    }
}
