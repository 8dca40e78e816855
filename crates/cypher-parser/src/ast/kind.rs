//! The closed set of AST node kinds and the kind-parent hierarchy.
//!
//! Kinds form a directed acyclic hierarchy used purely for `instance_of`
//! queries: `Kind::Integer.is_a(Kind::Expression)` holds, for example.
//! Abstract kinds (`Expression`, `Clause`, …) are never constructed; they
//! only appear as ancestors. The hierarchy is static data.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    // Abstract kinds.
    QueryOption,
    Clause,
    SchemaCommand,
    Expression,
    StartPoint,
    SetItem,
    RemoveItem,
    MergeAction,
    MatchHint,
    MapProjectionSelector,
    Boolean,
    Comment,

    // Directives.
    Statement,
    Command,
    LineComment,
    BlockComment,

    // Query options.
    CypherOption,
    CypherOptionParam,
    ExplainOption,
    ProfileOption,

    // Queries and clauses.
    Query,
    Union,
    Match,
    UsingIndex,
    UsingScan,
    UsingJoin,
    Merge,
    OnMatch,
    OnCreate,
    Create,
    Set,
    SetProperty,
    SetAllProperties,
    MergeProperties,
    SetLabels,
    Delete,
    Remove,
    RemoveLabels,
    RemoveProperty,
    Foreach,
    With,
    Unwind,
    Call,
    Return,
    LoadCsv,
    Start,

    // START lookups.
    NodeIndexLookup,
    RelIndexLookup,
    NodeIdLookup,
    RelIdLookup,
    AllNodesScan,
    AllRelsScan,
    IndexName,

    // Clause parts.
    Where,
    OrderBy,
    SortItem,
    Projection,
    Skip,
    Limit,

    // Patterns.
    Pattern,
    PatternPath,
    NamedPath,
    ShortestPath,
    NodePattern,
    RelPattern,
    Range,

    // Schema commands.
    CreateNodePropIndex,
    DropNodePropIndex,
    CreateNodePropConstraint,
    DropNodePropConstraint,
    CreateUniqueNodePropConstraint,
    DropUniqueNodePropConstraint,
    CreateRelPropConstraint,
    DropRelPropConstraint,

    // Expressions.
    UnaryOperator,
    BinaryOperator,
    Comparison,
    Apply,
    ApplyAll,
    PropertyOperator,
    Subscript,
    Slice,
    LabelsOperator,
    MapProjection,
    MapProjectionLiteral,
    MapProjectionProperty,
    MapProjectionIdentifier,
    MapProjectionAllProperties,
    ListComprehension,
    PatternComprehension,
    Case,
    Filter,
    Extract,
    Reduce,
    All,
    Any,
    Single,
    None,

    // Terminals.
    Identifier,
    Parameter,
    String,
    Integer,
    Float,
    True,
    False,
    Null,
    Label,
    Reltype,
    PropName,
    FunctionName,
    ProcName,
    Map,
    Collection,

    /// A synthetic node covering input skipped during error recovery.
    Error,
}

impl Kind {
    /// The printable name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            Kind::QueryOption => "query-option",
            Kind::Clause => "clause",
            Kind::SchemaCommand => "schema-command",
            Kind::Expression => "expression",
            Kind::StartPoint => "start-point",
            Kind::SetItem => "set-item",
            Kind::RemoveItem => "remove-item",
            Kind::MergeAction => "merge-action",
            Kind::MatchHint => "match-hint",
            Kind::MapProjectionSelector => "map-projection-selector",
            Kind::Boolean => "boolean",
            Kind::Comment => "comment",
            Kind::Statement => "statement",
            Kind::Command => "command",
            Kind::LineComment => "line-comment",
            Kind::BlockComment => "block-comment",
            Kind::CypherOption => "cypher-option",
            Kind::CypherOptionParam => "cypher-option-param",
            Kind::ExplainOption => "explain-option",
            Kind::ProfileOption => "profile-option",
            Kind::Query => "query",
            Kind::Union => "union",
            Kind::Match => "match",
            Kind::UsingIndex => "using-index",
            Kind::UsingScan => "using-scan",
            Kind::UsingJoin => "using-join",
            Kind::Merge => "merge",
            Kind::OnMatch => "on-match",
            Kind::OnCreate => "on-create",
            Kind::Create => "create",
            Kind::Set => "set",
            Kind::SetProperty => "set-property",
            Kind::SetAllProperties => "set-all-properties",
            Kind::MergeProperties => "merge-properties",
            Kind::SetLabels => "set-labels",
            Kind::Delete => "delete",
            Kind::Remove => "remove",
            Kind::RemoveLabels => "remove-labels",
            Kind::RemoveProperty => "remove-property",
            Kind::Foreach => "foreach",
            Kind::With => "with",
            Kind::Unwind => "unwind",
            Kind::Call => "call",
            Kind::Return => "return",
            Kind::LoadCsv => "load-csv",
            Kind::Start => "start",
            Kind::NodeIndexLookup => "node-index-lookup",
            Kind::RelIndexLookup => "rel-index-lookup",
            Kind::NodeIdLookup => "node-id-lookup",
            Kind::RelIdLookup => "rel-id-lookup",
            Kind::AllNodesScan => "all-nodes-scan",
            Kind::AllRelsScan => "all-rels-scan",
            Kind::IndexName => "index-name",
            Kind::Where => "where",
            Kind::OrderBy => "order-by",
            Kind::SortItem => "sort-item",
            Kind::Projection => "projection",
            Kind::Skip => "skip",
            Kind::Limit => "limit",
            Kind::Pattern => "pattern",
            Kind::PatternPath => "pattern-path",
            Kind::NamedPath => "named-path",
            Kind::ShortestPath => "shortest-path",
            Kind::NodePattern => "node-pattern",
            Kind::RelPattern => "rel-pattern",
            Kind::Range => "range",
            Kind::CreateNodePropIndex => "create-node-prop-index",
            Kind::DropNodePropIndex => "drop-node-prop-index",
            Kind::CreateNodePropConstraint => "create-node-prop-constraint",
            Kind::DropNodePropConstraint => "drop-node-prop-constraint",
            Kind::CreateUniqueNodePropConstraint => "create-unique-node-prop-constraint",
            Kind::DropUniqueNodePropConstraint => "drop-unique-node-prop-constraint",
            Kind::CreateRelPropConstraint => "create-rel-prop-constraint",
            Kind::DropRelPropConstraint => "drop-rel-prop-constraint",
            Kind::UnaryOperator => "unary-operator",
            Kind::BinaryOperator => "binary-operator",
            Kind::Comparison => "comparison",
            Kind::Apply => "apply",
            Kind::ApplyAll => "apply-all",
            Kind::PropertyOperator => "property-operator",
            Kind::Subscript => "subscript",
            Kind::Slice => "slice",
            Kind::LabelsOperator => "labels-operator",
            Kind::MapProjection => "map-projection",
            Kind::MapProjectionLiteral => "map-projection-literal",
            Kind::MapProjectionProperty => "map-projection-property",
            Kind::MapProjectionIdentifier => "map-projection-identifier",
            Kind::MapProjectionAllProperties => "map-projection-all-properties",
            Kind::ListComprehension => "list-comprehension",
            Kind::PatternComprehension => "pattern-comprehension",
            Kind::Case => "case",
            Kind::Filter => "filter",
            Kind::Extract => "extract",
            Kind::Reduce => "reduce",
            Kind::All => "all",
            Kind::Any => "any",
            Kind::Single => "single",
            Kind::None => "none",
            Kind::Identifier => "identifier",
            Kind::Parameter => "parameter",
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::True => "true",
            Kind::False => "false",
            Kind::Null => "null",
            Kind::Label => "label",
            Kind::Reltype => "reltype",
            Kind::PropName => "prop-name",
            Kind::FunctionName => "function-name",
            Kind::ProcName => "proc-name",
            Kind::Map => "map",
            Kind::Collection => "collection",
            Kind::Error => "error",
        }
    }

    /// The direct parent kinds of this kind.
    pub(crate) fn parents(self) -> &'static [Kind] {
        match self {
            Kind::LineComment | Kind::BlockComment => &[Kind::Comment],

            Kind::CypherOption | Kind::ExplainOption | Kind::ProfileOption => {
                &[Kind::QueryOption]
            }

            Kind::Union
            | Kind::Match
            | Kind::Merge
            | Kind::Create
            | Kind::Set
            | Kind::Delete
            | Kind::Remove
            | Kind::Foreach
            | Kind::With
            | Kind::Unwind
            | Kind::Call
            | Kind::Return
            | Kind::LoadCsv
            | Kind::Start => &[Kind::Clause],

            Kind::UsingIndex | Kind::UsingScan | Kind::UsingJoin => &[Kind::MatchHint],

            Kind::OnMatch | Kind::OnCreate => &[Kind::MergeAction],

            Kind::SetProperty
            | Kind::SetAllProperties
            | Kind::MergeProperties
            | Kind::SetLabels => &[Kind::SetItem],

            Kind::RemoveLabels | Kind::RemoveProperty => &[Kind::RemoveItem],

            Kind::NodeIndexLookup
            | Kind::RelIndexLookup
            | Kind::NodeIdLookup
            | Kind::RelIdLookup
            | Kind::AllNodesScan
            | Kind::AllRelsScan => &[Kind::StartPoint],

            Kind::CreateNodePropIndex
            | Kind::DropNodePropIndex
            | Kind::CreateNodePropConstraint
            | Kind::DropNodePropConstraint
            | Kind::CreateUniqueNodePropConstraint
            | Kind::DropUniqueNodePropConstraint
            | Kind::CreateRelPropConstraint
            | Kind::DropRelPropConstraint => &[Kind::SchemaCommand],

            Kind::PatternPath => &[Kind::Expression],
            Kind::NamedPath | Kind::ShortestPath => &[Kind::PatternPath],

            Kind::UnaryOperator
            | Kind::BinaryOperator
            | Kind::Comparison
            | Kind::Apply
            | Kind::ApplyAll
            | Kind::PropertyOperator
            | Kind::Subscript
            | Kind::Slice
            | Kind::LabelsOperator
            | Kind::MapProjection
            | Kind::ListComprehension
            | Kind::PatternComprehension
            | Kind::Case
            | Kind::Filter
            | Kind::Extract
            | Kind::Reduce
            | Kind::All
            | Kind::Any
            | Kind::Single
            | Kind::None => &[Kind::Expression],

            Kind::MapProjectionLiteral
            | Kind::MapProjectionProperty
            | Kind::MapProjectionIdentifier
            | Kind::MapProjectionAllProperties => &[Kind::MapProjectionSelector],

            Kind::Identifier
            | Kind::Parameter
            | Kind::String
            | Kind::Integer
            | Kind::Float
            | Kind::Null
            | Kind::Map
            | Kind::Collection => &[Kind::Expression],

            Kind::True | Kind::False => &[Kind::Boolean],
            Kind::Boolean => &[Kind::Expression],

            // Recovery nodes can stand in for an expression or a clause.
            Kind::Error => &[Kind::Expression, Kind::Clause],

            _ => &[],
        }
    }

    /// True if `self` is `ancestor` or transitively below it in the kind
    /// hierarchy.
    pub fn is_a(self, ancestor: Kind) -> bool {
        self == ancestor || self.parents().iter().any(|p| p.is_a(ancestor))
    }
}

#[cfg(test)]
mod test {
    use super::Kind;

    #[test]
    fn instance_of_walks_the_hierarchy() {
        assert!(Kind::Identifier.is_a(Kind::Expression));
        assert!(Kind::True.is_a(Kind::Boolean));
        assert!(Kind::True.is_a(Kind::Expression));
        assert!(Kind::NamedPath.is_a(Kind::PatternPath));
        assert!(Kind::NamedPath.is_a(Kind::Expression));
        assert!(Kind::Match.is_a(Kind::Clause));
        assert!(Kind::CreateUniqueNodePropConstraint.is_a(Kind::SchemaCommand));
        assert!(Kind::Error.is_a(Kind::Expression));
        assert!(Kind::Error.is_a(Kind::Clause));
    }

    #[test]
    fn instance_of_rejects_unrelated_kinds() {
        assert!(!Kind::Label.is_a(Kind::Expression));
        assert!(!Kind::Match.is_a(Kind::Expression));
        assert!(!Kind::Expression.is_a(Kind::Identifier));
        assert!(!Kind::Statement.is_a(Kind::Clause));
    }

    #[test]
    fn names_are_hyphenated() {
        assert_eq!(Kind::CreateUniqueNodePropConstraint.name(), "create-unique-node-prop-constraint");
        assert_eq!(Kind::PropName.name(), "prop-name");
        assert_eq!(Kind::LoadCsv.name(), "load-csv");
    }
}
