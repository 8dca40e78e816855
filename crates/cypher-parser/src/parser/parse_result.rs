use crate::ast::{AstNode, Kind};
use crate::error::Error;
use crate::lexer::InputPosition;
use crate::limit::LimitTracker;
use crate::printer;
use crate::printer::Colorization;
use std::fmt;

/// Everything a parse produced: the directives, the comments, the errors,
/// and the end-of-input position.
///
/// The result owns every node transitively; ordinals are unique within one
/// result and assigned in construction order. Distinct results are fully
/// independent of each other.
pub struct ParseResult {
    roots: Vec<AstNode>,
    errors: Vec<Error>,
    eof_position: InputPosition,
    next_ordinal: usize,
    recursion: LimitTracker,
}

impl ParseResult {
    pub(crate) fn new() -> Self {
        Self {
            roots: Vec::new(),
            errors: Vec::new(),
            eof_position: InputPosition::start(),
            next_ordinal: 0,
            recursion: LimitTracker::default(),
        }
    }

    pub(crate) fn push_root(&mut self, mut node: AstNode) {
        node.assign_ordinals(&mut self.next_ordinal);
        self.roots.push(node);
    }

    pub(crate) fn set_eof_position(&mut self, position: InputPosition) {
        self.eof_position = position;
    }

    pub(crate) fn set_errors(&mut self, errors: Vec<Error>) {
        self.errors = errors;
    }

    pub(crate) fn set_recursion(&mut self, recursion: LimitTracker) {
        self.recursion = recursion;
    }

    /// All roots: directives, comments and recovery nodes, in the order
    /// they were committed.
    pub fn roots(&self) -> &[AstNode] {
        &self.roots
    }

    /// Top-level statements and client commands, in source order.
    pub fn directives(&self) -> impl Iterator<Item = &AstNode> {
        self.roots
            .iter()
            .filter(|n| matches!(n.kind(), Kind::Statement | Kind::Command))
    }

    pub fn ndirectives(&self) -> usize {
        self.directives().count()
    }

    pub fn directive(&self, i: usize) -> Option<&AstNode> {
        self.directives().nth(i)
    }

    /// Comments encountered anywhere in the input, in source order.
    pub fn comments(&self) -> impl Iterator<Item = &AstNode> {
        self.roots.iter().filter(|n| n.instance_of(Kind::Comment))
    }

    /// All errors, in source order.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn nerrors(&self) -> usize {
        self.errors.len()
    }

    pub fn error(&self, i: usize) -> Option<&Error> {
        self.errors.get(i)
    }

    /// The position just past the last consumed input.
    pub fn eof_position(&self) -> InputPosition {
        self.eof_position
    }

    /// How many nodes this result owns.
    pub fn node_count(&self) -> usize {
        self.next_ordinal
    }

    /// Recursion-limit utilization over the whole parse.
    pub fn recursion_limit(&self) -> LimitTracker {
        self.recursion
    }

    /// Render the AST in columnar form, wrapped to `width` (0 disables
    /// wrapping), with spans wrapped in the colorization table's escape
    /// pairs. Roots print in source order.
    pub fn fprint(
        &self,
        w: &mut dyn fmt::Write,
        width: usize,
        colorization: &Colorization,
    ) -> fmt::Result {
        let mut roots: Vec<&AstNode> = self.roots.iter().collect();
        roots.sort_by_key(|n| n.range().start().offset());
        for root in roots {
            printer::print_node(w, root, width, colorization)?;
        }
        Ok(())
    }

    /// Convenience wrapper around [`ParseResult::fprint`].
    pub fn ast_string(&self, width: usize) -> String {
        let mut out = String::new();
        self.fprint(&mut out, width, &Colorization::none())
            .expect("writing to a String cannot fail");
        out
    }
}

impl fmt::Debug for ParseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fprint(f, 0, &Colorization::none())?;
        for err in &self.errors {
            writeln!(f, "- {err:?}")?;
        }
        Ok(())
    }
}
