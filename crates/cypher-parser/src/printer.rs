//! The columnar AST printer.
//!
//! Each node prints as one logical line:
//!
//! ```text
//! @0 statement @0..9  body=@1  @1
//! ```
//!
//! ordinal, kind name, input range, the node's detail string and the
//! ordinals of its children. Lines wrap to the requested width by breaking
//! between columns only; a detail string is never split.

use crate::ast::AstNode;
use std::fmt;
use std::fmt::Write;

/// A table of `(prefix, suffix)` escape-sequence pairs the printer wraps
/// around each span category. The [`Colorization::none`] table (also the
/// `Default`) holds empty strings everywhere and disables colorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colorization {
    pub error_message: (&'static str, &'static str),
    pub ordinal: (&'static str, &'static str),
    pub kind: (&'static str, &'static str),
    pub range: (&'static str, &'static str),
    pub detail: (&'static str, &'static str),
}

impl Colorization {
    /// No colorization: every pair is empty.
    pub const fn none() -> Self {
        Self {
            error_message: ("", ""),
            ordinal: ("", ""),
            kind: ("", ""),
            range: ("", ""),
            detail: ("", ""),
        }
    }

    /// ANSI escape sequences for terminal output.
    pub const fn ansi() -> Self {
        Self {
            error_message: ("\x1b[1;31m", "\x1b[0m"),
            ordinal: ("\x1b[36m", "\x1b[0m"),
            kind: ("\x1b[32m", "\x1b[0m"),
            range: ("\x1b[34m", "\x1b[0m"),
            detail: ("\x1b[33m", "\x1b[0m"),
        }
    }
}

impl Default for Colorization {
    fn default() -> Self {
        Self::none()
    }
}

const CONTINUATION_INDENT: &str = "    ";

/// One output line under construction. Width accounting tracks visible
/// characters only, so escape sequences never trigger wrapping.
struct Line {
    buf: String,
    visible: usize,
}

impl Line {
    fn new() -> Self {
        Self {
            buf: String::new(),
            visible: 0,
        }
    }

    fn push(&mut self, text: &str, color: (&str, &str)) {
        self.buf.push_str(color.0);
        self.buf.push_str(text);
        self.buf.push_str(color.1);
        self.visible += text.chars().count();
    }

    fn push_plain(&mut self, text: &str) {
        self.buf.push_str(text);
        self.visible += text.chars().count();
    }
}

pub(crate) fn print_node(
    w: &mut dyn Write,
    node: &AstNode,
    width: usize,
    colorization: &Colorization,
) -> fmt::Result {
    let mut line = Line::new();
    line.push(&format!("@{}", node.ordinal()), colorization.ordinal);
    line.push_plain(" ");
    line.push(node.kind().name(), colorization.kind);
    line.push_plain(" ");
    line.push(
        &format!(
            "@{}..{}",
            node.range().start().offset(),
            node.range().end().offset()
        ),
        colorization.range,
    );

    let detail = node.detail();
    if !detail.is_empty() {
        break_between_columns(w, &mut line, detail.chars().count(), width)?;
        line.push(&detail, colorization.detail);
    }

    if !node.children().is_empty() {
        let children: Vec<String> = node
            .children()
            .iter()
            .map(|c| format!("@{}", c.ordinal()))
            .collect();
        let children = children.join(" ");
        break_between_columns(w, &mut line, children.chars().count(), width)?;
        line.push_plain(&children);
    }

    writeln!(w, "{}", line.buf)?;

    for child in node.children() {
        print_node(w, child, width, colorization)?;
    }
    Ok(())
}

/// Append a two-space column separator, or wrap to an indented
/// continuation line if the column would overflow the width. A width of
/// zero disables wrapping.
fn break_between_columns(
    w: &mut dyn Write,
    line: &mut Line,
    next_visible: usize,
    width: usize,
) -> fmt::Result {
    if width > 0 && line.visible + 2 + next_visible > width {
        writeln!(w, "{}", line.buf)?;
        *line = Line::new();
        line.push_plain(CONTINUATION_INDENT);
    } else {
        line.push_plain("  ");
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ast::Operator;
    use crate::lexer::{InputPosition, InputRange};

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

    fn sum_node() -> AstNode {
        let one = AstNode::new_integer("1", r(0, 1));
        let two = AstNode::new_integer("2", r(4, 5));
        let mut sum = AstNode::new_binary_operator(Operator::Plus, one, two, r(0, 5)).unwrap();
        let mut next = 0;
        sum.assign_ordinals(&mut next);
        sum
    }

    #[test]
    fn prints_one_line_per_node() {
        let mut out = String::new();
        print_node(&mut out, &sum_node(), 0, &Colorization::none()).unwrap();
        assert_eq!(
            out,
            "@0 binary-operator @0..5  @1 + @2  @1 @2\n\
             @1 integer @0..1  1\n\
             @2 integer @4..5  2\n"
        );
    }

    #[test]
    fn every_line_has_the_columnar_shape() {
        let mut out = String::new();
        print_node(&mut out, &sum_node(), 0, &Colorization::none()).unwrap();
        for line in out.lines() {
            let mut words = line.split_whitespace();
            let ordinal = words.next().unwrap();
            assert!(ordinal.starts_with('@'));
            assert!(ordinal[1..].chars().all(|c| c.is_ascii_digit()));
            let kind = words.next().unwrap();
            assert!(!kind.is_empty());
            let range = words.next().unwrap();
            assert!(range.starts_with('@') && range.contains(".."));
        }
    }

    #[test]
    fn wraps_between_columns_only() {
        let mut out = String::new();
        print_node(&mut out, &sum_node(), 24, &Colorization::none()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        // The root's children column no longer fits in 24 columns.
        assert_eq!(lines[0], "@0 binary-operator @0..5");
        assert_eq!(lines[1], "    @1 + @2  @1 @2");
        // The detail string itself is never split.
        assert!(out.contains("@1 + @2"));
    }

    #[test]
    fn ansi_table_wraps_spans() {
        let mut out = String::new();
        print_node(&mut out, &sum_node(), 0, &Colorization::ansi()).unwrap();
        assert!(out.contains("\x1b[36m@0\x1b[0m"));
        assert!(out.contains("\x1b[32mbinary-operator\x1b[0m"));
    }

    #[test]
    fn no_colorization_is_the_default() {
        assert_eq!(Colorization::default(), Colorization::none());
        assert_eq!(Colorization::none().error_message, ("", ""));
    }
}
