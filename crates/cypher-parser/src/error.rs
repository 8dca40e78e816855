use crate::lexer::InputPosition;
use crate::printer::Colorization;
use std::fmt;
use thiserror::Error as ThisError;

/// An `Error` describes a lexical or syntactic problem found while parsing.
///
/// Errors are accumulated on the [`ParseResult`](crate::ParseResult) and do
/// not abort parsing; the parser recovers at the next statement boundary and
/// keeps going. Check the result's error list before trusting its AST:
///
/// ```rust
/// use cypher_parser::Parser;
///
/// let result = Parser::new("MATCH (n) RETURN n;").parse().unwrap();
/// assert!(result.errors().is_empty());
/// ```
///
/// Each error carries the position it occurred at and a snippet of the
/// surrounding source with whitespace normalized, suitable for rendering a
/// caret underneath via [`Error::format`].
#[derive(ThisError, Clone, PartialEq, Eq)]
#[error("{message} ({position})")]
pub struct Error {
    pub(crate) message: String,
    pub(crate) position: InputPosition,
    pub(crate) context: String,
    pub(crate) context_offset: usize,
}

impl Error {
    pub(crate) fn new<S: Into<String>>(
        message: S,
        position: InputPosition,
        context: String,
        context_offset: usize,
    ) -> Self {
        Self {
            message: message.into(),
            position,
            context,
            context_offset,
        }
    }

    /// The human-readable description of what went wrong.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The position in the input at which the error occurred.
    pub fn position(&self) -> InputPosition {
        self.position
    }

    /// A snippet of the source surrounding the error, with all whitespace
    /// characters replaced by plain spaces.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// The character column within [`Error::context`] at which the error
    /// occurred. Useful for drawing a `^` caret under the snippet.
    pub fn context_offset(&self) -> usize {
        self.context_offset
    }

    /// Render the error the way `cypher-lint` reports it:
    ///
    /// ```text
    /// Invalid input 'x' (line 1, column 8, offset 7):
    /// MATCH (x
    ///        ^
    /// ```
    ///
    /// The position portion is wrapped in the colorization table's
    /// `error_message` pair.
    pub fn format(&self, colorization: &Colorization) -> String {
        let (pre, post) = colorization.error_message;
        let mut out = format!(
            "{} {}({}){}{}",
            self.message,
            pre,
            self.position,
            post,
            if self.context.is_empty() { "" } else { ":" },
        );
        if !self.context.is_empty() {
            out.push('\n');
            out.push_str(&self.context);
            out.push('\n');
            for _ in 0..self.context_offset {
                out.push(' ');
            }
            out.push('^');
        }
        out
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ERROR@{} {:?}",
            self.position.offset, self.message
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::printer::Colorization;

    fn sample() -> Error {
        Error::new(
            "unexpected end of input",
            InputPosition {
                offset: 9,
                line: 1,
                column: 10,
            },
            "RETURN 1 +".to_string(),
            9,
        )
    }

    #[test]
    fn display_includes_position() {
        assert_eq!(
            sample().to_string(),
            "unexpected end of input (line 1, column 10, offset 9)"
        );
    }

    #[test]
    fn format_draws_a_caret() {
        let rendered = sample().format(&Colorization::none());
        assert_eq!(
            rendered,
            "unexpected end of input (line 1, column 10, offset 9):\n\
             RETURN 1 +\n         ^"
        );
    }
}
