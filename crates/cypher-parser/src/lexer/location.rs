use std::fmt;

/// A position within the parsed input.
///
/// Offsets count bytes from the start of the input; lines and columns are
/// 1-based. Columns count code points, and a tab advances a single column.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputPosition {
    pub(crate) offset: usize,
    pub(crate) line: u32,
    pub(crate) column: u32,
}

impl InputPosition {
    pub(crate) fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Byte offset from the start of the input.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// 1-based line number. LF, CR and CRLF all terminate a line; a CRLF
    /// pair counts as a single line break.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// 1-based column number, counted in code points.
    pub fn column(&self) -> u32 {
        self.column
    }
}

impl fmt::Debug for InputPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.line, self.column, self.offset)
    }
}

impl fmt::Display for InputPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, column {}, offset {}",
            self.line, self.column, self.offset
        )
    }
}

/// A half-open region of the input, from the start of the first token to
/// just past the end of the last.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputRange {
    pub(crate) start: InputPosition,
    pub(crate) end: InputPosition,
}

impl InputRange {
    pub(crate) fn new(start: InputPosition, end: InputPosition) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> InputPosition {
        self.start
    }

    /// The end position, exclusive.
    pub fn end(&self) -> InputPosition {
        self.end
    }

    /// True if `other` lies entirely within this range.
    pub fn contains(&self, other: &InputRange) -> bool {
        self.start.offset <= other.start.offset && other.end.offset <= self.end.offset
    }
}

impl fmt::Debug for InputRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start.offset, self.end.offset)
    }
}

impl fmt::Display for InputRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}..{}", self.start.offset, self.end.offset)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn range_containment() {
        let a = InputPosition {
            offset: 0,
            line: 1,
            column: 1,
        };
        let b = InputPosition {
            offset: 4,
            line: 1,
            column: 5,
        };
        let c = InputPosition {
            offset: 9,
            line: 2,
            column: 3,
        };
        let outer = InputRange::new(a, c);
        let inner = InputRange::new(b, c);
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert_eq!(format!("{outer}"), "@0..9");
    }
}
