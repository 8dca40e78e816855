use std::fmt;

/// A `LimitTracker` enforces the parser's recursion limit and keeps track of
/// utilization, so callers can see how close a query came to the ceiling.
///
/// ```rust
/// use cypher_parser::Parser;
///
/// let result = Parser::new("RETURN [[[[1]]]];")
///     .recursion_limit(64)
///     .parse()
///     .unwrap();
/// let usage = result.recursion_limit();
/// assert!(usage.high <= usage.limit);
/// assert!(result.errors().is_empty());
/// ```
#[derive(PartialEq, Eq, Clone, Copy)]
pub struct LimitTracker {
    current: usize,
    /// High water mark for this limit.
    pub high: usize,
    /// Limit.
    pub limit: usize,
}

impl Default for LimitTracker {
    fn default() -> Self {
        Self {
            current: 0,
            high: 0,
            limit: 4_096,
        }
    }
}

impl LimitTracker {
    pub fn new(limit: usize) -> Self {
        Self {
            current: 0,
            high: 0,
            limit,
        }
    }

    pub fn limited(&self) -> bool {
        self.current > self.limit
    }

    pub fn consume(&mut self) {
        self.current += 1;
        if self.current > self.high {
            self.high = self.current;
        }
    }

    pub fn release(&mut self) {
        self.current = self.current.saturating_sub(1);
    }
}

impl fmt::Debug for LimitTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "recursion limit: {}, high: {}", self.limit, self.high)
    }
}

#[cfg(test)]
mod test {
    use super::LimitTracker;

    #[test]
    fn tracks_high_water_mark() {
        let mut limit = LimitTracker::new(2);
        limit.consume();
        limit.consume();
        assert!(!limit.limited());
        limit.consume();
        assert!(limit.limited());
        limit.release();
        limit.release();
        assert!(!limit.limited());
        assert_eq!(limit.high, 3);
    }
}
