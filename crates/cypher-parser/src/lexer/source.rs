use crate::lexer::{InputPosition, InputRange};
use std::io;
use std::io::Read;

/// How many bytes of already-consumed input are kept behind the cursor so
/// that error context can still be extracted after the window slides.
pub(crate) const CONTEXT_RETAIN: usize = 80;

const READ_CHUNK: usize = 4096;

/// The result of looking at the input: a decoded character, a byte that is
/// not valid UTF-8, or the end of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Peeked {
    Char(char),
    Invalid,
    Eof,
}

/// A saved cursor state the lexer can rewind to, as long as the window has
/// not slid past it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Mark {
    offset: usize,
    line: u32,
    column: u32,
    after_cr: bool,
}

impl Mark {
    pub(crate) fn position(&self) -> InputPosition {
        InputPosition {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }
}

/// A sliding window over a byte stream.
///
/// Bytes are pulled from the reader on demand, decoded as UTF-8 one
/// character at a time, and dropped again once the parser commits a
/// completed directive. At any moment the buffer holds the current
/// directive plus [`CONTEXT_RETAIN`] bytes of leading context, so memory
/// stays bounded no matter how large the input is.
#[derive(Debug)]
pub(crate) struct SourceBuffer<R> {
    reader: R,
    buf: Vec<u8>,
    /// Input offset of `buf[0]`.
    base: usize,
    /// Input offset of the next unconsumed byte.
    cursor: usize,
    line: u32,
    column: u32,
    /// The last consumed character was a CR; a following LF belongs to the
    /// same line break.
    after_cr: bool,
    eof: bool,
}

impl<R: Read> SourceBuffer<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            base: 0,
            cursor: 0,
            line: 1,
            column: 1,
            after_cr: false,
            eof: false,
        }
    }

    pub(crate) fn position(&self) -> InputPosition {
        InputPosition {
            offset: self.cursor,
            line: self.line,
            column: self.column,
        }
    }

    pub(crate) fn mark(&self) -> Mark {
        Mark {
            offset: self.cursor,
            line: self.line,
            column: self.column,
            after_cr: self.after_cr,
        }
    }

    /// Rewind to a previously saved mark. The mark must still be inside the
    /// retained window; marks never outlive the directive they were taken
    /// in, so this holds by construction.
    pub(crate) fn restore(&mut self, mark: &Mark) {
        debug_assert!(mark.offset >= self.base, "mark has slid out of the window");
        self.cursor = mark.offset;
        self.line = mark.line;
        self.column = mark.column;
        self.after_cr = mark.after_cr;
    }

    pub(crate) fn range_from(&self, mark: &Mark) -> InputRange {
        InputRange::new(mark.position(), self.position())
    }

    /// Ensure at least `want` bytes are buffered past the cursor, or the
    /// reader is exhausted.
    fn fill(&mut self, want: usize) -> io::Result<()> {
        while !self.eof && self.buf.len() - (self.cursor - self.base) < want {
            let mut chunk = [0u8; READ_CHUNK];
            match self.reader.read(&mut chunk) {
                Ok(0) => self.eof = true,
                Ok(n) => self.buf.extend_from_slice(&chunk[..n]),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    /// Look at the character `k` characters past the cursor without
    /// consuming anything.
    pub(crate) fn peek(&mut self, k: usize) -> io::Result<Peeked> {
        // Worst case every character ahead of us is four bytes wide.
        self.fill(4 * (k + 1))?;
        let mut rel = self.cursor - self.base;
        for _ in 0..k {
            match decode(&self.buf[rel..], self.eof) {
                Decoded::Char(_, width) => rel += width,
                Decoded::Invalid => rel += 1,
                Decoded::Empty => return Ok(Peeked::Eof),
            }
        }
        Ok(match decode(&self.buf[rel..], self.eof) {
            Decoded::Char(c, _) => Peeked::Char(c),
            Decoded::Invalid => Peeked::Invalid,
            Decoded::Empty => Peeked::Eof,
        })
    }

    /// Consume one character, updating the line/column accounting.
    pub(crate) fn bump(&mut self) -> io::Result<Peeked> {
        let peeked = self.peek(0)?;
        match peeked {
            Peeked::Char(c) => {
                self.cursor += c.len_utf8();
                match c {
                    '\r' => {
                        self.line += 1;
                        self.column = 1;
                        self.after_cr = true;
                    }
                    '\n' => {
                        if !self.after_cr {
                            self.line += 1;
                        }
                        self.column = 1;
                        self.after_cr = false;
                    }
                    _ => {
                        self.column += 1;
                        self.after_cr = false;
                    }
                }
            }
            Peeked::Invalid => {
                self.cursor += 1;
                self.column += 1;
                self.after_cr = false;
            }
            Peeked::Eof => {}
        }
        Ok(peeked)
    }

    /// Consume the next character if it is exactly `c`.
    pub(crate) fn eat(&mut self, c: char) -> io::Result<bool> {
        if self.peek(0)? == Peeked::Char(c) {
            self.bump()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Slide the window forward, dropping everything further behind the
    /// cursor than the retained error context. Called when a directive is
    /// committed; never called while a mark is live.
    pub(crate) fn commit(&mut self) {
        let keep_from = self.cursor.saturating_sub(CONTEXT_RETAIN);
        if keep_from > self.base {
            self.buf.drain(..keep_from - self.base);
            self.base = keep_from;
        }
    }

    /// The retained source between two input offsets, clamped to the
    /// window. Invalid UTF-8 is replaced.
    pub(crate) fn text_between(&self, start: usize, end: usize) -> String {
        let lo = start.max(self.base);
        let hi = end.min(self.base + self.buf.len()).max(lo);
        String::from_utf8_lossy(&self.buf[lo - self.base..hi - self.base]).into_owned()
    }

    /// Extract an error-context snippet of at most `width` characters
    /// around `position`, whitespace normalized to plain spaces. Returns
    /// the snippet and the character column of `position` within it.
    pub(crate) fn context(&mut self, position: InputPosition, width: usize) -> (String, usize) {
        // Best effort: buffer some trailing context too. An I/O failure
        // here resurfaces on the next token read, so it is safe to drop.
        let _ = self.fill(width);

        let end_avail = self.base + self.buf.len();
        let mut start = position.offset.saturating_sub(width / 2).max(self.base);
        while start < end_avail && is_continuation(self.buf[start - self.base]) {
            start += 1;
        }

        let mut snippet = String::new();
        let mut caret = None;
        let mut count = 0;
        let mut rel = start - self.base;
        while count < width && rel < self.buf.len() {
            if caret.is_none() && self.base + rel >= position.offset {
                caret = Some(count);
            }
            let c = match decode(&self.buf[rel..], true) {
                Decoded::Char(c, w) => {
                    rel += w;
                    c
                }
                Decoded::Invalid => {
                    rel += 1;
                    char::REPLACEMENT_CHARACTER
                }
                Decoded::Empty => break,
            };
            snippet.push(if c.is_whitespace() { ' ' } else { c });
            count += 1;
        }
        (snippet, caret.unwrap_or(count))
    }
}

enum Decoded {
    Char(char, usize),
    Invalid,
    Empty,
}

fn is_continuation(byte: u8) -> bool {
    byte & 0b1100_0000 == 0b1000_0000
}

/// Decode the first character of `bytes`. A truncated multi-byte sequence
/// is only invalid once the reader is known to be exhausted; before that
/// the caller refills and retries.
fn decode(bytes: &[u8], eof: bool) -> Decoded {
    let Some(&first) = bytes.first() else {
        return Decoded::Empty;
    };
    let width = match first {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        _ => return Decoded::Invalid,
    };
    if bytes.len() < width {
        return if eof { Decoded::Invalid } else { Decoded::Empty };
    }
    match std::str::from_utf8(&bytes[..width]) {
        Ok(s) => match s.chars().next() {
            Some(c) => Decoded::Char(c, width),
            None => Decoded::Invalid,
        },
        Err(_) => Decoded::Invalid,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Hands out one byte per read call, to exercise incremental filling.
    struct TrickleReader<'a> {
        data: &'a [u8],
        at: usize,
    }

    impl<'a> Read for TrickleReader<'a> {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            if self.at == self.data.len() || out.is_empty() {
                return Ok(0);
            }
            out[0] = self.data[self.at];
            self.at += 1;
            Ok(1)
        }
    }

    fn buffer(input: &str) -> SourceBuffer<&[u8]> {
        SourceBuffer::new(input.as_bytes())
    }

    #[test]
    fn tracks_lines_and_columns() {
        let mut src = buffer("ab\ncd\r\nef\rg");
        let mut positions = Vec::new();
        loop {
            positions.push((src.position().line, src.position().column));
            match src.bump().unwrap() {
                Peeked::Eof => break,
                _ => {}
            }
        }
        assert_eq!(
            positions,
            vec![
                (1, 1),
                (1, 2),
                (1, 3), // \n
                (2, 1),
                (2, 2),
                (2, 3), // \r
                (3, 1), // \n of CRLF, same line break
                (3, 1),
                (3, 2),
                (3, 3), // \r
                (4, 1),
                (4, 2),
            ]
        );
        assert_eq!(src.position().offset, 11);
    }

    #[test]
    fn columns_count_code_points() {
        let mut src = buffer("é\u{1F600}x");
        src.bump().unwrap();
        assert_eq!(src.position().column, 2);
        assert_eq!(src.position().offset, 2);
        src.bump().unwrap();
        assert_eq!(src.position().column, 3);
        assert_eq!(src.position().offset, 6);
        assert_eq!(src.bump().unwrap(), Peeked::Char('x'));
    }

    #[test]
    fn peeks_ahead_without_consuming() {
        let mut src = SourceBuffer::new(TrickleReader {
            data: b"match",
            at: 0,
        });
        assert_eq!(src.peek(3).unwrap(), Peeked::Char('c'));
        assert_eq!(src.peek(0).unwrap(), Peeked::Char('m'));
        assert_eq!(src.peek(5).unwrap(), Peeked::Eof);
        assert_eq!(src.bump().unwrap(), Peeked::Char('m'));
    }

    #[test]
    fn restores_to_a_mark() {
        let mut src = buffer("one\ntwo");
        for _ in 0..4 {
            src.bump().unwrap();
        }
        let mark = src.mark();
        for _ in 0..3 {
            src.bump().unwrap();
        }
        assert_eq!(src.position().offset, 7);
        src.restore(&mark);
        assert_eq!(src.position().offset, 4);
        assert_eq!(src.position().line, 2);
        assert_eq!(src.position().column, 1);
        assert_eq!(src.bump().unwrap(), Peeked::Char('t'));
        let range = src.range_from(&mark);
        assert_eq!(range.start().offset(), 4);
        assert_eq!(range.end().offset(), 5);
    }

    #[test]
    fn invalid_utf8_is_reported_per_byte() {
        let mut src = SourceBuffer::new(&[b'a', 0xff, 0xfe, b'b'][..]);
        assert_eq!(src.bump().unwrap(), Peeked::Char('a'));
        assert_eq!(src.bump().unwrap(), Peeked::Invalid);
        assert_eq!(src.position().offset, 2);
        assert_eq!(src.bump().unwrap(), Peeked::Invalid);
        assert_eq!(src.bump().unwrap(), Peeked::Char('b'));
    }

    #[test]
    fn commit_keeps_the_context_window() {
        let long = "x".repeat(200);
        let mut src = buffer(&long);
        for _ in 0..150 {
            src.bump().unwrap();
        }
        src.commit();
        assert_eq!(src.base, 150 - CONTEXT_RETAIN);
        assert_eq!(src.text_between(140, 150), "x".repeat(10));
        // Content older than the window is gone.
        assert_eq!(src.text_between(0, 10), "");
    }

    #[test]
    fn context_centers_on_the_position() {
        let mut src = buffer("MATCH (n)\nWHERE n.age > 30 RETURN n");
        for _ in 0..16 {
            src.bump().unwrap();
        }
        let (snippet, caret) = src.context(src.position(), 80);
        assert_eq!(snippet, "MATCH (n) WHERE n.age > 30 RETURN n");
        assert_eq!(caret, 16);
        assert_eq!(&snippet[caret..caret + 1], "n");
    }
}
