pub(crate) mod grammar;
mod parse_result;

use crate::ast::AstNode;
use crate::error::Error;
use crate::lexer::{
    Comment, InputPosition, InputRange, Keyword, Lexer, Symbol, Token, TokenKind,
};
use crate::limit::LimitTracker;
use std::collections::VecDeque;
use std::io;
use std::io::Read;

pub use parse_result::ParseResult;

/// Chosen well below the stack depth at which deeply nested expressions
/// overflow in an unoptimized build, with a comfortable safety margin.
const DEFAULT_RECURSION_LIMIT: usize = 500;

const DEFAULT_ERROR_CONTEXT_WIDTH: usize = 80;

/// Why a production gave up: a syntax error (already recorded, the caller
/// recovers) or an I/O failure (aborts the whole parse).
pub(crate) enum ParseFailure {
    Syntax,
    Io(io::Error),
}

impl From<io::Error> for ParseFailure {
    fn from(err: io::Error) -> Self {
        ParseFailure::Io(err)
    }
}

pub(crate) type PResult<T> = Result<T, ParseFailure>;

/// A production's starting point, captured before it consumes anything.
/// Used to build the covering error node when the production fails.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Checkpoint {
    position: InputPosition,
    errors: usize,
}

/// Parse Cypher into an ordinal-numbered AST.
///
/// The parser is also its own configuration builder:
///
/// ```rust
/// use cypher_parser::Parser;
///
/// let result = Parser::new("MATCH (n:Person) RETURN n.name;")
///     .parse()
///     .unwrap();
/// assert_eq!(result.ndirectives(), 1);
/// assert!(result.errors().is_empty());
/// ```
///
/// Arbitrarily large input can be parsed through [`Parser::from_reader`]:
/// directives are surfaced incrementally through the
/// [`Parser::on_directive`] callback and the input window slides forward
/// after each one, keeping memory bounded by the largest single directive.
pub struct Parser<'cb, R: Read> {
    lexer: Lexer<R>,
    lookahead: VecDeque<Token>,
    pending_comments: Vec<Comment>,
    errors: Vec<Error>,
    /// Cleared after a limit error so that cascading messages from the
    /// aborted parse are not reported.
    accept_errors: bool,
    recursion: LimitTracker,
    single: bool,
    only_statements: bool,
    on_directive: Option<Box<dyn FnMut(InputRange) + 'cb>>,
    /// Start and end of the most recently consumed token; errors raised at
    /// end of input are reported at the last token instead.
    last_token_start: InputPosition,
    last_token_end: InputPosition,
    /// Line the previous token ended on, for line-start detection.
    prev_token_line: u32,
}

impl<'cb, 'i> Parser<'cb, &'i [u8]> {
    /// Parse an in-memory buffer.
    pub fn new(input: &'i str) -> Self {
        Self::from_reader(input.as_bytes())
    }
}

impl<'cb, R: Read> Parser<'cb, R> {
    /// Parse from a byte stream. The reader is polled synchronously as the
    /// parser needs input.
    pub fn from_reader(reader: R) -> Self {
        Self {
            lexer: Lexer::new(reader, DEFAULT_ERROR_CONTEXT_WIDTH),
            lookahead: VecDeque::new(),
            pending_comments: Vec::new(),
            errors: Vec::new(),
            accept_errors: true,
            recursion: LimitTracker::new(DEFAULT_RECURSION_LIMIT),
            single: false,
            only_statements: false,
            on_directive: None,
            last_token_start: InputPosition::start(),
            last_token_end: InputPosition::start(),
            prev_token_line: 0,
        }
    }

    /// Stop after the first directive.
    pub fn single(mut self, single: bool) -> Self {
        self.single = single;
        self
    }

    /// Reject client commands (`:foo`), and require the final statement to
    /// be terminated with `;`.
    pub fn only_statements(mut self, only_statements: bool) -> Self {
        self.only_statements = only_statements;
        self
    }

    /// Configure the recursion limit used while parsing nested
    /// expressions and patterns.
    pub fn recursion_limit(mut self, limit: usize) -> Self {
        self.recursion = LimitTracker::new(limit);
        self
    }

    /// Width of the source snippet attached to each error.
    pub fn error_context_width(mut self, width: usize) -> Self {
        self.lexer.set_context_width(width);
        self
    }

    /// Invoked with the range of each completed directive before the next
    /// one is started, so streaming consumers can observe boundaries.
    pub fn on_directive(mut self, callback: impl FnMut(InputRange) + 'cb) -> Self {
        self.on_directive = Some(Box::new(callback));
        self
    }

    /// Run the parser to the end of the input (or the first directive,
    /// under [`Parser::single`]). Only an I/O failure of the underlying
    /// reader aborts the parse; syntax trouble is recorded on the result.
    pub fn parse(mut self) -> io::Result<ParseResult> {
        let mut result = ParseResult::new();

        loop {
            let (kind, start_offset) = {
                let token = self.peek()?;
                (token.kind, token.range.start().offset())
            };
            let at_line_start = self.at_line_start()?;
            self.flush_comments(&mut result);

            match kind {
                TokenKind::Eof => break,
                TokenKind::Symbol(Symbol::Semicolon) => {
                    // An empty directive; discard it.
                    self.bump()?;
                    self.lexer.commit();
                    continue;
                }
                TokenKind::Symbol(Symbol::Colon) if at_line_start => {
                    if self.only_statements {
                        let err = self.error_at_current("unexpected client command");
                        self.push_error(err);
                        self.skip_rest_of_line()?;
                        continue;
                    }
                    let cp = self.checkpoint()?;
                    let parsed = grammar::command(&mut self);
                    let node = self.recover_or(cp, parsed)?;
                    self.finish_directive(&mut result, node)?;
                }
                _ => {
                    let cp = self.checkpoint()?;
                    let parsed = grammar::statement(&mut self);
                    let node = self.recover_or(cp, parsed)?;
                    // Force progress if the failing token is still current.
                    if self.peek()?.range.start().offset() == start_offset
                        && !matches!(
                            self.peek()?.kind,
                            TokenKind::Eof | TokenKind::Symbol(Symbol::Semicolon)
                        )
                    {
                        self.bump()?;
                    }
                    if self.only_statements
                        && node.kind() == crate::ast::Kind::Statement
                        && self.peek()?.kind == TokenKind::Eof
                        && !self.at_symbol(Symbol::Semicolon)?
                    {
                        let err = self.error_at_current("unexpected end of input, expected ';'");
                        self.push_error(err);
                    }
                    self.finish_directive(&mut result, node)?;
                }
            }

            self.eat_symbol(Symbol::Semicolon)?;

            if self.single {
                break;
            }
        }

        // Trailing comments surface while peeking at the EOF token.
        self.flush_comments(&mut result);
        result.set_eof_position(self.peek()?.range.start());
        result.set_errors(std::mem::take(&mut self.errors));
        result.set_recursion(self.recursion);
        Ok(result)
    }

    fn finish_directive(&mut self, result: &mut ParseResult, node: AstNode) -> io::Result<()> {
        let range = node.range();
        result.push_root(node);
        self.flush_comments(result);
        self.lexer.commit();
        if let Some(callback) = self.on_directive.as_mut() {
            callback(range);
        }
        Ok(())
    }

    fn flush_comments(&mut self, result: &mut ParseResult) {
        for comment in std::mem::take(&mut self.pending_comments) {
            let node = if comment.block {
                AstNode::new_block_comment(comment.text, comment.range)
            } else {
                AstNode::new_line_comment(comment.text, comment.range)
            };
            result.push_root(node);
        }
    }

    fn skip_rest_of_line(&mut self) -> io::Result<()> {
        let line = self.peek()?.range.start().line();
        loop {
            let token = self.peek()?;
            if token.kind == TokenKind::Eof || token.range.start().line() != line {
                break;
            }
            self.bump()?;
        }
        Ok(())
    }

    // --- token plumbing ------------------------------------------------

    fn fill_lookahead(&mut self, want: usize) -> io::Result<()> {
        while self.lookahead.len() < want {
            let token = self.lexer.next_token()?;
            if self.accept_errors {
                self.errors.append(&mut self.lexer.take_errors());
            } else {
                self.lexer.take_errors();
            }
            self.pending_comments.append(&mut self.lexer.take_comments());
            self.lookahead.push_back(token);
        }
        Ok(())
    }

    pub(crate) fn peek(&mut self) -> io::Result<&Token> {
        self.fill_lookahead(1)?;
        Ok(&self.lookahead[0])
    }

    /// Look `n` tokens past the current one (0 is the current token).
    pub(crate) fn peek_n(&mut self, n: usize) -> io::Result<&Token> {
        self.fill_lookahead(n + 1)?;
        Ok(&self.lookahead[n])
    }

    pub(crate) fn bump(&mut self) -> io::Result<Token> {
        self.fill_lookahead(1)?;
        let token = self.lookahead.pop_front().expect("lookahead was filled");
        if token.kind != TokenKind::Eof {
            self.last_token_start = token.range.start();
            self.last_token_end = token.range.end();
            self.prev_token_line = token.range.end().line();
        }
        Ok(token)
    }

    pub(crate) fn at_symbol(&mut self, symbol: Symbol) -> io::Result<bool> {
        Ok(self.peek()?.kind == TokenKind::Symbol(symbol))
    }

    pub(crate) fn at_keyword(&mut self, keyword: Keyword) -> io::Result<bool> {
        Ok(self.peek()?.kind == TokenKind::Keyword(keyword))
    }

    pub(crate) fn eat_symbol(&mut self, symbol: Symbol) -> io::Result<bool> {
        if self.at_symbol(symbol)? {
            self.bump()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn eat_keyword(&mut self, keyword: Keyword) -> io::Result<bool> {
        if self.at_keyword(keyword)? {
            self.bump()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn expect_symbol(&mut self, symbol: Symbol) -> PResult<Token> {
        if self.at_symbol(symbol)? {
            Ok(self.bump()?)
        } else {
            let found = self.describe_current()?;
            self.fail(format!("expected '{}', found {}", symbol.as_str(), found))
        }
    }

    pub(crate) fn expect_keyword(&mut self, keyword: Keyword) -> PResult<Token> {
        if self.at_keyword(keyword)? {
            Ok(self.bump()?)
        } else {
            let found = self.describe_current()?;
            self.fail(format!("expected {}, found {}", keyword.as_str(), found))
        }
    }

    pub(crate) fn describe_current(&mut self) -> io::Result<String> {
        Ok(self.peek()?.describe())
    }

    /// The range from `start` to the end of the most recently consumed
    /// token; the span a production just built covers.
    pub(crate) fn span_from(&self, start: InputPosition) -> InputRange {
        let end = if self.last_token_end.offset() > start.offset() {
            self.last_token_end
        } else {
            start
        };
        InputRange::new(start, end)
    }

    /// True if the current token is the first on its line.
    fn at_line_start(&mut self) -> io::Result<bool> {
        let prev = self.prev_token_line;
        Ok(self.peek()?.range.start().line() > prev)
    }

    // --- errors and recovery -------------------------------------------

    fn error_position(&mut self) -> io::Result<InputPosition> {
        let (kind, start) = {
            let token = self.peek()?;
            (token.kind, token.range.start())
        };
        if kind == TokenKind::Eof && self.last_token_end.offset() > 0 {
            Ok(self.last_token_start)
        } else {
            Ok(start)
        }
    }

    fn error_at_current(&mut self, message: &str) -> Error {
        let position = self
            .error_position()
            .unwrap_or_else(|_| self.lexer.position());
        self.lexer.make_error(position, message)
    }

    pub(crate) fn push_error(&mut self, err: Error) {
        if self.accept_errors {
            self.errors.push(err);
        }
    }

    /// Record a syntax error at the current token and fail the production.
    pub(crate) fn fail<T, S: Into<String>>(&mut self, message: S) -> PResult<T> {
        let position = self.error_position()?;
        let err = self.lexer.make_error(position, message);
        self.push_error(err);
        Err(ParseFailure::Syntax)
    }

    /// Record that a limit was hit. Any further errors are silently
    /// discarded: aborting mid-parse produces phantom errors downstream.
    pub(crate) fn fail_limit<T>(&mut self, message: &str) -> PResult<T> {
        let position = self.error_position()?;
        let err = self.lexer.make_error(position, message);
        self.push_error(err);
        self.accept_errors = false;
        Err(ParseFailure::Syntax)
    }

    /// Guard a recursive descent step against runaway nesting.
    pub(crate) fn descend<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        self.recursion.consume();
        if self.recursion.limited() {
            self.recursion.release();
            return self.fail_limit("parser recursion limit reached");
        }
        let result = f(self);
        self.recursion.release();
        result
    }

    pub(crate) fn checkpoint(&mut self) -> io::Result<Checkpoint> {
        Ok(Checkpoint {
            position: self.peek()?.range.start(),
            errors: self.errors.len(),
        })
    }

    /// Panic-mode recovery: skip to the next recovery anchor (`;`, a
    /// top-level clause keyword, or end of input) and return a synthetic
    /// error node covering everything the failed production consumed or
    /// skipped. Errors raised inside the skipped region beyond the first
    /// are discarded to stop cascades.
    pub(crate) fn recover(&mut self, cp: Checkpoint) -> io::Result<AstNode> {
        if self.errors.len() > cp.errors + 1 {
            self.errors.truncate(cp.errors + 1);
        }

        // If the failing token is the very token the production started
        // at, consume it; otherwise an anchor here would make no progress.
        if self.peek()?.range.start().offset() == cp.position.offset()
            && !matches!(
                self.peek()?.kind,
                TokenKind::Eof | TokenKind::Symbol(Symbol::Semicolon)
            )
        {
            self.bump()?;
        }

        loop {
            let token = self.peek()?;
            let anchored = match token.kind {
                TokenKind::Eof | TokenKind::Symbol(Symbol::Semicolon) => true,
                TokenKind::Keyword(kw) => is_clause_anchor(kw),
                _ => false,
            };
            if anchored {
                break;
            }
            self.bump()?;
        }

        let end = if self.last_token_end.offset() > cp.position.offset() {
            self.last_token_end
        } else {
            cp.position
        };
        let text = self
            .lexer
            .text_between(cp.position.offset(), end.offset())
            .trim()
            .to_string();
        Ok(AstNode::new_error(
            text,
            InputRange::new(cp.position, end),
        ))
    }

    /// Unwrap a production result, turning a syntax failure into a
    /// recovery node.
    pub(crate) fn recover_or(
        &mut self,
        cp: Checkpoint,
        parsed: PResult<AstNode>,
    ) -> io::Result<AstNode> {
        match parsed {
            Ok(node) => Ok(node),
            Err(ParseFailure::Syntax) => self.recover(cp),
            Err(ParseFailure::Io(err)) => Err(err),
        }
    }
}

/// Keywords that open a top-level clause; panic-mode recovery stops at
/// them so the next clause can parse cleanly.
fn is_clause_anchor(keyword: Keyword) -> bool {
    matches!(
        keyword,
        Keyword::Match
            | Keyword::Optional
            | Keyword::Create
            | Keyword::Merge
            | Keyword::Delete
            | Keyword::Detach
            | Keyword::Set
            | Keyword::Remove
            | Keyword::Foreach
            | Keyword::With
            | Keyword::Unwind
            | Keyword::Start
            | Keyword::Call
            | Keyword::Return
            | Keyword::Load
            | Keyword::Union
            | Keyword::Using
            | Keyword::Drop
    )
}
