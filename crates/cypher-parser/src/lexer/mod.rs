mod keyword;
mod location;
mod source;
mod token;

use crate::error::Error;
use std::io;
use std::io::Read;

pub use location::{InputPosition, InputRange};

pub(crate) use keyword::Keyword;
pub(crate) use source::{Mark, Peeked, SourceBuffer};
pub(crate) use token::{Symbol, Token, TokenKind};

/// A comment captured while lexing. Comments never reach the parser; they
/// are recorded on the side so they round-trip into the parse result
/// without affecting the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Comment {
    pub(crate) text: String,
    pub(crate) range: InputRange,
    pub(crate) block: bool,
}

/// A pull-based tokenizer over a sliding [`SourceBuffer`].
///
/// `next_token()` yields the next significant token, skipping whitespace,
/// side-channelling comments, and accumulating lexical errors for the
/// parser to drain. Lexical trouble never stops the token stream: the lexer
/// recovers (at the next line for unterminated strings, at end of input for
/// unterminated block comments) and keeps producing tokens.
pub(crate) struct Lexer<R> {
    source: SourceBuffer<R>,
    comments: Vec<Comment>,
    errors: Vec<Error>,
    context_width: usize,
}

impl<R: Read> Lexer<R> {
    pub(crate) fn new(reader: R, context_width: usize) -> Self {
        Self {
            source: SourceBuffer::new(reader),
            comments: Vec::new(),
            errors: Vec::new(),
            context_width,
        }
    }

    pub(crate) fn position(&self) -> InputPosition {
        self.source.position()
    }

    pub(crate) fn set_context_width(&mut self, width: usize) {
        self.context_width = width;
    }

    /// Build an error with surrounding source context. Also used by the
    /// parser for syntax errors, so the context window logic lives in one
    /// place.
    pub(crate) fn make_error<S: Into<String>>(
        &mut self,
        position: InputPosition,
        message: S,
    ) -> Error {
        let (context, context_offset) = self.source.context(position, self.context_width);
        Error::new(message, position, context, context_offset)
    }

    fn error_at<S: Into<String>>(&mut self, position: InputPosition, message: S) {
        let err = self.make_error(position, message);
        self.errors.push(err);
    }

    /// Lexical errors produced since the last drain, in source order.
    pub(crate) fn take_errors(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.errors)
    }

    /// Comments captured since the last drain, in source order.
    pub(crate) fn take_comments(&mut self) -> Vec<Comment> {
        std::mem::take(&mut self.comments)
    }

    /// Slide the input window past a committed directive.
    pub(crate) fn commit(&mut self) {
        self.source.commit();
    }

    /// Retained source text between two offsets; used for the payload of
    /// error-recovery nodes.
    pub(crate) fn text_between(&self, start: usize, end: usize) -> String {
        self.source.text_between(start, end)
    }

    pub(crate) fn next_token(&mut self) -> io::Result<Token> {
        loop {
            loop {
                match self.source.peek(0)? {
                    Peeked::Char(c) if c.is_whitespace() => {
                        self.source.bump()?;
                    }
                    _ => break,
                }
            }

            let mark = self.source.mark();
            let c = match self.source.peek(0)? {
                Peeked::Eof => {
                    return Ok(Token::new(
                        TokenKind::Eof,
                        String::new(),
                        self.source.range_from(&mark),
                    ))
                }
                Peeked::Invalid => {
                    let position = self.source.position();
                    self.source.bump()?;
                    self.error_at(position, "invalid UTF-8 in input");
                    continue;
                }
                Peeked::Char(c) => c,
            };

            match c {
                '/' => match self.source.peek(1)? {
                    Peeked::Char('/') => {
                        self.line_comment(mark)?;
                        continue;
                    }
                    Peeked::Char('*') => {
                        self.block_comment(mark)?;
                        continue;
                    }
                    _ => {
                        self.source.bump()?;
                        return Ok(self.symbol_token(mark, Symbol::Slash));
                    }
                },
                '"' | '\'' => return self.string(mark, c),
                '`' => return self.quoted_ident(mark),
                '$' => return self.dollar_parameter(mark),
                '{' => {
                    if let Some(token) = self.legacy_parameter(mark)? {
                        return Ok(token);
                    }
                    self.source.bump()?;
                    return Ok(self.symbol_token(mark, Symbol::LBrace));
                }
                c if c.is_ascii_digit() => return self.number(mark),
                c if is_ident_start(c) => return self.ident(mark),
                _ => return self.symbol(mark, c),
            }
        }
    }

    fn line_comment(&mut self, mark: Mark) -> io::Result<()> {
        self.source.bump()?;
        self.source.bump()?;
        let mut text = String::new();
        loop {
            match self.source.peek(0)? {
                Peeked::Char('\n') | Peeked::Char('\r') | Peeked::Eof => break,
                Peeked::Char(c) => {
                    text.push(c);
                    self.source.bump()?;
                }
                Peeked::Invalid => {
                    let position = self.source.position();
                    self.source.bump()?;
                    self.error_at(position, "invalid UTF-8 in input");
                }
            }
        }
        self.comments.push(Comment {
            text,
            range: self.source.range_from(&mark),
            block: false,
        });
        Ok(())
    }

    /// Block comments do not nest. Reaching end of input before `*/` is a
    /// fatal lexical error: everything up to it has been consumed.
    fn block_comment(&mut self, mark: Mark) -> io::Result<()> {
        self.source.bump()?;
        self.source.bump()?;
        let mut text = String::new();
        loop {
            let peeked = self.source.peek(0)?;
            if peeked == Peeked::Char('*') && self.source.peek(1)? == Peeked::Char('/') {
                self.source.bump()?;
                self.source.bump()?;
                break;
            }
            match peeked {
                Peeked::Char(c) => {
                    text.push(c);
                    self.source.bump()?;
                }
                Peeked::Invalid => {
                    let position = self.source.position();
                    self.source.bump()?;
                    self.error_at(position, "invalid UTF-8 in input");
                }
                Peeked::Eof => {
                    self.error_at(mark.position(), "unterminated block comment");
                    break;
                }
            }
        }
        self.comments.push(Comment {
            text,
            range: self.source.range_from(&mark),
            block: true,
        });
        Ok(())
    }

    /// Strings are single-line. An unterminated string produces one error
    /// and a token holding whatever was scanned; the unconsumed newline
    /// then puts the lexer back in sync.
    fn string(&mut self, mark: Mark, quote: char) -> io::Result<Token> {
        self.source.bump()?;
        let mut value = String::new();
        loop {
            match self.source.peek(0)? {
                Peeked::Char(c) if c == quote => {
                    self.source.bump()?;
                    break;
                }
                Peeked::Char('\n') | Peeked::Char('\r') | Peeked::Eof => {
                    self.error_at(mark.position(), "unterminated string");
                    break;
                }
                Peeked::Char('\\') => {
                    self.source.bump()?;
                    if let Some(c) = self.escape()? {
                        value.push(c);
                    }
                }
                Peeked::Char(c) => {
                    value.push(c);
                    self.source.bump()?;
                }
                Peeked::Invalid => {
                    let position = self.source.position();
                    self.source.bump()?;
                    self.error_at(position, "invalid UTF-8 in string");
                }
            }
        }
        Ok(Token::new(
            TokenKind::Str { quote },
            value,
            self.source.range_from(&mark),
        ))
    }

    /// The character following a consumed backslash. Unknown escapes keep
    /// the escaped character.
    fn escape(&mut self) -> io::Result<Option<char>> {
        let c = match self.source.peek(0)? {
            Peeked::Char(c) => c,
            Peeked::Invalid => {
                let position = self.source.position();
                self.source.bump()?;
                self.error_at(position, "invalid UTF-8 in string");
                return Ok(None);
            }
            Peeked::Eof => return Ok(None),
        };
        self.source.bump()?;
        Ok(Some(match c {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'b' => '\u{0008}',
            'f' => '\u{000c}',
            'u' => return self.unicode_escape(4),
            'U' => return self.unicode_escape(8),
            c => c,
        }))
    }

    fn unicode_escape(&mut self, digits: u32) -> io::Result<Option<char>> {
        let position = self.source.position();
        let mut value: u32 = 0;
        for _ in 0..digits {
            match self.source.peek(0)? {
                Peeked::Char(c) if c.is_ascii_hexdigit() => {
                    value = (value << 4) | c.to_digit(16).unwrap_or(0);
                    self.source.bump()?;
                }
                _ => {
                    self.error_at(position, "invalid unicode escape sequence");
                    return Ok(None);
                }
            }
        }
        match char::from_u32(value) {
            Some(c) => Ok(Some(c)),
            None => {
                self.error_at(position, "invalid unicode escape sequence");
                Ok(None)
            }
        }
    }

    /// Back-quoted identifiers take a doubled backquote as an escaped
    /// backquote and are never reclassified as keywords.
    fn quoted_ident(&mut self, mark: Mark) -> io::Result<Token> {
        self.source.bump()?;
        let mut value = String::new();
        loop {
            match self.source.peek(0)? {
                Peeked::Char('`') => {
                    self.source.bump()?;
                    if self.source.eat('`')? {
                        value.push('`');
                    } else {
                        break;
                    }
                }
                Peeked::Char('\n') | Peeked::Char('\r') | Peeked::Eof => {
                    self.error_at(mark.position(), "unterminated quoted identifier");
                    break;
                }
                Peeked::Char(c) => {
                    value.push(c);
                    self.source.bump()?;
                }
                Peeked::Invalid => {
                    let position = self.source.position();
                    self.source.bump()?;
                    self.error_at(position, "invalid UTF-8 in quoted identifier");
                }
            }
        }
        Ok(Token::new(
            TokenKind::QuotedIdent,
            value,
            self.source.range_from(&mark),
        ))
    }

    /// `$name` or `$123`. A bare `$` falls through as an unassigned symbol
    /// for the parser to complain about.
    fn dollar_parameter(&mut self, mark: Mark) -> io::Result<Token> {
        self.source.bump()?;
        let mut name = String::new();
        match self.source.peek(0)? {
            Peeked::Char(c) if is_ident_start(c) => {
                while let Peeked::Char(c) = self.source.peek(0)? {
                    if !is_ident_cont(c) {
                        break;
                    }
                    name.push(c);
                    self.source.bump()?;
                }
            }
            Peeked::Char(c) if c.is_ascii_digit() => {
                while let Peeked::Char(c) = self.source.peek(0)? {
                    if !c.is_ascii_digit() {
                        break;
                    }
                    name.push(c);
                    self.source.bump()?;
                }
            }
            _ => {
                return Ok(Token::new(
                    TokenKind::Symbol(Symbol::Other),
                    "$".to_string(),
                    self.source.range_from(&mark),
                ))
            }
        }
        Ok(Token::new(
            TokenKind::Param,
            name,
            self.source.range_from(&mark),
        ))
    }

    /// The legacy `{name}` parameter form. This is the one place the lexer
    /// backtracks: `{` might equally open a map literal, so scan ahead and
    /// rewind if the shape does not fit.
    fn legacy_parameter(&mut self, mark: Mark) -> io::Result<Option<Token>> {
        self.source.bump()?;
        self.skip_blank()?;
        let mut name = String::new();
        match self.source.peek(0)? {
            Peeked::Char(c) if is_ident_start(c) => {
                while let Peeked::Char(c) = self.source.peek(0)? {
                    if !is_ident_cont(c) {
                        break;
                    }
                    name.push(c);
                    self.source.bump()?;
                }
            }
            Peeked::Char(c) if c.is_ascii_digit() => {
                while let Peeked::Char(c) = self.source.peek(0)? {
                    if !c.is_ascii_digit() {
                        break;
                    }
                    name.push(c);
                    self.source.bump()?;
                }
            }
            _ => {
                self.source.restore(&mark);
                return Ok(None);
            }
        }
        self.skip_blank()?;
        if !self.source.eat('}')? {
            self.source.restore(&mark);
            return Ok(None);
        }
        Ok(Some(Token::new(
            TokenKind::Param,
            name,
            self.source.range_from(&mark),
        )))
    }

    fn skip_blank(&mut self) -> io::Result<()> {
        while let Peeked::Char(c) = self.source.peek(0)? {
            if !c.is_whitespace() {
                break;
            }
            self.source.bump()?;
        }
        Ok(())
    }

    /// Numeric literals keep their source spelling; `0x1F` and `017` are
    /// integers, and a trailing `.` is left alone so `1..2` lexes as
    /// `1` `..` `2`.
    fn number(&mut self, mark: Mark) -> io::Result<Token> {
        let mut text = String::new();
        let mut float = false;

        if self.source.peek(0)? == Peeked::Char('0')
            && matches!(self.source.peek(1)?, Peeked::Char('x') | Peeked::Char('X'))
        {
            text.push('0');
            self.source.bump()?;
            if let Peeked::Char(x) = self.source.peek(0)? {
                text.push(x);
            }
            self.source.bump()?;
            let mut any = false;
            while let Peeked::Char(c) = self.source.peek(0)? {
                if !c.is_ascii_hexdigit() {
                    break;
                }
                text.push(c);
                self.source.bump()?;
                any = true;
            }
            if !any {
                self.error_at(mark.position(), "invalid hexadecimal integer literal");
            }
            return Ok(Token::new(
                TokenKind::Int,
                text,
                self.source.range_from(&mark),
            ));
        }

        while let Peeked::Char(c) = self.source.peek(0)? {
            if !c.is_ascii_digit() {
                break;
            }
            text.push(c);
            self.source.bump()?;
        }

        if self.source.peek(0)? == Peeked::Char('.') {
            if let Peeked::Char(c) = self.source.peek(1)? {
                if c.is_ascii_digit() {
                    float = true;
                    text.push('.');
                    self.source.bump()?;
                    while let Peeked::Char(c) = self.source.peek(0)? {
                        if !c.is_ascii_digit() {
                            break;
                        }
                        text.push(c);
                        self.source.bump()?;
                    }
                }
            }
        }

        if let Peeked::Char(e) = self.source.peek(0)? {
            if e == 'e' || e == 'E' {
                let exponent_digit = |p: Peeked| matches!(p, Peeked::Char(c) if c.is_ascii_digit());
                let signed = matches!(self.source.peek(1)?, Peeked::Char('+') | Peeked::Char('-'));
                let digit_at = if signed { 2 } else { 1 };
                if exponent_digit(self.source.peek(digit_at)?) {
                    float = true;
                    text.push(e);
                    self.source.bump()?;
                    if signed {
                        if let Peeked::Char(s) = self.source.peek(0)? {
                            text.push(s);
                        }
                        self.source.bump()?;
                    }
                    while let Peeked::Char(c) = self.source.peek(0)? {
                        if !c.is_ascii_digit() {
                            break;
                        }
                        text.push(c);
                        self.source.bump()?;
                    }
                }
            }
        }

        let kind = if float { TokenKind::Float } else { TokenKind::Int };
        Ok(Token::new(kind, text, self.source.range_from(&mark)))
    }

    /// An identifier-like run is lexed first and reclassified as a keyword
    /// if its case-folded spelling is in the keyword set.
    fn ident(&mut self, mark: Mark) -> io::Result<Token> {
        let mut text = String::new();
        while let Peeked::Char(c) = self.source.peek(0)? {
            if !is_ident_cont(c) {
                break;
            }
            text.push(c);
            self.source.bump()?;
        }
        let range = self.source.range_from(&mark);
        // The token keeps the source spelling; the canonical upper-case
        // word lives in the Keyword itself. Context-sensitive keywords can
        // then still serve as identifiers without losing their case.
        match Keyword::lookup(&text) {
            Some(kw) => Ok(Token::new(TokenKind::Keyword(kw), text, range)),
            None => Ok(Token::new(TokenKind::Ident, text, range)),
        }
    }

    fn symbol(&mut self, mark: Mark, c: char) -> io::Result<Token> {
        self.source.bump()?;
        let symbol = match c {
            '(' => Symbol::LParen,
            ')' => Symbol::RParen,
            '[' => Symbol::LBracket,
            ']' => Symbol::RBracket,
            '}' => Symbol::RBrace,
            ',' => Symbol::Comma,
            ';' => Symbol::Semicolon,
            ':' => Symbol::Colon,
            '|' => Symbol::Pipe,
            '-' => Symbol::Minus,
            '*' => Symbol::Star,
            '%' => Symbol::Percent,
            '^' => Symbol::Caret,
            '.' => {
                if self.source.eat('.')? {
                    Symbol::DotDot
                } else {
                    Symbol::Dot
                }
            }
            '+' => {
                if self.source.eat('=')? {
                    Symbol::PlusEquals
                } else {
                    Symbol::Plus
                }
            }
            '=' => {
                if self.source.eat('~')? {
                    Symbol::EqualsTilde
                } else {
                    Symbol::Equals
                }
            }
            '<' => {
                if self.source.eat('=')? {
                    Symbol::Lte
                } else if self.source.eat('>')? {
                    Symbol::NotEquals
                } else {
                    Symbol::Lt
                }
            }
            '>' => {
                if self.source.eat('=')? {
                    Symbol::Gte
                } else {
                    Symbol::Gt
                }
            }
            other => {
                return Ok(Token::new(
                    TokenKind::Symbol(Symbol::Other),
                    other.to_string(),
                    self.source.range_from(&mark),
                ))
            }
        };
        Ok(self.symbol_token(mark, symbol))
    }

    fn symbol_token(&mut self, mark: Mark, symbol: Symbol) -> Token {
        Token::new(
            TokenKind::Symbol(symbol),
            symbol.as_str().to_string(),
            self.source.range_from(&mark),
        )
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_cont(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod test {
    use super::*;

    fn lex(input: &str) -> (Vec<Token>, Vec<Comment>, Vec<Error>) {
        let mut lexer = Lexer::new(input.as_bytes(), 80);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token().unwrap();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        (tokens, lexer.take_comments(), lexer.take_errors())
    }

    fn kinds(input: &str) -> Vec<TokenKind> {
        lex(input).0.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn keywords_fold_case() {
        let (tokens, _, errors) = lex("match MATCH Match");
        assert!(errors.is_empty());
        for token in &tokens[..3] {
            assert_eq!(token.kind, TokenKind::Keyword(Keyword::Match));
            assert_eq!(token.keyword().unwrap().as_str(), "MATCH");
        }
        // The source spelling is retained on the token itself.
        assert_eq!(tokens[0].text, "match");
        assert_eq!(tokens[2].text, "Match");
    }

    #[test]
    fn identifiers_keep_their_case() {
        let (tokens, _, _) = lex("Person _x änder");
        assert_eq!(tokens[0].text, "Person");
        assert_eq!(tokens[1].text, "_x");
        assert_eq!(tokens[2].text, "änder");
        assert!(tokens[..3].iter().all(|t| t.kind == TokenKind::Ident));
    }

    #[test]
    fn quoted_identifiers_are_never_keywords() {
        let (tokens, _, errors) = lex("`match` `a``b`");
        assert!(errors.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::QuotedIdent);
        assert_eq!(tokens[0].text, "match");
        assert_eq!(tokens[1].text, "a`b");
    }

    #[test]
    fn numbers() {
        let (tokens, _, errors) = lex("0 42 017 0x1F 3.14 6.02e23 1e-9 2E+4");
        assert!(errors.is_empty());
        let spellings: Vec<(&TokenKind, &str)> = tokens
            .iter()
            .take(8)
            .map(|t| (&t.kind, t.text.as_str()))
            .collect();
        assert_eq!(
            spellings,
            vec![
                (&TokenKind::Int, "0"),
                (&TokenKind::Int, "42"),
                (&TokenKind::Int, "017"),
                (&TokenKind::Int, "0x1F"),
                (&TokenKind::Float, "3.14"),
                (&TokenKind::Float, "6.02e23"),
                (&TokenKind::Float, "1e-9"),
                (&TokenKind::Float, "2E+4"),
            ]
        );
    }

    #[test]
    fn dotdot_does_not_eat_into_floats() {
        assert_eq!(
            kinds("1..2"),
            vec![
                TokenKind::Int,
                TokenKind::Symbol(Symbol::DotDot),
                TokenKind::Int,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn leading_dot_is_not_a_float() {
        assert_eq!(
            kinds(".5"),
            vec![TokenKind::Symbol(Symbol::Dot), TokenKind::Int, TokenKind::Eof]
        );
    }

    #[test]
    fn string_escapes() {
        let (tokens, _, errors) = lex(r#"'a\nb' "qA\t" '\q' "\U0001F600""#);
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(tokens[0].kind, TokenKind::Str { quote: '\'' });
        assert_eq!(tokens[0].text, "a\nb");
        assert_eq!(tokens[1].kind, TokenKind::Str { quote: '"' });
        assert_eq!(tokens[1].text, "qA\t");
        assert_eq!(tokens[2].text, "q");
        assert_eq!(tokens[3].text, "\u{1F600}");
    }

    #[test]
    fn unterminated_string_recovers_at_the_next_line() {
        let (tokens, _, errors) = lex("'never ends\nRETURN");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message(), "unterminated string");
        assert_eq!(errors[0].position().offset(), 0);
        assert_eq!(tokens[0].kind, TokenKind::Str { quote: '\'' });
        assert_eq!(tokens[1].kind, TokenKind::Keyword(Keyword::Return));
    }

    #[test]
    fn unterminated_block_comment_is_fatal() {
        let (tokens, comments, errors) = lex("/* no end");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message(), "unterminated block comment");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert_eq!(comments.len(), 1);
    }

    #[test]
    fn comments_are_side_channelled() {
        let (tokens, comments, errors) = lex("RETURN /* mid */ 1 // tail");
        assert!(errors.is_empty());
        assert_eq!(tokens.len(), 3); // RETURN, 1, EOF
        assert_eq!(comments.len(), 2);
        assert!(comments[0].block);
        assert_eq!(comments[0].text, " mid ");
        assert!(!comments[1].block);
        assert_eq!(comments[1].text, " tail");
        assert_eq!(comments[1].range.start().offset(), 19);
    }

    #[test]
    fn parameters() {
        let (tokens, _, errors) = lex("$name $123 {legacy} { spaced } {not: param}");
        assert!(errors.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::Param);
        assert_eq!(tokens[0].text, "name");
        assert_eq!(tokens[1].kind, TokenKind::Param);
        assert_eq!(tokens[1].text, "123");
        assert_eq!(tokens[2].kind, TokenKind::Param);
        assert_eq!(tokens[2].text, "legacy");
        assert_eq!(tokens[3].kind, TokenKind::Param);
        assert_eq!(tokens[3].text, "spaced");
        // `{not: param}` rewinds and lexes as a map opener.
        assert_eq!(tokens[4].kind, TokenKind::Symbol(Symbol::LBrace));
    }

    #[test]
    fn multi_char_symbols_match_greedily() {
        assert_eq!(
            kinds("<= >= <> =~ += .."),
            vec![
                TokenKind::Symbol(Symbol::Lte),
                TokenKind::Symbol(Symbol::Gte),
                TokenKind::Symbol(Symbol::NotEquals),
                TokenKind::Symbol(Symbol::EqualsTilde),
                TokenKind::Symbol(Symbol::PlusEquals),
                TokenKind::Symbol(Symbol::DotDot),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn stray_symbols_are_tokens_not_lex_errors() {
        let (tokens, _, errors) = lex("@ ~");
        assert!(errors.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::Symbol(Symbol::Other));
        assert_eq!(tokens[0].text, "@");
        assert_eq!(tokens[1].text, "~");
    }

    #[test]
    fn token_ranges_cover_the_source() {
        let (tokens, _, _) = lex("RETURN 'a'");
        assert_eq!(tokens[0].range.start().offset(), 0);
        assert_eq!(tokens[0].range.end().offset(), 6);
        assert_eq!(tokens[1].range.start().offset(), 7);
        assert_eq!(tokens[1].range.end().offset(), 10);
    }
}
