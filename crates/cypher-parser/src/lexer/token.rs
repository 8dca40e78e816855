use crate::lexer::keyword::Keyword;
use crate::lexer::InputRange;
use std::fmt;

/// Punctuation recognized by the lexer. Multi-character symbols are matched
/// greedily, so `<=` is one token and never `<` `=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Symbol {
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    Colon,
    Dot,
    DotDot,
    Plus,
    PlusEquals,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Equals,
    EqualsTilde,
    NotEquals,
    Lt,
    Gt,
    Lte,
    Gte,
    Pipe,
    /// Anything else. The raw character travels in the token text and the
    /// parser reports the syntax error, not the lexer.
    Other,
}

impl Symbol {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Symbol::LParen => "(",
            Symbol::RParen => ")",
            Symbol::LBracket => "[",
            Symbol::RBracket => "]",
            Symbol::LBrace => "{",
            Symbol::RBrace => "}",
            Symbol::Comma => ",",
            Symbol::Semicolon => ";",
            Symbol::Colon => ":",
            Symbol::Dot => ".",
            Symbol::DotDot => "..",
            Symbol::Plus => "+",
            Symbol::PlusEquals => "+=",
            Symbol::Minus => "-",
            Symbol::Star => "*",
            Symbol::Slash => "/",
            Symbol::Percent => "%",
            Symbol::Caret => "^",
            Symbol::Equals => "=",
            Symbol::EqualsTilde => "=~",
            Symbol::NotEquals => "<>",
            Symbol::Lt => "<",
            Symbol::Gt => ">",
            Symbol::Lte => "<=",
            Symbol::Gte => ">=",
            Symbol::Pipe => "|",
            Symbol::Other => "?",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Keyword(Keyword),
    Ident,
    /// A back-quoted identifier; never reclassified as a keyword.
    QuotedIdent,
    Int,
    Float,
    /// A string literal. The token text is the unescaped payload; the quote
    /// style is kept for faithful re-printing.
    Str {
        quote: char,
    },
    /// `$name`, `$123` or the legacy `{name}` form.
    Param,
    Symbol(Symbol),
    Eof,
}

/// A lexed token. Tokens own their text: the input window slides forward
/// during streaming parses, so they cannot borrow from it.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) text: String,
    pub(crate) range: InputRange,
}

impl Token {
    pub(crate) fn new(kind: TokenKind, text: String, range: InputRange) -> Self {
        Self { kind, text, range }
    }

    /// A short description of the token for error messages.
    pub(crate) fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::Symbol(s) if s != Symbol::Other => format!("'{}'", s.as_str()),
            _ => format!("'{}'", self.text),
        }
    }

    pub(crate) fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.range.start().offset();
        let end = self.range.end().offset();
        let name = match self.kind {
            TokenKind::Keyword(_) => "KEYWORD",
            TokenKind::Ident => "IDENT",
            TokenKind::QuotedIdent => "QUOTED_IDENT",
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
            TokenKind::Str { .. } => "STRING",
            TokenKind::Param => "PARAM",
            TokenKind::Symbol(_) => "SYMBOL",
            TokenKind::Eof => "EOF",
        };
        write!(f, "{}@{}..{} {:?}", name, start, end, self.text)
    }
}
