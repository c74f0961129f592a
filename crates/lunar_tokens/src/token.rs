//! A lexical token from a source text, along with the fixed keyword table

use crate::spanned::{Span, Spanned};
use derive_more::Display;
use itertools::Itertools;
use std::fmt::{Debug, Formatter};
use strum::{AsRefStr, EnumIter};

/// Reserved words, mapped to their keyword kind.
///
/// Lookup is by exact, case-sensitive comparison against the whole word, so `format` and
/// `forge` are identifiers rather than `for` followed by something else.
pub const KEYWORDS: &[(&str, TokenKind)] = &[
    ("and", TokenKind::And),
    ("break", TokenKind::Break),
    ("continue", TokenKind::Continue),
    ("do", TokenKind::Do),
    ("else", TokenKind::Else),
    ("elseif", TokenKind::ElseIf),
    ("end", TokenKind::End),
    ("false", TokenKind::False),
    ("for", TokenKind::For),
    ("function", TokenKind::Function),
    ("goto", TokenKind::Goto),
    ("if", TokenKind::If),
    ("in", TokenKind::In),
    ("local", TokenKind::Local),
    ("nil", TokenKind::Nil),
    ("not", TokenKind::Not),
    ("or", TokenKind::Or),
    ("repeat", TokenKind::Repeat),
    ("return", TokenKind::Return),
    ("then", TokenKind::Then),
    ("true", TokenKind::True),
    ("until", TokenKind::Until),
    ("while", TokenKind::While),
];

/// The kind for a token
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    // punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    SemiColon,
    Colon,
    DoubleColon,
    Dot,

    // operators
    Plus,
    Minus,
    Star,
    Slash,
    DoubleSlash,
    Percent,
    Caret,
    Hash,
    Ampersand,
    Pipe,
    Tilde,
    LShift,
    RShift,
    Concat,
    Assign,
    Eq,
    NotEq,
    Lt,
    Lte,
    Gt,
    Gte,

    // literals
    Number,
    String,
    True,
    False,
    Nil,

    Identifier,
    /// `...`
    Ellipsis,

    // keywords
    And,
    Break,
    Continue,
    Do,
    Else,
    ElseIf,
    End,
    For,
    Function,
    Goto,
    If,
    In,
    Local,
    Not,
    Or,
    Repeat,
    Return,
    Then,
    Until,
    While,

    /// EOF, will only appear at the end of a token sequence
    Eof,
}

impl TokenKind {
    /// Looks up the keyword kind for a complete identifier-shaped word
    pub fn keyword(word: &str) -> Option<TokenKind> {
        KEYWORDS
            .iter()
            .find(|(spelling, _)| *spelling == word)
            .map(|&(_, kind)| kind)
    }

    /// The fixed source spelling of this kind, if it has one
    pub fn spelling(&self) -> Option<&'static str> {
        use TokenKind::*;
        let spelling = match self {
            LParen => "(",
            RParen => ")",
            LBrace => "{",
            RBrace => "}",
            LBracket => "[",
            RBracket => "]",
            Comma => ",",
            SemiColon => ";",
            Colon => ":",
            DoubleColon => "::",
            Dot => ".",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            DoubleSlash => "//",
            Percent => "%",
            Caret => "^",
            Hash => "#",
            Ampersand => "&",
            Pipe => "|",
            Tilde => "~",
            LShift => "<<",
            RShift => ">>",
            Concat => "..",
            Assign => "=",
            Eq => "==",
            NotEq => "~=",
            Lt => "<",
            Lte => "<=",
            Gt => ">",
            Gte => ">=",
            Ellipsis => "...",
            Number | String | Identifier | Eof => return None,
            keyword => {
                return KEYWORDS
                    .iter()
                    .find(|(_, kind)| kind == keyword)
                    .map(|&(spelling, _)| spelling)
            }
        };
        Some(spelling)
    }

    /// A human readable description, used in error messages
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Number => "number".to_string(),
            TokenKind::String => "string".to_string(),
            TokenKind::Identifier => "identifier".to_string(),
            TokenKind::Eof => "end of input".to_string(),
            other => format!("'{}'", other.spelling().unwrap_or(other.as_ref())),
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_ref())
    }
}

/// The value carried by a literal token
#[derive(Debug, Clone, PartialEq, Display)]
pub enum Literal {
    #[display(fmt = "{}", _0)]
    Number(f64),
    #[display(fmt = "{:?}", _0)]
    String(String),
    #[display(fmt = "{}", _0)]
    Boolean(bool),
    #[display(fmt = "nil")]
    Nil,
}

/// A lexical token from a source text
#[derive(Clone, PartialEq)]
pub struct Token {
    kind: TokenKind,
    lexeme: String,
    literal: Option<Literal>,
    span: Span,
}

impl Token {
    /// Creates a new token
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        literal: impl Into<Option<Literal>>,
        span: Span,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal: literal.into(),
            span,
        }
    }

    /// Creates the end-of-input marker at the given position
    pub fn eof(span: Span) -> Self {
        Self::new(TokenKind::Eof, "", None, span)
    }

    /// Gets the kind for this token
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The exact source text this token was scanned from
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// The literal value, present only for number, string, boolean and nil tokens
    pub fn literal(&self) -> Option<&Literal> {
        self.literal.as_ref()
    }

    /// The 1-based line this token appeared on
    pub fn line(&self) -> usize {
        self.span.line()
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}({:?})", self.kind, self.lexeme)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:>4} {:<14} {:<16} ", self.line(), self.kind, format!("{:?}", self.lexeme))?;
        match &self.literal {
            None => write!(f, "-"),
            Some(literal) => write!(f, "{literal}"),
        }
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span
    }
}

/// Renders a human-readable listing of tokens, one line per token.
///
/// This is a debugging aid, the format isn't stable.
pub fn token_listing<'a>(tokens: impl IntoIterator<Item = &'a Token>) -> String {
    tokens.into_iter().map(|token| token.to_string()).join("\n")
}
