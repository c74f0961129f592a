#![doc = include_str!("../README.md")]

use crate::lexer::{Lexer, LexingError};
use crate::parser::{Parser, SyntaxError};
use lunar_ast::block::Chunk;
use lunar_tokens::spanned::{Span, Spanned};
use lunar_tokens::token::Token;

pub mod lexer;
pub mod parser;

/// Scans a complete source text into tokens, ending with a single `EOF` token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexingError> {
    Lexer::new(source).tokenize()
}

/// Parses an already scanned token sequence with the default parser configuration.
///
/// An `EOF` token is appended if the sequence doesn't end with one.
pub fn parse_tokens(tokens: impl IntoIterator<Item = Token>) -> Result<Chunk, SyntaxError> {
    Parser::new(tokens).parse()
}

/// Tokenizes and parses a complete source text.
pub fn parse(source: &str) -> Result<Chunk, Error> {
    let tokens = tokenize(source)?;
    Ok(parse_tokens(tokens)?)
}

/// Any error from [parse]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexingError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl Error {
    /// The 1-based line the error occurred on
    pub fn line(&self) -> usize {
        match self {
            Error::Lex(e) => e.line(),
            Error::Syntax(e) => e.line(),
        }
    }

    /// Renders this error with the surrounding source
    pub fn report(&self, source: &str) -> String {
        match self {
            Error::Lex(e) => e.report(source),
            Error::Syntax(e) => e.report(source),
        }
    }
}

impl Spanned for Error {
    fn span(&self) -> Span {
        match self {
            Error::Lex(e) => e.span(),
            Error::Syntax(e) => e.span(),
        }
    }
}
