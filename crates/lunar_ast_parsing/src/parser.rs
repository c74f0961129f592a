//! Recursive descent parser, one method per grammar rule.
//!
//! The rules are split by the kind of node they produce: [statement rules](statement) and
//! [expression rules](expr). This module holds the cursor over the token sequence and the
//! helpers every rule shares.

use lunar_ast::block::Chunk;
use lunar_tokens::spanned::{Span, Spanned};
use lunar_tokens::token::{Token, TokenKind};
use thiserror::Error;
use tracing::{debug, trace};

mod error;
mod expr;
mod statement;

pub use error::{ErrorKind, SyntaxError, SyntaxResult};

/// The default for [ParserBuilder::max_depth].
///
/// A parse that reaches this depth fits within the default stack of a spawned thread, even in
/// unoptimized builds.
pub const DEFAULT_MAX_DEPTH: usize = 48;

/// Parses a token sequence into a [Chunk]
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    depth: usize,
    max_depth: usize,
    non_terminals: Vec<&'static str>,
}

impl Parser {
    /// Creates a new parser with the default configuration
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self::with_max_depth(tokens, DEFAULT_MAX_DEPTH)
    }

    /// Creates a builder for configuring a parser
    pub fn builder() -> ParserBuilder {
        ParserBuilder::default()
    }

    fn with_max_depth(tokens: impl IntoIterator<Item = Token>, max_depth: usize) -> Self {
        let mut tokens: Vec<Token> = tokens.into_iter().collect();
        if tokens.last().map(|t| t.kind()) != Some(TokenKind::Eof) {
            let span = tokens
                .last()
                .map(|t| t.span().end())
                .unwrap_or(Span::new(0, 0, 1));
            tokens.push(Token::eof(span));
        }
        Self {
            tokens,
            current: 0,
            depth: 0,
            max_depth,
            non_terminals: vec![],
        }
    }

    /// Parses the whole token sequence as a chunk.
    ///
    /// Every token up to the final `EOF` must belong to the chunk, so an `EOF` anywhere else is
    /// an error.
    pub fn parse(mut self) -> SyntaxResult<Chunk> {
        let chunk = self.nested("chunk", |parser| {
            let block = parser.block()?;
            let eof = parser.current;
            parser.expect(TokenKind::Eof)?;
            if eof != parser.tokens.len() - 1 {
                return Err(parser.unexpected("chunk"));
            }
            Ok(Chunk::new(block))
        })?;
        debug!(
            "parsed chunk with {} top-level statements from {} tokens",
            chunk.block.statements.len(),
            self.tokens.len()
        );
        Ok(chunk)
    }

    /// The current lookahead. Never advances past the final `EOF`.
    fn peek(&self) -> &Token {
        self.peek_nth(0)
    }

    /// The token `n` positions after the current one, or `EOF` if that's past the end
    fn peek_nth(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.current + n).min(last)]
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind() == kind
    }

    fn check_nth(&self, n: usize, kind: TokenKind) -> bool {
        self.peek_nth(n).kind() == kind
    }

    fn consume(&mut self) -> Token {
        let token = self.peek().clone();
        if self.current + 1 < self.tokens.len() {
            self.current += 1;
        }
        trace!("consumed {token:?}");
        token
    }

    /// Consumes the lookahead if it's of the given kind
    fn consume_if(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.consume())
        } else {
            None
        }
    }

    /// Consumes the lookahead if it's any of the given kinds
    fn match_any(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if kinds.contains(&self.peek().kind()) {
            Some(self.consume())
        } else {
            None
        }
    }

    /// Consumes a token of the given kind, or fails with [ErrorKind::ExpectedToken]
    fn expect(&mut self, kind: TokenKind) -> SyntaxResult<Token> {
        match self.consume_if(kind) {
            Some(token) => Ok(token),
            None => Err(self.error(ErrorKind::expected_token(kind, self.peek().kind()))),
        }
    }

    fn expect_identifier(&mut self) -> SyntaxResult<String> {
        self.expect(TokenKind::Identifier)
            .map(|token| token.lexeme().to_string())
    }

    /// Creates an error at the current lookahead
    fn error(&self, kind: ErrorKind) -> SyntaxError {
        self.error_with_span(kind, self.peek().span())
    }

    fn error_with_span(&self, kind: ErrorKind, span: Span) -> SyntaxError {
        let error = SyntaxError::new(kind, span, self.non_terminals.clone());
        debug!("syntax error: {error}");
        error
    }

    fn unexpected(&self, context: &'static str) -> SyntaxError {
        let found = self.peek();
        self.error(ErrorKind::UnexpectedToken {
            found: found.kind(),
            lexeme: found.lexeme().to_string(),
            context,
        })
    }

    /// Runs a grammar rule one level deeper, failing once [Self::max_depth] is exceeded.
    ///
    /// The rule stays on the non-terminal stack if it fails.
    fn nested<T, F>(&mut self, non_terminal: &'static str, rule: F) -> SyntaxResult<T>
    where
        F: FnOnce(&mut Self) -> SyntaxResult<T>,
    {
        if self.depth >= self.max_depth {
            return Err(self.error(ErrorKind::NestingTooDeep(self.max_depth)));
        }
        trace!("starting parsing {non_terminal} at {:?}", self.peek());
        self.depth += 1;
        self.non_terminals.push(non_terminal);
        let result = rule(self);
        self.depth -= 1;
        if result.is_ok() {
            self.non_terminals.pop();
        }
        result
    }
}

/// Configures a [Parser]
#[derive(Debug, Clone)]
pub struct ParserBuilder {
    max_depth: usize,
}

impl Default for ParserBuilder {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserBuilder {
    /// Bounds how deeply blocks and expressions may nest
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Builds the parser over the given tokens
    pub fn build(
        self,
        tokens: impl IntoIterator<Item = Token>,
    ) -> Result<Parser, BuildParserError> {
        if self.max_depth == 0 {
            return Err(BuildParserError::ZeroDepth);
        }
        Ok(Parser::with_max_depth(tokens, self.max_depth))
    }
}

/// An error occurred while building a parser
#[derive(Debug, Error)]
pub enum BuildParserError {
    #[error("the maximum nesting depth must be at least 1")]
    ZeroDepth,
}
