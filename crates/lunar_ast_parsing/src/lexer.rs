//! Responsible for converting source text into a token stream

use crate::lexer::token_parsing::{parse_insignificant, parse_token, ScanError};
use lunar_tokens::spanned::{Span, Spanned};
use lunar_tokens::token::Token;
use lunar_tokens::SpannedError;
use thiserror::Error;
use tracing::{debug, trace};

mod token_parsing;

/// Scans a source text into tokens, one per call to [Iterator::next].
///
/// The last item is always either the `EOF` token or the first error encountered, after which
/// the lexer is exhausted.
#[derive(Debug)]
pub struct Lexer<'src> {
    source: &'src str,
    offset: usize,
    line: usize,
    emitted: usize,
    done: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            emitted: 0,
            done: false,
        }
    }

    /// Scans every remaining token
    pub fn tokenize(self) -> LexResult<Vec<Token>> {
        self.collect()
    }

    fn next_token(&mut self) -> LexResult<Token> {
        let remaining = &self.source[self.offset..];
        let significant = match parse_insignificant(remaining) {
            Ok((rest, skipped)) => {
                self.advance(skipped);
                rest
            }
            Err(nom::Err::Failure(ScanError::UnterminatedComment(at))) => {
                self.advance(&remaining[..remaining.len() - at.len()]);
                return Err(self.error(LexErrorKind::UnterminatedComment, at.len()));
            }
            Err(_) => remaining,
        };

        if significant.is_empty() {
            let token = Token::eof(Span::new(self.offset, 0, self.line));
            debug!(
                "scanned {} tokens over {} lines",
                self.emitted + 1,
                self.line
            );
            return Ok(token);
        }

        match parse_token(significant) {
            Ok((rest, (kind, literal))) => {
                let lexeme = &significant[..significant.len() - rest.len()];
                let token = Token::new(
                    kind,
                    lexeme,
                    literal,
                    Span::new(self.offset, lexeme.len(), self.line),
                );
                trace!("token: {token:?} at {}", token.span());
                self.advance(lexeme);
                Ok(token)
            }
            Err(nom::Err::Failure(ScanError::UnterminatedString(at))) => {
                let len = at.find('\n').unwrap_or(at.len());
                Err(self.error(LexErrorKind::UnterminatedString, len))
            }
            Err(_) => {
                let c = significant.chars().next().unwrap_or_default();
                Err(self.error(LexErrorKind::InvalidChar(c), c.len_utf8()))
            }
        }
    }

    fn advance(&mut self, consumed: &str) {
        self.offset += consumed.len();
        self.line += consumed.matches('\n').count();
    }

    fn error(&self, kind: LexErrorKind, len: usize) -> LexingError {
        let error = LexingError(SpannedError::new(
            kind,
            Span::new(self.offset, len, self.line),
        ));
        debug!("lexing failed: {error}");
        error
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = LexResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.next_token();
        match &result {
            Ok(token) if token.kind() != lunar_tokens::token::TokenKind::Eof => {
                self.emitted += 1;
            }
            _ => self.done = true,
        }
        Some(result)
    }
}

pub type LexResult<T> = Result<T, LexingError>;

/// The kind of a [LexingError]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexErrorKind {
    #[error("invalid character {0:?}")]
    InvalidChar(char),
    #[error("unterminated string")]
    UnterminatedString,
    #[error("unterminated comment block")]
    UnterminatedComment,
}

/// An error that stopped the lexer, positioned at the offending text.
///
/// For unterminated strings and comments the position is the opening delimiter.
#[derive(Debug, Clone, PartialEq, Error)]
#[error(transparent)]
pub struct LexingError(SpannedError<LexErrorKind>);

impl LexingError {
    pub fn kind(&self) -> &LexErrorKind {
        self.0.error()
    }

    /// The 1-based line the error occurred on
    pub fn line(&self) -> usize {
        self.0.line()
    }

    /// Renders this error with the surrounding source
    pub fn report(&self, source: &str) -> String {
        self.0.report(source)
    }
}

impl Spanned for LexingError {
    fn span(&self) -> Span {
        self.0.span()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lunar_tokens::token::{Literal, TokenKind};
    use test_log::test;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src)
            .tokenize()
            .unwrap_or_else(|e| panic!("{}", e.report(src)))
            .iter()
            .map(|t| t.kind())
            .collect()
    }

    #[test]
    fn test_lexer() {
        let src = "local x = 10 -- ten\nprint(x .. 'hi')";
        let tokens = Lexer::new(src).tokenize().unwrap();
        let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme()).collect();
        assert_eq!(
            lexemes,
            ["local", "x", "=", "10", "print", "(", "x", "..", "'hi'", ")", ""]
        );
        assert_eq!(tokens[3].literal(), Some(&Literal::Number(10.0)));
        assert_eq!(tokens[4].line(), 2);
        assert_eq!(tokens[8].literal(), Some(&Literal::String("hi".to_string())));
    }

    #[test]
    fn test_eof_position() {
        let src = "x\n\n";
        let tokens = Lexer::new(src).tokenize().unwrap();
        let eof = tokens.last().unwrap();
        assert_eq!(eof.kind(), TokenKind::Eof);
        assert_eq!(eof.lexeme(), "");
        assert_eq!(eof.span(), Span::new(3, 0, 3));
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(kinds(""), [TokenKind::Eof]);
        assert_eq!(kinds("  -- nothing here"), [TokenKind::Eof]);
    }

    #[test]
    fn test_block_comment_counts_lines() {
        let src = "a --[[ one\ntwo\nthree ]] b";
        let tokens = Lexer::new(src).tokenize().unwrap();
        assert_eq!(tokens[1].lexeme(), "b");
        assert_eq!(tokens[1].line(), 3);
    }

    #[test]
    fn test_numbers_and_dots() {
        assert_eq!(
            kinds("1..2"),
            [
                TokenKind::Number,
                TokenKind::Concat,
                TokenKind::Number,
                TokenKind::Eof
            ]
        );
        assert_eq!(
            kinds("3."),
            [TokenKind::Number, TokenKind::Dot, TokenKind::Eof]
        );
    }

    #[test]
    fn test_invalid_char() {
        let mut lexer = Lexer::new("x = 1\ny = $");
        let error = lexer
            .by_ref()
            .find_map(|result| result.err())
            .expect("should fail");
        assert_eq!(error.kind(), &LexErrorKind::InvalidChar('$'));
        assert_eq!(error.line(), 2);
        assert_eq!(error.span().offset(), 10);
        assert!(lexer.next().is_none(), "lexer should stop after an error");
    }

    #[test]
    fn test_unterminated_comment_reports_start_line() {
        let error = Lexer::new("x\n--[[ open\nstill open")
            .tokenize()
            .unwrap_err();
        assert_eq!(error.kind(), &LexErrorKind::UnterminatedComment);
        assert_eq!(error.line(), 2);
        assert_eq!(error.span().offset(), 2);
    }

    #[test]
    fn test_unterminated_string_stops_at_newline() {
        let error = Lexer::new("s = 'abc\n'").tokenize().unwrap_err();
        assert_eq!(error.kind(), &LexErrorKind::UnterminatedString);
        assert_eq!(error.line(), 1);
        assert_eq!(error.span(), Span::new(4, 4, 1));
    }
}
