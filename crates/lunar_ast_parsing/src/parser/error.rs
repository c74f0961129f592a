use itertools::Itertools;
use lunar_tokens::spanned::{Span, Spanned};
use lunar_tokens::token::TokenKind;
use lunar_tokens::SpannedError;
use std::fmt::{Display, Formatter};

/// Represents an error occurring during parsing
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub struct SyntaxError {
    kind: SpannedError<ErrorKind>,
    non_terminal_stack: Vec<&'static str>,
}

impl SyntaxError {
    /// Creates a new error
    pub fn new(kind: ErrorKind, span: Span, non_terminals: Vec<&'static str>) -> Self {
        Self {
            kind: SpannedError::new(kind, span),
            non_terminal_stack: non_terminals,
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        self.kind.error()
    }

    /// The 1-based line of the token the error was raised at
    pub fn line(&self) -> usize {
        self.kind.line()
    }

    /// The grammar rules being parsed when this error occurred, outermost first
    pub fn non_terminals(&self) -> &[&'static str] {
        &self.non_terminal_stack
    }

    /// Renders this error with the surrounding source
    pub fn report(&self, source: &str) -> String {
        let mut report = self.kind.report(source);
        if !self.non_terminal_stack.is_empty() {
            report.push_str(&format!(
                "while parsing: {}\n",
                self.non_terminal_stack.iter().join(" > ")
            ));
        }
        report
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "syntax error: {}", self.kind)
    }
}

impl Spanned for SyntaxError {
    fn span(&self) -> Span {
        self.kind.span()
    }
}

/// [SyntaxError] kind
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ErrorKind {
    #[error("expected {}, found {}", .expected.describe(), .found.describe())]
    ExpectedToken {
        expected: TokenKind,
        found: TokenKind,
    },
    #[error(
        "expected one of {}, found {}",
        .expected.iter().map(TokenKind::describe).join(", "),
        .found.describe()
    )]
    ExpectedOneOf {
        expected: Vec<TokenKind>,
        found: TokenKind,
    },
    #[error("unexpected {lexeme:?} in {context}")]
    UnexpectedToken {
        found: TokenKind,
        lexeme: String,
        context: &'static str,
    },
    #[error("cannot assign to {0}")]
    InvalidAssignmentTarget(&'static str),
    #[error("nesting exceeds the maximum depth of {0}")]
    NestingTooDeep(usize),
}

impl ErrorKind {
    pub fn expected_token(expected: TokenKind, found: TokenKind) -> Self {
        Self::ExpectedToken { expected, found }
    }

    pub fn expected_one_of(
        expected: impl IntoIterator<Item = TokenKind>,
        found: TokenKind,
    ) -> Self {
        Self::ExpectedOneOf {
            expected: expected.into_iter().collect(),
            found,
        }
    }
}

pub type SyntaxResult<T = ()> = Result<T, SyntaxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let error = SyntaxError::new(
            ErrorKind::expected_token(TokenKind::End, TokenKind::Eof),
            Span::new(9, 0, 1),
            vec!["chunk", "block", "statement"],
        );
        assert_eq!(
            error.to_string(),
            "syntax error: expected 'end', found end of input at line 1"
        );
        assert!(error
            .report("if x then")
            .ends_with("while parsing: chunk > block > statement\n"));

        let kind = ErrorKind::expected_one_of([TokenKind::Assign, TokenKind::In], TokenKind::Do);
        assert_eq!(kind.to_string(), "expected one of '=', 'in', found 'do'");
    }
}
