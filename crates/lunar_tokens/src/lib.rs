#![doc = include_str!("../README.md")]

use crate::spanned::{LineReader, Span, Spanned};
use std::fmt::Write as _;

pub mod spanned;
pub mod token;

/// An error with a location
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{error} at {span}")]
pub struct SpannedError<E> {
    error: E,
    span: Span,
}

impl<E> SpannedError<E> {
    pub fn new(error: E, span: Span) -> Self {
        Self { error, span }
    }

    /// Gets the underlying error
    pub fn error(&self) -> &E {
        &self.error
    }

    /// The 1-based line the error occurred on
    pub fn line(&self) -> usize {
        self.span.line()
    }
}

impl<E> Spanned for SpannedError<E> {
    fn span(&self) -> Span {
        self.span
    }
}

impl<E: std::fmt::Display> SpannedError<E> {
    /// Renders this error against the source it was raised for, showing up to two lines of
    /// context on each side of the offending line.
    ///
    /// ```text
    /// unterminated string
    ///   -> line 2:11
    /// 1 | local a = 1
    /// 2 | local b = "abc
    ///               ~~~~
    /// ```
    pub fn report(&self, source: &str) -> String {
        let mut out = String::new();
        let _ = self.write_report(&mut out, source);
        out
    }

    fn write_report(&self, f: &mut String, source: &str) -> std::fmt::Result {
        writeln!(f, "{}", self.error)?;
        let (lines, base_line) = LineReader::new(2, 2).lines(source, &self.span);
        let col = lines
            .iter()
            .find(|line| line.line == base_line)
            .map(|line| line.col)
            .unwrap_or(0);
        writeln!(f, "  -> line {base_line}:{}", col + 1)?;
        let width = lines.iter().map(|line| line.line).max().unwrap_or(0) / 10 + 1;
        for line in &lines {
            writeln!(f, "{:width$} | {}", line.line, line.src.trim_end())?;
            if line.line == base_line {
                let underline = self
                    .span
                    .slice(source)
                    .map(|text| text.chars().take_while(|&c| c != '\n').count())
                    .unwrap_or(0)
                    .min(line.src.chars().count().saturating_sub(line.col));
                if underline > 0 {
                    writeln!(
                        f,
                        "{}{}{}",
                        " ".repeat(width + 3),
                        " ".repeat(line.col),
                        "~".repeat(underline)
                    )?;
                } else {
                    writeln!(f, "{}{}^", " ".repeat(width + 3), "-".repeat(line.col))?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_line() {
        let error = SpannedError::new("bad thing", Span::new(0, 1, 7));
        assert_eq!(error.to_string(), "bad thing at line 7");
        assert_eq!(error.line(), 7);
    }

    #[test]
    fn test_report_underlines_span() {
        let source = "local a = 1\nlocal b = \"abc";
        let error = SpannedError::new("unterminated string", Span::new(22, 4, 2));
        let report = error.report(source);
        let lines: Vec<_> = report.lines().collect();
        assert_eq!(lines[0], "unterminated string");
        assert_eq!(lines[1], "  -> line 2:11");
        assert_eq!(lines[2], "1 | local a = 1");
        assert_eq!(lines[3], "2 | local b = \"abc");
        assert_eq!(lines[4], format!("{}~~~~", " ".repeat(14)));
    }

    #[test]
    fn test_report_marks_empty_span() {
        let source = "if x then";
        let error = SpannedError::new("expected 'end'", Span::new(9, 0, 1));
        let report = error.report(source);
        assert!(report.ends_with(&format!("{}^\n", "-".repeat(9))), "{report}");
    }
}
