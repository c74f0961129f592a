//! Source positions for tokens, and a way of rendering them back against the source text

use derive_more::Display;

/// A trait that can provide the [Span] of a lexical item
pub trait Spanned {
    fn span(&self) -> Span;
}

/// A byte range within a source text, along with the 1-based line it starts on
#[derive(Debug, Copy, Clone, Default, Ord, PartialOrd, Eq, PartialEq, Hash, Display)]
#[display(fmt = "line {}", line)]
pub struct Span {
    offset: usize,
    len: usize,
    line: usize,
}

impl Span {
    /// Creates a new span
    pub const fn new(offset: usize, len: usize, line: usize) -> Self {
        Self { offset, len, line }
    }

    /// Gets a zero-length span directly after this span
    pub const fn end(&self) -> Self {
        Self {
            offset: self.offset + self.len,
            len: 0,
            line: self.line,
        }
    }

    /// Gets the text this span covers, if it lies within `source`
    pub fn slice<'s>(&self, source: &'s str) -> Option<&'s str> {
        source.get(self.offset..self.offset + self.len)
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub const fn line(&self) -> usize {
        self.line
    }
}

impl Spanned for Span {
    fn span(&self) -> Span {
        *self
    }
}

/// A line reader that's responsible for getting the lines surrounding a span
#[derive(Debug, Default)]
pub struct LineReader {
    before: usize,
    after: usize,
}

impl LineReader {
    /// Creates a new line reader that gets `before` number of lines before a span and `after`
    /// number of lines after.
    pub fn new(before: usize, after: usize) -> Self {
        Self { before, after }
    }

    /// Gets the lines for a given span, plus the base line index
    pub fn lines(&self, source: &str, span: &Span) -> (Vec<Line>, usize) {
        let base_line = span.line();
        let range = base_line.saturating_sub(self.before)..=base_line.saturating_add(self.after);
        let mut lines = vec![];
        let mut byte_offset = 0usize;
        for (idx, src) in source.split('\n').enumerate() {
            let line = idx + 1;
            if range.contains(&line) {
                let col = if line == base_line {
                    let until = span.offset().clamp(byte_offset, byte_offset + src.len());
                    source
                        .get(byte_offset..until)
                        .map(|prefix| prefix.chars().count())
                        .unwrap_or(0)
                } else {
                    0
                };
                lines.push(Line {
                    line,
                    col,
                    src: src.trim_end_matches('\r').to_string(),
                });
            }
            byte_offset += src.len() + 1;
        }
        (lines, base_line)
    }
}

/// A single line of source, as returned by a [LineReader]
#[derive(Debug)]
pub struct Line {
    pub line: usize,
    pub col: usize,
    pub src: String,
}
