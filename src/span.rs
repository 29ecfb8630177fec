use std::ops::Range;

use serde::Serialize;

/// Byte-offset span in source code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-width span, used for the end-of-stream token.
    pub fn point(offset: usize) -> Self {
        Self { start: offset, end: offset }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The span in character offsets, which is how ariadne indexes source.
    pub fn char_range(&self, source: &str) -> Range<usize> {
        let to_chars = |offset: usize| {
            source.get(..offset).map_or_else(|| source.chars().count(), |s| s.chars().count())
        };
        to_chars(self.start)..to_chars(self.end)
    }

    /// 1-based line and column of `start` within `source`.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let upto = &source[..self.start.min(source.len())];
        let line = upto.matches('\n').count() + 1;
        let col = match upto.rfind('\n') {
            Some(nl) => upto[nl + 1..].chars().count() + 1,
            None => upto.chars().count() + 1,
        };
        (line, col)
    }
}
