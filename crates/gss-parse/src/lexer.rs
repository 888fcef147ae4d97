//! Line lexer for the GSS configuration format.
//!
//! GSS has no token structure below the line: every grammar decision is
//! made from a whole line of text. The lexer therefore yields lines,
//! with byte-offset spans into the source.

use crate::Span;
use tracing::trace;

/// A lexer that walks GSS source text line by line.
#[derive(Clone)]
pub struct Lexer<'src> {
    /// The remaining source text (suffix of the original input).
    remaining: &'src str,
    /// Current byte position in the original input.
    pos: u32,
}

/// A single source line, without its terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'src> {
    /// The line's text. Never contains `\n` or a trailing `\r`.
    pub text: &'src str,
    /// The byte range of `text` in the source.
    pub span: Span,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            remaining: source,
            pos: 0,
        }
    }

    /// Get the current byte position.
    #[inline]
    pub fn position(&self) -> u32 {
        self.pos
    }

    /// Check if we're at the end of input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Get the next line, or `None` at end of input.
    ///
    /// Lines are terminated by `\n` or `\r\n`; the final line needs no
    /// terminator.
    pub fn next_line(&mut self) -> Option<Line<'src>> {
        if self.remaining.is_empty() {
            return None;
        }

        let start = self.pos;
        let (text, consumed) = match self.remaining.find('\n') {
            Some(i) => (&self.remaining[..i], i + 1),
            None => (self.remaining, self.remaining.len()),
        };
        let text = text.strip_suffix('\r').unwrap_or(text);

        self.pos += consumed as u32;
        self.remaining = &self.remaining[consumed..];

        let span = Span::new(start, start + text.len() as u32);
        trace!("Line at {:?}: {:?}", span, text);
        Some(Line { text, span })
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Line<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line()
    }
}
