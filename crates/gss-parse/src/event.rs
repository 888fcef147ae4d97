//! Event types for the GSS event-based parser.

use crate::Span;

/// Events emitted by the parser, one per meaningful source line.
///
/// Comment and blank lines are not events: the grammar defines them as
/// ignored, and the parser skips them outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'src> {
    /// A `name =` line: open a nested property class.
    ClassOpen {
        /// The class name, whitespace-trimmed.
        name: &'src str,
        /// Span of the trimmed name.
        span: Span,
    },

    /// A `name : value ;` line: define a leaf property.
    Define {
        /// The property name, whitespace-trimmed.
        name: &'src str,
        /// The raw value text: everything from the first non-whitespace
        /// character after `:` up to the next `;` (or end of line).
        value: &'src str,
        /// Span of the trimmed name.
        span: Span,
    },

    /// A line containing the substring `end`: close the current class.
    ScopeClose {
        /// Span of the whole line.
        span: Span,
    },
}
