//! Pull-based event parser for GSS.

use crate::lexer::{Lexer, Line};
use crate::{Event, Span};
use tracing::trace;

/// Pull-based event parser for GSS source text.
///
/// Each line is classified on its own, first matching rule wins:
///
/// 1. A line containing the substring `end` anywhere is a scope close.
///    This is a substring match, not a keyword match: `legend : 1 ;`
///    closes a scope. The check runs before everything else, including
///    comment detection.
/// 2. A line with none of `=`, `:`, `;`, or whose first such character
///    is `;`, is ignored (comment or prose).
/// 3. If the first is `=`, the line opens a class.
/// 4. If the first is `:`, the line defines a property.
///
/// A value containing `=` before its own `:` therefore parses as a class
/// open; the format accepts this limitation.
#[derive(Clone)]
pub struct Parser<'src> {
    lexer: Lexer<'src>,
}

impl<'src> Parser<'src> {
    /// Create a new parser for the given source.
    pub fn new(source: &'src str) -> Self {
        Self {
            lexer: Lexer::new(source),
        }
    }

    /// Get the next event from the parser, skipping ignored lines.
    pub fn next_event(&mut self) -> Option<Event<'src>> {
        loop {
            let line = self.lexer.next_line()?;
            if let Some(event) = classify(line) {
                trace!("Event {:?}", event);
                return Some(event);
            }
        }
    }

    /// Parse all events into a vector.
    pub fn parse_to_vec(mut self) -> Vec<Event<'src>> {
        let mut events = Vec::new();
        while let Some(event) = self.next_event() {
            events.push(event);
        }
        events
    }
}

/// Classify a single line, or `None` if the line is ignored.
fn classify<'src>(line: Line<'src>) -> Option<Event<'src>> {
    if line.text.contains("end") {
        return Some(Event::ScopeClose { span: line.span });
    }

    let delim = line.text.find(['=', ':', ';'])?;
    match line.text.as_bytes()[delim] {
        b';' => None,
        b'=' => {
            let (name, span) = trim_name(&line.text[..delim], line.span.start);
            Some(Event::ClassOpen { name, span })
        }
        _ => {
            let (name, span) = trim_name(&line.text[..delim], line.span.start);
            let rest = &line.text[delim + 1..];
            let value = match rest.find(';') {
                Some(end) => &rest[..end],
                None => rest,
            };
            Some(Event::Define {
                name,
                value: value.trim_start(),
                span,
            })
        }
    }
}

/// Trim a raw name region, returning the trimmed text and its span.
fn trim_name(raw: &str, line_start: u32) -> (&str, Span) {
    let name = raw.trim();
    let lead = raw.len() - raw.trim_start().len();
    let start = line_start + lead as u32;
    (name, Span::new(start, start + name.len() as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse(source: &str) -> Vec<Event<'_>> {
        Parser::new(source).parse_to_vec()
    }

    #[test]
    fn test_empty_source() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_define() {
        let events = parse("x : 42;");
        assert_eq!(
            events,
            vec![Event::Define {
                name: "x",
                value: "42",
                span: Span::new(0, 1)
            }]
        );
    }

    #[test]
    fn test_define_preserves_trailing_whitespace_in_value() {
        // The value runs from the first non-whitespace character after `:`
        // up to the `;`, trailing padding included.
        let events = parse("x : 42 ;");
        assert!(matches!(&events[..], [Event::Define { value: "42 ", .. }]));
    }

    #[test]
    fn test_define_without_semicolon_runs_to_end_of_line() {
        let events = parse("x : 1 2 3");
        assert!(matches!(&events[..], [Event::Define { value: "1 2 3", .. }]));
    }

    #[test]
    fn test_define_empty_value() {
        let events = parse("x :;");
        assert!(matches!(&events[..], [Event::Define { value: "", .. }]));
        let events = parse("x : ;");
        assert!(matches!(&events[..], [Event::Define { value: "", .. }]));
    }

    #[test]
    fn test_class_open() {
        let events = parse("video =");
        assert_eq!(
            events,
            vec![Event::ClassOpen {
                name: "video",
                span: Span::new(0, 5)
            }]
        );
    }

    #[test]
    fn test_name_trimming() {
        let events = parse("\t video\t=");
        assert_eq!(
            events,
            vec![Event::ClassOpen {
                name: "video",
                span: Span::new(2, 7)
            }]
        );
    }

    #[test]
    fn test_empty_class_name() {
        let events = parse(" = ");
        assert!(matches!(&events[..], [Event::ClassOpen { name: "", .. }]));
    }

    #[test]
    fn test_scope_close() {
        let events = parse("end");
        assert_eq!(
            events,
            vec![Event::ScopeClose {
                span: Span::new(0, 3)
            }]
        );
    }

    #[test]
    fn test_scope_close_is_a_substring_match() {
        // `end` anywhere in the line wins, even inside a would-be value
        // or comment.
        assert!(matches!(
            &parse("message : the end ;")[..],
            [Event::ScopeClose { .. }]
        ));
        assert!(matches!(
            &parse("; legend of the ages")[..],
            [Event::ScopeClose { .. }]
        ));
    }

    #[test]
    fn test_comment_and_blank_lines_are_ignored() {
        assert!(parse("; x : 1 ;").is_empty());
        assert!(parse("").is_empty());
        assert!(parse("\n\n").is_empty());
        assert!(parse("just some prose").is_empty());
    }

    #[test]
    fn test_first_delimiter_wins() {
        // `=` before `:` makes this a class open, `;` first makes it a
        // comment.
        assert!(matches!(
            &parse("a = b : c ;")[..],
            [Event::ClassOpen { name: "a", .. }]
        ));
        assert!(parse(";a = b").is_empty());
    }

    #[test]
    fn test_document() {
        let events = parse("; settings\nvideo =\n  width : 640;\nend\n");
        assert_eq!(
            events,
            vec![
                Event::ClassOpen {
                    name: "video",
                    span: Span::new(11, 16)
                },
                Event::Define {
                    name: "width",
                    value: "640",
                    span: Span::new(21, 26)
                },
                Event::ScopeClose {
                    span: Span::new(34, 37)
                },
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_define_name_is_trimmed(
            name in "[a-z]{1,8}",
            value in "[a-z0-9]{1,12}",
            pad in "[ \t]{0,3}",
        ) {
            prop_assume!(!name.contains("end"));
            prop_assume!(!value.contains("end"));
            let source = format!("{pad}{name}{pad} : {value} ;");
            let events = Parser::new(&source).parse_to_vec();
            match &events[..] {
                [Event::Define { name: n, value: v, .. }] => {
                    prop_assert_eq!(*n, name.as_str());
                    prop_assert_eq!(v.trim_end(), value.as_str());
                }
                other => prop_assert!(false, "unexpected events: {:?}", other),
            }
        }

        #[test]
        fn prop_delimiter_free_lines_are_ignored(text in "[a-zA-Z0-9 _.]{0,20}") {
            prop_assume!(!text.contains("end"));
            let events = Parser::new(&text).parse_to_vec();
            prop_assert!(events.is_empty());
        }
    }
}
