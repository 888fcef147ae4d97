//! Diagnostic rendering for parse errors.

use ariadne::{Color, Label, Report, ReportKind, Source};
use gss_parse::Span;

/// A structural parse error with source location.
///
/// The only structural failure the format defines: a scope close with no
/// open class. Malformed lines are not errors; the grammar ignores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseError {
    /// Span of the offending line.
    pub span: Span,
}

impl ParseError {
    /// Create a new parse error.
    pub fn new(span: Span) -> Self {
        Self { span }
    }

    /// Render this error with ariadne.
    ///
    /// Returns a string containing the formatted error message with
    /// source context.
    pub fn render(&self, filename: &str, source: &str) -> String {
        let mut output = Vec::new();
        self.write_report(filename, source, &mut output);
        String::from_utf8(output).unwrap_or_else(|_| format!("{}", self))
    }

    /// Write the error report to a writer.
    pub fn write_report<W: std::io::Write>(&self, filename: &str, source: &str, writer: W) {
        let report = self.build_report(filename);
        let _ = report
            .finish()
            .write((filename, Source::from(source)), writer);
    }

    fn build_report<'a>(
        &self,
        filename: &'a str,
    ) -> ariadne::ReportBuilder<'static, (&'a str, std::ops::Range<usize>)> {
        let range: std::ops::Range<usize> = self.span.into();

        Report::build(ReportKind::Error, (filename, range.clone()))
            .with_message("unbalanced scope close")
            .with_label(
                Label::new((filename, range))
                    .with_message("this line closes a class, but none is open")
                    .with_color(Color::Red),
            )
            .with_help("open a class with `name =` before closing one, or remove this line")
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unbalanced scope close at offset {}", self.span.start)
    }
}

impl std::error::Error for ParseError {}
