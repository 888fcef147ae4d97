#![doc = include_str!("../README.md")]

mod builder;
mod diagnostic;
mod value;

pub use builder::TreeBuilder;
pub use diagnostic::ParseError;
pub use gss_parse::{Event, Lexer, Line, Parser, Span};
pub use value::{Error, Node, Property, PropertyClass};

use std::io::Read;
use std::path::Path;

/// Parse a GSS document into its root property class.
pub fn parse(source: &str) -> Result<PropertyClass, Error> {
    let mut parser = Parser::new(source);
    let mut builder = TreeBuilder::new();
    while let Some(event) = parser.next_event() {
        builder.event(event);
    }
    builder.finish().map_err(|e| Error::InvalidRequest {
        reason: e.to_string(),
    })
}

/// Read a GSS document from any reader and parse it.
pub fn parse_reader(mut reader: impl Read) -> Result<PropertyClass, Error> {
    let mut source = String::new();
    reader
        .read_to_string(&mut source)
        .map_err(|e| Error::InvalidRequest {
            reason: format!("failed to read input: {}", e),
        })?;
    parse(&source)
}

/// Open a GSS file by name and parse it.
///
/// A file that cannot be opened or read reports [`Error::InvalidRequest`].
pub fn parse_file(path: impl AsRef<Path>) -> Result<PropertyClass, Error> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|e| Error::InvalidRequest {
        reason: format!("cannot open {}: {}", path.display(), e),
    })?;
    parse(&source)
}
