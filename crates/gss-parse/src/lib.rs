#![doc = include_str!("../README.md")]

mod span;
pub use span::Span;

mod lexer;
pub use lexer::{Lexer, Line};

mod event;
pub use event::Event;

mod parser;
pub use parser::Parser;
