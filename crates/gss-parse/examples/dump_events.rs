use std::io::Read;

use gss_parse::{Lexer, Parser};

fn main() {
    let mut source = String::new();
    std::io::stdin().read_to_string(&mut source).unwrap();

    println!("=== Lines ===");
    for line in Lexer::new(&source) {
        println!("{:?}", line);
    }

    println!("\n=== Events ===");
    let mut parser = Parser::new(&source);
    while let Some(event) = parser.next_event() {
        println!("{:?}", event);
    }
}
