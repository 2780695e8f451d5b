pub mod lexer;
pub mod parser;

pub use lexer::{tokenize, tokenize_with, unlex, LexMode, Lexer};
pub use parser::{Parser, ParserOptions, DEFAULT_MAX_DEPTH};
pub use toy_types::{Token, TokenKind, TokenValue};

use toy_ast::Program;
use toy_types::Result;

/// Parse an already tokenized program.
pub fn parse(tokens: &[Token]) -> Result<Program> {
    Parser::new(tokens).parse()
}

/// Strict tokenization followed by parsing.
pub fn parse_source(source: &str) -> Result<Program> {
    let tokens = tokenize(source)?;
    parse(&tokens)
}
