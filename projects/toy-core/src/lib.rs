pub mod config;

pub use config::{FrontendConfig, LexerConfig, ParserConfig};

use toy_ast::Program;
use toy_parser::{Lexer, Parser};
use toy_types::{Result, Token};
use tracing::instrument;

/// Tokenizer and parser wired up from a [`FrontendConfig`].
#[derive(Debug, Clone, Default)]
pub struct Frontend {
    pub config: FrontendConfig,
}

impl Frontend {
    pub fn new(config: FrontendConfig) -> Self {
        Self { config }
    }

    pub fn tokenize(&self, source: &str) -> Result<Vec<Token>> {
        Lexer::with_mode(source, self.config.lexer.mode).tokenize()
    }

    #[instrument(skip_all)]
    pub fn parse(&self, source: &str) -> Result<Program> {
        let tokens = self.tokenize(source)?;
        Parser::with_options(&tokens, self.config.parser_options()).parse()
    }
}
