use serde::{Deserialize, Serialize};
use toy_parser::{LexMode, ParserOptions, DEFAULT_MAX_DEPTH};
use toy_types::{Result, ToyError};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendConfig {
    #[serde(default)]
    pub lexer: LexerConfig,
    #[serde(default)]
    pub parser: ParserConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexerConfig {
    #[serde(default)]
    pub mode: LexMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { max_depth: default_max_depth() }
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl FrontendConfig {
    /// Parse TOML text. Missing tables and keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ToyError::config(format!("Failed to parse front-end config: {}", e)))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ToyError::config(format!("Failed to serialize config: {}", e)))
    }

    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions { max_depth: self.parser.max_depth }
    }
}
