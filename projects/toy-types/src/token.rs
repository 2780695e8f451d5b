use crate::Span;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    // Keywords
    Function, // fn
    Int,      // int
    Float,    // float
    Bool,     // bool
    String,   // string
    Return,   // return

    Identifier,

    // Operators
    AssignOp, // =
    EqualsOp, // ==
    Plus,     // +
    Minus,    // -
    Star,     // *
    Slash,    // /

    // Punctuation
    Comma,     // ,
    Semicolon, // ;
    ParenL,    // (
    ParenR,    // )
    BraceL,    // {
    BraceR,    // }

    // Literals
    StringLit,
    IntLit,
    FloatLit,
    BoolLit,

    /// Invalid lexeme, only produced by the permissive lexer.
    Error,
}

impl TokenKind {
    /// Canonical upper-case name, as used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Function => "FUNCTION",
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
            TokenKind::Bool => "BOOL",
            TokenKind::String => "STRING",
            TokenKind::Return => "RETURN",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::AssignOp => "ASSIGNOP",
            TokenKind::EqualsOp => "EQUALSOP",
            TokenKind::Plus => "ADDOP",
            TokenKind::Minus => "SUBOP",
            TokenKind::Star => "MULOP",
            TokenKind::Slash => "DIVOP",
            TokenKind::Comma => "COMMA",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::ParenL => "PARENL",
            TokenKind::ParenR => "PARENR",
            TokenKind::BraceL => "BRACEL",
            TokenKind::BraceR => "BRACER",
            TokenKind::StringLit => "STRINGLIT",
            TokenKind::IntLit => "INTLIT",
            TokenKind::FloatLit => "FLOATLIT",
            TokenKind::BoolLit => "BOOLLIT",
            TokenKind::Error => "ERROR",
        }
    }

    /// Fixed source spelling of keywords, operators and punctuation.
    pub fn spelling(&self) -> Option<&'static str> {
        let text = match self {
            TokenKind::Function => "fn",
            TokenKind::Int => "int",
            TokenKind::Float => "float",
            TokenKind::Bool => "bool",
            TokenKind::String => "string",
            TokenKind::Return => "return",
            TokenKind::AssignOp => "=",
            TokenKind::EqualsOp => "==",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::ParenL => "(",
            TokenKind::ParenR => ")",
            TokenKind::BraceL => "{",
            TokenKind::BraceR => "}",
            TokenKind::Identifier
            | TokenKind::StringLit
            | TokenKind::IntLit
            | TokenKind::FloatLit
            | TokenKind::BoolLit
            | TokenKind::Error => return None,
        };
        Some(text)
    }

    /// Reserved word lookup. `true` and `false` are literals and are not listed here.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        match word {
            "fn" => Some(TokenKind::Function),
            "int" => Some(TokenKind::Int),
            "float" => Some(TokenKind::Float),
            "bool" => Some(TokenKind::Bool),
            "string" => Some(TokenKind::String),
            "return" => Some(TokenKind::Return),
            _ => None,
        }
    }

    pub fn is_type(&self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Float | TokenKind::Bool | TokenKind::String)
    }

    pub fn is_binary_op(&self) -> bool {
        matches!(
            self,
            TokenKind::Plus | TokenKind::Minus | TokenKind::Star | TokenKind::Slash | TokenKind::EqualsOp
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded payload of a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenValue {
    None,
    Ident(String),
    /// String literal contents without the surrounding quotes. Escapes are kept as written.
    Str(String),
    Int(i64),
    /// Float literal as written (`digits.digits`), already checked to be finite.
    /// Kept as text so tokens stay `Eq`; see [`TokenValue::as_f64`].
    Float(String),
    Bool(bool),
    /// Offending source text of an `Error` token.
    Invalid(String),
}

impl TokenValue {
    /// Numeric value of an `Int` or `Float` payload.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TokenValue::Int(n) => Some(*n as f64),
            TokenValue::Float(text) => text.parse().ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, value: TokenValue, span: Span) -> Self {
        Self { kind, value, span }
    }

    /// A token without payload: keywords, operators and punctuation.
    pub fn simple(kind: TokenKind, span: Span) -> Self {
        Self::new(kind, TokenValue::None, span)
    }

    /// Source-equivalent text for this token.
    pub fn lexeme(&self) -> String {
        match &self.value {
            TokenValue::Ident(name) => name.clone(),
            TokenValue::Str(text) => format!("\"{}\"", text),
            TokenValue::Int(n) => n.to_string(),
            TokenValue::Float(text) => text.clone(),
            TokenValue::Bool(b) => b.to_string(),
            TokenValue::Invalid(text) => text.clone(),
            TokenValue::None => self.kind.spelling().unwrap_or_default().to_string(),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            TokenValue::None => write!(f, "{}", self.kind),
            TokenValue::Ident(name) => write!(f, "{}({})", self.kind, name),
            TokenValue::Str(text) => write!(f, "{}({:?})", self.kind, text),
            TokenValue::Int(n) => write!(f, "{}({})", self.kind, n),
            TokenValue::Float(text) => write!(f, "{}({})", self.kind, text),
            TokenValue::Bool(b) => write!(f, "{}({})", self.kind, b),
            TokenValue::Invalid(text) => write!(f, "{}({:?})", self.kind, text),
        }
    }
}
