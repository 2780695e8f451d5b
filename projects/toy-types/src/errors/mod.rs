use crate::{Span, Token, TokenKind};
use std::fmt::{Debug, Display, Formatter};

mod convert;
mod display;

/// The result type of this crate.
pub type Result<T> = std::result::Result<T, ToyError>;

/// A boxed error kind, wrapping an [ToyErrorKind].
#[derive(Clone, PartialEq, Eq)]
pub struct ToyError {
    kind: Box<ToyErrorKind>,
}

/// The kind of [ToyError].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToyErrorKind {
    /// No token pattern matched, or a literal was malformed.
    #[error("Lexical error at {span}: {kind}: {text:?}")]
    Lexical {
        kind: LexErrorKind,
        text: String,
        span: Span,
    },

    /// The current token does not fit the grammar. `found` is `None` at end of input.
    #[error("Syntax error: expected {expected}, found {}", describe_found(.found))]
    Syntax {
        expected: Expected,
        found: Option<Token>,
    },

    /// Nesting exceeded the configured parser depth. The input may still be well formed.
    #[error("Parser limit exceeded: nesting deeper than max_depth = {limit}{}", describe_span(.span))]
    DepthLimit {
        limit: usize,
        span: Option<Span>,
    },

    #[error("Config error: {message}")]
    Config {
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LexErrorKind {
    UnexpectedCharacter,
    UnterminatedString,
    /// An identifier-like word that starts with a digit, e.g. `1abc`.
    InvalidIdentifier,
    IntegerOverflow,
    /// A float literal too large to be finite.
    FloatOverflow,
}

/// What the parser was looking for when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expected {
    Token(TokenKind),
    Type,
    Identifier,
    Expression,
    Statement,
}

impl ToyError {
    pub fn new(kind: ToyErrorKind) -> Self {
        Self { kind: Box::new(kind) }
    }

    pub fn kind(&self) -> &ToyErrorKind {
        &self.kind
    }

    pub fn into_kind(self) -> ToyErrorKind {
        *self.kind
    }

    pub fn lexical(kind: LexErrorKind, text: impl Into<String>, span: Span) -> Self {
        Self::new(ToyErrorKind::Lexical { kind, text: text.into(), span })
    }

    pub fn syntax(expected: Expected, found: Option<Token>) -> Self {
        Self::new(ToyErrorKind::Syntax { expected, found })
    }

    pub fn depth_limit(limit: usize, span: Option<Span>) -> Self {
        Self::new(ToyErrorKind::DepthLimit { limit, span })
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ToyErrorKind::Config { message: message.into() })
    }

    pub fn is_lexical(&self) -> bool {
        matches!(*self.kind, ToyErrorKind::Lexical { .. })
    }

    pub fn is_syntax(&self) -> bool {
        matches!(*self.kind, ToyErrorKind::Syntax { .. })
    }

    /// Source location of the offending input, if there is one.
    pub fn span(&self) -> Option<Span> {
        match &*self.kind {
            ToyErrorKind::Lexical { span, .. } => Some(*span),
            ToyErrorKind::Syntax { found, .. } => found.as_ref().map(|t| t.span),
            ToyErrorKind::DepthLimit { span, .. } => *span,
            ToyErrorKind::Config { .. } => None,
        }
    }
}

fn describe_found(found: &Option<Token>) -> String {
    match found {
        Some(token) => format!("{} at {}", token, token.span),
        None => "end of input".to_string(),
    }
}

fn describe_span(span: &Option<Span>) -> String {
    match span {
        Some(span) => format!(" at {}", span),
        None => String::new(),
    }
}
