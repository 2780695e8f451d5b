use super::*;
use std::error::Error;

impl Error for ToyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.kind.source()
    }
}

impl Debug for ToyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.kind, f)
    }
}

impl Display for ToyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.kind, f)
    }
}

impl Display for LexErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LexErrorKind::UnexpectedCharacter => f.write_str("unexpected character"),
            LexErrorKind::UnterminatedString => f.write_str("unterminated string literal"),
            LexErrorKind::InvalidIdentifier => f.write_str("identifier cannot start with a digit"),
            LexErrorKind::IntegerOverflow => f.write_str("integer literal out of range"),
            LexErrorKind::FloatOverflow => f.write_str("float literal out of range"),
        }
    }
}

impl Display for Expected {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Token(kind) => Display::fmt(kind, f),
            Expected::Type => f.write_str("a type (int, float, bool, string)"),
            Expected::Identifier => f.write_str("an identifier"),
            Expected::Expression => f.write_str("an expression"),
            Expected::Statement => f.write_str("a statement (fn, a type, or return)"),
        }
    }
}
