use super::*;

impl From<ToyErrorKind> for ToyError {
    fn from(value: ToyErrorKind) -> Self {
        Self { kind: Box::new(value) }
    }
}
