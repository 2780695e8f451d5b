use std::iter::{FusedIterator, Peekable};
use std::str::Chars;
use toy_types::{LexErrorKind, Result, Span, Token, TokenKind, TokenValue, ToyError};
use tracing::{debug, instrument, warn};

/// What the lexer does with input that matches no token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "lowercase"))]
pub enum LexMode {
    /// Stop at the first invalid lexeme with a lexical error.
    #[default]
    Strict,
    /// Emit an [`TokenKind::Error`] token for the invalid lexeme and keep going.
    Permissive,
}

pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<Chars<'a>>,
    cursor: usize,
    mode: LexMode,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_mode(source, LexMode::Strict)
    }

    pub fn with_mode(source: &'a str, mode: LexMode) -> Self {
        Self {
            source,
            chars: source.chars().peekable(),
            cursor: 0,
            mode,
            finished: false,
        }
    }

    pub fn mode(&self) -> LexMode {
        self.mode
    }

    /// Lex the whole input. In strict mode the first lexical error aborts.
    #[instrument(skip_all)]
    pub fn tokenize(self) -> Result<Vec<Token>> {
        let mode = self.mode;
        let tokens = self.collect::<Result<Vec<_>>>()?;
        debug!(?mode, count = tokens.len(), "tokenized");
        Ok(tokens)
    }

    /// Next token, `None` once the input is exhausted or a strict-mode error was returned.
    pub fn next_token(&mut self) -> Option<Result<Token>> {
        if self.finished {
            return None;
        }
        self.consume_while(|c| c.is_whitespace());

        let start = self.cursor;
        let Some(c) = self.advance() else {
            self.finished = true;
            return None;
        };

        let scanned = match c {
            c if is_ident_start(c) => Ok(self.word(start)),
            c if c.is_ascii_digit() => self.number(start),
            '"' => self.string(start),

            '=' if self.peek() == Some('=') => {
                self.advance();
                Ok(self.simple(TokenKind::EqualsOp, start))
            }
            '=' => Ok(self.simple(TokenKind::AssignOp, start)),

            '+' => Ok(self.simple(TokenKind::Plus, start)),
            '-' => Ok(self.simple(TokenKind::Minus, start)),
            '*' => Ok(self.simple(TokenKind::Star, start)),
            '/' => Ok(self.simple(TokenKind::Slash, start)),
            ',' => Ok(self.simple(TokenKind::Comma, start)),
            ';' => Ok(self.simple(TokenKind::Semicolon, start)),
            '(' => Ok(self.simple(TokenKind::ParenL, start)),
            ')' => Ok(self.simple(TokenKind::ParenR, start)),
            '{' => Ok(self.simple(TokenKind::BraceL, start)),
            '}' => Ok(self.simple(TokenKind::BraceR, start)),

            _ => Err(LexErrorKind::UnexpectedCharacter),
        };

        Some(match scanned {
            Ok(token) => Ok(token),
            Err(kind) => self.reject(kind, start),
        })
    }

    fn simple(&self, kind: TokenKind, start: usize) -> Token {
        Token::simple(kind, Span::new(start, self.cursor))
    }

    /// Identifier, keyword or boolean literal. Reserved spellings always win.
    fn word(&mut self, start: usize) -> Token {
        self.consume_while(is_ident_continue);
        let span = Span::new(start, self.cursor);
        let text = &self.source[start..self.cursor];
        match text {
            "true" => Token::new(TokenKind::BoolLit, TokenValue::Bool(true), span),
            "false" => Token::new(TokenKind::BoolLit, TokenValue::Bool(false), span),
            _ => match TokenKind::keyword(text) {
                Some(kind) => Token::simple(kind, span),
                None => Token::new(TokenKind::Identifier, TokenValue::Ident(text.to_string()), span),
            },
        }
    }

    /// `digits` or `digits.digits`. A `.` not followed by a digit is left for the next token.
    fn number(&mut self, start: usize) -> std::result::Result<Token, LexErrorKind> {
        self.consume_while(|c| c.is_ascii_digit());
        let fraction = self.peek() == Some('.')
            && self.source[self.cursor + 1..].starts_with(|c: char| c.is_ascii_digit());
        if fraction {
            self.advance();
            self.consume_while(|c| c.is_ascii_digit());
        }
        if self.peek().is_some_and(is_ident_continue) {
            self.consume_while(is_ident_continue);
            return Err(LexErrorKind::InvalidIdentifier);
        }

        let text = &self.source[start..self.cursor];
        let span = Span::new(start, self.cursor);
        if fraction {
            match text.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(Token::new(TokenKind::FloatLit, TokenValue::Float(text.to_string()), span)),
                _ => Err(LexErrorKind::FloatOverflow),
            }
        }
        else {
            let value = text.parse::<i64>().map_err(|_| LexErrorKind::IntegerOverflow)?;
            Ok(Token::new(TokenKind::IntLit, TokenValue::Int(value), span))
        }
    }

    /// The opening quote is already consumed. A backslash and the character after it
    /// are taken as one unit; the payload keeps them as written.
    fn string(&mut self, start: usize) -> std::result::Result<Token, LexErrorKind> {
        loop {
            match self.advance() {
                Some('"') => break,
                Some('\\') => {
                    if self.advance().is_none() {
                        return Err(LexErrorKind::UnterminatedString);
                    }
                }
                Some(_) => {}
                None => return Err(LexErrorKind::UnterminatedString),
            }
        }
        let inner = &self.source[start + 1..self.cursor - 1];
        Ok(Token::new(TokenKind::StringLit, TokenValue::Str(inner.to_string()), Span::new(start, self.cursor)))
    }

    fn reject(&mut self, kind: LexErrorKind, start: usize) -> Result<Token> {
        let span = Span::new(start, self.cursor);
        let text = &self.source[start..self.cursor];
        match self.mode {
            LexMode::Strict => {
                self.finished = true;
                Err(ToyError::lexical(kind, text, span))
            }
            LexMode::Permissive => {
                warn!(%span, %kind, text, "skipping invalid lexeme");
                Ok(Token::new(TokenKind::Error, TokenValue::Invalid(text.to_string()), span))
            }
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next();
        if let Some(c) = c {
            self.cursor += c.len_utf8();
        }
        c
    }

    fn consume_while<F>(&mut self, mut f: F)
    where
        F: FnMut(char) -> bool,
    {
        while let Some(c) = self.peek() {
            if f(c) {
                self.advance();
            }
            else {
                break;
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

impl FusedIterator for Lexer<'_> {}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Strict tokenization of `source`.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    Lexer::new(source).tokenize()
}

pub fn tokenize_with(source: &str, mode: LexMode) -> Result<Vec<Token>> {
    Lexer::with_mode(source, mode).tokenize()
}

/// Render tokens back to source text, one space between tokens.
///
/// Re-tokenizing the output yields the same kinds and payloads; spans differ.
pub fn unlex(tokens: &[Token]) -> String {
    tokens.iter().map(Token::lexeme).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use toy_types::ToyErrorKind;
    use TokenKind as T;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    fn lex_error(source: &str) -> (LexErrorKind, String, Span) {
        match tokenize(source).unwrap_err().into_kind() {
            ToyErrorKind::Lexical { kind, text, span } => (kind, text, span),
            other => panic!("expected lexical error, got {:?}", other),
        }
    }

    #[test]
    fn single_char_tokens_and_whitespace() {
        let tokens = tokenize("{ };(\t)\n=,+-*/").unwrap();
        let cases: &[(T, usize, usize)] = &[
            (T::BraceL, 0, 1),
            (T::BraceR, 2, 3),
            (T::Semicolon, 3, 4),
            (T::ParenL, 4, 5),
            (T::ParenR, 6, 7),
            (T::AssignOp, 8, 9),
            (T::Comma, 9, 10),
            (T::Plus, 10, 11),
            (T::Minus, 11, 12),
            (T::Star, 12, 13),
            (T::Slash, 13, 14),
        ];
        assert_eq!(tokens.len(), cases.len());
        for (token, (kind, start, end)) in tokens.iter().zip(cases) {
            assert_eq!(token.kind, *kind);
            assert_eq!(token.span, Span::new(*start, *end));
            assert_eq!(token.value, TokenValue::None);
        }
    }

    #[test]
    fn equals_and_assign() {
        assert_eq!(kinds("= == ==="), vec![T::AssignOp, T::EqualsOp, T::EqualsOp, T::AssignOp]);
        assert_eq!(kinds("x==40"), vec![T::Identifier, T::EqualsOp, T::IntLit]);
    }

    #[test]
    fn keywords_shadow_identifiers() {
        assert_eq!(
            kinds("fn int float bool string return"),
            vec![T::Function, T::Int, T::Float, T::Bool, T::String, T::Return]
        );
        let tokens = tokenize("integer fnord _int returns").unwrap();
        let names: Vec<_> = tokens.iter().map(|t| t.value.clone()).collect();
        assert_eq!(
            names,
            vec![
                TokenValue::Ident("integer".into()),
                TokenValue::Ident("fnord".into()),
                TokenValue::Ident("_int".into()),
                TokenValue::Ident("returns".into()),
            ]
        );
    }

    #[test]
    fn bool_literals() {
        let tokens = tokenize("true false truthy").unwrap();
        assert_eq!(tokens[0].kind, T::BoolLit);
        assert_eq!(tokens[0].value, TokenValue::Bool(true));
        assert_eq!(tokens[1].value, TokenValue::Bool(false));
        assert_eq!(tokens[2].kind, T::Identifier);
    }

    #[test]
    fn string_literals_keep_escapes() {
        let tokens = tokenize(r#""hmm" "say \"hi\"" "a\\" """#).unwrap();
        let values: Vec<_> = tokens.iter().map(|t| t.value.clone()).collect();
        assert_eq!(
            values,
            vec![
                TokenValue::Str("hmm".into()),
                TokenValue::Str(r#"say \"hi\""#.into()),
                TokenValue::Str(r"a\\".into()),
                TokenValue::Str(String::new()),
            ]
        );
        assert_eq!(tokens[0].span, Span::new(0, 5));
    }

    #[test]
    fn int_literals() {
        let tokens = tokenize("0 42 007").unwrap();
        let values: Vec<_> = tokens.iter().map(|t| t.value.clone()).collect();
        assert_eq!(values, vec![TokenValue::Int(0), TokenValue::Int(42), TokenValue::Int(7)]);
    }

    #[test]
    fn float_literals() {
        let tokens = tokenize("float y = 3.14; 0.5 007.250").unwrap();
        assert_eq!(tokens[3].kind, T::FloatLit);
        assert_eq!(tokens[3].value, TokenValue::Float("3.14".into()));
        assert_eq!(tokens[3].span, Span::new(10, 14));
        assert_eq!(tokens[5].value.as_f64(), Some(0.5));
        assert_eq!(tokens[6].value, TokenValue::Float("007.250".into()));

        // Without a digit after it the dot is not part of the number.
        assert_eq!(lex_error("int x = 1.;"), (LexErrorKind::UnexpectedCharacter, ".".into(), Span::new(9, 10)));
        assert_eq!(lex_error("1.5.2").1, ".");
        assert_eq!(lex_error("x = .5;").1, ".");
        assert_eq!(lex_error("1.5e3"), (LexErrorKind::InvalidIdentifier, "1.5e3".into(), Span::new(0, 5)));

        let huge = format!("{}.0", "9".repeat(400));
        assert_eq!(lex_error(&huge).0, LexErrorKind::FloatOverflow);
    }

    #[test]
    fn strict_errors() {
        assert_eq!(lex_error("int 1abc = 5;"), (LexErrorKind::InvalidIdentifier, "1abc".into(), Span::new(4, 8)));
        assert_eq!(lex_error("string s = \"oops"), (LexErrorKind::UnterminatedString, "\"oops".into(), Span::new(11, 16)));
        assert_eq!(lex_error("\"trailing\\"), (LexErrorKind::UnterminatedString, "\"trailing\\".into(), Span::new(0, 10)));
        assert_eq!(lex_error("x @ y"), (LexErrorKind::UnexpectedCharacter, "@".into(), Span::new(2, 3)));
        assert_eq!(lex_error("99999999999999999999").0, LexErrorKind::IntegerOverflow);
    }

    #[test]
    fn strict_lexer_stops_after_error() {
        let mut lexer = Lexer::new("a # b");
        assert!(lexer.next().unwrap().is_ok());
        assert!(lexer.next().unwrap().is_err());
        assert!(lexer.next().is_none());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn permissive_mode_flags_and_continues() {
        let tokens = tokenize_with("int 1abc = é 5; \"open", LexMode::Permissive).unwrap();
        let pairs: Vec<_> = tokens.iter().map(|t| (t.kind, t.value.clone())).collect();
        assert_eq!(
            pairs,
            vec![
                (T::Int, TokenValue::None),
                (T::Error, TokenValue::Invalid("1abc".into())),
                (T::AssignOp, TokenValue::None),
                (T::Error, TokenValue::Invalid("é".into())),
                (T::IntLit, TokenValue::Int(5)),
                (T::Semicolon, TokenValue::None),
                (T::Error, TokenValue::Invalid("\"open".into())),
            ]
        );
        assert_eq!(tokens[3].span, Span::new(11, 13));
    }

    #[test]
    fn permissive_mode_flags_overflowing_int() {
        let tokens = tokenize_with("int x = 99999999999999999999;", LexMode::Permissive).unwrap();
        let pairs: Vec<_> = tokens.iter().map(|t| (t.kind, t.value.clone())).collect();
        assert_eq!(
            pairs,
            vec![
                (T::Int, TokenValue::None),
                (T::Identifier, TokenValue::Ident("x".into())),
                (T::AssignOp, TokenValue::None),
                (T::Error, TokenValue::Invalid("99999999999999999999".into())),
                (T::Semicolon, TokenValue::None),
            ]
        );
        assert_eq!(tokens[3].span, Span::new(8, 28));
    }

    #[test]
    fn empty_and_blank_input() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize(" \n\t ").unwrap().is_empty());
    }

    #[test]
    fn unlex_round_trip() {
        let source = "fn int f(int x) { string s = \"a \\\" b\"; bool b = false; float f = 2.50; return x + 12; }";
        let tokens = tokenize(source).unwrap();
        let again = tokenize(&unlex(&tokens)).unwrap();
        let strip = |ts: &[Token]| ts.iter().map(|t| (t.kind, t.value.clone())).collect::<Vec<_>>();
        assert_eq!(strip(&tokens), strip(&again));
    }
}
