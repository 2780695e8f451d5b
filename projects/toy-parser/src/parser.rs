use toy_ast::*;
use toy_types::{Expected, Result, Span, Token, TokenKind, TokenValue, ToyError};
use tracing::{debug, instrument, trace};

/// Default bound on nesting. A right-nested operator chain of `n` operators uses `n`
/// levels, so this is also the longest chain accepted by default.
pub const DEFAULT_MAX_DEPTH: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParserOptions {
    /// Deepest allowed nesting of function bodies and operator chains.
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

/// Recursive-descent parser over a token slice.
///
/// Every decision is taken from the current token alone (LL(1)); the parser never
/// backtracks and stops at the first error.
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    options: ParserOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self::with_options(tokens, ParserOptions::default())
    }

    pub fn with_options(tokens: &'a [Token], options: ParserOptions) -> Self {
        Self { tokens, pos: 0, options, depth: 0 }
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn curr(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.curr().is_some_and(|t| t.kind == kind)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.curr();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind) -> Result<&'a Token> {
        match self.curr() {
            Some(token) if token.kind == kind => {
                self.pos += 1;
                Ok(token)
            }
            _ => Err(self.unexpected(Expected::Token(kind))),
        }
    }

    fn consume(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        }
        else {
            false
        }
    }

    fn unexpected(&self, expected: Expected) -> ToyError {
        ToyError::syntax(expected, self.curr().cloned())
    }

    fn nested<T>(&mut self, span: Span, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.options.max_depth {
            return Err(ToyError::depth_limit(self.options.max_depth, Some(span)));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// `program := statement*`, over whatever tokens the parser has not yet consumed.
    ///
    /// Takes the parser by value: once the program is built there is nothing left to parse.
    #[instrument(skip_all)]
    pub fn parse(mut self) -> Result<Program> {
        let mut items = Vec::new();
        while !self.is_eof() {
            items.push(self.parse_statement()?);
        }
        debug!(items = items.len(), tokens = self.tokens.len(), "parsed program");
        Ok(Program::new(items))
    }

    // --- Statements ---

    pub fn parse_statement(&mut self) -> Result<Stmt> {
        let Some(token) = self.curr() else {
            return Err(self.unexpected(Expected::Statement));
        };
        trace!(%token, "statement");

        match token.kind {
            TokenKind::Function => self.parse_function_declaration().map(Stmt::FnDecl),
            kind if kind.is_type() => self.parse_variable_declaration().map(Stmt::VarDecl),
            TokenKind::Return => self.parse_return_statement().map(Stmt::Return),
            _ => Err(self.unexpected(Expected::Statement)),
        }
    }

    fn parse_function_declaration(&mut self) -> Result<FnDecl> {
        let start_span = self.expect(TokenKind::Function)?.span;
        let return_type = self.parse_type()?;
        let name = self.parse_ident()?;

        self.expect(TokenKind::ParenL)?;
        let params = self.parse_parameter_list()?;
        self.expect(TokenKind::ParenR)?;

        self.expect(TokenKind::BraceL)?;
        let body = self.nested(start_span, |p| p.parse_block())?;
        let end_span = self.expect(TokenKind::BraceR)?.span;

        Ok(FnDecl { return_type, name, params, body, span: start_span.to(end_span) })
    }

    /// `(type identifier ','?)*` up to `)`. A trailing comma is accepted; a missing
    /// comma between two parameters is not.
    fn parse_parameter_list(&mut self) -> Result<Vec<Param>> {
        let mut params = Vec::new();
        while !self.check(TokenKind::ParenR) {
            if self.is_eof() {
                return Err(self.unexpected(Expected::Token(TokenKind::ParenR)));
            }
            let ty = self.parse_type()?;
            let name = self.parse_ident()?;
            let span = ty.span.to(name.span);
            params.push(Param { ty, name, span });

            if !self.consume(TokenKind::Comma) && !self.check(TokenKind::ParenR) {
                return Err(self.unexpected(Expected::Token(TokenKind::ParenR)));
            }
        }
        Ok(params)
    }

    /// Statements up to, not including, the closing `}`. Running out of tokens is a
    /// missing `}`; any other stray token is reported by statement dispatch.
    fn parse_block(&mut self) -> Result<Vec<Stmt>> {
        let mut body = Vec::new();
        while !self.check(TokenKind::BraceR) {
            if self.is_eof() {
                return Err(self.unexpected(Expected::Token(TokenKind::BraceR)));
            }
            body.push(self.parse_statement()?);
        }
        Ok(body)
    }

    fn parse_variable_declaration(&mut self) -> Result<VarDecl> {
        let ty = self.parse_type()?;
        let name = self.parse_ident()?;
        self.expect(TokenKind::AssignOp)?;
        let value = self.parse_expression()?;
        let end_span = self.expect(TokenKind::Semicolon)?.span;

        Ok(VarDecl { span: ty.span.to(end_span), ty, name, value })
    }

    fn parse_return_statement(&mut self) -> Result<ReturnStmt> {
        let start_span = self.expect(TokenKind::Return)?.span;
        let value = self.parse_expression()?;
        let end_span = self.expect(TokenKind::Semicolon)?.span;

        Ok(ReturnStmt { value, span: start_span.to(end_span) })
    }

    // --- Types ---

    pub fn parse_type(&mut self) -> Result<TypeName> {
        let kind = match self.curr().map(|t| t.kind) {
            Some(TokenKind::Int) => PrimitiveType::Int,
            Some(TokenKind::Float) => PrimitiveType::Float,
            Some(TokenKind::Bool) => PrimitiveType::Bool,
            Some(TokenKind::String) => PrimitiveType::String,
            _ => return Err(self.unexpected(Expected::Type)),
        };
        let span = self.advance().map(|t| t.span).unwrap_or_default();
        Ok(TypeName { kind, span })
    }

    fn parse_ident(&mut self) -> Result<Ident> {
        match self.curr() {
            Some(Token { kind: TokenKind::Identifier, value: TokenValue::Ident(name), span }) => {
                self.pos += 1;
                Ok(Ident { name: name.clone(), span: *span })
            }
            _ => Err(self.unexpected(Expected::Identifier)),
        }
    }

    // --- Expressions ---

    /// `expression := primary (binary_op expression)?`
    ///
    /// There are no precedence levels: the right operand is always a full
    /// expression, so `2 * 3 + 4` parses as `2 * (3 + 4)` and `a - b - c` as
    /// `a - (b - c)`.
    pub fn parse_expression(&mut self) -> Result<Expr> {
        let left = self.parse_primary()?;
        let Some(op) = self.parse_binary_op() else {
            return Ok(left);
        };
        let right = self.nested(op.span, |p| p.parse_expression())?;
        let span = left.span().to(right.span());

        Ok(Expr::Binary(BinaryExpr { left: Box::new(left), op, right: Box::new(right), span }))
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let Some(token) = self.curr() else {
            return Err(self.unexpected(Expected::Expression));
        };
        let span = token.span;

        let expr = match (token.kind, &token.value) {
            (TokenKind::Identifier, TokenValue::Ident(name)) => Expr::Variable(Ident { name: name.clone(), span }),
            (TokenKind::IntLit, TokenValue::Int(n)) => Expr::Literal(LiteralExpr { kind: LiteralKind::Int(*n), span }),
            (TokenKind::FloatLit, TokenValue::Float(text)) => {
                Expr::Literal(LiteralExpr { kind: LiteralKind::Float(text.clone()), span })
            }
            (TokenKind::StringLit, TokenValue::Str(s)) => {
                Expr::Literal(LiteralExpr { kind: LiteralKind::String(s.clone()), span })
            }
            (TokenKind::BoolLit, TokenValue::Bool(b)) => Expr::Literal(LiteralExpr { kind: LiteralKind::Boolean(*b), span }),
            _ => return Err(self.unexpected(Expected::Expression)),
        };
        self.pos += 1;
        Ok(expr)
    }

    fn parse_binary_op(&mut self) -> Option<BinaryOp> {
        let token = self.curr()?;
        let kind = match token.kind {
            TokenKind::Plus => BinaryOpKind::Add,
            TokenKind::Minus => BinaryOpKind::Sub,
            TokenKind::Star => BinaryOpKind::Mul,
            TokenKind::Slash => BinaryOpKind::Div,
            TokenKind::EqualsOp => BinaryOpKind::Eq,
            _ => return None,
        };
        self.pos += 1;
        Some(BinaryOp { kind, span: token.span })
    }
}
