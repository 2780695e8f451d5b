//! Uniform, kind-tagged view over the typed tree.
//!
//! Consumers that only need to walk the tree (dumpers, linters, counters) can
//! use [`NodeRef::children`] or [`NodeRef::walk`] instead of matching every
//! statement and expression type by hand. The typed structs stay the source of
//! truth; a `NodeRef` only borrows them.

use crate::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    FnDecl,
    VarDecl,
    ReturnStmt,
    Param,
    BinaryOp,
    Identifier,
    StringLiteral,
    IntLiteral,
    FloatLiteral,
    BoolLiteral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'a> {
    FnDecl(&'a FnDecl),
    VarDecl(&'a VarDecl),
    Return(&'a ReturnStmt),
    Param(&'a Param),
    Binary(&'a BinaryExpr),
    Variable(&'a Ident),
    Literal(&'a LiteralExpr),
}

impl<'a> NodeRef<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::FnDecl(_) => NodeKind::FnDecl,
            NodeRef::VarDecl(_) => NodeKind::VarDecl,
            NodeRef::Return(_) => NodeKind::ReturnStmt,
            NodeRef::Param(_) => NodeKind::Param,
            NodeRef::Binary(_) => NodeKind::BinaryOp,
            NodeRef::Variable(_) => NodeKind::Identifier,
            NodeRef::Literal(lit) => match lit.kind {
                LiteralKind::Int(_) => NodeKind::IntLiteral,
                LiteralKind::Float(_) => NodeKind::FloatLiteral,
                LiteralKind::String(_) => NodeKind::StringLiteral,
                LiteralKind::Boolean(_) => NodeKind::BoolLiteral,
            },
        }
    }

    /// Owned child nodes in source order.
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        match *self {
            NodeRef::FnDecl(decl) => decl
                .params
                .iter()
                .map(NodeRef::Param)
                .chain(decl.body.iter().map(NodeRef::from))
                .collect(),
            NodeRef::VarDecl(decl) => vec![NodeRef::from(&decl.value)],
            NodeRef::Return(ret) => vec![NodeRef::from(&ret.value)],
            NodeRef::Binary(bin) => vec![NodeRef::from(&*bin.left), NodeRef::from(&*bin.right)],
            NodeRef::Param(_) | NodeRef::Variable(_) | NodeRef::Literal(_) => Vec::new(),
        }
    }

    /// Pre-order traversal starting at (and including) this node.
    pub fn walk(&self) -> Walk<'a> {
        Walk { stack: vec![*self] }
    }
}

impl AstNode for NodeRef<'_> {
    fn span(&self) -> Span {
        match self {
            NodeRef::FnDecl(n) => n.span,
            NodeRef::VarDecl(n) => n.span,
            NodeRef::Return(n) => n.span,
            NodeRef::Param(n) => n.span,
            NodeRef::Binary(n) => n.span,
            NodeRef::Variable(n) => n.span,
            NodeRef::Literal(n) => n.span,
        }
    }
}

impl<'a> From<&'a Stmt> for NodeRef<'a> {
    fn from(stmt: &'a Stmt) -> Self {
        match stmt {
            Stmt::FnDecl(s) => NodeRef::FnDecl(s),
            Stmt::VarDecl(s) => NodeRef::VarDecl(s),
            Stmt::Return(s) => NodeRef::Return(s),
        }
    }
}

impl<'a> From<&'a Expr> for NodeRef<'a> {
    fn from(expr: &'a Expr) -> Self {
        match expr {
            Expr::Binary(e) => NodeRef::Binary(e),
            Expr::Variable(e) => NodeRef::Variable(e),
            Expr::Literal(e) => NodeRef::Literal(e),
        }
    }
}

pub struct Walk<'a> {
    stack: Vec<NodeRef<'a>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().into_iter().rev());
        Some(node)
    }
}
