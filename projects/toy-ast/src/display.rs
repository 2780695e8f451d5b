use crate::*;
use std::fmt::{Display, Formatter, Result, Write};

const INDENT: usize = 2;

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Program")?;
        for item in &self.items {
            write_stmt(f, item, INDENT)?;
        }
        Ok(())
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_stmt(f, self, 0)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_expr(f, self, 0)
    }
}

fn pad(f: &mut Formatter<'_>, indent: usize) -> Result {
    for _ in 0..indent {
        f.write_char(' ')?;
    }
    Ok(())
}

fn write_stmt(f: &mut Formatter<'_>, stmt: &Stmt, indent: usize) -> Result {
    pad(f, indent)?;
    match stmt {
        Stmt::FnDecl(decl) => {
            writeln!(f, "FnDecl {} {}", decl.return_type.kind.name(), decl.name.name)?;
            pad(f, indent + INDENT)?;
            writeln!(f, "Params:")?;
            for param in &decl.params {
                pad(f, indent + 2 * INDENT)?;
                writeln!(f, "{} {}", param.ty.kind.name(), param.name.name)?;
            }
            pad(f, indent + INDENT)?;
            writeln!(f, "Body:")?;
            for stmt in &decl.body {
                write_stmt(f, stmt, indent + 2 * INDENT)?;
            }
            Ok(())
        }
        Stmt::VarDecl(decl) => {
            writeln!(f, "VarDecl {} {} =", decl.ty.kind.name(), decl.name.name)?;
            write_expr(f, &decl.value, indent + INDENT)
        }
        Stmt::Return(ret) => {
            writeln!(f, "Return")?;
            write_expr(f, &ret.value, indent + INDENT)
        }
    }
}

fn write_expr(f: &mut Formatter<'_>, expr: &Expr, indent: usize) -> Result {
    pad(f, indent)?;
    match expr {
        Expr::Binary(bin) => {
            writeln!(f, "BinaryOp {}", bin.op.kind.symbol())?;
            write_expr(f, &bin.left, indent + INDENT)?;
            write_expr(f, &bin.right, indent + INDENT)
        }
        Expr::Variable(ident) => writeln!(f, "Ident {:?}", ident.name),
        Expr::Literal(lit) => match &lit.kind {
            LiteralKind::Int(n) => writeln!(f, "Int {}", n),
            LiteralKind::Float(text) => writeln!(f, "Float {}", text),
            LiteralKind::String(s) => writeln!(f, "String {:?}", s),
            LiteralKind::Boolean(b) => writeln!(f, "Bool {}", b),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_program_tree() {
        let span = Span::default();
        let cond = Expr::Binary(BinaryExpr {
            left: Box::new(Expr::Variable(Ident { name: "x".into(), span })),
            op: BinaryOp { kind: BinaryOpKind::Eq, span },
            right: Box::new(Expr::Literal(LiteralExpr { kind: LiteralKind::Int(40), span })),
            span,
        });
        let func = FnDecl {
            return_type: TypeName { kind: PrimitiveType::Int, span },
            name: Ident { name: "my_fn".into(), span },
            params: vec![Param {
                ty: TypeName { kind: PrimitiveType::Float, span },
                name: Ident { name: "y".into(), span },
                span,
            }],
            body: vec![
                Stmt::VarDecl(VarDecl {
                    ty: TypeName { kind: PrimitiveType::Float, span },
                    name: Ident { name: "half".into(), span },
                    value: Expr::Literal(LiteralExpr { kind: LiteralKind::Float("0.5".into()), span }),
                    span,
                }),
                Stmt::VarDecl(VarDecl {
                    ty: TypeName { kind: PrimitiveType::String, span },
                    name: Ident { name: "s".into(), span },
                    value: Expr::Literal(LiteralExpr { kind: LiteralKind::String("hmm".into()), span }),
                    span,
                }),
                Stmt::VarDecl(VarDecl {
                    ty: TypeName { kind: PrimitiveType::Bool, span },
                    name: Ident { name: "b".into(), span },
                    value: cond,
                    span,
                }),
            ],
            span,
        };
        let program = Program::new(vec![Stmt::FnDecl(func)]);

        let expected = "\
Program
  FnDecl int my_fn
    Params:
      float y
    Body:
      VarDecl float half =
        Float 0.5
      VarDecl string s =
        String \"hmm\"
      VarDecl bool b =
        BinaryOp ==
          Ident \"x\"
          Int 40
";
        assert_eq!(program.to_string(), expected);
    }
}
