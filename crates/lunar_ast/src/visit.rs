//! Read-only traversal of a syntax tree.
//!
//! Every `visit_*` method defaults to the matching `walk_*` function, which visits the node's
//! children in source order. Overriding a method and not calling `walk_*` prunes that subtree.

use crate::block::{Block, Chunk, ReturnStatement};
use crate::expr::{Expr, TableField};
use crate::function::FunctionBody;
use crate::statements::{Stmt, StmtKind};

/// A visitor over a syntax tree
pub trait Visit {
    type Err;

    fn visit_chunk(&mut self, chunk: &Chunk) -> Result<(), Self::Err> {
        walk_chunk(self, chunk)
    }

    fn visit_block(&mut self, block: &Block) -> Result<(), Self::Err> {
        walk_block(self, block)
    }

    fn visit_stmt(&mut self, stmt: &Stmt) -> Result<(), Self::Err> {
        walk_stmt(self, stmt)
    }

    fn visit_return(&mut self, ret: &ReturnStatement) -> Result<(), Self::Err> {
        walk_return(self, ret)
    }

    fn visit_function_body(&mut self, body: &FunctionBody) -> Result<(), Self::Err> {
        walk_function_body(self, body)
    }

    fn visit_expr(&mut self, expr: &Expr) -> Result<(), Self::Err> {
        walk_expr(self, expr)
    }

    fn visit_table_field(&mut self, field: &TableField) -> Result<(), Self::Err> {
        walk_table_field(self, field)
    }
}

pub fn walk_chunk<V: Visit + ?Sized>(visitor: &mut V, chunk: &Chunk) -> Result<(), V::Err> {
    visitor.visit_block(&chunk.block)
}

pub fn walk_block<V: Visit + ?Sized>(visitor: &mut V, block: &Block) -> Result<(), V::Err> {
    for stmt in &block.statements {
        visitor.visit_stmt(stmt)?;
    }
    if let Some(ret) = &block.return_statement {
        visitor.visit_return(ret)?;
    }
    Ok(())
}

pub fn walk_return<V: Visit + ?Sized>(
    visitor: &mut V,
    ret: &ReturnStatement,
) -> Result<(), V::Err> {
    walk_exprs(visitor, &ret.expressions)
}

pub fn walk_stmt<V: Visit + ?Sized>(visitor: &mut V, stmt: &Stmt) -> Result<(), V::Err> {
    match &stmt.kind {
        StmtKind::If(if_stmt) => {
            visitor.visit_expr(&if_stmt.condition)?;
            visitor.visit_block(&if_stmt.then_block)?;
            for clause in &if_stmt.else_if_clauses {
                visitor.visit_expr(&clause.condition)?;
                visitor.visit_block(&clause.block)?;
            }
            if let Some(else_block) = &if_stmt.else_block {
                visitor.visit_block(else_block)?;
            }
        }
        StmtKind::While(while_stmt) => {
            visitor.visit_expr(&while_stmt.condition)?;
            visitor.visit_block(&while_stmt.body)?;
        }
        StmtKind::Repeat(repeat) => {
            visitor.visit_block(&repeat.body)?;
            visitor.visit_expr(&repeat.condition)?;
        }
        StmtKind::ForNumeric(for_stmt) => {
            visitor.visit_expr(&for_stmt.start)?;
            visitor.visit_expr(&for_stmt.end)?;
            if let Some(step) = &for_stmt.step {
                visitor.visit_expr(step)?;
            }
            visitor.visit_block(&for_stmt.body)?;
        }
        StmtKind::ForGeneric(for_stmt) => {
            walk_exprs(visitor, &for_stmt.expressions)?;
            visitor.visit_block(&for_stmt.body)?;
        }
        StmtKind::Local(local) => {
            if let Some(expressions) = &local.expressions {
                walk_exprs(visitor, expressions)?;
            }
        }
        StmtKind::LocalFunction(func) => visitor.visit_function_body(&func.body)?,
        StmtKind::Function(func) => visitor.visit_function_body(&func.body)?,
        StmtKind::Assignment(assignment) => {
            walk_exprs(visitor, &assignment.variables)?;
            walk_exprs(visitor, &assignment.expressions)?;
        }
        StmtKind::Call(expr) | StmtKind::Expression(expr) => visitor.visit_expr(expr)?,
        StmtKind::Break => {}
    }
    Ok(())
}

pub fn walk_function_body<V: Visit + ?Sized>(
    visitor: &mut V,
    body: &FunctionBody,
) -> Result<(), V::Err> {
    visitor.visit_block(&body.block)
}

pub fn walk_expr<V: Visit + ?Sized>(visitor: &mut V, expr: &Expr) -> Result<(), V::Err> {
    match expr {
        Expr::Literal(_) | Expr::Identifier(_) | Expr::VarArgs => Ok(()),
        Expr::Binary(binary) => {
            visitor.visit_expr(&binary.left)?;
            visitor.visit_expr(&binary.right)
        }
        Expr::Unary(unary) => visitor.visit_expr(&unary.right),
        Expr::Index(index) => {
            visitor.visit_expr(&index.table)?;
            visitor.visit_expr(&index.index)
        }
        Expr::Property(property) => visitor.visit_expr(&property.object),
        Expr::Call(call) => {
            visitor.visit_expr(&call.callee)?;
            walk_exprs(visitor, &call.arguments)
        }
        Expr::MethodCall(call) => {
            visitor.visit_expr(&call.receiver)?;
            walk_exprs(visitor, &call.arguments)
        }
        Expr::Grouping(inner) => visitor.visit_expr(inner),
        Expr::Function(body) => visitor.visit_function_body(body),
        Expr::Table(table) => {
            for field in &table.fields {
                visitor.visit_table_field(field)?;
            }
            Ok(())
        }
    }
}

pub fn walk_table_field<V: Visit + ?Sized>(
    visitor: &mut V,
    field: &TableField,
) -> Result<(), V::Err> {
    if let TableField::Computed { key, .. } = field {
        visitor.visit_expr(key)?;
    }
    visitor.visit_expr(field.value())
}

fn walk_exprs<V: Visit + ?Sized>(visitor: &mut V, exprs: &[Expr]) -> Result<(), V::Err> {
    for expr in exprs {
        visitor.visit_expr(expr)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{BinOp, ExprCall, ExprTable};
    use crate::statements::AssignmentStatement;
    use std::convert::Infallible;

    #[derive(Default)]
    struct Identifiers(Vec<String>);

    impl Visit for Identifiers {
        type Err = Infallible;

        fn visit_expr(&mut self, expr: &Expr) -> Result<(), Self::Err> {
            if let Expr::Identifier(name) = expr {
                self.0.push(name.clone());
            }
            walk_expr(self, expr)
        }
    }

    #[test]
    fn test_walk_visits_in_source_order() {
        // x = f(a + b, { [k] = v })
        let call = Expr::Call(ExprCall {
            callee: Box::new(Expr::identifier("f")),
            arguments: vec![
                Expr::binary(Expr::identifier("a"), BinOp::Add, Expr::identifier("b")),
                Expr::Table(ExprTable {
                    fields: vec![TableField::Computed {
                        key: Expr::identifier("k"),
                        value: Expr::identifier("v"),
                    }],
                }),
            ],
        });
        let chunk = Chunk::new(Block::new(
            vec![Stmt::new(
                StmtKind::Assignment(AssignmentStatement {
                    variables: vec![Expr::identifier("x")],
                    expressions: vec![call],
                }),
                1,
            )],
            ReturnStatement::new(vec![Expr::identifier("r")], 2),
        ));

        let mut visitor = Identifiers::default();
        visitor.visit_chunk(&chunk).unwrap();
        assert_eq!(visitor.0, ["x", "f", "a", "b", "k", "v", "r"]);
    }

    #[test]
    fn test_error_stops_walk() {
        struct FailOnBreak;
        impl Visit for FailOnBreak {
            type Err = usize;

            fn visit_stmt(&mut self, stmt: &Stmt) -> Result<(), Self::Err> {
                match stmt.kind {
                    StmtKind::Break => Err(stmt.line),
                    _ => walk_stmt(self, stmt),
                }
            }
        }

        let block = Block::new(
            vec![
                Stmt::new(StmtKind::Expression(Expr::number(1.0)), 1),
                Stmt::new(StmtKind::Break, 2),
                Stmt::new(StmtKind::Break, 3),
            ],
            None,
        );
        assert_eq!(FailOnBreak.visit_block(&block), Err(2));
    }
}
