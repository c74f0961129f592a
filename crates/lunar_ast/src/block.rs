//! Blocks of statements

use crate::expr::Expr;
use crate::statements::Stmt;

/// The root of a parsed program
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chunk {
    pub block: Block,
}

impl Chunk {
    pub fn new(block: Block) -> Self {
        Self { block }
    }
}

/// An ordered list of statements, optionally ended by a return
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub return_statement: Option<ReturnStatement>,
}

impl Block {
    pub fn new(
        statements: Vec<Stmt>,
        return_statement: impl Into<Option<ReturnStatement>>,
    ) -> Self {
        Self {
            statements,
            return_statement: return_statement.into(),
        }
    }

    /// Gets if this block has neither statements nor a return
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty() && self.return_statement.is_none()
    }
}

/// `return explist`, always the last element of its block
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub expressions: Vec<Expr>,
    pub line: usize,
}

impl ReturnStatement {
    pub fn new(expressions: Vec<Expr>, line: usize) -> Self {
        Self { expressions, line }
    }
}
