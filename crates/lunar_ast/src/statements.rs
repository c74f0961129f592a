//! Statements

use crate::block::Block;
use crate::expr::Expr;
use crate::function::{FunctionBody, FunctionName};
use derive_more::Display;

/// A statement
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    /// The line of the statement's first token
    pub line: usize,
}

impl Stmt {
    pub fn new(kind: StmtKind, line: usize) -> Self {
        Self { kind, line }
    }
}

/// Statement kind
#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    If(IfStatement),
    While(WhileStatement),
    Repeat(RepeatStatement),
    ForNumeric(ForNumericStatement),
    ForGeneric(ForGenericStatement),
    Local(LocalStatement),
    LocalFunction(LocalFunctionStatement),
    Function(FunctionStatement),
    Assignment(AssignmentStatement),
    /// A function or method call evaluated for its effects
    Call(Expr),
    /// A bare expression that is neither an assignment nor a call
    Expression(Expr),
    Break,
}

/// `if cond then ... elseif cond then ... else ... end`
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expr,
    pub then_block: Block,
    pub else_if_clauses: Vec<ElseIfClause>,
    pub else_block: Option<Block>,
}

/// A single `elseif cond then block` arm
#[derive(Debug, Clone, PartialEq)]
pub struct ElseIfClause {
    pub condition: Expr,
    pub block: Block,
}

/// `while cond do body end`
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub condition: Expr,
    pub body: Block,
}

/// `repeat body until cond`
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatStatement {
    pub body: Block,
    pub condition: Expr,
}

/// `for i = start, end [, step] do body end`
#[derive(Debug, Clone, PartialEq)]
pub struct ForNumericStatement {
    pub identifier: String,
    pub start: Expr,
    pub end: Expr,
    /// Absent when not written
    pub step: Option<Expr>,
    pub body: Block,
}

/// `for a, b in explist do body end`
#[derive(Debug, Clone, PartialEq)]
pub struct ForGenericStatement {
    pub identifiers: Vec<String>,
    pub expressions: Vec<Expr>,
    pub body: Block,
}

/// `local a <attr>, b = explist`
#[derive(Debug, Clone, PartialEq)]
pub struct LocalStatement {
    pub variables: Vec<AttribName>,
    pub expressions: Option<Vec<Expr>>,
}

/// A local variable name with its optional `<attribute>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{}", name)]
pub struct AttribName {
    pub name: String,
    pub attribute: Option<String>,
}

impl AttribName {
    pub fn new(name: impl AsRef<str>, attribute: impl Into<Option<String>>) -> Self {
        Self {
            name: name.as_ref().to_string(),
            attribute: attribute.into(),
        }
    }
}

/// `local function name body end`
#[derive(Debug, Clone, PartialEq)]
pub struct LocalFunctionStatement {
    pub identifier: String,
    pub body: FunctionBody,
}

/// `function a.b:c body end`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionStatement {
    pub name: FunctionName,
    pub body: FunctionBody,
}

/// `varlist = explist`. The two lists may differ in length.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStatement {
    pub variables: Vec<Expr>,
    pub expressions: Vec<Expr>,
}
