//! Expressions

use crate::function::FunctionBody;
use lunar_tokens::token::Literal;
use std::fmt::{Display, Formatter};
use strum::AsRefStr;

/// An expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Identifier(String),
    /// `...`
    VarArgs,
    Binary(ExprBinary),
    Unary(ExprUnary),
    Index(ExprIndex),
    Property(ExprProperty),
    Call(ExprCall),
    MethodCall(ExprMethodCall),
    /// A parenthesized expression
    Grouping(Box<Expr>),
    /// An anonymous `function (...) ... end`
    Function(FunctionBody),
    Table(ExprTable),
}

impl Expr {
    pub fn number(value: f64) -> Self {
        Expr::Literal(Literal::Number(value))
    }

    pub fn string(value: impl AsRef<str>) -> Self {
        Expr::Literal(Literal::String(value.as_ref().to_string()))
    }

    pub fn identifier(name: impl AsRef<str>) -> Self {
        Expr::Identifier(name.as_ref().to_string())
    }

    pub fn binary(left: Expr, op: BinOp, right: Expr) -> Self {
        Expr::Binary(ExprBinary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    pub fn unary(op: UnaryOp, right: Expr) -> Self {
        Expr::Unary(ExprUnary {
            op,
            right: Box::new(right),
        })
    }

    pub fn grouping(inner: Expr) -> Self {
        Expr::Grouping(Box::new(inner))
    }

    /// Gets whether this expression may appear on the left of an assignment
    pub fn is_lvalue(&self) -> bool {
        matches!(
            self,
            Expr::Identifier(_) | Expr::Index(_) | Expr::Property(_)
        )
    }

    /// Gets whether this expression is a function or method call
    pub fn is_call(&self) -> bool {
        matches!(self, Expr::Call(_) | Expr::MethodCall(_))
    }
}

/// `left op right`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprBinary {
    pub left: Box<Expr>,
    pub op: BinOp,
    pub right: Box<Expr>,
}

/// `op right`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprUnary {
    pub op: UnaryOp,
    pub right: Box<Expr>,
}

/// `table[index]`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprIndex {
    pub table: Box<Expr>,
    pub index: Box<Expr>,
}

/// `object.property`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprProperty {
    pub object: Box<Expr>,
    pub property: String,
}

/// `callee(arguments)`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprCall {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
}

/// `receiver:method(arguments)`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprMethodCall {
    pub receiver: Box<Expr>,
    pub method: String,
    pub arguments: Vec<Expr>,
}

/// A table constructor, `{ ... }`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExprTable {
    pub fields: Vec<TableField>,
}

/// A single entry in a table constructor
#[derive(Debug, Clone, PartialEq)]
pub enum TableField {
    /// `[key] = value`
    Computed { key: Expr, value: Expr },
    /// `name = value`
    Named { name: String, value: Expr },
    /// A positional `value`
    Value(Expr),
}

impl TableField {
    pub fn value(&self) -> &Expr {
        match self {
            TableField::Computed { value, .. } => value,
            TableField::Named { value, .. } => value,
            TableField::Value(value) => value,
        }
    }
}

/// A binary operator
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AsRefStr)]
pub enum BinOp {
    #[strum(serialize = "or")]
    Or,
    #[strum(serialize = "and")]
    And,
    #[strum(serialize = "==")]
    Eq,
    #[strum(serialize = "~=")]
    NotEq,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = "<=")]
    Lte,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = ">=")]
    Gte,
    #[strum(serialize = "|")]
    BitOr,
    #[strum(serialize = "~")]
    BitXor,
    #[strum(serialize = "&")]
    BitAnd,
    #[strum(serialize = "<<")]
    Shl,
    #[strum(serialize = ">>")]
    Shr,
    #[strum(serialize = "..")]
    Concat,
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "//")]
    FloorDiv,
    #[strum(serialize = "%")]
    Mod,
    #[strum(serialize = "^")]
    Pow,
}

impl Display for BinOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_ref())
    }
}

/// A prefix operator
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AsRefStr)]
pub enum UnaryOp {
    #[strum(serialize = "-")]
    Neg,
    #[strum(serialize = "not")]
    Not,
    #[strum(serialize = "#")]
    Len,
    #[strum(serialize = "~")]
    BitNot,
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_spelling() {
        assert_eq!(BinOp::NotEq.to_string(), "~=");
        assert_eq!(BinOp::FloorDiv.to_string(), "//");
        assert_eq!(BinOp::Concat.to_string(), "..");
        assert_eq!(UnaryOp::Not.to_string(), "not");
        assert_eq!(UnaryOp::Len.to_string(), "#");
    }

    #[test]
    fn test_lvalues() {
        assert!(Expr::identifier("x").is_lvalue());
        let index = Expr::Index(ExprIndex {
            table: Box::new(Expr::identifier("x")),
            index: Box::new(Expr::number(1.0)),
        });
        assert!(index.is_lvalue());
        let call = Expr::Call(ExprCall {
            callee: Box::new(Expr::identifier("f")),
            arguments: vec![],
        });
        assert!(!call.is_lvalue());
        assert!(call.is_call());
        assert!(!Expr::grouping(Expr::identifier("x")).is_lvalue());
        assert!(!Expr::VarArgs.is_lvalue());
    }
}
