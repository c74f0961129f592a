//! Expression rules, from lowest to highest precedence

use crate::parser::{Parser, SyntaxResult};
use lunar_ast::expr::{
    BinOp, Expr, ExprCall, ExprIndex, ExprMethodCall, ExprProperty, ExprTable, TableField,
    UnaryOp,
};
use lunar_ast::function::FunctionBody;
use lunar_tokens::token::TokenKind;

type Operators = &'static [(TokenKind, BinOp)];

const OR: Operators = &[(TokenKind::Or, BinOp::Or)];
const AND: Operators = &[(TokenKind::And, BinOp::And)];
const COMPARISON: Operators = &[
    (TokenKind::Eq, BinOp::Eq),
    (TokenKind::NotEq, BinOp::NotEq),
    (TokenKind::Lt, BinOp::Lt),
    (TokenKind::Lte, BinOp::Lte),
    (TokenKind::Gt, BinOp::Gt),
    (TokenKind::Gte, BinOp::Gte),
];
const BIT_OR: Operators = &[(TokenKind::Pipe, BinOp::BitOr)];
const BIT_XOR: Operators = &[(TokenKind::Tilde, BinOp::BitXor)];
const BIT_AND: Operators = &[(TokenKind::Ampersand, BinOp::BitAnd)];
const SHIFT: Operators = &[
    (TokenKind::LShift, BinOp::Shl),
    (TokenKind::RShift, BinOp::Shr),
];
const ADDITIVE: Operators = &[(TokenKind::Plus, BinOp::Add), (TokenKind::Minus, BinOp::Sub)];
const MULTIPLICATIVE: Operators = &[
    (TokenKind::Star, BinOp::Mul),
    (TokenKind::Slash, BinOp::Div),
    (TokenKind::DoubleSlash, BinOp::FloorDiv),
    (TokenKind::Percent, BinOp::Mod),
];

impl Parser {
    pub(in crate::parser) fn expression(&mut self) -> SyntaxResult<Expr> {
        self.nested("expression", Self::logical_or)
    }

    pub(in crate::parser) fn expression_list(&mut self) -> SyntaxResult<Vec<Expr>> {
        let mut expressions = vec![self.expression()?];
        while self.consume_if(TokenKind::Comma).is_some() {
            expressions.push(self.expression()?);
        }
        Ok(expressions)
    }

    fn logical_or(&mut self) -> SyntaxResult<Expr> {
        self.left_associative(OR, Self::logical_and)
    }

    fn logical_and(&mut self) -> SyntaxResult<Expr> {
        self.left_associative(AND, Self::comparison)
    }

    fn comparison(&mut self) -> SyntaxResult<Expr> {
        self.left_associative(COMPARISON, Self::bitwise_or)
    }

    fn bitwise_or(&mut self) -> SyntaxResult<Expr> {
        self.left_associative(BIT_OR, Self::bitwise_xor)
    }

    fn bitwise_xor(&mut self) -> SyntaxResult<Expr> {
        self.left_associative(BIT_XOR, Self::bitwise_and)
    }

    fn bitwise_and(&mut self) -> SyntaxResult<Expr> {
        self.left_associative(BIT_AND, Self::shift)
    }

    fn shift(&mut self) -> SyntaxResult<Expr> {
        self.left_associative(SHIFT, Self::concatenation)
    }

    fn concatenation(&mut self) -> SyntaxResult<Expr> {
        let left = self.additive()?;
        if self.consume_if(TokenKind::Concat).is_some() {
            let right = self.nested("concatenation", Self::concatenation)?;
            return Ok(Expr::binary(left, BinOp::Concat, right));
        }
        Ok(left)
    }

    fn additive(&mut self) -> SyntaxResult<Expr> {
        self.left_associative(ADDITIVE, Self::multiplicative)
    }

    fn multiplicative(&mut self) -> SyntaxResult<Expr> {
        self.left_associative(MULTIPLICATIVE, Self::unary)
    }

    fn unary(&mut self) -> SyntaxResult<Expr> {
        let op = match self.peek().kind() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Not => UnaryOp::Not,
            TokenKind::Hash => UnaryOp::Len,
            TokenKind::Tilde => UnaryOp::BitNot,
            _ => return self.power(),
        };
        self.consume();
        let right = self.nested("unary", Self::unary)?;
        Ok(Expr::unary(op, right))
    }

    fn power(&mut self) -> SyntaxResult<Expr> {
        let base = self.primary()?;
        if self.consume_if(TokenKind::Caret).is_some() {
            let exponent = self.nested("power", Self::power)?;
            return Ok(Expr::binary(base, BinOp::Pow, exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> SyntaxResult<Expr> {
        match self.peek().kind() {
            TokenKind::Number
            | TokenKind::String
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Nil => {
                let literal = self.peek().literal().cloned();
                match literal {
                    Some(literal) => {
                        self.consume();
                        Ok(Expr::Literal(literal))
                    }
                    None => Err(self.unexpected("literal")),
                }
            }
            TokenKind::Ellipsis => {
                self.consume();
                Ok(Expr::VarArgs)
            }
            TokenKind::Function => {
                self.consume();
                self.function_body().map(Expr::Function)
            }
            TokenKind::LBrace => self.table(),
            TokenKind::Identifier | TokenKind::LParen => self.suffixed_expression(),
            _ => Err(self.unexpected("expression")),
        }
    }

    /// A name or parenthesized expression, followed by any number of index, property, call
    /// and method call suffixes
    pub(in crate::parser) fn suffixed_expression(&mut self) -> SyntaxResult<Expr> {
        let mut expr = match self.peek().kind() {
            TokenKind::Identifier => Expr::Identifier(self.consume().lexeme().to_string()),
            TokenKind::LParen => {
                self.consume();
                let inner = self.expression()?;
                self.expect(TokenKind::RParen)?;
                Expr::grouping(inner)
            }
            _ => return Err(self.unexpected("expression")),
        };

        loop {
            expr = match self.peek().kind() {
                TokenKind::LBracket => {
                    self.consume();
                    let index = self.expression()?;
                    self.expect(TokenKind::RBracket)?;
                    Expr::Index(ExprIndex {
                        table: Box::new(expr),
                        index: Box::new(index),
                    })
                }
                TokenKind::Dot => {
                    self.consume();
                    let property = self.expect_identifier()?;
                    Expr::Property(ExprProperty {
                        object: Box::new(expr),
                        property,
                    })
                }
                TokenKind::LParen => {
                    let arguments = self.arguments()?;
                    Expr::Call(ExprCall {
                        callee: Box::new(expr),
                        arguments,
                    })
                }
                TokenKind::Colon => {
                    self.consume();
                    let method = self.expect_identifier()?;
                    let arguments = self.arguments()?;
                    Expr::MethodCall(ExprMethodCall {
                        receiver: Box::new(expr),
                        method,
                        arguments,
                    })
                }
                _ => return Ok(expr),
            };
        }
    }

    fn arguments(&mut self) -> SyntaxResult<Vec<Expr>> {
        self.expect(TokenKind::LParen)?;
        if self.consume_if(TokenKind::RParen).is_some() {
            return Ok(vec![]);
        }
        let arguments = self.expression_list()?;
        self.expect(TokenKind::RParen)?;
        Ok(arguments)
    }

    /// `(params) block end`, shared by function statements and anonymous functions
    pub(in crate::parser) fn function_body(&mut self) -> SyntaxResult<FunctionBody> {
        self.nested("function body", |parser| {
            parser.expect(TokenKind::LParen)?;
            let mut parameters = vec![];
            let mut variadic = false;
            if !parser.check(TokenKind::RParen) {
                loop {
                    if parser.consume_if(TokenKind::Ellipsis).is_some() {
                        variadic = true;
                        break;
                    }
                    parameters.push(parser.expect_identifier()?);
                    if parser.consume_if(TokenKind::Comma).is_none() {
                        break;
                    }
                }
            }
            parser.expect(TokenKind::RParen)?;
            let block = parser.block()?;
            parser.expect(TokenKind::End)?;
            Ok(FunctionBody::new(parameters, variadic, block))
        })
    }

    fn table(&mut self) -> SyntaxResult<Expr> {
        self.expect(TokenKind::LBrace)?;
        let mut fields = vec![];
        while !self.check(TokenKind::RBrace) {
            fields.push(self.table_field()?);
            if self
                .match_any(&[TokenKind::Comma, TokenKind::SemiColon])
                .is_none()
            {
                break;
            }
        }
        self.expect(TokenKind::RBrace)?;
        Ok(Expr::Table(ExprTable { fields }))
    }

    fn table_field(&mut self) -> SyntaxResult<TableField> {
        if self.consume_if(TokenKind::LBracket).is_some() {
            let key = self.expression()?;
            self.expect(TokenKind::RBracket)?;
            self.expect(TokenKind::Assign)?;
            let value = self.expression()?;
            return Ok(TableField::Computed { key, value });
        }
        if self.check(TokenKind::Identifier) && self.check_nth(1, TokenKind::Assign) {
            let name = self.consume().lexeme().to_string();
            self.consume();
            let value = self.expression()?;
            return Ok(TableField::Named { name, value });
        }
        self.expression().map(TableField::Value)
    }

    fn left_associative(
        &mut self,
        operators: Operators,
        operand: fn(&mut Self) -> SyntaxResult<Expr>,
    ) -> SyntaxResult<Expr> {
        let mut expr = operand(self)?;
        while let Some(op) = self.binary_operator(operators) {
            let right = operand(self)?;
            expr = Expr::binary(expr, op, right);
        }
        Ok(expr)
    }

    fn binary_operator(&mut self, operators: Operators) -> Option<BinOp> {
        let kind = self.peek().kind();
        let &(_, op) = operators.iter().find(|(candidate, _)| *candidate == kind)?;
        self.consume();
        Some(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::ErrorKind;
    use lunar_tokens::token::Literal;
    use test_log::test;

    fn expr(src: &str) -> Expr {
        let mut parser = Parser::new(Lexer::new(src).tokenize().unwrap());
        let expr = parser
            .expression()
            .unwrap_or_else(|e| panic!("{}", e.report(src)));
        assert!(parser.check(TokenKind::Eof), "{src:?} left tokens behind");
        expr
    }

    fn num(n: f64) -> Expr {
        Expr::number(n)
    }

    fn id(name: &str) -> Expr {
        Expr::identifier(name)
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            expr("1 + 2 * 3"),
            Expr::binary(num(1.0), BinOp::Add, Expr::binary(num(2.0), BinOp::Mul, num(3.0)))
        );
        assert_eq!(
            expr("a or b and c"),
            Expr::binary(id("a"), BinOp::Or, Expr::binary(id("b"), BinOp::And, id("c")))
        );
        assert_eq!(
            expr("a < b == c"),
            Expr::binary(Expr::binary(id("a"), BinOp::Lt, id("b")), BinOp::Eq, id("c"))
        );
        assert_eq!(
            expr("a | b ~ c & d << 1"),
            Expr::binary(
                id("a"),
                BinOp::BitOr,
                Expr::binary(
                    id("b"),
                    BinOp::BitXor,
                    Expr::binary(
                        id("c"),
                        BinOp::BitAnd,
                        Expr::binary(id("d"), BinOp::Shl, num(1.0)),
                    ),
                ),
            )
        );
        assert_eq!(
            expr("a .. b + 1"),
            Expr::binary(id("a"), BinOp::Concat, Expr::binary(id("b"), BinOp::Add, num(1.0)))
        );
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(
            expr("1 - 2 - 3"),
            Expr::binary(Expr::binary(num(1.0), BinOp::Sub, num(2.0)), BinOp::Sub, num(3.0))
        );
        assert_eq!(
            expr("8 // 2 % 3"),
            Expr::binary(Expr::binary(num(8.0), BinOp::FloorDiv, num(2.0)), BinOp::Mod, num(3.0))
        );
    }

    #[test]
    fn test_right_associativity() {
        assert_eq!(
            expr("2 ^ 3 ^ 2"),
            Expr::binary(num(2.0), BinOp::Pow, Expr::binary(num(3.0), BinOp::Pow, num(2.0)))
        );
        assert_eq!(
            expr("a .. b .. c"),
            Expr::binary(id("a"), BinOp::Concat, Expr::binary(id("b"), BinOp::Concat, id("c")))
        );
    }

    #[test]
    fn test_unary() {
        assert_eq!(
            expr("-x ^ 2"),
            Expr::unary(UnaryOp::Neg, Expr::binary(id("x"), BinOp::Pow, num(2.0)))
        );
        assert_eq!(
            expr("not not x"),
            Expr::unary(UnaryOp::Not, Expr::unary(UnaryOp::Not, id("x")))
        );
        assert_eq!(
            expr("#t * 2"),
            Expr::binary(Expr::unary(UnaryOp::Len, id("t")), BinOp::Mul, num(2.0))
        );
        assert_eq!(expr("~x"), Expr::unary(UnaryOp::BitNot, id("x")));
    }

    #[test]
    fn test_grouping() {
        assert_eq!(
            expr("(1 + 2) * 3"),
            Expr::binary(
                Expr::grouping(Expr::binary(num(1.0), BinOp::Add, num(2.0))),
                BinOp::Mul,
                num(3.0)
            )
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(expr("'hi'"), Expr::string("hi"));
        assert_eq!(expr("true"), Expr::Literal(Literal::Boolean(true)));
        assert_eq!(expr("nil"), Expr::Literal(Literal::Nil));
        assert_eq!(expr("..."), Expr::VarArgs);
    }

    #[test]
    fn test_suffix_chain() {
        // a.b[c](d):e(f)
        let expected = Expr::MethodCall(ExprMethodCall {
            receiver: Box::new(Expr::Call(ExprCall {
                callee: Box::new(Expr::Index(ExprIndex {
                    table: Box::new(Expr::Property(ExprProperty {
                        object: Box::new(id("a")),
                        property: "b".to_string(),
                    })),
                    index: Box::new(id("c")),
                })),
                arguments: vec![id("d")],
            })),
            method: "e".to_string(),
            arguments: vec![id("f")],
        });
        assert_eq!(expr("a.b[c](d):e(f)"), expected);
    }

    #[test]
    fn test_table_constructor() {
        let Expr::Table(table) = expr("{ 1, x = 2; [k] = 3, y, }") else {
            panic!("expected a table");
        };
        assert_eq!(
            table.fields,
            [
                TableField::Value(num(1.0)),
                TableField::Named {
                    name: "x".to_string(),
                    value: num(2.0)
                },
                TableField::Computed {
                    key: id("k"),
                    value: num(3.0)
                },
                TableField::Value(id("y")),
            ]
        );
        assert_eq!(expr("{}"), Expr::Table(ExprTable::default()));
    }

    #[test]
    fn test_anonymous_function() {
        let Expr::Function(body) = expr("function (a, b, ...) return a end") else {
            panic!("expected a function");
        };
        assert_eq!(body.parameters, ["a", "b"]);
        assert!(body.variadic);
        assert!(body.block.return_statement.is_some());
    }

    #[test]
    fn test_missing_operand() {
        let mut parser = Parser::new(Lexer::new("1 +").tokenize().unwrap());
        let error = parser.expression().unwrap_err();
        assert!(matches!(
            error.kind(),
            ErrorKind::UnexpectedToken {
                found: TokenKind::Eof,
                context: "expression",
                ..
            }
        ));
    }
}
