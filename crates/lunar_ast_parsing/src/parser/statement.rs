//! Statement and block rules

use crate::parser::{ErrorKind, Parser, SyntaxResult};
use lunar_ast::block::{Block, ReturnStatement};
use lunar_ast::expr::Expr;
use lunar_ast::function::FunctionName;
use lunar_ast::statements::{
    AssignmentStatement, AttribName, ElseIfClause, ForGenericStatement, ForNumericStatement,
    FunctionStatement, IfStatement, LocalFunctionStatement, LocalStatement, RepeatStatement, Stmt,
    StmtKind, WhileStatement,
};
use lunar_tokens::spanned::Spanned;
use lunar_tokens::token::TokenKind;
use tracing::trace;

/// Tokens that end a block without being part of it
const BLOCK_TERMINATORS: &[TokenKind] = &[
    TokenKind::End,
    TokenKind::Else,
    TokenKind::ElseIf,
    TokenKind::Until,
    TokenKind::Eof,
];

/// How a statement starting with a prefix expression should be parsed
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum PrefixStatement {
    Assignment,
    Call,
    Expression,
}

impl Parser {
    pub(in crate::parser) fn block(&mut self) -> SyntaxResult<Block> {
        self.nested("block", |parser| {
            let mut statements = vec![];
            loop {
                if parser.consume_if(TokenKind::SemiColon).is_some() {
                    continue;
                }
                if parser.check(TokenKind::Return) {
                    let ret = parser.return_statement()?;
                    return Ok(Block::new(statements, ret));
                }
                if BLOCK_TERMINATORS.contains(&parser.peek().kind()) {
                    return Ok(Block::new(statements, None));
                }
                statements.push(parser.statement()?);
            }
        })
    }

    fn return_statement(&mut self) -> SyntaxResult<ReturnStatement> {
        let line = self.expect(TokenKind::Return)?.line();
        let expressions = if self.check(TokenKind::SemiColon)
            || BLOCK_TERMINATORS.contains(&self.peek().kind())
        {
            vec![]
        } else {
            self.expression_list()?
        };
        self.consume_if(TokenKind::SemiColon);
        Ok(ReturnStatement::new(expressions, line))
    }

    fn statement(&mut self) -> SyntaxResult<Stmt> {
        self.nested("statement", |parser| {
            let line = parser.peek().line();
            let kind = match parser.peek().kind() {
                TokenKind::If => parser.if_statement()?,
                TokenKind::While => parser.while_statement()?,
                TokenKind::Repeat => parser.repeat_statement()?,
                TokenKind::For => parser.for_statement()?,
                TokenKind::Local => parser.local_statement()?,
                TokenKind::Function => parser.function_statement()?,
                TokenKind::Break => {
                    parser.consume();
                    StmtKind::Break
                }
                TokenKind::Identifier | TokenKind::LParen => parser.prefix_statement()?,
                _ => return Err(parser.unexpected("statement")),
            };
            Ok(Stmt::new(kind, line))
        })
    }

    fn if_statement(&mut self) -> SyntaxResult<StmtKind> {
        self.expect(TokenKind::If)?;
        let condition = self.expression()?;
        self.expect(TokenKind::Then)?;
        let then_block = self.block()?;

        let mut else_if_clauses = vec![];
        while self.consume_if(TokenKind::ElseIf).is_some() {
            let condition = self.expression()?;
            self.expect(TokenKind::Then)?;
            let block = self.block()?;
            else_if_clauses.push(ElseIfClause { condition, block });
        }

        let else_block = match self.consume_if(TokenKind::Else) {
            Some(_) => Some(self.block()?),
            None => None,
        };
        self.expect(TokenKind::End)?;

        Ok(StmtKind::If(IfStatement {
            condition,
            then_block,
            else_if_clauses,
            else_block,
        }))
    }

    fn while_statement(&mut self) -> SyntaxResult<StmtKind> {
        self.expect(TokenKind::While)?;
        let condition = self.expression()?;
        self.expect(TokenKind::Do)?;
        let body = self.block()?;
        self.expect(TokenKind::End)?;
        Ok(StmtKind::While(WhileStatement { condition, body }))
    }

    fn repeat_statement(&mut self) -> SyntaxResult<StmtKind> {
        self.expect(TokenKind::Repeat)?;
        let body = self.block()?;
        self.expect(TokenKind::Until)?;
        let condition = self.expression()?;
        Ok(StmtKind::Repeat(RepeatStatement { body, condition }))
    }

    fn for_statement(&mut self) -> SyntaxResult<StmtKind> {
        self.expect(TokenKind::For)?;
        let identifier = self.expect_identifier()?;

        match self.peek().kind() {
            TokenKind::Assign => {
                self.consume();
                let start = self.expression()?;
                self.expect(TokenKind::Comma)?;
                let end = self.expression()?;
                let step = match self.consume_if(TokenKind::Comma) {
                    Some(_) => Some(self.expression()?),
                    None => None,
                };
                self.expect(TokenKind::Do)?;
                let body = self.block()?;
                self.expect(TokenKind::End)?;
                Ok(StmtKind::ForNumeric(ForNumericStatement {
                    identifier,
                    start,
                    end,
                    step,
                    body,
                }))
            }
            TokenKind::Comma | TokenKind::In => {
                let mut identifiers = vec![identifier];
                while self.consume_if(TokenKind::Comma).is_some() {
                    identifiers.push(self.expect_identifier()?);
                }
                self.expect(TokenKind::In)?;
                let expressions = self.expression_list()?;
                self.expect(TokenKind::Do)?;
                let body = self.block()?;
                self.expect(TokenKind::End)?;
                Ok(StmtKind::ForGeneric(ForGenericStatement {
                    identifiers,
                    expressions,
                    body,
                }))
            }
            found => Err(self.error(ErrorKind::expected_one_of(
                [TokenKind::Assign, TokenKind::Comma, TokenKind::In],
                found,
            ))),
        }
    }

    fn local_statement(&mut self) -> SyntaxResult<StmtKind> {
        self.expect(TokenKind::Local)?;
        if self.consume_if(TokenKind::Function).is_some() {
            let identifier = self.expect_identifier()?;
            let body = self.function_body()?;
            return Ok(StmtKind::LocalFunction(LocalFunctionStatement {
                identifier,
                body,
            }));
        }

        let mut variables = vec![];
        loop {
            let name = self.expect_identifier()?;
            let attribute = match self.consume_if(TokenKind::Lt) {
                Some(_) => {
                    let attribute = self.expect_identifier()?;
                    self.expect(TokenKind::Gt)?;
                    Some(attribute)
                }
                None => None,
            };
            variables.push(AttribName::new(name, attribute));
            if self.consume_if(TokenKind::Comma).is_none() {
                break;
            }
        }
        let expressions = match self.consume_if(TokenKind::Assign) {
            Some(_) => Some(self.expression_list()?),
            None => None,
        };
        Ok(StmtKind::Local(LocalStatement {
            variables,
            expressions,
        }))
    }

    fn function_statement(&mut self) -> SyntaxResult<StmtKind> {
        self.expect(TokenKind::Function)?;
        let mut name = FunctionName::new(self.expect_identifier()?);
        while self.consume_if(TokenKind::Dot).is_some() {
            name.members.push(self.expect_identifier()?);
        }
        if self.consume_if(TokenKind::Colon).is_some() {
            name.method = Some(self.expect_identifier()?);
        }
        let body = self.function_body()?;
        Ok(StmtKind::Function(FunctionStatement { name, body }))
    }

    /// A statement beginning with an identifier or `(`
    fn prefix_statement(&mut self) -> SyntaxResult<StmtKind> {
        let form = self.classify_prefix_statement();
        trace!("prefix statement at {:?} is {form:?}", self.peek());
        match form {
            PrefixStatement::Assignment => self.assignment_statement(),
            PrefixStatement::Call | PrefixStatement::Expression => {
                let expr = self.expression()?;
                if expr.is_call() {
                    Ok(StmtKind::Call(expr))
                } else {
                    Ok(StmtKind::Expression(expr))
                }
            }
        }
    }

    fn assignment_statement(&mut self) -> SyntaxResult<StmtKind> {
        let mut variables = vec![];
        loop {
            let span = self.peek().span();
            let target = self.suffixed_expression()?;
            if !target.is_lvalue() {
                let described = match target {
                    Expr::Call(_) => "a function call",
                    Expr::MethodCall(_) => "a method call",
                    Expr::Grouping(_) => "a parenthesized expression",
                    _ => "this expression",
                };
                return Err(self.error_with_span(
                    ErrorKind::InvalidAssignmentTarget(described),
                    span,
                ));
            }
            variables.push(target);
            if self.consume_if(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::Assign)?;
        let expressions = self.expression_list()?;
        Ok(StmtKind::Assignment(AssignmentStatement {
            variables,
            expressions,
        }))
    }

    /// Decides what a statement starting at the lookahead is without consuming anything.
    ///
    /// The lookahead skips the longest chain of suffixes after the leading name or
    /// parenthesized expression: `.name`, `[...]`, `(...)` and `:name(...)`. If `=` or `,`
    /// follows the chain, the statement is an assignment. Otherwise it's a call if the chain
    /// ended in a call, and a bare expression if not.
    fn classify_prefix_statement(&self) -> PrefixStatement {
        let mut index = match self.peek().kind() {
            TokenKind::Identifier => 1,
            TokenKind::LParen => self.skip_balanced(0),
            _ => return PrefixStatement::Expression,
        };
        let mut ends_in_call = false;
        loop {
            match self.peek_nth(index).kind() {
                TokenKind::Dot if self.check_nth(index + 1, TokenKind::Identifier) => {
                    index += 2;
                    ends_in_call = false;
                }
                TokenKind::LBracket => {
                    index = self.skip_balanced(index);
                    ends_in_call = false;
                }
                TokenKind::LParen => {
                    index = self.skip_balanced(index);
                    ends_in_call = true;
                }
                TokenKind::Colon
                    if self.check_nth(index + 1, TokenKind::Identifier)
                        && self.check_nth(index + 2, TokenKind::LParen) =>
                {
                    index = self.skip_balanced(index + 2);
                    ends_in_call = true;
                }
                _ => break,
            }
        }
        match self.peek_nth(index).kind() {
            TokenKind::Assign | TokenKind::Comma => PrefixStatement::Assignment,
            _ if ends_in_call => PrefixStatement::Call,
            _ => PrefixStatement::Expression,
        }
    }

    /// Given the offset of an opening bracket, gets the offset just past its matching closer.
    ///
    /// `(`, `[` and `{` all count towards the same depth. Stops at `EOF` if unbalanced.
    fn skip_balanced(&self, open: usize) -> usize {
        let mut depth = 0usize;
        let mut index = open;
        loop {
            match self.peek_nth(index).kind() {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return index + 1;
                    }
                }
                TokenKind::Eof => return index,
                _ => {}
            }
            index += 1;
        }
    }
}
