pub mod ast;

use std::fmt;

use tracing::{debug, trace};

use crate::diagnostics::CompileError;
use crate::lexer::{Token, TokenKind, TokenSource};
use ast::*;

/// Recursive-descent parser for C++Lite.
///
/// Each grammar rule is one method, with the rule it implements written as
/// the first comment of the method. The parser holds exactly one token of
/// lookahead; after a rule returns `Ok`, `token` is the first token that rule
/// did not consume.
pub struct Parser<S> {
    lexer: S,
    token: Token,
}

impl<S: TokenSource> Parser<S> {
    /// Open the token source and load the first lookahead token.
    pub fn new(mut lexer: S) -> Result<Self, CompileError> {
        let token = lexer.next_token()?;
        Ok(Self { lexer, token })
    }

    /// The current lookahead token.
    pub fn peek(&self) -> &Token {
        &self.token
    }

    /// Consume the lookahead if it is `expected` and return its lexeme.
    ///
    /// This is the only place tokens are consumed.
    fn expect(&mut self, expected: TokenKind) -> Result<String, CompileError> {
        if self.token.kind != expected {
            return Err(self.error(expected));
        }
        let next = self.lexer.next_token()?;
        let consumed = std::mem::replace(&mut self.token, next);
        trace!(kind = %consumed.kind, value = %consumed.value, "matched");
        Ok(consumed.value)
    }

    /// Consume whatever the lookahead is. Callers have already classified it.
    fn expect_current(&mut self) -> Result<String, CompileError> {
        self.expect(self.token.kind)
    }

    fn error(&self, expected: impl fmt::Display) -> CompileError {
        CompileError::syntax(expected.to_string(), &self.token, self.token.span)
    }

    pub fn program(&mut self) -> Result<Program, CompileError> {
        // Program --> int main ( ) '{' Declarations Statements '}'
        for kind in [TokenKind::Int, TokenKind::Main, TokenKind::LeftParen, TokenKind::RightParen] {
            self.expect(kind)?;
        }
        self.expect(TokenKind::LeftBrace)?;
        let decls = self.declarations()?;
        let body = self.statements()?;
        self.expect(TokenKind::RightBrace)?;

        if self.token.kind != TokenKind::Eof {
            return Err(self.error(TokenKind::Eof));
        }

        debug!(declarations = decls.len(), statements = body.members.len(), "parsed program");
        Ok(Program { decls, body })
    }

    fn declarations(&mut self) -> Result<Declarations, CompileError> {
        // Declarations --> { Declaration }
        let mut ds = Declarations::new();
        while self.token.kind.is_type() {
            self.declaration(&mut ds)?;
        }
        Ok(ds)
    }

    fn declaration(&mut self, ds: &mut Declarations) -> Result<(), CompileError> {
        // Declaration --> Type Identifier { , Identifier } ;
        let ty = self.parse_type()?;
        let name = self.expect(TokenKind::Identifier)?;
        ds.push(Declaration { var: Variable::new(name), ty });
        while self.token.kind == TokenKind::Comma {
            self.expect(TokenKind::Comma)?;
            let name = self.expect(TokenKind::Identifier)?;
            ds.push(Declaration { var: Variable::new(name), ty });
        }
        self.expect(TokenKind::Semicolon)?;
        Ok(())
    }

    fn parse_type(&mut self) -> Result<Type, CompileError> {
        // Type --> int | bool | float | char
        let ty = type_for(self.token.kind).ok_or_else(|| self.error("Type"))?;
        self.expect_current()?;
        Ok(ty)
    }

    fn statements(&mut self) -> Result<Block, CompileError> {
        // Statements --> { Statement }
        let mut block = Block::default();
        while self.token.kind.starts_statement() {
            block.members.push(self.statement()?);
        }
        Ok(block)
    }

    fn statement(&mut self) -> Result<Statement, CompileError> {
        // Statement --> ; | Block | Assignment | IfStatement | WhileStatement
        match self.token.kind {
            TokenKind::Semicolon => {
                self.expect(TokenKind::Semicolon)?;
                Ok(Statement::Skip)
            }
            TokenKind::LeftBrace => {
                // Block --> '{' Statements '}'
                self.expect(TokenKind::LeftBrace)?;
                let block = self.statements()?;
                self.expect(TokenKind::RightBrace)?;
                Ok(Statement::Block(block))
            }
            TokenKind::Identifier => Ok(Statement::Assignment(self.assignment()?)),
            TokenKind::If => Ok(Statement::Conditional(self.if_statement()?)),
            TokenKind::While => Ok(Statement::Loop(self.while_statement()?)),
            _ => Err(self.error("; | Block | Assignment | IfStatement | WhileStatement")),
        }
    }

    fn assignment(&mut self) -> Result<Assignment, CompileError> {
        // Assignment --> Identifier = Expression ;
        let target = Variable::new(self.expect(TokenKind::Identifier)?);
        self.expect(TokenKind::Assign)?;
        let source = self.expression()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Assignment { target, source })
    }

    fn if_statement(&mut self) -> Result<Conditional, CompileError> {
        // IfStatement --> if ( Expression ) Statement [ else Statement ]
        self.expect(TokenKind::If)?;
        self.expect(TokenKind::LeftParen)?;
        let test = self.expression()?;
        self.expect(TokenKind::RightParen)?;
        let then_branch = Box::new(self.statement()?);

        let else_branch = if self.token.kind == TokenKind::Else {
            self.expect(TokenKind::Else)?;
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Conditional { test, then_branch, else_branch })
    }

    fn while_statement(&mut self) -> Result<Loop, CompileError> {
        // WhileStatement --> while ( Expression ) Statement
        self.expect(TokenKind::While)?;
        self.expect(TokenKind::LeftParen)?;
        let test = self.expression()?;
        self.expect(TokenKind::RightParen)?;
        let body = Box::new(self.statement()?);
        Ok(Loop { test, body })
    }

    /// Parse a standalone expression, requiring the input to end after it.
    pub fn expression_only(&mut self) -> Result<Expression, CompileError> {
        let e = self.expression()?;
        if self.token.kind != TokenKind::Eof {
            return Err(self.error(TokenKind::Eof));
        }
        Ok(e)
    }

    fn expression(&mut self) -> Result<Expression, CompileError> {
        // Expression --> Conjunction { || Conjunction }
        let mut e = self.conjunction()?;
        while self.token.kind == TokenKind::Or {
            self.expect(TokenKind::Or)?;
            let rhs = self.conjunction()?;
            e = Expression::binary(BinaryOp::Or, e, rhs);
        }
        Ok(e)
    }

    fn conjunction(&mut self) -> Result<Expression, CompileError> {
        // Conjunction --> Equality { && Equality }
        let mut e = self.equality()?;
        while self.token.kind == TokenKind::And {
            self.expect(TokenKind::And)?;
            let rhs = self.equality()?;
            e = Expression::binary(BinaryOp::And, e, rhs);
        }
        Ok(e)
    }

    fn equality(&mut self) -> Result<Expression, CompileError> {
        // Equality --> Relation { EquOp Relation }
        let mut e = self.relation()?;
        while let Some(op) = equality_op(self.token.kind) {
            self.expect_current()?;
            let rhs = self.relation()?;
            e = Expression::binary(op, e, rhs);
        }
        Ok(e)
    }

    fn relation(&mut self) -> Result<Expression, CompileError> {
        // Relation --> Addition { RelOp Addition }
        let mut e = self.addition()?;
        while let Some(op) = relational_op(self.token.kind) {
            self.expect_current()?;
            let rhs = self.addition()?;
            e = Expression::binary(op, e, rhs);
        }
        Ok(e)
    }

    fn addition(&mut self) -> Result<Expression, CompileError> {
        // Addition --> Term { AddOp Term }
        let mut e = self.term()?;
        while let Some(op) = add_op(self.token.kind) {
            self.expect_current()?;
            let rhs = self.term()?;
            e = Expression::binary(op, e, rhs);
        }
        Ok(e)
    }

    fn term(&mut self) -> Result<Expression, CompileError> {
        // Term --> Factor { MultiplyOp Factor }
        let mut e = self.factor()?;
        while let Some(op) = multiply_op(self.token.kind) {
            self.expect_current()?;
            let rhs = self.factor()?;
            e = Expression::binary(op, e, rhs);
        }
        Ok(e)
    }

    fn factor(&mut self) -> Result<Expression, CompileError> {
        // Factor --> [ UnaryOp ] Primary
        match unary_op(self.token.kind) {
            Some(op) => {
                self.expect_current()?;
                let operand = self.primary()?;
                Ok(Expression::unary(op, operand))
            }
            None => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<Expression, CompileError> {
        // Primary --> Identifier | Literal | ( Expression ) | Type ( Expression )
        match self.token.kind {
            TokenKind::Identifier => {
                let name = self.expect(TokenKind::Identifier)?;
                Ok(Expression::Variable(Variable::new(name)))
            }
            kind if kind.is_literal() => Ok(Expression::Value(self.literal()?)),
            TokenKind::LeftParen => {
                self.expect(TokenKind::LeftParen)?;
                let e = self.expression()?;
                self.expect(TokenKind::RightParen)?;
                Ok(e)
            }
            kind if kind.is_type() => {
                let ty = self.parse_type()?;
                self.expect(TokenKind::LeftParen)?;
                let operand = self.expression()?;
                self.expect(TokenKind::RightParen)?;
                Ok(Expression::unary(UnaryOp::Cast(ty), operand))
            }
            _ => Err(self.error("Identifier | Literal | ( | Type")),
        }
    }

    fn literal(&mut self) -> Result<Value, CompileError> {
        // Literal --> IntLiteral | FloatLiteral | CharLiteral | true | false
        let value = match self.token.kind {
            TokenKind::IntLiteral => self
                .token
                .value
                .parse::<i32>()
                .map(Value::Int)
                .map_err(|_| self.error("IntLiteral in i32 range"))?,
            TokenKind::FloatLiteral => self
                .token
                .value
                .parse::<f32>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Value::Float)
                .ok_or_else(|| self.error("FloatLiteral in f32 range"))?,
            TokenKind::CharLiteral => self
                .token
                .value
                .chars()
                .next()
                .map(Value::Char)
                .ok_or_else(|| self.error("CharLiteral"))?,
            TokenKind::True => Value::Bool(true),
            TokenKind::False => Value::Bool(false),
            _ => return Err(self.error("IntLiteral | FloatLiteral | CharLiteral | BoolLiteral")),
        };
        self.expect_current()?;
        Ok(value)
    }
}

fn type_for(kind: TokenKind) -> Option<Type> {
    match kind {
        TokenKind::Int => Some(Type::Int),
        TokenKind::Float => Some(Type::Float),
        TokenKind::Bool => Some(Type::Bool),
        TokenKind::Char => Some(Type::Char),
        _ => None,
    }
}

fn equality_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Equals => Some(BinaryOp::Eq),
        TokenKind::NotEqual => Some(BinaryOp::NotEq),
        _ => None,
    }
}

fn relational_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Less => Some(BinaryOp::Lt),
        TokenKind::LessEqual => Some(BinaryOp::LtEq),
        TokenKind::Greater => Some(BinaryOp::Gt),
        TokenKind::GreaterEqual => Some(BinaryOp::GtEq),
        _ => None,
    }
}

fn add_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        _ => None,
    }
}

fn multiply_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Multiply => Some(BinaryOp::Mul),
        TokenKind::Divide => Some(BinaryOp::Div),
        _ => None,
    }
}

fn unary_op(kind: TokenKind) -> Option<UnaryOp> {
    match kind {
        TokenKind::Not => Some(UnaryOp::Not),
        TokenKind::Minus => Some(UnaryOp::Neg),
        _ => None,
    }
}
