use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub decls: Declarations,
    pub body: Block,
}

pub type Declarations = Vec<Declaration>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Declaration {
    pub var: Variable,
    pub ty: Type,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Type {
    Int,
    Float,
    Bool,
    Char,
}

impl Type {
    pub fn keyword(self) -> &'static str {
        match self {
            Type::Int => "int",
            Type::Float => "float",
            Type::Bool => "bool",
            Type::Char => "char",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub name: String,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Statement {
    Skip,
    Block(Block),
    Assignment(Assignment),
    Conditional(Conditional),
    Loop(Loop),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Block {
    pub members: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub target: Variable,
    pub source: Expression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conditional {
    pub test: Expression,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<Box<Statement>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Loop {
    pub test: Expression,
    pub body: Box<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expression {
    Variable(Variable),
    Value(Value),
    Binary {
        op: BinaryOp,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },
}

impl Expression {
    pub fn binary(op: BinaryOp, lhs: Expression, rhs: Expression) -> Self {
        Expression::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    pub fn unary(op: UnaryOp, operand: Expression) -> Self {
        Expression::Unary { op, operand: Box::new(operand) }
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expression::Variable(Variable::new(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Value {
    Int(i32),
    Float(f32),
    Bool(bool),
    Char(char),
}

impl From<Value> for Expression {
    fn from(value: Value) -> Self {
        Expression::Value(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    Not,
    Neg,
    /// Explicit conversion, written `float(e)`.
    Cast(Type),
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
            UnaryOp::Cast(ty) => ty.keyword(),
        }
    }
}
