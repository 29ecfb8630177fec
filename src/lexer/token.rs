use std::fmt;

use logos::Logos;

use crate::span::Span;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    // Keywords
    #[token("int")]
    Int,
    #[token("float")]
    Float,
    #[token("bool")]
    Bool,
    #[token("char")]
    Char,
    #[token("main")]
    Main,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("true")]
    True,
    #[token("false")]
    False,

    // Literals
    #[regex(r"[0-9]+")]
    IntLiteral,
    #[regex(r"[0-9]+\.[0-9]+")]
    FloatLiteral,
    #[regex(r"'[^'\\\n]'")]
    CharLiteral,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,

    // Operators
    #[token("=")]
    Assign,
    #[token("==")]
    Equals,
    #[token("!=")]
    NotEqual,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEqual,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Multiply,
    #[token("/")]
    Divide,
    #[token("!")]
    Not,
    #[token("&&")]
    And,
    #[token("||")]
    Or,

    // Punctuation
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,

    // Comments (skip)
    #[regex(r"//[^\n]*")]
    Comment,

    /// Produced by the lexer wrapper once the input is exhausted.
    Eof,
}

impl TokenKind {
    /// `int | float | bool | char`
    pub fn is_type(self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Float | TokenKind::Bool | TokenKind::Char)
    }

    pub fn is_boolean_literal(self) -> bool {
        matches!(self, TokenKind::True | TokenKind::False)
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::IntLiteral | TokenKind::FloatLiteral | TokenKind::CharLiteral
        ) || self.is_boolean_literal()
    }

    /// Tokens that can begin a statement.
    pub fn starts_statement(self) -> bool {
        matches!(
            self,
            TokenKind::Semicolon
                | TokenKind::Identifier
                | TokenKind::If
                | TokenKind::While
                | TokenKind::LeftBrace
        )
    }

    /// Whether the token's display needs its lexeme to be meaningful.
    fn carries_lexeme(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::IntLiteral
                | TokenKind::FloatLiteral
                | TokenKind::CharLiteral
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Int => "Int",
            TokenKind::Float => "Float",
            TokenKind::Bool => "Bool",
            TokenKind::Char => "Char",
            TokenKind::Main => "Main",
            TokenKind::If => "If",
            TokenKind::Else => "Else",
            TokenKind::While => "While",
            TokenKind::True => "True",
            TokenKind::False => "False",
            TokenKind::IntLiteral => "IntLiteral",
            TokenKind::FloatLiteral => "FloatLiteral",
            TokenKind::CharLiteral => "CharLiteral",
            TokenKind::Identifier => "Identifier",
            TokenKind::Assign => "Assign",
            TokenKind::Equals => "Equals",
            TokenKind::NotEqual => "NotEqual",
            TokenKind::Less => "Less",
            TokenKind::LessEqual => "LessEqual",
            TokenKind::Greater => "Greater",
            TokenKind::GreaterEqual => "GreaterEqual",
            TokenKind::Plus => "Plus",
            TokenKind::Minus => "Minus",
            TokenKind::Multiply => "Multiply",
            TokenKind::Divide => "Divide",
            TokenKind::Not => "Not",
            TokenKind::And => "And",
            TokenKind::Or => "Or",
            TokenKind::LeftParen => "LeftParen",
            TokenKind::RightParen => "RightParen",
            TokenKind::LeftBrace => "LeftBrace",
            TokenKind::RightBrace => "RightBrace",
            TokenKind::Comma => "Comma",
            TokenKind::Semicolon => "Semicolon",
            TokenKind::Comment => "Comment",
            TokenKind::Eof => "Eof",
        };
        f.write_str(name)
    }
}

/// A lexical unit: its kind plus the raw lexeme it was cut from.
///
/// Char literals keep only the character between the quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, span: Span) -> Self {
        Self { kind, value: value.into(), span }
    }

    pub fn eof(offset: usize) -> Self {
        Self { kind: TokenKind::Eof, value: "<<EOF>>".to_string(), span: Span::point(offset) }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.carries_lexeme() {
            write!(f, "{} {}", self.kind, self.value)
        } else {
            f.write_str(&self.value)
        }
    }
}
