pub mod token;

use logos::Logos;
use tracing::trace;

use crate::diagnostics::CompileError;
use crate::span::Span;
pub use token::{Token, TokenKind};

/// Pull-based token producer the parser reads from.
///
/// Once the input is exhausted every further call yields an `Eof` token.
pub trait TokenSource {
    fn next_token(&mut self) -> Result<Token, CompileError>;
}

/// Lexer over C++Lite source text, producing one token per call.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, TokenKind>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self { inner: TokenKind::lexer(source) }
    }
}

impl TokenSource for Lexer<'_> {
    fn next_token(&mut self) -> Result<Token, CompileError> {
        loop {
            let Some(result) = self.inner.next() else {
                return Ok(Token::eof(self.inner.source().len()));
            };
            let range = self.inner.span();
            let span = Span::new(range.start, range.end);
            let kind = match result {
                Ok(TokenKind::Comment) => continue,
                Ok(kind) => kind,
                Err(()) => {
                    let bad = self.inner.source()[range.start..].chars().next().unwrap_or_default();
                    return Err(CompileError::lex(format!("illegal character '{bad}'"), span));
                }
            };
            let slice = self.inner.slice();
            let value = if kind == TokenKind::CharLiteral {
                &slice[1..slice.len() - 1]
            } else {
                slice
            };
            trace!(%kind, value, start = span.start, "lexed token");
            return Ok(Token::new(kind, value, span));
        }
    }
}

/// Replays a pre-built token vector, then yields `Eof` forever.
pub struct TokenStream {
    tokens: std::vec::IntoIter<Token>,
    end: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = tokens.last().map_or(0, |t| t.span.end);
        Self { tokens: tokens.into_iter(), end }
    }
}

impl TokenSource for TokenStream {
    fn next_token(&mut self) -> Result<Token, CompileError> {
        Ok(self.tokens.next().unwrap_or_else(|| Token::eof(self.end)))
    }
}

/// Tokenize a whole source string, stopping before the `Eof` marker.
pub fn lex(source: &str) -> Result<Vec<Token>, CompileError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let tok = lexer.next_token()?;
        if tok.kind == TokenKind::Eof {
            return Ok(tokens);
        }
        tokens.push(tok);
    }
}
