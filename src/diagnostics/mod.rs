use crate::span::Span;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Syntax error: expecting: {expected}; saw: {found}")]
    Syntax { expected: String, found: String, span: Span },

    #[error("Lexical error: {msg}")]
    Lex { msg: String, span: Span },

    #[error("I/O error: {msg}")]
    Io { msg: String, path: PathBuf },

    #[error("Config error: {msg}")]
    Config { msg: String, path: PathBuf },

    #[error("Render error: {msg}")]
    Render { msg: String },
}

impl CompileError {
    pub fn syntax(expected: impl Into<String>, found: impl ToString, span: Span) -> Self {
        Self::Syntax { expected: expected.into(), found: found.to_string(), span }
    }

    pub fn lex(msg: impl Into<String>, span: Span) -> Self {
        Self::Lex { msg: msg.into(), span }
    }

    pub fn io(msg: impl Into<String>, path: PathBuf) -> Self {
        Self::Io { msg: msg.into(), path }
    }

    pub fn config(msg: impl Into<String>, path: PathBuf) -> Self {
        Self::Config { msg: msg.into(), path }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render { msg: msg.into() }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::Syntax { span, .. } | CompileError::Lex { span, .. } => Some(*span),
            CompileError::Io { .. } | CompileError::Config { .. } | CompileError::Render { .. } => None,
        }
    }
}

/// Render a CompileError with ariadne for labelled terminal output.
pub fn render_error(source: &str, filename: &str, err: &CompileError) -> std::io::Result<()> {
    use ariadne::{Label, Report, ReportKind, Source};

    match err {
        CompileError::Syntax { expected, span, .. } => {
            let range = span.char_range(source);
            Report::build(ReportKind::Error, (), range.start)
                .with_message(err.to_string())
                .with_label(Label::new(range).with_message(format!("expected {expected} here")))
                .with_note(format!("in {filename}"))
                .finish()
                .eprint(Source::from(source))
        }
        CompileError::Lex { msg, span } => {
            let range = span.char_range(source);
            Report::build(ReportKind::Error, (), range.start)
                .with_message("lexical error")
                .with_label(Label::new(range).with_message(msg))
                .with_note(format!("in {filename}"))
                .finish()
                .eprint(Source::from(source))
        }
        CompileError::Io { msg, path } | CompileError::Config { msg, path } => {
            eprintln!("error: {msg}");
            eprintln!("  --> {}", path.display());
            Ok(())
        }
        CompileError::Render { msg } => {
            eprintln!("error: {msg}");
            Ok(())
        }
    }
}
