pub mod span;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod display;
pub mod pretty;
pub mod config;

use std::path::Path;

use config::Emit;
use diagnostics::CompileError;
use lexer::Lexer;
use parser::Parser;
use parser::ast::{Expression, Program};
use tracing::{debug, info};

/// Parse a complete `int main() { ... }` program.
pub fn parse_program(source: &str) -> Result<Program, CompileError> {
    let mut parser = Parser::new(Lexer::new(source))?;
    parser.program()
}

/// Parse a single expression that must span the whole input.
pub fn parse_expression(source: &str) -> Result<Expression, CompileError> {
    let mut parser = Parser::new(Lexer::new(source))?;
    parser.expression_only()
}

/// Read a source file from disk.
pub fn read_source(path: &Path) -> Result<String, CompileError> {
    info!(path = %path.display(), "reading source");
    std::fs::read_to_string(path).map_err(|e| {
        CompileError::io(format!("could not read {}: {e}", path.display()), path.to_path_buf())
    })
}

/// Produce the CLI output for `source` in the requested form.
///
/// `Emit::Tokens` only runs the lexer; every other form parses first.
pub fn render(source: &str, emit: Emit, indent: usize) -> Result<String, CompileError> {
    let program = match emit {
        Emit::Tokens => return render_tokens(source),
        Emit::Tree | Emit::Source | Emit::Json => parse_program(source)?,
    };

    debug!(?emit, "rendering program");
    match emit {
        Emit::Source => Ok(pretty::pretty_print(&program)),
        Emit::Json => serde_json::to_string_pretty(&program)
            .map(|json| json + "\n")
            .map_err(|e| CompileError::render(format!("could not serialize AST: {e}"))),
        Emit::Tree | Emit::Tokens => Ok(display::display_tree(&program, indent)),
    }
}

/// One token per line as `line:col<TAB>Kind<TAB>lexeme`.
pub fn render_tokens(source: &str) -> Result<String, CompileError> {
    let mut out = String::new();
    for tok in lexer::lex(source)? {
        let (line, col) = tok.span.line_col(source);
        out.push_str(&format!("{line}:{col}\t{}\t{}\n", tok.kind, tok.value));
    }
    Ok(out)
}
