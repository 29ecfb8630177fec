//! Indented tree view of a parsed program, one node per line.
//!
//! ```text
//! Program (abstract syntax):
//!   Declarations:
//!     Declarations = {<x, int>}
//!   Block:
//!     Assignment:
//!       Variable: x
//!       IntValue: 1
//! ```

use crate::parser::ast::*;

/// Render `program` as an indented tree, `indent` spaces per level.
pub fn display_tree(program: &Program, indent: usize) -> String {
    let mut tp = TreePrinter::new(indent);
    tp.emit_program(program);
    tp.buf
}

struct TreePrinter {
    buf: String,
    width: usize,
    depth: usize,
}

impl TreePrinter {
    fn new(width: usize) -> Self {
        Self { buf: String::new(), width, depth: 0 }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth * self.width {
            self.buf.push(' ');
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    fn nested(&mut self, header: &str, body: impl FnOnce(&mut Self)) {
        self.line(header);
        self.depth += 1;
        body(self);
        self.depth -= 1;
    }

    fn emit_program(&mut self, program: &Program) {
        self.nested("Program (abstract syntax):", |tp| {
            tp.nested("Declarations:", |tp| tp.emit_declarations(&program.decls));
            tp.emit_block(&program.body);
        });
    }

    fn emit_declarations(&mut self, decls: &Declarations) {
        let items: Vec<String> = decls
            .iter()
            .map(|d| format!("<{}, {}>", d.var.name, d.ty.keyword()))
            .collect();
        self.line(&format!("Declarations = {{{}}}", items.join(", ")));
    }

    fn emit_block(&mut self, block: &Block) {
        self.nested("Block:", |tp| {
            for stmt in &block.members {
                tp.emit_statement(stmt);
            }
        });
    }

    fn emit_statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Skip => self.line("Skip"),
            Statement::Block(block) => self.emit_block(block),
            Statement::Assignment(a) => self.nested("Assignment:", |tp| {
                tp.line(&format!("Variable: {}", a.target.name));
                tp.emit_expression(&a.source);
            }),
            Statement::Conditional(c) => self.nested("Conditional:", |tp| {
                tp.emit_expression(&c.test);
                tp.emit_statement(&c.then_branch);
                if let Some(else_branch) = &c.else_branch {
                    tp.emit_statement(else_branch);
                }
            }),
            Statement::Loop(l) => self.nested("Loop:", |tp| {
                tp.emit_expression(&l.test);
                tp.emit_statement(&l.body);
            }),
        }
    }

    fn emit_expression(&mut self, expr: &Expression) {
        match expr {
            Expression::Variable(v) => self.line(&format!("Variable: {}", v.name)),
            Expression::Value(value) => self.line(&value_line(value)),
            Expression::Binary { op, lhs, rhs } => self.nested("Binary:", |tp| {
                tp.line(&format!("Operator: {}", op.symbol()));
                tp.emit_expression(lhs);
                tp.emit_expression(rhs);
            }),
            Expression::Unary { op, operand } => self.nested("Unary:", |tp| {
                tp.line(&format!("Operator: {}", op.symbol()));
                tp.emit_expression(operand);
            }),
        }
    }
}

fn value_line(value: &Value) -> String {
    match value {
        Value::Int(n) => format!("IntValue: {n}"),
        Value::Float(f) => format!("FloatValue: {f:?}"),
        Value::Bool(b) => format!("BoolValue: {b}"),
        Value::Char(c) => format!("CharValue: {c}"),
    }
}
