use crate::parser::ast::*;

/// Pretty-print a `Program` AST back into valid C++Lite source text.
///
/// Re-parsing the output of a parsed program yields an equal AST.
pub fn pretty_print(program: &Program) -> String {
    let mut pp = PrettyPrinter::new();
    pp.emit_program(program);
    pp.buf
}

/// Render a single expression with the minimum parentheses needed.
pub fn pretty_print_expression(expr: &Expression) -> String {
    let mut pp = PrettyPrinter::new();
    pp.emit_expr(expr, 0);
    pp.buf
}

/// Binding strength of a cast or a parenthesis-free atom.
const PRIMARY_PREC: u8 = 8;
/// Binding strength of prefix `!` and `-`.
const UNARY_PREC: u8 = 7;

struct PrettyPrinter {
    buf: String,
    indent: usize,
}

impl PrettyPrinter {
    fn new() -> Self {
        Self {
            buf: String::new(),
            indent: 0,
        }
    }

    fn write(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    fn newline(&mut self) {
        self.buf.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.buf.push_str("    ");
        }
    }

    fn indent(&mut self) {
        self.indent += 1;
    }

    fn dedent(&mut self) {
        self.indent -= 1;
    }

    // ── Program ──────────────────────────────────────────────────────

    fn emit_program(&mut self, program: &Program) {
        self.write("int main ( ) {");
        self.newline();
        self.indent();
        self.emit_declarations(&program.decls);
        for stmt in &program.body.members {
            self.emit_stmt(stmt);
        }
        self.dedent();
        self.write("}");
        self.newline();
    }

    /// Consecutive declarations of the same type share one line.
    fn emit_declarations(&mut self, decls: &Declarations) {
        for group in decls.chunk_by(|a, b| a.ty == b.ty) {
            self.write_indent();
            self.write(group[0].ty.keyword());
            self.write(" ");
            let names: Vec<&str> = group.iter().map(|d| d.var.name.as_str()).collect();
            self.write(&names.join(", "));
            self.write(";");
            self.newline();
        }
    }

    // ── Statements ───────────────────────────────────────────────────

    fn emit_stmt(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Skip => {
                self.write_indent();
                self.write(";");
                self.newline();
            }
            Statement::Block(block) => {
                self.write_indent();
                self.write("{");
                self.newline();
                self.indent();
                for member in &block.members {
                    self.emit_stmt(member);
                }
                self.dedent();
                self.write_indent();
                self.write("}");
                self.newline();
            }
            Statement::Assignment(a) => {
                self.write_indent();
                self.write(&a.target.name);
                self.write(" = ");
                self.emit_expr(&a.source, 0);
                self.write(";");
                self.newline();
            }
            Statement::Conditional(c) => {
                self.write_indent();
                self.write("if (");
                self.emit_expr(&c.test, 0);
                self.write(")");
                self.newline();
                self.emit_nested(&c.then_branch);
                if let Some(else_branch) = &c.else_branch {
                    self.write_indent();
                    self.write("else");
                    self.newline();
                    self.emit_nested(else_branch);
                }
            }
            Statement::Loop(l) => {
                self.write_indent();
                self.write("while (");
                self.emit_expr(&l.test, 0);
                self.write(")");
                self.newline();
                self.emit_nested(&l.body);
            }
        }
    }

    /// Branch and loop bodies: blocks stay at the keyword's level, anything
    /// else is indented one step.
    fn emit_nested(&mut self, stmt: &Statement) {
        if matches!(stmt, Statement::Block(_)) {
            self.emit_stmt(stmt);
        } else {
            self.indent();
            self.emit_stmt(stmt);
            self.dedent();
        }
    }

    // ── Expressions ──────────────────────────────────────────────────

    fn emit_expr(&mut self, expr: &Expression, parent_prec: u8) {
        match expr {
            Expression::Variable(v) => {
                self.write(&v.name);
            }
            Expression::Value(value) => {
                self.emit_value(value);
            }
            Expression::Binary { op, lhs, rhs } => {
                let prec = binop_prec(*op);
                let need_parens = prec < parent_prec;
                if need_parens {
                    self.write("(");
                }
                // Left child: same precedence (left-associative, no parens needed)
                self.emit_expr(lhs, prec);
                self.write(" ");
                self.write(op.symbol());
                self.write(" ");
                // Right child: prec + 1 (forces parens for same-prec on right)
                self.emit_expr(rhs, prec + 1);
                if need_parens {
                    self.write(")");
                }
            }
            Expression::Unary { op: UnaryOp::Cast(ty), operand } => {
                self.write(ty.keyword());
                self.write("(");
                self.emit_expr(operand, 0);
                self.write(")");
            }
            Expression::Unary { op, operand } => {
                let need_parens = UNARY_PREC < parent_prec;
                if need_parens {
                    self.write("(");
                }
                self.write(op.symbol());
                // A prefix operator applies to a primary only.
                self.emit_expr(operand, PRIMARY_PREC);
                if need_parens {
                    self.write(")");
                }
            }
        }
    }

    fn emit_value(&mut self, value: &Value) {
        match value {
            Value::Int(n) => self.write(&n.to_string()),
            Value::Float(f) => {
                let s = f.to_string();
                self.write(&s);
                // Ensure decimal point is present
                if !s.contains('.') {
                    self.write(".0");
                }
            }
            Value::Bool(b) => self.write(if *b { "true" } else { "false" }),
            Value::Char(c) => {
                self.write("'");
                self.buf.push(*c);
                self.write("'");
            }
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

fn binop_prec(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Or => 1,
        BinaryOp::And => 2,
        BinaryOp::Eq | BinaryOp::NotEq => 3,
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => 4,
        BinaryOp::Add | BinaryOp::Sub => 5,
        BinaryOp::Mul | BinaryOp::Div => 6,
    }
}
