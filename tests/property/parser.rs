// Property tests for the C++Lite parser.
//
// 1. Round trip: pretty-printing a generated AST and parsing it back yields
//    the same AST.
// 2. Determinism: the same source always produces the same result.
// 3. No panics: arbitrary text and random token soup are either parsed or
//    rejected with an error, never a crash.

use proptest::prelude::*;

use cpplite::diagnostics::CompileError;
use cpplite::parser::ast::*;
use cpplite::pretty::{pretty_print, pretty_print_expression};
use cpplite::{parse_expression, parse_program};

const KEYWORDS: &[&str] = &[
    "int", "float", "bool", "char", "main", "if", "else", "while", "true", "false",
];

// =============================================================================
// Generators
// =============================================================================

fn arb_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,5}".prop_filter("keywords are not names", |s| !KEYWORDS.contains(&s.as_str()))
}

fn arb_type() -> impl Strategy<Value = Type> {
    prop::sample::select(vec![Type::Int, Type::Float, Type::Bool, Type::Char])
}

// Literals are non-negative; negation is a unary operator.
fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        (0..100_000i32).prop_map(Value::Int),
        (0..10_000u32).prop_map(|n| Value::Float(n as f32 / 4.0)),
        any::<bool>().prop_map(Value::Bool),
        proptest::char::range('a', 'z').prop_map(Value::Char),
    ]
}

fn arb_binop() -> impl Strategy<Value = BinaryOp> {
    use BinaryOp::*;
    prop::sample::select(vec![Or, And, Eq, NotEq, Lt, LtEq, Gt, GtEq, Add, Sub, Mul, Div])
}

fn arb_unop() -> impl Strategy<Value = UnaryOp> {
    prop_oneof![
        Just(UnaryOp::Not),
        Just(UnaryOp::Neg),
        arb_type().prop_map(UnaryOp::Cast),
    ]
}

fn arb_expr() -> impl Strategy<Value = Expression> {
    let leaf = prop_oneof![
        arb_name().prop_map(Expression::var),
        arb_value().prop_map(Expression::Value),
    ];
    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (arb_binop(), inner.clone(), inner.clone())
                .prop_map(|(op, lhs, rhs)| Expression::binary(op, lhs, rhs)),
            (arb_unop(), inner).prop_map(|(op, operand)| Expression::unary(op, operand)),
        ]
    })
}

fn arb_stmt() -> impl Strategy<Value = Statement> {
    let leaf = prop_oneof![
        Just(Statement::Skip),
        (arb_name(), arb_expr()).prop_map(|(target, source)| {
            Statement::Assignment(Assignment { target: Variable::new(target), source })
        }),
    ];
    leaf.prop_recursive(3, 16, 3, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..3)
                .prop_map(|members| Statement::Block(Block { members })),
            (arb_expr(), inner.clone(), prop::option::of(inner.clone())).prop_map(
                |(test, then_branch, else_branch)| {
                    // An else-less if inside the then branch would capture our else.
                    let then_branch = match (&else_branch, then_branch) {
                        (Some(_), s @ (Statement::Conditional(_) | Statement::Loop(_))) => {
                            Statement::Block(Block { members: vec![s] })
                        }
                        (_, s) => s,
                    };
                    Statement::Conditional(Conditional {
                        test,
                        then_branch: Box::new(then_branch),
                        else_branch: else_branch.map(Box::new),
                    })
                }
            ),
            (arb_expr(), inner)
                .prop_map(|(test, body)| Statement::Loop(Loop { test, body: Box::new(body) })),
        ]
    })
}

fn arb_program() -> impl Strategy<Value = Program> {
    (
        prop::collection::vec((arb_name(), arb_type()), 0..5),
        prop::collection::vec(arb_stmt(), 0..5),
    )
        .prop_map(|(decls, members)| Program {
            decls: decls
                .into_iter()
                .map(|(name, ty)| Declaration { var: Variable::new(name), ty })
                .collect(),
            body: Block { members },
        })
}

/// Lexemes of every token kind, including ones that never start a statement.
fn arb_token_soup() -> impl Strategy<Value = String> {
    let lexeme = prop::sample::select(vec![
        "int", "float", "bool", "char", "main", "if", "else", "while", "true", "false",
        "x", "y", "0", "42", "2.5", "'c'", "=", "==", "!=", "<", "<=", ">", ">=", "+",
        "-", "*", "/", "!", "&&", "||", "(", ")", "{", "}", ",", ";",
    ]);
    prop::collection::vec(lexeme, 0..40).prop_map(|parts| parts.join(" "))
}

// =============================================================================
// Round trip
// =============================================================================

#[test]
fn prop_program_roundtrip() {
    proptest!(|(program in arb_program())| {
        let source = pretty_print(&program);
        let reparsed = parse_program(&source)
            .unwrap_or_else(|e| panic!("pretty output did not parse: {e}\n{source}"));
        prop_assert_eq!(reparsed, program);
    });
}

#[test]
fn prop_expression_roundtrip() {
    proptest!(|(expr in arb_expr())| {
        let source = pretty_print_expression(&expr);
        let reparsed = parse_expression(&source)
            .unwrap_or_else(|e| panic!("pretty output did not parse: {e}\n{source}"));
        prop_assert_eq!(reparsed, expr);
    });
}

#[test]
fn prop_pretty_print_is_idempotent() {
    proptest!(|(program in arb_program())| {
        let first = pretty_print(&program);
        let second = pretty_print(&parse_program(&first).unwrap());
        prop_assert_eq!(first, second);
    });
}

// =============================================================================
// Determinism and robustness
// =============================================================================

#[test]
fn prop_parse_is_deterministic() {
    proptest!(|(source in arb_token_soup())| {
        let first = parse_program(&source);
        let second = parse_program(&source);
        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(a), Err(b)) => prop_assert_eq!(a.to_string(), b.to_string()),
            _ => prop_assert!(false, "results differ for {:?}", source),
        }
    });
}

#[test]
fn prop_parser_never_panics_on_text() {
    proptest!(|(source in "\\PC{0,300}")| {
        let _ = parse_program(&source);
        let _ = parse_expression(&source);
    });
}

#[test]
fn prop_token_soup_errors_point_into_source() {
    proptest!(|(body in arb_token_soup())| {
        let source = format!("int main ( ) {{ {body} }}");
        match parse_program(&source) {
            Ok(_) => {}
            Err(CompileError::Syntax { span, .. }) => {
                prop_assert!(span.start <= span.end);
                prop_assert!(span.end <= source.len());
            }
            Err(other) => prop_assert!(false, "unexpected error kind: {other}"),
        }
    });
}
