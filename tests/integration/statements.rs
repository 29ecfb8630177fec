// Statement forms: skip, block, assignment, if/else, while.

mod common;
use common::*;

use cpplite::parser::ast::*;

#[test]
fn conditional_with_else() {
    let program = parse("int main ( ) { bool b ; if ( b ) b = false ; else b = true ; }");
    assert_eq!(program.body.members.len(), 1);
    assert_eq!(
        program.body.members[0],
        Statement::Conditional(Conditional {
            test: var("b"),
            then_branch: Box::new(assign("b", bool_lit(false))),
            else_branch: Some(Box::new(assign("b", bool_lit(true)))),
        })
    );
}

#[test]
fn conditional_without_else() {
    let program = parse(&in_main("int x;", "if (x > 0) x = 0; x = 1;"));
    assert_eq!(program.body.members.len(), 2);
    let Statement::Conditional(c) = &program.body.members[0] else {
        panic!("expected conditional");
    };
    assert!(c.else_branch.is_none());
    assert_eq!(program.body.members[1], assign("x", int(1)));
}

#[test]
fn dangling_else_binds_to_nearest_if() {
    let program = parse(&in_main("int x;", "if (x) if (x) x = 1; else x = 2;"));
    let Statement::Conditional(outer) = &program.body.members[0] else {
        panic!("expected conditional");
    };
    assert!(outer.else_branch.is_none());
    let Statement::Conditional(inner) = outer.then_branch.as_ref() else {
        panic!("expected nested conditional");
    };
    assert_eq!(inner.else_branch.as_deref(), Some(&assign("x", int(2))));
}

#[test]
fn while_loop_with_block_body() {
    let program = parse(&in_main("int i;", "while (i < 10) { i = i + 1; }"));
    assert_eq!(
        program.body.members[0],
        Statement::Loop(Loop {
            test: bin(BinaryOp::Lt, var("i"), int(10)),
            body: Box::new(Statement::Block(Block {
                members: vec![assign("i", bin(BinaryOp::Add, var("i"), int(1)))],
            })),
        })
    );
}

#[test]
fn while_loop_with_single_statement_body() {
    let program = parse(&in_main("int i;", "while (i) i = 0;"));
    let Statement::Loop(l) = &program.body.members[0] else {
        panic!("expected loop");
    };
    assert_eq!(*l.body, assign("i", int(0)));
}

#[test]
fn empty_statements_are_skips() {
    let program = parse(&in_main("", "; ; ;"));
    assert_eq!(program.body.members, vec![Statement::Skip, Statement::Skip, Statement::Skip]);
}

#[test]
fn empty_statement_list_is_accepted() {
    let program = parse("int main(){}");
    assert!(program.body.members.is_empty());
}

#[test]
fn nested_blocks_preserve_order() {
    let program = parse(&in_main("int a;", "{ a = 1; { a = 2; } } a = 3;"));
    assert_eq!(
        program.body.members,
        vec![
            Statement::Block(Block {
                members: vec![
                    assign("a", int(1)),
                    Statement::Block(Block { members: vec![assign("a", int(2))] }),
                ],
            }),
            assign("a", int(3)),
        ]
    );
}

#[test]
fn empty_nested_block() {
    let program = parse(&in_main("", "{ }"));
    assert_eq!(program.body.members, vec![Statement::Block(Block::default())]);
}

#[test]
fn while_with_empty_body() {
    let program = parse(&in_main("bool b;", "while (b) ;"));
    let Statement::Loop(l) = &program.body.members[0] else {
        panic!("expected loop");
    };
    assert_eq!(*l.body, Statement::Skip);
}

#[test]
fn cast_assignment() {
    let program = parse(&in_main("float f;", "f = float ( 3 ) ;"));
    assert_eq!(program.body.members[0], assign("f", un(UnaryOp::Cast(Type::Float), int(3))));
}

#[test]
fn literal_values() {
    let program = parse(&in_main("int i; float f; char c; bool b;", "i = 7; f = 2.5; c = 'z'; b = true;"));
    let sources: Vec<&Expression> = program
        .body
        .members
        .iter()
        .map(|s| match s {
            Statement::Assignment(a) => &a.source,
            other => panic!("expected assignment, got {other:?}"),
        })
        .collect();
    assert_eq!(*sources[0], Expression::Value(Value::Int(7)));
    assert_eq!(*sources[1], Expression::Value(Value::Float(2.5)));
    assert_eq!(*sources[2], Expression::Value(Value::Char('z')));
    assert_eq!(*sources[3], Expression::Value(Value::Bool(true)));
}

#[test]
fn max_int_literal() {
    assert_eq!(assigned_expr("2147483647"), int(i32::MAX));
}

#[test]
fn comments_are_ignored() {
    let src = "int main ( ) {\n  // counter\n  int i;\n  i = 0; // reset\n}\n";
    let program = parse(src);
    assert_eq!(program.decls.len(), 1);
    assert_eq!(program.body.members, vec![assign("i", int(0))]);
}
