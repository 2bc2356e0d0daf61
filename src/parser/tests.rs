//! Unit tests for the parser module.
//!
//! Exercises declarations, precedence and associativity, control flow,
//! the syntax errors raised while building the tree and the types and
//! scopes resolved once it is complete.

use std::sync::Arc;

use super::parser::{parse, parse_untyped, MAX_NESTING_DEPTH};
use crate::{
    ast::{
        ast::{Node, NodeType},
        expressions::{BinaryOperator, Expr, PrefixOperator},
        statements::{Program, Stmt},
        types::DataType,
    },
    errors::errors::{Error, ErrorImpl, ErrorKind},
    lexer::lexer::tokenize,
};

fn parse_str(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source, Some("test.c".to_string())).unwrap();
    parse(tokens, Arc::new("test.c".to_string()))
}

fn error_kind(source: &str) -> ErrorKind {
    parse_str(source).unwrap_err().kind()
}

/// Initializer of the declaration at `index`.
fn initializer(program: &Program, index: usize) -> &Expr {
    match &program.body[index] {
        Stmt::VarDecl(decl) => decl.assigned_value.as_ref().unwrap(),
        other => panic!("expected a declaration, found {:?}", other.get_stmt_type()),
    }
}

fn binary(expr: &Expr) -> (&Expr, BinaryOperator, &Expr) {
    match expr {
        Expr::Binary(binary) => (&binary.left, binary.operator, &binary.right),
        _ => panic!("expected a binary expression, found {:?}", expr.get_expr_type()),
    }
}

fn integer(expr: &Expr) -> i64 {
    match expr {
        Expr::Integer(literal) => literal.value,
        _ => panic!("expected an integer literal, found {:?}", expr.get_expr_type()),
    }
}

#[test]
fn test_parse_variable_declaration() {
    let program = parse_str("int x = 5;").unwrap();
    assert_eq!(program.body.len(), 1);

    let node = program.as_node().children()[0];
    assert_eq!(node.node_type(), NodeType::VarDecl);
    assert_eq!(node.value().as_deref(), Some("x"));
    assert_eq!(node.data_type(), Some(DataType::Int));

    let children = node.children();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].node_type(), NodeType::Literal);
    assert_eq!(children[0].value().as_deref(), Some("5"));
    assert_eq!(children[0].data_type(), Some(DataType::Int));
}

#[test]
fn test_parse_declaration_without_initializer() {
    let program = parse_str("float f; void v;").unwrap();

    for (stmt, ty) in program.iter().zip([DataType::Float, DataType::Void]) {
        match stmt {
            Stmt::VarDecl(decl) => {
                assert_eq!(decl.data_type, ty);
                assert!(decl.assigned_value.is_none());
            }
            _ => panic!("expected a declaration"),
        }
    }
}

#[test]
fn test_subtraction_is_left_associative() {
    let program = parse_str("int x = 10 - 5 - 2;").unwrap();

    let (left, operator, right) = binary(initializer(&program, 0));
    assert_eq!(operator, BinaryOperator::Minus);
    assert_eq!(integer(right), 2);

    let (inner_left, inner_operator, inner_right) = binary(left);
    assert_eq!(inner_operator, BinaryOperator::Minus);
    assert_eq!(integer(inner_left), 10);
    assert_eq!(integer(inner_right), 5);
}

#[test]
fn test_multiplication_binds_tighter() {
    let program = parse_str("int x = 2 + 3 * 4;").unwrap();

    let (left, operator, right) = binary(initializer(&program, 0));
    assert_eq!(operator, BinaryOperator::Plus);
    assert_eq!(integer(left), 2);

    let (inner_left, inner_operator, inner_right) = binary(right);
    assert_eq!(inner_operator, BinaryOperator::Star);
    assert_eq!(integer(inner_left), 3);
    assert_eq!(integer(inner_right), 4);
}

#[test]
fn test_parentheses_override_precedence() {
    let program = parse_str("int x = (2 + 3) * 4;").unwrap();

    let (left, operator, right) = binary(initializer(&program, 0));
    assert_eq!(operator, BinaryOperator::Star);
    assert_eq!(integer(right), 4);
    assert_eq!(binary(left).1, BinaryOperator::Plus);
}

#[test]
fn test_precedence_levels() {
    // a || b && c == d < e + f * g
    let program = parse_str("int a; int b; int c; int d; int e; int f; int g; int r = a || b && c == d < e + f * g;").unwrap();

    let mut expr = initializer(&program, 7);
    let expected = [
        BinaryOperator::Or,
        BinaryOperator::And,
        BinaryOperator::Equals,
        BinaryOperator::Less,
        BinaryOperator::Plus,
        BinaryOperator::Star,
    ];

    for operator in expected {
        let (_, found, right) = binary(expr);
        assert_eq!(found, operator);
        expr = right;
    }
}

#[test]
fn test_prefix_operators() {
    let program = parse_str("int x = 3; int y = -x; int z = !x; float w = -2.5;").unwrap();

    match initializer(&program, 1) {
        Expr::Prefix(prefix) => {
            assert_eq!(prefix.operator, PrefixOperator::Negate);
            assert_eq!(prefix.data_type, Some(DataType::Int));
        }
        _ => panic!("expected a prefix expression"),
    }
    match initializer(&program, 2) {
        Expr::Prefix(prefix) => assert_eq!(prefix.operator, PrefixOperator::Not),
        _ => panic!("expected a prefix expression"),
    }
    assert_eq!(initializer(&program, 3).get_type(), Some(DataType::Float));
}

#[test]
fn test_unary_on_string_is_type_error() {
    assert_eq!(error_kind("string s = \"a\"; int x = -s;"), ErrorKind::Type);
    assert_eq!(error_kind("string s = \"a\"; int x = !s;"), ErrorKind::Type);
}

#[test]
fn test_int_float_promotion() {
    let program = parse_str("int x = 5; float y = 3.14; float z = y + x;").unwrap();

    let value = initializer(&program, 2);
    assert_eq!(value.get_type(), Some(DataType::Float));
    let (left, _, right) = binary(value);
    assert_eq!(left.get_type(), Some(DataType::Float));
    assert_eq!(right.get_type(), Some(DataType::Int));
}

#[test]
fn test_string_plus_int_is_type_error() {
    let error = parse_str("string hello = \"hi\"; int bad = hello + 5;").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Type);
    assert_eq!(
        *error.get_impl(),
        ErrorImpl::InvalidOperandTypes {
            operator: "+".to_string(),
            left: "string".to_string(),
            right: "int".to_string()
        }
    );
}

#[test]
fn test_declaration_type_mismatch() {
    let error = parse_str("int x = 2.5;").unwrap_err();
    assert_eq!(
        *error.get_impl(),
        ErrorImpl::TypeMatchError {
            expected: "int".to_string(),
            received: "float".to_string()
        }
    );
    assert_eq!(error.get_position().0, 8);

    assert_eq!(error_kind("string s = 1;"), ErrorKind::Type);
    assert_eq!(error_kind("int x; x = \"text\";"), ErrorKind::Type);
    assert_eq!(error_kind("void v = 1;"), ErrorKind::Type);
}

#[test]
fn test_int_widens_into_float() {
    assert!(parse_str("float f = 1;").is_ok());
    assert!(parse_str("float f; f = 2 * 3;").is_ok());
}

#[test]
fn test_redeclaration_is_scope_error() {
    let error = parse_str("int x = 1; int x = 2;").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Scope);
    assert_eq!(
        *error.get_impl(),
        ErrorImpl::VariableAlreadyDeclared { variable: "x".to_string() }
    );
}

#[test]
fn test_undeclared_assignment_is_scope_error() {
    let error = parse_str("y = 5;").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Scope);
    assert_eq!(*error.get_impl(), ErrorImpl::VariableNotDeclared { variable: "y".to_string() });
}

#[test]
fn test_undeclared_use_is_scope_error() {
    assert_eq!(error_kind("int x = y + 1;"), ErrorKind::Scope);
    assert_eq!(error_kind("int x = x;"), ErrorKind::Scope);
}

#[test]
fn test_inner_scope_may_shadow() {
    let program = parse_str("int x = 1; { float x = 2.5; x = 1.5; } x = 3;").unwrap();
    assert_eq!(program.body.len(), 3);

    match &program.body[2] {
        Stmt::Assignment(assignment) => assert_eq!(assignment.data_type, Some(DataType::Int)),
        _ => panic!("expected an assignment"),
    }
}

#[test]
fn test_block_scope_ends_with_block() {
    assert_eq!(error_kind("{ int inner = 1; } inner = 2;"), ErrorKind::Scope);
    assert_eq!(error_kind("for (int i = 0; i < 3; i = i + 1) { } i = 0;"), ErrorKind::Scope);
}

#[test]
fn test_if_else_children() {
    let program = parse_str("int x = 1; int y; if (x > 5) { y = 1; } else { y = 2; }").unwrap();

    let node = program.as_node().children()[2];
    assert_eq!(node.node_type(), NodeType::If);

    let kinds: Vec<NodeType> = node.children().iter().map(|child| child.node_type()).collect();
    assert_eq!(kinds, vec![NodeType::BinaryOp, NodeType::Block, NodeType::Block]);
}

#[test]
fn test_if_without_else() {
    let program = parse_str("int x; if (x) { x = 1; }").unwrap();

    match &program.body[1] {
        Stmt::If(if_stmt) => {
            assert!(if_stmt.else_body.is_none());
            assert_eq!(if_stmt.then_body.body.len(), 1);
        }
        _ => panic!("expected an if statement"),
    }
}

#[test]
fn test_while_loop() {
    let program = parse_str("int i = 0; while (i < 10) { i = i + 1; }").unwrap();

    let node = program.as_node().children()[1];
    assert_eq!(node.node_type(), NodeType::While);
    let kinds: Vec<NodeType> = node.children().iter().map(|child| child.node_type()).collect();
    assert_eq!(kinds, vec![NodeType::BinaryOp, NodeType::Block]);
}

#[test]
fn test_for_loop() {
    let program = parse_str("int total = 0; for (int i = 0; i < 5; i = i + 1) { total = total + i; }").unwrap();

    let node = program.as_node().children()[1];
    assert_eq!(node.node_type(), NodeType::For);
    let kinds: Vec<NodeType> = node.children().iter().map(|child| child.node_type()).collect();
    assert_eq!(
        kinds,
        vec![NodeType::VarDecl, NodeType::BinaryOp, NodeType::Assignment, NodeType::Block]
    );
}

#[test]
fn test_for_loop_with_assignment_init() {
    assert!(parse_str("int i; for (i = 0; i < 5; i = i + 1) { }").is_ok());
    assert_eq!(error_kind("for (5; 1; i = 1) { }"), ErrorKind::Syntax);
}

#[test]
fn test_return_statement() {
    let program = parse_str("float f = 1.5; return f * 2; return;").unwrap();

    match (&program.body[1], &program.body[2]) {
        (Stmt::Return(with_value), Stmt::Return(bare)) => {
            assert_eq!(with_value.data_type, Some(DataType::Float));
            assert!(bare.value.is_none());
            assert_eq!(bare.data_type, Some(DataType::Void));
        }
        _ => panic!("expected two return statements"),
    }
}

#[test]
fn test_unclosed_block_is_syntax_error() {
    // Undeclared names are never reached: the tree is incomplete first
    let error = parse_str("if (x > 5) { y = 1;").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Syntax);
    assert!(matches!(error.get_impl(), ErrorImpl::UnexpectedEndOfInput { .. }));
}

#[test]
fn test_earlier_type_error_wins_over_later_syntax_error() {
    let error = parse_str("int x = \"s\"; int y = ;").unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Type);
    assert_eq!(error.get_position().0, 8);

    assert_eq!(error_kind("y = 1; int z = ;"), ErrorKind::Scope);
    assert_eq!(error_kind("int z = ; y = 1;"), ErrorKind::Syntax);
}

#[test]
fn test_deep_parentheses_are_rejected() {
    let depth = 10_000;
    let source = format!("int x = {}1{};", "(".repeat(depth), ")".repeat(depth));

    let error = parse_str(&source).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Syntax);
    assert_eq!(*error.get_impl(), ErrorImpl::NestingTooDeep { limit: MAX_NESTING_DEPTH });
    // Reported at the first parenthesis past the limit
    assert_eq!(error.get_position().0 as usize, 8 + MAX_NESTING_DEPTH);
}

#[test]
fn test_deep_blocks_are_rejected() {
    let depth = 10_000;
    let source = format!("{}{}", "{".repeat(depth), "}".repeat(depth));

    assert_eq!(error_kind(&source), ErrorKind::Syntax);
}

#[test]
fn test_nesting_within_limit() {
    let depth = MAX_NESTING_DEPTH - 1;
    let source = format!("int x = {}1{};", "(".repeat(depth), ")".repeat(depth));
    assert!(parse_str(&source).is_ok());

    let terms = vec!["1"; MAX_NESTING_DEPTH].join(" + ");
    assert!(parse_str(&format!("int y = {};", terms)).is_ok());

    let terms = vec!["1"; MAX_NESTING_DEPTH + 2].join(" + ");
    assert_eq!(error_kind(&format!("int y = {};", terms)), ErrorKind::Syntax);
}

#[test]
fn test_missing_semicolon() {
    let error = parse_str("int x = 5 int y = 6;").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Syntax);
    assert_eq!(error.get_position().0, 10);
    assert_eq!(error_kind("int x = 5"), ErrorKind::Syntax);
}

#[test]
fn test_unexpected_statement_start() {
    assert_eq!(error_kind("5;"), ErrorKind::Syntax);
    assert_eq!(error_kind("else { }"), ErrorKind::Syntax);
    assert_eq!(error_kind("int = 5;"), ErrorKind::Syntax);
    assert_eq!(error_kind("int x = (1 + 2;"), ErrorKind::Syntax);
}

#[test]
fn test_integer_overflow() {
    let error = parse_str("int x = 99999999999999999999;").unwrap_err();
    assert!(matches!(error.get_impl(), ErrorImpl::NumberParseError { .. }));
}

#[test]
fn test_empty_program() {
    let program = parse_str("").unwrap();
    assert!(program.body.is_empty());
    assert_eq!(program.pretty_print(), "Program(value=None, type=None)\n");
}

#[test]
fn test_untyped_tree_has_no_expression_types() {
    let tokens = tokenize("int x = 1; x = x + 2;", None).unwrap();
    let program = parse_untyped(tokens, Arc::new("shell".to_string())).unwrap();

    match &program.body[1] {
        Stmt::Assignment(assignment) => {
            assert_eq!(assignment.data_type, None);
            assert_eq!(assignment.value.get_type(), None);
        }
        _ => panic!("expected an assignment"),
    }
}

#[test]
fn test_block_ids_are_unique() {
    let program = parse_str("{ } { { } }").unwrap();

    let mut ids = vec![];
    program.as_node().walk(&mut |node, _| {
        if let Node::Block(block) = node {
            ids.push(block.id);
        }
        if let Node::Stmt(Stmt::Block(block)) = node {
            ids.push(block.id);
        }
    });

    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[test]
fn test_pretty_print() {
    let program = parse_str("int x = 5; float y = x * 2.0;").unwrap();

    let expected = "\
Program(value=None, type=None)
  VarDecl(value=x, type=int)
    Literal(value=5, type=int)
  VarDecl(value=y, type=float)
    BinaryOp(value=*, type=float)
      Identifier(value=x, type=int)
      Literal(value=2.0, type=float)
";
    assert_eq!(program.pretty_print(), expected);
}
