use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::{expressions::BinaryOperator, statements::Stmt},
    errors::errors::Error,
};

use super::{parser::Parser, stmt::*};

/// Precedence levels for binary operators, loosest first.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    LogicalOr,
    LogicalAnd,
    Equality,
    Relational,
    Additive,
    Multiplicative,
}

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<&'static str, StmtHandler>;

lazy_static! {
    pub static ref BINARY_OPERATOR_LOOKUP: HashMap<&'static str, (BinaryOperator, BindingPower)> = {
        let mut map = HashMap::new();
        map.insert("||", (BinaryOperator::Or, BindingPower::LogicalOr));
        map.insert("&&", (BinaryOperator::And, BindingPower::LogicalAnd));
        map.insert("==", (BinaryOperator::Equals, BindingPower::Equality));
        map.insert("!=", (BinaryOperator::NotEquals, BindingPower::Equality));
        map.insert("<", (BinaryOperator::Less, BindingPower::Relational));
        map.insert(">", (BinaryOperator::Greater, BindingPower::Relational));
        map.insert("<=", (BinaryOperator::LessEquals, BindingPower::Relational));
        map.insert(">=", (BinaryOperator::GreaterEquals, BindingPower::Relational));
        map.insert("+", (BinaryOperator::Plus, BindingPower::Additive));
        map.insert("-", (BinaryOperator::Minus, BindingPower::Additive));
        map.insert("*", (BinaryOperator::Star, BindingPower::Multiplicative));
        map.insert("/", (BinaryOperator::Slash, BindingPower::Multiplicative));
        map
    };
}

/// Registers the statement handlers, keyed by the statement's leading token.
///
/// Statements that start with an identifier are assignments and are not
/// in the table.
pub fn create_token_lookups(parser: &mut Parser) {
    // Declarations
    parser.stmt("int", parse_var_decl_stmt);
    parser.stmt("float", parse_var_decl_stmt);
    parser.stmt("string", parse_var_decl_stmt);
    parser.stmt("void", parse_var_decl_stmt);

    // Control flow
    parser.stmt("if", parse_if_stmt);
    parser.stmt("while", parse_while_stmt);
    parser.stmt("for", parse_for_stmt);
    parser.stmt("return", parse_return_stmt);
    parser.stmt("{", parse_block_stmt);
}
