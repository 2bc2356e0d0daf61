//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the recursive-descent parser that transforms a
//! stream of tokens into an Abstract Syntax Tree. It handles:
//!
//! - Statement parsing (declarations, assignments, control flow, blocks)
//! - Expression parsing with one routine per precedence level
//!
//! Names and types are resolved afterwards by `type_checker`. Parsing stops
//! at the first error; there is no recovery.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
