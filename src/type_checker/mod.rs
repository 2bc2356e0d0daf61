//! Scope resolution and type checking.
//!
//! Runs over a syntactically complete [`Program`](crate::ast::statements::Program)
//! and fills in every `data_type` the parser left empty, while:
//!
//! - Resolving each name against the innermost scope that declares it
//! - Rejecting redeclaration within one scope and use before declaration
//! - Combining operand types for binary and unary operators
//! - Checking initializers and assignments against the declared type
//!
//! Scopes are the global scope, one per block and one per `for` header.

pub mod type_checker;
