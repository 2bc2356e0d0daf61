//! Lexical analysis module.
//!
//! This module contains the tokenizer that converts source text into a
//! stream of tokens for parsing. It handles:
//!
//! - An ordered table of anchored regex rules, tried in priority order
//! - Whole-word keywords, identifiers and numeric literals
//! - Longest-match multi-character operators
//! - Byte-offset spans on every token for error reporting

pub mod lexer;
pub mod tokens;
