#![allow(clippy::module_inception)]

use std::{fmt::Display, sync::Arc};

use crate::{ast::statements::Program, errors::errors::Error, lexer::lexer::tokenize, parser::parser::parse};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

/// Byte offset into a source file, paired with the file's name.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub u32, pub Arc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Arc::new(String::from("<null>")))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.1, self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Finds the line containing `position`.
///
/// Returns the 1-based line number, the line's text and the byte column of
/// `position` within that line. Offsets past the end map onto the last line.
pub fn line_at_position(source: &str, position: u32) -> (usize, String, usize) {
    let pos = (position as usize).min(source.len());

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return (line_number, line.to_string(), pos - start);
        }

        start = end;
        line_number += 1;
    }

    // End of input: point just past the final line
    match source.split_inclusive('\n').last() {
        Some(last) if !last.ends_with('\n') => (line_number - 1, last.to_string(), last.len()),
        _ => (line_number, String::new(), 0),
    }
}

/// Tokenizes and parses `source` in one go.
pub fn parse_source(source: &str, file: Option<String>) -> Result<Program, Error> {
    let file = Arc::new(file.unwrap_or_else(|| String::from("shell")));
    let tokens = tokenize(source, Some(file.as_ref().clone()))?;
    parse(tokens, file)
}
