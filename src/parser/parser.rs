//! Parser state and entry point.
//!
//! The parser walks the token stream with exactly one token of lookahead
//! and never backtracks. Statements are dispatched through a lookup table
//! keyed by the statement's leading keyword or operator; expressions go
//! through one routine per precedence level (see `expr`).
//!
//! `parse` type checks each top-level statement as soon as it is complete,
//! so the first error in source order wins and a returned program is
//! well-typed.

use std::{collections::HashMap, sync::Arc};

use tracing::debug;

use crate::{
    ast::statements::{Program, Stmt},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    type_checker::type_checker::{type_check_stmt, TypeChecker},
    Position, Span,
};

use super::{
    lookups::{create_token_lookups, StmtHandler, StmtLookup},
    stmt::parse_stmt,
};

/// Deepest allowed nesting of blocks, parentheses and operator chains.
pub const MAX_NESTING_DEPTH: usize = 128;

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// Index of the next unconsumed token
    pos: usize,
    /// The name of the source file being parsed
    file: Arc<String>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Counter for block ids
    current_id: i32,
    /// Open blocks, groupings and operator folds
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>, file: Arc<String>) -> Self {
        Parser {
            tokens,
            pos: 0,
            file,
            stmt_lookup: HashMap::new(),
            current_id: 1, // 0 is the global scope
            depth: 0,
        }
    }

    /// Returns the lookahead token, if any input remains.
    pub fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Returns the lookahead token, failing with `expected` at end of input.
    pub fn current_token_or(&self, expected: &str) -> Result<&Token, Error> {
        self.current_token().ok_or_else(|| self.end_of_input(expected))
    }

    pub fn current_is_operator(&self, lexeme: &str) -> bool {
        self.current_token().is_some_and(|token| token.is_operator(lexeme))
    }

    pub fn current_is_keyword(&self, lexeme: &str) -> bool {
        self.current_token().is_some_and(|token| token.is_keyword(lexeme))
    }

    /// Consumes the lookahead token and returns it.
    pub fn advance(&mut self) -> Result<Token, Error> {
        match self.tokens.get(self.pos) {
            Some(token) => {
                self.pos += 1;
                Ok(token.clone())
            }
            None => Err(self.end_of_input("more input")),
        }
    }

    /// Consumes a token of `expected_kind`, or fails with `message`.
    pub fn expect_error(&mut self, expected_kind: TokenKind, message: &str) -> Result<Token, Error> {
        let token = self.current_token_or(message)?;
        if token.kind != expected_kind {
            Err(self.unexpected(message))
        } else {
            self.advance()
        }
    }

    /// Consumes the operator spelled `lexeme`.
    pub fn expect_operator(&mut self, lexeme: &str) -> Result<Token, Error> {
        if self.current_is_operator(lexeme) {
            self.advance()
        } else {
            Err(self.unexpected(&format!("`{}`", lexeme)))
        }
    }

    pub fn expect_keyword(&mut self, lexeme: &str) -> Result<Token, Error> {
        if self.current_is_keyword(lexeme) {
            self.advance()
        } else {
            Err(self.unexpected(&format!("`{}`", lexeme)))
        }
    }

    /// Error for a lookahead that does not fit the rule being parsed.
    pub fn unexpected(&self, expected: &str) -> Error {
        match self.current_token() {
            Some(token) => Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: token.value.clone(),
                    message: format!("expected {}", expected),
                },
                token.span.start.clone(),
            ),
            None => self.end_of_input(expected),
        }
    }

    fn end_of_input(&self, expected: &str) -> Error {
        Error::new(
            ErrorImpl::UnexpectedEndOfInput {
                expected: expected.to_string(),
            },
            self.previous_end(),
        )
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.pos < self.tokens.len()
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Registers a statement handler for the token spelled `lexeme`.
    pub fn stmt(&mut self, lexeme: &'static str, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(lexeme, stmt_fn);
    }

    /// Advances the internal ID counter and returns the previous value.
    pub fn advance_id(&mut self) -> i32 {
        let id = self.current_id;
        self.current_id += 1;
        id
    }

    /// Opens one nesting level, failing at the lookahead once the limit is passed.
    pub fn enter_nesting(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
                self.get_position(),
            ));
        }

        self.depth += 1;
        Ok(())
    }

    pub fn exit_nesting(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }

    /// Start of the lookahead token, or the end of input when none is left.
    pub fn get_position(&self) -> Position {
        match self.current_token() {
            Some(token) => token.span.start.clone(),
            None => self.previous_end(),
        }
    }

    /// End of the most recently consumed token.
    pub fn previous_end(&self) -> Position {
        match self.pos.checked_sub(1).and_then(|index| self.tokens.get(index)) {
            Some(token) => token.span.end.clone(),
            None => Position(0, Arc::clone(&self.file)),
        }
    }

    /// Span from `start` to the end of the most recently consumed token.
    pub fn span_from(&self, start: Position) -> Span {
        Span {
            start,
            end: self.previous_end(),
        }
    }
}

/// Parses a stream of tokens into an Abstract Syntax Tree.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// registers the statement handlers and parses statements until the tokens
/// run out. Each top-level statement is type checked in the global scope
/// before the next one is parsed, so the first error aborts.
pub fn parse(tokens: Vec<Token>, file: Arc<String>) -> Result<Program, Error> {
    let mut type_checker = TypeChecker::new();
    parse_program(tokens, file, |stmt| type_check_stmt(&mut type_checker, stmt))
}

/// Builds the tree without resolving names or types.
///
/// Declarations carry their declared type; every other `data_type` is `None`.
pub fn parse_untyped(tokens: Vec<Token>, file: Arc<String>) -> Result<Program, Error> {
    parse_program(tokens, file, |_| Ok(()))
}

fn parse_program<F>(tokens: Vec<Token>, file: Arc<String>, mut on_stmt: F) -> Result<Program, Error>
where
    F: FnMut(&mut Stmt) -> Result<(), Error>,
{
    let mut parser = Parser::new(tokens, Arc::clone(&file));
    create_token_lookups(&mut parser);

    let mut body = vec![];

    while parser.has_tokens() {
        let mut stmt = parse_stmt(&mut parser)?;
        on_stmt(&mut stmt)?;
        body.push(stmt);
    }

    debug!(file = %file, statements = body.len(), "parsed program");

    Ok(Program {
        body,
        span: parser.span_from(Position(0, file)),
    })
}
