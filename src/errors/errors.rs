use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// Broad class of a failure. Every failure aborts the whole invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Type,
    Scope,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Lexical => "LexicalError",
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::Type => "TypeError",
            ErrorKind::Scope => "ScopeError",
        };
        write!(f, "{}", name)
    }
}

#[derive(Error, Debug, Clone)]
#[error("{}: {internal_error} ({position})", .internal_error.kind())]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn kind(&self) -> ErrorKind {
        self.internal_error.kind()
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::UnexpectedEndOfInput { .. } => "UnexpectedEndOfInput",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::InvalidOperandTypes { .. } => "InvalidOperandTypes",
            ErrorImpl::InvalidUnaryOperand { .. } => "InvalidUnaryOperand",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::UnexpectedEndOfInput { expected } => {
                ErrorTip::Suggestion(format!("Input ended while expecting {}", expected))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::NestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "Blocks, parentheses and operator chains may nest at most {} levels",
                limit
            )),
            ErrorImpl::TypeMatchError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::InvalidOperandTypes { operator, left, right } => {
                ErrorTip::Suggestion(format!(
                    "Operator `{}` cannot combine `{}` and `{}`",
                    operator, left, right
                ))
            }
            ErrorImpl::InvalidUnaryOperand { operator, operand } => ErrorTip::Suggestion(
                format!("Operator `{}` cannot be applied to `{}`", operator, operand),
            ),
            ErrorImpl::VariableAlreadyDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` already declared", variable))
            }
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unexpected character {token:?} at position {offset}")]
    UnrecognisedToken { token: String, offset: u32 },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput { expected: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
    #[error("types do not match: expected {expected}, received {received}")]
    TypeMatchError { expected: String, received: String },
    #[error("operator {operator:?} cannot combine {left} and {right}")]
    InvalidOperandTypes { operator: String, left: String, right: String },
    #[error("operator {operator:?} cannot be applied to {operand}")]
    InvalidUnaryOperand { operator: String, operand: String },
    #[error("variable {variable:?} already declared")]
    VariableAlreadyDeclared { variable: String },
    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
}

impl ErrorImpl {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorImpl::UnrecognisedToken { .. } => ErrorKind::Lexical,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::UnexpectedEndOfInput { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::NestingTooDeep { .. } => ErrorKind::Syntax,
            ErrorImpl::TypeMatchError { .. }
            | ErrorImpl::InvalidOperandTypes { .. }
            | ErrorImpl::InvalidUnaryOperand { .. } => ErrorKind::Type,
            ErrorImpl::VariableAlreadyDeclared { .. } | ErrorImpl::VariableNotDeclared { .. } => {
                ErrorKind::Scope
            }
        }
    }
}
