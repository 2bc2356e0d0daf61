//! Semantic types carried by the AST.
//!
//! The language has four built-in types, named by the type keywords. Types
//! are attached to declarations when they are parsed and are propagated
//! through expressions by [`DataType::combine`].

use std::fmt::Display;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Int,
    Float,
    String,
    Void,
}

impl DataType {
    /// Maps a type keyword onto its type.
    pub fn from_keyword(keyword: &str) -> Option<DataType> {
        match keyword {
            "int" => Some(DataType::Int),
            "float" => Some(DataType::Float),
            "string" => Some(DataType::String),
            "void" => Some(DataType::Void),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Int | DataType::Float)
    }

    /// Result type of a binary operator applied to `self` and `other`.
    ///
    /// Identical types combine to themselves and `int` mixed with `float`
    /// promotes to `float`. Anything else, and `void` in any position, is a
    /// type error.
    pub fn combine(self, other: DataType, operator: &str, position: Position) -> Result<DataType, Error> {
        match (self, other) {
            (DataType::Void, _) | (_, DataType::Void) => Err(Self::operand_error(self, other, operator, position)),
            (left, right) if left == right => Ok(left),
            (DataType::Int, DataType::Float) | (DataType::Float, DataType::Int) => Ok(DataType::Float),
            _ => Err(Self::operand_error(self, other, operator, position)),
        }
    }

    /// Whether a value of type `value` may be stored in a slot of type `self`.
    ///
    /// `int` widens into `float`; every other pairing must match exactly.
    pub fn is_compatible_with(&self, value: &DataType) -> bool {
        match (self, value) {
            (DataType::Void, _) | (_, DataType::Void) => false,
            (DataType::Float, DataType::Int) => true,
            (target, value) => target == value,
        }
    }

    /// Checks a stored value against its declared type.
    pub fn check_assignable(&self, value: DataType, position: Position) -> Result<(), Error> {
        if self.is_compatible_with(&value) {
            Ok(())
        } else {
            Err(Error::new(
                ErrorImpl::TypeMatchError {
                    expected: self.to_string(),
                    received: value.to_string(),
                },
                position,
            ))
        }
    }

    fn operand_error(left: DataType, right: DataType, operator: &str, position: Position) -> Error {
        Error::new(
            ErrorImpl::InvalidOperandTypes {
                operator: operator.to_string(),
                left: left.to_string(),
                right: right.to_string(),
            },
            position,
        )
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::String => "string",
            DataType::Void => "void",
        };
        write!(f, "{}", name)
    }
}
