//! Type keyword parsing.
//!
//! A declaration starts with one of the type keywords `int`, `float`,
//! `string` or `void`; this turns that keyword into a [`DataType`].

use crate::{
    ast::types::DataType,
    errors::errors::Error,
    lexer::tokens::TokenKind,
    Position,
};

use super::parser::Parser;

/// Consumes a type keyword, returning its type and where it started.
pub fn parse_type(parser: &mut Parser) -> Result<(DataType, Position), Error> {
    let message = "a type keyword";
    let token = parser.current_token_or(message)?;

    match token.kind {
        TokenKind::Keyword => match DataType::from_keyword(&token.value) {
            Some(data_type) => {
                let token = parser.advance()?;
                Ok((data_type, token.span.start))
            }
            None => Err(parser.unexpected(message)),
        },
        _ => Err(parser.unexpected(message)),
    }
}
