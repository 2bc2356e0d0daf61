use lazy_static::lazy_static;
use std::{collections::HashSet, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("if");
        set.insert("else");
        set.insert("while");
        set.insert("for");
        set.insert("int");
        set.insert("float");
        set.insert("string");
        set.insert("void");
        set.insert("return");
        set
    };
}

/// Lexical class of a token. The lexeme itself tells apart keywords and operators.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Integer,
    Float,
    String,
    Operator,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Integer => "INTEGER",
            TokenKind::Float => "FLOAT",
            TokenKind::String => "STRING",
            TokenKind::Operator => "OPERATOR",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.kind, self.value)
    }
}

impl Token {
    /// Whether this is the keyword or operator spelled `lexeme`.
    pub fn is(&self, kind: TokenKind, lexeme: &str) -> bool {
        self.kind == kind && self.value == lexeme
    }

    pub fn is_operator(&self, lexeme: &str) -> bool {
        self.is(TokenKind::Operator, lexeme)
    }

    pub fn is_keyword(&self, lexeme: &str) -> bool {
        self.is(TokenKind::Keyword, lexeme)
    }

    /// Type keywords open a variable declaration.
    pub fn is_type_keyword(&self) -> bool {
        self.kind == TokenKind::Keyword
            && matches!(self.value.as_str(), "int" | "float" | "string" | "void")
    }

    pub fn as_pair(&self) -> (TokenKind, &str) {
        (self.kind, self.value.as_str())
    }
}
