use std::fmt::Display;

use crate::Span;

use super::{ast::ExprType, types::DataType};

/// Binary operators, lowest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Or,
    And,
    Equals,
    NotEquals,
    Less,
    Greater,
    LessEquals,
    GreaterEquals,
    Plus,
    Minus,
    Star,
    Slash,
}

impl BinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Or => "||",
            BinaryOperator::And => "&&",
            BinaryOperator::Equals => "==",
            BinaryOperator::NotEquals => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::Greater => ">",
            BinaryOperator::LessEquals => "<=",
            BinaryOperator::GreaterEquals => ">=",
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Star => "*",
            BinaryOperator::Slash => "/",
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixOperator {
    Negate,
    Not,
}

impl PrefixOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrefixOperator::Negate => "-",
            PrefixOperator::Not => "!",
        }
    }
}

impl Display for PrefixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// LITERALS

#[derive(Debug, Clone, PartialEq)]
pub struct IntegerExpr {
    pub value: i64,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatExpr {
    pub value: f64,
    pub span: Span,
}

/// String literal, stored without its quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct StringExpr {
    pub value: String,
    pub span: Span,
}

/// Reference to a declared variable, typed from its declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolExpr {
    pub value: String,
    pub data_type: Option<DataType>,
    pub span: Span,
}

// OPERATIONS

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: BinaryOperator,
    pub right: Box<Expr>,
    pub data_type: Option<DataType>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub operator: PrefixOperator,
    pub right_expr: Box<Expr>,
    pub data_type: Option<DataType>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Integer(IntegerExpr),
    Float(FloatExpr),
    String(StringExpr),
    Symbol(SymbolExpr),
    Binary(BinaryExpr),
    Prefix(PrefixExpr),
}

impl Expr {
    pub fn get_expr_type(&self) -> ExprType {
        match self {
            Expr::Integer(_) => ExprType::Integer,
            Expr::Float(_) => ExprType::Float,
            Expr::String(_) => ExprType::String,
            Expr::Symbol(_) => ExprType::Symbol,
            Expr::Binary(_) => ExprType::Binary,
            Expr::Prefix(_) => ExprType::Prefix,
        }
    }

    /// The semantic type this expression evaluates to.
    ///
    /// Literals always know their type; other expressions only after type checking.
    pub fn get_type(&self) -> Option<DataType> {
        match self {
            Expr::Integer(_) => Some(DataType::Int),
            Expr::Float(_) => Some(DataType::Float),
            Expr::String(_) => Some(DataType::String),
            Expr::Symbol(symbol) => symbol.data_type,
            Expr::Binary(binary) => binary.data_type,
            Expr::Prefix(prefix) => prefix.data_type,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Integer(expr) => &expr.span,
            Expr::Float(expr) => &expr.span,
            Expr::String(expr) => &expr.span,
            Expr::Symbol(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Prefix(expr) => &expr.span,
        }
    }
}
