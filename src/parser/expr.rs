use crate::{
    ast::expressions::{BinaryExpr, Expr, FloatExpr, IntegerExpr, PrefixExpr, PrefixOperator, StringExpr, SymbolExpr},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    lookups::{BindingPower, BINARY_OPERATOR_LOOKUP},
    parser::Parser,
};

type OperandParser = fn(&mut Parser) -> Result<Expr, Error>;

pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parse_logical_or(parser)
}

pub fn parse_logical_or(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_expr(parser, BindingPower::LogicalOr, parse_logical_and)
}

pub fn parse_logical_and(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_expr(parser, BindingPower::LogicalAnd, parse_equality)
}

pub fn parse_equality(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_expr(parser, BindingPower::Equality, parse_relational)
}

pub fn parse_relational(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_expr(parser, BindingPower::Relational, parse_additive)
}

pub fn parse_additive(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_expr(parser, BindingPower::Additive, parse_multiplicative)
}

pub fn parse_multiplicative(parser: &mut Parser) -> Result<Expr, Error> {
    parse_binary_expr(parser, BindingPower::Multiplicative, parse_prefix_expr)
}

/// One precedence level: `operand (op operand)*`, folded to the left.
fn parse_binary_expr(parser: &mut Parser, bp: BindingPower, operand: OperandParser) -> Result<Expr, Error> {
    let mut left = operand(parser)?;
    let mut folds = 0;

    loop {
        let operator = match parser.current_token() {
            Some(token) if token.kind == TokenKind::Operator => match BINARY_OPERATOR_LOOKUP.get(token.value.as_str()) {
                Some((operator, level)) if *level == bp => *operator,
                _ => break,
            },
            _ => break,
        };

        // Each fold deepens the tree by one
        parser.enter_nesting()?;
        folds += 1;

        parser.advance()?;
        let right = operand(parser)?;

        left = Expr::Binary(BinaryExpr {
            span: Span {
                start: left.get_span().start.clone(),
                end: right.get_span().end.clone(),
            },
            left: Box::new(left),
            operator,
            right: Box::new(right),
            data_type: None,
        });
    }

    parser.exit_nesting(folds);
    Ok(left)
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator = if parser.current_is_operator("-") {
        PrefixOperator::Negate
    } else if parser.current_is_operator("!") {
        PrefixOperator::Not
    } else {
        return parse_primary_expr(parser);
    };

    let operator_token = parser.advance()?;
    let rhs = parse_primary_expr(parser)?;

    Ok(Expr::Prefix(PrefixExpr {
        span: Span {
            start: operator_token.span.start.clone(),
            end: rhs.get_span().end.clone(),
        },
        operator,
        right_expr: Box::new(rhs),
        data_type: None,
    }))
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let kind = parser.current_token_or("an expression")?.kind;

    match kind {
        TokenKind::Integer => {
            let token = parser.advance()?;
            match token.value.parse() {
                Ok(value) => Ok(Expr::Integer(IntegerExpr { value, span: token.span })),
                Err(_) => Err(Error::new(ErrorImpl::NumberParseError { token: token.value }, token.span.start)),
            }
        }
        TokenKind::Float => {
            let token = parser.advance()?;
            match token.value.parse() {
                Ok(value) => Ok(Expr::Float(FloatExpr { value, span: token.span })),
                Err(_) => Err(Error::new(ErrorImpl::NumberParseError { token: token.value }, token.span.start)),
            }
        }
        TokenKind::String => {
            let token = parser.advance()?;
            let value = token.value.trim_start_matches('"').trim_end_matches('"').to_string();
            Ok(Expr::String(StringExpr { value, span: token.span }))
        }
        TokenKind::Identifier => {
            let token = parser.advance()?;
            Ok(Expr::Symbol(SymbolExpr {
                value: token.value,
                data_type: None,
                span: token.span,
            }))
        }
        TokenKind::Operator if parser.current_is_operator("(") => parse_grouping_expr(parser),
        _ => Err(parser.unexpected("an expression")),
    }
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.enter_nesting()?;
    parser.expect_operator("(")?;
    let expr = parse_expr(parser)?;
    parser.expect_operator(")")?;
    parser.exit_nesting(1);

    Ok(expr)
}
