use crate::{
    ast::statements::{AssignmentStmt, BlockStmt, ForStmt, IfStmt, ReturnStmt, Stmt, VarDeclStmt, WhileStmt},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{expr::parse_expr, parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.current_token_or("a statement")?;
    let kind = token.kind;

    let handler = match kind {
        TokenKind::Keyword | TokenKind::Operator => parser.get_stmt_lookup().get(token.value.as_str()).copied(),
        _ => None,
    };

    if let Some(handler) = handler {
        return handler(parser);
    }

    if kind == TokenKind::Identifier {
        return Ok(Stmt::Assignment(parse_assignment(parser, true)?));
    }

    let token = parser.current_token_or("a statement")?;
    Err(Error::new(
        ErrorImpl::UnexpectedToken {
            token: token.value.clone(),
        },
        token.span.start.clone(),
    ))
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let (data_type, start) = parse_type(parser)?;

    let name = parser.expect_error(TokenKind::Identifier, "an identifier during variable declaration")?;

    let assigned_value = if parser.current_is_operator("=") {
        parser.advance()?;
        Some(parse_expr(parser)?)
    } else {
        None
    };

    parser.expect_operator(";")?;

    Ok(Stmt::VarDecl(VarDeclStmt {
        identifier: name.value,
        data_type,
        assigned_value,
        span: parser.span_from(start),
    }))
}

/// `name = expr`, with the trailing `;` only when `terminated`.
///
/// The `for` header's update clause is the unterminated form.
pub fn parse_assignment(parser: &mut Parser, terminated: bool) -> Result<AssignmentStmt, Error> {
    let name = parser.expect_error(TokenKind::Identifier, "an identifier")?;

    parser.expect_operator("=")?;
    let value = parse_expr(parser)?;

    if terminated {
        parser.expect_operator(";")?;
    }

    Ok(AssignmentStmt {
        span: parser.span_from(name.span.start),
        identifier: name.value,
        value,
        data_type: None,
    })
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect_keyword("if")?.span.start;

    parser.expect_operator("(")?;
    let condition = parse_expr(parser)?;
    parser.expect_operator(")")?;

    let then_body = parse_block(parser)?;

    let else_body = if parser.current_is_keyword("else") {
        parser.advance()?;
        Some(parse_block(parser)?)
    } else {
        None
    };

    Ok(Stmt::If(IfStmt {
        condition,
        then_body,
        else_body,
        span: parser.span_from(start),
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect_keyword("while")?.span.start;

    parser.expect_operator("(")?;
    let condition = parse_expr(parser)?;
    parser.expect_operator(")")?;

    let body = parse_block(parser)?;

    Ok(Stmt::While(WhileStmt {
        condition,
        body,
        span: parser.span_from(start),
    }))
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect_keyword("for")?.span.start;
    parser.expect_operator("(")?;

    let token = parser.current_token_or("a declaration or assignment")?;
    let is_declaration = token.is_type_keyword();
    let is_assignment = token.kind == TokenKind::Identifier;

    let init = if is_declaration {
        parse_var_decl_stmt(parser)?
    } else if is_assignment {
        Stmt::Assignment(parse_assignment(parser, true)?)
    } else {
        return Err(parser.unexpected("a declaration or assignment"));
    };

    let condition = parse_expr(parser)?;
    parser.expect_operator(";")?;

    let update = parse_assignment(parser, false)?;
    parser.expect_operator(")")?;

    let body = parse_block(parser)?;

    Ok(Stmt::For(ForStmt {
        init: Box::new(init),
        condition,
        update,
        body,
        span: parser.span_from(start),
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect_keyword("return")?.span.start;

    let value = if parser.current_is_operator(";") {
        None
    } else {
        Some(parse_expr(parser)?)
    };

    parser.expect_operator(";")?;

    Ok(Stmt::Return(ReturnStmt {
        value,
        data_type: None,
        span: parser.span_from(start),
    }))
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Block(parse_block(parser)?))
}

/// `{ stmt* }`; each block gets a unique id for its scope.
pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    parser.enter_nesting()?;
    let start = parser.expect_operator("{")?.span.start;
    let id = parser.advance_id();

    let mut statements = Vec::new();
    while !parser.current_is_operator("}") {
        statements.push(parse_stmt(parser)?);
    }

    parser.expect_operator("}")?;
    parser.exit_nesting(1);

    Ok(BlockStmt {
        body: statements,
        id,
        span: parser.span_from(start),
    })
}
