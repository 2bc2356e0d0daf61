use std::slice::Iter;

use crate::Span;

use super::{ast::StmtType, expressions::Expr, types::DataType};

/// Root of the tree: every top-level statement in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl Program {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub id: i32,
    pub span: Span,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

/// `int x = 5;` - the declared type never changes after parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub identifier: String,
    pub data_type: DataType,
    pub assigned_value: Option<Expr>,
    pub span: Span,
}

/// `x = expr;`, typed with the target variable's declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStmt {
    pub identifier: String,
    pub value: Expr,
    pub data_type: Option<DataType>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_body: BlockStmt,
    pub else_body: Option<BlockStmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: BlockStmt,
    pub span: Span,
}

/// `for (init condition; update) body`
///
/// `init` is always a declaration or an assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: Box<Stmt>,
    pub condition: Expr,
    pub update: AssignmentStmt,
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub data_type: Option<DataType>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl(VarDeclStmt),
    Assignment(AssignmentStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Return(ReturnStmt),
    Block(BlockStmt),
}

impl Stmt {
    pub fn get_stmt_type(&self) -> StmtType {
        match self {
            Stmt::VarDecl(_) => StmtType::VarDeclStmt,
            Stmt::Assignment(_) => StmtType::AssignmentStmt,
            Stmt::If(_) => StmtType::IfStmt,
            Stmt::While(_) => StmtType::WhileStmt,
            Stmt::For(_) => StmtType::ForStmt,
            Stmt::Return(_) => StmtType::ReturnStmt,
            Stmt::Block(_) => StmtType::BlockStmt,
        }
    }

    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::VarDecl(stmt) => &stmt.span,
            Stmt::Assignment(stmt) => &stmt.span,
            Stmt::If(stmt) => &stmt.span,
            Stmt::While(stmt) => &stmt.span,
            Stmt::For(stmt) => &stmt.span,
            Stmt::Return(stmt) => &stmt.span,
            Stmt::Block(stmt) => &stmt.span,
        }
    }
}
