use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    ast::{
        expressions::{Expr, PrefixOperator},
        statements::{AssignmentStmt, BlockStmt, Program, Stmt},
        types::DataType,
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// One lexical scope: the variables declared directly inside it.
#[derive(Debug)]
pub struct Environment {
    pub variable_lookup: HashMap<String, DataType>,
    pub id: i32,
}

impl Environment {
    pub fn new(id: i32) -> Self {
        Environment {
            variable_lookup: HashMap::new(),
            id,
        }
    }

    pub fn declare_variable(&mut self, variable_name: String, variable_type: DataType, current_position: Position) -> Result<(), Error> {
        if self.variable_lookup.contains_key(&variable_name) {
            Err(Error::new(ErrorImpl::VariableAlreadyDeclared { variable: variable_name }, current_position))
        } else {
            trace!(scope = self.id, variable = %variable_name, data_type = %variable_type, "declared variable");
            self.variable_lookup.insert(variable_name, variable_type);
            Ok(())
        }
    }

    pub fn get_variable(&self, variable_name: &str) -> Option<DataType> {
        self.variable_lookup.get(variable_name).copied()
    }
}

/// Scopes open while walking the tree: the global scope plus a stack of
/// nested ones, innermost last.
#[derive(Debug)]
pub struct TypeChecker {
    pub global: Environment,
    pub environments: Vec<Environment>,
    /// Ids for `for` header scopes, counting down so they never meet block ids
    header_id: i32,
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeChecker {
    pub fn new() -> Self {
        TypeChecker {
            global: Environment::new(0),
            environments: vec![],
            header_id: -1,
        }
    }

    pub fn push_environment(&mut self, id: i32) {
        trace!(scope = id, depth = self.environments.len() + 1, "entering scope");
        self.environments.push(Environment::new(id));
    }

    /// Leaves the innermost nested scope. The global scope is never popped.
    pub fn pop_environment(&mut self) {
        if let Some(environment) = self.environments.pop() {
            trace!(scope = environment.id, "leaving scope");
        }
    }

    fn next_header_id(&mut self) -> i32 {
        let id = self.header_id;
        self.header_id -= 1;
        id
    }

    pub fn current_environment(&mut self) -> &mut Environment {
        self.environments.last_mut().unwrap_or(&mut self.global)
    }

    /// Declares in the innermost scope.
    pub fn declare_variable(&mut self, variable_name: String, variable_type: DataType, position: Position) -> Result<(), Error> {
        self.current_environment()
            .declare_variable(variable_name, variable_type, position)
    }

    /// Resolves a name from the innermost scope outward.
    pub fn fetch_variable_type(&self, variable: &str, position: Position) -> Result<DataType, Error> {
        self.environments
            .iter()
            .rev()
            .chain(std::iter::once(&self.global))
            .find_map(|environment| environment.get_variable(variable))
            .ok_or_else(|| {
                Error::new(
                    ErrorImpl::VariableNotDeclared {
                        variable: variable.to_string(),
                    },
                    position,
                )
            })
    }
}

/// Resolves and records the type of `ast` and everything under it.
pub fn type_check_expr(type_checker: &mut TypeChecker, ast: &mut Expr) -> Result<DataType, Error> {
    match ast {
        Expr::Integer(_) => Ok(DataType::Int),
        Expr::Float(_) => Ok(DataType::Float),
        Expr::String(_) => Ok(DataType::String),
        Expr::Symbol(symbol) => {
            let data_type = type_checker.fetch_variable_type(&symbol.value, symbol.span.start.clone())?;
            symbol.data_type = Some(data_type);
            Ok(data_type)
        }
        Expr::Binary(binary) => {
            let left = type_check_expr(type_checker, &mut binary.left)?;
            let right = type_check_expr(type_checker, &mut binary.right)?;
            let data_type = left.combine(right, binary.operator.as_str(), binary.span.start.clone())?;

            binary.data_type = Some(data_type);
            Ok(data_type)
        }
        Expr::Prefix(prefix) => {
            let operand = type_check_expr(type_checker, &mut prefix.right_expr)?;
            if !operand.is_numeric() {
                return Err(Error::new(
                    ErrorImpl::InvalidUnaryOperand {
                        operator: prefix.operator.to_string(),
                        operand: operand.to_string(),
                    },
                    prefix.span.start.clone(),
                ));
            }

            let data_type = match prefix.operator {
                PrefixOperator::Negate => operand,
                PrefixOperator::Not => DataType::Int,
            };

            prefix.data_type = Some(data_type);
            Ok(data_type)
        }
    }
}

/// The target must already be declared and the value must fit its type.
pub fn type_check_assignment(type_checker: &mut TypeChecker, ast: &mut AssignmentStmt) -> Result<(), Error> {
    let target = type_checker.fetch_variable_type(&ast.identifier, ast.span.start.clone())?;
    let value = type_check_expr(type_checker, &mut ast.value)?;
    target.check_assignable(value, ast.value.get_span().start.clone())?;

    ast.data_type = Some(target);
    Ok(())
}

pub fn type_check_stmt(type_checker: &mut TypeChecker, ast: &mut Stmt) -> Result<(), Error> {
    match ast {
        Stmt::VarDecl(var_decl_stmt) => {
            // The initializer is checked before the name exists, so `int x = x;` fails
            if let Some(value) = &mut var_decl_stmt.assigned_value {
                let value_type = type_check_expr(type_checker, value)?;
                var_decl_stmt
                    .data_type
                    .check_assignable(value_type, value.get_span().start.clone())?;
            }

            type_checker.declare_variable(
                var_decl_stmt.identifier.clone(),
                var_decl_stmt.data_type,
                var_decl_stmt.span.start.clone(),
            )
        }
        Stmt::Assignment(assignment) => type_check_assignment(type_checker, assignment),
        Stmt::If(if_stmt) => {
            type_check_expr(type_checker, &mut if_stmt.condition)?;
            type_check_block(type_checker, &mut if_stmt.then_body)?;
            if let Some(else_body) = &mut if_stmt.else_body {
                type_check_block(type_checker, else_body)?;
            }
            Ok(())
        }
        Stmt::While(while_stmt) => {
            type_check_expr(type_checker, &mut while_stmt.condition)?;
            type_check_block(type_checker, &mut while_stmt.body)
        }
        Stmt::For(for_stmt) => {
            let id = type_checker.next_header_id();
            type_checker.push_environment(id);

            let result = type_check_stmt(type_checker, &mut for_stmt.init)
                .and_then(|_| type_check_expr(type_checker, &mut for_stmt.condition))
                .and_then(|_| type_check_assignment(type_checker, &mut for_stmt.update))
                .and_then(|_| type_check_block(type_checker, &mut for_stmt.body));

            type_checker.pop_environment();
            result
        }
        Stmt::Return(return_stmt) => {
            let data_type = match &mut return_stmt.value {
                Some(value) => type_check_expr(type_checker, value)?,
                None => DataType::Void,
            };

            return_stmt.data_type = Some(data_type);
            Ok(())
        }
        Stmt::Block(block) => type_check_block(type_checker, block),
    }
}

pub fn type_check_block(type_checker: &mut TypeChecker, ast: &mut BlockStmt) -> Result<(), Error> {
    type_checker.push_environment(ast.id);

    let result = ast
        .body
        .iter_mut()
        .try_for_each(|stmt| type_check_stmt(type_checker, stmt));

    type_checker.pop_environment();
    result
}

/// Checks a whole program in a fresh global scope, annotating it in place.
pub fn type_check(ast: &mut Program) -> Result<(), Error> {
    let mut type_checker = TypeChecker::new();

    ast.body
        .iter_mut()
        .try_for_each(|stmt| type_check_stmt(&mut type_checker, stmt))?;

    debug!(statements = ast.body.len(), "type checked program");

    Ok(())
}
