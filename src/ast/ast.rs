use super::{
    expressions::Expr,
    statements::{AssignmentStmt, BlockStmt, Program, Stmt},
    types::DataType,
};

/// Statement Types
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum StmtType {
    VarDeclStmt,
    AssignmentStmt,
    IfStmt,
    WhileStmt,
    ForStmt,
    ReturnStmt,
    BlockStmt,
}

/// Expression Types
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum ExprType {
    Integer,
    Float,
    String,
    Symbol,
    Binary,
    Prefix,
}

/// Tag of a node as seen by tree consumers.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum NodeType {
    Program,
    VarDecl,
    Assignment,
    If,
    While,
    For,
    Return,
    Block,
    BinaryOp,
    UnaryOp,
    Literal,
    Identifier,
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Borrowed, read-only view of any node in the tree.
///
/// Consumers walk the tree through this without matching on every
/// statement and expression struct.
#[derive(Clone, Copy, Debug)]
pub enum Node<'a> {
    Program(&'a Program),
    Stmt(&'a Stmt),
    Block(&'a BlockStmt),
    Assignment(&'a AssignmentStmt),
    Expr(&'a Expr),
}

impl<'a> Node<'a> {
    pub fn node_type(&self) -> NodeType {
        match self {
            Node::Program(_) => NodeType::Program,
            Node::Block(_) => NodeType::Block,
            Node::Assignment(_) => NodeType::Assignment,
            Node::Stmt(stmt) => match stmt {
                Stmt::VarDecl(_) => NodeType::VarDecl,
                Stmt::Assignment(_) => NodeType::Assignment,
                Stmt::If(_) => NodeType::If,
                Stmt::While(_) => NodeType::While,
                Stmt::For(_) => NodeType::For,
                Stmt::Return(_) => NodeType::Return,
                Stmt::Block(_) => NodeType::Block,
            },
            Node::Expr(expr) => match expr {
                Expr::Integer(_) | Expr::Float(_) | Expr::String(_) => NodeType::Literal,
                Expr::Symbol(_) => NodeType::Identifier,
                Expr::Binary(_) => NodeType::BinaryOp,
                Expr::Prefix(_) => NodeType::UnaryOp,
            },
        }
    }

    /// Literal, name or operator payload, rendered as text.
    pub fn value(&self) -> Option<String> {
        match self {
            Node::Program(_) | Node::Block(_) => None,
            Node::Assignment(assignment) => Some(assignment.identifier.clone()),
            Node::Stmt(stmt) => match stmt {
                Stmt::VarDecl(decl) => Some(decl.identifier.clone()),
                Stmt::Assignment(assignment) => Node::Assignment(assignment).value(),
                Stmt::If(_) | Stmt::While(_) | Stmt::For(_) | Stmt::Return(_) | Stmt::Block(_) => None,
            },
            Node::Expr(expr) => Some(match expr {
                Expr::Integer(literal) => literal.value.to_string(),
                Expr::Float(literal) => format!("{:?}", literal.value),
                Expr::String(literal) => format!("{:?}", literal.value),
                Expr::Symbol(symbol) => symbol.value.clone(),
                Expr::Binary(binary) => binary.operator.to_string(),
                Expr::Prefix(prefix) => prefix.operator.to_string(),
            }),
        }
    }

    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Node::Program(_) | Node::Block(_) => None,
            Node::Assignment(assignment) => assignment.data_type,
            Node::Stmt(stmt) => match stmt {
                Stmt::VarDecl(decl) => Some(decl.data_type),
                Stmt::Assignment(assignment) => assignment.data_type,
                Stmt::Return(ret) => ret.data_type,
                Stmt::If(_) | Stmt::While(_) | Stmt::For(_) | Stmt::Block(_) => None,
            },
            Node::Expr(expr) => expr.get_type(),
        }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<Node<'a>> {
        match *self {
            Node::Program(program) => program.iter().map(Node::Stmt).collect(),
            Node::Block(block) => block.iter().map(Node::Stmt).collect(),
            Node::Assignment(assignment) => vec![Node::Expr(&assignment.value)],
            Node::Stmt(stmt) => match stmt {
                Stmt::VarDecl(decl) => decl.assigned_value.iter().map(Node::Expr).collect(),
                Stmt::Assignment(assignment) => Node::Assignment(assignment).children(),
                Stmt::If(if_stmt) => {
                    let mut children = vec![Node::Expr(&if_stmt.condition), Node::Block(&if_stmt.then_body)];
                    if let Some(else_body) = &if_stmt.else_body {
                        children.push(Node::Block(else_body));
                    }
                    children
                }
                Stmt::While(while_stmt) => vec![Node::Expr(&while_stmt.condition), Node::Block(&while_stmt.body)],
                Stmt::For(for_stmt) => vec![
                    Node::Stmt(&for_stmt.init),
                    Node::Expr(&for_stmt.condition),
                    Node::Assignment(&for_stmt.update),
                    Node::Block(&for_stmt.body),
                ],
                Stmt::Return(ret) => ret.value.iter().map(Node::Expr).collect(),
                Stmt::Block(block) => Node::Block(block).children(),
            },
            Node::Expr(expr) => match expr {
                Expr::Integer(_) | Expr::Float(_) | Expr::String(_) | Expr::Symbol(_) => vec![],
                Expr::Binary(binary) => vec![Node::Expr(&binary.left), Node::Expr(&binary.right)],
                Expr::Prefix(prefix) => vec![Node::Expr(&prefix.right_expr)],
            },
        }
    }

    /// Visits this node and its descendants depth-first, children in source order.
    pub fn walk<F: FnMut(&Node<'a>, usize)>(&self, visit: &mut F) {
        self.walk_at(0, visit);
    }

    fn walk_at<F: FnMut(&Node<'a>, usize)>(&self, depth: usize, visit: &mut F) {
        visit(self, depth);
        for child in self.children() {
            child.walk_at(depth + 1, visit);
        }
    }
}

impl Program {
    pub fn as_node(&self) -> Node<'_> {
        Node::Program(self)
    }

    /// Renders one `Kind(value=.., type=..)` line per node, indented by depth.
    pub fn pretty_print(&self) -> String {
        let mut result = String::new();

        self.as_node().walk(&mut |node, depth| {
            let value = node.value().unwrap_or_else(|| String::from("None"));
            let data_type = node
                .data_type()
                .map(|ty| ty.to_string())
                .unwrap_or_else(|| String::from("None"));

            result.push_str(&"  ".repeat(depth));
            result.push_str(&format!("{}(value={}, type={})\n", node.node_type(), value, data_type));
        });

        result
    }
}
