/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Node kind tags, the borrowed traversal view and the pretty printer
/// - expressions: Definitions for the expression variants
/// - statements: Definitions for the statement variants and the program root
/// - types: The semantic types and their combination rules
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
