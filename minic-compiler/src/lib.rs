pub mod ast;
pub mod frontend;
pub mod ir;
pub mod sema;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Lexical error: {0}")]
    Lexical(#[from] frontend::lexer::LexicalError),

    #[error("Parse error ({line}:{col}): {message}")]
    Parse { line: u32, col: u32, message: String },

    #[error("SemanticError:{kind} ({line}:{col}) - {message}")]
    Semantic {
        kind: SemanticErrorKind,
        line: u32,
        col: u32,
        message: String,
    },

    /// Lowering never fails on a verified tree; this variant surfaces a
    /// broken internal invariant, not a user diagnostic.
    #[error("Internal error during lowering: {0}")]
    Internal(#[from] ir::lowering::LoweringError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticErrorKind {
    TypeDecl,
    TypeMismatch,
    TypeArg,
    TypeBool,
    TypeReturn,
    ReturnStatement,
    MainFunction,
    DuplicateDecl,
    NotDecl,
}

impl std::fmt::Display for SemanticErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SemanticErrorKind::TypeDecl => "type_decl",
            SemanticErrorKind::TypeMismatch => "type_mismatch",
            SemanticErrorKind::TypeArg => "type_arg",
            SemanticErrorKind::TypeBool => "type_bool",
            SemanticErrorKind::TypeReturn => "type_return",
            SemanticErrorKind::ReturnStatement => "return_statement",
            SemanticErrorKind::MainFunction => "main_function",
            SemanticErrorKind::DuplicateDecl => "duplicate_decl",
            SemanticErrorKind::NotDecl => "not_decl",
        };
        write!(f, "{name}")
    }
}

/// Lex and parse source text into a program tree.
pub fn compile_to_ast(source: &str) -> Result<ast::Program, CompileError> {
    frontend::parser::parse(source)
}

/// Compile source text to the register IR: parse, verify, then lower.
/// No module is produced if any stage fails.
pub fn compile_to_ir(source: &str) -> Result<ir::Module, CompileError> {
    let program = compile_to_ast(source)?;
    sema::verify(&program)?;
    let module = ir::lowering::lower(&program)?;
    Ok(module)
}
