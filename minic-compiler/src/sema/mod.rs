//! Semantic verification.
//!
//! Two passes over the program tree: a registration pass that builds the
//! global function table and checks for a `main` entry point, then a body
//! pass that checks declarations, scoping, and expression types. The walk
//! stops at the first failure and reports it with its source location.

mod context;
mod expr;
mod stmt;

pub use context::{FunctionSig, Verifier};

use crate::ast::Program;
use crate::CompileError;

/// Verify a parsed program. Rebuilds all symbol tables from scratch, so
/// calling it twice on the same tree yields the same result.
pub fn verify(program: &Program) -> Result<(), CompileError> {
    let mut verifier = Verifier::new();
    verifier.verify_program(program)
}
