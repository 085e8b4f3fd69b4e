//! AST to IR lowering.
//!
//! Runs only on a verified tree. Signatures are declared into the module
//! first so calls resolve regardless of definition order, then each
//! definition's body is emitted through a per-function builder. Failures
//! here are broken invariants of the pipeline, not user diagnostics.

mod context;
mod expr;
mod stmt;

pub use context::FnBuilder;
pub(crate) use context::FnSig;

use crate::ast;
use crate::ir::{Function, Module, Ty};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoweringError {
    #[error("use of variable '{0}' before it has storage")]
    UnboundVariable(String),

    #[error("call to unknown function '{0}'")]
    UnknownCallee(String),

    #[error("call to '{name}' passes {got} argument(s), expected {expected}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("void function '{0}' used as a value")]
    VoidValue(String),

    #[error("'{0}' outside of a loop")]
    OutsideLoop(&'static str),
}

/// Lower a verified program to an IR module.
pub fn lower(program: &ast::Program) -> Result<Module, LoweringError> {
    let mut sigs = HashMap::new();
    for function in &program.functions {
        let decl = function.decl();
        sigs.insert(
            decl.name.ident.clone(),
            FnSig {
                ret: Ty::from(decl.ret),
                arity: decl.params.len(),
            },
        );
    }

    let mut module = Module::default();
    for function in &program.functions {
        let decl = function.decl();
        let stub = Function::stub(
            decl.name.ident.clone(),
            Ty::from(decl.ret),
            decl.params
                .iter()
                .map(|p| (p.name.ident.clone(), Ty::from(p.ty)))
                .collect(),
        );
        match function {
            ast::Function::Decl(_) => module.functions.push(stub),
            ast::Function::Def(def) => {
                let mut builder = FnBuilder::new(stub, &sigs);
                builder.lower_body(def)?;
                module.functions.push(builder.finish());
            }
        }
    }
    Ok(module)
}
