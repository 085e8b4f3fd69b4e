use crate::ast::{Loc, Type};
use crate::{CompileError, SemanticErrorKind};
use std::collections::HashMap;

/// A registered function signature.
#[derive(Debug, Clone)]
pub struct FunctionSig {
    pub ret: Type,
    pub params: Vec<Type>,
    pub loc: Loc,
}

pub struct Verifier {
    /// Global function table, filled by the registration pass.
    pub(crate) functions: HashMap<String, FunctionSig>,
    /// Variable scopes, innermost last: one per function parameter list,
    /// one per block.
    scopes: Vec<HashMap<String, Type>>,
}

impl Verifier {
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
            scopes: Vec::new(),
        }
    }

    pub(crate) fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub(crate) fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Declare a variable in the innermost scope. Duplicates are checked
    /// against that scope only; outer scopes never conflict.
    pub(crate) fn declare(&mut self, name: &str, ty: Type) -> Result<(), Type> {
        let scope = self.scopes.last_mut().expect("no active scope");
        if let Some(existing) = scope.get(name) {
            return Err(*existing);
        }
        scope.insert(name.to_string(), ty);
        Ok(())
    }

    /// Resolve a variable through the enclosing scopes, innermost first.
    pub(crate) fn lookup(&self, name: &str) -> Option<Type> {
        self.scopes.iter().rev().find_map(|s| s.get(name).copied())
    }

    pub(crate) fn error(
        &self,
        kind: SemanticErrorKind,
        loc: Loc,
        message: impl Into<String>,
    ) -> CompileError {
        CompileError::Semantic {
            kind,
            line: loc.line,
            col: loc.column,
            message: message.into(),
        }
    }
}

impl Default for Verifier {
    fn default() -> Self {
        Self::new()
    }
}
