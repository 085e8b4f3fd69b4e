use super::context::{FunctionSig, Verifier};
use crate::ast::*;
use crate::{CompileError, SemanticErrorKind};

impl Verifier {
    pub fn verify_program(&mut self, program: &Program) -> Result<(), CompileError> {
        // Registration pass: every signature becomes visible before any body
        // is checked, so definition order never matters for call resolution.
        for function in &program.functions {
            self.register_function(function.decl())?;
        }

        // ERROR main_function
        if !self.functions.contains_key("main") {
            return Err(self.error(
                SemanticErrorKind::MainFunction,
                program.loc,
                "program has no 'main' function",
            ));
        }

        for function in &program.functions {
            self.verify_function(function)?;
        }
        Ok(())
    }

    fn register_function(&mut self, decl: &FunctionDecl) -> Result<(), CompileError> {
        // ERROR duplicate_decl: one registration per name, declarations included
        if self.functions.contains_key(&decl.name.ident) {
            return Err(self.error(
                SemanticErrorKind::DuplicateDecl,
                decl.loc,
                format!("function '{}' is already declared", decl.name.ident),
            ));
        }
        self.functions.insert(
            decl.name.ident.clone(),
            FunctionSig {
                ret: decl.ret,
                params: decl.params.iter().map(|p| p.ty).collect(),
                loc: decl.loc,
            },
        );
        Ok(())
    }

    pub fn verify_function(&mut self, function: &Function) -> Result<(), CompileError> {
        let decl = function.decl();
        self.push_scope();
        for param in &decl.params {
            self.verify_declaration(param)?;
            if self.declare(&param.name.ident, param.ty).is_err() {
                return Err(self.error(
                    SemanticErrorKind::DuplicateDecl,
                    param.loc,
                    format!("parameter '{}' is declared more than once", param.name.ident),
                ));
            }
        }

        if let Function::Def(def) = function {
            let found = self.verify_block(&def.body)?;
            // The body's unified return type must agree with the signature.
            // A body with no direct return statements passes unchecked.
            if let Some(found) = found {
                if found != decl.ret {
                    let kind = if decl.ret == Type::Void {
                        SemanticErrorKind::ReturnStatement
                    } else {
                        SemanticErrorKind::TypeReturn
                    };
                    return Err(self.error(
                        kind,
                        decl.loc,
                        format!(
                            "function '{}' is declared '{}' but returns '{}'",
                            decl.name.ident, decl.ret, found
                        ),
                    ));
                }
            }
        }
        self.pop_scope();
        Ok(())
    }

    /// ERROR type_decl: variables and parameters must be bool, int, or float.
    pub(crate) fn verify_declaration(&mut self, decl: &Declaration) -> Result<(), CompileError> {
        if decl.ty == Type::Void {
            return Err(self.error(
                SemanticErrorKind::TypeDecl,
                decl.loc,
                format!("variable '{}' cannot have type 'void'", decl.name.ident),
            ));
        }
        Ok(())
    }

    /// Verify a block and return its unified return type: `None` when the
    /// block has no direct return statement, `Some(Void)` for a bare
    /// `return;`. Only direct children are scanned; nested compound
    /// statements keep their own summaries.
    pub fn verify_block(&mut self, block: &Block) -> Result<Option<Type>, CompileError> {
        self.push_scope();

        // A block's declarations are visible throughout the block, so they
        // all register before anything else is checked. Declarations in the
        // clauses of a direct `for` land in this scope too, matching the
        // flat slot map the lowering uses for loop variables.
        for stmt in &block.stmts {
            if let Some(decl) = stmt.declaration() {
                self.register_variable(decl)?;
            } else if let Stmt::For { init, step, .. } = stmt {
                for clause in [init, step] {
                    if let Some(decl) = clause.as_deref().and_then(Stmt::declaration) {
                        self.register_variable(decl)?;
                    }
                }
            }
        }

        // ERROR type_return: direct return statements must agree on type.
        let mut return_type: Option<Type> = None;
        for stmt in &block.stmts {
            if let Stmt::Return { value, loc } = stmt {
                let ty = match value {
                    Some(expr) => self.type_of(expr)?,
                    None => Type::Void,
                };
                match return_type {
                    None => return_type = Some(ty),
                    Some(prev) if prev != ty => {
                        return Err(self.error(
                            SemanticErrorKind::TypeReturn,
                            *loc,
                            format!(
                                "return type '{ty}' disagrees with earlier return type '{prev}'"
                            ),
                        ));
                    }
                    Some(_) => {}
                }
            }
        }

        for stmt in &block.stmts {
            self.verify_stmt(stmt)?;
        }

        self.pop_scope();
        Ok(return_type)
    }

    fn register_variable(&mut self, decl: &Declaration) -> Result<(), CompileError> {
        self.verify_declaration(decl)?;
        // ERROR duplicate_decl: checked against this scope only
        if self.declare(&decl.name.ident, decl.ty).is_err() {
            return Err(self.error(
                SemanticErrorKind::DuplicateDecl,
                decl.loc,
                format!(
                    "variable '{}' is already declared in this scope",
                    decl.name.ident
                ),
            ));
        }
        Ok(())
    }

    pub fn verify_stmt(&mut self, stmt: &Stmt) -> Result<(), CompileError> {
        match stmt {
            // Declarations are registered and type-checked by the enclosing
            // block (or `for` clause) before statements are walked.
            Stmt::Decl { .. } => Ok(()),
            Stmt::DeclAssign { value, .. } => {
                self.type_of(value)?;
                Ok(())
            }
            Stmt::Assign {
                target, value, loc, ..
            } => {
                // ERROR not_decl: assignment targets must be in scope
                if self.lookup(&target.ident).is_none() {
                    return Err(self.error(
                        SemanticErrorKind::NotDecl,
                        *loc,
                        format!("assignment to undeclared variable '{}'", target.ident),
                    ));
                }
                self.type_of(value)?;
                Ok(())
            }
            Stmt::Break { .. } | Stmt::Continue { .. } => Ok(()),
            Stmt::Return { value, .. } => {
                if let Some(expr) = value {
                    self.type_of(expr)?;
                }
                Ok(())
            }
            Stmt::Expr { expr } => {
                self.type_of(expr)?;
                Ok(())
            }
            Stmt::If { cond, body, .. } => {
                self.check_condition(cond)?;
                self.verify_block(body)?;
                Ok(())
            }
            Stmt::While { cond, body, .. } => {
                self.check_condition(cond)?;
                self.verify_block(body)?;
                Ok(())
            }
            Stmt::For {
                init,
                cond,
                step,
                body,
                ..
            } => {
                if let Some(init) = init {
                    self.verify_stmt(init)?;
                }
                // An absent condition means "loop unconditionally", not an error.
                if let Some(cond) = cond {
                    self.check_condition(cond)?;
                }
                if let Some(step) = step {
                    self.verify_stmt(step)?;
                }
                self.verify_block(body)?;
                Ok(())
            }
        }
    }

    /// ERROR type_bool: the controlling expression of if/while/for.
    fn check_condition(&mut self, cond: &Expr) -> Result<(), CompileError> {
        let ty = self.type_of(cond)?;
        if ty != Type::Bool {
            return Err(self.error(
                SemanticErrorKind::TypeBool,
                cond.loc(),
                format!("condition must be 'bool', found '{ty}'"),
            ));
        }
        Ok(())
    }
}
