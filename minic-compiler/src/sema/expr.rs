use super::context::Verifier;
use crate::ast::*;
use crate::{CompileError, SemanticErrorKind};

impl Verifier {
    /// Check an expression bottom-up and return its resolved type.
    pub fn type_of(&mut self, expr: &Expr) -> Result<Type, CompileError> {
        match expr {
            Expr::Bool { .. } => Ok(Type::Bool),
            Expr::Int { .. } => Ok(Type::Int),
            Expr::Float { .. } => Ok(Type::Float),

            Expr::Name(name) => match self.lookup(&name.ident) {
                Some(ty) => Ok(ty),
                // ERROR not_decl
                None => Err(self.error(
                    SemanticErrorKind::NotDecl,
                    name.loc,
                    format!("use of undeclared variable '{}'", name.ident),
                )),
            },

            Expr::Paren { inner, .. } => self.type_of(inner),

            Expr::Unary { operand, .. } => self.type_of(operand),

            Expr::Binary { lhs, rhs, loc, .. } => {
                let lhs_ty = self.type_of(lhs)?;
                let rhs_ty = self.type_of(rhs)?;
                self.check_operands(lhs_ty, rhs_ty, *loc)?;
                Ok(rhs_ty)
            }

            Expr::Relational { lhs, rhs, loc, .. } => {
                let lhs_ty = self.type_of(lhs)?;
                let rhs_ty = self.type_of(rhs)?;
                self.check_operands(lhs_ty, rhs_ty, *loc)?;
                Ok(Type::Bool)
            }

            Expr::Ternary {
                cond,
                then_val,
                else_val,
                ..
            } => {
                self.type_of(cond)?;
                self.type_of(then_val)?;
                // The ternary takes the type of its false branch.
                self.type_of(else_val)
            }

            Expr::Cast { ty, operand, .. } => {
                self.type_of(operand)?;
                Ok(*ty)
            }

            Expr::Call { callee, args, loc } => {
                // ERROR not_decl: the callee must be a registered function
                let sig = match self.functions.get(&callee.ident) {
                    Some(sig) => sig.clone(),
                    None => {
                        return Err(self.error(
                            SemanticErrorKind::NotDecl,
                            *loc,
                            format!("call to undeclared function '{}'", callee.ident),
                        ));
                    }
                };

                // ERROR type_arg: arity first, then pairwise argument types
                if args.len() != sig.params.len() {
                    return Err(self.error(
                        SemanticErrorKind::TypeArg,
                        *loc,
                        format!(
                            "function '{}' expects {} argument{}, got {}",
                            callee.ident,
                            sig.params.len(),
                            if sig.params.len() == 1 { "" } else { "s" },
                            args.len()
                        ),
                    ));
                }
                for (arg, expected) in args.iter().zip(&sig.params) {
                    let found = self.type_of(arg)?;
                    if found != *expected {
                        return Err(self.error(
                            SemanticErrorKind::TypeArg,
                            arg.loc(),
                            format!(
                                "argument has type '{found}', function '{}' expects '{expected}'",
                                callee.ident
                            ),
                        ));
                    }
                }
                Ok(sig.ret)
            }
        }
    }

    /// ERROR type_mismatch: binary and relational operands must share a type.
    fn check_operands(&self, lhs_ty: Type, rhs_ty: Type, loc: Loc) -> Result<(), CompileError> {
        if lhs_ty != rhs_ty {
            return Err(self.error(
                SemanticErrorKind::TypeMismatch,
                loc,
                format!("operands have mismatched types '{lhs_ty}' and '{rhs_ty}'"),
            ));
        }
        Ok(())
    }
}
