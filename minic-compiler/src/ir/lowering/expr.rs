use super::context::FnBuilder;
use super::LoweringError;
use crate::ast::{self, Expr, Name};
use crate::ir::{self, ConstValue, Instr, Terminator, Ty, ValueId};

impl FnBuilder<'_> {
    pub(crate) fn lower_expr(&mut self, expr: &Expr) -> Result<ValueId, LoweringError> {
        match expr {
            // Booleans live in the floating kind as 0/1.
            Expr::Bool { value, .. } => Ok(self.const_val(
                Ty::Fp,
                ConstValue::Fp(if *value { 1.0 } else { 0.0 }),
            )),
            Expr::Int { value, .. } => Ok(self.const_val(Ty::Int, ConstValue::Int(*value))),
            Expr::Float { value, .. } => Ok(self.const_val(Ty::Fp, ConstValue::Fp(*value))),

            Expr::Name(name) => {
                let slot = self.slot(&name.ident)?;
                Ok(self.load_slot(slot))
            }

            Expr::Paren { inner, .. } => self.lower_expr(inner),

            Expr::Unary { operand, .. } => {
                // Negation lowers as `0 - operand` in the operand's kind.
                let value = self.lower_expr(operand)?;
                let ty = self.func.value_ty(value);
                let zero = self.zero(ty);
                let dst = self.func.new_value(ty);
                self.emit(Instr::Bin {
                    dst,
                    op: ir::BinOp::Sub,
                    ty,
                    lhs: zero,
                    rhs: value,
                });
                Ok(dst)
            }

            Expr::Binary {
                op: op @ (ast::BinOp::And | ast::BinOp::Or),
                lhs,
                rhs,
                ..
            } => self.lower_logical(*op, lhs, rhs),

            Expr::Binary { op, lhs, rhs, .. } => {
                let lhs = self.lower_expr(lhs)?;
                let rhs = self.lower_expr(rhs)?;
                // Same-type operands after verification; the kind picks the op.
                let ty = self.func.value_ty(lhs);
                let dst = self.func.new_value(ty);
                self.emit(Instr::Bin {
                    dst,
                    op: map_arith(*op),
                    ty,
                    lhs,
                    rhs,
                });
                Ok(dst)
            }

            Expr::Relational { op, lhs, rhs, .. } => {
                let lhs = self.lower_expr(lhs)?;
                let rhs = self.lower_expr(rhs)?;
                let ty = self.func.value_ty(lhs);
                let dst = self.func.new_value(Ty::Fp);
                self.emit(Instr::Cmp {
                    dst,
                    op: map_rel(*op),
                    ty,
                    lhs,
                    rhs,
                });
                Ok(dst)
            }

            Expr::Ternary {
                cond,
                then_val,
                else_val,
                ..
            } => self.lower_ternary(cond, then_val, else_val),

            Expr::Cast { ty, operand, .. } => {
                let value = self.lower_expr(operand)?;
                let to = Ty::from(*ty);
                let from = self.func.value_ty(value);
                if from == to {
                    // Same-kind casts (including bool <-> float) are no-ops.
                    return Ok(value);
                }
                let dst = self.func.new_value(to);
                self.emit(Instr::Cast { dst, to, value });
                Ok(dst)
            }

            Expr::Call { callee, args, .. } => match self.lower_call(callee, args)? {
                Some(value) => Ok(value),
                None => Err(LoweringError::VoidValue(callee.ident.clone())),
            },
        }
    }

    /// Resolve the callee, check arity, evaluate arguments left to right,
    /// and emit the call. Returns `None` for void callees.
    pub(crate) fn lower_call(
        &mut self,
        callee: &Name,
        args: &[Expr],
    ) -> Result<Option<ValueId>, LoweringError> {
        let sig = self
            .sig(&callee.ident)
            .ok_or_else(|| LoweringError::UnknownCallee(callee.ident.clone()))?;
        if args.len() != sig.arity {
            return Err(LoweringError::ArityMismatch {
                name: callee.ident.clone(),
                expected: sig.arity,
                got: args.len(),
            });
        }

        let mut arg_values = Vec::with_capacity(args.len());
        for arg in args {
            arg_values.push(self.lower_expr(arg)?);
        }
        let dst = match sig.ret {
            Ty::Void => None,
            ty => Some(self.func.new_value(ty)),
        };
        self.emit(Instr::Call {
            dst,
            callee: callee.ident.clone(),
            args: arg_values,
        });
        Ok(dst)
    }

    /// `&&`/`||` lower as short-circuit control flow: the right operand only
    /// evaluates on the path where it decides the result; a phi merges the
    /// normalized 0/1 flags.
    fn lower_logical(
        &mut self,
        op: ast::BinOp,
        lhs: &Expr,
        rhs: &Expr,
    ) -> Result<ValueId, LoweringError> {
        let lhs_value = self.lower_expr(lhs)?;
        let lhs_flag = self.is_nonzero(lhs_value);
        let rhs_bb = self.new_block("rhs");
        let merge_bb = self.new_block("merge");
        let short_end = self.current_block();
        match op {
            ast::BinOp::And => self.terminate(Terminator::CondBr {
                cond: lhs_flag,
                then_to: rhs_bb,
                else_to: merge_bb,
            }),
            ast::BinOp::Or => self.terminate(Terminator::CondBr {
                cond: lhs_flag,
                then_to: merge_bb,
                else_to: rhs_bb,
            }),
            _ => unreachable!("not a logical operator"),
        }

        self.switch_to(rhs_bb);
        let rhs_value = self.lower_expr(rhs)?;
        let rhs_flag = self.is_nonzero(rhs_value);
        let rhs_end = self.current_block();
        self.terminate(Terminator::Br(merge_bb));

        self.switch_to(merge_bb);
        let dst = self.func.new_value(Ty::Fp);
        self.emit(Instr::Phi {
            dst,
            ty: Ty::Fp,
            incoming: vec![(short_end, lhs_flag), (rhs_end, rhs_flag)],
        });
        Ok(dst)
    }

    /// `cond ? a : b` — a conditional branch into two value blocks and a phi
    /// at the merge selecting between the branch results.
    fn lower_ternary(
        &mut self,
        cond: &Expr,
        then_val: &Expr,
        else_val: &Expr,
    ) -> Result<ValueId, LoweringError> {
        let cond_value = self.lower_expr(cond)?;
        let flag = self.is_nonzero(cond_value);
        let then_bb = self.new_block("then");
        let else_bb = self.new_block("else");
        let merge_bb = self.new_block("merge");
        self.terminate(Terminator::CondBr {
            cond: flag,
            then_to: then_bb,
            else_to: else_bb,
        });

        self.switch_to(then_bb);
        let then_value = self.lower_expr(then_val)?;
        // Nested control flow may have moved the insertion point; the phi
        // edge comes from wherever each arm actually ended.
        let then_end = self.current_block();
        self.terminate(Terminator::Br(merge_bb));

        self.switch_to(else_bb);
        let else_value = self.lower_expr(else_val)?;
        let else_end = self.current_block();
        self.terminate(Terminator::Br(merge_bb));

        self.switch_to(merge_bb);
        // The result kind follows the false branch, like the static type.
        let ty = self.func.value_ty(else_value);
        let dst = self.func.new_value(ty);
        self.emit(Instr::Phi {
            dst,
            ty,
            incoming: vec![(then_end, then_value), (else_end, else_value)],
        });
        Ok(dst)
    }
}

pub(crate) fn map_arith(op: ast::BinOp) -> ir::BinOp {
    match op {
        ast::BinOp::Add => ir::BinOp::Add,
        ast::BinOp::Sub => ir::BinOp::Sub,
        ast::BinOp::Mul => ir::BinOp::Mul,
        ast::BinOp::Div => ir::BinOp::Div,
        ast::BinOp::And | ast::BinOp::Or => unreachable!("logical ops lower as control flow"),
    }
}

pub(crate) fn map_rel(op: ast::RelOp) -> ir::CmpOp {
    match op {
        ast::RelOp::Eq => ir::CmpOp::Eq,
        ast::RelOp::Ne => ir::CmpOp::Ne,
        ast::RelOp::Lt => ir::CmpOp::Lt,
        ast::RelOp::Gt => ir::CmpOp::Gt,
        ast::RelOp::Le => ir::CmpOp::Le,
        ast::RelOp::Ge => ir::CmpOp::Ge,
    }
}
