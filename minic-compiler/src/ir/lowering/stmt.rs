use super::context::{FnBuilder, LoopTargets};
use super::LoweringError;
use crate::ast::*;
use crate::ir::{self, Instr, Terminator, Ty};

impl FnBuilder<'_> {
    pub(crate) fn lower_body(&mut self, def: &FunctionDef) -> Result<(), LoweringError> {
        // Entry block: give every parameter a stack slot and store the
        // incoming argument value into it.
        for (i, param) in def.decl.params.iter().enumerate() {
            let slot = self.alloc_slot(&param.name.ident, Ty::from(param.ty));
            self.emit(Instr::Store {
                slot,
                value: ir::ValueId(i),
            });
        }
        self.lower_block(&def.body)?;
        // A body that falls off the end returns no value.
        if !self.block_terminated() {
            self.terminate(Terminator::Ret(None));
        }
        Ok(())
    }

    pub(crate) fn lower_block(&mut self, block: &Block) -> Result<(), LoweringError> {
        for stmt in &block.stmts {
            self.lower_stmt(stmt)?;
        }
        Ok(())
    }

    pub(crate) fn lower_stmt(&mut self, stmt: &Stmt) -> Result<(), LoweringError> {
        match stmt {
            Stmt::Decl { decl } => {
                self.alloc_slot(&decl.name.ident, Ty::from(decl.ty));
                Ok(())
            }

            Stmt::DeclAssign { decl, value } => {
                let value = self.lower_expr(value)?;
                let slot = self.alloc_slot(&decl.name.ident, Ty::from(decl.ty));
                self.emit(Instr::Store { slot, value });
                Ok(())
            }

            Stmt::Assign {
                target, op, value, ..
            } => self.lower_assign(target, *op, value),

            Stmt::Break { .. } => {
                let targets = self
                    .loops
                    .last()
                    .copied()
                    .ok_or(LoweringError::OutsideLoop("break"))?;
                self.terminate(Terminator::Br(targets.break_to));
                Ok(())
            }

            Stmt::Continue { .. } => {
                let targets = self
                    .loops
                    .last()
                    .copied()
                    .ok_or(LoweringError::OutsideLoop("continue"))?;
                self.terminate(Terminator::Br(targets.continue_to));
                Ok(())
            }

            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => Some(self.lower_expr(expr)?),
                    None => None,
                };
                self.terminate(Terminator::Ret(value));
                Ok(())
            }

            Stmt::Expr { expr } => {
                // A bare call may be void and produce no value; any other
                // expression evaluates and discards its result.
                if let Expr::Call { callee, args, .. } = expr {
                    self.lower_call(callee, args)?;
                } else {
                    self.lower_expr(expr)?;
                }
                Ok(())
            }

            Stmt::If { cond, body, .. } => self.lower_if(cond, body),
            Stmt::While { cond, body, .. } => self.lower_while(cond, body),
            Stmt::For {
                init,
                cond,
                step,
                body,
                ..
            } => self.lower_for(init.as_deref(), cond.as_ref(), step.as_deref(), body),
        }
    }

    fn lower_assign(
        &mut self,
        target: &Name,
        op: AssignOp,
        value: &Expr,
    ) -> Result<(), LoweringError> {
        let slot = self.slot(&target.ident)?;
        if op == AssignOp::Assign {
            let value = self.lower_expr(value)?;
            self.emit(Instr::Store { slot, value });
            return Ok(());
        }

        // Compound assignment: load current value, combine, store back.
        let ty = self.func.value_ty(slot);
        let current = self.load_slot(slot);
        let rhs = self.lower_expr(value)?;
        let op = match op {
            AssignOp::Add => ir::BinOp::Add,
            AssignOp::Sub => ir::BinOp::Sub,
            AssignOp::Mul => ir::BinOp::Mul,
            AssignOp::Div => ir::BinOp::Div,
            AssignOp::Assign => unreachable!("plain assignment handled above"),
        };
        let dst = self.func.new_value(ty);
        self.emit(Instr::Bin {
            dst,
            op,
            ty,
            lhs: current,
            rhs,
        });
        self.emit(Instr::Store { slot, value: dst });
        Ok(())
    }

    /// `if` — condition evaluates in the current block, a conditional branch
    /// enters the body or skips to the merge block. The grammar has no else.
    fn lower_if(&mut self, cond: &Expr, body: &Block) -> Result<(), LoweringError> {
        let cond_value = self.lower_expr(cond)?;
        let flag = self.is_nonzero(cond_value);
        let then_bb = self.new_block("then");
        let merge_bb = self.new_block("merge");
        self.terminate(Terminator::CondBr {
            cond: flag,
            then_to: then_bb,
            else_to: merge_bb,
        });

        self.switch_to(then_bb);
        self.lower_block(body)?;
        self.branch_if_open(merge_bb);

        self.switch_to(merge_bb);
        Ok(())
    }

    /// `while` — condition block, body block, merge block; the body branches
    /// back to the condition.
    fn lower_while(&mut self, cond: &Expr, body: &Block) -> Result<(), LoweringError> {
        let cond_bb = self.new_block("cond");
        let body_bb = self.new_block("body");
        let merge_bb = self.new_block("merge");
        self.terminate(Terminator::Br(cond_bb));

        self.switch_to(cond_bb);
        let cond_value = self.lower_expr(cond)?;
        let flag = self.is_nonzero(cond_value);
        self.terminate(Terminator::CondBr {
            cond: flag,
            then_to: body_bb,
            else_to: merge_bb,
        });

        self.switch_to(body_bb);
        self.loops.push(LoopTargets {
            continue_to: cond_bb,
            break_to: merge_bb,
        });
        self.lower_block(body)?;
        self.loops.pop();
        self.branch_if_open(cond_bb);

        self.switch_to(merge_bb);
        Ok(())
    }

    /// `for` — init runs once in the current block; a dedicated step block
    /// runs at the end of each iteration, and is the `continue` target. An
    /// absent condition enters the body unconditionally.
    fn lower_for(
        &mut self,
        init: Option<&Stmt>,
        cond: Option<&Expr>,
        step: Option<&Stmt>,
        body: &Block,
    ) -> Result<(), LoweringError> {
        if let Some(init) = init {
            self.lower_stmt(init)?;
        }
        let cond_bb = self.new_block("cond");
        let body_bb = self.new_block("body");
        let step_bb = self.new_block("step");
        let merge_bb = self.new_block("merge");
        self.terminate(Terminator::Br(cond_bb));

        self.switch_to(cond_bb);
        match cond {
            Some(cond) => {
                let cond_value = self.lower_expr(cond)?;
                let flag = self.is_nonzero(cond_value);
                self.terminate(Terminator::CondBr {
                    cond: flag,
                    then_to: body_bb,
                    else_to: merge_bb,
                });
            }
            None => self.terminate(Terminator::Br(body_bb)),
        }

        self.switch_to(body_bb);
        self.loops.push(LoopTargets {
            continue_to: step_bb,
            break_to: merge_bb,
        });
        self.lower_block(body)?;
        self.loops.pop();
        self.branch_if_open(step_bb);

        self.switch_to(step_bb);
        if let Some(step) = step {
            self.lower_stmt(step)?;
        }
        self.branch_if_open(cond_bb);

        self.switch_to(merge_bb);
        Ok(())
    }
}
