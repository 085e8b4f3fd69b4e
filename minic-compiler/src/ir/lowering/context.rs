use super::LoweringError;
use crate::ir::*;
use std::collections::HashMap;

/// Signature summary used to resolve calls while bodies are being built.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FnSig {
    pub ret: Ty,
    pub arity: usize,
}

/// Branch targets of the innermost loops, pushed on entry and popped on
/// exit, so `break`/`continue` stay correct under nesting.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LoopTargets {
    pub continue_to: BlockId,
    pub break_to: BlockId,
}

/// Per-function build context: the function under construction, the current
/// insertion block, and the name-to-slot map. Variable names share one flat
/// map per function, mirroring the language's single-level scoping.
pub struct FnBuilder<'a> {
    pub(crate) func: Function,
    sigs: &'a HashMap<String, FnSig>,
    current: BlockId,
    slots: HashMap<String, ValueId>,
    pub(crate) loops: Vec<LoopTargets>,
}

impl<'a> FnBuilder<'a> {
    pub(crate) fn new(mut func: Function, sigs: &'a HashMap<String, FnSig>) -> Self {
        let entry = func.add_block("entry");
        Self {
            func,
            sigs,
            current: entry,
            slots: HashMap::new(),
            loops: Vec::new(),
        }
    }

    pub(crate) fn finish(self) -> Function {
        self.func
    }

    pub(crate) fn sig(&self, name: &str) -> Option<FnSig> {
        self.sigs.get(name).copied()
    }

    // ── Blocks ───────────────────────────────────────────────────────────

    pub(crate) fn new_block(&mut self, base: &str) -> BlockId {
        self.func.add_block(base)
    }

    pub(crate) fn switch_to(&mut self, block: BlockId) {
        self.current = block;
    }

    pub(crate) fn current_block(&self) -> BlockId {
        self.current
    }

    pub(crate) fn block_terminated(&self) -> bool {
        self.func.blocks[self.current.0].term.is_some()
    }

    /// Emit into the current block. Instructions after a terminator land in
    /// a fresh continuation block: unreachable code after break/continue/
    /// return still lowers without corrupting the block structure.
    pub(crate) fn emit(&mut self, instr: Instr) {
        if self.block_terminated() {
            let dead = self.new_block("dead");
            self.switch_to(dead);
        }
        self.func.blocks[self.current.0].instrs.push(instr);
    }

    pub(crate) fn terminate(&mut self, term: Terminator) {
        if self.block_terminated() {
            let dead = self.new_block("dead");
            self.switch_to(dead);
        }
        self.func.blocks[self.current.0].term = Some(term);
    }

    /// Branch to `to` unless the current block already ended (a body whose
    /// last statement was return/break/continue).
    pub(crate) fn branch_if_open(&mut self, to: BlockId) {
        if !self.block_terminated() {
            self.terminate(Terminator::Br(to));
        }
    }

    // ── Values ───────────────────────────────────────────────────────────

    pub(crate) fn const_val(&mut self, ty: Ty, value: ConstValue) -> ValueId {
        let dst = self.func.new_value(ty);
        self.emit(Instr::Const { dst, ty, value });
        dst
    }

    pub(crate) fn zero(&mut self, ty: Ty) -> ValueId {
        match ty {
            Ty::Int => self.const_val(Ty::Int, ConstValue::Int(0)),
            _ => self.const_val(Ty::Fp, ConstValue::Fp(0.0)),
        }
    }

    /// Normalize a value to a 0/1 "is nonzero" flag, the shape every
    /// conditional branch tests.
    pub(crate) fn is_nonzero(&mut self, value: ValueId) -> ValueId {
        let ty = self.func.value_ty(value);
        let zero = self.zero(ty);
        let dst = self.func.new_value(Ty::Fp);
        self.emit(Instr::Cmp {
            dst,
            op: CmpOp::Ne,
            ty,
            lhs: value,
            rhs: zero,
        });
        dst
    }

    // ── Variable storage ─────────────────────────────────────────────────

    pub(crate) fn alloc_slot(&mut self, name: &str, ty: Ty) -> ValueId {
        let dst = self.func.new_value(ty);
        self.emit(Instr::Alloca {
            dst,
            ty,
            name: name.to_string(),
        });
        self.slots.insert(name.to_string(), dst);
        dst
    }

    pub(crate) fn slot(&self, name: &str) -> Result<ValueId, LoweringError> {
        self.slots
            .get(name)
            .copied()
            .ok_or_else(|| LoweringError::UnboundVariable(name.to_string()))
    }

    pub(crate) fn load_slot(&mut self, slot: ValueId) -> ValueId {
        let ty = self.func.value_ty(slot);
        let dst = self.func.new_value(ty);
        self.emit(Instr::Load { dst, ty, slot });
        dst
    }
}
