// A small register-based IR: functions of basic blocks with typed
// instructions and explicit control-flow edges.

use crate::ast;
use std::fmt;

/// Value kinds. `bool` and `float` share the floating kind; comparison
/// results are 0/1 values of that kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ty {
    Int,
    Fp,
    Void,
}

impl From<ast::Type> for Ty {
    fn from(ty: ast::Type) -> Self {
        match ty {
            ast::Type::Int => Ty::Int,
            ast::Type::Bool | ast::Type::Float => Ty::Fp,
            ast::Type::Void => Ty::Void,
        }
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Ty::Int => "i32",
            Ty::Fp => "f32",
            Ty::Void => "void",
        };
        write!(f, "{name}")
    }
}

/// A virtual register, unique within its function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueId(pub usize);

impl fmt::Display for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstValue {
    Int(i32),
    Fp(f32),
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Int(v) => write!(f, "{v}"),
            ConstValue::Fp(v) => write!(f, "{v:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BinOp::Add => "add",
            BinOp::Sub => "sub",
            BinOp::Mul => "mul",
            BinOp::Div => "div",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CmpOp::Eq => "eq",
            CmpOp::Ne => "ne",
            CmpOp::Lt => "lt",
            CmpOp::Gt => "gt",
            CmpOp::Le => "le",
            CmpOp::Ge => "ge",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone)]
pub enum Instr {
    /// `dst = const <ty> <value>`
    Const {
        dst: ValueId,
        ty: Ty,
        value: ConstValue,
    },
    /// `dst = alloca <ty>` — a named stack slot holding one value
    Alloca { dst: ValueId, ty: Ty, name: String },
    /// `dst = load <ty> <slot>`
    Load { dst: ValueId, ty: Ty, slot: ValueId },
    /// `store <value> -> <slot>`
    Store { slot: ValueId, value: ValueId },
    /// `dst = <op> <ty> <lhs>, <rhs>` — arithmetic on one value kind
    Bin {
        dst: ValueId,
        op: BinOp,
        ty: Ty,
        lhs: ValueId,
        rhs: ValueId,
    },
    /// `dst = cmp <op> <ty> <lhs>, <rhs>` — result is a 0/1 value of the
    /// floating kind
    Cmp {
        dst: ValueId,
        op: CmpOp,
        ty: Ty,
        lhs: ValueId,
        rhs: ValueId,
    },
    /// `dst = cast <to> <value>` — conversion between the two numeric kinds
    Cast { dst: ValueId, to: Ty, value: ValueId },
    /// `dst = call @callee(args)` — no destination for void callees
    Call {
        dst: Option<ValueId>,
        callee: String,
        args: Vec<ValueId>,
    },
    /// `dst = phi <ty> [pred value], ...` — merge of predecessor values
    Phi {
        dst: ValueId,
        ty: Ty,
        incoming: Vec<(BlockId, ValueId)>,
    },
}

#[derive(Debug, Clone)]
pub enum Terminator {
    Br(BlockId),
    /// Take `then_to` when `cond` is nonzero.
    CondBr {
        cond: ValueId,
        then_to: BlockId,
        else_to: BlockId,
    },
    Ret(Option<ValueId>),
}

#[derive(Debug, Clone)]
pub struct BasicBlock {
    pub label: String,
    pub instrs: Vec<Instr>,
    pub term: Option<Terminator>,
}

#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub ret: Ty,
    pub params: Vec<(String, Ty)>,
    pub blocks: Vec<BasicBlock>,
    /// Type of every value; parameters occupy ids `0..params.len()`.
    value_tys: Vec<Ty>,
}

impl Function {
    /// A signature with no body. Definitions grow blocks from here;
    /// declaration-only functions stay as stubs.
    pub fn stub(name: String, ret: Ty, params: Vec<(String, Ty)>) -> Self {
        let value_tys = params.iter().map(|(_, ty)| *ty).collect();
        Self {
            name,
            ret,
            params,
            blocks: Vec::new(),
            value_tys,
        }
    }

    pub fn is_defined(&self) -> bool {
        !self.blocks.is_empty()
    }

    pub fn value_ty(&self, value: ValueId) -> Ty {
        self.value_tys[value.0]
    }

    pub(crate) fn new_value(&mut self, ty: Ty) -> ValueId {
        let id = ValueId(self.value_tys.len());
        self.value_tys.push(ty);
        id
    }

    pub(crate) fn add_block(&mut self, base: &str) -> BlockId {
        let id = BlockId(self.blocks.len());
        self.blocks.push(BasicBlock {
            label: format!("{base}{}", id.0),
            instrs: Vec::new(),
            term: None,
        });
        id
    }

    pub fn block(&self, id: BlockId) -> &BasicBlock {
        &self.blocks[id.0]
    }

    fn block_label(&self, id: BlockId) -> &str {
        &self.blocks[id.0].label
    }
}

#[derive(Debug, Clone, Default)]
pub struct Module {
    pub functions: Vec<Function>,
}

impl Module {
    pub fn get_function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn to_lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        for func in &self.functions {
            let sig = func
                .params
                .iter()
                .enumerate()
                .map(|(i, (_, ty))| format!("{ty} %{i}"))
                .collect::<Vec<_>>()
                .join(", ");
            if !func.is_defined() {
                out.push(format!("declare {} @{}({})", func.ret, func.name, sig));
                continue;
            }
            out.push(format!("define {} @{}({}) {{", func.ret, func.name, sig));
            for bb in &func.blocks {
                out.push(format!("{}:", bb.label));
                for instr in &bb.instrs {
                    out.push(format!("  {}", show_instr(func, instr)));
                }
                if let Some(term) = &bb.term {
                    out.push(format!("  {}", show_term(func, term)));
                }
            }
            out.push("}".to_string());
        }
        out
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.to_lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

fn show_instr(func: &Function, instr: &Instr) -> String {
    match instr {
        Instr::Const { dst, ty, value } => format!("{dst} = const {ty} {value}"),
        Instr::Alloca { dst, ty, name } => format!("{dst} = alloca {ty} {name}"),
        Instr::Load { dst, ty, slot } => format!("{dst} = load {ty} {slot}"),
        Instr::Store { slot, value } => format!("store {value} -> {slot}"),
        Instr::Bin {
            dst,
            op,
            ty,
            lhs,
            rhs,
        } => format!("{dst} = {op} {ty} {lhs}, {rhs}"),
        Instr::Cmp {
            dst,
            op,
            ty,
            lhs,
            rhs,
        } => format!("{dst} = cmp {op} {ty} {lhs}, {rhs}"),
        Instr::Cast { dst, to, value } => format!("{dst} = cast {to} {value}"),
        Instr::Call { dst, callee, args } => {
            let args = args
                .iter()
                .map(|a| a.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            match dst {
                Some(dst) => format!("{dst} = call @{callee}({args})"),
                None => format!("call @{callee}({args})"),
            }
        }
        Instr::Phi { dst, ty, incoming } => {
            let incoming = incoming
                .iter()
                .map(|(bb, value)| format!("[{} {value}]", func.block_label(*bb)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{dst} = phi {ty} {incoming}")
        }
    }
}

fn show_term(func: &Function, term: &Terminator) -> String {
    match term {
        Terminator::Br(to) => format!("br {}", func.block_label(*to)),
        Terminator::CondBr {
            cond,
            then_to,
            else_to,
        } => format!(
            "br {cond} ? {} : {}",
            func.block_label(*then_to),
            func.block_label(*else_to)
        ),
        Terminator::Ret(Some(value)) => format!("ret {value}"),
        Terminator::Ret(None) => "ret void".to_string(),
    }
}
