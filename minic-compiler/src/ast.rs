use std::fmt;

/// Source position carried by every node, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loc {
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Bool,
    Int,
    Float,
    Void,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Type::Bool => "bool",
            Type::Int => "int",
            Type::Float => "float",
            Type::Void => "void",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone)]
pub struct Name {
    pub ident: String,
    pub loc: Loc,
}

/// A typed binding: either a local variable or a function parameter.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub ty: Type,
    pub name: Name,
    pub loc: Loc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnOp {
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone)]
pub enum Expr {
    Bool {
        value: bool,
        loc: Loc,
    },
    Int {
        value: i32,
        loc: Loc,
    },
    Float {
        value: f32,
        loc: Loc,
    },
    Name(Name),
    Paren {
        inner: Box<Expr>,
        loc: Loc,
    },
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        loc: Loc,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
        loc: Loc,
    },
    Relational {
        op: RelOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        loc: Loc,
    },
    /// `cond ? then_val : else_val`
    Ternary {
        cond: Box<Expr>,
        then_val: Box<Expr>,
        else_val: Box<Expr>,
        loc: Loc,
    },
    /// `(type) operand`
    Cast {
        ty: Type,
        operand: Box<Expr>,
        loc: Loc,
    },
    Call {
        callee: Name,
        args: Vec<Expr>,
        loc: Loc,
    },
}

impl Expr {
    pub fn loc(&self) -> Loc {
        match self {
            Expr::Bool { loc, .. } => *loc,
            Expr::Int { loc, .. } => *loc,
            Expr::Float { loc, .. } => *loc,
            Expr::Name(name) => name.loc,
            Expr::Paren { loc, .. } => *loc,
            Expr::Binary { loc, .. } => *loc,
            Expr::Unary { loc, .. } => *loc,
            Expr::Relational { loc, .. } => *loc,
            Expr::Ternary { loc, .. } => *loc,
            Expr::Cast { loc, .. } => *loc,
            Expr::Call { loc, .. } => *loc,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Stmt {
    /// `int x;`
    Decl { decl: Declaration },
    /// `int x = e;`
    DeclAssign { decl: Declaration, value: Expr },
    /// `x = e;` and the compound forms `+= -= *= /=`
    Assign {
        target: Name,
        op: AssignOp,
        value: Expr,
        loc: Loc,
    },
    Break {
        loc: Loc,
    },
    Continue {
        loc: Loc,
    },
    Return {
        value: Option<Expr>,
        loc: Loc,
    },
    Expr {
        expr: Expr,
    },
    If {
        cond: Expr,
        body: Block,
        loc: Loc,
    },
    While {
        cond: Expr,
        body: Block,
        loc: Loc,
    },
    /// `for (init; cond; step) { ... }` — every clause is optional; the
    /// parser restricts init/step to simple statements.
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        step: Option<Box<Stmt>>,
        body: Block,
        loc: Loc,
    },
}

impl Stmt {
    /// The declaration introduced by this statement, if any.
    pub fn declaration(&self) -> Option<&Declaration> {
        match self {
            Stmt::Decl { decl } | Stmt::DeclAssign { decl, .. } => Some(decl),
            _ => None,
        }
    }
}

/// A statement sequence with its own variable scope.
#[derive(Debug, Clone)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub loc: Loc,
}

#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub ret: Type,
    pub name: Name,
    pub params: Vec<Declaration>,
    pub loc: Loc,
}

#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub decl: FunctionDecl,
    pub body: Block,
}

#[derive(Debug, Clone)]
pub enum Function {
    /// `int f(int a);` — a signature with no body.
    Decl(FunctionDecl),
    Def(FunctionDef),
}

impl Function {
    pub fn decl(&self) -> &FunctionDecl {
        match self {
            Function::Decl(decl) => decl,
            Function::Def(def) => &def.decl,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Program {
    pub functions: Vec<Function>,
    pub loc: Loc,
}
