//! Syntax-tree interchange types.
//!
//! The external lexer+parser emits the parse tree as JSON; these types
//! are the wire format. Every node carries a `kind` tag. Integer
//! literals travel as decimal strings so arbitrary precision survives
//! serialization.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInput {
    pub statements: Vec<Stmt>,
}

pub type Suite = Vec<Stmt>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stmt {
    /// Bare expression evaluated for effect.
    ExprStmt { value: Expr },
    /// `t1, t2, ... = ... = expr`; one name list per `=` link.
    Assign {
        targets: Vec<Vec<String>>,
        value: Expr,
    },
    AugAssign {
        target: String,
        op: BinaryOperator,
        value: Expr,
    },
    Funcdef {
        name: String,
        params: Vec<Param>,
        body: Suite,
    },
    IfStmt {
        branches: Vec<IfBranch>,
        #[serde(default)]
        orelse: Option<Suite>,
    },
    WhileStmt {
        test: Expr,
        body: Suite,
    },
    ReturnStmt {
        #[serde(default)]
        value: Option<Expr>,
    },
    BreakStmt,
    ContinueStmt,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IfBranch {
    pub test: Expr,
    pub body: Suite,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    #[serde(default)]
    pub default: Option<Expr>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    /// `a or b or ...`; short-circuits on the first truthy operand.
    OrTest { operands: Vec<Expr> },
    /// `a and b and ...`; short-circuits on the first falsy operand.
    AndTest { operands: Vec<Expr> },
    NotTest { operand: Box<Expr> },
    /// `e0 op1 e1 op2 e2 ...`; each operand appears once.
    Comparison {
        first: Box<Expr>,
        rest: Vec<CompClause>,
    },
    /// `+`/`-` chain.
    ArithExpr {
        first: Box<Expr>,
        rest: Vec<OpClause>,
    },
    /// `*`/`/`/`//`/`%` chain.
    Term {
        first: Box<Expr>,
        rest: Vec<OpClause>,
    },
    /// Unary `+`/`-`.
    Factor {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
    /// `name(args...)`; the callee is always a bare name.
    Call { callee: String, args: Vec<Argument> },
    Name { id: String },
    Int { value: String },
    Float { value: f64 },
    Str { value: String },
    Bool { value: bool },
    None,
    FormatString { segments: Vec<FStringSegment> },
    /// Comma expression; two or more items evaluate to a tuple.
    Testlist { items: Vec<Expr> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompClause {
    pub op: CompareOperator,
    pub operand: Expr,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpClause {
    pub op: BinaryOperator,
    pub operand: Expr,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Argument {
    /// Present for keyword arguments (`f(x=1)`).
    #[serde(default)]
    pub name: Option<String>,
    pub value: Expr,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FStringSegment {
    /// Literal text; `{{` and `}}` arrive unescaped.
    Literal { text: String },
    Expression { value: Expr },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOperator {
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOperator {
    Pos,
    Neg,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::FloorDiv => "//",
            BinaryOperator::Mod => "%",
        };
        write!(f, "{}", s)
    }
}
