//! The restricted internal tree the evaluator walks (§1, §4.5).
//!
//! [`crate::parse`] lowers a `ruff_python_ast::ModModule` into this tree,
//! rejecting anything outside the subset in §1. Keeping a private tree
//! rather than evaluating `ruff_python_ast` directly means the evaluator
//! never has to handle the full grammar's syntax, only the handful of node
//! kinds this language actually has.

use crate::bigint::BigInt;

/// A binary arithmetic or comparison operator (§4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
}

/// A comparison operator, as it appears in a (possibly chained) `Compare`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    NotEq,
}

/// `and` / `or` (§4.3, short-circuit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    And,
    Or,
}

/// Unary `+` / `-` (§4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Minus,
}

/// One piece of an f-string: either verbatim text or an embedded expression
/// whose value is string-coerced at evaluation time (§4.5).
#[derive(Debug, Clone)]
pub enum FStringPart {
    Literal(String),
    Interpolation(Box<Expr>),
}

/// An expression node. Matches the `atom`/`arith_expr`/`comparison`/... grammar
/// categories of §4.5, collapsed into one enum since the evaluator dispatches
/// by variant rather than by grammar production.
#[derive(Debug, Clone)]
pub enum Expr {
    Int(BigInt),
    Float(f64),
    Str(String),
    Bool(bool),
    None,
    /// A name reference; resolved against the environment at evaluation time
    /// (§4.5's "name deferral", resolved eagerly here since our `Expr` is not
    /// itself the evaluator's return value).
    Name(String),
    FString(Vec<FStringPart>),
    UnaryOp {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    BinOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    BoolOp {
        op: BoolOp,
        values: Vec<Expr>,
    },
    Not(Box<Expr>),
    /// A chained comparison `a op1 b op2 c ...`. `comparators` has the same
    /// length as `ops`; the implicit left operand of `comparators[i]` is
    /// `comparators[i-1]` (or `left` for `i == 0`).
    Compare {
        left: Box<Expr>,
        ops: Vec<CmpOp>,
        comparators: Vec<Expr>,
    },
    Call {
        func: String,
        args: Vec<Expr>,
    },
    /// A comma-separated expression list that produced more than one value
    /// (§3: "a single-element testlist unwraps to its element", so this
    /// variant never has exactly one element).
    Tuple(Vec<Expr>),
}

/// An assignment target: either a bare name or a tuple-unpack of names
/// (`a, b = ...`). Nested tuple targets (`a, (b, c) = ...`) are outside the
/// subset and rejected during lowering.
#[derive(Debug, Clone)]
pub enum AssignTarget {
    Name(String),
    Tuple(Vec<String>),
}

/// A function parameter; `default` is the already-parsed default expression,
/// evaluated once at `def` time in the enclosing scope (§3).
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub default: Option<Expr>,
}

/// A statement node (§4.5).
#[derive(Debug, Clone)]
pub enum Stmt {
    Expr(Expr),
    /// `targets = targets = ... = value`, left-to-right target lists all
    /// bound to the same evaluated right-hand side (§4.5).
    Assign {
        targets: Vec<AssignTarget>,
        value: Expr,
    },
    AugAssign {
        target: String,
        op: BinOp,
        value: Expr,
    },
    /// An `if`/`elif`/`else` chain, already flattened so that each `elif` is
    /// represented as a single-branch `If` nested in `orelse` (mirroring how
    /// the grammar's `elif_else_clauses` lowers).
    If {
        test: Expr,
        body: Vec<Stmt>,
        orelse: Vec<Stmt>,
    },
    While {
        test: Expr,
        body: Vec<Stmt>,
    },
    FunctionDef {
        name: String,
        params: Vec<Param>,
        body: Vec<Stmt>,
    },
    Return(Option<Expr>),
    Break,
    Continue,
}
