//! Lowers `ruff_python_ast` into [`crate::ast`].
//!
//! This is the boundary the task description calls "an external grammar
//! front-end" (§1): `ruff_python_parser::parse_module` does the lexing and
//! parsing, producing a typed `ModModule`. Everything here does is walk that
//! tree exactly once and either translate a node into the restricted
//! `pylet::ast` it has a direct counterpart for, or reject it with
//! [`ParseError::NotSupported`] carrying the offending node's source range.

use std::fmt;

use ruff_python_ast::{self as pyast, Expr as AstExpr, Stmt as AstStmt};
use ruff_text_size::{Ranged, TextRange};

use crate::ast::{AssignTarget, BinOp, BoolOp, CmpOp, Expr, FStringPart, Param, Stmt, UnaryOp};
use crate::bigint::BigInt;

/// An error raised while lowering the external parse tree into [`crate::ast`].
#[derive(Debug, Clone)]
pub enum ParseError {
    /// A syntax error surfaced by the underlying grammar front-end itself.
    Syntax { msg: String, range: TextRange },
    /// A grammatically valid construct outside this language's subset (§1's
    /// Non-goals), e.g. a class, a list literal, a `try`/`except`.
    NotSupported { msg: String, range: TextRange },
}

impl ParseError {
    fn not_supported(msg: impl Into<String>, range: TextRange) -> Self {
        Self::NotSupported { msg: msg.into(), range }
    }

    fn syntax(msg: impl Into<String>, range: TextRange) -> Self {
        Self::Syntax { msg: msg.into(), range }
    }

    /// The byte offset range in the source this error was raised at.
    pub fn range(&self) -> TextRange {
        match self {
            Self::Syntax { range, .. } | Self::NotSupported { range, .. } => *range,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax { msg, .. } => write!(f, "SyntaxError: {msg}"),
            Self::NotSupported { msg, .. } => write!(f, "SyntaxError: unsupported construct: {msg}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses `source` with the external grammar front-end and lowers the result
/// into a program body (a list of top-level statements).
///
/// # Errors
/// Returns [`ParseError::Syntax`] if `source` is not valid in the supported
/// grammar subset, or [`ParseError::NotSupported`] if it uses a construct
/// outside §1's scope.
pub fn parse_program(source: &str) -> Result<Vec<Stmt>, ParseError> {
    let parsed = ruff_python_parser::parse_module(source).map_err(|err| ParseError::syntax(err.to_string(), err.range()))?;
    let module = parsed.into_syntax();
    lower_statements(module.body)
}

fn lower_statements(statements: Vec<AstStmt>) -> Result<Vec<Stmt>, ParseError> {
    statements.into_iter().map(lower_statement).collect()
}

fn lower_statement(statement: AstStmt) -> Result<Stmt, ParseError> {
    match statement {
        AstStmt::Expr(pyast::StmtExpr { value, .. }) => Ok(Stmt::Expr(lower_expr(*value)?)),
        AstStmt::Assign(pyast::StmtAssign { targets, value, range, .. }) => {
            let value = lower_expr(*value)?;
            let targets = targets
                .into_iter()
                .map(|t| lower_assign_target(t, range))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Stmt::Assign { targets, value })
        }
        AstStmt::AugAssign(pyast::StmtAugAssign { target, op, value, range, .. }) => {
            let op = lower_bin_op(op, range)?;
            let value = lower_expr(*value)?;
            match *target {
                AstExpr::Name(pyast::ExprName { id, .. }) => Ok(Stmt::AugAssign {
                    target: id.to_string(),
                    op,
                    value,
                }),
                other => Err(ParseError::not_supported("augmented assignment to a non-name target", other.range())),
            }
        }
        AstStmt::If(pyast::StmtIf {
            test, body, elif_else_clauses, ..
        }) => {
            let test = lower_expr(*test)?;
            let body = lower_statements(body)?;
            let orelse = lower_elif_else_clauses(elif_else_clauses)?;
            Ok(Stmt::If { test, body, orelse })
        }
        AstStmt::While(pyast::StmtWhile { test, body, orelse, range, .. }) => {
            if !orelse.is_empty() {
                return Err(ParseError::not_supported("while/else", range));
            }
            Ok(Stmt::While {
                test: lower_expr(*test)?,
                body: lower_statements(body)?,
            })
        }
        AstStmt::FunctionDef(pyast::StmtFunctionDef {
            name, parameters, body, range, ..
        }) => {
            if !parameters.posonlyargs.is_empty() {
                return Err(ParseError::not_supported("positional-only parameters", range));
            }
            if parameters.vararg.is_some() || parameters.kwarg.is_some() {
                return Err(ParseError::not_supported("*args/**kwargs parameters", range));
            }
            if !parameters.kwonlyargs.is_empty() {
                return Err(ParseError::not_supported("keyword-only parameters", range));
            }
            let params = parameters
                .args
                .into_iter()
                .map(lower_param)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Stmt::FunctionDef {
                name: name.id.to_string(),
                params,
                body: lower_statements(body)?,
            })
        }
        AstStmt::Return(pyast::StmtReturn { value, .. }) => Ok(Stmt::Return(value.map(|v| lower_expr(*v)).transpose()?)),
        AstStmt::Break(pyast::StmtBreak { .. }) => Ok(Stmt::Break),
        AstStmt::Continue(pyast::StmtContinue { .. }) => Ok(Stmt::Continue),
        AstStmt::Pass(pyast::StmtPass { .. }) => Ok(Stmt::Expr(Expr::None)),
        other => Err(ParseError::not_supported(statement_label(&other), other.range())),
    }
}

fn lower_elif_else_clauses(clauses: Vec<pyast::ElifElseClause>) -> Result<Vec<Stmt>, ParseError> {
    let mut tail = Vec::new();
    for clause in clauses.into_iter().rev() {
        match clause.test {
            Some(test) => {
                tail = vec![Stmt::If {
                    test: lower_expr(test)?,
                    body: lower_statements(clause.body)?,
                    orelse: tail,
                }];
            }
            None => tail = lower_statements(clause.body)?,
        }
    }
    Ok(tail)
}

fn lower_param(param: pyast::ParameterWithDefault) -> Result<Param, ParseError> {
    if param.parameter.annotation.is_some() {
        // Annotations are parsed but carry no runtime meaning here; ignore them.
    }
    let default = param.default.map(|d| lower_expr(*d)).transpose()?;
    Ok(Param {
        name: param.parameter.name.id.to_string(),
        default,
    })
}

/// A single assignment target, possibly a tuple-unpack (`a, b = ...`).
fn lower_assign_target(target: AstExpr, stmt_range: TextRange) -> Result<AssignTarget, ParseError> {
    match target {
        AstExpr::Name(pyast::ExprName { id, .. }) => Ok(AssignTarget::Name(id.to_string())),
        AstExpr::Tuple(pyast::ExprTuple { elts, range, .. }) | AstExpr::List(pyast::ExprList { elts, range, .. }) => {
            let mut names = Vec::with_capacity(elts.len());
            for elt in elts {
                match elt {
                    AstExpr::Name(pyast::ExprName { id, .. }) => names.push(id.to_string()),
                    other => return Err(ParseError::not_supported("nested unpack target", other.range())),
                }
            }
            if names.is_empty() {
                return Err(ParseError::syntax("empty unpack target", range));
            }
            Ok(AssignTarget::Tuple(names))
        }
        other => Err(ParseError::not_supported(
            "assignment to anything but a name or a name tuple",
            if other.range().is_empty() { stmt_range } else { other.range() },
        )),
    }
}

fn lower_expr(expr: AstExpr) -> Result<Expr, ParseError> {
    match expr {
        AstExpr::NumberLiteral(pyast::ExprNumberLiteral { value, range, .. }) => match value {
            pyast::Number::Int(i) => match i.as_i64() {
                Some(i) => Ok(Expr::Int(BigInt::from_i64(i))),
                None => BigInt::parse(&i.to_string())
                    .map(Expr::Int)
                    .map_err(|_| ParseError::syntax(format!("invalid integer literal: {i}"), range)),
            },
            pyast::Number::Float(f) => Ok(Expr::Float(f)),
            pyast::Number::Complex { .. } => Err(ParseError::not_supported("complex literals", range)),
        },
        AstExpr::StringLiteral(pyast::ExprStringLiteral { value, .. }) => Ok(Expr::Str(value.to_string())),
        AstExpr::BooleanLiteral(pyast::ExprBooleanLiteral { value, .. }) => Ok(Expr::Bool(value)),
        AstExpr::NoneLiteral(pyast::ExprNoneLiteral { .. }) => Ok(Expr::None),
        AstExpr::Name(pyast::ExprName { id, .. }) => Ok(Expr::Name(id.to_string())),
        AstExpr::FString(pyast::ExprFString { value, .. }) => lower_fstring(&value),
        AstExpr::UnaryOp(pyast::ExprUnaryOp { op, operand, range, .. }) => {
            let operand = Box::new(lower_expr(*operand)?);
            match op {
                pyast::UnaryOp::UAdd => Ok(Expr::UnaryOp { op: UnaryOp::Plus, operand }),
                pyast::UnaryOp::USub => Ok(Expr::UnaryOp { op: UnaryOp::Minus, operand }),
                pyast::UnaryOp::Not => Ok(Expr::Not(operand)),
                pyast::UnaryOp::Invert => Err(ParseError::not_supported("bitwise `~`", range)),
            }
        }
        AstExpr::BinOp(pyast::ExprBinOp { left, op, right, range, .. }) => Ok(Expr::BinOp {
            op: lower_bin_op(op, range)?,
            left: Box::new(lower_expr(*left)?),
            right: Box::new(lower_expr(*right)?),
        }),
        AstExpr::BoolOp(pyast::ExprBoolOp { op, values, .. }) => Ok(Expr::BoolOp {
            op: match op {
                pyast::BoolOp::And => BoolOp::And,
                pyast::BoolOp::Or => BoolOp::Or,
            },
            values: values.into_iter().map(lower_expr).collect::<Result<Vec<_>, _>>()?,
        }),
        AstExpr::Compare(pyast::ExprCompare {
            left, ops, comparators, range, ..
        }) => {
            let ops = ops.into_iter().map(|op| lower_cmp_op(op, range)).collect::<Result<Vec<_>, _>>()?;
            let comparators = comparators.into_vec().into_iter().map(lower_expr).collect::<Result<Vec<_>, _>>()?;
            Ok(Expr::Compare {
                left: Box::new(lower_expr(*left)?),
                ops,
                comparators,
            })
        }
        AstExpr::Call(pyast::ExprCall { func, arguments, range, .. }) => {
            let name = match *func {
                AstExpr::Name(pyast::ExprName { id, .. }) => id.to_string(),
                other => return Err(ParseError::not_supported("calling a non-name expression", other.range())),
            };
            if !arguments.keywords.is_empty() {
                return Err(ParseError::not_supported("keyword arguments", range));
            }
            let args = arguments
                .args
                .into_vec()
                .into_iter()
                .map(|a| {
                    if matches!(a, AstExpr::Starred(_)) {
                        return Err(ParseError::not_supported("starred call arguments", a.range()));
                    }
                    lower_expr(a)
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Expr::Call { func: name, args })
        }
        AstExpr::Tuple(pyast::ExprTuple { elts, .. }) => {
            let items = elts.into_iter().map(lower_expr).collect::<Result<Vec<_>, _>>()?;
            Ok(Expr::Tuple(items))
        }
        other => Err(ParseError::not_supported(expr_label(&other), other.range())),
    }
}

fn lower_bin_op(op: pyast::Operator, range: TextRange) -> Result<BinOp, ParseError> {
    match op {
        pyast::Operator::Add => Ok(BinOp::Add),
        pyast::Operator::Sub => Ok(BinOp::Sub),
        pyast::Operator::Mult => Ok(BinOp::Mul),
        pyast::Operator::Div => Ok(BinOp::Div),
        pyast::Operator::FloorDiv => Ok(BinOp::FloorDiv),
        pyast::Operator::Mod => Ok(BinOp::Mod),
        other => Err(ParseError::not_supported(format!("operator {other:?}"), range)),
    }
}

fn lower_cmp_op(op: pyast::CmpOp, range: TextRange) -> Result<CmpOp, ParseError> {
    match op {
        pyast::CmpOp::Lt => Ok(CmpOp::Lt),
        pyast::CmpOp::Gt => Ok(CmpOp::Gt),
        pyast::CmpOp::LtE => Ok(CmpOp::Le),
        pyast::CmpOp::GtE => Ok(CmpOp::Ge),
        pyast::CmpOp::Eq => Ok(CmpOp::Eq),
        pyast::CmpOp::NotEq => Ok(CmpOp::NotEq),
        other => Err(ParseError::not_supported(format!("comparison operator {other:?}"), range)),
    }
}

fn lower_fstring(value: &pyast::FStringValue) -> Result<Expr, ParseError> {
    let mut parts = Vec::new();
    for part in value {
        match part {
            pyast::FStringPart::Literal(lit) => parts.push(FStringPart::Literal(lit.value.to_string())),
            pyast::FStringPart::FString(fstring) => {
                for element in &fstring.elements {
                    match element {
                        pyast::InterpolatedStringElement::Literal(lit) => parts.push(FStringPart::Literal(lit.value.to_string())),
                        pyast::InterpolatedStringElement::Interpolation(interp) => {
                            if interp.conversion != pyast::ConversionFlag::None {
                                return Err(ParseError::not_supported("f-string conversion flags (!r/!s/!a)", interp.range()));
                            }
                            if interp.format_spec.is_some() {
                                return Err(ParseError::not_supported("f-string format specs", interp.range()));
                            }
                            let inner = lower_expr((*interp.expression).clone())?;
                            parts.push(FStringPart::Interpolation(Box::new(inner)));
                        }
                    }
                }
            }
        }
    }
    Ok(Expr::FString(parts))
}

fn statement_label(stmt: &AstStmt) -> &'static str {
    match stmt {
        AstStmt::ClassDef(_) => "class definitions",
        AstStmt::Delete(_) => "del statements",
        AstStmt::TypeAlias(_) => "type alias statements",
        AstStmt::AnnAssign(_) => "annotated assignment",
        AstStmt::For(_) => "for loops",
        AstStmt::With(_) => "with statements",
        AstStmt::Match(_) => "match statements",
        AstStmt::Raise(_) => "raise statements",
        AstStmt::Try(_) => "try/except statements",
        AstStmt::Assert(_) => "assert statements",
        AstStmt::Import(_) | AstStmt::ImportFrom(_) => "import statements",
        AstStmt::Global(_) => "global statements",
        AstStmt::Nonlocal(_) => "nonlocal statements",
        AstStmt::IpyEscapeCommand(_) => "IPython escape commands",
        _ => "this statement",
    }
}

fn expr_label(expr: &AstExpr) -> &'static str {
    match expr {
        AstExpr::BytesLiteral(_) => "bytes literals",
        AstExpr::EllipsisLiteral(_) => "`...`",
        AstExpr::Named(_) => "named expressions (`:=`)",
        AstExpr::Lambda(_) => "lambda expressions",
        AstExpr::If(_) => "conditional expressions",
        AstExpr::Dict(_) => "dict literals",
        AstExpr::Set(_) => "set literals",
        AstExpr::List(_) => "list literals",
        AstExpr::ListComp(_) => "list comprehensions",
        AstExpr::SetComp(_) => "set comprehensions",
        AstExpr::DictComp(_) => "dict comprehensions",
        AstExpr::Generator(_) => "generator expressions",
        AstExpr::Await(_) => "await expressions",
        AstExpr::Yield(_) | AstExpr::YieldFrom(_) => "yield expressions",
        AstExpr::Attribute(_) => "attribute access",
        AstExpr::Subscript(_) => "subscripting",
        AstExpr::Starred(_) => "starred expressions",
        AstExpr::Slice(_) => "slice expressions",
        AstExpr::IpyEscapeCommand(_) => "IPython escape commands",
        _ => "this expression",
    }
}
