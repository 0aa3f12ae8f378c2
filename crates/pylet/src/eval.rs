//! The tree-walking visitor (§4.5).
//!
//! Every statement returns `Option<ControlSignal>`: `None` means "fell off
//! the end normally", `Some(signal)` means `break`/`continue`/`return` is
//! propagating upward. Loops consume `Break`/`Continue`; function calls
//! consume `Return`; anything else re-propagates to its caller. Expressions
//! return a plain [`Value`] since `break`/`continue`/`return` cannot appear
//! mid-expression in this grammar subset.

use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::{AssignTarget, BoolOp, Expr, FStringPart, Stmt};
use crate::builtins;
use crate::environment::Environment;
use crate::error::RuntimeError;
use crate::function::{Function, Parameter};
use crate::io::PrintWriter;
use crate::ops;
use crate::value::Value;

/// A non-value result threaded through statement evaluation to implement
/// `break`/`continue`/`return` without using host-language exceptions (§9).
#[derive(Debug, Clone)]
pub enum ControlSignal {
    Break,
    Continue,
    Return(Value),
}

pub struct Evaluator<'w> {
    env: Environment,
    functions: HashMap<String, Rc<Function>>,
    writer: &'w mut dyn PrintWriter,
}

impl<'w> Evaluator<'w> {
    pub fn new(writer: &'w mut dyn PrintWriter) -> Self {
        Self {
            env: Environment::new(),
            functions: HashMap::new(),
            writer,
        }
    }

    /// Runs a whole program's top-level statements.
    ///
    /// # Errors
    /// Returns the first [`RuntimeError`] any statement raises; evaluation
    /// stops there (§7: the source language has no exception handling).
    pub fn run(&mut self, program: &[Stmt]) -> Result<(), RuntimeError> {
        self.exec_block(program)?;
        Ok(())
    }

    fn exec_block(&mut self, stmts: &[Stmt]) -> Result<Option<ControlSignal>, RuntimeError> {
        for stmt in stmts {
            if let Some(signal) = self.exec_stmt(stmt)? {
                return Ok(Some(signal));
            }
        }
        Ok(None)
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> Result<Option<ControlSignal>, RuntimeError> {
        match stmt {
            Stmt::Expr(expr) => {
                self.eval_expr(expr)?;
                Ok(None)
            }
            Stmt::Assign { targets, value } => {
                let value = self.eval_expr(value)?;
                for target in targets {
                    self.bind_target(target, value.clone())?;
                }
                Ok(None)
            }
            Stmt::AugAssign { target, op, value } => {
                let rhs = self.eval_expr(value)?;
                let current = self
                    .env
                    .get(target)
                    .cloned()
                    .ok_or_else(|| RuntimeError::NameError(format!("name '{target}' is not defined")))?;
                let result = ops::apply_bin_op(*op, &current, &rhs)?;
                self.env.set(target, result);
                Ok(None)
            }
            Stmt::If { test, body, orelse } => {
                if self.eval_expr(test)?.is_truthy() {
                    self.exec_block(body)
                } else {
                    self.exec_block(orelse)
                }
            }
            Stmt::While { test, body } => {
                while self.eval_expr(test)?.is_truthy() {
                    match self.exec_block(body)? {
                        Some(ControlSignal::Break) => break,
                        Some(ControlSignal::Continue) | None => {}
                        Some(signal @ ControlSignal::Return(_)) => return Ok(Some(signal)),
                    }
                }
                Ok(None)
            }
            Stmt::FunctionDef { name, params, body } => {
                let mut evaluated = Vec::with_capacity(params.len());
                for param in params {
                    let default = param.default.as_ref().map(|d| self.eval_expr(d)).transpose()?;
                    evaluated.push(Parameter {
                        name: param.name.clone(),
                        default,
                    });
                }
                self.functions.insert(
                    name.clone(),
                    Rc::new(Function {
                        name: name.clone(),
                        params: evaluated,
                        body: Rc::from(body.clone().into_boxed_slice()),
                    }),
                );
                Ok(None)
            }
            Stmt::Return(expr) => {
                let value = expr.as_ref().map(|e| self.eval_expr(e)).transpose()?.unwrap_or(Value::None);
                Ok(Some(ControlSignal::Return(value)))
            }
            Stmt::Break => Ok(Some(ControlSignal::Break)),
            Stmt::Continue => Ok(Some(ControlSignal::Continue)),
        }
    }

    fn bind_target(&mut self, target: &AssignTarget, value: Value) -> Result<(), RuntimeError> {
        match target {
            AssignTarget::Name(name) => {
                self.env.set(name, value);
                Ok(())
            }
            AssignTarget::Tuple(names) => {
                let Value::Tuple(items) = value else {
                    return Err(RuntimeError::TypeError("cannot unpack a non-tuple value".to_owned()));
                };
                if items.len() != names.len() {
                    return Err(RuntimeError::ValueError(format!(
                        "not enough values to unpack (expected {}, got {})",
                        names.len(),
                        items.len()
                    )));
                }
                for (name, item) in names.iter().zip(items) {
                    self.env.set(name, item);
                }
                Ok(())
            }
        }
    }

    fn eval_expr(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Int(i) => Ok(Value::Int(i.clone())),
            Expr::Float(f) => Ok(Value::Float(*f)),
            Expr::Str(s) => Ok(Value::str(s.as_str())),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::None => Ok(Value::None),
            Expr::Name(name) => self
                .env
                .get(name)
                .cloned()
                .ok_or_else(|| RuntimeError::NameError(format!("name '{name}' is not defined"))),
            Expr::FString(parts) => self.eval_fstring(parts),
            Expr::UnaryOp { op, operand } => {
                let operand = self.eval_expr(operand)?;
                ops::apply_unary_op(*op, &operand)
            }
            Expr::BinOp { op, left, right } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                ops::apply_bin_op(*op, &left, &right)
            }
            Expr::Not(operand) => Ok(Value::Bool(!self.eval_expr(operand)?.is_truthy())),
            Expr::BoolOp { op, values } => self.eval_bool_op(*op, values),
            Expr::Compare { left, ops, comparators } => self.eval_compare(left, ops, comparators),
            Expr::Call { func, args } => self.eval_call(func, args),
            Expr::Tuple(items) => self.eval_testlist(items),
        }
    }

    /// `and`/`or` short-circuit (§4.3): evaluates operands left-to-right,
    /// stopping at the first operand whose truth value decides the result.
    fn eval_bool_op(&mut self, op: BoolOp, values: &[Expr]) -> Result<Value, RuntimeError> {
        let mut last = Value::Bool(false);
        for (idx, value) in values.iter().enumerate() {
            last = self.eval_expr(value)?;
            let truthy = last.is_truthy();
            let short_circuits = match op {
                BoolOp::Or => truthy,
                BoolOp::And => !truthy,
            };
            if short_circuits || idx == values.len() - 1 {
                return Ok(Value::Bool(truthy));
            }
        }
        Ok(last)
    }

    /// Chained comparison (§4.3): each intermediate operand is evaluated
    /// exactly once and reused as the left side of the next comparison.
    fn eval_compare(&mut self, left: &Expr, ops: &[crate::ast::CmpOp], comparators: &[Expr]) -> Result<Value, RuntimeError> {
        let mut left_value = self.eval_expr(left)?;
        for (op, comparator) in ops.iter().zip(comparators) {
            let right_value = self.eval_expr(comparator)?;
            if !ops::apply_cmp_op(*op, &left_value, &right_value)? {
                return Ok(Value::Bool(false));
            }
            left_value = right_value;
        }
        Ok(Value::Bool(true))
    }

    /// A comma-separated expression list (§3): flattens one level of any
    /// sub-result that is itself a `Tuple`, and unwraps a single remaining
    /// value rather than wrapping it.
    fn eval_testlist(&mut self, items: &[Expr]) -> Result<Value, RuntimeError> {
        let mut flat = Vec::with_capacity(items.len());
        for item in items {
            match self.eval_expr(item)? {
                Value::Tuple(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        if flat.len() == 1 {
            Ok(flat.into_iter().next().expect("checked len"))
        } else {
            Ok(Value::Tuple(flat))
        }
    }

    fn eval_fstring(&mut self, parts: &[FStringPart]) -> Result<Value, RuntimeError> {
        let mut out = String::new();
        for part in parts {
            match part {
                FStringPart::Literal(text) => out.push_str(text),
                FStringPart::Interpolation(expr) => out.push_str(&self.eval_expr(expr)?.to_py_string()),
            }
        }
        Ok(Value::str(out))
    }

    fn eval_call(&mut self, func: &str, args: &[Expr]) -> Result<Value, RuntimeError> {
        let values = args.iter().map(|a| self.eval_expr(a)).collect::<Result<Vec<_>, _>>()?;
        if builtins::is_builtin(func) {
            return builtins::call(func, &values, self.writer);
        }
        let Some(function) = self.functions.get(func).cloned() else {
            return Err(RuntimeError::NameError(format!("name '{func}' is not defined")));
        };
        self.call_function(&function, values)
    }

    fn call_function(&mut self, function: &Function, args: Vec<Value>) -> Result<Value, RuntimeError> {
        if args.len() > function.params.len() {
            return Err(RuntimeError::ArityError(format!(
                "{}() takes at most {} argument(s) ({} given)",
                function.name,
                function.params.len(),
                args.len()
            )));
        }

        let mut bindings = HashMap::with_capacity(function.params.len());
        let mut args = args.into_iter();
        for param in &function.params {
            let value = match args.next() {
                Some(value) => value,
                None => param
                    .default
                    .clone()
                    .ok_or_else(|| RuntimeError::ArityError(format!("{}() missing required argument: '{}'", function.name, param.name)))?,
            };
            bindings.insert(param.name.clone(), value);
        }

        self.env.push_call_frame(bindings);
        let result = self.exec_block(&function.body);
        self.env.pop_call_frame();

        match result? {
            Some(ControlSignal::Return(value)) => Ok(value),
            Some(ControlSignal::Break | ControlSignal::Continue) => {
                Err(RuntimeError::InternalError("break/continue escaped its enclosing loop".to_owned()))
            }
            None => Ok(Value::None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::CollectStringPrint;
    use crate::parse::parse_program;

    fn run_and_collect(source: &str) -> String {
        let program = parse_program(source).unwrap();
        let mut out = CollectStringPrint::new();
        let mut evaluator = Evaluator::new(&mut out);
        evaluator.run(&program).unwrap();
        out.into_output()
    }

    #[test]
    fn bigint_overflows_i64() {
        // `**` is not in the supported operator set (§4.3 lists only
        // `+ - * / // %`), so 10**40 is realized as repeated multiplication.
        let source = "a = 1\ni = 0\nwhile i < 40:\n    a = a * 10\n    i = i + 1\nprint(a + 1)\n";
        assert_eq!(run_and_collect(source), "10000000000000000000000000000000000000001\n");
    }

    #[test]
    fn floor_division_and_mod_match_python() {
        assert_eq!(run_and_collect("print(-7 // 2)\nprint(-7 % 2)\n"), "-4\n1\n");
    }

    #[test]
    fn chained_comparisons_short_circuit() {
        assert_eq!(run_and_collect("print(1 < 2 < 3)\nprint(1 < 3 < 2)\n"), "True\nFalse\n");
    }

    #[test]
    fn function_default_and_early_return() {
        let source = "def f(x, y=10):\n    if x < 0:\n        return -1\n    return x + y\nprint(f(5))\nprint(f(5, 1))\nprint(f(-1))\n";
        assert_eq!(run_and_collect(source), "15\n6\n-1\n");
    }

    #[test]
    fn while_with_break_and_continue() {
        let source = "i = 0\ns = 0\nwhile i < 10:\n    i = i + 1\n    if i % 2 == 0:\n        continue\n    if i > 7:\n        break\n    s = s + i\nprint(s)\n";
        assert_eq!(run_and_collect(source), "16\n");
    }

    #[test]
    fn multi_target_assignment_and_multi_return() {
        let source = "def pair():\n    return 1, 2\na, b = pair()\nprint(a, b)\n";
        assert_eq!(run_and_collect(source), "1 2\n");
    }

    #[test]
    fn string_repeat_and_concat() {
        assert_eq!(run_and_collect("print(\"ab\" * 3 + \"!\")\n"), "ababab!\n");
    }

    #[test]
    fn fstring_interpolation() {
        assert_eq!(run_and_collect("x = 7\nprint(f\"x={x*x}\")\n"), "x=49\n");
    }
}
