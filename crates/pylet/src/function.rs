//! User-defined functions (§3, §4.5).
//!
//! A [`Function`] is just parameter metadata plus a body reference; it owns
//! no scope of its own; the environment's call frame is built fresh at each
//! call site from the matched-up arguments.

use std::rc::Rc;

use crate::ast::Stmt;
use crate::value::Value;

/// One formal parameter. `default` was evaluated once, at `def` time, in the
/// scope enclosing the `def` (§3) — never re-evaluated per call.
pub struct Parameter {
    pub name: String,
    pub default: Option<Value>,
}

pub struct Function {
    pub name: String,
    pub params: Vec<Parameter>,
    pub body: Rc<[Stmt]>,
}
