//! The two-frame scope stack (§4.4).
//!
//! Deliberately not a lexical scope chain: a function body sees the global
//! frame and its own call frame only, never an enclosing call's locals. A
//! recursive call simply pushes another frame on top, so the callee still
//! only ever sees "its own frame" and "global" — the stack depth tracks
//! recursion depth, but visibility never does.

use std::collections::HashMap;

use crate::value::Value;

pub struct Environment {
    frames: Vec<HashMap<String, Value>>,
}

impl Environment {
    pub fn new() -> Self {
        Self { frames: vec![HashMap::new()] }
    }

    /// Probes the current call frame (if any), then the global frame.
    pub fn get(&self, name: &str) -> Option<&Value> {
        if self.frames.len() > 1
            && let Some(value) = self.frames.last().expect("checked len").get(name)
        {
            return Some(value);
        }
        self.frames[0].get(name)
    }

    /// Rebinds `name` in whichever frame already holds it, the current call
    /// frame otherwise. At top level the only frame is global, so every
    /// binding lands there.
    pub fn set(&mut self, name: &str, value: Value) {
        let top = self.frames.len() - 1;
        if top == 0 {
            self.frames[0].insert(name.to_owned(), value);
            return;
        }
        if self.frames[top].contains_key(name) {
            self.frames[top].insert(name.to_owned(), value);
        } else if self.frames[0].contains_key(name) {
            self.frames[0].insert(name.to_owned(), value);
        } else {
            self.frames[top].insert(name.to_owned(), value);
        }
    }

    /// Pushes a new call frame seeded with parameter bindings, replacing
    /// visibility of any caller's frame with this one.
    pub fn push_call_frame(&mut self, bindings: HashMap<String, Value>) {
        self.frames.push(bindings);
    }

    /// Pops the current call frame. Must be paired with a prior
    /// [`Self::push_call_frame`]; called on every exit path, including early
    /// `return` and propagating runtime errors (§5).
    pub fn pop_call_frame(&mut self) {
        self.frames.pop();
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_bindings_are_global() {
        let mut env = Environment::new();
        env.set("x", Value::Bool(true));
        assert!(matches!(env.get("x"), Some(Value::Bool(true))));
    }

    #[test]
    fn call_frame_shadows_global_but_sees_it() {
        let mut env = Environment::new();
        env.set("g", Value::Bool(true));
        env.push_call_frame(HashMap::from([("local".to_owned(), Value::Bool(false))]));
        assert!(matches!(env.get("g"), Some(Value::Bool(true))));
        assert!(matches!(env.get("local"), Some(Value::Bool(false))));
        env.set("g", Value::Bool(false));
        env.pop_call_frame();
        assert!(matches!(env.get("g"), Some(Value::Bool(false))));
        assert!(env.get("local").is_none());
    }

    #[test]
    fn assignment_inside_call_creates_local_not_global() {
        let mut env = Environment::new();
        env.push_call_frame(HashMap::new());
        env.set("fresh", Value::Bool(true));
        env.pop_call_frame();
        assert!(env.get("fresh").is_none());
    }
}
