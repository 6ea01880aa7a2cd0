use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::Suite;

use super::error::InterpreterError;
use super::value::Value;

/// A user-defined function: parameter names in declaration order, default
/// values aligned to the tail of the parameter list (evaluated once, at
/// definition time), and the body subtree.
#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub params: Vec<String>,
    pub defaults: Vec<Value>,
    pub body: Rc<Suite>,
}

type Frame = HashMap<String, Value>;

/// Stack of name->value frames. The bottom frame is module scope; each
/// function call pushes a fresh frame on top. A function body sees its
/// own frame and the module frame only; there are no closures over
/// intermediate scopes.
pub struct Environment {
    frames: Vec<Frame>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            frames: vec![Frame::new()],
        }
    }

    pub fn push_frame(&mut self) {
        self.frames.push(Frame::new());
    }

    pub fn pop_frame(&mut self) {
        debug_assert!(self.frames.len() > 1);
        self.frames.pop();
    }

    pub fn get(&self, name: &str) -> Result<Value, InterpreterError> {
        let top = self.frames.len() - 1;
        if let Some(v) = self.frames[top].get(name) {
            return Ok(v.clone());
        }
        if top > 0 {
            if let Some(v) = self.frames[0].get(name) {
                return Ok(v.clone());
            }
        }
        Err(InterpreterError::VariableNotFound {
            name: name.to_string(),
        })
    }

    /// Binds a name in the current frame unconditionally. Used for
    /// parameter binding, where the name must not leak to outer scopes.
    pub fn define(&mut self, name: &str, value: Value) {
        let top = self.frames.len() - 1;
        self.frames[top].insert(name.to_string(), value);
    }

    /// Rebinds the nearest visible binding, else creates the name in the
    /// current frame.
    pub fn assign(&mut self, name: &str, value: Value) {
        let top = self.frames.len() - 1;
        if self.frames[top].contains_key(name) {
            self.frames[top].insert(name.to_string(), value);
            return;
        }
        if top > 0 && self.frames[0].contains_key(name) {
            self.frames[0].insert(name.to_string(), value);
            return;
        }
        self.frames[top].insert(name.to_string(), value);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide registry of user-defined functions. `def` inserts (and
/// redefinition replaces); entries are never removed.
#[derive(Default)]
pub struct FunctionTable {
    functions: HashMap<String, FunctionDef>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: String, def: FunctionDef) {
        self.functions.insert(name, def);
    }

    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigint::BigInt;

    fn int(n: i64) -> Value {
        Value::Int(BigInt::from(n))
    }

    #[test]
    fn test_assignment_creates_in_current_frame() {
        let mut env = Environment::new();
        env.push_frame();
        env.assign("x", int(1));
        env.pop_frame();
        assert!(env.get("x").is_err());
    }

    #[test]
    fn test_assignment_rebinds_module_binding() {
        let mut env = Environment::new();
        env.assign("x", int(1));
        env.push_frame();
        env.assign("x", int(2));
        env.pop_frame();
        assert_eq!(env.get("x").unwrap(), int(2));
    }

    #[test]
    fn test_local_shadows_module() {
        let mut env = Environment::new();
        env.assign("x", int(1));
        env.push_frame();
        // A fresh local (e.g. a parameter) hides the module binding.
        env.define("x", int(9));
        assert_eq!(env.get("x").unwrap(), int(9));
        env.assign("x", int(10));
        env.pop_frame();
        assert_eq!(env.get("x").unwrap(), int(1));
    }

    #[test]
    fn test_intermediate_frames_invisible() {
        let mut env = Environment::new();
        env.push_frame();
        env.assign("caller_local", int(5));
        env.push_frame();
        assert!(env.get("caller_local").is_err());
        env.pop_frame();
        env.pop_frame();
    }
}
