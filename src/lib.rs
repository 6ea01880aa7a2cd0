pub mod ast;
pub mod bigint;
pub mod cli;
pub mod diagnostics;
pub mod interpreter;

pub use ast::FileInput;
pub use bigint::BigInt;
pub use interpreter::{Interpreter, InterpreterError, Value};
