use thiserror::Error;

use crate::bigint::BigIntError;

use super::value::Value;

#[derive(Error, Debug)]
pub enum InterpreterError {
    #[error("name '{name}' is not defined")]
    VariableNotFound { name: String },
    #[error("function '{name}' is not defined")]
    FunctionNotFound { name: String },
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },
    #[error("{function}() missing required argument: '{parameter}'")]
    MissingArgument { function: String, parameter: String },
    #[error("cannot unpack {actual} values into {expected} targets")]
    UnpackMismatch { expected: usize, actual: usize },
    #[error("invalid literal: '{text}'")]
    InvalidLiteral { text: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("invalid operation: {message}")]
    InvalidOperation { message: String },
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl From<BigIntError> for InterpreterError {
    fn from(err: BigIntError) -> Self {
        match err {
            BigIntError::DivisionByZero => InterpreterError::DivisionByZero,
            BigIntError::InvalidLiteral(text) => InterpreterError::InvalidLiteral { text },
        }
    }
}

/// Non-local exit raised by `break`, `continue` and `return`.
///
/// Signals travel back up the evaluator alongside `Result`, on a channel
/// of their own: loop headers consume `Break`/`Continue`, call sites
/// consume `Return`, and everything in between passes them through
/// untouched. They are not errors and never hit the error path.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Break,
    Continue,
    Return(Value),
}
