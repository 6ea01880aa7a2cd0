//! Human-facing reporting for runtime errors.

use crate::interpreter::InterpreterError;

pub mod color;

/// Optional follow-up advice for the error kinds where one sentence of
/// context actually helps.
fn hint(err: &InterpreterError) -> Option<&'static str> {
    match err {
        InterpreterError::VariableNotFound { .. } => {
            Some("names must be assigned before they are read")
        }
        InterpreterError::FunctionNotFound { .. } => {
            Some("functions must be defined (or be a built-in) before the call runs")
        }
        InterpreterError::DivisionByZero => Some("guard the divisor before dividing"),
        InterpreterError::InvalidLiteral { .. } => {
            Some("int() accepts an optionally signed run of decimal digits")
        }
        InterpreterError::UnpackMismatch { .. } => {
            Some("the number of assignment targets must match the unpacked value count")
        }
        _ => None,
    }
}

/// Prints one report to stderr. The caller decides the exit code.
pub fn report_runtime_error(err: &InterpreterError) {
    eprintln!("{} {}", color::error_tag(), err);
    if let Some(h) = hint(err) {
        eprintln!("  {} {}", color::help_tag(), h);
    }
}
