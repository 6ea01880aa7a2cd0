use std::rc::Rc;

use crate::ast::{
    Argument, BinaryOperator, CompareOperator, Expr, FStringSegment, FileInput, Param, Stmt,
    UnaryOperator,
};
use crate::bigint::BigInt;

pub use self::environment::{Environment, FunctionDef, FunctionTable};
pub use self::error::{InterpreterError, Signal};
pub use self::value::Value;

pub mod environment;
pub mod error;
pub mod value;

use self::value::{compare_values, values_equal};

/// Statement outcome: either normal completion or an in-flight control
/// signal that an enclosing loop or call site will consume.
type StmtResult = Result<Option<Signal>, InterpreterError>;

pub struct Interpreter {
    env: Environment,
    functions: FunctionTable,
    emit_output: bool,
    output: String,
}

impl Interpreter {
    pub fn new(emit_output: bool) -> Self {
        Interpreter {
            env: Environment::new(),
            functions: FunctionTable::new(),
            emit_output,
            output: String::new(),
        }
    }

    /// Everything `print` has written so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn run(&mut self, file: &FileInput) -> Result<(), InterpreterError> {
        for stmt in &file.statements {
            if let Some(signal) = self.exec_stmt(stmt)? {
                return Err(signal_escaped(&signal));
            }
        }
        Ok(())
    }

    fn exec_suite(&mut self, suite: &[Stmt]) -> StmtResult {
        for stmt in suite {
            if let Some(signal) = self.exec_stmt(stmt)? {
                return Ok(Some(signal));
            }
        }
        Ok(None)
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> StmtResult {
        match stmt {
            Stmt::ExprStmt { value } => {
                self.eval_expr(value)?;
                Ok(None)
            }
            Stmt::Assign { targets, value } => {
                self.exec_assign(targets, value)?;
                Ok(None)
            }
            Stmt::AugAssign { target, op, value } => {
                let left = self.env.get(target)?;
                let right = self.eval_expr(value)?;
                let result = self.apply_binary(&left, *op, &right)?;
                self.env.assign(target, result);
                Ok(None)
            }
            Stmt::Funcdef { name, params, body } => {
                let def = self.build_function(params, body)?;
                self.functions.define(name.clone(), def);
                Ok(None)
            }
            Stmt::IfStmt { branches, orelse } => {
                for branch in branches {
                    if self.eval_expr(&branch.test)?.is_truthy() {
                        return self.exec_suite(&branch.body);
                    }
                }
                match orelse {
                    Some(suite) => self.exec_suite(suite),
                    None => Ok(None),
                }
            }
            Stmt::WhileStmt { test, body } => {
                while self.eval_expr(test)?.is_truthy() {
                    match self.exec_suite(body)? {
                        None | Some(Signal::Continue) => {}
                        Some(Signal::Break) => break,
                        Some(signal @ Signal::Return(_)) => return Ok(Some(signal)),
                    }
                }
                Ok(None)
            }
            Stmt::ReturnStmt { value } => {
                let result = match value {
                    Some(expr) => self.eval_expr(expr)?,
                    None => Value::None,
                };
                Ok(Some(Signal::Return(result)))
            }
            Stmt::BreakStmt => Ok(Some(Signal::Break)),
            Stmt::ContinueStmt => Ok(Some(Signal::Continue)),
        }
    }

    /// `t1, t2, ... = ... = expr`. The RHS is evaluated once and
    /// flattened once; if the flattened length matches the combined
    /// target-name count the values distribute left to right, otherwise
    /// a chain of single-name targets each receives the whole value.
    fn exec_assign(&mut self, targets: &[Vec<String>], value: &Expr) -> Result<(), InterpreterError> {
        let rhs = self.eval_expr(value)?;
        let flat: Vec<Value> = match &rhs {
            Value::Tuple(items) => items.as_ref().clone(),
            other => vec![other.clone()],
        };
        let total: usize = targets.iter().map(|t| t.len()).sum();
        if total == flat.len() {
            for (name, v) in targets.iter().flatten().zip(flat) {
                self.env.assign(name, v);
            }
        } else if targets.iter().all(|t| t.len() == 1) {
            for target in targets {
                self.env.assign(&target[0], rhs.clone());
            }
        } else {
            return Err(InterpreterError::UnpackMismatch {
                expected: total,
                actual: flat.len(),
            });
        }
        Ok(())
    }

    /// Defaults are evaluated here, at definition time, and stored as
    /// values; calls never re-evaluate them.
    fn build_function(&mut self, params: &[Param], body: &[Stmt]) -> Result<FunctionDef, InterpreterError> {
        let mut names = Vec::with_capacity(params.len());
        let mut defaults = Vec::new();
        for param in params {
            names.push(param.name.clone());
            match &param.default {
                Some(expr) => defaults.push(self.eval_expr(expr)?),
                None if !defaults.is_empty() => {
                    return Err(InterpreterError::Internal {
                        message: format!(
                            "parameter '{}' without a default follows defaulted parameters",
                            param.name
                        ),
                    })
                }
                None => {}
            }
        }
        Ok(FunctionDef {
            params: names,
            defaults,
            body: Rc::new(body.to_vec()),
        })
    }

    fn eval_expr(&mut self, expr: &Expr) -> Result<Value, InterpreterError> {
        match expr {
            Expr::OrTest { operands } => {
                let (last, init) = split_operands(operands, "or")?;
                for operand in init {
                    let v = self.eval_expr(operand)?;
                    if v.is_truthy() {
                        return Ok(v);
                    }
                }
                self.eval_expr(last)
            }
            Expr::AndTest { operands } => {
                let (last, init) = split_operands(operands, "and")?;
                for operand in init {
                    let v = self.eval_expr(operand)?;
                    if !v.is_truthy() {
                        return Ok(v);
                    }
                }
                self.eval_expr(last)
            }
            Expr::NotTest { operand } => {
                let v = self.eval_expr(operand)?;
                Ok(Value::Bool(!v.is_truthy()))
            }
            Expr::Comparison { first, rest } => {
                if rest.is_empty() {
                    return self.eval_expr(first);
                }
                let mut left = self.eval_expr(first)?;
                for clause in rest {
                    let right = self.eval_expr(&clause.operand)?;
                    if !compare_pair(&left, clause.op, &right) {
                        return Ok(Value::Bool(false));
                    }
                    left = right;
                }
                Ok(Value::Bool(true))
            }
            Expr::ArithExpr { first, rest } | Expr::Term { first, rest } => {
                let mut acc = self.eval_expr(first)?;
                for clause in rest {
                    let operand = self.eval_expr(&clause.operand)?;
                    acc = self.apply_binary(&acc, clause.op, &operand)?;
                }
                Ok(acc)
            }
            Expr::Factor { op, operand } => {
                let v = self.eval_expr(operand)?;
                apply_unary(*op, &v)
            }
            Expr::Call { callee, args } => self.eval_call(callee, args),
            Expr::Name { id } => self.env.get(id),
            Expr::Int { value } => Ok(Value::Int(value.parse::<BigInt>()?)),
            Expr::Float { value } => Ok(Value::Float(*value)),
            Expr::Str { value } => Ok(Value::Str(value.clone())),
            Expr::Bool { value } => Ok(Value::Bool(*value)),
            Expr::None => Ok(Value::None),
            Expr::FormatString { segments } => {
                let mut out = String::new();
                for segment in segments {
                    match segment {
                        FStringSegment::Literal { text } => unescape_braces(text, &mut out),
                        FStringSegment::Expression { value } => {
                            let v = self.eval_expr(value)?;
                            out.push_str(&v.to_string());
                        }
                    }
                }
                Ok(Value::Str(out))
            }
            Expr::Testlist { items } => {
                if items.len() == 1 {
                    return self.eval_expr(&items[0]);
                }
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(self.eval_expr(item)?);
                }
                Ok(Value::Tuple(Rc::new(values)))
            }
        }
    }

    /// Arguments evaluate left to right regardless of keyword position.
    fn eval_call(&mut self, callee: &str, args: &[Argument]) -> Result<Value, InterpreterError> {
        let mut positional = Vec::new();
        let mut keywords: Vec<(String, Value)> = Vec::new();
        for arg in args {
            let v = self.eval_expr(&arg.value)?;
            match &arg.name {
                Some(name) => keywords.push((name.clone(), v)),
                None => positional.push(v),
            }
        }
        // User definitions shadow the built-ins.
        if let Some(def) = self.functions.get(callee) {
            let def = def.clone();
            return self.call_user_function(callee, &def, positional, keywords);
        }
        self.call_builtin(callee, positional, keywords)
    }

    fn call_user_function(
        &mut self,
        name: &str,
        def: &FunctionDef,
        positional: Vec<Value>,
        keywords: Vec<(String, Value)>,
    ) -> Result<Value, InterpreterError> {
        self.env.push_frame();
        let outcome = self.bind_and_exec(name, def, positional, keywords);
        self.env.pop_frame();
        match outcome? {
            Some(Signal::Return(v)) => Ok(v),
            Some(Signal::Break) | Some(Signal::Continue) => Err(InterpreterError::Internal {
                message: format!("loop control signal escaped function '{}'", name),
            }),
            None => Ok(Value::None),
        }
    }

    fn bind_and_exec(
        &mut self,
        name: &str,
        def: &FunctionDef,
        positional: Vec<Value>,
        keywords: Vec<(String, Value)>,
    ) -> StmtResult {
        let default_start = def.params.len() - def.defaults.len();
        for (i, param) in def.params.iter().enumerate() {
            let bound = if i < positional.len() {
                positional[i].clone()
            } else if let Some((_, v)) = keywords.iter().find(|(n, _)| n == param) {
                v.clone()
            } else if i >= default_start {
                def.defaults[i - default_start].clone()
            } else {
                return Err(InterpreterError::MissingArgument {
                    function: name.to_string(),
                    parameter: param.clone(),
                });
            };
            self.env.define(param, bound);
        }
        self.exec_suite(&def.body)
    }

    fn call_builtin(
        &mut self,
        name: &str,
        positional: Vec<Value>,
        keywords: Vec<(String, Value)>,
    ) -> Result<Value, InterpreterError> {
        match name {
            "print" => {
                if !keywords.is_empty() {
                    return Err(InterpreterError::InvalidOperation {
                        message: "print() does not accept keyword arguments".to_string(),
                    });
                }
                let line = positional
                    .iter()
                    .map(Value::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                self.write_line(&line);
                Ok(Value::None)
            }
            "int" => {
                let v = single_argument(name, positional, keywords)?;
                Ok(Value::Int(v.to_int()?))
            }
            "float" => {
                let v = single_argument(name, positional, keywords)?;
                Ok(Value::Float(v.to_float()?))
            }
            "str" => {
                let v = single_argument(name, positional, keywords)?;
                Ok(Value::Str(v.to_string()))
            }
            "bool" => {
                let v = single_argument(name, positional, keywords)?;
                Ok(Value::Bool(v.is_truthy()))
            }
            _ => Err(InterpreterError::FunctionNotFound {
                name: name.to_string(),
            }),
        }
    }

    fn write_line(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
        if self.emit_output {
            println!("{}", line);
        }
    }

    /// Binary operator dispatch over values; also the engine behind
    /// augmented assignment.
    fn apply_binary(
        &self,
        left: &Value,
        op: BinaryOperator,
        right: &Value,
    ) -> Result<Value, InterpreterError> {
        match (op, left, right) {
            (BinaryOperator::Add, Value::Str(a), Value::Str(b)) => {
                Ok(Value::Str(format!("{}{}", a, b)))
            }
            (BinaryOperator::Mul, Value::Str(s), Value::Int(n))
            | (BinaryOperator::Mul, Value::Int(n), Value::Str(s)) => Ok(Value::Str(repeat_str(s, n))),
            _ => self.numeric_binary(left, op, right),
        }
    }

    fn numeric_binary(
        &self,
        left: &Value,
        op: BinaryOperator,
        right: &Value,
    ) -> Result<Value, InterpreterError> {
        let numeric = |v: &Value| matches!(v, Value::Bool(_) | Value::Int(_) | Value::Float(_));
        if !numeric(left) || !numeric(right) {
            return Err(InterpreterError::TypeMismatch {
                expected: "numeric operands".to_string(),
                actual: format!("{} {} {}", left.type_name(), op, right.type_name()),
            });
        }
        let float_side = matches!(left, Value::Float(_)) || matches!(right, Value::Float(_));
        // True division always goes through floats.
        if op == BinaryOperator::Div || float_side {
            let a = left.to_float()?;
            let b = right.to_float()?;
            return match op {
                BinaryOperator::Add => Ok(Value::Float(a + b)),
                BinaryOperator::Sub => Ok(Value::Float(a - b)),
                BinaryOperator::Mul => Ok(Value::Float(a * b)),
                BinaryOperator::Div => {
                    if b == 0.0 {
                        Err(InterpreterError::DivisionByZero)
                    } else {
                        Ok(Value::Float(a / b))
                    }
                }
                BinaryOperator::FloorDiv => {
                    if b == 0.0 {
                        Err(InterpreterError::DivisionByZero)
                    } else {
                        Ok(Value::Int(BigInt::from_f64((a / b).floor())?))
                    }
                }
                BinaryOperator::Mod => {
                    if b == 0.0 {
                        Err(InterpreterError::DivisionByZero)
                    } else {
                        Ok(Value::Float(a % b))
                    }
                }
            };
        }
        let a = left.to_int()?;
        let b = right.to_int()?;
        match op {
            BinaryOperator::Add => Ok(Value::Int(&a + &b)),
            BinaryOperator::Sub => Ok(Value::Int(&a - &b)),
            BinaryOperator::Mul => Ok(Value::Int(&a * &b)),
            BinaryOperator::FloorDiv => Ok(Value::Int(a.floor_div(&b)?)),
            BinaryOperator::Mod => Ok(Value::Int(a.floor_rem(&b)?)),
            // True division was routed to the float path above.
            BinaryOperator::Div => Err(InterpreterError::Internal {
                message: "integer path reached for true division".to_string(),
            }),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(true)
    }
}

fn compare_pair(left: &Value, op: CompareOperator, right: &Value) -> bool {
    use std::cmp::Ordering;
    match op {
        CompareOperator::Eq => values_equal(left, right),
        CompareOperator::Ne => !values_equal(left, right),
        CompareOperator::Lt => compare_values(left, right) == Some(Ordering::Less),
        CompareOperator::Gt => compare_values(left, right) == Some(Ordering::Greater),
        CompareOperator::Le => matches!(
            compare_values(left, right),
            Some(Ordering::Less) | Some(Ordering::Equal)
        ),
        CompareOperator::Ge => matches!(
            compare_values(left, right),
            Some(Ordering::Greater) | Some(Ordering::Equal)
        ),
    }
}

fn apply_unary(op: UnaryOperator, v: &Value) -> Result<Value, InterpreterError> {
    match (op, v) {
        (UnaryOperator::Neg, Value::Int(i)) => Ok(Value::Int(-i)),
        (UnaryOperator::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
        (UnaryOperator::Neg, Value::Bool(b)) => Ok(Value::Int(BigInt::from(-(*b as i64)))),
        (UnaryOperator::Pos, Value::Int(_) | Value::Float(_) | Value::Bool(_)) => Ok(v.clone()),
        _ => Err(InterpreterError::TypeMismatch {
            expected: "numeric operand".to_string(),
            actual: v.type_name().to_string(),
        }),
    }
}

fn repeat_str(s: &str, count: &BigInt) -> String {
    let n = count.to_i64();
    if n <= 0 {
        String::new()
    } else {
        s.repeat(n as usize)
    }
}

fn unescape_braces(text: &str, out: &mut String) {
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if (c == '{' && chars.peek() == Some(&'{')) || (c == '}' && chars.peek() == Some(&'}')) {
            chars.next();
        }
        out.push(c);
    }
}

fn single_argument(
    name: &str,
    mut positional: Vec<Value>,
    keywords: Vec<(String, Value)>,
) -> Result<Value, InterpreterError> {
    if !keywords.is_empty() || positional.len() != 1 {
        return Err(InterpreterError::InvalidOperation {
            message: format!("{}() takes exactly 1 argument", name),
        });
    }
    Ok(positional.remove(0))
}

fn split_operands<'a>(
    operands: &'a [Expr],
    what: &str,
) -> Result<(&'a Expr, &'a [Expr]), InterpreterError> {
    operands
        .split_last()
        .ok_or_else(|| InterpreterError::Internal {
            message: format!("empty '{}' operand list", what),
        })
}

fn signal_escaped(signal: &Signal) -> InterpreterError {
    let message = match signal {
        Signal::Break => "'break' outside loop",
        Signal::Continue => "'continue' not properly in loop",
        Signal::Return(_) => "'return' outside function",
    };
    InterpreterError::Internal {
        message: message.to_string(),
    }
}
