//! # Interpreter
//!
//! A tree-walking evaluator over the resolved AST. Expressions are folded to
//! [`Value`]s directly by recursive descent; statements are executed for
//! effect via [`execute`](Interpreter::execute), which can unwind early
//! either on a runtime error or on a `return` (the latter via [`Signal`],
//! never through the error channel).

mod environment;
mod error;
mod native;
mod value;

pub use environment::*;
pub use error::*;
pub use value::*;

use crate::ast::{Expr, FunctionDecl, Operator, Stmt};
use crate::lexer::TokenKind;
use crate::resolver::Locals;
use log::{debug, info};
use std::rc::Rc;

/// A user-defined function. Shares its declaration with the `Stmt::Function`
/// node that introduced it (see [`FunctionDecl`]) and closes over the
/// environment active at definition time, so nested functions see later
/// writes to variables their enclosing scope captured.
#[derive(Debug)]
pub struct LoxFunction {
    declaration: Rc<FunctionDecl>,
    closure: Rc<Environment>,
}

impl Callable for LoxFunction {
    fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    fn call(&self, interpreter: &mut Interpreter, args: Vec<Value>) -> Result<Value, RuntimeError> {
        let call_env = Environment::new_enclosed(&self.closure);
        for (param, arg) in self.declaration.params.iter().zip(args) {
            call_env.define(param.lexeme.clone(), arg);
        }
        match interpreter.execute_block(&self.declaration.body, call_env)? {
            Signal::Return(value) => Ok(value),
            Signal::Normal => Ok(Value::Nil),
        }
    }

    fn name(&self) -> &str {
        &self.declaration.name.lexeme
    }
}

/// What happened while executing a statement: either nothing unusual, or a
/// `return` that should unwind to the nearest enclosing function call. Kept
/// entirely separate from [`RuntimeError`]: a `return` is not a failure.
enum Signal {
    Normal,
    Return(Value),
}

pub struct Interpreter {
    globals: Rc<Environment>,
    env: Rc<Environment>,
    locals: Locals,
}

impl Interpreter {
    pub fn new(locals: Locals) -> Self {
        let globals = Environment::new_global();
        native::install(&globals);
        Self {
            env: Rc::clone(&globals),
            globals,
            locals,
        }
    }

    /// Runs a full program: every top-level statement in order.
    pub fn interpret(&mut self, program: &[Stmt]) -> Result<(), RuntimeError> {
        info!("interpreting {} top-level statement(s)", program.len());
        for stmt in program {
            self.execute(stmt)?;
        }
        Ok(())
    }

    /// Evaluates a single expression, for the `evaluate` CLI mode.
    pub fn interpret_expression(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        self.evaluate(expr)
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<Signal, RuntimeError> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(Signal::Normal)
            }
            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                println!("{value}");
                Ok(Signal::Normal)
            }
            Stmt::VarDecl { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                self.env.define(name.lexeme.clone(), value);
                Ok(Signal::Normal)
            }
            Stmt::Block(stmts) => {
                let block_env = Environment::new_enclosed(&self.env);
                self.execute_block(stmts, block_env)
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Signal::Normal)
                }
            }
            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    match self.execute(body)? {
                        Signal::Normal => {}
                        signal @ Signal::Return(_) => return Ok(signal),
                    }
                }
                Ok(Signal::Normal)
            }
            Stmt::For {
                initializer,
                condition,
                increment,
                body,
            } => self.execute_for(initializer, condition, increment, body),
            Stmt::Function(decl) => {
                let function = LoxFunction {
                    declaration: Rc::clone(decl),
                    closure: Rc::clone(&self.env),
                };
                self.env.define(decl.name.lexeme.clone(), Value::Callable(Rc::new(function)));
                Ok(Signal::Normal)
            }
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                Ok(Signal::Return(value))
            }
        }
    }

    /// Runs `stmts` inside `new_env`, restoring the previous environment on
    /// every exit path (normal completion, a `return` signal, or an error).
    fn execute_block(&mut self, stmts: &[Stmt], new_env: Rc<Environment>) -> Result<Signal, RuntimeError> {
        let previous = std::mem::replace(&mut self.env, new_env);
        let mut result = Signal::Normal;
        for stmt in stmts {
            match self.execute(stmt) {
                Ok(Signal::Normal) => {}
                Ok(signal @ Signal::Return(_)) => {
                    result = signal;
                    break;
                }
                Err(err) => {
                    self.env = previous;
                    return Err(err);
                }
            }
        }
        self.env = previous;
        Ok(result)
    }

    fn execute_for(
        &mut self,
        initializer: &Option<Box<Stmt>>,
        condition: &Option<Expr>,
        increment: &Option<Expr>,
        body: &Stmt,
    ) -> Result<Signal, RuntimeError> {
        let loop_env = Environment::new_enclosed(&self.env);
        let previous = std::mem::replace(&mut self.env, loop_env);

        let result = (|| -> Result<Signal, RuntimeError> {
            if let Some(initializer) = initializer {
                self.execute(initializer)?;
            }
            loop {
                let keep_going = match condition {
                    Some(cond) => self.evaluate(cond)?.is_truthy(),
                    None => true,
                };
                if !keep_going {
                    break;
                }
                match self.execute(body)? {
                    Signal::Normal => {}
                    signal @ Signal::Return(_) => return Ok(signal),
                }
                if let Some(increment) = increment {
                    self.evaluate(increment)?;
                }
            }
            Ok(Signal::Normal)
        })();

        self.env = previous;
        result
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal { token, .. } => Ok(Value::from_literal(token)),
            Expr::Grouping { expr, .. } => self.evaluate(expr),
            Expr::Unary { op, expr, .. } => self.evaluate_unary(op, expr),
            Expr::Binary { op, left, right, .. } => self.evaluate_binary(op, left, right),
            Expr::Logical { op, left, right, .. } => self.evaluate_logical(op, left, right),
            Expr::Variable { name, .. } => self.lookup(expr.id(), &name.lexeme, name.line),
            Expr::Assignment { name, value, .. } => {
                let value = self.evaluate(value)?;
                self.assign(expr.id(), &name.lexeme, name.line, value)
            }
            Expr::Call { callee, paren, args, .. } => self.evaluate_call(callee, paren, args),
        }
    }

    fn lookup(&self, id: crate::ast::NodeId, name: &str, line: usize) -> Result<Value, RuntimeError> {
        let found = match self.locals.get(&id) {
            Some(&depth) => self.env.get_at(depth, name),
            None => self.globals.get_global(name),
        };
        found.ok_or_else(|| RuntimeError::new(line, format!("Undefined variable '{name}'.")))
    }

    fn assign(&self, id: crate::ast::NodeId, name: &str, line: usize, value: Value) -> Result<Value, RuntimeError> {
        let assigned = match self.locals.get(&id) {
            Some(&depth) => self.env.assign_at(depth, name, value.clone()),
            None => self.globals.assign_global(name, value.clone()),
        };
        if assigned {
            Ok(value)
        } else {
            Err(RuntimeError::new(line, format!("Undefined variable '{name}'.")))
        }
    }

    fn evaluate_unary(&mut self, op: &Operator, expr: &Expr) -> Result<Value, RuntimeError> {
        let value = self.evaluate(expr)?;
        match op.token.kind {
            TokenKind::Minus => match value {
                Value::Number(n) => Ok(Value::Number(-n)),
                _ => Err(RuntimeError::new(op.token.line, "Operand must be a number.")),
            },
            TokenKind::Bang => Ok(Value::Bool(!value.is_truthy())),
            _ => unreachable!("not a unary operator: {:?}", op.token.kind),
        }
    }

    fn evaluate_logical(&mut self, op: &Operator, left: &Expr, right: &Expr) -> Result<Value, RuntimeError> {
        let left_value = self.evaluate(left)?;
        match op.token.kind {
            TokenKind::Or if left_value.is_truthy() => Ok(left_value),
            TokenKind::Or => self.evaluate(right),
            TokenKind::And if !left_value.is_truthy() => Ok(left_value),
            TokenKind::And => self.evaluate(right),
            _ => unreachable!("not a logical operator: {:?}", op.token.kind),
        }
    }

    fn evaluate_binary(&mut self, op: &Operator, left: &Expr, right: &Expr) -> Result<Value, RuntimeError> {
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;
        let line = op.token.line;

        use TokenKind::*;
        match op.token.kind {
            Plus => match (&left, &right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}"))),
                _ => Err(RuntimeError::new(line, "Operands must be two numbers or two strings.")),
            },
            Minus => numeric(left, right, line, |a, b| Value::Number(a - b)),
            Star => numeric(left, right, line, |a, b| Value::Number(a * b)),
            Slash => numeric(left, right, line, |a, b| Value::Number(a / b)),
            Greater => numeric(left, right, line, |a, b| Value::Bool(a > b)),
            GreaterEqual => numeric(left, right, line, |a, b| Value::Bool(a >= b)),
            Less => numeric(left, right, line, |a, b| Value::Bool(a < b)),
            LessEqual => numeric(left, right, line, |a, b| Value::Bool(a <= b)),
            EqualEqual => Ok(Value::Bool(left.equals(&right))),
            BangEqual => Ok(Value::Bool(!left.equals(&right))),
            other => unreachable!("not a binary operator: {other:?}"),
        }
    }

    fn evaluate_call(&mut self, callee: &Expr, paren: &crate::lexer::Token, args: &[Expr]) -> Result<Value, RuntimeError> {
        let callee_value = self.evaluate(callee)?;
        let mut arg_values = Vec::with_capacity(args.len());
        for arg in args {
            arg_values.push(self.evaluate(arg)?);
        }

        let Value::Callable(callable) = callee_value else {
            return Err(RuntimeError::new(paren.line, "Can only call functions and classes."));
        };

        if arg_values.len() != callable.arity() {
            return Err(RuntimeError::new(
                paren.line,
                format!("Expected {} arguments but got {}.", callable.arity(), arg_values.len()),
            ));
        }

        debug!("calling {}", callable.name());
        callable.call(self, arg_values)
    }
}

fn numeric(
    left: Value,
    right: Value,
    line: usize,
    combine: impl FnOnce(f64, f64) -> Value,
) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(combine(a, b)),
        _ => Err(RuntimeError::new(line, "Operands must be numbers.")),
    }
}
