//! # Resolver
//!
//! A static pass over the AST that computes, for every `Variable` and
//! `Assignment` node, the lexical distance from the scope it's used in to
//! the scope that declared it. The interpreter uses this side-table to walk
//! the environment chain directly instead of doing a dynamic name search on
//! every access.

mod error;

pub use error::*;

use crate::ast::{Expr, FunctionDecl, NodeId, Stmt};
use log::debug;
use std::collections::HashMap;

/// `node id -> lexical distance`. Absence means "resolved dynamically
/// against the global environment at runtime".
pub type Locals = HashMap<NodeId, usize>;

#[derive(Clone, Copy, PartialEq)]
enum FunctionKind {
    None,
    Function,
}

/// Resolves `program`, returning the depth side-table alongside every static
/// error encountered. Unlike the parser, the resolver does not attempt
/// recovery beyond continuing to walk siblings. It reports every error it
/// finds, but a single one is enough to fail the pipeline.
pub fn resolve(program: &[Stmt]) -> (Locals, Vec<ResolveError>) {
    let mut resolver = Resolver {
        scopes: Vec::new(),
        locals: HashMap::new(),
        errors: Vec::new(),
        current_function: FunctionKind::None,
    };
    resolver.resolve_stmts(program);
    debug!(
        "resolved {} local binding(s), {} error(s)",
        resolver.locals.len(),
        resolver.errors.len()
    );
    (resolver.locals, resolver.errors)
}

struct Resolver {
    scopes: Vec<HashMap<String, bool>>,
    locals: Locals,
    errors: Vec<ResolveError>,
    current_function: FunctionKind,
}

impl Resolver {
    fn resolve_stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.resolve_stmt(stmt);
        }
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(expr) | Stmt::Print(expr) => self.resolve_expr(expr),
            Stmt::VarDecl { name, initializer } => {
                self.declare(&name.lexeme, name.line);
                if let Some(init) = initializer {
                    self.resolve_expr(init);
                }
                self.define(&name.lexeme);
            }
            Stmt::Block(stmts) => {
                self.begin_scope();
                self.resolve_stmts(stmts);
                self.end_scope();
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(condition);
                self.resolve_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.resolve_stmt(else_branch);
                }
            }
            Stmt::While { condition, body } => {
                self.resolve_expr(condition);
                self.resolve_stmt(body);
            }
            Stmt::For {
                initializer,
                condition,
                increment,
                body,
            } => {
                self.begin_scope();
                if let Some(initializer) = initializer {
                    self.resolve_stmt(initializer);
                }
                if let Some(condition) = condition {
                    self.resolve_expr(condition);
                }
                if let Some(increment) = increment {
                    self.resolve_expr(increment);
                }
                self.resolve_stmt(body);
                self.end_scope();
            }
            Stmt::Function(decl) => {
                self.declare(&decl.name.lexeme, decl.name.line);
                self.define(&decl.name.lexeme);
                self.resolve_function(decl);
            }
            Stmt::Return { keyword, value } => {
                if self.current_function == FunctionKind::None {
                    self.errors.push(ResolveError {
                        line: keyword.line,
                        at: keyword.lexeme.clone(),
                        message: "Can't return from top-level code.".to_owned(),
                    });
                }
                if let Some(value) = value {
                    self.resolve_expr(value);
                }
            }
        }
    }

    fn resolve_function(&mut self, decl: &FunctionDecl) {
        let enclosing = self.current_function;
        self.current_function = FunctionKind::Function;
        self.begin_scope();
        for param in &decl.params {
            self.declare(&param.lexeme, param.line);
            self.define(&param.lexeme);
        }
        self.resolve_stmts(&decl.body);
        self.end_scope();
        self.current_function = enclosing;
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal { .. } => {}
            Expr::Unary { expr, .. } | Expr::Grouping { expr, .. } => self.resolve_expr(expr),
            Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }
            Expr::Variable { name, .. } => {
                if let Some(scope) = self.scopes.last() {
                    if scope.get(&name.lexeme) == Some(&false) {
                        self.errors.push(ResolveError {
                            line: name.line,
                            at: name.lexeme.clone(),
                            message: format!(
                                "Can't read local variable '{}' in its own initializer.",
                                name.lexeme
                            ),
                        });
                    }
                }
                self.resolve_local(expr.id(), &name.lexeme);
            }
            Expr::Assignment { name, value, .. } => {
                self.resolve_expr(value);
                self.resolve_local(expr.id(), &name.lexeme);
            }
            Expr::Call { callee, args, .. } => {
                self.resolve_expr(callee);
                for arg in args {
                    self.resolve_expr(arg);
                }
            }
        }
    }

    fn resolve_local(&mut self, id: NodeId, name: &str) {
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(name) {
                self.locals.insert(id, depth);
                return;
            }
        }
        // not found in any scope: left unresolved, the interpreter falls back to globals.
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &str, line: usize) {
        let Some(scope) = self.scopes.last_mut() else {
            return;
        };
        if scope.contains_key(name) {
            self.errors.push(ResolveError {
                line,
                at: name.to_owned(),
                message: format!("Already a variable named '{name}' in this scope."),
            });
        }
        scope.insert(name.to_owned(), false);
    }

    fn define(&mut self, name: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_owned(), true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use crate::parser::parse_program;

    fn resolve_src(src: &str) -> (Vec<Stmt>, Locals, Vec<ResolveError>) {
        let (tokens, _) = lex(src);
        let (stmts, parse_errors) = parse_program(&tokens);
        assert!(parse_errors.is_empty(), "unexpected parse errors: {parse_errors:?}");
        let (locals, errors) = resolve(&stmts);
        (stmts, locals, errors)
    }

    #[test]
    fn global_variables_are_left_unresolved() {
        let (_, locals, errors) = resolve_src("var a = 1; print a;");
        assert!(errors.is_empty());
        assert!(locals.is_empty());
    }

    #[test]
    fn block_local_is_resolved_at_depth_zero() {
        let (_, locals, errors) = resolve_src("{ var a = 1; print a; }");
        assert!(errors.is_empty());
        assert_eq!(locals.len(), 1);
        assert_eq!(*locals.values().next().unwrap(), 0);
    }

    #[test]
    fn nested_block_resolves_to_enclosing_depth() {
        let (_, locals, errors) = resolve_src("{ var a = 1; { print a; } }");
        assert!(errors.is_empty());
        assert_eq!(*locals.values().next().unwrap(), 1);
    }

    #[test]
    fn self_reference_in_initializer_is_an_error() {
        let (_, _, errors) = resolve_src("{ var a = a; }");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("own initializer"));
    }

    #[test]
    fn return_outside_function_is_an_error() {
        let (_, _, errors) = resolve_src("return 1;");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("top-level"));
    }

    #[test]
    fn return_inside_function_is_fine() {
        let (_, _, errors) = resolve_src("fun f() { return 1; }");
        assert!(errors.is_empty());
    }

    #[test]
    fn double_declaration_in_local_scope_is_an_error() {
        let (_, _, errors) = resolve_src("{ var a = 1; var a = 2; }");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Already a variable"));
    }

    #[test]
    fn double_declaration_at_global_scope_is_allowed() {
        let (_, _, errors) = resolve_src("var a = 1; var a = 2;");
        assert!(errors.is_empty());
    }

    #[test]
    fn redeclaring_a_parameter_name_in_the_body_is_a_double_declaration() {
        let (_, _, errors) = resolve_src("fun f(a) { var a = a; }");
        // the function body shares its scope with the parameter list, so this
        // collides with `a` the parameter rather than reading it.
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("Already a variable"));
    }

    #[test]
    fn parameters_are_visible_and_resolved_inside_the_body() {
        let (_, locals, errors) = resolve_src("fun f(a) { print a; }");
        assert!(errors.is_empty());
        assert_eq!(locals.len(), 1);
        assert_eq!(*locals.values().next().unwrap(), 0);
    }
}
