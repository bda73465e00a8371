// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! Tree-walking evaluator.
//!
//! Statements produce shapes, expressions produce [`Value`]s, and the two
//! worlds only meet at call arguments. Builtin geometry operators are
//! dispatched through a static handler table; user modules and functions are
//! looked up in the environment, with builtins taking precedence on name
//! collisions.

pub mod args;
pub mod env;
pub mod shape;
pub mod value;

mod csg;
mod extrude;
mod handlers;
mod meshing;
mod primitives;
mod text;
mod transforms;

pub use shape::ShapeRep;
pub use value::Value;

use crate::error::{Error, Result};
use crate::lang::ast::{BinaryOp, Call, CallStmt, Expr, Param, Program, Stmt, UnaryOp};
use crate::lang::token::Pos;
use env::{Env, FuncDef, ModuleDef};

const MAX_CALL_DEPTH: usize = 128;

/// Evaluate a parsed program to a single shape: the union of every shape
/// produced at the top level.
pub fn evaluate(program: &Program) -> Result<ShapeRep> {
    let mut ev = Evaluator::new();
    let shapes = ev.eval_stmts(&program.stmts)?;
    csg::union_all(shapes, Pos::default())
}

pub struct Evaluator {
    env: Env,
    depth: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Evaluator { env: Env::new(), depth: 0 }
    }

    pub fn eval_stmts(&mut self, stmts: &[Stmt]) -> Result<Vec<ShapeRep>> {
        let mut out = Vec::new();
        for stmt in stmts {
            self.eval_stmt(stmt, &mut out)?;
        }
        Ok(out)
    }

    fn eval_stmt(&mut self, stmt: &Stmt, out: &mut Vec<ShapeRep>) -> Result<()> {
        match stmt {
            Stmt::Assign { name, expr, .. } => {
                let value = self.eval_expr(expr)?;
                self.env.set(name.clone(), value);
                Ok(())
            }
            Stmt::Block { stmts, .. } => {
                let shapes = self.with_scope(|ev| ev.eval_stmts(stmts))?;
                out.extend(shapes);
                Ok(())
            }
            Stmt::If { cond, then_branch, else_branch, pos } => {
                let c = self.eval_expr(cond)?;
                let Some(c) = c.as_bool() else {
                    return Err(Error::eval(
                        *pos,
                        format!("if condition must be a bool, got {}", c.type_name()),
                    ));
                };
                if c {
                    self.eval_stmt(then_branch, out)
                } else if let Some(else_branch) = else_branch {
                    self.eval_stmt(else_branch, out)
                } else {
                    Ok(())
                }
            }
            Stmt::ModuleDef { name, params, body, .. } => {
                self.env.define_module(
                    name.clone(),
                    ModuleDef { params: params.clone(), body: body.clone() },
                );
                Ok(())
            }
            Stmt::FuncDef { name, params, body, .. } => {
                self.env.define_function(
                    name.clone(),
                    FuncDef { params: params.clone(), body: body.clone() },
                );
                Ok(())
            }
            Stmt::Call(cs) => self.eval_call_stmt(cs, out),
        }
    }

    fn eval_call_stmt(&mut self, cs: &CallStmt, out: &mut Vec<ShapeRep>) -> Result<()> {
        let name = cs.call.name.as_str();

        if let Some(h) = handlers::lookup(name) {
            // syntactic check: a child block is rejected even when it would
            // produce no shapes
            if !h.allow_children && !cs.children.is_empty() {
                return Err(Error::eval(cs.pos, format!("{name}: does not accept children")));
            }
            // child statements get their own variable scope
            let children = self.with_scope(|ev| ev.eval_stmts(&cs.children))?;
            if h.require_children && children.is_empty() {
                return Err(Error::eval(
                    cs.pos,
                    format!("{name}: requires at least one child shape"),
                ));
            }
            let children = if h.union_children {
                vec![csg::union_all(children, cs.pos)?]
            } else {
                children
            };
            out.push((h.func)(self, &cs.call, children)?);
            return Ok(());
        }

        if let Some(def) = self.env.module(name).cloned() {
            if !cs.children.is_empty() {
                return Err(Error::eval(
                    cs.pos,
                    format!("module {name:?} does not accept children"),
                ));
            }
            let args = self.eval_args(&cs.call)?;
            let shapes = self.with_depth(cs.pos, |ev| {
                ev.with_scope(|ev| {
                    ev.bind_params(name, &def.params, args, cs.pos)?;
                    ev.eval_stmts(&def.body)
                })
            })?;
            out.extend(shapes);
            return Ok(());
        }

        Err(Error::eval(cs.pos, format!("unknown module {name:?}")))
    }

    pub(crate) fn eval_expr(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Number { value, .. } => Ok(Value::Number(*value)),
            Expr::Bool { value, .. } => Ok(Value::Bool(*value)),
            Expr::Str { value, .. } => Ok(Value::Str(value.clone())),
            Expr::Var { name, pos } => self
                .env
                .get(name)
                .cloned()
                .ok_or_else(|| Error::eval(*pos, format!("undefined variable {name:?}"))),
            Expr::Array { elems, .. } => {
                let mut items = Vec::with_capacity(elems.len());
                for e in elems {
                    items.push(self.eval_expr(e)?);
                }
                Ok(Value::List(items))
            }
            Expr::Unary { op, expr, pos } => {
                let v = self.eval_expr(expr)?;
                eval_unary(*op, v, *pos)
            }
            Expr::Binary { op, lhs, rhs, pos } => {
                // both sides always evaluate; && and || do not short-circuit
                let l = self.eval_expr(lhs)?;
                let r = self.eval_expr(rhs)?;
                eval_binary(*op, l, r, *pos)
            }
            Expr::Ternary { cond, then_expr, else_expr, pos } => {
                let c = self.eval_expr(cond)?;
                let Some(c) = c.as_bool() else {
                    return Err(Error::eval(
                        *pos,
                        format!("ternary condition must be a bool, got {}", c.type_name()),
                    ));
                };
                if c {
                    self.eval_expr(then_expr)
                } else {
                    self.eval_expr(else_expr)
                }
            }
            Expr::Call(call) => self.eval_call_value(call),
        }
    }

    fn eval_call_value(&mut self, call: &Call) -> Result<Value> {
        if let Some(f) = math_builtin(&call.name) {
            if call.args.len() != 1 || call.args[0].name.is_some() {
                return Err(Error::eval(
                    call.pos,
                    format!("{}: expects exactly one positional argument", call.name),
                ));
            }
            let v = self.eval_expr(&call.args[0].expr)?;
            let Some(n) = v.as_number() else {
                return Err(Error::eval(
                    call.pos,
                    format!("{}: argument must be a number, got {}", call.name, v.type_name()),
                ));
            };
            return Ok(Value::Number(f(n)));
        }

        let Some(def) = self.env.function(&call.name).cloned() else {
            return Err(Error::eval(call.pos, format!("unknown function {:?}", call.name)));
        };
        let args = self.eval_args(call)?;
        self.with_depth(call.pos, |ev| {
            ev.with_scope(|ev| {
                ev.bind_params(&call.name, &def.params, args, call.pos)?;
                ev.eval_expr(&def.body)
            })
        })
    }

    /// Evaluate a call's arguments in the caller's scope.
    pub(crate) fn eval_args(&mut self, call: &Call) -> Result<Vec<(Option<String>, Value)>> {
        let mut out = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            let v = self.eval_expr(&arg.expr)?;
            out.push((arg.name.clone(), v));
        }
        Ok(out)
    }

    /// Evaluate and bind a builtin call's arguments against its spec.
    pub(crate) fn bind_call(
        &mut self,
        call: &Call,
        specs: &[args::ArgSpec],
    ) -> Result<args::BoundArgs> {
        let evaluated = self.eval_args(call)?;
        args::bind(&call.name, specs, evaluated, call.pos)
    }

    /// Bind user module/function parameters in the current (freshly pushed)
    /// scope: defaults first, then positionals in order, then named
    /// arguments, which override.
    fn bind_params(
        &mut self,
        callee: &str,
        params: &[Param],
        args: Vec<(Option<String>, Value)>,
        pos: Pos,
    ) -> Result<()> {
        for p in params {
            if let Some(d) = &p.default {
                let v = self.eval_expr(d)?;
                self.env.set(p.name.clone(), v);
            }
        }

        // positionals bind by parameter slot, named arguments bind after and
        // win on overlap regardless of call-site order
        let mut positional: Vec<Value> = Vec::new();
        let mut named: Vec<(String, Value)> = Vec::new();
        for (name, value) in args {
            match name {
                None => positional.push(value),
                Some(name) => named.push((name, value)),
            }
        }

        if positional.len() > params.len() {
            return Err(Error::eval(pos, format!("{callee}: too many arguments")));
        }
        let mut provided: Vec<String> = Vec::new();
        for (p, value) in params.iter().zip(positional) {
            provided.push(p.name.clone());
            self.env.set(p.name.clone(), value);
        }
        for (name, value) in named {
            if !params.iter().any(|p| p.name == name) {
                return Err(Error::eval(pos, format!("{callee}: unknown parameter {name:?}")));
            }
            provided.push(name.clone());
            self.env.set(name, value);
        }

        for p in params {
            if p.default.is_none() && !provided.iter().any(|n| n == &p.name) {
                return Err(Error::eval(
                    pos,
                    format!("{callee}: missing argument {:?}", p.name),
                ));
            }
        }
        Ok(())
    }

    fn with_scope<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.env.push_scope();
        let result = f(self);
        self.env.pop_scope();
        result
    }

    fn with_depth<T>(&mut self, pos: Pos, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_CALL_DEPTH {
            return Err(Error::eval(pos, "recursion limit exceeded"));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

fn math_builtin(name: &str) -> Option<fn(f64) -> f64> {
    match name {
        "sin" => Some(f64::sin),
        "cos" => Some(f64::cos),
        "sqrt" => Some(f64::sqrt),
        "abs" => Some(f64::abs),
        _ => None,
    }
}

fn eval_unary(op: UnaryOp, v: Value, pos: Pos) -> Result<Value> {
    match op {
        UnaryOp::Not => match v {
            Value::Bool(b) => Ok(Value::Bool(!b)),
            other => Err(Error::eval(pos, format!("'!' expects a bool, got {}", other.type_name()))),
        },
        UnaryOp::Neg => match v {
            Value::Number(n) => Ok(Value::Number(-n)),
            other => Err(Error::eval(pos, format!("'-' expects a number, got {}", other.type_name()))),
        },
        UnaryOp::Plus => match v {
            Value::Number(n) => Ok(Value::Number(n)),
            other => Err(Error::eval(pos, format!("'+' expects a number, got {}", other.type_name()))),
        },
    }
}

fn eval_binary(op: BinaryOp, l: Value, r: Value, pos: Pos) -> Result<Value> {
    use BinaryOp::*;

    match op {
        Eq => return Ok(Value::Bool(l == r)),
        Neq => return Ok(Value::Bool(l != r)),
        And | Or => {
            let (Some(a), Some(b)) = (l.as_bool(), r.as_bool()) else {
                return Err(Error::eval(
                    pos,
                    format!("logical operator expects bools, got {} and {}", l.type_name(), r.type_name()),
                ));
            };
            return Ok(Value::Bool(if matches!(op, And) { a && b } else { a || b }));
        }
        _ => {}
    }

    let (Some(a), Some(b)) = (l.as_number(), r.as_number()) else {
        return Err(Error::eval(
            pos,
            format!("arithmetic expects numbers, got {} and {}", l.type_name(), r.type_name()),
        ));
    };
    Ok(match op {
        Add => Value::Number(a + b),
        Sub => Value::Number(a - b),
        Mul => Value::Number(a * b),
        Div => Value::Number(a / b),
        Mod => Value::Number(a % b),
        Pow => Value::Number(a.powf(b)),
        Lt => Value::Bool(a < b),
        Lte => Value::Bool(a <= b),
        Gt => Value::Bool(a > b),
        Gte => Value::Bool(a >= b),
        Eq | Neq | And | Or => unreachable!(),
    })
}
