// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! AST node definitions.
//!
//! A `Program` is an ordered sequence of statements. The call statement is
//! the universal node for primitives and CSG/transform operators alike:
//! `children` is empty for leaf primitives and non-empty for composites.

use crate::lang::token::Pos;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Stmt {
    Assign { name: String, expr: Expr, pos: Pos },
    /// A `{ ... }` block introducing a new variable scope.
    Block { stmts: Vec<Stmt>, pos: Pos },
    If { cond: Expr, then_branch: Box<Stmt>, else_branch: Option<Box<Stmt>>, pos: Pos },
    ModuleDef { name: String, params: Vec<Param>, body: Vec<Stmt>, pos: Pos },
    FuncDef { name: String, params: Vec<Param>, body: Expr, pos: Pos },
    Call(CallStmt),
}

impl Stmt {
    pub fn pos(&self) -> Pos {
        match self {
            Stmt::Assign { pos, .. }
            | Stmt::Block { pos, .. }
            | Stmt::If { pos, .. }
            | Stmt::ModuleDef { pos, .. }
            | Stmt::FuncDef { pos, .. } => *pos,
            Stmt::Call(c) => c.pos,
        }
    }
}

/// A call statement, optionally carrying child statements (explicit `{...}`
/// block, or the single-child shorthand `translate(v) cube(1);`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallStmt {
    pub call: Call,
    pub children: Vec<Stmt>,
    pub pos: Pos,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Call {
    pub name: String,
    pub args: Vec<Arg>,
    pub pos: Pos,
}

/// `name` is `None` for positional arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arg {
    pub name: Option<String>,
    pub expr: Expr,
    pub pos: Pos,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub default: Option<Expr>,
    pub pos: Pos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
    Neg,
    Plus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    And,
    Or,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Expr {
    Number { value: f64, pos: Pos },
    Bool { value: bool, pos: Pos },
    Str { value: String, pos: Pos },
    Var { name: String, pos: Pos },
    Array { elems: Vec<Expr>, pos: Pos },
    Unary { op: UnaryOp, expr: Box<Expr>, pos: Pos },
    Binary { op: BinaryOp, lhs: Box<Expr>, rhs: Box<Expr>, pos: Pos },
    Ternary { cond: Box<Expr>, then_expr: Box<Expr>, else_expr: Box<Expr>, pos: Pos },
    Call(Call),
}

impl Expr {
    pub fn pos(&self) -> Pos {
        match self {
            Expr::Number { pos, .. }
            | Expr::Bool { pos, .. }
            | Expr::Str { pos, .. }
            | Expr::Var { pos, .. }
            | Expr::Array { pos, .. }
            | Expr::Unary { pos, .. }
            | Expr::Binary { pos, .. }
            | Expr::Ternary { pos, .. } => *pos,
            Expr::Call(c) => c.pos,
        }
    }
}
