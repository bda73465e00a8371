// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! Lexically scoped environment.
//!
//! Variables live in a scope stack; blocks, call children, and user
//! module/function bodies each push a scope. Module and function definitions
//! are program-global regardless of where they appear.

use crate::eval::value::Value;
use crate::lang::ast::{Expr, Param, Stmt};
use ahash::AHashMap;

#[derive(Debug, Clone)]
pub struct ModuleDef {
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub struct FuncDef {
    pub params: Vec<Param>,
    pub body: Expr,
}

#[derive(Debug)]
pub struct Env {
    scopes: Vec<AHashMap<String, Value>>,
    modules: AHashMap<String, ModuleDef>,
    functions: AHashMap<String, FuncDef>,
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

impl Env {
    pub fn new() -> Self {
        Env {
            scopes: vec![AHashMap::new()],
            modules: AHashMap::new(),
            functions: AHashMap::new(),
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(AHashMap::new());
    }

    pub fn pop_scope(&mut self) {
        debug_assert!(self.scopes.len() > 1);
        self.scopes.pop();
    }

    /// Define or overwrite in the innermost scope.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.scopes
            .last_mut()
            .expect("scope stack is never empty")
            .insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.scopes.iter().rev().find_map(|s| s.get(name))
    }

    pub fn define_module(&mut self, name: impl Into<String>, def: ModuleDef) {
        self.modules.insert(name.into(), def);
    }

    pub fn module(&self, name: &str) -> Option<&ModuleDef> {
        self.modules.get(name)
    }

    pub fn define_function(&mut self, name: impl Into<String>, def: FuncDef) {
        self.functions.insert(name.into(), def);
    }

    pub fn function(&self, name: &str) -> Option<&FuncDef> {
        self.functions.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_scope_shadows_and_unwinds() {
        let mut env = Env::new();
        env.set("x", Value::Number(1.0));
        env.push_scope();
        env.set("x", Value::Number(2.0));
        assert_eq!(env.get("x"), Some(&Value::Number(2.0)));
        env.pop_scope();
        assert_eq!(env.get("x"), Some(&Value::Number(1.0)));
    }

    #[test]
    fn test_outer_visible_from_inner() {
        let mut env = Env::new();
        env.set("r", Value::Number(5.0));
        env.push_scope();
        assert_eq!(env.get("r"), Some(&Value::Number(5.0)));
    }
}
