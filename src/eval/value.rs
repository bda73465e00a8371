// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! Runtime values produced by expression evaluation.

use nalgebra::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// Scalar-world values. Shapes are not values: they flow through statements,
/// never through expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Number(f64),
    Bool(bool),
    Str(String),
    List(Vec<Value>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::List(_) => "list",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Coerce to a 2-vector: a scalar splats to both components, a short
    /// list is zero-filled on the right.
    pub fn as_vec2(&self) -> Result<Vector2<f64>, String> {
        let c = self.numeric_components(2)?;
        Ok(Vector2::new(c[0], c[1]))
    }

    /// Coerce to a 3-vector with the same splat and zero-fill rules.
    pub fn as_vec3(&self) -> Result<Vector3<f64>, String> {
        let c = self.numeric_components(3)?;
        Ok(Vector3::new(c[0], c[1], c[2]))
    }

    fn numeric_components(&self, n: usize) -> Result<Vec<f64>, String> {
        match self {
            Value::Number(x) => Ok(vec![*x; n]),
            Value::List(items) => {
                if items.is_empty() {
                    return Err("expected numeric vector, got empty list".into());
                }
                if items.len() > n {
                    return Err(format!("expected at most {n} components, got {}", items.len()));
                }
                let mut out = Vec::with_capacity(n);
                for item in items {
                    match item.as_number() {
                        Some(x) => out.push(x),
                        None => {
                            return Err(format!(
                                "expected numeric vector component, got {}",
                                item.type_name()
                            ))
                        }
                    }
                }
                out.resize(n, 0.0);
                Ok(out)
            }
            other => Err(format!("expected numeric vector, got {}", other.type_name())),
        }
    }
}
