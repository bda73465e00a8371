// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! Implicad
//!
//! A scripting language for parametric solid modeling over implicit
//! geometry. Scripts describe shapes in three interchangeable
//! representations: membership solids, signed distance fields, and boundary
//! meshes, in both two and three dimensions.

pub mod error;
pub mod eval;
pub mod fonts;
pub mod geometry;
pub mod lang;

pub use error::{Error, Result};
pub use eval::{evaluate, ShapeRep, Value};
pub use lang::parse;

/// Parse and evaluate a script in one step.
pub fn evaluate_source(source: &str) -> Result<ShapeRep> {
    let program = parse(source)?;
    evaluate(&program)
}
