// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! Representation-changing operators.
//!
//! `solid()` is the funnel into the membership representation; the marching
//! and dual-contour operators leave it again, and `mesh_to_sdf` closes the
//! loop from meshes back to distance fields.

use crate::error::{Error, Result};
use crate::eval::args::ArgSpec;
use crate::eval::shape::ShapeRep;
use crate::eval::value::Value;
use crate::eval::Evaluator;
use crate::geometry::dual_contour::{dual_contour as dc, DualContourOptions};
use crate::geometry::marching;
use crate::lang::ast::Call;

const GRID_SPECS: &[ArgSpec] = &[
    ArgSpec::optional("delta", Value::Number(0.02)),
    ArgSpec::optional("subdiv", Value::Number(8.0)),
];

const DUAL_CONTOUR_SPECS: &[ArgSpec] = &[
    ArgSpec::optional("delta", Value::Number(0.02)),
    ArgSpec::optional("repair", Value::Bool(false)),
    ArgSpec::optional("clip", Value::Bool(false)),
];

const INSET_SPECS: &[ArgSpec] = &[ArgSpec::required("delta")];

/// Convert any child to the membership representation.
pub fn solid(ev: &mut Evaluator, call: &Call, mut children: Vec<ShapeRep>) -> Result<ShapeRep> {
    ev.bind_call(call, &[])?;
    Ok(children.remove(0).solidify())
}

pub fn mesh_to_sdf(ev: &mut Evaluator, call: &Call, mut children: Vec<ShapeRep>) -> Result<ShapeRep> {
    let a = ev.bind_call(call, &[])?;
    match children.remove(0) {
        ShapeRep::Mesh2(m) => Ok(ShapeRep::Sdf2(m.to_sdf())),
        ShapeRep::Mesh3(m) => Ok(ShapeRep::Sdf3(m.to_sdf())),
        other => Err(Error::eval(
            a.pos(),
            format!("mesh_to_sdf: requires a mesh child, got {}", other.kind()),
        )),
    }
}

pub fn inset_sdf(ev: &mut Evaluator, call: &Call, mut children: Vec<ShapeRep>) -> Result<ShapeRep> {
    let a = ev.bind_call(call, INSET_SPECS)?;
    let delta = a.num("delta")?;
    match children.remove(0) {
        ShapeRep::Sdf2(f) => Ok(ShapeRep::Sdf2(f.inset(delta))),
        ShapeRep::Sdf3(f) => Ok(ShapeRep::Sdf3(f.inset(delta))),
        other => Err(Error::eval(
            a.pos(),
            format!("inset_sdf: requires an sdf child, got {}", other.kind()),
        )),
    }
}

pub fn outset_sdf(ev: &mut Evaluator, call: &Call, mut children: Vec<ShapeRep>) -> Result<ShapeRep> {
    let a = ev.bind_call(call, INSET_SPECS)?;
    let delta = a.num("delta")?;
    match children.remove(0) {
        ShapeRep::Sdf2(f) => Ok(ShapeRep::Sdf2(f.inset(-delta))),
        ShapeRep::Sdf3(f) => Ok(ShapeRep::Sdf3(f.inset(-delta))),
        other => Err(Error::eval(
            a.pos(),
            format!("outset_sdf: requires an sdf child, got {}", other.kind()),
        )),
    }
}

pub fn marching_squares(
    ev: &mut Evaluator,
    call: &Call,
    mut children: Vec<ShapeRep>,
) -> Result<ShapeRep> {
    let a = ev.bind_call(call, GRID_SPECS)?;
    let delta = a.num("delta")?;
    if delta <= 0.0 {
        return Err(Error::eval(a.pos(), "marching_squares: delta must be positive"));
    }
    let subdiv = a.integer("subdiv")?;
    if subdiv < 1 {
        return Err(Error::eval(a.pos(), "marching_squares: subdiv must be at least 1"));
    }
    match children.remove(0) {
        ShapeRep::Solid2(s) => {
            Ok(ShapeRep::Mesh2(marching::marching_squares(&s, delta, subdiv as u32)))
        }
        other => Err(Error::eval(
            a.pos(),
            format!("marching_squares: requires a 2d solid child, got {}", other.kind()),
        )),
    }
}

pub fn marching_cubes(
    ev: &mut Evaluator,
    call: &Call,
    mut children: Vec<ShapeRep>,
) -> Result<ShapeRep> {
    let a = ev.bind_call(call, GRID_SPECS)?;
    let delta = a.num("delta")?;
    if delta <= 0.0 {
        return Err(Error::eval(a.pos(), "marching_cubes: delta must be positive"));
    }
    let subdiv = a.integer("subdiv")?;
    if subdiv < 1 {
        return Err(Error::eval(a.pos(), "marching_cubes: subdiv must be at least 1"));
    }
    match children.remove(0) {
        ShapeRep::Solid3(s) => {
            Ok(ShapeRep::Mesh3(marching::marching_cubes(&s, delta, subdiv as u32)))
        }
        other => Err(Error::eval(
            a.pos(),
            format!("marching_cubes: requires a 3d solid child, got {}", other.kind()),
        )),
    }
}

pub fn dual_contour(
    ev: &mut Evaluator,
    call: &Call,
    mut children: Vec<ShapeRep>,
) -> Result<ShapeRep> {
    let a = ev.bind_call(call, DUAL_CONTOUR_SPECS)?;
    let delta = a.num("delta")?;
    if delta <= 0.0 {
        return Err(Error::eval(a.pos(), "dual_contour: delta must be positive"));
    }
    let opts = DualContourOptions { repair: a.boolean("repair")?, clip: a.boolean("clip")? };
    match children.remove(0) {
        ShapeRep::Solid3(s) => Ok(ShapeRep::Mesh3(dc(&s, delta, opts))),
        other => Err(Error::eval(
            a.pos(),
            format!("dual_contour: requires a 3d solid child, got {}", other.kind()),
        )),
    }
}
