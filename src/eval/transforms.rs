// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! `translate`, `rotate`, and `scale`.
//!
//! Angles are taken in degrees at the surface and converted once. Planar
//! shapes accept 3-vectors only when the z component is inert (zero offset,
//! rotation about the z axis only). Implicit representations transform by
//! inverse-mapping query points, so a non-invertible map is an error for
//! solids and SDFs; meshes map their vertices directly and accept any map.

use crate::error::{Error, Result};
use crate::eval::args::{ArgSpec, BoundArgs};
use crate::eval::shape::ShapeRep;
use crate::eval::value::Value;
use crate::eval::Evaluator;
use crate::geometry::{Affine2, Affine3};
use crate::lang::ast::Call;
use crate::lang::token::Pos;
use nalgebra::{Vector2, Vector3};

pub fn translate(ev: &mut Evaluator, call: &Call, mut children: Vec<ShapeRep>) -> Result<ShapeRep> {
    let a = ev.bind_call(call, &[ArgSpec::required("v")])?;
    let child = children.remove(0);
    if child.is_2d() {
        let v = planar_vec("translate", &a)?;
        apply2(child, &Affine2::translation(v), 1.0, a.pos())
    } else {
        let v = a.vec3("v")?;
        apply3(child, &Affine3::translation(v), 1.0, a.pos())
    }
}

pub fn scale(ev: &mut Evaluator, call: &Call, mut children: Vec<ShapeRep>) -> Result<ShapeRep> {
    let a = ev.bind_call(call, &[ArgSpec::required("v")])?;
    let child = children.remove(0);
    if child.is_2d() {
        let v = planar_vec("scale", &a)?;
        let dist_scale = sdf_scale_factor(&child, &[v.x, v.y], a.pos())?;
        apply2(child, &Affine2::scaling(v), dist_scale, a.pos())
    } else {
        let v = a.vec3("v")?;
        let dist_scale = sdf_scale_factor(&child, &[v.x, v.y, v.z], a.pos())?;
        apply3(child, &Affine3::scaling(v), dist_scale, a.pos())
    }
}

pub fn rotate(ev: &mut Evaluator, call: &Call, mut children: Vec<ShapeRep>) -> Result<ShapeRep> {
    let specs = &[ArgSpec::optional("a", Value::Number(0.0)), ArgSpec::opt("v")];
    let a = ev.bind_call(call, specs)?;
    let child = children.remove(0);
    if child.is_2d() {
        let angle = planar_angle(&a)?;
        apply2(child, &Affine2::rotation(angle.to_radians()), 1.0, a.pos())
    } else {
        let map = spatial_rotation(&a)?;
        apply3(child, &map, 1.0, a.pos())
    }
}

/// Angle in degrees for a planar rotation, from either the axis-angle form
/// (axis must be the z axis; its sign flips the direction) or a plain angle.
fn planar_angle(a: &BoundArgs) -> Result<f64> {
    if a.provided("v") {
        let angle = a.num("a")?;
        let axis = a.vec3("v")?;
        if axis.x != 0.0 || axis.y != 0.0 {
            return Err(Error::eval(
                a.pos(),
                "rotate: 2d shapes can only rotate about the z axis",
            ));
        }
        if axis.z == 0.0 {
            return Err(Error::eval(a.pos(), "rotate: rotation axis is zero"));
        }
        return Ok(angle * axis.z.signum());
    }
    match a.raw("a") {
        Value::Number(n) => Ok(*n),
        other => {
            let v = other
                .as_vec3()
                .map_err(|msg| Error::bind(a.pos(), format!("argument \"a\": {msg}")))?;
            if v.x != 0.0 || v.y != 0.0 {
                return Err(Error::eval(
                    a.pos(),
                    "rotate: 2d shapes can only rotate about the z axis",
                ));
            }
            Ok(v.z)
        }
    }
}

fn spatial_rotation(a: &BoundArgs) -> Result<Affine3> {
    if a.provided("v") {
        let angle = a.num("a")?;
        let axis = a.vec3("v")?;
        if axis == Vector3::zeros() {
            return Err(Error::eval(a.pos(), "rotate: rotation axis is zero"));
        }
        return Ok(Affine3::rotation_axis_angle(axis, angle.to_radians()));
    }
    match a.raw("a") {
        Value::Number(n) => Ok(Affine3::rotation_euler(0.0, 0.0, n.to_radians())),
        other => {
            let v = other
                .as_vec3()
                .map_err(|msg| Error::bind(a.pos(), format!("argument \"a\": {msg}")))?;
            Ok(Affine3::rotation_euler(
                v.x.to_radians(),
                v.y.to_radians(),
                v.z.to_radians(),
            ))
        }
    }
}

/// The `v` argument of a planar transform: any z component must be zero.
fn planar_vec(op: &str, a: &BoundArgs) -> Result<Vector2<f64>> {
    let v = a.vec3("v")?;
    if v.z != 0.0 {
        return Err(Error::eval(
            a.pos(),
            format!("{op}: z component must be 0 for 2d shapes"),
        ));
    }
    Ok(Vector2::new(v.x, v.y))
}

/// SDF distances stay metric only under uniform scaling; reject anything
/// else up front and return the factor to rescale distances by.
fn sdf_scale_factor(child: &ShapeRep, factors: &[f64], pos: Pos) -> Result<f64> {
    if !matches!(child, ShapeRep::Sdf2(_) | ShapeRep::Sdf3(_)) {
        return Ok(1.0);
    }
    let first = factors[0];
    if factors.iter().any(|&f| f != first) {
        return Err(Error::eval(pos, "scale: non-uniform scaling not supported for sdf shapes"));
    }
    Ok(first.abs())
}

fn apply2(child: ShapeRep, map: &Affine2, dist_scale: f64, pos: Pos) -> Result<ShapeRep> {
    let not_invertible = || Error::eval(pos, "transform is not invertible");
    match child {
        ShapeRep::Solid2(s) => Ok(ShapeRep::Solid2(s.transformed(map).ok_or_else(not_invertible)?)),
        ShapeRep::Sdf2(s) => {
            Ok(ShapeRep::Sdf2(s.transformed(map, dist_scale).ok_or_else(not_invertible)?))
        }
        ShapeRep::Mesh2(m) => Ok(ShapeRep::Mesh2(m.transformed(map))),
        other => Err(Error::eval(pos, format!("expected a 2d shape, got {}", other.kind()))),
    }
}

fn apply3(child: ShapeRep, map: &Affine3, dist_scale: f64, pos: Pos) -> Result<ShapeRep> {
    let not_invertible = || Error::eval(pos, "transform is not invertible");
    match child {
        ShapeRep::Solid3(s) => Ok(ShapeRep::Solid3(s.transformed(map).ok_or_else(not_invertible)?)),
        ShapeRep::Sdf3(s) => {
            Ok(ShapeRep::Sdf3(s.transformed(map, dist_scale).ok_or_else(not_invertible)?))
        }
        ShapeRep::Mesh3(m) => Ok(ShapeRep::Mesh3(m.transformed(map))),
        other => Err(Error::eval(pos, format!("expected a 3d shape, got {}", other.kind()))),
    }
}
