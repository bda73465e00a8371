// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! Extrusion of planar solids into 3D solids.
//!
//! Both extrusions work backwards: the 3D membership test maps the query
//! point into the source plane and asks the 2D solid. That keeps twist and
//! per-level scaling exact instead of tessellated.

use crate::error::{Error, Result};
use crate::eval::args::ArgSpec;
use crate::eval::shape::ShapeRep;
use crate::eval::value::Value;
use crate::eval::Evaluator;
use crate::geometry::{Bounds3, Solid2, Solid3};
use crate::lang::ast::Call;
use crate::lang::token::Pos;
use nalgebra::{Point2, Point3};

const ANGLE_EPS: f64 = 1e-9;

pub fn linear_extrude(
    ev: &mut Evaluator,
    call: &Call,
    mut children: Vec<ShapeRep>,
) -> Result<ShapeRep> {
    let specs = &[
        ArgSpec::optional("height", Value::Number(1.0)).with_aliases(&["h"]),
        ArgSpec::optional("center", Value::Bool(false)),
        ArgSpec::optional("twist", Value::Number(0.0)),
        ArgSpec::optional("scale", Value::Number(1.0)),
    ];
    let a = ev.bind_call(call, specs)?;
    let base = planar_child("linear_extrude", children.remove(0), a.pos())?;

    let height = a.num("height")?.abs();
    let center = a.boolean("center")?;
    let twist = a.num("twist")?;
    let scale = a.vec2("scale")?;

    let (z0, z1) = if center { (-0.5 * height, 0.5 * height) } else { (0.0, height) };

    // top-level extent: the source can only grow by its largest scale factor
    let grow = scale.x.abs().max(scale.y.abs()).max(1.0);
    let r = base.bounds().max_corner_radius() * grow;
    let bounds = Bounds3::new(Point3::new(-r, -r, z0), Point3::new(r, r, z1));

    let solid = Solid3::new(bounds, move |p| {
        let t = if height == 0.0 { 0.0 } else { (p.z - z0) / height };
        let sx = 1.0 + t * (scale.x - 1.0);
        let sy = 1.0 + t * (scale.y - 1.0);
        if sx == 0.0 || sy == 0.0 {
            return false;
        }
        // undo the twist, then the per-level scale
        let angle = twist.to_radians() * t;
        let (sin, cos) = angle.sin_cos();
        let qx = p.x * cos - p.y * sin;
        let qy = p.x * sin + p.y * cos;
        base.contains(Point2::new(qx / sx, qy / sy))
    });
    Ok(ShapeRep::Solid3(solid))
}

pub fn rotate_extrude(
    ev: &mut Evaluator,
    call: &Call,
    mut children: Vec<ShapeRep>,
) -> Result<ShapeRep> {
    let specs = &[
        ArgSpec::optional("angle", Value::Number(360.0)),
        ArgSpec::optional("start", Value::Number(0.0)),
    ];
    let a = ev.bind_call(call, specs)?;
    let profile = planar_child("rotate_extrude", children.remove(0), a.pos())?;

    let angle = a.num("angle")?;
    let start = a.num("start")?;

    let b = profile.bounds();
    if b.min.x < 0.0 && b.max.x > 0.0 {
        return Err(Error::eval(a.pos(), "rotate_extrude: profile crosses the Y axis"));
    }
    // a profile entirely at x <= 0 sweeps on the negative side of the plane
    let sign = if b.max.x <= 0.0 { -1.0 } else { 1.0 };
    let r_max = b.min.x.abs().max(b.max.x.abs());
    let bounds = Bounds3::new(
        Point3::new(-r_max, -r_max, b.min.y),
        Point3::new(r_max, r_max, b.max.y),
    );
    let full = angle.abs() >= 360.0 - ANGLE_EPS;

    let solid = Solid3::new(bounds, move |p| {
        if !full {
            let theta = p.y.atan2(p.x).to_degrees();
            let swept = if angle >= 0.0 {
                normalize_degrees(theta - start)
            } else {
                normalize_degrees(start - theta)
            };
            if swept > angle.abs() + ANGLE_EPS {
                return false;
            }
        }
        let r = p.x.hypot(p.y);
        profile.contains(Point2::new(sign * r, p.z))
    });
    Ok(ShapeRep::Solid3(solid))
}

fn planar_child(op: &str, child: ShapeRep, pos: Pos) -> Result<Solid2> {
    match child {
        ShapeRep::Solid2(s) => Ok(s),
        other => Err(Error::eval(pos, format!("{op}: requires a 2d solid child, got {}", other.kind()))),
    }
}

fn normalize_degrees(d: f64) -> f64 {
    let d = d % 360.0;
    if d < 0.0 {
        d + 360.0
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
        assert_eq!(normalize_degrees(450.0), 90.0);
    }
}
