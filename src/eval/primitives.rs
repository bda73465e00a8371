// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! Leaf primitive handlers.
//!
//! Each primitive exists twice: the plain name yields a membership solid, the
//! `_sdf` suffix yields an exact signed distance field over the same
//! parameters.

use crate::error::{Error, Result};
use crate::eval::args::{ArgSpec, BoundArgs};
use crate::eval::shape::ShapeRep;
use crate::eval::value::Value;
use crate::eval::Evaluator;
use crate::geometry::primitives as geo;
use crate::geometry::{Mesh2, Solid2};
use crate::lang::ast::Call;
use nalgebra::Point2;

const SPHERE_SPECS: &[ArgSpec] =
    &[ArgSpec::optional("r", Value::Number(1.0)).with_aliases(&["radius"])];

const CUBE_SPECS: &[ArgSpec] = &[
    ArgSpec::optional("size", Value::Number(1.0)),
    ArgSpec::optional("center", Value::Bool(false)),
];

const CYLINDER_SPECS: &[ArgSpec] = &[
    ArgSpec::optional("h", Value::Number(1.0)).with_aliases(&["height"]),
    ArgSpec::optional("r", Value::Number(1.0)).with_aliases(&["radius"]),
    ArgSpec::optional("center", Value::Bool(false)),
];

const POLYGON_SPECS: &[ArgSpec] = &[
    ArgSpec::required("points"),
    ArgSpec::opt("paths"),
    ArgSpec::optional("convexity", Value::Number(1.0)),
];

pub fn sphere(ev: &mut Evaluator, call: &Call, _: Vec<ShapeRep>) -> Result<ShapeRep> {
    let a = ev.bind_call(call, SPHERE_SPECS)?;
    Ok(ShapeRep::Solid3(geo::sphere_solid(a.num("r")?)))
}

pub fn sphere_sdf(ev: &mut Evaluator, call: &Call, _: Vec<ShapeRep>) -> Result<ShapeRep> {
    let a = ev.bind_call(call, SPHERE_SPECS)?;
    Ok(ShapeRep::Sdf3(geo::sphere_sdf(a.num("r")?)))
}

pub fn cube(ev: &mut Evaluator, call: &Call, _: Vec<ShapeRep>) -> Result<ShapeRep> {
    let a = ev.bind_call(call, CUBE_SPECS)?;
    Ok(ShapeRep::Solid3(geo::cube_solid(a.vec3("size")?, a.boolean("center")?)))
}

pub fn cube_sdf(ev: &mut Evaluator, call: &Call, _: Vec<ShapeRep>) -> Result<ShapeRep> {
    let a = ev.bind_call(call, CUBE_SPECS)?;
    Ok(ShapeRep::Sdf3(geo::cube_sdf(a.vec3("size")?, a.boolean("center")?)))
}

pub fn cylinder(ev: &mut Evaluator, call: &Call, _: Vec<ShapeRep>) -> Result<ShapeRep> {
    let a = ev.bind_call(call, CYLINDER_SPECS)?;
    Ok(ShapeRep::Solid3(geo::cylinder_solid(a.num("h")?, a.num("r")?, a.boolean("center")?)))
}

pub fn cylinder_sdf(ev: &mut Evaluator, call: &Call, _: Vec<ShapeRep>) -> Result<ShapeRep> {
    let a = ev.bind_call(call, CYLINDER_SPECS)?;
    Ok(ShapeRep::Sdf3(geo::cylinder_sdf(a.num("h")?, a.num("r")?, a.boolean("center")?)))
}

pub fn circle(ev: &mut Evaluator, call: &Call, _: Vec<ShapeRep>) -> Result<ShapeRep> {
    let a = ev.bind_call(call, SPHERE_SPECS)?;
    Ok(ShapeRep::Solid2(geo::circle_solid(a.num("r")?)))
}

pub fn circle_sdf(ev: &mut Evaluator, call: &Call, _: Vec<ShapeRep>) -> Result<ShapeRep> {
    let a = ev.bind_call(call, SPHERE_SPECS)?;
    Ok(ShapeRep::Sdf2(geo::circle_sdf(a.num("r")?)))
}

pub fn square(ev: &mut Evaluator, call: &Call, _: Vec<ShapeRep>) -> Result<ShapeRep> {
    let a = ev.bind_call(call, CUBE_SPECS)?;
    Ok(ShapeRep::Solid2(geo::square_solid(a.vec2("size")?, a.boolean("center")?)))
}

pub fn square_sdf(ev: &mut Evaluator, call: &Call, _: Vec<ShapeRep>) -> Result<ShapeRep> {
    let a = ev.bind_call(call, CUBE_SPECS)?;
    Ok(ShapeRep::Sdf2(geo::square_sdf(a.vec2("size")?, a.boolean("center")?)))
}

/// `polygon(points, paths, convexity)`: the first path is the outline, any
/// further paths are holes. With no `paths`, all points form one loop in
/// order.
pub fn polygon(ev: &mut Evaluator, call: &Call, _: Vec<ShapeRep>) -> Result<ShapeRep> {
    let a = ev.bind_call(call, POLYGON_SPECS)?;
    a.integer("convexity")?;

    let points: Vec<Point2<f64>> = a
        .list("points")?
        .iter()
        .map(|v| {
            v.as_vec2()
                .map(|c| Point2::new(c.x, c.y))
                .map_err(|msg| Error::bind(a.pos(), format!("polygon: bad point: {msg}")))
        })
        .collect::<Result<_>>()?;
    if points.len() < 3 {
        return Err(Error::eval(a.pos(), "polygon: needs at least 3 points"));
    }

    let paths: Vec<Vec<usize>> = if a.provided("paths") {
        parse_paths(&a, points.len())?
    } else {
        vec![(0..points.len()).collect()]
    };

    let mut loops = paths.iter().map(|path| loop_solid(&points, path));
    let Some(mut acc) = loops.next() else {
        return Err(Error::eval(a.pos(), "polygon: empty path list"));
    };
    for hole in loops {
        acc = acc.subtract(&hole);
    }
    Ok(ShapeRep::Solid2(acc))
}

/// `paths` is either one flat index list or a list of index lists.
fn parse_paths(a: &BoundArgs, n_points: usize) -> Result<Vec<Vec<usize>>> {
    let raw = a.list("paths")?;
    let nested = matches!(raw.first(), Some(Value::List(_)));
    let path_values: Vec<&[Value]> = if nested {
        raw.iter()
            .map(|v| match v {
                Value::List(items) => Ok(items.as_slice()),
                other => Err(Error::bind(
                    a.pos(),
                    format!("polygon: path must be a list, got {}", other.type_name()),
                )),
            })
            .collect::<Result<_>>()?
    } else {
        vec![raw]
    };

    let mut paths = Vec::with_capacity(path_values.len());
    for values in path_values {
        let mut path = Vec::with_capacity(values.len());
        for v in values {
            let Some(n) = v.as_number() else {
                return Err(Error::bind(
                    a.pos(),
                    format!("polygon: path index must be a number, got {}", v.type_name()),
                ));
            };
            if n.fract() != 0.0 || n < 0.0 || n >= n_points as f64 {
                return Err(Error::eval(a.pos(), format!("polygon: path index {n} out of range")));
            }
            path.push(n as usize);
        }
        if path.len() < 3 {
            return Err(Error::eval(a.pos(), "polygon: each path needs at least 3 indices"));
        }
        paths.push(path);
    }
    Ok(paths)
}

fn loop_solid(points: &[Point2<f64>], path: &[usize]) -> Solid2 {
    let segments = path
        .iter()
        .zip(path.iter().cycle().skip(1))
        .map(|(&i, &j)| [points[i], points[j]])
        .collect();
    Mesh2::new(segments).to_solid()
}
