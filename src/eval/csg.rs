// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! Boolean operators over shape lists.
//!
//! All operands of one boolean must share a representation and
//! dimensionality. Solids compose pointwise; SDFs use max for union and min
//! for intersection (positive inside); meshes do not support booleans and
//! must be converted with `solid()` first.

use crate::error::{Error, Result};
use crate::eval::shape::ShapeRep;
use crate::eval::Evaluator;
use crate::lang::ast::Call;
use crate::lang::token::Pos;

/// Union of a shape list. A single shape passes through untouched; an empty
/// list is an error.
pub fn union_all(shapes: Vec<ShapeRep>, pos: Pos) -> Result<ShapeRep> {
    let mut iter = shapes.into_iter();
    let Some(first) = iter.next() else {
        return Err(Error::eval(pos, "no shapes produced"));
    };
    let mut acc = first;
    for shape in iter {
        acc = union_pair(acc, shape, pos)?;
    }
    Ok(acc)
}

fn union_pair(a: ShapeRep, b: ShapeRep, pos: Pos) -> Result<ShapeRep> {
    match (&a, &b) {
        (ShapeRep::Solid2(x), ShapeRep::Solid2(y)) => Ok(ShapeRep::Solid2(x.join(y))),
        (ShapeRep::Solid3(x), ShapeRep::Solid3(y)) => Ok(ShapeRep::Solid3(x.join(y))),
        (ShapeRep::Sdf2(x), ShapeRep::Sdf2(y)) => Ok(ShapeRep::Sdf2(x.join(y))),
        (ShapeRep::Sdf3(x), ShapeRep::Sdf3(y)) => Ok(ShapeRep::Sdf3(x.join(y))),
        (ShapeRep::Mesh2(_), ShapeRep::Mesh2(_)) | (ShapeRep::Mesh3(_), ShapeRep::Mesh3(_)) => {
            Err(Error::eval(pos, "cannot union meshes; convert with solid() first"))
        }
        _ => Err(mixed(&a, &b, pos)),
    }
}

pub fn union(ev: &mut Evaluator, call: &Call, mut children: Vec<ShapeRep>) -> Result<ShapeRep> {
    ev.bind_call(call, &[])?;
    // the dispatcher already folded the children into one shape
    Ok(children.remove(0))
}

pub fn difference(ev: &mut Evaluator, call: &Call, children: Vec<ShapeRep>) -> Result<ShapeRep> {
    ev.bind_call(call, &[])?;
    let pos = call.pos;
    let mut iter = children.into_iter();
    let Some(mut acc) = iter.next() else {
        return Err(Error::eval(pos, "no shapes produced"));
    };
    for shape in iter {
        acc = match (&acc, &shape) {
            (ShapeRep::Solid2(x), ShapeRep::Solid2(y)) => ShapeRep::Solid2(x.subtract(y)),
            (ShapeRep::Solid3(x), ShapeRep::Solid3(y)) => ShapeRep::Solid3(x.subtract(y)),
            (ShapeRep::Sdf2(x), ShapeRep::Sdf2(y)) => ShapeRep::Sdf2(x.subtract(y)),
            (ShapeRep::Sdf3(x), ShapeRep::Sdf3(y)) => ShapeRep::Sdf3(x.subtract(y)),
            (ShapeRep::Mesh2(_), ShapeRep::Mesh2(_))
            | (ShapeRep::Mesh3(_), ShapeRep::Mesh3(_)) => {
                return Err(Error::eval(pos, "cannot subtract meshes; convert with solid() first"))
            }
            _ => return Err(mixed(&acc, &shape, pos)),
        };
    }
    Ok(acc)
}

pub fn intersection(ev: &mut Evaluator, call: &Call, children: Vec<ShapeRep>) -> Result<ShapeRep> {
    ev.bind_call(call, &[])?;
    let pos = call.pos;
    let mut iter = children.into_iter();
    let Some(mut acc) = iter.next() else {
        return Err(Error::eval(pos, "no shapes produced"));
    };
    for shape in iter {
        acc = match (&acc, &shape) {
            (ShapeRep::Solid2(x), ShapeRep::Solid2(y)) => ShapeRep::Solid2(x.intersect(y)),
            (ShapeRep::Solid3(x), ShapeRep::Solid3(y)) => ShapeRep::Solid3(x.intersect(y)),
            (ShapeRep::Sdf2(x), ShapeRep::Sdf2(y)) => ShapeRep::Sdf2(x.intersect(y)),
            (ShapeRep::Sdf3(x), ShapeRep::Sdf3(y)) => ShapeRep::Sdf3(x.intersect(y)),
            (ShapeRep::Mesh2(_), ShapeRep::Mesh2(_))
            | (ShapeRep::Mesh3(_), ShapeRep::Mesh3(_)) => {
                return Err(Error::eval(pos, "cannot intersect meshes; convert with solid() first"))
            }
            _ => return Err(mixed(&acc, &shape, pos)),
        };
    }
    Ok(acc)
}

fn mixed(a: &ShapeRep, b: &ShapeRep, pos: Pos) -> Error {
    Error::eval(pos, format!("cannot combine {} with {}", a.kind(), b.kind()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitives::{circle_solid, sphere_sdf, sphere_solid};
    use nalgebra::Point3;

    #[test]
    fn test_union_all_single_passthrough() {
        let s = union_all(vec![ShapeRep::Solid3(sphere_solid(1.0))], Pos::default()).unwrap();
        assert!(matches!(s, ShapeRep::Solid3(_)));
    }

    #[test]
    fn test_union_all_empty_errors() {
        let err = union_all(vec![], Pos::default()).unwrap_err();
        assert!(err.to_string().contains("no shapes produced"));
    }

    #[test]
    fn test_union_all_mixed_kinds_errors() {
        let err = union_all(
            vec![ShapeRep::Solid3(sphere_solid(1.0)), ShapeRep::Solid2(circle_solid(1.0))],
            Pos::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("cannot combine"));
    }

    #[test]
    fn test_sdf_union_is_pointwise_max() {
        let a = sphere_sdf(1.0);
        let b = sphere_sdf(2.0);
        let ShapeRep::Sdf3(u) =
            union_all(vec![ShapeRep::Sdf3(a), ShapeRep::Sdf3(b)], Pos::default()).unwrap()
        else {
            panic!("expected sdf");
        };
        assert_eq!(u.eval(Point3::origin()), 2.0);
    }
}
