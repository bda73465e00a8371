// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! Primitive shape constructors, in both representations.
//!
//! Each primitive has a membership form (`*_solid`) and an exact signed
//! distance form (`*_sdf`). Distances are positive inside.

use crate::geometry::{Bounds2, Bounds3, Sdf2, Sdf3, Solid2, Solid3};
use nalgebra::{Point2, Point3, Vector2, Vector3};

pub fn sphere_solid(r: f64) -> Solid3 {
    let bounds = Bounds3::new(Point3::new(-r, -r, -r), Point3::new(r, r, r));
    Solid3::new(bounds, move |p| p.coords.norm() <= r)
}

pub fn sphere_sdf(r: f64) -> Sdf3 {
    let bounds = Bounds3::new(Point3::new(-r, -r, -r), Point3::new(r, r, r));
    Sdf3::new(bounds, move |p| r - p.coords.norm())
}

/// Axis-aligned box. `center=false` places one corner at the origin.
pub fn cube_solid(size: Vector3<f64>, center: bool) -> Solid3 {
    let bounds = cube_bounds(size, center);
    Solid3::new(bounds, |_| true)
}

pub fn cube_sdf(size: Vector3<f64>, center: bool) -> Sdf3 {
    let bounds = cube_bounds(size, center);
    let half = size * 0.5;
    let c = Point3::from((bounds.min.coords + bounds.max.coords) * 0.5);
    Sdf3::new(bounds, move |p| {
        let q = Vector3::new(
            (p.x - c.x).abs() - half.x,
            (p.y - c.y).abs() - half.y,
            (p.z - c.z).abs() - half.z,
        );
        let outside = Vector3::new(q.x.max(0.0), q.y.max(0.0), q.z.max(0.0)).norm();
        let inside = q.x.max(q.y).max(q.z).min(0.0);
        -(outside + inside)
    })
}

fn cube_bounds(size: Vector3<f64>, center: bool) -> Bounds3 {
    if center {
        let half = size * 0.5;
        Bounds3::new(Point3::from(-half), Point3::from(half))
    } else {
        Bounds3::new(Point3::origin(), Point3::from(size))
    }
}

/// Z-axis cylinder from z=0 to z=h, or centered on the origin.
pub fn cylinder_solid(h: f64, r: f64, center: bool) -> Solid3 {
    let (z0, z1) = cylinder_span(h, center);
    let bounds = Bounds3::new(Point3::new(-r, -r, z0), Point3::new(r, r, z1));
    Solid3::new(bounds, move |p| p.x.hypot(p.y) <= r)
}

pub fn cylinder_sdf(h: f64, r: f64, center: bool) -> Sdf3 {
    let (z0, z1) = cylinder_span(h, center);
    let bounds = Bounds3::new(Point3::new(-r, -r, z0), Point3::new(r, r, z1));
    let half_h = 0.5 * (z1 - z0);
    let mid_z = 0.5 * (z0 + z1);
    Sdf3::new(bounds, move |p| {
        let dr = p.x.hypot(p.y) - r;
        let dz = (p.z - mid_z).abs() - half_h;
        let outside = Vector2::new(dr.max(0.0), dz.max(0.0)).norm();
        let inside = dr.max(dz).min(0.0);
        -(outside + inside)
    })
}

fn cylinder_span(h: f64, center: bool) -> (f64, f64) {
    if center {
        (-0.5 * h, 0.5 * h)
    } else {
        (0.0, h)
    }
}

pub fn circle_solid(r: f64) -> Solid2 {
    let bounds = Bounds2::new(Point2::new(-r, -r), Point2::new(r, r));
    Solid2::new(bounds, move |p| p.coords.norm() <= r)
}

pub fn circle_sdf(r: f64) -> Sdf2 {
    let bounds = Bounds2::new(Point2::new(-r, -r), Point2::new(r, r));
    Sdf2::new(bounds, move |p| r - p.coords.norm())
}

pub fn square_solid(size: Vector2<f64>, center: bool) -> Solid2 {
    let bounds = square_bounds(size, center);
    Solid2::new(bounds, |_| true)
}

pub fn square_sdf(size: Vector2<f64>, center: bool) -> Sdf2 {
    let bounds = square_bounds(size, center);
    let half = size * 0.5;
    let c = Point2::from((bounds.min.coords + bounds.max.coords) * 0.5);
    Sdf2::new(bounds, move |p| {
        let q = Vector2::new((p.x - c.x).abs() - half.x, (p.y - c.y).abs() - half.y);
        let outside = Vector2::new(q.x.max(0.0), q.y.max(0.0)).norm();
        let inside = q.x.max(q.y).min(0.0);
        -(outside + inside)
    })
}

fn square_bounds(size: Vector2<f64>, center: bool) -> Bounds2 {
    if center {
        let half = size * 0.5;
        Bounds2::new(Point2::from(-half), Point2::from(half))
    } else {
        Bounds2::new(Point2::origin(), Point2::from(size))
    }
}
