// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! Affine maps used by the transform operators.
//!
//! Shapes are transformed by composing the map's inverse with their point
//! function, so `try_inverse` is the workhorse here. A singular linear part
//! (e.g. a zero scale factor) yields `None` and is reported as an evaluation
//! error upstream.

use crate::geometry::{Bounds2, Bounds3};
use nalgebra::{Matrix2, Matrix3, Point2, Point3, Rotation2, Rotation3, Vector2, Vector3};

#[derive(Debug, Clone, Copy)]
pub struct Affine2 {
    pub linear: Matrix2<f64>,
    pub translation: Vector2<f64>,
}

#[derive(Debug, Clone, Copy)]
pub struct Affine3 {
    pub linear: Matrix3<f64>,
    pub translation: Vector3<f64>,
}

impl Affine2 {
    pub fn translation(v: Vector2<f64>) -> Self {
        Affine2 { linear: Matrix2::identity(), translation: v }
    }

    pub fn scaling(v: Vector2<f64>) -> Self {
        Affine2 { linear: Matrix2::from_diagonal(&v), translation: Vector2::zeros() }
    }

    /// Counter-clockwise rotation by `angle` radians about the origin.
    pub fn rotation(angle: f64) -> Self {
        Affine2 {
            linear: Rotation2::new(angle).into_inner(),
            translation: Vector2::zeros(),
        }
    }

    pub fn apply(&self, p: Point2<f64>) -> Point2<f64> {
        Point2::from(self.linear * p.coords + self.translation)
    }

    /// Inverse map, or `None` when the linear part is singular.
    pub fn try_inverse(&self) -> Option<Affine2> {
        let inv = self.linear.try_inverse()?;
        Some(Affine2 { linear: inv, translation: -(inv * self.translation) })
    }

    /// Axis-aligned box covering the images of all four corners.
    pub fn map_bounds(&self, b: &Bounds2) -> Bounds2 {
        let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for &x in &[b.min.x, b.max.x] {
            for &y in &[b.min.y, b.max.y] {
                let p = self.apply(Point2::new(x, y));
                min.x = min.x.min(p.x);
                min.y = min.y.min(p.y);
                max.x = max.x.max(p.x);
                max.y = max.y.max(p.y);
            }
        }
        Bounds2::new(min, max)
    }
}

impl Affine3 {
    pub fn translation(v: Vector3<f64>) -> Self {
        Affine3 { linear: Matrix3::identity(), translation: v }
    }

    pub fn scaling(v: Vector3<f64>) -> Self {
        Affine3 { linear: Matrix3::from_diagonal(&v), translation: Vector3::zeros() }
    }

    /// Rotation about an arbitrary axis by `angle` radians. The axis must be
    /// non-zero; callers validate that.
    pub fn rotation_axis_angle(axis: Vector3<f64>, angle: f64) -> Self {
        let rot = Rotation3::from_axis_angle(&nalgebra::Unit::new_normalize(axis), angle);
        Affine3 { linear: rot.into_inner(), translation: Vector3::zeros() }
    }

    /// Euler rotation applying X, then Y, then Z (angles in radians).
    pub fn rotation_euler(x: f64, y: f64, z: f64) -> Self {
        let rot = Rotation3::from_axis_angle(&Vector3::z_axis(), z)
            * Rotation3::from_axis_angle(&Vector3::y_axis(), y)
            * Rotation3::from_axis_angle(&Vector3::x_axis(), x);
        Affine3 { linear: rot.into_inner(), translation: Vector3::zeros() }
    }

    pub fn apply(&self, p: Point3<f64>) -> Point3<f64> {
        Point3::from(self.linear * p.coords + self.translation)
    }

    pub fn try_inverse(&self) -> Option<Affine3> {
        let inv = self.linear.try_inverse()?;
        Some(Affine3 { linear: inv, translation: -(inv * self.translation) })
    }

    /// Axis-aligned box covering the images of all eight corners.
    pub fn map_bounds(&self, b: &Bounds3) -> Bounds3 {
        let mut min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for &x in &[b.min.x, b.max.x] {
            for &y in &[b.min.y, b.max.y] {
                for &z in &[b.min.z, b.max.z] {
                    let p = self.apply(Point3::new(x, y, z));
                    min.x = min.x.min(p.x);
                    min.y = min.y.min(p.y);
                    min.z = min.z.min(p.z);
                    max.x = max.x.max(p.x);
                    max.y = max.y.max(p.y);
                    max.z = max.z.max(p.z);
                }
            }
        }
        Bounds3::new(min, max)
    }
}
