// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! Signed distance fields, positive inside.
//!
//! The sign convention is positive inside the shape and negative outside, so
//! pointwise union is `max` and intersection is `min`. Values are exact
//! distances for primitives and stay metrically meaningful under rigid
//! motions and uniform scaling; boolean combinations are lower bounds near
//! seams, which is all the surfacing code needs.

use crate::geometry::{Affine2, Affine3, Bounds2, Bounds3, Solid2, Solid3};
use nalgebra::{Point2, Point3};
use std::sync::Arc;

type Field2 = Arc<dyn Fn(Point2<f64>) -> f64 + Send + Sync>;
type Field3 = Arc<dyn Fn(Point3<f64>) -> f64 + Send + Sync>;

#[derive(Clone)]
pub struct Sdf2 {
    bounds: Bounds2,
    field: Field2,
}

#[derive(Clone)]
pub struct Sdf3 {
    bounds: Bounds3,
    field: Field3,
}

impl std::fmt::Debug for Sdf2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sdf2").field("bounds", &self.bounds).finish_non_exhaustive()
    }
}

impl std::fmt::Debug for Sdf3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sdf3").field("bounds", &self.bounds).finish_non_exhaustive()
    }
}

impl Sdf2 {
    pub fn new(
        bounds: Bounds2,
        field: impl Fn(Point2<f64>) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Sdf2 { bounds, field: Arc::new(field) }
    }

    pub fn bounds(&self) -> Bounds2 {
        self.bounds
    }

    pub fn eval(&self, p: Point2<f64>) -> f64 {
        (self.field)(p)
    }

    /// Pointwise max over the union of the bounds.
    pub fn join(&self, other: &Sdf2) -> Sdf2 {
        let (a, b) = (self.clone(), other.clone());
        Sdf2::new(self.bounds.union(&other.bounds), move |p| {
            a.eval(p).max(b.eval(p))
        })
    }

    pub fn intersect(&self, other: &Sdf2) -> Sdf2 {
        let (a, b) = (self.clone(), other.clone());
        Sdf2::new(self.bounds.intersect(&other.bounds), move |p| {
            a.eval(p).min(b.eval(p))
        })
    }

    /// `min(a, -b)`; keeps the minuend's bounds.
    pub fn subtract(&self, other: &Sdf2) -> Sdf2 {
        let (a, b) = (self.clone(), other.clone());
        Sdf2::new(self.bounds, move |p| a.eval(p).min(-b.eval(p)))
    }

    /// Shrink the shape by `delta` (negative `delta` grows it).
    pub fn inset(&self, delta: f64) -> Sdf2 {
        let inner = self.clone();
        Sdf2::new(self.bounds.shrunk(delta), move |p| inner.eval(p) - delta)
    }

    /// Transform the field. `dist_scale` rescales the reported distances and
    /// must match the map's uniform scale factor (1 for rigid motions).
    pub fn transformed(&self, map: &Affine2, dist_scale: f64) -> Option<Sdf2> {
        let inv = map.try_inverse()?;
        let inner = self.clone();
        Some(Sdf2::new(map.map_bounds(&self.bounds), move |p| {
            dist_scale * inner.eval(inv.apply(p))
        }))
    }

    /// Membership at the zero level set (surface counts as inside).
    pub fn threshold(&self) -> Solid2 {
        let inner = self.clone();
        Solid2::new(self.bounds, move |p| inner.eval(p) >= 0.0)
    }
}

impl Sdf3 {
    pub fn new(
        bounds: Bounds3,
        field: impl Fn(Point3<f64>) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Sdf3 { bounds, field: Arc::new(field) }
    }

    pub fn bounds(&self) -> Bounds3 {
        self.bounds
    }

    pub fn eval(&self, p: Point3<f64>) -> f64 {
        (self.field)(p)
    }

    pub fn join(&self, other: &Sdf3) -> Sdf3 {
        let (a, b) = (self.clone(), other.clone());
        Sdf3::new(self.bounds.union(&other.bounds), move |p| {
            a.eval(p).max(b.eval(p))
        })
    }

    pub fn intersect(&self, other: &Sdf3) -> Sdf3 {
        let (a, b) = (self.clone(), other.clone());
        Sdf3::new(self.bounds.intersect(&other.bounds), move |p| {
            a.eval(p).min(b.eval(p))
        })
    }

    pub fn subtract(&self, other: &Sdf3) -> Sdf3 {
        let (a, b) = (self.clone(), other.clone());
        Sdf3::new(self.bounds, move |p| a.eval(p).min(-b.eval(p)))
    }

    pub fn inset(&self, delta: f64) -> Sdf3 {
        let inner = self.clone();
        Sdf3::new(self.bounds.shrunk(delta), move |p| inner.eval(p) - delta)
    }

    pub fn transformed(&self, map: &Affine3, dist_scale: f64) -> Option<Sdf3> {
        let inv = map.try_inverse()?;
        let inner = self.clone();
        Some(Sdf3::new(map.map_bounds(&self.bounds), move |p| {
            dist_scale * inner.eval(inv.apply(p))
        }))
    }

    pub fn threshold(&self) -> Solid3 {
        let inner = self.clone();
        Solid3::new(self.bounds, move |p| inner.eval(p) >= 0.0)
    }
}
