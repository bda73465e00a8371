// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! Function-backed solids: a membership predicate plus bounds.
//!
//! The predicate is only consulted for points inside the bounds; everything
//! outside is reported as outside without invoking it. Boolean composition is
//! pointwise, so deep CSG trees cost one closure hop per level.

use crate::geometry::{Affine2, Affine3, Bounds2, Bounds3};
use nalgebra::{Point2, Point3};
use std::sync::Arc;

type Pred2 = Arc<dyn Fn(Point2<f64>) -> bool + Send + Sync>;
type Pred3 = Arc<dyn Fn(Point3<f64>) -> bool + Send + Sync>;

#[derive(Clone)]
pub struct Solid2 {
    bounds: Bounds2,
    pred: Pred2,
}

#[derive(Clone)]
pub struct Solid3 {
    bounds: Bounds3,
    pred: Pred3,
}

impl std::fmt::Debug for Solid2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solid2").field("bounds", &self.bounds).finish_non_exhaustive()
    }
}

impl std::fmt::Debug for Solid3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Solid3").field("bounds", &self.bounds).finish_non_exhaustive()
    }
}

impl Solid2 {
    pub fn new(
        bounds: Bounds2,
        pred: impl Fn(Point2<f64>) -> bool + Send + Sync + 'static,
    ) -> Self {
        Solid2 { bounds, pred: Arc::new(pred) }
    }

    pub fn bounds(&self) -> Bounds2 {
        self.bounds
    }

    pub fn contains(&self, p: Point2<f64>) -> bool {
        self.bounds.contains(p) && (self.pred)(p)
    }

    pub fn join(&self, other: &Solid2) -> Solid2 {
        let (a, b) = (self.clone(), other.clone());
        Solid2::new(self.bounds.union(&other.bounds), move |p| {
            a.contains(p) || b.contains(p)
        })
    }

    pub fn intersect(&self, other: &Solid2) -> Solid2 {
        let (a, b) = (self.clone(), other.clone());
        Solid2::new(self.bounds.intersect(&other.bounds), move |p| {
            a.contains(p) && b.contains(p)
        })
    }

    pub fn subtract(&self, other: &Solid2) -> Solid2 {
        let (a, b) = (self.clone(), other.clone());
        Solid2::new(self.bounds, move |p| a.contains(p) && !b.contains(p))
    }

    /// Image of this solid under `map`, or `None` when `map` is singular.
    pub fn transformed(&self, map: &Affine2) -> Option<Solid2> {
        let inv = map.try_inverse()?;
        let inner = self.clone();
        Some(Solid2::new(map.map_bounds(&self.bounds), move |p| {
            inner.contains(inv.apply(p))
        }))
    }
}

impl Solid3 {
    pub fn new(
        bounds: Bounds3,
        pred: impl Fn(Point3<f64>) -> bool + Send + Sync + 'static,
    ) -> Self {
        Solid3 { bounds, pred: Arc::new(pred) }
    }

    pub fn bounds(&self) -> Bounds3 {
        self.bounds
    }

    pub fn contains(&self, p: Point3<f64>) -> bool {
        self.bounds.contains(p) && (self.pred)(p)
    }

    pub fn join(&self, other: &Solid3) -> Solid3 {
        let (a, b) = (self.clone(), other.clone());
        Solid3::new(self.bounds.union(&other.bounds), move |p| {
            a.contains(p) || b.contains(p)
        })
    }

    pub fn intersect(&self, other: &Solid3) -> Solid3 {
        let (a, b) = (self.clone(), other.clone());
        Solid3::new(self.bounds.intersect(&other.bounds), move |p| {
            a.contains(p) && b.contains(p)
        })
    }

    pub fn subtract(&self, other: &Solid3) -> Solid3 {
        let (a, b) = (self.clone(), other.clone());
        Solid3::new(self.bounds, move |p| a.contains(p) && !b.contains(p))
    }

    pub fn transformed(&self, map: &Affine3) -> Option<Solid3> {
        let inv = map.try_inverse()?;
        let inner = self.clone();
        Some(Solid3::new(map.map_bounds(&self.bounds), move |p| {
            inner.contains(inv.apply(p))
        }))
    }
}
