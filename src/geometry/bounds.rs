// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! Axis-aligned bounding boxes.

use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds2 {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds3 {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Bounds2 {
    pub fn new(min: Point2<f64>, max: Point2<f64>) -> Self {
        Bounds2 { min, max }
    }

    pub fn contains(&self, p: Point2<f64>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn union(&self, other: &Bounds2) -> Bounds2 {
        Bounds2 {
            min: Point2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Intersection of two boxes. An axis whose interval becomes inverted is
    /// collapsed to its midpoint, never left with min > max.
    pub fn intersect(&self, other: &Bounds2) -> Bounds2 {
        let (min_x, max_x) = clamp_axis(
            self.min.x.max(other.min.x),
            self.max.x.min(other.max.x),
        );
        let (min_y, max_y) = clamp_axis(
            self.min.y.max(other.min.y),
            self.max.y.min(other.max.y),
        );
        Bounds2 { min: Point2::new(min_x, min_y), max: Point2::new(max_x, max_y) }
    }

    /// Shrink by `delta` on every side, collapsing inverted axes to their
    /// midpoints.
    pub fn shrunk(&self, delta: f64) -> Bounds2 {
        let (min_x, max_x) = clamp_axis(self.min.x + delta, self.max.x - delta);
        let (min_y, max_y) = clamp_axis(self.min.y + delta, self.max.y - delta);
        Bounds2 { min: Point2::new(min_x, min_y), max: Point2::new(max_x, max_y) }
    }

    pub fn expanded(&self, delta: f64) -> Bounds2 {
        self.shrunk(-delta)
    }

    pub fn size(&self) -> (f64, f64) {
        (self.max.x - self.min.x, self.max.y - self.min.y)
    }

    /// Largest distance from the origin to any corner.
    pub fn max_corner_radius(&self) -> f64 {
        let mut r: f64 = 0.0;
        for &x in &[self.min.x, self.max.x] {
            for &y in &[self.min.y, self.max.y] {
                r = r.max(x.hypot(y));
            }
        }
        r
    }
}

impl Bounds3 {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Bounds3 { min, max }
    }

    pub fn contains(&self, p: Point3<f64>) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    pub fn union(&self, other: &Bounds3) -> Bounds3 {
        Bounds3 {
            min: Point3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    pub fn intersect(&self, other: &Bounds3) -> Bounds3 {
        let (min_x, max_x) = clamp_axis(
            self.min.x.max(other.min.x),
            self.max.x.min(other.max.x),
        );
        let (min_y, max_y) = clamp_axis(
            self.min.y.max(other.min.y),
            self.max.y.min(other.max.y),
        );
        let (min_z, max_z) = clamp_axis(
            self.min.z.max(other.min.z),
            self.max.z.min(other.max.z),
        );
        Bounds3 {
            min: Point3::new(min_x, min_y, min_z),
            max: Point3::new(max_x, max_y, max_z),
        }
    }

    pub fn shrunk(&self, delta: f64) -> Bounds3 {
        let (min_x, max_x) = clamp_axis(self.min.x + delta, self.max.x - delta);
        let (min_y, max_y) = clamp_axis(self.min.y + delta, self.max.y - delta);
        let (min_z, max_z) = clamp_axis(self.min.z + delta, self.max.z - delta);
        Bounds3 {
            min: Point3::new(min_x, min_y, min_z),
            max: Point3::new(max_x, max_y, max_z),
        }
    }

    pub fn expanded(&self, delta: f64) -> Bounds3 {
        self.shrunk(-delta)
    }

    pub fn size(&self) -> (f64, f64, f64) {
        (
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        )
    }
}

fn clamp_axis(min: f64, max: f64) -> (f64, f64) {
    if min > max {
        let mid = 0.5 * (min + max);
        (mid, mid)
    } else {
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_union_and_intersect() {
        let a = Bounds2::new(Point2::new(0.0, 0.0), Point2::new(2.0, 2.0));
        let b = Bounds2::new(Point2::new(1.0, -1.0), Point2::new(3.0, 1.0));
        let u = a.union(&b);
        assert_eq!(u.min, Point2::new(0.0, -1.0));
        assert_eq!(u.max, Point2::new(3.0, 2.0));
        let i = a.intersect(&b);
        assert_eq!(i.min, Point2::new(1.0, 0.0));
        assert_eq!(i.max, Point2::new(2.0, 1.0));
    }

    #[test]
    fn test_disjoint_intersection_collapses_to_midpoint() {
        let a = Bounds2::new(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0));
        let b = Bounds2::new(Point2::new(3.0, 0.0), Point2::new(4.0, 1.0));
        let i = a.intersect(&b);
        assert_relative_eq!(i.min.x, 2.0);
        assert_relative_eq!(i.max.x, 2.0);
    }

    #[test]
    fn test_shrunk_collapses_thin_axis() {
        let b = Bounds3::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 10.0, 10.0));
        let s = b.shrunk(2.0);
        assert_relative_eq!(s.min.x, 0.5);
        assert_relative_eq!(s.max.x, 0.5);
        assert_relative_eq!(s.min.y, 2.0);
        assert_relative_eq!(s.max.y, 8.0);
    }

    #[test]
    fn test_max_corner_radius() {
        let b = Bounds2::new(Point2::new(-1.0, -1.0), Point2::new(3.0, 4.0));
        assert_relative_eq!(b.max_corner_radius(), 5.0);
    }
}
