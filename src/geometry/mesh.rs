// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! Explicit boundary meshes: line segments in 2D, triangles in 3D.
//!
//! Meshes support affine transforms directly (vertices are mapped, no inverse
//! needed) and convert back to the implicit representations: membership by
//! ray-crossing parity, signed distance by closest-feature search with the
//! parity sign.

use crate::geometry::{Affine2, Affine3, Bounds2, Bounds3, Sdf2, Sdf3, Solid2, Solid3};
use nalgebra::{Point2, Point3, Vector3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mesh2 {
    pub segments: Vec<[Point2<f64>; 2]>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mesh3 {
    pub triangles: Vec<[Point3<f64>; 3]>,
}

impl Mesh2 {
    pub fn new(segments: Vec<[Point2<f64>; 2]>) -> Self {
        Mesh2 { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn bounds(&self) -> Bounds2 {
        if self.segments.is_empty() {
            return Bounds2::new(Point2::origin(), Point2::origin());
        }
        let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for seg in &self.segments {
            for p in seg {
                min.x = min.x.min(p.x);
                min.y = min.y.min(p.y);
                max.x = max.x.max(p.x);
                max.y = max.y.max(p.y);
            }
        }
        Bounds2::new(min, max)
    }

    pub fn transformed(&self, map: &Affine2) -> Mesh2 {
        Mesh2 {
            segments: self
                .segments
                .iter()
                .map(|[a, b]| [map.apply(*a), map.apply(*b)])
                .collect(),
        }
    }

    /// Membership by even-odd parity of crossings along a +x ray.
    ///
    /// A segment counts when its endpoints straddle the ray's y (half-open,
    /// so a shared vertex is counted once) and the intersection lies strictly
    /// right of the query point. Coincident duplicate edges cancel in pairs,
    /// matching the even-odd fill rule.
    pub fn to_solid(&self) -> Solid2 {
        let segments = self.segments.clone();
        Solid2::new(self.bounds(), move |p| {
            let mut inside = false;
            for [a, b] in &segments {
                if (a.y > p.y) != (b.y > p.y) {
                    let t = (p.y - a.y) / (b.y - a.y);
                    let x = a.x + t * (b.x - a.x);
                    if x > p.x {
                        inside = !inside;
                    }
                }
            }
            inside
        })
    }

    /// Signed distance to the closest segment, positive inside by parity.
    pub fn to_sdf(&self) -> Sdf2 {
        let segments = self.segments.clone();
        let solid = self.to_solid();
        Sdf2::new(self.bounds(), move |p| {
            let mut d2 = f64::INFINITY;
            for [a, b] in &segments {
                d2 = d2.min(dist2_point_segment(p, *a, *b));
            }
            let d = d2.sqrt();
            if solid.contains(p) {
                d
            } else {
                -d
            }
        })
    }
}

impl Mesh3 {
    pub fn new(triangles: Vec<[Point3<f64>; 3]>) -> Self {
        Mesh3 { triangles }
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn bounds(&self) -> Bounds3 {
        if self.triangles.is_empty() {
            return Bounds3::new(Point3::origin(), Point3::origin());
        }
        let mut min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
        let mut max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
        for tri in &self.triangles {
            for p in tri {
                min.x = min.x.min(p.x);
                min.y = min.y.min(p.y);
                min.z = min.z.min(p.z);
                max.x = max.x.max(p.x);
                max.y = max.y.max(p.y);
                max.z = max.z.max(p.z);
            }
        }
        Bounds3::new(min, max)
    }

    pub fn transformed(&self, map: &Affine3) -> Mesh3 {
        Mesh3 {
            triangles: self
                .triangles
                .iter()
                .map(|[a, b, c]| [map.apply(*a), map.apply(*b), map.apply(*c)])
                .collect(),
        }
    }

    /// Membership by ray parity against the triangle soup.
    ///
    /// The ray direction is a fixed, deliberately non-axis-aligned unit
    /// vector so that queries on the lattice points a sampler visits do not
    /// graze vertices or edges.
    pub fn to_solid(&self) -> Solid3 {
        let triangles = self.triangles.clone();
        let dir = ray_direction();
        Solid3::new(self.bounds(), move |p| {
            let mut crossings = 0u32;
            for tri in &triangles {
                if ray_hits_triangle(p, dir, tri) {
                    crossings += 1;
                }
            }
            crossings % 2 == 1
        })
    }

    /// Signed distance to the closest triangle, positive inside by parity.
    pub fn to_sdf(&self) -> Sdf3 {
        let triangles = self.triangles.clone();
        let solid = self.to_solid();
        Sdf3::new(self.bounds(), move |p| {
            let mut d2 = f64::INFINITY;
            for tri in &triangles {
                d2 = d2.min(dist2_point_triangle(p, tri));
            }
            let d = d2.sqrt();
            if solid.contains(p) {
                d
            } else {
                -d
            }
        })
    }
}

fn dist2_point_segment(p: Point2<f64>, a: Point2<f64>, b: Point2<f64>) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    let t = if len2 == 0.0 {
        0.0
    } else {
        ((p - a).dot(&ab) / len2).clamp(0.0, 1.0)
    };
    (p - (a + ab * t)).norm_squared()
}

/// Squared distance from a point to a triangle (closest-feature walk).
fn dist2_point_triangle(p: Point3<f64>, tri: &[Point3<f64>; 3]) -> f64 {
    let [a, b, c] = *tri;
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;

    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return ap.norm_squared(); // vertex a
    }

    let bp = p - b;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);
    if d3 >= 0.0 && d4 <= d3 {
        return bp.norm_squared(); // vertex b
    }

    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let t = d1 / (d1 - d3);
        return (ap - ab * t).norm_squared(); // edge ab
    }

    let cp = p - c;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);
    if d6 >= 0.0 && d5 <= d6 {
        return cp.norm_squared(); // vertex c
    }

    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let t = d2 / (d2 - d6);
        return (ap - ac * t).norm_squared(); // edge ac
    }

    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let t = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return (bp - (c - b) * t).norm_squared(); // edge bc
    }

    // interior
    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;
    (ap - (ab * v + ac * w)).norm_squared()
}

fn ray_direction() -> Vector3<f64> {
    // irrational component ratios keep the ray off mesh vertices and edges
    Vector3::new(0.504_818_825_631_803, 0.661_620_590_118_401, 0.554_913_356_291_71).normalize()
}

/// Moller-Trumbore, counting only forward hits.
fn ray_hits_triangle(origin: Point3<f64>, dir: Vector3<f64>, tri: &[Point3<f64>; 3]) -> bool {
    const EPS: f64 = 1e-12;
    let [a, b, c] = *tri;
    let e1 = b - a;
    let e2 = c - a;
    let pv = dir.cross(&e2);
    let det = e1.dot(&pv);
    if det.abs() < EPS {
        return false;
    }
    let inv_det = 1.0 / det;
    let tv = origin - a;
    let u = tv.dot(&pv) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return false;
    }
    let qv = tv.cross(&e1);
    let v = dir.dot(&qv) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return false;
    }
    let t = e2.dot(&qv) * inv_det;
    t > EPS
}
