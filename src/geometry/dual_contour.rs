// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! Dual contouring over a membership lattice.
//!
//! Where marching cubes places vertices on cell edges, dual contouring
//! places one vertex inside each cell that the surface passes through (here
//! the mean of the cell's refined edge crossings) and emits a quad around
//! every lattice edge whose endpoints disagree. The result has better vertex
//! distribution on flat regions at the cost of occasional self-intersections,
//! which `clip` and `repair` mitigate.

use crate::geometry::{Mesh3, Solid3};
use ahash::AHashMap;
use nalgebra::{Point3, Vector3};

const REFINE_STEPS: u32 = 8;
const DEGENERATE_AREA: f64 = 1e-12;

#[derive(Debug, Clone, Copy, Default)]
pub struct DualContourOptions {
    /// Clamp each cell vertex into its own cell.
    pub clip: bool,
    /// Drop zero-area triangles from the output.
    pub repair: bool,
}

pub fn dual_contour(solid: &Solid3, delta: f64, opts: DualContourOptions) -> Mesh3 {
    let bounds = solid.bounds().expanded(delta);
    let (w, h, d) = bounds.size();
    let nx = ((w / delta).ceil() as usize).max(1);
    let ny = ((h / delta).ceil() as usize).max(1);
    let nz = ((d / delta).ceil() as usize).max(1);

    let point = |i: usize, j: usize, k: usize| {
        Point3::new(
            bounds.min.x + i as f64 * delta,
            bounds.min.y + j as f64 * delta,
            bounds.min.z + k as f64 * delta,
        )
    };

    let mut inside = vec![false; (nx + 1) * (ny + 1) * (nz + 1)];
    let idx = |i: usize, j: usize, k: usize| (k * (ny + 1) + j) * (nx + 1) + i;
    for k in 0..=nz {
        for j in 0..=ny {
            for i in 0..=nx {
                inside[idx(i, j, k)] = solid.contains(point(i, j, k));
            }
        }
    }
    let at = |i: usize, j: usize, k: usize| inside[idx(i, j, k)];

    let mut cell_verts: AHashMap<(usize, usize, usize), Point3<f64>> = AHashMap::new();
    let mut vertex_for = |cell: (usize, usize, usize),
                          cell_verts: &mut AHashMap<(usize, usize, usize), Point3<f64>>|
     -> Point3<f64> {
        if let Some(&v) = cell_verts.get(&cell) {
            return v;
        }
        let (ci, cj, ck) = cell;
        let mut sum = Vector3::zeros();
        let mut n = 0usize;
        // all 12 cell edges; corner bit order x, y, z
        for c in 0..8usize {
            let (di, dj, dk) = (c & 1, (c >> 1) & 1, (c >> 2) & 1);
            for axis in 0..3 {
                let (ei, ej, ek) = match axis {
                    0 if di == 0 => (1, 0, 0),
                    1 if dj == 0 => (0, 1, 0),
                    2 if dk == 0 => (0, 0, 1),
                    _ => continue,
                };
                let a = (ci + di, cj + dj, ck + dk);
                let b = (a.0 + ei, a.1 + ej, a.2 + ek);
                let a_in = at(a.0, a.1, a.2);
                if a_in != at(b.0, b.1, b.2) {
                    let cp = refine_crossing(
                        solid,
                        point(a.0, a.1, a.2),
                        point(b.0, b.1, b.2),
                        a_in,
                    );
                    sum += cp.coords;
                    n += 1;
                }
            }
        }
        let mut v = if n > 0 {
            Point3::from(sum / n as f64)
        } else {
            Point3::from((point(ci, cj, ck).coords + point(ci + 1, cj + 1, ck + 1).coords) * 0.5)
        };
        if opts.clip {
            let lo = point(ci, cj, ck);
            let hi = point(ci + 1, cj + 1, ck + 1);
            v = Point3::new(
                v.x.clamp(lo.x, hi.x),
                v.y.clamp(lo.y, hi.y),
                v.z.clamp(lo.z, hi.z),
            );
        }
        cell_verts.insert(cell, v);
        v
    };

    let mut triangles = Vec::new();
    let mut emit_quad = |cells: [(usize, usize, usize); 4],
                         cell_verts: &mut AHashMap<(usize, usize, usize), Point3<f64>>,
                         triangles: &mut Vec<[Point3<f64>; 3]>| {
        let q: Vec<Point3<f64>> = cells.iter().map(|&c| vertex_for(c, cell_verts)).collect();
        triangles.push([q[0], q[1], q[2]]);
        triangles.push([q[0], q[2], q[3]]);
    };

    // x-edges: interior in y and z thanks to the one-cell pad
    for k in 1..nz {
        for j in 1..ny {
            for i in 0..nx {
                if at(i, j, k) != at(i + 1, j, k) {
                    emit_quad(
                        [(i, j - 1, k - 1), (i, j, k - 1), (i, j, k), (i, j - 1, k)],
                        &mut cell_verts,
                        &mut triangles,
                    );
                }
            }
        }
    }
    // y-edges
    for k in 1..nz {
        for j in 0..ny {
            for i in 1..nx {
                if at(i, j, k) != at(i, j + 1, k) {
                    emit_quad(
                        [(i - 1, j, k - 1), (i, j, k - 1), (i, j, k), (i - 1, j, k)],
                        &mut cell_verts,
                        &mut triangles,
                    );
                }
            }
        }
    }
    // z-edges
    for k in 0..nz {
        for j in 1..ny {
            for i in 1..nx {
                if at(i, j, k) != at(i, j, k + 1) {
                    emit_quad(
                        [(i - 1, j - 1, k), (i, j - 1, k), (i, j, k), (i - 1, j, k)],
                        &mut cell_verts,
                        &mut triangles,
                    );
                }
            }
        }
    }

    if opts.repair {
        triangles.retain(|[a, b, c]| (b - a).cross(&(c - a)).norm() > DEGENERATE_AREA);
    }
    Mesh3::new(triangles)
}

fn refine_crossing(
    solid: &Solid3,
    a: Point3<f64>,
    b: Point3<f64>,
    a_inside: bool,
) -> Point3<f64> {
    let (mut inside, mut outside) = if a_inside { (a, b) } else { (b, a) };
    for _ in 0..REFINE_STEPS {
        let mid = Point3::from((inside.coords + outside.coords) * 0.5);
        if solid.contains(mid) {
            inside = mid;
        } else {
            outside = mid;
        }
    }
    Point3::from((inside.coords + outside.coords) * 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitives::sphere_solid;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_vertices_near_surface() {
        let mesh = dual_contour(&sphere_solid(1.0), 0.25, DualContourOptions::default());
        assert!(!mesh.is_empty());
        for tri in &mesh.triangles {
            for p in tri {
                assert_relative_eq!(p.coords.norm(), 1.0, epsilon = 0.2);
            }
        }
    }

    #[test]
    fn test_clip_keeps_vertices_in_grid() {
        let opts = DualContourOptions { clip: true, repair: false };
        let mesh = dual_contour(&sphere_solid(1.0), 0.25, opts);
        let b = sphere_solid(1.0).bounds().expanded(0.25);
        for tri in &mesh.triangles {
            for p in tri {
                assert!(b.contains(*p));
            }
        }
    }

    #[test]
    fn test_repair_drops_degenerate_triangles() {
        let opts = DualContourOptions { clip: false, repair: true };
        let mesh = dual_contour(&sphere_solid(1.0), 0.3, opts);
        for [a, b, c] in &mesh.triangles {
            assert!((b - a).cross(&(c - a)).norm() > DEGENERATE_AREA);
        }
    }

    #[test]
    fn test_round_trip_membership() {
        let mesh = dual_contour(&sphere_solid(1.0), 0.2, DualContourOptions::default());
        let back = mesh.to_solid();
        assert!(back.contains(Point3::new(0.0, 0.0, 0.0)));
        assert!(!back.contains(Point3::new(0.95, 0.95, 0.95)));
    }
}
