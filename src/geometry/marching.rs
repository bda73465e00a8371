// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! Boundary extraction from membership tests.
//!
//! Both extractors sample the solid on a regular lattice of spacing `delta`,
//! padded by one cell so every boundary component is closed, then emit
//! segments (2D) or triangles (3D) wherever adjacent samples disagree.
//! Crossing points are refined by `subdiv` rounds of bisection between the
//! inside and outside sample, which only needs the membership predicate, not
//! a distance field.
//!
//! The 3D extractor decomposes each cube into six tetrahedra sharing the
//! main diagonal and runs marching tetrahedra on each; that trades a few more
//! triangles for case logic with no ambiguous configurations.

use crate::geometry::{Mesh2, Mesh3, Solid2, Solid3};
use nalgebra::{Point2, Point3};

pub fn marching_squares(solid: &Solid2, delta: f64, subdiv: u32) -> Mesh2 {
    let bounds = solid.bounds().expanded(delta);
    let (w, h) = bounds.size();
    let nx = cells(w, delta);
    let ny = cells(h, delta);

    let point = |i: usize, j: usize| {
        Point2::new(bounds.min.x + i as f64 * delta, bounds.min.y + j as f64 * delta)
    };

    // sample the whole lattice once
    let mut inside = vec![false; (nx + 1) * (ny + 1)];
    for j in 0..=ny {
        for i in 0..=nx {
            inside[j * (nx + 1) + i] = solid.contains(point(i, j));
        }
    }
    let at = |i: usize, j: usize| inside[j * (nx + 1) + i];

    let mut segments = Vec::new();
    for j in 0..ny {
        for i in 0..nx {
            // corners counter-clockwise from min
            let corners = [point(i, j), point(i + 1, j), point(i + 1, j + 1), point(i, j + 1)];
            let state = [at(i, j), at(i + 1, j), at(i + 1, j + 1), at(i, j + 1)];
            let mask = (state[0] as usize)
                | (state[1] as usize) << 1
                | (state[2] as usize) << 2
                | (state[3] as usize) << 3;

            // pairs of cut edges to join; edge k runs corner k -> k+1
            let pairs: &[(usize, usize)] = match mask {
                0 | 15 => &[],
                1 | 14 => &[(0, 3)],
                2 | 13 => &[(0, 1)],
                3 | 12 => &[(1, 3)],
                4 | 11 => &[(1, 2)],
                5 | 10 => &[(0, 1), (2, 3)],
                6 | 9 => &[(0, 2)],
                7 | 8 => &[(2, 3)],
                _ => unreachable!(),
            };
            for &(ea, eb) in pairs {
                let a = cross_point2(solid, corners[ea], corners[(ea + 1) % 4], state[ea], subdiv);
                let b = cross_point2(solid, corners[eb], corners[(eb + 1) % 4], state[eb], subdiv);
                segments.push([a, b]);
            }
        }
    }
    Mesh2::new(segments)
}

pub fn marching_cubes(solid: &Solid3, delta: f64, subdiv: u32) -> Mesh3 {
    // cube corner c: bit0 -> +x, bit1 -> +y, bit2 -> +z; all six tetrahedra
    // share the 0-7 diagonal
    const TETS: [[usize; 4]; 6] = [
        [0, 5, 1, 7],
        [0, 1, 3, 7],
        [0, 3, 2, 7],
        [0, 2, 6, 7],
        [0, 6, 4, 7],
        [0, 4, 5, 7],
    ];

    let bounds = solid.bounds().expanded(delta);
    let (w, h, d) = bounds.size();
    let nx = cells(w, delta);
    let ny = cells(h, delta);
    let nz = cells(d, delta);

    let point = |i: usize, j: usize, k: usize| {
        Point3::new(
            bounds.min.x + i as f64 * delta,
            bounds.min.y + j as f64 * delta,
            bounds.min.z + k as f64 * delta,
        )
    };

    let slab = |k: usize| {
        let mut s = vec![false; (nx + 1) * (ny + 1)];
        for j in 0..=ny {
            for i in 0..=nx {
                s[j * (nx + 1) + i] = solid.contains(point(i, j, k));
            }
        }
        s
    };

    let mut triangles = Vec::new();
    let mut lower = slab(0);
    for k in 0..nz {
        let upper = slab(k + 1);
        for j in 0..ny {
            for i in 0..nx {
                let mut corner_p = [Point3::origin(); 8];
                let mut corner_in = [false; 8];
                for c in 0..8 {
                    let (di, dj, dk) = (c & 1, (c >> 1) & 1, (c >> 2) & 1);
                    corner_p[c] = point(i + di, j + dj, k + dk);
                    let s = if dk == 0 { &lower } else { &upper };
                    corner_in[c] = s[(j + dj) * (nx + 1) + i + di];
                }
                for tet in &TETS {
                    march_tet(solid, tet.map(|c| corner_p[c]), tet.map(|c| corner_in[c]), subdiv, &mut triangles);
                }
            }
        }
        lower = upper;
    }
    Mesh3::new(triangles)
}

fn march_tet(
    solid: &Solid3,
    p: [Point3<f64>; 4],
    inside: [bool; 4],
    subdiv: u32,
    out: &mut Vec<[Point3<f64>; 3]>,
) {
    let count = inside.iter().filter(|&&b| b).count();
    let edge = |a: usize, b: usize| cross_point3(solid, p[a], p[b], inside[a], subdiv);

    match count {
        0 | 4 => {}
        1 | 3 => {
            // one vertex on its own side: single triangle
            let lone = if count == 1 {
                inside.iter().position(|&b| b).unwrap()
            } else {
                inside.iter().position(|&b| !b).unwrap()
            };
            let others: Vec<usize> = (0..4).filter(|&v| v != lone).collect();
            out.push([edge(lone, others[0]), edge(lone, others[1]), edge(lone, others[2])]);
        }
        2 => {
            // two vs two: a quad through the four cut edges
            let ins: Vec<usize> = (0..4).filter(|&v| inside[v]).collect();
            let outs: Vec<usize> = (0..4).filter(|&v| !inside[v]).collect();
            let q = [
                edge(ins[0], outs[0]),
                edge(ins[0], outs[1]),
                edge(ins[1], outs[1]),
                edge(ins[1], outs[0]),
            ];
            out.push([q[0], q[1], q[2]]);
            out.push([q[0], q[2], q[3]]);
        }
        _ => unreachable!(),
    }
}

fn cross_point2(
    solid: &Solid2,
    a: Point2<f64>,
    b: Point2<f64>,
    a_inside: bool,
    subdiv: u32,
) -> Point2<f64> {
    let (mut inside, mut outside) = if a_inside { (a, b) } else { (b, a) };
    for _ in 0..subdiv {
        let mid = Point2::from((inside.coords + outside.coords) * 0.5);
        if solid.contains(mid) {
            inside = mid;
        } else {
            outside = mid;
        }
    }
    Point2::from((inside.coords + outside.coords) * 0.5)
}

fn cross_point3(
    solid: &Solid3,
    a: Point3<f64>,
    b: Point3<f64>,
    a_inside: bool,
    subdiv: u32,
) -> Point3<f64> {
    let (mut inside, mut outside) = if a_inside { (a, b) } else { (b, a) };
    for _ in 0..subdiv {
        let mid = Point3::from((inside.coords + outside.coords) * 0.5);
        if solid.contains(mid) {
            inside = mid;
        } else {
            outside = mid;
        }
    }
    Point3::from((inside.coords + outside.coords) * 0.5)
}

fn cells(extent: f64, delta: f64) -> usize {
    ((extent / delta).ceil() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitives::{circle_solid, sphere_solid};
    use approx::assert_relative_eq;

    #[test]
    fn test_squares_circle_vertices_near_radius() {
        let mesh = marching_squares(&circle_solid(1.0), 0.05, 10);
        assert!(!mesh.is_empty());
        for [a, b] in &mesh.segments {
            for p in [a, b] {
                assert_relative_eq!(p.coords.norm(), 1.0, epsilon = 0.01);
            }
        }
    }

    #[test]
    fn test_squares_round_trip_membership() {
        let mesh = marching_squares(&circle_solid(1.0), 0.05, 10);
        let back = mesh.to_solid();
        assert!(back.contains(Point2::new(0.0, 0.0)));
        assert!(back.contains(Point2::new(0.7, 0.0)));
        assert!(!back.contains(Point2::new(0.99, 0.99)));
    }

    #[test]
    fn test_cubes_sphere_vertices_near_radius() {
        let mesh = marching_cubes(&sphere_solid(1.0), 0.25, 10);
        assert!(!mesh.is_empty());
        for tri in &mesh.triangles {
            for p in tri {
                assert_relative_eq!(p.coords.norm(), 1.0, epsilon = 0.05);
            }
        }
    }

    #[test]
    fn test_cubes_round_trip_membership() {
        let mesh = marching_cubes(&sphere_solid(1.0), 0.2, 8);
        let back = mesh.to_solid();
        assert!(back.contains(Point3::new(0.0, 0.0, 0.0)));
        assert!(back.contains(Point3::new(0.5, 0.0, 0.0)));
        assert!(!back.contains(Point3::new(0.9, 0.9, 0.9)));
    }
}
