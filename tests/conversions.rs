// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! Agreement between the three representations: membership solids, signed
//! distance fields, and extracted meshes.

use approx::assert_relative_eq;
use implicad::{evaluate_source, ShapeRep};
use nalgebra::{Point2, Point3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn shape(src: &str) -> ShapeRep {
    evaluate_source(src).unwrap_or_else(|e| panic!("evaluation failed: {e}"))
}

#[test]
fn test_sphere_sdf_matches_solid() {
    let ShapeRep::Solid3(solid) = shape("sphere(2);") else { panic!("expected solid") };
    let ShapeRep::Sdf3(sdf) = shape("sphere_sdf(2);") else { panic!("expected sdf") };

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let p = Point3::new(rng.gen_range(-3.0..3.0), rng.gen_range(-3.0..3.0), rng.gen_range(-3.0..3.0));
        let d = sdf.eval(p);
        if d.abs() < 1e-9 {
            continue; // exact boundary ties are unspecified
        }
        assert_eq!(solid.contains(p), d > 0.0, "disagree at {p}, d = {d}");
    }
}

#[test]
fn test_cube_sdf_matches_solid() {
    let ShapeRep::Solid3(solid) = shape("cube([2, 3, 1], center=true);") else {
        panic!("expected solid")
    };
    let ShapeRep::Sdf3(sdf) = shape("cube_sdf([2, 3, 1], center=true);") else {
        panic!("expected sdf")
    };

    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..500 {
        let p = Point3::new(rng.gen_range(-2.0..2.0), rng.gen_range(-2.5..2.5), rng.gen_range(-1.0..1.0));
        let d = sdf.eval(p);
        if d.abs() < 1e-9 {
            continue;
        }
        assert_eq!(solid.contains(p), d > 0.0, "disagree at {p}, d = {d}");
    }
}

#[test]
fn test_solid_thresholds_sdf() {
    let ShapeRep::Solid3(s) = shape("solid() sphere_sdf(2);") else { panic!("expected solid") };
    assert!(s.contains(Point3::new(1.9, 0.0, 0.0)));
    assert!(!s.contains(Point3::new(2.1, 0.0, 0.0)));
}

#[test]
fn test_sdf_csg_membership() {
    let src = "difference() { sphere_sdf(2); sphere_sdf(1); }";
    let ShapeRep::Sdf3(sdf) = shape(src) else { panic!("expected sdf") };
    assert!(sdf.eval(Point3::new(1.5, 0.0, 0.0)) > 0.0);
    assert!(sdf.eval(Point3::new(0.5, 0.0, 0.0)) < 0.0);
    assert!(sdf.eval(Point3::new(2.5, 0.0, 0.0)) < 0.0);
}

#[test]
fn test_marching_squares_round_trip() {
    let src = "solid() marching_squares(delta=0.05, subdiv=10) circle(1);";
    let ShapeRep::Solid2(s) = shape(src) else { panic!("expected 2d solid") };
    // points comfortably away from the boundary survive the round trip
    assert!(s.contains(Point2::new(0.0, 0.0)));
    assert!(s.contains(Point2::new(0.7, 0.0)));
    assert!(s.contains(Point2::new(0.5, 0.5)));
    assert!(!s.contains(Point2::new(0.9, 0.9)));
    assert!(!s.contains(Point2::new(1.2, 0.0)));
}

#[test]
fn test_marching_cubes_round_trip() {
    let src = "solid() marching_cubes(delta=0.2, subdiv=8) sphere(1);";
    let ShapeRep::Solid3(s) = shape(src) else { panic!("expected solid") };
    assert!(s.contains(Point3::new(0.0, 0.0, 0.0)));
    assert!(s.contains(Point3::new(0.5, 0.0, 0.0)));
    assert!(!s.contains(Point3::new(0.9, 0.9, 0.9)));
}

#[test]
fn test_dual_contour_round_trip() {
    let src = "solid() dual_contour(delta=0.2, repair=true, clip=true) sphere(1);";
    let ShapeRep::Solid3(s) = shape(src) else { panic!("expected solid") };
    assert!(s.contains(Point3::new(0.0, 0.0, 0.0)));
    assert!(!s.contains(Point3::new(1.2, 0.0, 0.0)));
}

#[test]
fn test_mesh_to_sdf_distances() -> anyhow::Result<()> {
    let src = "mesh_to_sdf() marching_cubes(delta=0.25, subdiv=10) sphere(1);";
    let ShapeRep::Sdf3(sdf) = evaluate_source(src)? else {
        anyhow::bail!("expected a 3d sdf");
    };
    assert_relative_eq!(sdf.eval(Point3::new(0.0, 0.0, 0.0)), 1.0, epsilon = 0.1);
    assert!(sdf.eval(Point3::new(0.5, 0.0, 0.0)) > 0.0);
    Ok(())
}

#[test]
fn test_inset_then_outset_restores_distance() {
    let ShapeRep::Sdf2(inset) = shape("inset_sdf(0.25) circle_sdf(1);") else {
        panic!("expected sdf")
    };
    assert_relative_eq!(inset.eval(Point2::new(0.0, 0.0)), 0.75);
    assert_relative_eq!(inset.eval(Point2::new(0.75, 0.0)), 0.0);

    let ShapeRep::Sdf2(round) = shape("outset_sdf(0.25) inset_sdf(0.25) circle_sdf(1);") else {
        panic!("expected sdf")
    };
    assert_relative_eq!(round.eval(Point2::new(0.0, 0.0)), 1.0);
}

#[test]
fn test_sdf_rejects_non_uniform_scale() {
    let err = evaluate_source("scale([2, 1, 1]) sphere_sdf(1);").unwrap_err();
    assert!(err.to_string().contains("non-uniform"));
    // uniform is fine and rescales distances
    let ShapeRep::Sdf3(sdf) = shape("scale([2, 2, 2]) sphere_sdf(1);") else {
        panic!("expected sdf")
    };
    assert_relative_eq!(sdf.eval(Point3::new(0.0, 0.0, 0.0)), 2.0);
}

#[test]
fn test_mesh_booleans_rejected() {
    let src = "union() { marching_cubes(delta=0.5) sphere(1); marching_cubes(delta=0.5) sphere(1); }";
    let err = evaluate_source(src).unwrap_err();
    assert!(err.to_string().contains("cannot union meshes"));
}

#[test]
fn test_solid_of_mesh_membership() {
    let src = "solid() marching_squares(delta=0.1, subdiv=8) square([2, 2]);";
    let ShapeRep::Solid2(s) = shape(src) else { panic!("expected 2d solid") };
    assert!(s.contains(Point2::new(1.0, 1.0)));
    assert!(!s.contains(Point2::new(2.5, 1.0)));
}
