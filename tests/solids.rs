// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! End-to-end scripts exercising CSG, transforms, user definitions, and
//! extrusion, checked by membership probes.

use implicad::geometry::{Solid2, Solid3};
use implicad::{evaluate_source, ShapeRep};
use nalgebra::Point3;

fn solid3(src: &str) -> Solid3 {
    match evaluate_source(src) {
        Ok(ShapeRep::Solid3(s)) => s,
        Ok(other) => panic!("expected a 3d solid, got {}", other.kind()),
        Err(e) => panic!("evaluation failed: {e}"),
    }
}

#[allow(dead_code)]
fn solid2(src: &str) -> Solid2 {
    match evaluate_source(src) {
        Ok(ShapeRep::Solid2(s)) => s,
        Ok(other) => panic!("expected a 2d solid, got {}", other.kind()),
        Err(e) => panic!("evaluation failed: {e}"),
    }
}

fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
    Point3::new(x, y, z)
}

#[test]
fn test_union_of_cubes() {
    let s = solid3("union() { cube(2); translate([3, 0, 0]) cube(2); }");
    assert!(s.contains(p(1.0, 1.0, 1.0)));
    assert!(s.contains(p(4.0, 1.0, 1.0)));
    assert!(!s.contains(p(2.5, 1.0, 1.0)));
}

#[test]
fn test_difference_cube_minus_sphere() {
    let s = solid3("difference() { cube([4, 4, 4]); translate([2, 2, 2]) sphere(1); }");
    assert!(s.contains(p(0.5, 0.5, 0.5)));
    assert!(s.contains(p(2.0, 2.0, 3.5)));
    assert!(!s.contains(p(2.0, 2.0, 2.0)));
    assert!(!s.contains(p(5.0, 2.0, 2.0)));
}

#[test]
fn test_intersection_of_offset_cubes() {
    let s = solid3("intersection() { cube(2); translate([1, 0, 0]) cube(2); }");
    assert!(s.contains(p(1.5, 1.0, 1.0)));
    assert!(!s.contains(p(0.5, 1.0, 1.0)));
    assert!(!s.contains(p(2.5, 1.0, 1.0)));
}

#[test]
fn test_translate_then_rotate() {
    // rotate 90 about z maps the box to x in [-2,0], y in [0,4]; the
    // translation then shifts it to x in [3,5]
    let s = solid3("translate([5, 0, 0]) rotate([0, 0, 90]) cube([4, 2, 1]);");
    assert!(s.contains(p(4.0, 2.0, 0.5)));
    assert!(s.contains(p(3.1, 0.1, 0.1)));
    assert!(!s.contains(p(6.0, 2.0, 0.5)));
    assert!(!s.contains(p(4.0, 2.0, 1.5)));
}

#[test]
fn test_rotate_axis_angle() {
    // 90 degrees about x sends +y to +z
    let s = solid3("rotate(a=90, v=[1, 0, 0]) translate([0, 3, 0]) sphere(1);");
    assert!(s.contains(p(0.0, 0.0, 3.0)));
    assert!(!s.contains(p(0.0, 3.0, 0.0)));
}

#[test]
fn test_scale_stretches_sphere() {
    let s = solid3("scale([2, 1, 1]) sphere(1);");
    assert!(s.contains(p(1.9, 0.0, 0.0)));
    assert!(s.contains(p(0.0, 0.9, 0.0)));
    assert!(!s.contains(p(0.0, 1.1, 0.0)));
}

#[test]
fn test_module_ring() {
    let src = "module ring(r, h) {\n\
               difference() { cylinder(h=h, r=r); cylinder(h=h, r=r-1); }\n\
               }\n\
               ring(5, 2);";
    let s = solid3(src);
    assert!(s.contains(p(4.5, 0.0, 1.0)));
    assert!(!s.contains(p(0.0, 0.0, 1.0)));
    assert!(!s.contains(p(5.5, 0.0, 1.0)));
}

#[test]
fn test_function_feeds_primitive() {
    let s = solid3("function double(x) = x * 2;\nsphere(double(2));");
    assert!(s.contains(p(3.9, 0.0, 0.0)));
    assert!(!s.contains(p(4.1, 0.0, 0.0)));
}

#[test]
fn test_child_scope_does_not_leak() {
    let src = "r = 1;\n\
               union() { r = 3; sphere(r); }\n\
               translate([10, 0, 0]) sphere(r);";
    let s = solid3(src);
    assert!(s.contains(p(2.5, 0.0, 0.0))); // inner r = 3
    assert!(s.contains(p(10.9, 0.0, 0.0))); // outer r still 1
    assert!(!s.contains(p(11.5, 0.0, 0.0)));
}

#[test]
fn test_linear_extrude_basic() {
    let s = solid3("linear_extrude(height=4) square([2, 2]);");
    assert!(s.contains(p(1.0, 1.0, 2.0)));
    assert!(!s.contains(p(1.0, 1.0, 4.5)));
    assert!(!s.contains(p(1.0, 1.0, -0.5)));
}

#[test]
fn test_linear_extrude_centered() {
    let s = solid3("linear_extrude(h=4, center=true) circle(1);");
    assert!(s.contains(p(0.0, 0.0, -1.9)));
    assert!(s.contains(p(0.0, 0.0, 1.9)));
    assert!(!s.contains(p(0.0, 0.0, 2.5)));
}

#[test]
fn test_linear_extrude_tapered() {
    let s = solid3("linear_extrude(height=2, scale=0.5) square([2, 2], center=true);");
    assert!(s.contains(p(0.9, 0.0, 0.1)));
    assert!(!s.contains(p(0.9, 0.0, 1.9))); // top cross-section has shrunk
    assert!(s.contains(p(0.4, 0.0, 1.9)));
}

#[test]
fn test_linear_extrude_twisted() {
    let s = solid3("linear_extrude(height=1, twist=90) square([2, 0.5], center=true);");
    assert!(s.contains(p(0.9, 0.0, 0.0)));
    assert!(!s.contains(p(0.0, 0.9, 0.0)));
    // at the top the long axis has turned onto y
    assert!(s.contains(p(0.0, 0.9, 1.0)));
    assert!(!s.contains(p(0.9, 0.0, 1.0)));
}

#[test]
fn test_rotate_extrude_full_torus() {
    let s = solid3("rotate_extrude() translate([3, 0, 0]) circle(1);");
    assert!(s.contains(p(3.0, 0.0, 0.0)));
    assert!(s.contains(p(0.0, 3.0, 0.0)));
    assert!(s.contains(p(-3.0, 0.0, 0.5)));
    assert!(!s.contains(p(0.0, 0.0, 0.0)));
    assert!(!s.contains(p(3.0, 0.0, 1.5)));
}

#[test]
fn test_rotate_extrude_quarter() {
    let s = solid3("rotate_extrude(angle=90) translate([3, 0, 0]) circle(1);");
    assert!(s.contains(p(3.0, 0.0, 0.0)));
    assert!(s.contains(p(0.0, 3.0, 0.0)));
    assert!(!s.contains(p(0.0, -3.0, 0.0)));
    assert!(!s.contains(p(-3.0, 0.0, 0.0)));
}

#[test]
fn test_rotate_extrude_start_offset() {
    let s = solid3("rotate_extrude(angle=90, start=90) translate([3, 0, 0]) circle(1);");
    let d = 3.0 / 2.0_f64.sqrt();
    assert!(s.contains(p(-d, d, 0.0))); // theta = 135
    assert!(!s.contains(p(3.0, 0.0, 0.0))); // theta = 0 is outside the sweep
}

#[test]
fn test_rotate_extrude_negative_side_profile() {
    let s = solid3("rotate_extrude() translate([-3, 0, 0]) circle(1);");
    assert!(s.contains(p(3.0, 0.0, 0.0)));
    assert!(s.contains(p(0.0, -3.0, 0.0)));
    assert!(!s.contains(p(0.0, 0.0, 0.0)));
}

#[test]
fn test_rotate_extrude_rejects_straddling_profile() {
    let err = evaluate_source("rotate_extrude() square([2, 2], center=true);").unwrap_err();
    assert!(err.to_string().contains("crosses the Y axis"));
}

#[test]
fn test_single_child_shorthand_chain() {
    let s = solid3("translate([1, 0, 0]) translate([1, 0, 0]) cube(1);");
    assert!(s.contains(p(2.5, 0.5, 0.5)));
    assert!(!s.contains(p(0.5, 0.5, 0.5)));
}

#[test]
fn test_if_else_statement() {
    let s = solid3("big = false;\nif (big) sphere(5); else sphere(1);");
    assert!(s.contains(p(0.9, 0.0, 0.0)));
    assert!(!s.contains(p(2.0, 0.0, 0.0)));
}
