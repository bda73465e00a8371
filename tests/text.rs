// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! Text operators: solid/mesh parity, layout, and extrusion of glyphs.

use implicad::{evaluate_source, ShapeRep};
use nalgebra::{Point2, Point3};

fn shape(src: &str) -> ShapeRep {
    evaluate_source(src).unwrap_or_else(|e| panic!("evaluation failed: {e}"))
}

#[test]
fn test_text_matches_solidified_text_mesh() {
    let ShapeRep::Solid2(direct) = shape("text(\"AB\", size=14);") else {
        panic!("expected 2d solid")
    };
    let ShapeRep::Solid2(via_mesh) = shape("solid() text_mesh(\"AB\", size=14);") else {
        panic!("expected 2d solid")
    };

    // sample a lattice over the layout box; the two routes share outlines so
    // membership must agree at every probe
    for i in 0..60 {
        for j in 0..30 {
            let p = Point2::new(i as f64 * 0.45 - 1.0, j as f64 * 0.55 - 1.0);
            assert_eq!(direct.contains(p), via_mesh.contains(p), "disagree at {p}");
        }
    }
}

#[test]
fn test_text_spacing_widens_layout() {
    let ShapeRep::Solid2(tight) = shape("text(\"II\", size=7);") else { panic!() };
    let ShapeRep::Solid2(wide) = shape("text(\"II\", size=7, spacing=2);") else { panic!() };
    // second 'I' stem: cell grid is unit-sized at size=7, advance is 6
    assert!(tight.contains(Point2::new(8.5, 3.5)));
    assert!(!wide.contains(Point2::new(8.5, 3.5)));
    assert!(wide.contains(Point2::new(14.5, 3.5)));
}

#[test]
fn test_text_valign_top_drops_below_origin() {
    let ShapeRep::Solid2(s) = shape("text(\"I\", size=7, valign=\"top\");") else { panic!() };
    assert!(s.contains(Point2::new(2.5, -3.5)));
    assert!(!s.contains(Point2::new(2.5, 3.5)));
}

#[test]
fn test_text_center_alignment() {
    let ShapeRep::Solid2(s) =
        shape("text(\"I\", size=7, halign=\"center\", valign=\"center\");") else { panic!() };
    assert!(s.contains(Point2::new(0.0, 0.0)));
}

#[test]
fn test_extruded_text() {
    let src = "linear_extrude(height=2) text(\"T\", size=7);";
    let ShapeRep::Solid3(s) = shape(src) else { panic!("expected 3d solid") };
    // the top bar of 'T' spans the full width at the top row
    assert!(s.contains(Point3::new(2.5, 6.5, 1.0)));
    assert!(!s.contains(Point3::new(0.5, 3.5, 1.0)));
    assert!(!s.contains(Point3::new(2.5, 6.5, 2.5)));
}

#[test]
fn test_text_mesh_feeds_mesh_pipeline() {
    let src = "mesh_to_sdf() text_mesh(\"O\", size=7);";
    let ShapeRep::Sdf2(sdf) = shape(src) else { panic!("expected 2d sdf") };
    // inside the ring of 'O'
    assert!(sdf.eval(Point2::new(0.5, 3.5)) > 0.0);
    // in the counter (hole) of 'O'
    assert!(sdf.eval(Point2::new(2.5, 3.5)) < 0.0);
}

#[test]
fn test_unsupported_font_and_character() {
    assert!(evaluate_source("text(\"A\", font=\"Papyrus\");").is_err());
    assert!(evaluate_source("text(\"\\u007f\");").is_err());
}
