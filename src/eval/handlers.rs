// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! Builtin operator table.
//!
//! Each entry pairs a handler function with its child policy:
//! leaf operators reject children, composite operators require them and see
//! the implicit union of the child shapes, and multi-child operators
//! (`difference`, `intersection`) receive the children in order.

use crate::error::Result;
use crate::eval::shape::ShapeRep;
use crate::eval::{csg, extrude, meshing, primitives, text, transforms, Evaluator};
use crate::lang::ast::Call;
use ahash::AHashMap;
use std::sync::LazyLock;

pub type HandlerFn = fn(&mut Evaluator, &Call, Vec<ShapeRep>) -> Result<ShapeRep>;

pub struct Handler {
    pub func: HandlerFn,
    pub allow_children: bool,
    pub require_children: bool,
    pub union_children: bool,
}

impl Handler {
    const fn leaf(func: HandlerFn) -> Self {
        Handler { func, allow_children: false, require_children: false, union_children: false }
    }

    const fn composite(func: HandlerFn) -> Self {
        Handler { func, allow_children: true, require_children: true, union_children: true }
    }

    const fn multi(func: HandlerFn) -> Self {
        Handler { func, allow_children: true, require_children: true, union_children: false }
    }
}

static TABLE: LazyLock<AHashMap<&'static str, Handler>> = LazyLock::new(|| {
    let mut t = AHashMap::new();

    // CSG
    t.insert("union", Handler::composite(csg::union));
    t.insert("difference", Handler::multi(csg::difference));
    t.insert("intersection", Handler::multi(csg::intersection));

    // transforms
    t.insert("translate", Handler::composite(transforms::translate));
    t.insert("rotate", Handler::composite(transforms::rotate));
    t.insert("scale", Handler::composite(transforms::scale));

    // extrusion
    t.insert("linear_extrude", Handler::composite(extrude::linear_extrude));
    t.insert("rotate_extrude", Handler::composite(extrude::rotate_extrude));

    // primitives
    t.insert("sphere", Handler::leaf(primitives::sphere));
    t.insert("cube", Handler::leaf(primitives::cube));
    t.insert("cylinder", Handler::leaf(primitives::cylinder));
    t.insert("circle", Handler::leaf(primitives::circle));
    t.insert("square", Handler::leaf(primitives::square));
    t.insert("polygon", Handler::leaf(primitives::polygon));
    t.insert("sphere_sdf", Handler::leaf(primitives::sphere_sdf));
    t.insert("cube_sdf", Handler::leaf(primitives::cube_sdf));
    t.insert("cylinder_sdf", Handler::leaf(primitives::cylinder_sdf));
    t.insert("circle_sdf", Handler::leaf(primitives::circle_sdf));
    t.insert("square_sdf", Handler::leaf(primitives::square_sdf));

    // representation changes
    t.insert("solid", Handler::composite(meshing::solid));
    t.insert("mesh_to_sdf", Handler::composite(meshing::mesh_to_sdf));
    t.insert("inset_sdf", Handler::composite(meshing::inset_sdf));
    t.insert("outset_sdf", Handler::composite(meshing::outset_sdf));
    t.insert("marching_squares", Handler::composite(meshing::marching_squares));
    t.insert("marching_cubes", Handler::composite(meshing::marching_cubes));
    t.insert("dual_contour", Handler::composite(meshing::dual_contour));

    // text
    t.insert("text", Handler::leaf(text::text));
    t.insert("text_mesh", Handler::leaf(text::text_mesh));

    t
});

pub fn lookup(name: &str) -> Option<&'static Handler> {
    TABLE.get(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_policies() {
        assert!(lookup("nonesuch").is_none());
        let sphere = lookup("sphere").unwrap();
        assert!(!sphere.allow_children);
        let union = lookup("union").unwrap();
        assert!(union.union_children && union.require_children);
        let difference = lookup("difference").unwrap();
        assert!(difference.allow_children && !difference.union_children);
    }
}
