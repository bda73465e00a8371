// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! The tagged union flowing through geometry statements.

use crate::geometry::{Mesh2, Mesh3, Sdf2, Sdf3, Solid2, Solid3};

/// One produced shape: three representations, each in two dimensions.
#[derive(Debug, Clone)]
pub enum ShapeRep {
    Solid2(Solid2),
    Solid3(Solid3),
    Sdf2(Sdf2),
    Sdf3(Sdf3),
    Mesh2(Mesh2),
    Mesh3(Mesh3),
}

impl ShapeRep {
    pub fn kind(&self) -> &'static str {
        match self {
            ShapeRep::Solid2(_) => "2d solid",
            ShapeRep::Solid3(_) => "3d solid",
            ShapeRep::Sdf2(_) => "2d sdf",
            ShapeRep::Sdf3(_) => "3d sdf",
            ShapeRep::Mesh2(_) => "2d mesh",
            ShapeRep::Mesh3(_) => "3d mesh",
        }
    }

    pub fn is_2d(&self) -> bool {
        matches!(self, ShapeRep::Solid2(_) | ShapeRep::Sdf2(_) | ShapeRep::Mesh2(_))
    }

    /// Same representation and dimensionality.
    pub fn same_kind(&self, other: &ShapeRep) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Convert to the membership representation, keeping the dimensionality.
    ///
    /// Distance fields are thresholded at zero, meshes use even-odd ray
    /// parity, and solids pass through unchanged.
    pub fn solidify(self) -> ShapeRep {
        match self {
            s @ (ShapeRep::Solid2(_) | ShapeRep::Solid3(_)) => s,
            ShapeRep::Sdf2(f) => ShapeRep::Solid2(f.threshold()),
            ShapeRep::Sdf3(f) => ShapeRep::Solid3(f.threshold()),
            ShapeRep::Mesh2(m) => ShapeRep::Solid2(m.to_solid()),
            ShapeRep::Mesh3(m) => ShapeRep::Solid3(m.to_solid()),
        }
    }
}
