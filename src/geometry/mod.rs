// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2026 Implicad Contributors

//! Geometry backends for the three shape representations.
//!
//! A shape is one of three representations, each in 2D and 3D:
//!   - a boolean membership test over an axis-aligned bounding box ([`Solid2`],
//!     [`Solid3`]),
//!   - a signed distance field, positive inside ([`Sdf2`], [`Sdf3`]),
//!   - an explicit boundary mesh of segments or triangles ([`Mesh2`],
//!     [`Mesh3`]).
//!
//! Conversions between representations (meshing, signed distance from a mesh,
//! membership from a mesh) live in [`marching`], [`dual_contour`], and the
//! mesh module itself.

pub mod affine;
pub mod bounds;
pub mod dual_contour;
pub mod marching;
pub mod mesh;
pub mod primitives;
pub mod sdf;
pub mod solid;

pub use affine::{Affine2, Affine3};
pub use bounds::{Bounds2, Bounds3};
pub use mesh::{Mesh2, Mesh3};
pub use sdf::{Sdf2, Sdf3};
pub use solid::{Solid2, Solid3};
