//! # Geometry Module
//!
//! Computational geometry behind the encapsulation analysis.
//!
//! - [`predicates`] - Orientation, in-sphere and solid-angle primitives on `f64` points
//! - [`delaunay`] - Incremental 3D Delaunay triangulation with a vertex at infinity
//! - [`alpha_shape`] - Alpha-complex filtering of the triangulation into a boundary surface
//! - [`containment`] - Point-in-solid classification against a boundary surface
//! - [`bounds`] - Axis-aligned bounding boxes used to prune containment queries
//!
//! Every function here is deterministic for a given input order. Errors are reported
//! through [`GeometryError`].

pub mod alpha_shape;
pub mod bounds;
pub mod containment;
pub(crate) mod delaunay;
mod error;
pub mod predicates;

pub use error::GeometryError;
