//! # Core Module
//!
//! Fundamental building blocks of the encapsulation analysis.
//!
//! - **Data Models** ([`models`]) - Point clouds, boundary surfaces and containment results
//! - **Geometry** ([`geometry`]) - Predicates, Delaunay triangulation, alpha shapes and
//!   point-in-solid classification
//! - **File I/O** ([`io`]) - Point-cloud parsing and result export
//!
//! All types in this module are plain data or pure functions; nothing here holds
//! mutable state across calls.

pub mod geometry;
pub mod io;
pub mod models;
