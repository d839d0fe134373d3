//! # polyencap Core Library
//!
//! Measures how well a polymer assembly encapsulates drug molecules. The polymer's
//! occupied volume is approximated by a 3D alpha shape, every drug atom is tested
//! against that surface, and the per-drug containment fractions are swept over an
//! inclusion threshold to produce an encapsulation efficiency curve.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Immutable data models (`PointCloud`, `BoundarySurface`,
//!   `ContainmentResult`), the geometric algorithms (Delaunay triangulation, alpha shape,
//!   point-in-solid classification) and text I/O for point clouds and results.
//!
//! - **[`engine`]: The Logic Core.** Analysis configuration, error types, progress
//!   reporting, the threshold-sweep aggregator and the pure frame renderer.
//!
//! - **[`workflows`]: The Public API.** Runs a complete encapsulation analysis from
//!   parsed point clouds to an aggregated report.

pub mod core;
pub mod engine;
pub mod workflows;
