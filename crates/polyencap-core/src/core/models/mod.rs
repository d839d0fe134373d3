//! # Core Models Module
//!
//! Plain data structures shared by every stage of the encapsulation analysis.
//!
//! ## Key Components
//!
//! - [`point_cloud`] - An ordered, optionally labelled set of atom coordinates
//! - [`surface`] - The triangulated boundary of an alpha shape
//! - [`containment`] - Per-point inside/outside classification of one query cloud
//! - [`curve`] - The encapsulation efficiency curve produced by the threshold sweep
//!
//! ## Usage
//!
//! ```ignore
//! use polyencap::core::models::point_cloud::PointCloud;
//! use nalgebra::Point3;
//!
//! let polymer = PointCloud::new(vec![Point3::new(0.0, 0.0, 0.0)]).with_label("polymer");
//! assert_eq!(polymer.len(), 1);
//! ```
//!
//! Values of these types are immutable once constructed; the geometry and engine layers
//! only ever borrow them.

pub mod containment;
pub mod curve;
pub mod point_cloud;
pub mod surface;
