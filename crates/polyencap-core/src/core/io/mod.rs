//! Provides input/output functionality for point clouds and analysis results.
//!
//! Point clouds are read from two plain-text conventions: a tabular CSV export whose
//! rows carry a bracketed `[x y z]` field, and a brace-delimited `{x y z} {x y z} ...`
//! listing. Both are exposed through the [`traits::PointCloudFile`] trait and the
//! format-agnostic [`point_cloud::parse_point_cloud`] entry point. Results are written
//! as a CSV encapsulation curve ([`curve`]) and a Wavefront OBJ surface ([`obj`]).

mod brace;
pub mod curve;
pub mod obj;
pub mod point_cloud;
mod tabular;
pub mod traits;

pub use brace::BraceFile;
pub use tabular::TabularFile;
