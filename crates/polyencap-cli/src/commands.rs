pub mod analyze;
pub mod surface;
