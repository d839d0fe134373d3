use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Query point cloud contains no points")]
    EmptyQuery,

    #[error("Face {face} references vertex {index}, but the surface has {vertex_count} vertices")]
    InvalidSurface {
        face: usize,
        index: usize,
        vertex_count: usize,
    },
}
