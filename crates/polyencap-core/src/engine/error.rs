use super::config::ConfigError;
use crate::core::geometry::GeometryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Geometry error: {source}")]
    Geometry {
        #[from]
        source: GeometryError,
    },

    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("No valid query point clouds to aggregate")]
    NoQueries,

    #[error("Invalid threshold grid: {0}")]
    InvalidThresholds(String),
}
