use crate::cli::InputFormat;
use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileAlphaShapeConfig {
    pub alpha: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileEncapsulationConfig {
    #[serde(rename = "display-threshold")]
    pub display_threshold: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileInputConfig {
    pub format: Option<InputFormat>,
    #[serde(rename = "polymer-file")]
    pub polymer_file: Option<String>,
    #[serde(rename = "drug-extension")]
    pub drug_extension: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileOutputConfig {
    pub curve: Option<PathBuf>,
    pub surface: Option<PathBuf>,
}

/// The optional sections of a TOML configuration file.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(rename = "alpha-shape")]
    pub alpha_shape: Option<FileAlphaShapeConfig>,
    pub encapsulation: Option<FileEncapsulationConfig>,
    pub input: Option<FileInputConfig>,
    pub output: Option<FileOutputConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::file_parsing(path, e))
    }
}
