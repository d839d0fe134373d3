use polyencap::core::io::point_cloud::PointCloudFormat;
use polyencap::engine::config::AnalysisConfig;
use std::path::PathBuf;

/// Fully resolved settings of one `analyze` run.
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub data_dir: PathBuf,
    pub polymer_path: PathBuf,
    pub drug_extension: String,
    /// `None` detects the format per file.
    pub format: Option<PointCloudFormat>,
    pub curve_path: PathBuf,
    pub surface_path: Option<PathBuf>,
    pub core_config: AnalysisConfig,
}

#[derive(Debug, Clone)]
pub struct SurfaceConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub format: Option<PointCloudFormat>,
    pub alpha: f64,
}
