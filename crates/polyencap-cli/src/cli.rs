use clap::{Args, Parser, Subcommand, ValueEnum};
use polyencap::core::io::point_cloud::PointCloudFormat;
use serde::Deserialize;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "polyencap developers",
    version,
    about = "polyencap CLI - Measures how well a polymer assembly encapsulates drug molecules using a 3D alpha shape.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used to classify drugs in parallel.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the encapsulation efficiency curve for every drug file in a data directory.
    Analyze(AnalyzeArgs),
    /// Build the alpha-shape surface of a single point cloud and export it as OBJ.
    Surface(SurfaceArgs),
}

/// How point-cloud files are interpreted.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum InputFormat {
    /// Detect the format from the file extension and content.
    #[default]
    Auto,
    /// CSV rows with a bracketed `[x y z]` column.
    Tabular,
    /// `{x y z} {x y z} ...` groups.
    Brace,
}

impl InputFormat {
    /// The fixed format, or `None` for per-file detection.
    pub fn resolve(self) -> Option<PointCloudFormat> {
        match self {
            InputFormat::Auto => None,
            InputFormat::Tabular => Some(PointCloudFormat::Tabular),
            InputFormat::Brace => Some(PointCloudFormat::BraceDelimited),
        }
    }
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    // --- Core Arguments ---
    /// Directory holding the polymer file and one file per drug molecule.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub data_dir: PathBuf,

    /// Name of the polymer file inside the data directory.
    #[arg(short, long, value_name = "FILE")]
    pub polymer: Option<String>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Analysis Overrides ---
    /// Override the alpha-shape parameter (0 selects the convex hull).
    #[arg(short, long, value_name = "FLOAT")]
    pub alpha: Option<f64>,

    /// Override the inclusion threshold used for the per-drug summary.
    #[arg(short = 't', long, value_name = "FLOAT")]
    pub display_threshold: Option<f64>,

    // --- Input Overrides ---
    /// Override the point-cloud file format.
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<InputFormat>,

    /// Override the file extension that identifies drug files.
    #[arg(long, value_name = "EXT")]
    pub drug_extension: Option<String>,

    // --- Output Overrides ---
    /// Path for the encapsulation curve CSV.
    /// Defaults to `<DIR>_loading.csv` next to the data directory.
    #[arg(short = 'o', long = "curve", value_name = "PATH")]
    pub curve_output: Option<PathBuf>,

    /// Also write the boundary surface as Wavefront OBJ to this path.
    #[arg(long = "surface", value_name = "PATH")]
    pub surface_output: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S alpha-shape.alpha=0.2
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `surface` subcommand.
#[derive(Args, Debug)]
pub struct SurfaceArgs {
    /// Path to the point-cloud file the surface is built from.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output OBJ file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the alpha-shape parameter (0 selects the convex hull).
    #[arg(short, long, value_name = "FLOAT")]
    pub alpha: Option<f64>,

    /// Override the point-cloud file format.
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<InputFormat>,

    /// Set a specific configuration value, overriding the config file.
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
