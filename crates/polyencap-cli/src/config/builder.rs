use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{AnalyzeConfig, SurfaceConfig};
use crate::cli::{AnalyzeArgs, InputFormat, SurfaceArgs};
use crate::error::{CliError, Result};
use clap::ValueEnum;
use polyencap::engine::config::AnalysisConfigBuilder;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Resolves `analyze` settings with precedence defaults < config file < CLI flags,
/// where `-S` assignments are applied onto the file layer.
pub fn build_analyze_config(args: &AnalyzeArgs) -> Result<AnalyzeConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = load_file_config(args.config.as_deref(), &args.set_values)?;

    let alpha_file = file_config.alpha_shape.unwrap_or_default();
    let encapsulation_file = file_config.encapsulation.unwrap_or_default();
    let input_file = file_config.input.unwrap_or_default();
    let output_file = file_config.output.unwrap_or_default();

    let alpha = args.alpha.or(alpha_file.alpha).unwrap_or(defaults.alpha);
    let display_threshold = args
        .display_threshold
        .or(encapsulation_file.display_threshold)
        .unwrap_or(defaults.display_threshold);
    let core_config = AnalysisConfigBuilder::new()
        .alpha(alpha)
        .display_threshold(display_threshold)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let polymer_file = args
        .polymer
        .clone()
        .or(input_file.polymer_file)
        .ok_or_else(|| {
            CliError::Config(
                "A polymer file is required, via --polymer or `input.polymer-file`.".to_string(),
            )
        })?;
    let drug_extension = args
        .drug_extension
        .clone()
        .or(input_file.drug_extension)
        .unwrap_or(defaults.drug_extension);
    let drug_extension = drug_extension.trim_start_matches('.').to_string();
    if drug_extension.is_empty() {
        return Err(CliError::Config(
            "The drug file extension must not be empty.".to_string(),
        ));
    }
    let format = args
        .format
        .or(input_file.format)
        .unwrap_or(defaults.format);

    let curve_path = args
        .curve_output
        .clone()
        .or(output_file.curve)
        .unwrap_or_else(|| default_curve_path(&args.data_dir));
    let surface_path = args.surface_output.clone().or(output_file.surface);

    Ok(AnalyzeConfig {
        polymer_path: args.data_dir.join(polymer_file),
        data_dir: args.data_dir.clone(),
        drug_extension,
        format: format.resolve(),
        curve_path,
        surface_path,
        core_config,
    })
}

pub fn build_surface_config(args: &SurfaceArgs) -> Result<SurfaceConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = load_file_config(args.config.as_deref(), &args.set_values)?;

    let alpha = args
        .alpha
        .or(file_config.alpha_shape.and_then(|section| section.alpha))
        .unwrap_or(defaults.alpha);
    // Only alpha matters here; the threshold is a placeholder the builder requires.
    let core_config = AnalysisConfigBuilder::new()
        .alpha(alpha)
        .display_threshold(defaults.display_threshold)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;
    let format = args
        .format
        .or(file_config.input.and_then(|section| section.format))
        .unwrap_or(defaults.format);

    Ok(SurfaceConfig {
        input_path: args.input.clone(),
        output_path: args.output.clone(),
        format: format.resolve(),
        alpha: core_config.alpha,
    })
}

/// `<parent>/<dir name>_loading.csv`, written next to the data directory.
fn default_curve_path(data_dir: &Path) -> PathBuf {
    let name = data_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "encapsulation".to_string());
    data_dir.with_file_name(format!("{}_loading.csv", name))
}

fn load_file_config(path: Option<&Path>, set_values: &[String]) -> Result<FileConfig> {
    let file_config = match path {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    apply_set_values(file_config, set_values)
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "alpha-shape.alpha" => {
                config
                    .alpha_shape
                    .get_or_insert_with(Default::default)
                    .alpha = Some(parse_value(key, value_str, "float")?);
            }
            "encapsulation.display-threshold" => {
                config
                    .encapsulation
                    .get_or_insert_with(Default::default)
                    .display_threshold = Some(parse_value(key, value_str, "float")?);
            }
            "input.format" => {
                let format = InputFormat::from_str(value_str, true).map_err(|_| {
                    CliError::Config(format!(
                        "Invalid format for {}: {} (expected auto, tabular or brace)",
                        key, value_str
                    ))
                })?;
                config.input.get_or_insert_with(Default::default).format = Some(format);
            }
            "input.polymer-file" => {
                config.input.get_or_insert_with(Default::default).polymer_file =
                    Some(value_str.to_string());
            }
            "input.drug-extension" => {
                config
                    .input
                    .get_or_insert_with(Default::default)
                    .drug_extension = Some(value_str.to_string());
            }
            "output.curve" => {
                config.output.get_or_insert_with(Default::default).curve =
                    Some(PathBuf::from(value_str));
            }
            "output.surface" => {
                config.output.get_or_insert_with(Default::default).surface =
                    Some(PathBuf::from(value_str));
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyencap::core::io::point_cloud::PointCloudFormat;
    use std::fs;
    use tempfile::tempdir;

    fn base_analyze_args() -> AnalyzeArgs {
        AnalyzeArgs {
            data_dir: PathBuf::from("data/sample"),
            polymer: Some("GCPQ.txt".to_string()),
            config: None,
            alpha: None,
            display_threshold: None,
            format: None,
            drug_extension: None,
            curve_output: None,
            surface_output: None,
            set_values: vec![],
        }
    }

    fn base_surface_args() -> SurfaceArgs {
        SurfaceArgs {
            input: PathBuf::from("GCPQ.txt"),
            output: PathBuf::from("GCPQ.obj"),
            config: None,
            alpha: None,
            format: None,
            set_values: vec![],
        }
    }

    #[test]
    fn defaults_fill_everything_not_given() {
        let config = build_analyze_config(&base_analyze_args()).unwrap();
        let defaults = DefaultsConfig::default();

        assert_eq!(config.core_config.alpha, defaults.alpha);
        assert_eq!(
            config.core_config.display_threshold,
            defaults.display_threshold
        );
        assert_eq!(config.polymer_path, PathBuf::from("data/sample/GCPQ.txt"));
        assert_eq!(config.drug_extension, "txt");
        assert_eq!(config.format, None);
        assert_eq!(config.curve_path, PathBuf::from("data/sample_loading.csv"));
        assert_eq!(config.surface_path, None);
    }

    #[test]
    fn file_values_override_defaults_and_cli_overrides_file() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        fs::write(
            &cfg_path,
            r#"
            [alpha-shape]
            alpha = 0.3

            [encapsulation]
            display-threshold = 0.2

            [input]
            format = "tabular"
            polymer-file = "polymer.csv"
            drug-extension = ".csv"

            [output]
            surface = "polymer.obj"
            "#,
        )
        .unwrap();

        let mut args = base_analyze_args();
        args.config = Some(cfg_path);
        args.polymer = None;
        args.display_threshold = Some(0.5);

        let config = build_analyze_config(&args).unwrap();
        assert_eq!(config.core_config.alpha, 0.3);
        assert_eq!(config.core_config.display_threshold, 0.5);
        assert_eq!(config.polymer_path, PathBuf::from("data/sample/polymer.csv"));
        assert_eq!(config.drug_extension, "csv");
        assert_eq!(config.format, Some(PointCloudFormat::Tabular));
        assert_eq!(config.surface_path, Some(PathBuf::from("polymer.obj")));
    }

    #[test]
    fn set_values_override_the_file_layer() {
        let mut args = base_analyze_args();
        args.set_values = vec![
            "alpha-shape.alpha=0".to_string(),
            "input.format=BRACE".to_string(),
            "output.curve=out.csv".to_string(),
        ];

        let config = build_analyze_config(&args).unwrap();
        assert_eq!(config.core_config.alpha, 0.0);
        assert_eq!(config.format, Some(PointCloudFormat::BraceDelimited));
        assert_eq!(config.curve_path, PathBuf::from("out.csv"));
    }

    #[test]
    fn malformed_set_values_are_config_errors() {
        for set_value in [
            "alpha-shape.alpha",
            "alpha-shape.alpha=wide",
            "input.format=xml",
            "alpha-shape.radius=2",
        ] {
            let mut args = base_analyze_args();
            args.set_values = vec![set_value.to_string()];
            assert!(
                matches!(build_analyze_config(&args), Err(CliError::Config(_))),
                "'{}' should be rejected",
                set_value
            );
        }
    }

    #[test]
    fn missing_polymer_file_is_reported() {
        let mut args = base_analyze_args();
        args.polymer = None;
        match build_analyze_config(&args) {
            Err(CliError::Config(msg)) => assert!(msg.contains("polymer")),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn invalid_parameters_are_rejected_by_core_validation() {
        let mut args = base_analyze_args();
        args.alpha = Some(-1.0);
        assert!(matches!(
            build_analyze_config(&args),
            Err(CliError::Config(_))
        ));

        let mut args = base_analyze_args();
        args.display_threshold = Some(1.5);
        assert!(matches!(
            build_analyze_config(&args),
            Err(CliError::Config(_))
        ));

        let mut args = base_surface_args();
        args.alpha = Some(f64::NAN);
        assert!(matches!(
            build_surface_config(&args),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn surface_config_merges_alpha_and_format() {
        let mut args = base_surface_args();
        args.set_values = vec!["alpha-shape.alpha=0.4".to_string()];
        args.format = Some(InputFormat::Brace);

        let config = build_surface_config(&args).unwrap();
        assert_eq!(config.alpha, 0.4);
        assert_eq!(config.format, Some(PointCloudFormat::BraceDelimited));
        assert_eq!(config.output_path, PathBuf::from("GCPQ.obj"));
    }

    #[test]
    fn default_curve_path_sits_next_to_the_data_directory() {
        assert_eq!(
            default_curve_path(Path::new("runs/PLGA_10")),
            PathBuf::from("runs/PLGA_10_loading.csv")
        );
    }
}
