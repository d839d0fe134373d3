use crate::cli::AnalyzeArgs;
use crate::config::{AnalyzeConfig, build_analyze_config};
use crate::error::{CliError, Result};
use crate::utils::discovery::discover_drug_files;
use crate::utils::progress::CliProgressHandler;
use polyencap::{
    core::io::{curve::write_curve_csv_to_path, obj::write_obj_to_path, point_cloud},
    core::models::point_cloud::PointCloud,
    engine::progress::ProgressReporter,
    workflows::{self, encapsulation::EncapsulationResult},
};
use std::path::Path;
use tracing::{info, warn};

pub fn run(args: AnalyzeArgs) -> Result<()> {
    info!("Resolving configuration...");
    let config = build_analyze_config(&args)?;

    info!("Loading polymer from {:?}", &config.polymer_path);
    let polymer = read_cloud(&config.polymer_path, &config)?;

    let drug_paths = discover_drug_files(
        &config.data_dir,
        &config.polymer_path,
        &config.drug_extension,
    )?;
    if drug_paths.is_empty() {
        warn!(
            "No '.{}' drug files found in {:?}.",
            config.drug_extension, &config.data_dir
        );
    }
    let drugs = drug_paths
        .iter()
        .map(|path| read_cloud(path, &config))
        .collect::<Result<Vec<_>>>()?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Analyzing {} drug(s) against '{}' (alpha = {})...",
        drugs.len(),
        polymer.display_label(),
        config.core_config.alpha
    );
    let result = workflows::encapsulation::run(&polymer, drugs, &config.core_config, &reporter)?;

    write_outputs(&result, &config, polymer.display_label())?;
    print_summary(&result, &config)?;
    Ok(())
}

fn read_cloud(path: &Path, config: &AnalyzeConfig) -> Result<PointCloud> {
    point_cloud::read_point_cloud(path, config.format)
        .map_err(|e| CliError::file_parsing(path, e))
}

fn write_outputs(result: &EncapsulationResult, config: &AnalyzeConfig, name: &str) -> Result<()> {
    info!("Writing encapsulation curve to {:?}", &config.curve_path);
    write_curve_csv_to_path(&result.report.curve, &config.curve_path)
        .map_err(|e| CliError::export(&config.curve_path, e))?;
    println!(
        "✓ Encapsulation curve written to: {}",
        config.curve_path.display()
    );

    if let Some(surface_path) = &config.surface_path {
        info!("Writing boundary surface to {:?}", surface_path);
        write_obj_to_path(&result.surface, name, surface_path)
            .map_err(|e| CliError::export(surface_path, e))?;
        println!(
            "  Boundary surface ({} faces) written to: {}",
            result.surface.face_count(),
            surface_path.display()
        );
    }
    Ok(())
}

fn print_summary(result: &EncapsulationResult, config: &AnalyzeConfig) -> Result<()> {
    let threshold = config.core_config.display_threshold;
    let frame = result.frame(threshold)?;
    let summary = frame.summary();
    info!(
        encapsulated = summary.encapsulated,
        free = summary.free,
        invalid = summary.invalid,
        "Drug status at display threshold {}.",
        threshold
    );

    let valid = summary.encapsulated + summary.free;
    let percentage = if valid == 0 {
        0.0
    } else {
        summary.encapsulated as f64 / valid as f64 * 100.0
    };
    println!(
        "  {} of {} drug(s) hold at least {:.0}% of their atoms inside ({:.2}%).",
        summary.encapsulated,
        valid,
        threshold * 100.0,
        percentage
    );
    if let [any_overlap, fully_enclosed] = frame.reference_lines[..] {
        println!(
            "  Any overlap: {:.2}%, fully enclosed: {:.2}%.",
            any_overlap, fully_enclosed
        );
    }

    for label in result.skipped_labels() {
        println!("  Skipped '{}': no atoms.", label);
    }
    Ok(())
}
