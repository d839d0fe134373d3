use crate::cli::SurfaceArgs;
use crate::config::build_surface_config;
use crate::error::{CliError, Result};
use polyencap::core::geometry::alpha_shape;
use polyencap::core::io::{obj::write_obj_to_path, point_cloud::read_point_cloud};
use tracing::{info, warn};

pub fn run(args: SurfaceArgs) -> Result<()> {
    let config = build_surface_config(&args)?;

    info!("Loading point cloud from {:?}", &config.input_path);
    let cloud = read_point_cloud(&config.input_path, config.format)
        .map_err(|e| CliError::file_parsing(&config.input_path, e))?;

    println!(
        "Building alpha shape of '{}' ({} points, alpha = {})...",
        cloud.display_label(),
        cloud.len(),
        config.alpha
    );
    let surface = alpha_shape::build(cloud.points(), config.alpha)?;
    if surface.is_empty() {
        warn!("Alpha shape is empty; the OBJ file will contain no faces.");
    } else if !surface.is_closed() {
        warn!("Alpha shape boundary is not a closed surface.");
    }

    write_obj_to_path(&surface, cloud.display_label(), &config.output_path)
        .map_err(|e| CliError::export(&config.output_path, e))?;
    println!(
        "✓ Surface with {} vertices and {} faces written to: {}",
        surface.vertex_count(),
        surface.face_count(),
        config.output_path.display()
    );
    Ok(())
}
