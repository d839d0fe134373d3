//! Alpha-shape boundary extraction.
//!
//! The alpha complex keeps every Delaunay tetrahedron whose circumsphere radius is at
//! most `1 / alpha`. Its boundary is the set of triangles owned by exactly one kept
//! tetrahedron, oriented outwards. Larger `alpha` values therefore carve deeper into
//! concavities, and `alpha == 0` keeps every tetrahedron, which yields the convex hull.

use super::GeometryError;
use super::delaunay::Delaunay3;
use super::predicates::circumradius;
use crate::core::models::surface::BoundarySurface;
use nalgebra::Point3;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Faces of a positively oriented tetrahedron `[v0, v1, v2, v3]`, each wound so its
/// normal points away from the opposite vertex.
const TETRAHEDRON_FACES: [[usize; 3]; 4] = [[1, 2, 3], [0, 3, 2], [0, 1, 3], [0, 2, 1]];

/// Builds the alpha-shape boundary of `points`.
///
/// # Arguments
///
/// * `points` - The reference point set, typically polymer atom coordinates.
/// * `alpha` - Non-negative shape parameter. Tetrahedra with a circumradius above
///   `1 / alpha` are discarded; `0` keeps all of them.
///
/// # Return
///
/// The boundary surface of the retained tetrahedra. Vertex indices are compacted to the
/// points actually referenced by a face, in input order. The surface has no faces when
/// `alpha` is so large that no tetrahedron survives.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateGeometry`] when `alpha` is negative or not finite,
/// when any coordinate is not finite, or when the points do not span a volume (fewer
/// than four distinct points, or all of them coincident, collinear or coplanar).
pub fn build(points: &[Point3<f64>], alpha: f64) -> Result<BoundarySurface, GeometryError> {
    if !alpha.is_finite() || alpha < 0.0 {
        return Err(GeometryError::DegenerateGeometry(format!(
            "alpha must be a finite non-negative number, got {}",
            alpha
        )));
    }

    info!(
        points = points.len(),
        alpha, "Building alpha shape from reference points."
    );
    let triangulation = Delaunay3::new(points)?;

    let max_radius = if alpha == 0.0 { f64::INFINITY } else { 1.0 / alpha };
    let mut total = 0usize;
    let retained: Vec<[usize; 4]> = triangulation
        .finite_cells()
        .inspect(|_| total += 1)
        .filter(|&[a, b, c, d]| {
            alpha == 0.0
                || circumradius(
                    triangulation.point(a),
                    triangulation.point(b),
                    triangulation.point(c),
                    triangulation.point(d),
                ) <= max_radius
        })
        .collect();
    debug!(
        "Retained {} of {} tetrahedra (circumradius <= {}).",
        retained.len(),
        total,
        max_radius
    );

    let faces = boundary_faces(&retained);
    if faces.is_empty() {
        warn!(
            "No tetrahedron satisfies alpha = {}; the boundary surface is empty.",
            alpha
        );
        return Ok(BoundarySurface::empty());
    }

    let surface = compact(points, &faces)?;
    info!(
        vertices = surface.vertex_count(),
        faces = surface.face_count(),
        "Alpha shape built."
    );
    Ok(surface)
}

/// Triangles owned by exactly one tetrahedron, in order of first appearance.
fn boundary_faces(tetrahedra: &[[usize; 4]]) -> Vec<[usize; 3]> {
    let mut slots: HashMap<[usize; 3], usize> = HashMap::with_capacity(tetrahedra.len() * 4);
    let mut candidates: Vec<([usize; 3], usize)> = Vec::with_capacity(tetrahedra.len() * 4);

    for cell in tetrahedra {
        for local in TETRAHEDRON_FACES {
            let face = local.map(|k| cell[k]);
            let mut key = face;
            key.sort_unstable();
            match slots.get(&key) {
                Some(&slot) => candidates[slot].1 += 1,
                None => {
                    slots.insert(key, candidates.len());
                    candidates.push((face, 1));
                }
            }
        }
    }

    candidates
        .into_iter()
        .filter(|&(_, owners)| owners == 1)
        .map(|(face, _)| face)
        .collect()
}

/// Re-indexes `faces` (input point ids) against the referenced points only.
fn compact(
    points: &[Point3<f64>],
    faces: &[[usize; 3]],
) -> Result<BoundarySurface, GeometryError> {
    let mut used: Vec<usize> = faces.iter().flatten().copied().collect();
    used.sort_unstable();
    used.dedup();

    let remap: HashMap<usize, usize> = used
        .iter()
        .enumerate()
        .map(|(compact, &original)| (original, compact))
        .collect();
    let vertices = used.iter().map(|&original| points[original]).collect();
    let faces = faces
        .iter()
        .map(|face| face.map(|original| remap[&original]))
        .collect();

    BoundarySurface::from_parts(vertices, faces)
}
