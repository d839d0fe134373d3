//! Point-in-solid classification against a [`BoundarySurface`].
//!
//! A point is inside when the generalized winding number of the surface around it
//! exceeds one half. The winding number is the sum of the signed solid angles of all
//! oriented faces divided by `4π`. It is exactly one inside and zero outside a closed
//! outward-oriented surface, and stays well defined where an alpha shape pinches into
//! non-manifold edges or vertices. Points within [`BOUNDARY_TOLERANCE`] of a face count
//! as inside.

use super::predicates::{point_triangle_distance_squared, winding_number};
use crate::core::models::containment::{Classification, ContainmentResult};
use crate::core::models::point_cloud::PointCloud;
use crate::core::models::surface::BoundarySurface;
use nalgebra::Point3;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Distance from a face below which a point is considered to lie on the boundary.
pub const BOUNDARY_TOLERANCE: f64 = 1e-9;

/// Whether `p` lies inside the solid bounded by `surface` or on its boundary.
pub fn contains_point(surface: &BoundarySurface, p: &Point3<f64>) -> bool {
    let Some(bounds) = surface.bounds() else {
        return false;
    };
    if surface.is_empty() || !bounds.contains(p, BOUNDARY_TOLERANCE) {
        return false;
    }

    let on_boundary = surface.triangles().any(|[a, b, c]| {
        point_triangle_distance_squared(p, a, b, c) <= BOUNDARY_TOLERANCE * BOUNDARY_TOLERANCE
    });
    on_boundary || winding_number(p, surface.triangles()) > 0.5
}

/// Classifies every point of `query` against `surface`, preserving point order.
///
/// An empty query yields an empty result; the caller decides whether that is an error
/// (see [`ContainmentResult::fraction`]). Calling this twice with the same inputs yields
/// identical results.
pub fn classify(surface: &BoundarySurface, query: &PointCloud) -> ContainmentResult {
    let inside: Vec<bool> = query.iter().map(|p| contains_point(surface, p)).collect();
    let result = ContainmentResult::new(inside);
    debug!(
        "Classified '{}': {}/{} points inside.",
        query.display_label(),
        result.inside_count(),
        result.len()
    );
    result
}

/// Classifies many query clouds independently, calling `on_done` after each one.
///
/// With the `parallel` feature the queries are spread over the rayon thread pool; the
/// output order always matches `queries`.
pub fn classify_all<F>(
    surface: &BoundarySurface,
    queries: Vec<PointCloud>,
    on_done: F,
) -> Vec<Classification>
where
    F: Fn() + Send + Sync,
{
    #[cfg(not(feature = "parallel"))]
    let iterator = queries.into_iter();

    #[cfg(feature = "parallel")]
    let iterator = queries.into_par_iter();

    iterator
        .map(|drug| {
            let result = classify(surface, &drug);
            on_done();
            Classification { drug, result }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::alpha_shape;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn unit_cube_surface() -> BoundarySurface {
        let mut corners = Vec::new();
        for x in [0.0, 1.0] {
            for y in [0.0, 1.0] {
                for z in [0.0, 1.0] {
                    corners.push(Point3::new(x, y, z));
                }
            }
        }
        alpha_shape::build(&corners, 0.0).unwrap()
    }

    fn cloud(points: &[[f64; 3]]) -> PointCloud {
        points
            .iter()
            .map(|&[x, y, z]| Point3::new(x, y, z))
            .collect()
    }

    #[test]
    fn cube_center_is_inside() {
        let surface = unit_cube_surface();
        let result = classify(&surface, &cloud(&[[0.5, 0.5, 0.5]]));
        assert_eq!(result.flags(), &[true]);
    }

    #[test]
    fn far_point_is_outside() {
        let surface = unit_cube_surface();
        let result = classify(&surface, &cloud(&[[100.0, 100.0, 100.0]]));
        assert_eq!(result.flags(), &[false]);
    }

    #[test]
    fn points_on_faces_edges_and_corners_are_inside() {
        let surface = unit_cube_surface();
        let result = classify(
            &surface,
            &cloud(&[
                [0.5, 0.5, 1.0],
                [0.0, 0.3, 0.7],
                [1.0, 1.0, 0.5],
                [1.0, 1.0, 1.0],
                [0.5, 0.5, 1.0 + 1e-12],
            ]),
        );
        assert!(result.flags().iter().all(|&inside| inside));
    }

    #[test]
    fn points_just_outside_a_face_are_outside() {
        let surface = unit_cube_surface();
        let result = classify(&surface, &cloud(&[[0.5, 0.5, 1.001], [-0.01, 0.5, 0.5]]));
        assert_eq!(result.flags(), &[false, false]);
    }

    #[test]
    fn zero_face_surface_contains_nothing() {
        let surface = BoundarySurface::empty();
        let result = classify(&surface, &cloud(&[[0.0, 0.0, 0.0], [1.0, 2.0, 3.0]]));
        assert_eq!(result.flags(), &[false, false]);
    }

    #[test]
    fn classification_is_idempotent() {
        let surface = unit_cube_surface();
        let query = cloud(&[[0.2, 0.9, 0.4], [1.5, 0.5, 0.5], [0.999, 0.001, 0.5]]);
        assert_eq!(classify(&surface, &query), classify(&surface, &query));
    }

    #[test]
    fn concave_region_of_an_alpha_shape_is_outside() {
        let mut points = Vec::new();
        for offset in [0.0, 6.0] {
            for x in 0..3 {
                for y in 0..3 {
                    for z in 0..3 {
                        points.push(Point3::new(offset + x as f64, y as f64, z as f64));
                    }
                }
            }
        }
        let hull = alpha_shape::build(&points, 0.0).unwrap();
        let shape = alpha_shape::build(&points, 0.6).unwrap();
        let gap = Point3::new(4.0, 1.0, 1.0);
        assert!(contains_point(&hull, &gap));
        assert!(!contains_point(&shape, &gap));
        assert!(contains_point(&shape, &Point3::new(1.2, 1.3, 0.7)));
    }

    #[test]
    fn classify_all_preserves_query_order_and_reports_each_drug() {
        let surface = unit_cube_surface();
        let queries = vec![
            cloud(&[[0.5, 0.5, 0.5]]).with_label("inside"),
            cloud(&[[5.0, 5.0, 5.0], [0.5, 0.5, 0.5]]).with_label("half"),
            PointCloud::default().with_label("empty"),
        ];
        let done = AtomicUsize::new(0);
        let classifications = classify_all(&surface, queries, || {
            done.fetch_add(1, Ordering::Relaxed);
        });

        assert_eq!(done.load(Ordering::Relaxed), 3);
        let labels: Vec<&str> = classifications.iter().map(|c| c.label()).collect();
        assert_eq!(labels, ["inside", "half", "empty"]);
        assert_eq!(classifications[1].result.fraction(), Ok(0.5));
        assert!(classifications[2].result.is_empty());
    }
}
