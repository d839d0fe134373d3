use crate::core::geometry::GeometryError;
use crate::core::geometry::bounds::Aabb;
use nalgebra::Point3;
use std::collections::HashMap;

/// A triangulated boundary enclosing the volume retained by an alpha shape.
///
/// Faces are index triples into [`vertices`](Self::vertices), wound counter-clockwise
/// when seen from outside so that `(b - a) × (c - a)` points out of the enclosed volume.
/// A surface may be empty (no faces), in which case it encloses nothing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoundarySurface {
    vertices: Vec<Point3<f64>>,
    faces: Vec<[usize; 3]>,
    bounds: Option<Aabb>,
}

impl BoundarySurface {
    /// Creates a surface from raw parts, checking that every face index is in range.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidSurface`] for the first face that references a
    /// vertex outside `vertices`.
    pub fn from_parts(
        vertices: Vec<Point3<f64>>,
        faces: Vec<[usize; 3]>,
    ) -> Result<Self, GeometryError> {
        for (face, indices) in faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= vertices.len()) {
                return Err(GeometryError::InvalidSurface {
                    face,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }
        let bounds = Aabb::from_points(&vertices);
        Ok(Self {
            vertices,
            faces,
            bounds,
        })
    }

    /// A surface with no vertices and no faces.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn bounds(&self) -> Option<&Aabb> {
        self.bounds.as_ref()
    }

    /// Iterates over faces as triples of vertex positions.
    pub fn triangles(&self) -> impl Iterator<Item = [&Point3<f64>; 3]> + '_ {
        self.faces
            .iter()
            .map(|&[a, b, c]| [&self.vertices[a], &self.vertices[b], &self.vertices[c]])
    }

    /// Whether every directed edge is matched by exactly one opposite edge, i.e. the
    /// surface is closed and consistently oriented.
    pub fn is_closed(&self) -> bool {
        let mut edges: HashMap<(usize, usize), usize> = HashMap::with_capacity(self.faces.len() * 3);
        for &[a, b, c] in &self.faces {
            for edge in [(a, b), (b, c), (c, a)] {
                *edges.entry(edge).or_insert(0) += 1;
            }
        }
        edges
            .iter()
            .all(|(&(from, to), &count)| count == 1 && edges.get(&(to, from)) == Some(&1))
    }

    /// Volume enclosed by the surface, from the divergence theorem.
    ///
    /// Only meaningful for closed, outward-oriented surfaces.
    pub fn enclosed_volume(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| a.coords.dot(&b.coords.cross(&c.coords)))
            .sum::<f64>()
            / 6.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn tetrahedron() -> BoundarySurface {
        BoundarySurface::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(0.0, 0.0, 1.0),
            ],
            vec![[1, 2, 3], [0, 3, 2], [0, 1, 3], [0, 2, 1]],
        )
        .unwrap()
    }

    #[test]
    fn from_parts_rejects_out_of_range_indices() {
        let result = BoundarySurface::from_parts(
            vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
            vec![[0, 1, 2], [0, 1, 3]],
        );
        assert_eq!(
            result,
            Err(GeometryError::InvalidSurface {
                face: 1,
                index: 3,
                vertex_count: 3,
            })
        );
    }

    #[test]
    fn empty_surface_has_no_faces_and_no_bounds() {
        let surface = BoundarySurface::empty();
        assert!(surface.is_empty());
        assert_eq!(surface.face_count(), 0);
        assert!(surface.bounds().is_none());
        assert!(surface.is_closed());
    }

    #[test]
    fn tetrahedron_is_closed_with_positive_volume() {
        let surface = tetrahedron();
        assert_eq!(surface.vertex_count(), 4);
        assert_eq!(surface.face_count(), 4);
        assert!(surface.is_closed());
        assert!((surface.enclosed_volume() - 1.0 / 6.0).abs() < TOLERANCE);
        let bounds = surface.bounds().unwrap();
        assert_eq!(bounds.max, Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn open_or_inconsistently_wound_surfaces_are_not_closed() {
        let vertices = tetrahedron().vertices().to_vec();
        let open =
            BoundarySurface::from_parts(vertices.clone(), vec![[1, 2, 3], [0, 3, 2], [0, 1, 3]])
                .unwrap();
        assert!(!open.is_closed());

        let flipped = BoundarySurface::from_parts(
            vertices,
            vec![[1, 2, 3], [0, 3, 2], [0, 1, 3], [0, 1, 2]],
        )
        .unwrap();
        assert!(!flipped.is_closed());
    }

    #[test]
    fn triangles_resolve_face_indices() {
        let surface = tetrahedron();
        let first = surface.triangles().next().unwrap();
        assert_eq!(*first[0], Point3::new(1.0, 0.0, 0.0));
        assert_eq!(*first[2], Point3::new(0.0, 0.0, 1.0));
    }
}
