use super::point_cloud::PointCloud;
use crate::core::geometry::GeometryError;

/// Inside/outside flags for every point of one query cloud, in the cloud's point order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContainmentResult {
    inside: Vec<bool>,
}

impl ContainmentResult {
    pub fn new(inside: Vec<bool>) -> Self {
        Self { inside }
    }

    pub fn flags(&self) -> &[bool] {
        &self.inside
    }

    pub fn len(&self) -> usize {
        self.inside.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inside.is_empty()
    }

    pub fn inside_count(&self) -> usize {
        self.inside.iter().filter(|&&inside| inside).count()
    }

    /// Fraction of points classified as inside, in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyQuery`] when the query had no points, since the
    /// fraction is undefined.
    pub fn fraction(&self) -> Result<f64, GeometryError> {
        if self.inside.is_empty() {
            return Err(GeometryError::EmptyQuery);
        }
        Ok(self.inside_count() as f64 / self.inside.len() as f64)
    }

    /// Whether at least `threshold` of the points are inside.
    pub fn is_encapsulated(&self, threshold: f64) -> Result<bool, GeometryError> {
        Ok(self.fraction()? >= threshold)
    }
}

/// A query cloud paired with its classification against the boundary surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub drug: PointCloud,
    pub result: ContainmentResult,
}

impl Classification {
    pub fn label(&self) -> &str {
        self.drug.display_label()
    }
}
