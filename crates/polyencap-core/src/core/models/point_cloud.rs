use crate::core::geometry::bounds::Aabb;
use nalgebra::Point3;

/// An ordered set of 3D atom coordinates belonging to one molecular entity.
///
/// A cloud is either the reference (polymer) structure the alpha shape is built from, or
/// a query (drug) whose atoms are classified against that shape. The order of the points
/// is preserved exactly as parsed, so classification results can be aligned with it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointCloud {
    label: Option<String>,
    points: Vec<Point3<f64>>,
}

impl PointCloud {
    pub fn new(points: Vec<Point3<f64>>) -> Self {
        Self {
            label: None,
            points,
        }
    }

    /// Attaches a human-readable label, usually the stem of the source file.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Label for log and report output; falls back to `"<unnamed>"`.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or("<unnamed>")
    }

    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point3<f64>> {
        self.points.iter()
    }

    /// Bounding box of the cloud, or `None` when it has no points.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(&self.points)
    }

    pub fn into_points(self) -> Vec<Point3<f64>> {
        self.points
    }
}

impl FromIterator<Point3<f64>> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Point3<f64>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a Point3<f64>;
    type IntoIter = std::slice::Iter<'a, Point3<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cloud_preserves_point_order_and_has_no_label() {
        let cloud = PointCloud::new(vec![Point3::new(3.0, 2.0, 1.0), Point3::new(0.0, 0.0, 0.0)]);
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud.points()[0], Point3::new(3.0, 2.0, 1.0));
        assert_eq!(cloud.label(), None);
        assert_eq!(cloud.display_label(), "<unnamed>");
    }

    #[test]
    fn with_label_sets_label() {
        let cloud = PointCloud::default().with_label("drug_07");
        assert_eq!(cloud.label(), Some("drug_07"));
        assert_eq!(cloud.display_label(), "drug_07");
        assert!(cloud.is_empty());
    }

    #[test]
    fn collect_from_iterator_builds_cloud() {
        let cloud: PointCloud = (0..4).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
        assert_eq!(cloud.len(), 4);
        assert_eq!(cloud.iter().last(), Some(&Point3::new(3.0, 0.0, 0.0)));
    }

    #[test]
    fn bounds_is_none_for_empty_cloud() {
        assert!(PointCloud::default().bounds().is_none());
        let cloud = PointCloud::new(vec![Point3::new(1.0, 2.0, 3.0), Point3::new(-1.0, 0.0, 5.0)]);
        let bounds = cloud.bounds().unwrap();
        assert_eq!(bounds.min, Point3::new(-1.0, 0.0, 3.0));
        assert_eq!(bounds.max, Point3::new(1.0, 2.0, 5.0));
    }
}
