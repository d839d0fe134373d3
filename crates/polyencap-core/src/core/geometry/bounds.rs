use nalgebra::{Point3, Vector3};

/// Axis-aligned bounding box of a set of points.
///
/// Used as a cheap rejection test before the per-face containment loop: a query point
/// outside the box of a surface cannot be inside the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    /// Returns `None` for an empty point set.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut aabb = Self {
            min: *first,
            max: *first,
        };
        for p in iter {
            aabb.min = aabb.min.inf(p);
            aabb.max = aabb.max.sup(p);
        }
        Some(aabb)
    }

    pub fn extent(&self) -> Vector3<f64> {
        self.max - self.min
    }

    pub fn diagonal(&self) -> f64 {
        self.extent().norm()
    }

    /// Closed containment test with the box grown by `tolerance` on every side.
    pub fn contains(&self, p: &Point3<f64>, tolerance: f64) -> bool {
        (0..3).all(|axis| {
            p[axis] >= self.min[axis] - tolerance && p[axis] <= self.max[axis] + tolerance
        })
    }
}
