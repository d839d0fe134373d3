use serde::Serialize;

/// One point of an encapsulation efficiency curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    /// Minimum fraction of a drug's atoms that must lie inside the surface.
    pub threshold: f64,
    /// Percentage of valid drugs meeting the threshold, in `[0, 100]`.
    pub percentage: f64,
}

/// Encapsulation efficiency as a function of the inclusion threshold.
///
/// Points are ordered by ascending threshold and the percentage never increases along
/// the curve.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EncapsulationCurve {
    points: Vec<CurvePoint>,
}

impl EncapsulationCurve {
    pub fn new(points: Vec<CurvePoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&CurvePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&CurvePoint> {
        self.points.last()
    }

    pub fn get(&self, index: usize) -> Option<&CurvePoint> {
        self.points.get(index)
    }

    /// Percentage at exactly `threshold`, if that threshold is on the curve.
    pub fn value_at(&self, threshold: f64) -> Option<f64> {
        self.points
            .iter()
            .find(|point| point.threshold == threshold)
            .map(|point| point.percentage)
    }

    pub fn is_monotone_non_increasing(&self) -> bool {
        self.points
            .windows(2)
            .all(|pair| pair[1].percentage <= pair[0].percentage)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CurvePoint> {
        self.points.iter()
    }
}
