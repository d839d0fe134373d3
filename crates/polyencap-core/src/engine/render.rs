//! Pure scene description of one encapsulation plot.
//!
//! [`render`] gathers everything a presentation layer needs to draw the curve panel and
//! the 3D panel for a given display threshold. It holds no drawing state, so a viewer
//! can call it once per frame while sweeping the threshold.

use super::error::EngineError;
use crate::core::models::containment::Classification;
use crate::core::models::curve::{CurvePoint, EncapsulationCurve};
use crate::core::models::surface::BoundarySurface;
use nalgebra::Point3;

/// Index of the curve point used as the lower reference line.
const LOWER_REFERENCE_INDEX: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrugStatus {
    /// At least the display threshold of the drug's atoms lie inside the surface.
    Encapsulated,
    /// Fewer atoms than the display threshold lie inside.
    Free,
    /// The drug has no atoms, so no fraction is defined.
    Invalid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrugMarker<'a> {
    pub label: &'a str,
    pub points: &'a [Point3<f64>],
    pub fraction: Option<f64>,
    pub status: DrugStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame<'a> {
    /// The curve series, threshold on x and percentage on y.
    pub curve: &'a [CurvePoint],
    /// Percentages at which horizontal reference lines are drawn.
    pub reference_lines: Vec<f64>,
    /// Threshold at which the vertical marker is drawn.
    pub threshold: f64,
    pub surface: &'a BoundarySurface,
    pub drugs: Vec<DrugMarker<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameSummary {
    pub encapsulated: usize,
    pub free: usize,
    pub invalid: usize,
}

impl Frame<'_> {
    pub fn summary(&self) -> FrameSummary {
        let mut summary = FrameSummary::default();
        for drug in &self.drugs {
            match drug.status {
                DrugStatus::Encapsulated => summary.encapsulated += 1,
                DrugStatus::Free => summary.free += 1,
                DrugStatus::Invalid => summary.invalid += 1,
            }
        }
        summary
    }
}

/// Describes the plot for `threshold`.
///
/// The reference lines sit at the curve's second and last points, i.e. the share of
/// drugs with any overlap at all and the share that is fully enclosed.
///
/// # Errors
///
/// Returns [`EngineError::InvalidThresholds`] if `threshold` is outside `[0, 1]`.
pub fn render<'a>(
    curve: &'a EncapsulationCurve,
    surface: &'a BoundarySurface,
    classifications: &'a [Classification],
    threshold: f64,
) -> Result<Frame<'a>, EngineError> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(EngineError::InvalidThresholds(format!(
            "display threshold {} is outside [0, 1]",
            threshold
        )));
    }

    let reference_lines = [curve.get(LOWER_REFERENCE_INDEX), curve.last()]
        .into_iter()
        .flatten()
        .map(|point| point.percentage)
        .collect();

    let drugs = classifications
        .iter()
        .map(|classification| {
            let fraction = classification.result.fraction().ok();
            let status = match classification.result.is_encapsulated(threshold) {
                Ok(true) => DrugStatus::Encapsulated,
                Ok(false) => DrugStatus::Free,
                Err(_) => DrugStatus::Invalid,
            };
            DrugMarker {
                label: classification.label(),
                points: classification.drug.points(),
                fraction,
                status,
            }
        })
        .collect();

    Ok(Frame {
        curve: curve.points(),
        reference_lines,
        threshold,
        surface,
        drugs,
    })
}
