use super::error::EngineError;
use crate::core::geometry::GeometryError;
use crate::core::models::containment::ContainmentResult;
use crate::core::models::curve::{CurvePoint, EncapsulationCurve};
use tracing::{info, warn};

/// Number of intervals in the default threshold sweep.
pub const GRID_INTERVALS: usize = 100;

/// The default sweep: `i / 100` for `i = 0..=100`.
pub fn sweep_grid() -> Vec<f64> {
    (0..=GRID_INTERVALS)
        .map(|i| i as f64 / GRID_INTERVALS as f64)
        .collect()
}

/// A query excluded from the curve, identified by its position in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedQuery {
    pub index: usize,
    pub error: GeometryError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EncapsulationReport {
    pub curve: EncapsulationCurve,
    pub skipped: Vec<SkippedQuery>,
    /// Number of queries the curve percentages are relative to.
    pub valid_queries: usize,
}

/// Sweeps `thresholds` over the containment fractions of `results`.
///
/// At each threshold `t` the curve holds the percentage of valid queries whose fraction
/// of inside points is at least `t`. Queries without points have no fraction; they are
/// excluded from the denominator and listed in [`EncapsulationReport::skipped`].
///
/// # Errors
///
/// * [`EngineError::InvalidThresholds`] if `thresholds` is empty, leaves `[0, 1]`, or is
///   not strictly ascending.
/// * [`EngineError::NoQueries`] if no query has a defined fraction.
pub fn aggregate<'a>(
    results: impl IntoIterator<Item = &'a ContainmentResult>,
    thresholds: &[f64],
) -> Result<EncapsulationReport, EngineError> {
    validate_thresholds(thresholds)?;

    let mut fractions = Vec::new();
    let mut skipped = Vec::new();
    for (index, result) in results.into_iter().enumerate() {
        match result.fraction() {
            Ok(fraction) => fractions.push(fraction),
            Err(error) => {
                warn!("Query #{} excluded from the curve: {}", index, error);
                skipped.push(SkippedQuery { index, error });
            }
        }
    }
    if fractions.is_empty() {
        return Err(EngineError::NoQueries);
    }

    let total = fractions.len() as f64;
    let points = thresholds
        .iter()
        .map(|&threshold| {
            let encapsulated = fractions.iter().filter(|&&f| f >= threshold).count();
            CurvePoint {
                threshold,
                percentage: encapsulated as f64 / total * 100.0,
            }
        })
        .collect();

    info!(
        valid = fractions.len(),
        skipped = skipped.len(),
        "Encapsulation curve aggregated over {} thresholds.",
        thresholds.len()
    );
    Ok(EncapsulationReport {
        curve: EncapsulationCurve::new(points),
        skipped,
        valid_queries: fractions.len(),
    })
}

fn validate_thresholds(thresholds: &[f64]) -> Result<(), EngineError> {
    if thresholds.is_empty() {
        return Err(EngineError::InvalidThresholds(
            "at least one threshold is required".into(),
        ));
    }
    if let Some(t) = thresholds.iter().find(|t| !(0.0..=1.0).contains(*t)) {
        return Err(EngineError::InvalidThresholds(format!(
            "threshold {} is outside [0, 1]",
            t
        )));
    }
    if let Some(pair) = thresholds.windows(2).find(|pair| pair[1] <= pair[0]) {
        return Err(EngineError::InvalidThresholds(format!(
            "thresholds must be strictly ascending ({} followed by {})",
            pair[0], pair[1]
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn result_with(inside: usize, total: usize) -> ContainmentResult {
        ContainmentResult::new((0..total).map(|i| i < inside).collect())
    }

    #[test]
    fn sweep_grid_has_101_evenly_spaced_points() {
        let grid = sweep_grid();
        assert_eq!(grid.len(), 101);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[1], 0.01);
        assert_eq!(grid[50], 0.5);
        assert_eq!(grid[100], 1.0);
    }

    #[test]
    fn three_drug_example_gives_expected_percentages() {
        let results = [result_with(4, 4), result_with(2, 4), result_with(0, 4)];
        let report = aggregate(&results, &[0.0, 0.5, 1.0]).unwrap();
        let values: Vec<f64> = report.curve.iter().map(|p| p.percentage).collect();

        assert_eq!(report.valid_queries, 3);
        assert!(report.skipped.is_empty());
        assert!(f64_approx_equal(values[0], 100.0));
        assert!(f64_approx_equal(values[1], 200.0 / 3.0));
        assert!(f64_approx_equal(values[2], 100.0 / 3.0));
    }

    #[test]
    fn curve_is_monotone_over_the_full_grid() {
        let results: Vec<ContainmentResult> = (0..23)
            .map(|i| result_with((i * 7) % 13, 12 + i % 5))
            .collect();
        let report = aggregate(&results, &sweep_grid()).unwrap();
        assert_eq!(report.curve.len(), 101);
        assert!(report.curve.is_monotone_non_increasing());
        assert_eq!(report.curve.first().map(|p| p.percentage), Some(100.0));
    }

    #[test]
    fn empty_queries_are_skipped_and_reported() {
        let results = [
            result_with(1, 1),
            ContainmentResult::default(),
            result_with(0, 3),
        ];
        let report = aggregate(&results, &[0.0, 0.5]).unwrap();

        assert_eq!(report.valid_queries, 2);
        assert_eq!(
            report.skipped,
            vec![SkippedQuery {
                index: 1,
                error: GeometryError::EmptyQuery,
            }]
        );
        assert_eq!(report.curve.value_at(0.0), Some(100.0));
        assert_eq!(report.curve.value_at(0.5), Some(50.0));
    }

    #[test]
    fn no_valid_queries_is_an_error() {
        let none: [ContainmentResult; 0] = [];
        assert!(matches!(
            aggregate(&none, &sweep_grid()),
            Err(EngineError::NoQueries)
        ));

        let all_empty = [ContainmentResult::default(), ContainmentResult::default()];
        assert!(matches!(
            aggregate(&all_empty, &sweep_grid()),
            Err(EngineError::NoQueries)
        ));
    }

    #[test]
    fn invalid_threshold_grids_are_rejected() {
        let results = [result_with(1, 2)];
        for thresholds in [&[][..], &[0.0, 1.5][..], &[0.5, 0.5][..], &[0.6, 0.2][..]] {
            assert!(matches!(
                aggregate(&results, thresholds),
                Err(EngineError::InvalidThresholds(_))
            ));
        }
    }
}
