use crate::core::geometry::{alpha_shape, containment};
use crate::core::models::containment::Classification;
use crate::core::models::point_cloud::PointCloud;
use crate::core::models::surface::BoundarySurface;
use crate::engine::aggregate::{EncapsulationReport, aggregate, sweep_grid};
use crate::engine::config::AnalysisConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::render::{Frame, render};
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct EncapsulationResult {
    pub surface: BoundarySurface,
    /// One entry per input drug, in input order.
    pub classifications: Vec<Classification>,
    pub report: EncapsulationReport,
}

impl EncapsulationResult {
    /// Describes the plot at `threshold`; see [`render`].
    pub fn frame(&self, threshold: f64) -> Result<Frame<'_>, EngineError> {
        render(
            &self.report.curve,
            &self.surface,
            &self.classifications,
            threshold,
        )
    }

    /// Labels of the drugs excluded from the curve.
    pub fn skipped_labels(&self) -> Vec<&str> {
        self.report
            .skipped
            .iter()
            .filter_map(|skipped| self.classifications.get(skipped.index))
            .map(Classification::label)
            .collect()
    }
}

#[instrument(skip_all, name = "encapsulation_workflow")]
pub fn run(
    polymer: &PointCloud,
    drugs: Vec<PointCloud>,
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<EncapsulationResult, EngineError> {
    info!(
        polymer_points = polymer.len(),
        drugs = drugs.len(),
        alpha = config.alpha,
        "Starting encapsulation analysis."
    );

    // === Phase 1: Alpha shape of the polymer ===
    let surface = reporter.phase("Building Alpha Shape", || {
        alpha_shape::build(polymer.points(), config.alpha)
    })?;

    // === Phase 2: Per-drug containment ===
    let classifications = reporter.phase("Classifying Drugs", || {
        reporter.report(Progress::TaskStart {
            total_steps: drugs.len() as u64,
        });
        let classifications = containment::classify_all(&surface, drugs, || {
            reporter.report(Progress::TaskIncrement)
        });
        reporter.report(Progress::TaskFinish);
        classifications
    });

    // === Phase 3: Threshold sweep ===
    let report = reporter.phase("Aggregating Encapsulation Curve", || {
        aggregate(
            classifications.iter().map(|c| &c.result),
            &sweep_grid(),
        )
    })?;

    info!(
        valid_drugs = report.valid_queries,
        skipped_drugs = report.skipped.len(),
        "Workflow complete."
    );
    Ok(EncapsulationResult {
        surface,
        classifications,
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::GeometryError;
    use crate::engine::config::AnalysisConfigBuilder;
    use crate::engine::render::DrugStatus;
    use nalgebra::Point3;
    use std::sync::{Arc, Mutex};

    fn cube_lattice() -> PointCloud {
        let mut points = Vec::new();
        for x in 0..3 {
            for y in 0..3 {
                for z in 0..3 {
                    points.push(Point3::new(x as f64, y as f64, z as f64));
                }
            }
        }
        PointCloud::new(points).with_label("polymer")
    }

    fn drug(label: &str, points: &[[f64; 3]]) -> PointCloud {
        points
            .iter()
            .map(|&[x, y, z]| Point3::new(x, y, z))
            .collect::<PointCloud>()
            .with_label(label)
    }

    fn config() -> AnalysisConfig {
        AnalysisConfigBuilder::new()
            .alpha(0.0)
            .display_threshold(0.01)
            .build()
            .unwrap()
    }

    #[test]
    fn run_classifies_drugs_and_builds_the_full_curve() {
        let drugs = vec![
            drug("inside", &[[1.0, 1.0, 1.0], [0.5, 1.5, 0.2]]),
            drug("half", &[[1.0, 1.0, 1.0], [9.0, 9.0, 9.0]]),
            drug("outside", &[[-3.0, 0.0, 0.0]]),
        ];
        let result = run(&cube_lattice(), drugs, &config(), &ProgressReporter::new()).unwrap();

        assert_eq!(result.surface.vertex_count(), 26);
        assert!(result.surface.is_closed());
        let fractions: Vec<f64> = result
            .classifications
            .iter()
            .map(|c| c.result.fraction().unwrap())
            .collect();
        assert_eq!(fractions, vec![1.0, 0.5, 0.0]);

        let curve = &result.report.curve;
        assert_eq!(curve.len(), 101);
        assert_eq!(curve.value_at(0.0), Some(100.0));
        assert!((curve.value_at(0.5).unwrap() - 200.0 / 3.0).abs() < 1e-9);
        assert!((curve.value_at(1.0).unwrap() - 100.0 / 3.0).abs() < 1e-9);

        let frame = result.frame(0.01).unwrap();
        assert_eq!(frame.summary().encapsulated, 2);
        assert_eq!(frame.drugs[2].status, DrugStatus::Free);
    }

    #[test]
    fn empty_drugs_are_skipped_but_kept_in_classifications() {
        let drugs = vec![
            drug("inside", &[[1.0, 1.0, 1.0]]),
            PointCloud::default().with_label("blank"),
        ];
        let result = run(&cube_lattice(), drugs, &config(), &ProgressReporter::new()).unwrap();

        assert_eq!(result.classifications.len(), 2);
        assert_eq!(result.report.valid_queries, 1);
        assert_eq!(result.report.skipped[0].error, GeometryError::EmptyQuery);
        assert_eq!(result.skipped_labels(), vec!["blank"]);
        assert_eq!(result.report.curve.value_at(1.0), Some(100.0));
    }

    #[test]
    fn run_reports_phases_and_one_increment_per_drug() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let reporter = ProgressReporter::with_callback(Box::new(move |event| {
            sink.lock().unwrap().push(event);
        }));
        let drugs = vec![
            drug("a", &[[1.0, 1.0, 1.0]]),
            drug("b", &[[5.0, 1.0, 1.0]]),
            drug("c", &[[1.0, 2.0, 1.0]]),
        ];
        run(&cube_lattice(), drugs, &config(), &reporter).unwrap();

        let events = events.lock().unwrap();
        let phases: Vec<&str> = events
            .iter()
            .filter_map(|event| match event {
                Progress::PhaseStart { name } => Some(*name),
                _ => None,
            })
            .collect();
        assert_eq!(
            phases,
            [
                "Building Alpha Shape",
                "Classifying Drugs",
                "Aggregating Encapsulation Curve",
            ]
        );
        let increments = events
            .iter()
            .filter(|event| **event == Progress::TaskIncrement)
            .count();
        assert_eq!(increments, 3);
        assert!(events.contains(&Progress::TaskStart { total_steps: 3 }));
    }

    #[test]
    fn degenerate_polymer_fails_the_run() {
        let polymer = drug("flat", &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let result = run(
            &polymer,
            vec![drug("a", &[[0.0, 0.0, 0.0]])],
            &config(),
            &ProgressReporter::new(),
        );
        assert!(matches!(
            result,
            Err(EngineError::Geometry {
                source: GeometryError::DegenerateGeometry(_)
            })
        ));
    }

    #[test]
    fn run_without_drugs_reports_no_queries() {
        let result = run(&cube_lattice(), Vec::new(), &config(), &ProgressReporter::new());
        assert!(matches!(result, Err(EngineError::NoQueries)));
    }
}
