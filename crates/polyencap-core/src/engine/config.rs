use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

/// Parameters of one encapsulation analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Alpha-shape parameter; `0` selects the convex hull.
    pub alpha: f64,
    /// Inclusion threshold used to mark individual drugs as encapsulated when rendering.
    pub display_threshold: f64,
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    alpha: Option<f64>,
    display_threshold: Option<f64>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }
    pub fn display_threshold(mut self, threshold: f64) -> Self {
        self.display_threshold = Some(threshold);
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let alpha = self.alpha.ok_or(ConfigError::MissingParameter("alpha"))?;
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(ConfigError::InvalidValue {
                parameter: "alpha",
                reason: format!("must be a finite non-negative number, got {}", alpha),
            });
        }

        let display_threshold = self
            .display_threshold
            .ok_or(ConfigError::MissingParameter("display_threshold"))?;
        if !(0.0..=1.0).contains(&display_threshold) {
            return Err(ConfigError::InvalidValue {
                parameter: "display_threshold",
                reason: format!("must lie in [0, 1], got {}", display_threshold),
            });
        }

        Ok(AnalysisConfig {
            alpha,
            display_threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_produces_config_with_all_parameters() {
        let config = AnalysisConfigBuilder::new()
            .alpha(0.1)
            .display_threshold(0.01)
            .build()
            .unwrap();
        assert_eq!(config.alpha, 0.1);
        assert_eq!(config.display_threshold, 0.01);
    }

    #[test]
    fn builder_reports_missing_parameters() {
        assert_eq!(
            AnalysisConfigBuilder::new().display_threshold(0.5).build(),
            Err(ConfigError::MissingParameter("alpha"))
        );
        assert_eq!(
            AnalysisConfigBuilder::new().alpha(0.0).build(),
            Err(ConfigError::MissingParameter("display_threshold"))
        );
    }

    #[test]
    fn builder_rejects_out_of_range_values() {
        let negative_alpha = AnalysisConfigBuilder::new()
            .alpha(-1.0)
            .display_threshold(0.5)
            .build();
        assert!(matches!(
            negative_alpha,
            Err(ConfigError::InvalidValue {
                parameter: "alpha",
                ..
            })
        ));

        let threshold_above_one = AnalysisConfigBuilder::new()
            .alpha(1.0)
            .display_threshold(1.5)
            .build();
        assert!(matches!(
            threshold_above_one,
            Err(ConfigError::InvalidValue {
                parameter: "display_threshold",
                ..
            })
        ));
    }
}
