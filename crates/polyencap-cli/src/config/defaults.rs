use crate::cli::InputFormat;

pub struct DefaultsConfig {
    pub alpha: f64,
    pub display_threshold: f64,
    pub format: InputFormat,
    pub drug_extension: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            display_threshold: 0.01,
            format: InputFormat::Auto,
            drug_extension: "txt".to_string(),
        }
    }
}
