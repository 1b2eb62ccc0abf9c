use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogConfig;
use crate::consts::DEFAULT_DETECTION_THRESHOLD;
use crate::detection::{DetectorConfig, ScoringConfig};
use crate::error::{CraterError, Result};
use crate::geo::GeolocationConfig;
use crate::preprocess::PreprocessConfig;

/// Everything one pipeline run needs, loadable from TOML.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CraterConfig {
    /// Detection threshold in [0, 1] handed to the detector.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub preprocess: PreprocessConfig,
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub geolocation: GeolocationConfig,
}

fn default_threshold() -> f64 {
    DEFAULT_DETECTION_THRESHOLD
}

impl Default for CraterConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_DETECTION_THRESHOLD,
            catalog: CatalogConfig::default(),
            preprocess: PreprocessConfig::default(),
            detector: DetectorConfig::default(),
            scoring: ScoringConfig::default(),
            geolocation: GeolocationConfig::default(),
        }
    }
}

impl CraterConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CraterError::InvalidParameter(format!("config: {e}")))
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CraterError::InvalidParameter(format!("config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = CraterConfig::from_toml_str("").unwrap();
        assert_eq!(config, CraterConfig::default());
    }

    #[test]
    fn test_partial_section_fills_defaults() {
        let text = r#"
threshold = 0.5

[detector.Contour]
min_radius = 15
"#;
        let config = CraterConfig::from_toml_str(text).unwrap();
        assert_eq!(config.threshold, 0.5);
        match config.detector {
            DetectorConfig::Contour(p) => {
                assert_eq!(p.min_radius, 15);
                assert_eq!(p.closing_kernel, 5);
            }
            other => panic!("unexpected detector {other:?}"),
        }
    }
}
