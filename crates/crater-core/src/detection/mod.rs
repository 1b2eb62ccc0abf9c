pub mod config;
pub mod contour;
pub mod hough;
pub mod scoring;
pub mod template;

use crate::error::{CraterError, Result};
use crate::frame::Frame;

pub use config::{
    ContourParams, DetectorConfig, HoughParams, ScoringConfig, SelectionPolicy, TemplateParams,
    TemplateSource,
};
pub use contour::ContourDetector;
pub use hough::HoughDetector;
pub use scoring::{apply_selection, select_candidates};
pub use template::TemplateDetector;

/// One feature proposed by a detector.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectionCandidate {
    /// Center column (pixels).
    pub x: u32,
    /// Center row (pixels).
    pub y: u32,
    /// Circle radius; `None` for point features.
    pub radius: Option<u32>,
    /// Detection strength; scale depends on the strategy.
    pub confidence: f64,
}

impl DetectionCandidate {
    pub fn circle(x: u32, y: u32, radius: u32, confidence: f64) -> Self {
        Self {
            x,
            y,
            radius: Some(radius),
            confidence,
        }
    }

    pub fn point(x: u32, y: u32, confidence: f64) -> Self {
        Self {
            x,
            y,
            radius: None,
            confidence,
        }
    }
}

/// Which rendition of the image a detector consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetectorInput {
    /// Raw grayscale frame.
    Raw,
    /// Output of [`crate::preprocess::normalize`].
    Preprocessed,
}

/// A crater detection strategy.
///
/// Finding nothing is a valid result (`Ok` with an empty vector).
pub trait CraterDetector: Send + Sync {
    /// Human-readable name.
    fn name(&self) -> &'static str;

    /// Image rendition the strategy expects.
    fn input(&self) -> DetectorInput;

    /// Whether candidate confidences are measured scores. When `false` the
    /// confidence only echoes the run threshold and the minimum-confidence
    /// filter does not apply.
    fn scores_confidence(&self) -> bool {
        true
    }

    fn detect(&self, frame: &Frame) -> Result<Vec<DetectionCandidate>>;
}

/// Build the configured strategy for a caller-supplied threshold in [0, 1].
pub fn build_detector(config: &DetectorConfig, threshold: f64) -> Result<Box<dyn CraterDetector>> {
    validate_threshold(threshold)?;
    let detector: Box<dyn CraterDetector> = match config {
        DetectorConfig::Hough(params) => Box::new(HoughDetector::new(params.clone(), threshold)?),
        DetectorConfig::Contour(params) => Box::new(ContourDetector::new(params.clone())),
        DetectorConfig::Template(params) => {
            Box::new(TemplateDetector::new(params.clone(), threshold))
        }
    };
    Ok(detector)
}

pub(crate) fn validate_threshold(threshold: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(CraterError::InvalidParameter(format!(
            "threshold must be in [0, 1], got {threshold}"
        )));
    }
    Ok(())
}
