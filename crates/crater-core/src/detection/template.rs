use ndarray::Array2;
use tracing::{debug, warn};

use crate::error::{CraterError, Result};
use crate::frame::Frame;
use crate::vision::correlation::match_template_normed;

use super::config::{TemplateParams, TemplateSource};
use super::{CraterDetector, DetectionCandidate, DetectorInput};

/// Strategy C: normalized cross-correlation against a template.
#[derive(Clone, Debug)]
pub struct TemplateDetector {
    params: TemplateParams,
    threshold: f64,
}

impl TemplateDetector {
    pub fn new(params: TemplateParams, threshold: f64) -> Self {
        Self { params, threshold }
    }
}

impl CraterDetector for TemplateDetector {
    fn name(&self) -> &'static str {
        "template"
    }

    fn input(&self) -> DetectorInput {
        DetectorInput::Preprocessed
    }

    fn detect(&self, frame: &Frame) -> Result<Vec<DetectionCandidate>> {
        detect_template(frame, &self.params, self.threshold)
    }
}

/// Filled disk of side `2 * radius + 1`: 1 inside, 0 outside.
pub fn disk_template(radius: u32) -> Array2<f32> {
    let side = 2 * radius as usize + 1;
    let r = radius as f64;
    Array2::from_shape_fn((side, side), |(row, col)| {
        let dy = row as f64 - r;
        let dx = col as f64 - r;
        if dx * dx + dy * dy <= r * r {
            1.0
        } else {
            0.0
        }
    })
}

/// Every window scoring at least `threshold` becomes a radius-less candidate
/// centered on the window, with the score as its confidence.
pub fn detect_template(
    frame: &Frame,
    params: &TemplateParams,
    threshold: f64,
) -> Result<Vec<DetectionCandidate>> {
    super::validate_threshold(threshold)?;
    if frame.is_empty() {
        return Ok(Vec::new());
    }

    let scores = match &params.source {
        TemplateSource::SelfImage => {
            warn!("correlating the image with itself; result reflects self-similarity only");
            match_template_normed(&frame.data, &frame.data)?
        }
        TemplateSource::Disk { radius } => {
            let template = disk_template(*radius);
            if template.nrows() > frame.height() || template.ncols() > frame.width() {
                return Err(CraterError::InvalidParameter(format!(
                    "disk template r={radius} is larger than the {}x{} image",
                    frame.width(),
                    frame.height()
                )));
            }
            match_template_normed(&frame.data, &template)?
        }
    };

    let (th, tw) = match &params.source {
        TemplateSource::SelfImage => frame.data.dim(),
        TemplateSource::Disk { radius } => {
            let side = 2 * *radius as usize + 1;
            (side, side)
        }
    };

    let candidates: Vec<DetectionCandidate> = scores
        .indexed_iter()
        .filter(|(_, score)| **score as f64 >= threshold)
        .map(|((row, col), &score)| {
            DetectionCandidate::point((col + tw / 2) as u32, (row + th / 2) as u32, score as f64)
        })
        .collect();

    debug!(
        source = %params.source,
        locations = scores.len(),
        accepted = candidates.len(),
        "template matching complete"
    );
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_template_shape() {
        let disk = disk_template(2);
        assert_eq!(disk.dim(), (5, 5));
        assert_eq!(disk[[2, 2]], 1.0);
        assert_eq!(disk[[0, 2]], 1.0);
        assert_eq!(disk[[0, 0]], 0.0);
        assert_eq!(disk.iter().filter(|&&v| v > 0.0).count(), 13);
    }

    #[test]
    fn test_oversized_disk_rejected() {
        let frame = Frame::new(Array2::zeros((10, 10)), 8);
        let params = TemplateParams {
            source: TemplateSource::Disk { radius: 8 },
        };
        assert!(detect_template(&frame, &params, 0.5).is_err());
    }
}
