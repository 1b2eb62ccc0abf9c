use tracing::debug;

use crate::consts::CONTOUR_CONFIDENCE;
use crate::error::{CraterError, Result};
use crate::frame::Frame;
use crate::vision::canny::canny;
use crate::vision::contours::find_external_contours;
use crate::vision::enclosing::min_enclosing_circle;
use crate::vision::morphology::{morphological_closing, StructuringElement};

use super::config::ContourParams;
use super::{CraterDetector, DetectionCandidate, DetectorInput};

/// Strategy B: closed edge contours fitted with minimum enclosing circles.
/// Runs on the raw frame.
#[derive(Clone, Debug)]
pub struct ContourDetector {
    params: ContourParams,
}

impl ContourDetector {
    pub fn new(params: ContourParams) -> Self {
        Self { params }
    }
}

impl CraterDetector for ContourDetector {
    fn name(&self) -> &'static str {
        "contour"
    }

    fn input(&self) -> DetectorInput {
        DetectorInput::Raw
    }

    fn detect(&self, frame: &Frame) -> Result<Vec<DetectionCandidate>> {
        detect_contours(frame, &self.params)
    }
}

/// Whether an enclosing radius survives the noise filter.
///
/// The radius is truncated toward zero before comparing, so 10.9 is treated
/// as 10 and rejected with the default minimum of 10.
pub fn passes_radius_filter(radius: f64, min_radius: u32) -> bool {
    radius.trunc() > min_radius as f64
}

pub fn detect_contours(frame: &Frame, params: &ContourParams) -> Result<Vec<DetectionCandidate>> {
    if params.closing_kernel == 0 {
        return Err(CraterError::InvalidParameter(
            "closing kernel must be at least 1 pixel".into(),
        ));
    }
    if params.canny_low > params.canny_high {
        return Err(CraterError::InvalidParameter(format!(
            "Canny low threshold {} exceeds high threshold {}",
            params.canny_low, params.canny_high
        )));
    }

    let edges = canny(&frame.data, params.canny_low, params.canny_high);
    let element = StructuringElement::ellipse(params.closing_kernel, params.closing_kernel);
    let closed = morphological_closing(&edges, &element);
    let contours = find_external_contours(&closed);

    let mut candidates = Vec::new();
    for contour in &contours {
        let Some(circle) = min_enclosing_circle(&contour.points) else {
            continue;
        };
        if !passes_radius_filter(circle.radius, params.min_radius) {
            continue;
        }
        candidates.push(DetectionCandidate::circle(
            circle.cx.max(0.0) as u32,
            circle.cy.max(0.0) as u32,
            circle.radius as u32,
            CONTOUR_CONFIDENCE,
        ));
    }

    debug!(
        contours = contours.len(),
        accepted = candidates.len(),
        "contour enclosure complete"
    );
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    #[test]
    fn test_radius_filter_boundary() {
        assert!(!passes_radius_filter(10.0, 10));
        assert!(!passes_radius_filter(10.9, 10));
        assert!(passes_radius_filter(11.0, 10));
        assert!(passes_radius_filter(35.2, 10));
    }

    #[test]
    fn test_flat_frame_has_no_contours() {
        let frame = Frame::new(Array2::from_elem((40, 40), 0.3), 8);
        let found = detect_contours(&frame, &ContourParams::default()).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let frame = Frame::new(Array2::zeros((8, 8)), 8);
        let params = ContourParams {
            canny_low: 300.0,
            canny_high: 100.0,
            ..ContourParams::default()
        };
        assert!(detect_contours(&frame, &params).is_err());
    }
}
