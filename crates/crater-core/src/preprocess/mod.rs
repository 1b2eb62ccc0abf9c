pub mod threshold;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{DEFAULT_BLOCK_SIZE, DEFAULT_THRESHOLD_BIAS};
use crate::error::{CraterError, Result};
use crate::filters::histogram::equalize_levels;
use crate::frame::Frame;

use threshold::adaptive_threshold_mean;

/// Parameters for turning a raw grayscale frame into a binary one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Local window size for adaptive thresholding (odd, >= 3).
    #[serde(default = "default_block_size")]
    pub block_size: usize,
    /// Constant subtracted from the local mean, in 8-bit intensity units.
    #[serde(default = "default_bias")]
    pub bias: f32,
}

fn default_block_size() -> usize {
    DEFAULT_BLOCK_SIZE
}
fn default_bias() -> f32 {
    DEFAULT_THRESHOLD_BIAS
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            bias: DEFAULT_THRESHOLD_BIAS,
        }
    }
}

/// Normalize a frame: histogram equalization followed by adaptive mean
/// thresholding. The result holds only 0.0 (background) and 1.0 (foreground).
///
/// Thresholding runs on the equalized levels, so the two steps cannot be
/// swapped.
pub fn normalize(frame: &Frame, config: &PreprocessConfig) -> Result<Frame> {
    if frame.is_empty() {
        return Err(CraterError::image_load(
            "<frame>",
            format!("empty frame {}x{}", frame.width(), frame.height()),
        ));
    }

    let equalized = equalize_levels(&frame.to_u8_levels());
    let mask = adaptive_threshold_mean(&equalized, config.block_size, config.bias)?;
    let foreground = mask.iter().filter(|&&v| v).count();
    debug!(
        block_size = config.block_size,
        bias = config.bias,
        foreground,
        total = mask.len(),
        "Preprocessed frame"
    );

    Ok(Frame::new(mask.mapv(|v| if v { 1.0 } else { 0.0 }), 1))
}
