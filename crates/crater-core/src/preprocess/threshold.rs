use ndarray::Array2;

use crate::error::{CraterError, Result};
use crate::filters::gaussian_blur::box_mean_array;

/// Adaptive mean thresholding on 8-bit levels.
///
/// Each pixel is compared against the mean of its `block_size x block_size`
/// neighborhood (borders replicated). A pixel is foreground when
/// `level - round(mean) > -bias`, i.e. when it is no darker than the local mean
/// minus `bias`.
pub fn adaptive_threshold_mean(
    levels: &Array2<u8>,
    block_size: usize,
    bias: f32,
) -> Result<Array2<bool>> {
    validate_block_size(block_size)?;

    let as_float = levels.mapv(|v| v as f32);
    let mean = box_mean_array(&as_float, block_size);

    let mut mask = Array2::from_elem(levels.dim(), false);
    for ((idx, &level), &m) in levels.indexed_iter().zip(mean.iter()) {
        let diff = level as f32 - m.round();
        mask[idx] = diff > -bias;
    }
    Ok(mask)
}

/// Block sizes must be odd and at least 3.
pub fn validate_block_size(block_size: usize) -> Result<()> {
    if block_size < 3 || block_size % 2 == 0 {
        return Err(CraterError::InvalidParameter(format!(
            "block_size must be odd and >= 3, got {block_size}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_region_is_foreground() {
        let levels = Array2::from_elem((15, 15), 90u8);
        let mask = adaptive_threshold_mean(&levels, 11, 2.0).unwrap();
        assert!(mask.iter().all(|&v| v));
    }

    #[test]
    fn test_dark_side_of_step_is_background() {
        // Left half dark, right half bright.
        let levels = Array2::from_shape_fn((11, 20), |(_, c)| if c < 10 { 20u8 } else { 220u8 });
        let mask = adaptive_threshold_mean(&levels, 5, 2.0).unwrap();
        // Dark pixel next to the step sees a brighter mean.
        assert!(!mask[[5, 9]]);
        // Bright pixel next to the step sees a darker mean.
        assert!(mask[[5, 10]]);
        // Far from the step both sides are uniform.
        assert!(mask[[5, 0]]);
        assert!(mask[[5, 19]]);
    }

    #[test]
    fn test_even_block_size_rejected() {
        let levels = Array2::from_elem((4, 4), 0u8);
        assert!(adaptive_threshold_mean(&levels, 10, 2.0).is_err());
        assert!(adaptive_threshold_mean(&levels, 1, 2.0).is_err());
    }
}
