use ndarray::Array2;

use crate::consts::INTENSITY_LEVELS;
use crate::frame::Frame;

/// Histogram equalization over 256 levels.
///
/// Samples are quantized to 8 bits, then remapped through the normalized
/// cumulative histogram so that the output levels spread over [0, 255].
/// A frame holding a single level is returned quantized but otherwise unchanged.
pub fn equalize_histogram(frame: &Frame) -> Frame {
    let levels = frame.to_u8_levels();
    Frame::from_u8_levels(&equalize_levels(&levels))
}

/// Equalize an 8-bit level array.
pub fn equalize_levels(levels: &Array2<u8>) -> Array2<u8> {
    let mut histogram = [0u64; INTENSITY_LEVELS];
    for &v in levels.iter() {
        histogram[v as usize] += 1;
    }

    let total = levels.len() as u64;
    let cdf_min = histogram.iter().copied().find(|&c| c > 0).unwrap_or(0);
    if total == 0 || total == cdf_min {
        return levels.clone();
    }

    let mut lut = [0u8; INTENSITY_LEVELS];
    let scale = (INTENSITY_LEVELS - 1) as f64 / (total - cdf_min) as f64;
    let mut cdf = 0u64;
    for (level, &count) in histogram.iter().enumerate() {
        cdf += count;
        let mapped = (cdf.saturating_sub(cdf_min)) as f64 * scale;
        lut[level] = mapped.round().clamp(0.0, 255.0) as u8;
    }

    levels.mapv(|v| lut[v as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equalize_spreads_narrow_range() {
        let data = Array2::from_shape_fn((4, 4), |(r, c)| 100 + (r * 4 + c) as u8);
        let eq = equalize_levels(&data);
        assert_eq!(*eq.iter().min().unwrap(), 0);
        assert_eq!(*eq.iter().max().unwrap(), 255);
    }

    #[test]
    fn test_equalize_constant_is_identity() {
        let data = Array2::from_elem((5, 5), 77u8);
        assert_eq!(equalize_levels(&data), data);
    }

    #[test]
    fn test_equalize_is_monotonic() {
        let data = Array2::from_shape_fn((8, 8), |(r, c)| ((r * 31 + c * 7) % 200) as u8);
        let eq = equalize_levels(&data);
        for (a, ea) in data.iter().zip(eq.iter()) {
            for (b, eb) in data.iter().zip(eq.iter()) {
                if a < b {
                    assert!(ea <= eb);
                }
            }
        }
    }
}
