use ndarray::Array2;

use crate::consts::MAX_INTENSITY;

use super::gradient::{sobel, Gradients};

/// Dual-threshold edge detection.
///
/// Thresholds are in 8-bit Sobel units (the frame's [0, 1] samples are scaled
/// by 255 before differentiation). Pipeline: Sobel gradients -> non-maximum
/// suppression along the quantized gradient direction -> hysteresis, where
/// pixels above `low` survive only when 8-connected to a pixel above `high`.
pub fn canny(data: &Array2<f32>, low: f32, high: f32) -> Array2<bool> {
    let grads = sobel(data, MAX_INTENSITY);
    canny_from_gradients(&grads, low, high)
}

/// Same as [`canny`], reusing precomputed gradients.
pub fn canny_from_gradients(grads: &Gradients, low: f32, high: f32) -> Array2<bool> {
    let (low, high) = if low > high { (high, low) } else { (low, high) };
    let mag = grads.magnitude();
    let thin = non_maximum_suppression(&mag, grads);
    hysteresis(&thin, low, high)
}

/// Keep only pixels that are local maxima across the edge.
/// Suppressed pixels are set to zero.
fn non_maximum_suppression(mag: &Array2<f32>, grads: &Gradients) -> Array2<f32> {
    let (h, w) = mag.dim();
    let mut out = Array2::<f32>::zeros((h, w));
    if h < 3 || w < 3 {
        return out;
    }

    for row in 1..h - 1 {
        for col in 1..w - 1 {
            let m = mag[[row, col]];
            if m <= 0.0 {
                continue;
            }
            let angle = grads.gy[[row, col]].atan2(grads.gx[[row, col]]).to_degrees();
            let angle = if angle < 0.0 { angle + 180.0 } else { angle };

            // Neighbors along the gradient direction. Row index grows downward.
            let (a, b) = if !(22.5..157.5).contains(&angle) {
                (mag[[row, col - 1]], mag[[row, col + 1]])
            } else if angle < 67.5 {
                (mag[[row - 1, col - 1]], mag[[row + 1, col + 1]])
            } else if angle < 112.5 {
                (mag[[row - 1, col]], mag[[row + 1, col]])
            } else {
                (mag[[row + 1, col - 1]], mag[[row - 1, col + 1]])
            };

            // Strict on one side so plateaus collapse to a single pixel.
            if m > a && m >= b {
                out[[row, col]] = m;
            }
        }
    }

    out
}

fn hysteresis(thin: &Array2<f32>, low: f32, high: f32) -> Array2<bool> {
    let (h, w) = thin.dim();
    let mut edges = Array2::from_elem((h, w), false);
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for ((row, col), &m) in thin.indexed_iter() {
        if m > high && !edges[[row, col]] {
            edges[[row, col]] = true;
            stack.push((row, col));

            while let Some((r, c)) = stack.pop() {
                for dr in -1..=1_isize {
                    for dc in -1..=1_isize {
                        let nr = r as isize + dr;
                        let nc = c as isize + dc;
                        if nr < 0 || nc < 0 || nr >= h as isize || nc >= w as isize {
                            continue;
                        }
                        let (nr, nc) = (nr as usize, nc as usize);
                        if !edges[[nr, nc]] && thin[[nr, nc]] > low {
                            edges[[nr, nc]] = true;
                            stack.push((nr, nc));
                        }
                    }
                }
            }
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_edge_is_one_pixel_thick() {
        let data = Array2::from_shape_fn((10, 12), |(_, c)| if c < 6 { 0.0f32 } else { 1.0 });
        let edges = canny(&data, 100.0, 200.0);
        for row in 1..9 {
            let count = (0..12).filter(|&c| edges[[row, c]]).count();
            assert_eq!(count, 1, "row {row} has {count} edge pixels");
        }
    }

    #[test]
    fn test_flat_image_has_no_edges() {
        let data = Array2::from_elem((8, 8), 0.5f32);
        let edges = canny(&data, 100.0, 200.0);
        assert!(edges.iter().all(|&e| !e));
    }

    #[test]
    fn test_weak_step_below_high_threshold_is_dropped() {
        // Step of 0.1 -> Sobel magnitude ~ 4 * 25.5 = 102, below high = 200.
        let data = Array2::from_shape_fn((8, 8), |(_, c)| if c < 4 { 0.4f32 } else { 0.5 });
        let edges = canny(&data, 100.0, 200.0);
        assert!(edges.iter().all(|&e| !e));
    }
}
