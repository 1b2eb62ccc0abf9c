use ndarray::{s, Array2};
use rayon::prelude::*;

use crate::consts::{EPSILON, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{CraterError, Result};

/// Zero-mean normalized cross-correlation of `template` slid over `image`.
///
/// Output shape is `(H - h + 1, W - w + 1)`; entry `[r, c]` scores the window
/// whose top-left corner is at `(r, c)` and lies in [-1, 1]. A template with
/// zero variance matches every window with score 1; otherwise a window with
/// zero variance scores 0.
pub fn match_template_normed(image: &Array2<f32>, template: &Array2<f32>) -> Result<Array2<f32>> {
    let (ih, iw) = image.dim();
    let (th, tw) = template.dim();
    if th == 0 || tw == 0 || th > ih || tw > iw {
        return Err(CraterError::InvalidParameter(format!(
            "template {tw}x{th} does not fit image {iw}x{ih}"
        )));
    }

    let n = (th * tw) as f64;
    let t_mean = template.iter().map(|&v| v as f64).sum::<f64>() / n;
    let t_zero: Array2<f64> = template.mapv(|v| v as f64 - t_mean);
    let t_energy: f64 = t_zero.iter().map(|v| v * v).sum();

    let (oh, ow) = (ih - th + 1, iw - tw + 1);
    if t_energy < EPSILON {
        return Ok(Array2::ones((oh, ow)));
    }
    let (sum, sum_sq) = integral_images(image);

    let score_at = |row: usize, col: usize| -> f32 {
        let patch_sum = window_sum(&sum, row, col, th, tw);
        let patch_sq = window_sum(&sum_sq, row, col, th, tw);
        let patch_var = patch_sq - patch_sum * patch_sum / n;
        let denom = (t_energy * patch_var).sqrt();
        if patch_var < EPSILON || denom < EPSILON {
            return 0.0;
        }

        // Sum of t_zero is 0, so the patch mean drops out of the numerator.
        let patch = image.slice(s![row..row + th, col..col + tw]);
        let numer: f64 = patch
            .iter()
            .zip(t_zero.iter())
            .map(|(&p, &t)| p as f64 * t)
            .sum();
        (numer / denom).clamp(-1.0, 1.0) as f32
    };

    let mut result = Array2::<f32>::zeros((oh, ow));
    if oh * ow * th * tw >= PARALLEL_PIXEL_THRESHOLD {
        let rows: Vec<Vec<f32>> = (0..oh)
            .into_par_iter()
            .map(|row| (0..ow).map(|col| score_at(row, col)).collect())
            .collect();
        for (row, row_data) in rows.into_iter().enumerate() {
            for (col, val) in row_data.into_iter().enumerate() {
                result[[row, col]] = val;
            }
        }
    } else {
        for row in 0..oh {
            for col in 0..ow {
                result[[row, col]] = score_at(row, col);
            }
        }
    }

    Ok(result)
}

/// Summed-area tables of values and squared values, padded with a zero
/// leading row and column.
fn integral_images(image: &Array2<f32>) -> (Array2<f64>, Array2<f64>) {
    let (h, w) = image.dim();
    let mut sum = Array2::<f64>::zeros((h + 1, w + 1));
    let mut sum_sq = Array2::<f64>::zeros((h + 1, w + 1));
    for row in 0..h {
        let mut row_sum = 0.0;
        let mut row_sq = 0.0;
        for col in 0..w {
            let v = image[[row, col]] as f64;
            row_sum += v;
            row_sq += v * v;
            sum[[row + 1, col + 1]] = sum[[row, col + 1]] + row_sum;
            sum_sq[[row + 1, col + 1]] = sum_sq[[row, col + 1]] + row_sq;
        }
    }
    (sum, sum_sq)
}

fn window_sum(table: &Array2<f64>, row: usize, col: usize, h: usize, w: usize) -> f64 {
    table[[row + h, col + w]] - table[[row, col + w]] - table[[row + h, col]] + table[[row, col]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_match_is_single_perfect_score() {
        let image = Array2::from_shape_fn((6, 7), |(r, c)| ((r * 3 + c) % 5) as f32 / 4.0);
        let scores = match_template_normed(&image, &image).unwrap();
        assert_eq!(scores.dim(), (1, 1));
        assert!((scores[[0, 0]] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_constant_template_matches_everywhere() {
        let image = Array2::from_shape_fn((6, 6), |(r, c)| (r * c) as f32 / 25.0);
        let template = Array2::from_elem((3, 3), 0.5f32);
        let scores = match_template_normed(&image, &template).unwrap();
        assert_eq!(scores.dim(), (4, 4));
        assert!(scores.iter().all(|&v| v == 1.0));

        let flat = Array2::from_elem((5, 5), 0.5f32);
        let scores = match_template_normed(&flat, &flat).unwrap();
        assert_eq!(scores[[0, 0]], 1.0);
    }

    #[test]
    fn test_flat_window_scores_zero() {
        let template = Array2::from_shape_fn((3, 3), |(r, _)| r as f32);
        let image = Array2::from_elem((5, 5), 0.25f32);
        let scores = match_template_normed(&image, &template).unwrap();
        assert!(scores.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_peak_at_embedded_pattern() {
        let template = Array2::from_shape_fn((3, 3), |(r, c)| if r == 1 || c == 1 { 1.0f32 } else { 0.0 });
        let mut image = Array2::<f32>::zeros((10, 10));
        image.slice_mut(s![4..7, 2..5]).assign(&template);
        let scores = match_template_normed(&image, &template).unwrap();
        assert_eq!(scores.dim(), (8, 8));
        assert!((scores[[4, 2]] - 1.0).abs() < 1e-5);
        let best = scores
            .indexed_iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(idx, _)| idx)
            .unwrap();
        assert_eq!(best, (4, 2));
    }

    #[test]
    fn test_oversized_template_rejected() {
        let image = Array2::<f32>::zeros((4, 4));
        let template = Array2::<f32>::zeros((5, 2));
        assert!(match_template_normed(&image, &template).is_err());
    }
}
