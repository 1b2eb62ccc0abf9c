use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

/// Apply Gaussian blur to a raw array using separable 1D convolution.
/// Borders are replicated.
pub fn gaussian_blur_array(data: &Array2<f32>, sigma: f32) -> Array2<f32> {
    if sigma <= 0.0 {
        return data.clone();
    }
    let kernel = make_gaussian_kernel(sigma);
    convolve_separable(data, &kernel)
}

/// Local mean over a `size x size` window with replicated borders.
pub fn box_mean_array(data: &Array2<f32>, size: usize) -> Array2<f32> {
    let size = size.max(1);
    let kernel = vec![1.0 / size as f32; size];
    convolve_separable(data, &kernel)
}

fn make_gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (sigma * 3.0).ceil() as usize;
    let size = 2 * radius + 1;
    let mut kernel = vec![0.0f32; size];
    let s2 = 2.0 * sigma * sigma;
    let mut sum = 0.0f32;

    for (i, k) in kernel.iter_mut().enumerate() {
        let x = i as f32 - radius as f32;
        *k = (-x * x / s2).exp();
        sum += *k;
    }

    for v in &mut kernel {
        *v /= sum;
    }

    kernel
}

/// Row pass then column pass with the same symmetric kernel.
fn convolve_separable(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let row_pass = convolve_axis(data, kernel, Axis::Row);
    convolve_axis(&row_pass, kernel, Axis::Col)
}

#[derive(Clone, Copy)]
enum Axis {
    Row,
    Col,
}

fn convolve_axis(data: &Array2<f32>, kernel: &[f32], axis: Axis) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = kernel.len() as isize / 2;

    let sample = |row: usize, col: usize| -> f32 {
        let mut sum = 0.0f32;
        for (ki, &kv) in kernel.iter().enumerate() {
            let offset = ki as isize - radius;
            let v = match axis {
                Axis::Row => {
                    let src = (col as isize + offset).clamp(0, w as isize - 1) as usize;
                    data[[row, src]]
                }
                Axis::Col => {
                    let src = (row as isize + offset).clamp(0, h as isize - 1) as usize;
                    data[[src, col]]
                }
            };
            sum += v * kv;
        }
        sum
    };

    let mut result = Array2::<f32>::zeros((h, w));
    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        let rows: Vec<Vec<f32>> = (0..h)
            .into_par_iter()
            .map(|row| (0..w).map(|col| sample(row, col)).collect())
            .collect();
        for (row, row_data) in rows.into_iter().enumerate() {
            for (col, val) in row_data.into_iter().enumerate() {
                result[[row, col]] = val;
            }
        }
    } else {
        for row in 0..h {
            for col in 0..w {
                result[[row, col]] = sample(row, col);
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_mean_of_constant_is_constant() {
        let data = Array2::from_elem((7, 9), 0.4f32);
        let mean = box_mean_array(&data, 5);
        assert!(mean.iter().all(|&v| (v - 0.4).abs() < 1e-6));
    }

    #[test]
    fn test_box_mean_replicates_border() {
        let mut data = Array2::zeros((3, 3));
        data[[0, 0]] = 9.0f32;
        let mean = box_mean_array(&data, 3);
        // Corner window sees the corner pixel four times after replication.
        assert!((mean[[0, 0]] - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_gaussian_preserves_mass_in_interior() {
        let mut data = Array2::zeros((21, 21));
        data[[10, 10]] = 1.0f32;
        let blurred = gaussian_blur_array(&data, 1.0);
        let total: f32 = blurred.iter().sum();
        assert!((total - 1.0).abs() < 1e-4);
        assert!(blurred[[10, 10]] < 1.0);
    }
}
