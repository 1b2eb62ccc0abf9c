use ndarray::Array2;

/// Horizontal and vertical Sobel responses of an image.
#[derive(Clone, Debug)]
pub struct Gradients {
    pub gx: Array2<f32>,
    pub gy: Array2<f32>,
}

impl Gradients {
    pub fn magnitude(&self) -> Array2<f32> {
        let mut mag = Array2::<f32>::zeros(self.gx.dim());
        for ((m, &x), &y) in mag.iter_mut().zip(self.gx.iter()).zip(self.gy.iter()) {
            *m = (x * x + y * y).sqrt();
        }
        mag
    }
}

/// Compute Sobel gradients, scaling samples by `scale` first.
///
/// With `scale = 255` on [0, 1] data the responses are in the same units as
/// an 8-bit Sobel operator, which is what edge thresholds are expressed in.
/// The 1-pixel border is zero (the kernel needs a 3x3 neighborhood).
pub fn sobel(data: &Array2<f32>, scale: f32) -> Gradients {
    let (h, w) = data.dim();
    let mut gx = Array2::<f32>::zeros((h, w));
    let mut gy = Array2::<f32>::zeros((h, w));

    if h < 3 || w < 3 {
        return Gradients { gx, gy };
    }

    for row in 1..h - 1 {
        for col in 1..w - 1 {
            let x = -data[[row - 1, col - 1]] as f64 + data[[row - 1, col + 1]] as f64
                - 2.0 * data[[row, col - 1]] as f64
                + 2.0 * data[[row, col + 1]] as f64
                - data[[row + 1, col - 1]] as f64
                + data[[row + 1, col + 1]] as f64;

            let y = -data[[row - 1, col - 1]] as f64
                - 2.0 * data[[row - 1, col]] as f64
                - data[[row - 1, col + 1]] as f64
                + data[[row + 1, col - 1]] as f64
                + 2.0 * data[[row + 1, col]] as f64
                + data[[row + 1, col + 1]] as f64;

            gx[[row, col]] = (x * scale as f64) as f32;
            gy[[row, col]] = (y * scale as f64) as f32;
        }
    }

    Gradients { gx, gy }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_step_has_horizontal_gradient() {
        let data = Array2::from_shape_fn((5, 6), |(_, c)| if c < 3 { 0.0f32 } else { 1.0 });
        let g = sobel(&data, 255.0);
        assert!((g.gx[[2, 2]] - 4.0 * 255.0).abs() < 1e-3);
        assert_eq!(g.gy[[2, 2]], 0.0);
        assert_eq!(g.magnitude()[[2, 0]], 0.0);
    }
}
