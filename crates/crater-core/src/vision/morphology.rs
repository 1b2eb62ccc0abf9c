use ndarray::Array2;

/// Binary structuring element with its anchor at the center.
#[derive(Clone, Debug, PartialEq)]
pub struct StructuringElement {
    mask: Array2<bool>,
}

impl StructuringElement {
    /// Ellipse inscribed in `width x height`, rasterized row by row the way
    /// common vision libraries do (a 5x5 ellipse covers 17 pixels).
    pub fn ellipse(width: usize, height: usize) -> Self {
        let (w, h) = (width.max(1), height.max(1));
        let r = (h / 2) as f64;
        let c = (w / 2) as f64;
        let mut mask = Array2::from_elem((h, w), false);

        for row in 0..h {
            let dy = row as f64 - r;
            if dy.abs() > r {
                continue;
            }
            let dx = if r > 0.0 {
                (c * ((r * r - dy * dy) / (r * r)).sqrt()).round()
            } else {
                c
            };
            let start = (c - dx).max(0.0) as usize;
            let end = ((c + dx + 1.0) as usize).min(w);
            for col in start..end {
                mask[[row, col]] = true;
            }
        }

        Self { mask }
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.mask[[row, col]]
    }

    fn offsets(&self) -> Vec<(isize, isize)> {
        let (h, w) = self.mask.dim();
        let (ar, ac) = ((h / 2) as isize, (w / 2) as isize);
        self.mask
            .indexed_iter()
            .filter(|(_, on)| **on)
            .map(|((r, c), _)| (r as isize - ar, c as isize - ac))
            .collect()
    }
}

/// Morphological closing (dilation followed by erosion).
///
/// Bridges gaps narrower than the element while keeping the overall shape.
pub fn morphological_closing(mask: &Array2<bool>, element: &StructuringElement) -> Array2<bool> {
    let dilated = dilate(mask, element);
    erode(&dilated, element)
}

/// Binary erosion: a pixel stays true only if every in-bounds pixel under the
/// element is true. Out-of-bounds positions do not erode.
pub fn erode(mask: &Array2<bool>, element: &StructuringElement) -> Array2<bool> {
    let (h, w) = mask.dim();
    let offsets = element.offsets();
    let mut result = Array2::from_elem((h, w), false);

    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }
            result[[row, col]] = offsets.iter().all(|&(dr, dc)| {
                let nr = row as isize + dr;
                let nc = col as isize + dc;
                nr < 0
                    || nc < 0
                    || nr >= h as isize
                    || nc >= w as isize
                    || mask[[nr as usize, nc as usize]]
            });
        }
    }

    result
}

/// Binary dilation: a pixel becomes true if any in-bounds pixel under the
/// (reflected) element is true.
pub fn dilate(mask: &Array2<bool>, element: &StructuringElement) -> Array2<bool> {
    let (h, w) = mask.dim();
    let offsets = element.offsets();
    let mut result = Array2::from_elem((h, w), false);

    for row in 0..h {
        for col in 0..w {
            result[[row, col]] = offsets.iter().any(|&(dr, dc)| {
                let nr = row as isize - dr;
                let nc = col as isize - dc;
                nr >= 0
                    && nc >= 0
                    && nr < h as isize
                    && nc < w as isize
                    && mask[[nr as usize, nc as usize]]
            });
        }
    }

    result
}
