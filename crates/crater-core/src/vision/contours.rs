use ndarray::Array2;

use super::components::{label_components, touches_border, Connectivity};

/// Boundary of one foreground region.
#[derive(Clone, Debug)]
pub struct Contour {
    /// Boundary pixel coordinates as (x, y) = (col, row).
    pub points: Vec<(f64, f64)>,
    /// Pixel count of the region the boundary belongs to.
    pub area: usize,
}

/// Extract the outer boundaries of all outermost foreground regions.
///
/// Foreground is grouped with 8-connectivity, background with 4-connectivity.
/// A region is outermost when it touches the image border or is adjacent to
/// background that is reachable from the border; regions sitting inside a
/// hole of another region are skipped. Each contour lists the region's pixels
/// that have at least one 4-neighbor outside the region.
pub fn find_external_contours(mask: &Array2<bool>) -> Vec<Contour> {
    let (h, w) = mask.dim();
    if h == 0 || w == 0 {
        return Vec::new();
    }

    let labeling = label_components(mask, Connectivity::Eight);
    if labeling.components.is_empty() {
        return Vec::new();
    }
    let outside = exterior_background(mask);

    let max_label = labeling
        .components
        .iter()
        .map(|c| c.label as usize)
        .max()
        .unwrap_or(0);
    let mut is_external = vec![false; max_label + 1];
    for comp in &labeling.components {
        if touches_border(comp.bbox, h, w) {
            is_external[comp.label as usize] = true;
        }
    }

    let mut boundaries: Vec<Vec<(f64, f64)>> = vec![Vec::new(); max_label + 1];
    for ((row, col), &label) in labeling.labels.indexed_iter() {
        if label == 0 {
            continue;
        }
        let mut on_boundary = false;
        for (nr, nc) in four_neighbors(row, col, h, w) {
            match (nr, nc) {
                (Some(r), Some(c)) => {
                    if labeling.labels[[r, c]] != label {
                        on_boundary = true;
                    }
                    if outside[[r, c]] {
                        is_external[label as usize] = true;
                    }
                }
                _ => on_boundary = true,
            }
        }
        if on_boundary {
            boundaries[label as usize].push((col as f64, row as f64));
        }
    }

    labeling
        .components
        .iter()
        .filter(|c| is_external[c.label as usize])
        .map(|c| Contour {
            points: std::mem::take(&mut boundaries[c.label as usize]),
            area: c.area,
        })
        .collect()
}

/// Background pixels 4-connected to the image border.
fn exterior_background(mask: &Array2<bool>) -> Array2<bool> {
    let (h, w) = mask.dim();
    let mut outside = Array2::from_elem((h, w), false);
    let mut stack = Vec::new();

    for row in 0..h {
        for col in 0..w {
            let on_edge = row == 0 || col == 0 || row == h - 1 || col == w - 1;
            if on_edge && !mask[[row, col]] && !outside[[row, col]] {
                outside[[row, col]] = true;
                stack.push((row, col));
            }
        }
    }

    while let Some((row, col)) = stack.pop() {
        for (nr, nc) in four_neighbors(row, col, h, w) {
            if let (Some(r), Some(c)) = (nr, nc) {
                if !mask[[r, c]] && !outside[[r, c]] {
                    outside[[r, c]] = true;
                    stack.push((r, c));
                }
            }
        }
    }

    outside
}

/// 4-neighbors; `None` marks a position outside the image.
fn four_neighbors(
    row: usize,
    col: usize,
    h: usize,
    w: usize,
) -> [(Option<usize>, Option<usize>); 4] {
    let up = row.checked_sub(1);
    let down = (row + 1 < h).then_some(row + 1);
    let left = col.checked_sub(1);
    let right = (col + 1 < w).then_some(col + 1);
    [
        (up, Some(col)),
        (down, Some(col)),
        (Some(row), left),
        (Some(row), right),
    ]
}
