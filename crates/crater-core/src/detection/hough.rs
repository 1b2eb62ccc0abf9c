//! Circular Hough transform with gradient voting.
//!
//! Every edge pixel votes along its gradient direction, on both sides, at
//! each radius in the search range. Edges of a circle converge on its center,
//! so accumulator peaks mark candidate centers. Each surviving center then
//! gets its radius from the distance histogram of the edge pixels around it.

use ndarray::Array2;
use tracing::debug;

use crate::consts::{
    HOUGH_RADIAL_ALIGNMENT, HOUGH_RADIUS_BAND, HOUGH_SMOOTHING_SIGMA, MAX_INTENSITY,
};
use crate::error::{CraterError, Result};
use crate::filters::gaussian_blur::gaussian_blur_array;
use crate::frame::Frame;
use crate::vision::canny::canny_from_gradients;
use crate::vision::gradient::sobel;

use super::config::HoughParams;
use super::{validate_threshold, CraterDetector, DetectionCandidate, DetectorInput};

/// Strategy A. Consumes the preprocessed (binary) frame.
#[derive(Clone, Debug)]
pub struct HoughDetector {
    params: HoughParams,
    threshold: f64,
}

impl HoughDetector {
    pub fn new(params: HoughParams, threshold: f64) -> Result<Self> {
        validate_threshold(threshold)?;
        validate_params(&params)?;
        Ok(Self { params, threshold })
    }
}

impl CraterDetector for HoughDetector {
    fn name(&self) -> &'static str {
        "hough"
    }

    fn input(&self) -> DetectorInput {
        DetectorInput::Preprocessed
    }

    fn scores_confidence(&self) -> bool {
        false
    }

    fn detect(&self, frame: &Frame) -> Result<Vec<DetectionCandidate>> {
        detect_hough(frame, &self.params, self.threshold)
    }
}

fn validate_params(params: &HoughParams) -> Result<()> {
    if params.min_radius == 0 || params.min_radius > params.max_radius {
        return Err(CraterError::InvalidParameter(format!(
            "Hough radius range {}..{} is empty",
            params.min_radius, params.max_radius
        )));
    }
    if params.min_distance < 0.0 || params.accumulator_scale <= 0.0 {
        return Err(CraterError::InvalidParameter(
            "Hough min_distance must be >= 0 and accumulator_scale > 0".into(),
        ));
    }
    Ok(())
}

#[derive(Clone, Copy, Debug)]
struct EdgePoint {
    x: f64,
    y: f64,
    /// Unit gradient direction.
    dx: f64,
    dy: f64,
}

#[derive(Clone, Copy, Debug)]
struct Peak {
    x: f64,
    y: f64,
    score: f64,
}

/// Run the circular Hough transform.
///
/// `threshold` in [0, 1] sets both the accumulator threshold
/// (`threshold * accumulator_scale` votes) and the fraction of a circle's
/// circumference that must be backed by edge pixels. The reported confidence
/// of every candidate is `threshold`; the strategy measures no score of its
/// own. Raising `threshold` never adds candidates.
pub fn detect_hough(
    frame: &Frame,
    params: &HoughParams,
    threshold: f64,
) -> Result<Vec<DetectionCandidate>> {
    validate_threshold(threshold)?;
    validate_params(params)?;

    let (h, w) = frame.data.dim();
    if h < 3 || w < 3 {
        return Ok(Vec::new());
    }

    let smoothed = gaussian_blur_array(&frame.data, HOUGH_SMOOTHING_SIGMA);
    let grads = sobel(&smoothed, MAX_INTENSITY);
    let edges = canny_from_gradients(&grads, params.edge_threshold / 2.0, params.edge_threshold);

    let mut points = Vec::new();
    for ((row, col), &is_edge) in edges.indexed_iter() {
        if !is_edge {
            continue;
        }
        let gx = grads.gx[[row, col]] as f64;
        let gy = grads.gy[[row, col]] as f64;
        let mag = (gx * gx + gy * gy).sqrt();
        if mag <= 0.0 {
            continue;
        }
        points.push(EdgePoint {
            x: col as f64,
            y: row as f64,
            dx: gx / mag,
            dy: gy / mag,
        });
    }
    if points.is_empty() {
        return Ok(Vec::new());
    }

    let accumulator = vote(&points, h, w, params);
    let vote_threshold = threshold * params.accumulator_scale;
    let peaks = find_peaks(&accumulator, vote_threshold);
    let centers = suppress_close(peaks, params.min_distance);

    let mut candidates = Vec::new();
    for center in &centers {
        let Some((radius, support)) = estimate_radius(center, &points, params) else {
            continue;
        };
        if support < threshold {
            continue;
        }
        candidates.push(DetectionCandidate::circle(
            center.x.round().max(0.0) as u32,
            center.y.round().max(0.0) as u32,
            radius.round() as u32,
            threshold,
        ));
    }

    debug!(
        edge_points = points.len(),
        centers = centers.len(),
        accepted = candidates.len(),
        vote_threshold,
        "Hough transform complete"
    );
    Ok(candidates)
}

/// Deposit one bilinear vote per edge point, direction and radius.
fn vote(points: &[EdgePoint], h: usize, w: usize, params: &HoughParams) -> Array2<f32> {
    let mut acc = Array2::<f32>::zeros((h, w));
    let x_limit = (w - 1) as f64;
    let y_limit = (h - 1) as f64;

    for p in points {
        for r in params.min_radius..=params.max_radius {
            let r = r as f64;
            for sign in [1.0, -1.0] {
                let vx = p.x + sign * p.dx * r;
                let vy = p.y + sign * p.dy * r;
                if vx < 0.0 || vy < 0.0 || vx >= x_limit || vy >= y_limit {
                    continue;
                }
                let x0 = vx as usize;
                let y0 = vy as usize;
                let fx = (vx - x0 as f64) as f32;
                let fy = (vy - y0 as f64) as f32;
                acc[[y0, x0]] += (1.0 - fx) * (1.0 - fy);
                acc[[y0, x0 + 1]] += fx * (1.0 - fy);
                acc[[y0 + 1, x0]] += (1.0 - fx) * fy;
                acc[[y0 + 1, x0 + 1]] += fx * fy;
            }
        }
    }

    acc
}

/// Local maxima of the 3x3-summed accumulator at or above `min_score`,
/// sorted by score descending (raster order on ties).
///
/// Peak positions are refined to the vote centroid of their 3x3 window.
fn find_peaks(acc: &Array2<f32>, min_score: f64) -> Vec<Peak> {
    let (h, w) = acc.dim();
    let mut window = Array2::<f64>::zeros((h, w));
    for row in 0..h {
        for col in 0..w {
            window[[row, col]] = neighborhood(row, col, h, w)
                .map(|(r, c)| acc[[r, c]] as f64)
                .sum();
        }
    }

    let mut peaks = Vec::new();
    for row in 0..h {
        for col in 0..w {
            let score = window[[row, col]];
            if score < min_score || score <= 0.0 {
                continue;
            }
            // Ties go to the first pixel in raster order.
            let is_max = neighborhood(row, col, h, w).all(|(r, c)| {
                let other = window[[r, c]];
                let earlier = (r, c) < (row, col);
                other < score || (other == score && !earlier)
            });
            if !is_max {
                continue;
            }

            let (mut sx, mut sy, mut sw) = (0.0, 0.0, 0.0);
            for (r, c) in neighborhood(row, col, h, w) {
                let v = acc[[r, c]] as f64;
                sx += c as f64 * v;
                sy += r as f64 * v;
                sw += v;
            }
            peaks.push(Peak {
                x: sx / sw,
                y: sy / sw,
                score,
            });
        }
    }

    peaks.sort_by(|a, b| b.score.total_cmp(&a.score));
    peaks
}

/// In-bounds 3x3 neighborhood including the center.
fn neighborhood(row: usize, col: usize, h: usize, w: usize) -> impl Iterator<Item = (usize, usize)> {
    let rows = row.saturating_sub(1)..=(row + 1).min(h - 1);
    rows.flat_map(move |r| {
        let cols = col.saturating_sub(1)..=(col + 1).min(w - 1);
        cols.map(move |c| (r, c))
    })
}

/// Greedy minimum-distance suppression over peaks sorted by score.
fn suppress_close(peaks: Vec<Peak>, min_distance: f64) -> Vec<Peak> {
    let min_sq = min_distance * min_distance;
    let mut kept: Vec<Peak> = Vec::new();
    for peak in peaks {
        let clear = kept
            .iter()
            .all(|k| (k.x - peak.x).powi(2) + (k.y - peak.y).powi(2) >= min_sq);
        if clear {
            kept.push(peak);
        }
    }
    kept
}

/// Radius of the innermost strong ring around `center`.
///
/// Only edge pixels whose gradient runs along the radius through them are
/// counted. The chosen band is the first one reaching half of the strongest
/// band's count, advanced to its local maximum, so an outer concentric ring
/// (such as the halo adaptive thresholding leaves around a rim) does not
/// displace the rim itself.
///
/// Returns the mean edge distance inside that band and the fraction of the
/// circle's circumference covered by edge pixels.
fn estimate_radius(center: &Peak, points: &[EdgePoint], params: &HoughParams) -> Option<(f64, f64)> {
    let lo = params.min_radius as f64 - HOUGH_RADIUS_BAND;
    let hi = params.max_radius as f64 + HOUGH_RADIUS_BAND;
    let mut distances: Vec<f64> = points
        .iter()
        .filter_map(|p| {
            let ox = p.x - center.x;
            let oy = p.y - center.y;
            let d = (ox * ox + oy * oy).sqrt();
            if d <= 0.0 || d < lo || d > hi {
                return None;
            }
            let alignment = (p.dx * ox + p.dy * oy).abs() / d;
            (alignment >= HOUGH_RADIAL_ALIGNMENT).then_some(d)
        })
        .collect();
    if distances.is_empty() {
        return None;
    }
    distances.sort_by(f64::total_cmp);

    let band = |r: u32| {
        let rf = r as f64;
        let start = distances.partition_point(|&d| d < rf - HOUGH_RADIUS_BAND);
        let end = distances.partition_point(|&d| d <= rf + HOUGH_RADIUS_BAND);
        start..end
    };
    let radii: Vec<u32> = (params.min_radius..=params.max_radius).collect();
    let counts: Vec<usize> = radii.iter().map(|&r| band(r).len()).collect();

    let strongest = counts.iter().copied().max()?;
    if strongest == 0 {
        return None;
    }
    let mut idx = counts.iter().position(|&c| 2 * c >= strongest)?;
    while idx + 1 < counts.len() && counts[idx + 1] > counts[idx] {
        idx += 1;
    }

    let range = band(radii[idx]);
    let count = range.len();
    let mean = distances[range].iter().sum::<f64>() / count as f64;
    let support = count as f64 / (2.0 * std::f64::consts::PI * mean.max(1.0));
    Some((mean, support))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disk_frame(size: usize, cx: f64, cy: f64, radius: f64) -> Frame {
        let data = Array2::from_shape_fn((size, size), |(r, c)| {
            let d = ((c as f64 - cx).powi(2) + (r as f64 - cy).powi(2)).sqrt();
            if d <= radius {
                1.0
            } else {
                0.0
            }
        });
        Frame::new(data, 8)
    }

    #[test]
    fn test_blank_frame_finds_nothing() {
        let frame = Frame::new(Array2::zeros((64, 64)), 8);
        let found = detect_hough(&frame, &HoughParams::default(), 0.7).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_radius_outside_search_range_is_ignored() {
        let frame = disk_frame(100, 50.0, 50.0, 20.0);
        let params = HoughParams {
            min_radius: 30,
            max_radius: 45,
            ..HoughParams::default()
        };
        let found = detect_hough(&frame, &params, 0.7).unwrap();
        assert!(found.is_empty(), "unexpected {found:?}");
    }

    #[test]
    fn test_suppress_close_keeps_strongest() {
        let peaks = vec![
            Peak { x: 10.0, y: 10.0, score: 9.0 },
            Peak { x: 20.0, y: 10.0, score: 5.0 },
            Peak { x: 60.0, y: 10.0, score: 4.0 },
        ];
        let kept = suppress_close(peaks, 30.0);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].score, 9.0);
        assert_eq!(kept[1].x, 60.0);
    }

    fn ring(cx: f64, cy: f64, radius: f64, tangential: bool) -> Vec<EdgePoint> {
        let n = (2.0 * std::f64::consts::PI * radius).round() as usize;
        (0..n)
            .map(|k| {
                let angle = k as f64 * 2.0 * std::f64::consts::PI / n as f64;
                let (sin, cos) = angle.sin_cos();
                let (dx, dy) = if tangential { (-sin, cos) } else { (cos, sin) };
                EdgePoint {
                    x: cx + radius * cos,
                    y: cy + radius * sin,
                    dx,
                    dy,
                }
            })
            .collect()
    }

    #[test]
    fn test_inner_rim_wins_over_outer_halo() {
        let center = Peak { x: 50.0, y: 50.0, score: 1.0 };
        let mut points = ring(50.0, 50.0, 20.0, false);
        points.extend(ring(50.0, 50.0, 26.0, false));

        let (radius, support) = estimate_radius(&center, &points, &HoughParams::default()).unwrap();
        assert!((radius - 20.0).abs() < 0.5, "radius {radius}");
        assert!(support > 0.9, "support {support}");
    }

    #[test]
    fn test_tangential_edges_do_not_count() {
        let center = Peak { x: 50.0, y: 50.0, score: 1.0 };
        let mut points = ring(50.0, 50.0, 15.0, true);
        points.extend(ring(50.0, 50.0, 30.0, false));

        let (radius, _) = estimate_radius(&center, &points, &HoughParams::default()).unwrap();
        assert!((radius - 30.0).abs() < 0.5, "radius {radius}");
    }

    #[test]
    fn test_invalid_radius_range_rejected() {
        let params = HoughParams {
            min_radius: 50,
            max_radius: 10,
            ..HoughParams::default()
        };
        assert!(HoughDetector::new(params, 0.5).is_err());
        assert!(HoughDetector::new(HoughParams::default(), 1.5).is_err());
    }
}
