use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Relative slack when testing whether a point lies inside a circle.
const CONTAINS_TOLERANCE: f64 = 1e-7;

/// Fixed shuffle seed so results are reproducible across runs.
const SHUFFLE_SEED: u64 = 0x5eed;

/// A circle in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl Circle {
    fn contains(&self, (x, y): (f64, f64)) -> bool {
        let d = ((x - self.cx).powi(2) + (y - self.cy).powi(2)).sqrt();
        d <= self.radius * (1.0 + CONTAINS_TOLERANCE) + CONTAINS_TOLERANCE
    }

    fn from_two(a: (f64, f64), b: (f64, f64)) -> Self {
        let cx = (a.0 + b.0) / 2.0;
        let cy = (a.1 + b.1) / 2.0;
        let radius = ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt() / 2.0;
        Self { cx, cy, radius }
    }

    /// Circumcircle, or the widest pair's circle when the points are collinear.
    fn from_three(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Self {
        let d = 2.0 * (a.0 * (b.1 - c.1) + b.0 * (c.1 - a.1) + c.0 * (a.1 - b.1));
        if d.abs() < 1e-12 {
            return [Self::from_two(a, b), Self::from_two(a, c), Self::from_two(b, c)]
                .into_iter()
                .fold(Self::from_two(a, b), |best, c| {
                    if c.radius > best.radius {
                        c
                    } else {
                        best
                    }
                });
        }

        let a2 = a.0 * a.0 + a.1 * a.1;
        let b2 = b.0 * b.0 + b.1 * b.1;
        let c2 = c.0 * c.0 + c.1 * c.1;
        let cx = (a2 * (b.1 - c.1) + b2 * (c.1 - a.1) + c2 * (a.1 - b.1)) / d;
        let cy = (a2 * (c.0 - b.0) + b2 * (a.0 - c.0) + c2 * (b.0 - a.0)) / d;
        let radius = ((a.0 - cx).powi(2) + (a.1 - cy).powi(2)).sqrt();
        Self { cx, cy, radius }
    }
}

/// Smallest circle containing every point (Welzl's incremental algorithm).
///
/// Points are shuffled with a fixed seed first, which keeps the expected
/// running time linear. Returns `None` for an empty slice.
pub fn min_enclosing_circle(points: &[(f64, f64)]) -> Option<Circle> {
    if points.is_empty() {
        return None;
    }

    let mut pts = points.to_vec();
    let mut rng = StdRng::seed_from_u64(SHUFFLE_SEED);
    pts.shuffle(&mut rng);

    let mut circle = Circle {
        cx: pts[0].0,
        cy: pts[0].1,
        radius: 0.0,
    };

    for i in 1..pts.len() {
        if circle.contains(pts[i]) {
            continue;
        }
        circle = Circle {
            cx: pts[i].0,
            cy: pts[i].1,
            radius: 0.0,
        };
        for j in 0..i {
            if circle.contains(pts[j]) {
                continue;
            }
            circle = Circle::from_two(pts[i], pts[j]);
            for k in 0..j {
                if !circle.contains(pts[k]) {
                    circle = Circle::from_three(pts[i], pts[j], pts[k]);
                }
            }
        }
    }

    Some(circle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_point() {
        let c = min_enclosing_circle(&[(3.0, 4.0)]).unwrap();
        assert_eq!(c.radius, 0.0);
        assert_eq!((c.cx, c.cy), (3.0, 4.0));
    }

    #[test]
    fn test_square_corners() {
        let pts = [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0), (10.0, 10.0), (5.0, 5.0)];
        let c = min_enclosing_circle(&pts).unwrap();
        assert!((c.cx - 5.0).abs() < 1e-9);
        assert!((c.cy - 5.0).abs() < 1e-9);
        assert!((c.radius - 50f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_ring_of_points() {
        let pts: Vec<(f64, f64)> = (0..360)
            .map(|deg| {
                let t = (deg as f64).to_radians();
                (30.0 + 12.0 * t.cos(), 40.0 + 12.0 * t.sin())
            })
            .collect();
        let c = min_enclosing_circle(&pts).unwrap();
        assert!((c.radius - 12.0).abs() < 1e-6);
        assert!((c.cx - 30.0).abs() < 1e-6);
        assert!((c.cy - 40.0).abs() < 1e-6);
    }

    #[test]
    fn test_collinear_points() {
        let pts = [(0.0, 0.0), (2.0, 0.0), (8.0, 0.0)];
        let c = min_enclosing_circle(&pts).unwrap();
        assert!((c.radius - 4.0).abs() < 1e-9);
        assert!((c.cx - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty() {
        assert!(min_enclosing_circle(&[]).is_none());
    }
}
