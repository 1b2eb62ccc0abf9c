use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CANNY_HIGH, DEFAULT_CANNY_LOW, DEFAULT_CLOSING_KERNEL, DEFAULT_CONTOUR_MIN_RADIUS,
    DEFAULT_HOUGH_ACCUMULATOR_SCALE, DEFAULT_HOUGH_EDGE_THRESHOLD, DEFAULT_HOUGH_MAX_RADIUS,
    DEFAULT_HOUGH_MIN_DISTANCE, DEFAULT_HOUGH_MIN_RADIUS, DEFAULT_MIN_CONFIDENCE,
};

/// Which detector strategy to run, with its parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DetectorConfig {
    /// Gradient-voting circular Hough transform on the binarized image.
    Hough(HoughParams),
    /// Edge contours closed morphologically and fitted with enclosing circles.
    Contour(ContourParams),
    /// Normalized cross-correlation against a template.
    Template(TemplateParams),
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self::Hough(HoughParams::default())
    }
}

impl std::fmt::Display for DetectorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hough(p) => write!(
                f,
                "Hough Transform (r {}-{} px)",
                p.min_radius, p.max_radius
            ),
            Self::Contour(_) => write!(f, "Contour Enclosure"),
            Self::Template(p) => write!(f, "Template Matching ({})", p.source),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HoughParams {
    /// Minimum distance between two accepted circle centers (pixels).
    #[serde(default = "default_min_distance")]
    pub min_distance: f64,
    /// Canny high threshold for the voting edges; the low threshold is half.
    #[serde(default = "default_edge_threshold")]
    pub edge_threshold: f32,
    /// Accumulator votes required = detection threshold * this scale.
    #[serde(default = "default_accumulator_scale")]
    pub accumulator_scale: f64,
    #[serde(default = "default_hough_min_radius")]
    pub min_radius: u32,
    #[serde(default = "default_hough_max_radius")]
    pub max_radius: u32,
}

fn default_min_distance() -> f64 {
    DEFAULT_HOUGH_MIN_DISTANCE
}
fn default_edge_threshold() -> f32 {
    DEFAULT_HOUGH_EDGE_THRESHOLD
}
fn default_accumulator_scale() -> f64 {
    DEFAULT_HOUGH_ACCUMULATOR_SCALE
}
fn default_hough_min_radius() -> u32 {
    DEFAULT_HOUGH_MIN_RADIUS
}
fn default_hough_max_radius() -> u32 {
    DEFAULT_HOUGH_MAX_RADIUS
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_HOUGH_MIN_DISTANCE,
            edge_threshold: DEFAULT_HOUGH_EDGE_THRESHOLD,
            accumulator_scale: DEFAULT_HOUGH_ACCUMULATOR_SCALE,
            min_radius: DEFAULT_HOUGH_MIN_RADIUS,
            max_radius: DEFAULT_HOUGH_MAX_RADIUS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContourParams {
    #[serde(default = "default_canny_low")]
    pub canny_low: f32,
    #[serde(default = "default_canny_high")]
    pub canny_high: f32,
    /// Side of the elliptical closing element (pixels).
    #[serde(default = "default_closing_kernel")]
    pub closing_kernel: usize,
    /// Contours whose truncated enclosing radius is at or below this are dropped.
    #[serde(default = "default_contour_min_radius")]
    pub min_radius: u32,
}

fn default_canny_low() -> f32 {
    DEFAULT_CANNY_LOW
}
fn default_canny_high() -> f32 {
    DEFAULT_CANNY_HIGH
}
fn default_closing_kernel() -> usize {
    DEFAULT_CLOSING_KERNEL
}
fn default_contour_min_radius() -> u32 {
    DEFAULT_CONTOUR_MIN_RADIUS
}

impl Default for ContourParams {
    fn default() -> Self {
        Self {
            canny_low: DEFAULT_CANNY_LOW,
            canny_high: DEFAULT_CANNY_HIGH,
            closing_kernel: DEFAULT_CLOSING_KERNEL,
            min_radius: DEFAULT_CONTOUR_MIN_RADIUS,
        }
    }
}

/// What the image is correlated against.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum TemplateSource {
    /// The image itself. Degenerate: the only valid window is the whole image,
    /// which always matches perfectly, so this finds self-similarity rather
    /// than craters. A uniform image also scores 1, since a zero-variance
    /// template matches everywhere.
    #[default]
    SelfImage,
    /// A filled disk of the given radius (pixels).
    Disk { radius: u32 },
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelfImage => write!(f, "self"),
            Self::Disk { radius } => write!(f, "disk r={radius}"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateParams {
    #[serde(default)]
    pub source: TemplateSource,
}

/// Which survivors of the confidence filter are persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionPolicy {
    /// Every candidate at or above the minimum confidence.
    #[default]
    All,
    /// Only the single highest-confidence candidate.
    Best,
}

impl std::fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Best => write!(f, "Best only"),
        }
    }
}

/// Post-detection filtering applied before persistence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
    #[serde(default)]
    pub selection: SelectionPolicy,
}

fn default_min_confidence() -> f64 {
    DEFAULT_MIN_CONFIDENCE
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            selection: SelectionPolicy::default(),
        }
    }
}
