/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Small epsilon to avoid division by zero in floating-point comparisons.
pub const EPSILON: f64 = 1e-10;

/// Number of intensity levels used for 8-bit quantization (histogram equalization,
/// adaptive thresholding).
pub const INTENSITY_LEVELS: usize = 256;

/// Maximum 8-bit intensity, used to convert [0, 1] samples to OpenCV-style units.
pub const MAX_INTENSITY: f32 = 255.0;

/// Default caller-supplied detection threshold in [0, 1].
pub const DEFAULT_DETECTION_THRESHOLD: f64 = 0.7;

/// Default minimum confidence for a candidate to be persisted.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.7;

/// Default adaptive-threshold window size (pixels, odd).
pub const DEFAULT_BLOCK_SIZE: usize = 11;

/// Default constant subtracted from the local mean (8-bit units).
pub const DEFAULT_THRESHOLD_BIAS: f32 = 2.0;

/// Default minimum distance between two Hough circle centers (pixels).
pub const DEFAULT_HOUGH_MIN_DISTANCE: f64 = 30.0;

/// Default Canny high threshold used inside the Hough detector (8-bit Sobel units).
/// The low threshold is half of it.
pub const DEFAULT_HOUGH_EDGE_THRESHOLD: f32 = 50.0;

/// Scale mapping the [0, 1] detection threshold onto accumulator votes.
pub const DEFAULT_HOUGH_ACCUMULATOR_SCALE: f64 = 80.0;

/// Default minimum circle radius searched by the Hough detector (pixels).
pub const DEFAULT_HOUGH_MIN_RADIUS: u32 = 10;

/// Default maximum circle radius searched by the Hough detector (pixels).
pub const DEFAULT_HOUGH_MAX_RADIUS: u32 = 80;

/// Gaussian sigma applied before computing gradients for Hough voting.
pub const HOUGH_SMOOTHING_SIGMA: f32 = 1.0;

/// Half-width (pixels) of the radius band used to measure circumference support.
pub const HOUGH_RADIUS_BAND: f64 = 1.0;

/// Minimum |cos| between an edge gradient and the radius through it for the
/// edge to count toward that circle.
pub const HOUGH_RADIAL_ALIGNMENT: f64 = 0.8;

/// Default Canny low threshold for contour detection (8-bit Sobel units).
pub const DEFAULT_CANNY_LOW: f32 = 100.0;

/// Default Canny high threshold for contour detection (8-bit Sobel units).
pub const DEFAULT_CANNY_HIGH: f32 = 200.0;

/// Default size of the elliptical closing element (pixels, both axes).
pub const DEFAULT_CLOSING_KERNEL: usize = 5;

/// Contours whose truncated enclosing radius is at or below this are noise.
pub const DEFAULT_CONTOUR_MIN_RADIUS: u32 = 10;

/// Confidence reported for every surviving contour.
pub const CONTOUR_CONFIDENCE: f64 = 1.0;

/// Latitude range of the placeholder geolocation (degrees).
pub const PLACEHOLDER_LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

/// Longitude range of the placeholder geolocation (degrees).
pub const PLACEHOLDER_LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Default catalog file name, relative to the working directory.
pub const DEFAULT_CATALOG_FILE: &str = "crater_coordinates.csv";

/// Suffix appended to the catalog path to form its lock file.
pub const CATALOG_LOCK_SUFFIX: &str = ".lock";
