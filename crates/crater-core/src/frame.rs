use ndarray::Array2;

/// A single grayscale image frame.
/// Pixel values are f32 in [0.0, 1.0].
#[derive(Clone, Debug)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
    /// Original bit depth before conversion (8 or 16)
    pub original_bit_depth: u8,
}

impl Frame {
    pub fn new(data: Array2<f32>, bit_depth: u8) -> Self {
        Self {
            data,
            original_bit_depth: bit_depth,
        }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Quantize to 8-bit levels, rounding to nearest.
    pub fn to_u8_levels(&self) -> Array2<u8> {
        self.data
            .mapv(|v| (v.clamp(0.0, 1.0) * crate::consts::MAX_INTENSITY).round() as u8)
    }

    /// Build a frame from 8-bit levels.
    pub fn from_u8_levels(levels: &Array2<u8>) -> Self {
        let data = levels.mapv(|v| v as f32 / crate::consts::MAX_INTENSITY);
        Self::new(data, 8)
    }
}

/// Descriptive metadata about an analyzed image, handed to collaborators
/// that need more than pixel coordinates.
#[derive(Clone, Debug)]
pub struct ImageMetadata {
    pub image_id: String,
    pub width: u32,
    pub height: u32,
}

impl ImageMetadata {
    pub fn for_frame(image_id: &str, frame: &Frame) -> Self {
        Self {
            image_id: image_id.to_string(),
            width: frame.width() as u32,
            height: frame.height() as u32,
        }
    }
}
