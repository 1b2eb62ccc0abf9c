use std::path::Path;

use image::{GrayImage, ImageFormat, Luma};
use ndarray::Array2;
use tracing::debug;

use crate::error::{CraterError, Result};
use crate::frame::Frame;

/// Save a frame as 8-bit grayscale PNG.
pub fn save_png(frame: &Frame, path: &Path) -> Result<()> {
    let h = frame.height();
    let w = frame.width();

    let mut img = GrayImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            let val = (frame.data[[row, col]].clamp(0.0, 1.0) * 255.0) as u8;
            img.put_pixel(col as u32, row as u32, Luma([val]));
        }
    }

    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Load an image file as a grayscale Frame.
///
/// Color images are reduced to their luminance channel. Missing files,
/// undecodable data and zero-sized images all fail with `ImageLoad`.
pub fn load_image(path: &Path) -> Result<Frame> {
    let img = image::open(path).map_err(|e| CraterError::image_load(path, e))?;
    let color = img.color();
    let bit_depth = (color.bits_per_pixel() / color.channel_count() as u16) as u8;
    let gray = img.to_luma16();
    let (w, h) = gray.dimensions();
    if w == 0 || h == 0 {
        return Err(CraterError::image_load(path, "image is empty"));
    }

    let mut data = Array2::<f32>::zeros((h as usize, w as usize));
    for row in 0..h as usize {
        for col in 0..w as usize {
            let pixel = gray.get_pixel(col as u32, row as u32);
            data[[row, col]] = pixel.0[0] as f32 / 65535.0;
        }
    }

    debug!(width = w, height = h, bit_depth, path = %path.display(), "Loaded image");
    Ok(Frame::new(data, bit_depth))
}
