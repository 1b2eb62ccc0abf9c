use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_cross_mut, draw_hollow_circle_mut};

use crate::detection::DetectionCandidate;
use crate::error::Result;
use crate::frame::Frame;

const MARKER_COLOR: Rgb<u8> = Rgb([0, 255, 0]);

/// Render the frame as RGB with every candidate drawn on top.
///
/// Circles are drawn for candidates with a radius, small crosses for point
/// candidates. Shapes are clipped at the image border.
pub fn render_annotated(frame: &Frame, candidates: &[DetectionCandidate]) -> RgbImage {
    let mut img = RgbImage::from_fn(frame.width() as u32, frame.height() as u32, |x, y| {
        let v = (frame.data[[y as usize, x as usize]].clamp(0.0, 1.0) * 255.0) as u8;
        Rgb([v, v, v])
    });

    for candidate in candidates {
        let cx = candidate.x as i32;
        let cy = candidate.y as i32;
        match candidate.radius {
            Some(r) => draw_hollow_circle_mut(&mut img, (cx, cy), r as i32, MARKER_COLOR),
            None => draw_cross_mut(&mut img, MARKER_COLOR, cx, cy),
        }
    }

    img
}

/// Write an annotated PNG next to the analysis.
pub fn save_annotated(frame: &Frame, candidates: &[DetectionCandidate], path: &Path) -> Result<()> {
    let img = render_annotated(frame, candidates);
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
