#![allow(dead_code)]

use std::path::{Path, PathBuf};

use ndarray::Array2;

use crater_core::catalog::CatalogConfig;
use crater_core::detection::DetectorConfig;
use crater_core::frame::Frame;
use crater_core::geo::GeolocationConfig;
use crater_core::io::image_io::save_png;
use crater_core::pipeline::CraterConfig;

/// Binary frame with filled disks (value 1.0) on a 0.0 background.
pub fn disks_frame(height: usize, width: usize, disks: &[(f64, f64, f64)]) -> Frame {
    let data = Array2::from_shape_fn((height, width), |(row, col)| {
        let inside = disks.iter().any(|&(cx, cy, r)| {
            let dx = col as f64 - cx;
            let dy = row as f64 - cy;
            dx * dx + dy * dy <= r * r
        });
        if inside {
            1.0
        } else {
            0.0
        }
    });
    Frame::new(data, 8)
}

/// 100x100 frame holding one disk of radius 20 centered at (50, 50).
pub fn reference_disk() -> Frame {
    disks_frame(100, 100, &[(50.0, 50.0, 20.0)])
}

/// Deterministic textured frame with values spread over [0, 1].
pub fn textured_frame(height: usize, width: usize) -> Frame {
    let data = Array2::from_shape_fn((height, width), |(row, col)| {
        ((row * 37 + col * 11 + (row * col) % 7) % 97) as f32 / 96.0
    });
    Frame::new(data, 8)
}

pub fn write_png(dir: &Path, name: &str, frame: &Frame) -> PathBuf {
    let path = dir.join(name);
    save_png(frame, &path).unwrap();
    path
}

/// Config writing to `catalog` with reproducible coordinates.
pub fn test_config(catalog: &Path, detector: DetectorConfig) -> CraterConfig {
    CraterConfig {
        catalog: CatalogConfig {
            path: catalog.to_path_buf(),
            lock: true,
        },
        detector,
        geolocation: GeolocationConfig::Placeholder { seed: Some(7) },
        ..CraterConfig::default()
    }
}
