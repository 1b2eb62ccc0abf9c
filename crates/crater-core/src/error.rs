use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CraterError {
    #[error("Failed to load image {path}: {reason}")]
    ImageLoad { path: PathBuf, reason: String },

    #[error("Failed to read catalog {path}: {reason}")]
    CatalogLoad { path: PathBuf, reason: String },

    #[error("Failed to write catalog {path}: {reason}")]
    CatalogWrite { path: PathBuf, reason: String },

    #[error("Catalog {path} is locked by another process (remove the .lock file if stale)")]
    CatalogLocked { path: PathBuf },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),
}

impl CraterError {
    pub fn image_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::ImageLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// True for failures that happen before any image data is available.
    pub fn is_image_load(&self) -> bool {
        matches!(self, Self::ImageLoad { .. } | Self::ImageError(_))
    }
}

pub type Result<T> = std::result::Result<T, CraterError>;
