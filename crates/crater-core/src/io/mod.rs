pub mod annotate;
pub mod image_io;
