use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use crater_core::consts::{DEFAULT_BLOCK_SIZE, DEFAULT_THRESHOLD_BIAS};
use crater_core::filters::histogram::equalize_histogram;
use crater_core::io::image_io::{load_image, save_png};
use crater_core::preprocess::{normalize, PreprocessConfig};

#[derive(Args)]
pub struct PreprocessArgs {
    /// Input image
    pub image: PathBuf,

    /// Output PNG
    #[arg(short, long)]
    pub output: PathBuf,

    /// Adaptive threshold window (odd, >= 3)
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
    pub block_size: usize,

    /// Constant subtracted from the local mean (8-bit units)
    #[arg(long, default_value_t = DEFAULT_THRESHOLD_BIAS)]
    pub bias: f32,

    /// Stop after histogram equalization (grayscale output)
    #[arg(long)]
    pub equalize_only: bool,
}

pub fn run(args: &PreprocessArgs) -> Result<()> {
    let frame = load_image(&args.image)?;
    println!(
        "Loaded {}x{} image from {}",
        frame.width(),
        frame.height(),
        args.image.display()
    );

    if args.equalize_only {
        let equalized = equalize_histogram(&frame);
        save_png(&equalized, &args.output)
            .with_context(|| format!("Failed to write {}", args.output.display()))?;
        println!("Equalized image saved to {}", args.output.display());
        return Ok(());
    }

    let config = PreprocessConfig {
        block_size: args.block_size,
        bias: args.bias,
    };
    let binary = normalize(&frame, &config)?;
    let foreground = binary.data.iter().filter(|&&v| v > 0.5).count();

    save_png(&binary, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!(
        "Binarized ({:.1}% foreground), saved to {}",
        100.0 * foreground as f64 / binary.data.len() as f64,
        args.output.display()
    );
    Ok(())
}
