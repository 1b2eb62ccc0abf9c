use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use crater_core::detection::{
    ContourParams, DetectorConfig, HoughParams, SelectionPolicy, TemplateParams, TemplateSource,
};
use crater_core::geo::GeolocationConfig;
use crater_core::io::annotate::save_annotated;
use crater_core::io::image_io::load_image;
use crater_core::pipeline::{process_image_reported, CraterConfig, PipelineOutcome};
use tracing::debug;

use crate::progress::SpinnerReporter;
use crate::summary::{print_detect_summary, print_outcome};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StrategyArg {
    Hough,
    Contour,
    Template,
}

#[derive(Args)]
pub struct DetectArgs {
    /// Image to analyze (also its catalog key)
    pub image: PathBuf,

    /// Detection threshold in [0, 1] [default: 0.7]
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Detection strategy [default: hough]
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Minimum candidate confidence to persist [default: 0.7]
    #[arg(long)]
    pub min_confidence: Option<f64>,

    /// Persist only the highest-confidence candidate
    #[arg(long)]
    pub best_only: bool,

    /// Catalog CSV file [default: crater_coordinates.csv]
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Config file (TOML); flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the image with detections drawn on it
    #[arg(long)]
    pub annotate: Option<PathBuf>,

    /// Use a filled disk of this radius as the template (template strategy)
    #[arg(long)]
    pub template_radius: Option<u32>,

    /// Seed the placeholder geolocation for reproducible coordinates
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip the catalog lock file
    #[arg(long)]
    pub no_lock: bool,
}

pub fn run(args: &DetectArgs) -> Result<()> {
    let config = build_config(args)?;
    let image_id = args.image.to_string_lossy().into_owned();
    debug!(?config, "resolved configuration");

    print_detect_summary(&image_id, &config);

    let spinner = Arc::new(SpinnerReporter::new()?);
    let outcome = process_image_reported(&image_id, &config, spinner.clone());
    spinner.finish();
    let outcome = outcome.with_context(|| format!("Failed to process {image_id}"))?;

    print_outcome(&image_id, &outcome);

    if let Some(ref path) = args.annotate {
        match &outcome {
            PipelineOutcome::Cataloged { candidates, .. } => {
                write_annotation(&args.image, candidates, path)?;
            }
            _ => println!("  No new detections; {} not written", path.display()),
        }
    }

    Ok(())
}

fn write_annotation(
    image: &Path,
    candidates: &[crater_core::detection::DetectionCandidate],
    path: &Path,
) -> Result<()> {
    let frame = load_image(image)?;
    save_annotated(&frame, candidates, path)
        .with_context(|| format!("Failed to write annotated image {}", path.display()))?;
    println!("  Annotated image saved to {}", path.display());
    Ok(())
}

fn build_config(args: &DetectArgs) -> Result<CraterConfig> {
    let mut config = if let Some(ref config_path) = args.config {
        CraterConfig::from_toml_file(config_path)
            .with_context(|| format!("Invalid config {}", config_path.display()))?
    } else {
        CraterConfig::default()
    };

    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    if let Some(strategy) = args.strategy {
        config.detector = match (strategy, &config.detector) {
            (StrategyArg::Hough, DetectorConfig::Hough(_))
            | (StrategyArg::Contour, DetectorConfig::Contour(_))
            | (StrategyArg::Template, DetectorConfig::Template(_)) => config.detector.clone(),
            (StrategyArg::Hough, _) => DetectorConfig::Hough(HoughParams::default()),
            (StrategyArg::Contour, _) => DetectorConfig::Contour(ContourParams::default()),
            (StrategyArg::Template, _) => DetectorConfig::Template(TemplateParams::default()),
        };
    }
    if let Some(radius) = args.template_radius {
        match config.detector {
            DetectorConfig::Template(ref mut params) => {
                params.source = TemplateSource::Disk { radius };
            }
            _ => anyhow::bail!("--template-radius requires the template strategy"),
        }
    }
    if let Some(min_confidence) = args.min_confidence {
        config.scoring.min_confidence = min_confidence;
    }
    if args.best_only {
        config.scoring.selection = SelectionPolicy::Best;
    }
    if let Some(ref catalog) = args.catalog {
        config.catalog.path = catalog.clone();
    }
    if args.no_lock {
        config.catalog.lock = false;
    }
    if let Some(seed) = args.seed {
        config.geolocation = match config.geolocation {
            GeolocationConfig::Placeholder { .. } => GeolocationConfig::Placeholder { seed: Some(seed) },
            other => other,
        };
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> DetectArgs {
        DetectArgs {
            image: PathBuf::from("moon.png"),
            threshold: None,
            strategy: None,
            min_confidence: None,
            best_only: false,
            catalog: None,
            config: None,
            annotate: None,
            template_radius: None,
            seed: None,
            no_lock: false,
        }
    }

    #[test]
    fn test_no_flags_is_default_config() {
        assert_eq!(build_config(&args()).unwrap(), CraterConfig::default());
    }

    #[test]
    fn test_flags_override() {
        let config = build_config(&DetectArgs {
            threshold: Some(0.4),
            strategy: Some(StrategyArg::Template),
            template_radius: Some(8),
            best_only: true,
            seed: Some(11),
            ..args()
        })
        .unwrap();
        assert_eq!(config.threshold, 0.4);
        assert_eq!(
            config.detector,
            DetectorConfig::Template(TemplateParams {
                source: TemplateSource::Disk { radius: 8 }
            })
        );
        assert_eq!(config.scoring.selection, SelectionPolicy::Best);
        assert_eq!(
            config.geolocation,
            GeolocationConfig::Placeholder { seed: Some(11) }
        );
    }

    #[test]
    fn test_template_radius_needs_template_strategy() {
        let result = build_config(&DetectArgs {
            template_radius: Some(8),
            ..args()
        });
        assert!(result.is_err());
    }
}
