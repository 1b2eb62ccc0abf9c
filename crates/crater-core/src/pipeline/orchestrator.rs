use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::catalog::{
    already_processed, existing_records, records_from_candidates, Catalog, CatalogLock,
};
use crate::detection::{apply_selection, build_detector, select_candidates, DetectorInput};
use crate::error::Result;
use crate::frame::ImageMetadata;
use crate::io::image_io::load_image;
use crate::preprocess::normalize;

use super::config::CraterConfig;
use super::types::{NoOpReporter, PipelineOutcome, PipelineStage, ProgressReporter};

/// Detect craters in `image_id` and catalog them, with a progress reporter.
///
/// Images already in the catalog are not reloaded or re-detected, and the
/// catalog file is left untouched. Image loading happens before any catalog
/// mutation, so a load failure never changes the store.
pub fn process_image_reported(
    image_id: &str,
    config: &CraterConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<PipelineOutcome> {
    // Construct up front so bad parameters fail before touching any file.
    let detector = build_detector(&config.detector, config.threshold)?;
    let geo = config.geolocation.build()?;

    let _lock = if config.catalog.lock {
        reporter.begin_stage(PipelineStage::Locking);
        let lock = CatalogLock::acquire(&config.catalog.path)?;
        reporter.finish_stage();
        Some(lock)
    } else {
        None
    };

    reporter.begin_stage(PipelineStage::LoadingCatalog);
    let mut catalog = Catalog::load(&config.catalog)?;
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::CheckingCatalog);
    let seen = already_processed(&catalog, image_id).is_some();
    reporter.finish_stage();
    if seen {
        let existing = existing_records(&catalog, image_id);
        info!(image = image_id, records = existing.len(), "image already cataloged, skipping");
        return Ok(PipelineOutcome::AlreadyCataloged { records: existing });
    }

    reporter.begin_stage(PipelineStage::LoadingImage);
    let raw = load_image(Path::new(image_id))?;
    reporter.finish_stage();
    info!(
        image = image_id,
        width = raw.width(),
        height = raw.height(),
        strategy = detector.name(),
        "Processing image"
    );

    let input = match detector.input() {
        DetectorInput::Raw => raw.clone(),
        DetectorInput::Preprocessed => {
            reporter.begin_stage(PipelineStage::Preprocessing);
            let binary = normalize(&raw, &config.preprocess)?;
            reporter.finish_stage();
            binary
        }
    };

    reporter.begin_stage(PipelineStage::Detecting);
    let detected = detector.detect(&input)?;
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::Scoring);
    let detected_count = detected.len();
    let candidates = if detector.scores_confidence() {
        select_candidates(detected, &config.scoring)
    } else {
        apply_selection(detected, config.scoring.selection)
    };
    reporter.finish_stage();
    debug!(
        detected = detected_count,
        kept = candidates.len(),
        min_confidence = config.scoring.min_confidence,
        selection = %config.scoring.selection,
        "Scoring complete"
    );

    if candidates.is_empty() {
        info!(image = image_id, detected = detected_count, "no craters detected");
        return Ok(PipelineOutcome::NothingFound {
            detected: detected_count,
        });
    }

    reporter.begin_stage(PipelineStage::Saving);
    let token = catalog.next_token();
    let meta = ImageMetadata::for_frame(image_id, &raw);
    let records = records_from_candidates(image_id, &token, &candidates, geo.as_ref(), &meta);
    catalog.append(records.clone())?;
    reporter.finish_stage();
    info!(image = image_id, token = %token, craters = records.len(), "Cataloged");

    Ok(PipelineOutcome::Cataloged {
        token,
        records,
        candidates,
    })
}

/// Detect craters in `image_id` and catalog them.
pub fn process_image(image_id: &str, config: &CraterConfig) -> Result<PipelineOutcome> {
    process_image_reported(image_id, config, Arc::new(NoOpReporter))
}
