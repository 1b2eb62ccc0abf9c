use crate::catalog::{CraterRecord, Token};
use crate::detection::DetectionCandidate;

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Locking,
    LoadingCatalog,
    CheckingCatalog,
    LoadingImage,
    Preprocessing,
    Detecting,
    Scoring,
    Saving,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Locking => write!(f, "Locking catalog"),
            Self::LoadingCatalog => write!(f, "Loading catalog"),
            Self::CheckingCatalog => write!(f, "Checking catalog"),
            Self::LoadingImage => write!(f, "Loading image"),
            Self::Preprocessing => write!(f, "Preprocessing"),
            Self::Detecting => write!(f, "Detecting craters"),
            Self::Scoring => write!(f, "Scoring candidates"),
            Self::Saving => write!(f, "Saving catalog"),
        }
    }
}

/// How a pipeline run ended. Only `Cataloged` changes the catalog.
#[derive(Clone, Debug)]
pub enum PipelineOutcome {
    /// The image was already in the catalog; these are its records.
    AlreadyCataloged { records: Vec<CraterRecord> },
    /// New records were appended under `token`.
    Cataloged {
        token: Token,
        records: Vec<CraterRecord>,
        candidates: Vec<DetectionCandidate>,
    },
    /// No candidate survived scoring. `detected` counts raw detections.
    NothingFound { detected: usize },
}

/// Thread-safe progress reporting for the pipeline.
///
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn begin_stage(&self, _stage: PipelineStage) {}

    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `process_image` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
