pub mod config;
mod orchestrator;
mod types;

pub use config::CraterConfig;
pub use orchestrator::{process_image, process_image_reported};
pub use types::{PipelineOutcome, PipelineStage, ProgressReporter};
