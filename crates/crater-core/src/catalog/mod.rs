//! Persistent crater catalog backed by a CSV file.
//!
//! The catalog is append-only: a detection pass adds one group of records
//! sharing a freshly minted token, then the whole file is rewritten. Rows are
//! never edited or removed. The rewrite is not atomic, so a crash mid-write
//! can truncate the file.

pub mod gate;
pub mod lock;
pub mod record;

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::consts::DEFAULT_CATALOG_FILE;
use crate::detection::DetectionCandidate;
use crate::error::{CraterError, Result};
use crate::frame::ImageMetadata;
use crate::geo::GeoProjector;

pub use gate::{already_processed, existing_records};
pub use lock::CatalogLock;
pub use record::{CraterRecord, Token, CATALOG_HEADERS};

/// Where the catalog lives and how it is guarded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
    /// Hold `<path>.lock` for the duration of a pipeline run.
    #[serde(default = "default_lock")]
    pub lock: bool,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from(DEFAULT_CATALOG_FILE)
}
fn default_lock() -> bool {
    true
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            lock: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Catalog {
    path: PathBuf,
    records: Vec<CraterRecord>,
}

impl Catalog {
    /// Read the catalog at `config.path`.
    ///
    /// A missing or zero-length file yields an empty catalog. A file that
    /// exists but cannot be parsed is an error and is left as is.
    pub fn load(config: &CatalogConfig) -> Result<Self> {
        let path = &config.path;
        let metadata = match fs::metadata(path) {
            Ok(m) => m,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(catalog = %path.display(), "no catalog yet, starting empty");
                return Ok(Self::from_records(path, Vec::new()));
            }
            Err(e) => return Err(load_error(path, e)),
        };
        if metadata.len() == 0 {
            return Ok(Self::from_records(path, Vec::new()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| load_error(path, e))?;
        let mut records = Vec::new();
        for row in reader.deserialize::<CraterRecord>() {
            records.push(row.map_err(|e| load_error(path, e))?);
        }

        debug!(catalog = %path.display(), rows = records.len(), "catalog loaded");
        Ok(Self::from_records(path, records))
    }

    pub fn from_records(path: impl Into<PathBuf>, records: Vec<CraterRecord>) -> Self {
        Self {
            path: path.into(),
            records,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[CraterRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct image ids.
    pub fn image_count(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.image_id.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// `floor(max numeric token) + 1`, or 1 when no token is numeric.
    pub fn next_token(&self) -> Token {
        let max = self
            .records
            .iter()
            .filter_map(|r| r.token.as_number())
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))));
        let next = max.map_or(1, |m| m.floor().max(0.0) as u64 + 1);
        Token::from_number(next)
    }

    /// Append `records` and rewrite the backing file.
    pub fn append(&mut self, records: Vec<CraterRecord>) -> Result<()> {
        let added = records.len();
        self.records.extend(records);
        self.write()?;
        info!(catalog = %self.path.display(), added, total = self.records.len(), "catalog updated");
        Ok(())
    }

    fn write(&self) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)
            .map_err(|e| write_error(&self.path, e))?;
        writer
            .write_record(CATALOG_HEADERS)
            .map_err(|e| write_error(&self.path, e))?;
        for record in &self.records {
            writer
                .serialize(record)
                .map_err(|e| write_error(&self.path, e))?;
        }
        writer.flush().map_err(|e| write_error(&self.path, e))?;
        Ok(())
    }
}

/// Build the record group for one detection pass.
pub fn records_from_candidates(
    image_id: &str,
    token: &Token,
    candidates: &[DetectionCandidate],
    geo: &dyn GeoProjector,
    meta: &ImageMetadata,
) -> Vec<CraterRecord> {
    candidates
        .iter()
        .map(|c| {
            let point = geo.pixel_to_geo(meta, c.x as f64, c.y as f64);
            CraterRecord {
                image_id: image_id.to_string(),
                latitude: Some(point.latitude),
                longitude: Some(point.longitude),
                threshold: Some(c.confidence),
                token: token.clone(),
                center_x: Some(c.x as i64),
                center_y: Some(c.y as i64),
                radius: c.radius,
            }
        })
        .collect()
}

fn load_error(path: &Path, reason: impl ToString) -> CraterError {
    CraterError::CatalogLoad {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn write_error(path: &Path, reason: impl ToString) -> CraterError {
    CraterError::CatalogWrite {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
