use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use crater_core::catalog::{already_processed, existing_records, Catalog, CatalogConfig};

use crate::summary::print_records;

#[derive(Args)]
pub struct LookupArgs {
    /// Image id to look up (exact match)
    pub image: PathBuf,

    /// Catalog CSV file [default: crater_coordinates.csv]
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

pub fn run(args: &LookupArgs) -> Result<()> {
    let mut config = CatalogConfig::default();
    if let Some(ref path) = args.catalog {
        config.path = path.clone();
    }
    let catalog = Catalog::load(&config)
        .with_context(|| format!("Failed to load catalog {}", config.path.display()))?;

    let image_id = args.image.to_string_lossy();
    if already_processed(&catalog, &image_id).is_none() {
        println!("{image_id} is not cataloged");
        return Ok(());
    }
    print_records(&image_id, &existing_records(&catalog, &image_id));
    Ok(())
}
