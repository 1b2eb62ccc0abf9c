use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use crater_core::catalog::{Catalog, CatalogConfig};

use crate::summary::print_catalog_summary;

#[derive(Args)]
pub struct CatalogArgs {
    /// Catalog CSV file [default: crater_coordinates.csv]
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

pub fn run(args: &CatalogArgs) -> Result<()> {
    let mut config = CatalogConfig::default();
    if let Some(ref path) = args.catalog {
        config.path = path.clone();
    }
    let catalog = Catalog::load(&config)
        .with_context(|| format!("Failed to load catalog {}", config.path.display()))?;
    print_catalog_summary(&catalog);
    Ok(())
}
