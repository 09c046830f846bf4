//! Dump every catalog table as `<key>.csv` plus `catalog.json`.
//!
//! Usage: `export_catalog <out_dir>`

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use ncat_dashboard::data::Catalog;
use ncat_dashboard::export::export_catalog;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(out_dir) = args.next().map(PathBuf::from) else {
        bail!("usage: export_catalog <out_dir>");
    };

    let catalog = Catalog::load().context("building the dataset catalog")?;
    let written = export_catalog(&catalog, &out_dir)?;
    for path in &written {
        println!("{}", path.display());
    }
    Ok(())
}
