//! `nodesrc download` – fetch the archive and keep it.

use anyhow::Result;
use nodesrc_core::config::NodeSrcConfig;
use nodesrc_core::pipeline;
use std::path::Path;

use crate::cli::console::ConsoleReporter;

pub fn run_download(cfg: &NodeSrcConfig, version: &str, work_dir: &Path) -> Result<()> {
    let mut reporter = ConsoleReporter::stdout();
    let (archive, summary) = pipeline::download_only(cfg, version, work_dir, &mut reporter)?;
    println!("Saved {} bytes to {}", summary.bytes, archive.display());
    Ok(())
}
