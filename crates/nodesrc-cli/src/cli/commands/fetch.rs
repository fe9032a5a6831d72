//! `nodesrc fetch` – download, extract, remove the archive.

use anyhow::Result;
use nodesrc_core::config::NodeSrcConfig;
use nodesrc_core::pipeline;
use std::path::Path;

use crate::cli::console::ConsoleReporter;

pub fn run_fetch(cfg: &NodeSrcConfig, version: &str, work_dir: &Path) -> Result<()> {
    let mut reporter = ConsoleReporter::stdout();
    let summary = pipeline::run(cfg, version, work_dir, &mut reporter)?;
    tracing::info!(
        url = %summary.url,
        bytes = summary.download.bytes,
        files = summary.extract.files,
        "fetch completed"
    );
    println!(
        "Extracted {} files ({} directories) from {}",
        summary.extract.files, summary.extract.directories, summary.url
    );
    Ok(())
}
