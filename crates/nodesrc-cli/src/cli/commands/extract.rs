//! `nodesrc extract <archive>` – unpack an existing tarball into the working directory.

use anyhow::Result;
use nodesrc_core::config::NodeSrcConfig;
use nodesrc_core::pipeline;
use std::path::Path;

use crate::cli::console::ConsoleReporter;

pub fn run_extract(cfg: &NodeSrcConfig, archive: &Path, work_dir: &Path) -> Result<()> {
    let mut reporter = ConsoleReporter::stdout();
    let summary = pipeline::extract_only(cfg, archive, work_dir, &mut reporter)?;
    println!(
        "Extracted {} files, {} directories, {} links ({} skipped)",
        summary.files, summary.directories, summary.links, summary.skipped
    );
    Ok(())
}
