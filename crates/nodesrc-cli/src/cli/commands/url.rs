//! `nodesrc url` – print the dist URL for a release.

use anyhow::Result;
use nodesrc_core::config::NodeSrcConfig;
use nodesrc_core::url_model;

pub fn run_url(cfg: &NodeSrcConfig, version: &str) -> Result<()> {
    println!("{}", url_model::dist_url(&cfg.dist_host, version)?);
    Ok(())
}
