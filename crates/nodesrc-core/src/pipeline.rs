//! Download, extract, clean up.
//!
//! Runs the steps in order on the calling thread. Any failure stops the run
//! and is returned as-is; the archive (or its `.part` file) and whatever was
//! already extracted stay on disk.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::NodeSrcConfig;
use crate::downloader::{self, DownloadSummary};
use crate::extract::{self, ExtractOptions, ExtractSummary};
use crate::progress::{Progress, ProgressReporter, Stage};
use crate::url_model;

/// What a full run produced.
#[derive(Debug, Clone)]
pub struct FetchSummary {
    pub url: String,
    /// Where the archive was written (removed again by the time `run` returns).
    pub archive: PathBuf,
    pub download: DownloadSummary,
    pub extract: ExtractSummary,
}

/// Archive location inside `work_dir`.
pub fn archive_path(cfg: &NodeSrcConfig, work_dir: &Path) -> PathBuf {
    work_dir.join(&cfg.archive_name)
}

/// Full pipeline for `version`: build the dist URL, download, extract into `work_dir`, remove the archive.
pub fn run(
    cfg: &NodeSrcConfig,
    version: &str,
    work_dir: &Path,
    reporter: &mut dyn ProgressReporter,
) -> Result<FetchSummary> {
    let url = url_model::dist_url(&cfg.dist_host, version)?;
    run_url(cfg, &url, work_dir, reporter)
}

/// Same as `run` for an explicit URL.
pub fn run_url(
    cfg: &NodeSrcConfig,
    url: &str,
    work_dir: &Path,
    reporter: &mut dyn ProgressReporter,
) -> Result<FetchSummary> {
    let archive = archive_path(cfg, work_dir);
    let download = download_url(cfg, url, &archive, reporter)?;
    let extract = extract_only(cfg, &archive, work_dir, reporter)?;

    fs::remove_file(&archive)
        .with_context(|| format!("failed to remove {}", archive.display()))?;
    tracing::debug!(archive = %archive.display(), "removed archive");

    Ok(FetchSummary {
        url: url.to_string(),
        archive,
        download,
        extract,
    })
}

/// Download only: fetch `version` into `work_dir/<archive_name>` and keep it.
pub fn download_only(
    cfg: &NodeSrcConfig,
    version: &str,
    work_dir: &Path,
    reporter: &mut dyn ProgressReporter,
) -> Result<(PathBuf, DownloadSummary)> {
    let url = url_model::dist_url(&cfg.dist_host, version)?;
    let archive = archive_path(cfg, work_dir);
    let summary = download_url(cfg, &url, &archive, reporter)?;
    Ok((archive, summary))
}

/// Extract only: unpack an existing archive into `dest_dir`. The archive is kept.
pub fn extract_only(
    cfg: &NodeSrcConfig,
    archive: &Path,
    dest_dir: &Path,
    reporter: &mut dyn ProgressReporter,
) -> Result<ExtractSummary> {
    let options = ExtractOptions {
        report_every: cfg.extract_report_every,
        ..ExtractOptions::default()
    };
    reporter.stage_started(Stage::Extract);
    let summary = extract::extract_tar_gz(archive, dest_dir, &options, &mut |p: Progress| {
        reporter.extract(p)
    })
    .with_context(|| format!("extracting {}", archive.display()))?;
    reporter.stage_finished(Stage::Extract);
    Ok(summary)
}

fn download_url(
    cfg: &NodeSrcConfig,
    url: &str,
    archive: &Path,
    reporter: &mut dyn ProgressReporter,
) -> Result<DownloadSummary> {
    tracing::info!(url, archive = %archive.display(), "downloading");
    reporter.stage_started(Stage::Download);
    let summary = downloader::download_to_file(
        url,
        archive,
        &cfg.curl_options(),
        cfg.download_report_every,
        &mut |p: Progress| reporter.download(p),
    )
    .with_context(|| format!("GET {}", url))?;
    reporter.stage_finished(Stage::Download);
    Ok(summary)
}
